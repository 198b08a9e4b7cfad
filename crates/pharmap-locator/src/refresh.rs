//! Refresh orchestration: location → rank → publish.
//!
//! Refreshes may overlap (a user can submit a second search before the first
//! one's location fix arrives). Each call takes a ticket when it starts; only
//! the most recently started refresh may publish, and the ticket check and
//! the store replacement happen under the same lock. An older refresh that
//! finishes late returns [`RefreshOutcome::Superseded`] and leaves the store
//! alone.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use pharmap_dataset::Dataset;
use tokio::sync::Mutex;

use crate::clock::{Clock, ScheduleMoment, SystemClock};
use crate::error::RefreshError;
use crate::geolocate::Geolocator;
use crate::ranker::rank_pharmacies;
use crate::store::{result_store, ResultReader, ResultSet, ResultWriter};

/// What a successful refresh did with its result.
#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    /// The result replaced the store contents.
    Published(Arc<ResultSet>),
    /// A newer refresh started first; this result was dropped.
    Superseded { ticket: u64, latest: u64 },
}

impl RefreshOutcome {
    #[must_use]
    pub fn published(&self) -> Option<&Arc<ResultSet>> {
        match self {
            RefreshOutcome::Published(set) => Some(set),
            RefreshOutcome::Superseded { .. } => None,
        }
    }
}

/// Owns the dataset and the only write handle to the result store.
pub struct RefreshPipeline<G, C = SystemClock> {
    dataset: Arc<Dataset>,
    geolocator: G,
    clock: C,
    writer: Mutex<ResultWriter>,
    reader: ResultReader,
    requested: AtomicU64,
}

impl<G: Geolocator> RefreshPipeline<G> {
    /// Pipeline using the device's local time.
    #[must_use]
    pub fn new(dataset: Arc<Dataset>, geolocator: G) -> Self {
        Self::with_clock(dataset, geolocator, SystemClock)
    }
}

impl<G: Geolocator, C: Clock> RefreshPipeline<G, C> {
    #[must_use]
    pub fn with_clock(dataset: Arc<Dataset>, geolocator: G, clock: C) -> Self {
        let (writer, reader) = result_store();
        Self {
            dataset,
            geolocator,
            clock,
            writer: Mutex::new(writer),
            reader,
            requested: AtomicU64::new(0),
        }
    }

    /// A read-only handle on the result store.
    #[must_use]
    pub fn reader(&self) -> ResultReader {
        self.reader.clone()
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Recompute nearby pharmacies for the current position and publish them.
    ///
    /// `keyword` narrows results to names containing it; blank means no name
    /// filter. An empty result is still published.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError::Geolocation`] when the position cannot be
    /// obtained. The store keeps its previous contents in that case.
    pub async fn refresh(&self, keyword: &str) -> Result<RefreshOutcome, RefreshError> {
        let ticket = self.requested.fetch_add(1, Ordering::SeqCst) + 1;

        let location = match self.geolocator.current_position().await {
            Ok(location) => location,
            Err(e) => {
                tracing::warn!(ticket, error = %e, "refresh aborted: no device position");
                return Err(e.into());
            }
        };

        let moment = ScheduleMoment::from_datetime(&self.clock.now());
        let pharmacies = rank_pharmacies(self.dataset.records(), location, keyword, moment);

        let mut writer = self.writer.lock().await;
        let latest = self.requested.load(Ordering::SeqCst);
        if ticket != latest {
            tracing::debug!(ticket, latest, "refresh superseded; discarding result");
            return Ok(RefreshOutcome::Superseded { ticket, latest });
        }

        let set = writer.replace(location, keyword, moment, pharmacies);
        tracing::info!(
            generation = set.generation,
            results = set.pharmacies.len(),
            open = set.pharmacies.iter().filter(|p| p.is_open).count(),
            day = %moment.day,
            time = moment.time,
            "published nearby pharmacies"
        );
        Ok(RefreshOutcome::Published(set))
    }
}
