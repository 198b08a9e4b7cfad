//! Shared result store: one writer, many readers.
//!
//! The writer half lives inside [`crate::RefreshPipeline`]; views get
//! [`ResultReader`] handles. Each publish swaps in a whole new
//! [`ResultSet`], so a reader always sees either the previous set or the
//! next one, never a mix.

use std::sync::Arc;

use pharmap_core::{Coordinate, Pharmacy};
use tokio::sync::watch;

use crate::clock::ScheduleMoment;

/// One published refresh result.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// Number of publishes so far; `0` for the initial empty set.
    pub generation: u64,
    pub location: Option<Coordinate>,
    pub keyword: String,
    pub moment: Option<ScheduleMoment>,
    /// Sorted ascending by distance.
    pub pharmacies: Vec<Pharmacy>,
}

impl ResultSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pharmacies.is_empty()
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Pharmacy> {
        self.pharmacies.iter().find(|p| p.id == id)
    }
}

/// Exclusive write handle. Deliberately not `Clone`.
#[derive(Debug)]
pub(crate) struct ResultWriter {
    tx: watch::Sender<Arc<ResultSet>>,
    generation: u64,
}

/// Read-only view of the latest published [`ResultSet`].
#[derive(Debug, Clone)]
pub struct ResultReader {
    rx: watch::Receiver<Arc<ResultSet>>,
}

/// Create an empty store.
pub(crate) fn result_store() -> (ResultWriter, ResultReader) {
    let (tx, rx) = watch::channel(Arc::new(ResultSet::default()));
    (ResultWriter { tx, generation: 0 }, ResultReader { rx })
}

impl ResultWriter {
    /// Replace the store contents wholesale.
    pub(crate) fn replace(
        &mut self,
        location: Coordinate,
        keyword: &str,
        moment: ScheduleMoment,
        pharmacies: Vec<Pharmacy>,
    ) -> Arc<ResultSet> {
        self.generation += 1;
        let set = Arc::new(ResultSet {
            generation: self.generation,
            location: Some(location),
            keyword: keyword.to_string(),
            moment: Some(moment),
            pharmacies,
        });
        self.tx.send_replace(Arc::clone(&set));
        set
    }
}

impl ResultReader {
    /// The latest published set. Cheap; holds no lock after returning.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ResultSet> {
        Arc::clone(&self.rx.borrow())
    }

    /// Wait until a set newer than the last one seen by this handle is
    /// published. Returns `false` once the pipeline has been dropped.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use pharmap_core::DayIndex;

    use super::*;

    fn pharmacy(id: &str, distance: f64) -> Pharmacy {
        Pharmacy {
            id: id.to_string(),
            name: format!("{id}약국"),
            phone: String::new(),
            address: String::new(),
            latitude: 37.5,
            longitude: 127.0,
            distance,
            duty_open: "0900".to_string(),
            duty_close: "1800".to_string(),
            is_open: true,
        }
    }

    fn moment() -> ScheduleMoment {
        ScheduleMoment::new(DayIndex::MONDAY, 1000).unwrap()
    }

    #[test]
    fn starts_empty_at_generation_zero() {
        let (_writer, reader) = result_store();
        let snapshot = reader.snapshot();
        assert_eq!(snapshot.generation, 0);
        assert!(snapshot.is_empty());
        assert!(snapshot.location.is_none());
    }

    #[test]
    fn replace_swaps_whole_set() {
        let (mut writer, reader) = result_store();
        let origin = Coordinate::new(37.5, 127.0);
        writer.replace(origin, "", moment(), vec![pharmacy("A", 0.1), pharmacy("B", 0.2)]);
        let first = reader.snapshot();
        assert_eq!(first.pharmacies.len(), 2);

        writer.replace(origin, "종합", moment(), Vec::new());
        let second = reader.snapshot();
        assert_eq!(second.generation, 2);
        assert_eq!(second.keyword, "종합");
        assert!(second.is_empty());

        // Earlier snapshots stay intact for readers still holding them.
        assert_eq!(first.pharmacies.len(), 2);
    }

    #[test]
    fn clones_share_the_same_store() {
        let (mut writer, reader) = result_store();
        let other = reader.clone();
        writer.replace(Coordinate::new(37.5, 127.0), "", moment(), vec![pharmacy("A", 0.1)]);
        assert_eq!(other.snapshot().find("A").map(|p| p.id.as_str()), Some("A"));
        assert!(other.snapshot().find("Z").is_none());
    }

    #[tokio::test]
    async fn changed_wakes_on_publish() {
        let (mut writer, mut reader) = result_store();
        let waiter = tokio::spawn(async move {
            let changed = reader.changed().await;
            (changed, reader.snapshot().generation)
        });
        tokio::task::yield_now().await;
        writer.replace(Coordinate::new(37.5, 127.0), "", moment(), Vec::new());
        let (changed, generation) = waiter.await.unwrap();
        assert!(changed);
        assert_eq!(generation, 1);
    }
}
