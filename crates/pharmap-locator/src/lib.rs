//! Nearby-pharmacy pipeline.
//!
//! Takes the device position from a [`Geolocator`], filters the loaded
//! [`pharmap_dataset::Dataset`] to a square around it (optionally by name),
//! resolves each pharmacy's opening state for the current [`Clock`] moment,
//! ranks by distance, and publishes the result through a single-writer
//! result store that any number of views can read.

pub mod clock;
pub mod error;
pub mod favorites;
pub mod geolocate;
pub mod ranker;
pub mod refresh;
pub mod schedule;
pub mod store;

pub use clock::{Clock, FixedClock, ScheduleMoment, SystemClock};
pub use error::{FavoritesError, GeolocationError, RefreshError};
pub use favorites::{
    Favorites, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, FAVORITES_KEY,
};
pub use geolocate::{ConfiguredGeolocator, Geolocator};
pub use ranker::{rank_pharmacies, SEARCH_RANGE_DEGREES};
pub use refresh::{RefreshOutcome, RefreshPipeline};
pub use schedule::{evaluate_schedule, TodaySchedule};
pub use store::{ResultReader, ResultSet};
