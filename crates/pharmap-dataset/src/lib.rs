//! Regional pharmacy dataset loading.
//!
//! Reads the static JSON datasets listed in the regions manifest, validates
//! every string-encoded field eagerly, and combines the results into one
//! [`Dataset`] in manifest order.

pub mod error;
pub mod loader;
pub mod normalize;
pub mod types;

pub use error::DatasetError;
pub use loader::{load_dataset_file, load_regional_datasets, Dataset, RegionSummary};
pub use normalize::{normalize_record, parse_hhmm};
pub use types::{RawPharmacyRecord, RawScalar};
