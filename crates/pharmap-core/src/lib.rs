pub mod app_config;
pub mod config;
pub mod error;
pub mod pharmacy;
pub mod regions;

pub use app_config::{AppConfig, LocationPermission};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use pharmacy::{Coordinate, DayHours, DayIndex, Pharmacy, PharmacyRecord, WeeklyHours};
pub use regions::{load_regions, RegionConfig, RegionsFile};
