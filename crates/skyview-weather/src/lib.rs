//! Weather data model for Skyview
//!
//! Holds the metric weather snapshot, the unit conversion functions used at
//! presentation time, and the ingestion boundary that validates incoming
//! snapshots before anything else reads them.

pub mod display;
pub mod ingest;
pub mod types;
pub mod units;

pub use display::{DisplayFormatter, DisplaySnapshot};
pub use ingest::{parse_snapshot, SnapshotError, ValidationResult};
pub use types::*;
pub use units::{
    DistanceUnit, PrecipitationUnit, PressureUnit, TemperatureUnit, UnitError, UnitPreferences,
    WindSpeedUnit,
};
