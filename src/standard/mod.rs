//! Governing-standard reference data
//!
//! - `tables.rs` - N0, depth adjustment, weighting bands, thresholds
//! - `measures.rs` - anti-liquefaction measure lookup

pub mod tables;
pub mod measures;

pub use tables::{
    standard, BandThresholds, ClassificationThresholds, DepthAdjustment, ReferenceValues,
    StandardTables, WeightBand,
};
pub use measures::{anti_liquefaction_measure, NO_MEASURES_REQUIRED};
