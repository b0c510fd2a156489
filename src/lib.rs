//! SPT Liquefaction Index Engine
//!
//! Seismic sand-liquefaction classification from Standard Penetration Test
//! borehole data.
//!
//! Module layout:
//! - `site`: input types (site parameters, soil layers)
//! - `standard/`: reference coefficients and the measures lookup
//! - `resolver`: critical SPT value Ncr per layer
//! - `engine/`: safety factors, liquefaction index ILE, classification
//! - `points`: multi-point collection with parallel batch evaluation
//! - `import/`: CSV/Parquet table import with column auto-detection
//! - `report/`: text and JSON rendering
//! - `config`: environment configuration for the `evaluate_sites` binary

pub mod error;
pub mod site;
pub mod standard;
pub mod resolver;
pub mod engine;
pub mod points;
pub mod import;
pub mod report;
pub mod config;

// Re-export commonly used types
pub use error::LiquefactionError;
pub use site::{
    DiscriminationDepth, FortificationCategory, SeismicIntensity, SiteParameters, SiteRecord,
    SoilLayer,
};
pub use standard::{anti_liquefaction_measure, standard, StandardTables};
pub use resolver::{resolve_critical_value, resolve_with, CriticalValue};
pub use engine::{
    classify, evaluate, evaluate_with, ClassificationBand, LayerResult, ProfilePoint,
    ResultRecord, LIQUEFACTION_THRESHOLD_FS,
};
pub use points::{PointOutcome, SitePoints, SitePointsError};
