//! Critical-Value Resolver
//!
//! Ncr = N0(intensity) × depth factor(ds, dw)
//!
//! N0 and the depth factor slopes come from [`StandardTables`].

use serde::Serialize;

use crate::error::{LiquefactionError, Result};
use crate::site::SeismicIntensity;
use crate::standard::{standard, StandardTables};

/// Breakdown of a resolved critical value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalValue {
    /// Base reference value for the intensity
    pub n0: f64,
    /// Groundwater/depth correction multiplier (>= 1)
    pub depth_factor: f64,
    /// Critical SPT value
    pub ncr: f64,
}

fn check_depth(parameter: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(LiquefactionError::parameter(
            parameter,
            format!("must be a finite number, got {}", value),
        ));
    }
    if value < 0.0 {
        return Err(LiquefactionError::parameter(
            parameter,
            format!("must be >= 0 m, got {}", value),
        ));
    }
    Ok(())
}

/// Resolve Ncr with its N0 and depth factor using a given table set
pub fn resolve_with(
    tables: &StandardTables,
    intensity: SeismicIntensity,
    groundwater_depth: f64,
    saturated_depth: f64,
) -> Result<CriticalValue> {
    check_depth("groundwater_depth", groundwater_depth)?;
    check_depth("saturated_depth", saturated_depth)?;

    let n0 = tables.reference_values.n0(intensity);
    let depth_factor = tables
        .depth_adjustment
        .factor(saturated_depth, groundwater_depth);

    Ok(CriticalValue {
        n0,
        depth_factor,
        ncr: n0 * depth_factor,
    })
}

/// Critical SPT value for one layer using the built-in tables
pub fn resolve_critical_value(
    intensity: SeismicIntensity,
    groundwater_depth: f64,
    saturated_depth: f64,
) -> Result<f64> {
    resolve_with(standard(), intensity, groundwater_depth, saturated_depth).map(|cv| cv.ncr)
}
