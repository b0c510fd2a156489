//! Index & Classification Engine
//!
//! Turns a [`SiteRecord`] into a [`ResultRecord`]:
//!
//! 1. Ncr per layer (critical-value resolver)
//! 2. FS = N / Ncr
//! 3. contribution = (1 - FS) × W(ds) × di when FS < 1, else 0
//! 4. ILE = Σ contribution, rejected as an invalid site if it is not finite
//! 5. band from (ILE, discrimination depth), then the measure text
//!
//! The engine is a pure function of its inputs and the tables it is given.

pub mod classification;
pub mod result;

pub use classification::{classify, classify_with, ClassificationBand};
pub use result::{LayerResult, ProfilePoint, ResultRecord, LIQUEFACTION_THRESHOLD_FS};

use crate::error::{LiquefactionError, Result};
use crate::resolver::resolve_with;
use crate::site::{SiteRecord, SoilLayer};
use crate::standard::{anti_liquefaction_measure, standard, StandardTables};

/// Evaluate a site with the built-in tables
pub fn evaluate(site: &SiteRecord) -> Result<ResultRecord> {
    evaluate_with(site, standard())
}

/// Evaluate a site with a given table set
pub fn evaluate_with(site: &SiteRecord, tables: &StandardTables) -> Result<ResultRecord> {
    validate_site(site)?;

    let params = &site.parameters;
    let mut ile = 0.0;
    let mut layers = Vec::with_capacity(site.layers.len());

    for (idx, layer) in site.layers.iter().enumerate() {
        let critical = resolve_with(
            tables,
            params.intensity,
            params.groundwater_depth,
            layer.saturated_depth,
        )
        .map_err(|e| LiquefactionError::site(format!("layer {}: {}", idx + 1, e)))?;

        let safety_factor = layer.measured_n / critical.ncr;
        let weight = tables.weight(layer.saturated_depth, params.discrimination_depth);

        let contribution = if safety_factor >= LIQUEFACTION_THRESHOLD_FS {
            0.0
        } else {
            (1.0 - safety_factor) * weight * layer.thickness
        };

        tracing::debug!(
            layer = idx + 1,
            ds = layer.saturated_depth,
            ncr = critical.ncr,
            fs = safety_factor,
            contribution,
            "Layer evaluated"
        );

        ile += contribution;
        if !ile.is_finite() {
            return Err(LiquefactionError::site(format!(
                "layer {}: liquefaction index overflows (thickness {} m)",
                idx + 1,
                layer.thickness
            )));
        }

        layers.push(LayerResult {
            saturated_depth: layer.saturated_depth,
            measured_n: layer.measured_n,
            thickness: layer.thickness,
            n0: critical.n0,
            ncr: critical.ncr,
            safety_factor,
            weight,
            contribution,
        });
    }

    let band = classify_with(tables, ile, params.discrimination_depth);
    let measure = anti_liquefaction_measure(band, params.fortification_category);

    tracing::debug!(ile, band = band.display_text(), layers = layers.len(), "Site evaluated");

    Ok(ResultRecord {
        parameters: *params,
        ile,
        band,
        layers,
        measure,
    })
}

/// Reject sites the engine cannot evaluate, before any arithmetic
fn validate_site(site: &SiteRecord) -> Result<()> {
    if site.layers.is_empty() {
        return Err(LiquefactionError::site("layer sequence is empty"));
    }

    for (idx, layer) in site.layers.iter().enumerate() {
        validate_layer(idx + 1, layer)?;
    }

    Ok(())
}

fn validate_layer(number: usize, layer: &SoilLayer) -> Result<()> {
    if !(layer.measured_n.is_finite() && layer.measured_n > 0.0) {
        return Err(LiquefactionError::site(format!(
            "layer {}: measured N must be > 0, got {}",
            number, layer.measured_n
        )));
    }
    if !(layer.thickness.is_finite() && layer.thickness > 0.0) {
        return Err(LiquefactionError::site(format!(
            "layer {}: thickness must be > 0 m, got {}",
            number, layer.thickness
        )));
    }
    Ok(())
}
