//! Reference Tables
//!
//! All governing-standard coefficients used by the resolver and the engine:
//! base critical values N0, the depth adjustment slopes, the depth weighting
//! bands and the classification thresholds.
//!
//! The built-in values are the defaults; a JSON file with the same shape can
//! replace them (see [`StandardTables::load`]).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::site::{DiscriminationDepth, SeismicIntensity};

// ============================================================================
// BUILT-IN COEFFICIENTS
// ============================================================================

/// Base critical SPT value N0 at 7 degrees
pub const N0_INTENSITY_7: f64 = 13.0;
/// Base critical SPT value N0 at 8 degrees
pub const N0_INTENSITY_8: f64 = 15.0;
/// Base critical SPT value N0 at 9 degrees
pub const N0_INTENSITY_9: f64 = 19.0;

/// Factor increase per metre the SPT point sits above the water table
pub const ABOVE_WATER_SLOPE: f64 = 0.05;
/// Factor increase per metre the SPT point sits below the water table
pub const BELOW_WATER_SLOPE: f64 = 0.1;

/// Depth weighting bands, shallowest first. Deeper than the last band: 0.
pub const WEIGHT_BANDS: [WeightBand; 3] = [
    WeightBand { max_depth: 5.0, weight: 10.0 },
    WeightBand { max_depth: 15.0, weight: 5.0 },
    WeightBand { max_depth: 20.0, weight: 2.0 },
];

/// ILE upper bounds of Slight and Moderate at 15 m discrimination depth
pub const THRESHOLDS_15M: BandThresholds = BandThresholds {
    slight_max: 5.0,
    moderate_max: 15.0,
};

/// ILE upper bounds of Slight and Moderate at 20 m discrimination depth
pub const THRESHOLDS_20M: BandThresholds = BandThresholds {
    slight_max: 6.0,
    moderate_max: 18.0,
};

// ============================================================================
// TABLE TYPES
// ============================================================================

/// N0 per seismic intensity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceValues {
    pub intensity_7: f64,
    pub intensity_8: f64,
    pub intensity_9: f64,
}

impl ReferenceValues {
    pub fn n0(&self, intensity: SeismicIntensity) -> f64 {
        match intensity {
            SeismicIntensity::Seven => self.intensity_7,
            SeismicIntensity::Eight => self.intensity_8,
            SeismicIntensity::Nine => self.intensity_9,
        }
    }
}

/// Piecewise-linear correction of N0 for the SPT depth relative to the
/// groundwater level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthAdjustment {
    pub above_water_slope: f64,
    pub below_water_slope: f64,
}

impl DepthAdjustment {
    /// Multiplier applied to N0.
    ///
    /// - ds <= dw: `1 + above_water_slope * (dw - ds)`
    /// - ds > dw:  `1 + below_water_slope * (ds - dw)`
    pub fn factor(&self, saturated_depth: f64, groundwater_depth: f64) -> f64 {
        if saturated_depth <= groundwater_depth {
            1.0 + self.above_water_slope * (groundwater_depth - saturated_depth)
        } else {
            1.0 + self.below_water_slope * (saturated_depth - groundwater_depth)
        }
    }
}

/// Layers with ds <= max_depth (and deeper than the previous band) get `weight`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightBand {
    pub max_depth: f64,
    pub weight: f64,
}

/// Upper (inclusive) ILE bounds of the Slight and Moderate bands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandThresholds {
    pub slight_max: f64,
    pub moderate_max: f64,
}

/// Threshold row per discrimination depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    pub depth_15m: BandThresholds,
    pub depth_20m: BandThresholds,
}

impl ClassificationThresholds {
    pub fn for_depth(&self, depth: DiscriminationDepth) -> &BandThresholds {
        match depth {
            DiscriminationDepth::Fifteen => &self.depth_15m,
            DiscriminationDepth::Twenty => &self.depth_20m,
        }
    }
}

/// Complete coefficient set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardTables {
    pub reference_values: ReferenceValues,
    pub depth_adjustment: DepthAdjustment,
    pub weight_bands: Vec<WeightBand>,
    pub thresholds: ClassificationThresholds,
}

impl Default for StandardTables {
    fn default() -> Self {
        Self {
            reference_values: ReferenceValues {
                intensity_7: N0_INTENSITY_7,
                intensity_8: N0_INTENSITY_8,
                intensity_9: N0_INTENSITY_9,
            },
            depth_adjustment: DepthAdjustment {
                above_water_slope: ABOVE_WATER_SLOPE,
                below_water_slope: BELOW_WATER_SLOPE,
            },
            weight_bands: WEIGHT_BANDS.to_vec(),
            thresholds: ClassificationThresholds {
                depth_15m: THRESHOLDS_15M,
                depth_20m: THRESHOLDS_20M,
            },
        }
    }
}

/// Shared read-only instance of the built-in tables
pub fn standard() -> &'static StandardTables {
    static TABLES: OnceLock<StandardTables> = OnceLock::new();
    TABLES.get_or_init(StandardTables::default)
}

impl StandardTables {
    /// Load a table set from a JSON file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read standard tables file: {:?}", path))?;

        let tables: StandardTables = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse standard tables JSON")?;

        tables
            .validate()
            .with_context(|| format!("Invalid standard tables in {:?}", path))?;

        Ok(tables)
    }

    /// Reject coefficient sets that would break the engine's invariants
    /// (positive Ncr, non-negative ILE, monotonic bands)
    pub fn validate(&self) -> Result<()> {
        for intensity in SeismicIntensity::ALL {
            let n0 = self.reference_values.n0(intensity);
            if !(n0.is_finite() && n0 > 0.0) {
                anyhow::bail!("N0 for {} degrees must be positive, got {}", intensity.degrees(), n0);
            }
        }

        let adj = &self.depth_adjustment;
        for (name, slope) in [
            ("above_water_slope", adj.above_water_slope),
            ("below_water_slope", adj.below_water_slope),
        ] {
            if !(slope.is_finite() && slope >= 0.0) {
                anyhow::bail!("{} must be >= 0, got {}", name, slope);
            }
        }

        if self.weight_bands.is_empty() {
            anyhow::bail!("At least one weight band is required");
        }
        let mut previous_depth = 0.0;
        for band in &self.weight_bands {
            if !(band.max_depth.is_finite() && band.max_depth > previous_depth) {
                anyhow::bail!(
                    "Weight band depths must be positive and strictly ascending (got {} after {})",
                    band.max_depth,
                    previous_depth
                );
            }
            if !(band.weight.is_finite() && band.weight >= 0.0) {
                anyhow::bail!("Weight for band ending at {} m must be >= 0", band.max_depth);
            }
            previous_depth = band.max_depth;
        }

        for (label, row) in [
            ("15 m", &self.thresholds.depth_15m),
            ("20 m", &self.thresholds.depth_20m),
        ] {
            if !(row.slight_max > 0.0 && row.slight_max < row.moderate_max) {
                anyhow::bail!(
                    "{} thresholds must satisfy 0 < slight_max < moderate_max (got {} / {})",
                    label,
                    row.slight_max,
                    row.moderate_max
                );
            }
        }

        Ok(())
    }

    /// Depth weighting factor W(ds).
    ///
    /// Zero below the discrimination depth regardless of the bands.
    pub fn weight(&self, saturated_depth: f64, depth: DiscriminationDepth) -> f64 {
        if saturated_depth > depth.meters() {
            return 0.0;
        }

        self.weight_bands
            .iter()
            .find(|band| saturated_depth <= band.max_depth)
            .map(|band| band.weight)
            .unwrap_or(0.0)
    }
}
