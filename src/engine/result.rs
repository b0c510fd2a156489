//! Evaluation output types

use serde::Serialize;

use super::classification::ClassificationBand;
use crate::site::SiteParameters;

/// FS at or above this value means the layer does not liquefy
pub const LIQUEFACTION_THRESHOLD_FS: f64 = 1.0;

/// Per-layer calculation, in the same order as the input layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerResult {
    pub saturated_depth: f64,
    pub measured_n: f64,
    pub thickness: f64,
    /// Base reference value used for Ncr
    pub n0: f64,
    /// Critical SPT value
    pub ncr: f64,
    /// measured N / Ncr
    pub safety_factor: f64,
    /// Depth weighting factor W(ds)
    pub weight: f64,
    /// Term added into ILE
    pub contribution: f64,
}

impl LayerResult {
    pub fn is_liquefiable(&self) -> bool {
        self.safety_factor < LIQUEFACTION_THRESHOLD_FS
    }
}

/// One point of the safety-factor-vs-depth chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfilePoint {
    pub depth: f64,
    pub safety_factor: f64,
}

/// Complete evaluation of one site
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub parameters: SiteParameters,
    /// Liquefaction index ILE (>= 0)
    pub ile: f64,
    pub band: ClassificationBand,
    pub layers: Vec<LayerResult>,
    /// Recommended anti-liquefaction measure
    pub measure: &'static str,
}

impl ResultRecord {
    /// (ds, FS) pairs in layer order for plotting
    pub fn safety_factor_profile(&self) -> Vec<ProfilePoint> {
        self.layers
            .iter()
            .map(|layer| ProfilePoint {
                depth: layer.saturated_depth,
                safety_factor: layer.safety_factor,
            })
            .collect()
    }

    /// Number of layers with FS < 1
    pub fn liquefiable_layer_count(&self) -> usize {
        self.layers.iter().filter(|l| l.is_liquefiable()).count()
    }
}
