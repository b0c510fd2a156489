//! Site Input Types
//!
//! A site is one borehole point: the site-wide seismic parameters plus the
//! ordered soil layers measured by the Standard Penetration Test.

use serde::{Deserialize, Serialize};

use crate::error::{LiquefactionError, Result};

/// Seismic intensity (degrees) the site is designed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SeismicIntensity {
    Seven,
    Eight,
    Nine,
}

impl SeismicIntensity {
    pub const ALL: [SeismicIntensity; 3] = [
        SeismicIntensity::Seven,
        SeismicIntensity::Eight,
        SeismicIntensity::Nine,
    ];

    pub fn degrees(&self) -> u8 {
        match self {
            SeismicIntensity::Seven => 7,
            SeismicIntensity::Eight => 8,
            SeismicIntensity::Nine => 9,
        }
    }
}

impl TryFrom<u8> for SeismicIntensity {
    type Error = LiquefactionError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            7 => Ok(SeismicIntensity::Seven),
            8 => Ok(SeismicIntensity::Eight),
            9 => Ok(SeismicIntensity::Nine),
            other => Err(LiquefactionError::parameter(
                "seismic_intensity",
                format!("expected 7, 8 or 9 degrees, got {}", other),
            )),
        }
    }
}

impl From<SeismicIntensity> for u8 {
    fn from(value: SeismicIntensity) -> Self {
        value.degrees()
    }
}

/// Discrimination depth (metres): the cutoff below which layers stop
/// contributing, and the selector for the classification thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DiscriminationDepth {
    Fifteen,
    Twenty,
}

impl DiscriminationDepth {
    pub fn meters(&self) -> f64 {
        match self {
            DiscriminationDepth::Fifteen => 15.0,
            DiscriminationDepth::Twenty => 20.0,
        }
    }
}

impl TryFrom<u8> for DiscriminationDepth {
    type Error = LiquefactionError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            15 => Ok(DiscriminationDepth::Fifteen),
            20 => Ok(DiscriminationDepth::Twenty),
            other => Err(LiquefactionError::parameter(
                "discrimination_depth",
                format!("expected 15 or 20 m, got {}", other),
            )),
        }
    }
}

impl From<DiscriminationDepth> for u8 {
    fn from(value: DiscriminationDepth) -> Self {
        match value {
            DiscriminationDepth::Fifteen => 15,
            DiscriminationDepth::Twenty => 20,
        }
    }
}

/// Seismic fortification category of the structure on the site.
///
/// Only used to pick the anti-liquefaction measure; it has no effect on ILE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FortificationCategory {
    #[default]
    B,
    C,
    D,
}

impl FortificationCategory {
    pub fn display_text(&self) -> &'static str {
        match self {
            FortificationCategory::B => "Category B",
            FortificationCategory::C => "Category C",
            FortificationCategory::D => "Category D",
        }
    }

    /// Parse "B", "c", "Category D", ...
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let letter = trimmed
            .strip_prefix("Category")
            .or_else(|| trimmed.strip_prefix("category"))
            .unwrap_or(trimmed)
            .trim();

        match letter {
            "B" | "b" => Ok(FortificationCategory::B),
            "C" | "c" => Ok(FortificationCategory::C),
            "D" | "d" => Ok(FortificationCategory::D),
            _ => Err(LiquefactionError::parameter(
                "fortification_category",
                format!("expected B, C or D, got '{}'", text),
            )),
        }
    }
}

/// One SPT measurement layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilLayer {
    /// Depth of the SPT point in saturated soil, ds (m)
    pub saturated_depth: f64,
    /// Measured blow count N (blows / 30 cm)
    pub measured_n: f64,
    /// Layer thickness di (m)
    pub thickness: f64,
}

impl SoilLayer {
    pub fn new(saturated_depth: f64, measured_n: f64, thickness: f64) -> Self {
        Self {
            saturated_depth,
            measured_n,
            thickness,
        }
    }
}

/// Site-wide inputs shared by every layer of a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteParameters {
    pub intensity: SeismicIntensity,
    pub discrimination_depth: DiscriminationDepth,
    /// Groundwater level depth dw (m)
    pub groundwater_depth: f64,
    #[serde(default)]
    pub fortification_category: FortificationCategory,
}

impl SiteParameters {
    /// Build from raw values, validating the enumerated inputs
    pub fn from_raw(intensity: u8, discrimination_depth: u8, groundwater_depth: f64) -> Result<Self> {
        Ok(Self {
            intensity: SeismicIntensity::try_from(intensity)?,
            discrimination_depth: DiscriminationDepth::try_from(discrimination_depth)?,
            groundwater_depth,
            fortification_category: FortificationCategory::default(),
        })
    }

    pub fn with_category(mut self, category: FortificationCategory) -> Self {
        self.fortification_category = category;
        self
    }
}

impl Default for SiteParameters {
    fn default() -> Self {
        Self {
            intensity: SeismicIntensity::Seven,
            discrimination_depth: DiscriminationDepth::Fifteen,
            groundwater_depth: 2.0,
            fortification_category: FortificationCategory::B,
        }
    }
}

/// A complete calculation request for one point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    #[serde(flatten)]
    pub parameters: SiteParameters,
    /// Layers ordered top to bottom
    pub layers: Vec<SoilLayer>,
}

impl SiteRecord {
    pub fn new(parameters: SiteParameters, layers: Vec<SoilLayer>) -> Self {
        Self { parameters, layers }
    }
}

impl Default for SiteRecord {
    /// Starter point: five 3 m layers from 1.5 m down to 13.5 m
    fn default() -> Self {
        let layers = [(1.5, 12.0), (4.5, 14.0), (7.5, 16.0), (10.5, 18.0), (13.5, 20.0)]
            .into_iter()
            .map(|(ds, n)| SoilLayer::new(ds, n, 3.0))
            .collect();

        Self {
            parameters: SiteParameters::default(),
            layers,
        }
    }
}
