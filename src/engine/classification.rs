//! Liquefaction classification by ILE and discrimination depth.
//!
//! Intervals are half-open with the lower bound exclusive, so a boundary
//! value stays in the lower band (ILE = 5.0 at 15 m is Slight).

use serde::Serialize;

use crate::site::DiscriminationDepth;
use crate::standard::{standard, StandardTables};

/// Liquefaction grade of a site
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ClassificationBand {
    /// ILE = 0: no layer liquefies
    NotLiquefiable,
    Slight,
    Moderate,
    Severe,
}

impl ClassificationBand {
    pub fn display_text(&self) -> &'static str {
        match self {
            ClassificationBand::NotLiquefiable => "No liquefaction",
            ClassificationBand::Slight => "Slight",
            ClassificationBand::Moderate => "Moderate",
            ClassificationBand::Severe => "Severe",
        }
    }

    pub fn is_liquefiable(&self) -> bool {
        *self != ClassificationBand::NotLiquefiable
    }
}

/// Classify an ILE value with the built-in thresholds
pub fn classify(ile: f64, depth: DiscriminationDepth) -> ClassificationBand {
    classify_with(standard(), ile, depth)
}

/// Classify an ILE value with a given table set
pub fn classify_with(
    tables: &StandardTables,
    ile: f64,
    depth: DiscriminationDepth,
) -> ClassificationBand {
    let row = tables.thresholds.for_depth(depth);

    if ile <= 0.0 {
        ClassificationBand::NotLiquefiable
    } else if ile <= row.slight_max {
        ClassificationBand::Slight
    } else if ile <= row.moderate_max {
        ClassificationBand::Moderate
    } else {
        ClassificationBand::Severe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_at_15m() {
        let d = DiscriminationDepth::Fifteen;
        assert_eq!(classify(0.0, d), ClassificationBand::NotLiquefiable);
        assert_eq!(classify(0.0001, d), ClassificationBand::Slight);
        assert_eq!(classify(5.0, d), ClassificationBand::Slight);
        assert_eq!(classify(5.0001, d), ClassificationBand::Moderate);
        assert_eq!(classify(15.0, d), ClassificationBand::Moderate);
        assert_eq!(classify(15.0001, d), ClassificationBand::Severe);
    }

    #[test]
    fn test_boundaries_at_20m() {
        let d = DiscriminationDepth::Twenty;
        assert_eq!(classify(6.0, d), ClassificationBand::Slight);
        assert_eq!(classify(6.0001, d), ClassificationBand::Moderate);
        assert_eq!(classify(18.0, d), ClassificationBand::Moderate);
        assert_eq!(classify(18.0001, d), ClassificationBand::Severe);
    }

    #[test]
    fn test_same_ile_differs_by_depth() {
        // 5.5 is Moderate at 15 m but still Slight at 20 m
        assert_eq!(classify(5.5, DiscriminationDepth::Fifteen), ClassificationBand::Moderate);
        assert_eq!(classify(5.5, DiscriminationDepth::Twenty), ClassificationBand::Slight);
    }

    #[test]
    fn test_band_ordering() {
        assert!(ClassificationBand::Severe > ClassificationBand::Moderate);
        assert!(ClassificationBand::Slight > ClassificationBand::NotLiquefiable);
        assert!(!ClassificationBand::NotLiquefiable.is_liquefiable());
    }
}
