//! Anti-Liquefaction Measures Lookup
//!
//! Static mapping from (classification band, fortification category) to the
//! recommended measure. Nothing here is computed.

use crate::engine::ClassificationBand;
use crate::site::FortificationCategory;

/// Measure text when the site is not liquefiable
pub const NO_MEASURES_REQUIRED: &str = "No anti-liquefaction measures required";

/// One row of the measures table: Slight, Moderate, Severe
struct MeasureRow {
    slight: &'static str,
    moderate: &'static str,
    severe: &'static str,
}

static CATEGORY_B: MeasureRow = MeasureRow {
    slight: "Partially eliminate liquefaction settlement, or treat foundation and superstructure",
    moderate: "Completely eliminate liquefaction settlement, or partially eliminate and treat foundation and superstructure",
    severe: "Completely eliminate liquefaction settlement",
};

static CATEGORY_C: MeasureRow = MeasureRow {
    slight: "Treat foundation and superstructure, or no measures may be taken",
    moderate: "Treat foundation and superstructure, or take more stringent measures",
    severe: "Completely eliminate liquefaction settlement, or partially eliminate and treat foundation and superstructure",
};

static CATEGORY_D: MeasureRow = MeasureRow {
    slight: "No measures may be taken",
    moderate: "No measures may be taken",
    severe: "Treat foundation and superstructure, or take other economical measures",
};

/// Recommended anti-liquefaction measure for a band and fortification category
pub fn anti_liquefaction_measure(
    band: ClassificationBand,
    category: FortificationCategory,
) -> &'static str {
    let row = match category {
        FortificationCategory::B => &CATEGORY_B,
        FortificationCategory::C => &CATEGORY_C,
        FortificationCategory::D => &CATEGORY_D,
    };

    match band {
        ClassificationBand::NotLiquefiable => NO_MEASURES_REQUIRED,
        ClassificationBand::Slight => row.slight,
        ClassificationBand::Moderate => row.moderate,
        ClassificationBand::Severe => row.severe,
    }
}
