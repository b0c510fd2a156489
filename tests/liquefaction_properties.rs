//! Engine Property Tests
//!
//! End-to-end checks of the liquefaction index engine through the public API:
//! non-negativity, determinism, order independence, zero-contribution rules,
//! classification boundaries and input validation.

use approx::assert_relative_eq;
use spt_liquefaction::{
    classify, evaluate, evaluate_with, resolve_critical_value, ClassificationBand,
    DiscriminationDepth, LiquefactionError, SeismicIntensity, SiteParameters, SiteRecord,
    SoilLayer, StandardTables,
};

fn params(intensity: u8, depth: u8, dw: f64) -> SiteParameters {
    SiteParameters::from_raw(intensity, depth, dw).unwrap()
}

/// A varied set of sites covering all intensities, both depths, water tables
/// above and below the SPT points, and layers past 20 m
fn sample_sites() -> Vec<SiteRecord> {
    let mut sites = Vec::new();
    for intensity in [7u8, 8, 9] {
        for depth in [15u8, 20] {
            for dw in [0.0, 1.5, 4.0] {
                let layers = vec![
                    SoilLayer::new(1.0, 6.0, 1.0),
                    SoilLayer::new(3.5, 11.0, 2.5),
                    SoilLayer::new(6.0, 25.0, 2.0),
                    SoilLayer::new(9.0, 14.0, 3.0),
                    SoilLayer::new(14.0, 30.0, 1.5),
                    SoilLayer::new(17.5, 12.0, 2.0),
                    SoilLayer::new(22.0, 8.0, 3.0),
                ];
                sites.push(SiteRecord::new(params(intensity, depth, dw), layers));
            }
        }
    }
    sites
}

#[test]
fn test_ile_is_never_negative() {
    for site in sample_sites() {
        let result = evaluate(&site).unwrap();
        assert!(result.ile >= 0.0);
        assert!(result.layers.iter().all(|l| l.contribution >= 0.0));
    }
}

#[test]
fn test_zero_ile_iff_no_contributing_layer() {
    for site in sample_sites() {
        let result = evaluate(&site).unwrap();
        let cutoff = site.parameters.discrimination_depth.meters();

        let any_contributing = result
            .layers
            .iter()
            .any(|l| l.safety_factor < 1.0 && l.saturated_depth <= cutoff);

        assert_eq!(result.ile > 0.0, any_contributing);
        assert_eq!(result.band == ClassificationBand::NotLiquefiable, !any_contributing);
    }
}

#[test]
fn test_reevaluation_is_identical() {
    for site in sample_sites() {
        let first = evaluate(&site).unwrap();
        let second = evaluate(&site).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_layer_order_does_not_change_ile() {
    for site in sample_sites() {
        let forward = evaluate(&site).unwrap();

        let mut reversed_site = site.clone();
        reversed_site.layers.reverse();
        let reversed = evaluate(&reversed_site).unwrap();

        assert_relative_eq!(forward.ile, reversed.ile, epsilon = 1e-9);
        assert_eq!(forward.band, reversed.band);

        // Results follow input order
        let depths: Vec<f64> = reversed.layers.iter().map(|l| l.saturated_depth).collect();
        let expected: Vec<f64> = reversed_site.layers.iter().map(|l| l.saturated_depth).collect();
        assert_eq!(depths, expected);
    }
}

#[test]
fn test_layer_at_or_above_critical_value_contributes_zero() {
    let ncr = resolve_critical_value(SeismicIntensity::Nine, 1.0, 4.0).unwrap();

    for thickness in [0.1, 1.0, 10.0, 100.0] {
        for n in [ncr, ncr * 1.5] {
            let site = SiteRecord::new(params(9, 20, 1.0), vec![SoilLayer::new(4.0, n, thickness)]);
            let result = evaluate(&site).unwrap();
            assert_eq!(result.layers[0].contribution, 0.0);
            assert_eq!(result.ile, 0.0);
        }
    }
}

#[test]
fn test_boundaries_15m() {
    let d = DiscriminationDepth::Fifteen;
    assert_eq!(classify(5.0, d), ClassificationBand::Slight);
    assert_eq!(classify(5.0001, d), ClassificationBand::Moderate);
    assert_eq!(classify(15.0, d), ClassificationBand::Moderate);
    assert_eq!(classify(15.0001, d), ClassificationBand::Severe);
}

#[test]
fn test_boundaries_20m() {
    let d = DiscriminationDepth::Twenty;
    assert_eq!(classify(6.0, d), ClassificationBand::Slight);
    assert_eq!(classify(6.0001, d), ClassificationBand::Moderate);
    assert_eq!(classify(18.0, d), ClassificationBand::Moderate);
    assert_eq!(classify(18.0001, d), ClassificationBand::Severe);
}

#[test]
fn test_invalid_inputs() {
    let empty = SiteRecord::new(params(7, 15, 2.0), vec![]);
    assert!(matches!(evaluate(&empty), Err(LiquefactionError::InvalidSite { .. })));

    let zero_n = SiteRecord::new(params(7, 15, 2.0), vec![SoilLayer::new(3.0, 0.0, 1.0)]);
    assert!(matches!(evaluate(&zero_n), Err(LiquefactionError::InvalidSite { .. })));

    for layer in [
        SoilLayer::new(5.0, 10.0, 0.0),
        SoilLayer::new(5.0, f64::NAN, 1.0),
        SoilLayer::new(5.0, 10.0, f64::INFINITY),
    ] {
        let site = SiteRecord::new(params(7, 15, 2.0), vec![layer]);
        assert!(matches!(evaluate(&site), Err(LiquefactionError::InvalidSite { .. })));
    }

    let overflowing = SiteRecord::new(params(8, 15, 2.0), vec![SoilLayer::new(5.0, 1.0, 1e308)]);
    assert!(matches!(evaluate(&overflowing), Err(LiquefactionError::InvalidSite { .. })));

    assert!(matches!(
        SiteParameters::from_raw(6, 15, 2.0),
        Err(LiquefactionError::InvalidParameter { .. })
    ));
    assert!(matches!(
        SeismicIntensity::try_from(6u8),
        Err(LiquefactionError::InvalidParameter { .. })
    ));
}

#[test]
fn test_end_to_end_intensity_8() {
    // N0(8) = 15; ds 5 > dw 2 -> factor 1 + 0.1 × 3 = 1.3; Ncr = 19.5
    // FS = 10 / 19.5; W(5) = 10; ILE = (1 - FS) × 10 × 3 = 570 / 39
    let site = SiteRecord::new(params(8, 15, 2.0), vec![SoilLayer::new(5.0, 10.0, 3.0)]);
    let result = evaluate(&site).unwrap();

    assert_relative_eq!(result.layers[0].ncr, 19.5, epsilon = 1e-12);
    assert_relative_eq!(result.layers[0].safety_factor, 0.512_820_512_820_512_8, epsilon = 1e-12);
    assert_relative_eq!(result.ile, 14.615_384_615_384_615, epsilon = 1e-9);
    assert_eq!(result.band, ClassificationBand::Moderate);
}

#[test]
fn test_properties_hold_for_alternative_tables() {
    let mut tables = StandardTables::default();
    tables.reference_values.intensity_7 = 10.0;
    tables.depth_adjustment.below_water_slope = 0.08;
    tables.thresholds.depth_15m.slight_max = 4.0;
    tables.validate().unwrap();

    for site in sample_sites() {
        let result = evaluate_with(&site, &tables).unwrap();
        assert!(result.ile >= 0.0);

        let mut reversed_site = site.clone();
        reversed_site.layers.reverse();
        let reversed = evaluate_with(&reversed_site, &tables).unwrap();
        assert_relative_eq!(result.ile, reversed.ile, epsilon = 1e-9);
    }
}

#[test]
fn test_safety_factor_profile_follows_layers() {
    let result = evaluate(&SiteRecord::default()).unwrap();
    let profile = result.safety_factor_profile();

    assert_eq!(profile.len(), 5);
    for (point, layer) in profile.iter().zip(&result.layers) {
        assert_eq!(point.depth, layer.saturated_depth);
        assert_eq!(point.safety_factor, layer.safety_factor);
    }
}
