//! Plain-text report formatter

use std::fmt::Write;

use crate::engine::ResultRecord;
use crate::points::PointOutcome;

const RULE_WIDTH: usize = 70;

/// Plain-text rendering of results
pub struct TextReport;

impl TextReport {
    /// Parameters, per-layer detail table, ILE, band and measure
    pub fn render(result: &ResultRecord) -> String {
        let mut out = String::new();
        let params = &result.parameters;

        // Writing into a String cannot fail
        let _ = writeln!(out, "Seismic Intensity: {} degrees", params.intensity.degrees());
        let _ = writeln!(out, "Discrimination Depth: {}m", params.discrimination_depth.meters());
        let _ = writeln!(out, "Groundwater Level Depth: {}m", params.groundwater_depth);
        let _ = writeln!(
            out,
            "Seismic Fortification Category: {}",
            params.fortification_category.display_text()
        );
        out.push('\n');

        let _ = writeln!(
            out,
            "{:^16}{:^12}{:^8}{:^10}{:^10}{:^14}",
            "Saturated Depth", "Measured N", "N0", "Ncr", "FS", "Contribution"
        );
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

        for layer in &result.layers {
            let _ = writeln!(
                out,
                "{:^16.1}{:^12.1}{:^8.0}{:^10.2}{:^10.2}{:^14.2}",
                layer.saturated_depth,
                layer.measured_n,
                layer.n0,
                layer.ncr,
                layer.safety_factor,
                layer.contribution
            );
        }

        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        let _ = writeln!(out, "Total Liquefaction Index (ILE): {:.2}", result.ile);
        let _ = writeln!(out, "Liquefaction Classification: {}", result.band.display_text());
        let _ = writeln!(out, "Anti-Liquefaction Measures: {}", result.measure);

        out
    }

    /// One line per point: id, ILE and band, or the error
    pub fn render_summary(outcomes: &[PointOutcome]) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{:<20}{:>10}  {}", "Point", "ILE", "Classification");
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

        for outcome in outcomes {
            match &outcome.result {
                Ok(record) => {
                    let _ = writeln!(
                        out,
                        "{:<20}{:>10.2}  {}",
                        outcome.point_id,
                        record.ile,
                        record.band.display_text()
                    );
                }
                Err(e) => {
                    let _ = writeln!(out, "{:<20}{:>10}  error: {}", outcome.point_id, "-", e);
                }
            }
        }

        out
    }
}
