//! Column Recognition
//!
//! Maps arbitrary table headers onto the four fields the importer needs.
//! Matching is a strategy ([`ColumnMatcher`]) so callers can plug in their
//! own header conventions.

use serde::Serialize;

/// Fields the importer needs from a borehole table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StandardColumn {
    PointId,
    SaturatedDepth,
    MeasuredN,
    Thickness,
}

impl StandardColumn {
    pub const ALL: [StandardColumn; 4] = [
        StandardColumn::PointId,
        StandardColumn::SaturatedDepth,
        StandardColumn::MeasuredN,
        StandardColumn::Thickness,
    ];

    /// Canonical header text
    pub fn standard_name(&self) -> &'static str {
        match self {
            StandardColumn::PointId => "Point ID",
            StandardColumn::SaturatedDepth => "Saturated soil depth ds(m)",
            StandardColumn::MeasuredN => "Measured N-value",
            StandardColumn::Thickness => "Layer thickness di(m)",
        }
    }

    /// Known header variants, tried in order
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            StandardColumn::PointId => &[
                "Point ID",
                "Point No",
                "Measurement Point ID",
                "ID",
                "Point Number",
            ],
            StandardColumn::SaturatedDepth => &[
                "Saturated soil depth ds(m)",
                "Saturated depth(m)",
                "ds",
                "Saturated depth",
                "Soil depth ds",
                "Depth ds",
            ],
            StandardColumn::MeasuredN => &[
                "Measured N-value",
                "N-value",
                "Measured penetration value",
                "Standard penetration N",
                "N",
                "Blow count N",
            ],
            StandardColumn::Thickness => &[
                "Layer thickness di(m)",
                "Thickness di(m)",
                "Soil layer thickness",
                "di",
                "Thickness(m)",
                "Layer thickness di",
            ],
        }
    }
}

/// Header chosen for each standard field (None = not identified)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnMapping {
    pub point_id: Option<String>,
    pub saturated_depth: Option<String>,
    pub measured_n: Option<String>,
    pub thickness: Option<String>,
}

impl ColumnMapping {
    pub fn get(&self, column: StandardColumn) -> Option<&str> {
        match column {
            StandardColumn::PointId => self.point_id.as_deref(),
            StandardColumn::SaturatedDepth => self.saturated_depth.as_deref(),
            StandardColumn::MeasuredN => self.measured_n.as_deref(),
            StandardColumn::Thickness => self.thickness.as_deref(),
        }
    }

    pub fn set(&mut self, column: StandardColumn, header: Option<String>) {
        match column {
            StandardColumn::PointId => self.point_id = header,
            StandardColumn::SaturatedDepth => self.saturated_depth = header,
            StandardColumn::MeasuredN => self.measured_n = header,
            StandardColumn::Thickness => self.thickness = header,
        }
    }

    /// Standard fields without a header
    pub fn missing(&self) -> Vec<StandardColumn> {
        StandardColumn::ALL
            .into_iter()
            .filter(|c| self.get(*c).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}

/// Header recognition strategy
pub trait ColumnMatcher: Send + Sync {
    fn identify(&self, headers: &[String]) -> ColumnMapping;
}

/// Lowercase and keep only alphanumeric characters (CJK included)
pub fn normalize_header(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Alias-based matcher.
///
/// Per field: exact normalized standard name, then exact normalized alias,
/// then the first header (in table order) containing the standard name or
/// any alias of two or more characters. A header already taken by an earlier
/// field is never reused.
#[derive(Debug, Clone, Copy, Default)]
pub struct AliasColumnMatcher;

impl AliasColumnMatcher {
    fn match_one(
        column: StandardColumn,
        normalized: &[(String, &String)],
        claimed: &[String],
    ) -> Option<String> {
        let available: Vec<&(String, &String)> = normalized
            .iter()
            .filter(|(_, orig)| !claimed.contains(*orig))
            .collect();

        let std_norm = normalize_header(column.standard_name());
        let alias_norms: Vec<String> = column
            .aliases()
            .iter()
            .map(|a| normalize_header(a))
            .filter(|a| !a.is_empty())
            .collect();

        let exact = |needle: &str| {
            available
                .iter()
                .find(|(norm, _)| norm == needle)
                .map(|(_, orig)| (*orig).clone())
        };

        if let Some(found) = exact(&std_norm) {
            return Some(found);
        }

        for alias in &alias_norms {
            if let Some(found) = exact(alias) {
                return Some(found);
            }
        }

        available
            .iter()
            .find(|(norm, _)| {
                norm.contains(&std_norm)
                    || alias_norms
                        .iter()
                        .filter(|a| a.chars().count() >= 2)
                        .any(|a| norm.contains(a.as_str()))
            })
            .map(|(_, orig)| (*orig).clone())
    }
}

impl ColumnMatcher for AliasColumnMatcher {
    fn identify(&self, headers: &[String]) -> ColumnMapping {
        let normalized: Vec<(String, &String)> = headers
            .iter()
            .map(|h| (normalize_header(h), h))
            .filter(|(norm, _)| !norm.is_empty())
            .collect();

        let mut mapping = ColumnMapping::default();
        let mut claimed: Vec<String> = Vec::new();
        for column in StandardColumn::ALL {
            let found = Self::match_one(column, &normalized, &claimed);
            if let Some(header) = &found {
                claimed.push(header.clone());
            }
            mapping.set(column, found);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Saturated soil depth ds(m)"), "saturatedsoildepthdsm");
        assert_eq!(normalize_header(" N-value "), "nvalue");
        assert_eq!(normalize_header("标贯击数N"), "标贯击数n");
    }

    #[test]
    fn test_standard_headers() {
        let mapping = AliasColumnMatcher.identify(&headers(&[
            "Point ID",
            "Saturated soil depth ds(m)",
            "Measured N-value",
            "Layer thickness di(m)",
        ]));
        assert!(mapping.is_complete());
        assert_eq!(mapping.measured_n.as_deref(), Some("Measured N-value"));
    }

    #[test]
    fn test_alias_headers() {
        let mapping = AliasColumnMatcher.identify(&headers(&["Point No", "ds", "N", "Thickness(m)"]));
        assert_eq!(mapping.point_id.as_deref(), Some("Point No"));
        assert_eq!(mapping.saturated_depth.as_deref(), Some("ds"));
        assert_eq!(mapping.measured_n.as_deref(), Some("N"));
        assert_eq!(mapping.thickness.as_deref(), Some("Thickness(m)"));
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let mapping = AliasColumnMatcher.identify(&headers(&["point_no", "DS", "n value", "DI"]));
        assert_eq!(mapping.point_id.as_deref(), Some("point_no"));
        assert_eq!(mapping.saturated_depth.as_deref(), Some("DS"));
        assert_eq!(mapping.measured_n.as_deref(), Some("n value"));
        assert_eq!(mapping.thickness.as_deref(), Some("DI"));
    }

    #[test]
    fn test_containment_fallback() {
        let mapping = AliasColumnMatcher.identify(&headers(&[
            "Borehole Point ID",
            "Layer thickness di (m) measured",
        ]));
        assert_eq!(mapping.point_id.as_deref(), Some("Borehole Point ID"));
        assert_eq!(mapping.thickness.as_deref(), Some("Layer thickness di (m) measured"));
    }

    #[test]
    fn test_single_letter_alias_needs_exact_match() {
        // "n" alone must not pull in "Point ID" through containment
        let mapping = AliasColumnMatcher.identify(&headers(&["Point ID", "ds", "Blows"]));
        assert_eq!(mapping.measured_n, None);
    }

    #[test]
    fn test_missing_columns_reported() {
        let mapping = AliasColumnMatcher.identify(&headers(&["Point ID", "ds"]));
        assert_eq!(
            mapping.missing(),
            vec![StandardColumn::MeasuredN, StandardColumn::Thickness]
        );
    }
}
