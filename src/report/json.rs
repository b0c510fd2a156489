use serde::Serialize;

/// JSON formatter for results and batch outcomes
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format as pretty-printed JSON
    pub fn format<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(value)
    }

    /// Format as compact JSON (no whitespace)
    pub fn format_compact<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
        serde_json::to_string(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluate;
    use crate::site::{SiteParameters, SiteRecord, SoilLayer};

    fn result() -> crate::engine::ResultRecord {
        let site = SiteRecord::new(
            SiteParameters::from_raw(8, 15, 2.0).unwrap(),
            vec![SoilLayer::new(5.0, 10.0, 3.0)],
        );
        evaluate(&site).unwrap()
    }

    #[test]
    fn test_format_json() {
        let json = JsonFormatter::format(&result()).unwrap();

        assert!(json.contains("\"band\": \"Moderate\""));
        assert!(json.contains("\"intensity\": 8"));
        assert!(json.contains("\"discrimination_depth\": 15"));
        assert!(json.contains("\"ncr\""));
    }

    #[test]
    fn test_format_compact() {
        let json = JsonFormatter::format_compact(&result()).unwrap();

        // Compact format should have no newlines (except potentially in strings)
        assert!(!json.contains("\n  "));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["layers"].as_array().unwrap().len(), 1);
        assert_eq!(value["parameters"]["fortification_category"], "B");
    }
}
