//! Runtime configuration for the `evaluate_sites` binary
//!
//! Read from environment variables:
//!
//! | Variable | Default |
//! |---|---|
//! | `SEISMIC_INTENSITY` | 7 |
//! | `DISCRIMINATION_DEPTH` | 15 |
//! | `GROUNDWATER_DEPTH` | 2.0 |
//! | `FORTIFICATION_CATEGORY` | B |
//! | `STANDARD_TABLES` | built-in tables |
//! | `OUTPUT_FORMAT` | text |

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::site::{FortificationCategory, SiteParameters};
use crate::standard::StandardTables;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(text: &str) -> Result<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("Unknown OUTPUT_FORMAT '{}' (expected text or json)", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationConfig {
    pub parameters: SiteParameters,
    pub tables_path: Option<PathBuf>,
    pub output: OutputFormat,
}

impl EvaluationConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let intensity: u8 = match lookup("SEISMIC_INTENSITY") {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("SEISMIC_INTENSITY is not an integer: '{}'", v))?,
            None => 7,
        };

        let depth: u8 = match lookup("DISCRIMINATION_DEPTH") {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("DISCRIMINATION_DEPTH is not an integer: '{}'", v))?,
            None => 15,
        };

        let groundwater_depth: f64 = match lookup("GROUNDWATER_DEPTH") {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("GROUNDWATER_DEPTH is not a number: '{}'", v))?,
            None => 2.0,
        };

        let category = match lookup("FORTIFICATION_CATEGORY") {
            Some(v) => FortificationCategory::parse(&v)?,
            None => FortificationCategory::default(),
        };

        let parameters = SiteParameters::from_raw(intensity, depth, groundwater_depth)?
            .with_category(category);

        let output = match lookup("OUTPUT_FORMAT") {
            Some(v) => OutputFormat::parse(&v)?,
            None => OutputFormat::default(),
        };

        Ok(Self {
            parameters,
            tables_path: lookup("STANDARD_TABLES").map(PathBuf::from),
            output,
        })
    }

    /// Built-in tables unless `STANDARD_TABLES` points at a file
    pub fn load_tables(&self) -> Result<StandardTables> {
        match &self.tables_path {
            Some(path) => StandardTables::load(path),
            None => Ok(StandardTables::default()),
        }
    }
}
