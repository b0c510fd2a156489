//! Result rendering
//!
//! Text and JSON output for single results and batch outcomes. Chart data
//! comes from [`crate::engine::ResultRecord::safety_factor_profile`].

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextReport;
