//! Table Import
//!
//! Reads a borehole table (CSV, Parquet, or the first sheet of an Excel
//! workbook) into a Polars frame, resolves the columns
//! through a [`ColumnMatcher`], and groups the rows into one layer list per
//! point id.
//!
//! Points keep the order in which their id first appears in the table; layers
//! keep row order within a point.

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use polars::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

use super::columns::{ColumnMapping, ColumnMatcher, StandardColumn};
use super::ImportError;
use crate::points::SitePoints;
use crate::site::{SiteParameters, SiteRecord, SoilLayer};

/// Layers read for one point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedPoint {
    pub point_id: String,
    pub layers: Vec<SoilLayer>,
}

/// Min / max / mean of one numeric column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ColumnStats {
    fn from_values(values: impl Iterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for v in values {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }

        if count == 0 {
            return None;
        }

        Some(Self {
            min,
            max,
            mean: sum / count as f64,
        })
    }
}

/// Statistics of an imported table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSummary {
    pub total_records: usize,
    pub point_count: usize,
    /// (point id, record count) in point order
    pub records_per_point: Vec<(String, usize)>,
    pub measured_n: Option<ColumnStats>,
    pub saturated_depth: Option<ColumnStats>,
}

/// Result of importing a table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedTable {
    pub mapping: ColumnMapping,
    pub points: Vec<ImportedPoint>,
    pub summary: ImportSummary,
}

impl ImportedTable {
    /// Attach site-wide parameters to every imported point
    pub fn into_points(self, parameters: SiteParameters) -> SitePoints {
        self.points
            .into_iter()
            .map(|p| (p.point_id, SiteRecord::new(parameters, p.layers)))
            .collect()
    }
}

/// Load a `.csv` (header row required), `.parquet`, or `.xlsx`/`.xls` file
pub fn read_table(path: &Path) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .with_context(|| format!("Failed to open CSV table: {:?}", path))?
            .finish()
            .with_context(|| format!("Failed to parse CSV table: {:?}", path)),
        "parquet" => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open Parquet table: {:?}", path))?;
            ParquetReader::new(file)
                .finish()
                .with_context(|| format!("Failed to read Parquet table: {:?}", path))
        }
        "xlsx" | "xls" => read_workbook(path),
        other => Err(ImportError::UnsupportedFormat(other.to_string()).into()),
    }
}

/// First worksheet of a workbook; its first row is the header
fn read_workbook(path: &Path) -> Result<DataFrame> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open Excel workbook: {:?}", path))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow::anyhow!("Workbook has no worksheets: {:?}", path))?
        .with_context(|| format!("Failed to read first worksheet: {:?}", path))?;

    sheet_to_frame(&range)
}

static EMPTY_CELL: Data = Data::Empty;

fn sheet_to_frame(range: &Range<Data>) -> Result<DataFrame> {
    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| anyhow::anyhow!("Worksheet is empty"))?;
    let body: Vec<&[Data]> = rows.collect();

    let columns: Vec<Column> = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let name = match cell {
                Data::Empty => format!("column_{}", idx + 1),
                other => other.to_string(),
            };
            let cells: Vec<&Data> = body
                .iter()
                .map(|row| row.get(idx).unwrap_or(&EMPTY_CELL))
                .collect();
            sheet_column(&name, &cells)
        })
        .collect();

    DataFrame::new(columns).context("Failed to build table from worksheet")
}

/// Integer, float or text column depending on the cells it holds.
/// Whole-number floats stay integral so numeric point ids read as "1", not "1.0".
fn sheet_column(name: &str, cells: &[&Data]) -> Column {
    let numeric = cells
        .iter()
        .all(|c| matches!(c, Data::Int(_) | Data::Float(_) | Data::Empty));

    if numeric {
        let integral = cells.iter().all(|c| match c {
            Data::Float(f) => f.fract() == 0.0,
            _ => true,
        });

        if integral {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|c| match c {
                    Data::Int(i) => Some(*i),
                    Data::Float(f) => Some(*f as i64),
                    _ => None,
                })
                .collect();
            return Series::new(name.into(), values).into();
        }

        let values: Vec<Option<f64>> = cells
            .iter()
            .map(|c| match c {
                Data::Int(i) => Some(*i as f64),
                Data::Float(f) => Some(*f),
                _ => None,
            })
            .collect();
        return Series::new(name.into(), values).into();
    }

    let values: Vec<Option<String>> = cells
        .iter()
        .map(|c| match c {
            Data::Empty => None,
            Data::Float(f) if f.fract() == 0.0 => Some(format!("{}", *f as i64)),
            other => Some(other.to_string()),
        })
        .collect();
    Series::new(name.into(), values).into()
}

/// Resolve columns and group rows into points
pub fn import_frame(df: &DataFrame, matcher: &dyn ColumnMatcher) -> Result<ImportedTable> {
    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.as_str().to_string())
        .collect();

    let mapping = matcher.identify(&headers);
    tracing::info!(
        point_id = ?mapping.point_id,
        saturated_depth = ?mapping.saturated_depth,
        measured_n = ?mapping.measured_n,
        thickness = ?mapping.thickness,
        "Column identification"
    );

    let missing = mapping.missing();
    if !missing.is_empty() {
        for column in &missing {
            tracing::warn!("Column not identified: {}", column.standard_name());
        }
        return Err(ImportError::MissingColumns(missing).into());
    }

    let point_ids = string_column(df, &mapping, StandardColumn::PointId)?;
    let depths = float_column(df, &mapping, StandardColumn::SaturatedDepth)?;
    let n_values = float_column(df, &mapping, StandardColumn::MeasuredN)?;
    let thicknesses = float_column(df, &mapping, StandardColumn::Thickness)?;

    let mut points: Vec<ImportedPoint> = Vec::new();
    let mut index_of: FxHashMap<String, usize> = FxHashMap::default();

    for row in 0..df.height() {
        let point_id = &point_ids[row];
        let layer = SoilLayer::new(depths[row], n_values[row], thicknesses[row]);

        match index_of.get(point_id) {
            Some(&idx) => points[idx].layers.push(layer),
            None => {
                index_of.insert(point_id.clone(), points.len());
                points.push(ImportedPoint {
                    point_id: point_id.clone(),
                    layers: vec![layer],
                });
            }
        }
    }

    let summary = ImportSummary {
        total_records: df.height(),
        point_count: points.len(),
        records_per_point: points
            .iter()
            .map(|p| (p.point_id.clone(), p.layers.len()))
            .collect(),
        measured_n: ColumnStats::from_values(n_values.iter().copied()),
        saturated_depth: ColumnStats::from_values(depths.iter().copied()),
    };

    tracing::info!(
        "Imported {} records across {} points",
        summary.total_records,
        summary.point_count
    );

    Ok(ImportedTable {
        mapping,
        points,
        summary,
    })
}

fn mapped_series<'a>(
    df: &'a DataFrame,
    mapping: &ColumnMapping,
    column: StandardColumn,
) -> Result<(&'a Series, String)> {
    let header = mapping
        .get(column)
        .ok_or(ImportError::MissingColumns(vec![column]))?
        .to_string();
    let series = df
        .column(&header)
        .with_context(|| format!("Column '{}' not found in table", header))?
        .as_materialized_series();
    Ok((series, header))
}

fn float_column(df: &DataFrame, mapping: &ColumnMapping, column: StandardColumn) -> Result<Vec<f64>> {
    let (series, header) = mapped_series(df, mapping, column)?;
    let cast = series
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' is not numeric", header))?;

    // The cast turns unparsable text into null; tell those apart from empty cells
    let was_null = series.is_null();

    cast.f64()?
        .into_iter()
        .zip(was_null.into_iter())
        .enumerate()
        .map(|(row, (value, null_before))| match value {
            Some(v) => Ok(v),
            None if null_before == Some(false) => {
                let raw = series
                    .get(row)
                    .map(|v| v.str_value().into_owned())
                    .unwrap_or_default();
                Err(ImportError::InvalidNumber {
                    row: row + 1,
                    column: header.clone(),
                    value: raw,
                }
                .into())
            }
            None => Err(ImportError::MissingValue {
                row: row + 1,
                column: header.clone(),
            }
            .into()),
        })
        .collect()
}

fn string_column(df: &DataFrame, mapping: &ColumnMapping, column: StandardColumn) -> Result<Vec<String>> {
    let (series, header) = mapped_series(df, mapping, column)?;
    let cast = series
        .cast(&DataType::String)
        .with_context(|| format!("Column '{}' cannot be read as text", header))?;

    cast.str()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| match value.map(str::trim) {
            Some(id) if !id.is_empty() => Ok(id.to_string()),
            _ => Err(ImportError::MissingValue {
                row: row + 1,
                column: header.clone(),
            }
            .into()),
        })
        .collect()
}
