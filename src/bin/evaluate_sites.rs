// Batch liquefaction evaluation
//
// Usage: evaluate_sites [TABLE.csv|TABLE.parquet]
// Without a table, evaluates the default starter point.
// Site parameters come from the environment (see spt_liquefaction::config).

use spt_liquefaction::config::{EvaluationConfig, OutputFormat};
use spt_liquefaction::import::{import_frame, read_table, AliasColumnMatcher};
use spt_liquefaction::report::{JsonFormatter, TextReport};
use spt_liquefaction::{SitePoints, SiteRecord};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spt_liquefaction=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = EvaluationConfig::from_env()?;
    let tables = config.load_tables()?;

    tracing::info!("Configuration:");
    tracing::info!("  Seismic intensity: {}", config.parameters.intensity.degrees());
    tracing::info!("  Discrimination depth: {}m", config.parameters.discrimination_depth.meters());
    tracing::info!("  Groundwater depth: {}m", config.parameters.groundwater_depth);
    tracing::info!(
        "  Tables: {}",
        config
            .tables_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string())
    );

    let points = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            tracing::info!("Reading table {:?}", path);
            let df = read_table(&path)?;
            let table = import_frame(&df, &AliasColumnMatcher)?;
            table.into_points(config.parameters)
        }
        None => {
            tracing::info!("No table given, evaluating the default point");
            let mut points = SitePoints::new();
            let mut site = SiteRecord::default();
            site.parameters = config.parameters;
            points.insert("Point 1", site);
            points
        }
    };

    let outcomes = points.evaluate_all(&tables);

    match config.output {
        OutputFormat::Json => println!("{}", JsonFormatter::format(&outcomes)?),
        OutputFormat::Text => {
            for outcome in &outcomes {
                if let Ok(record) = &outcome.result {
                    println!("=== {} ===", outcome.point_id);
                    println!("{}", TextReport::render(record));
                }
            }
            print!("{}", TextReport::render_summary(&outcomes));
        }
    }

    if !outcomes.is_empty() && outcomes.iter().all(|o| o.result.is_err()) {
        anyhow::bail!("All {} points failed to evaluate", outcomes.len());
    }

    Ok(())
}
