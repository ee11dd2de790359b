mod report;

use anyhow::{Context, Result};
use backup_runtime_core::{CalculatorConfig, FoamTankSize, PoolShape, RuntimeSummary};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use report::TextReport;

/// Backup water & foam runtime report with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "runtime-report")]
#[command(about = "Backup water & foam runtime calculator", long_about = None)]
#[command(allow_negative_numbers = true)]
struct Args {
    /// JSON scenario file; fields left out use the defaults
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Number of systems drawing on the backup source (1-5)
    #[arg(long)]
    systems: Option<i64>,

    /// Zone count for every active system (1-9)
    #[arg(short, long)]
    zones: Option<i64>,

    /// Set all zones of every active system to this flow (GPM)
    #[arg(short, long)]
    gpm: Option<f64>,

    /// Foam tank for every active system in gallons (0, 25, 50, 100, 150)
    #[arg(short, long, value_parser = parse_foam_tank)]
    foam_tank: Option<FoamTankSize>,

    /// Backup source volume in gallons
    #[arg(long)]
    source_gallons: Option<f64>,

    /// Refill rate into the backup source (GPM)
    #[arg(short, long)]
    refill_gpm: Option<f64>,

    /// Pool / tank shape for the volume helper
    #[arg(long, value_enum)]
    pool_shape: Option<ShapeArg>,

    /// Rectangle length (ft)
    #[arg(long)]
    length: Option<f64>,

    /// Rectangle width (ft)
    #[arg(long)]
    width: Option<f64>,

    /// Circle diameter (ft)
    #[arg(long)]
    diameter: Option<f64>,

    /// Shallow end depth (ft)
    #[arg(long)]
    shallow: Option<f64>,

    /// Deep end depth (ft)
    #[arg(long)]
    deep: Option<f64>,

    /// Replace the backup source volume with the pool / tank estimate
    #[arg(short, long)]
    apply_pool: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ShapeArg {
    Rect,
    Circle,
}

impl From<ShapeArg> for PoolShape {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Rect => PoolShape::Rectangle,
            ShapeArg::Circle => PoolShape::Circle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_foam_tank(value: &str) -> Result<FoamTankSize, String> {
    let gallons: u32 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a whole number of gallons"))?;
    FoamTankSize::try_from(gallons).map_err(|e| e.to_string())
}

fn load_config(path: Option<&Path>) -> Result<CalculatorConfig> {
    let Some(path) = path else {
        return Ok(CalculatorConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing scenario {}", path.display()))?;
    info!(path = %path.display(), "loaded scenario");
    Ok(config)
}

fn apply_overrides(config: &mut CalculatorConfig, args: &Args) -> Result<()> {
    if let Some(count) = args.systems {
        config.set_active_system_count(count);
    }

    for system in 0..config.active_system_count() {
        if let Some(zones) = args.zones {
            config.set_zone_count(system, zones)?;
        }
        if let Some(gpm) = args.gpm {
            config.set_all_zone_flows(system, gpm)?;
        }
        if let Some(tank) = args.foam_tank {
            config.set_foam_tank(system, tank)?;
        }
    }

    if let Some(gallons) = args.source_gallons {
        config.set_source_volume(gallons);
    }
    if let Some(gpm) = args.refill_gpm {
        config.set_refill_rate(gpm);
    }

    let pool = config.pool_helper_mut();
    if let Some(shape) = args.pool_shape {
        pool.set_shape(shape.into());
    }
    if let Some(length) = args.length {
        pool.set_length(length);
    }
    if let Some(width) = args.width {
        pool.set_width(width);
    }
    if let Some(diameter) = args.diameter {
        pool.set_diameter(diameter);
    }
    if args.shallow.is_some() || args.deep.is_some() {
        let shallow = args.shallow.unwrap_or(*pool.shallow_depth);
        let deep = args.deep.unwrap_or(*pool.deep_depth);
        pool.set_depths(shallow, deep);
    }

    if args.apply_pool && config.apply_pool_estimate() {
        info!(volume = %config.backup_source().volume, "applied pool estimate to backup source");
    }

    Ok(())
}

fn render(
    config: &CalculatorConfig,
    summary: &RuntimeSummary,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(TextReport { config, summary }.to_string()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(summary).context("serializing summary")?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    debug!(?args, "parsed arguments");

    let mut config = load_config(args.scenario.as_deref())?;
    apply_overrides(&mut config, &args)?;

    let summary = RuntimeSummary::derive(&config);
    print!("{}", render(&config, &summary, args.format)?);

    Ok(())
}
