//! salesboard - Marketplace sales dashboard engine

mod cli;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use salesboard_core::analytics::{
    CategoryView, DimensionInput, DimensionTable, SeriesInput, SeriesView,
};
use salesboard_core::drill::{DrillAction, DrillNavigation};
use salesboard_core::types::{Dimension, DrillState};
use salesboard_core::{CoreError, EngineConfig, Snapshot};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "salesboard",
    version,
    about = "Marketplace sales dashboard engine",
    long_about = "Recomputes the analytics views of a marketplace sales dashboard from a\n\
                  JSON snapshot: bucketed revenue series with live projection, dimension\n\
                  comparisons against historical baselines and category drill-down.\n\
                  \n\
                  Examples:\n\
                    salesboard series today.json                       # Hourly curve + projection\n\
                    salesboard compare today.json -d state -b 7        # States vs last week\n\
                    salesboard compare month.json -d product --sort revenueDelta --asc\n\
                    salesboard drill today.json --category Eletrônicos # Subcategories\n\
                    salesboard config                                  # Effective config\n\
                  \n\
                  Environment Variables:\n\
                    SALESBOARD_CONFIG                # Config file (default: <config dir>/salesboard/config.toml)\n\
                    SALESBOARD_NO_COLOR              # Disable ANSI colors (log-friendly)\n\
                    RUST_LOG                         # Log filter (default: salesboard=info)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to the config file
    #[arg(long, env = "SALESBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, env = "SALESBOARD_NO_COLOR")]
    no_color: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the bucketed series (and projection when live)
    Series {
        /// Snapshot JSON file
        file: PathBuf,
    },
    /// Compare one dimension against a baseline
    Compare {
        /// Snapshot JSON file
        file: PathBuf,
        /// Dimension to compare
        #[arg(long, short = 'd', value_enum, default_value = "marketplace")]
        dimension: DimensionArg,
        /// Baseline offset in periods back (default: first of the menu)
        #[arg(long, short = 'b')]
        baseline: Option<u32>,
        /// Sort column (id, revenue, prevRevenue, revenueDelta, avgTicket, ...)
        #[arg(long, short = 's')]
        sort: Option<String>,
        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
    },
    /// Drill into categories
    Drill {
        /// Snapshot JSON file
        file: PathBuf,
        /// Selected category
        #[arg(long)]
        category: Option<String>,
        /// Selected subcategory (requires --category)
        #[arg(long, requires = "category")]
        subcategory: Option<String>,
        /// Baseline offset in periods back (default: first of the menu)
        #[arg(long, short = 'b')]
        baseline: Option<u32>,
        /// Sort column
        #[arg(long, short = 's')]
        sort: Option<String>,
        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum DimensionArg {
    Marketplace,
    State,
    Category,
    Product,
}

impl From<DimensionArg> for Dimension {
    fn from(arg: DimensionArg) -> Self {
        match arg {
            DimensionArg::Marketplace => Dimension::Marketplace,
            DimensionArg::State => Dimension::State,
            DimensionArg::Category => Dimension::Category,
            DimensionArg::Product => Dimension::Product,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable with --json
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "salesboard=info".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(!cli.no_color),
        )
        .init();

    let config_path = cli.config.clone().or_else(EngineConfig::default_path);
    let config = match (&cli.config, &config_path) {
        // An explicit path must load cleanly
        (Some(path), _) => EngineConfig::load_strict(path).map_err(with_hint)?,
        (None, Some(path)) => EngineConfig::load(path),
        (None, None) => EngineConfig::default(),
    };

    let json = cli.json;
    let no_color = cli.no_color;

    match cli.command {
        Command::Series { file } => run_series(&file, json, no_color)?,
        Command::Compare {
            file,
            dimension,
            baseline,
            sort,
            asc,
        } => run_compare(
            &file,
            &config,
            dimension.into(),
            baseline,
            sort,
            asc,
            json,
            no_color,
        )?,
        Command::Drill {
            file,
            category,
            subcategory,
            baseline,
            sort,
            asc,
        } => run_drill(
            &file,
            &config,
            category,
            subcategory,
            baseline,
            sort,
            asc,
            json,
            no_color,
        )?,
        Command::Config => run_config(&config, config_path.as_deref()),
    }

    Ok(())
}

/// Attach the core error's suggestion, when it has one
fn with_hint(e: CoreError) -> anyhow::Error {
    match e.suggestion() {
        Some(hint) => anyhow::Error::new(e).context(format!("hint: {}", hint)),
        None => anyhow::Error::new(e),
    }
}

fn load_snapshot(path: &Path) -> Result<Snapshot> {
    Snapshot::load(path)
        .map_err(with_hint)
        .with_context(|| format!("Failed to load snapshot {}", path.display()))
}

fn run_series(file: &Path, json: bool, no_color: bool) -> Result<()> {
    let snapshot = load_snapshot(file)?;

    let view = SeriesView::compute(&SeriesInput {
        period: snapshot.period,
        facts: &snapshot.facts,
        reference_period: snapshot.reference_period,
        reference_facts: None,
        is_live: snapshot.is_live,
        cutoff_bucket: snapshot.cutoff_bucket,
        projected_total: snapshot.projected_total,
    });

    if view.report.has_degradations() {
        tracing::warn!(
            "{} row(s) out of range, {} duplicate bucket(s), {} value(s) clamped to zero",
            view.report.rows_out_of_range,
            view.report.duplicates_overwritten,
            view.report.values_sanitized
        );
    }

    println!("{}", cli::format_series(&view, json, no_color));
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_compare(
    file: &Path,
    config: &EngineConfig,
    dimension: Dimension,
    baseline: Option<u32>,
    sort: Option<String>,
    asc: bool,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let snapshot = load_snapshot(file)?;

    let Some(dim) = snapshot.dimension(dimension) else {
        let available: Vec<&str> = snapshot
            .dimensions
            .iter()
            .map(|d| d.dimension.name())
            .collect();
        bail!(
            "Snapshot has no '{}' aggregates (available: {})",
            dimension.name(),
            if available.is_empty() {
                "none".to_string()
            } else {
                available.join(", ")
            }
        );
    };

    let sort_key = sort.unwrap_or_else(|| config.default_sort_key.clone());
    let menu = config.baselines_for(snapshot.period.granularity());
    let input = DimensionInput {
        dimension,
        current: &dim.current,
        baselines: &dim.baselines,
    };

    let mut table = DimensionTable::compute(&input, menu, cli::parse_sort(&sort_key, asc)?);
    select_baseline(&mut table, baseline)?;

    println!("{}", cli::format_dimension_table(&table, json, no_color));
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_drill(
    file: &Path,
    config: &EngineConfig,
    category: Option<String>,
    subcategory: Option<String>,
    baseline: Option<u32>,
    sort: Option<String>,
    asc: bool,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let snapshot = load_snapshot(file)?;

    let mut drill = DrillState::default();
    for value in [category, subcategory].into_iter().flatten() {
        if !drill.apply(DrillAction::Select(value.clone())) {
            bail!("Cannot drill into '{}' from {:?}", value, drill.level);
        }
    }
    tracing::debug!("Drill filter: {:?}", drill.filter());

    let sort_key = sort.unwrap_or_else(|| config.default_sort_key.clone());
    let mut view = CategoryView::compute(
        &drill,
        &snapshot.category_facts,
        &snapshot.category_baselines,
        config.baselines_for(snapshot.period.granularity()),
        cli::parse_sort(&sort_key, asc)?,
        &config.root_crumb_label,
    );
    select_baseline(&mut view.table, baseline)?;

    println!("{}", cli::format_drill(&view, json, no_color));
    Ok(())
}

fn select_baseline(table: &mut DimensionTable, baseline: Option<u32>) -> Result<()> {
    if let Some(offset) = baseline {
        if !table.select_baseline(offset) {
            bail!(
                "Baseline {} is not on the menu (available: {:?})",
                offset,
                table.offsets()
            );
        }
    }
    Ok(())
}

fn run_config(config: &EngineConfig, path: Option<&Path>) {
    match path {
        Some(p) => println!("# {}", p.display()),
        None => println!("# (no config directory, using defaults)"),
    }
    print!("{}", config.to_toml_string());
}
