//! Oncostat - Korean cancer-incidence statistics pipeline
//!
//! A CLI tool that collects the national cancer statistics tables,
//! analyzes them, and renders JSON/text reports plus SVG charts and
//! an HTML dashboard.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (collection, analysis, or rendering failure)

mod analysis;
mod charts;
mod cli;
mod config;
mod models;
mod report;
mod source;

use anyhow::{Context, Result};
use cli::Args;
use config::Config;
use models::format_count;
use report::SummaryReport;
use source::{DataCollector, DataStore};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("Oncostat v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the pipeline
    match run_pipeline(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Pipeline failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .oncostat.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".oncostat.toml");

    if path.exists() {
        eprintln!("⚠️  .oncostat.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .oncostat.toml")?;

    println!("✅ Created .oncostat.toml with default settings.");
    println!("   Edit it to customize the year, API settings, and population table.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete collect-analyze-visualize pipeline.
async fn run_pipeline(args: Args) -> Result<()> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    if config.population.is_empty() {
        warn!("Population reference is empty, regional rate analysis will fail");
    }

    let year = config.dataset.year;

    // Step 1: Collect the statistics tables
    println!("📥 Step 1/3: Collecting {} statistics tables...", year);

    let collector = DataCollector {
        api_url: config.source.base_url.clone(),
        api_key: config.source.api_key.clone(),
        timeout_seconds: config.source.timeout_seconds,
        offline: args.offline,
        year,
    };

    let (dataset, origin) = collector.collect().await?;
    info!("Category table origin: {}", origin);

    let store = DataStore::new(&config.output.data_dir);
    let table_paths = store.save(&dataset)?;
    println!(
        "   Saved {} tables to {}/",
        table_paths.len(),
        config.output.data_dir
    );

    // Step 2: Analyze the tables and write reports
    println!("\n🔬 Step 2/3: Analyzing incidence tables...");

    let dataset = store.load(year)?;
    let report = SummaryReport::build(
        &dataset.categories,
        &dataset.age_bands,
        &dataset.regions,
        &config.population,
        year,
    )?;

    println!("📝 Writing reports...");
    let report_paths = report::save_reports(&report, Path::new(&config.output.reports_dir))?;

    println!("\n📊 Analysis Summary:");
    println!(
        "   Total cases: {}건",
        format_count(report.overview.total_cases)
    );
    println!(
        "   Male / Female: {} / {}",
        report.gender.male_pct, report.gender.female_pct
    );
    if let Some(top) = report.top_categories.first() {
        println!("   Top category: {}", top.label);
    }
    println!(
        "   Highest rate: {} ({})",
        report.region.top_region, report.region.top_rate_label
    );

    // Step 3: Render charts
    if args.skip_charts {
        info!("Skipping chart rendering (--skip-charts)");
    } else {
        println!("\n📈 Step 3/3: Rendering charts...");
        let chart_paths = charts::render_all(
            &dataset,
            &config.population,
            &report,
            Path::new(&config.output.charts_dir),
        )?;
        println!("   Rendered {} chart artifacts", chart_paths.len());
    }

    let duration = start_time.elapsed().as_secs_f64();

    println!("\n✅ Analysis complete in {:.1}s. Generated files:", duration);
    println!("   📄 {}", report_paths.json.display());
    println!("   📄 {}", report_paths.text.display());
    if !args.skip_charts {
        println!(
            "   📊 {}/{}",
            config.output.charts_dir,
            charts::DASHBOARD_FILE
        );
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .oncostat.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
