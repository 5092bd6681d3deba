use stockradar::{bench_step, run_3d, run_headless};
use stockradar::{RadarConfig, RadarScenario};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stockradar", version, about = "3D stock market radar")]
struct Args {
    /// Scenario file under scenarios/
    #[arg(short, default_value = "radar.yaml")]
    file_name: String,

    /// Step the configured number of frames without a window
    #[arg(long)]
    headless: bool,

    /// Time the physics step for growing body counts and exit
    #[arg(long)]
    bench: bool,

    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) -> Result<()> {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

// load here to keep main clean
fn load_config(file_name: &str) -> Result<RadarConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let cfg = RadarConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;
    Ok(cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    if args.bench {
        bench_step();
        return Ok(());
    }

    let cfg = load_config(&args.file_name)?;
    let mut scenario = RadarScenario::build_scenario(&cfg)?;

    // a radar without a first batch has nothing to show
    let count = scenario.refresh().context("initial data load failed")?;
    info!(count, "stockradar v{}", env!("CARGO_PKG_VERSION"));

    if args.headless || !cfg.view.viewer {
        let summary = run_headless(&mut scenario, cfg.view.frames);
        if summary.stepped == 0 {
            warn!("physics is disabled in this scenario, nothing moved");
        }
    } else {
        run_3d(scenario);
    }

    Ok(())
}
