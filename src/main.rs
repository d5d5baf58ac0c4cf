//! Sortviz CLI - sorting algorithm visualizer

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;

use sortviz::{
    AlgorithmKind, FixSuggestion, RunOutcome, SortController, SortVizError, VisualizerConfig,
};

#[derive(Parser)]
#[command(name = "sortviz")]
#[command(about = "Sortviz - watch in-place sorting algorithms run")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    overrides: Overrides,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal visualizer (default)
    Tui,

    /// Run one sort without a UI and report the outcome
    Run {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the available algorithms
    Algorithms,
}

/// Settings that override the config file
#[derive(Args)]
struct Overrides {
    /// YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Number of bars
    #[arg(long, global = true)]
    size: Option<usize>,

    /// Smallest random value
    #[arg(long, global = true)]
    min: Option<u32>,

    /// Largest random value
    #[arg(long, global = true)]
    max: Option<u32>,

    /// Sleep after each step, in milliseconds
    #[arg(long = "delay-ms", global = true)]
    delay_ms: Option<u64>,

    /// Redraw interval, in milliseconds
    #[arg(long = "render-ms", global = true)]
    render_ms: Option<u64>,

    /// Algorithm to start with
    #[arg(short, long, value_enum, global = true)]
    algorithm: Option<AlgorithmKind>,

    /// Write logs to this file (TUI logs are discarded otherwise)
    #[arg(long = "log-file", global = true)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Commands::Tui));

    let result = match init_tracing(cli.overrides.log_file.as_deref(), interactive) {
        Ok(()) => dispatch(cli).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.downcast_ref::<SortVizError>().and_then(|e| e.fix_suggestion()) {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Algorithms) => {
            list_algorithms();
            Ok(())
        }
        Some(Commands::Run { json }) => {
            let config = load_config(&cli.overrides)?;
            run_headless(&config, json).await
        }
        None | Some(Commands::Tui) => {
            let config = load_config(&cli.overrides)?;
            sortviz::tui::run(&config).await
        }
    }
}

/// Route tracing output somewhere that cannot corrupt the alternate screen
fn init_tracing(log_file: Option<&Path>, interactive: bool) -> Result<(), SortVizError> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None if interactive => builder.with_writer(std::io::sink).init(),
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

/// Config file, then CLI overrides, then validation
fn load_config(overrides: &Overrides) -> Result<VisualizerConfig, SortVizError> {
    let mut config = match &overrides.config {
        Some(path) => VisualizerConfig::from_yaml_file(path)?,
        None => VisualizerConfig::default(),
    };

    if let Some(size) = overrides.size {
        config.array_size = size;
    }
    if let Some(min) = overrides.min {
        config.value_range.min = min;
    }
    if let Some(max) = overrides.max {
        config.value_range.max = max;
    }
    if let Some(delay) = overrides.delay_ms {
        config.pacing_delay_ms = delay;
    }
    if let Some(render) = overrides.render_ms {
        config.render_interval_ms = render;
    }
    if let Some(algorithm) = overrides.algorithm {
        config.algorithm = algorithm;
    }

    config.validate()?;
    Ok(config)
}

#[derive(Serialize)]
struct RunReport {
    #[serde(flatten)]
    outcome: RunOutcome,
    array_size: usize,
    sorted: bool,
    permutation: bool,
}

async fn run_headless(config: &VisualizerConfig, json: bool) -> anyhow::Result<()> {
    let controller = SortController::new(config)?;
    let before = controller.snapshot();

    if !json {
        println!(
            "{} Sorting {} elements with {} ({} ms/step)",
            "→".cyan(),
            controller.len(),
            config.algorithm.label().cyan().bold(),
            config.pacing_delay_ms
        );
    }

    controller.start();
    tokio::select! {
        _ = controller.wait_idle() => {}
        _ = tokio::signal::ctrl_c() => {
            controller.cancel();
            controller.wait_idle().await;
        }
    }

    let after = controller.snapshot();
    let outcome = controller
        .last_outcome()
        .ok_or_else(|| anyhow::anyhow!("run ended without an outcome"))?;

    let mut expected = before.into_vec();
    expected.sort_unstable();
    let mut actual = after.values().to_vec();
    actual.sort_unstable();

    let report = RunReport {
        array_size: after.len(),
        sorted: after.is_sorted(),
        permutation: expected == actual,
        outcome,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.outcome.cancelled {
        println!(
            "{} Cancelled after {} steps",
            "■".yellow(),
            report.outcome.steps
        );
    } else {
        println!(
            "{} Sorted in {} steps ({} ms)",
            "✓".green(),
            report.outcome.steps,
            report.outcome.elapsed_ms
        );
    }

    if !report.outcome.cancelled && !(report.sorted && report.permutation) {
        anyhow::bail!("{} left the array unsorted", report.outcome.algorithm);
    }
    Ok(())
}

fn list_algorithms() {
    println!("{}", "Algorithms:".cyan().bold());
    for kind in AlgorithmKind::ALL {
        println!(
            "  {}  {:<10} {}",
            kind.ordinal().to_string().yellow(),
            kind.name(),
            kind.label()
        );
    }
}
