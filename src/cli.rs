//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

use crate::adapters::csv_adapter::{CsvReturnsAdapter, CsvSnapshotAdapter};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{build_engine_config, EngineConfig};
use crate::domain::decision::{Decision, Target};
use crate::domain::ensemble::Ensemble;
use crate::domain::error::KlmError;
use crate::domain::performance::HISTORY_CAPACITY;
use crate::domain::variant::{Variant, VariantId};
use crate::ports::performance_port::{PerformanceFeedPort, RealizedReturn};
use crate::ports::snapshot_port::SnapshotPort;

#[derive(Parser, Debug)]
#[command(name = "klm-engine", about = "Multi-variant KLM decision engine")]
pub struct Cli {
    /// Emit debug-level engine logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate one variant against an indicator snapshot
    Evaluate {
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
        #[arg(long)]
        variant: Option<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Evaluate every registered variant against an indicator snapshot
    EvaluateAll {
        #[arg(short, long)]
        snapshot: PathBuf,
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// List registered variants
    ListVariants,
    /// Replay a realized-return feed and print each variant's performance metric
    Performance {
        #[arg(short, long)]
        returns: Option<PathBuf>,
        #[arg(short, long)]
        window: Option<usize>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate an engine configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Installs the stderr fmt subscriber. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(
            Targets::new()
                .with_target("klm_engine", level)
                .with_default(Level::WARN),
        );
    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Evaluate {
            snapshot,
            variant,
            config,
            as_of,
        } => run_evaluate(snapshot, variant.as_deref(), config.as_deref(), as_of),
        Command::EvaluateAll { snapshot, as_of } => run_evaluate_all(snapshot, as_of),
        Command::ListVariants => {
            print!("{}", format_variant_list());
            Ok(())
        }
        Command::Performance {
            returns,
            window,
            config,
        } => run_performance(returns, window, config.as_deref()),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<EngineConfig, KlmError> {
    tracing::info!(path = %path.display(), "loading config");
    let adapter = FileConfigAdapter::from_file(path)?;
    build_engine_config(&adapter)
}

fn base_config(config: Option<&Path>) -> Result<EngineConfig, KlmError> {
    match config {
        Some(path) => load_config(path),
        None => Ok(EngineConfig::default()),
    }
}

/// Merges CLI overrides over the optional config file.
pub fn resolve_evaluate_inputs(
    snapshot: Option<PathBuf>,
    variant: Option<&str>,
    config: Option<&Path>,
) -> Result<(VariantId, PathBuf), KlmError> {
    let base = base_config(config)?;

    let variant = match variant {
        Some(name) => name.parse()?,
        None => base.variant,
    };

    let snapshot = snapshot
        .or(base.snapshot)
        .ok_or_else(|| KlmError::ConfigMissing {
            section: "engine".into(),
            key: "snapshot".into(),
        })?;

    Ok((variant, snapshot))
}

fn run_evaluate(
    snapshot: Option<PathBuf>,
    variant: Option<&str>,
    config: Option<&Path>,
    as_of: Option<NaiveDate>,
) -> Result<(), KlmError> {
    let (variant_id, snapshot_path) = resolve_evaluate_inputs(snapshot, variant, config)?;
    let snapshot = CsvSnapshotAdapter::new(snapshot_path)
        .with_as_of(as_of)
        .load_snapshot()?;

    let variant = Variant::new(variant_id);
    let decision = variant.evaluate(&snapshot);
    print!("{}", format_decision(variant_id, &decision));
    Ok(())
}

fn run_evaluate_all(snapshot: PathBuf, as_of: Option<NaiveDate>) -> Result<(), KlmError> {
    let snapshot = CsvSnapshotAdapter::new(snapshot)
        .with_as_of(as_of)
        .load_snapshot()?;

    if let Some(date) = snapshot.as_of {
        println!("as of {}", date);
    }
    for (id, decision) in Ensemble::new().evaluate_all(&snapshot) {
        print!("{}", format_decision(id, &decision));
    }
    Ok(())
}

/// Resolves the returns feed and window: CLI value, then `[performance]`, then default.
pub fn resolve_performance_inputs(
    returns: Option<PathBuf>,
    window: Option<usize>,
    config: Option<&Path>,
) -> Result<(PathBuf, usize), KlmError> {
    let base = base_config(config)?;

    let window = window.unwrap_or(base.window);
    if window == 0 || window > HISTORY_CAPACITY {
        return Err(KlmError::ConfigInvalid {
            section: "performance".into(),
            key: "window".into(),
            reason: format!("window must be between 1 and {}", HISTORY_CAPACITY),
        });
    }

    let returns = returns
        .or(base.returns)
        .ok_or_else(|| KlmError::ConfigMissing {
            section: "performance".into(),
            key: "returns".into(),
        })?;

    Ok((returns, window))
}

fn run_performance(
    returns: Option<PathBuf>,
    window: Option<usize>,
    config: Option<&Path>,
) -> Result<(), KlmError> {
    let (returns, window) = resolve_performance_inputs(returns, window, config)?;
    let feed = CsvReturnsAdapter::new(returns).load_returns()?;
    let ensemble = Ensemble::new();
    replay_returns(&ensemble, &feed);
    print!("{}", format_performance(&ensemble, window));
    Ok(())
}

fn run_validate(config: &Path) -> Result<(), KlmError> {
    let engine = load_config(config)?;
    println!("variant:  {}", engine.variant);
    if let Some(path) = &engine.snapshot {
        println!("snapshot: {}", path.display());
    }
    println!("window:   {}", engine.window);
    if let Some(path) = &engine.returns {
        println!("returns:  {}", path.display());
    }
    println!("Engine configuration is valid.");
    Ok(())
}

/// Applies realized returns in feed order.
pub fn replay_returns(ensemble: &Ensemble, feed: &[RealizedReturn]) {
    for r in feed {
        ensemble.update_performance(r.variant, r.value);
    }
}

pub fn format_decision(id: VariantId, decision: &Decision) -> String {
    let mut out = format!("{}: {} {}\n", id.name(), decision.action, decision.target);
    if let Target::Allocation(weights) = &decision.target {
        for (symbol, weight) in weights {
            out.push_str(&format!("  {:<6} {:>6.2}%\n", symbol, weight * 100.0));
        }
    }
    out.push_str(&format!("  reasoning: {}\n", decision.reasoning));
    out
}

pub fn format_performance(ensemble: &Ensemble, window: usize) -> String {
    ensemble
        .performance_metrics(window)
        .into_iter()
        .map(|(id, metric)| {
            let samples = ensemble.get(id).map(Variant::history_len).unwrap_or(0);
            format!(
                "{:<10} stdev({}) = {:.6}  [{} samples]\n",
                id.name(),
                window,
                metric,
                samples
            )
        })
        .collect()
}

pub fn format_variant_list() -> String {
    VariantId::ALL
        .iter()
        .map(|id| format!("{:<10} {}\n", id.name(), id.description()))
        .collect()
}
