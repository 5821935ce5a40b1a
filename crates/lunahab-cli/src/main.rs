//! LunaHab command-line front-end.
//!
//! Thin wrapper over `lunahab-logic`: loads and saves JSON files, wires
//! the generate → validate → score → optimize pipeline to subcommands,
//! and renders exports. No layout logic lives here.
//!
//! Usage:
//!   lunahab init --out seed_config.json
//!   lunahab generate --config seed_config.json --out layout.json
//!   lunahab validate --in layout.json
//!   lunahab optimize --in layout.json --iters 3000 --out layout_opt.json
//!   lunahab export --in layout_opt.json --format md

mod export;
mod io;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use lunahab_logic::models::{ConstraintSettings, GeneratorConfig, ScoreWeights};
use lunahab_logic::{evaluate, generate, optimize, validate};

use crate::export::{export_markdown, metrics_csv};
use crate::io::{load_config, load_layout, load_weights, save_layout, write_json, CliResult};

#[derive(Parser, Debug)]
#[command(name = "lunahab", version, about = "Lunar habitat layout planning toolkit")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a seed configuration file
    Init {
        #[arg(long, default_value = "seed_config.json")]
        out: PathBuf,
    },
    /// Generate an initial feasible layout
    Generate {
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Validate a layout against the mission constraints
    Validate {
        #[arg(long = "in")]
        input: PathBuf,
    },
    /// Score a layout and print its metrics
    Score {
        #[arg(long = "in")]
        input: PathBuf,
        #[arg(long)]
        weights: Option<PathBuf>,
    },
    /// Optimize a layout with simulated annealing
    Optimize {
        #[arg(long = "in")]
        input: PathBuf,
        #[arg(long, default_value_t = 3000)]
        iters: u32,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        weights: Option<PathBuf>,
    },
    /// Export a layout summary
    Export {
        #[arg(long = "in")]
        input: PathBuf,
        #[arg(long, value_enum)]
        format: ExportFormat,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        weights: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExportFormat {
    Md,
    Json,
    Csv,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> CliResult<ExitCode> {
    let settings = ConstraintSettings::default();
    match command {
        Command::Init { out } => {
            if let Some(parent) = out.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let config = GeneratorConfig {
                weights: Some(ScoreWeights::default()),
                ..GeneratorConfig::default()
            };
            write_json(&config, &out)?;
            println!("Wrote seed configuration to {}", out.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Generate { config, out } => {
            let config = load_config(&config)?;
            info!("generating layout for crew {}", config.crew);
            let layout = generate(&config, &settings)?;
            save_layout(&layout, &out)?;
            println!("Generated layout saved to {}", out.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { input } => {
            let layout = load_layout(&input)?;
            let result = validate(&layout, &settings);
            for msg in &result.messages {
                println!("{msg}");
            }
            Ok(if result.passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Score { input, weights } => {
            let layout = load_layout(&input)?;
            let weights = load_weights(weights.as_deref())?;
            let (metrics, score) = evaluate(&layout, &settings, &weights)?;
            let payload = serde_json::json!({ "metrics": metrics, "score": score });
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(if metrics.feasibility {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Optimize {
            input,
            iters,
            out,
            seed,
            weights,
        } => {
            let layout = load_layout(&input)?;
            let weights = load_weights(weights.as_deref())?;
            info!("optimizing for {iters} iterations");
            let result = optimize(&layout, iters, &settings, &weights, seed)?;
            save_layout(&result.layout, &out)?;
            println!(
                "Optimized layout saved to {}; score={:.3}",
                out.display(),
                result.score
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::Export {
            input,
            format,
            out,
            weights,
        } => {
            let layout = load_layout(&input)?;
            let weights = load_weights(weights.as_deref())?;
            let (metrics, score) = evaluate(&layout, &settings, &weights)?;
            let result = validate(&layout, &settings);
            let rendered = match format {
                ExportFormat::Md => export_markdown(&layout, &metrics, &result.messages),
                ExportFormat::Json => {
                    let bundle = serde_json::json!({
                        "layout": layout,
                        "metrics": metrics,
                        "score": score,
                        "validation": result.messages,
                    });
                    serde_json::to_string_pretty(&bundle)?
                }
                ExportFormat::Csv => metrics_csv(&metrics),
            };
            match out {
                Some(path) => std::fs::write(path, rendered)?,
                None => println!("{rendered}"),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
