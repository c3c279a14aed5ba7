// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use lead_scorer::utils::logging::{format_step, format_success, init_logger};
use lead_scorer::{Config, LeadPipeline, LogGenerator};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "lead_scorer")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Synthesize web access logs and score visiting companies as sales leads", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = lead_scorer::config::DEFAULT_CONFIG_PATH
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a synthetic access log in Common Log Format
    Generate {
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        #[arg(long, value_name = "NUM")]
        entries: Option<usize>,

        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,
    },

    /// Score organizations found in an access log and write the JSON report
    Score {
        #[arg(short, long, value_name = "PATH")]
        input: Option<PathBuf>,

        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        #[arg(short, long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger(cli.color, cli.verbose);

    info!("Lead Scorer");
    info!("Loading configuration from: {}", cli.config.display());

    if !cli.config.exists() {
        warn!(
            "Config file {} not found, using defaults and environment overrides",
            cli.config.display()
        );
    }
    let config =
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?;

    match cli.command {
        Commands::Generate {
            output,
            entries,
            seed,
        } => {
            cmd_generate(config, output, entries, seed)?;
        }
        Commands::Score {
            input,
            output,
            pretty,
        } => {
            cmd_score(config, input, output, pretty).await?;
        }
    }

    Ok(())
}

fn cmd_generate(
    mut config: Config,
    output: Option<PathBuf>,
    entries: Option<usize>,
    seed: Option<u64>,
) -> Result<()> {
    if let Some(entries) = entries {
        config.generator.entries = entries;
    }
    config.validate().context("Invalid generator settings")?;

    let output = output.unwrap_or_else(|| config.input.log_path.clone());

    info!(
        "Generating {} entries from a pool of {} addresses",
        config.generator.entries, config.generator.ip_pool_size
    );

    let mut generator = match seed {
        Some(seed) => LogGenerator::with_seed(config.generator.clone(), seed),
        None => LogGenerator::new(config.generator.clone()),
    }
    .context("Failed to initialize log generator")?;

    let report = generator
        .write_to(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{}",
        format_success(&format!(
            "Generated {} entries in {}",
            report.entries,
            output.display()
        ))
    );

    Ok(())
}

async fn cmd_score(
    mut config: Config,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    let input = input.unwrap_or_else(|| config.input.log_path.clone());
    let output = output.unwrap_or_else(|| config.output.path.clone());
    config.output.pretty |= pretty;

    println!("{}", format_step(1, 2, &format!("Scoring {}", input.display())));

    let stats = LeadPipeline::new(config)
        .run(&input, &output)
        .await
        .with_context(|| format!("Lead scoring failed for {}", input.display()))?;

    println!(
        "{}",
        format_step(2, 2, &format!("Report written to {}", output.display()))
    );
    println!(
        "{}",
        format_success(&format!(
            "{} organizations from {} of {} lines ({:.1}% parsed) in {:.2}s ({:.0} lines/s)",
            stats.organizations,
            stats.records_parsed,
            stats.lines_read,
            stats.parse_success_rate(),
            stats.duration_secs,
            stats.lines_per_second()
        ))
    );

    Ok(())
}
