use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt};

use ironcorpus::cli::{CleanArgs, Cli, Commands, MergeArgs};
use ironcorpus::corpus::clean_corpus;
use ironcorpus::merge::merge_json_dir;
use ironcorpus::metrics::RunReport;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

/// `RUST_LOG` wins when set; otherwise `-v` steps up from `info`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));
    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("Tracing subscriber already set; skipping re-initialization.");
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Merge(args) => run_merge(&args),
        Commands::Clean(args) => run_clean(&args),
    }
}

fn run_merge(args: &MergeArgs) -> Result<()> {
    let config = args.to_config();
    let report = merge_json_dir(&config).with_context(|| {
        format!(
            "merging {} into {}",
            config.json_path.display(),
            config.output_file.display()
        )
    })?;
    if let Some(path) = &args.report {
        report
            .save_to_file(path)
            .with_context(|| format!("writing report {}", path.display()))?;
        info!(report = %path.display(), "report saved");
    }
    Ok(())
}

fn run_clean(args: &CleanArgs) -> Result<()> {
    let config = args.to_config().context("loading clean configuration")?;
    let report = clean_corpus(&config)
        .with_context(|| format!("cleaning corpus into {}", config.output.display()))?;
    if let Some(path) = &args.report {
        report
            .save_to_file(path)
            .with_context(|| format!("writing report {}", path.display()))?;
        info!(report = %path.display(), "report saved");
    }
    Ok(())
}
