use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fretscore::model::ChatClient;

#[derive(Parser)]
#[command(name = "fretscore", version, about = "Guitar chord progression difficulty rater")]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rate every piece in the manifest against the difficulty rubric
    Rate {
        /// Manifest CSV with a chord_locations column (defaults to config)
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Model identifier to send with each request (defaults to config)
        #[arg(long)]
        model: Option<String>,

        /// Directory for the prediction artifacts (defaults to config)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Only rate the first N manifest rows
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Print the chord progression extracted from one annotation file
    Chords {
        /// Tab-annotation file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load config file (optional, defaults if missing)
    let config = fretscore::config::AppConfig::load();

    match cli.command {
        Commands::Rate { manifest, model, output_dir, limit } => {
            let manifest_path = manifest.unwrap_or_else(|| config.manifest_path.clone());
            let model = model.unwrap_or_else(|| config.model.clone());
            let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());

            let mut rows = fretscore::manifest::load_manifest(&manifest_path)
                .context("Failed to load manifest")?;
            if let Some(n) = limit {
                rows.truncate(n);
            }
            if rows.is_empty() {
                println!("Manifest is empty, nothing to rate.");
                return Ok(());
            }

            // One client for the whole run, passed into every scoring call
            let client = ChatClient::from_env(&config.api.base_url, &config.api.key_env, &model)
                .context("Failed to set up model service client")?;

            println!("Rating {} pieces with {}", rows.len(), client.model());
            let result = fretscore::runner::rate_manifest(
                &client, &rows, client.model(), &output_dir,
            )
            .context("Rating run failed")?;

            println!();
            println!(
                "Rating complete: {} scored, {} failed of {} pieces",
                result.scored, result.failed, result.total
            );
            println!("Predictions: {}", result.predictions_path.display());
            println!("Analyses:    {}", result.messages_path.display());
        }

        Commands::Chords { file } => {
            let chords = fretscore::extract::extract_progression(&file)
                .context("Extraction failed")?;
            if chords.is_empty() {
                println!("(no chord tokens found)");
            } else {
                println!("{chords}");
            }
        }
    }

    Ok(())
}
