use clap::{Parser, Subcommand};
use log::info;
use milticker::commands::{build, commodities};
use milticker::config::AppConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "milticker")]
#[command(about = "Builds the MIL-Ticker dashboard data snapshot")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full snapshot and persist it
    Build {
        /// Destination file (defaults to MILTICKER_OUTPUT or public/data.json)
        #[arg(short, long = "output", value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Resolve commodity quotes only and print them to stdout
    Commodities,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    info!("Starting milticker snapshot run");

    match cli.command {
        Commands::Build { output } => {
            let output_path = output.unwrap_or_else(|| config.output_path.clone());
            build::run(&config, &output_path).await?;
        }
        Commands::Commodities => {
            commodities::run(&config).await?;
        }
    }

    Ok(())
}
