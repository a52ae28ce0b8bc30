mod check;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::check::CheckArgs;

#[derive(Debug, Parser)]
#[command(name = "skuwatch")]
#[command(about = "Check retailer search pages for in-stock products")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search every selected store for a product and report what is listed
    Check(CheckArgs),
    /// List configured stores and whether each has a site adapter
    Stores,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = skuwatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(!config.env.is_production())
        .init();
    tracing::info!(
        env = %config.env,
        stores_path = %config.stores_path.display(),
        "configuration loaded"
    );

    match cli.command {
        Commands::Check(args) => {
            let reports = check::run(&config, &args).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                print!("{}", output::render_reports(&reports));
            }
            if check::all_failed(&reports) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Stores => {
            let stores = skuwatch_core::load_stores(&config.stores_path)?;
            print!("{}", output::render_store_list(&stores));
        }
    }

    Ok(ExitCode::SUCCESS)
}
