use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

mod inspect;
mod output;
mod search;
mod telemetry;
mod util;

#[derive(Parser)]
#[command(name = "scout", about = "Keyword search-page scraper CLI")]
struct Cli {
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Search(search::SearchCmd),
    Inspect(inspect::InspectCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and SCOUT_LOG_FORMAT
    telemetry::config::init_tracing();

    match cli.command {
        Commands::Search(args) => search::run(args).await?,
        Commands::Inspect(args) => inspect::run(args)?,
    }

    Ok(())
}
