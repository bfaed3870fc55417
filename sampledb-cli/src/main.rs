mod server;
mod tracing_setup;

use anyhow::Result;
use clap::{Parser, Subcommand};

use server::ServeArgs;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "sampledb",
    version,
    about = "HTTP API over the sample customer/agent database"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Print the resolved configuration and exit
    Config(ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before parsing so env fallbacks see it
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => server::run_server(args).await?,
        Commands::Config(args) => server::print_config(&args),
    }

    Ok(())
}
