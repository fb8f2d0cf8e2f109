use clap::Parser;

use skeleton_backend::cli::{self, Cli};
use skeleton_backend::config::{init_logging, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging()?;

    let cli = Cli::parse();

    let settings = Settings::from_env()?;
    tracing::debug!(?settings, "Settings loaded");

    if let Err(e) = cli::execute_command(cli, &settings).await {
        tracing::error!(error = %e, "Command failed");
        return Err(e);
    }

    Ok(())
}
