// CLI entry points: serve the API or run migrations

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::Settings;

/// Audit backend server and maintenance commands
#[derive(Parser, Debug)]
#[command(name = "skeleton")]
#[command(about = "Backend skeleton with asynchronous audit recording", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run migrations, then serve the HTTP API (default)
    Serve,

    /// Run pending database migrations and exit
    Migrate,
}

/// Execute CLI command
///
/// Routes the parsed command to its handler; no subcommand means `serve`.
///
/// # Arguments
/// * `cli` - Parsed CLI arguments
/// * `settings` - Settings loaded from the environment
///
/// # Returns
/// * `Ok(())` - Command executed successfully
/// * `Err(...)` - Command execution failed, including an audit shutdown that
///   missed its deadline
pub async fn execute_command(
    cli: Cli,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_server(settings).await?,
        Commands::Migrate => migrate::run_migrations(settings).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["skeleton"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_migrate_subcommand_parses() {
        let cli = Cli::try_parse_from(["skeleton", "migrate"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Migrate));
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["skeleton", "bootstrap"]).is_err());
    }
}
