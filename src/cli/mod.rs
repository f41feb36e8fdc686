pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "bankctl")]
#[command(about = "Operator tooling for the bank API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Print a bcrypt hash for seeding password columns")]
    Hash {
        #[arg(help = "Plain-text password")]
        password: String,
        #[arg(long, help = "bcrypt cost (defaults to BCRYPT_COST or the environment preset)")]
        cost: Option<u32>,
    },

    #[command(about = "Health check a running server")]
    Health {
        #[arg(long, default_value = "http://localhost:3000", help = "Server base URL")]
        url: String,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Hash { password, cost } => commands::hash::handle(&password, cost, output_format),
        Commands::Health { url } => commands::health::handle(&url, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hash_command() {
        let cli = Cli::try_parse_from(["bankctl", "hash", "s3cret", "--cost", "4"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Hash { ref password, cost: Some(4) } if password == "s3cret"
        ));
    }

    #[test]
    fn health_has_a_default_url() {
        let cli = Cli::try_parse_from(["bankctl", "--json", "health"]).unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
        assert!(matches!(cli.command, Commands::Health { ref url } if url == "http://localhost:3000"));
    }
}
