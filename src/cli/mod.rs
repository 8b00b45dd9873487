//! CLI module for the DevConnect API
//!
//! `serve` runs the HTTP API.

pub mod serve;

use clap::{Parser, Subcommand};

/// DevConnect API - developer profiles, posts and accounts
#[derive(Parser)]
#[command(name = "devconnect-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server (default)
    Serve,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_is_default() {
        let cli = Cli::try_parse_from(["devconnect-api"]).unwrap();
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["devconnect-api", "serve"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Serve)));
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(Cli::try_parse_from(["devconnect-api", "ui"]).is_err());
    }
}
