//! CLI module for stackctl
//!
//! Command-line interface definitions for the stack controller.
//!
//! # Commands
//!
//! - `up` / `down` / `restart` - Stack lifecycle
//! - `status` - Container status
//! - `logs [SERVICE]` - Follow one service or tail all
//! - `test` - Run the health checks
//! - `clean` - Stop the stack and delete its volumes
//! - `info` / `open` - Show or open the service URLs
//! - `menu` - Interactive menu (the default with no command)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start the stack and print its endpoints
//! STACK_ROOT=/srv/llm-stack stackctl up
//!
//! # Follow the collector's logs
//! stackctl logs llm-metrics
//! ```

pub mod commands;
pub mod completions;
pub mod menu;

pub use commands::{CommandEntry, StackCommand, COMMAND_TABLE};
pub use completions::handle_completions;
pub use menu::{run_menu, MenuInput, StdinLines};

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// stackctl - LLM monitoring stack controller
#[derive(Parser, Debug)]
#[command(
    name = "stackctl",
    version,
    about = "Start, stop and health-check the LLM monitoring stack"
)]
pub struct Cli {
    /// Optional TOML configuration file
    #[arg(short, long, global = true, env = "STACKCTL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the stack in the background
    Up,
    /// Stop the stack
    Down,
    /// Stop, then start the stack
    Restart,
    /// Show container status
    Status,
    /// Follow a service's logs, or show the last 200 lines of all services
    Logs(LogsArgs),
    /// Run the stack health checks
    Test(TestArgs),
    /// Stop the stack and delete its volumes
    Clean,
    /// Show service URLs
    Info,
    /// Open the dashboards in a browser
    Open,
    /// Interactive menu
    Menu,
    /// Generate shell completions
    Completions(CompletionsArgs),
}

impl Commands {
    /// The stack command this maps to, if any.
    pub fn stack_command(&self) -> Option<StackCommand> {
        let command = match self {
            Commands::Up => StackCommand::Up,
            Commands::Down => StackCommand::Down,
            Commands::Restart => StackCommand::Restart,
            Commands::Status => StackCommand::Status,
            Commands::Logs(args) => StackCommand::Logs {
                service: args.service.clone(),
            },
            Commands::Test(args) => StackCommand::Test { json: args.json },
            Commands::Clean => StackCommand::Clean,
            Commands::Info => StackCommand::Info,
            Commands::Open => StackCommand::Open,
            Commands::Menu | Commands::Completions(_) => return None,
        };
        Some(command)
    }
}

#[derive(Args, Debug)]
pub struct LogsArgs {
    /// Service to follow (omit for a tail of all services)
    pub service: Option<String>,
}

#[derive(Args, Debug)]
pub struct TestArgs {
    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parse_no_command_is_menu() {
        let cli = Cli::try_parse_from(["stackctl"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_parse_up() {
        let cli = Cli::try_parse_from(["stackctl", "up"]).unwrap();
        assert_eq!(
            cli.command.unwrap().stack_command(),
            Some(StackCommand::Up)
        );
    }

    #[test]
    fn test_cli_parse_logs_with_service() {
        let cli = Cli::try_parse_from(["stackctl", "logs", "grafana"]).unwrap();
        assert_eq!(
            cli.command.unwrap().stack_command(),
            Some(StackCommand::Logs {
                service: Some("grafana".to_string())
            })
        );
    }

    #[test]
    fn test_cli_parse_logs_without_service() {
        let cli = Cli::try_parse_from(["stackctl", "logs"]).unwrap();
        assert_eq!(
            cli.command.unwrap().stack_command(),
            Some(StackCommand::Logs { service: None })
        );
    }

    #[test]
    fn test_cli_parse_test_json() {
        let cli = Cli::try_parse_from(["stackctl", "test", "--json"]).unwrap();
        assert_eq!(
            cli.command.unwrap().stack_command(),
            Some(StackCommand::Test { json: true })
        );
    }

    #[test]
    fn test_cli_parse_global_config() {
        let cli = Cli::try_parse_from(["stackctl", "info", "-c", "stack.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("stack.toml")));
    }

    #[test]
    fn test_cli_menu_has_no_stack_command() {
        let cli = Cli::try_parse_from(["stackctl", "menu"]).unwrap();
        assert!(cli.command.unwrap().stack_command().is_none());
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["stackctl", "deploy"]).is_err());
    }

    #[test]
    fn test_every_table_entry_is_a_cli_command() {
        for entry in COMMAND_TABLE.iter() {
            let cli = Cli::try_parse_from(["stackctl", entry.name]).unwrap();
            let command = cli.command.unwrap().stack_command().unwrap();
            assert_eq!(command.name(), entry.name);
        }
    }
}
