use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use stackctl::cli::{handle_completions, run_menu, Cli, Commands, StdinLines};
use stackctl::config::StackConfig;
use stackctl::probe::ReqwestProbe;
use stackctl::runner::SystemRunner;
use stackctl::Controller;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed; anything else is a usage error.
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    if let Some(Commands::Completions(args)) = &cli.command {
        handle_completions(args);
        return;
    }

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = StackConfig::load(cli.config.as_deref())
        .context("failed to load configuration")?
        .with_env_overrides();
    config.validate().context("invalid configuration")?;

    if let Err(e) = stackctl::logging::init_tracing(&config.logging) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }
    tracing::debug!(?config, "Configuration loaded");

    let probe = ReqwestProbe::new(config.health_check.timeout_seconds)
        .context("failed to build HTTP client")?;
    let controller = Controller::new(config, SystemRunner, probe);

    match cli.command.as_ref().and_then(Commands::stack_command) {
        Some(command) => controller.execute(&command).await?,
        None => run_menu(&controller, StdinLines::spawn()).await?,
    }

    Ok(())
}
