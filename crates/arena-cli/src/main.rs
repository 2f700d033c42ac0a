//! arenactl binary entrypoint.

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use arena_cli::cli::{Cli, Commands};
use arena_cli::commands::{NodeCommand, ServingCommand, TrainingCommand};
use arena_cli::output::OutputFormat;
use arena_cli::CliError;
use arena_sdk::{ArenaClient, Executor};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    let runtime = match tokio::runtime::Runtime::new().context("failed to create async runtime") {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Logs go to stderr so table and JSON output stay clean on stdout.
/// `RUST_LOG` wins over `--log-level` when set.
fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.to_ascii_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(cli.log_color)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let client = ArenaClient::new(cli.client_config())?;
    dispatch(&client, cli).await
}

async fn dispatch<E: Executor>(client: &ArenaClient<E>, cli: Cli) -> Result<(), CliError> {
    let format = OutputFormat::new(cli.format);
    let mut stdout = tokio::io::stdout();

    match cli.command {
        Commands::Node { command } => {
            let cmd = NodeCommand::new(client);
            cmd.execute(&mut stdout, &format, &command).await?;
        }
        Commands::Training { command } => {
            let cmd = TrainingCommand::new(client);
            cmd.execute(&mut stdout, &format, &command).await?;
        }
        Commands::Serving { command } => {
            let cmd = ServingCommand::new(client);
            cmd.execute(&mut stdout, &format, &command).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_cli::cli::{Format, NodeCommands};
    use arena_exec::{FakeExecutor, ProcessResult};

    #[test]
    fn cli_parses_node_list() {
        let cli = Cli::parse_from(["arenactl", "node", "list"]);
        assert!(matches!(
            cli.command,
            Commands::Node {
                command: NodeCommands::List { .. }
            }
        ));
    }

    #[test]
    fn cli_respects_format_flag() {
        let cli = Cli::parse_from(["arenactl", "--format", "json", "training", "list"]);
        assert_eq!(cli.format, Format::Json);
    }

    #[test]
    fn cli_rejects_unknown_job_type() {
        let result = Cli::try_parse_from(["arenactl", "training", "list", "--type", "bogus"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn run_with_missing_binary_fails() {
        let cli = Cli::parse_from([
            "arenactl",
            "--binary",
            "/nonexistent/arena-binary",
            "training",
            "list",
        ]);
        let result = run(cli).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn dispatch_uses_global_namespace() {
        let fake = FakeExecutor::new().with_response(ProcessResult::ok("[]"));
        let cli = Cli::parse_from(["arenactl", "-n", "team-a", "training", "list"]);
        let client = ArenaClient::with_executor(cli.client_config(), fake.clone()).unwrap();
        dispatch(&client, cli).await.unwrap();

        let args = fake.last_args().unwrap();
        assert_eq!(args[0], "list");
        assert!(args.contains(&"--namespace=team-a".to_string()));
    }
}
