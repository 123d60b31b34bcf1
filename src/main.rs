use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use mdaudit::cli::{self, Cli, Commands};
use mdaudit::commands::ConfigCommand;
use mdaudit::config::Config;
use mdaudit::error;
use mdaudit::shell::MdauditShell;

/// Reads `MDAUDIT_LOG` (or `RUST_LOG`); defaults to `warn`. Logs go to
/// stderr so command output stays clean.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env("MDAUDIT_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> error::Result<()> {
    // config edits must work even when the stored server URL is broken
    let config_path = Config::config_path()?;
    if let Some(Commands::Config { action }) = &cli.command {
        ConfigCommand::at(config_path).execute(action.as_ref())?;
        return Ok(());
    }

    let rt = tokio::runtime::Runtime::new()?;
    let ctx = cli::context(&config_path, cli.server.as_deref(), cli.json)?;

    match cli.command {
        Some(command) => {
            rt.block_on(command.run(&ctx))?;
            Ok(())
        }
        None => MdauditShell::new(ctx, cli.server)?.run(&rt),
    }
}

fn main() -> ExitCode {
    init_tracing("warn");
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
