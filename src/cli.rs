use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    AnalyzeArgs, AnalyzeCommand, CommandContext, ConfigAction, ConfigCommand, HealthCommand, HistoryArgs,
    HistoryCommand, OpenCommand, ShowArgs, ShowCommand, ThemeCommand,
};
use crate::config::Config;
use crate::error::Result;
use crate::router::Page;

#[derive(Parser, Debug)]
#[command(name = "mdaudit", version, about = "Markdown SEO audit client")]
pub struct Cli {
    /// Analysis service URL, overriding the config file
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Print raw JSON responses instead of rendered views
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Upload a document and show its SEO report
    Analyze(AnalyzeArgs),
    /// List past analyses
    History(HistoryArgs),
    /// Show the report of one past analysis
    Show(ShowArgs),
    /// Check that the analysis service is up
    Health,
    /// Print the design tokens as JSON
    Theme,
    /// Open a page by path, e.g. `/` or `/history`
    Open { path: String },
    /// Show the upload page
    Home,
    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

impl Commands {
    /// Runs the command. Returns `true` when the configuration on disk changed.
    pub async fn run(&self, ctx: &CommandContext) -> Result<bool> {
        match self {
            Commands::Analyze(args) => AnalyzeCommand::new(ctx).execute(args).await?,
            Commands::History(args) => HistoryCommand::new(ctx).execute(args).await?,
            Commands::Show(args) => ShowCommand::new(ctx).execute(args).await?,
            Commands::Health => HealthCommand::new(ctx).execute().await?,
            Commands::Theme => ThemeCommand.execute()?,
            Commands::Open { path } => OpenCommand::new(ctx).execute(path).await?,
            Commands::Home => OpenCommand::new(ctx).show(Page::Home).await?,
            Commands::Config { action } => {
                ConfigCommand::at(ctx.config_path.clone()).execute(action.as_ref())?;
                return Ok(matches!(action, Some(ConfigAction::Set { .. } | ConfigAction::ServerUrl)));
            }
        }
        Ok(false)
    }
}

/// Loads the configuration at `config_path`, applies a `--server` override
/// and connects.
pub fn context(config_path: &PathBuf, server: Option<&str>, json: bool) -> Result<CommandContext> {
    let mut config = Config::load_at(config_path)?;
    if let Some(url) = server {
        config.set("server_url", url)?;
    }
    CommandContext::connect(config, config_path.clone(), json)
}
