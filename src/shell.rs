use std::path::PathBuf;

use clap::Parser;
use console::style;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use tokio::runtime::Runtime;

use crate::cli::{self, Cli};
use crate::commands::CommandContext;
use crate::completer::MdauditCompleter;
use crate::config::Config;
use crate::error::{Error, Result};

pub struct MdauditShell {
    editor: Editor<MdauditCompleter, DefaultHistory>,
    session: Session,
    history_path: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Line handling of the shell, separate from the terminal.
pub struct Session {
    ctx: CommandContext,
    /// `--server` given on the command line; survives config reloads.
    server: Option<String>,
}

impl MdauditShell {
    pub fn new(ctx: CommandContext, server: Option<String>) -> Result<Self> {
        let mut editor = Editor::<MdauditCompleter, DefaultHistory>::new()?;
        editor.set_helper(Some(MdauditCompleter::new()));

        let history_path = ctx.config_path.parent().map(|dir| dir.join("history.txt"));
        if let Some(path) = &history_path {
            let _ = editor.load_history(path);
        }

        Ok(Self { editor, session: Session::new(ctx, server), history_path })
    }

    pub fn run(&mut self, rt: &Runtime) -> Result<()> {
        println!("{}", self.get_welcome_message());

        loop {
            match self.editor.readline("📝 mdaudit> ") {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(line.as_str());
                    match rt.block_on(self.session.process_command(&line)) {
                        Ok(Flow::Exit) => break,
                        Ok(Flow::Continue) => {}
                        Err(e) => println!("❌ Error: {}", e),
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            }
        }

        if let Some(path) = &self.history_path {
            if let Err(e) = self.editor.save_history(path) {
                tracing::warn!(error = %e, "could not save shell history");
            }
        }
        println!("👋 Bye");
        Ok(())
    }

    fn get_welcome_message(&self) -> String {
        format!(
            "{}\n{}\n{}\n",
            style("📝 mdaudit - Markdown SEO 诊断").cyan().bold(),
            style(format!("🌐 {}", self.session.ctx.config.server_url)).magenta(),
            style("Type 'help' to see available commands").green()
        )
    }
}

fn show_help() {
    println!("\n{}", style("📝 mdaudit - Markdown SEO 诊断").cyan().bold());
    println!("{}", style("Available Commands:").yellow());

    println!("\n{}", style("Analysis:").magenta());
    println!("  {} - Upload a document and show its report", style("analyze <FILE> [-k KEYWORDS] [--export PATH]").green());
    println!("    Example: analyze post.md -k seo,rust");
    println!("    Example: analyze \"my post.md\" -k '[\"seo\", \"rust\"]' --export report.md");

    println!("\n{}", style("History:").magenta());
    println!("  {} - List past analyses", style("history [--page N] [--page-size N] [--severity all|error|warning]").green());
    println!("  {} - Show one past report", style("show <ID> [--export PATH]").green());

    println!("\n{}", style("Pages:").magenta());
    println!("  {} - Open a page by path", style("open </|/history>").green());
    println!("  {} - Upload instructions and limits", style("home").green());

    println!("\n{}", style("Service:").magenta());
    println!("  {} - Check the analysis service", style("health").green());
    println!("  {} - Print the design tokens as JSON", style("theme").green());

    println!("\n{}", style("Configuration:").magenta());
    println!("  {} - Show current configuration", style("config show").green());
    println!("  {} - Change a setting", style("config set <key> <value>").green());
    println!("  {} - Configure the service URL", style("config server-url").green());
    println!("  {} - Show this help", style("help").green());
    println!("  {} - Exit the shell", style("exit").green());

    println!("\n{}", style("Tips:").blue());
    println!("• Use TAB for command completion");
    println!("• Quote arguments that contain spaces, as in a POSIX shell");
    println!("• Add --json to any command for the raw response");
}

impl Session {
    pub fn new(ctx: CommandContext, server: Option<String>) -> Self {
        Self { ctx, server }
    }

    pub async fn process_command(&mut self, line: &str) -> Result<Flow> {
        let parts = shlex::split(line)
            .ok_or_else(|| Error::Validation("无法解析命令：引号不匹配".into()))?;

        match parts.first().map(|p| p.to_lowercase()).as_deref() {
            None => return Ok(Flow::Continue),
            Some("help") | Some("h") | Some("?") => {
                show_help();
                return Ok(Flow::Continue);
            }
            Some("exit") | Some("quit") | Some("q") => return Ok(Flow::Exit),
            _ => {}
        }

        let parsed = match Cli::try_parse_from(std::iter::once("mdaudit".to_string()).chain(parts)) {
            Ok(parsed) => parsed,
            // usage errors and --help both land here
            Err(e) => {
                print!("{}", e.render());
                return Ok(Flow::Continue);
            }
        };

        let Some(command) = parsed.command else {
            show_help();
            return Ok(Flow::Continue);
        };

        let changed = if parsed.server.is_some() || parsed.json {
            let server = parsed.server.as_deref().or(self.server.as_deref());
            let ctx = cli::context(&self.ctx.config_path, server, parsed.json || self.ctx.json)?;
            command.run(&ctx).await?
        } else {
            command.run(&self.ctx).await?
        };

        if changed {
            self.reload()?;
        }
        Ok(Flow::Continue)
    }

    fn reload(&mut self) -> Result<()> {
        self.ctx = cli::context(&self.ctx.config_path, self.server.as_deref(), self.ctx.json)?;
        tracing::debug!(server = %self.ctx.config.server_url, "configuration reloaded");
        Ok(())
    }
}
