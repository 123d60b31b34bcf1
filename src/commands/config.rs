use std::fmt::Write;
use std::path::PathBuf;

use clap::Subcommand;
use console::style;

use crate::commands::CommandResult;
use crate::config::Config;
use crate::error::Result;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the current configuration
    Show,
    /// Change one setting, e.g. `config set page_size 50`
    Set { key: String, value: String },
    /// Prompt for the analysis service URL
    ServerUrl,
}

/// Reads and writes the config file. Environment overrides are not
/// persisted: changes start from what is on disk.
pub struct ConfigCommand {
    path: PathBuf,
}

impl ConfigCommand {
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Runs `action` and returns the configuration now in effect on disk.
    pub fn execute(&self, action: Option<&ConfigAction>) -> Result<Config> {
        let mut config = Config::load_from(&self.path).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "config file unreadable, starting from defaults");
            Config::default()
        });
        match action {
            Some(ConfigAction::Show) => print!("{}", self.render(&config)),
            Some(ConfigAction::Set { key, value }) => {
                self.update(&mut config, key, value)?;
            }
            Some(ConfigAction::ServerUrl) => {
                let url = dialoguer::Input::<String>::new()
                    .with_prompt("Server URL")
                    .with_initial_text(config.server_url.clone())
                    .interact_text()?;
                self.update(&mut config, "server_url", &url)?;
            }
            None => {
                println!("Available config commands:");
                println!("  {} - Show current configuration", style("config show").green());
                println!("  {} - Change a setting", style("config set <key> <value>").green());
                println!("  {} - Configure the analysis service URL", style("config server-url").green());
            }
        }
        Ok(config)
    }

    pub fn update(&self, config: &mut Config, key: &str, value: &str) -> CommandResult {
        config.set(key, value)?;
        config.save_to(&self.path)?;
        tracing::info!(key, path = %self.path.display(), "config updated");
        println!("✅ {}", style(format!("{key} updated")).green());
        Ok(())
    }

    pub fn render(&self, config: &Config) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Current Configuration ({}):", style(self.path.display()).dim());
        let _ = writeln!(out, "  server_url: {}", config.server_url);
        let _ = writeln!(out, "  api_base_path: {}", config.api_base_path);
        let _ = writeln!(out, "  analyze_timeout_secs: {}", config.analyze_timeout_secs);
        let _ = writeln!(out, "  max_file_size_mb: {}", config.max_file_size_mb);
        let _ = writeln!(out, "  allowed_extensions: {}", config.allowed_extensions.join(","));
        let _ = writeln!(out, "  page_size: {}", config.page_size);
        let _ = writeln!(out, "  max_page_size: {}", config.max_page_size);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_persists_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let cmd = ConfigCommand::at(path.clone());

        let action = ConfigAction::Set { key: "page_size".into(), value: "50".into() };
        let config = cmd.execute(Some(&action)).unwrap();

        assert_eq!(config.page_size, 50);
        assert_eq!(Config::load_from(&path).unwrap().page_size, 50);
    }

    #[test]
    fn invalid_value_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let cmd = ConfigCommand::at(path.clone());

        let action = ConfigAction::Set { key: "server_url".into(), value: "not a url".into() };
        assert!(cmd.execute(Some(&action)).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn malformed_file_can_be_repaired() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let cmd = ConfigCommand::at(path.clone());

        let action = ConfigAction::Set { key: "server_url".into(), value: "http://audit.local:9000".into() };
        let config = cmd.execute(Some(&action)).unwrap();

        assert_eq!(config.server_url, "http://audit.local:9000");
        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.server_url, "http://audit.local:9000");
        assert_eq!(saved.page_size, 20);
    }

    #[test]
    fn show_lists_every_setting() {
        let cmd = ConfigCommand::at(PathBuf::from("/tmp/mdaudit.json"));
        let text = console::strip_ansi_codes(&cmd.render(&Config::default())).into_owned();
        assert!(text.contains("server_url: http://localhost:8000"));
        assert!(text.contains("allowed_extensions: .md,.txt,.markdown"));
        assert!(text.contains("max_page_size: 100"));
    }
}
