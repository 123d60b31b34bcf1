use std::path::PathBuf;
use std::sync::Arc;

use crate::api::{AnalysisApi, ApiClient};
use crate::config::Config;

pub mod analyze;
pub mod config;
pub mod detail;
pub mod health;
pub mod history;
pub mod open;
pub mod theme;

pub type CommandResult = crate::error::Result<()>;

/// What every command gets to work with.
#[derive(Clone)]
pub struct CommandContext {
    pub api: Arc<dyn AnalysisApi>,
    pub config: Config,
    /// File `config` commands read and write.
    pub config_path: PathBuf,
    /// Print raw JSON instead of the rendered views.
    pub json: bool,
}

impl CommandContext {
    /// Builds a context backed by the REST client for `config`.
    pub fn connect(config: Config, config_path: PathBuf, json: bool) -> crate::error::Result<Self> {
        let client = ApiClient::new(&config)?;
        tracing::debug!(server = %client.server(), "using analysis service");
        Ok(Self { api: Arc::new(client), config, config_path, json })
    }
}

pub use analyze::{AnalyzeArgs, AnalyzeCommand};
pub use config::{ConfigAction, ConfigCommand};
pub use detail::{ShowArgs, ShowCommand};
pub use health::HealthCommand;
pub use history::{HistoryArgs, HistoryCommand};
pub use open::OpenCommand;
pub use theme::ThemeCommand;

#[cfg(test)]
pub(crate) mod testing {
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::CommandContext;
    use crate::api::AnalysisApi;
    use crate::config::Config;
    use crate::error::{Error, Result};
    use crate::models::{
        AnalysisReport, AnalyzeResponse, HealthStatus, HistoryDetail, HistoryPage, HistoryQuery,
    };

    /// In-memory service that records what it was asked.
    #[derive(Default)]
    pub struct FakeApi {
        pub report: AnalysisReport,
        pub page: HistoryPage,
        pub health: HealthStatus,
        pub fail_with: Option<String>,
        pub analyzed: Mutex<Vec<(String, Vec<String>)>>,
        pub queries: Mutex<Vec<HistoryQuery>>,
        pub details: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn check(&self) -> Result<()> {
            match &self.fail_with {
                Some(message) => Err(Error::Api { status: Some(500), message: message.clone() }),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl AnalysisApi for FakeApi {
        async fn analyze_file(&self, path: &Path, keywords: &[String]) -> Result<AnalyzeResponse> {
            self.check()?;
            self.analyzed
                .lock()
                .unwrap()
                .push((path.display().to_string(), keywords.to_vec()));
            Ok(AnalyzeResponse { report: self.report.clone(), history_id: "h-1".into() })
        }

        async fn get_history(&self, query: &HistoryQuery) -> Result<HistoryPage> {
            self.check()?;
            self.queries.lock().unwrap().push(*query);
            Ok(self.page.clone())
        }

        async fn get_history_detail(&self, record_id: &str) -> Result<HistoryDetail> {
            self.check()?;
            self.details.lock().unwrap().push(record_id.to_string());
            Ok(HistoryDetail { report: self.report.clone() })
        }

        async fn check_health(&self) -> Result<HealthStatus> {
            self.check()?;
            Ok(self.health.clone())
        }
    }

    pub fn context(api: Arc<FakeApi>) -> CommandContext {
        CommandContext {
            api,
            config: Config::default(),
            config_path: std::env::temp_dir().join("mdaudit-unused-config.json"),
            json: false,
        }
    }
}
