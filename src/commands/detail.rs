use std::path::PathBuf;

use clap::Args;
use console::style;

use crate::commands::analyze::export_report;
use crate::commands::{CommandContext, CommandResult};
use crate::error::{Error, Result};
use crate::format::format_full_time;
use crate::models::{AnalysisReport, HistoryDetail};
use crate::report::render_terminal;

/// Report fields that may carry the time the analysis ran.
const TIMESTAMP_FIELDS: [&str; 3] = ["timestamp", "created_at", "analyzed_at"];

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// History record id
    pub id: String,

    /// Also write the report as Markdown to this path
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub struct ShowCommand<'a> {
    ctx: &'a CommandContext,
}

impl<'a> ShowCommand<'a> {
    pub fn new(ctx: &'a CommandContext) -> Self {
        Self { ctx }
    }

    pub async fn run(&self, id: &str) -> Result<HistoryDetail> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::Validation("记录 ID 不能为空".into()));
        }
        self.ctx.api.get_history_detail(id).await
    }

    pub async fn execute(&self, args: &ShowArgs) -> CommandResult {
        let detail = self.run(&args.id).await?;

        if self.ctx.json {
            println!("{}", serde_json::to_string_pretty(&detail)?);
        } else {
            print!("{}", render_terminal(&detail.report, Some(args.id.trim())));
            if let Some(at) = analyzed_at(&detail.report) {
                println!("{}", style(format!("分析时间: {at}")).dim());
            }
        }

        if let Some(path) = &args.export {
            export_report(&detail.report, path)?;
        }
        Ok(())
    }
}

/// Full local time of the analysis, when the service reports one.
pub fn analyzed_at(report: &AnalysisReport) -> Option<String> {
    TIMESTAMP_FIELDS
        .iter()
        .find_map(|key| report.extra.get(*key).and_then(|v| v.as_str()))
        .map(format_full_time)
}
