use std::fmt::Write;

use clap::Args;
use console::style;

use crate::commands::{CommandContext, CommandResult};
use crate::error::{Error, Result};
use crate::format::{format_relative_time, score_grade, severity_icon, truncate_text};
use crate::models::{HistoryPage, HistoryQuery, SeverityFilter};
use crate::theme::score_style;
use crate::validation::{validate_page_number, validate_page_size};

const FILE_NAME_WIDTH: usize = 32;

#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub page: i64,

    /// Records per page (defaults to the configured page size)
    #[arg(long, allow_negative_numbers = true)]
    pub page_size: Option<i64>,

    /// Only list records of this severity
    #[arg(long, value_enum, default_value_t = SeverityFilter::All)]
    pub severity: SeverityFilter,
}

impl Default for HistoryArgs {
    fn default() -> Self {
        Self { page: 1, page_size: None, severity: SeverityFilter::All }
    }
}

pub struct HistoryCommand<'a> {
    ctx: &'a CommandContext,
}

impl<'a> HistoryCommand<'a> {
    pub fn new(ctx: &'a CommandContext) -> Self {
        Self { ctx }
    }

    /// Checks paging input against the configured limits.
    pub fn query(&self, args: &HistoryArgs) -> Result<HistoryQuery> {
        let max_page_size = self.ctx.config.max_page_size as i64;
        let page_size = args.page_size.unwrap_or(self.ctx.config.page_size as i64);

        if !validate_page_number(args.page) || args.page > u32::MAX as i64 {
            return Err(Error::Validation("页码必须是正整数".into()));
        }
        if !validate_page_size(page_size, max_page_size) {
            return Err(Error::Validation(format!("每页数量必须在 1 到 {max_page_size} 之间")));
        }

        Ok(HistoryQuery { page: args.page as u32, page_size: page_size as u32, severity: args.severity })
    }

    pub async fn run(&self, args: &HistoryArgs) -> Result<HistoryPage> {
        let query = self.query(args)?;
        self.ctx.api.get_history(&query).await
    }

    pub async fn execute(&self, args: &HistoryArgs) -> CommandResult {
        let page = self.run(args).await?;
        if self.ctx.json {
            println!("{}", serde_json::to_string_pretty(&page)?);
        } else {
            print!("{}", render_page(&page, args.severity));
        }
        Ok(())
    }
}

pub fn render_page(page: &HistoryPage, severity: SeverityFilter) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n📚 {}", style("历史记录").cyan().bold());
    if severity != SeverityFilter::All {
        let _ = writeln!(out, "{}", style(format!("筛选: {severity}")).dim());
    }

    if page.items.is_empty() {
        let _ = writeln!(out, "\n  {}", style("暂无历史记录").dim());
        return out;
    }

    out.push('\n');
    for record in &page.items {
        let score = match record.total_score {
            Some(score) => format!(
                "{} {}",
                score_style(score).apply_to(format!("{score:>5.1}")),
                score_style(score).apply_to(score_grade(score))
            ),
            None => format!("{}", style("  -  ").dim()),
        };
        let _ = writeln!(
            out,
            "  {} {:<width$} {}  {}  {}",
            severity_icon(&record.severity),
            truncate_text(&record.file_name, FILE_NAME_WIDTH),
            score,
            style(format_relative_time(&record.timestamp)).dim(),
            style(&record.id).dim(),
            width = FILE_NAME_WIDTH + 3,
        );
    }

    let _ = writeln!(
        out,
        "\n第 {}/{} 页，共 {} 条",
        page.page,
        page.total_pages().max(1),
        page.total
    );
    if page.has_next() {
        let _ = writeln!(out, "{}", style(format!("下一页: history --page {}", page.page + 1)).dim());
    }
    out
}
