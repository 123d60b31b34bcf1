use std::fmt::Write;

use console::style;

use crate::commands::history::{HistoryArgs, HistoryCommand};
use crate::commands::{CommandContext, CommandResult};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::format_file_size;
use crate::router::{self, Page, Route};
use crate::validation::MAX_KEYWORD_LENGTH;

/// Navigates to a page by path, e.g. `/` or `/history`.
pub struct OpenCommand<'a> {
    ctx: &'a CommandContext,
}

impl<'a> OpenCommand<'a> {
    pub fn new(ctx: &'a CommandContext) -> Self {
        Self { ctx }
    }

    /// Accepts a path (`/history`) or a route name (`history`).
    pub fn route(target: &str) -> Result<&'static Route> {
        router::resolve(target)
            .or_else(|| router::find_by_name(target))
            .ok_or_else(|| Error::Validation(format!("页面不存在: {target}")))
    }

    pub async fn execute(&self, path: &str) -> CommandResult {
        let route = Self::route(path)?;
        tracing::debug!(path = route.path, name = route.name, "navigating");
        self.show(route.page).await
    }

    pub async fn show(&self, page: Page) -> CommandResult {
        tracing::debug!(path = router::route_for(page).path, "showing page");
        match page {
            Page::Home => {
                print!("{}", render_home(&self.ctx.config));
                Ok(())
            }
            Page::History => HistoryCommand::new(self.ctx).execute(&HistoryArgs::default()).await,
        }
    }
}

/// Upload instructions with the limits currently in force.
pub fn render_home(config: &Config) -> String {
    let max_bytes = (config.max_file_size_mb * 1024.0 * 1024.0) as u64;
    let mut out = String::new();
    let _ = writeln!(out, "\n📝 {}", style("Markdown SEO 诊断").cyan().bold());
    let _ = writeln!(out, "{}", style("上传文档，获取评分与优化建议").dim());
    let _ = writeln!(out, "\n  支持格式: {}", config.allowed_extensions.join(", "));
    let _ = writeln!(out, "  大小上限: {}", format_file_size(max_bytes));
    let _ = writeln!(out, "  关键词: 可选，每个不超过 {MAX_KEYWORD_LENGTH} 个字符");
    let _ = writeln!(out, "\n  {}", style("analyze <文件> -k 关键词1,关键词2").green());
    let _ = writeln!(out, "  {}", style("open /history").green());
    out
}
