use std::fmt::Write;

use console::style;

use crate::commands::{CommandContext, CommandResult};
use crate::models::HealthStatus;

pub struct HealthCommand<'a> {
    ctx: &'a CommandContext,
}

impl<'a> HealthCommand<'a> {
    pub fn new(ctx: &'a CommandContext) -> Self {
        Self { ctx }
    }

    pub async fn execute(&self) -> CommandResult {
        let health = self.ctx.api.check_health().await?;
        if self.ctx.json {
            println!("{}", serde_json::to_string_pretty(&health)?);
        } else {
            print!("{}", render_health(&health));
        }
        Ok(())
    }
}

pub fn render_health(health: &HealthStatus) -> String {
    let mut out = String::new();
    if health.is_healthy() {
        let _ = writeln!(out, "✅ {}", style("服务运行正常").green());
    } else {
        let _ = writeln!(out, "⚠️  {}", style(format!("服务状态: {}", health.status)).yellow());
    }
    if !health.version.is_empty() {
        let _ = writeln!(out, "  版本: {}", health.version);
    }
    if !health.analyzer_version.is_empty() {
        let _ = writeln!(out, "  分析器版本: {}", health.analyzer_version);
    }
    let _ = writeln!(out, "  AI分析: {}", if health.ai_enabled { "已启用" } else { "未启用" });
    out
}
