use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::commands::{CommandContext, CommandResult};
use crate::error::{Error, Result};
use crate::format::format_file_size;
use crate::models::{AnalysisReport, AnalyzeResponse};
use crate::report::{render_markdown, render_terminal};
use crate::validation::{parse_keywords, validate_file, validate_keywords, FileInfo};

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Document to analyze (.md, .txt or .markdown)
    pub file: PathBuf,

    /// Target keyword. Repeatable; a JSON array or a comma separated list also works
    #[arg(short = 'k', long = "keyword")]
    pub keywords: Vec<String>,

    /// Also write the report as Markdown to this path
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub struct AnalyzeCommand<'a> {
    ctx: &'a CommandContext,
}

impl<'a> AnalyzeCommand<'a> {
    pub fn new(ctx: &'a CommandContext) -> Self {
        Self { ctx }
    }

    /// Flattens every `-k` value into one validated keyword list.
    pub fn keywords(raw: &[String]) -> Result<Vec<String>> {
        let mut keywords = Vec::new();
        for entry in raw {
            keywords.extend(parse_keywords(entry).map_err(Error::Validation)?);
        }
        if let Some(error) = validate_keywords(Some(keywords.as_slice())).error {
            return Err(Error::Validation(error));
        }
        Ok(keywords)
    }

    pub fn check_file(&self, path: &Path) -> Result<FileInfo> {
        let info = FileInfo::from_path(path)
            .map_err(|e| Error::Validation(format!("无法读取文件 {}：{e}", path.display())))?;
        let check = validate_file(&info, &self.ctx.config.file_rules());
        if !check.valid {
            return Err(Error::Validation(check.errors.join("\n")));
        }
        Ok(info)
    }

    /// Validates the input locally, then submits it.
    pub async fn run(&self, args: &AnalyzeArgs) -> Result<AnalyzeResponse> {
        let info = self.check_file(&args.file)?;
        let keywords = Self::keywords(&args.keywords)?;
        tracing::info!(file = %info.name, size = info.size, keywords = keywords.len(), "submitting document");

        let spinner = show_spinner(format!("正在分析 {}（{}）...", info.name, format_file_size(info.size)));
        let result = self.ctx.api.analyze_file(&args.file, &keywords).await;
        spinner.finish_and_clear();
        result
    }

    pub async fn execute(&self, args: &AnalyzeArgs) -> CommandResult {
        let response = self.run(args).await?;

        if self.ctx.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            print!("{}", render_terminal(&response.report, Some(&response.history_id)));
        }

        if let Some(path) = &args.export {
            export_report(&response.report, path)?;
        }
        Ok(())
    }
}

pub fn export_report(report: &AnalysisReport, path: &Path) -> CommandResult {
    std::fs::write(path, render_markdown(report))?;
    println!("✅ {}", style(format!("报告已导出到 {}", path.display())).green());
    Ok(())
}

fn show_spinner(message: String) -> ProgressBar {
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    let spinner = ProgressBar::new_spinner().with_style(style).with_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{context, FakeApi};
    use std::io::Write;
    use std::sync::Arc;

    fn document(suffix: &str, body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    fn args(file: &Path, keywords: &[&str]) -> AnalyzeArgs {
        AnalyzeArgs {
            file: file.to_path_buf(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            export: None,
        }
    }

    #[test]
    fn keywords_from_mixed_inputs() {
        let raw = vec!["seo, rust".to_string(), r#"["markdown"]"#.to_string()];
        assert_eq!(AnalyzeCommand::keywords(&raw).unwrap(), vec!["seo", "rust", "markdown"]);
        assert!(AnalyzeCommand::keywords(&[]).unwrap().is_empty());
    }

    #[test]
    fn keywords_are_validated() {
        let long = vec!["k".repeat(101)];
        let err = AnalyzeCommand::keywords(&long).unwrap_err();
        assert_eq!(err.to_string(), "关键词长度不能超过100个字符");

        let blank = vec!["seo, ".to_string()];
        assert_eq!(AnalyzeCommand::keywords(&blank).unwrap_err().to_string(), "关键词必须是非空字符串");
    }

    #[tokio::test]
    async fn rejects_unsupported_files_before_uploading() {
        let api = Arc::new(FakeApi::default());
        let ctx = context(api.clone());
        let file = document(".pdf", "%PDF");

        let err = AnalyzeCommand::new(&ctx).run(&args(file.path(), &[])).await.unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("不支持的文件格式：.pdf"));
        assert!(api.analyzed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_files_over_the_configured_limit() {
        let api = Arc::new(FakeApi::default());
        let mut ctx = context(api.clone());
        ctx.config.max_file_size_mb = 0.000001;
        let file = document(".md", "# a heading that is too big");

        let err = AnalyzeCommand::new(&ctx).run(&args(file.path(), &[])).await.unwrap_err();

        assert!(err.to_string().starts_with("文件大小超过限制"));
        assert!(api.analyzed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_a_validation_error() {
        let ctx = context(Arc::new(FakeApi::default()));
        let err = AnalyzeCommand::new(&ctx)
            .run(&args(Path::new("/definitely/not/here.md"), &[]))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("无法读取文件"));
    }

    #[tokio::test]
    async fn submits_file_with_keywords_and_exports() {
        let api = Arc::new(FakeApi {
            report: AnalysisReport { file_path: "post.md".into(), total_score: 91.0, ..Default::default() },
            ..Default::default()
        });
        let ctx = context(api.clone());
        let file = document(".md", "# Title\n\nbody");
        let out = tempfile::tempdir().unwrap();
        let export = out.path().join("report.md");

        let mut input = args(file.path(), &["seo,rust"]);
        input.export = Some(export.clone());
        AnalyzeCommand::new(&ctx).execute(&input).await.unwrap();

        let calls = api.analyzed.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, vec!["seo", "rust"]);

        let markdown = std::fs::read_to_string(export).unwrap();
        assert!(markdown.starts_with("# SEO诊断报告"));
        assert!(markdown.contains("91.0/100 🟢"));
    }

    #[tokio::test]
    async fn service_errors_pass_through() {
        let api = Arc::new(FakeApi { fail_with: Some("分析失败".into()), ..Default::default() });
        let ctx = context(api);
        let file = document(".txt", "plain");

        let err = AnalyzeCommand::new(&ctx).run(&args(file.path(), &[])).await.unwrap_err();
        assert_eq!(err.to_string(), "分析失败");
    }
}
