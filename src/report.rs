//! Renders an [`AnalysisReport`] for the terminal and as a Markdown file.

use console::style;
use std::fmt::Write;

use crate::format::{score_grade, truncate_text};
use crate::models::{AnalysisReport, DiagnosticItem};
use crate::theme::score_style;

/// Display name and wire key of the diagnostic groups, in display order.
pub const CATEGORIES: [(&str, &str); 3] = [
    ("元数据检查", "metadata"),
    ("结构检查", "structure"),
    ("关键词检查", "keywords"),
];

const OTHER_CATEGORY: &str = "其他检查";

/// Maximum of each sub-score, as defined by the service.
pub const SUB_SCORE_MAX: [(&str, f64); 4] = [("元数据", 30.0), ("结构", 25.0), ("关键词", 20.0), ("AI语义", 25.0)];

pub fn summary(total_score: f64) -> &'static str {
    if total_score >= 90.0 {
        "✅ SEO质量优秀，继续保持！"
    } else if total_score >= 70.0 {
        "⚠️ SEO质量良好，但仍有优化空间。"
    } else {
        "❌ SEO质量需要显著改进，请重点关注上述诊断问题。"
    }
}

fn sub_scores(report: &AnalysisReport) -> [(&'static str, f64, f64); 4] {
    let values = [report.metadata_score, report.structure_score, report.keyword_score, report.ai_score];
    let mut out = [("", 0.0, 0.0); 4];
    for (i, ((label, max), value)) in SUB_SCORE_MAX.iter().zip(values).enumerate() {
        out[i] = (*label, value, *max);
    }
    out
}

/// Current and expected value, only when both carry text.
fn value_pair(item: &DiagnosticItem) -> Option<(&str, &str)> {
    let current = item.current_value.as_deref().filter(|v| !v.is_empty())?;
    let expected = item.expected_value.as_deref().filter(|v| !v.is_empty())?;
    Some((current, expected))
}

/// Markdown document in the same layout as the service's own reporter.
pub fn render_markdown(report: &AnalysisReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# SEO诊断报告\n");
    let _ = writeln!(out, "**文件**: `{}`\n", report.file_path);
    let _ = writeln!(out, "**总分**: {:.1}/100 {}\n", report.total_score, report.emoji_badge());

    let _ = writeln!(out, "## 评分详情\n");
    let scores = sub_scores(report);
    for (i, (label, value, max)) in scores.iter().enumerate() {
        let tail = if i + 1 == scores.len() { "\n" } else { "" };
        let _ = writeln!(out, "- **{label}**: {value:.1}/{max:.0}{tail}");
    }

    if !report.user_keywords.is_empty() {
        let _ = writeln!(out, "**目标关键词**: {}", report.user_keywords.join(", "));
    }
    if !report.extracted_keywords.is_empty() {
        let _ = writeln!(out, "**自动提取关键词**: {}\n", report.extracted_keywords.join(", "));
    }

    let _ = writeln!(out, "## 诊断详情\n");
    for (title, key) in CATEGORIES {
        let items: Vec<&DiagnosticItem> = report.diagnostics_in(key).collect();
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(out, "### {title}\n");
        for item in items {
            let _ = writeln!(out, "{} **{}** ({:.1}分)", item.severity.icon(), item.check_name, item.score);
            let _ = writeln!(out, "   - {}", item.message);
            if !item.suggestion.is_empty() {
                let _ = writeln!(out, "   - 💡 建议: {}", item.suggestion);
            }
            if let Some((current, expected)) = value_pair(item) {
                let _ = writeln!(out, "   - 当前值: `{current}` | 期望值: `{expected}`");
            }
            out.push('\n');
        }
    }

    if let Some(ai) = &report.ai_analysis {
        let _ = writeln!(out, "## AI语义分析\n");
        let _ = writeln!(out, "**综合评价**: {}\n", ai.overall_feedback);
        let _ = writeln!(out, "- 内容相关性: {:.1}/100", ai.relevance_score);
        let _ = writeln!(out, "- 内容深度: {:.1}/100", ai.depth_score);
        let _ = writeln!(out, "- 可读性: {:.1}/100\n", ai.readability_score);
        if !ai.improvement_suggestions.is_empty() {
            let _ = writeln!(out, "**改进建议**:\n");
            for (i, suggestion) in ai.improvement_suggestions.iter().enumerate() {
                let _ = writeln!(out, "{}. {}", i + 1, suggestion);
            }
            out.push('\n');
        }
    }

    let _ = writeln!(out, "## 总结\n");
    out.push_str(summary(report.total_score));
    out
}

/// Styled terminal view of a report.
pub fn render_terminal(report: &AnalysisReport, history_id: Option<&str>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n📊 {}", style("SEO诊断报告").cyan().bold());
    if !report.file_path.is_empty() {
        let _ = writeln!(out, "📄 {}", style(&report.file_path).dim());
    }
    if let Some(id) = history_id {
        let _ = writeln!(out, "🆔 {}", style(id).dim());
    }
    let _ = writeln!(
        out,
        "\n   {} {}  {}",
        score_style(report.total_score).apply_to(format!("{:.1}", report.total_score)),
        style("/ 100").dim(),
        score_style(report.total_score).apply_to(score_grade(report.total_score)),
    );

    let _ = writeln!(out, "\n{}", style("评分详情").yellow());
    for (label, value, max) in sub_scores(report) {
        let _ = writeln!(out, "  {:<8} {:>5.1} / {:.0}", label, value, max);
    }

    if !report.user_keywords.is_empty() {
        let _ = writeln!(out, "\n🎯 目标关键词: {}", style(report.user_keywords.join(", ")).cyan());
    }
    if !report.extracted_keywords.is_empty() {
        let _ = writeln!(out, "🔑 自动提取关键词: {}", style(report.extracted_keywords.join(", ")).cyan());
    }

    let known: Vec<&str> = CATEGORIES.iter().map(|(_, key)| *key).collect();
    let others: Vec<&DiagnosticItem> = report
        .diagnostics
        .iter()
        .filter(|d| !known.contains(&d.category.as_str()))
        .collect();
    let mut groups: Vec<(&str, Vec<&DiagnosticItem>)> = CATEGORIES
        .iter()
        .map(|(title, key)| (*title, report.diagnostics_in(*key).collect()))
        .collect();
    groups.push((OTHER_CATEGORY, others));

    for (title, items) in groups {
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{}", style(title).magenta());
        for item in items {
            let _ = writeln!(
                out,
                "  {} {} {}",
                item.severity.icon(),
                style(&item.check_name).bold(),
                style(format!("({:.1}分)", item.score)).dim()
            );
            let _ = writeln!(out, "     {}", item.message);
            if !item.suggestion.is_empty() {
                let _ = writeln!(out, "     💡 {}", style(&item.suggestion).green());
            }
            if let Some((current, expected)) = value_pair(item) {
                let _ = writeln!(
                    out,
                    "     当前值: {} | 期望值: {}",
                    style(truncate_text(current, 60)).yellow(),
                    style(truncate_text(expected, 60)).green()
                );
            }
        }
    }

    if let Some(ai) = &report.ai_analysis {
        let _ = writeln!(out, "\n{}", style("🤖 AI语义分析").magenta());
        if !ai.overall_feedback.is_empty() {
            let _ = writeln!(out, "  {}", ai.overall_feedback);
        }
        let _ = writeln!(
            out,
            "  相关性 {:.1} | 深度 {:.1} | 可读性 {:.1}",
            ai.relevance_score, ai.depth_score, ai.readability_score
        );
        for (i, suggestion) in ai.improvement_suggestions.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, suggestion);
        }
    }

    let _ = writeln!(out, "\n{}", summary(report.total_score));
    out
}
