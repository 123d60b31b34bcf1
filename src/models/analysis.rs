use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// POST /api/v1/analyze — response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub report: AnalysisReport,
    pub history_id: String,
}

/// GET /api/v1/history/{id} — response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryDetail {
    pub report: AnalysisReport,
}

/// Quality report produced by the service. Fields this client does not know
/// about are kept in `extra` and written back out unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub file_path: String,
    pub total_score: f64,
    #[serde(default)]
    pub metadata_score: f64,
    #[serde(default)]
    pub structure_score: f64,
    #[serde(default)]
    pub keyword_score: f64,
    #[serde(default)]
    pub ai_score: f64,
    #[serde(default)]
    pub diagnostics: Vec<DiagnosticItem>,
    #[serde(default)]
    pub ai_analysis: Option<AiAnalysis>,
    #[serde(default)]
    pub extracted_keywords: Vec<String>,
    #[serde(default)]
    pub user_keywords: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisReport {
    /// Badge used in exported reports: 🔴 <40, 🟠 <60, 🟡 <80, 🟢 otherwise.
    pub fn emoji_badge(&self) -> &'static str {
        match self.total_score {
            s if s < 40.0 => "🔴",
            s if s < 60.0 => "🟠",
            s if s < 80.0 => "🟡",
            _ => "🟢",
        }
    }

    pub fn diagnostics_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a DiagnosticItem> + 'a {
        self.diagnostics.iter().filter(move |d| d.category == category)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticItem {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub check_name: String,
    #[serde(default)]
    pub severity: DiagnosticLevel,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub suggestion: String,
    #[serde(default)]
    pub current_value: Option<String>,
    #[serde(default)]
    pub expected_value: Option<String>,
}

/// Level of a single diagnostic. Not the same scale as a history
/// [`Severity`](super::Severity).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Critical,
    Warning,
    Info,
    Success,
    #[default]
    #[serde(other)]
    Unknown,
}

impl DiagnosticLevel {
    pub fn icon(self) -> &'static str {
        match self {
            DiagnosticLevel::Critical => "🔴",
            DiagnosticLevel::Warning => "🟠",
            DiagnosticLevel::Info => "🟡",
            DiagnosticLevel::Success => "🟢",
            DiagnosticLevel::Unknown => "⚪",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiAnalysis {
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default)]
    pub depth_score: f64,
    #[serde(default)]
    pub readability_score: f64,
    #[serde(default)]
    pub overall_feedback: String,
    #[serde(default)]
    pub improvement_suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_service_payload_and_keeps_unknown_fields() {
        let body = json!({
            "report": {
                "file_path": "/tmp/upload/post.md",
                "total_score": 82.5,
                "metadata_score": 25,
                "diagnostics": [{
                    "category": "metadata",
                    "check_name": "title_length",
                    "severity": "warning",
                    "score": 60,
                    "message": "title too short"
                }, {
                    "category": "structure",
                    "check_name": "h1_count",
                    "severity": "fatal",
                    "score": 0,
                    "message": "?"
                }],
                "word_count": 1200
            },
            "history_id": "20240101-abc"
        });

        let resp: AnalyzeResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.history_id, "20240101-abc");
        assert_eq!(resp.report.total_score, 82.5);
        assert_eq!(resp.report.diagnostics[0].severity, DiagnosticLevel::Warning);
        assert_eq!(resp.report.diagnostics[1].severity, DiagnosticLevel::Unknown);
        assert!(resp.report.ai_analysis.is_none());
        assert_eq!(resp.report.extra["word_count"], json!(1200));

        let back = serde_json::to_value(&resp.report).unwrap();
        assert_eq!(back["word_count"], json!(1200));
    }

    #[test]
    fn badge_thresholds() {
        let badge = |total_score| AnalysisReport { total_score, ..Default::default() }.emoji_badge();
        assert_eq!(badge(39.9), "🔴");
        assert_eq!(badge(40.0), "🟠");
        assert_eq!(badge(60.0), "🟡");
        assert_eq!(badge(80.0), "🟢");
    }
}
