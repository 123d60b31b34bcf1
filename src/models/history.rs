use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Outcome class of a stored analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Success,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Success => "success",
        }
    }

    pub fn color_class(self) -> &'static str {
        match self {
            Severity::Error => "text-red-700 bg-red-50 border-red-200",
            Severity::Warning => "text-yellow-700 bg-yellow-50 border-yellow-200",
            Severity::Success => "text-green-700 bg-green-50 border-green-200",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Severity::Error => "🔴",
            Severity::Warning => "🟡",
            Severity::Success => "🟢",
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    /// Exact, lowercase match only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "success" => Ok(Severity::Success),
            other => Err(format!("unknown severity '{other}'")),
        }
    }
}

/// `severity` query filter of the history listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SeverityFilter {
    #[default]
    All,
    Error,
    Warning,
}

impl SeverityFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            SeverityFilter::All => "all",
            SeverityFilter::Error => "error",
            SeverityFilter::Warning => "warning",
        }
    }
}

impl fmt::Display for SeverityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeverityFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(SeverityFilter::All),
            "error" => Ok(SeverityFilter::Error),
            "warning" => Ok(SeverityFilter::Warning),
            other => Err(format!("severity filter must be all, error or warning (got '{other}')")),
        }
    }
}

/// Query of GET /api/v1/history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryQuery {
    pub page: u32,
    pub page_size: u32,
    pub severity: SeverityFilter,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self { page: 1, page_size: 20, severity: SeverityFilter::All }
    }
}

/// GET /api/v1/history — response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryPage {
    #[serde(default)]
    pub items: Vec<HistoryRecord>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
}

fn first_page() -> u32 {
    1
}

impl HistoryPage {
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size as u64)
    }

    pub fn has_next(&self) -> bool {
        (self.page as u64) < self.total_pages()
    }
}

/// One stored analysis as listed by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(default, alias = "record_id")]
    pub id: String,
    #[serde(default, alias = "filename")]
    pub file_name: String,
    #[serde(default, alias = "created_at")]
    pub timestamp: String,
    #[serde(default, alias = "score")]
    pub total_score: Option<f64>,
    /// Kept as text so unknown classes still render (with a fallback style).
    #[serde(default)]
    pub severity: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_listing_with_aliases() {
        let page: HistoryPage = serde_json::from_value(json!({
            "items": [
                {"id": "a1", "filename": "post.md", "timestamp": "2024-05-01T10:00:00", "total_score": 91.0, "severity": "success"},
                {"record_id": "b2", "file_name": "draft.md", "created_at": "2024-05-02T08:00:00", "score": 42, "severity": "error", "issues": 7}
            ],
            "total": 41,
            "page": 2,
            "page_size": 20
        }))
        .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].file_name, "post.md");
        assert_eq!(page.items[1].id, "b2");
        assert_eq!(page.items[1].total_score, Some(42.0));
        assert_eq!(page.items[1].extra["issues"], json!(7));
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
    }

    #[test]
    fn last_page_has_no_next() {
        let page = HistoryPage { total: 40, page: 2, page_size: 20, items: vec![] };
        assert_eq!(page.total_pages(), 2);
        assert!(!page.has_next());
        assert_eq!(HistoryPage::default().total_pages(), 0);
    }

    #[test]
    fn severity_parsing_is_exact() {
        assert_eq!("warning".parse::<Severity>(), Ok(Severity::Warning));
        assert!("WARNING".parse::<Severity>().is_err());
        assert_eq!("Error".parse::<SeverityFilter>(), Ok(SeverityFilter::Error));
        assert!("success".parse::<SeverityFilter>().is_err());
    }

    #[test]
    fn query_serializes_as_service_params() {
        let query = HistoryQuery { page: 3, page_size: 10, severity: SeverityFilter::Warning };
        assert_eq!(
            serde_json::to_value(query).unwrap(),
            json!({"page": 3, "page_size": 10, "severity": "warning"})
        );
    }
}
