pub mod analysis;
pub mod health;
pub mod history;

pub use analysis::{AiAnalysis, AnalysisReport, AnalyzeResponse, DiagnosticItem, DiagnosticLevel, HistoryDetail};
pub use health::HealthStatus;
pub use history::{HistoryPage, HistoryQuery, HistoryRecord, Severity, SeverityFilter};
