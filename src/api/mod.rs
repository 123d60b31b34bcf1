//! Access to the analysis service.
//!
//! [`AnalysisApi`] is the seam the commands talk to; [`ApiClient`] is the
//! REST implementation used at runtime.

pub mod client;

pub use client::{error_message, ApiClient};

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{AnalyzeResponse, HealthStatus, HistoryDetail, HistoryPage, HistoryQuery};

#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Uploads a document (plus optional keywords) and returns the report
    /// together with the id of the history record it was stored under.
    async fn analyze_file(&self, path: &Path, keywords: &[String]) -> Result<AnalyzeResponse>;

    async fn get_history(&self, query: &HistoryQuery) -> Result<HistoryPage>;

    async fn get_history_detail(&self, record_id: &str) -> Result<HistoryDetail>;

    async fn check_health(&self) -> Result<HealthStatus>;
}
