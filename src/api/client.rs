//! REST implementation of [`AnalysisApi`].
//!
//! `ApiClient` wraps one `reqwest::Client` for the life of the process and
//! turns each trait method into exactly one HTTP call. Nothing is retried.

use std::path::Path;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::api::AnalysisApi;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{AnalyzeResponse, HealthStatus, HistoryDetail, HistoryPage, HistoryQuery};

/// Shown when neither the service nor the transport said anything useful.
pub const GENERIC_FAILURE: &str = "请求失败";

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    server: Url,
    api_base_path: String,
    analyze_timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("mdaudit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            http,
            server: config.server()?,
            api_base_path: config.api_base_path.clone(),
            analyze_timeout: config.analyze_timeout(),
        })
    }

    #[cfg(test)]
    pub fn with_analyze_timeout(mut self, timeout: Duration) -> Self {
        self.analyze_timeout = timeout;
        self
    }

    pub fn server(&self) -> &Url {
        &self.server
    }

    /// Joins `path` (and an optional trailing id, percent-encoded) onto the
    /// server root, keeping any prefix the server URL already has.
    fn url(&self, path: &str, id: Option<&str>) -> Result<Url> {
        let mut url = self.server.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Error::Config(format!("{} cannot be used as a base URL", self.server)))?;
            segments.pop_if_empty();
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn api_url(&self, path: &str, id: Option<&str>) -> Result<Url> {
        self.url(&format!("{}/{}", self.api_base_path, path), id)
    }

    /// Uploads in-memory content under `file_name`.
    pub async fn analyze_bytes(
        &self,
        file_name: &str,
        content: Vec<u8>,
        keywords: &[String],
    ) -> Result<AnalyzeResponse> {
        let part = Part::bytes(content)
            .file_name(file_name.to_string())
            .mime_str(mime_for(file_name))
            .map_err(|e| Error::Http(e.to_string()))?;
        let mut form = Form::new().part("file", part);
        if !keywords.is_empty() {
            form = form.text("keywords", serde_json::to_string(keywords)?);
        }

        let url = self.api_url("analyze", None)?;
        tracing::info!(file = file_name, keywords = keywords.len(), "submitting document for analysis");
        let rb = self.http.post(url).multipart(form).timeout(self.analyze_timeout);
        self.send("POST /analyze", rb, Some(self.analyze_timeout)).await
    }

    /// Runs one request and decodes the JSON body, normalizing every failure
    /// into [`Error::Api`].
    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        rb: RequestBuilder,
        timeout: Option<Duration>,
    ) -> Result<T> {
        let start = Instant::now();
        tracing::debug!(endpoint, "sending request");

        let resp = match rb.send().await {
            Ok(resp) => resp,
            Err(e) => {
                let transport = transport_message(&e, timeout);
                return Err(api_error(endpoint, None, error_message(None, Some(&transport))));
            }
        };

        let status = resp.status();
        tracing::debug!(
            endpoint,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "response received"
        );

        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                return Err(api_error(
                    endpoint,
                    Some(status.as_u16()),
                    error_message(None, Some(&transport_message(&e, timeout))),
                ))
            }
        };

        if !status.is_success() {
            let parsed = serde_json::from_str::<Value>(&body).ok();
            let fallback = format!("Request failed with status code {}", status.as_u16());
            return Err(api_error(
                endpoint,
                Some(status.as_u16()),
                error_message(parsed.as_ref(), Some(&fallback)),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            api_error(
                endpoint,
                Some(status.as_u16()),
                format!("failed to parse {endpoint} response: {e}"),
            )
        })
    }
}

#[async_trait]
impl AnalysisApi for ApiClient {
    async fn analyze_file(&self, path: &Path, keywords: &[String]) -> Result<AnalyzeResponse> {
        let content = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.md".to_string());
        self.analyze_bytes(&file_name, content, keywords).await
    }

    async fn get_history(&self, query: &HistoryQuery) -> Result<HistoryPage> {
        let url = self.api_url("history", None)?;
        self.send("GET /history", self.http.get(url).query(query), None)
            .await
    }

    async fn get_history_detail(&self, record_id: &str) -> Result<HistoryDetail> {
        let url = self.api_url("history", Some(record_id))?;
        self.send("GET /history/{id}", self.http.get(url), None).await
    }

    async fn check_health(&self) -> Result<HealthStatus> {
        let url = self.url("/api/health", None)?;
        self.send("GET /api/health", self.http.get(url), None).await
    }
}

/// The request timeout also covers reading the body, so both phases report
/// an expired deadline the same way.
fn transport_message(e: &reqwest::Error, timeout: Option<Duration>) -> String {
    match timeout {
        Some(t) if e.is_timeout() => format!("timeout of {}ms exceeded", t.as_millis()),
        _ => e.to_string(),
    }
}

fn api_error(endpoint: &str, status: Option<u16>, message: String) -> Error {
    tracing::error!(endpoint, status, "API Error: {}", message);
    Error::Api { status, message }
}

/// Picks the message shown for a failed call: the service's `detail` when it
/// has one, else the transport message, else [`GENERIC_FAILURE`].
///
/// `detail` may be a plain string, a structured error with a `message`, or a
/// list of field errors each carrying `msg`.
pub fn error_message(body: Option<&Value>, transport: Option<&str>) -> String {
    let detail = body.and_then(|b| b.get("detail")).and_then(|detail| match detail {
        Value::String(s) => Some(s.clone()),
        Value::Object(o) => o.get("message").and_then(Value::as_str).map(str::to_string),
        Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|i| i.get("msg").and_then(Value::as_str))
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("; "))
        }
        _ => None,
    });

    detail
        .filter(|d| !d.trim().is_empty())
        .or_else(|| transport.filter(|t| !t.trim().is_empty()).map(str::to_string))
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

fn mime_for(file_name: &str) -> &'static str {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".md") || lower.ends_with(".markdown") {
        "text/markdown"
    } else {
        "text/plain"
    }
}
