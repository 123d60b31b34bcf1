//! Client-side checks run before anything is sent to the service.
//!
//! Failures come back as structured results rather than errors so the caller
//! decides whether to block the submission.

use serde::Serialize;
use serde_json::Value;
use std::path::Path;

pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 3] = [".md", ".txt", ".markdown"];
pub const DEFAULT_MAX_SIZE_MB: f64 = 10.0;
pub const DEFAULT_MAX_PAGE_SIZE: i64 = 100;
pub const MAX_KEYWORD_LENGTH: usize = 100;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Name and size of a file picked for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self { name: name.into(), size }
    }

    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { name, size: metadata.len() })
    }
}

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self { valid: true, error: None }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self { valid: false, error: Some(error.into()) }
    }
}

/// Outcome of the combined file checks; every failing check contributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileRules {
    pub allowed_extensions: Vec<String>,
    pub max_size_mb: f64,
}

impl Default for FileRules {
    fn default() -> Self {
        Self {
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            max_size_mb: DEFAULT_MAX_SIZE_MB,
        }
    }
}

pub fn validate_file_type<S: AsRef<str>>(file: &FileInfo, allowed_extensions: &[S]) -> ValidationResult {
    let file_name = file.name.to_lowercase();
    let is_valid = allowed_extensions
        .iter()
        .any(|ext| file_name.ends_with(&ext.as_ref().to_lowercase()));

    if is_valid {
        return ValidationResult::ok();
    }

    let ext_name = file_name.rsplit('.').next().unwrap_or_default();
    let allowed = allowed_extensions
        .iter()
        .map(|e| e.as_ref())
        .collect::<Vec<_>>()
        .join(", ");
    ValidationResult::invalid(format!("不支持的文件格式：.{ext_name}，仅支持 {allowed} 格式"))
}

pub fn validate_file_size(file: &FileInfo, max_size_mb: f64) -> ValidationResult {
    let max_size_bytes = max_size_mb * BYTES_PER_MB;

    if file.size as f64 > max_size_bytes {
        let file_size_mb = file.size as f64 / BYTES_PER_MB;
        return ValidationResult::invalid(format!(
            "文件大小超过限制：{file_size_mb:.2}MB（最大{max_size_mb}MB）"
        ));
    }

    ValidationResult::ok()
}

pub fn validate_file(file: &FileInfo, rules: &FileRules) -> FileValidation {
    let errors: Vec<String> = [
        validate_file_type(file, rules.allowed_extensions.as_slice()),
        validate_file_size(file, rules.max_size_mb),
    ]
    .into_iter()
    .filter_map(|check| check.error)
    .collect();

    FileValidation { valid: errors.is_empty(), errors }
}

const KEYWORDS_NOT_ARRAY: &str = "关键词必须是数组格式";
const KEYWORD_EMPTY: &str = "关键词必须是非空字符串";
const KEYWORD_TOO_LONG: &str = "关键词长度不能超过100个字符";

/// Checks an already-typed keyword list. `None` and an empty list are valid.
pub fn validate_keywords<S: AsRef<str>>(keywords: Option<&[S]>) -> ValidationResult {
    let Some(keywords) = keywords.filter(|k| !k.is_empty()) else {
        return ValidationResult::ok();
    };

    if keywords.iter().any(|kw| kw.as_ref().trim().is_empty()) {
        return ValidationResult::invalid(KEYWORD_EMPTY);
    }

    if keywords.iter().any(|kw| kw.as_ref().chars().count() > MAX_KEYWORD_LENGTH) {
        return ValidationResult::invalid(KEYWORD_TOO_LONG);
    }

    ValidationResult::ok()
}

/// Checks keywords that arrive as untyped JSON, e.g. typed by the user.
///
/// Absent, `null`, `false`, `0`, `""` and `[]` all count as "no keywords".
pub fn validate_keywords_value(keywords: Option<&Value>) -> ValidationResult {
    let items = match keywords {
        None | Some(Value::Null) | Some(Value::Bool(false)) => return ValidationResult::ok(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => return ValidationResult::ok(),
        Some(Value::String(s)) if s.is_empty() => return ValidationResult::ok(),
        Some(Value::Array(items)) => items,
        Some(_) => return ValidationResult::invalid(KEYWORDS_NOT_ARRAY),
    };

    let mut strings = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(s) => strings.push(s),
            None => return ValidationResult::invalid(KEYWORD_EMPTY),
        }
    }
    validate_keywords(Some(strings.as_slice()))
}

/// Turns keyword input into a list: either a JSON array or a comma separated
/// list. The result is validated before it is returned.
pub fn parse_keywords(raw: &str) -> Result<Vec<String>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let value = if raw.starts_with('[') || raw.starts_with('{') || raw.starts_with('"') {
        serde_json::from_str::<Value>(raw).map_err(|_| KEYWORDS_NOT_ARRAY.to_string())?
    } else {
        Value::Array(raw.split(',').map(|kw| Value::String(kw.trim().to_string())).collect())
    };

    let check = validate_keywords_value(Some(&value));
    if let Some(error) = check.error {
        return Err(error);
    }

    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    })
}

pub fn validate_page_number(page: i64) -> bool {
    page >= 1
}

pub fn validate_page_size(page_size: i64, max_page_size: i64) -> bool {
    page_size >= 1 && page_size <= max_page_size
}
