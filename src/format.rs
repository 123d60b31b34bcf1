//! Presentation helpers: turn timestamps, byte counts and scores into the
//! labels shown to the user. Everything here is pure.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::models::Severity;

pub const DEFAULT_TRUNCATE_LENGTH: usize = 100;

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
const FALLBACK_SEVERITY_CLASS: &str = "text-gray-700 bg-gray-50 border-gray-200";
const FALLBACK_SEVERITY_ICON: &str = "⚪";

/// Parses the timestamp shapes the service emits.
///
/// Offsets are honored; date-times without an offset are read as local time
/// and bare dates as UTC midnight.
pub fn parse_timestamp(timestamp: &str) -> Option<DateTime<Local>> {
    let ts = timestamp.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Local));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(ts, fmt) {
            return Local.from_local_datetime(&naive).earliest();
        }
    }
    let date = NaiveDate::parse_from_str(ts, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).with_timezone(&Local))
}

pub fn format_relative_time(timestamp: &str) -> String {
    format_relative_time_at(timestamp, Local::now())
}

/// Relative label for `timestamp` as seen at `now`. Unparseable input is
/// returned unchanged.
pub fn format_relative_time_at(timestamp: &str, now: DateTime<Local>) -> String {
    let Some(date) = parse_timestamp(timestamp) else {
        return timestamp.to_string();
    };

    let diff_in_seconds = (now - date).num_seconds();
    if diff_in_seconds < 60 {
        return "刚刚".to_string();
    }

    let diff_in_minutes = diff_in_seconds / 60;
    if diff_in_minutes < 60 {
        return format!("{diff_in_minutes}分钟前");
    }

    let diff_in_hours = diff_in_minutes / 60;
    if diff_in_hours < 24 {
        return format!("{diff_in_hours}小时前");
    }

    let diff_in_days = diff_in_hours / 24;
    if diff_in_days < 7 {
        return format!("{diff_in_days}天前");
    }

    date.format("%Y/%m/%d").to_string()
}

pub fn format_full_time(timestamp: &str) -> String {
    match parse_timestamp(timestamp) {
        Some(date) => date.format("%Y/%m/%d %H:%M:%S").to_string(),
        None => timestamp.to_string(),
    }
}

pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut i = 0;
    while i + 1 < SIZE_UNITS.len() && bytes >= 1024u64.pow(i as u32 + 1) {
        i += 1;
    }

    format!("{:.2} {}", bytes as f64 / 1024f64.powi(i as i32), SIZE_UNITS[i])
}

/// Four-tier grade of a 0-100 score. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreGrade {
    Excellent,
    Good,
    Medium,
    Poor,
}

impl ScoreGrade {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            ScoreGrade::Excellent
        } else if score >= 70.0 {
            ScoreGrade::Good
        } else if score >= 50.0 {
            ScoreGrade::Medium
        } else {
            ScoreGrade::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreGrade::Excellent => "优秀",
            ScoreGrade::Good => "良好",
            ScoreGrade::Medium => "中等",
            ScoreGrade::Poor => "较差",
        }
    }

    pub fn color_class(self) -> &'static str {
        match self {
            ScoreGrade::Excellent => "text-green-600 bg-green-50 border-green-200",
            ScoreGrade::Good => "text-blue-600 bg-blue-50 border-blue-200",
            ScoreGrade::Medium => "text-yellow-600 bg-yellow-50 border-yellow-200",
            ScoreGrade::Poor => "text-red-600 bg-red-50 border-red-200",
        }
    }
}

pub fn score_grade(score: f64) -> &'static str {
    ScoreGrade::from_score(score).label()
}

pub fn score_color_class(score: f64) -> &'static str {
    ScoreGrade::from_score(score).color_class()
}

/// Style classes for a history severity; unknown values get the gray set.
pub fn severity_color_class(severity: &str) -> &'static str {
    severity
        .parse::<Severity>()
        .map(Severity::color_class)
        .unwrap_or(FALLBACK_SEVERITY_CLASS)
}

pub fn severity_icon(severity: &str) -> &'static str {
    severity
        .parse::<Severity>()
        .map(Severity::icon)
        .unwrap_or(FALLBACK_SEVERITY_ICON)
}

/// Cuts `text` to `max_length` characters and appends `...` when it was
/// longer.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    match text.char_indices().nth(max_length) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ago(now: DateTime<Local>, d: Duration) -> String {
        (now - d).to_rfc3339()
    }

    #[test]
    fn relative_time_buckets() {
        let now = Local::now();
        assert_eq!(format_relative_time_at(&ago(now, Duration::seconds(30)), now), "刚刚");
        assert_eq!(format_relative_time_at(&ago(now, Duration::minutes(5)), now), "5分钟前");
        assert_eq!(format_relative_time_at(&ago(now, Duration::minutes(90)), now), "1小时前");
        assert_eq!(format_relative_time_at(&ago(now, Duration::hours(23)), now), "23小时前");
        assert_eq!(format_relative_time_at(&ago(now, Duration::days(3)), now), "3天前");
    }

    #[test]
    fn old_timestamps_fall_back_to_date() {
        let now = Local::now();
        let then = now - Duration::days(10);
        assert_eq!(
            format_relative_time_at(&then.to_rfc3339(), now),
            then.format("%Y/%m/%d").to_string()
        );
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        let now = Local::now();
        let later = (now + Duration::minutes(10)).to_rfc3339();
        assert_eq!(format_relative_time_at(&later, now), "刚刚");
    }

    #[test]
    fn naive_timestamps_are_local_time() {
        let now = Local::now();
        let naive = (now - Duration::hours(2)).naive_local();
        let ts = naive.format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
        assert_eq!(format_relative_time_at(&ts, now), "2小时前");
    }

    #[test]
    fn unparseable_timestamp_is_echoed() {
        assert_eq!(format_relative_time("yesterday-ish"), "yesterday-ish");
        assert_eq!(format_full_time("n/a"), "n/a");
    }

    #[test]
    fn full_time_layout() {
        let local = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).single().unwrap();
        assert_eq!(format_full_time(&local.to_rfc3339()), "2024/03/07 09:05:02");
        assert_eq!(format_full_time("2024-03-07 09:05:02"), "2024/03/07 09:05:02");
    }

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1), "1.00 B");
        assert_eq!(format_file_size(1023), "1023.00 B");
        assert_eq!(format_file_size(1536), "1.50 KB");
        assert_eq!(format_file_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024), "5.00 GB");
        assert_eq!(format_file_size(2048 * 1024 * 1024 * 1024), "2048.00 GB");
    }

    #[test]
    fn grade_boundaries() {
        assert_eq!(score_grade(95.0), "优秀");
        assert_eq!(score_grade(90.0), "优秀");
        assert_eq!(score_grade(89.9), "良好");
        assert_eq!(score_grade(72.0), "良好");
        assert_eq!(score_grade(70.0), "良好");
        assert_eq!(score_grade(55.0), "中等");
        assert_eq!(score_grade(50.0), "中等");
        assert_eq!(score_grade(30.0), "较差");
        assert_eq!(score_grade(f64::NAN), "较差");
    }

    #[test]
    fn grade_color_classes() {
        assert_eq!(score_color_class(91.0), "text-green-600 bg-green-50 border-green-200");
        assert_eq!(score_color_class(75.0), "text-blue-600 bg-blue-50 border-blue-200");
        assert_eq!(score_color_class(60.0), "text-yellow-600 bg-yellow-50 border-yellow-200");
        assert_eq!(score_color_class(10.0), "text-red-600 bg-red-50 border-red-200");
    }

    #[test]
    fn severity_mapping_with_fallback() {
        assert_eq!(severity_icon("error"), "🔴");
        assert_eq!(severity_icon("warning"), "🟡");
        assert_eq!(severity_icon("success"), "🟢");
        assert_eq!(severity_icon("critical"), "⚪");
        assert_eq!(severity_color_class("error"), "text-red-700 bg-red-50 border-red-200");
        assert_eq!(severity_color_class("Error"), "text-gray-700 bg-gray-50 border-gray-200");
    }

    #[test]
    fn truncation() {
        assert_eq!(truncate_text("", 10), "");
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("exactly10!", 10), "exactly10!");
        assert_eq!(truncate_text("abcdefghijk", 10), "abcdefghij...");
        assert_eq!(truncate_text("诊断报告生成器", 4), "诊断报告...");
        assert_eq!(truncate_text(&"x".repeat(150), DEFAULT_TRUNCATE_LENGTH).len(), 103);
    }
}
