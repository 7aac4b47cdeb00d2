//! Decision history export
//!
//! Produces the file body, MIME type and a dated file name; writing the file
//! (download link, filesystem) is up to the caller.

use chrono::DateTime;

use crate::error::StoreError;
use crate::persistence::Decision;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Text,
    Markdown,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Text => "txt",
            ExportFormat::Markdown => "md",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Text => "text/plain",
            ExportFormat::Markdown => "text/markdown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "txt" | "text" => Some(ExportFormat::Text),
            "md" | "markdown" => Some(ExportFormat::Markdown),
            _ => None,
        }
    }

    /// `decision-history-YYYY-MM-DD.<ext>` for the given export time
    pub fn file_name(&self, now_ms: f64) -> String {
        let date = DateTime::from_timestamp_millis(now_ms as i64)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "undated".to_string());
        format!("decision-history-{}.{}", date, self.extension())
    }
}

/// Human-readable timestamp (UTC), e.g. `05 Mar 2024, 14:30`
pub fn format_timestamp(timestamp_ms: f64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms as i64)
        .map(|dt| dt.format("%d %b %Y, %H:%M").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn decision_line(decision: &Decision) -> String {
    format!(
        "[{}] ({}): {}",
        format_timestamp(decision.timestamp),
        decision.wheel_name,
        decision.result
    )
}

/// Render decisions in the given format, in the order given
pub fn export_decisions(decisions: &[Decision], format: ExportFormat) -> Result<String, StoreError> {
    let body = match format {
        ExportFormat::Json => serde_json::to_string_pretty(decisions)?,
        ExportFormat::Text => {
            let mut lines = vec!["Decision history".to_string(), String::new()];
            lines.extend(decisions.iter().map(decision_line));
            lines.join("\n")
        }
        ExportFormat::Markdown => {
            let mut lines = vec!["# Decision history".to_string(), String::new()];
            lines.extend(decisions.iter().map(|d| format!("• {}", decision_line(d))));
            lines.join("\n")
        }
    };
    Ok(body)
}
