use serde_json::json;

use crate::error::RenderError;
use crate::models::{QuotaRecord, UsageResponse};
use crate::notify::{LOW_QUOTA_MESSAGE, LOW_QUOTA_TITLE, Notifier};

pub const NO_DATA: &str = "No data";
pub const GLYPH: &str = "🌐";

/// Remaining GB below which a desktop alert fires
pub const NOTIFY_BELOW_GB: f64 = 10.0;
const RED_BELOW_GB: f64 = 20.0;
const ORANGE_BELOW_GB: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// `used/totalGB (remain left)`
    Simple,
    /// Polybar color markup with glyph and renewal countdown
    Decorated,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaLevel {
    Low,
    Medium,
    High,
}

impl QuotaLevel {
    pub fn from_remaining(remain: f64) -> Self {
        if remain < RED_BELOW_GB {
            QuotaLevel::Low
        } else if remain < ORANGE_BELOW_GB {
            QuotaLevel::Medium
        } else {
            QuotaLevel::High
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            QuotaLevel::Low => "#FF0000",
            QuotaLevel::Medium => "#FFA500",
            QuotaLevel::High => "#adff00",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuotaLevel::Low => "low",
            QuotaLevel::Medium => "medium",
            QuotaLevel::High => "high",
        }
    }
}

pub fn format_simple(record: &QuotaRecord) -> String {
    format!(
        "{:.1}/{:.0}GB ({:.1} left)",
        record.used, record.total, record.remain
    )
}

/// Wrap the remaining quota in `%{F<color>}...%{F-}` tags for the status bar.
pub fn format_decorated(record: &QuotaRecord) -> Result<String, RenderError> {
    let days = record
        .remaining_days_for_renewal
        .ok_or(RenderError::MissingField("remainingDaysForRenewal"))?;
    let color = QuotaLevel::from_remaining(record.remain).color();
    Ok(format!(
        "%{{F{color}}}{GLYPH} {:.1}GB ({days})%{{F-}}",
        record.remain
    ))
}

pub fn format_json(record: &QuotaRecord) -> String {
    json!({
        "used": record.used,
        "total": record.total,
        "remain": record.remain,
        "remaining_days_for_renewal": record.remaining_days_for_renewal,
        "percent_used": record.percent_used().map(|v| (v * 10.0).round() / 10.0),
        "level": QuotaLevel::from_remaining(record.remain).as_str(),
    })
    .to_string()
}

/// Turn a usage response into the single status line.
///
/// The low-quota alert is raised before formatting so that it fires in every
/// output mode, and even when the decorated line cannot be built.
pub fn render(
    response: &UsageResponse,
    mode: OutputMode,
    notifier: &dyn Notifier,
) -> Result<String, RenderError> {
    let Some(entry) = response.first_entry() else {
        return Ok(match mode {
            OutputMode::Json => json!({ "status": "no_data" }).to_string(),
            _ => NO_DATA.to_string(),
        });
    };
    let record = QuotaRecord::from_entry(entry).map_err(RenderError::MissingField)?;
    log::debug!(
        "quota: used={} total={} remain={} pct_used={:?}",
        record.used,
        record.total,
        record.remain,
        record.percent_used()
    );

    if record.remain < NOTIFY_BELOW_GB {
        notifier.notify(LOW_QUOTA_TITLE, LOW_QUOTA_MESSAGE);
    }

    match mode {
        OutputMode::Simple => Ok(format_simple(&record)),
        OutputMode::Decorated => format_decorated(&record),
        OutputMode::Json => Ok(format_json(&record)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingNotifier(Cell<u32>);

    impl Notifier for CountingNotifier {
        fn notify(&self, _title: &str, _message: &str) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn record(remain: f64) -> QuotaRecord {
        QuotaRecord {
            used: 100.0 - remain,
            total: 100.0,
            remain,
            remaining_days_for_renewal: Some(3),
        }
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(QuotaLevel::from_remaining(19.99), QuotaLevel::Low);
        assert_eq!(QuotaLevel::from_remaining(20.0), QuotaLevel::Medium);
        assert_eq!(QuotaLevel::from_remaining(49.99), QuotaLevel::Medium);
        assert_eq!(QuotaLevel::from_remaining(50.0), QuotaLevel::High);
    }

    #[test]
    fn test_decorated_uses_level_color() {
        assert!(format_decorated(&record(19.99)).unwrap().contains("#FF0000"));
        assert!(format_decorated(&record(20.0)).unwrap().contains("#FFA500"));
        assert!(format_decorated(&record(50.0)).unwrap().contains("#adff00"));
    }

    #[test]
    fn test_decorated_without_days_is_error() {
        let rec = QuotaRecord {
            remaining_days_for_renewal: None,
            ..record(30.0)
        };
        assert_eq!(
            format_decorated(&rec),
            Err(RenderError::MissingField("remainingDaysForRenewal"))
        );
    }

    #[test]
    fn test_json_line_fields() {
        let v: serde_json::Value = serde_json::from_str(&format_json(&record(25.0))).unwrap();
        assert_eq!(v["level"], "medium");
        assert_eq!(v["percent_used"], 75.0);
        assert_eq!(v["remaining_days_for_renewal"], 3);
    }

    #[test]
    fn test_render_empty_never_notifies() {
        let notifier = CountingNotifier::default();
        let out = render(&UsageResponse::default(), OutputMode::Decorated, &notifier).unwrap();
        assert_eq!(out, NO_DATA);
        assert_eq!(notifier.0.get(), 0);
    }
}
