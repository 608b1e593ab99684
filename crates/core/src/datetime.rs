//! Local/absolute datetime conversion for form fields
//!
//! Rows store absolute timestamps (`DateTime<Utc>`); datetime form fields
//! edit a minute-granularity local-clock string. Conversion round-trips at
//! minute granularity in both directions.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Timelike, Utc};

/// Wire format of a datetime form field (`datetime-local` input value)
pub const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Render an absolute timestamp as a local-clock input value.
///
/// `None` renders as the empty string (the field is unset).
pub fn to_local_input(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts
            .with_timezone(&Local)
            .format(LOCAL_INPUT_FORMAT)
            .to_string(),
        None => String::new(),
    }
}

/// Parse a local-clock input value back to an absolute timestamp.
///
/// Total over raw input: the empty string and anything unparseable map to
/// `None` (an unset sentinel a validator can reject), never a panic. A local
/// time made ambiguous or skipped by a DST transition also maps to `None`.
pub fn from_local_input(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    let naive = NaiveDateTime::parse_from_str(raw, LOCAL_INPUT_FORMAT).ok()?;
    Local
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
}

/// Drop seconds and sub-second precision from a timestamp.
///
/// Form fields only carry minute precision, so comparisons against a value
/// that went through the form must truncate first.
pub fn truncate_to_minute(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}

// ============================================================================
// Tests
// ============================================================================
