//! Token-substitution timestamp formatting.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Timelike, Utc};

/// Template applied when the caller does not supply one.
pub const DEFAULT_TEMPLATE: &str = "YYYY-mm-dd HH:MM:SS";

/// Layouts tried when parsing a date-time string, most common first.
const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Accepted inputs for [`format_timestamp`].
#[derive(Debug, Clone, Default)]
pub enum DateInput {
    /// Unix epoch value: 10 decimal digits are seconds, anything else
    /// milliseconds.
    Epoch(i64),
    /// A date string in one of the common layouts (or RFC 3339).
    Text(String),
    /// An already-resolved wall-clock value.
    DateTime(NaiveDateTime),
    /// Current local time.
    #[default]
    Now,
}

impl From<i64> for DateInput {
    fn from(epoch: i64) -> Self {
        DateInput::Epoch(epoch)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Text(text)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(value: NaiveDateTime) -> Self {
        DateInput::DateTime(value)
    }
}

impl From<DateTime<Local>> for DateInput {
    fn from(value: DateTime<Local>) -> Self {
        DateInput::DateTime(value.naive_local())
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(value: DateTime<Utc>) -> Self {
        DateInput::DateTime(value.with_timezone(&Local).naive_local())
    }
}

/// Formats a timestamp-like input against a token template.
///
/// For each token character in `{Y m d H M S}` the longest run of that
/// character in the template (the first one on ties) is replaced by the
/// corresponding field value, zero-padded to the run length when the run is
/// longer than one character and unpadded otherwise. All other characters
/// pass through unchanged.
///
/// `template` falls back to [`DEFAULT_TEMPLATE`] when `None` or empty.
/// Returns an empty string when the input cannot be resolved to a date.
pub fn format_timestamp(input: impl Into<DateInput>, template: Option<&str>) -> String {
    let template = match template {
        Some(t) if !t.is_empty() => t,
        _ => DEFAULT_TEMPLATE,
    };
    match resolve(input.into()) {
        Some(date) => render(date, template),
        None => String::new(),
    }
}

fn resolve(input: DateInput) -> Option<NaiveDateTime> {
    match input {
        DateInput::Epoch(epoch) => {
            // 13-digit epochs are the common millisecond form; PHP-style
            // 10-digit epochs are seconds.
            let instant = if decimal_digit_count(epoch) == 10 {
                DateTime::<Utc>::from_timestamp(epoch, 0)
            } else {
                DateTime::<Utc>::from_timestamp_millis(epoch)
            }?;
            Some(instant.with_timezone(&Local).naive_local())
        }
        DateInput::Text(text) => parse_text(text.trim()),
        DateInput::DateTime(value) => Some(value),
        DateInput::Now => Some(Local::now().naive_local()),
    }
}

fn decimal_digit_count(value: i64) -> usize {
    value.unsigned_abs().to_string().len()
}

fn parse_text(text: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Local).naive_local());
    }
    for layout in DATETIME_LAYOUTS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, layout) {
            return Some(parsed);
        }
    }
    for layout in DATE_LAYOUTS {
        if let Ok(parsed) = NaiveDate::parse_from_str(text, layout) {
            return parsed.and_hms_opt(0, 0, 0);
        }
    }
    None
}

fn render(date: NaiveDateTime, template: &str) -> String {
    let fields = [
        ('Y', i64::from(date.year())),
        ('m', i64::from(date.month())),
        ('d', i64::from(date.day())),
        ('H', i64::from(date.hour())),
        ('M', i64::from(date.minute())),
        ('S', i64::from(date.second())),
    ];

    let mut out = template.to_string();
    for (token, value) in fields {
        if let Some(run) = longest_run(&out, token) {
            let width = run.len();
            let rendered = if width > 1 {
                format!("{value:0>width$}")
            } else {
                value.to_string()
            };
            out.replace_range(run, &rendered);
        }
    }
    out
}

/// Byte range of the longest run of `token` in `s`, first run on ties.
/// Token characters are ASCII, so byte length equals run length.
fn longest_run(s: &str, token: char) -> Option<std::ops::Range<usize>> {
    let mut best: Option<std::ops::Range<usize>> = None;
    let mut current_start: Option<usize> = None;

    for (index, ch) in s.char_indices() {
        if ch == token {
            current_start.get_or_insert(index);
        } else if let Some(start) = current_start.take() {
            if best.as_ref().map_or(true, |b| b.len() < index - start) {
                best = Some(start..index);
            }
        }
    }
    if let Some(start) = current_start {
        if best.as_ref().map_or(true, |b| b.len() < s.len() - start) {
            best = Some(start..s.len());
        }
    }
    best
}
