use chrono::{DateTime, Utc};

/// Formats a chat entry as `"<author> @ <HH:MM> <MM-DD-YY>: <text>"`.
///
/// Falls back to the bare trimmed text when the author or a usable timestamp
/// is missing.
pub fn format_entry(author: Option<&str>, timestamp: Option<f64>, text: &str) -> String {
    let text = text.trim();

    let author = match author.map(str::trim).filter(|a| !a.is_empty()) {
        Some(author) => author,
        None => return text.to_string(),
    };

    match timestamp.and_then(to_datetime) {
        Some(at) => format!(
            "{} @ {} {}: {}",
            author,
            at.format("%H:%M"),
            at.format("%m-%d-%y"),
            text
        ),
        None => text.to_string(),
    }
}

fn to_datetime(ts: f64) -> Option<DateTime<Utc>> {
    if !ts.is_finite() || ts < 0.0 {
        return None;
    }
    let secs = ts.trunc() as i64;
    let nanos = ((ts.fract()) * 1e9) as u32;
    DateTime::from_timestamp(secs, nanos)
}
