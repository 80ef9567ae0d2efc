//! Region Renderers
//!
//! Pure snapshot-to-markup functions for the dynamic dashboard regions
//! (table bodies, tip lists, the achievements grid, the live feed, the
//! details modal). Each function returns a full replacement for its
//! region's children; every payload-sourced string passes through
//! [`escape_html`] on the way in. Keeping these DOM-free makes each
//! region testable without a browser.

pub mod analytics;
pub mod attendance;
mod escape;
pub mod superadmin;

pub use escape::escape_html;

/// "-" for empty payload fields
pub(crate) fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// Server timestamps arrive as ISO 8601, with or without an offset.
pub(crate) fn format_timestamp(raw: &str) -> Option<String> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.format("%b %d, %Y %H:%M").to_string());
    }
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.format("%b %d, %Y %H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_parse_with_and_without_offset() {
        assert_eq!(
            format_timestamp("2024-01-15T09:30:00+00:00").as_deref(),
            Some("Jan 15, 2024 09:30")
        );
        assert_eq!(
            format_timestamp("2024-01-15T09:30:00").as_deref(),
            Some("Jan 15, 2024 09:30")
        );
        assert_eq!(format_timestamp("yesterday"), None);
    }
}
