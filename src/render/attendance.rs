//! Attendance roster rendering.
//!
//! Markup for the roster table body and the per-staff details modal.

use crate::render::{escape_html, format_timestamp, or_dash};
use crate::state::snapshot::{AttendanceRecord, AttendanceSnapshot, AttendanceStatus};

/// Columns in the roster table; the placeholder row spans all of them.
const ROSTER_COLUMNS: usize = 6;

/// Rows for the roster `<tbody>`. An empty roster renders exactly one
/// placeholder row, never an empty body.
pub fn roster_body(snapshot: &AttendanceSnapshot) -> String {
    if snapshot.records.is_empty() {
        return format!(
            "<tr><td colspan=\"{}\" class=\"placeholder-row\">No attendance records found for the selected criteria</td></tr>",
            ROSTER_COLUMNS
        );
    }

    snapshot.records.iter().map(roster_row).collect()
}

fn roster_row(record: &AttendanceRecord) -> String {
    let name = escape_html(record.display_name());
    let photo = match record.photo_url.as_deref() {
        Some(url) if !url.is_empty() => format!(
            "<img src=\"{}\" alt=\"{}\" class=\"staff-photo\">",
            escape_html(url),
            name
        ),
        _ => "<span class=\"staff-photo staff-photo-empty\"></span>".to_string(),
    };

    format!(
        "<tr>\
         <td>{photo}<strong>{name}</strong><div class=\"subtle\">{username}</div></td>\
         <td>{department}</td>\
         <td>{position}</td>\
         <td>{status}</td>\
         <td>{last}</td>\
         <td><button class=\"view-details\" data-staff-id=\"{id}\">Details</button></td>\
         </tr>",
        photo = photo,
        name = name,
        username = escape_html(&record.username),
        department = escape_html(or_dash(&record.department)),
        position = escape_html(or_dash(&record.position)),
        status = status_badge(record.status),
        last = last_attendance_label(record.last_attendance.as_deref()),
        id = record.staff_id,
    )
}

/// Status pill for the roster and the details modal
pub fn status_badge(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Present => "<span class=\"badge badge-present\">Present</span>",
        AttendanceStatus::Absent => "<span class=\"badge badge-absent\">Absent</span>",
        AttendanceStatus::Unknown => "<span class=\"badge badge-muted\">Unknown</span>",
    }
}

/// Formatted last-attendance timestamp, "-" when there is none
pub fn last_attendance_label(raw: Option<&str>) -> String {
    match raw {
        None | Some("") => "-".to_string(),
        Some(ts) => format_timestamp(ts).unwrap_or_else(|| escape_html(ts)),
    }
}

/// Title for the details modal
pub fn details_title(record: &AttendanceRecord) -> String {
    format!("{} - Attendance Details", escape_html(record.display_name()))
}

/// Body of the details modal: identity fields, today's status and the
/// recent-history table built from the parallel date/status arrays.
pub fn details_body(record: &AttendanceRecord) -> String {
    let photo = match record.photo_url.as_deref() {
        Some(url) if !url.is_empty() => format!(
            "<div class=\"details-photo\"><img src=\"{}\" alt=\"{}\"></div>",
            escape_html(url),
            escape_html(record.display_name())
        ),
        _ => String::new(),
    };

    let history: String = record
        .history_rows()
        .map(|(date, status)| {
            let class = match status {
                "present" => "history-present",
                "absent" => "history-absent",
                _ => "history-muted",
            };
            format!(
                "<tr><td>{}</td><td class=\"{}\">{}</td></tr>",
                escape_html(date),
                class,
                escape_html(or_dash(status)),
            )
        })
        .collect();

    let history = if history.is_empty() {
        "<tr><td colspan=\"2\" class=\"placeholder-row\">No history available</td></tr>".to_string()
    } else {
        history
    };

    format!(
        "{photo}\
         <dl class=\"details-grid\">\
         <dt>Name</dt><dd>{name}</dd>\
         <dt>Username</dt><dd>{username}</dd>\
         <dt>Department</dt><dd>{department}</dd>\
         <dt>Position</dt><dd>{position}</dd>\
         <dt>Today</dt><dd>{status}</dd>\
         <dt>Last attendance</dt><dd>{last}</dd>\
         </dl>\
         <h6>Recent History</h6>\
         <table class=\"history-table\">\
         <thead><tr><th>Date</th><th>Status</th></tr></thead>\
         <tbody>{history}</tbody>\
         </table>",
        photo = photo,
        name = escape_html(record.display_name()),
        username = escape_html(&record.username),
        department = escape_html(or_dash(&record.department)),
        position = escape_html(or_dash(&record.position)),
        status = status_badge(record.status),
        last = last_attendance_label(record.last_attendance.as_deref()),
        history = history,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(staff_id: i64, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            staff_id,
            username: format!("staff{}", staff_id),
            full_name: format!("Staff Member {}", staff_id),
            department: "IT".into(),
            position: "Technician".into(),
            status,
            last_attendance: Some("2024-01-15T08:45:00+00:00".into()),
            photo_url: None,
            history_dates: vec!["2024-01-14".into(), "2024-01-15".into()],
            history: vec!["present".into(), "".into()],
        }
    }

    #[test]
    fn empty_roster_renders_exactly_one_placeholder_row() {
        let body = roster_body(&AttendanceSnapshot::default());
        assert_eq!(body.matches("<tr>").count(), 1);
        assert!(body.contains("No attendance records found"));
    }

    #[test]
    fn roster_renders_one_row_per_record() {
        let records: Vec<_> = (0..7)
            .map(|i| record(i, AttendanceStatus::Present))
            .chain((7..10).map(|i| record(i, AttendanceStatus::Absent)))
            .collect();
        let snapshot = AttendanceSnapshot { records };

        let body = roster_body(&snapshot);
        assert_eq!(body.matches("<tr>").count(), 10);
        assert_eq!(body.matches("badge-present").count(), 7);
        assert_eq!(body.matches("badge-absent").count(), 3);
        assert!(!body.contains("No attendance records found"));
    }

    #[test]
    fn payload_names_are_escaped() {
        let mut r = record(1, AttendanceStatus::Present);
        r.full_name = "<script>x</script>".into();
        let body = roster_body(&AttendanceSnapshot { records: vec![r] });

        assert!(body.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!body.contains("<script>"));
    }

    #[test]
    fn photo_url_is_escaped_into_the_attribute() {
        let mut r = record(1, AttendanceStatus::Present);
        r.photo_url = Some("https://cdn.example/a.jpg\" onerror=\"alert(1)".into());
        let body = roster_body(&AttendanceSnapshot { records: vec![r] });

        assert!(body.contains("&quot; onerror=&quot;"));
        assert!(!body.contains("\" onerror=\"alert"));
    }

    #[test]
    fn missing_last_attendance_renders_a_dash() {
        assert_eq!(last_attendance_label(None), "-");
        assert_eq!(last_attendance_label(Some("")), "-");
        assert_eq!(
            last_attendance_label(Some("2024-01-15T08:45:00+00:00")),
            "Jan 15, 2024 08:45"
        );
    }

    #[test]
    fn details_body_lists_the_history_window() {
        let body = details_body(&record(4, AttendanceStatus::Present));
        assert!(body.contains("2024-01-14"));
        assert!(body.contains("history-present"));
        // empty history entries fall back to a dash with a muted class
        assert!(body.contains("history-muted"));
        assert!(body.contains("Staff Member 4"));
    }

    #[test]
    fn details_body_without_history_shows_the_placeholder() {
        let mut r = record(4, AttendanceStatus::Absent);
        r.history_dates.clear();
        r.history.clear();
        let body = details_body(&r);
        assert!(body.contains("No history available"));
    }
}
