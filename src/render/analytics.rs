//! Study-analytics region rendering.
//!
//! Markup for the AI tips list, the achievements grid and the
//! live-updates feed, plus the summary label helpers.

use crate::render::{escape_html, format_timestamp};
use crate::state::snapshot::{Achievement, LiveFeed, StudyTip};

/// Cards for the AI study-tips region.
pub fn tips_list(tips: &[StudyTip]) -> String {
    if tips.is_empty() {
        return "<div class=\"placeholder-row\">No study tips yet</div>".to_string();
    }

    tips.iter()
        .map(|tip| {
            format!(
                "<div class=\"tip-item\">\
                 <div class=\"tip-title\">{}</div>\
                 <p class=\"tip-description\">{}</p>\
                 </div>",
                escape_html(&tip.title),
                escape_html(&tip.description),
            )
        })
        .collect()
}

/// Tiles for the achievements grid.
pub fn achievements_grid(items: &[Achievement]) -> String {
    if items.is_empty() {
        return "<div class=\"placeholder-row\">No achievements yet</div>".to_string();
    }

    items
        .iter()
        .map(|item| {
            format!(
                "<div class=\"achievement-item\">\
                 <div class=\"achievement-title\">{}</div>\
                 <div class=\"achievement-progress\">{}%</div>\
                 </div>",
                escape_html(&item.title),
                item.progress,
            )
        })
        .collect()
}

/// The live-updates feed region, including its empty and error states.
pub fn feed(state: &LiveFeed) -> String {
    match state {
        LiveFeed::Loading => "<div class=\"feed-empty\">Loading updates...</div>".to_string(),
        LiveFeed::Failed => {
            "<div class=\"feed-error\">Failed to fetch updates</div>".to_string()
        }
        LiveFeed::Loaded(updates) if updates.is_empty() => {
            "<div class=\"feed-empty\">No recent updates</div>".to_string()
        }
        LiveFeed::Loaded(updates) => updates
            .iter()
            .map(|update| {
                let class = if update.is_new {
                    "live-update-item new-update"
                } else {
                    "live-update-item"
                };
                format!(
                    "<div class=\"{class}\">\
                     <span class=\"update-indicator\" data-type=\"{kind}\"></span>\
                     <div>\
                     <div class=\"update-title\">{title}</div>\
                     <div class=\"update-time\">{time}</div>\
                     </div>\
                     </div>",
                    class = class,
                    kind = escape_html(&update.kind),
                    title = escape_html(&update.title),
                    time = escape_html(&update.timestamp),
                )
            })
            .collect(),
    }
}

/// "1.5 hours" style label for the summary scalars
pub fn hours_label(value: f64) -> String {
    format!("{} hours", value)
}

/// "Last updated: ..." line under the analytics header
pub fn last_updated_label(raw: &str) -> String {
    if raw.is_empty() {
        return "Not updated yet".to_string();
    }
    match format_timestamp(raw) {
        Some(formatted) => format!("Last updated: {}", formatted),
        None => format!("Last updated: {}", escape_html(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::snapshot::LiveUpdate;

    #[test]
    fn empty_tips_render_the_placeholder() {
        assert!(tips_list(&[]).contains("No study tips yet"));
    }

    #[test]
    fn tips_are_escaped() {
        let tips = vec![StudyTip {
            title: "<em>focus</em>".into(),
            description: "a & b".into(),
        }];
        let markup = tips_list(&tips);
        assert!(markup.contains("&lt;em&gt;focus&lt;/em&gt;"));
        assert!(markup.contains("a &amp; b"));
    }

    #[test]
    fn achievements_show_whole_percent_progress() {
        let items = vec![Achievement {
            title: "Week streak".into(),
            progress: 80.0,
        }];
        let markup = achievements_grid(&items);
        assert!(markup.contains("80%"));
        assert!(markup.contains("Week streak"));
    }

    #[test]
    fn feed_states_render_distinct_regions() {
        assert!(feed(&LiveFeed::Loading).contains("Loading updates"));
        assert!(feed(&LiveFeed::Failed).contains("Failed to fetch updates"));
        assert!(feed(&LiveFeed::Loaded(Vec::new())).contains("No recent updates"));
    }

    #[test]
    fn new_updates_are_flagged() {
        let updates = vec![
            LiveUpdate {
                kind: "assignment".into(),
                title: "New assignment: Essay 2".into(),
                timestamp: "09:15 AM".into(),
                is_new: true,
            },
            LiveUpdate {
                kind: "attendance".into(),
                title: "Attendance recorded".into(),
                timestamp: "08:00 AM".into(),
                is_new: false,
            },
        ];
        let markup = feed(&LiveFeed::Loaded(updates));
        assert_eq!(markup.matches("live-update-item").count(), 2);
        assert_eq!(markup.matches("new-update").count(), 1);
        assert!(markup.contains("data-type=\"assignment\""));
    }

    #[test]
    fn hours_labels_drop_trailing_zeroes() {
        assert_eq!(hours_label(1.5), "1.5 hours");
        assert_eq!(hours_label(28.0), "28 hours");
    }

    #[test]
    fn last_updated_falls_back_to_the_raw_value() {
        assert_eq!(
            last_updated_label("2024-01-15T10:00:00+00:00"),
            "Last updated: Jan 15, 2024 10:00"
        );
        assert_eq!(last_updated_label(""), "Not updated yet");
        assert_eq!(last_updated_label("just now"), "Last updated: just now");
    }
}
