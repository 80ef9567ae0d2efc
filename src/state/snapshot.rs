//! Dashboard Snapshots
//!
//! Canonical in-memory state for each dashboard domain. A snapshot is
//! created on every successful fetch and replaces its predecessor
//! wholesale; the DOM is a projection of the latest snapshot and is never
//! read back. Diff predicates gate user-visible notifications, not
//! rendering.

use serde::{Deserialize, Serialize};

// ============ Study Analytics ============

/// Learning-style distribution behind the analytics doughnut
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct LearningStyle {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
}

/// One AI-generated study tip
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct StudyTip {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// One achievement tile with completion progress (percent)
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Achievement {
    pub title: String,
    #[serde(default)]
    pub progress: f64,
}

/// Snapshot of the study-analytics domain
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct AnalyticsSnapshot {
    #[serde(default)]
    pub learning_style: LearningStyle,
    #[serde(default)]
    pub ai_tips: Vec<StudyTip>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub peak_hours: String,
    #[serde(default)]
    pub avg_session: f64,
    #[serde(default)]
    pub weekly_total: f64,
    #[serde(default)]
    pub last_updated: String,
}

impl AnalyticsSnapshot {
    /// Diff predicate gating the "analytics updated" toast.
    ///
    /// Shallow and ordinal: compares the learning-style value sequence
    /// element-wise, achievement count and per-achievement progress, and
    /// the tip count. Any length mismatch or differing element counts as
    /// change; a missing previous snapshot is always change, so the first
    /// load never suppresses the notification.
    pub fn has_meaningful_change(previous: Option<&Self>, next: &Self) -> bool {
        let Some(prev) = previous else {
            return true;
        };

        if prev.learning_style.values.len() != next.learning_style.values.len() {
            return true;
        }
        if prev
            .learning_style
            .values
            .iter()
            .zip(&next.learning_style.values)
            .any(|(a, b)| a != b)
        {
            return true;
        }

        if prev.achievements.len() != next.achievements.len() {
            return true;
        }
        if prev
            .achievements
            .iter()
            .zip(&next.achievements)
            .any(|(a, b)| a.progress != b.progress)
        {
            return true;
        }

        prev.ai_tips.len() != next.ai_tips.len()
    }
}

// ============ Staff Attendance ============

/// Daily attendance status reported by the roster endpoint. Anything the
/// server sends beyond present/absent (no record, leave) maps to `Unknown`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    /// No record for the day
    #[default]
    Unknown,
}

impl From<String> for AttendanceStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "present" => Self::Present,
            "absent" => Self::Absent,
            _ => Self::Unknown,
        }
    }
}

/// One staff member's roster row, including the recent-history window.
/// `history_dates` and `history` are parallel arrays of equal length.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AttendanceRecord {
    pub staff_id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub status: AttendanceStatus,
    #[serde(default)]
    pub last_attendance: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub history_dates: Vec<String>,
    #[serde(default)]
    pub history: Vec<String>,
}

impl AttendanceRecord {
    /// Full name when the profile carries one, username otherwise
    pub fn display_name(&self) -> &str {
        if self.full_name.is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }

    /// History as (date, status) pairs; zips to the shorter array if the
    /// server ever disagrees about lengths.
    pub fn history_rows(&self) -> impl Iterator<Item = (&str, &str)> {
        self.history_dates
            .iter()
            .zip(self.history.iter())
            .map(|(date, status)| (date.as_str(), status.as_str()))
    }
}

/// Snapshot of the attendance roster for the currently selected query.
/// Only valid for those parameters; the panel re-queries on any change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttendanceSnapshot {
    pub records: Vec<AttendanceRecord>,
}

impl AttendanceSnapshot {
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn present(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Present)
            .count()
    }

    pub fn absent(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Absent)
            .count()
    }

    /// Roster cache lookup for the details modal
    pub fn find(&self, staff_id: i64) -> Option<&AttendanceRecord> {
        self.records.iter().find(|r| r.staff_id == staff_id)
    }
}

/// Filter parameters for the roster query
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttendanceQuery {
    /// YYYY-MM-DD; empty means "server default"
    pub date: String,
    pub department: String,
    /// History window in days, as the select-box value
    pub days: String,
}

impl Default for AttendanceQuery {
    fn default() -> Self {
        Self {
            date: String::new(),
            department: String::new(),
            days: "7".to_string(),
        }
    }
}

impl AttendanceQuery {
    /// Default query preselecting today's date
    pub fn for_today() -> Self {
        Self {
            date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    pub fn params(&self) -> [(&str, &str); 3] {
        [
            ("date", self.date.as_str()),
            ("department", self.department.as_str()),
            ("days", self.days.as_str()),
        ]
    }
}

// ============ Superadmin ============

/// Recently signed-up user shown in the superadmin table
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RecentUser {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub joined: String,
}

/// Snapshot of the superadmin stat counters and signup series
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SuperadminSnapshot {
    #[serde(default)]
    pub total_students: i64,
    #[serde(default)]
    pub total_teachers: i64,
    #[serde(default)]
    pub total_courses: i64,
    #[serde(default)]
    pub other_count: i64,
    #[serde(default)]
    pub recent_users: Vec<RecentUser>,
    #[serde(default)]
    pub signup_labels: Vec<String>,
    #[serde(default)]
    pub signup_counts: Vec<f64>,
}

// ============ Live Updates ============

/// One entry in the live-updates feed
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LiveUpdate {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub is_new: bool,
}

/// Live-updates feed region state
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LiveFeed {
    #[default]
    Loading,
    Loaded(Vec<LiveUpdate>),
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analytics() -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            learning_style: LearningStyle {
                labels: vec!["Visual".into(), "Auditory".into()],
                values: vec![60.0, 40.0],
            },
            ai_tips: vec![StudyTip {
                title: "Short sessions".into(),
                description: "Review in 25-minute blocks".into(),
            }],
            achievements: vec![
                Achievement {
                    title: "Week streak".into(),
                    progress: 80.0,
                },
                Achievement {
                    title: "Early bird".into(),
                    progress: 40.0,
                },
            ],
            peak_hours: "9 AM - 11 AM".into(),
            avg_session: 1.5,
            weekly_total: 28.5,
            last_updated: "2024-01-15T10:00:00+00:00".into(),
        }
    }

    #[test]
    fn identical_snapshots_have_no_meaningful_change() {
        let a = analytics();
        let b = a.clone();
        assert!(!AnalyticsSnapshot::has_meaningful_change(Some(&a), &b));
    }

    #[test]
    fn missing_previous_snapshot_is_always_change() {
        assert!(AnalyticsSnapshot::has_meaningful_change(None, &analytics()));
    }

    #[test]
    fn achievement_progress_delta_is_change() {
        let a = analytics();
        let mut b = a.clone();
        b.achievements[1].progress = 45.0;
        assert!(AnalyticsSnapshot::has_meaningful_change(Some(&a), &b));
    }

    #[test]
    fn learning_style_length_mismatch_is_change() {
        let a = analytics();
        let mut b = a.clone();
        b.learning_style.values.push(5.0);
        assert!(AnalyticsSnapshot::has_meaningful_change(Some(&a), &b));
    }

    #[test]
    fn reordered_values_count_as_change() {
        let a = analytics();
        let mut b = a.clone();
        b.learning_style.values.reverse();
        assert!(AnalyticsSnapshot::has_meaningful_change(Some(&a), &b));
    }

    #[test]
    fn tip_count_change_is_change() {
        let a = analytics();
        let mut b = a.clone();
        b.ai_tips.clear();
        assert!(AnalyticsSnapshot::has_meaningful_change(Some(&a), &b));
    }

    #[test]
    fn summary_scalars_do_not_gate_notification() {
        let a = analytics();
        let mut b = a.clone();
        b.weekly_total = 30.0;
        b.peak_hours = "2 PM - 4 PM".into();
        assert!(!AnalyticsSnapshot::has_meaningful_change(Some(&a), &b));
    }

    fn record(staff_id: i64, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            staff_id,
            username: format!("staff{}", staff_id),
            full_name: String::new(),
            department: "IT".into(),
            position: "Technician".into(),
            status,
            last_attendance: None,
            photo_url: None,
            history_dates: vec!["2024-01-14".into(), "2024-01-15".into()],
            history: vec!["present".into(), "absent".into()],
        }
    }

    #[test]
    fn roster_counts_follow_statuses() {
        let mut records: Vec<_> = (0..7)
            .map(|i| record(i, AttendanceStatus::Present))
            .collect();
        records.extend((7..10).map(|i| record(i, AttendanceStatus::Absent)));
        let snapshot = AttendanceSnapshot { records };

        assert_eq!(snapshot.total(), 10);
        assert_eq!(snapshot.present(), 7);
        assert_eq!(snapshot.absent(), 3);
    }

    #[test]
    fn unknown_status_counts_as_neither() {
        let snapshot = AttendanceSnapshot {
            records: vec![record(1, AttendanceStatus::Unknown)],
        };
        assert_eq!(snapshot.total(), 1);
        assert_eq!(snapshot.present(), 0);
        assert_eq!(snapshot.absent(), 0);
    }

    #[test]
    fn unrecognized_status_string_deserializes_as_unknown() {
        let status: AttendanceStatus = serde_json::from_str("\"leave\"").unwrap();
        assert_eq!(status, AttendanceStatus::Unknown);
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let mut r = record(3, AttendanceStatus::Present);
        assert_eq!(r.display_name(), "staff3");
        r.full_name = "Asha Verma".into();
        assert_eq!(r.display_name(), "Asha Verma");
    }

    #[test]
    fn history_rows_zip_to_the_shorter_array() {
        let mut r = record(1, AttendanceStatus::Present);
        r.history.pop();
        assert_eq!(r.history_rows().count(), 1);
    }

    #[test]
    fn roster_cache_lookup_by_staff_id() {
        let snapshot = AttendanceSnapshot {
            records: vec![record(1, AttendanceStatus::Present), record(2, AttendanceStatus::Absent)],
        };
        assert_eq!(snapshot.find(2).map(|r| r.staff_id), Some(2));
        assert!(snapshot.find(9).is_none());
    }
}
