//! Superadmin region rendering.
//!
//! Markup for the recent-signups table body.

use crate::render::{escape_html, or_dash};
use crate::state::snapshot::RecentUser;

/// Per-user report download link, with `/0/` standing in for the user id
pub const REPORT_URL_TEMPLATE: &str = "/superadmin/download-report/0/";

const USER_COLUMNS: usize = 5;

/// Rows for the recent-users `<tbody>`.
pub fn recent_users_body(users: &[RecentUser], report_url_template: &str) -> String {
    if users.is_empty() {
        return format!(
            "<tr><td colspan=\"{}\" class=\"placeholder-row\">No recent signups</td></tr>",
            USER_COLUMNS
        );
    }

    users
        .iter()
        .map(|user| {
            let report_url = report_url_template.replace("/0/", &format!("/{}/", user.id));
            format!(
                "<tr data-user-id=\"{id}\">\
                 <td>{username}</td>\
                 <td>{email}</td>\
                 <td>{role}</td>\
                 <td>{joined}</td>\
                 <td><a class=\"report-link\" href=\"{report_url}\">Report</a></td>\
                 </tr>",
                id = user.id,
                username = escape_html(&user.username),
                email = escape_html(&user.email),
                role = escape_html(or_dash(&user.role)),
                joined = escape_html(or_dash(&user.joined)),
                report_url = escape_html(&report_url),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64) -> RecentUser {
        RecentUser {
            id,
            username: format!("user{}", id),
            email: format!("user{}@example.edu", id),
            role: "student".into(),
            joined: "2024-01-10".into(),
        }
    }

    #[test]
    fn empty_list_renders_the_placeholder() {
        let body = recent_users_body(&[], REPORT_URL_TEMPLATE);
        assert_eq!(body.matches("<tr").count(), 1);
        assert!(body.contains("No recent signups"));
    }

    #[test]
    fn report_url_substitutes_the_user_id() {
        let body = recent_users_body(&[user(42)], REPORT_URL_TEMPLATE);
        assert!(body.contains("/superadmin/download-report/42/"));
        assert!(!body.contains("/superadmin/download-report/0/"));
    }

    #[test]
    fn missing_role_renders_a_dash() {
        let mut u = user(1);
        u.role = String::new();
        let body = recent_users_body(&[u], REPORT_URL_TEMPLATE);
        assert!(body.contains("<td>-</td>"));
    }

    #[test]
    fn usernames_and_emails_are_escaped() {
        let mut u = user(1);
        u.username = "<b>bold</b>".into();
        u.email = "a&b@example.edu".into();
        let body = recent_users_body(&[u], REPORT_URL_TEMPLATE);
        assert!(body.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(body.contains("a&amp;b@example.edu"));
    }
}
