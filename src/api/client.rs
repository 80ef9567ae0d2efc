//! HTTP API Client
//!
//! Fetch helpers and typed wrappers for the portal's JSON endpoints.
//! Transient failures are retried with a linear backoff before they are
//! surfaced to the caller.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;

use crate::state::snapshot::{
    AnalyticsSnapshot, AttendanceQuery, AttendanceRecord, LiveUpdate, SuperadminSnapshot,
};

/// Total attempts for a transient-failure retry loop
pub const DEFAULT_ATTEMPTS: u32 = 3;

/// Base delay between retry attempts (milliseconds); retry `n` waits `n * base`
pub const BASE_RETRY_DELAY_MS: u32 = 1000;

pub const ANALYTICS_ENDPOINT: &str = "/portal/api/analytics/";
pub const LIVE_UPDATES_ENDPOINT: &str = "/portal/api/live-updates/";
pub const ATTENDANCE_LIST_ENDPOINT: &str = "/admin2/api/attendance/list/";
pub const ATTENDANCE_EXPORT_ENDPOINT: &str = "/admin2/export/attendance/";
pub const SUPERADMIN_UPDATES_ENDPOINT: &str = "/superadmin/api/updates/";
pub const MARK_ATTENDANCE_ENDPOINT: &str = "/superadmin/api/attendance/mark/";

/// Failure modes for an endpoint call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Transport error or non-2xx status; retried before surfacing
    #[error("network error: {0}")]
    Network(String),

    /// Malformed JSON; never retried
    #[error("parse error: {0}")]
    Parse(String),

    /// The server answered 2xx but flagged an `error` field in the payload
    #[error("server reported: {0}")]
    Payload(String),
}

/// Retry an async operation with linear backoff.
///
/// Only `FetchError::Network` is retried; parse and payload failures go
/// straight back to the caller. The sleep before retry `n` (1-based) is
/// `base_delay_ms * n`, so exhausting `max_attempts = 3` waits
/// `base * (1 + 2)` in total.
pub async fn retry_with_backoff<T, Op, OpFut, Sleep, SleepFut>(
    max_attempts: u32,
    base_delay_ms: u32,
    mut op: Op,
    mut sleep: Sleep,
) -> Result<T, FetchError>
where
    Op: FnMut() -> OpFut,
    OpFut: std::future::Future<Output = Result<T, FetchError>>,
    Sleep: FnMut(u32) -> SleepFut,
    SleepFut: std::future::Future<Output = ()>,
{
    let mut attempt = 1u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(FetchError::Network(reason)) => {
                if attempt >= max_attempts {
                    return Err(FetchError::Network(reason));
                }
                sleep(base_delay_ms * attempt).await;
                attempt += 1;
            }
            Err(other) => return Err(other),
        }
    }
}

/// One GET round-trip: send with same-origin credentials, reject non-2xx,
/// parse JSON, and treat a non-empty `error` field as a payload failure.
async fn get_value(url: &str) -> Result<serde_json::Value, FetchError> {
    let response = Request::get(url)
        .credentials(web_sys::RequestCredentials::SameOrigin)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(FetchError::Network(format!(
            "HTTP {} {}",
            response.status(),
            response.status_text()
        )));
    }

    let value: serde_json::Value = response
        .json()
        .await
        .map_err(|e| FetchError::Parse(e.to_string()))?;

    if let Some(reason) = value.get("error").and_then(|v| v.as_str()) {
        if !reason.is_empty() {
            return Err(FetchError::Payload(reason.to_string()));
        }
    }

    Ok(value)
}

/// GET `url` and deserialize the payload, retrying transient failures.
pub async fn fetch_json<T: DeserializeOwned>(url: &str, max_attempts: u32) -> Result<T, FetchError> {
    let value = retry_with_backoff(
        max_attempts,
        BASE_RETRY_DELAY_MS,
        || {
            let url = url.to_string();
            async move {
                match get_value(&url).await {
                    Err(FetchError::Network(reason)) => {
                        web_sys::console::warn_1(
                            &format!("request to {} failed: {}", url, reason).into(),
                        );
                        Err(FetchError::Network(reason))
                    }
                    other => other,
                }
            }
        },
        |delay_ms| gloo_timers::future::TimeoutFuture::new(delay_ms),
    )
    .await?;

    serde_json::from_value(value).map_err(|e| FetchError::Parse(e.to_string()))
}

/// POST `url` with the CSRF header. Not retried: mutations are
/// user-initiated and the caller surfaces the failure directly.
pub async fn post_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let response = Request::post(url)
        .credentials(web_sys::RequestCredentials::SameOrigin)
        .header("X-CSRFToken", &csrf_token())
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(FetchError::Network(format!(
            "HTTP {} {}",
            response.status(),
            response.status_text()
        )));
    }

    response
        .json()
        .await
        .map_err(|e| FetchError::Parse(e.to_string()))
}

/// CSRF token for mutating requests: the hidden form field wins, the
/// `csrftoken` cookie is the fallback.
pub fn csrf_token() -> String {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return String::new();
    };

    if let Ok(Some(field)) = document.query_selector("[name=csrfmiddlewaretoken]") {
        if let Ok(input) = field.dyn_into::<web_sys::HtmlInputElement>() {
            return input.value();
        }
    }

    if let Ok(html_doc) = document.dyn_into::<web_sys::HtmlDocument>() {
        if let Ok(cookie) = html_doc.cookie() {
            for pair in cookie.split("; ") {
                if let Some(token) = pair.strip_prefix("csrftoken=") {
                    return token.to_string();
                }
            }
        }
    }

    String::new()
}

/// Append query parameters to `base`, skipping empty values.
pub fn build_url(base: &str, params: &[(&str, &str)]) -> String {
    let query: Vec<String> = params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect();

    if query.is_empty() {
        base.to_string()
    } else {
        format!("{}?{}", base, query.join("&"))
    }
}

// ============ Response Envelopes ============

#[derive(Debug, serde::Deserialize)]
struct AttendanceListResponse {
    #[serde(default)]
    records: Vec<AttendanceRecord>,
}

#[derive(Debug, serde::Deserialize)]
struct LiveUpdatesResponse {
    #[serde(default)]
    updates: Vec<LiveUpdate>,
}

/// Result of the one-click attendance action
#[derive(Debug, serde::Deserialize)]
pub struct MarkAttendanceResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub summary: MarkAttendanceSummary,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct MarkAttendanceSummary {
    #[serde(default)]
    pub present: i64,
    #[serde(default)]
    pub absent: i64,
}

// ============ Endpoint Wrappers ============

/// Fetch the study-analytics snapshot
pub async fn fetch_analytics() -> Result<AnalyticsSnapshot, FetchError> {
    fetch_json(ANALYTICS_ENDPOINT, DEFAULT_ATTEMPTS).await
}

/// Fetch the live-updates feed
pub async fn fetch_live_updates() -> Result<Vec<LiveUpdate>, FetchError> {
    let response: LiveUpdatesResponse = fetch_json(LIVE_UPDATES_ENDPOINT, DEFAULT_ATTEMPTS).await?;
    Ok(response.updates)
}

/// Fetch the staff roster for the given filters
pub async fn fetch_attendance(query: &AttendanceQuery) -> Result<Vec<AttendanceRecord>, FetchError> {
    let url = build_url(ATTENDANCE_LIST_ENDPOINT, &query.params());
    let response: AttendanceListResponse = fetch_json(&url, DEFAULT_ATTEMPTS).await?;
    Ok(response.records)
}

/// Fetch a single staff member's record (history included)
pub async fn fetch_staff_details(
    query: &AttendanceQuery,
    staff_id: i64,
) -> Result<Option<AttendanceRecord>, FetchError> {
    let staff_id = staff_id.to_string();
    let url = build_url(
        ATTENDANCE_LIST_ENDPOINT,
        &[
            ("date", query.date.as_str()),
            ("days", query.days.as_str()),
            ("staff_id", staff_id.as_str()),
        ],
    );
    let response: AttendanceListResponse = fetch_json(&url, DEFAULT_ATTEMPTS).await?;
    Ok(response.records.into_iter().next())
}

/// Fetch the superadmin stat counters, recent users and signup series
pub async fn fetch_superadmin_updates() -> Result<SuperadminSnapshot, FetchError> {
    fetch_json(SUPERADMIN_UPDATES_ENDPOINT, DEFAULT_ATTEMPTS).await
}

/// Mark today's attendance from existing check-ins (POST, CSRF-protected)
pub async fn mark_attendance_now() -> Result<MarkAttendanceResponse, FetchError> {
    post_json(MARK_ATTENDANCE_ENDPOINT).await
}

/// Link target for the attendance export; never fetched from here.
pub fn attendance_export_url(query: &AttendanceQuery) -> String {
    build_url(ATTENDANCE_EXPORT_ENDPOINT, &query.params())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn run_retry(
        failures: u32,
        max_attempts: u32,
    ) -> (Result<u32, FetchError>, u32, Vec<u32>) {
        let calls = Rc::new(Cell::new(0u32));
        let delays = Rc::new(RefCell::new(Vec::new()));

        let result = futures::executor::block_on(retry_with_backoff(
            max_attempts,
            1000,
            {
                let calls = Rc::clone(&calls);
                move || {
                    let calls = Rc::clone(&calls);
                    async move {
                        calls.set(calls.get() + 1);
                        if calls.get() <= failures {
                            Err(FetchError::Network("connection refused".into()))
                        } else {
                            Ok(7)
                        }
                    }
                }
            },
            {
                let delays = Rc::clone(&delays);
                move |delay_ms| {
                    let delays = Rc::clone(&delays);
                    async move {
                        delays.borrow_mut().push(delay_ms);
                    }
                }
            },
        ));

        let delays = delays.borrow().clone();
        (result, calls.get(), delays)
    }

    #[test]
    fn two_failures_then_success_costs_two_retries() {
        let (result, calls, delays) = run_retry(2, 3);
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls, 3);
        assert_eq!(delays, vec![1000, 2000]);
        assert!(delays.iter().sum::<u32>() >= 1000 * (1 + 2));
    }

    #[test]
    fn exhausted_attempts_surface_the_network_failure() {
        let (result, calls, delays) = run_retry(10, 3);
        assert_eq!(
            result,
            Err(FetchError::Network("connection refused".into()))
        );
        assert_eq!(calls, 3);
        assert_eq!(delays, vec![1000, 2000]);
    }

    #[test]
    fn immediate_success_never_sleeps() {
        let (result, calls, delays) = run_retry(0, 3);
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls, 1);
        assert!(delays.is_empty());
    }

    #[test]
    fn parse_failures_are_not_retried() {
        let calls = Rc::new(Cell::new(0u32));
        let result: Result<u32, FetchError> = futures::executor::block_on(retry_with_backoff(
            3,
            1000,
            {
                let calls = Rc::clone(&calls);
                move || {
                    let calls = Rc::clone(&calls);
                    async move {
                        calls.set(calls.get() + 1);
                        Err(FetchError::Parse("unexpected token".into()))
                    }
                }
            },
            |_| async {},
        ));

        assert_eq!(result, Err(FetchError::Parse("unexpected token".into())));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn payload_errors_are_not_retried() {
        let calls = Rc::new(Cell::new(0u32));
        let result: Result<u32, FetchError> = futures::executor::block_on(retry_with_backoff(
            3,
            1000,
            {
                let calls = Rc::clone(&calls);
                move || {
                    let calls = Rc::clone(&calls);
                    async move {
                        calls.set(calls.get() + 1);
                        Err(FetchError::Payload("Access denied".into()))
                    }
                }
            },
            |_| async {},
        ));

        assert_eq!(result, Err(FetchError::Payload("Access denied".into())));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn build_url_skips_empty_params() {
        let url = build_url(
            ATTENDANCE_LIST_ENDPOINT,
            &[("date", "2024-01-15"), ("department", ""), ("days", "7")],
        );
        assert_eq!(url, "/admin2/api/attendance/list/?date=2024-01-15&days=7");
    }

    #[test]
    fn build_url_percent_encodes_values() {
        let url = build_url("/admin2/export/attendance/", &[("department", "R&D Lab")]);
        assert_eq!(url, "/admin2/export/attendance/?department=R%26D%20Lab");
    }

    #[test]
    fn build_url_without_params_is_the_base() {
        assert_eq!(build_url("/superadmin/api/updates/", &[]), "/superadmin/api/updates/");
    }
}
