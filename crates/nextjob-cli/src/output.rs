//! Output formatting utilities

use chrono::{DateTime, Utc};
use nextjob_application::Refresh;
use nextjob_core::job_role::ActiveRole;
use nextjob_core::resource::Resource;
use nextjob_core::search_session::SearchSession;
use nextjob_core::view::StatusFilter;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// A watchlist entry that was never visited reads "Never".
pub fn last_visit(at: Option<DateTime<Utc>>) -> String {
    at.map(timestamp).unwrap_or_else(|| "Never".to_string())
}

pub fn end_time(at: Option<DateTime<Utc>>) -> String {
    at.map(timestamp).unwrap_or_else(|| "N/A".to_string())
}

pub fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

pub fn session_state(session: &SearchSession) -> &'static str {
    if session.is_finished() {
        "finished"
    } else {
        "running"
    }
}

/// "New, Ignore" style label of the statuses a listing shows.
pub fn status_filter_label(filter: &StatusFilter) -> String {
    if filter.is_empty() {
        return "none".to_string();
    }
    filter
        .statuses()
        .map(|status| status.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Closing line of a listing: how many rows and when the data was fetched.
pub fn listing_footer(shown: usize, loaded_at: Option<DateTime<Utc>>) -> String {
    match loaded_at {
        Some(at) => format!("{shown} shown, loaded {}", timestamp(at)),
        None => format!("{shown} shown"),
    }
}

pub fn active_role_banner(role: Option<&ActiveRole>) -> String {
    match role {
        Some(role) => format!("Active role: {} (#{})", role.name, role.id),
        None => "Active role: none".to_string(),
    }
}

pub fn print_success(message: &str) {
    println!("✓ {message}");
}

pub fn print_warning(message: &str) {
    eprintln!("⚠ {message}");
}

/// Reports a mutation whose follow-up reload did not go through.
pub fn print_refresh<R: Resource>(refresh: &Refresh<R>) {
    if let Some(err) = refresh.reload_error() {
        print_warning(&format!(
            "Change applied, but the list could not be reloaded: {}",
            err.user_message()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use nextjob_core::opportunity::OpportunityStatus;

    #[test]
    fn test_missing_values() {
        assert_eq!(last_visit(None), "Never");
        assert_eq!(end_time(None), "N/A");
        assert_eq!(or_na(None), "N/A");
        assert_eq!(or_na(Some("/var/log/run.log")), "/var/log/run.log");
    }

    #[test]
    fn test_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 5, 42).unwrap();
        assert_eq!(last_visit(Some(at)), "2025-03-01 09:05");
    }

    #[test]
    fn test_session_state() {
        let mut session = SearchSession {
            id: 1,
            start_datetime: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
            end_datetime: None,
            score_threshold: 70,
            log_file_path: None,
        };
        assert_eq!(session_state(&session), "running");
        session.end_datetime = Some(Utc.with_ymd_and_hms(2025, 3, 1, 9, 40, 0).unwrap());
        assert_eq!(session_state(&session), "finished");
    }

    #[test]
    fn test_status_filter_label() {
        assert_eq!(status_filter_label(&StatusFilter::all()), "New, Ignore");
        assert_eq!(
            status_filter_label(&StatusFilter::only([OpportunityStatus::Ignore])),
            "Ignore"
        );
        assert_eq!(status_filter_label(&StatusFilter::none()), "none");
    }

    #[test]
    fn test_listing_footer() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 5, 0).unwrap();
        assert_eq!(listing_footer(3, Some(at)), "3 shown, loaded 2025-03-01 09:05");
        assert_eq!(listing_footer(0, None), "0 shown");
    }

    #[test]
    fn test_active_role_banner() {
        let role = ActiveRole {
            id: 3,
            name: "Platform Engineer".to_string(),
        };
        assert_eq!(
            active_role_banner(Some(&role)),
            "Active role: Platform Engineer (#3)"
        );
        assert_eq!(active_role_banner(None), "Active role: none");
    }
}
