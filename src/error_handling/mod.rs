//! Error handling.
//!
//! Fetch attempts fail with a [`FetchError`] that knows whether rotating the
//! identity could help. The resolver turns the final outcome into a
//! [`ResolveError`]. Parsing never fails; missing data degrades to absent fields.

mod types;

pub use types::{FetchError, InitializationError, ResolveError};

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: u16) -> FetchError {
        FetchError::Status {
            url: "https://www.facebook.com/post".to_string(),
            status,
        }
    }

    #[test]
    fn test_bot_detection_statuses_are_retryable() {
        for status in [400, 401, 403, 429] {
            assert!(status_error(status).is_retryable(), "status {}", status);
        }
    }

    #[test]
    fn test_other_statuses_are_fatal() {
        for status in [404, 410, 500, 502, 503] {
            assert!(!status_error(status).is_retryable(), "status {}", status);
        }
    }

    #[test]
    fn test_login_wall_reports_forbidden() {
        let err = FetchError::LoginWall {
            url: "https://www.facebook.com/post".to_string(),
        };
        assert!(err.is_retryable());
        assert_eq!(err.status(), Some(403));
        assert!(err.to_string().contains("status 403"));
        assert!(err.to_string().contains("https://www.facebook.com/post"));
    }

    #[test]
    fn test_timeout_is_fatal_and_names_url() {
        let err = FetchError::Timeout {
            url: "https://www.facebook.com/slow".to_string(),
            budget_ms: 1500,
        };
        assert!(!err.is_retryable());
        assert!(err.is_timeout());
        assert_eq!(err.status(), None);
        let message = err.to_string();
        assert!(message.contains("timed out"));
        assert!(message.contains("https://www.facebook.com/slow"));
    }

    #[test]
    fn test_exhausted_carries_last_error() {
        let err = ResolveError::ExhaustedStrategies {
            url: "https://www.facebook.com/post".to_string(),
            attempts: 7,
            last: status_error(403),
        };
        assert_eq!(err.status(), Some(403));
        assert!(!err.is_timeout());
        let message = err.to_string();
        assert!(message.contains("https://www.facebook.com/post"));
        assert!(message.contains("status 403"));
    }

    #[test]
    fn test_fatal_is_transparent() {
        let err = ResolveError::Fatal(status_error(500));
        assert_eq!(
            err.to_string(),
            "Failed to fetch Facebook URL https://www.facebook.com/post (status 500)"
        );
        assert_eq!(err.status(), Some(500));
    }
}
