//! Request identifiers and clock helpers.
//!
//! Request IDs are UUIDv7, so log lines from one invocation sort by the time
//! the invocation started.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

/// Generate a new request correlation ID.
#[inline]
pub fn new_request_id() -> Uuid {
    Uuid::now_v7()
}

/// Start time embedded in a UUIDv7 request ID, or `None` for other versions.
pub fn request_started_at(id: &Uuid) -> Option<DateTime<Utc>> {
    if id.get_version_num() != 7 {
        return None;
    }
    let bytes = id.as_bytes();
    let millis = bytes[..6]
        .iter()
        .fold(0i64, |acc, b| (acc << 8) | i64::from(*b));
    Utc.timestamp_millis_opt(millis).single()
}

/// Current time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_is_v7() {
        assert_eq!(new_request_id().get_version_num(), 7);
    }

    #[test]
    fn test_request_ids_are_time_ordered() {
        let a = new_request_id();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = new_request_id();
        assert!(a < b);
    }

    #[test]
    fn test_request_started_at_matches_clock() {
        let before = now_millis();
        let id = new_request_id();
        let after = now_millis();
        let started = request_started_at(&id).unwrap().timestamp_millis();
        assert!(started >= before && started <= after);
    }

    #[test]
    fn test_request_started_at_rejects_v4() {
        assert!(request_started_at(&Uuid::new_v4()).is_none());
    }
}
