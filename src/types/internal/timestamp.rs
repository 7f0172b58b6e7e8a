use chrono::Utc;

/// Current time as Unix epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Timestamp for a row being modified
///
/// Never returns a value at or below `previous`, so `updated_at` strictly
/// increases even when two writes land in the same millisecond.
pub fn next_update(previous: i64) -> i64 {
    now_millis().max(previous + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_update_is_strictly_greater() {
        let future = now_millis() + 60_000;
        assert_eq!(next_update(future), future + 1);

        let past = now_millis() - 60_000;
        assert!(next_update(past) > past);
    }
}
