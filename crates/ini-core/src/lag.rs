//! Human-readable label for a server's average tick time.
//!
//! Unrelated to the codec; it lives here so callers that already depend on
//! this crate for their server configuration do not need another one.

/// Classify an average update time in milliseconds.
///
/// ```
/// use ini_core::lag::lag_message;
///
/// assert_eq!(lag_message(12.0), "perfectly smooth");
/// assert_eq!(lag_message(75.0), "extremely high lag");
/// ```
pub fn lag_message(update_time_avg: f64) -> &'static str {
    match update_time_avg {
        t if t < 20.0 => "perfectly smooth",
        t if t < 35.0 => "good",
        t if t < 40.0 => "tiny lag",
        t if t < 50.0 => "lag",
        _ => "extremely high lag",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_exclusive_upper_bounds() {
        assert_eq!(lag_message(19.99), "perfectly smooth");
        assert_eq!(lag_message(20.0), "good");
        assert_eq!(lag_message(35.0), "tiny lag");
        assert_eq!(lag_message(40.0), "lag");
        assert_eq!(lag_message(50.0), "extremely high lag");
    }

    #[test]
    fn nan_is_worst_case() {
        assert_eq!(lag_message(f64::NAN), "extremely high lag");
    }
}
