use chrono::Timelike;

/// Check if a timestamp falls within quiet hours.
///
/// Only the hour component is compared; the window is half-open
/// `[quiet_start, quiet_end)` and wraps past midnight when
/// `quiet_start > quiet_end`.
pub fn is_quiet_hours<T: Timelike>(dt: &T, quiet_start: u32, quiet_end: u32) -> bool {
    let current_hour = dt.hour();

    if quiet_start == quiet_end {
        // Degenerate window, quiet hours disabled
        return false;
    }

    if quiet_start < quiet_end {
        // Quiet hours within the same day (e.g. 13:00 - 17:00)
        quiet_start <= current_hour && current_hour < quiet_end
    } else {
        // Quiet hours span midnight (e.g. 22:00 - 07:00)
        current_hour >= quiet_start || current_hour < quiet_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at_hour(hour: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 6, 26, hour, 15, 0).unwrap()
    }

    #[test]
    fn test_equal_bounds_never_quiet() {
        for start in 0..24 {
            for hour in 0..24 {
                assert!(!is_quiet_hours(&at_hour(hour), start, start));
            }
        }
    }

    #[test]
    fn test_same_day_window() {
        // 13:00 - 17:00
        for hour in 0..24 {
            let expected = (13..17).contains(&hour);
            assert_eq!(is_quiet_hours(&at_hour(hour), 13, 17), expected);
        }
    }

    #[test]
    fn test_overnight_window() {
        // 22:00 - 07:00 spans midnight
        for hour in 0..24 {
            let expected = hour >= 22 || hour < 7;
            assert_eq!(is_quiet_hours(&at_hour(hour), 22, 7), expected);
        }
    }

    #[test]
    fn test_window_boundaries() {
        // An event at the start hour is quiet, one at the end hour is not
        assert!(is_quiet_hours(&at_hour(22), 22, 7));
        assert!(!is_quiet_hours(&at_hour(7), 22, 7));

        assert!(is_quiet_hours(&at_hour(13), 13, 17));
        assert!(!is_quiet_hours(&at_hour(17), 13, 17));
    }

    #[test]
    fn test_minutes_are_ignored() {
        let late_in_hour = Utc.with_ymd_and_hms(2023, 6, 26, 6, 59, 59).unwrap();
        assert!(is_quiet_hours(&late_in_hour, 22, 7));

        let start_of_end_hour = Utc.with_ymd_and_hms(2023, 6, 26, 7, 0, 0).unwrap();
        assert!(!is_quiet_hours(&start_of_end_hour, 22, 7));
    }
}
