use chrono::{DateTime, Utc};

/// Key for the per-subject usage row of a given UTC calendar month.
pub fn period_month(now: DateTime<Utc>) -> String {
    now.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn period_month_is_year_dash_month() {
        let at = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        assert_eq!(period_month(at), "2026-08");
    }

    #[test]
    fn period_month_pads_single_digit_months() {
        let at = Utc.with_ymd_and_hms(2026, 1, 31, 23, 59, 59).unwrap();
        assert_eq!(period_month(at), "2026-01");
    }
}
