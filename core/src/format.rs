//! Display helpers shared by the point card, the form and the trip summary.

use chrono::{DateTime, Datelike, Duration, Utc};

/// Duration label of a point card: `02D 03H 15M`, `03H 15M` or `45M`
pub fn duration_label(duration: Duration) -> String {
    let total_minutes = duration.num_minutes().max(0);
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes / 60) % 24;
    let minutes = total_minutes % 60;

    if days > 0 {
        format!("{:02}D {:02}H {:02}M", days, hours, minutes)
    } else if hours > 0 {
        format!("{:02}H {:02}M", hours, minutes)
    } else {
        format!("{:02}M", minutes)
    }
}

/// `MAR 18` style date shown at the left of a point card
pub fn card_date(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d").to_string().to_uppercase()
}

pub fn clock_time(ts: &DateTime<Utc>) -> String {
    ts.format("%H:%M").to_string()
}

/// Value shown in the form date inputs
pub fn form_datetime(ts: &DateTime<Utc>) -> String {
    ts.format("%d/%m/%y %H:%M").to_string()
}

/// `18 MAR — 20` within one month, `30 MAR — 02 APR` across months
pub fn trip_dates(start: &DateTime<Utc>, end: &DateTime<Utc>) -> String {
    let head = start.format("%d %b").to_string().to_uppercase();

    if start.year() == end.year() && start.month() == end.month() {
        format!("{} — {}", head, end.format("%d"))
    } else {
        format!("{} — {}", head, end.format("%d %b").to_string().to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_duration_label() {
        assert_eq!(duration_label(Duration::minutes(45)), "45M");
        assert_eq!(duration_label(Duration::minutes(195)), "03H 15M");
        assert_eq!(
            duration_label(Duration::days(2) + Duration::minutes(195)),
            "02D 03H 15M"
        );
        assert_eq!(duration_label(Duration::zero()), "00M");
    }

    #[test]
    fn test_trip_dates() {
        let start: DateTime<Utc> = "2025-03-18T10:00:00Z".parse().unwrap();
        let same_month: DateTime<Utc> = "2025-03-20T10:00:00Z".parse().unwrap();
        let next_month: DateTime<Utc> = "2025-04-02T10:00:00Z".parse().unwrap();

        assert_eq!(trip_dates(&start, &same_month), "18 MAR — 20");
        assert_eq!(trip_dates(&start, &next_month), "18 MAR — 02 APR");
        assert_eq!(card_date(&start), "MAR 18");
    }
}
