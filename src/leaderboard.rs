use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, Utc};

use crate::db::models::ConsumptionRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    Daily,
    Weekly,
}

impl WindowKind {
    pub fn heading(&self) -> &'static str {
        match self {
            WindowKind::Daily => "Daily Leaderboard:",
            WindowKind::Weekly => "Weekly Leaderboard (since Monday):",
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            WindowKind::Daily => "No water consumption logged today.",
            WindowKind::Weekly => "No water consumption logged this week.",
        }
    }
}

/// A closed time interval used to filter records before aggregation.
/// Day boundaries are anchored to UTC midnight, matching how records
/// are stamped, so the window never shifts with the server's locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    pub fn of(kind: WindowKind, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let end_of_today =
            today.and_hms_micro_opt(23, 59, 59, 999_999).unwrap().and_utc();

        let start_day = match kind {
            WindowKind::Daily => today,
            WindowKind::Weekly => {
                // Most recent Monday at or before today.
                today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
            }
        };

        Window {
            start: start_day.and_hms_opt(0, 0, 0).unwrap().and_utc(),
            end: end_of_today,
        }
    }
}

/// Group records by user, sum amounts, and rank descending by total.
/// Ties break ascending by display name; the name shown for each user
/// comes from their most recent record in the input.
pub fn rank(records: &[ConsumptionRecord]) -> Vec<(String, f64)> {
    let mut totals: HashMap<i64, (String, DateTime<Utc>, f64)> = HashMap::new();

    for record in records {
        let entry = totals
            .entry(record.user_id)
            .or_insert_with(|| (record.username.clone(), record.date, 0.0));
        if record.date >= entry.1 {
            entry.0 = record.username.clone();
            entry.1 = record.date;
        }
        entry.2 += record.amount;
    }

    let mut ranked: Vec<(String, f64)> = totals
        .into_values()
        .map(|(name, _, total)| (name, total))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// Render a ranked list as user-facing text. Pure, no failure modes.
pub fn format_leaderboard(entries: &[(String, f64)], kind: WindowKind) -> String {
    if entries.is_empty() {
        return kind.empty_message().to_string();
    }

    let mut message = format!("{}\n", kind.heading());
    for (position, (name, total)) in entries.iter().enumerate() {
        message.push_str(&format!("{}. {}: {} liters\n", position + 1, name, total));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(user_id: i64, username: &str, amount: f64, date: DateTime<Utc>) -> ConsumptionRecord {
        ConsumptionRecord {
            id: 0,
            user_id,
            username: username.to_string(),
            amount,
            date,
        }
    }

    #[test]
    fn daily_window_spans_one_utc_day() {
        let now = Utc.with_ymd_and_hms(2026, 3, 4, 15, 30, 0).unwrap();
        let window = Window::of(WindowKind::Daily, now);

        assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 3, 4, 0, 0, 0).unwrap());
        assert_eq!(
            window.end,
            Utc.with_ymd_and_hms(2026, 3, 4, 23, 59, 59).unwrap()
                + Duration::microseconds(999_999)
        );
    }

    #[test]
    fn weekly_window_anchors_on_monday() {
        // 2026-03-04 is a Wednesday; the preceding Monday is 2026-03-02.
        let wednesday = Utc.with_ymd_and_hms(2026, 3, 4, 10, 0, 0).unwrap();
        let window = Window::of(WindowKind::Weekly, wednesday);

        assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap());

        // A record from the prior Sunday falls outside the window.
        let sunday = Utc.with_ymd_and_hms(2026, 3, 1, 23, 0, 0).unwrap();
        assert!(sunday < window.start);
        assert!(window.start <= wednesday && wednesday <= window.end);
    }

    #[test]
    fn weekly_window_on_a_monday_starts_that_day() {
        let monday = Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap();
        let window = Window::of(WindowKind::Weekly, monday);
        assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn rank_sums_per_user_and_sorts_descending() {
        let now = Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap();
        let records = vec![
            record(1, "A", 0.5, now),
            record(2, "B", 1.0, now),
            record(1, "A", 0.25, now + Duration::minutes(5)),
        ];

        let ranked = rank(&records);
        assert_eq!(ranked, vec![("B".to_string(), 1.0), ("A".to_string(), 0.75)]);
    }

    #[test]
    fn rank_breaks_ties_by_display_name() {
        let now = Utc::now();
        let records = vec![
            record(2, "zoe", 0.5, now),
            record(1, "amy", 0.5, now),
            record(3, "mia", 0.5, now),
        ];

        let names: Vec<String> = rank(&records).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["amy", "mia", "zoe"]);
    }

    #[test]
    fn rank_uses_latest_display_name() {
        let now = Utc::now();
        let records = vec![
            record(1, "old_name", 0.5, now),
            record(1, "new_name", 0.5, now + Duration::hours(1)),
        ];

        let ranked = rank(&records);
        assert_eq!(ranked, vec![("new_name".to_string(), 1.0)]);
    }

    #[test]
    fn rank_of_empty_input_is_empty() {
        assert!(rank(&[]).is_empty());
    }

    #[test]
    fn formats_numbered_list() {
        let entries = vec![("B".to_string(), 1.0), ("A".to_string(), 0.75)];
        let text = format_leaderboard(&entries, WindowKind::Daily);
        assert_eq!(text, "Daily Leaderboard:\n1. B: 1 liters\n2. A: 0.75 liters\n");
    }

    #[test]
    fn formats_empty_as_nothing_logged() {
        assert_eq!(
            format_leaderboard(&[], WindowKind::Daily),
            "No water consumption logged today."
        );
        assert_eq!(
            format_leaderboard(&[], WindowKind::Weekly),
            "No water consumption logged this week."
        );
    }
}
