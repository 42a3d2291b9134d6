use crate::model::entry::LogEntry;
use crate::model::grid::CellStyle;
use serde::{Deserialize, Serialize};

/// Retransmission window for monthly tests, inclusive.
pub const RMT_WINDOW_MINUTES: f64 = 60.0;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ComplianceOutcome {
    pub matched: bool,
    pub within_window: bool,
    /// Minutes between the closest prior receipt and the transmission.
    pub gap_minutes: Option<f64>,
}

impl ComplianceOutcome {
    /// Tag and style printed in the RMT Transmitted section.
    pub fn tag(&self) -> (&'static str, CellStyle) {
        match (self.matched, self.within_window) {
            (true, true) => ("Y", CellStyle::Success),
            (true, false) => ("N (Over 1hr)", CellStyle::Failure),
            (false, _) => ("N (No RX)", CellStyle::Warning),
        }
    }
}

/// Checks a transmitted RMT against the received RMTs.
///
/// Only receipts strictly before the transmission count; the latest of them is
/// the one the station relayed.
pub fn check_compliance<'a, I>(sent: &LogEntry, received_rmt: I) -> ComplianceOutcome
where
    I: IntoIterator<Item = &'a LogEntry>,
{
    let closest = received_rmt
        .into_iter()
        .filter(|rx| rx.timestamp < sent.timestamp)
        .max_by_key(|rx| rx.timestamp);

    match closest {
        None => ComplianceOutcome {
            matched: false,
            within_window: false,
            gap_minutes: None,
        },
        Some(rx) => {
            let gap = (sent.timestamp - rx.timestamp).num_seconds() as f64 / 60.0;
            ComplianceOutcome {
                matched: true,
                within_window: gap <= RMT_WINDOW_MINUTES,
                gap_minutes: Some(gap),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entry::{Direction, TestKind};
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(14, 0, 0).unwrap()
    }

    fn entry(direction: Direction, timestamp: NaiveDateTime) -> LogEntry {
        LogEntry {
            direction,
            kind: TestKind::Rmt,
            timestamp,
            source: "NWS".to_string(),
            source_code: "Monitor 3".to_string(),
            details: String::new(),
        }
    }

    #[test]
    fn test_latest_prior_receipt_is_selected() {
        let sent = entry(Direction::Sent, t0());
        let received = vec![
            entry(Direction::Received, t0() - Duration::minutes(45)),
            entry(Direction::Received, t0() - Duration::minutes(10)),
        ];

        let outcome = check_compliance(&sent, &received);
        assert!(outcome.matched);
        assert!(outcome.within_window);
        assert_eq!(outcome.gap_minutes, Some(10.0));
        assert_eq!(outcome.tag(), ("Y", CellStyle::Success));
    }

    #[test]
    fn test_late_retransmission() {
        let sent = entry(Direction::Sent, t0());
        let received = vec![entry(Direction::Received, t0() - Duration::minutes(90))];

        let outcome = check_compliance(&sent, &received);
        assert!(outcome.matched);
        assert!(!outcome.within_window);
        assert_eq!(outcome.tag(), ("N (Over 1hr)", CellStyle::Failure));
    }

    #[test]
    fn test_no_prior_receipt() {
        let sent = entry(Direction::Sent, t0());
        // Same instant and later receipts never count.
        let received = vec![
            entry(Direction::Received, t0()),
            entry(Direction::Received, t0() + Duration::minutes(5)),
        ];

        let outcome = check_compliance(&sent, &received);
        assert!(!outcome.matched);
        assert!(!outcome.within_window);
        assert_eq!(outcome.gap_minutes, None);
        assert_eq!(outcome.tag(), ("N (No RX)", CellStyle::Warning));

        let empty: Vec<LogEntry> = Vec::new();
        assert!(!check_compliance(&sent, &empty).matched);
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let sent = entry(Direction::Sent, t0());
        let exactly = vec![entry(Direction::Received, t0() - Duration::minutes(60))];
        assert!(check_compliance(&sent, &exactly).within_window);

        let just_over = vec![entry(Direction::Received, t0() - Duration::seconds(3601))];
        assert!(!check_compliance(&sent, &just_over).within_window);
    }
}
