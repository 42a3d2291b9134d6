use crate::model::entry::{Direction, LogEntry, TestKind};
use crate::model::month::MonthKey;
use crate::model::stats::MonthStats;
use crate::service::compliance::check_compliance;
use crate::time::week_start;
use chrono::NaiveDateTime;
use std::collections::{BTreeMap, BTreeSet};

/// Entries of one calendar month, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup {
    pub key: MonthKey,
    pub entries: Vec<LogEntry>,
}

impl MonthGroup {
    pub fn new(key: MonthKey) -> Self {
        Self {
            key,
            entries: Vec::new(),
        }
    }

    pub fn sorted(&self, direction: Direction, kind: TestKind) -> Vec<&LogEntry> {
        select_sorted(&self.entries, direction, kind)
    }

    pub fn weeks(&self) -> Vec<NaiveDateTime> {
        weeks_of(&self.entries)
    }

    pub fn rwt_sources(&self) -> Vec<String> {
        rwt_received_sources(&self.entries)
    }
}

/// Splits entries into calendar months keyed chronologically.
pub fn group_by_month(entries: Vec<LogEntry>) -> BTreeMap<MonthKey, MonthGroup> {
    let mut groups: BTreeMap<MonthKey, MonthGroup> = BTreeMap::new();
    for entry in entries {
        let key = MonthKey::of(entry.timestamp);
        groups
            .entry(key)
            .or_insert_with(|| MonthGroup::new(key))
            .entries
            .push(entry);
    }
    groups
}

/// Entries of one direction/kind, oldest first. Ties keep input order.
pub fn select_sorted(entries: &[LogEntry], direction: Direction, kind: TestKind) -> Vec<&LogEntry> {
    let mut selected: Vec<&LogEntry> = entries.iter().filter(|e| e.is(direction, kind)).collect();
    selected.sort_by_key(|e| e.timestamp);
    selected
}

/// Distinct week starts across every entry of the month, ascending.
pub fn weeks_of(entries: &[LogEntry]) -> Vec<NaiveDateTime> {
    entries
        .iter()
        .map(|e| week_start(e.timestamp))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct labels of sources that delivered a weekly test, sorted.
pub fn rwt_received_sources(entries: &[LogEntry]) -> Vec<String> {
    entries
        .iter()
        .filter(|e| e.is(Direction::Received, TestKind::Rwt))
        .map(|e| e.source.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// First received RWT from `source` inside the week starting at `week`.
pub fn find_rwt<'a>(entries: &'a [LogEntry], source: &str, week: NaiveDateTime) -> Option<&'a LogEntry> {
    entries.iter().find(|e| {
        e.is(Direction::Received, TestKind::Rwt) && e.source == source && week_start(e.timestamp) == week
    })
}

pub fn count(entries: &[LogEntry], direction: Direction, kind: TestKind) -> usize {
    entries.iter().filter(|e| e.is(direction, kind)).count()
}

impl From<&MonthGroup> for MonthStats {
    fn from(group: &MonthGroup) -> Self {
        let mut stats = MonthStats::new(group.key.year, group.key.month);
        stats.rmt_received = count(&group.entries, Direction::Received, TestKind::Rmt);
        stats.rmt_sent = count(&group.entries, Direction::Sent, TestKind::Rmt);
        stats.rwt_received = count(&group.entries, Direction::Received, TestKind::Rwt);
        stats.rwt_sent = count(&group.entries, Direction::Sent, TestKind::Rwt);

        let received = group.sorted(Direction::Received, TestKind::Rmt);
        stats.rmt_compliant = group
            .sorted(Direction::Sent, TestKind::Rmt)
            .into_iter()
            .filter(|tx| check_compliance(tx, received.iter().copied()).within_window)
            .count();

        let weeks = group.weeks();
        stats.rwt_missing = group
            .rwt_sources()
            .iter()
            .map(|source| {
                weeks
                    .iter()
                    .filter(|week| find_rwt(&group.entries, source, **week).is_none())
                    .count()
            })
            .sum();
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn entry(direction: Direction, kind: TestKind, timestamp: NaiveDateTime, source: &str) -> LogEntry {
        LogEntry {
            direction,
            kind,
            timestamp,
            source: source.to_string(),
            source_code: source.to_string(),
            details: String::new(),
        }
    }

    #[test]
    fn test_group_by_month_is_chronological() {
        let groups = group_by_month(vec![
            entry(Direction::Sent, TestKind::Rwt, at(4, 2, 9), "Station Log"),
            entry(Direction::Received, TestKind::Rmt, at(3, 15, 13), "NWS"),
            entry(Direction::Sent, TestKind::Rmt, at(3, 15, 14), "Station Log"),
        ]);

        let keys: Vec<String> = groups.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["2024/03", "2024/04"]);
        assert_eq!(groups[&MonthKey::new(2024, 3)].entries.len(), 2);
    }

    #[test]
    fn test_weeks_cover_all_entries_not_only_rwt() {
        let entries = vec![
            entry(Direction::Received, TestKind::Rwt, at(3, 5, 9), "NWS"),
            entry(Direction::Received, TestKind::Rmt, at(3, 20, 9), "NWS"),
            entry(Direction::Sent, TestKind::Rwt, at(3, 6, 9), "Station Log"),
        ];
        // 03/03 and 03/17 are the Sundays.
        assert_eq!(weeks_of(&entries), vec![at(3, 3, 0), at(3, 17, 0)]);
    }

    #[test]
    fn test_rwt_sources_are_distinct_and_sorted() {
        let entries = vec![
            entry(Direction::Received, TestKind::Rwt, at(3, 5, 9), "NWS"),
            entry(Direction::Received, TestKind::Rwt, at(3, 12, 9), "LP-1"),
            entry(Direction::Received, TestKind::Rwt, at(3, 19, 9), "NWS"),
            entry(Direction::Received, TestKind::Rmt, at(3, 19, 9), "CAP"),
            entry(Direction::Sent, TestKind::Rwt, at(3, 19, 9), "Station Log"),
        ];
        assert_eq!(rwt_received_sources(&entries), vec!["LP-1", "NWS"]);
    }

    #[test]
    fn test_find_rwt_returns_first_in_week() {
        let entries = vec![
            entry(Direction::Received, TestKind::Rwt, at(3, 6, 9), "NWS"),
            entry(Direction::Received, TestKind::Rwt, at(3, 5, 9), "NWS"),
        ];
        let found = find_rwt(&entries, "NWS", at(3, 3, 0)).unwrap();
        assert_eq!(found.timestamp, at(3, 6, 9));
        assert!(find_rwt(&entries, "NWS", at(3, 10, 0)).is_none());
        assert!(find_rwt(&entries, "LP-1", at(3, 3, 0)).is_none());
    }

    #[test]
    fn test_sorted_and_stats() {
        let mut group = MonthGroup::new(MonthKey::new(2024, 3));
        group.entries = vec![
            entry(Direction::Sent, TestKind::Rmt, at(3, 20, 9), "Station Log"),
            entry(Direction::Sent, TestKind::Rmt, at(3, 2, 9), "Station Log"),
            entry(Direction::Received, TestKind::Rwt, at(3, 2, 9), "NWS"),
        ];
        let sent: Vec<NaiveDateTime> = group
            .sorted(Direction::Sent, TestKind::Rmt)
            .iter()
            .map(|e| e.timestamp)
            .collect();
        assert_eq!(sent, vec![at(3, 2, 9), at(3, 20, 9)]);

        let stats = MonthStats::from(&group);
        assert_eq!(stats.rmt_sent, 2);
        assert_eq!(stats.rwt_received, 1);
        assert_eq!(stats.rmt_received, 0);
        assert_eq!(stats.rmt_compliant, 0);
        assert_eq!(stats.rmt_failures(), 2);
        // One source, weeks of 02/25 and 03/17; only the first is covered.
        assert_eq!(stats.rwt_missing, 1);
    }
}
