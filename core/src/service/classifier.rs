use crate::config::{ClassifierConfig, RecordFields};
use crate::model::entry::{Direction, LogEntry, TestKind};
use crate::model::record::RawRecord;
use crate::time::parse_device_timestamp;
use tracing::trace;

// Markers are matched case-sensitively, exactly as the device writes them.
const RWT_CODE_MARKER: &str = "-RWT-";
const RMT_CODE_MARKER: &str = "-RMT-";
const RWT_TEXT_MARKER: &str = "Required Weekly Test";
const RMT_TEXT_MARKER: &str = "Required Monthly Test";

const CAP_MARKER: &str = "Received from CAP";
const IPAWS_MARKER: &str = "IPAWS";
const MONITOR_MARKER: &str = "Received on Monitor ";
const CAP_CODE: &str = "CAP";

/// Turns raw device rows into [`LogEntry`] values.
///
/// Most rows of a real export are not Sent/Received RWT/RMT events with a
/// usable date; those come back as `None` and are simply left out.
pub struct EntryClassifier<'a> {
    config: &'a ClassifierConfig,
    fields: &'a RecordFields,
}

impl<'a> EntryClassifier<'a> {
    pub fn new(config: &'a ClassifierConfig, fields: &'a RecordFields) -> Self {
        Self { config, fields }
    }

    pub fn classify(&self, record: &RawRecord) -> Option<LogEntry> {
        let direction_raw = record.get(&self.fields.direction).unwrap_or_default();
        let Some(direction) = Direction::parse(&direction_raw) else {
            trace!(direction = %direction_raw, "dropping record: not Sent/Received");
            return None;
        };

        let code = record.get(&self.fields.code).unwrap_or_default();
        let details_raw = record.get(&self.fields.details).unwrap_or_default();

        let Some(kind) = detect_test_kind(&code, &details_raw) else {
            trace!(code = %code, "dropping record: no RWT/RMT marker");
            return None;
        };

        let date_raw = record.get(&self.fields.date_time).unwrap_or_default();
        let Some(timestamp) = parse_device_timestamp(&date_raw) else {
            trace!(date = %date_raw, "dropping record: unparseable timestamp");
            return None;
        };

        let (source_code, source) = self.canonical_source(direction, &details_raw);

        Some(LogEntry {
            direction,
            kind,
            timestamp,
            source,
            source_code,
            details: collapse_whitespace(&details_raw),
        })
    }

    pub fn classify_all(&self, records: &[RawRecord]) -> Vec<LogEntry> {
        records.iter().filter_map(|r| self.classify(r)).collect()
    }

    /// Returns `(source_code, label)`. Sent records always come from the station.
    fn canonical_source(&self, direction: Direction, details: &str) -> (String, String) {
        if direction == Direction::Sent {
            return (self.config.station_code.clone(), self.config.station_label.clone());
        }

        if details.contains(CAP_MARKER) {
            let label = if details.contains(IPAWS_MARKER) {
                &self.config.ipaws_label
            } else {
                &self.config.cap_label
            };
            return (CAP_CODE.to_string(), label.clone());
        }

        if let Some(number) = monitor_number(details) {
            let code = format!("Monitor {}", number);
            let label = number
                .parse::<u32>()
                .ok()
                .and_then(|n| self.config.monitor_labels.get(&n).cloned())
                .unwrap_or_else(|| code.clone());
            return (code, label);
        }

        (self.config.unknown_label.clone(), self.config.unknown_label.clone())
    }
}

/// RWT wins when both kinds are marked.
pub fn detect_test_kind(code: &str, details: &str) -> Option<TestKind> {
    if code.contains(RWT_CODE_MARKER) || details.contains(RWT_TEXT_MARKER) {
        Some(TestKind::Rwt)
    } else if code.contains(RMT_CODE_MARKER) || details.contains(RMT_TEXT_MARKER) {
        Some(TestKind::Rmt)
    } else {
        None
    }
}

/// Digits following `Received on Monitor `, if any.
fn monitor_number(details: &str) -> Option<&str> {
    let start = details.find(MONITOR_MARKER)? + MONITOR_MARKER.len();
    let rest = &details[start..];
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if end == 0 {
        None
    } else {
        Some(&rest[..end])
    }
}

pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
