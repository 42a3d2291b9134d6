use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Sent,
    Received,
}

impl Direction {
    /// Only the exact device spellings are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Sent" => Some(Direction::Sent),
            "Received" => Some(Direction::Received),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestKind {
    Rwt,
    Rmt,
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestKind::Rwt => write!(f, "RWT"),
            TestKind::Rmt => write!(f, "RMT"),
        }
    }
}

/// A reportable test event. Built by the classifier and never changed after.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub direction: Direction,
    pub kind: TestKind,
    /// Device wall-clock time, no timezone attached.
    pub timestamp: NaiveDateTime,
    /// Display label, e.g. `NWS` or `Station Log`.
    pub source: String,
    /// Raw grouping key, e.g. `Monitor 2`, `CAP`, `Station`.
    pub source_code: String,
    pub details: String,
}

impl LogEntry {
    pub fn is(&self, direction: Direction, kind: TestKind) -> bool {
        self.direction == direction && self.kind == kind
    }
}
