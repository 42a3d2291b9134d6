use serde::{Deserialize, Serialize};

/// Run-level figures returned alongside the grids.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct RunStats {
    /// Every classified entry, duplicates included.
    pub total_entries: usize,
    pub files_created: usize,
    /// `YYYY/MM`, chronological.
    pub months_found: Vec<String>,
}

/// Per-month tallies shown next to a rendered report.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct MonthStats {
    pub year: i32,
    pub month: u32,
    pub rmt_received: usize,
    pub rmt_sent: usize,
    pub rmt_compliant: usize,
    pub rwt_received: usize,
    pub rwt_sent: usize,
    pub rwt_missing: usize,
}

impl MonthStats {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            ..Default::default()
        }
    }

    pub fn rmt_failures(&self) -> usize {
        self.rmt_sent.saturating_sub(self.rmt_compliant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rmt_failures() {
        let mut stats = MonthStats::new(2024, 3);
        stats.rmt_sent = 3;
        stats.rmt_compliant = 1;
        assert_eq!(stats.rmt_failures(), 2);

        // Hand-edited counters never underflow.
        stats.rmt_compliant = 5;
        assert_eq!(stats.rmt_failures(), 0);
    }
}
