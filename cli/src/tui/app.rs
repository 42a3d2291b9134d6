use eascheck_core::{MonthKey, MonthReport, RunReport};

/// Month-by-month browser state.
pub struct ReportBrowser {
    pub months: Vec<(MonthKey, MonthReport)>,
    pub current: usize,
    pub scroll: usize,
}

impl ReportBrowser {
    pub fn new(report: RunReport) -> Self {
        let months: Vec<(MonthKey, MonthReport)> = report.months.into_iter().collect();
        // Open on the latest month.
        let current = months.len().saturating_sub(1);
        Self {
            months,
            current,
            scroll: 0,
        }
    }

    pub fn next_month(&mut self) {
        if self.current + 1 < self.months.len() {
            self.current += 1;
            self.scroll = 0;
        }
    }

    pub fn previous_month(&mut self) {
        if self.current > 0 {
            self.current -= 1;
            self.scroll = 0;
        }
    }

    pub fn scroll_down(&mut self) {
        if let Some((_, month)) = self.current_month() {
            if self.scroll + 1 < month.grid.row_count() {
                self.scroll += 1;
            }
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn current_month(&self) -> Option<&(MonthKey, MonthReport)> {
        self.months.get(self.current)
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.months.len()
    }
}
