use crate::config::AppConfig;
use crate::error::ComplianceError;
use crate::model::grid::ReportGrid;
use crate::model::month::MonthKey;
use crate::model::record::RawRecord;
use crate::model::stats::{MonthStats, RunStats};
use crate::service::aggregator::group_by_month;
use crate::service::classifier::EntryClassifier;
use crate::service::layout::build_month_grid;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info};

/// Naming for one month's output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthFile {
    pub key: MonthKey,
    /// `MM-YYYY`
    pub sheet_name: String,
}

impl MonthFile {
    pub fn new(key: MonthKey) -> Self {
        Self {
            key,
            sheet_name: key.sheet_name(),
        }
    }

    /// `<year>/<MM>/Sage_Log_<year>-<MM>.<ext>`
    pub fn archive_path(&self, ext: &str) -> PathBuf {
        let year = format!("{:04}", self.key.year);
        let month = format!("{:02}", self.key.month);
        PathBuf::from(&year)
            .join(&month)
            .join(format!("Sage_Log_{}-{}.{}", year, month, ext))
    }
}

/// Renders and stores month grids. Errors are passed to the caller untouched.
pub trait ReportSink {
    fn write_month(&mut self, file: &MonthFile, grid: &ReportGrid) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthReport {
    pub grid: ReportGrid,
    pub stats: MonthStats,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub stats: RunStats,
    pub months: BTreeMap<MonthKey, MonthReport>,
}

impl RunReport {
    pub fn grid(&self, key: MonthKey) -> Option<&ReportGrid> {
        self.months.get(&key).map(|m| &m.grid)
    }
}

/// Classify -> group by month -> lay out, then hand each month to a sink.
pub struct ReportUseCase<'a> {
    config: &'a AppConfig,
}

impl<'a> ReportUseCase<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    /// Builds every month's grid without writing anything.
    pub fn build(&self, records: &[RawRecord]) -> Result<RunReport, ComplianceError> {
        if records.is_empty() {
            return Err(ComplianceError::EmptyInput(None));
        }

        let classifier = EntryClassifier::new(&self.config.classifier, &self.config.fields);
        let entries = classifier.classify_all(records);
        let total_entries = entries.len();
        debug!(raw = records.len(), classified = total_entries, "classified records");

        let months: BTreeMap<MonthKey, MonthReport> = group_by_month(entries)
            .into_iter()
            .map(|(key, group)| {
                let grid = build_month_grid(&group.entries, key, &self.config.report);
                let stats = MonthStats::from(&group);
                (key, MonthReport { grid, stats })
            })
            .collect();

        Ok(RunReport {
            stats: RunStats {
                total_entries,
                files_created: 0,
                months_found: months.keys().map(|k| k.to_string()).collect(),
            },
            months,
        })
    }

    /// Builds the grids and passes each one to `sink`, oldest month first.
    pub fn run<S: ReportSink + ?Sized>(
        &self,
        records: &[RawRecord],
        sink: &mut S,
    ) -> Result<RunReport, ComplianceError> {
        let mut report = self.build(records)?;

        for (key, month) in &report.months {
            let file = MonthFile::new(*key);
            sink.write_month(&file, &month.grid)?;
            report.stats.files_created += 1;
        }

        info!(
            entries = report.stats.total_entries,
            files = report.stats.files_created,
            months = ?report.stats.months_found,
            "compliance report complete"
        );
        Ok(report)
    }
}
