use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use eascheck_core::{MonthFile, ReportGrid, ReportSink};
use tracing::info;

use crate::render::render_grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Grid with style tags, for a spreadsheet renderer.
    Json,
    /// Plain-text table.
    Text,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Text => "txt",
        }
    }
}

/// Writes each month under `<root>/<year>/<MM>/Sage_Log_<year>-<MM>.<ext>`.
pub struct DirectorySink {
    root: PathBuf,
    format: ExportFormat,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>, format: ExportFormat) -> Self {
        Self {
            root: root.into(),
            format,
            written: Vec::new(),
        }
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write_file(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))
    }
}

impl ReportSink for DirectorySink {
    fn write_month(&mut self, file: &MonthFile, grid: &ReportGrid) -> Result<()> {
        let path = self.root.join(file.archive_path(self.format.extension()));
        let content = match self.format {
            ExportFormat::Json => serde_json::to_string_pretty(grid)?,
            ExportFormat::Text => format!("{}\n{}\n", file.sheet_name, render_grid(grid, false)),
        };
        Self::write_file(&path, &content)?;
        info!(month = %file.key, path = %path.display(), "wrote month report");
        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eascheck_core::{CellStyle, MonthKey};
    use tempfile::tempdir;

    fn grid() -> ReportGrid {
        let mut grid = ReportGrid::new("03-2024");
        grid.set(0, 0, "EAS Compliance Log", CellStyle::Title);
        grid
    }

    #[test]
    fn test_writes_json_under_archive_path() {
        let dir = tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path(), ExportFormat::Json);
        sink.write_month(&MonthFile::new(MonthKey::new(2024, 3)), &grid()).unwrap();

        let path = dir.path().join("2024").join("03").join("Sage_Log_2024-03.json");
        assert_eq!(sink.written(), &[path.clone()]);

        let back: ReportGrid = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(back, grid());
    }

    #[test]
    fn test_writes_text() {
        let dir = tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path(), ExportFormat::Text);
        sink.write_month(&MonthFile::new(MonthKey::new(2023, 12)), &grid()).unwrap();

        let path = dir.path().join("2023").join("12").join("Sage_Log_2023-12.txt");
        let text = fs::read_to_string(path).unwrap();
        assert!(text.starts_with("12-2023\n"));
        assert!(text.contains("EAS Compliance"));
    }
}
