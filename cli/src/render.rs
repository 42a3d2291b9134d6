use eascheck_core::{CellStyle, GridCell, MonthKey, MonthReport, MonthStats, ReportGrid, RunStats};
use std::collections::BTreeMap;
use tabled::builder::Builder;
use tabled::settings::object::Cell;
use tabled::settings::{Alignment, Color, Style, Width};
use tabled::{Table, Tabled};
use unicode_width::UnicodeWidthStr;

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "RMT Rx")]
    rmt_received: usize,
    #[tabled(rename = "RMT Tx")]
    rmt_sent: usize,
    #[tabled(rename = "RMT Late/No RX")]
    rmt_failures: usize,
    #[tabled(rename = "RWT Rx")]
    rwt_received: usize,
    #[tabled(rename = "RWT Tx")]
    rwt_sent: usize,
    #[tabled(rename = "RWT Missing")]
    rwt_missing: usize,
}

impl From<&MonthStats> for SummaryRow {
    fn from(s: &MonthStats) -> Self {
        Self {
            month: format!("{:04}/{:02}", s.year, s.month),
            rmt_received: s.rmt_received,
            rmt_sent: s.rmt_sent,
            rmt_failures: s.rmt_failures(),
            rwt_received: s.rwt_received,
            rwt_sent: s.rwt_sent,
            rwt_missing: s.rwt_missing,
        }
    }
}

fn style_color(style: CellStyle) -> Option<Color> {
    match style {
        CellStyle::Title => Some(Color::FG_MAGENTA),
        CellStyle::SectionHeader => Some(Color::FG_CYAN),
        CellStyle::Success => Some(Color::FG_GREEN),
        CellStyle::Failure => Some(Color::FG_RED),
        CellStyle::Warning => Some(Color::FG_YELLOW),
        CellStyle::Cell | CellStyle::Centered => None,
    }
}

/// Rows holding a single cell (titles, prompts, placeholders) are free text
/// and keep their full width.
fn is_free_text(row: &[Option<&GridCell>]) -> bool {
    row.iter().filter(|c| c.is_some()).count() <= 1
}

/// Width cap for `(row, col)`, or `None` when the cell is never truncated.
fn cell_cap(grid: &ReportGrid, row: &[Option<&GridCell>], col: usize) -> Option<usize> {
    if is_free_text(row) {
        return None;
    }
    grid.column_widths.get(col).map(|w| *w as usize).filter(|w| *w > 0)
}

/// Renders a month grid as a bordered terminal table.
pub fn render_grid(grid: &ReportGrid, color: bool) -> String {
    let matrix = grid.to_matrix();
    let mut builder = Builder::default();
    for row in &matrix {
        builder.push_record(row.iter().map(|c| c.map(|c| c.value.clone()).unwrap_or_default()));
    }

    let mut table = builder.build();
    table.with(Style::modern());

    for (r, row) in matrix.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let Some(cell) = cell else { continue };
            if let Some(cap) = cell_cap(grid, row, c) {
                if cell.value.width() > cap {
                    table.modify(Cell::new(r, c), Width::truncate(cap).suffix("…"));
                }
            }
            if matches!(cell.style, CellStyle::Centered | CellStyle::Success | CellStyle::Failure | CellStyle::Warning) {
                table.modify(Cell::new(r, c), Alignment::center());
            }
            if color {
                if let Some(fg) = style_color(cell.style) {
                    table.modify(Cell::new(r, c), fg);
                }
            }
        }
    }

    table.to_string()
}

pub fn render_summary(months: &BTreeMap<MonthKey, MonthReport>, stats: &RunStats) -> String {
    let rows: Vec<SummaryRow> = months.values().map(|m| SummaryRow::from(&m.stats)).collect();
    let mut out = String::new();
    if !rows.is_empty() {
        let mut table = Table::new(rows);
        table.with(Style::modern());
        out.push_str(&table.to_string());
        out.push('\n');
    }
    out.push_str(&format!(
        "Entries: {}  Files: {}  Months: {}",
        stats.total_entries,
        stats.files_created,
        if stats.months_found.is_empty() {
            "-".to_string()
        } else {
            stats.months_found.join(", ")
        }
    ));
    out
}
