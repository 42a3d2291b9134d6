//! Lays one month of entries out as a [`ReportGrid`].
//!
//! Sections, top to bottom: title block, RMT received, RMT transmitted,
//! RWT received matrix (source x week), RWT transmitted, weekly sign-off.
//! Each section is a title row, a column header row, data rows and any
//! prompt rows, followed by one blank row.

use crate::config::ReportOptions;
use crate::model::entry::{Direction, LogEntry, TestKind};
use crate::model::grid::{CellStyle, ReportGrid};
use crate::model::month::MonthKey;
use crate::service::aggregator::{find_rwt, rwt_received_sources, select_sorted, weeks_of};
use crate::service::compliance::check_compliance;
use crate::time::{format_date_time, format_short_date, format_time, format_week_range, month_name, week_start};
use tracing::debug;

pub const RMT_RECEIVED_TITLE: &str = "RMT Received";
pub const RMT_SENT_TITLE: &str = "RMT Transmitted";
pub const RWT_RECEIVED_TITLE: &str = "RWT Received";
pub const RWT_SENT_TITLE: &str = "RWT Transmitted";
pub const SIGN_OFF_TITLE: &str = "Weekly Sign-Off";

pub const NO_RMT_RECEIVED: &str = "(No RMT Received)";
pub const NO_RMT_SENT: &str = "(No RMT Sent)";
pub const NO_RWT_DATA: &str = "No RWT Received Data";
pub const MISSING: &str = "MISSING";
pub const MATRIX_CORNER: &str = "LP or NWS";

pub const RMT_RECEIVED_PROMPT: &str = "Explanation for RMT not received:";
pub const RMT_SENT_PROMPT: &str = "Explanation for RMT not transmitted within 1 hour:";
pub const RWT_FAILURE_PROMPT: &str = "Explanation of RWT Failures:";
pub const OTHER_INFO_PROMPT: &str = "Other Information:";

/// Appends rows top to bottom.
struct RowWriter {
    grid: ReportGrid,
    row: usize,
}

impl RowWriter {
    fn line<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = (S, CellStyle)>) {
        for (col, (value, style)) in cells.into_iter().enumerate() {
            self.grid.set(self.row, col, value, style);
        }
        self.row += 1;
    }

    fn single(&mut self, value: impl Into<String>, style: CellStyle) {
        let value: String = value.into();
        self.line([(value, style)]);
    }

    fn header(&mut self, labels: &[&str]) {
        self.line(labels.iter().map(|l| (*l, CellStyle::SectionHeader)));
    }

    fn blank(&mut self) {
        self.row += 1;
    }
}

pub fn build_month_grid(entries: &[LogEntry], key: MonthKey, options: &ReportOptions) -> ReportGrid {
    let mut w = RowWriter {
        grid: ReportGrid::new(key.sheet_name()),
        row: 0,
    };

    let rmt_received = select_sorted(entries, Direction::Received, TestKind::Rmt);
    let rmt_sent = select_sorted(entries, Direction::Sent, TestKind::Rmt);
    let rwt_sent = select_sorted(entries, Direction::Sent, TestKind::Rwt);
    let weeks = weeks_of(entries);
    let sources = rwt_received_sources(entries);

    // Title block
    w.single(options.title.as_str(), CellStyle::Title);
    w.single(options.station_placeholder.as_str(), CellStyle::Cell);
    w.single(
        format!("Month/Year: {} {}", month_name(key.month), key.year),
        CellStyle::Cell,
    );
    w.blank();

    // RMT received
    w.single(RMT_RECEIVED_TITLE, CellStyle::SectionHeader);
    w.header(&["Source", "Date", "Time"]);
    if rmt_received.is_empty() {
        w.single(NO_RMT_RECEIVED, CellStyle::Cell);
    }
    for rx in &rmt_received {
        w.line([
            (rx.source.clone(), CellStyle::Cell),
            (format_short_date(rx.timestamp), CellStyle::Centered),
            (format_time(rx.timestamp), CellStyle::Centered),
        ]);
    }
    w.single(RMT_RECEIVED_PROMPT, CellStyle::Cell);
    w.blank();

    // RMT transmitted
    w.single(RMT_SENT_TITLE, CellStyle::SectionHeader);
    w.header(&["Date", "Time", "Within 1 Hour"]);
    if rmt_sent.is_empty() {
        w.single(NO_RMT_SENT, CellStyle::Cell);
    }
    for tx in &rmt_sent {
        let (tag, style) = check_compliance(tx, rmt_received.iter().copied()).tag();
        w.line([
            (format_short_date(tx.timestamp), CellStyle::Centered),
            (format_time(tx.timestamp), CellStyle::Centered),
            (tag.to_string(), style),
        ]);
    }
    w.single(RMT_SENT_PROMPT, CellStyle::Cell);
    w.blank();

    // RWT received matrix
    w.single(RWT_RECEIVED_TITLE, CellStyle::SectionHeader);
    if sources.is_empty() {
        w.single(NO_RWT_DATA, CellStyle::Cell);
    } else {
        let mut header = vec![(MATRIX_CORNER.to_string(), CellStyle::SectionHeader)];
        header.extend(weeks.iter().map(|wk| (format_week_range(*wk), CellStyle::SectionHeader)));
        w.line(header);

        for source in &sources {
            let mut row = vec![(source.clone(), CellStyle::Cell)];
            for week in &weeks {
                row.push(match find_rwt(entries, source, *week) {
                    Some(rx) => (format_date_time(rx.timestamp), CellStyle::Centered),
                    None => (MISSING.to_string(), CellStyle::Failure),
                });
            }
            w.line(row);
        }
    }
    w.blank();

    // RWT transmitted
    w.single(RWT_SENT_TITLE, CellStyle::SectionHeader);
    w.header(&["Week", "Date", "Time"]);
    for tx in &rwt_sent {
        w.line([
            (format_week_range(week_start(tx.timestamp)), CellStyle::Cell),
            (format_short_date(tx.timestamp), CellStyle::Centered),
            (format_time(tx.timestamp), CellStyle::Centered),
        ]);
    }
    w.single(RWT_FAILURE_PROMPT, CellStyle::Cell);
    w.single(OTHER_INFO_PROMPT, CellStyle::Cell);
    w.blank();

    // Weekly sign-off
    w.single(SIGN_OFF_TITLE, CellStyle::SectionHeader);
    w.header(&["Week", "Signature"]);
    for week in &weeks {
        w.line([
            (format_week_range(*week), CellStyle::Cell),
            (options.signature_placeholder.clone(), CellStyle::Cell),
        ]);
    }

    let mut grid = w.grid;
    let columns = grid.column_count().max(1);
    grid.column_widths = std::iter::once(options.first_column_width)
        .chain(std::iter::repeat(options.column_width).take(columns - 1))
        .collect();

    debug!(
        month = %key,
        rows = grid.row_count(),
        weeks = weeks.len(),
        sources = sources.len(),
        "laid out month grid"
    );
    grid
}
