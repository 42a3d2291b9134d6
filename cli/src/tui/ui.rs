use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use eascheck_core::{CellStyle, MonthReport};

use crate::tui::app::ReportBrowser;

struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    ok: Color,
    fail: Color,
    warn: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    ok: Color::Green,
    fail: Color::Red,
    warn: Color::Yellow,
};

fn cell_style(style: CellStyle) -> Style {
    match style {
        CellStyle::Title => Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
        CellStyle::SectionHeader => Style::default().fg(THEME.primary),
        CellStyle::Success => Style::default().fg(THEME.ok).add_modifier(Modifier::BOLD),
        CellStyle::Failure => Style::default().fg(THEME.fail).add_modifier(Modifier::BOLD),
        CellStyle::Warning => Style::default().fg(THEME.warn),
        CellStyle::Cell | CellStyle::Centered => Style::default().fg(THEME.text),
    }
}

pub fn draw(frame: &mut Frame, app: &ReportBrowser) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Grid + summary
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let Some((key, month)) = app.current_month() else {
        frame.render_widget(
            Paragraph::new("No reportable RWT/RMT entries").alignment(Alignment::Center),
            main_layout[1],
        );
        return;
    };

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(1), Constraint::Length(24)])
        .split(main_layout[0]);

    let app_title = Paragraph::new(Span::styled(
        "EAS COMPLIANCE",
        Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(app_title, header_layout[0]);

    let nav = Line::from(vec![
        Span::styled(" < ", Style::default().fg(if app.has_previous() { THEME.text } else { THEME.muted })),
        Span::styled(format!(" {} ", key), Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)),
        Span::styled(" > ", Style::default().fg(if app.has_next() { THEME.text } else { THEME.muted })),
    ]);
    frame.render_widget(Paragraph::new(nav).alignment(Alignment::Right), header_layout[2]);
    frame.render_widget(
        Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(THEME.muted)),
        main_layout[0],
    );

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(78), Constraint::Length(1), Constraint::Percentage(22)])
        .split(main_layout[1]);

    draw_grid(frame, month, app.scroll, content[0]);
    draw_summary(frame, month, content[2]);

    let help = Line::from(vec![
        Span::styled("MONTH: ", Style::default().fg(THEME.muted)),
        Span::styled("←/→ ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("SCROLL: ", Style::default().fg(THEME.muted)),
        Span::styled("↑/↓ ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ]);
    frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), main_layout[2]);
}

fn draw_grid(frame: &mut Frame, month: &MonthReport, scroll: usize, area: Rect) {
    let grid = &month.grid;
    let rows: Vec<Row> = grid
        .to_matrix()
        .into_iter()
        .skip(scroll)
        .map(|cells| {
            Row::new(cells.into_iter().map(|cell| match cell {
                Some(c) => Cell::from(Span::styled(c.value.clone(), cell_style(c.style))),
                None => Cell::from(""),
            }))
        })
        .collect();

    let widths: Vec<Constraint> = grid
        .column_widths
        .iter()
        .map(|w| Constraint::Length(*w))
        .collect();

    let table = Table::new(rows, widths).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME.muted))
            .title(format!(" {} ", grid.sheet_name)),
    );
    frame.render_widget(table, area);
}

fn draw_summary(frame: &mut Frame, month: &MonthReport, area: Rect) {
    let s = &month.stats;
    let count_line = |label: &str, value: usize, color: Color| {
        Line::from(vec![
            Span::styled(format!("{:<13}", label), Style::default().fg(THEME.muted)),
            Span::styled(value.to_string(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ])
    };
    let flag = |value: usize| if value > 0 { THEME.fail } else { THEME.ok };

    let text = vec![
        Line::from(Span::styled("Overview", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        count_line("RMT Rx:", s.rmt_received, THEME.text),
        count_line("RMT Tx:", s.rmt_sent, THEME.text),
        count_line("RMT failed:", s.rmt_failures(), flag(s.rmt_failures())),
        Line::from(""),
        count_line("RWT Rx:", s.rwt_received, THEME.text),
        count_line("RWT Tx:", s.rwt_sent, THEME.text),
        count_line("RWT missing:", s.rwt_missing, flag(s.rwt_missing)),
    ];

    let panel = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME.muted))
            .title(" Summary "),
    );
    frame.render_widget(panel, area);
}
