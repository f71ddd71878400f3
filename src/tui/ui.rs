// UI rendering logic
//
// All drawing happens here, once per frame. The renderer reads the App
// state and rebuilds every widget from scratch - the table is fully
// recreated from the country list on each draw, so display order is
// always exactly the list order.

use super::app::{App, View};
use super::modal::Modal;
use crate::config::VERSION;
use crate::countries::Country;
use crate::logging::LogLevel;
use crate::sort::SortKey;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table},
    Frame,
};
use unicode_width::UnicodeWidthChar;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    // Split the terminal into four vertical sections:
    // - Title bar with the sort selector (3 lines fixed)
    // - Main content (fills remaining space)
    // - Latest log line (1 line)
    // - Status bar (2 lines, top border)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(f.area());

    render_title(f, chunks[0], app);

    match app.view {
        View::Table => render_table(f, chunks[1], app),
        View::Logs => render_logs(f, chunks[1], app),
    }

    render_log_line(f, chunks[2], app);
    render_status(f, chunks[3], app);

    // Overlays render last, on top of everything. The recorded modal area
    // is what mouse hit-testing uses to detect outside clicks.
    app.modal_area = Rect::default();
    match app.modal.clone() {
        Some(Modal::Details(idx)) => render_details_modal(f, app, idx),
        Some(Modal::Help) => render_help_modal(f, app),
        None => {}
    }
}

/// Title bar: app name plus the sort selector with the active key marked
fn render_title(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            format!(" countryscope v{} ", VERSION),
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ sort: ", Style::default().fg(app.theme.fg)),
    ];

    for key in SortKey::all() {
        let style = if *key == app.sort_key {
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(app.theme.border)
        };
        spans.push(Span::styled(format!(" {} ", key.label()), style));
    }

    if app.loading > 0 {
        spans.push(Span::styled(
            "│ ⏳ loading…",
            Style::default().fg(app.theme.status_bar),
        ));
    }

    let title = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );

    f.render_widget(title, area);
}

/// Build one table row per country, in list order
pub fn build_rows(countries: &[Country]) -> Vec<Row<'_>> {
    countries
        .iter()
        .map(|country| {
            Row::new(vec![
                Cell::from(country.flag.as_str()),
                Cell::from(country.name.official.as_str()),
                Cell::from(country.region.as_str()),
                // Raw capital field: comma-joined, empty when absent
                Cell::from(country.capital_display()),
            ])
        })
        .collect()
}

/// Render the country table
fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header = Row::new(vec!["", "Name", "Region", "Capital"]).style(
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    );

    let widths = [
        Constraint::Length(4),
        Constraint::Percentage(42),
        Constraint::Percentage(20),
        Constraint::Percentage(32),
    ];

    let title = format!(" Countries ({}) ", app.countries.len());

    let table = Table::new(build_rows(&app.countries), widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border_focused))
                .title(title),
        )
        .row_highlight_style(
            Style::default()
                .bg(app.theme.selected_bg)
                .fg(app.theme.selected_fg),
        )
        .highlight_symbol("▶ ");

    // Record where the data rows live (inside the border, below the
    // header) so mouse clicks can be mapped back to row indices
    app.table_rows_area = Rect {
        x: area.x + 1,
        y: area.y + 2,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(3),
    };

    f.render_stateful_widget(table, area, &mut app.table_state);
}

/// Render the logs view: the full captured diagnostics buffer
fn render_logs(f: &mut Frame, area: Rect, app: &App) {
    let entries = app.log_buffer.get_all();
    let height = area.height.saturating_sub(2) as usize;

    // Show the tail of the buffer, shifted up by the scroll offset
    let end = entries.len().saturating_sub(app.logs_scroll);
    let start = end.saturating_sub(height);

    let items: Vec<ListItem> = entries[start..end]
        .iter()
        .map(|entry| {
            let color = match entry.level {
                LogLevel::Error => app.theme.log_error,
                LogLevel::Warn => app.theme.log_warn,
                LogLevel::Info => app.theme.log_info,
                LogLevel::Debug => app.theme.log_debug,
                LogLevel::Trace => app.theme.log_trace,
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", entry.timestamp.format("%H:%M:%S")),
                    Style::default().fg(app.theme.border),
                ),
                Span::styled(format!("{:<5} ", entry.level.as_str()), Style::default().fg(color)),
                Span::styled(format!("{} ", entry.target), Style::default().fg(app.theme.border)),
                Span::styled(entry.message.clone(), Style::default().fg(app.theme.fg)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border_focused))
            .title(format!(" Logs ({}) ", entries.len()))
            .title_bottom(Line::from(" ↑↓:scroll  L/Esc:back ").centered()),
    );

    f.render_widget(list, area);
}

/// Single line showing the newest captured log entry
fn render_log_line(f: &mut Frame, area: Rect, app: &App) {
    let Some(entry) = app.log_buffer.latest() else {
        return;
    };

    let color = match entry.level {
        LogLevel::Error => app.theme.log_error,
        LogLevel::Warn => app.theme.log_warn,
        LogLevel::Info => app.theme.log_info,
        LogLevel::Debug => app.theme.log_debug,
        LogLevel::Trace => app.theme.log_trace,
    };

    let text = truncate_to_width(
        &format!(" {} {}", entry.level.as_str(), entry.message),
        area.width as usize,
    );

    f.render_widget(Paragraph::new(text).style(Style::default().fg(color)), area);
}

/// Status bar with counts and key hints
fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let status_text = format!(
        " {} countries │ sort: {} │ theme: {} │ q:quit ?:help ↑↓:rows Enter:details 1/2/3:sort r:reload L:logs",
        app.countries.len(),
        app.sort_key.label(),
        app.theme_kind.name(),
    );

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}

/// Calculate centered rect for modal dialogs
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Render the country detail overlay
fn render_details_modal(f: &mut Frame, app: &mut App, country_index: usize) {
    let Some(country) = app.countries.get(country_index) else {
        // Row vanished under the modal (list replaced by a reload with
        // fewer records) - draw nothing this frame
        return;
    };

    let label_style = Style::default()
        .fg(app.theme.accent)
        .add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(app.theme.fg);
    let field = |label: &str, value: String| -> Line {
        Line::from(vec![
            Span::styled(format!("  {:<12}", label), label_style),
            Span::styled(value, value_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("{} {}", country.flag, country.name.official),
                Style::default()
                    .fg(app.theme.title)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::raw(""),
        field("Region:", country.region.clone()),
        field("Subregion:", country.subregion.clone()),
        field("Capital:", country.capital_display()),
        field("Population:", country.population.to_string()),
        field("Area:", format!("{} km²", country.area)),
        Line::raw(""),
        Line::from(vec![
            Span::styled(format!("  {}: ", country.flag_alt()), label_style),
            Span::styled(country.flags.svg.clone(), Style::default().fg(app.theme.border)),
        ]),
    ]);

    let frame_area = f.area();
    let width = (frame_area.width * 70 / 100).clamp(40, 90);
    let height = 13;
    let area = centered_rect(width, height, frame_area);
    app.modal_area = area;

    // Clear the area behind the modal
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(app.theme.bg))
        .scroll((app.detail_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border_focused))
                .title(" Country Details ")
                .title_bottom(Line::from(" Esc:close  ↑↓:scroll  y:copy ").centered()),
        );

    f.render_widget(paragraph, area);
}

/// Render the help overlay
fn render_help_modal(f: &mut Frame, app: &mut App) {
    let key_style = Style::default().fg(app.theme.accent);
    let desc_style = Style::default().fg(app.theme.fg);
    let header_style = Style::default()
        .fg(app.theme.title)
        .add_modifier(Modifier::BOLD);

    // Helper to create a keybind line: "    key         description"
    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Navigation", header_style)),
        kb("↑/↓, j/k", "Move row selection"),
        kb("Home/End", "Jump to first/last row"),
        kb("Enter", "Open country details"),
        kb("Esc", "Close overlay / go back"),
        Line::raw(""),
        Line::from(Span::styled("  Sorting", header_style)),
        kb("1/2/3", "Sort by region / name / capital"),
        kb("s, Tab", "Cycle sort key"),
        kb("r", "Reload the country list"),
        Line::raw(""),
        Line::from(Span::styled("  Mouse", header_style)),
        kb("Click row", "Open country details"),
        kb("Click out", "Dismiss the overlay"),
        kb("Scroll", "Move selection / scroll details"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("t", "Cycle theme"),
        kb("L", "Toggle logs view"),
        kb("y", "Copy details (in overlay)"),
        kb("?", "Toggle this help"),
        kb("q", "Quit"),
    ]);

    let area = centered_rect(46, 24, f.area());
    app.modal_area = area;

    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(app.theme.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border_focused))
                .title(" Help ")
                .title_bottom(Line::from(" Press ? or Esc to close ").centered()),
        );

    f.render_widget(paragraph, area);
}

/// Truncate a string to the given display width
fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        width += ch_width;
        out.push(ch);
    }
    out
}
