use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::snapshot::Snapshot;
use crate::game::GamePhase;

const ACCENT: Color = Color::Rgb(0xb1, 0x41, 0xf1);
const INFO: Color = Color::Rgb(0x58, 0xc7, 0xe0);

/// Render the whole scoreboard: table on the left, entry panel on the right.
pub fn render(frame: &mut Frame, snapshot: &Snapshot, message: &Option<String>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(19),   // Table + entry panel
            Constraint::Length(4), // Controls
        ])
        .split(frame.area());

    let table_width = table_widths(snapshot).iter().sum::<u16>()
        + snapshot.headers.len() as u16
        + 2;
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(table_width), Constraint::Min(24)])
        .split(chunks[0]);

    render_table(frame, snapshot, main[0]);
    render_entry_panel(frame, snapshot, message, main[1]);
    render_controls(frame, chunks[1]);
}

fn table_widths(snapshot: &Snapshot) -> Vec<u16> {
    snapshot
        .headers
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if i == 0 {
                5
            } else {
                name.chars().count().max(4) as u16
            }
        })
        .collect()
}

fn render_table(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let header = Row::new(
        snapshot
            .headers
            .iter()
            .map(|h| Cell::from(h.as_str()).style(Style::default().add_modifier(Modifier::BOLD))),
    )
    .style(Style::default().fg(Color::White))
    .bottom_margin(1);

    let rows = snapshot.rows.iter().map(|row| {
        let mut cells = vec![Cell::from(row.label.as_str())];
        cells.extend(row.cells.iter().map(|c| Cell::from(c.as_str())));
        Row::new(cells)
    });

    let mut state = TableState::default();
    if snapshot.phase == GamePhase::InProgress {
        state.select(Some(snapshot.current_row()));
    }

    let widths: Vec<Constraint> = table_widths(snapshot)
        .into_iter()
        .map(Constraint::Length)
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(Style::default().fg(Color::Black).bg(ACCENT))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT))
                .title("Ace to King"),
        );

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_entry_panel(
    frame: &mut Frame,
    snapshot: &Snapshot,
    message: &Option<String>,
    area: Rect,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Info
            Constraint::Min(3),    // Players
            Constraint::Length(3), // Input
            Constraint::Length(3), // Message
        ])
        .split(area);

    render_info(frame, snapshot, rows[0]);
    render_entries(frame, snapshot, rows[1]);
    render_input(frame, snapshot, rows[2]);
    render_message(frame, message, rows[3]);
}

fn render_info(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let status = match snapshot.phase {
        GamePhase::InProgress => Span::styled("In progress", Style::default().fg(Color::Green)),
        GamePhase::Complete => Span::styled(
            "Game over",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    };

    let lines = vec![
        Line::from(format!("Current card: {}", snapshot.current_card)),
        Line::from(format!(
            "Round: {}/{}",
            snapshot.round_number, snapshot.round_count
        )),
        Line::from(format!(
            "Dealer: {}",
            snapshot.dealer.as_deref().unwrap_or("-")
        )),
        Line::from(vec![Span::raw("Status: "), status]),
    ];

    let info = Paragraph::new(lines)
        .style(Style::default().fg(INFO))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    frame.render_widget(info, area);
}

fn render_entries(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let lines: Vec<Line> = snapshot
        .entries
        .iter()
        .map(|entry| {
            let cursor = if entry.focused { ">" } else { " " };
            let score = entry
                .score
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            let text = format!("{} {} - {}", cursor, entry.name, score);
            if entry.focused {
                Line::from(Span::styled(
                    text,
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(text)
            }
        })
        .collect();

    let entries = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Update scores"),
    );
    frame.render_widget(entries, area);
}

fn render_input(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let line = if snapshot.input.is_empty() {
        Line::from(Span::styled(
            "Enter a score",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::raw(snapshot.input.as_str()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    };

    let input = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Score"));
    frame.render_widget(input, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line1 = Line::from("↑/↓: Player  |  0-9: Score  |  Enter: Save  |  n: Next round");
    let line2 = Line::from("Backspace: Delete digit  |  q / Ctrl+C: Quit");

    let controls = Paragraph::new(vec![line1, line2])
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
