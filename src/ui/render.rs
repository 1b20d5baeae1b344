use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::LogHistory;

/// Height of the log panel including its border.
const LOG_PANEL_HEIGHT: u16 = 10;

fn grid_paragraph<'a>(rows: Vec<String>, title: &'a str) -> Paragraph<'a> {
    let text: Vec<Line> = rows.into_iter().map(|s| Line::from(Span::raw(s))).collect();
    Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(Color::White).bg(Color::Black))
}

pub fn draw_ui(
    f: &mut Frame,
    belief_rows: Vec<String>,
    world_rows: Vec<String>,
    hud_info: &str,
    logs: &LogHistory,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                // HUD
            Constraint::Min(0),                   // Maps
            Constraint::Length(LOG_PANEL_HEIGHT), // Log
        ])
        .split(f.area());

    let hud = Paragraph::new(Span::styled(
        hud_info,
        Style::default().add_modifier(Modifier::REVERSED),
    ));
    f.render_widget(hud, chunks[0]);

    let maps = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    f.render_widget(grid_paragraph(belief_rows, "Believed map"), maps[0]);
    f.render_widget(grid_paragraph(world_rows, "World"), maps[1]);

    let visible = usize::from(LOG_PANEL_HEIGHT.saturating_sub(2));
    let lines: Vec<Line> = logs.tail(visible).map(Line::from).collect();
    let log = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Log"));
    f.render_widget(log, chunks[2]);
}
