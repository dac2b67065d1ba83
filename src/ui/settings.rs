//! Settings view: simulated USD amount and the trigger reset interval.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::{App, InputTarget};

/// Render the Settings view: two server-side values, edited inline.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(6), Constraint::Min(0)]).split(area);

    let (usd, reset) = match &app.dashboard {
        Some(d) => (format!("${}", d.usd_amount), format!("{} min", d.reset_minutes)),
        None => ("-".to_string(), "-".to_string()),
    };

    // An open editor replaces the value cell with its buffer
    let display_value = |target: InputTarget, current: String| match &app.input {
        Some(input) if input.target == target => format!("{}_", input.buffer),
        _ => current,
    };

    let header = Row::new(vec!["Setting", "Value"])
        .height(1)
        .style(app.theme.header);

    let rows = vec![
        Row::new(vec![
            Cell::from("Simulated USD amount"),
            Cell::from(display_value(InputTarget::UsdAmount, usd)),
        ]),
        Row::new(vec![
            Cell::from("Alert reset minutes"),
            Cell::from(display_value(InputTarget::ResetMinutes, reset)),
        ]),
    ];

    let widths = [Constraint::Fill(2), Constraint::Fill(1)];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(" Settings ")
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_setting.min(1)));

    frame.render_stateful_widget(table, area, &mut state);

    let notes = vec![
        Line::from(Span::styled(
            " The USD amount sizes the simulated quotes; changing it restarts",
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(Span::styled(
            " the price history. Reset minutes is the cooldown after a trigger",
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(Span::styled(
            " fires; 0 means a fired trigger stays off.",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    frame.render_widget(Paragraph::new(notes), chunks[1]);
}
