//! Tokens view: configured token alerts.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::api::wire::Condition;
use crate::app::App;

/// Render the Tokens view as a table of configured alerts.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Token Alerts ({}) ", app.alerts.len()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if app.alerts.is_empty() {
        let paragraph = Paragraph::new("No token alerts configured. a:add")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        "Ticker",
        "Pair",
        "Type",
        "Condition",
        "Value",
        "Channel",
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = app
        .alerts
        .iter()
        .map(|alert| {
            let condition_style = match alert.condition {
                Condition::Above => Style::default().fg(app.theme.buy),
                Condition::Below => Style::default().fg(app.theme.sell),
            };

            Row::new(vec![
                Cell::from(alert.ticker.clone())
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(alert.pair.clone()),
                Cell::from(alert.kind.label()),
                Cell::from(alert.condition.label()).style(condition_style),
                Cell::from(format!("{}", alert.value)),
                Cell::from(alert.channel_id.clone()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(1),
        Constraint::Fill(2),
        Constraint::Min(10),
        Constraint::Min(9),
        Constraint::Fill(2),
        Constraint::Fill(2),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_alert.min(app.alerts.len() - 1)));

    frame.render_stateful_widget(table, area, &mut state);
}
