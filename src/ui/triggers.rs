//! Triggers view: buy and sell price tables with cooldown status.

use chrono::{Local, Utc};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::api::wire::Side;
use crate::app::{App, InputTarget};

/// Render the Triggers view: one table per side, selected side highlighted.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);

    render_side(frame, app, chunks[0], Side::Buy);
    render_side(frame, app, chunks[1], Side::Sell);
}

fn render_side(frame: &mut Frame, app: &App, area: Rect, side: Side) {
    let now = Utc::now();
    let is_current = app.trigger_side == side;

    let empty = [];
    let (triggers, reset_minutes) = match &app.dashboard {
        Some(d) => (d.triggers(side), d.reset_minutes),
        None => (&empty[..], 0),
    };

    let side_color = match side {
        Side::Buy => app.theme.buy,
        Side::Sell => app.theme.sell,
    };

    let header = Row::new(vec!["Price", "Last Triggered", "Status"])
        .height(1)
        .style(app.theme.header);

    let rows: Vec<Row> = triggers
        .iter()
        .map(|trigger| {
            let status = trigger.status_at(reset_minutes, now);
            let last = trigger
                .last_triggered
                .map(|dt| {
                    dt.with_timezone(&Local)
                        .format("%Y-%m-%d %H:%M:%S")
                        .to_string()
                })
                .unwrap_or_else(|| "-".to_string());

            Row::new(vec![
                Cell::from(format!("{:.8}", trigger.price))
                    .style(Style::default().fg(side_color)),
                Cell::from(last),
                Cell::from(status.label()).style(app.theme.status_style(&status)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(12),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ];

    // An open price input shows up in the title, filter-style
    let input_info = match &app.input {
        Some(input) if input.target == InputTarget::TriggerPrice(side) => {
            format!(" +{}_", input.buffer)
        }
        _ => String::new(),
    };

    let marker = if is_current { "▶" } else { " " };
    let title = format!(
        " {} {} ({}){} ",
        marker,
        side.label(),
        triggers.len(),
        input_info
    );

    let border_style = if is_current {
        Style::default().fg(app.theme.highlight)
    } else {
        Style::default().fg(app.theme.border)
    };

    let mut table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(border_style),
    );

    if is_current {
        table = table
            .row_highlight_style(app.theme.selected)
            .highlight_symbol("▶ ");
    }

    let mut state = TableState::default();
    if is_current && !triggers.is_empty() {
        state.select(Some(app.selected_trigger.min(triggers.len() - 1)));
    }

    frame.render_stateful_widget(table, area, &mut state);

    // Hint line when the side has no triggers yet
    if triggers.is_empty() && is_current {
        let hint = ratatui::widgets::Paragraph::new("  a:add a price")
            .style(Style::default().add_modifier(Modifier::DIM));
        let inner = Rect {
            x: area.x + 1,
            y: area.y + 2,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(hint, inner);
    }
}
