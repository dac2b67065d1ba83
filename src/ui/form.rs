//! Alert creation form overlay.
//!
//! Displays a modal overlay for building a new token alert: contract
//! lookup, pair/type/condition choices, threshold value and notification
//! channel.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::form::{AlertForm, FormField};

/// Minimum width required for the form overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 44;
/// Minimum height required for the form overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 14;

/// Render the alert form as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Skip rendering if terminal is too small for the overlay
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(ref form) = app.form else {
        return;
    };

    let overlay_width = 60u16.min(area.width.saturating_sub(4));
    let overlay_height = MIN_OVERLAY_HEIGHT;
    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let mut lines = vec![
        text_field(app, form, FormField::Contract, &form.contract),
        lookup_line(app, form),
        choice_field(
            app,
            form,
            FormField::Pair,
            &match form.selected_pair_name() {
                Some(pair) => format!("< {} >", pair),
                None => "-".to_string(),
            },
        ),
        choice_field(app, form, FormField::Kind, &format!("< {} >", form.kind.label())),
        choice_field(
            app,
            form,
            FormField::Condition,
            &format!("< {} >", form.condition.label()),
        ),
        text_field(app, form, FormField::Value, &form.value),
        text_field(app, form, FormField::ChannelId, &form.channel_id),
        Line::from(""),
    ];

    lines.push(Line::from(Span::styled(
        " Enter on Contract:lookup | Enter on Channel ID:create",
        Style::default().add_modifier(Modifier::DIM),
    )));
    lines.push(Line::from(Span::styled(
        " Tab:next field ←/→:change choice Esc:close",
        Style::default().add_modifier(Modifier::DIM),
    )));

    let block = Block::default()
        .title(" New Token Alert ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

/// A label/value row for a free-text field, cursor shown when focused.
fn text_field<'a>(app: &App, form: &AlertForm, field: FormField, value: &str) -> Line<'a> {
    let focused = form.focus == field;
    let text = if focused {
        format!("{}_", value)
    } else if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    };

    Line::from(vec![
        label_span(app, field, focused),
        Span::raw(text),
    ])
}

/// A label/value row for a cycling choice field.
fn choice_field<'a>(app: &App, form: &AlertForm, field: FormField, value: &str) -> Line<'a> {
    let focused = form.focus == field;
    let style = if focused {
        Style::default().fg(app.theme.highlight)
    } else {
        Style::default()
    };

    Line::from(vec![
        label_span(app, field, focused),
        Span::styled(value.to_string(), style),
    ])
}

fn label_span<'a>(app: &App, field: FormField, focused: bool) -> Span<'a> {
    let marker = if focused { "▶" } else { " " };
    let style = if focused {
        Style::default()
            .fg(app.theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Span::styled(format!(" {} {:<11} ", marker, field.label()), style)
}

/// Lookup result line under the contract field.
fn lookup_line<'a>(app: &App, form: &AlertForm) -> Line<'a> {
    if form.lookup_pending {
        return Line::from(Span::styled(
            "   looking up...",
            Style::default().fg(app.theme.cooldown),
        ));
    }
    match &form.ticker {
        Some(ticker) => Line::from(vec![
            Span::raw("   "),
            Span::styled(
                ticker.clone(),
                Style::default()
                    .fg(app.theme.active)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} pair(s)", form.pairs.len()),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]),
        None => Line::from(Span::styled(
            "   Enter a contract address, then press Enter to look it up",
            Style::default().add_modifier(Modifier::DIM),
        )),
    }
}
