//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use chrono::Utc;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};

/// Render the header bar with the latest quotes and trigger overview.
///
/// Displays: status indicator, latest buy/sell prices, trigger counts by
/// status, simulated USD amount.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref dashboard) = app.dashboard else {
        let line = Line::from(vec![
            Span::styled(
                " JUPWATCH ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let counts = dashboard.status_counts(Utc::now());

    // Overall status indicator: yellow while anything cools down
    let status_style = if counts.cooldown > 0 {
        Style::default().fg(app.theme.cooldown)
    } else {
        Style::default().fg(app.theme.active)
    };

    let buy = dashboard
        .history
        .latest_buy()
        .map(|p| format!("{:.8}", p))
        .unwrap_or_else(|| "-".to_string());
    let sell = dashboard
        .history
        .latest_sell()
        .map(|p| format!("{:.8}", p))
        .unwrap_or_else(|| "-".to_string());

    let line = Line::from(vec![
        Span::styled(" ● ", status_style),
        Span::styled("JUPWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ buy "),
        Span::styled(buy, Style::default().fg(app.theme.buy)),
        Span::raw(" sell "),
        Span::styled(sell, Style::default().fg(app.theme.sell)),
        Span::raw(" │ "),
        Span::styled(
            format!("{}", counts.active),
            Style::default().fg(app.theme.active),
        ),
        Span::raw(" active "),
        if counts.cooldown > 0 {
            Span::styled(
                format!("{}", counts.cooldown),
                Style::default().fg(app.theme.cooldown),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" cooldown "),
        if counts.inactive > 0 {
            Span::styled(
                format!("{}", counts.inactive),
                Style::default().fg(app.theme.inactive),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" inactive │ "),
        Span::raw(format!("${}", dashboard.usd_amount)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Overview "),
        Line::from(" 2:Triggers "),
        Line::from(" 3:Tokens "),
        Line::from(" 4:Settings "),
    ];

    let selected = match app.current_view {
        View::Overview => 0,
        View::Triggers => 1,
        View::Tokens => 2,
        View::Settings => 3,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: current view, time since last update, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(updated) = app.last_updated {
        let elapsed = updated.elapsed();

        // Context-sensitive controls
        let controls = if app.form.is_some() {
            "Tab:field ←/→:choice Enter:next Esc:close"
        } else if app.input.is_some() {
            "Type a value | Enter:submit Esc:cancel"
        } else {
            match app.current_view {
                View::Overview => "Tab:switch r:refresh ?:help q:quit",
                View::Triggers => "←/→:side a:add d:delete c:clear cooldown ?:help q:quit",
                View::Tokens => "a:add d:delete r:refresh ?:help q:quit",
                View::Settings => "Enter:edit r:refresh ?:help q:quit",
            }
        };

        format!(
            " {} | Updated {:.1}s ago | {}",
            app.current_view.label(),
            elapsed.as_secs_f64(),
            controls,
        )
    } else if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit r:retry", err)
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  1-4 Tab     Switch views"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Triggers",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l   Switch buy/sell side"),
        Line::from("  a         Add trigger price"),
        Line::from("  d         Delete trigger"),
        Line::from("  c         Clear cooldown"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Tokens & Settings",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  a         New token alert"),
        Line::from("  d         Delete token alert"),
        Line::from("  Enter/e   Edit setting"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Refresh from server"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 28u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
