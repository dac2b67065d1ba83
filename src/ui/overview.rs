//! Overview view: latest quotes, trigger summary, and the price chart.

use chrono::Utc;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;

/// Render the Overview view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref dashboard) = app.dashboard else {
        let paragraph = Paragraph::new(" Waiting for the first snapshot...")
            .style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(paragraph, area);
        return;
    };

    let chunks = Layout::vertical([Constraint::Length(5), Constraint::Min(8)]).split(area);
    let cards = Layout::horizontal([
        Constraint::Percentage(33),
        Constraint::Percentage(33),
        Constraint::Percentage(34),
    ])
    .split(chunks[0]);

    render_price_card(
        frame,
        app,
        cards[0],
        " Buy Price ",
        dashboard.history.latest_buy(),
        app.theme.buy,
    );
    render_price_card(
        frame,
        app,
        cards[1],
        " Sell Price ",
        dashboard.history.latest_sell(),
        app.theme.sell,
    );
    render_trigger_card(frame, app, cards[2]);

    render_chart(frame, app, chunks[1]);
}

/// One quote card: the latest price for one side, 8 decimals.
fn render_price_card(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    price: Option<f64>,
    color: Color,
) {
    let value = match price {
        Some(p) => Line::from(Span::styled(
            format!("{:.8}", p),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            "-",
            Style::default().add_modifier(Modifier::DIM),
        )),
    };

    let usd = app
        .dashboard
        .as_ref()
        .map(|d| d.usd_amount)
        .unwrap_or_default();
    let lines = vec![
        value,
        Line::from(Span::styled(
            format!("per ${} USDC", usd),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Trigger counts by status plus the reset interval.
fn render_trigger_card(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref dashboard) = app.dashboard else {
        return;
    };
    let counts = dashboard.status_counts(Utc::now());

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{}", counts.active),
                Style::default().fg(app.theme.active),
            ),
            Span::raw(" active  "),
            Span::styled(
                format!("{}", counts.cooldown),
                Style::default().fg(app.theme.cooldown),
            ),
            Span::raw(" cooldown  "),
            Span::styled(
                format!("{}", counts.inactive),
                Style::default().fg(app.theme.inactive),
            ),
            Span::raw(" inactive"),
        ]),
        Line::from(Span::styled(
            format!("reset after {} min", dashboard.reset_minutes),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Triggers ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Buy/sell price series over the recent polls.
fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref dashboard) = app.dashboard else {
        return;
    };
    let history = &dashboard.history;

    let block = Block::default()
        .title(format!(" Price History ({} samples) ", history.len()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let Some((y_min, y_max)) = history.price_bounds() else {
        let paragraph = Paragraph::new("No price data yet")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let buy_series = history.buy_series();
    let sell_series = history.sell_series();

    let buy_line = Dataset::default()
        .name("buy")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.theme.buy))
        .data(&buy_series);

    let sell_line = Dataset::default()
        .name("sell")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.theme.sell))
        .data(&sell_series);

    let x_max = history.len().saturating_sub(1).max(1) as f64;
    let x_labels: Vec<Span> = match history.time_labels() {
        Some((first, last)) => vec![
            Span::styled(first, Style::default().fg(app.theme.border)),
            Span::styled(last, Style::default().fg(app.theme.border)),
        ],
        None => Vec::new(),
    };

    let y_mid = (y_min + y_max) / 2.0;
    let y_labels = vec![
        Span::styled(format!("{:.8}", y_min), Style::default().fg(app.theme.border)),
        Span::styled(format!("{:.8}", y_mid), Style::default().fg(app.theme.border)),
        Span::styled(format!("{:.8}", y_max), Style::default().fg(app.theme.border)),
    ];

    let chart = Chart::new(vec![buy_line, sell_line])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(x_labels)
                .style(Style::default().fg(app.theme.border)),
        )
        .y_axis(
            Axis::default()
                .bounds([y_min, y_max])
                .labels(y_labels)
                .style(Style::default().fg(app.theme.border)),
        );

    frame.render_widget(chart, area);
}
