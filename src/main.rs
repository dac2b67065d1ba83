// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};

mod api;
mod app;
mod config;
mod data;
mod events;
mod form;
mod ui;

use api::{ApiClient, ApiHandle};
use app::{App, View};
use config::Settings;
use ui::Theme;

#[derive(Parser, Debug)]
#[command(name = "jupwatch")]
#[command(about = "Terminal dashboard for a Jupiter USDC price alert server")]
struct Args {
    /// Base URL of the alert server (overrides config)
    #[arg(short, long)]
    url: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// State refresh interval in seconds (overrides config)
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Color theme: dark, light, or auto (overrides config)
    #[arg(long)]
    theme: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(url) = args.url {
        settings.api_url = url;
    }
    if let Some(refresh) = args.refresh {
        settings.refresh_secs = refresh.max(1);
    }
    if let Some(theme) = args.theme {
        settings.theme = theme.parse()?;
    }

    run(settings)
}

/// Spawn the API worker and run the TUI against it.
fn run(settings: Settings) -> Result<()> {
    // Resolve the theme before raw mode; auto detection queries the terminal
    let theme = settings.theme.resolve();

    // The worker runs on the runtime's threads while the main thread
    // drives the render loop
    let rt = tokio::runtime::Runtime::new()?;
    let client = ApiClient::new(&settings.api_url);
    let (api, worker) = rt.block_on(async { ApiHandle::spawn(client) });

    let result = run_tui(api, theme, Duration::from_secs(settings.refresh_secs));

    // Cancels any in-flight request
    worker.abort();

    result
}

/// Run the TUI against the given worker handle
fn run_tui(api: ApiHandle, theme: Theme, refresh_interval: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create app and request initial data
    let mut app = App::new(api, theme);
    app.refresh();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        // Fold in completed API calls before drawing
        app.drain_api();

        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(0, area.height / 2 - 2, area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            // Render header with latest quotes
            ui::common::render_header(frame, app, chunks[0]);

            // Render tabs
            ui::common::render_tabs(frame, app, chunks[1]);

            // Render current view
            match app.current_view {
                View::Overview => ui::overview::render(frame, app, chunks[2]),
                View::Triggers => ui::triggers::render(frame, app, chunks[2]),
                View::Tokens => ui::tokens::render(frame, app, chunks[2]),
                View::Settings => ui::settings::render(frame, app, chunks[2]),
            }

            // Render status bar
            ui::common::render_status_bar(frame, app, chunks[3]);

            // Render the alert form overlay if open
            if app.form.is_some() {
                ui::form::render_overlay(frame, app, area);
            }

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    // Content starts after header (1) + tabs (1) + table header (1)
                    events::handle_mouse_event(app, mouse, 3);
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Refetch state on the configured interval
        if last_refresh.elapsed() >= refresh_interval {
            app.request_state();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}
