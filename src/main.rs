//! Foyer TUI - Terminal front desk for guest enquiries
//!
//! A keyboard-driven kiosk that takes enquiries and newsletter signups
//! at the desk and delivers them to the venue's enquiry endpoint.

mod app;
mod config;
mod platform;
mod state;
mod submission;
mod transport;
mod ui;

use anyhow::Result;
use app::App;
use config::KioskConfig;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "foyer_tui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = KioskConfig::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "failed to load config, using defaults");
        KioskConfig::default()
    });

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(&config).await?;
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Faster polling while a toast slides or a delivery is in flight
        // (16ms = ~60fps), relaxed polling (100ms) otherwise
        let poll_duration = if app.animation_active() {
            std::time::Duration::from_millis(16)
        } else {
            std::time::Duration::from_millis(100)
        };

        if event::poll(poll_duration)? {
            match event::read()? {
                Event::Key(key) => {
                    // Global quit: Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        app.request_quit();
                    } else {
                        app.handle_key(key).await?;
                    }
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse).await?;
                }
                Event::Resize(_width, _height) => {
                    // Redrawn with the new size on the next pass
                }
                _ => {}
            }
        }

        // Settle notification timers and any finished delivery
        app.tick().await;

        if app.should_quit() {
            // A submission that already left its form is not abandoned
            app.flush_pending().await;
            return Ok(());
        }
    }
}
