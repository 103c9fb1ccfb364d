use std::path::Path;

use tokio::sync::mpsc;
use tracing::error;

use marketdeck::config::fetch_config;
use marketdeck::session::DashboardSession;
use marketdeck::tui::{self, App, Action, Message};
use marketdeck::{MarketdeckError, preferences};

/// UI tick cadence driving redraws and error expiry.
const TICK_MS: u64 = 200;

#[tokio::main]
async fn main() -> Result<(), MarketdeckError> {
    // Log to stderr so tracing output doesn't fight the TUI on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = fetch_config();
    let prefs = preferences::load(Path::new(&config.prefs_path));

    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    let mut app = App::new(&prefs);
    let mut session = DashboardSession::new(config, prefs, tx.clone());
    session.start();

    // Failing to get a terminal is the one fatal startup error.
    let mut terminal = match tui::setup_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            error!("Failed to start dashboard: {e}");
            session.shutdown();
            return Err(e);
        }
    };

    tui::event::spawn_event_reader(tx.clone());
    tui::event::spawn_tick_timer(tx, TICK_MS);

    // The event loop is the single interaction context: every fetch result
    // and input event is serialized through this channel.
    while let Some(message) = rx.recv().await {
        let redraw = matches!(message, Message::Input(tui::Event::Tick));

        if let Some(action) = tui::update(&mut app, message) {
            match action {
                Action::SwitchSymbol(code) => session.switch_symbol(&code),
                Action::TogglePanel(kind) => session.toggle_panel(kind),
                Action::SetInterval(interval) => session.set_interval(interval),
                Action::ReconnectFeed => session.reconnect_feed(),
            }
        }

        if app.should_quit {
            break;
        }

        if redraw
            && let Err(e) = terminal.draw(|frame| tui::render(frame, &app))
        {
            session.shutdown();
            let _ = tui::restore_terminal(&mut terminal);
            return Err(MarketdeckError::Io(e.to_string()));
        }
    }

    session.shutdown();
    tui::restore_terminal(&mut terminal)?;

    Ok(())
}
