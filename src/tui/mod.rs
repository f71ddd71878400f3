// TUI module - Terminal User Interface
//
// Manages the terminal with ratatui:
// - Terminal initialization and cleanup
// - Event loop (keyboard, mouse, timer ticks, loader results)
// - Dispatching input: overlay first, then global keys, then the view
//
// The load pipeline (fetch -> sort -> render) starts here: once at
// startup and again on every sort-key change or manual reload. Loads are
// fire-and-forget tasks; their results arrive over an mpsc channel and
// apply in arrival order, so overlapping loads are last-writer-wins.

pub mod app;
pub mod modal;
pub mod theme;
pub mod ui;

use crate::config::Config;
use crate::countries::{self, Country};
use crate::demo;
use crate::logging::LogBuffer;
use crate::sort::SortKey;
use anyhow::{Context as _, Result};
use app::{App, View};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::ModalAction;
use ratatui::layout::Position;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Result of one load pipeline run
pub enum LoadOutcome {
    Loaded(Vec<Country>),
    /// The error was already logged where it happened; the UI only needs
    /// to know the fetch is no longer in flight
    Failed,
}

/// Owns everything needed to start a load: the HTTP client, the endpoint,
/// and the channel results come back on. Resolved once at initialization.
pub struct Loader {
    client: reqwest::Client,
    api_url: String,
    demo_mode: bool,
    tx: mpsc::Sender<LoadOutcome>,
}

impl Loader {
    pub fn new(config: &Config, tx: mpsc::Sender<LoadOutcome>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            demo_mode: config.demo_mode,
            tx,
        }
    }

    /// Kick off one fetch. No cancellation, no timeout: a hung request
    /// just never reports back, and the list keeps its previous state.
    pub fn start(&self, app: &mut App) {
        app.load_started();

        if self.demo_mode {
            let tx = self.tx.clone();
            tokio::spawn(async move {
                let _ = tx.send(LoadOutcome::Loaded(demo::sample_countries())).await;
            });
            return;
        }

        let client = self.client.clone();
        let api_url = self.api_url.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = match countries::fetch_countries(&client, &api_url).await {
                Ok(list) => {
                    tracing::info!("loaded {} countries", list.len());
                    LoadOutcome::Loaded(list)
                }
                Err(e) => {
                    // The single catch point for fetch failures: log and
                    // move on, the table keeps whatever it was showing
                    tracing::error!("failed to load countries: {:#}", e);
                    LoadOutcome::Failed
                }
            };
            let _ = tx.send(outcome).await;
        });
    }
}

/// Run the TUI
///
/// Sets up the terminal, starts the initial load, runs the event loop,
/// and restores the terminal when done.
pub async fn run_tui(config: Config, log_buffer: LogBuffer) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let (tx, mut rx) = mpsc::channel(8);
    let loader = Loader::new(&config, tx);
    let mut app = App::with_config(log_buffer, &config);

    // Initial load, sorted by the configured default key
    loader.start(&mut app);

    let result = run_event_loop(&mut terminal, &mut app, &loader, &mut rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// tokio::select! waits on three things at once: terminal input, the
/// redraw tick, and load results. Whichever fires first is handled, then
/// the UI is redrawn.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    loader: &Loader,
    rx: &mut mpsc::Receiver<LoadOutcome>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, loader, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            // Periodic tick so the loading indicator stays fresh
            _ = tick_interval.tick() => {}

            // Load results - applied in arrival order
            Some(outcome) = rx.recv() => match outcome {
                LoadOutcome::Loaded(list) => app.apply_countries(list),
                LoadOutcome::Failed => app.load_failed(),
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Overlay → Global → View-specific
fn handle_key_event(app: &mut App, loader: &Loader, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Layer 1: an open overlay captures all input
    if handle_modal_input(app, &key_event) {
        return;
    }

    // Layer 2: global keys
    if handle_global_keys(app, loader, &key_event) {
        return;
    }

    // Layer 3: view-specific keys
    match app.view {
        View::Table => handle_table_keys(app, key_event.code),
        View::Logs => handle_logs_keys(app, key_event.code),
    }
}

/// Handle overlay input - returns true if the overlay absorbed it
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    let Some(ref mut modal) = app.modal else {
        return false;
    };

    match modal.handle_input(key_event.code) {
        ModalAction::None => {}
        ModalAction::Close => app.close_modal(),
        ModalAction::ScrollUp => app.detail_scroll = app.detail_scroll.saturating_sub(1),
        ModalAction::ScrollDown => app.detail_scroll = app.detail_scroll.saturating_add(1),
        ModalAction::Copy => {
            if let Some(country) = app.modal_country() {
                let text = app.details_text(country);
                match copy_to_clipboard(&text) {
                    Ok(()) => tracing::info!("copied country details to clipboard"),
                    Err(e) => tracing::warn!("clipboard copy failed: {:#}", e),
                }
            }
        }
    }

    true
}

/// Handle global keys - returns true if handled
fn handle_global_keys(app: &mut App, loader: &Loader, key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.should_quit = true;
            true
        }
        KeyCode::Char('?') => {
            app.modal = Some(modal::Modal::help());
            true
        }
        KeyCode::Char('t') => {
            app.cycle_theme();
            true
        }
        KeyCode::Char('L') => {
            app.toggle_logs();
            true
        }
        // Manual reload with the current key
        KeyCode::Char('r') => {
            loader.start(app);
            true
        }
        // Sort selection: direct keys and cycling. A changed key re-runs
        // the whole load pipeline, same as the original selector did.
        KeyCode::Char('1') => {
            set_sort(app, loader, SortKey::Region);
            true
        }
        KeyCode::Char('2') => {
            set_sort(app, loader, SortKey::Name);
            true
        }
        KeyCode::Char('3') => {
            set_sort(app, loader, SortKey::Capital);
            true
        }
        KeyCode::Char('s') | KeyCode::Tab => {
            app.cycle_sort();
            loader.start(app);
            true
        }
        _ => false,
    }
}

/// Apply a sort-key selection; only a real change triggers a reload
fn set_sort(app: &mut App, loader: &Loader, key: SortKey) {
    if app.set_sort(key) {
        loader.start(app);
    }
}

/// Keys for the table view
fn handle_table_keys(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        KeyCode::Enter => app.open_selected_details(),
        _ => {}
    }
}

/// Keys for the logs view
fn handle_logs_keys(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            let max = app.log_buffer.len().saturating_sub(1);
            app.logs_scroll = (app.logs_scroll + 1).min(max);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.logs_scroll = app.logs_scroll.saturating_sub(1);
        }
        KeyCode::Esc => app.toggle_logs(),
        _ => {}
    }
}

/// Handle mouse input
///
/// Clicking a row opens its details; clicking anywhere outside an open
/// overlay dismisses it. Scrolling moves the selection, or the overlay
/// content when one is open.
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    let position = Position::new(mouse_event.column, mouse_event.row);

    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.modal.is_some() {
                // Outside-click dismissal; clicks inside the overlay are
                // absorbed without effect
                if !app.modal_area.contains(position) {
                    app.close_modal();
                }
            } else if app.view == View::Table && app.table_rows_area.contains(position) {
                let row = app.table_state.offset()
                    + (mouse_event.row - app.table_rows_area.y) as usize;
                if row < app.countries.len() {
                    app.open_details(row);
                }
            }
        }
        MouseEventKind::ScrollUp => {
            if app.modal.is_some() {
                app.detail_scroll = app.detail_scroll.saturating_sub(1);
            } else {
                app.select_previous();
            }
        }
        MouseEventKind::ScrollDown => {
            if app.modal.is_some() {
                app.detail_scroll = app.detail_scroll.saturating_add(1);
            } else {
                app.select_next();
            }
        }
        _ => {}
    }
}

/// Copy text to the system clipboard
///
/// The clipboard is created fresh each time to avoid holding resources.
/// Common failure case: no display server on headless Linux.
fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::sample_countries;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    fn app_with_countries() -> App {
        let mut app = App::with_config(LogBuffer::new(), &Config::default());
        app.apply_countries(sample_countries());
        app
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn row_click_opens_details_for_that_record() {
        let mut app = app_with_countries();
        app.table_rows_area = Rect::new(1, 2, 60, 10);

        handle_mouse_event(&mut app, click(5, 4));

        // Row 2 of the visible window (offset 0)
        let expected = app.countries[2].name.official.clone();
        assert_eq!(app.modal_country().unwrap().name.official, expected);
    }

    #[test]
    fn click_below_last_row_is_ignored() {
        let mut app = app_with_countries();
        let count = app.countries.len() as u16;
        app.table_rows_area = Rect::new(1, 2, 60, count + 10);

        handle_mouse_event(&mut app, click(5, 2 + count));
        assert!(app.modal.is_none());
    }

    #[test]
    fn outside_click_dismisses_overlay() {
        let mut app = app_with_countries();
        app.open_details(0);
        app.modal_area = Rect::new(20, 10, 40, 12);

        // Inside the overlay: stays visible
        handle_mouse_event(&mut app, click(25, 12));
        assert!(app.modal.is_some());

        // Outside: dismissed
        handle_mouse_event(&mut app, click(2, 2));
        assert!(app.modal.is_none());

        // Dismissal while already hidden is a no-op
        handle_mouse_event(&mut app, click(2, 2));
        assert!(app.modal.is_none());
    }

    #[tokio::test]
    async fn failed_load_sends_failure_and_logs_one_error() {
        use crate::logging::{LogLevel, TuiLogLayer};
        use tracing_subscriber::layer::SubscriberExt;

        // Capture the loader's diagnostics the same way the TUI does.
        // The current-thread runtime runs the spawned task on this
        // thread, so the thread-local default subscriber sees it.
        let log_buffer = LogBuffer::new();
        let subscriber =
            tracing_subscriber::registry().with(TuiLogLayer::new(log_buffer.clone()));
        let _guard = tracing::subscriber::set_default(subscriber);

        let config = Config {
            api_url: "http://127.0.0.1:9/all".into(),
            ..Config::default()
        };
        let (tx, mut rx) = mpsc::channel(1);
        let loader = Loader::new(&config, tx);
        let mut app = App::with_config(log_buffer.clone(), &config);

        loader.start(&mut app);
        assert_eq!(app.loading, 1);

        match rx.recv().await {
            Some(LoadOutcome::Failed) => app.load_failed(),
            _ => panic!("expected the load to fail"),
        }

        // The table stays empty and exactly one error entry was captured
        assert!(app.countries.is_empty());
        assert_eq!(app.loading, 0);
        let errors: Vec<_> = log_buffer
            .get_all()
            .into_iter()
            .filter(|e| matches!(e.level, LogLevel::Error))
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("failed to load countries"));
    }

    #[test]
    fn scroll_moves_selection_or_overlay() {
        let mut app = app_with_countries();
        app.select_first();

        let scroll_down = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };

        handle_mouse_event(&mut app, scroll_down);
        assert_eq!(app.table_state.selected(), Some(1));

        app.open_details(1);
        handle_mouse_event(&mut app, scroll_down);
        assert_eq!(app.detail_scroll, 1);
        // Selection untouched while the overlay is open
        assert_eq!(app.table_state.selected(), Some(1));
    }
}
