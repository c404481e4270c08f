//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod detail;
mod help;
pub mod layout;
pub mod list;
mod search_input;
pub mod styles;
pub mod tabs;

pub use detail::{detail_lines, render_detail};
pub use help::render_help_overlay;
pub use layout::{calculate_areas, render_layout, ScreenAreas};
pub use list::{render_listing_list, ListPane, TrailingRow};
pub use search_input::SearchInput;
pub use styles::ColorConfig;

use crate::catalog::{AppState, CategoryTab, InputMode};
use crate::config::keybindings::KeyBindings;
use crate::config::ResolvedConfig;
use crate::model::{AppError, Category, KeyAction};
use crate::paginator::{Clock, LoadMoreOutcome, SystemClock};
use crate::source::{InputSource, LoadReport};
use constants::{IDLE_POLL, MIN_LOAD_POLL};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, trace};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error (input reading, decoding)
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Initial view requested on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupView {
    /// Category tab to open (`--category`).
    pub category: Option<Category>,
    /// Search to apply (`--search`).
    pub search: Option<String>,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B, C = SystemClock>
where
    B: ratatui::backend::Backend,
    C: Clock,
{
    terminal: Terminal<B>,
    app_state: AppState<C>,
    key_bindings: KeyBindings,
    colors: ColorConfig,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(app_state: AppState, key_bindings: KeyBindings) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            app_state,
            key_bindings,
            colors: ColorConfig::from_env(),
        })
    }
}

impl<B, C> TuiApp<B, C>
where
    B: ratatui::backend::Backend,
    C: Clock,
{
    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Idle polling is slow; while a
    /// load completion is pending the loop wakes up at its deadline.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let mut dirty = false;
            if event::poll(self.poll_timeout())? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        dirty = true;
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "terminal resized");
                        dirty = true;
                    }
                    _ => {}
                }
            }

            if self.app_state.tick() {
                dirty = true;
            }

            if dirty {
                self.draw()?;
            }
        }
    }

    fn poll_timeout(&self) -> Duration {
        match self.app_state.next_deadline() {
            Some(due) => due
                .saturating_duration_since(Instant::now())
                .clamp(MIN_LOAD_POLL, IDLE_POLL),
            None => IDLE_POLL,
        }
    }

    /// Handle a key press. Returns `true` when the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even while typing
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.app_state.help_visible() {
            match key.code {
                KeyCode::Esc | KeyCode::Char('?') => self.app_state.toggle_help(),
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        match self.app_state.input_mode() {
            InputMode::Search => {
                self.handle_search_key(key);
                return false;
            }
            InputMode::Comment => {
                self.handle_comment_key(key);
                return false;
            }
            InputMode::Normal => {}
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        self.app_state.clear_status();
        self.dispatch(action)
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.app_state.search_push(ch);
            }
            KeyCode::Backspace => self.app_state.search_backspace(),
            KeyCode::Enter => self.app_state.confirm_search(),
            KeyCode::Esc => self.app_state.clear_search(),
            _ => {}
        }
    }

    fn handle_comment_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.app_state.comment_push(ch);
            }
            KeyCode::Backspace => self.app_state.comment_backspace(),
            KeyCode::Esc => self.app_state.cancel_comment(),
            KeyCode::Enter => match self.app_state.submit_comment() {
                Ok(()) => self.app_state.set_status("Comment posted"),
                Err(e) => self.app_state.set_status(e.to_string()),
            },
            _ => {}
        }
    }

    fn dispatch(&mut self, action: KeyAction) -> bool {
        trace!(?action, "key action");
        match action {
            KeyAction::SelectNext => self.app_state.select_next(),
            KeyAction::SelectPrev => self.app_state.select_prev(),
            KeyAction::NextPage => self.app_state.next_page(),
            KeyAction::PrevPage => self.app_state.prev_page(),
            KeyAction::FirstPage => self.app_state.first_page(),
            KeyAction::LastPage => self.app_state.last_page(),
            KeyAction::LoadMore => {
                if self.app_state.load_more() == LoadMoreOutcome::NotInfinite {
                    self.app_state
                        .set_status("Load more needs infinite scroll (--infinite)");
                }
            }
            KeyAction::NextCategory => self.app_state.next_tab(),
            KeyAction::PrevCategory => self.app_state.prev_tab(),
            KeyAction::SelectCategory(index) => self.app_state.select_tab_index(index),
            KeyAction::OpenDetail => self.app_state.open_detail(),
            KeyAction::CloseDetail => {
                if self.app_state.detail_listing().is_some() {
                    self.app_state.close_detail();
                } else {
                    self.app_state.clear_search();
                }
            }
            KeyAction::StartComment => {
                if let Err(e) = self.app_state.start_comment() {
                    self.app_state.set_status(e.to_string());
                }
            }
            KeyAction::StartSearch => self.app_state.start_search(),
            KeyAction::ClearSearch => self.app_state.clear_search(),
            KeyAction::Help => self.app_state.toggle_help(),
            KeyAction::Quit => return true,
        }
        false
    }

    /// Draw a frame and feed the sentinel's visibility back to the trigger.
    ///
    /// Redraws while the feedback changes what is on screen (an immediate
    /// load, or the switch to "Loading more…").
    fn draw(&mut self) -> Result<(), TuiError> {
        loop {
            let mut drawn = None;
            let state = &self.app_state;
            let colors = self.colors;
            self.terminal.draw(|frame| {
                drawn = render_layout(frame, state, colors);
            })?;

            match self.app_state.on_frame_rendered(drawn) {
                Some(outcome) if outcome.accepted() => continue,
                _ => return Ok(()),
            }
        }
    }
}

// ===== Test Helpers =====
//
// Only for tests and benchmarks. Gated so they never leak into the binary.

#[cfg(any(test, feature = "bench-internals"))]
#[allow(dead_code)] // Not all helpers used in every context (tests vs benchmarks)
impl<B, C> TuiApp<B, C>
where
    B: ratatui::backend::Backend,
    C: Clock,
{
    /// Create TuiApp without touching the real terminal.
    pub fn new_for_test(terminal: Terminal<B>, app_state: AppState<C>) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings: KeyBindings::default(),
            colors: ColorConfig::new(true),
        }
    }

    /// Replace the key map, as a `[keybindings]` table would.
    pub fn with_key_bindings(mut self, key_bindings: KeyBindings) -> Self {
        self.key_bindings = key_bindings;
        self
    }

    /// App state accessor.
    pub fn app_state(&self) -> &AppState<C> {
        &self.app_state
    }

    /// Handle a single keyboard event. Returns true if app should quit.
    pub fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Apply a due load completion, as the event loop would.
    pub fn tick_test(&mut self) -> bool {
        self.app_state.tick()
    }

    /// Render one frame (plus any visibility feedback).
    pub fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Terminal accessor (for buffer inspection).
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Build the initial app state from loaded input and CLI startup options.
pub fn build_app_state(
    report: LoadReport,
    config: &ResolvedConfig,
    startup: &StartupView,
) -> AppState {
    let skipped = report.errors.len();
    info!(
        listings = report.listings.len(),
        skipped, "input loaded"
    );

    let mut app_state = AppState::new(report.listings, config);
    app_state.set_tab(CategoryTab::from(startup.category));
    if let Some(query) = &startup.search {
        app_state.set_search(query.clone());
    }
    if skipped > 0 {
        app_state.set_status(format!("Skipped {skipped} malformed line(s); see log"));
    }
    app_state
}

/// Read the whole input before the terminal switches to raw mode.
///
/// # Errors
///
/// `TuiError::App` wrapping the input failure.
pub fn load_input(input_source: InputSource) -> Result<LoadReport, TuiError> {
    let report = input_source.load().map_err(AppError::from)?;
    Ok(report)
}

/// Initialize and run the TUI application with input source and config
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(
    input_source: InputSource,
    config: &ResolvedConfig,
    startup: &StartupView,
) -> Result<(), TuiError> {
    let app_state = build_app_state(load_input(input_source)?, config, startup);
    let mut app = TuiApp::new(app_state, config.key_bindings.clone())?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
