//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only TUI module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui,
//! and interprets the `Effect`s the update layer asks for.
//!
//! Architecture: a key reader thread feeds an mpsc channel, the event loop
//! consumes from it and redraws after every key.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::Rng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::loader::file_name as file_name_of;
use crate::scanner::scan;
use crate::session::Session;
use crate::store::append_topic;
use crate::types::{ScanConfig, TopicFileEntry};

use super::state::{Action, App, Effect, Screen, Transition};
use super::update::update;
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// In `text_mode` printable keys are typed into the focused field instead
/// of triggering commands. Returns None for keys with no meaning there.
pub fn map_key(key: KeyEvent, text_mode: bool) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            // Ctrl+C always quits
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('s') => Some(Action::Save),
            _ => None,
        };
    }

    if text_mode {
        return match key.code {
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Enter => Some(Action::Enter),
            KeyCode::Tab => Some(Action::NextField),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        };
    }

    let action = match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::Enter => Action::Enter,
        KeyCode::Esc => Action::Back,
        KeyCode::Home | KeyCode::Char('g') => Action::Home,

        // Prompts
        KeyCode::Right | KeyCode::Char('l') => Action::Advance,
        KeyCode::Left | KeyCode::Char('h') => Action::Retreat,
        KeyCode::Char('r') => Action::Reshuffle,

        // Selection
        KeyCode::Char(' ') => Action::ToggleSelection,
        KeyCode::Char('a') => Action::SelectAll,
        KeyCode::Char('n') => Action::SelectNone,

        KeyCode::Char('c') => Action::NewTopic,
        KeyCode::Char('q') => Action::Quit,

        _ => Action::AnyKey,
    };
    Some(action)
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards key presses.
fn spawn_key_reader(tx: mpsc::Sender<KeyEvent>) {
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(key).is_err() {
                        break; // receiver dropped, TUI is shutting down
                    }
                }
                Ok(_) => {} // ignore releases, mouse, resize, etc.
                Err(_) => break,
            }
        }
    });
}

// ============================================================================
// STARTUP
// ============================================================================

/// Topic files in the configured directory. A missing directory is an
/// empty list.
fn scan_files(config: &AppConfig) -> Vec<TopicFileEntry> {
    let scan_config = ScanConfig {
        strip_extension: config.strip_extensions,
        ..ScanConfig::new(&config.topics_dir)
    };
    scan(&scan_config).unwrap_or_else(|e| {
        debug!(dir = %config.topics_dir.display(), error = %e, "Topic directory not scanned");
        Vec::new()
    })
}

/// Initial model: `initial` (or the configured default file) loaded, the
/// topic directory scanned. A file that fails to load becomes a status
/// message on the intro screen.
pub fn startup(config: AppConfig, initial: Option<PathBuf>) -> App {
    let path = initial.unwrap_or_else(|| config.default_file_path());
    let files = scan_files(&config);
    let (session, status) = open_or_empty(&path);

    let mut app = App::new(config, session, files);
    app.home_file = path;
    app.status = status;
    app
}

/// Session for `path`, or an empty one plus the message to show.
fn open_or_empty(path: &Path) -> (Session, Option<String>) {
    match Session::open(path) {
        Ok(session) => (session, None),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Topic file not loaded");
            (Session::empty(), Some(e.user_message().to_string()))
        }
    }
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the TUI event loop until the user quits.
pub fn run(config: AppConfig, initial: Option<PathBuf>) -> io::Result<()> {
    let mut app = startup(config, initial);
    let mut rng = rand::thread_rng();

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let (tx, rx) = mpsc::channel::<KeyEvent>();
    spawn_key_reader(tx);

    loop {
        // Render
        terminal.draw(|frame| render(&app, frame))?;

        // Check quit flag
        if app.should_quit {
            break;
        }

        // Block on next key
        let key = match rx.recv() {
            Ok(k) => k,
            Err(_) => break, // reader thread gone
        };

        if let Some(action) = map_key(key, app.screen.takes_text()) {
            dispatch(&mut app, &action, &mut rng);
        }
    }

    info!("Exiting");
    restore_terminal()?;
    Ok(())
}

/// Apply one action to the model.
pub fn dispatch<R: Rng>(app: &mut App, action: &Action, rng: &mut R) {
    let previous = app.screen.clone();
    let file_count = app.files.len();

    // Any new key clears the last message
    app.status = None;

    match update(previous.clone(), action, &mut app.session, file_count) {
        Transition::Screen(screen) => app.screen = screen,
        Transition::Quit => app.should_quit = true,
        Transition::Effect(effect) => handle_effect(effect, app, previous, rng),
    }
}

// ============================================================================
// EFFECT HANDLING
// ============================================================================

/// Handle a side effect requested by a pure transition.
///
/// `previous` is the screen the effect was requested from; failed effects
/// leave the app there with a status message.
fn handle_effect<R: Rng>(effect: Effect, app: &mut App, previous: Screen, rng: &mut R) {
    match effect {
        Effect::LoadFile { index } => {
            let Some(entry) = app.files.get(index) else {
                app.screen = previous;
                return;
            };
            match Session::open(&entry.path) {
                Ok(session) => {
                    app.session = session;
                    app.screen = Screen::select_topics();
                }
                Err(e) => {
                    warn!(path = %entry.path.display(), error = %e, "Topic file not loaded");
                    app.status = Some(e.user_message().to_string());
                    app.screen = previous;
                }
            }
        }
        Effect::StartStudy => match app.session.begin(rng, app.config.shuffle) {
            Ok(_) => app.screen = Screen::display_prompts(),
            Err(e) => {
                debug!(error = %e, "Study run refused");
                app.status = Some("Select at least one topic".to_string());
                app.screen = previous;
            }
        },
        Effect::Reshuffle => match app.session.begin(rng, true) {
            Ok(_) => app.screen = Screen::display_prompts(),
            Err(e) => {
                debug!(error = %e, "Reshuffle refused");
                app.screen = previous;
            }
        },
        Effect::Reset => {
            let (session, status) = open_or_empty(&app.home_file);
            info!(path = %app.home_file.display(), "Session reset");
            app.session = session;
            app.status = status;
            app.files = scan_files(&app.config);
            app.screen = Screen::Intro;
        }
        Effect::SaveTopic { form } => {
            let topic = match form.to_topic() {
                Ok(topic) => topic,
                Err(message) => {
                    app.status = Some(message.to_string());
                    app.screen = Screen::CreateTopic { form };
                    return;
                }
            };
            let name = topic.name.clone();
            let file_name = form.file_name.trim();

            // Same name as the loaded file: append to it wherever it lives
            let path = match app.session.store().and_then(|s| s.path()) {
                Some(loaded) if file_name_of(loaded) == file_name => loaded.to_path_buf(),
                _ => app.config.topics_dir.join(file_name),
            };

            match append_topic(&path, topic) {
                Ok(store) => {
                    app.status = Some(format!("Saved topic {} to {}", name, store.name()));
                    app.session = Session::with_store(store);
                    app.files = scan_files(&app.config);
                    app.screen = Screen::choose_file();
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Topic not saved");
                    app.status = Some(e.user_message().to_string());
                    app.screen = Screen::CreateTopic { form };
                }
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
