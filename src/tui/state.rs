//! TUI state algebra: screens, actions, transitions.
//!
//! Screen variants carry only per-screen transient state (list cursors,
//! the prompt cursor, the topic form). The study session and the scanned
//! file list are shared across screens and live in `App`.

use std::path::PathBuf;

use crate::config::AppConfig;
use crate::navigator::Cursor;
use crate::session::Session;
use crate::types::{PromptPair, Topic, TopicFileEntry};

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    /// Current screen.
    pub screen: Screen,

    /// Loaded file, topic selection and working sequence.
    pub session: Session,

    /// Topic files found in the configured directory.
    pub files: Vec<TopicFileEntry>,

    pub config: AppConfig,

    /// File every return to the intro starts from: the startup file given
    /// on the command line, or the configured default.
    pub home_file: PathBuf,

    /// One-line message for the user (load failures, refused actions).
    pub status: Option<String>,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, session: Session, files: Vec<TopicFileEntry>) -> Self {
        App {
            screen: Screen::Intro,
            session,
            files,
            home_file: config.default_file_path(),
            config,
            status: None,
            should_quit: false,
        }
    }
}

// ============================================================================
// SCREENS
// ============================================================================

/// The current TUI screen. Each variant is a state of the navigation
/// state machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    /// Title screen. Any key moves on.
    #[default]
    Intro,

    /// Pick a topic file from the scanned directory.
    ChooseFile { cursor: usize },

    /// Toggle topics of the loaded file.
    SelectTopics { cursor: usize },

    /// Study run over the working sequence.
    DisplayPrompts { cursor: Cursor },

    /// Write a new topic into a topic file.
    CreateTopic { form: TopicForm },
}

impl Screen {
    pub fn choose_file() -> Self {
        Screen::ChooseFile { cursor: 0 }
    }

    pub fn select_topics() -> Self {
        Screen::SelectTopics { cursor: 0 }
    }

    /// Prompt screen with the cursor at `(0, false)`.
    pub fn display_prompts() -> Self {
        Screen::DisplayPrompts {
            cursor: Cursor::start(),
        }
    }

    pub fn create_topic(file_name: impl Into<String>) -> Self {
        Screen::CreateTopic {
            form: TopicForm::new(file_name),
        }
    }

    /// Whether keys should be read as text input.
    pub fn takes_text(&self) -> bool {
        matches!(self, Screen::CreateTopic { .. })
    }
}

// ============================================================================
// TOPIC FORM
// ============================================================================

/// Input field of the topic form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    FileName,
    #[default]
    TopicName,
    Prompt,
    Answer,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::FileName => FormField::TopicName,
            FormField::TopicName => FormField::Prompt,
            FormField::Prompt => FormField::Answer,
            FormField::Answer => FormField::FileName,
        }
    }
}

/// Draft of a topic being typed in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopicForm {
    pub file_name: String,
    pub topic_name: String,
    pub prompt: String,
    pub answer: String,
    /// Pairs committed so far.
    pub pairs: Vec<PromptPair>,
    pub focus: FormField,
}

impl TopicForm {
    pub fn new(file_name: impl Into<String>) -> Self {
        TopicForm {
            file_name: file_name.into(),
            ..Default::default()
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::FileName => &mut self.file_name,
            FormField::TopicName => &mut self.topic_name,
            FormField::Prompt => &mut self.prompt,
            FormField::Answer => &mut self.answer,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn pop_char(&mut self) {
        self.focused_mut().pop();
    }

    /// Move the pending prompt/answer into `pairs`.
    ///
    /// Returns false if either half is blank.
    pub fn commit_pair(&mut self) -> bool {
        if self.prompt.trim().is_empty() || self.answer.trim().is_empty() {
            return false;
        }
        let prompt = std::mem::take(&mut self.prompt);
        let answer = std::mem::take(&mut self.answer);
        self.pairs.push(PromptPair::new(prompt.trim(), answer.trim()));
        self.focus = FormField::Prompt;
        true
    }

    /// The finished topic, including a complete pending pair.
    ///
    /// # Errors
    /// A message naming the first missing piece.
    pub fn to_topic(&self) -> Result<Topic, &'static str> {
        let file_name = self.file_name.trim();
        if file_name.is_empty() {
            return Err("File name required");
        }
        if file_name.contains(['/', '\\']) || file_name.starts_with('.') {
            return Err("File name must be a plain file name");
        }
        if self.topic_name.trim().is_empty() {
            return Err("Topic name required");
        }

        let mut pairs = self.pairs.clone();
        if !self.prompt.trim().is_empty() && !self.answer.trim().is_empty() {
            pairs.push(PromptPair::new(self.prompt.trim(), self.answer.trim()));
        }
        if pairs.is_empty() {
            return Err("Add at least one prompt");
        }

        Ok(Topic::new(self.topic_name.trim(), pairs))
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move list cursor up.
    MoveUp,
    /// Move list cursor down.
    MoveDown,
    /// Confirm: choose file, run prompts, advance / leave at end.
    Enter,
    /// Back to the previous screen.
    Back,
    /// Back to the intro, discarding the session.
    Home,
    /// Toggle the topic under the cursor.
    ToggleSelection,
    SelectAll,
    SelectNone,
    /// Reveal the answer or move to the next prompt.
    Advance,
    /// Previous prompt, shown with its answer.
    Retreat,
    /// Rebuild and shuffle the working sequence.
    Reshuffle,
    /// Open the topic form.
    NewTopic,
    /// Typed character (text entry only).
    Input(char),
    Backspace,
    NextField,
    /// Save the topic form.
    Save,
    /// Any other key.
    AnyKey,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a state transition.
///
/// The effects boundary inspects it to decide what to render and which
/// I/O to perform.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Render this screen (may be the same or a different screen).
    Screen(Screen),
    /// Quit the application.
    Quit,
    /// Execute a side effect, then render whatever screen it leaves.
    Effect(Effect),
}

/// Side effect requested by a transition. Interpreted by `run`.
#[derive(Debug, PartialEq)]
pub enum Effect {
    /// Load the topic file at this index of `App::files`.
    LoadFile { index: usize },
    /// Build the working sequence and enter the prompt screen.
    StartStudy,
    /// Rebuild and shuffle, cursor back to the first prompt.
    Reshuffle,
    /// Discard the session, reopen the startup file, go to the intro.
    Reset,
    /// Append the form's topic to its file.
    SaveTopic { form: TopicForm },
}

// ============================================================================
// TESTS
// ============================================================================
