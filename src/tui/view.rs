//! Pure rendering: map App state to ratatui widget trees.
//!
//! Each screen has a dedicated render function. The main `render()`
//! dispatches based on the current Screen variant. The only effect is
//! Frame::render_widget() which writes to the terminal buffer.

use humansize::{BINARY, format_size};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::navigator::{Cursor, can_proceed, prompt_view, topic_rows};
use crate::session::Session;
use crate::types::TopicFileEntry;

use super::state::{App, FormField, Screen, TopicForm};
use super::theme;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Common layout: title, content, status, help
    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // status
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(&app.screen, &app.session), chunks[0]);
    frame.render_widget(render_status(app.status.as_deref()), chunks[2]);
    frame.render_widget(render_help(&app.screen), chunks[3]);

    let content_area = chunks[1];

    match &app.screen {
        Screen::Intro => render_intro(&app.session, frame, content_area),
        Screen::ChooseFile { cursor } => {
            render_choose_file(&app.files, *cursor, &app.session, frame, content_area);
        }
        Screen::SelectTopics { cursor } => {
            render_select_topics(&app.session, *cursor, frame, content_area);
        }
        Screen::DisplayPrompts { cursor } => {
            render_display_prompts(&app.session, cursor, frame, content_area);
        }
        Screen::CreateTopic { form } => render_create_topic(form, frame, content_area),
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

/// Title bar showing the app name and screen-specific context.
fn render_title(screen: &Screen, session: &Session) -> Paragraph<'static> {
    let title_text = match screen {
        Screen::Intro => "Flashcards".to_string(),
        Screen::ChooseFile { .. } => "Choose a topic file".to_string(),
        Screen::SelectTopics { .. } | Screen::DisplayPrompts { .. } => match session.store() {
            Some(store) => store.name(),
            None => "Flashcards".to_string(),
        },
        Screen::CreateTopic { .. } => "New topic".to_string(),
    };

    Paragraph::new(Line::from(vec![Span::styled(title_text, theme::STYLE_TITLE)]))
}

/// Help line showing available keybindings for the current screen.
fn render_help(screen: &Screen) -> Paragraph<'static> {
    let help_text = match screen {
        Screen::Intro => "[any key] start  [q] quit",
        Screen::ChooseFile { .. } => {
            "[j/k] move  [Enter] open  [c] new topic  [Esc] back  [q] quit"
        }
        Screen::SelectTopics { .. } => {
            "[j/k] move  [Space] toggle  [a] all  [n] none  [Enter] run prompts  [Esc] back"
        }
        Screen::DisplayPrompts { .. } => {
            "[→/Enter] next  [←] previous  [r] reshuffle  [g] start over  [Esc] topics"
        }
        Screen::CreateTopic { .. } => {
            "[Tab] next field  [Enter] add prompt  [^S] save  [Esc] cancel"
        }
    };

    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

fn render_status(status: Option<&str>) -> Paragraph<'static> {
    let text = status.map(|s| format!("  {}", s)).unwrap_or_default();
    Paragraph::new(Span::styled(text, theme::STYLE_WARNING))
}

/// Scroll offset that keeps `cursor` inside a view of `height` rows.
fn scroll_offset(cursor: usize, height: u16) -> u16 {
    let visible_height = height as usize;
    if cursor >= visible_height {
        (cursor - visible_height + 1) as u16
    } else {
        0
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

// ============================================================================
// SCREEN: INTRO
// ============================================================================

fn render_intro(session: &Session, frame: &mut Frame, area: Rect) {
    let loaded = match session.store() {
        Some(store) => {
            let n = store.topics().len();
            Line::from(vec![
                Span::raw("  Loaded: "),
                Span::styled(store.name(), theme::STYLE_IMPORTANT),
                Span::styled(format!("  {} topic{}", n, plural(n)), theme::STYLE_DIM),
            ])
        }
        None => Line::from(Span::styled("  No topic file loaded", theme::STYLE_DIM)),
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Flashcards", theme::STYLE_TITLE)),
        Line::from(Span::styled("  ══════════", theme::STYLE_DIM)),
        Line::from(""),
        loaded,
        Line::from(""),
        Line::from(Span::styled(
            "  Press any key to start...",
            theme::STYLE_INTERACTIVE,
        )),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

// ============================================================================
// SCREEN: CHOOSE FILE
// ============================================================================

fn render_choose_file(
    files: &[TopicFileEntry],
    cursor: usize,
    session: &Session,
    frame: &mut Frame,
    area: Rect,
) {
    let mut lines: Vec<Line> = Vec::new();

    for (i, entry) in files.iter().enumerate() {
        let marker = if i == cursor { "  > " } else { "    " };
        let info = format!(
            "  {} topic{}, {} prompt{}, {}",
            entry.topic_count,
            plural(entry.topic_count),
            entry.prompt_count,
            plural(entry.prompt_count),
            format_size(entry.size_bytes, BINARY)
        );
        let spans = vec![
            Span::raw(marker),
            Span::styled(entry.name.clone(), theme::STYLE_IMPORTANT),
            Span::styled(info, theme::STYLE_DIM),
        ];

        let line = if i == cursor {
            Line::from(spans).style(theme::STYLE_CURSOR)
        } else {
            Line::from(spans)
        };
        lines.push(line);
    }

    if files.is_empty() {
        lines.push(Line::from(Span::styled("  (no topic files found)", theme::STYLE_DIM)));
        if let Some(store) = session.store() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  [Enter] continue with {}", store.name()),
                theme::STYLE_INTERACTIVE,
            )));
        }
    }

    let paragraph = Paragraph::new(lines).scroll((scroll_offset(cursor, area.height), 0));
    frame.render_widget(paragraph, area);
}

// ============================================================================
// SCREEN: SELECT TOPICS
// ============================================================================

fn render_select_topics(session: &Session, cursor: usize, frame: &mut Frame, area: Rect) {
    // Split: topic list + proceed line
    let chunks = Layout::vertical([
        Constraint::Min(0),    // list
        Constraint::Length(1), // proceed
    ])
    .split(area);

    let store = session.store();
    let mut lines: Vec<Line> = Vec::new();

    for (i, row) in topic_rows(session.selection()).into_iter().enumerate() {
        let checkbox = if row.selected {
            Span::styled("[x] ", theme::STYLE_CHECKED)
        } else {
            Span::styled("[ ] ", theme::STYLE_UNCHECKED)
        };
        let count = store.map(|s| s.prompts_for(&row.name).len()).unwrap_or(0);

        let spans = vec![
            Span::raw("  "),
            checkbox,
            Span::styled(row.name, theme::STYLE_IMPORTANT),
            Span::styled(format!("  {} prompt{}", count, plural(count)), theme::STYLE_DIM),
        ];

        let line = if i == cursor {
            Line::from(spans).style(theme::STYLE_CURSOR)
        } else {
            Line::from(spans)
        };
        lines.push(line);
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled("  (no topics in this file)", theme::STYLE_DIM)));
    }

    let list = Paragraph::new(lines).scroll((scroll_offset(cursor, chunks[0].height), 0));
    frame.render_widget(list, chunks[0]);

    let proceed = if can_proceed(session.selection()) {
        let n = session.selection().len();
        Span::styled(
            format!("  [Enter] Run prompts ({} topic{})", n, plural(n)),
            theme::STYLE_INTERACTIVE,
        )
    } else {
        Span::styled("  Run prompts (select at least one topic)", theme::STYLE_DIM)
    };
    frame.render_widget(Paragraph::new(proceed), chunks[1]);
}

// ============================================================================
// SCREEN: DISPLAY PROMPTS
// ============================================================================

fn render_display_prompts(session: &Session, cursor: &Cursor, frame: &mut Frame, area: Rect) {
    let view = prompt_view(session.sequencer(), cursor);

    let prompt_style = if view.finished {
        theme::STYLE_INTERACTIVE
    } else {
        theme::STYLE_IMPORTANT
    };

    let lines = vec![
        Line::from(Span::styled(format!("  {}", view.counter), theme::STYLE_DIM)),
        Line::from(""),
        Line::from(Span::styled(format!("  {}", view.prompt), prompt_style)),
        Line::from(""),
        Line::from(Span::styled(format!("  {}", view.answer), theme::STYLE_ANSWER)),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

// ============================================================================
// SCREEN: CREATE TOPIC
// ============================================================================

fn render_create_topic(form: &TopicForm, frame: &mut Frame, area: Rect) {
    let field = |label: &'static str, value: &str, which: FormField| {
        let label_style = if form.focus == which {
            theme::STYLE_FOCUSED
        } else {
            theme::STYLE_DIM
        };
        let caret = if form.focus == which { "_" } else { "" };
        Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{:<10}", label), label_style),
            Span::raw(" "),
            Span::raw(format!("{}{}", value, caret)),
        ])
    };

    let mut lines = vec![
        Line::from(""),
        field("File", &form.file_name, FormField::FileName),
        field("Topic", &form.topic_name, FormField::TopicName),
        Line::from(""),
        field("Prompt", &form.prompt, FormField::Prompt),
        field("Answer", &form.answer, FormField::Answer),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {} prompt{} added", form.pairs.len(), plural(form.pairs.len())),
            theme::STYLE_DIM,
        )),
    ];

    for pair in &form.pairs {
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::raw(pair.prompt.clone()),
            Span::styled(" -> ", theme::STYLE_DIM),
            Span::styled(pair.answer.clone(), theme::STYLE_ANSWER),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::store::TopicStore;
    use crate::types::{PromptPair, Topic};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::path::PathBuf;

    fn at(index: usize, showing_answer: bool) -> Cursor {
        Cursor {
            index,
            showing_answer,
        }
    }

    fn make_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 20);
        Terminal::new(backend).unwrap()
    }

    fn sample_session() -> Session {
        Session::with_store(TopicStore::from_topics(vec![
            Topic::new(
                "Ports",
                vec![PromptPair::new("HTTP", "80"), PromptPair::new("HTTPS", "443")],
            ),
            Topic::new("Connectors", vec![PromptPair::new("RJ45", "Ethernet")]),
        ]))
    }

    fn app_on(screen: Screen, session: Session) -> App {
        let mut app = App::new(AppConfig::default(), session, Vec::new());
        app.screen = screen;
        app
    }

    fn rendered_text(app: &App) -> String {
        let mut terminal = make_terminal();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    #[test]
    fn intro_shows_loaded_file() {
        let content = rendered_text(&app_on(Screen::Intro, sample_session()));
        assert!(content.contains("Press any key to start"));
        assert!(content.contains("(memory)"));
        assert!(content.contains("2 topics"));
    }

    #[test]
    fn intro_without_store_renders() {
        let content = rendered_text(&app_on(Screen::Intro, Session::empty()));
        assert!(content.contains("No topic file loaded"));
    }

    #[test]
    fn choose_file_lists_entries_with_counts() {
        let mut app = app_on(Screen::choose_file(), Session::empty());
        app.files = vec![TopicFileEntry {
            name: "networking.json".into(),
            path: PathBuf::from("/t/networking.json"),
            topic_count: 2,
            prompt_count: 3,
            size_bytes: 100,
        }];
        let content = rendered_text(&app);
        assert!(content.contains("networking.json"));
        assert!(content.contains("2 topics, 3 prompts"));
    }

    #[test]
    fn choose_file_empty_offers_loaded_store() {
        let content = rendered_text(&app_on(Screen::choose_file(), sample_session()));
        assert!(content.contains("no topic files found"));
        assert!(content.contains("continue with (memory)"));
    }

    #[test]
    fn select_topics_shows_checkboxes_and_disabled_proceed() {
        let mut session = sample_session();
        session.toggle("Connectors");
        let content = rendered_text(&app_on(Screen::select_topics(), session));
        assert!(content.contains("[ ] Ports"));
        assert!(content.contains("[x] Connectors"));
        assert!(content.contains("Run prompts (1 topic)"));

        let content = rendered_text(&app_on(Screen::select_topics(), sample_session()));
        assert!(content.contains("select at least one topic"));
    }

    #[test]
    fn display_prompts_shows_prompt_counter_and_answer() {
        let mut session = sample_session();
        session.toggle("Ports");
        session.begin(&mut StdRng::seed_from_u64(0), false).unwrap();

        let hidden = rendered_text(&app_on(Screen::display_prompts(), session.clone()));
        assert!(hidden.contains("HTTP"));
        assert!(hidden.contains("1 / 2"));
        assert!(!hidden.contains("80"));

        let screen = Screen::DisplayPrompts {
            cursor: at(0, true),
        };
        let revealed = rendered_text(&app_on(screen, session));
        assert!(revealed.contains("80"));
    }

    #[test]
    fn display_prompts_past_end_shows_out_of_prompts() {
        let mut session = sample_session();
        session.toggle("Connectors");
        session.begin(&mut StdRng::seed_from_u64(0), false).unwrap();

        let screen = Screen::DisplayPrompts {
            cursor: at(1, false),
        };
        let content = rendered_text(&app_on(screen, session));
        assert!(content.contains("Out of prompts!"));
        assert!(!content.contains("1 / 1"));
    }

    #[test]
    fn create_topic_shows_fields_and_pairs() {
        let mut form = TopicForm::new("topic.json");
        form.topic_name = "Ports".into();
        form.pairs.push(PromptPair::new("SSH", "22"));
        let content = rendered_text(&app_on(Screen::CreateTopic { form }, Session::empty()));
        assert!(content.contains("topic.json"));
        assert!(content.contains("Ports_"));
        assert!(content.contains("1 prompt added"));
        assert!(content.contains("SSH -> 22"));
    }

    #[test]
    fn status_message_is_rendered() {
        let mut app = app_on(Screen::Intro, Session::empty());
        app.status = Some("File not found, create one".into());
        assert!(rendered_text(&app).contains("File not found, create one"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();
        let app = app_on(Screen::select_topics(), sample_session());
        terminal
            .draw(|frame| render(&app, frame))
            .expect("render should not panic");
    }
}
