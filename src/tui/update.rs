//! State transitions: (Screen, Action) -> Transition.
//!
//! The navigation state machine of the TUI. No terminal and no file I/O:
//! topic toggles are applied to the session directly, everything that
//! touches disk or randomness is returned as an `Effect`. Unhandled
//! actions return the current screen unchanged.

use crate::navigator::{Cursor, can_proceed};
use crate::session::Session;

use super::state::{Action, Effect, Screen, TopicForm, Transition};

/// State transition function.
///
/// `file_count` is the number of entries in the file chooser.
pub fn update(
    screen: Screen,
    action: &Action,
    session: &mut Session,
    file_count: usize,
) -> Transition {
    match screen {
        Screen::Intro => update_intro(action),
        Screen::ChooseFile { cursor } => update_choose_file(cursor, action, session, file_count),
        Screen::SelectTopics { cursor } => update_select_topics(cursor, action, session),
        Screen::DisplayPrompts { cursor } => update_display_prompts(cursor, action, session),
        Screen::CreateTopic { form } => update_create_topic(form, action),
    }
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// Intro: any key moves on to the file chooser.
fn update_intro(action: &Action) -> Transition {
    match action {
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::choose_file()),
    }
}

/// ChooseFile: pick a scanned file, or continue with the loaded one.
fn update_choose_file(
    cursor: usize,
    action: &Action,
    session: &Session,
    len: usize,
) -> Transition {
    match action {
        Action::MoveUp => Transition::Screen(Screen::ChooseFile {
            cursor: cursor.saturating_sub(1),
        }),
        Action::MoveDown => Transition::Screen(Screen::ChooseFile {
            cursor: clamp_down(cursor, len),
        }),
        Action::Enter => {
            if cursor < len {
                Transition::Effect(Effect::LoadFile { index: cursor })
            } else if session.store().is_some() {
                // Nothing scanned, keep the file loaded at startup
                Transition::Screen(Screen::select_topics())
            } else {
                Transition::Screen(Screen::ChooseFile { cursor })
            }
        }
        Action::NewTopic => {
            let file_name = session
                .store()
                .map(|s| s.name())
                .unwrap_or_else(|| "topic.json".to_string());
            Transition::Screen(Screen::create_topic(file_name))
        }
        // Every return to the intro starts over
        Action::Back => Transition::Effect(Effect::Reset),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::ChooseFile { cursor }),
    }
}

/// SelectTopics: toggle topics, proceed once at least one is picked.
fn update_select_topics(cursor: usize, action: &Action, session: &mut Session) -> Transition {
    let len = session.selection().known().len();

    match action {
        Action::MoveUp => Transition::Screen(Screen::SelectTopics {
            cursor: cursor.saturating_sub(1),
        }),
        Action::MoveDown => Transition::Screen(Screen::SelectTopics {
            cursor: clamp_down(cursor, len),
        }),
        Action::ToggleSelection => {
            if let Some(name) = session.selection().known().get(cursor).cloned() {
                session.toggle(&name);
            }
            Transition::Screen(Screen::SelectTopics { cursor })
        }
        Action::SelectAll => {
            session.select_all();
            Transition::Screen(Screen::SelectTopics { cursor })
        }
        Action::SelectNone => {
            session.deselect_all();
            Transition::Screen(Screen::SelectTopics { cursor })
        }
        Action::Enter => {
            if can_proceed(session.selection()) {
                Transition::Effect(Effect::StartStudy)
            } else {
                // Proceed is disabled until something is picked
                Transition::Screen(Screen::SelectTopics { cursor })
            }
        }
        Action::Back => Transition::Screen(Screen::choose_file()),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::SelectTopics { cursor }),
    }
}

/// DisplayPrompts: step through the working sequence.
///
/// Past the last prompt only Enter (back to intro, full reset), Retreat,
/// Back and Home do anything.
fn update_display_prompts(mut cursor: Cursor, action: &Action, session: &Session) -> Transition {
    let len = session.sequencer().len();

    match action {
        Action::Advance => {
            cursor.advance(len);
            Transition::Screen(Screen::DisplayPrompts { cursor })
        }
        Action::Enter => {
            if cursor.is_finished(len) {
                Transition::Effect(Effect::Reset)
            } else {
                cursor.advance(len);
                Transition::Screen(Screen::DisplayPrompts { cursor })
            }
        }
        Action::Retreat => {
            cursor.retreat();
            Transition::Screen(Screen::DisplayPrompts { cursor })
        }
        Action::Reshuffle => Transition::Effect(Effect::Reshuffle),
        Action::Back => Transition::Screen(Screen::select_topics()),
        Action::Home => Transition::Effect(Effect::Reset),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::DisplayPrompts { cursor }),
    }
}

/// CreateTopic: edit the form, commit pairs, save.
fn update_create_topic(mut form: TopicForm, action: &Action) -> Transition {
    match action {
        Action::Input(c) => form.push_char(*c),
        Action::Backspace => form.pop_char(),
        Action::NextField => form.focus = form.focus.next(),
        Action::Enter => {
            if !form.commit_pair() {
                form.focus = form.focus.next();
            }
        }
        Action::Save => return Transition::Effect(Effect::SaveTopic { form }),
        Action::Back => return Transition::Screen(Screen::choose_file()),
        Action::Quit => return Transition::Quit,
        _ => {}
    }
    Transition::Screen(Screen::CreateTopic { form })
}

fn clamp_down(cursor: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (cursor + 1).min(len - 1) }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TopicStore;
    use crate::tui::state::FormField;
    use crate::types::{PromptPair, Topic};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session() -> Session {
        Session::with_store(TopicStore::from_topics(vec![
            Topic::new(
                "Ports",
                vec![PromptPair::new("HTTP", "80"), PromptPair::new("HTTPS", "443")],
            ),
            Topic::new("Connectors", vec![PromptPair::new("RJ45", "Ethernet")]),
        ]))
    }

    fn studying(names: &[&str]) -> Session {
        let mut s = session();
        for name in names {
            s.toggle(name);
        }
        let mut rng = StdRng::seed_from_u64(0);
        s.begin(&mut rng, false).unwrap();
        s
    }

    fn prompts_at(index: usize, showing_answer: bool) -> Screen {
        let cursor = Cursor {
            index,
            showing_answer,
        };
        Screen::DisplayPrompts { cursor }
    }

    // -- Intro --

    #[test]
    fn intro_any_key_opens_file_chooser() {
        for action in [Action::AnyKey, Action::Enter, Action::MoveDown] {
            let result = update(Screen::Intro, &action, &mut session(), 0);
            assert_eq!(result, Transition::Screen(Screen::choose_file()));
        }
    }

    #[test]
    fn intro_quit() {
        assert_eq!(update(Screen::Intro, &Action::Quit, &mut session(), 0), Transition::Quit);
    }

    // -- ChooseFile --

    #[test]
    fn choose_file_cursor_clamps() {
        let mut s = session();
        let down = update(Screen::ChooseFile { cursor: 1 }, &Action::MoveDown, &mut s, 2);
        assert_eq!(down, Transition::Screen(Screen::ChooseFile { cursor: 1 }));

        let up = update(Screen::choose_file(), &Action::MoveUp, &mut s, 2);
        assert_eq!(up, Transition::Screen(Screen::choose_file()));
    }

    #[test]
    fn choose_file_enter_loads_highlighted_file() {
        let result = update(Screen::ChooseFile { cursor: 1 }, &Action::Enter, &mut session(), 3);
        assert_eq!(result, Transition::Effect(Effect::LoadFile { index: 1 }));
    }

    #[test]
    fn choose_file_enter_without_files_keeps_loaded_store() {
        let result = update(Screen::choose_file(), &Action::Enter, &mut session(), 0);
        assert_eq!(result, Transition::Screen(Screen::select_topics()));
    }

    #[test]
    fn choose_file_enter_with_nothing_is_noop() {
        let result = update(Screen::choose_file(), &Action::Enter, &mut Session::empty(), 0);
        assert_eq!(result, Transition::Screen(Screen::choose_file()));
    }

    #[test]
    fn choose_file_new_topic_prefills_loaded_file_name() {
        let result = update(Screen::choose_file(), &Action::NewTopic, &mut Session::empty(), 0);
        assert_eq!(result, Transition::Screen(Screen::create_topic("topic.json")));
    }

    #[test]
    fn choose_file_back_resets_to_intro() {
        let mut s = session();
        s.toggle("Ports");
        let result = update(Screen::choose_file(), &Action::Back, &mut s, 2);
        assert_eq!(result, Transition::Effect(Effect::Reset));
    }

    // -- SelectTopics --

    #[test]
    fn select_topics_toggle_picks_topic_under_cursor() {
        let mut s = session();
        let screen = Screen::SelectTopics { cursor: 1 };
        let result = update(screen, &Action::ToggleSelection, &mut s, 0);
        assert_eq!(result, Transition::Screen(Screen::SelectTopics { cursor: 1 }));
        assert!(s.selection().is_selected("Connectors"));

        update(Screen::SelectTopics { cursor: 1 }, &Action::ToggleSelection, &mut s, 0);
        assert!(!s.selection().is_selected("Connectors"));
    }

    #[test]
    fn select_topics_enter_refused_without_selection() {
        let mut s = session();
        let result = update(Screen::select_topics(), &Action::Enter, &mut s, 0);
        assert_eq!(result, Transition::Screen(Screen::select_topics()));
    }

    #[test]
    fn select_topics_enter_starts_study_with_selection() {
        let mut s = session();
        update(Screen::select_topics(), &Action::SelectAll, &mut s, 0);
        assert_eq!(s.selection().len(), 2);

        let result = update(Screen::select_topics(), &Action::Enter, &mut s, 0);
        assert_eq!(result, Transition::Effect(Effect::StartStudy));
    }

    #[test]
    fn select_topics_select_none_clears() {
        let mut s = session();
        s.select_all();
        update(Screen::select_topics(), &Action::SelectNone, &mut s, 0);
        assert!(s.selection().is_empty());
    }

    #[test]
    fn select_topics_back_returns_to_chooser() {
        let result = update(Screen::select_topics(), &Action::Back, &mut session(), 0);
        assert_eq!(result, Transition::Screen(Screen::choose_file()));
    }

    // -- DisplayPrompts --

    #[test]
    fn advance_reveals_answer_then_next_prompt() {
        let mut s = studying(&["Ports"]);
        let revealed = update(Screen::display_prompts(), &Action::Advance, &mut s, 0);
        assert_eq!(revealed, Transition::Screen(prompts_at(0, true)));

        let next = update(prompts_at(0, true), &Action::Advance, &mut s, 0);
        assert_eq!(next, Transition::Screen(prompts_at(1, false)));
    }

    #[test]
    fn retreat_shows_previous_with_answer() {
        let mut s = studying(&["Ports"]);
        let result = update(prompts_at(1, false), &Action::Retreat, &mut s, 0);
        assert_eq!(result, Transition::Screen(prompts_at(0, true)));
    }

    #[test]
    fn walking_past_end_then_enter_resets() {
        let mut s = studying(&["Ports", "Connectors"]);
        let mut screen = Screen::display_prompts();

        // 3 prompts: reveal + next for each, the last "next" hits the end
        for _ in 0..6 {
            screen = match update(screen, &Action::Enter, &mut s, 0) {
                Transition::Screen(next) => next,
                other => panic!("Expected Screen, got {:?}", other),
            };
        }
        assert_eq!(screen, prompts_at(3, false));

        // Advance past the end is a soft stop
        let stay = update(screen.clone(), &Action::Advance, &mut s, 0);
        assert_eq!(stay, Transition::Screen(prompts_at(3, false)));

        // Enter confirms and returns to the intro with a reset
        let result = update(screen, &Action::Enter, &mut s, 0);
        assert_eq!(result, Transition::Effect(Effect::Reset));
    }

    #[test]
    fn display_prompts_back_keeps_selection() {
        let mut s = studying(&["Ports"]);
        let result = update(prompts_at(0, false), &Action::Back, &mut s, 0);
        assert_eq!(result, Transition::Screen(Screen::select_topics()));
        assert!(s.selection().is_selected("Ports"));
    }

    #[test]
    fn display_prompts_home_and_reshuffle_are_effects() {
        let mut s = studying(&["Ports"]);
        assert_eq!(
            update(prompts_at(1, true), &Action::Home, &mut s, 0),
            Transition::Effect(Effect::Reset)
        );
        assert_eq!(
            update(prompts_at(1, true), &Action::Reshuffle, &mut s, 0),
            Transition::Effect(Effect::Reshuffle)
        );
    }

    // -- CreateTopic --

    #[test]
    fn create_topic_typing_and_commit() {
        let mut s = session();
        let mut screen = Screen::create_topic("t.json");
        let actions = [
            Action::Input('P'),
            Action::Enter, // topic name -> prompt
            Action::Input('q'),
            Action::NextField,
            Action::Input('a'),
            Action::Enter, // commit pair
        ];
        for action in &actions {
            screen = match update(screen, action, &mut s, 0) {
                Transition::Screen(next) => next,
                other => panic!("Expected Screen, got {:?}", other),
            };
        }

        match screen {
            Screen::CreateTopic { form } => {
                assert_eq!(form.topic_name, "P");
                assert_eq!(form.pairs, vec![PromptPair::new("q", "a")]);
                assert_eq!(form.focus, FormField::Prompt);
            }
            other => panic!("Expected CreateTopic, got {:?}", other),
        }
    }

    #[test]
    fn create_topic_save_emits_effect() {
        let form = TopicForm::new("t.json");
        let result = update(
            Screen::CreateTopic { form: form.clone() },
            &Action::Save,
            &mut session(),
            0,
        );
        assert_eq!(result, Transition::Effect(Effect::SaveTopic { form }));
    }

    #[test]
    fn create_topic_back_discards_form() {
        let result = update(Screen::create_topic("t.json"), &Action::Back, &mut session(), 0);
        assert_eq!(result, Transition::Screen(Screen::choose_file()));
    }
}
