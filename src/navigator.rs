//! Prompt cursor and the data each screen hands to the renderer.
//!
//! The cursor is an index into the working sequence plus a "showing answer"
//! flag. An index equal to the sequence length means the user has gone past
//! the last prompt.

use tracing::debug;

use crate::error::SequenceError;
use crate::selection::TopicSelectionSet;
use crate::sequencer::PromptSequencer;
use crate::types::PromptField;

/// Prompt text shown once the sequence is exhausted.
pub const END_OF_PROMPTS: &str = "Out of prompts! Press Enter to return to start...";

// ============================================================================
// CURSOR
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub index: usize,
    pub showing_answer: bool,
}

/// Result of advancing the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Same prompt, answer now visible.
    RevealedAnswer,
    /// Moved to the next prompt, answer hidden.
    NextPrompt,
    /// No more prompts. Soft terminal condition, not an error.
    EndOfSequence,
}

impl Cursor {
    /// `(0, false)`: first prompt, answer hidden.
    pub fn start() -> Self {
        Cursor::default()
    }

    /// Reveal the answer, or move on if it is already showing.
    pub fn advance(&mut self, len: usize) -> Step {
        let step = if self.index >= len {
            Step::EndOfSequence
        } else if !self.showing_answer {
            self.showing_answer = true;
            Step::RevealedAnswer
        } else {
            self.index += 1;
            self.showing_answer = false;
            if self.index >= len {
                Step::EndOfSequence
            } else {
                Step::NextPrompt
            }
        };

        debug!(index = self.index, len, ?step, "Cursor advanced");
        step
    }

    /// Step back one prompt and show it with its answer.
    ///
    /// Returns false (and changes nothing) at the first prompt.
    pub fn retreat(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.showing_answer = true;
        debug!(index = self.index, "Cursor retreated");
        true
    }

    pub fn is_finished(&self, len: usize) -> bool {
        self.index >= len
    }
}

// ============================================================================
// VIEW DATA
// ============================================================================

/// One line of the topic picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRow {
    pub name: String,
    pub selected: bool,
}

/// Everything needed to draw the prompt screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptView {
    pub prompt: String,
    /// Empty while the answer is hidden.
    pub answer: String,
    /// "3 / 10", or empty once finished.
    pub counter: String,
    pub finished: bool,
}

/// Topic picker rows in file order.
pub fn topic_rows(selection: &TopicSelectionSet) -> Vec<TopicRow> {
    selection
        .known()
        .iter()
        .map(|name| TopicRow {
            name: name.clone(),
            selected: selection.is_selected(name),
        })
        .collect()
}

/// Whether the "run prompts" action is enabled.
pub fn can_proceed(selection: &TopicSelectionSet) -> bool {
    !selection.is_empty()
}

/// Position counter: 1-based index over total, empty past the end.
pub fn counter(cursor: &Cursor, len: usize) -> String {
    if cursor.index < len {
        format!("{} / {}", cursor.index + 1, len)
    } else {
        String::new()
    }
}

/// Build the prompt screen contents for the current cursor.
pub fn prompt_view(sequencer: &PromptSequencer, cursor: &Cursor) -> PromptView {
    let len = sequencer.len();

    let prompt = match sequencer.field(cursor.index, PromptField::Prompt) {
        Ok(text) => text.to_string(),
        Err(SequenceError::IndexOutOfRange { .. }) => {
            return PromptView {
                prompt: END_OF_PROMPTS.to_string(),
                answer: String::new(),
                counter: String::new(),
                finished: true,
            };
        }
        Err(e) => e.to_string(),
    };

    let answer = if cursor.showing_answer {
        sequencer
            .field(cursor.index, PromptField::Answer)
            .map(str::to_string)
            .unwrap_or_default()
    } else {
        String::new()
    };

    PromptView {
        prompt,
        answer,
        counter: counter(cursor, len),
        finished: false,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TopicStore;
    use crate::types::{PromptPair, Topic};

    fn at(index: usize, showing_answer: bool) -> Cursor {
        Cursor {
            index,
            showing_answer,
        }
    }

    fn loaded(names: &[&str]) -> (PromptSequencer, TopicSelectionSet) {
        let store = TopicStore::from_topics(vec![
            Topic::new(
                "Ports",
                vec![PromptPair::new("HTTP", "80"), PromptPair::new("HTTPS", "443")],
            ),
            Topic::new("Connectors", vec![PromptPair::new("RJ45", "Ethernet")]),
        ]);
        let mut sel = TopicSelectionSet::for_store(&store);
        for name in names {
            sel.toggle(name);
        }
        let mut seq = PromptSequencer::new();
        seq.rebuild(&store, &sel);
        (seq, sel)
    }

    #[test]
    fn advance_reveals_then_moves_on() {
        let mut cursor = Cursor::start();
        assert_eq!(cursor.advance(3), Step::RevealedAnswer);
        assert_eq!(cursor, at(0, true));

        assert_eq!(cursor.advance(3), Step::NextPrompt);
        assert_eq!(cursor, at(1, false));
    }

    #[test]
    fn advancing_past_last_prompt_signals_end() {
        let mut cursor = at(2, true);
        assert_eq!(cursor.advance(3), Step::EndOfSequence);
        assert!(cursor.is_finished(3));

        // Stays at end
        assert_eq!(cursor.advance(3), Step::EndOfSequence);
        assert_eq!(cursor.index, 3);
    }

    #[test]
    fn empty_sequence_is_immediately_finished() {
        let mut cursor = Cursor::start();
        assert_eq!(cursor.advance(0), Step::EndOfSequence);
    }

    #[test]
    fn retreat_shows_previous_with_answer() {
        let mut cursor = at(2, false);
        assert!(cursor.retreat());
        assert_eq!(cursor, at(1, true));
    }

    #[test]
    fn retreat_at_start_is_noop() {
        let mut cursor = Cursor::start();
        assert!(!cursor.retreat());
        assert_eq!(cursor, Cursor::start());
    }

    #[test]
    fn retreat_from_end_returns_to_last_prompt() {
        let mut cursor = at(3, false);
        assert!(cursor.retreat());
        assert_eq!(cursor, at(2, true));
        assert!(!cursor.is_finished(3));
    }

    #[test]
    fn walking_three_prompts_then_one_more_ends() {
        let (seq, _) = loaded(&["Ports", "Connectors"]);
        assert_eq!(seq.len(), 3);

        let mut cursor = Cursor::start();
        let steps: Vec<Step> = (0..6).map(|_| cursor.advance(seq.len())).collect();
        assert_eq!(
            steps,
            vec![
                Step::RevealedAnswer,
                Step::NextPrompt,
                Step::RevealedAnswer,
                Step::NextPrompt,
                Step::RevealedAnswer,
                Step::EndOfSequence,
            ]
        );
    }

    #[test]
    fn counter_is_one_based() {
        assert_eq!(counter(&Cursor::start(), 3), "1 / 3");
        assert_eq!(counter(&at(2, true), 3), "3 / 3");
        assert_eq!(counter(&at(3, false), 3), "");
    }

    #[test]
    fn prompt_view_hides_answer_until_revealed() {
        let (seq, _) = loaded(&["Ports"]);
        let mut cursor = Cursor::start();

        let view = prompt_view(&seq, &cursor);
        assert_eq!(view.prompt, "HTTP");
        assert_eq!(view.answer, "");
        assert_eq!(view.counter, "1 / 2");

        cursor.advance(seq.len());
        assert_eq!(prompt_view(&seq, &cursor).answer, "80");
    }

    #[test]
    fn prompt_view_past_end_shows_out_of_prompts() {
        let (seq, _) = loaded(&["Connectors"]);
        let view = prompt_view(&seq, &at(1, false));
        assert!(view.finished);
        assert_eq!(view.prompt, END_OF_PROMPTS);
        assert_eq!(view.answer, "");
        assert_eq!(view.counter, "");
    }

    #[test]
    fn topic_rows_flag_selected_topics() {
        let (_, sel) = loaded(&["Connectors"]);
        assert_eq!(
            topic_rows(&sel),
            vec![
                TopicRow {
                    name: "Ports".into(),
                    selected: false,
                },
                TopicRow {
                    name: "Connectors".into(),
                    selected: true,
                },
            ]
        );
        assert!(can_proceed(&sel));
    }

    #[test]
    fn cannot_proceed_without_selection() {
        let (_, sel) = loaded(&[]);
        assert!(!can_proceed(&sel));
    }
}
