// extensions/typing.rs
//
// Typewriter effect for the hero subtitle.
// Types a phrase out, holds it, deletes it, moves to the next phrase, forever.
//
// Usage:
//   let mut tw = Typewriter::new(phrases, TypingTimings::default());
//   let step = tw.step();      // text to show now
//   schedule(step.next_delay_ms);

use serde::{Deserialize, Serialize};

/// Per-step delays of the typewriter, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingTimings {
    /// Before the very first character.
    pub start_ms: u32,
    pub type_ms: u32,
    pub delete_ms: u32,
    /// Hold with the full phrase shown.
    pub hold_ms: u32,
    /// Empty pause before the next phrase starts.
    pub next_phrase_ms: u32,
}

impl Default for TypingTimings {
    fn default() -> Self {
        Self {
            start_ms: 1000,
            type_ms: 100,
            delete_ms: 50,
            hold_ms: 2000,
            next_phrase_ms: 500,
        }
    }
}

/// Result of one typewriter step: what to display and when to step again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingStep {
    pub text: String,
    pub next_delay_ms: u32,
}

/// Typewriter state over a fixed phrase list. Counts characters, not bytes,
/// so Persian text is typed one letter at a time.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    timings: TypingTimings,
    phrase: usize,
    chars: usize,
    deleting: bool,
}

impl Typewriter {
    /// Empty phrases are dropped; they would never reach a hold point.
    pub fn new<S: AsRef<str>>(phrases: &[S], timings: TypingTimings) -> Self {
        Self {
            phrases: phrases
                .iter()
                .map(|p| p.as_ref().chars().collect::<Vec<_>>())
                .filter(|p| !p.is_empty())
                .collect(),
            timings,
            phrase: 0,
            chars: 0,
            deleting: false,
        }
    }

    pub fn timings(&self) -> &TypingTimings {
        &self.timings
    }

    /// Delay before the first `step`.
    pub fn start_delay_ms(&self) -> u32 {
        self.timings.start_ms
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Type or delete one character. None when there is nothing to type.
    pub fn step(&mut self) -> Option<TypingStep> {
        let current = self.phrases.get(self.phrase)?;
        let len = current.len();

        let mut delay = if self.deleting {
            self.chars = self.chars.saturating_sub(1);
            self.timings.delete_ms
        } else {
            self.chars = (self.chars + 1).min(len);
            self.timings.type_ms
        };
        let text: String = current[..self.chars].iter().collect();

        if !self.deleting && self.chars == len {
            self.deleting = true;
            delay = self.timings.hold_ms;
        } else if self.deleting && self.chars == 0 {
            self.deleting = false;
            self.phrase = (self.phrase + 1) % self.phrases.len();
            delay = self.timings.next_phrase_ms;
        }

        Some(TypingStep {
            text,
            next_delay_ms: delay,
        })
    }

    /// Swap in another phrase list and start over from the first phrase.
    pub fn restart<S: AsRef<str>>(&mut self, phrases: &[S]) {
        *self = Self::new(phrases, self.timings);
    }
}
