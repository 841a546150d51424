use crate::app::MenuItem;
use crate::state::analysis::AnalysisState;
use domino_api::{GameState, Team};

const MAX_NAME_LEN: usize = 24;
const MAX_NUMBER_LEN: usize = 9;

// ---------------------------------------------------------------------------
// Splash / overlay animation state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AnimationState {
    /// Current frame index into the banner frames array, wraps at FRAME_COUNT.
    pub frame: usize,
    /// Monotonic tick counter. Drives the bouncing highlight and overlay blink.
    pub tick: u64,
}

impl AnimationState {
    pub fn advance(&mut self, frame_count: usize) {
        self.tick = self.tick.wrapping_add(1);
        self.frame = (self.frame + 1) % frame_count;
    }
}

// ---------------------------------------------------------------------------
// Text entry prompt
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Points(Team),
    Target,
    TeamName(Team),
}

impl PromptKind {
    pub fn is_numeric(&self) -> bool {
        !matches!(self, PromptKind::TeamName(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

impl Prompt {
    pub fn new(kind: PromptKind) -> Self {
        Self { kind, input: String::new() }
    }

    pub fn with_input(kind: PromptKind, input: impl Into<String>) -> Self {
        Self { kind, input: input.into() }
    }

    /// Numeric prompts take digits and a leading minus; name prompts take any
    /// printable character. Both are length-capped.
    pub fn push_char(&mut self, c: char) {
        if self.kind.is_numeric() {
            let accepted = c.is_ascii_digit() || (c == '-' && self.input.is_empty());
            if accepted && self.input.len() < MAX_NUMBER_LEN {
                self.input.push(c);
            }
        } else if !c.is_control() && self.input.chars().count() < MAX_NAME_LEN {
            self.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }
}

// ---------------------------------------------------------------------------
// Round history list
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct HistoryState {
    /// Index into the newest-first round list.
    pub selected: usize,
}

impl HistoryState {
    pub fn select_down(&mut self, len: usize) {
        let max = len.saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_intro: bool,
    pub show_logs: bool,
    pub game: GameState,
    pub analysis: AnalysisState,
    pub history: HistoryState,
    pub prompt: Option<Prompt>,
    pub confirm_reset: bool,
    pub animation: AnimationState,
}

impl AppState {
    pub fn new(game: GameState) -> Self {
        Self {
            show_intro: true,
            game,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_prompt_filters_input() {
        let mut prompt = Prompt::new(PromptKind::Points(Team::A));
        for c in "-1a2.3-".chars() {
            prompt.push_char(c);
        }
        assert_eq!(prompt.input, "-123");
        prompt.backspace();
        assert_eq!(prompt.input, "-12");
    }

    #[test]
    fn numeric_prompt_is_length_capped() {
        let mut prompt = Prompt::new(PromptKind::Target);
        for _ in 0..20 {
            prompt.push_char('9');
        }
        assert_eq!(prompt.input.len(), MAX_NUMBER_LEN);
    }

    #[test]
    fn name_prompt_takes_text_up_to_the_cap() {
        let mut prompt = Prompt::new(PromptKind::TeamName(Team::B));
        for c in "Los Primos del Barrio Norte Unidos".chars() {
            prompt.push_char(c);
        }
        assert_eq!(prompt.input.chars().count(), MAX_NAME_LEN);
        assert!(prompt.input.starts_with("Los Primos"));
    }

    #[test]
    fn history_selection_stays_in_bounds() {
        let mut history = HistoryState::default();
        history.select_up();
        assert_eq!(history.selected, 0);
        for _ in 0..5 {
            history.select_down(3);
        }
        assert_eq!(history.selected, 2);
        history.clamp(1);
        assert_eq!(history.selected, 0);
        history.clamp(0);
        assert_eq!(history.selected, 0);
    }
}
