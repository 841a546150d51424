use crate::state::analysis::AnalysisTicket;
use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use domino_api::{Analysis, GameState};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    /// Commentary for a frozen copy of the game, tagged so late replies can be dropped.
    Analyze { ticket: AnalysisTicket, snapshot: GameState },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    AnalysisFinished { ticket: AnalysisTicket, result: Result<Analysis, String> },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AnimationTick,
}
