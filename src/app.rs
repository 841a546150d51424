use crate::state::analysis::AnalysisTicket;
use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, Prompt, PromptKind};
use crate::state::session::{self, Action, Phase};
use domino_api::{Analysis, GameState, Team};
use log::{debug, info, warn};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Board,
    Analysis,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        Self::with_settings(AppSettings::load())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        let game = GameState {
            team_a_name: settings.team_a_name.clone(),
            team_b_name: settings.team_b_name.clone(),
            rounds: Vec::new(),
            winning_score: settings.winning_score,
        };

        let app = Self {
            state: AppState::new(game),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }
        // Only now can warnings pass the configured level.
        for problem in &app.settings.rejected {
            warn!("{problem}");
        }

        app
    }

    // -----------------------------------------------------------------------
    // Session engine: every game change goes through here
    // -----------------------------------------------------------------------

    pub fn dispatch(&mut self, action: Action) {
        debug!("dispatch {action:?}");
        let is_reset = action == Action::Reset;
        self.state.game = session::reduce(&self.state.game, action);
        if is_reset {
            self.state.analysis.clear();
            self.state.confirm_reset = false;
            info!("game reset");
        }
        self.state.history.clamp(self.state.game.rounds.len());
    }

    pub fn phase(&self) -> Phase {
        session::phase(&self.state.game)
    }

    pub fn winner(&self) -> Option<Team> {
        self.state.game.winner()
    }

    fn is_won(&self) -> bool {
        matches!(self.phase(), Phase::Won(_))
    }

    // -----------------------------------------------------------------------
    // Prompts
    // -----------------------------------------------------------------------

    /// Round entry is closed once a team has won.
    pub fn open_points_prompt(&mut self, team: Team) {
        if self.is_won() {
            return;
        }
        self.state.prompt = Some(Prompt::new(PromptKind::Points(team)));
    }

    pub fn open_target_prompt(&mut self) {
        self.state.prompt = Some(Prompt::new(PromptKind::Target));
    }

    pub fn open_rename_prompt(&mut self, team: Team) {
        let current = self.state.game.team_name(team).to_string();
        self.state.prompt = Some(Prompt::with_input(PromptKind::TeamName(team), current));
    }

    pub fn prompt_push(&mut self, c: char) {
        if let Some(prompt) = self.state.prompt.as_mut() {
            prompt.push_char(c);
        }
    }

    pub fn prompt_backspace(&mut self) {
        if let Some(prompt) = self.state.prompt.as_mut() {
            prompt.backspace();
        }
    }

    pub fn cancel_prompt(&mut self) {
        self.state.prompt = None;
    }

    /// Close the prompt and apply its value. Unparsable numbers just close it.
    pub fn submit_prompt(&mut self) {
        let Some(prompt) = self.state.prompt.take() else {
            return;
        };
        let action = match prompt.kind {
            PromptKind::Points(team) => {
                if self.is_won() {
                    return;
                }
                session::parse_entry(&prompt.input).map(|points| Action::AddRound { team, points })
            }
            PromptKind::Target => session::parse_entry(&prompt.input)
                .map(|score| Action::SetWinningScore { score }),
            PromptKind::TeamName(team) => Some(Action::RenameTeam { team, name: prompt.input }),
        };
        if let Some(action) = action {
            self.dispatch(action);
        }
    }

    // -----------------------------------------------------------------------
    // Round history
    // -----------------------------------------------------------------------

    pub fn history_down(&mut self) {
        self.state.history.select_down(self.state.game.rounds.len());
    }

    pub fn history_up(&mut self) {
        self.state.history.select_up();
    }

    /// Round deletion is closed once a team has won.
    pub fn delete_selected_round(&mut self) {
        if self.is_won() {
            return;
        }
        let Some(id) = self
            .state
            .game
            .rounds
            .get(self.state.history.selected)
            .map(|r| r.id)
        else {
            return;
        };
        self.dispatch(Action::DeleteRound { id });
    }

    pub fn cycle_preset_target(&mut self) {
        let score = session::next_preset(self.state.game.winning_score);
        self.dispatch(Action::SetWinningScore { score: i64::from(score) });
    }

    // -----------------------------------------------------------------------
    // Reset
    // -----------------------------------------------------------------------

    pub fn request_reset(&mut self) {
        self.state.confirm_reset = true;
    }

    pub fn cancel_reset(&mut self) {
        self.state.confirm_reset = false;
    }

    pub fn confirm_reset(&mut self) {
        if self.state.confirm_reset {
            self.dispatch(Action::Reset);
        }
    }

    /// Reset straight from the win overlay, no confirmation.
    pub fn start_new_game(&mut self) {
        self.dispatch(Action::Reset);
    }

    // -----------------------------------------------------------------------
    // Analysis requests and network response handlers
    // -----------------------------------------------------------------------

    /// Issue a ticket and snapshot for an analysis request, or `None` when
    /// there is nothing to analyse or the game is already decided.
    pub fn request_analysis(&mut self) -> Option<(AnalysisTicket, GameState)> {
        if self.state.game.rounds.is_empty() || self.is_won() {
            debug!("analysis not available in {:?}", self.phase());
            return None;
        }
        let ticket = self.state.analysis.begin();
        Some((ticket, self.state.game.clone()))
    }

    pub fn on_analysis_finished(&mut self, ticket: AnalysisTicket, result: Result<Analysis, String>) {
        if self.state.analysis.resolve(ticket, result) {
            debug!("analysis #{} applied", ticket.generation());
        }
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn dismiss_intro(&mut self) {
        self.state.show_intro = false;
    }

    // -----------------------------------------------------------------------
    // Animation tick, every 80ms from UiEvent::AnimationTick
    // -----------------------------------------------------------------------

    pub fn advance_animation(&mut self, frame_count: usize) {
        self.state.animation.advance(frame_count);
    }
}
