//! Score session engine.
//!
//! Every user action becomes an [`Action`] fed to [`reduce`], which returns a
//! fresh [`GameState`] and leaves the input untouched. Invalid input is dropped
//! without an error; the caller just closes whatever prompt produced it.

use domino_api::{GameState, Round, RoundId, Team};
use log::debug;

/// Target scores offered without typing.
pub const PRESET_TARGETS: [u32; 4] = [100, 150, 200, 500];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddRound { team: Team, points: i64 },
    DeleteRound { id: RoundId },
    SetWinningScore { score: i64 },
    RenameTeam { team: Team, name: String },
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Accumulating,
    Won(Team),
}

pub fn reduce(state: &GameState, action: Action) -> GameState {
    let mut next = state.clone();
    match action {
        Action::AddRound { team, points } => match positive(points) {
            Some(points) => next.rounds.insert(0, Round::credit(team, points)),
            None => debug!("ignoring round for {team} with {points} points"),
        },
        Action::DeleteRound { id } => {
            next.rounds.retain(|r| r.id != id);
        }
        Action::SetWinningScore { score } => match positive(score) {
            Some(score) => next.winning_score = score,
            None => debug!("ignoring winning score {score}"),
        },
        Action::RenameTeam { team, name } => {
            let name = name.trim();
            if name.is_empty() {
                return next;
            }
            match team {
                Team::A => next.team_a_name = name.to_string(),
                Team::B => next.team_b_name = name.to_string(),
            }
        }
        Action::Reset => next.rounds.clear(),
    }
    next
}

/// Where the game stands, derived from rounds and target.
pub fn phase(state: &GameState) -> Phase {
    if let Some(team) = state.winner() {
        Phase::Won(team)
    } else if state.rounds.is_empty() {
        Phase::Idle
    } else {
        Phase::Accumulating
    }
}

/// Parse the text of a points or target prompt. Range checks happen in `reduce`.
pub fn parse_entry(input: &str) -> Option<i64> {
    input.trim().parse::<i64>().ok()
}

/// The preset after `current`, wrapping to the smallest.
pub fn next_preset(current: u32) -> u32 {
    PRESET_TARGETS
        .iter()
        .copied()
        .find(|p| *p > current)
        .unwrap_or(PRESET_TARGETS[0])
}

fn positive(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn add(state: &GameState, team: Team, points: i64) -> GameState {
        reduce(state, Action::AddRound { team, points })
    }

    #[test]
    fn add_round_prepends_and_credits_one_side() {
        let state = add(&GameState::default(), Team::A, 30);
        let state = add(&state, Team::B, 12);
        assert_eq!(state.rounds.len(), 2);
        assert_eq!((state.rounds[0].points_a, state.rounds[0].points_b), (0, 12));
        assert_eq!((state.rounds[1].points_a, state.rounds[1].points_b), (30, 0));
    }

    #[test]
    fn reduce_leaves_the_previous_state_untouched() {
        let before = GameState::default();
        let after = add(&before, Team::A, 10);
        assert!(before.rounds.is_empty());
        assert_eq!(after.rounds.len(), 1);
    }

    #[test]
    fn non_positive_points_are_ignored() {
        let state = add(&GameState::default(), Team::A, 10);
        for points in [0, -5, i64::from(u32::MAX) + 1] {
            assert_eq!(add(&state, Team::B, points).rounds.len(), 1);
        }
    }

    #[test]
    fn totals_track_every_add_and_delete() {
        let entries = [(Team::A, 17), (Team::B, 3), (Team::B, 44), (Team::A, 9), (Team::B, 1)];
        let mut state = GameState::default();
        for (team, points) in entries {
            state = add(&state, team, points);
        }
        let doomed = state.rounds[2].id;
        state = reduce(&state, Action::DeleteRound { id: doomed });

        let expected_a: u64 = state.rounds.iter().map(|r| u64::from(r.points_a)).sum();
        let expected_b: u64 = state.rounds.iter().map(|r| u64::from(r.points_b)).sum();
        let totals = state.totals();
        assert_eq!(totals.a, expected_a);
        assert_eq!(totals.b, expected_b);
        assert_eq!((totals.a, totals.b), (26, 4));
    }

    #[derive(Debug, Clone)]
    enum Step {
        Add(Team, i64),
        Delete(usize),
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            3 => (any::<bool>(), -50i64..500).prop_map(|(is_a, points)| {
                Step::Add(if is_a { Team::A } else { Team::B }, points)
            }),
            1 => (0usize..24).prop_map(Step::Delete),
        ]
    }

    proptest! {
        #[test]
        fn totals_match_a_ledger_of_accepted_rounds(steps in prop::collection::vec(step(), 0..60)) {
            let mut state = GameState::default();
            let mut ledger: Vec<(Team, u64)> = Vec::new();

            for step in steps {
                match step {
                    Step::Add(team, points) => {
                        state = add(&state, team, points);
                        if points > 0 {
                            ledger.insert(0, (team, points as u64));
                        }
                    }
                    Step::Delete(index) => {
                        // Out of range indexes delete an id that was never issued.
                        let id = match state.rounds.get(index) {
                            Some(round) => {
                                ledger.remove(index);
                                round.id
                            }
                            None => RoundId::new(),
                        };
                        state = reduce(&state, Action::DeleteRound { id });
                    }
                }

                let sum = |side: Team| -> u64 {
                    ledger.iter().filter(|(t, _)| *t == side).map(|(_, p)| p).sum()
                };
                let totals = state.totals();
                prop_assert_eq!(state.rounds.len(), ledger.len());
                prop_assert_eq!(totals.a, sum(Team::A));
                prop_assert_eq!(totals.b, sum(Team::B));
            }
        }
    }

    #[test]
    fn delete_is_idempotent_and_keeps_order() {
        let mut state = GameState::default();
        for points in [1, 2, 3] {
            state = add(&state, Team::A, points);
        }
        let middle = state.rounds[1].id;
        let once = reduce(&state, Action::DeleteRound { id: middle });
        let twice = reduce(&once, Action::DeleteRound { id: middle });
        assert_eq!(once, twice);
        let remaining: Vec<u32> = twice.rounds.iter().map(|r| r.points_a).collect();
        assert_eq!(remaining, vec![3, 1]);
    }

    #[test]
    fn delete_of_the_only_round_empties_the_game() {
        let state = add(&GameState::default(), Team::A, 10);
        let id = state.rounds[0].id;
        let state = reduce(&state, Action::DeleteRound { id });
        assert!(state.rounds.is_empty());
        assert_eq!(state.totals().a, 0);
        assert_eq!(phase(&state), Phase::Idle);
    }

    #[test]
    fn winning_score_rejects_non_positive_values() {
        let state = reduce(&GameState::default(), Action::SetWinningScore { score: 0 });
        assert_eq!(state.winning_score, 200);
        let state = reduce(&state, Action::SetWinningScore { score: -100 });
        assert_eq!(state.winning_score, 200);
        let state = reduce(&state, Action::SetWinningScore { score: 350 });
        assert_eq!(state.winning_score, 350);
    }

    #[test]
    fn lowering_the_target_declares_a_winner_without_new_rounds() {
        let state = add(&GameState::default(), Team::B, 120);
        assert_eq!(state.winner(), None);
        let state = reduce(&state, Action::SetWinningScore { score: 100 });
        assert_eq!(state.winner(), Some(Team::B));
        assert_eq!(phase(&state), Phase::Won(Team::B));
    }

    #[test]
    fn raising_the_target_can_take_a_win_back() {
        let state = add(&GameState::default(), Team::A, 210);
        assert_eq!(phase(&state), Phase::Won(Team::A));
        let state = reduce(&state, Action::SetWinningScore { score: 500 });
        assert_eq!(phase(&state), Phase::Accumulating);
    }

    #[test]
    fn default_game_reaches_a_win_for_team_a() {
        let mut state = GameState::default();
        assert_eq!(phase(&state), Phase::Idle);
        state = add(&state, Team::A, 120);
        state = add(&state, Team::B, 90);
        assert_eq!(phase(&state), Phase::Accumulating);
        state = add(&state, Team::A, 85);

        let totals = state.totals();
        assert_eq!((totals.a, totals.b), (205, 90));
        assert_eq!(state.winner(), Some(Team::A));
    }

    #[test]
    fn simultaneous_threshold_goes_to_team_a() {
        let mut state = GameState::default();
        state = add(&state, Team::A, 150);
        state = add(&state, Team::B, 150);
        state = reduce(&state, Action::SetWinningScore { score: 150 });
        assert_eq!(state.winner(), Some(Team::A));
    }

    #[test]
    fn rounds_are_still_accepted_after_a_win() {
        let state = add(&GameState::default(), Team::A, 200);
        let state = add(&state, Team::B, 5);
        assert_eq!(state.rounds.len(), 2);
    }

    #[test]
    fn reset_keeps_names_and_target() {
        let mut state = reduce(
            &GameState::default(),
            Action::RenameTeam { team: Team::B, name: "Los Primos".into() },
        );
        state = reduce(&state, Action::SetWinningScore { score: 150 });
        state = add(&state, Team::A, 40);
        state = reduce(&state, Action::Reset);
        assert!(state.rounds.is_empty());
        assert_eq!(state.team_b_name, "Los Primos");
        assert_eq!(state.winning_score, 150);
    }

    #[test]
    fn blank_rename_is_ignored() {
        let state = reduce(
            &GameState::default(),
            Action::RenameTeam { team: Team::A, name: "   ".into() },
        );
        assert_eq!(state.team_a_name, "Cyber Nexus");
    }

    #[test]
    fn parse_entry_accepts_signed_integers_only() {
        assert_eq!(parse_entry(" 42 "), Some(42));
        assert_eq!(parse_entry("-5"), Some(-5));
        assert_eq!(parse_entry(""), None);
        assert_eq!(parse_entry("12abc"), None);
        assert_eq!(parse_entry("7.5"), None);
    }

    #[test]
    fn presets_cycle_upward_and_wrap() {
        assert_eq!(next_preset(100), 150);
        assert_eq!(next_preset(200), 500);
        assert_eq!(next_preset(500), 100);
        assert_eq!(next_preset(175), 200);
        assert_eq!(next_preset(9000), 100);
    }
}
