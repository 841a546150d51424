pub mod client;
pub mod gemini;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const DEFAULT_TEAM_A_NAME: &str = "Cyber Nexus";
pub const DEFAULT_TEAM_B_NAME: &str = "Void Runners";
pub const DEFAULT_WINNING_SCORE: u32 = 200;

// ---------------------------------------------------------------------------
// Domain types, independent of the Gemini wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn label(&self) -> &'static str {
        match self {
            Team::A => "A",
            Team::B => "B",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team {}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundId(Uuid);

impl RoundId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RoundId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// One scoring event. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub points_a: u32,
    pub points_b: u32,
    pub timestamp: DateTime<Utc>,
}

impl Round {
    /// A fresh round crediting `points` to `team` and zero to the other side.
    pub fn credit(team: Team, points: u32) -> Self {
        let (points_a, points_b) = match team {
            Team::A => (points, 0),
            Team::B => (0, points),
        };
        Self {
            id: RoundId::new(),
            points_a,
            points_b,
            timestamp: Utc::now(),
        }
    }

    pub fn points_for(&self, team: Team) -> u32 {
        match team {
            Team::A => self.points_a,
            Team::B => self.points_b,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub a: u64,
    pub b: u64,
}

impl Totals {
    pub fn for_team(&self, team: Team) -> u64 {
        match team {
            Team::A => self.a,
            Team::B => self.b,
        }
    }
}

/// The complete record of one game in progress.
///
/// Totals and the winner are derived on every read; nothing here caches them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub team_a_name: String,
    pub team_b_name: String,
    /// Newest first.
    pub rounds: Vec<Round>,
    pub winning_score: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            team_a_name: DEFAULT_TEAM_A_NAME.to_string(),
            team_b_name: DEFAULT_TEAM_B_NAME.to_string(),
            rounds: Vec::new(),
            winning_score: DEFAULT_WINNING_SCORE,
        }
    }
}

impl GameState {
    pub fn team_name(&self, team: Team) -> &str {
        match team {
            Team::A => &self.team_a_name,
            Team::B => &self.team_b_name,
        }
    }

    pub fn totals(&self) -> Totals {
        self.rounds.iter().fold(Totals::default(), |acc, r| Totals {
            a: acc.a + u64::from(r.points_a),
            b: acc.b + u64::from(r.points_b),
        })
    }

    /// Team A is checked first, so it takes a simultaneous crossing.
    pub fn winner(&self) -> Option<Team> {
        let totals = self.totals();
        let target = u64::from(self.winning_score);
        if totals.a >= target {
            Some(Team::A)
        } else if totals.b >= target {
            Some(Team::B)
        } else {
            None
        }
    }

    /// The team strictly ahead, if any.
    pub fn leader(&self) -> Option<Team> {
        let totals = self.totals();
        match totals.a.cmp(&totals.b) {
            std::cmp::Ordering::Greater => Some(Team::A),
            std::cmp::Ordering::Less => Some(Team::B),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Share of the target reached by `team`, clamped to 1.0.
    pub fn progress(&self, team: Team) -> f64 {
        if self.winning_score == 0 {
            return 1.0;
        }
        let total = self.totals().for_team(team) as f64;
        (total / f64::from(self.winning_score)).min(1.0)
    }

    /// 1-based ordinal of the round at `index` in the newest-first list,
    /// counting from the oldest round.
    pub fn round_number(&self, index: usize) -> usize {
        self.rounds.len().saturating_sub(index)
    }
}

/// Strategic commentary returned by the analysis service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub summary: String,
    pub prediction: String,
    pub tips: Vec<String>,
}
