// ═══════════════════════════════════════════════════════════════════════
// Core types — cards, action records, game status
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};

/// A card value. `0` is the start sentinel, `1..=n_cards` are numbered
/// cards and `n_cards + 1` is the finish sentinel.
pub type Card = u16;

/// Stable player identity, `0..n_players`.
pub type PlayerId = usize;

/// The start sentinel is always card 0.
pub const START_CARD: Card = 0;

/// The finish sentinel for a game with `n_cards` numbered cards.
pub fn finish_card(n_cards: Card) -> Card {
    n_cards + 1
}

// ── Action records ─────────────────────────────────────────────────────

/// Normalized record of one turn, as reported by a player to the
/// orchestrator and kept in every player's public action history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ActionRecord {
    /// The start sentinel was played.
    StartPlay,
    /// The finish sentinel was played on a full board.
    Win { card: Card, position: usize, discard_count: usize },
    /// A numbered card was placed, paying `discard_count` discards.
    Place { card: Card, position: usize, discard_count: usize },
    /// The turn was passed by discarding `pass_discard_size` cards.
    Discard,
    /// Mandated discard after someone played the start sentinel.
    StartDiscard { discard_count: usize },
    /// No legal action was available: the game is lost.
    Fail,
}

impl ActionRecord {
    /// Short code used in reports: S, W, P, D, DS, F.
    pub fn code(&self) -> &'static str {
        match self {
            ActionRecord::StartPlay => "S",
            ActionRecord::Win { .. } => "W",
            ActionRecord::Place { .. } => "P",
            ActionRecord::Discard => "D",
            ActionRecord::StartDiscard { .. } => "DS",
            ActionRecord::Fail => "F",
        }
    }

    /// Cards discarded by this action. A pass always costs the configured
    /// pass-discard size, which the record itself does not carry.
    pub fn discarded(&self, pass_discard_size: usize) -> usize {
        match self {
            ActionRecord::Place { discard_count, .. }
            | ActionRecord::Win { discard_count, .. }
            | ActionRecord::StartDiscard { discard_count } => *discard_count,
            ActionRecord::Discard => pass_discard_size,
            ActionRecord::StartPlay | ActionRecord::Fail => 0,
        }
    }
}

impl std::fmt::Display for ActionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionRecord::StartPlay => write!(f, "S"),
            ActionRecord::Win { card, position, discard_count }
            | ActionRecord::Place { card, position, discard_count } => {
                write!(f, "{}({}@{}, -{})", self.code(), card, position, discard_count)
            }
            ActionRecord::Discard => write!(f, "D"),
            ActionRecord::StartDiscard { discard_count } => write!(f, "DS(-{})", discard_count),
            ActionRecord::Fail => write!(f, "F"),
        }
    }
}

/// One entry of the game-wide chronological history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub player: PlayerId,
    pub action: ActionRecord,
}

// ── Game status ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Playing
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::Playing => write!(f, "PLAYING"),
            GameStatus::Won => write!(f, "WIN"),
            GameStatus::Lost => write!(f, "LOSE"),
        }
    }
}
