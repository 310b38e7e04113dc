// ═══════════════════════════════════════════════════════════════════════
// Errors — contract violations raised by the board and the turn engine.
//
// Running out of legal actions is NOT an error: it is the Lost outcome.
// Everything here means a broken agent or a broken caller.
// ═══════════════════════════════════════════════════════════════════════

use crate::types::{Card, PlayerId};

/// Invalid mutation of the shared board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("start card played twice")]
    DoubleStart,

    #[error("finish card played twice")]
    DoubleFinish,

    #[error("finish card played with {empty} empty slot(s) left")]
    PrematureFinish { empty: usize },

    #[error("illegal placement of card {card} at position {position} (cost {cost}, budget {budget})")]
    IllegalPlacement { card: Card, position: usize, cost: i32, budget: usize },
}

/// Fatal error for one game instance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("player {player} proposed illegal placement of card {card} at position {position} (cost {cost}, cards left after play {budget})")]
    IllegalPlacement {
        player: PlayerId,
        card: Card,
        position: usize,
        cost: i32,
        budget: usize,
    },

    #[error("player {player} discarded {got} card(s), expected {expected}")]
    WrongDiscardCount { player: PlayerId, expected: usize, got: usize },

    #[error("player {player} used cards not in hand: {cards:?}")]
    CardsNotInHand { player: PlayerId, cards: Vec<Card> },

    #[error("player {player} has not observed the board")]
    NoBoardObserved { player: PlayerId },

    #[error("game did not finish within {turns} turns")]
    TurnLimit { turns: usize },

    #[error("{seats} seat(s) configured but {players} player(s) and {agents} agent(s) given")]
    SeatMismatch { seats: usize, players: usize, agents: usize },

    #[error("board rejected action: {0}")]
    Board(#[from] BoardError),
}

/// Invalid game configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config validation error: {0}")]
    Validation(String),
}
