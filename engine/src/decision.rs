// ═══════════════════════════════════════════════════════════════════════
// Agent Trait — the decision interface every strategy implements.
//
// Agents receive a `PlayerView` (never the Player itself): they can see
// their own hand and the public state, never a deck. The engine
// re-validates whatever they return; an invalid answer aborts the game
// as a contract violation.
// ═══════════════════════════════════════════════════════════════════════

use crate::types::Card;
use crate::visibility::PlayerView;
use serde::{Deserialize, Serialize};

/// An agent's answer to a general turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Place `card` at `position`, discarding exactly `action_cost` cards.
    Place { card: Card, position: usize, discards: Vec<Card> },
    /// Pass the turn by discarding exactly `pass_discard_size` cards.
    Discard { discards: Vec<Card> },
}

/// Trait that all player strategies implement.
pub trait Agent: Send {
    /// Human-readable name for this agent (e.g. "Greedy").
    fn name(&self) -> &str;

    /// Choose a placement or a pass for a general turn.
    fn decide_action(&mut self, view: &PlayerView) -> Decision;

    /// Choose exactly `n` cards from the hand for a mandated start discard.
    fn decide_start_discards(&mut self, view: &PlayerView, n: usize) -> Vec<Card>;
}
