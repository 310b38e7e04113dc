// ═══════════════════════════════════════════════════════════════════════
// Visibility / Information Model
//
//   PUBLIC  — the board, every player's action history, discard count,
//             hand size and deck size
//   PRIVATE — a player's own hand
//   HIDDEN  — every deck's contents, including the player's own
//
// Agents only ever receive a PlayerView, never a Player.
// ═══════════════════════════════════════════════════════════════════════

use crate::board::Board;
use crate::decision::Decision;
use crate::moves::{self, Placement};
use crate::types::*;
use serde::{Deserialize, Serialize};

/// What every player can see about another player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicPlayerInfo {
    pub id: PlayerId,
    pub action_history: Vec<ActionRecord>,
    pub discard_count: usize,
    pub hand_len: usize,
    pub deck_len: usize,
}

/// The view of the game a specific player is allowed to decide from.
#[derive(Debug, Clone, Copy)]
pub struct PlayerView<'a> {
    pub viewer: PlayerId,
    /// Your own hand.
    pub hand: &'a [Card],
    /// Only the length of your deck; its order is hidden even from you.
    pub deck_len: usize,
    /// Snapshot of the shared board taken at the start of the turn.
    pub board: &'a Board,
    /// Public info about every player, yourself included.
    pub players: &'a [PublicPlayerInfo],
    pub pass_discard_size: usize,
}

impl<'a> PlayerView<'a> {
    pub fn legal_placements(&self) -> Vec<Placement> {
        moves::legal_placements(self.hand, self.board)
    }

    pub fn discard_combinations(&self, k: usize) -> Vec<Vec<Card>> {
        moves::discard_combinations(self.hand, k)
    }

    /// The hand with one copy of `card` taken out.
    pub fn hand_without(&self, card: Card) -> Vec<Card> {
        moves::remove_cards(self.hand, &[card]).unwrap_or_else(|_| self.hand.to_vec())
    }

    /// Every legal placement paired with every way of paying for it.
    pub fn all_plays(&self) -> Vec<Decision> {
        let mut plays = Vec::new();
        for p in self.legal_placements() {
            let rest = self.hand_without(p.card);
            for discards in moves::discard_combinations(&rest, p.cost) {
                plays.push(Decision::Place { card: p.card, position: p.position, discards });
            }
        }
        plays
    }

    pub fn can_pass(&self) -> bool {
        self.hand.len() >= self.pass_discard_size
    }
}
