// ═══════════════════════════════════════════════════════════════════════
// Move enumeration — shared by the turn engine and by agents through
// their PlayerView. Pure functions over a hand and a board.
// ═══════════════════════════════════════════════════════════════════════

use crate::board::Board;
use crate::types::Card;
use serde::{Deserialize, Serialize};

/// A legal placement and the number of discards it costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub card: Card,
    pub position: usize,
    pub cost: usize,
}

/// Every legal placement of a numbered card from `hand`. Sentinels are
/// never listed: their plays are mandatory and decided by the engine.
pub fn legal_placements(hand: &[Card], board: &Board) -> Vec<Placement> {
    let Some(budget) = hand.len().checked_sub(1) else {
        return Vec::new();
    };
    let mut cards: Vec<Card> = hand.iter()
        .copied()
        .filter(|&c| board.is_numbered(c))
        .collect();
    cards.sort_unstable();
    cards.dedup();

    let mut placements = Vec::new();
    for card in cards {
        for position in 0..board.size() {
            if board.is_placement_legal(card, position, budget) {
                placements.push(Placement {
                    card,
                    position,
                    cost: board.action_cost(card, position) as usize,
                });
            }
        }
    }
    placements
}

/// All distinct `k`-sized sub-multisets of `cards`, each sorted ascending.
pub fn discard_combinations(cards: &[Card], k: usize) -> Vec<Vec<Card>> {
    let mut sorted = cards.to_vec();
    sorted.sort_unstable();
    let mut out = Vec::new();
    let mut current = Vec::with_capacity(k);
    collect_combinations(&sorted, k, 0, &mut current, &mut out);
    out
}

fn collect_combinations(
    sorted: &[Card],
    k: usize,
    start: usize,
    current: &mut Vec<Card>,
    out: &mut Vec<Vec<Card>>,
) {
    if current.len() == k {
        out.push(current.clone());
        return;
    }
    let mut i = start;
    while i < sorted.len() && sorted.len() - i >= k - current.len() {
        current.push(sorted[i]);
        collect_combinations(sorted, k, i + 1, current, out);
        current.pop();
        // Equal values are interchangeable: skip them at this depth
        let value = sorted[i];
        while i < sorted.len() && sorted[i] == value {
            i += 1;
        }
    }
}

/// Remove one copy of each of `cards` from `hand`. Returns the remaining
/// hand, or the cards that could not be found.
pub fn remove_cards(hand: &[Card], cards: &[Card]) -> Result<Vec<Card>, Vec<Card>> {
    let mut remaining = hand.to_vec();
    let mut missing = Vec::new();
    for &card in cards {
        match remaining.iter().position(|&c| c == card) {
            Some(i) => {
                remaining.remove(i);
            }
            None => missing.push(card),
        }
    }
    if missing.is_empty() {
        Ok(remaining)
    } else {
        Err(missing)
    }
}
