// ═══════════════════════════════════════════════════════════════════════
// Board — the shared linear placement array.
//
// Filled slots must always read strictly increasing left to right.
// Every legality query compares the card against the nearest filled
// neighbours through the derived bound arrays, so no query scans the
// whole board:
//   min_bound[i] = nearest filled value at or left of i  (0 if none)
//   max_bound[i] = nearest filled value at or right of i (n_cards + 1 if none)
// The bounds are recomputed after every numbered placement.
// ═══════════════════════════════════════════════════════════════════════

use crate::error::BoardError;
use crate::types::{finish_card, Card, START_CARD};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    n_cards: Card,
    slots: Vec<Option<Card>>,
    started: bool,
    finished: bool,
    min_bound: Vec<Card>,
    max_bound: Vec<Card>,
}

impl Board {
    pub fn new(size: usize, n_cards: Card) -> Self {
        let mut board = Board {
            size,
            n_cards,
            slots: vec![None; size],
            started: false,
            finished: false,
            min_bound: Vec::new(),
            max_bound: Vec::new(),
        };
        board.update_bounds();
        board
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn n_cards(&self) -> Card {
        self.n_cards
    }

    pub fn finish_card(&self) -> Card {
        finish_card(self.n_cards)
    }

    pub fn slots(&self) -> &[Option<Card>] {
        &self.slots
    }

    pub fn get(&self, position: usize) -> Option<Card> {
        self.slots.get(position).copied().flatten()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn min_bound(&self) -> &[Card] {
        &self.min_bound
    }

    pub fn max_bound(&self) -> &[Card] {
        &self.max_bound
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn empty_count(&self) -> usize {
        self.size - self.filled_count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|s| s.is_some())
    }

    pub fn is_numbered(&self, card: Card) -> bool {
        card >= 1 && card <= self.n_cards
    }

    // ── Queries ────────────────────────────────────────────────────────

    /// Whether `card` may go to `position` for a player who will hold
    /// `hand_size_after_removal` cards once the card leaves the hand.
    pub fn is_placement_legal(&self, card: Card, position: usize, hand_size_after_removal: usize) -> bool {
        if position >= self.size || hand_size_after_removal == 0 {
            return false;
        }
        if card == START_CARD {
            return !self.started;
        }
        if card == self.finish_card() {
            return !self.finished && self.is_full();
        }
        if !self.is_numbered(card) || self.slots[position].is_some() {
            return false;
        }
        let cost = self.action_cost(card, position);
        if cost < 0 || cost as usize > hand_size_after_removal {
            return false;
        }
        self.min_bound[position] < card && card < self.max_bound[position]
    }

    /// Number of discards needed to place `card` at `position`, from the
    /// adjacent slots only. Board edges count as empty neighbours. Can be
    /// negative when the card does not fit its neighbours; such a cost is
    /// never legal.
    pub fn action_cost(&self, card: Card, position: usize) -> i32 {
        let left = position.checked_sub(1).and_then(|i| self.get(i));
        let right = self.get(position + 1);
        let card = card as i32;
        match (left, right) {
            (None, None) => 0,
            (Some(l), None) => card - l as i32,
            (None, Some(r)) => r as i32 - card,
            (Some(l), Some(r)) => (card - l as i32).min(r as i32 - card),
        }
    }

    /// Started, finished and no empty slot left.
    pub fn check_completion(&self) -> bool {
        self.started && self.finished && self.is_full()
    }

    // ── Mutation ───────────────────────────────────────────────────────

    /// Apply a placement. Callers validate first; this re-checks and
    /// refuses anything that would break the board's invariants.
    pub fn receive_card(&mut self, card: Card, position: usize, hand_size_after_removal: usize) -> Result<(), BoardError> {
        if card == START_CARD {
            if self.started {
                return Err(BoardError::DoubleStart);
            }
            self.started = true;
            return Ok(());
        }
        if card == self.finish_card() {
            if self.finished {
                return Err(BoardError::DoubleFinish);
            }
            if !self.is_full() {
                return Err(BoardError::PrematureFinish { empty: self.empty_count() });
            }
            self.finished = true;
            return Ok(());
        }
        if !self.is_placement_legal(card, position, hand_size_after_removal) {
            return Err(BoardError::IllegalPlacement {
                card,
                position,
                cost: self.action_cost(card, position),
                budget: hand_size_after_removal,
            });
        }
        self.slots[position] = Some(card);
        self.update_bounds();
        Ok(())
    }

    fn update_bounds(&mut self) {
        let mut min_bound = Vec::with_capacity(self.size);
        let mut last = START_CARD;
        for slot in &self.slots {
            if let Some(v) = slot {
                last = *v;
            }
            min_bound.push(last);
        }

        let mut max_bound = vec![self.finish_card(); self.size];
        let mut next = self.finish_card();
        for (i, slot) in self.slots.iter().enumerate().rev() {
            if let Some(v) = slot {
                next = *v;
            }
            max_bound[i] = next;
        }

        self.min_bound = min_bound;
        self.max_bound = max_bound;
    }

    /// Compact text rendering, `_` for empty slots.
    pub fn render(&self) -> String {
        let cells: Vec<String> = self.slots.iter()
            .map(|s| s.map_or_else(|| "_".to_string(), |v| v.to_string()))
            .collect();
        format!("[{}]", cells.join(" "))
    }
}
