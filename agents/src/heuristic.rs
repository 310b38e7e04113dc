// ═══════════════════════════════════════════════════════════════════════
// Heuristic Agent — scores placements on a private scratch copy of the
// board and plays the cheapest good one.
//
// Board score (lower is better):
//   - each filled slot pays (card - ideal)^2, where ideal spreads the
//     card range evenly over the board
//   - a layout that can no longer be completed scores INFEASIBLE: two
//     filled slots j - i apart need at least j - i values between them,
//     and the edges need room for the cards still to go there
// Move score = score after - score before + DISCARD_WEIGHT * cost^2.
// ═══════════════════════════════════════════════════════════════════════

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tranquillity_engine::decision::{Agent, Decision};
use tranquillity_engine::moves::Placement;
use tranquillity_engine::types::*;
use tranquillity_engine::visibility::PlayerView;

const INFEASIBLE: f64 = 1e9;
const DISCARD_WEIGHT: f64 = 100.0;

pub struct HeuristicAgent {
    rng: ChaCha8Rng,
    /// Placements costing more than this are skipped while passing is possible.
    max_admissible_discards: usize,
}

impl HeuristicAgent {
    pub fn new(seed: u64) -> Self {
        HeuristicAgent {
            rng: ChaCha8Rng::seed_from_u64(seed),
            max_admissible_discards: 2,
        }
    }

    #[cfg(test)]
    fn with_max_discards(mut self, max: usize) -> Self {
        self.max_admissible_discards = max;
        self
    }

    /// Score of a move: change in board score plus the discard penalty.
    fn move_score(&self, slots: &[Option<Card>], n_cards: Card, before: f64, p: &Placement) -> f64 {
        let mut scratch = slots.to_vec();
        scratch[p.position] = Some(p.card);
        let after = evaluate_layout(&scratch, n_cards);
        if after >= INFEASIBLE {
            return INFEASIBLE;
        }
        after - before + DISCARD_WEIGHT * (p.cost * p.cost) as f64
    }

    /// Pick `n` cards to throw away, never touching one copy of `keep`.
    ///
    /// A spent start card goes first, then surplus finish cards, then cards
    /// with no legal slot left, then numbered cards whose best placement
    /// scores worst. One finish card is kept for last.
    fn choose_discards(&mut self, view: &PlayerView, n: usize, keep: Option<Card>) -> Vec<Card> {
        let hand = match keep {
            Some(card) => view.hand_without(card),
            None => view.hand.to_vec(),
        };
        let board = view.board;
        let finish = board.finish_card();
        let before = evaluate_layout(board.slots(), board.n_cards());

        let mut finish_seen = false;
        let mut ranked: Vec<(f64, Card)> = hand.iter()
            .map(|&card| {
                let priority = if card == START_CARD {
                    if board.is_started() { f64::MAX } else { -2.0 }
                } else if card == finish {
                    if finish_seen {
                        INFEASIBLE * 2.0
                    } else {
                        finish_seen = true;
                        -1.0
                    }
                } else {
                    self.best_score(view, card, before)
                };
                (priority, card)
            })
            .collect();

        // Highest priority first; ties broken by a coin flip on value order
        let descending_value = self.rng.gen_bool(0.5);
        ranked.sort_by(|a, b| {
            b.0.total_cmp(&a.0).then_with(|| {
                if descending_value { b.1.cmp(&a.1) } else { a.1.cmp(&b.1) }
            })
        });
        ranked.into_iter().take(n).map(|(_, card)| card).collect()
    }

    /// Best score this card could reach anywhere on the board, ignoring
    /// what the player can afford right now. INFEASIBLE if it has no slot.
    fn best_score(&self, view: &PlayerView, card: Card, before: f64) -> f64 {
        let board = view.board;
        (0..board.size())
            .filter(|&position| board.is_placement_legal(card, position, usize::MAX))
            .map(|position| {
                let cost = board.action_cost(card, position) as usize;
                self.move_score(board.slots(), board.n_cards(), before, &Placement { card, position, cost })
            })
            .fold(INFEASIBLE, f64::min)
    }
}

/// Score a board layout. Lower is better; INFEASIBLE when the filled
/// slots leave a gap that can no longer be completed.
pub fn evaluate_layout(slots: &[Option<Card>], n_cards: Card) -> f64 {
    let size = slots.len();
    let step = (n_cards as f64 + 1.0) / (size as f64 + 1.0);
    let mut score = 0.0;
    // Virtual start marker just left of the board
    let mut prev: (i64, i64) = (-1, START_CARD as i64);

    for (position, slot) in slots.iter().enumerate() {
        if let Some(card) = *slot {
            let (pos, value) = (position as i64, card as i64);
            if value - prev.1 < pos - prev.0 {
                return INFEASIBLE;
            }
            let ideal = (position as f64 + 1.0) * step;
            score += (card as f64 - ideal).powi(2);
            prev = (pos, value);
        }
    }
    // Virtual finish marker just right of the board
    let end = (size as i64, finish_card(n_cards) as i64);
    if end.1 - prev.1 < end.0 - prev.0 {
        return INFEASIBLE;
    }
    score
}

impl Agent for HeuristicAgent {
    fn name(&self) -> &str { "Heuristic" }

    fn decide_action(&mut self, view: &PlayerView) -> Decision {
        let board = view.board;
        let before = evaluate_layout(board.slots(), board.n_cards());
        let can_pass = view.can_pass();

        let best = view.legal_placements()
            .into_iter()
            .filter(|p| !can_pass || p.cost <= self.max_admissible_discards)
            .map(|p| (self.move_score(board.slots(), board.n_cards(), before, &p), p))
            .filter(|(score, _)| !can_pass || *score < INFEASIBLE)
            .min_by(|a, b| a.0.total_cmp(&b.0));

        match best {
            Some((_, p)) => Decision::Place {
                card: p.card,
                position: p.position,
                discards: self.choose_discards(view, p.cost, Some(p.card)),
            },
            None => Decision::Discard {
                discards: self.choose_discards(view, view.pass_discard_size, None),
            },
        }
    }

    fn decide_start_discards(&mut self, view: &PlayerView, n: usize) -> Vec<Card> {
        self.choose_discards(view, n, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tranquillity_engine::board::Board;

    fn view<'a>(hand: &'a [Card], board: &'a Board) -> PlayerView<'a> {
        PlayerView {
            viewer: 0,
            hand,
            deck_len: 10,
            board,
            players: &[],
            pass_discard_size: 2,
        }
    }

    #[test]
    fn test_evaluate_prefers_spread_cards() {
        let mut spread = vec![None; 9];
        spread[0] = Some(10);
        let mut crowded = vec![None; 9];
        crowded[8] = Some(10);
        assert!(evaluate_layout(&spread, 99) < evaluate_layout(&crowded, 99));
    }

    #[test]
    fn test_evaluate_detects_dead_gaps() {
        // 5 and 6 with two empty slots between them can never be completed
        let slots = vec![Some(5), None, None, Some(6), None];
        assert_eq!(evaluate_layout(&slots, 20), INFEASIBLE);
        // Card 2 in slot 3 leaves no value for slots 0..3
        let slots = vec![None, None, None, Some(2), None];
        assert_eq!(evaluate_layout(&slots, 20), INFEASIBLE);
        // Card 19 in slot 1 leaves one value for three slots on the right
        let slots = vec![None, Some(19), None, None, None];
        assert_eq!(evaluate_layout(&slots, 20), INFEASIBLE);
        assert!(evaluate_layout(&[None, Some(5), None], 20) < INFEASIBLE);
    }

    #[test]
    fn test_places_card_near_its_ideal_slot() {
        let board = Board::new(9, 99);
        let hand = [10, 90, 50];
        let mut agent = HeuristicAgent::new(1);
        match agent.decide_action(&view(&hand, &board)) {
            Decision::Place { card, position, discards } => {
                assert!(discards.is_empty());
                let ideal = card as usize / 10;
                assert!(
                    (position as i64 - (ideal as i64 - 1)).abs() <= 1,
                    "card {} placed at {}",
                    card, position
                );
            }
            other => panic!("expected a placement, got {:?}", other),
        }
    }

    #[test]
    fn test_skips_expensive_placements_when_it_can_pass() {
        let mut board = Board::new(3, 20);
        board.receive_card(10, 1, 3).unwrap();
        // 7@0 costs 3 and 14@2 costs 4: too many discards while passing is possible
        let hand = [7, 14, 1, 20, 19];
        let mut agent = HeuristicAgent::new(2);
        assert!(matches!(agent.decide_action(&view(&hand, &board)), Decision::Discard { .. }));

        let mut generous = HeuristicAgent::new(2).with_max_discards(10);
        assert!(matches!(generous.decide_action(&view(&hand, &board)), Decision::Place { .. }));
    }

    #[test]
    fn test_discards_dead_cards_first() {
        let mut board = Board::new(4, 20);
        board.receive_card(START_CARD, 0, 1).unwrap();
        board.receive_card(10, 1, 3).unwrap();
        board.receive_card(12, 2, 3).unwrap();
        // 11 has no slot left, the start card is spent, the second finish is surplus
        let hand = [21, 11, 0, 15, 21];
        let mut agent = HeuristicAgent::new(3);
        let mut discards = agent.decide_start_discards(&view(&hand, &board), 3);
        discards.sort_unstable();
        assert_eq!(discards, vec![0, 11, 21]);
    }

    #[test]
    fn test_payment_never_uses_the_played_card() {
        let mut board = Board::new(5, 20);
        board.receive_card(10, 2, 3).unwrap();
        let hand = [9, 4, 18, 19];
        let mut agent = HeuristicAgent::new(4).with_max_discards(3);
        if let Decision::Place { card, position, discards } = agent.decide_action(&view(&hand, &board)) {
            assert_eq!(discards.len(), board.action_cost(card, position) as usize);
            assert!(!discards.contains(&card));
        }
    }
}
