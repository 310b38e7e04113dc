// ═══════════════════════════════════════════════════════════════════════
// Player Turn Engine
//
// Owns a player's private hand, deck and discard pile. Each turn it
// picks the action by strict priority:
//   1. no legal action         → Fail
//   2. start card, not started → StartPlay (mandatory, agent not asked)
//   3. finish card, full board → Win       (mandatory, agent not asked)
//   4. mandated start discard  → agent.decide_start_discards
//   5. otherwise               → agent.decide_action (Place or Discard)
// then commits discards/removal, refills from the deck and records it.
//
// A turn is resolved against `&self` first and only committed once the
// agent's answer validated, so a contract violation leaves no trace.
// ═══════════════════════════════════════════════════════════════════════

use crate::board::Board;
use crate::decision::{Agent, Decision};
use crate::error::GameError;
use crate::moves::{self, Placement};
use crate::types::*;
use crate::visibility::{PlayerView, PublicPlayerInfo};

#[derive(Debug, Clone)]
pub struct Player {
    id: PlayerId,
    hand_capacity: usize,
    pass_discard_size: usize,
    hand: Vec<Card>,
    deck: Vec<Card>,
    discard_history: Vec<Card>,
    action_history: Vec<ActionRecord>,
    board: Option<Board>,
    players: Vec<PublicPlayerInfo>,
}

/// A validated turn, ready to be committed.
struct Resolution {
    record: ActionRecord,
    hand: Vec<Card>,
    discards: Vec<Card>,
}

impl Player {
    pub fn new(
        id: PlayerId,
        hand_capacity: usize,
        pass_discard_size: usize,
        deck: Vec<Card>,
        initial_hand: Vec<Card>,
    ) -> Self {
        Player {
            id,
            hand_capacity,
            pass_discard_size,
            hand: initial_hand,
            deck,
            discard_history: Vec::new(),
            action_history: Vec::new(),
            board: None,
            players: Vec::new(),
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn hand_len(&self) -> usize {
        self.hand.len()
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn discard_history(&self) -> &[Card] {
        &self.discard_history
    }

    pub fn action_history(&self) -> &[ActionRecord] {
        &self.action_history
    }

    /// The subset of this player that everyone may see.
    pub fn public_info(&self) -> PublicPlayerInfo {
        PublicPlayerInfo {
            id: self.id,
            action_history: self.action_history.clone(),
            discard_count: self.discard_history.len(),
            hand_len: self.hand.len(),
            deck_len: self.deck.len(),
        }
    }

    // ── Observation ────────────────────────────────────────────────────

    /// Take a snapshot of the shared board for this turn's decisions.
    pub fn observe_board(&mut self, board: &Board) {
        self.board = Some(board.clone());
    }

    /// Refresh the public view of every player.
    pub fn observe_players(&mut self, players: Vec<PublicPlayerInfo>) {
        self.players = players;
    }

    pub fn observed_board(&self) -> Result<&Board, GameError> {
        self.board.as_ref().ok_or(GameError::NoBoardObserved { player: self.id })
    }

    pub fn view(&self) -> Result<PlayerView<'_>, GameError> {
        Ok(PlayerView {
            viewer: self.id,
            hand: &self.hand,
            deck_len: self.deck.len(),
            board: self.observed_board()?,
            players: &self.players,
            pass_discard_size: self.pass_discard_size,
        })
    }

    // ── Enumeration ────────────────────────────────────────────────────

    pub fn enumerate_discard_combinations(&self, k: usize) -> Vec<Vec<Card>> {
        moves::discard_combinations(&self.hand, k)
    }

    pub fn enumerate_legal_placements(&self) -> Result<Vec<Placement>, GameError> {
        Ok(moves::legal_placements(&self.hand, self.observed_board()?))
    }

    fn is_start_mandatory(&self, board: &Board) -> bool {
        self.hand.contains(&START_CARD) && !board.is_started()
    }

    fn is_finish_playable(&self, board: &Board) -> bool {
        self.hand.contains(&board.finish_card()) && !board.is_finished() && board.is_full()
    }

    /// Whether any card in hand, sentinels included, has a legal slot
    /// with the cards left once it is played.
    fn has_possible_play(&self, board: &Board) -> bool {
        let Some(budget) = self.hand.len().checked_sub(1) else {
            return false;
        };
        self.hand.iter().any(|&card| {
            (0..board.size()).any(|position| board.is_placement_legal(card, position, budget))
        })
    }

    /// False when the game is lost on this player's turn: the hand cannot
    /// cover the mandated start discard, or there is neither a legal play
    /// nor enough cards to pass. A sentinel alone in hand is no legal play.
    pub fn is_alive(&self, mandatory_start_discard: usize) -> Result<bool, GameError> {
        let board = self.observed_board()?;
        if self.hand.len() < mandatory_start_discard {
            return Ok(false);
        }
        Ok(self.hand.len() >= self.pass_discard_size || self.has_possible_play(board))
    }

    // ── Turn ───────────────────────────────────────────────────────────

    /// Play one turn. `start_turn_discards` is this player's mandated
    /// share while a start-discard window is open, 0 otherwise.
    pub fn take_turn(&mut self, agent: &mut dyn Agent, start_turn_discards: usize) -> Result<ActionRecord, GameError> {
        let record = if !self.is_alive(start_turn_discards)? {
            ActionRecord::Fail
        } else {
            let resolution = self.resolve(agent, start_turn_discards)?;
            self.hand = resolution.hand;
            self.discard_history.extend(resolution.discards);
            self.refill_hand();
            resolution.record
        };

        log::debug!(
            "player {} -> {} (hand {}, deck {})",
            self.id, record, self.hand.len(), self.deck.len()
        );
        self.action_history.push(record);
        Ok(record)
    }

    fn resolve(&self, agent: &mut dyn Agent, start_turn_discards: usize) -> Result<Resolution, GameError> {
        let board = self.observed_board()?;

        if self.is_start_mandatory(board) {
            return Ok(Resolution {
                record: ActionRecord::StartPlay,
                hand: self.take_from_hand(&[START_CARD])?,
                discards: Vec::new(),
            });
        }

        let finish = board.finish_card();
        if self.is_finish_playable(board) {
            return Ok(Resolution {
                record: ActionRecord::Win { card: finish, position: 0, discard_count: 0 },
                hand: self.take_from_hand(&[finish])?,
                discards: Vec::new(),
            });
        }

        let view = self.view()?;

        if start_turn_discards > 0 {
            let discards = agent.decide_start_discards(&view, start_turn_discards);
            if discards.len() != start_turn_discards {
                return Err(GameError::WrongDiscardCount {
                    player: self.id,
                    expected: start_turn_discards,
                    got: discards.len(),
                });
            }
            return Ok(Resolution {
                record: ActionRecord::StartDiscard { discard_count: discards.len() },
                hand: self.take_from_hand(&discards)?,
                discards,
            });
        }

        match agent.decide_action(&view) {
            Decision::Place { card, position, discards } => {
                let budget = self.hand.len().saturating_sub(1);
                let cost = board.action_cost(card, position);
                if !board.is_numbered(card) || !board.is_placement_legal(card, position, budget) {
                    return Err(GameError::IllegalPlacement { player: self.id, card, position, cost, budget });
                }
                if discards.len() != cost as usize {
                    return Err(GameError::WrongDiscardCount {
                        player: self.id,
                        expected: cost as usize,
                        got: discards.len(),
                    });
                }
                let mut spent = Vec::with_capacity(discards.len() + 1);
                spent.push(card);
                spent.extend_from_slice(&discards);
                Ok(Resolution {
                    record: ActionRecord::Place { card, position, discard_count: discards.len() },
                    hand: self.take_from_hand(&spent)?,
                    discards,
                })
            }
            Decision::Discard { discards } => {
                if discards.len() != self.pass_discard_size {
                    return Err(GameError::WrongDiscardCount {
                        player: self.id,
                        expected: self.pass_discard_size,
                        got: discards.len(),
                    });
                }
                Ok(Resolution {
                    record: ActionRecord::Discard,
                    hand: self.take_from_hand(&discards)?,
                    discards,
                })
            }
        }
    }

    /// The hand with `cards` taken out, one copy each.
    fn take_from_hand(&self, cards: &[Card]) -> Result<Vec<Card>, GameError> {
        moves::remove_cards(&self.hand, cards)
            .map_err(|missing| GameError::CardsNotInHand { player: self.id, cards: missing })
    }

    /// Draw from the deck until the hand is full or the deck is empty.
    fn refill_hand(&mut self) {
        while self.hand.len() < self.hand_capacity {
            match self.deck.pop() {
                Some(card) => self.hand.push(card),
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Agent that must never be consulted.
    struct Silent;

    impl Agent for Silent {
        fn name(&self) -> &str { "Silent" }
        fn decide_action(&mut self, _view: &PlayerView) -> Decision {
            panic!("agent should not be asked")
        }
        fn decide_start_discards(&mut self, _view: &PlayerView, _n: usize) -> Vec<Card> {
            panic!("agent should not be asked")
        }
    }

    /// Agent that always answers the same.
    struct Fixed(Decision, Vec<Card>);

    impl Agent for Fixed {
        fn name(&self) -> &str { "Fixed" }
        fn decide_action(&mut self, _view: &PlayerView) -> Decision {
            self.0.clone()
        }
        fn decide_start_discards(&mut self, _view: &PlayerView, _n: usize) -> Vec<Card> {
            self.1.clone()
        }
    }

    fn player(hand: Vec<Card>, deck: Vec<Card>, board: &Board) -> Player {
        let mut p = Player::new(0, 5, 2, deck, hand);
        p.observe_board(board);
        p
    }

    #[test]
    fn test_start_is_mandatory() {
        let board = Board::new(5, 20);
        let mut p = player(vec![7, 0, 12], vec![3], &board);
        let action = p.take_turn(&mut Silent, 0).unwrap();
        assert_eq!(action, ActionRecord::StartPlay);
        assert!(!p.hand().contains(&START_CARD));
        // Refilled from the deck
        assert_eq!(p.hand_len(), 3);
        assert_eq!(p.deck_len(), 0);
        assert_eq!(p.action_history(), &[ActionRecord::StartPlay]);
    }

    #[test]
    fn test_finish_is_mandatory_on_full_board() {
        let mut board = Board::new(2, 5);
        board.receive_card(1, 0, 3).unwrap();
        board.receive_card(2, 1, 3).unwrap();
        let mut p = player(vec![6, 3], vec![], &board);
        let action = p.take_turn(&mut Silent, 0).unwrap();
        assert_eq!(action, ActionRecord::Win { card: 6, position: 0, discard_count: 0 });
        assert_eq!(p.hand(), &[3]);
    }

    #[test]
    fn test_lone_start_card_fails() {
        let board = Board::new(3, 10);
        let mut p = player(vec![0], vec![], &board);
        assert!(!p.is_alive(0).unwrap());
        assert_eq!(p.take_turn(&mut Silent, 0).unwrap(), ActionRecord::Fail);
        assert_eq!(p.hand(), &[START_CARD]);
    }

    #[test]
    fn test_lone_finish_card_on_full_board_fails() {
        let mut board = Board::new(2, 5);
        board.receive_card(START_CARD, 0, 1).unwrap();
        board.receive_card(1, 0, 3).unwrap();
        board.receive_card(2, 1, 3).unwrap();
        let mut p = player(vec![6], vec![], &board);
        assert!(!p.is_alive(0).unwrap());
        assert_eq!(p.take_turn(&mut Silent, 0).unwrap(), ActionRecord::Fail);
        // One card to spare is enough to play it
        let mut p = player(vec![6, 3], vec![], &board);
        assert!(p.is_alive(0).unwrap());
        assert!(matches!(p.take_turn(&mut Silent, 0).unwrap(), ActionRecord::Win { card: 6, .. }));
    }

    #[test]
    fn test_fail_when_no_action() {
        let mut board = Board::new(3, 10);
        board.receive_card(START_CARD, 0, 1).unwrap();
        let mut p = player(vec![4], vec![], &board);
        assert!(!p.is_alive(0).unwrap());
        assert_eq!(p.take_turn(&mut Silent, 0).unwrap(), ActionRecord::Fail);
        assert_eq!(p.action_history(), &[ActionRecord::Fail]);
    }

    #[test]
    fn test_fail_when_start_discard_not_covered() {
        let board = Board::new(3, 10);
        let p = player(vec![4, 5], vec![], &board);
        assert!(p.is_alive(2).unwrap());
        assert!(!p.is_alive(3).unwrap());
    }

    #[test]
    fn test_start_discard_turn() {
        let mut board = Board::new(3, 10);
        board.receive_card(START_CARD, 0, 1).unwrap();
        let mut agent = Fixed(Decision::Discard { discards: vec![] }, vec![5]);
        let mut p = player(vec![4, 5, 6], vec![9], &board);
        let action = p.take_turn(&mut agent, 1).unwrap();
        assert_eq!(action, ActionRecord::StartDiscard { discard_count: 1 });
        assert_eq!(p.discard_history(), &[5]);
        assert_eq!(p.hand(), &[4, 6, 9]);
    }

    #[test]
    fn test_place_with_discards() {
        let mut board = Board::new(3, 10);
        board.receive_card(5, 1, 4).unwrap();
        let decision = Decision::Place { card: 3, position: 0, discards: vec![9, 8] };
        let mut p = player(vec![3, 8, 9, 7], vec![1, 2], &board);
        let action = p.take_turn(&mut Fixed(decision, vec![]), 0).unwrap();
        assert_eq!(action, ActionRecord::Place { card: 3, position: 0, discard_count: 2 });
        assert_eq!(p.discard_history(), &[9, 8]);
        assert_eq!(p.hand(), &[7, 2, 1]);
    }

    #[test]
    fn test_pass_discard() {
        let board = Board::new(3, 10);
        let decision = Decision::Discard { discards: vec![4, 6] };
        let mut p = player(vec![4, 5, 6], vec![], &board);
        assert_eq!(p.take_turn(&mut Fixed(decision, vec![]), 0).unwrap(), ActionRecord::Discard);
        assert_eq!(p.hand(), &[5]);
        assert_eq!(p.public_info().discard_count, 2);
    }

    #[test]
    fn test_illegal_placement_is_contract_violation() {
        let mut board = Board::new(3, 10);
        board.receive_card(5, 1, 4).unwrap();
        let decision = Decision::Place { card: 7, position: 0, discards: vec![] };
        let mut p = player(vec![7, 8, 9], vec![1], &board);
        let err = p.take_turn(&mut Fixed(decision, vec![]), 0).unwrap_err();
        assert_eq!(
            err,
            GameError::IllegalPlacement { player: 0, card: 7, position: 0, cost: -2, budget: 2 }
        );
        // Nothing committed
        assert_eq!(p.hand(), &[7, 8, 9]);
        assert_eq!(p.deck_len(), 1);
        assert!(p.action_history().is_empty());
    }

    #[test]
    fn test_wrong_cost_is_contract_violation() {
        let mut board = Board::new(3, 10);
        board.receive_card(5, 1, 4).unwrap();
        let decision = Decision::Place { card: 7, position: 2, discards: vec![] };
        let mut p = player(vec![7, 8, 9], vec![], &board);
        let err = p.take_turn(&mut Fixed(decision, vec![]), 0).unwrap_err();
        assert_eq!(err, GameError::WrongDiscardCount { player: 0, expected: 2, got: 0 });
    }

    #[test]
    fn test_wrong_pass_size_is_contract_violation() {
        let board = Board::new(3, 10);
        let decision = Decision::Discard { discards: vec![4] };
        let mut p = player(vec![4, 5, 6], vec![], &board);
        let err = p.take_turn(&mut Fixed(decision, vec![]), 0).unwrap_err();
        assert_eq!(err, GameError::WrongDiscardCount { player: 0, expected: 2, got: 1 });
    }

    #[test]
    fn test_discarding_missing_cards_is_contract_violation() {
        let board = Board::new(3, 10);
        let decision = Decision::Discard { discards: vec![4, 4] };
        let mut p = player(vec![4, 5, 6], vec![], &board);
        let err = p.take_turn(&mut Fixed(decision, vec![]), 0).unwrap_err();
        assert_eq!(err, GameError::CardsNotInHand { player: 0, cards: vec![4] });
    }

    #[test]
    fn test_placing_a_sentinel_is_contract_violation() {
        let mut board = Board::new(3, 10);
        board.receive_card(START_CARD, 0, 1).unwrap();
        let decision = Decision::Place { card: 11, position: 0, discards: vec![] };
        let mut p = player(vec![11, 5, 6], vec![], &board);
        assert!(matches!(
            p.take_turn(&mut Fixed(decision, vec![]), 0),
            Err(GameError::IllegalPlacement { card: 11, .. })
        ));
    }

    #[test]
    fn test_turn_requires_observed_board() {
        let mut p = Player::new(3, 5, 2, vec![], vec![1, 2]);
        assert_eq!(p.take_turn(&mut Silent, 0), Err(GameError::NoBoardObserved { player: 3 }));
    }

    #[test]
    fn test_enumerations() {
        let board = Board::new(2, 10);
        let p = player(vec![3, 11, 11], vec![], &board);
        assert_eq!(p.enumerate_discard_combinations(2), vec![vec![3, 11], vec![11, 11]]);
        let placements = p.enumerate_legal_placements().unwrap();
        assert_eq!(placements.len(), 2);
        assert!(placements.iter().all(|pl| pl.card == 3 && pl.cost == 0));
    }
}
