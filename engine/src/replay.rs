// ═══════════════════════════════════════════════════════════════════════
// Replay — rebuild a board from a recorded history.
// ═══════════════════════════════════════════════════════════════════════

use crate::board::Board;
use crate::error::BoardError;
use crate::types::*;

/// Apply the board effects (start, place, finish) of `history` in order
/// to a fresh board. Discards and failures have no board effect.
pub fn replay(board_size: usize, n_cards: Card, history: &[TurnRecord]) -> Result<Board, BoardError> {
    let mut board = Board::new(board_size, n_cards);
    for turn in history {
        match turn.action {
            ActionRecord::StartPlay => board.receive_card(START_CARD, 0, 1)?,
            ActionRecord::Place { card, position, discard_count }
            | ActionRecord::Win { card, position, discard_count } => {
                // The recorded discards paid the exact cost, so they are a
                // sufficient budget; a free play still needs a non-empty hand.
                board.receive_card(card, position, discard_count.max(1))?
            }
            ActionRecord::Discard | ActionRecord::StartDiscard { .. } | ActionRecord::Fail => {}
        }
    }
    Ok(board)
}

pub fn history_to_json(history: &[TurnRecord]) -> serde_json::Result<String> {
    serde_json::to_string(history)
}

pub fn history_from_json(json: &str) -> serde_json::Result<Vec<TurnRecord>> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(player: PlayerId, action: ActionRecord) -> TurnRecord {
        TurnRecord { player, action }
    }

    #[test]
    fn test_replay_skips_discards() {
        let history = vec![
            turn(0, ActionRecord::StartPlay),
            turn(1, ActionRecord::StartDiscard { discard_count: 1 }),
            turn(0, ActionRecord::Place { card: 4, position: 1, discard_count: 0 }),
            turn(1, ActionRecord::Discard),
            turn(0, ActionRecord::Place { card: 2, position: 0, discard_count: 2 }),
        ];
        let board = replay(3, 10, &history).unwrap();
        assert!(board.is_started());
        assert_eq!(board.slots(), &[Some(2), Some(4), None]);
    }

    #[test]
    fn test_replay_rejects_corrupt_history() {
        let history = vec![
            turn(0, ActionRecord::Place { card: 4, position: 1, discard_count: 0 }),
            turn(0, ActionRecord::Place { card: 6, position: 0, discard_count: 0 }),
        ];
        assert!(matches!(
            replay(3, 10, &history),
            Err(BoardError::IllegalPlacement { card: 6, position: 0, .. })
        ));
    }

    #[test]
    fn test_json_format() {
        let history = vec![
            turn(0, ActionRecord::StartPlay),
            turn(1, ActionRecord::Place { card: 7, position: 2, discard_count: 1 }),
        ];
        let json = history_to_json(&history).unwrap();
        assert_eq!(
            json,
            r#"[{"player":0,"action":{"type":"StartPlay"}},{"player":1,"action":{"type":"Place","card":7,"position":2,"discard_count":1}}]"#
        );
        assert_eq!(history_from_json(&json).unwrap(), history);
    }
}
