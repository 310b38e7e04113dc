// ═══════════════════════════════════════════════════════════════════════
// Metrics — per-game statistics and series summaries.
//
// Action types are counted by their short codes (S, W, P, D, DS, F).
// ═══════════════════════════════════════════════════════════════════════

use crate::runner::GameResult;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tranquillity_engine::types::*;

#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub seed: u64,
    pub status: GameStatus,
    pub turns: usize,
    pub filled: usize,
    pub filled_pct: f64,
    /// Per player: action code -> count.
    pub action_counts: Vec<BTreeMap<String, usize>>,
    /// Share of each action code over the whole game, in percent.
    pub action_pct: BTreeMap<String, f64>,
    pub discards_by_player: Vec<usize>,
    pub total_discards: usize,
    /// Cards still undrawn across every deck.
    pub remaining_deck: usize,
}

impl GameMetrics {
    pub fn from_result(result: &GameResult) -> Self {
        let filled = result.board.filled_count();
        let size = result.board.size();

        let action_counts: Vec<BTreeMap<String, usize>> = result.player_results.iter()
            .map(|p| {
                let mut counts = BTreeMap::new();
                for action in &p.actions {
                    *counts.entry(action.code().to_string()).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        let mut totals: BTreeMap<String, usize> = BTreeMap::new();
        for counts in &action_counts {
            for (code, n) in counts {
                *totals.entry(code.clone()).or_insert(0) += n;
            }
        }
        let turns = result.history.len();
        let action_pct = totals.into_iter()
            .map(|(code, n)| (code, percent(n, turns)))
            .collect();

        let discards_by_player: Vec<usize> = result.player_results.iter().map(|p| p.discarded).collect();

        GameMetrics {
            seed: result.seed,
            status: result.status,
            turns,
            filled,
            filled_pct: percent(filled, size),
            action_counts,
            action_pct,
            total_discards: discards_by_player.iter().sum(),
            discards_by_player,
            remaining_deck: result.player_results.iter().map(|p| p.final_deck).sum(),
        }
    }

    pub fn won(&self) -> bool {
        self.status == GameStatus::Won
    }

    /// Ranking used to pick the best game of a series: a win beats a
    /// loss, among losses more filled slots is better, among wins fewer
    /// discards is better.
    pub fn compare(&self, other: &GameMetrics) -> Ordering {
        match (self.won(), other.won()) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (true, true) => other.total_discards.cmp(&self.total_discards),
            (false, false) => self.filled.cmp(&other.filled),
        }
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 { 0.0 } else { part as f64 / whole as f64 * 100.0 }
}

fn mean(values: impl Iterator<Item = usize>, n: usize) -> f64 {
    if n == 0 { 0.0 } else { values.sum::<usize>() as f64 / n as f64 }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesSummary {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    /// Games aborted by an error; not part of any average.
    pub failed: usize,
    pub win_rate: f64,
    pub total_turns: usize,
    pub total_discards: usize,
    pub avg_turns: f64,
    pub avg_filled: f64,
    pub avg_filled_pct: f64,
    pub avg_discards: f64,
    pub avg_remaining_deck: f64,
    pub best: Option<GameMetrics>,
}

impl SeriesSummary {
    pub fn from_metrics(metrics: &[GameMetrics], failed: usize) -> Self {
        let n = metrics.len();
        let wins = metrics.iter().filter(|m| m.won()).count();
        // Earliest seed wins ties
        let best = metrics.iter()
            .fold(None::<&GameMetrics>, |best, m| match best {
                Some(b) if b.compare(m) != Ordering::Less => Some(b),
                _ => Some(m),
            })
            .cloned();

        SeriesSummary {
            games: n,
            wins,
            losses: n - wins,
            failed,
            win_rate: percent(wins, n),
            total_turns: metrics.iter().map(|m| m.turns).sum(),
            total_discards: metrics.iter().map(|m| m.total_discards).sum(),
            avg_turns: mean(metrics.iter().map(|m| m.turns), n),
            avg_filled: mean(metrics.iter().map(|m| m.filled), n),
            avg_filled_pct: if n == 0 { 0.0 } else { metrics.iter().map(|m| m.filled_pct).sum::<f64>() / n as f64 },
            avg_discards: mean(metrics.iter().map(|m| m.total_discards), n),
            avg_remaining_deck: mean(metrics.iter().map(|m| m.remaining_deck), n),
            best,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::PlayerResult;
    use tranquillity_engine::Board;

    fn result(seed: u64, status: GameStatus, filled: usize, discards: [usize; 2]) -> GameResult {
        let mut board = Board::new(4, 20);
        for i in 0..filled {
            board.receive_card(i as Card + 1, i, 10).unwrap();
        }
        let actions = vec![ActionRecord::Place { card: 1, position: 0, discard_count: 0 }, ActionRecord::Discard];
        let player_results = (0..2)
            .map(|id| PlayerResult {
                id,
                agent_name: "Greedy".to_string(),
                actions: actions.clone(),
                discarded: discards[id],
                final_hand: 3,
                final_deck: 5,
            })
            .collect();
        let history = (0..4)
            .map(|i| TurnRecord { player: i % 2, action: actions[i / 2] })
            .collect();
        GameResult { seed, status, history, board, player_results }
    }

    #[test]
    fn test_game_metrics() {
        let m = GameMetrics::from_result(&result(1, GameStatus::Lost, 2, [3, 4]));
        assert_eq!(m.filled, 2);
        assert_eq!(m.filled_pct, 50.0);
        assert_eq!(m.total_discards, 7);
        assert_eq!(m.discards_by_player, vec![3, 4]);
        assert_eq!(m.remaining_deck, 10);
        assert_eq!(m.action_counts[0]["P"], 1);
        assert_eq!(m.action_counts[1]["D"], 1);
        assert_eq!(m.action_pct["P"], 50.0);
        assert_eq!(m.action_pct["D"], 50.0);
    }

    #[test]
    fn test_best_game_ranking() {
        let lost_short = GameMetrics::from_result(&result(1, GameStatus::Lost, 1, [0, 0]));
        let lost_long = GameMetrics::from_result(&result(2, GameStatus::Lost, 3, [9, 9]));
        let won_costly = GameMetrics::from_result(&result(3, GameStatus::Won, 4, [6, 6]));
        let won_cheap = GameMetrics::from_result(&result(4, GameStatus::Won, 4, [1, 2]));

        assert_eq!(lost_long.compare(&lost_short), Ordering::Greater);
        assert_eq!(won_costly.compare(&lost_long), Ordering::Greater);
        assert_eq!(won_cheap.compare(&won_costly), Ordering::Greater);

        let summary = SeriesSummary::from_metrics(
            &[lost_short.clone(), won_costly.clone(), won_cheap, lost_long],
            1,
        );
        assert_eq!(summary.games, 4);
        assert_eq!(summary.wins, 2);
        assert_eq!(summary.losses, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.win_rate, 50.0);
        assert_eq!(summary.best.as_ref().map(|b| b.seed), Some(4));

        let only_losses = SeriesSummary::from_metrics(&[lost_short], 0);
        assert_eq!(only_losses.best.map(|b| b.seed), Some(1));
    }

    #[test]
    fn test_empty_series() {
        let summary = SeriesSummary::from_metrics(&[], 2);
        assert_eq!(summary.games, 0);
        assert_eq!(summary.win_rate, 0.0);
        assert!(summary.best.is_none());
    }
}
