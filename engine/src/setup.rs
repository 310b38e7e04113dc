// ═══════════════════════════════════════════════════════════════════════
// Game setup — deals decks and opening hands for N players
// ═══════════════════════════════════════════════════════════════════════

use crate::config::GameConfig;
use crate::player::Player;
use crate::types::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deal one seeded game:
///   1. pool = n_finish finish cards + numbered cards 1..=n_cards, shuffled
///   2. players take consecutive chunks, the last one takes the rest
///   3. each player draws an opening hand from the end of their chunk
///   4. one start card goes into every deck, which is then shuffled
pub fn deal(config: &GameConfig, seed: u64) -> Vec<Player> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let n_players = config.n_players;

    let mut pool: Vec<Card> = std::iter::repeat(finish_card(config.n_cards))
        .take(config.n_finish)
        .chain(1..=config.n_cards)
        .collect();
    pool.shuffle(&mut rng);

    let deck_len = (pool.len() + 1) / n_players;
    let mut decks: Vec<Vec<Card>> = (0..n_players - 1)
        .map(|i| pool[i * deck_len..(i + 1) * deck_len].to_vec())
        .collect();
    decks.push(pool[(n_players - 1) * deck_len..].to_vec());

    decks.into_iter()
        .enumerate()
        .map(|(id, mut deck)| {
            let hand: Vec<Card> = (0..config.hand_size).filter_map(|_| deck.pop()).collect();
            deck.push(START_CARD);
            deck.shuffle(&mut rng);
            Player::new(id, config.hand_size, config.pass_discard_size, deck, hand)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_cards(players: &[Player]) -> Vec<Card> {
        // Hands only: decks stay private
        players.iter().flat_map(|p| p.hand().to_vec()).collect()
    }

    #[test]
    fn test_deal_sizes() {
        let config = GameConfig::default();
        let players = deal(&config, 42);
        assert_eq!(players.len(), 4);

        // 85 cards in the pool, chunks of 21, last player gets 22
        let total: usize = players.iter().map(|p| p.hand_len() + p.deck_len()).sum();
        assert_eq!(total, 85 + 4);
        for p in &players[..3] {
            assert_eq!(p.hand_len(), 5);
            assert_eq!(p.deck_len(), 21 - 5 + 1);
        }
        assert_eq!(players[3].deck_len(), 22 - 5 + 1);
    }

    #[test]
    fn test_opening_hands_hold_no_start_card() {
        for seed in 0..20 {
            let players = deal(&GameConfig::default(), seed);
            assert!(all_cards(&players).iter().all(|&c| c != START_CARD));
        }
    }

    #[test]
    fn test_deterministic_seed() {
        let a = deal(&GameConfig::default(), 123);
        let b = deal(&GameConfig::default(), 123);
        let c = deal(&GameConfig::default(), 124);
        assert_eq!(all_cards(&a), all_cards(&b));
        assert_ne!(all_cards(&a), all_cards(&c));
    }

    #[test]
    fn test_hands_are_distinct_numbered_cards_or_finish() {
        let config = GameConfig::default();
        let players = deal(&config, 7);
        let mut numbered: Vec<Card> = all_cards(&players)
            .into_iter()
            .filter(|&c| c != finish_card(config.n_cards))
            .collect();
        let len = numbered.len();
        numbered.sort_unstable();
        numbered.dedup();
        assert_eq!(numbered.len(), len);
        assert!(numbered.iter().all(|&c| (1..=config.n_cards).contains(&c)));
    }
}
