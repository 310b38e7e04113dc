// ═══════════════════════════════════════════════════════════════════════
// Greedy Agent — places a card whenever it legally can, picking uniformly
// among every (card, position, discard set) play; otherwise passes with a
// random discard. Serves as baseline and for engine stability runs.
// ═══════════════════════════════════════════════════════════════════════

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tranquillity_engine::decision::{Agent, Decision};
use tranquillity_engine::types::Card;
use tranquillity_engine::visibility::PlayerView;

pub struct GreedyAgent {
    rng: ChaCha8Rng,
}

impl GreedyAgent {
    pub fn new(seed: u64) -> Self {
        GreedyAgent {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn random_discards(&mut self, view: &PlayerView, n: usize) -> Vec<Card> {
        view.discard_combinations(n)
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| view.hand.iter().take(n).copied().collect())
    }
}

impl Agent for GreedyAgent {
    fn name(&self) -> &str { "Greedy" }

    fn decide_action(&mut self, view: &PlayerView) -> Decision {
        let plays = view.all_plays();
        if let Some(play) = plays.choose(&mut self.rng) {
            return play.clone();
        }
        Decision::Discard { discards: self.random_discards(view, view.pass_discard_size) }
    }

    fn decide_start_discards(&mut self, view: &PlayerView, n: usize) -> Vec<Card> {
        self.random_discards(view, n)
    }
}
