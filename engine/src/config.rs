// ═══════════════════════════════════════════════════════════════════════
// Game configuration
// ═══════════════════════════════════════════════════════════════════════

use crate::error::ConfigError;
use crate::types::Card;
use serde::{Deserialize, Serialize};

/// Parameters of one game. Validated once before any game is built; the
/// engine assumes they hold afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub n_players: usize,
    pub board_size: usize,
    pub hand_size: usize,
    pub n_cards: Card,
    pub n_finish: usize,
    pub start_discard_size: usize,
    pub pass_discard_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            n_players: 4,
            board_size: 36,
            hand_size: 5,
            n_cards: 80,
            n_finish: 5,
            start_discard_size: 2,
            pass_discard_size: 2,
        }
    }
}

impl GameConfig {
    /// Load a config from a JSON string. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)
            .map_err(|e| ConfigError::Validation(format!("invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_players == 0 {
            return Err(ConfigError::Validation("n_players must be > 0".into()));
        }
        if self.n_cards >= Card::MAX {
            return Err(ConfigError::Validation(format!(
                "n_cards must be < {} so the finish card stays representable",
                Card::MAX
            )));
        }
        if self.board_size == 0 || self.board_size >= self.n_cards as usize {
            return Err(ConfigError::Validation(
                "board_size must satisfy 0 < board_size < n_cards".into(),
            ));
        }
        if self.n_finish == 0 {
            return Err(ConfigError::Validation("n_finish must be > 0".into()));
        }
        if self.pass_discard_size == 0 {
            return Err(ConfigError::Validation("pass_discard_size must be > 0".into()));
        }
        let share = self.start_discard_size.div_ceil(self.n_players);
        if self.hand_size < self.pass_discard_size.max(share) {
            return Err(ConfigError::Validation(format!(
                "hand_size {} must cover pass_discard_size {} and the start-discard share {}",
                self.hand_size, self.pass_discard_size, share
            )));
        }
        if self.start_discard_size >= self.hand_size * self.n_players {
            return Err(ConfigError::Validation(
                "start_discard_size must be < hand_size * n_players".into(),
            ));
        }
        let pool = self.n_cards as usize + self.n_finish;
        if pool < self.n_players * self.hand_size {
            return Err(ConfigError::Validation(format!(
                "{} cards cannot deal {} hands of {}",
                pool, self.n_players, self.hand_size
            )));
        }
        Ok(())
    }

    /// Per-player share of the mandated start discard: an even split, with
    /// the remainder handed out one card each to the lowest ids.
    pub fn start_discard_shares(&self) -> Vec<usize> {
        let base = self.start_discard_size / self.n_players;
        let remainder = self.start_discard_size % self.n_players;
        (0..self.n_players)
            .map(|i| if i < remainder { base + 1 } else { base })
            .collect()
    }
}
