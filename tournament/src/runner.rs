// ═══════════════════════════════════════════════════════════════════════
// Game Runner — runs complete headless games with agents, one at a time
// or as a seeded series spread over a rayon pool.
// ═══════════════════════════════════════════════════════════════════════

use rayon::prelude::*;
use tranquillity_agents::{build_agents, AgentKind};
use tranquillity_engine::types::*;
use tranquillity_engine::{Board, ConfigError, Game, GameConfig, GameError};

/// Safety limit on turns per game. Every non-failing turn removes at
/// least one card from some hand or deck, so a legal game ends long
/// before this.
pub const MAX_TURNS: usize = 100_000;

/// Result of a completed game.
#[derive(Debug, Clone)]
pub struct GameResult {
    pub seed: u64,
    pub status: GameStatus,
    pub history: Vec<TurnRecord>,
    pub board: Board,
    pub player_results: Vec<PlayerResult>,
}

#[derive(Debug, Clone)]
pub struct PlayerResult {
    pub id: PlayerId,
    pub agent_name: String,
    pub actions: Vec<ActionRecord>,
    pub discarded: usize,
    pub final_hand: usize,
    pub final_deck: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Lineup(String),

    #[error("game with seed {seed} aborted: {source}")]
    Game {
        seed: u64,
        #[source]
        source: GameError,
    },
}

/// Run one seeded game. `kinds` is either a single kind for every seat
/// or one kind per player.
pub fn run_game(config: &GameConfig, seed: u64, kinds: &[AgentKind]) -> Result<GameResult, RunError> {
    config.validate()?;
    let lineup = AgentKind::lineup(kinds, config.n_players).map_err(RunError::Lineup)?;
    let mut game = Game::new(config, seed, build_agents(&lineup, seed))
        .map_err(|source| RunError::Game { seed, source })?;
    game.run(MAX_TURNS)
        .map_err(|source| RunError::Game { seed, source })?;
    Ok(build_result(&game, seed, config.pass_discard_size))
}

/// Run `games` games with seeds `start_seed..start_seed + games`.
/// Results come back in seed order whether or not they ran in parallel.
pub fn run_series(
    config: &GameConfig,
    start_seed: u64,
    games: u64,
    kinds: &[AgentKind],
    parallel: bool,
) -> Result<Vec<Result<GameResult, RunError>>, RunError> {
    config.validate()?;
    let lineup = AgentKind::lineup(kinds, config.n_players).map_err(RunError::Lineup)?;
    let play = |i: u64| {
        let seed = start_seed.wrapping_add(i);
        let result = run_game(config, seed, &lineup);
        if let Err(e) = &result {
            log::warn!("{}", e);
        }
        result
    };

    let results: Vec<_> = if parallel {
        (0..games).into_par_iter().map(play).collect()
    } else {
        (0..games).map(play).collect()
    };
    Ok(results)
}

fn build_result(game: &Game, seed: u64, pass_discard_size: usize) -> GameResult {
    let names = game.agent_names();
    let player_results = game.players().iter()
        .zip(names)
        .map(|(player, agent_name)| PlayerResult {
            id: player.id(),
            agent_name,
            actions: player.action_history().to_vec(),
            discarded: player.action_history().iter()
                .map(|a| a.discarded(pass_discard_size))
                .sum(),
            final_hand: player.hand_len(),
            final_deck: player.deck_len(),
        })
        .collect();

    GameResult {
        seed,
        status: game.status(),
        history: game.history().to_vec(),
        board: game.board().clone(),
        player_results,
    }
}
