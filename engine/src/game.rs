// ═══════════════════════════════════════════════════════════════════════
// Game Orchestrator — drives the turn loop to a Won or Lost outcome.
//
// The orchestrator is the only writer of the shared board. Each step:
//   1. the current player observes the board and every player's public info
//   2. the player takes its turn (asking its agent if needed)
//   3. the returned action's board effect is applied here
//   4. completion / failure is checked before anyone else acts
//
// Start-discard window: once a player plays the start card, every
// player's next turn (the opener's included) is a mandated discard of
// its share. The window closes after the opener's own next turn.
// ═══════════════════════════════════════════════════════════════════════

use crate::board::Board;
use crate::config::GameConfig;
use crate::decision::Agent;
use crate::error::GameError;
use crate::player::Player;
use crate::setup;
use crate::types::*;
use crate::visibility::PublicPlayerInfo;

pub struct Game {
    board: Board,
    players: Vec<Player>,
    agents: Vec<Box<dyn Agent>>,
    start_discards: Vec<usize>,
    cursor: PlayerId,
    status: GameStatus,
    /// Player who opened the start-discard window, while it is open.
    start_window: Option<PlayerId>,
    history: Vec<TurnRecord>,
}

impl Game {
    /// Deal a seeded game. `agents[i]` plays for player `i`.
    pub fn new(config: &GameConfig, seed: u64, agents: Vec<Box<dyn Agent>>) -> Result<Self, GameError> {
        Self::from_players(config, setup::deal(config, seed), agents)
    }

    /// Build a game from already dealt players. Needs exactly one player
    /// and one agent per configured seat.
    pub fn from_players(
        config: &GameConfig,
        players: Vec<Player>,
        agents: Vec<Box<dyn Agent>>,
    ) -> Result<Self, GameError> {
        if players.len() != config.n_players || agents.len() != config.n_players {
            return Err(GameError::SeatMismatch {
                seats: config.n_players,
                players: players.len(),
                agents: agents.len(),
            });
        }
        Ok(Game {
            board: Board::new(config.board_size, config.n_cards),
            players,
            agents,
            start_discards: config.start_discard_shares(),
            cursor: 0,
            status: GameStatus::Playing,
            start_window: None,
            history: Vec::new(),
        })
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Whose turn is next.
    pub fn cursor(&self) -> PlayerId {
        self.cursor
    }

    pub fn start_window(&self) -> Option<PlayerId> {
        self.start_window
    }

    /// Every action in the order it was taken.
    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    pub fn agent_names(&self) -> Vec<String> {
        self.agents.iter().map(|a| a.name().to_string()).collect()
    }

    // ── Turn loop ──────────────────────────────────────────────────────

    /// Run one player's turn. Does nothing once the game is over.
    pub fn step(&mut self) -> Result<GameStatus, GameError> {
        if self.status.is_terminal() {
            return Ok(self.status);
        }

        let id = self.cursor;
        let start_turn_discards = if self.start_window.is_some() { self.start_discards[id] } else { 0 };

        let public: Vec<PublicPlayerInfo> = self.players.iter().map(Player::public_info).collect();
        let player = &mut self.players[id];
        player.observe_board(&self.board);
        player.observe_players(public);
        let budget = player.hand_len().saturating_sub(1);
        let action = player.take_turn(self.agents[id].as_mut(), start_turn_discards)?;

        if self.start_window == Some(id) {
            self.start_window = None;
        }
        self.history.push(TurnRecord { player: id, action });

        match action {
            ActionRecord::StartPlay => {
                self.board.receive_card(START_CARD, 0, budget)?;
                self.start_window = Some(id);
                self.check_won();
            }
            ActionRecord::Place { card, position, .. } | ActionRecord::Win { card, position, .. } => {
                self.board.receive_card(card, position, budget)?;
                self.check_won();
            }
            ActionRecord::Fail => {
                self.status = GameStatus::Lost;
            }
            ActionRecord::Discard | ActionRecord::StartDiscard { .. } => {}
        }

        if self.status.is_terminal() {
            log::info!("game over: {} after {} turns, board {}", self.status, self.history.len(), self.board.render());
        }
        self.cursor = (id + 1) % self.players.len();
        Ok(self.status)
    }

    /// Play until the game is won or lost. `max_turns` guards against a
    /// misbehaving setup; a legal game always ends well before it.
    pub fn run(&mut self, max_turns: usize) -> Result<GameStatus, GameError> {
        while !self.status.is_terminal() {
            if self.history.len() >= max_turns {
                return Err(GameError::TurnLimit { turns: max_turns });
            }
            self.step()?;
        }
        Ok(self.status)
    }

    fn check_won(&mut self) {
        if self.board.check_completion() {
            self.status = GameStatus::Won;
        }
    }
}
