// ═══════════════════════════════════════════════════════════════════════
// Database — SQLite storage for game results and per-agent statistics
//
// A game row keeps everything needed to replay it: the board dimensions
// and the full turn history as JSON.
// ═══════════════════════════════════════════════════════════════════════

use crate::metrics::GameMetrics;
use crate::runner::GameResult;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use tranquillity_engine::replay::{history_from_json, history_to_json};
use tranquillity_engine::types::*;

pub struct Database {
    conn: Connection,
}

/// A stored game, enough to rebuild its final board.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredGame {
    pub id: i64,
    pub seed: u64,
    pub status: GameStatus,
    pub board_size: usize,
    pub n_cards: Card,
    pub lineup: Vec<String>,
    pub history: Vec<TurnRecord>,
}

/// Aggregates over every seat an agent has played.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentStats {
    pub name: String,
    pub seats: u32,
    pub wins: u32,
    pub discards: u64,
}

impl AgentStats {
    pub fn win_rate(&self) -> f64 {
        if self.seats == 0 { 0.0 } else { self.wins as f64 / self.seats as f64 * 100.0 }
    }

    pub fn avg_discards(&self) -> f64 {
        if self.seats == 0 { 0.0 } else { self.discards as f64 / self.seats as f64 }
    }
}

impl Database {
    /// Open (or create) a database at the given path.
    pub fn new(path: &str) -> rusqlite::Result<Self> {
        let db = Database { conn: Connection::open(path)? };
        db.create_schema()?;
        Ok(db)
    }

    /// In-memory database (useful for tests).
    pub fn in_memory() -> rusqlite::Result<Self> {
        let db = Database { conn: Connection::open_in_memory()? };
        db.create_schema()?;
        Ok(db)
    }

    fn create_schema(&self) -> rusqlite::Result<()> {
        self.conn.execute_batch("
            CREATE TABLE IF NOT EXISTS agents (
                id          INTEGER PRIMARY KEY,
                name        TEXT NOT NULL UNIQUE,
                seats       INTEGER NOT NULL DEFAULT 0,
                wins        INTEGER NOT NULL DEFAULT 0,
                discards    INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS games (
                id              INTEGER PRIMARY KEY,
                seed            INTEGER NOT NULL,
                outcome         TEXT NOT NULL,
                board_size      INTEGER NOT NULL,
                n_cards         INTEGER NOT NULL,
                filled          INTEGER NOT NULL,
                total_discards  INTEGER NOT NULL,
                turns           INTEGER NOT NULL,
                lineup          TEXT NOT NULL,
                history         TEXT NOT NULL,
                played_at       TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE IF NOT EXISTS game_players (
                id          INTEGER PRIMARY KEY,
                game_id     INTEGER NOT NULL REFERENCES games(id),
                agent_id    INTEGER NOT NULL REFERENCES agents(id),
                player      INTEGER NOT NULL,
                actions     INTEGER NOT NULL,
                discards    INTEGER NOT NULL
            );
        ")
    }

    /// Register an agent (or return existing ID).
    pub fn register_agent(&self, name: &str) -> rusqlite::Result<i64> {
        self.conn.execute(
            "INSERT OR IGNORE INTO agents (name) VALUES (?1)",
            params![name],
        )?;
        self.conn.query_row(
            "SELECT id FROM agents WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )
    }

    /// Store a completed game and fold it into the agents' stats.
    pub fn store_game(&self, result: &GameResult, metrics: &GameMetrics) -> rusqlite::Result<i64> {
        let history = history_to_json(&result.history).map_err(json_error)?;
        let lineup: Vec<&str> = result.player_results.iter().map(|p| p.agent_name.as_str()).collect();
        let won = result.status == GameStatus::Won;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO games (seed, outcome, board_size, n_cards, filled, total_discards, turns, lineup, history)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                result.seed as i64,
                result.status.to_string(),
                result.board.size() as i64,
                result.board.n_cards() as i64,
                metrics.filled as i64,
                metrics.total_discards as i64,
                metrics.turns as i64,
                lineup.join(","),
                history,
            ],
        )?;
        let game_id = tx.last_insert_rowid();

        for pr in &result.player_results {
            let agent_id = self.register_agent(&pr.agent_name)?;
            tx.execute(
                "INSERT INTO game_players (game_id, agent_id, player, actions, discards)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![game_id, agent_id, pr.id as i64, pr.actions.len() as i64, pr.discarded as i64],
            )?;
            tx.execute(
                "UPDATE agents SET seats = seats + 1, wins = wins + ?1, discards = discards + ?2 WHERE id = ?3",
                params![won as i64, pr.discarded as i64, agent_id],
            )?;
        }
        tx.commit()?;
        Ok(game_id)
    }

    /// Load a stored game by id.
    pub fn load_game(&self, game_id: i64) -> rusqlite::Result<Option<StoredGame>> {
        self.conn.query_row(
            "SELECT id, seed, outcome, board_size, n_cards, lineup, history FROM games WHERE id = ?1",
            params![game_id],
            |row| {
                let outcome: String = row.get(2)?;
                let status = match outcome.as_str() {
                    "WIN" => GameStatus::Won,
                    "LOSE" => GameStatus::Lost,
                    _ => GameStatus::Playing,
                };
                let lineup: String = row.get(5)?;
                let history: String = row.get(6)?;
                Ok(StoredGame {
                    id: row.get(0)?,
                    seed: row.get::<_, i64>(1)? as u64,
                    status,
                    board_size: row.get::<_, i64>(3)? as usize,
                    n_cards: row.get::<_, i64>(4)? as Card,
                    lineup: lineup.split(',').map(str::to_string).collect(),
                    history: history_from_json(&history)
                        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?,
                })
            },
        ).optional()
    }

    /// Per-agent stats, best win rate first.
    pub fn agent_stats(&self) -> rusqlite::Result<Vec<AgentStats>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, seats, wins, discards FROM agents
             ORDER BY CAST(wins AS REAL) / MAX(seats, 1) DESC, name"
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(AgentStats {
                name: row.get(0)?,
                seats: row.get(1)?,
                wins: row.get(2)?,
                discards: row.get::<_, i64>(3)? as u64,
            })
        })?;
        rows.collect()
    }

    /// Get total number of games stored.
    pub fn game_count(&self) -> rusqlite::Result<u32> {
        self.conn.query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))
    }
}

fn json_error(e: serde_json::Error) -> rusqlite::Error {
    rusqlite::Error::ToSqlConversionFailure(Box::new(e))
}
