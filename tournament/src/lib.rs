pub mod runner;
pub mod metrics;
pub mod database;

pub use runner::{run_game, run_series, GameResult, PlayerResult, RunError};
pub use metrics::{GameMetrics, SeriesSummary};
pub use database::Database;
