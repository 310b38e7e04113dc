pub mod types;
pub mod error;
pub mod config;
pub mod board;
pub mod moves;
pub mod visibility;
pub mod decision;
pub mod player;
pub mod setup;
pub mod game;
pub mod replay;


pub use types::*;
pub use board::Board;
pub use config::GameConfig;
pub use decision::{Agent, Decision};
pub use error::{BoardError, ConfigError, GameError};
pub use game::Game;
pub use player::Player;
pub use visibility::{PlayerView, PublicPlayerInfo};
