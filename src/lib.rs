pub mod board;
pub mod config;
pub mod error;
pub mod eval;
pub mod game;
pub mod protocol;
pub mod search;
pub mod time;

pub use board::{BoardState, Piece, Rank, Rules, Side};
pub use config::{Difficulty, GameConfig};
pub use game::{Game, MoveOutcome};
