//! Error types for the draughts engine
//!
//! Illegal user moves are not errors (see [`crate::game::MoveOutcome`]); the
//! types here cover contract violations by the caller and bad configuration.

use thiserror::Error;

use crate::board::Side;

/// Errors raised while building or querying a board
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Square index outside the board
    #[error("Invalid square index: {square} (must be 0-99)")]
    OffBoard { square: usize },

    /// Light squares never hold a piece
    #[error("Square {square} is not a playable square")]
    NotPlayable { square: usize },

    #[error("Square {square} is listed more than once")]
    DuplicateSquare { square: usize },

    #[error("King square {square} holds no piece")]
    KingWithoutPiece { square: usize },

    /// Moves requested for a piece the side does not own
    #[error("No {side} piece at square {square}")]
    NotOwned { square: usize, side: Side },
}

/// Errors raised by the move search
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Cannot search for {side} while it is {turn}'s turn")]
    NotYourTurn { side: Side, turn: Side },

    #[error("Cannot choose a move from an empty list")]
    NoMoves,
}

/// Errors surfaced by a game session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Errors raised while applying configuration options
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Option {name} requires a value")]
    MissingValue { name: String },

    #[error("Invalid value for option {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// Errors that end the text protocol loop
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for game session operations
pub type GameResult<T> = Result<T, GameError>;
