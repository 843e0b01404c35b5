//! Move search for the automated player
//!
//! Fixed-depth minimax with alpha-beta pruning and a random tie-break
//! between equally scored root moves.

pub mod params;
pub mod search;
pub mod stats;

pub use self::params::{SearchParams, MAX_SEARCH_DEPTH};
pub use self::search::Search;
pub use self::stats::SearchStats;
