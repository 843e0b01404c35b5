//! Search parameters and configuration
//!
//! Controls the fixed search depth, the leaf heuristic and the seed used to
//! break ties between equally scored moves.

use crate::eval::Heuristic;

/// Hard ceiling on the search depth, bounding the minimax recursion
pub const MAX_SEARCH_DEPTH: u8 = 32;

/// Search parameters for the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Plies searched below each root move
    pub depth: u8,

    /// Leaf evaluation function
    pub heuristic: Heuristic,

    /// Seed for the tie-break generator (None = seeded from the OS)
    pub seed: Option<u64>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            depth: 8,
            heuristic: Heuristic::Difference,
            seed: None,
        }
    }
}

impl SearchParams {
    /// Create new search params with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set search depth in plies, capped at [`MAX_SEARCH_DEPTH`]
    pub fn depth(mut self, depth: u8) -> Self {
        self.depth = depth.min(MAX_SEARCH_DEPTH);
        self
    }

    /// Set leaf heuristic
    pub fn heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Set tie-break seed
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}
