//! Search statistics
//!
//! Tracks nodes visited, leaf evaluations, cutoffs and timing for one
//! `make_move` call.

use std::time::{Duration, Instant};

use tracing::debug;

/// Search statistics
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Minimax nodes visited (root position excluded)
    pub nodes: u64,

    /// Heuristic evaluations performed
    pub evaluations: u64,

    /// Alpha-beta cutoffs
    pub cutoffs: u64,

    /// Root moves scored
    pub root_moves: u64,

    /// Root moves sharing the best score
    pub tied_moves: u64,

    /// Search start time
    pub start_time: Option<Instant>,

    /// Time spent searching
    pub search_time: Duration,
}

impl SearchStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_timing(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn update_timing(&mut self) {
        if let Some(start) = self.start_time {
            self.search_time = start.elapsed();
        }
    }

    pub fn inc_node(&mut self) {
        self.nodes += 1;
    }

    pub fn inc_evaluation(&mut self) {
        self.evaluations += 1;
    }

    pub fn inc_cutoff(&mut self) {
        self.cutoffs += 1;
    }

    pub fn inc_root_move(&mut self) {
        self.root_moves += 1;
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Emit a one-line summary at debug level
    pub fn log_summary(&self) {
        debug!(
            nodes = self.nodes,
            evaluations = self.evaluations,
            cutoffs = self.cutoffs,
            root_moves = self.root_moves,
            tied_moves = self.tied_moves,
            elapsed_ms = self.search_time.as_millis() as u64,
            "search finished"
        );
    }
}
