//! Main search engine implementation
//!
//! Every root successor is scored by a fixed-depth minimax with alpha-beta
//! pruning. Nodes where the searching side has the turn maximize, the others
//! minimize, so a capture chain that keeps the turn stays a max node. A side
//! with no legal move scores as lost. The best-scoring root moves are
//! collected and one is drawn at random.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::params::SearchParams;
use super::stats::SearchStats;
use crate::board::{BoardState, Side};
use crate::error::SearchError;
use crate::eval::{evaluate, LOSS_SCORE, WIN_SCORE};

/// Main search engine
pub struct Search {
    /// Search parameters
    params: SearchParams,

    /// Statistics of the last `make_move`
    stats: SearchStats,

    /// Tie-break generator
    rng: StdRng,
}

impl Search {
    /// Create new search engine
    pub fn new(params: SearchParams) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            params,
            stats: SearchStats::new(),
            rng,
        }
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Statistics of the last search
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Pick the move `side` plays from `state`.
    ///
    /// A lone legal move is returned without being evaluated.
    pub fn make_move(&mut self, state: &BoardState, side: Side) -> Result<BoardState, SearchError> {
        if state.turn() != side {
            return Err(SearchError::NotYourTurn {
                side,
                turn: state.turn(),
            });
        }

        self.stats.reset();
        self.stats.start_timing();

        let mut moves = state.successors(side);
        if moves.len() == 1 {
            self.stats.update_timing();
            return moves.pop().ok_or(SearchError::NoMoves);
        }

        let depth = self.params.depth;
        let mut best_score = i32::MIN;
        let mut best_moves = Vec::new();

        for mv in moves {
            self.stats.inc_root_move();
            let score = self.minimax(&mv, side, depth, i32::MIN, i32::MAX);
            if score > best_score {
                best_score = score;
                best_moves.clear();
            }
            if score == best_score {
                best_moves.push(mv);
            }
        }

        self.stats.tied_moves = best_moves.len() as u64;
        if best_moves.len() > 1 {
            info!(
                "{} choosing a random best move among {}",
                side,
                best_moves.len()
            );
        }
        let chosen = self.select_random(best_moves)?;

        self.stats.update_timing();
        self.stats.log_summary();
        debug!(score = best_score, from = ?chosen.from_square(), to = ?chosen.to_square(), "{} move selected", side);
        Ok(chosen)
    }

    fn minimax(&mut self, node: &BoardState, side: Side, depth: u8, mut alpha: i32, mut beta: i32) -> i32 {
        self.stats.inc_node();

        if depth == 0 || node.is_game_over() {
            return self.static_eval(node, side);
        }

        let children = node.successors(node.turn());
        if children.is_empty() {
            // a side left without a move has lost
            return if node.turn() == side { LOSS_SCORE } else { WIN_SCORE };
        }

        if node.turn() == side {
            let mut best = i32::MIN;
            for child in &children {
                best = best.max(self.minimax(child, side, depth - 1, alpha, beta));
                alpha = alpha.max(best);
                if alpha >= beta {
                    self.stats.inc_cutoff();
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for child in &children {
                best = best.min(self.minimax(child, side, depth - 1, alpha, beta));
                beta = beta.min(best);
                if alpha >= beta {
                    self.stats.inc_cutoff();
                    break;
                }
            }
            best
        }
    }

    fn static_eval(&mut self, node: &BoardState, side: Side) -> i32 {
        self.stats.inc_evaluation();
        evaluate(node, side, self.params.heuristic)
    }

    fn select_random(&mut self, mut moves: Vec<BoardState>) -> Result<BoardState, SearchError> {
        if moves.is_empty() {
            return Err(SearchError::NoMoves);
        }
        let index = self.rng.random_range(0..moves.len());
        Ok(moves.swap_remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Rules;

    #[test]
    fn test_empty_choice_is_rejected() {
        let mut search = Search::new(SearchParams::new().seed(Some(1)));
        assert_eq!(search.select_random(Vec::new()), Err(SearchError::NoMoves));
    }

    #[test]
    fn test_blocked_side_has_lost() {
        // light man on 90 can neither step to 81 nor jump to 72
        let state = BoardState::from_squares(Side::Light, &[72, 81], &[90], &[], Rules::default()).unwrap();
        assert!(state.successors(Side::Light).is_empty());
        let mut search = Search::new(SearchParams::new().seed(Some(1)));
        assert_eq!(search.minimax(&state, Side::Light, 2, i32::MIN, i32::MAX), LOSS_SCORE);
        assert_eq!(search.minimax(&state, Side::Dark, 2, i32::MIN, i32::MAX), WIN_SCORE);
        // the horizon still uses the heuristic
        assert_eq!(search.minimax(&state, Side::Dark, 0, i32::MIN, i32::MAX), 1);
    }

    #[test]
    fn test_seeded_searches_agree() {
        let state = BoardState::initial_layout(Side::Dark, Rules::default());
        let params = SearchParams::new().depth(2).seed(Some(7));
        let first = Search::new(params.clone()).make_move(&state, Side::Dark).unwrap();
        let second = Search::new(params).make_move(&state, Side::Dark).unwrap();
        assert_eq!(first, second);
    }
}
