//! Game session: turn handling, move validation, engine replies and undo.
//!
//! The session keeps the current [`BoardState`] plus a bounded list of the
//! states before it. Human moves are checked against the successor sets and
//! rejected with a [`MoveOutcome`] diagnostic; they never fail hard. Engine
//! moves come from [`Search`].

use std::collections::{BTreeSet, VecDeque};
use std::fmt;
use std::mem;

use tracing::{debug, info};

use crate::board::{offset, BoardState, Piece, Side};
use crate::config::GameConfig;
use crate::error::GameResult;
use crate::search::{Search, SearchStats};

/// Result of a requested human move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    Success,
    NotOnBoard,
    ForcedJump,
    NotDiagonal,
    NoFreeSpace,
    NoBackwardMovesForSingles,
    OnlySingleDiagonals,
    UnknownInvalid,
    PieceBlocked,
}

impl MoveOutcome {
    pub const ALL: [MoveOutcome; 9] = [
        MoveOutcome::Success,
        MoveOutcome::NotOnBoard,
        MoveOutcome::ForcedJump,
        MoveOutcome::NotDiagonal,
        MoveOutcome::NoFreeSpace,
        MoveOutcome::NoBackwardMovesForSingles,
        MoveOutcome::OnlySingleDiagonals,
        MoveOutcome::UnknownInvalid,
        MoveOutcome::PieceBlocked,
    ];

    /// Stable identifier for the presentation layer
    pub fn as_str(self) -> &'static str {
        match self {
            MoveOutcome::Success => "SUCCESS",
            MoveOutcome::NotOnBoard => "NOT_ON_BOARD",
            MoveOutcome::ForcedJump => "FORCED_JUMP",
            MoveOutcome::NotDiagonal => "NOT_DIAGONAL",
            MoveOutcome::NoFreeSpace => "NO_FREE_SPACE",
            MoveOutcome::NoBackwardMovesForSingles => "NO_BACKWARD_MOVES_FOR_SINGLES",
            MoveOutcome::OnlySingleDiagonals => "ONLY_SINGLE_DIAGONALS",
            MoveOutcome::UnknownInvalid => "UNKNOWN_INVALID",
            MoveOutcome::PieceBlocked => "PIECE_BLOCKED",
        }
    }

    pub fn is_success(self) -> bool {
        self == MoveOutcome::Success
    }
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct Game {
    config: GameConfig,
    current: BoardState,
    // older states, oldest at the front
    past: VecDeque<BoardState>,
    engine: Search,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let state = BoardState::initial_layout(config.first_mover, config.rules());
        Self::with_state(config, state)
    }

    /// Start a session from an arbitrary position
    pub fn with_state(config: GameConfig, state: BoardState) -> Self {
        info!(
            first = %state.turn(),
            computer = %config.computer,
            depth = config.search_depth,
            forced_captures = state.rules().forced_captures,
            "new game"
        );
        Self {
            engine: Search::new(config.search_params()),
            past: VecDeque::with_capacity(config.undo_capacity),
            current: state,
            config,
        }
    }

    /// Throw the session away and start over
    pub fn restart(&mut self, config: GameConfig) {
        *self = Self::new(config);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &BoardState {
        &self.current
    }

    pub fn turn(&self) -> Side {
        self.current.turn()
    }

    pub fn human(&self) -> Side {
        self.config.human()
    }

    pub fn computer(&self) -> Side {
        self.config.computer
    }

    pub fn piece_at(&self, square: usize) -> Option<Piece> {
        self.current.piece_at(square)
    }

    /// (from, to) of the move that produced the current state
    pub fn last_move(&self) -> Option<(usize, usize)> {
        self.current.from_square().zip(self.current.to_square())
    }

    /// States retained, current one included
    pub fn history_len(&self) -> usize {
        self.past.len() + 1
    }

    /// Statistics of the engine's last search
    pub fn last_search_stats(&self) -> &SearchStats {
        self.engine.stats()
    }

    pub fn is_game_over(&self) -> bool {
        self.current.is_game_over()
    }

    pub fn winner(&self) -> Option<Side> {
        self.current.winner()
    }

    pub fn game_over_message(&self) -> Option<&'static str> {
        match self.winner() {
            Some(side) if side == self.human() => Some("Game Over. YOU WON!"),
            Some(_) => Some("Game Over. YOU LOST!"),
            None => None,
        }
    }

    /// Human move of the piece on `from` by `dx` columns and `dy` rows
    pub fn attempt_move(&mut self, from: usize, dx: i32, dy: i32) -> MoveOutcome {
        let human = self.human();
        if self.is_game_over() || self.turn() != human {
            return MoveOutcome::UnknownInvalid;
        }
        let Some(to) = offset(from, dy, dx) else {
            return MoveOutcome::NotOnBoard;
        };
        let Some(piece) = self.current.piece_at(from).filter(|p| p.owner == human) else {
            return MoveOutcome::UnknownInvalid;
        };

        let captures = self.current.successors_by(human, true);
        let capture_required = self.current.continuation().is_some()
            || (self.current.rules().forced_captures && !captures.is_empty());
        if let Some(next) = captures
            .into_iter()
            .find(|s| s.from_square() == Some(from) && s.to_square() == Some(to))
        {
            self.commit(next);
            return MoveOutcome::Success;
        }
        if capture_required {
            return MoveOutcome::ForcedJump;
        }

        if dx.abs() != dy.abs() {
            return MoveOutcome::NotDiagonal;
        }
        if self.current.piece_at(to).is_some() {
            return MoveOutcome::NoFreeSpace;
        }

        let step = self
            .current
            .square_successors_by(human, from, false)
            .ok()
            .and_then(|steps| steps.into_iter().find(|s| s.to_square() == Some(to)));
        if let Some(next) = step {
            self.commit(next);
            return MoveOutcome::Success;
        }

        if !piece.is_king() && dy.signum() == -human.forward() {
            MoveOutcome::NoBackwardMovesForSingles
        } else if dx.abs() >= 2 {
            MoveOutcome::OnlySingleDiagonals
        } else {
            MoveOutcome::UnknownInvalid
        }
    }

    /// Commit a successor previously obtained from [`Game::valid_moves`]
    pub fn attempt_successor(&mut self, chosen: &BoardState) -> MoveOutcome {
        let human = self.human();
        if self.is_game_over() || self.turn() != human {
            return MoveOutcome::UnknownInvalid;
        }
        if !self.current.successors(human).contains(chosen) {
            return MoveOutcome::UnknownInvalid;
        }
        self.commit(chosen.clone());
        MoveOutcome::Success
    }

    /// Legal successors for the piece on `square`, for the side to move
    pub fn valid_moves(&self, square: usize) -> GameResult<Vec<BoardState>> {
        Ok(self.current.square_successors(self.turn(), square)?)
    }

    /// Landing squares of [`Game::valid_moves`]
    pub fn legal_destinations(&self, square: usize) -> GameResult<Vec<usize>> {
        Ok(self
            .valid_moves(square)?
            .iter()
            .filter_map(BoardState::to_square)
            .collect())
    }

    /// Squares of the side to move that have at least one legal move, ascending
    pub fn movable_squares(&self) -> Vec<usize> {
        self.current
            .successors(self.turn())
            .iter()
            .filter_map(BoardState::from_square)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Feedback for a selected piece that has no legal move
    pub fn blocked_feedback(&self) -> MoveOutcome {
        let side = self.turn();
        let capture_required = self.current.continuation().is_some()
            || (self.current.rules().forced_captures && self.current.has_capture(side));
        if capture_required {
            MoveOutcome::ForcedJump
        } else {
            MoveOutcome::PieceBlocked
        }
    }

    /// Let the engine play one ply. Returns `Ok(false)` when it is not the
    /// engine's turn or the game is over.
    pub fn request_ai_move(&mut self) -> GameResult<bool> {
        let computer = self.computer();
        if self.is_game_over() || self.turn() != computer {
            return Ok(false);
        }
        let next = self.engine.make_move(&self.current, computer)?;
        self.commit(next);
        Ok(true)
    }

    /// Best move for the human according to a search at the hint depth.
    /// Nothing is committed.
    pub fn hint(&self) -> GameResult<Option<BoardState>> {
        let human = self.human();
        if self.is_game_over() || self.turn() != human {
            return Ok(None);
        }
        let mut adviser = Search::new(self.config.hint_params());
        Ok(Some(adviser.make_move(&self.current, human)?))
    }

    /// Take back the last human decision together with the engine reply and
    /// any capture chain around it. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        self.current = previous;
        while self.current.turn() == self.computer() || self.current.continuation().is_some() {
            match self.past.pop_back() {
                Some(previous) => self.current = previous,
                None => break,
            }
        }
        debug!(retained = self.history_len(), "undo");
        true
    }

    fn commit(&mut self, next: BoardState) {
        debug!(side = %self.current.turn(), from = ?next.from_square(), to = ?next.to_square(), "move committed");
        self.past.push_back(mem::replace(&mut self.current, next));
        while self.history_len() > self.config.undo_capacity.max(2) {
            self.past.pop_front();
        }
        if let Some(winner) = self.winner() {
            info!("game over, {} wins", winner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_identifiers() {
        let names: Vec<&str> = MoveOutcome::ALL.iter().map(|o| o.as_str()).collect();
        assert_eq!(
            names,
            [
                "SUCCESS",
                "NOT_ON_BOARD",
                "FORCED_JUMP",
                "NOT_DIAGONAL",
                "NO_FREE_SPACE",
                "NO_BACKWARD_MOVES_FOR_SINGLES",
                "ONLY_SINGLE_DIAGONALS",
                "UNKNOWN_INVALID",
                "PIECE_BLOCKED",
            ]
        );
        assert_eq!(MoveOutcome::ForcedJump.to_string(), "FORCED_JUMP");
    }

    #[test]
    fn test_history_is_bounded() {
        let config = GameConfig::new().undo_capacity(3).search_depth(1).seed(Some(3));
        let mut game = Game::new(config);
        for _ in 0..4 {
            if game.turn() == game.human() {
                let square = game.movable_squares()[0];
                let next = game.valid_moves(square).unwrap().remove(0);
                assert_eq!(game.attempt_successor(&next), MoveOutcome::Success);
            } else {
                assert!(game.request_ai_move().unwrap());
            }
            assert!(game.history_len() <= 3);
        }
        assert_eq!(game.history_len(), 3);
    }
}
