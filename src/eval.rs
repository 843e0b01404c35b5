//! Leaf evaluation for the search.
//!
//! Both heuristics count material as men plus kings, so a king weighs twice a
//! man. A side with no pieces left scores `i32::MIN`, and its opponent
//! `i32::MAX`.

use crate::board::{BoardState, Side};

/// Score for a position where the opponent has been wiped out
pub const WIN_SCORE: i32 = i32::MAX;
/// Score for a position where the evaluated side has been wiped out
pub const LOSS_SCORE: i32 = i32::MIN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Heuristic {
    /// Own material minus opponent material (mode 1)
    #[default]
    Difference,
    /// Own material divided by opponent material, truncated (mode 2)
    Ratio,
}

impl Heuristic {
    /// Map the numeric evaluation mode (1 or 2)
    pub fn from_mode(mode: u8) -> Option<Self> {
        match mode {
            1 => Some(Heuristic::Difference),
            2 => Some(Heuristic::Ratio),
            _ => None,
        }
    }

    pub fn mode(self) -> u8 {
        match self {
            Heuristic::Difference => 1,
            Heuristic::Ratio => 2,
        }
    }
}

/// How desirable `state` is for `side`
pub fn evaluate(state: &BoardState, side: Side, heuristic: Heuristic) -> i32 {
    let opponent = side.opposite();
    if state.piece_count(opponent) == 0 {
        return WIN_SCORE;
    }
    if state.piece_count(side) == 0 {
        return LOSS_SCORE;
    }
    let own = material(state, side);
    let theirs = material(state, opponent);
    match heuristic {
        Heuristic::Difference => own - theirs,
        // theirs >= 1 here: the opponent still has a piece
        Heuristic::Ratio => own / theirs,
    }
}

fn material(state: &BoardState, side: Side) -> i32 {
    (state.piece_count(side) + state.king_count(side)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Rules;

    #[test]
    fn test_mode_mapping() {
        assert_eq!(Heuristic::from_mode(1), Some(Heuristic::Difference));
        assert_eq!(Heuristic::from_mode(2), Some(Heuristic::Ratio));
        assert_eq!(Heuristic::from_mode(3), None);
        assert_eq!(Heuristic::Ratio.mode(), 2);
    }

    #[test]
    fn test_start_position_is_level() {
        let state = BoardState::initial_layout(Side::Dark, Rules::default());
        assert_eq!(evaluate(&state, Side::Dark, Heuristic::Difference), 0);
        assert_eq!(evaluate(&state, Side::Light, Heuristic::Ratio), 1);
    }
}
