//! Board representation and successor generation for 10x10 draughts.
//!
//! Squares are indexed row-major: square `row * 10 + col`, row 0 at the top.
//! Only dark squares ((row + col) odd) ever hold a piece. Dark starts on
//! rows 0-2 and moves down the board, Light starts on rows 7-9 and moves up.
//!
//! A [`BoardState`] is never edited after it has been built: every move
//! produces a fresh copy with the piece relocated, the captured piece removed
//! and the counters adjusted.

use std::fmt;

use crate::error::BoardError;

pub const BOARD_SIZE: usize = 10;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Rows filled with men at the start, per side
const HOME_ROWS: usize = 3;

const COL_STEPS: [i32; 2] = [-1, 1];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Dark = 0,
    Light = 1,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Dark, Side::Light];

    pub const fn opposite(self) -> Side {
        match self {
            Side::Dark => Side::Light,
            Side::Light => Side::Dark,
        }
    }

    /// Row delta of a man's step toward the opponent
    pub const fn forward(self) -> i32 {
        match self {
            Side::Dark => 1,
            Side::Light => -1,
        }
    }

    /// Row on which a man of this side is crowned
    pub const fn promotion_row(self) -> usize {
        match self {
            Side::Dark => BOARD_SIZE - 1,
            Side::Light => 0,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Dark => "dark",
            Side::Light => "light",
        }
    }

    /// Parse "dark"/"light" (case-insensitive)
    pub fn from_name(name: &str) -> Option<Side> {
        match name.to_ascii_lowercase().as_str() {
            "dark" => Some(Side::Dark),
            "light" => Some(Side::Light),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    Man,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub owner: Side,
    pub rank: Rank,
}

impl Piece {
    pub const fn man(owner: Side) -> Self {
        Self {
            owner,
            rank: Rank::Man,
        }
    }

    pub const fn king(owner: Side) -> Self {
        Self {
            owner,
            rank: Rank::King,
        }
    }

    pub fn is_king(self) -> bool {
        self.rank == Rank::King
    }

    /// Row deltas this piece may step or jump along.
    /// Men only go forward, kings go both ways.
    pub fn row_steps(self) -> &'static [i32] {
        match (self.rank, self.owner) {
            (Rank::King, _) => &[-1, 1],
            (Rank::Man, Side::Dark) => &[1],
            (Rank::Man, Side::Light) => &[-1],
        }
    }

    fn crowned(self) -> Self {
        Self::king(self.owner)
    }

    pub fn symbol(self) -> char {
        match (self.owner, self.rank) {
            (Side::Dark, Rank::Man) => 'x',
            (Side::Dark, Rank::King) => 'X',
            (Side::Light, Rank::Man) => 'o',
            (Side::Light, Rank::King) => 'O',
        }
    }
}

/// Capture rules carried by every state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rules {
    /// When a capture exists, quiet moves are illegal
    pub forced_captures: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            forced_captures: true,
        }
    }
}

#[inline]
pub fn square_of(row: usize, col: usize) -> usize {
    row * BOARD_SIZE + col
}

#[inline]
pub fn row_col(square: usize) -> (usize, usize) {
    (square / BOARD_SIZE, square % BOARD_SIZE)
}

#[inline]
pub fn is_playable(square: usize) -> bool {
    let (row, col) = row_col(square);
    square < NUM_SQUARES && (row + col) % 2 == 1
}

/// Square reached from `square` after `dy` rows and `dx` columns, if still on the board
pub fn offset(square: usize, dy: i32, dx: i32) -> Option<usize> {
    if square >= NUM_SQUARES {
        return None;
    }
    let (row, col) = row_col(square);
    let new_row = (row as i32).checked_add(dy)?;
    let new_col = (col as i32).checked_add(dx)?;
    let size = BOARD_SIZE as i32;
    if (0..size).contains(&new_row) && (0..size).contains(&new_col) {
        Some(square_of(new_row as usize, new_col as usize))
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardState {
    squares: [Option<Piece>; NUM_SQUARES],
    turn: Side,
    from_square: Option<usize>,
    to_square: Option<usize>,
    // set while a capture chain keeps the turn with the same piece
    continuation: Option<usize>,
    piece_count: [u32; 2],
    king_count: [u32; 2],
    rules: Rules,
}

impl BoardState {
    /// Starting position: men on the dark squares of each side's three home rows
    pub fn initial_layout(first_mover: Side, rules: Rules) -> Self {
        let mut squares = [None; NUM_SQUARES];
        for (sq, slot) in squares.iter_mut().enumerate() {
            if !is_playable(sq) {
                continue;
            }
            let (row, _) = row_col(sq);
            if row < HOME_ROWS {
                *slot = Some(Piece::man(Side::Dark));
            } else if row >= BOARD_SIZE - HOME_ROWS {
                *slot = Some(Piece::man(Side::Light));
            }
        }
        Self::from_parts(squares, first_mover, rules)
    }

    /// Build an arbitrary position. `kings` lists the squares (of either side)
    /// whose piece is crowned.
    pub fn from_squares(
        turn: Side,
        dark: &[usize],
        light: &[usize],
        kings: &[usize],
        rules: Rules,
    ) -> Result<Self, BoardError> {
        let mut squares = [None; NUM_SQUARES];
        for (side, list) in [(Side::Dark, dark), (Side::Light, light)] {
            for &sq in list {
                if sq >= NUM_SQUARES {
                    return Err(BoardError::OffBoard { square: sq });
                }
                if !is_playable(sq) {
                    return Err(BoardError::NotPlayable { square: sq });
                }
                if squares[sq].is_some() {
                    return Err(BoardError::DuplicateSquare { square: sq });
                }
                squares[sq] = Some(Piece::man(side));
            }
        }
        for &sq in kings {
            let piece = squares
                .get_mut(sq)
                .and_then(|slot| slot.as_mut())
                .ok_or(BoardError::KingWithoutPiece { square: sq })?;
            *piece = piece.crowned();
        }
        Ok(Self::from_parts(squares, turn, rules))
    }

    fn from_parts(squares: [Option<Piece>; NUM_SQUARES], turn: Side, rules: Rules) -> Self {
        let mut piece_count = [0; 2];
        let mut king_count = [0; 2];
        for piece in squares.iter().flatten() {
            piece_count[piece.owner.index()] += 1;
            if piece.is_king() {
                king_count[piece.owner.index()] += 1;
            }
        }
        Self {
            squares,
            turn,
            from_square: None,
            to_square: None,
            continuation: None,
            piece_count,
            king_count,
            rules,
        }
    }

    pub fn piece_at(&self, square: usize) -> Option<Piece> {
        self.squares.get(square).copied().flatten()
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    /// Origin of the move that produced this state
    pub fn from_square(&self) -> Option<usize> {
        self.from_square
    }

    /// Destination of the move that produced this state
    pub fn to_square(&self) -> Option<usize> {
        self.to_square
    }

    /// Square of the piece that must keep capturing, mid-chain
    pub fn continuation(&self) -> Option<usize> {
        self.continuation
    }

    pub fn piece_count(&self, side: Side) -> u32 {
        self.piece_count[side.index()]
    }

    pub fn king_count(&self, side: Side) -> u32 {
        self.king_count[side.index()]
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn is_game_over(&self) -> bool {
        self.piece_count.contains(&0)
    }

    /// Side that still has pieces once the other has none
    pub fn winner(&self) -> Option<Side> {
        Side::ALL
            .into_iter()
            .find(|&side| self.piece_count(side) > 0 && self.piece_count(side.opposite()) == 0)
    }

    /// Squares holding a piece of `side`, ascending
    pub fn squares_of(&self, side: Side) -> impl Iterator<Item = (usize, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(move |(sq, slot)| slot.filter(|p| p.owner == side).map(|p| (sq, p)))
    }

    /// Whether `side` has at least one capture this ply
    pub fn has_capture(&self, side: Side) -> bool {
        self.squares_of(side)
            .any(|(sq, piece)| self.may_capture_from(sq, piece.owner) && !self.capture_landings(sq, piece).is_empty())
    }

    /// All legal one-ply results for `side`.
    ///
    /// Mid-chain only the continuing piece's captures are legal. Otherwise,
    /// with forced captures on, any available capture excludes every quiet move.
    pub fn successors(&self, side: Side) -> Vec<BoardState> {
        let mut result = self.successors_by(side, true);
        if self.in_chain(side) || (self.rules.forced_captures && !result.is_empty()) {
            return result;
        }
        result.extend(self.successors_by(side, false));
        result
    }

    /// Capturing-only (`jump_only`) or non-capturing-only successors for `side`,
    /// without the forced-capture policy.
    pub fn successors_by(&self, side: Side, jump_only: bool) -> Vec<BoardState> {
        self.squares_of(side)
            .flat_map(|(sq, piece)| self.piece_successors(sq, piece, jump_only))
            .collect()
    }

    /// Legal successors moving the piece on `square`, with forced-capture
    /// precedence resolved over the whole board.
    pub fn square_successors(&self, side: Side, square: usize) -> Result<Vec<BoardState>, BoardError> {
        let mut result = self.square_successors_by(side, square, true)?;
        if self.in_chain(side) || (self.rules.forced_captures && self.has_capture(side)) {
            return Ok(result);
        }
        result.extend(self.square_successors_by(side, square, false)?);
        Ok(result)
    }

    pub fn square_successors_by(
        &self,
        side: Side,
        square: usize,
        jump_only: bool,
    ) -> Result<Vec<BoardState>, BoardError> {
        let piece = self.owned_piece(side, square)?;
        Ok(self.piece_successors(square, piece, jump_only))
    }

    /// Leaf count of the successor tree, moving whoever has the turn at each node
    pub fn perft(&self, depth: u8) -> u64 {
        if depth == 0 {
            return 1;
        }
        let children = self.successors(self.turn);
        if depth == 1 {
            return children.len() as u64;
        }
        children.iter().map(|child| child.perft(depth - 1)).sum()
    }

    fn owned_piece(&self, side: Side, square: usize) -> Result<Piece, BoardError> {
        if square >= NUM_SQUARES {
            return Err(BoardError::OffBoard { square });
        }
        self.piece_at(square)
            .filter(|p| p.owner == side)
            .ok_or(BoardError::NotOwned { square, side })
    }

    fn in_chain(&self, side: Side) -> bool {
        self.continuation.is_some() && self.turn == side
    }

    // the chain restriction only binds the side that owns the turn
    fn may_capture_from(&self, square: usize, owner: Side) -> bool {
        self.turn != owner || self.continuation.map_or(true, |c| c == square)
    }

    fn piece_successors(&self, square: usize, piece: Piece, jump_only: bool) -> Vec<BoardState> {
        if jump_only {
            if !self.may_capture_from(square, piece.owner) {
                return Vec::new();
            }
            self.capture_landings(square, piece)
                .into_iter()
                .map(|(over, land)| self.apply(square, land, piece, Some(over)))
                .collect()
        } else {
            let mut result = Vec::new();
            for &dy in piece.row_steps() {
                for dx in COL_STEPS {
                    if let Some(land) = offset(square, dy, dx) {
                        if self.squares[land].is_none() {
                            result.push(self.apply(square, land, piece, None));
                        }
                    }
                }
            }
            result
        }
    }

    /// (captured square, landing square) for every jump open to `piece` on `square`
    fn capture_landings(&self, square: usize, piece: Piece) -> Vec<(usize, usize)> {
        let mut result = Vec::new();
        let enemy = piece.owner.opposite();
        for &dy in piece.row_steps() {
            for dx in COL_STEPS {
                let Some(over) = offset(square, dy, dx) else {
                    continue;
                };
                if self.squares[over].map(|p| p.owner) != Some(enemy) {
                    continue;
                }
                if let Some(land) = offset(over, dy, dx) {
                    if self.squares[land].is_none() {
                        result.push((over, land));
                    }
                }
            }
        }
        result
    }

    fn apply(&self, from: usize, to: usize, piece: Piece, captured: Option<usize>) -> BoardState {
        let mut next = self.clone();
        let mover = piece.owner;
        let promoted = !piece.is_king() && row_col(to).0 == mover.promotion_row();
        let landed = if promoted {
            next.king_count[mover.index()] += 1;
            piece.crowned()
        } else {
            piece
        };

        next.squares[from] = None;
        next.squares[to] = Some(landed);
        next.from_square = Some(from);
        next.to_square = Some(to);
        next.turn = mover.opposite();
        next.continuation = None;

        if let Some(over) = captured {
            if let Some(victim) = next.squares[over].take() {
                next.piece_count[victim.owner.index()] -= 1;
                if victim.is_king() {
                    next.king_count[victim.owner.index()] -= 1;
                }
            }
            // crowning ends the turn even if another jump is open
            if !promoted && !next.capture_landings(to, landed).is_empty() {
                next.turn = mover;
                next.continuation = Some(to);
            }
        }
        next
    }
}

// Row 0 first; blank for unplayable squares
impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let sq = square_of(row, col);
                let ch = match self.squares[sq] {
                    Some(piece) => piece.symbol(),
                    None if is_playable(sq) => '.',
                    None => ' ',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
