use std::fmt;

use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::types::{Move, Position};

pub const BOARD_SIZE: usize = 8;
const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
/// Rows of men each side starts with.
pub const SETUP_ROWS: usize = 3;

const RED_MAN_DIRECTIONS: [(i32, i32); 2] = [(-1, -1), (-1, 1)];
const BLACK_MAN_DIRECTIONS: [(i32, i32); 2] = [(1, -1), (1, 1)];
const KING_DIRECTIONS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Red moves first, starts on the bottom rows and moves toward row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    Red,
    Black,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// Row on which this side's men are crowned.
    pub fn promotion_row(self) -> u8 {
        match self {
            Side::Red => 0,
            Side::Black => (BOARD_SIZE - 1) as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Square {
    #[default]
    Empty,
    RedMan,
    RedKing,
    BlackMan,
    BlackKing,
}

impl Square {
    pub fn side(self) -> Option<Side> {
        match self {
            Square::Empty => None,
            Square::RedMan | Square::RedKing => Some(Side::Red),
            Square::BlackMan | Square::BlackKing => Some(Side::Black),
        }
    }

    pub fn is_king(self) -> bool {
        match self {
            Square::RedKing | Square::BlackKing => true,
            Square::Empty | Square::RedMan | Square::BlackMan => false,
        }
    }

    /// Diagonal step vectors this piece may move along. Men only go forward.
    pub fn directions(self) -> &'static [(i32, i32)] {
        match self {
            Square::Empty => &[],
            Square::RedMan => &RED_MAN_DIRECTIONS,
            Square::BlackMan => &BLACK_MAN_DIRECTIONS,
            Square::RedKing | Square::BlackKing => &KING_DIRECTIONS,
        }
    }

    /// Kings stay kings.
    pub fn promoted(self) -> Self {
        match self {
            Square::RedMan => Square::RedKing,
            Square::BlackMan => Square::BlackKing,
            other @ (Square::Empty | Square::RedKing | Square::BlackKing) => other,
        }
    }

    /// Rendering code: 0=empty, 1=red man, 2=red king, 3=black man, 4=black king.
    pub fn code(self) -> u8 {
        match self {
            Square::Empty => 0,
            Square::RedMan => 1,
            Square::RedKing => 2,
            Square::BlackMan => 3,
            Square::BlackKing => 4,
        }
    }

    fn to_char(self) -> char {
        match self {
            Square::Empty => '.',
            Square::RedMan => 'r',
            Square::RedKing => 'R',
            Square::BlackMan => 'b',
            Square::BlackKing => 'B',
        }
    }

    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Square::Empty),
            'r' => Some(Square::RedMan),
            'R' => Some(Square::RedKing),
            'b' => Some(Square::BlackMan),
            'B' => Some(Square::BlackKing),
            _ => None,
        }
    }
}

/// Checkers board state represented by bitboards.
/// `kings` is always a subset of `red | black`, and `red & black == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    red: u64,
    black: u64,
    kings: u64,
}

impl Board {
    /// Creates the standard opening: black men on the first three rows,
    /// red men on the last three, dark squares only.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for idx in 0..NUM_SQUARES {
            let pos = Position::from_index(idx);
            if !pos.is_playable() {
                continue;
            }
            let row = pos.row as usize;
            if row < SETUP_ROWS {
                board.set(pos, Square::BlackMan);
            } else if row >= BOARD_SIZE - SETUP_ROWS {
                board.set(pos, Square::RedMan);
            }
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            red: 0,
            black: 0,
            kings: 0,
        }
    }

    /// Parses 8 lines of 8 cells: `.` empty, `r`/`R` red man/king,
    /// `b`/`B` black man/king. Blank lines and surrounding spaces are ignored.
    /// Square colour is not checked; the rules work on either diagonal set.
    pub fn from_ascii(text: &str) -> EngineResult<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(EngineError::RowCount { rows: rows.len() });
        }

        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|ch| !ch.is_whitespace()).collect();
            if cells.len() != BOARD_SIZE {
                return Err(EngineError::RowWidth {
                    row,
                    cells: cells.len(),
                });
            }
            for (col, &ch) in cells.iter().enumerate() {
                let square =
                    Square::from_char(ch).ok_or(EngineError::UnknownSquare { ch, row, col })?;
                board.set(Position::from_index(row * BOARD_SIZE + col), square);
            }
        }
        Ok(board)
    }

    pub fn get(&self, pos: Position) -> Square {
        let square = bit(pos.index());
        let is_king = (self.kings & square) != 0;
        if (self.red & square) != 0 {
            if is_king { Square::RedKing } else { Square::RedMan }
        } else if (self.black & square) != 0 {
            if is_king { Square::BlackKing } else { Square::BlackMan }
        } else {
            Square::Empty
        }
    }

    pub fn set(&mut self, pos: Position, value: Square) {
        let square = bit(pos.index());
        self.red &= !square;
        self.black &= !square;
        self.kings &= !square;
        match value.side() {
            Some(Side::Red) => self.red |= square,
            Some(Side::Black) => self.black |= square,
            None => {}
        }
        if value.is_king() {
            self.kings |= square;
        }
    }

    /// True iff `pos` holds a man or king belonging to `side`.
    pub fn owns_piece(&self, side: Side, pos: Position) -> bool {
        (self.occupancy(side) & bit(pos.index())) != 0
    }

    /// Squares holding `side`'s pieces, in row-major order.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = Position> {
        let mut bits = self.occupancy(side);
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let idx = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            Some(Position::from_index(idx))
        })
    }

    /// Whether any piece of `side` has a capture available.
    pub fn has_any_jump(&self, side: Side) -> bool {
        self.pieces(side).any(|pos| self.can_jump_from(pos))
    }

    pub fn can_jump_from(&self, pos: Position) -> bool {
        self.jumps(pos).next().is_some()
    }

    /// Single jumps available to the piece at `pos`, ignoring what other pieces can do.
    pub fn jump_moves(&self, pos: Position) -> Vec<Move> {
        self.jumps(pos).collect()
    }

    /// One-step slides onto empty squares for the piece at `pos`.
    pub fn regular_moves(&self, pos: Position) -> Vec<Move> {
        let piece = self.get(pos);
        piece
            .directions()
            .iter()
            .filter_map(|&(dr, dc)| pos.offset(dr, dc))
            .filter(|&to| self.get(to) == Square::Empty)
            .map(|to| Move::slide(pos, to))
            .collect()
    }

    /// Legal moves of the piece at `pos` for `side` to move.
    ///
    /// Captures are mandatory across the whole side: once any piece of `side`
    /// can jump, only jumps are returned, so a piece without a jump gets none.
    pub fn legal_moves_for(&self, side: Side, pos: Position) -> Vec<Move> {
        if !self.owns_piece(side, pos) {
            return Vec::new();
        }
        if self.has_any_jump(side) {
            self.jump_moves(pos)
        } else {
            self.regular_moves(pos)
        }
    }

    /// Union of the legal moves of every piece of `side`.
    pub fn all_legal_moves(&self, side: Side) -> Vec<Move> {
        let must_jump = self.has_any_jump(side);
        self.pieces(side)
            .flat_map(|pos| {
                if must_jump {
                    self.jump_moves(pos)
                } else {
                    self.regular_moves(pos)
                }
            })
            .collect()
    }

    /// Applies one slide or jump and crowns a man landing on its promotion row.
    /// Returns the piece now standing on `mv.to`. The turn is not switched here.
    pub fn apply(&mut self, mv: &Move) -> Square {
        let piece = self.get(mv.from);
        debug_assert!(piece != Square::Empty, "move from empty square {:?}", mv.from);
        debug_assert_eq!(self.get(mv.to), Square::Empty, "move onto occupied square");

        self.set(mv.from, Square::Empty);
        if let Some(captured) = mv.capture {
            self.set(captured, Square::Empty);
        }

        let landed = match piece.side() {
            Some(side) if mv.to.row == side.promotion_row() => piece.promoted(),
            _ => piece,
        };
        self.set(mv.to, landed);
        landed
    }

    /// Returns `(red_count, black_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.red.count_ones() as u8, self.black.count_ones() as u8)
    }

    /// Decides the game after a turn, with `side_to_move` about to play.
    ///
    /// Checked in a fixed order: no red pieces, no black pieces, then the
    /// mover having no legal move anywhere on the board (which loses).
    pub fn winner(&self, side_to_move: Side) -> Option<Side> {
        let (red_count, black_count) = self.count();
        if red_count == 0 {
            Some(Side::Black)
        } else if black_count == 0 {
            Some(Side::Red)
        } else if self.all_legal_moves(side_to_move).is_empty() {
            Some(side_to_move.opponent())
        } else {
            None
        }
    }

    /// Converts board to `[u8; 64]` using `Square::code`.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (idx, cell) in board.iter_mut().enumerate() {
            *cell = self.get(Position::from_index(idx)).code();
        }
        board
    }

    fn occupancy(&self, side: Side) -> u64 {
        match side {
            Side::Red => self.red,
            Side::Black => self.black,
        }
    }

    fn jumps(&self, pos: Position) -> impl Iterator<Item = Move> + '_ {
        let piece = self.get(pos);
        let opponent = piece.side().map(Side::opponent);
        piece.directions().iter().filter_map(move |&(dr, dc)| {
            let over = pos.offset(dr, dc)?;
            let to = pos.offset(dr * 2, dc * 2)?;
            let is_capture = self.get(to) == Square::Empty
                && opponent.is_some()
                && self.get(over).side() == opponent;
            is_capture.then(|| Move::jump(pos, to, over))
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Same format `from_ascii` reads.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let pos = Position::from_index(row * BOARD_SIZE + col);
                write!(f, "{}", self.get(pos).to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}
