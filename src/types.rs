use serde::Serialize;

use crate::board::{BOARD_SIZE, Side};
use crate::error::{EngineError, EngineResult};

/// A board coordinate. Always on the board once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Validates caller-supplied coordinates.
    pub fn new(row: i32, col: i32) -> EngineResult<Self> {
        let size = BOARD_SIZE as i32;
        if !(0..size).contains(&row) || !(0..size).contains(&col) {
            return Err(EngineError::InvalidCoordinate { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    pub(crate) fn from_index(idx: usize) -> Self {
        debug_assert!(idx < BOARD_SIZE * BOARD_SIZE);
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// Steps `(dr, dc)` diagonally, `None` when that leaves the board.
    pub fn offset(self, dr: i32, dc: i32) -> Option<Self> {
        Self::new(self.row as i32 + dr, self.col as i32 + dc).ok()
    }

    pub fn is_playable(self) -> bool {
        (self.row + self.col) % 2 == 1
    }
}

/// A single slide or a single jump. Chains are made of consecutive jumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    /// Square of the jumped piece, `None` for a slide.
    pub capture: Option<Position>,
}

impl Move {
    pub fn slide(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            capture: None,
        }
    }

    pub fn jump(from: Position, to: Position, over: Position) -> Self {
        Self {
            from,
            to,
            capture: Some(over),
        }
    }

    pub fn is_jump(&self) -> bool {
        self.capture.is_some()
    }
}

/// Where the turn/selection state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    AwaitingSelection,
    PieceSelected,
    MustContinueJump,
    GameOver,
}

/// What a single `select_cell` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectOutcome {
    /// A piece is (now) selected, or a jump landed and the chain goes on.
    Continued,
    /// A move completed the turn; the other side is to move (or the game ended).
    TurnEnded,
    /// The selection was dropped.
    Deselected,
    /// Rejected input. Nothing changed.
    Invalid,
}

/// Transient per-turn selection, rebuilt across clicks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub selected: Option<Position>,
    pub legal_moves: Vec<Move>,
    /// Set while a jump chain is in flight; the selected piece is locked.
    pub forced_continuation: bool,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }

    pub(crate) fn find_move(&self, to: Position) -> Option<Move> {
        self.legal_moves.iter().copied().find(|mv| mv.to == to)
    }

    pub(crate) fn clear(&mut self) {
        self.selected = None;
        self.legal_moves.clear();
        self.forced_continuation = false;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionResult {
    pub outcome: SelectOutcome,
    pub phase: Phase,
    pub selection: Selection,
}

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major square codes: 0=empty, 1=red man, 2=red king, 3=black man, 4=black king.
    pub board: Vec<u8>,
    pub side_to_move: Side,
    pub red_count: u8,
    pub black_count: u8,
    pub winner: Option<Side>,
    pub phase: Phase,
    pub selected: Option<Position>,
    /// Destinations to highlight.
    pub legal_moves: Vec<Move>,
    pub must_continue_jump: bool,
    pub turns_played: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_rejects_out_of_range_coordinates() {
        assert_eq!(
            Position::new(8, 0),
            Err(EngineError::InvalidCoordinate { row: 8, col: 0 })
        );
        assert!(Position::new(-1, 3).is_err());
        assert!(Position::new(3, -1).is_err());
        assert!(Position::new(0, 8).is_err());
        assert_eq!(Position::new(7, 7), Ok(Position { row: 7, col: 7 }));
    }

    #[test]
    fn offset_stops_at_edges() {
        let corner = Position::new(0, 0).unwrap();
        assert_eq!(corner.offset(-1, 1), None);
        assert_eq!(corner.offset(1, 1), Some(Position { row: 1, col: 1 }));
        assert_eq!(Position::from_index(corner.offset(2, 2).unwrap().index()).row, 2);
    }

    #[test]
    fn selection_finds_move_by_destination() {
        let from = Position::new(5, 0).unwrap();
        let to = Position::new(4, 1).unwrap();
        let selection = Selection {
            selected: Some(from),
            legal_moves: vec![Move::slide(from, to)],
            forced_continuation: false,
        };

        assert_eq!(selection.find_move(to), Some(Move::slide(from, to)));
        assert_eq!(selection.find_move(from), None);
    }
}
