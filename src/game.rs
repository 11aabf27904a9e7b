use log::{debug, info};

use crate::board::{Board, Side};
use crate::types::{GameState, Move, Phase, Position, SelectOutcome, Selection, SelectionResult};

/// One game of checkers driven by cell clicks.
///
/// Owns the board exclusively; callers only ever see copies.
#[derive(Debug, Clone)]
pub struct GameInstance {
    board: Board,
    side_to_move: Side,
    selection: Selection,
    phase: Phase,
    winner: Option<Side>,
    turns_played: u32,
}

impl GameInstance {
    /// Standard opening with Red to move.
    pub fn new() -> Self {
        Self::with_board(Board::new(), Side::Red)
    }

    /// Starts from an arbitrary position. A position that is already decided
    /// starts in `Phase::GameOver`.
    pub fn with_board(board: Board, side_to_move: Side) -> Self {
        let winner = board.winner(side_to_move);
        Self {
            board,
            side_to_move,
            selection: Selection::default(),
            phase: if winner.is_some() {
                Phase::GameOver
            } else {
                Phase::AwaitingSelection
            },
            winner,
            turns_played: 0,
        }
    }

    /// Resets to the standard opening and returns the new board.
    pub fn new_game(&mut self) -> Board {
        *self = Self::new();
        info!("new game, {:?} to move", self.side_to_move);
        self.board
    }

    /// Feeds one cell click into the turn state machine.
    ///
    /// Never fails: bad coordinates and clicks that mean nothing in the
    /// current phase come back as `SelectOutcome::Invalid` with no change.
    pub fn select_cell(&mut self, row: i32, col: i32) -> SelectionResult {
        let outcome = match Position::new(row, col) {
            Ok(pos) => self.handle_click(pos),
            Err(err) => {
                debug!("rejected click: {err}");
                SelectOutcome::Invalid
            }
        };

        SelectionResult {
            outcome,
            phase: self.phase,
            selection: self.selection.clone(),
        }
    }

    pub fn current_board(&self) -> Board {
        self.board
    }

    pub fn current_side(&self) -> Side {
        self.side_to_move
    }

    /// The winner, once the game is decided.
    pub fn is_game_over(&self) -> Option<Side> {
        self.winner
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Every move the side to move may make right now. During a jump chain
    /// only the chained piece's continuations count.
    pub fn legal_moves_for_side(&self) -> Vec<Move> {
        match self.phase {
            Phase::GameOver => Vec::new(),
            Phase::MustContinueJump => self.selection.legal_moves.clone(),
            Phase::AwaitingSelection | Phase::PieceSelected => {
                self.board.all_legal_moves(self.side_to_move)
            }
        }
    }

    /// Completed turns since the game started.
    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    pub fn to_game_state(&self) -> GameState {
        let (red_count, black_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            side_to_move: self.side_to_move,
            red_count,
            black_count,
            winner: self.winner,
            phase: self.phase,
            selected: self.selection.selected,
            legal_moves: self.selection.legal_moves.clone(),
            must_continue_jump: self.selection.forced_continuation,
            turns_played: self.turns_played,
        }
    }

    fn handle_click(&mut self, pos: Position) -> SelectOutcome {
        match self.phase {
            Phase::GameOver => {
                debug_assert!(self.winner.is_some(), "game over without a winner");
                debug!("click at {pos:?} ignored, game is over");
                SelectOutcome::Invalid
            }
            Phase::AwaitingSelection => self.select_piece(pos),
            Phase::PieceSelected => self.move_or_reselect(pos),
            Phase::MustContinueJump => self.continue_jump(pos),
        }
    }

    fn select_piece(&mut self, pos: Position) -> SelectOutcome {
        if !self.board.owns_piece(self.side_to_move, pos) {
            debug!("{:?} cannot select {pos:?}", self.side_to_move);
            return SelectOutcome::Invalid;
        }

        self.selection = Selection {
            selected: Some(pos),
            legal_moves: self.board.legal_moves_for(self.side_to_move, pos),
            forced_continuation: false,
        };
        self.phase = Phase::PieceSelected;
        debug!(
            "selected {pos:?} with {} legal moves",
            self.selection.legal_moves.len()
        );
        SelectOutcome::Continued
    }

    fn move_or_reselect(&mut self, pos: Position) -> SelectOutcome {
        if self.selection.selected == Some(pos) {
            self.drop_selection();
            return SelectOutcome::Deselected;
        }
        if let Some(mv) = self.selection.find_move(pos) {
            return self.play(mv);
        }

        self.drop_selection();
        if self.board.owns_piece(self.side_to_move, pos) {
            self.select_piece(pos)
        } else {
            SelectOutcome::Deselected
        }
    }

    /// The chained piece is locked; anything but one of its jumps is refused.
    fn continue_jump(&mut self, pos: Position) -> SelectOutcome {
        debug_assert!(self.selection.forced_continuation);
        match self.selection.find_move(pos) {
            Some(mv) => self.play(mv),
            None => {
                debug!("{pos:?} is not a continuation of the jump chain");
                SelectOutcome::Invalid
            }
        }
    }

    fn play(&mut self, mv: Move) -> SelectOutcome {
        let landed = self.board.apply(&mv);
        debug!("{:?} played {mv:?}, landed {landed:?}", self.side_to_move);

        // A man crowned by this jump continues with king directions.
        if mv.is_jump() && self.board.can_jump_from(mv.to) {
            self.selection = Selection {
                selected: Some(mv.to),
                legal_moves: self.board.jump_moves(mv.to),
                forced_continuation: true,
            };
            self.phase = Phase::MustContinueJump;
            return SelectOutcome::Continued;
        }

        self.end_turn();
        SelectOutcome::TurnEnded
    }

    fn end_turn(&mut self) {
        self.selection.clear();
        self.side_to_move = self.side_to_move.opponent();
        self.turns_played += 1;
        self.winner = self.board.winner(self.side_to_move);

        match self.winner {
            Some(winner) => {
                self.phase = Phase::GameOver;
                info!("game over after {} turns, {winner:?} wins", self.turns_played);
            }
            None => self.phase = Phase::AwaitingSelection,
        }
    }

    fn drop_selection(&mut self) {
        self.selection.clear();
        self.phase = Phase::AwaitingSelection;
    }
}

impl Default for GameInstance {
    fn default() -> Self {
        Self::new()
    }
}
