use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod board;
pub mod error;
pub mod game;
pub mod types;

pub use board::{Board, Side, Square};
pub use error::{EngineError, EngineResult};
pub use game::GameInstance;
pub use types::{GameState, Move, Phase, Position, SelectOutcome, Selection, SelectionResult};

pub const PLAYER_RED: u8 = 1;
pub const PLAYER_BLACK: u8 = 2;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Routes `log` output to the browser console. Unknown level names mean `info`.
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    let level = level.parse::<log::Level>().unwrap_or(log::Level::Info);
    #[cfg(target_arch = "wasm32")]
    {
        // Only the first call installs a logger.
        let _ = console_log::init_with_level(level);
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        log::set_max_level(level.to_level_filter());
    }
}

/// Engine handle exported to JavaScript. The page owns one per board.
#[wasm_bindgen]
pub struct CheckersGame {
    inner: GameInstance,
}

#[wasm_bindgen]
impl CheckersGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: GameInstance::new(),
        }
    }

    /// Resets the board and returns the fresh `GameState`.
    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) -> Result<JsValue, JsValue> {
        self.inner.new_game();
        self.state()
    }

    /// Returns a `SelectionResult`.
    #[wasm_bindgen(js_name = selectCell)]
    pub fn select_cell(&mut self, row: i32, col: i32) -> Result<JsValue, JsValue> {
        to_js(&self.inner.select_cell(row, col))
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.to_game_state())
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.legal_moves_for_side())
    }

    /// `PLAYER_RED` or `PLAYER_BLACK`, `undefined` while the game is running.
    pub fn winner(&self) -> Option<u8> {
        self.inner.is_game_over().map(side_code)
    }

    #[wasm_bindgen(js_name = sideToMove)]
    pub fn side_to_move(&self) -> u8 {
        side_code(self.inner.current_side())
    }
}

impl Default for CheckersGame {
    fn default() -> Self {
        Self::new()
    }
}

fn side_code(side: Side) -> u8 {
    match side {
        Side::Red => PLAYER_RED,
        Side::Black => PLAYER_BLACK,
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exported_handle_tracks_turns_and_winner() {
        let mut game = CheckersGame::new();

        assert!(wasm_ready());
        assert_eq!(game.side_to_move(), PLAYER_RED);
        assert_eq!(game.winner(), None);

        game.inner.select_cell(5, 0);
        game.inner.select_cell(4, 1);
        assert_eq!(game.side_to_move(), PLAYER_BLACK);
    }
}
