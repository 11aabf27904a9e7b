//! Browser tests for the exported `CheckersGame` class.
//!
//! Run with: wasm-pack test --headless --chrome

#![cfg(target_arch = "wasm32")]

use checkers::{CheckersGame, PLAYER_BLACK, PLAYER_RED, init_logging};
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn field(value: &JsValue, name: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(name)).expect("field should exist")
}

#[wasm_bindgen_test]
fn logging_can_be_initialised_twice() {
    init_logging("debug");
    init_logging("not-a-level");
    log::info!("checkers logging works");
}

#[wasm_bindgen_test]
fn state_reports_the_opening_position() {
    let game = CheckersGame::new();
    let state = game.state().expect("state should serialize");

    assert_eq!(field(&state, "side_to_move").as_string().as_deref(), Some("Red"));
    assert_eq!(field(&state, "red_count").as_f64(), Some(12.0));
    assert_eq!(field(&state, "black_count").as_f64(), Some(12.0));
    assert_eq!(js_sys::Array::from(&field(&state, "board")).length(), 64);
    assert_eq!(game.side_to_move(), PLAYER_RED);
}

#[wasm_bindgen_test]
fn select_cell_drives_a_turn() {
    let mut game = CheckersGame::new();

    let selected = game.select_cell(5, 0).expect("result should serialize");
    assert_eq!(field(&selected, "outcome").as_string().as_deref(), Some("Continued"));
    let moves = js_sys::Array::from(&field(&field(&selected, "selection"), "legal_moves"));
    assert_eq!(moves.length(), 1);

    let moved = game.select_cell(4, 1).expect("result should serialize");
    assert_eq!(field(&moved, "outcome").as_string().as_deref(), Some("TurnEnded"));
    assert_eq!(game.side_to_move(), PLAYER_BLACK);
    assert_eq!(game.winner(), None);
}

#[wasm_bindgen_test]
fn out_of_range_click_is_invalid() {
    let mut game = CheckersGame::new();

    let result = game.select_cell(-1, 9).expect("result should serialize");
    assert_eq!(field(&result, "outcome").as_string().as_deref(), Some("Invalid"));
}

#[wasm_bindgen_test]
fn new_game_resets_the_handle() {
    let mut game = CheckersGame::new();
    game.select_cell(5, 0).unwrap();
    game.select_cell(4, 1).unwrap();

    let state = game.new_game().expect("state should serialize");

    assert_eq!(field(&state, "turns_played").as_f64(), Some(0.0));
    assert_eq!(game.side_to_move(), PLAYER_RED);
    assert_eq!(js_sys::Array::from(&game.legal_moves().unwrap()).length(), 7);
}
