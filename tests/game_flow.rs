//! Session-level behavior: move diagnostics, engine replies, hints and undo

use dama::{BoardState, Game, GameConfig, MoveOutcome, Rules, Side};

fn quiet_config() -> GameConfig {
    GameConfig::new().search_depth(2).hint_depth(2).min_pause_ms(0).seed(Some(17))
}

fn game_at(light: &[usize], dark: &[usize]) -> Game {
    let state = BoardState::from_squares(Side::Light, dark, light, &[], Rules::default()).unwrap();
    Game::with_state(quiet_config(), state)
}

#[test]
fn test_man_diagnostics() {
    let mut game = game_at(&[54], &[1]);
    assert_eq!(game.attempt_move(54, 1, 1), MoveOutcome::NoBackwardMovesForSingles);
    assert_eq!(game.attempt_move(54, 2, -2), MoveOutcome::OnlySingleDiagonals);
    assert_eq!(game.state().turn(), Side::Light, "rejected moves leave the state alone");
    assert_eq!(game.attempt_move(54, 1, -1), MoveOutcome::Success);
    assert_eq!(game.piece_at(45).map(|p| p.owner), Some(Side::Light));
    assert_eq!(game.turn(), Side::Dark);
    assert_eq!(game.last_move(), Some((54, 45)));
}

#[test]
fn test_forced_jump_diagnostics() {
    let mut game = game_at(&[54], &[43, 9]);
    assert_eq!(game.attempt_move(54, 1, -1), MoveOutcome::ForcedJump);
    assert_eq!(game.attempt_move(54, 2, 0), MoveOutcome::ForcedJump);
    assert_eq!(game.attempt_move(54, -2, -2), MoveOutcome::Success);
    assert_eq!(game.piece_at(43), None);
    assert_eq!(game.state().piece_count(Side::Dark), 1);
}

#[test]
fn test_board_geometry_diagnostics() {
    let mut game = Game::new(quiet_config());
    assert_eq!(game.attempt_move(70, -1, -1), MoveOutcome::NotOnBoard);
    assert_eq!(game.attempt_move(70, 2, -1), MoveOutcome::NotDiagonal);
    assert_eq!(game.attempt_move(81, 1, -1), MoveOutcome::NoFreeSpace);
    assert_eq!(game.attempt_move(72, 1, i32::MAX), MoveOutcome::NotOnBoard);
    assert_eq!(game.attempt_move(72, i32::MIN, -1), MoveOutcome::NotOnBoard);
    // piece of the engine's side
    assert_eq!(game.attempt_move(21, 1, 1), MoveOutcome::UnknownInvalid);
    // empty square
    assert_eq!(game.attempt_move(61, 1, -1), MoveOutcome::UnknownInvalid);
    assert_eq!(game.history_len(), 1);
}

#[test]
fn test_moves_rejected_out_of_turn() {
    let state = BoardState::initial_layout(Side::Dark, Rules::default());
    let mut game = Game::with_state(quiet_config(), state);
    assert_eq!(game.attempt_move(72, 1, -1), MoveOutcome::UnknownInvalid);
    assert_eq!(game.hint().unwrap(), None);
}

#[test]
fn test_movable_and_blocked_feedback() {
    let game = Game::new(quiet_config());
    assert_eq!(game.movable_squares(), vec![70, 72, 74, 76, 78]);
    assert_eq!(game.legal_destinations(72).unwrap(), vec![61, 63]);
    assert!(game.legal_destinations(81).unwrap().is_empty());
    assert_eq!(game.blocked_feedback(), MoveOutcome::PieceBlocked);
    assert!(game.legal_destinations(21).is_err());

    let forced = game_at(&[54, 92], &[43, 9]);
    assert!(forced.legal_destinations(92).unwrap().is_empty());
    assert_eq!(forced.blocked_feedback(), MoveOutcome::ForcedJump);
    assert_eq!(forced.movable_squares(), vec![54]);
}

#[test]
fn test_attempt_successor() {
    let mut game = Game::new(quiet_config());
    let stranger = BoardState::initial_layout(Side::Dark, Rules::default());
    assert_eq!(game.attempt_successor(&stranger), MoveOutcome::UnknownInvalid);

    let chosen = game.valid_moves(76).unwrap().remove(0);
    assert_eq!(game.attempt_successor(&chosen), MoveOutcome::Success);
    assert_eq!(game.state(), &chosen);
}

#[test]
fn test_engine_reply_and_undo() {
    let mut game = Game::new(quiet_config());
    let initial = game.state().clone();

    assert!(!game.request_ai_move().unwrap(), "engine waits for the human");
    assert_eq!(game.attempt_move(72, 1, -1), MoveOutcome::Success);
    assert!(game.request_ai_move().unwrap());
    assert_eq!(game.turn(), Side::Light);
    assert_eq!(game.history_len(), 3);
    assert!(game.last_search_stats().root_moves > 0);

    assert!(game.undo());
    assert_eq!(game.state(), &initial);
    assert_eq!(game.history_len(), 1);
    assert!(!game.undo(), "nothing left to take back");
    assert_eq!(game.state(), &initial);
}

#[test]
fn test_undo_reverts_whole_capture_chain() {
    let mut game = game_at(&[76], &[65, 43, 1, 9]);
    let before = game.state().clone();
    let retained = game.history_len();

    assert_eq!(game.attempt_move(76, -2, -2), MoveOutcome::Success);
    assert_eq!(game.state().continuation(), Some(54));
    assert_eq!(game.turn(), Side::Light);
    assert_eq!(game.attempt_move(54, -2, -2), MoveOutcome::Success);
    assert_eq!(game.state().piece_count(Side::Dark), 2);
    assert_eq!(game.turn(), Side::Dark);
    assert!(game.request_ai_move().unwrap());
    assert_eq!(game.history_len(), retained + 3);

    assert!(game.undo());
    assert_eq!(game.state(), &before);
    assert_eq!(game.history_len(), retained);
}

#[test]
fn test_hint_leaves_state_alone() {
    let game = Game::new(quiet_config());
    let before = game.state().clone();
    let hint = game.hint().unwrap().expect("hint on the human's turn");
    assert!(before.successors(Side::Light).contains(&hint));
    assert_eq!(game.state(), &before);
    assert_eq!(game.history_len(), 1);
}

#[test]
fn test_game_over_message() {
    let mut game = game_at(&[54], &[43]);
    assert_eq!(game.game_over_message(), None);
    assert_eq!(game.attempt_move(54, -2, -2), MoveOutcome::Success);
    assert!(game.is_game_over());
    assert_eq!(game.winner(), Some(Side::Light));
    assert_eq!(game.game_over_message(), Some("Game Over. YOU WON!"));
    assert!(!game.request_ai_move().unwrap());
    assert_eq!(game.attempt_move(32, 1, -1), MoveOutcome::UnknownInvalid);

    let lost = BoardState::from_squares(Side::Light, &[5], &[], &[], Rules::default()).unwrap();
    let game = Game::with_state(quiet_config(), lost);
    assert_eq!(game.game_over_message(), Some("Game Over. YOU LOST!"));
}

#[test]
fn test_computer_may_move_first() {
    let config = quiet_config().first_mover(Side::Dark);
    let mut game = Game::new(config);
    assert_eq!(game.turn(), Side::Dark);
    assert!(game.request_ai_move().unwrap());
    assert_eq!(game.turn(), Side::Light);

    // the oldest state is kept, so the engine is back on move
    assert!(game.undo());
    assert_eq!(game.turn(), Side::Dark);
    assert_eq!(game.history_len(), 1);
}

#[test]
fn test_restart_resets_everything() {
    let mut game = Game::new(quiet_config());
    assert_eq!(game.attempt_move(72, 1, -1), MoveOutcome::Success);
    game.restart(quiet_config().computer(Side::Light));
    assert_eq!(game.history_len(), 1);
    assert_eq!(game.human(), Side::Dark);
    assert_eq!(game.state(), &BoardState::initial_layout(Side::Light, Rules::default()));
}
