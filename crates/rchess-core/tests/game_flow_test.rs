//! End-to-end flow over the public API: decode UCI strings, play them,
//! poll the game-end queries.

use rchess_core::movegen::{is_check, is_checkmate, is_draw, is_stalemate, legal_move_count};
use rchess_core::position::Position;
use rchess_core::uci::decode_move;
use rchess_core::Color;

fn play(pos: &mut Position, moves: &[&str]) {
    for s in moves {
        let mv = decode_move(pos, s);
        assert!(mv.is_some(), "failed to decode {s} at {}", pos.to_fen());
        pos.do_move(mv);
    }
}

#[test]
fn test_scholars_mate() {
    let mut pos = Position::startpos();
    play(
        &mut pos,
        &["e2e4", "e7e5", "d1h5", "b8c6", "f1c4", "g8f6", "h5f7"],
    );

    assert!(is_check(&pos, Color::Black));
    assert!(is_checkmate(&pos));
    assert_eq!(legal_move_count(&pos), 0);
    assert!(!is_stalemate(&pos));
}

#[test]
fn test_repetition_draw_via_api() {
    let mut pos = Position::startpos();
    play(
        &mut pos,
        &[
            "g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8",
        ],
    );

    assert!(pos.is_repetition());
    assert!(is_draw(&pos));
    assert!(!is_checkmate(&pos));
}

#[test]
fn test_with_move_probe() {
    let mut pos = Position::startpos();
    let mv = decode_move(&pos, "e2e4");

    let reply_count = pos.with_move(mv, |p| legal_move_count(p));
    assert_eq!(reply_count, 20);
    assert_eq!(pos.to_fen(), Position::startpos().to_fen());
}

#[test]
fn test_full_game_stays_consistent() {
    // イタリアンゲームの序盤をなぞる
    let mut pos = Position::startpos();
    play(
        &mut pos,
        &[
            "e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5", "c2c3", "g8f6", "d2d3", "d7d6",
            "e1g1", "e8g8",
        ],
    );

    assert!(pos.board().is_consistent());
    assert!(!is_check(&pos, Color::White));
    assert!(!is_check(&pos, Color::Black));
    // 双方キャスリング済みなので権利は残っていない
    assert!(pos.castling_rights().is_empty());
    assert!(legal_move_count(&pos) > 20);
}
