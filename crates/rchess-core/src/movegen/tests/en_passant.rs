//! アンパッサン生成のテスト

use super::moves_uci;
use crate::movegen::{legal_moves, MoveList};
use crate::position::Position;

#[test]
fn test_en_passant_basic() {
    // 黒がe7e5と突いた直後、d5の白ポーンはe6へアンパッサンできる
    let moves =
        moves_uci("rnbqkbnr/pppp1ppp/8/3Pp3/8/8/PPP1PPPP/RNBQKBNR w KQkq e6 0 3");
    assert!(moves.contains(&"d5e6".to_string()));
}

#[test]
fn test_en_passant_both_pawns() {
    // 両側のポーンがアンパッサンできる
    let moves = moves_uci("4k3/8/8/3PpP2/8/8/8/4K3 w - e6 0 1");
    assert!(moves.contains(&"d5e6".to_string()));
    assert!(moves.contains(&"f5e6".to_string()));
}

#[test]
fn test_en_passant_flag() {
    let pos =
        Position::from_fen("rnbqkbnr/pppp1ppp/8/3Pp3/8/8/PPP1PPPP/RNBQKBNR w KQkq e6 0 3")
            .unwrap();
    let mut list = MoveList::new();
    legal_moves(&pos, &mut list);

    let ep = list.iter().find(|m| m.is_en_passant()).expect("en passant generated");
    assert_eq!(ep.to_uci(), "d5e6");
    assert!(ep.is_capture());
}

#[test]
fn test_en_passant_exposing_king_on_fifth_rank_denied() {
    // b5xc6はb5とc5の両方が5段目から消え、a5のキングがh5のルークに
    // 晒されるため不可
    let moves = moves_uci("8/8/8/KPp4r/8/8/8/4k3 w - c6 0 1");
    assert!(!moves.contains(&"b5c6".to_string()));
}

#[test]
fn test_en_passant_allowed_when_rank_stays_guarded() {
    // 5段目にもう1枚駒が挟まっていれば露出しないので取れる
    let moves = moves_uci("8/8/8/KPp2n1r/8/8/8/4k3 w - c6 0 1");
    assert!(moves.contains(&"b5c6".to_string()));
}

#[test]
fn test_en_passant_capturing_checker() {
    // d7d5と突いたポーンがc4のキングをチェックしている。
    // e5xd6のアンパッサンでチェックしている駒そのものを取れる
    let moves = moves_uci("4k3/8/8/3pP3/2K5/8/8/8 w - d6 0 1");
    assert!(moves.contains(&"e5d6".to_string()));
}

#[test]
fn test_en_passant_diagonally_pinned_off_ray_denied() {
    // d5のポーンはa8のビショップにh1のキングへ向けてピンされている
    // （筋はa8-b7-c6-d5-e4-f3-g2-h1）。e6へのアンパッサンは筋から
    // 外れるため不可
    let moves = moves_uci("b3k3/8/8/3Pp3/8/8/8/7K w - e6 0 1");
    assert!(!moves.contains(&"d5e6".to_string()));
}

#[test]
fn test_en_passant_along_pin_ray_allowed() {
    // 同じ形でもピンの筋に沿ったアンパッサン（移動先がピンマスク上）は
    // 許される。b7のビショップの筋はb7-c6-d5-e4-f3-g2-h1で、d5xc6は
    // 筋上に残る
    let moves = moves_uci("4k3/1b6/8/2pP4/8/8/8/7K w - c6 0 1");
    assert!(moves.contains(&"d5c6".to_string()));
}

#[test]
fn test_no_en_passant_without_target() {
    let moves = moves_uci("4k3/8/8/3PpP2/8/8/8/4K3 w - - 0 1");
    assert!(!moves.contains(&"d5e6".to_string()));
    assert!(!moves.contains(&"f5e6".to_string()));
}
