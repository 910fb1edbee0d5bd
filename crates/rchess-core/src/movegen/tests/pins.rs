//! ピンされた駒のテスト

use super::moves_uci;

#[test]
fn test_pinned_knight_cannot_move() {
    // e3のナイトはe8のルークにピンされていて一切動けない
    let moves = moves_uci("4r2k/8/8/8/8/4N3/8/4K3 w - - 0 1");
    assert!(!moves.iter().any(|m| m.starts_with("e3")));
}

#[test]
fn test_diagonally_pinned_knight_cannot_move() {
    // d3のナイトはb5のビショップにe2のキングへ向けてピンされている
    // （筋はb5-c4-d3-e2）
    let moves = moves_uci("4k3/8/8/1b6/8/3N4/4K3/8 w - - 0 1");
    assert!(!moves.iter().any(|m| m.starts_with("d3")));
}

#[test]
fn test_hv_pinned_rook_moves_along_ray() {
    // e4のルークはe8のルークにピンされているが、e筋に沿ってなら動ける
    let moves = moves_uci("k3r3/8/8/8/4R3/8/8/4K3 w - - 0 1");
    assert!(moves.contains(&"e4e5".to_string()));
    assert!(moves.contains(&"e4e8".to_string()));
    assert!(moves.contains(&"e4e2".to_string()));
    assert!(!moves.contains(&"e4d4".to_string()));
    assert!(!moves.contains(&"e4a4".to_string()));
}

#[test]
fn test_hv_pinned_bishop_cannot_move() {
    // 縦横にピンされたビショップは完全に動けない
    let moves = moves_uci("k3r3/8/8/8/4B3/8/8/4K3 w - - 0 1");
    assert!(!moves.iter().any(|m| m.starts_with("e4")));
}

#[test]
fn test_diagonally_pinned_bishop_moves_along_ray() {
    // d3のビショップはb5のビショップにピンされているが、筋に沿ってなら
    // 動ける（ピンしている駒を取るのも可）
    let moves = moves_uci("4k3/8/8/1b6/8/3B4/4K3/8 w - - 0 1");
    assert!(moves.contains(&"d3c4".to_string()));
    assert!(moves.contains(&"d3b5".to_string()));
    assert!(!moves.contains(&"d3e4".to_string()));
    assert!(!moves.contains(&"d3c2".to_string()));
}

#[test]
fn test_diagonally_pinned_queen_restricted_to_ray() {
    // c4のクイーンはa6のビショップにピンされている（筋はa6-b5-c4-d3-e2）
    let moves = moves_uci("4k3/8/b7/8/2Q5/8/4K3/8 w - - 0 1");
    assert!(moves.contains(&"c4b5".to_string()));
    assert!(moves.contains(&"c4a6".to_string()));
    assert!(moves.contains(&"c4d3".to_string()));
    assert!(!moves.contains(&"c4c5".to_string()));
    assert!(!moves.contains(&"c4d4".to_string()));
    assert!(!moves.contains(&"c4d5".to_string()));
}

#[test]
fn test_hv_pinned_pawn_can_push_not_capture() {
    // e3のポーンはe8のルークにピンされている。前進は筋上に残るので
    // 可能だが、d4への捕獲は不可
    let moves = moves_uci("k3r3/8/8/8/3p4/4P3/8/4K3 w - - 0 1");
    assert!(moves.contains(&"e3e4".to_string()));
    assert!(!moves.contains(&"e3d4".to_string()));
}

#[test]
fn test_diagonally_pinned_pawn_can_capture_pinner() {
    // c3のポーンはb4のビショップにピンされている（筋はb4-c3-d2-e1）。
    // 前進は不可だが、ピンしている駒自体は取れる
    let moves = moves_uci("4k3/8/8/8/1b6/2P5/8/4K3 w - - 0 1");
    assert!(!moves.contains(&"c3c4".to_string()));
    assert!(moves.contains(&"c3b4".to_string()));
}

#[test]
fn test_hv_pinned_pawn_double_push() {
    // e2のポーンはピンされているが2マス前進も筋上に残る
    let moves = moves_uci("k3r3/8/8/8/8/8/4P3/4K3 w - - 0 1");
    assert!(moves.contains(&"e2e3".to_string()));
    assert!(moves.contains(&"e2e4".to_string()));
}

#[test]
fn test_horizontally_pinned_pawn_cannot_push() {
    // h4のルークがe4のポーン越しにa4のキングを狙う形ではなく、
    // ポーンと同じ段にキングがいる形: 前進すると段から外れるので不可
    let moves = moves_uci("4k3/8/8/8/K3P2r/8/8/8 w - - 0 1");
    assert!(!moves.contains(&"e4e5".to_string()));
}

#[test]
fn test_xray_through_enemy_piece_is_not_a_pin() {
    // 間に相手の駒が挟まっている場合はピンではない
    let moves = moves_uci("k3r3/8/4n3/8/4N3/8/8/4K3 w - - 0 1");
    assert!(moves.iter().any(|m| m.starts_with("e4")));
}

#[test]
fn test_two_friendly_blockers_are_not_pinned() {
    // 味方の駒が2枚挟まっていればどちらもピンされていない
    let moves = moves_uci("k3r3/8/4N3/8/4N3/8/8/4K3 w - - 0 1");
    assert!(moves.iter().any(|m| m.starts_with("e4")));
    assert!(moves.iter().any(|m| m.starts_with("e6")));
}
