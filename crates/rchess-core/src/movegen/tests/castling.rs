//! キャスリング生成のテスト

use super::moves_uci;

#[test]
fn test_black_kingside_castle_only() {
    // 黒はキングサイドの権利だけを持つ
    let moves = moves_uci("4k2r/8/8/8/8/8/8/4K3 b k - 0 1");
    assert!(moves.contains(&"e8g8".to_string()));
    assert!(!moves.contains(&"e8c8".to_string()));
}

#[test]
fn test_both_sides_castle_available() {
    let moves = moves_uci("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    assert!(moves.contains(&"e1g1".to_string()));
    assert!(moves.contains(&"e1c1".to_string()));

    let moves = moves_uci("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
    assert!(moves.contains(&"e8g8".to_string()));
    assert!(moves.contains(&"e8c8".to_string()));
}

#[test]
fn test_castle_requires_right() {
    // 権利がなければ経路が空いていてもキャスリングできない
    let moves = moves_uci("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1");
    assert!(!moves.contains(&"e1g1".to_string()));
    assert!(!moves.contains(&"e1c1".to_string()));
}

#[test]
fn test_castle_blocked_by_piece() {
    // g8のナイトがキングサイドを塞ぐ
    let moves = moves_uci("4k1nr/8/8/8/8/8/8/4K3 b k - 0 1");
    assert!(!moves.contains(&"e8g8".to_string()));

    // クイーンサイドはb1の駒でも塞がる（キングの経路外でも間は空が必要）
    let moves = moves_uci("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1");
    assert!(!moves.contains(&"e1c1".to_string()));
    assert!(moves.contains(&"e1g1".to_string()));
}

#[test]
fn test_castle_through_attacked_square_denied() {
    // 白ルークf2がf8を攻撃しているのでキングはf8を通れない
    let moves = moves_uci("4k2r/8/8/8/8/8/5R2/4K3 b k - 0 1");
    assert!(!moves.contains(&"e8g8".to_string()));

    // g8だけが攻撃されていてもキャスリング先なので不可
    let moves = moves_uci("4k2r/8/8/8/8/8/6R1/4K3 b k - 0 1");
    assert!(!moves.contains(&"e8g8".to_string()));
}

#[test]
fn test_castle_out_of_check_denied() {
    // チェック中はキャスリングできない
    let moves = moves_uci("4k2r/8/8/8/8/8/4R3/4K3 b k - 0 1");
    assert!(!moves.contains(&"e8g8".to_string()));
}

#[test]
fn test_queenside_castle_b_file_attack_is_allowed() {
    // b8が攻撃されていてもクイーンサイドキャスリングはできる
    // （キングの通り道はe8、d8、c8だけ）
    let moves = moves_uci("r3k3/8/8/8/8/8/1R6/4K3 b q - 0 1");
    assert!(moves.contains(&"e8c8".to_string()));
}

#[test]
fn test_castle_rook_moves_with_king() {
    use crate::movegen::{legal_moves, MoveList};
    use crate::position::Position;
    use crate::types::{MoveFlags, Piece, Square};

    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let mut list = MoveList::new();
    legal_moves(&pos, &mut list);

    let castle = *list
        .iter()
        .find(|m| m.flags() == MoveFlags::KingCastle)
        .expect("castle move generated");
    let undo = pos.do_move(castle);
    assert_eq!(pos.board().piece_on(Square::G1), Piece::W_KING);
    assert_eq!(pos.board().piece_on(Square::F1), Piece::W_ROOK);
    pos.undo_move(castle, undo);
    assert_eq!(pos.board().piece_on(Square::E1), Piece::W_KING);
}
