//! Move generator tests

mod castling;
mod en_passant;
mod pins;

use crate::movegen::{legal_move_count, legal_moves, MoveList};
use crate::position::Position;

/// 合法手をUCI表記の一覧にして返す
fn moves_uci(fen: &str) -> Vec<String> {
    let pos = Position::from_fen(fen).unwrap();
    let mut list = MoveList::new();
    legal_moves(&pos, &mut list);
    list.iter().map(|m| m.to_uci()).collect()
}

/// カウントsinkと収集sinkが同じ数を返すことを確認する
fn assert_count_matches_list(fen: &str) {
    let pos = Position::from_fen(fen).unwrap();
    let mut list = MoveList::new();
    legal_moves(&pos, &mut list);
    assert_eq!(
        legal_move_count(&pos),
        list.len() as u64,
        "count/list mismatch for {fen}"
    );
}
