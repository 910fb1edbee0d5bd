//! Perft（移動生成の正当性・速度検証）

use crate::position::Position;
use crate::types::Move;

use super::generator::{legal_move_count, legal_moves};
use super::movelist::MoveList;

/// 指定深さまでの合法手ツリーの末端ノード数を数える
///
/// 深さ1のフロンティアはカウントsinkでまとめて数え、指し手を
/// 実体化しない。これがバルクperftのスループットの源泉になる。
pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    if depth == 1 {
        return legal_move_count(pos);
    }

    let mut list = MoveList::new();
    legal_moves(pos, &mut list);

    let mut nodes = 0;
    for &mv in &list {
        let undo = pos.do_move(mv);
        nodes += perft(pos, depth - 1);
        pos.undo_move(mv, undo);
    }
    nodes
}

/// ルートの各合法手とその部分木のノード数を返す（perftのデバッグ用）
pub fn divide(pos: &mut Position, depth: u32) -> Vec<(Move, u64)> {
    debug_assert!(depth >= 1);

    let mut list = MoveList::new();
    legal_moves(pos, &mut list);

    let mut result = Vec::with_capacity(list.len());
    for &mv in &list {
        let undo = pos.do_move(mv);
        let nodes = perft(pos, depth - 1);
        pos.undo_move(mv, undo);
        result.push((mv, nodes));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perft_depth_zero_and_one() {
        let mut pos = Position::startpos();
        assert_eq!(perft(&mut pos, 0), 1);
        assert_eq!(perft(&mut pos, 1), 20);
    }

    #[test]
    fn test_divide_sums_to_perft() {
        let mut pos = Position::startpos();
        let total = perft(&mut pos, 3);
        let parts = divide(&mut pos, 3);
        assert_eq!(parts.len(), 20);
        assert_eq!(parts.iter().map(|(_, n)| n).sum::<u64>(), total);
    }

    #[test]
    fn test_perft_does_not_mutate_position() {
        let mut pos = Position::startpos();
        let fen_before = pos.to_fen();
        let key_before = pos.key();
        perft(&mut pos, 4);
        assert_eq!(pos.to_fen(), fen_before);
        assert_eq!(pos.key(), key_before);
    }
}
