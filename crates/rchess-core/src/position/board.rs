//! 盤面（Board）
//!
//! 駒別Bitboard、色別占有、全体占有、mailboxの4表現を常に同期して保持する。
//! 盤面の変更は `put_piece` / `remove_piece` / `move_piece` の3操作のみ。

use crate::bitboard::Bitboard;
use crate::types::{Color, Piece, PieceType, Square};

/// 駒別Bitboard配列のサイズ（Piece符号で添字、6と7は予約で常に空）
const PIECE_BB_NUM: usize = 14;

/// 盤面
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    /// 駒別Bitboard [Piece.index()]
    piece_bb: [Bitboard; PIECE_BB_NUM],
    /// 色別占有Bitboard [Color]
    color_bb: [Bitboard; Color::NUM],
    /// 全体占有Bitboard
    occupied: Bitboard,
    /// 各マスの駒 [Square]
    mailbox: [Piece; Square::NUM],
}

impl Board {
    /// 空の盤面を生成
    pub const fn new() -> Self {
        Board {
            piece_bb: [Bitboard::EMPTY; PIECE_BB_NUM],
            color_bb: [Bitboard::EMPTY; Color::NUM],
            occupied: Bitboard::EMPTY,
            mailbox: [Piece::NONE; Square::NUM],
        }
    }

    // ========== 盤面アクセス ==========

    /// 指定マスの駒を取得
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Piece {
        self.mailbox[sq.index()]
    }

    /// 指定駒のBitboard
    #[inline]
    pub fn piece_bb(&self, pc: Piece) -> Bitboard {
        debug_assert!(pc.is_some());
        self.piece_bb[pc.index()]
    }

    /// 指定色・駒種のBitboard
    #[inline]
    pub fn pieces(&self, c: Color, pt: PieceType) -> Bitboard {
        self.piece_bb[Piece::new(c, pt).index()]
    }

    /// 指定色の占有Bitboard
    #[inline]
    pub fn occupancy(&self, c: Color) -> Bitboard {
        self.color_bb[c.index()]
    }

    /// 全駒の占有Bitboard
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    /// 指定色のキングの位置を取得
    ///
    /// キングは常にちょうど1枚存在する
    #[inline]
    pub fn king_square(&self, c: Color) -> Square {
        let kings = self.pieces(c, PieceType::King);
        debug_assert!(kings.count() == 1);
        kings.lsb()
    }

    // ========== 盤面変更 ==========

    /// 駒を置く
    ///
    /// 対象マスは空でなければならない
    #[inline]
    pub fn put_piece(&mut self, pc: Piece, sq: Square) {
        debug_assert!(pc.is_some());
        debug_assert!(self.mailbox[sq.index()].is_none());

        let mask = Bitboard::from_square(sq);
        self.piece_bb[pc.index()] |= mask;
        self.color_bb[pc.color().index()] |= mask;
        self.occupied |= mask;
        self.mailbox[sq.index()] = pc;
    }

    /// 駒を取り除く
    ///
    /// 対象マスには駒がなければならない
    #[inline]
    pub fn remove_piece(&mut self, sq: Square) {
        let pc = self.mailbox[sq.index()];
        debug_assert!(pc.is_some());

        let mask = Bitboard::from_square(sq);
        self.piece_bb[pc.index()] ^= mask;
        self.color_bb[pc.color().index()] ^= mask;
        self.occupied ^= mask;
        self.mailbox[sq.index()] = Piece::NONE;
    }

    /// 駒を動かす
    ///
    /// 移動元には駒があり、移動先は空でなければならない。
    /// 2bitのXORマスクで3つの集約表現を一括更新する。
    #[inline]
    pub fn move_piece(&mut self, from: Square, to: Square) {
        let pc = self.mailbox[from.index()];
        debug_assert!(pc.is_some());
        debug_assert!(self.mailbox[to.index()].is_none());

        let mask = Bitboard::from_square(from) | Bitboard::from_square(to);
        self.piece_bb[pc.index()] ^= mask;
        self.color_bb[pc.color().index()] ^= mask;
        self.occupied ^= mask;
        self.mailbox[to.index()] = pc;
        self.mailbox[from.index()] = Piece::NONE;
    }

    // ========== 検証 ==========

    /// 集約表現（mailbox、色別占有、全体占有）が駒別Bitboardの合併と
    /// 一致しているかを検証する
    pub fn is_consistent(&self) -> bool {
        let mut white = Bitboard::EMPTY;
        let mut black = Bitboard::EMPTY;
        for i in 0..PIECE_BB_NUM {
            if i & 7 > 5 {
                // 予約インデックスは常に空
                if self.piece_bb[i].is_not_empty() {
                    return false;
                }
                continue;
            }
            if i < 8 {
                white |= self.piece_bb[i];
            } else {
                black |= self.piece_bb[i];
            }
        }

        if white != self.color_bb[Color::White.index()]
            || black != self.color_bb[Color::Black.index()]
            || (white | black) != self.occupied
            || (white & black).is_not_empty()
        {
            return false;
        }

        for sq in Square::all() {
            let pc = self.mailbox[sq.index()];
            if pc.is_none() {
                if self.occupied.contains(sq) {
                    return false;
                }
            } else if !self.piece_bb[pc.index()].contains(sq) {
                return false;
            }
        }

        true
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            writeln!(f, "  +---+---+---+---+---+---+---+---+")?;
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let pc = self.piece_on(Square::new(file, rank));
                write!(f, "| {} ", if pc.is_some() { pc.to_fen_char() } else { ' ' })?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "  +---+---+---+---+---+---+---+---+")?;
        writeln!(f, "    a   b   c   d   e   f   g   h  ")
    }
}
