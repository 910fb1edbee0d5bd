//! 局面モジュール
//!
//! - `Board`: 盤面（Bitboard + mailbox）
//! - `Position`: 局面全体（盤面、手番、キャスリング権、履歴、Zobristキー）
//! - FEN形式の入出力
//! - Zobristハッシュテーブル

mod board;
mod fen;
mod pos;
mod zobrist;

pub use board::Board;
pub use fen::{FenError, BUGGY_FEN, COMPLEX_FEN, KIWIPETE_FEN, START_FEN, TRICKY_FEN};
pub use pos::{Position, UndoInfo, MAX_PLY};
pub use zobrist::{
    zobrist_castling, zobrist_en_passant, zobrist_psq, zobrist_side, Zobrist, ZOBRIST,
};
