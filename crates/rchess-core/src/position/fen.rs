//! FEN形式の解析・出力

use crate::types::{CastlingFlags, Color, Piece, Square};

use super::pos::{Position, MAX_PLY};

/// 初期局面のFEN
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Kiwipete（perft検証用の著名な局面）
pub const KIWIPETE_FEN: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

/// アンパッサンのピン判定を突く局面
pub const TRICKY_FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

/// プロモーション絡みの局面
pub const COMPLEX_FEN: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";

/// プロモーション経由のダブルチェックを含む局面
pub const BUGGY_FEN: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

/// FENパースエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// 盤面の形式が不正
    Board(String),
    /// 手番の形式が不正
    SideToMove(String),
    /// アンパッサン対象の形式が不正
    EnPassant(String),
    /// 手数の形式が不正
    Ply(String),
}

impl std::fmt::Display for FenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FenError::Board(s) => write!(f, "Invalid board: {s}"),
            FenError::SideToMove(s) => write!(f, "Invalid side to move: {s}"),
            FenError::EnPassant(s) => write!(f, "Invalid en passant square: {s}"),
            FenError::Ply(s) => write!(f, "Invalid move counter: {s}"),
        }
    }
}

impl std::error::Error for FenError {}

impl Position {
    /// 初期局面を生成
    pub fn startpos() -> Position {
        Position::from_fen(START_FEN).unwrap()
    }

    /// FEN文字列から局面を生成
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        let mut pos = Position::new();
        pos.set_fen(fen)?;
        Ok(pos)
    }

    /// FEN文字列から局面を設定
    pub fn set_fen(&mut self, fen: &str) -> Result<(), FenError> {
        // 局面をクリア
        *self = Position::new();

        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::Board("FEN must have at least 4 fields".to_string()));
        }

        // 1. 駒配置
        self.parse_board(parts[0])?;

        // 2. 手番
        match parts[1] {
            "w" => self.side_to_move = Color::White,
            "b" => self.side_to_move = Color::Black,
            _ => {
                return Err(FenError::SideToMove(format!(
                    "Expected 'w' or 'b', got '{}'",
                    parts[1]
                )))
            }
        }

        // 3. キャスリング権（KQkq以外の文字は無視）
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => self.castling |= CastlingFlags::WHITE_KINGSIDE,
                    'Q' => self.castling |= CastlingFlags::WHITE_QUEENSIDE,
                    'k' => self.castling |= CastlingFlags::BLACK_KINGSIDE,
                    'q' => self.castling |= CastlingFlags::BLACK_QUEENSIDE,
                    _ => {}
                }
            }
        }

        // 4. アンパッサン対象マス
        if parts[3] != "-" {
            let sq = Square::from_uci(parts[3])
                .ok_or_else(|| FenError::EnPassant(parts[3].to_string()))?;
            self.en_passant = Some(sq);
        }

        // 5. ハーフムーブクロック（省略可）
        self.halfmove_clock = match parts.get(4) {
            Some(s) => s.parse().map_err(|_| FenError::Ply((*s).to_string()))?,
            None => 0,
        };

        // 6. フルムーブ数（省略可）。plyに変換する
        let fullmove: usize = match parts.get(5) {
            Some(s) => s.parse().map_err(|_| FenError::Ply((*s).to_string()))?,
            None => 1,
        };
        self.ply = fullmove * 2
            + match self.side_to_move {
                Color::White => 0,
                Color::Black => 1,
            };
        if self.ply >= MAX_PLY {
            return Err(FenError::Ply(format!("ply {} exceeds the {MAX_PLY} limit", self.ply)));
        }

        // 増分状態の初期化
        self.setup_incremental_state();

        Ok(())
    }

    /// 現局面のFEN文字列を取得
    pub fn to_fen(&self) -> String {
        let mut result = String::new();

        // 1. 駒配置
        for rank in (0..8).rev() {
            let mut empty_count = 0;
            for file in 0..8 {
                let pc = self.board.piece_on(Square::new(file, rank));
                if pc.is_none() {
                    empty_count += 1;
                } else {
                    if empty_count > 0 {
                        result.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    result.push(pc.to_fen_char());
                }
            }
            if empty_count > 0 {
                result.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                result.push('/');
            }
        }

        // 2. 手番
        result.push(' ');
        result.push(if self.side_to_move == Color::White { 'w' } else { 'b' });

        // 3. キャスリング権
        result.push(' ');
        if self.castling.is_empty() {
            result.push('-');
        } else {
            for (flag, c) in [
                (CastlingFlags::WHITE_KINGSIDE, 'K'),
                (CastlingFlags::WHITE_QUEENSIDE, 'Q'),
                (CastlingFlags::BLACK_KINGSIDE, 'k'),
                (CastlingFlags::BLACK_QUEENSIDE, 'q'),
            ] {
                if self.castling.contains_any(flag) {
                    result.push(c);
                }
            }
        }

        // 4. アンパッサン対象マス
        result.push(' ');
        match self.en_passant {
            Some(sq) => result.push_str(&sq.to_uci()),
            None => result.push('-'),
        }

        // 5. ハーフムーブクロックとフルムーブ数
        result.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_count()));

        result
    }

    /// 駒配置部分をパース
    fn parse_board(&mut self, board_str: &str) -> Result<(), FenError> {
        let ranks: Vec<&str> = board_str.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::Board(format!("Expected 8 ranks, got {}", ranks.len())));
        }

        for (i, rank_str) in ranks.iter().enumerate() {
            // FENは8段目から書かれる
            let rank = 7 - i as u8;
            let mut file = 0u8;

            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    file += digit as u8;
                    if file > 8 {
                        return Err(FenError::Board(format!("Too many squares in rank {}", rank + 1)));
                    }
                } else {
                    if file >= 8 {
                        return Err(FenError::Board(format!("Too many pieces in rank {}", rank + 1)));
                    }
                    let pc = Piece::from_fen_char(c)
                        .ok_or_else(|| FenError::Board(format!("Unknown piece: {c}")))?;
                    self.board.put_piece(pc, Square::new(file, rank));
                    file += 1;
                }
            }

            if file != 8 {
                return Err(FenError::Board(format!("Rank {} has wrong number of squares", rank + 1)));
            }
        }

        // キングは双方ちょうど1枚
        for color in [Color::White, Color::Black] {
            let kings = self.board.pieces(color, crate::types::PieceType::King);
            if kings.count() != 1 {
                return Err(FenError::Board(format!("{color:?} must have exactly one king")));
            }
        }

        Ok(())
    }
}
