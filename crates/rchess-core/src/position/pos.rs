//! 局面（Position）

use crate::position::Board;
use crate::side::{
    color_of, kingside_rook_from, kingside_rook_to, queenside_rook_from, queenside_rook_to,
};
use crate::types::{CastlingFlags, Color, Move, Piece, PieceType, Square};

use super::zobrist::{zobrist_castling, zobrist_en_passant, zobrist_psq, zobrist_side};

/// 局面が保持できる最大手数（ply）
///
/// 履歴バッファは固定長で、これを超える手数は扱えない。
pub const MAX_PLY: usize = 512;

/// `do_move` を巻き戻すための情報
///
/// Zobristキーは `undo_move` がply減算後に履歴スロットから復元するため
/// ここには持たない。
#[derive(Debug, Clone, Copy)]
pub struct UndoInfo {
    /// 直前のハーフムーブクロック
    pub halfmove_clock: u32,
    /// 取られた駒（なければNONE、アンパッサンでは相手ポーン）
    pub captured: Piece,
    /// 直前のキャスリング権
    pub castling: CastlingFlags,
    /// 直前のアンパッサン対象マス
    pub en_passant: Option<Square>,
}

/// チェスの局面
///
/// 盤面に加えて手番、キャスリング権、アンパッサン対象、ハーフムーブ
/// クロック、ply、Zobristキーとその履歴を保持する。かなり大きい
/// オブジェクトなのでコピーには注意。
#[derive(Clone)]
pub struct Position {
    /// 盤面
    pub(super) board: Board,
    /// 手番
    pub(super) side_to_move: Color,
    /// キャスリング権
    pub(super) castling: CastlingFlags,
    /// アンパッサン対象マス
    pub(super) en_passant: Option<Square>,
    /// ハーフムーブクロック
    pub(super) halfmove_clock: u32,
    /// 初期局面からの手数
    pub(super) ply: usize,
    /// 現在のZobristキー
    pub(super) key: u64,
    /// Zobristキー履歴 [ply]
    pub(super) history: [u64; MAX_PLY],
}

impl Position {
    /// 空の局面を生成
    pub fn new() -> Self {
        Position {
            board: Board::new(),
            side_to_move: Color::White,
            castling: CastlingFlags::NONE,
            en_passant: None,
            halfmove_clock: 0,
            ply: 0,
            key: 0,
            history: [0; MAX_PLY],
        }
    }

    // ========== アクセサ ==========

    /// 盤面を取得
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 手番を取得
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// キャスリング権を取得
    #[inline]
    pub fn castling_rights(&self) -> CastlingFlags {
        self.castling
    }

    /// アンパッサン対象マスを取得
    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant
    }

    /// ハーフムーブクロックを取得
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// 手数（ply）を取得
    #[inline]
    pub fn ply(&self) -> usize {
        self.ply
    }

    /// フルムーブ数を取得
    #[inline]
    pub fn fullmove_count(&self) -> usize {
        self.ply >> 1
    }

    /// 現在のZobristキーを取得
    #[inline]
    pub fn key(&self) -> u64 {
        self.key
    }

    /// 指定plyのZobristキー履歴を取得
    #[inline]
    pub fn history_key(&self, ply: usize) -> u64 {
        self.history[ply]
    }

    // ========== 局面更新 ==========

    /// 指し手を進める
    ///
    /// 指し手は疑似合法でなければならない。違反は未定義動作
    /// （debugビルドではassertで落ちる）。
    #[inline]
    pub fn do_move(&mut self, mv: Move) -> UndoInfo {
        match self.side_to_move {
            Color::White => self.do_move_impl::<true>(mv),
            Color::Black => self.do_move_impl::<false>(mv),
        }
    }

    /// 指し手を巻き戻す
    ///
    /// `undo` は対応する `do_move` の戻り値でなければならない。
    #[inline]
    pub fn undo_move(&mut self, mv: Move, undo: UndoInfo) {
        // 巻き戻す手を指したのは現手番の反対側
        match self.side_to_move {
            Color::White => self.undo_move_impl::<false>(mv, undo),
            Color::Black => self.undo_move_impl::<true>(mv, undo),
        }
    }

    /// 指し手を進めてコールバックを呼び、巻き戻す
    pub fn with_move<R>(&mut self, mv: Move, f: impl FnOnce(&mut Position) -> R) -> R {
        let undo = self.do_move(mv);
        let result = f(self);
        self.undo_move(mv, undo);
        result
    }

    pub(crate) fn do_move_impl<const WHITE: bool>(&mut self, mv: Move) -> UndoInfo {
        let us = color_of(WHITE);
        let them = us.opposite();
        debug_assert_eq!(self.side_to_move, us);

        let from = mv.from();
        let to = mv.to();
        let piece_from = self.board.piece_on(from);
        let piece_to = self.board.piece_on(to);

        let undo = UndoInfo {
            halfmove_clock: self.halfmove_clock,
            captured: mv.captured_piece::<WHITE>(piece_to),
            castling: self.castling,
            en_passant: self.en_passant,
        };

        // 手数を進める。ポーンの手と駒取りはハーフムーブクロックをリセット
        self.halfmove_clock += 1;
        self.ply += 1;
        debug_assert!(self.ply < MAX_PLY);

        if piece_from == Piece::new(us, PieceType::Pawn) || mv.is_capture() {
            self.halfmove_clock = 0;
        }

        // 手番を反転
        self.side_to_move = them;
        self.key ^= zobrist_side();

        // 前局面のアンパッサン状態をキーから除去し、新しい状態を設定
        if let Some(ep) = self.en_passant {
            self.key ^= zobrist_en_passant(ep.file());
        }
        self.en_passant = if mv.is_double_pawn_push() {
            Some(mv.double_push_ep_square::<WHITE>())
        } else {
            None
        };
        if let Some(ep) = self.en_passant {
            self.key ^= zobrist_en_passant(ep.file());
        }

        // キャスリング権の更新:
        //   1) キングが動いたら両方の権利を失う
        //   2) ルークが初期位置から動いたらその側の権利を失う
        //   3) 相手の初期位置のルークを取ったら相手のその側の権利を失う
        self.key ^= zobrist_castling(self.castling);

        if piece_from == Piece::new(us, PieceType::King) {
            self.castling &= !CastlingFlags::both(us);
        } else if piece_from == Piece::new(us, PieceType::Rook) {
            if from.raw() == kingside_rook_from(WHITE).raw() {
                self.castling &= !CastlingFlags::kingside(us);
            } else if from.raw() == queenside_rook_from(WHITE).raw() {
                self.castling &= !CastlingFlags::queenside(us);
            }
        }

        // アンパッサンではpiece_toがNONEなのでここには入らない
        if piece_to == Piece::new(them, PieceType::Rook) {
            if to.raw() == kingside_rook_from(!WHITE).raw() {
                self.castling &= !CastlingFlags::kingside(them);
            } else if to.raw() == queenside_rook_from(!WHITE).raw() {
                self.castling &= !CastlingFlags::queenside(them);
            }
        }

        self.key ^= zobrist_castling(self.castling);

        // 駒取り（アンパッサンでは移動先の1段後ろの駒を取り除く）
        if mv.is_capture() {
            let cap_sq = mv.capture_square::<WHITE>();
            self.key ^= zobrist_psq(self.board.piece_on(cap_sq), cap_sq);
            self.board.remove_piece(cap_sq);
        }

        // 駒を動かす。プロモーションではポーンを取り除き成り駒を置く
        if mv.is_promotion() {
            let promo = mv.promotion_piece::<WHITE>();
            self.key ^= zobrist_psq(piece_from, from);
            self.key ^= zobrist_psq(promo, to);
            self.board.remove_piece(from);
            self.board.put_piece(promo, to);
        } else {
            self.key ^= zobrist_psq(piece_from, from);
            self.key ^= zobrist_psq(piece_from, to);
            self.board.move_piece(from, to);
        }

        // キャスリングではルークも動かす
        if mv.is_kingside_castle() {
            let rook_from = kingside_rook_from(WHITE);
            let rook_to = kingside_rook_to(WHITE);
            let rook = Piece::new(us, PieceType::Rook);
            self.key ^= zobrist_psq(rook, rook_from);
            self.key ^= zobrist_psq(rook, rook_to);
            self.board.move_piece(rook_from, rook_to);
        } else if mv.is_queenside_castle() {
            let rook_from = queenside_rook_from(WHITE);
            let rook_to = queenside_rook_to(WHITE);
            let rook = Piece::new(us, PieceType::Rook);
            self.key ^= zobrist_psq(rook, rook_from);
            self.key ^= zobrist_psq(rook, rook_to);
            self.board.move_piece(rook_from, rook_to);
        }

        // キーを履歴に記録
        self.history[self.ply] = self.key;

        undo
    }

    pub(crate) fn undo_move_impl<const WHITE: bool>(&mut self, mv: Move, undo: UndoInfo) {
        let mover = color_of(WHITE);
        debug_assert_ne!(self.side_to_move, mover);

        self.castling = undo.castling;
        self.halfmove_clock = undo.halfmove_clock;
        self.en_passant = undo.en_passant;
        self.side_to_move = mover;

        // キーは再計算せず履歴スロットから復元する
        self.ply -= 1;
        self.key = self.history[self.ply];

        // 駒を移動元に戻す。プロモーションではポーンに戻す
        if mv.is_promotion() {
            self.board.remove_piece(mv.to());
            self.board.put_piece(Piece::new(mover, PieceType::Pawn), mv.from());
        } else {
            self.board.move_piece(mv.to(), mv.from());
        }

        // 取られた駒を戻す
        if mv.is_capture() {
            self.board.put_piece(undo.captured, mv.capture_square::<WHITE>());
        } else if mv.is_kingside_castle() {
            self.board
                .move_piece(kingside_rook_to(WHITE), kingside_rook_from(WHITE));
        } else if mv.is_queenside_castle() {
            self.board
                .move_piece(queenside_rook_to(WHITE), queenside_rook_from(WHITE));
        }
    }

    /// 増分維持する状態（Zobristキーと履歴）を現局面から計算し直す
    ///
    /// 局面設定（FEN読み込み）後に一度だけ呼ぶ。
    pub(super) fn setup_incremental_state(&mut self) {
        let mut key = 0u64;

        for sq in self.board.occupied() {
            key ^= zobrist_psq(self.board.piece_on(sq), sq);
        }

        if self.side_to_move == Color::Black {
            key ^= zobrist_side();
        }

        if let Some(ep) = self.en_passant {
            key ^= zobrist_en_passant(ep.file());
        }

        key ^= zobrist_castling(self.castling);

        self.key = key;
        self.history[self.ply] = key;
    }

    // ========== 終局判定 ==========

    /// 50手ルールが成立しているか
    ///
    /// 最終手がチェックメイトならチェックメイトが優先される。
    /// 呼び出し側で先に確認すること。
    #[inline]
    pub fn is_draw_by_fifty_moves(&self) -> bool {
        self.halfmove_clock > 99
    }

    /// 直前の手で千日手（3回同一局面）が成立したか
    ///
    /// ハーフムーブクロックの窓内だけを走査する。ポーンの手や駒取りより
    /// 前の局面は繰り返し得ないため、これで十分。
    pub fn is_repetition(&self) -> bool {
        if self.ply < 8 {
            return false;
        }

        let last = self.key;
        let oldest = self.ply - (self.halfmove_clock as usize).min(self.ply);

        let mut times = 0;
        let mut i = self.ply;
        loop {
            if self.history[i] == last {
                times += 1;
            }
            if i < oldest + 2 {
                break;
            }
            i -= 2;
        }

        times >= 3
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}
