//! Legal move generation
//!
//! The generator is strictly legal: it computes a checkmask, a king-danger
//! mask and two pinmasks up front, after which every emitted move is legal
//! by construction. There are no per-move legality probes and no branches
//! in the inner loops beyond the emission itself.
//!
//! Everything is monomorphized over the side to move (`const WHITE: bool`);
//! the runtime dispatch happens once per call at the public entry points.

use crate::bitboard::{
    bishop_attacks, king_attacks, knight_attacks, rook_attacks, squares_between, Bitboard, FILE_A,
    FILE_H,
};
use crate::position::{Board, Position};
use crate::side::{
    color_of, double_forward, double_forward_sq, forward, forward_sq, king_from, kingside_king_to,
    kingside_rook_from, pawn_promo_rank, pawn_start_rank, queenside_king_to, queenside_rook_from,
};
use crate::types::{CastlingFlags, Color, Move, MoveFlags, PieceType, Square};

use super::sink::{MoveCounter, MoveSink};

// ========== 公開エントリポイント ==========

/// 手番側の合法手を全てsinkへ出力する
///
/// 局面は変更しない。sinkが[`MoveCounter`]のときは指し手を実体化せず
/// popcountでまとめて数える。
#[inline]
pub fn legal_moves<S: MoveSink>(pos: &Position, sink: &mut S) {
    match pos.side_to_move() {
        Color::White => generate::<true, S>(pos, sink),
        Color::Black => generate::<false, S>(pos, sink),
    }
}

/// 手番側の合法手の数を返す
#[inline]
pub fn legal_move_count(pos: &Position) -> u64 {
    let mut counter = MoveCounter::new();
    legal_moves(pos, &mut counter);
    counter.count
}

/// 指定マスが指定色の相手から攻撃されているか
#[inline]
pub fn square_attacked(board: &Board, defender: Color, sq: Square) -> bool {
    match defender {
        Color::White => square_attacked_impl::<true>(board, sq),
        Color::Black => square_attacked_impl::<false>(board, sq),
    }
}

/// 指定色のキングがチェックされているか
#[inline]
pub fn is_check(pos: &Position, color: Color) -> bool {
    square_attacked(pos.board(), color, pos.board().king_square(color))
}

/// 手番側がチェックメイトされているか
pub fn is_checkmate(pos: &Position) -> bool {
    is_check(pos, pos.side_to_move()) && legal_move_count(pos) == 0
}

/// 手番側がステイルメイトされているか
pub fn is_stalemate(pos: &Position) -> bool {
    legal_move_count(pos) == 0 && !is_check(pos, pos.side_to_move())
}

/// 引き分けが成立しているか（ステイルメイト、50手ルール、千日手）
///
/// 最終手がチェックメイトならそちらが優先される。先に
/// [`is_checkmate`]を確認すること。
pub fn is_draw(pos: &Position) -> bool {
    pos.is_draw_by_fifty_moves() || pos.is_repetition() || is_stalemate(pos)
}

/// 疑似合法手を指した直後の局面が合法かどうか
///
/// 疑似合法生成と組み合わせて使うためのAPI。キャスリングでは通過マスの
/// 被攻撃も確認する。`mover` は直前に指した側。
pub fn is_position_legal(board: &Board, mover: Color, mv: Move) -> bool {
    match mover {
        Color::White => is_position_legal_impl::<true>(board, mv),
        Color::Black => is_position_legal_impl::<false>(board, mv),
    }
}

// ========== ポーンのシフト演算 ==========

#[inline]
fn right_pawn_attack(white: bool, pawns: Bitboard) -> Bitboard {
    forward(white, pawns & !FILE_H) << 1
}

#[inline]
fn left_pawn_attack(white: bool, pawns: Bitboard) -> Bitboard {
    forward(white, pawns & !FILE_A) >> 1
}

// 右捕獲の逆写像（移動先の集合を移動元の集合へ戻す）
#[inline]
fn reverse_right_pawn_attack(white: bool, right: Bitboard) -> Bitboard {
    forward(!white, right & !FILE_A) >> 1
}

// 左捕獲の逆写像
#[inline]
fn reverse_left_pawn_attack(white: bool, left: Bitboard) -> Bitboard {
    forward(!white, left & !FILE_H) << 1
}

// ========== マスク計算 ==========

/// チェックマスクを計算する
///
/// チェックがなければ全マス。単一のチェックならチェックしている駒と
/// キングまでの間のマス。ダブルチェックなら空（キング以外は動けない）。
/// 非キングの指し手はこのマスクとANDするだけで合法性が保たれる。
fn compute_checkmask<const WHITE: bool>(pos: &Position) -> Bitboard {
    let us = color_of(WHITE);
    let them = us.opposite();
    let board = pos.board();

    let mut checkmask = Bitboard::ALL;

    let king = board.pieces(us, PieceType::King);
    let king_sq = king.lsb();

    let enemy_pawns = board.pieces(them, PieceType::Pawn);
    let enemy_knights = board.pieces(them, PieceType::Knight);
    let enemy_bishops = board.pieces(them, PieceType::Bishop);
    let enemy_rooks = board.pieces(them, PieceType::Rook);
    let enemy_queens = board.pieces(them, PieceType::Queen);

    // ルーク筋のチェック。
    //
    // 同種スライダー2枚のダブルチェックは起こらないと思いがちだが、
    // プロモーションを経由したルーク筋同士のダブルチェックはあり得る:
    //   https://lichess.org/editor/4kn2/4P3/8/8/4Q3/4K3/8/8_w_-_-_0_1 (e7f8q)
    let rook_attack = rook_attacks(king_sq, board.occupied());
    let checker = rook_attack & (enemy_rooks | enemy_queens);
    if checker.is_not_empty() {
        if checker.more_than_one() {
            checkmask = Bitboard::EMPTY;
        } else {
            // マスクはキング自身を含まず、チェックしている駒を含む
            checkmask &= rook_attack & (rook_attacks(checker.lsb(), board.occupied()) | checker);
        }
    }

    // ビショップ筋のチェック。こちらは2枚同時には起こらない
    let bishop_attack = bishop_attacks(king_sq, board.occupied());
    let checker = bishop_attack & (enemy_bishops | enemy_queens);
    if checker.is_not_empty() {
        debug_assert!(!checker.more_than_one());
        checkmask &= bishop_attack & (bishop_attacks(checker.lsb(), board.occupied()) | checker);
    }

    // ナイトのチェックならマスクはそのナイトのみ。
    // 合法な局面ではナイトやポーンだけのダブルチェックは起こらない
    let checker = knight_attacks(king_sq) & enemy_knights;
    if checker.is_not_empty() {
        debug_assert!(!checker.more_than_one());
        checkmask &= checker;
    }

    // ポーンも同様
    let pawn_attack = left_pawn_attack(WHITE, king) | right_pawn_attack(WHITE, king);
    let checker = pawn_attack & enemy_pawns;
    if checker.is_not_empty() {
        debug_assert!(!checker.more_than_one());
        checkmask &= checker;
    }

    checkmask
}

/// 相手の利きの合併（キング危険マスク）を計算する
///
/// スライダーの利きは自玉を占有から外して計算する。こうしないと
/// スライダーの筋に沿って後退する逃げ方を誤って許してしまう。
fn compute_banned<const WHITE: bool>(pos: &Position) -> Bitboard {
    let us = color_of(WHITE);
    let them = us.opposite();
    let board = pos.board();

    let king = board.pieces(us, PieceType::King);
    let occupied_without_king = board.occupied() ^ king;

    let enemy_pawns = board.pieces(them, PieceType::Pawn);
    let mut banned = left_pawn_attack(!WHITE, enemy_pawns) | right_pawn_attack(!WHITE, enemy_pawns);

    banned |= king_attacks(board.king_square(them));

    for sq in board.pieces(them, PieceType::Knight) {
        banned |= knight_attacks(sq);
    }

    let enemy_queens = board.pieces(them, PieceType::Queen);
    for sq in board.pieces(them, PieceType::Bishop) | enemy_queens {
        banned |= bishop_attacks(sq, occupied_without_king);
    }
    for sq in board.pieces(them, PieceType::Rook) | enemy_queens {
        banned |= rook_attacks(sq, occupied_without_king);
    }

    banned
}

/// 縦横のピンマスクを計算する
///
/// キングからルークの利きで探査し、味方の内輪の駒を外したX-rayで
/// ピンしている駒を見つける。ピンの通り道（ピンしている駒を含む）を
/// 全て合わせたものを返す。
fn compute_hv_pinmask<const WHITE: bool>(pos: &Position) -> Bitboard {
    let us = color_of(WHITE);
    let them = us.opposite();
    let board = pos.board();
    let king_sq = board.king_square(us);
    let enemy_rooks = board.pieces(them, PieceType::Rook) | board.pieces(them, PieceType::Queen);

    // ピンされている可能性のある駒（キングの利きにいる味方）
    let probe = rook_attacks(king_sq, board.occupied());
    let potentially_pinned = probe & board.occupancy(us);

    // その駒を透かして敵ルークを探す。直接チェックしている駒は
    // probeで既に拾われているので除く
    let xray = rook_attacks(king_sq, board.occupied() & !potentially_pinned);
    let mut pinners = xray & enemy_rooks & !probe;

    let mut pinmask = Bitboard::EMPTY;
    while let Some(pinner_sq) = pinners.pop_lsb() {
        // ピンしている駒の利きにいる候補駒が実際にピンされている駒
        let pinned_spot = rook_attacks(pinner_sq, board.occupied()) & potentially_pinned;

        pinmask |= (rook_attacks(pinned_spot.lsb(), board.occupied()) | pinned_spot) & xray;
    }

    pinmask
}

/// 斜めのピンマスクを計算する（縦横版と同じ手順）
fn compute_d_pinmask<const WHITE: bool>(pos: &Position) -> Bitboard {
    let us = color_of(WHITE);
    let them = us.opposite();
    let board = pos.board();
    let king_sq = board.king_square(us);
    let enemy_bishops =
        board.pieces(them, PieceType::Bishop) | board.pieces(them, PieceType::Queen);

    let probe = bishop_attacks(king_sq, board.occupied());
    let potentially_pinned = probe & board.occupancy(us);

    let xray = bishop_attacks(king_sq, board.occupied() & !potentially_pinned);
    let mut pinners = xray & enemy_bishops & !probe;

    let mut pinmask = Bitboard::EMPTY;
    while let Some(pinner_sq) = pinners.pop_lsb() {
        let pinned_spot = bishop_attacks(pinner_sq, board.occupied()) & potentially_pinned;

        pinmask |= (bishop_attacks(pinned_spot.lsb(), board.occupied()) | pinned_spot) & xray;
    }

    pinmask
}

// ========== 生成本体 ==========

/// 駒取りかどうかを分岐なしで判定してフラグbitにする
#[inline]
fn capture_flag_bits(enemy_occupancy: Bitboard, to: u8) -> u16 {
    (((enemy_occupancy.bits() >> to) & 1) << 2) as u16
}

fn generate<const WHITE: bool, S: MoveSink>(pos: &Position, sink: &mut S) {
    let us = color_of(WHITE);
    let them = us.opposite();
    let board = pos.board();

    let pawns = board.pieces(us, PieceType::Pawn);
    let knights = board.pieces(us, PieceType::Knight);
    let bishops = board.pieces(us, PieceType::Bishop);
    let rooks = board.pieces(us, PieceType::Rook);
    let queens = board.pieces(us, PieceType::Queen);
    let king = board.pieces(us, PieceType::King);

    let checkmask = compute_checkmask::<WHITE>(pos);
    let pin_hv = compute_hv_pinmask::<WHITE>(pos);
    let pin_d = compute_d_pinmask::<WHITE>(pos);

    // 非ポーン非キングの駒が動けるマス
    let moveable = !board.occupancy(us) & checkmask;

    // --- ポーン ---
    {
        // 斜めにピンされたポーンは前進できず、縦横にピンされたポーンは
        // 捕獲できない。動きの種類ごとにピン軸で分けておく
        let pawns_uhv = pawns & !pin_hv;
        let pawns_ud = pawns & !pin_d;

        // 4種類の移動bitboard（いずれも移動元の集合）:
        //   前進、2マス前進、左捕獲、右捕獲
        let mut quiet = pawns_ud & forward(!WHITE, !board.occupied());
        let mut double_push = quiet
            & pawn_start_rank(WHITE)
            & double_forward(!WHITE, !board.occupied() & checkmask);
        let mut left_capture =
            pawns_uhv & reverse_left_pawn_attack(WHITE, board.occupancy(them) & checkmask);
        let mut right_capture =
            pawns_uhv & reverse_right_pawn_attack(WHITE, board.occupancy(them) & checkmask);
        quiet &= forward(!WHITE, checkmask);

        // 前進の絞り込み:
        //   斜めピンは除外済みなので、残るのは縦横ピンと非ピン。
        //   縦横ピンのポーンは移動先がピンマスク上に残る場合だけ前進できる
        let quiet_pinned = quiet & pin_hv;
        quiet = (quiet_pinned & forward(!WHITE, pin_hv)) | (quiet & !pin_hv);

        // 2マス前進も同じ理屈
        let double_push_pinned = double_push & pin_hv;
        double_push =
            (double_push_pinned & double_forward(!WHITE, pin_hv)) | (double_push & !pin_hv);

        // 捕獲の絞り込み:
        //   縦横ピンは除外済み。斜めピンのポーンは移動先が斜めピンマスク上に
        //   ある場合だけ捕獲できる
        let left_capture_pinned = left_capture & pin_d;
        left_capture =
            (left_capture_pinned & reverse_left_pawn_attack(WHITE, pin_d)) | (left_capture & !pin_d);

        let right_capture_pinned = right_capture & pin_d;
        right_capture = (right_capture_pinned & reverse_right_pawn_attack(WHITE, pin_d))
            | (right_capture & !pin_d);

        // プロモーションを分離する
        let promo_rank = pawn_promo_rank(WHITE);
        let quiet_promotion = quiet & promo_rank;
        let left_capture_promotion = left_capture & promo_rank;
        let right_capture_promotion = right_capture & promo_rank;
        quiet &= !promo_rank;
        left_capture &= !promo_rank;
        right_capture &= !promo_rank;

        // アンパッサン。
        //
        // 通常のピン処理に加えて専用の安全確認が要る: 取る側のポーンが
        // ピンされていなくても、両ポーンが消えた5段目を通ってキングが
        // ルーク筋に晒される場合がある。両方のポーンを一時的に外し
        // （取られるポーンの代わりに移動先へポーンを置いて）、キングに
        // ルークかクイーンの利きが通るならアンパッサンは不可。
        // 候補ポーンが2枚あるなら片方は必ず盤に残るので確認は不要。
        if let Some(ep_square) = pos.en_passant_square() {
            let ep_spot = Bitboard::from_square(ep_square);
            let ep_target = forward(!WHITE, ep_spot);

            let mut left_ep = pawns_uhv & !FILE_A & ((ep_target & checkmask) << 1);
            let mut right_ep = pawns_uhv & !FILE_H & ((ep_target & checkmask) >> 1);

            if (left_ep | right_ep).is_not_empty()
                && ((left_ep.is_not_empty() && right_ep.is_not_empty())
                    || (rook_attacks(
                        king.lsb(),
                        board.occupied() ^ (left_ep | right_ep | ep_spot | ep_target),
                    ) & (board.pieces(them, PieceType::Rook)
                        | board.pieces(them, PieceType::Queen)))
                    .is_empty())
            {
                // 斜めピンのアンパッサンを通常の捕獲と同様に絞り込む
                left_ep = (left_ep & pin_d & reverse_left_pawn_attack(WHITE, pin_d))
                    | (left_ep & !pin_d);
                right_ep = (right_ep & pin_d & reverse_right_pawn_attack(WHITE, pin_d))
                    | (right_ep & !pin_d);

                if S::COUNT_ONLY {
                    sink.add(left_ep.is_not_empty() as u64 + right_ep.is_not_empty() as u64);
                } else {
                    if left_ep.is_not_empty() {
                        sink.push(Move::new(left_ep.lsb(), ep_square, MoveFlags::EnPassant));
                    }
                    if right_ep.is_not_empty() {
                        sink.push(Move::new(right_ep.lsb(), ep_square, MoveFlags::EnPassant));
                    }
                }
            }
        }

        if S::COUNT_ONLY {
            sink.add(
                (quiet.count()
                    + double_push.count()
                    + left_capture.count()
                    + right_capture.count()
                    + 4 * (quiet_promotion.count()
                        + left_capture_promotion.count()
                        + right_capture_promotion.count())) as u64,
            );
        } else {
            for from in quiet {
                let to = forward_sq(WHITE, from.raw());
                sink.push(Move::from_parts(from.raw(), to, MoveFlags::Quiet as u16));
            }

            for from in double_push {
                let to = double_forward_sq(WHITE, from.raw());
                sink.push(Move::from_parts(from.raw(), to, MoveFlags::DoublePawnPush as u16));
            }

            for from in left_capture {
                let to = forward_sq(WHITE, from.raw()) - 1;
                sink.push(Move::from_parts(from.raw(), to, MoveFlags::Capture as u16));
            }

            for from in right_capture {
                let to = forward_sq(WHITE, from.raw()) + 1;
                sink.push(Move::from_parts(from.raw(), to, MoveFlags::Capture as u16));
            }

            for from in quiet_promotion {
                let to = forward_sq(WHITE, from.raw());
                sink.push(Move::from_parts(from.raw(), to, MoveFlags::QueenPromotion as u16));
                sink.push(Move::from_parts(from.raw(), to, MoveFlags::RookPromotion as u16));
                sink.push(Move::from_parts(from.raw(), to, MoveFlags::BishopPromotion as u16));
                sink.push(Move::from_parts(from.raw(), to, MoveFlags::KnightPromotion as u16));
            }

            for from in left_capture_promotion {
                let to = forward_sq(WHITE, from.raw()) - 1;
                sink.push(Move::from_parts(from.raw(), to, MoveFlags::QueenPromotionCapture as u16));
                sink.push(Move::from_parts(from.raw(), to, MoveFlags::RookPromotionCapture as u16));
                sink.push(Move::from_parts(
                    from.raw(),
                    to,
                    MoveFlags::BishopPromotionCapture as u16,
                ));
                sink.push(Move::from_parts(
                    from.raw(),
                    to,
                    MoveFlags::KnightPromotionCapture as u16,
                ));
            }

            for from in right_capture_promotion {
                let to = forward_sq(WHITE, from.raw()) + 1;
                sink.push(Move::from_parts(from.raw(), to, MoveFlags::QueenPromotionCapture as u16));
                sink.push(Move::from_parts(from.raw(), to, MoveFlags::RookPromotionCapture as u16));
                sink.push(Move::from_parts(
                    from.raw(),
                    to,
                    MoveFlags::BishopPromotionCapture as u16,
                ));
                sink.push(Move::from_parts(
                    from.raw(),
                    to,
                    MoveFlags::KnightPromotionCapture as u16,
                ));
            }
        }
    }

    // --- ナイト ---
    {
        // ピンされたナイトはどの軸でも動けない
        let unpinned_knights = knights & !(pin_hv | pin_d);
        for from in unpinned_knights {
            let legal = knight_attacks(from) & moveable;

            if S::COUNT_ONLY {
                sink.add(legal.count() as u64);
            } else {
                for to in legal {
                    let flag = capture_flag_bits(board.occupancy(them), to.raw());
                    sink.push(Move::from_parts(from.raw(), to.raw(), flag));
                }
            }
        }
    }

    // --- ビショップとクイーン（斜め） ---
    // クイーンをここに畳み込むことで、クイーン専用の生成はほぼゼロコストになる
    {
        // 縦横にピンされた駒は斜めには動けない
        let bishops_queens = (bishops | queens) & !pin_hv;
        let unpinned_bishops = bishops_queens & !pin_d;
        let pinned_bishops = bishops_queens & pin_d;

        for from in unpinned_bishops {
            let legal = bishop_attacks(from, board.occupied()) & moveable;

            if S::COUNT_ONLY {
                sink.add(legal.count() as u64);
            } else {
                for to in legal {
                    let flag = capture_flag_bits(board.occupancy(them), to.raw());
                    sink.push(Move::from_parts(from.raw(), to.raw(), flag));
                }
            }
        }

        for from in pinned_bishops {
            // 斜めにピンされた駒は斜めピンマスク上しか動けない
            let legal = bishop_attacks(from, board.occupied()) & moveable & pin_d;

            if S::COUNT_ONLY {
                sink.add(legal.count() as u64);
            } else {
                for to in legal {
                    let flag = capture_flag_bits(board.occupancy(them), to.raw());
                    sink.push(Move::from_parts(from.raw(), to.raw(), flag));
                }
            }
        }
    }

    // --- ルークとクイーン（縦横） ---
    {
        // 斜めにピンされた駒は縦横には動けない
        let rooks_queens = (rooks | queens) & !pin_d;
        let unpinned_rooks = rooks_queens & !pin_hv;
        let pinned_rooks = rooks_queens & pin_hv;

        for from in unpinned_rooks {
            let legal = rook_attacks(from, board.occupied()) & moveable;

            if S::COUNT_ONLY {
                sink.add(legal.count() as u64);
            } else {
                for to in legal {
                    let flag = capture_flag_bits(board.occupancy(them), to.raw());
                    sink.push(Move::from_parts(from.raw(), to.raw(), flag));
                }
            }
        }

        for from in pinned_rooks {
            let legal = rook_attacks(from, board.occupied()) & moveable & pin_hv;

            if S::COUNT_ONLY {
                sink.add(legal.count() as u64);
            } else {
                for to in legal {
                    let flag = capture_flag_bits(board.occupancy(them), to.raw());
                    sink.push(Move::from_parts(from.raw(), to.raw(), flag));
                }
            }
        }
    }

    // --- キング ---
    {
        let banned = compute_banned::<WHITE>(pos);

        let king_sq = king.lsb();
        let king_moves = king_attacks(king_sq) & !banned & !board.occupancy(us);

        // キャスリング中に空いているべきマス（キングとルークの間）
        let should_unoccupied_kingside =
            squares_between(kingside_rook_from(WHITE), king_from(WHITE));
        let should_unoccupied_queenside =
            squares_between(queenside_rook_from(WHITE), king_from(WHITE));

        // キングが通るため攻撃されていてはいけないマス（始点と終点を含む）。
        // bannedはキングがチェックされているときに限りキングのマスを含むので、
        // この条件だけでチェック中・チェックを横切るキャスリングも弾ける
        let should_unattacked_kingside = squares_between(kingside_king_to(WHITE), king_from(WHITE))
            | Bitboard::from_square(kingside_king_to(WHITE))
            | Bitboard::from_square(king_from(WHITE));
        let should_unattacked_queenside =
            squares_between(queenside_king_to(WHITE), king_from(WHITE))
                | Bitboard::from_square(queenside_king_to(WHITE))
                | Bitboard::from_square(king_from(WHITE));

        let can_castle_kingside = pos
            .castling_rights()
            .contains_any(CastlingFlags::kingside(us))
            && (should_unoccupied_kingside & board.occupied()).is_empty()
            && (should_unattacked_kingside & banned).is_empty();
        let can_castle_queenside = pos
            .castling_rights()
            .contains_any(CastlingFlags::queenside(us))
            && (should_unoccupied_queenside & board.occupied()).is_empty()
            && (should_unattacked_queenside & banned).is_empty();

        if S::COUNT_ONLY {
            sink.add(king_moves.count() as u64);
            sink.add(can_castle_kingside as u64 + can_castle_queenside as u64);
        } else {
            if can_castle_kingside {
                sink.push(Move::new(king_sq, kingside_king_to(WHITE), MoveFlags::KingCastle));
            }
            if can_castle_queenside {
                sink.push(Move::new(king_sq, queenside_king_to(WHITE), MoveFlags::QueenCastle));
            }

            for to in king_moves {
                let flag = capture_flag_bits(board.occupancy(them), to.raw());
                sink.push(Move::from_parts(king_sq.raw(), to.raw(), flag));
            }
        }
    }
}

// ========== 被攻撃判定 ==========

fn square_attacked_impl<const WHITE: bool>(board: &Board, sq: Square) -> bool {
    let them = color_of(WHITE).opposite();
    let spot = Bitboard::from_square(sq);

    let enemy_queens = board.pieces(them, PieceType::Queen);
    let attackers = ((left_pawn_attack(WHITE, spot) | right_pawn_attack(WHITE, spot))
        & board.pieces(them, PieceType::Pawn))
        | (king_attacks(sq) & board.pieces(them, PieceType::King))
        | (knight_attacks(sq) & board.pieces(them, PieceType::Knight))
        | (bishop_attacks(sq, board.occupied())
            & (board.pieces(them, PieceType::Bishop) | enemy_queens))
        | (rook_attacks(sq, board.occupied())
            & (board.pieces(them, PieceType::Rook) | enemy_queens));

    attackers.is_not_empty()
}

fn is_position_legal_impl<const WHITE: bool>(board: &Board, mv: Move) -> bool {
    let us = color_of(WHITE);

    // キャスリングなら通過マスが攻撃されていないことも確認する
    if mv.is_castle() {
        let king_to = if mv.is_kingside_castle() {
            kingside_king_to(WHITE)
        } else {
            queenside_king_to(WHITE)
        };
        let should_unattacked = squares_between(king_from(WHITE), king_to)
            | Bitboard::from_square(king_to)
            | Bitboard::from_square(king_from(WHITE));

        for sq in should_unattacked {
            if square_attacked_impl::<WHITE>(board, sq) {
                return false;
            }
        }
    }

    !square_attacked_impl::<WHITE>(board, board.king_square(us))
}
