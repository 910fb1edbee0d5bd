//! UCI形式の指し手文字列デコード
//!
//! "e2e4" や "e7e8q" を現局面に照らして解決し、フラグ付きの [`Move`] を
//! 作る。得られる指し手は疑似合法まで。合法性の確認は呼び出し側の仕事
//! （合法手リストとの照合か、指してから [`is_position_legal`] で確認する）。
//!
//! [`is_position_legal`]: crate::movegen::is_position_legal

use crate::bitboard::{
    bishop_attacks, king_attacks, knight_attacks, queen_attacks, rook_attacks, squares_between,
    Bitboard, FILE_A, FILE_H,
};
use crate::position::Position;
use crate::side::{
    color_of, double_forward, forward, forward_sq, king_from, kingside_king_to,
    kingside_rook_from, pawn_ep_rank, pawn_promo_rank, pawn_start_rank, queenside_king_to,
    queenside_rook_from,
};
use crate::types::{Color, Move, MoveFlags, PieceType, Square};

/// UCI形式の指し手文字列を現局面の指し手へ解決する
///
/// 4文字または5文字の小文字表記のみ受け付ける（大文字は不可）。解決
/// できない場合はnull moveを返す。プロモーションはポーンがプロモー
/// ション直前の段にいるときだけ有効で、その場合は5文字目が必須。
pub fn decode_move(pos: &Position, s: &str) -> Move {
    match pos.side_to_move() {
        Color::White => decode_move_impl::<true>(pos, s),
        Color::Black => decode_move_impl::<false>(pos, s),
    }
}

fn decode_move_impl<const WHITE: bool>(pos: &Position, s: &str) -> Move {
    let us = color_of(WHITE);
    let board = pos.board();

    if s.len() != 4 && s.len() != 5 {
        return Move::NONE;
    }

    let (start, end) = match (Square::from_uci(&s[0..2]), Square::from_uci(&s[2..4])) {
        (Some(start), Some(end)) => (start, end),
        _ => return Move::NONE,
    };

    let piece_from = board.piece_on(start);
    let piece_to = board.piece_on(end);

    // 以下は明らかに指せない:
    //   1) 動かす駒がない
    //   2) 相手の駒を動かそうとしている
    //   3) 味方の駒を取ろうとしている
    if piece_from.is_none()
        || piece_from.color() != us
        || (piece_to.is_some() && piece_to.color() == us)
    {
        return Move::NONE;
    }

    let start_spot = Bitboard::from_square(start);
    let end_spot = Bitboard::from_square(end);
    let dest_empty = piece_to.is_none();

    let left_attack = forward(WHITE, start_spot & !FILE_A) >> 1;
    let right_attack = forward(WHITE, start_spot & !FILE_H) << 1;

    match piece_from.piece_type() {
        PieceType::Pawn => {
            if (start_spot & pawn_promo_rank(WHITE)).is_not_empty() {
                // プロモーション。5文字目で成る駒を指定する
                let (promo, promo_capture) = match s.as_bytes().get(4) {
                    Some(b'q') => (MoveFlags::QueenPromotion, MoveFlags::QueenPromotionCapture),
                    Some(b'r') => (MoveFlags::RookPromotion, MoveFlags::RookPromotionCapture),
                    Some(b'b') => (MoveFlags::BishopPromotion, MoveFlags::BishopPromotionCapture),
                    Some(b'n') => (MoveFlags::KnightPromotion, MoveFlags::KnightPromotionCapture),
                    _ => return Move::NONE,
                };

                if forward(WHITE, start_spot) == end_spot && dest_empty {
                    return Move::new(start, end, promo);
                } else if (left_attack == end_spot || right_attack == end_spot) && !dest_empty {
                    return Move::new(start, end, promo_capture);
                }
            } else {
                if forward(WHITE, start_spot) == end_spot && dest_empty {
                    return Move::new(start, end, MoveFlags::Quiet);
                } else if double_forward(WHITE, start_spot & pawn_start_rank(WHITE)) == end_spot
                    && dest_empty
                    && board
                        .piece_on(Square::from_u8(forward_sq(WHITE, start.raw())).unwrap())
                        .is_none()
                {
                    return Move::new(start, end, MoveFlags::DoublePawnPush);
                } else if (left_attack == end_spot || right_attack == end_spot) && !dest_empty {
                    return Move::new(start, end, MoveFlags::Capture);
                } else if pos.en_passant_square() == Some(end)
                    && (start_spot & pawn_ep_rank(WHITE)).is_not_empty()
                    && (left_attack == end_spot || right_attack == end_spot)
                    && dest_empty
                {
                    return Move::new(start, end, MoveFlags::EnPassant);
                }
            }

            Move::NONE
        }

        PieceType::Knight => {
            if (knight_attacks(start) & end_spot).is_not_empty() {
                return Move::new(start, end, quiet_or_capture(dest_empty));
            }
            Move::NONE
        }

        PieceType::King => {
            // キャスリング中に空いているべきマス
            let should_unoccupied_kingside =
                squares_between(kingside_rook_from(WHITE), king_from(WHITE));
            let should_unoccupied_queenside =
                squares_between(queenside_rook_from(WHITE), king_from(WHITE));

            if (king_attacks(start) & end_spot).is_not_empty() {
                return Move::new(start, end, quiet_or_capture(dest_empty));
            } else if start == king_from(WHITE)
                && end == kingside_king_to(WHITE)
                && (board.occupied() & should_unoccupied_kingside).is_empty()
            {
                return Move::new(start, end, MoveFlags::KingCastle);
            } else if start == king_from(WHITE)
                && end == queenside_king_to(WHITE)
                && (board.occupied() & should_unoccupied_queenside).is_empty()
            {
                return Move::new(start, end, MoveFlags::QueenCastle);
            }

            Move::NONE
        }

        PieceType::Bishop => {
            if (bishop_attacks(start, board.occupied()) & end_spot).is_not_empty() {
                return Move::new(start, end, quiet_or_capture(dest_empty));
            }
            Move::NONE
        }

        PieceType::Rook => {
            if (rook_attacks(start, board.occupied()) & end_spot).is_not_empty() {
                return Move::new(start, end, quiet_or_capture(dest_empty));
            }
            Move::NONE
        }

        PieceType::Queen => {
            if (queen_attacks(start, board.occupied()) & end_spot).is_not_empty() {
                return Move::new(start, end, quiet_or_capture(dest_empty));
            }
            Move::NONE
        }
    }
}

#[inline]
const fn quiet_or_capture(dest_empty: bool) -> MoveFlags {
    if dest_empty {
        MoveFlags::Quiet
    } else {
        MoveFlags::Capture
    }
}
