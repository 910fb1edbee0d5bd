//! 手番で対称な定数とシフト演算
//!
//! 移動生成と局面更新は手番を const ジェネリクス（`WHITE: bool`）で単相化
//! する。ここの関数は全て const な引数で呼ばれ、分岐はコンパイル時に畳み
//! 込まれる。

use crate::bitboard::Bitboard;
use crate::types::{Color, Square};

/// boolの手番をColorに変換
#[inline]
pub(crate) const fn color_of(white: bool) -> Color {
    if white {
        Color::White
    } else {
        Color::Black
    }
}

/// 1段前進
#[inline]
pub(crate) const fn forward(white: bool, bb: Bitboard) -> Bitboard {
    if white {
        Bitboard::new(bb.bits() << 8)
    } else {
        Bitboard::new(bb.bits() >> 8)
    }
}

/// 2段前進
#[inline]
pub(crate) const fn double_forward(white: bool, bb: Bitboard) -> Bitboard {
    if white {
        Bitboard::new(bb.bits() << 16)
    } else {
        Bitboard::new(bb.bits() >> 16)
    }
}

/// 1段前進したマス番号
#[inline]
pub(crate) const fn forward_sq(white: bool, sq: u8) -> u8 {
    if white {
        sq + 8
    } else {
        sq - 8
    }
}

/// 2段前進したマス番号
#[inline]
pub(crate) const fn double_forward_sq(white: bool, sq: u8) -> u8 {
    if white {
        sq + 16
    } else {
        sq - 16
    }
}

/// ポーンの初期段（白=2段目、黒=7段目）
#[inline]
pub(crate) const fn pawn_start_rank(white: bool) -> Bitboard {
    if white {
        Bitboard::new(0x0000_0000_0000_FF00)
    } else {
        Bitboard::new(0x00FF_0000_0000_0000)
    }
}

/// ポーンがプロモーション直前にいる段（白=7段目、黒=2段目）
#[inline]
pub(crate) const fn pawn_promo_rank(white: bool) -> Bitboard {
    if white {
        Bitboard::new(0x00FF_0000_0000_0000)
    } else {
        Bitboard::new(0x0000_0000_0000_FF00)
    }
}

/// アンパッサンで取る側のポーンがいる段（白=5段目、黒=4段目）
#[inline]
pub(crate) const fn pawn_ep_rank(white: bool) -> Bitboard {
    if white {
        Bitboard::new(0x0000_00FF_0000_0000)
    } else {
        Bitboard::new(0x0000_0000_FF00_0000)
    }
}

/// キングの初期位置
#[inline]
pub(crate) const fn king_from(white: bool) -> Square {
    if white {
        Square::E1
    } else {
        Square::E8
    }
}

/// キングサイドキャスリング後のキング位置
#[inline]
pub(crate) const fn kingside_king_to(white: bool) -> Square {
    if white {
        Square::G1
    } else {
        Square::G8
    }
}

/// クイーンサイドキャスリング後のキング位置
#[inline]
pub(crate) const fn queenside_king_to(white: bool) -> Square {
    if white {
        Square::C1
    } else {
        Square::C8
    }
}

/// キングサイドのルーク初期位置
#[inline]
pub(crate) const fn kingside_rook_from(white: bool) -> Square {
    if white {
        Square::H1
    } else {
        Square::H8
    }
}

/// クイーンサイドのルーク初期位置
#[inline]
pub(crate) const fn queenside_rook_from(white: bool) -> Square {
    if white {
        Square::A1
    } else {
        Square::A8
    }
}

/// キングサイドキャスリング後のルーク位置
#[inline]
pub(crate) const fn kingside_rook_to(white: bool) -> Square {
    if white {
        Square::F1
    } else {
        Square::F8
    }
}

/// クイーンサイドキャスリング後のルーク位置
#[inline]
pub(crate) const fn queenside_rook_to(white: bool) -> Square {
    if white {
        Square::D1
    } else {
        Square::D8
    }
}
