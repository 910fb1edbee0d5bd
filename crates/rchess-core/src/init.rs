//! 静的テーブルの初期化
//!
//! Zobristテーブルと近接駒の利きテーブルはconstで構築されるため初期化は
//! 不要。遅延構築されるのは遠方駒の利きテーブルだけで、最初の利用時に
//! `OnceLock` 越しに一度だけ構築される。起動時に構築を済ませたいホストは
//! この関数を呼ぶ。

use std::sync::Once;

static INIT_ONCE: Once = Once::new();

/// 全ての静的テーブルを一度だけ初期化する
///
/// 何度呼んでも、複数スレッドから同時に呼んでも安全。
pub fn init_tables_once() {
    INIT_ONCE.call_once(|| {
        crate::bitboard::init_sliders();
        log::debug!("static tables initialized");
    });
}
