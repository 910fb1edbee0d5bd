//! 遠方駒（ビショップ、ルーク、クイーン）の利き計算
//!
//! テーブル構成は square ごとにブロッカーマスク内の占有ビットを密に詰めた
//! キーで引く方式（ルーク 64x4096、ビショップ 64x512）。キー抽出は BMI2 が
//! 有効な x86_64 では PEXT 命令、それ以外では固定シフトの magic 乗算を使う。
//! magic 定数は初期化時に疎な乱数で探索する。

use std::sync::OnceLock;
use std::time::Instant;

use crate::types::Square;

use super::Bitboard;

/// ルーク用インデックスのビット数（最大ブロッカーマスクのpopcount）
const ROOK_BITS: u32 = 12;
/// ビショップ用インデックスのビット数
const BISHOP_BITS: u32 = 9;

const ROOK_DIRS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
const USE_PEXT: bool = true;
#[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
const USE_PEXT: bool = false;

/// 高速64bit疑似乱数生成器（Stockfish由来）
///
/// sparse_rand64 は立っているビットの少ない乱数を返す。magic探索は
/// 疎な候補の方がはるかに早く収束する。
struct Prng {
    seed: u64,
}

impl Prng {
    const fn new(seed: u64) -> Prng {
        debug_assert!(seed != 0);
        Prng { seed }
    }

    fn rand64(&mut self) -> u64 {
        self.seed ^= self.seed >> 12;
        self.seed ^= self.seed << 25;
        self.seed ^= self.seed >> 27;
        self.seed.wrapping_mul(2685821657736338717)
    }

    fn sparse_rand64(&mut self) -> u64 {
        self.rand64() & self.rand64() & self.rand64()
    }
}

struct SliderTable {
    rook_masks: [u64; Square::NUM],
    bishop_masks: [u64; Square::NUM],
    rook_magics: [u64; Square::NUM],
    bishop_magics: [u64; Square::NUM],
    rook_attacks: Vec<Bitboard>,
    bishop_attacks: Vec<Bitboard>,
}

static SLIDER_ATTACKS: OnceLock<SliderTable> = OnceLock::new();

fn slider_table() -> &'static SliderTable {
    SLIDER_ATTACKS.get_or_init(SliderTable::new)
}

/// 遠方駒テーブルを構築する（冪等、スレッド安全）
pub(crate) fn init_sliders() {
    let _ = slider_table();
}

impl SliderTable {
    fn new() -> Self {
        let start = Instant::now();

        let mut table = SliderTable {
            rook_masks: [0; Square::NUM],
            bishop_masks: [0; Square::NUM],
            rook_magics: [0; Square::NUM],
            bishop_magics: [0; Square::NUM],
            rook_attacks: vec![Bitboard::EMPTY; Square::NUM << ROOK_BITS],
            bishop_attacks: vec![Bitboard::EMPTY; Square::NUM << BISHOP_BITS],
        };

        for sq in Square::all() {
            table.rook_masks[sq.index()] = blocker_mask(sq, &ROOK_DIRS);
            table.bishop_masks[sq.index()] = blocker_mask(sq, &BISHOP_DIRS);
        }

        if !USE_PEXT {
            let mut rng = Prng::new(1070372);
            for sq in Square::all() {
                table.rook_magics[sq.index()] =
                    find_magic(sq, table.rook_masks[sq.index()], ROOK_BITS, &ROOK_DIRS, &mut rng);
                table.bishop_magics[sq.index()] = find_magic(
                    sq,
                    table.bishop_masks[sq.index()],
                    BISHOP_BITS,
                    &BISHOP_DIRS,
                    &mut rng,
                );
            }
        }

        for sq in Square::all() {
            let mask = table.rook_masks[sq.index()];
            let mut occ = 0u64;
            loop {
                let idx = table.rook_index(sq.index(), occ);
                table.rook_attacks[(sq.index() << ROOK_BITS) + idx] =
                    Bitboard::new(sliding_attack(sq, occ, &ROOK_DIRS));
                occ = occ.wrapping_sub(mask) & mask;
                if occ == 0 {
                    break;
                }
            }

            let mask = table.bishop_masks[sq.index()];
            let mut occ = 0u64;
            loop {
                let idx = table.bishop_index(sq.index(), occ);
                table.bishop_attacks[(sq.index() << BISHOP_BITS) + idx] =
                    Bitboard::new(sliding_attack(sq, occ, &BISHOP_DIRS));
                occ = occ.wrapping_sub(mask) & mask;
                if occ == 0 {
                    break;
                }
            }
        }

        log::debug!(
            "slider attack tables built in {:?} (pext: {})",
            start.elapsed(),
            USE_PEXT
        );

        table
    }

    #[inline]
    fn rook_index(&self, sq: usize, occupied: u64) -> usize {
        extract_index(occupied, self.rook_masks[sq], self.rook_magics[sq], ROOK_BITS)
    }

    #[inline]
    fn bishop_index(&self, sq: usize, occupied: u64) -> usize {
        extract_index(occupied, self.bishop_masks[sq], self.bishop_magics[sq], BISHOP_BITS)
    }
}

/// PEXT経路: マスク内の占有ビットをそのまま密に詰める
#[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
#[inline]
fn extract_index(occupied: u64, mask: u64, _magic: u64, _bits: u32) -> usize {
    // SAFETY: BMI2はコンパイル時に有効化されている
    unsafe { std::arch::x86_64::_pext_u64(occupied, mask) as usize }
}

/// magic経路: 固定シフトのmagic乗算でキーを作る
#[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
#[inline]
fn extract_index(occupied: u64, mask: u64, magic: u64, bits: u32) -> usize {
    ((occupied & mask).wrapping_mul(magic) >> (64 - bits)) as usize
}

/// ブロッカーマスクを計算する
///
/// 各方向の光線から、自マスと光線末端の盤端マスを除いた内側のマス集合。
fn blocker_mask(sq: Square, dirs: &[(i32, i32)]) -> u64 {
    let mut mask = 0u64;
    for &(df, dr) in dirs {
        let mut file = sq.file() as i32 + df;
        let mut rank = sq.rank() as i32 + dr;
        // 次の一歩も盤内であるマスのみ含める（末端の盤端は除外）
        while (0..8).contains(&(file + df)) && (0..8).contains(&(rank + dr)) {
            mask |= 1u64 << (file + 8 * rank);
            file += df;
            rank += dr;
        }
    }
    mask
}

/// 占有を考慮した利きを逐次計算する（テーブル構築と検証用）
///
/// 各方向に最初のブロッカーまで伸ばし、ブロッカーのマス自体は含める。
fn sliding_attack(sq: Square, occupied: u64, dirs: &[(i32, i32)]) -> u64 {
    let mut attack = 0u64;
    for &(df, dr) in dirs {
        let mut file = sq.file() as i32 + df;
        let mut rank = sq.rank() as i32 + dr;
        while (0..8).contains(&file) && (0..8).contains(&rank) {
            let spot = 1u64 << (file + 8 * rank);
            attack |= spot;
            if occupied & spot != 0 {
                break;
            }
            file += df;
            rank += dr;
        }
    }
    attack
}

/// 固定シフトで衝突しないmagic定数を探索する
///
/// 同じ利きに写る衝突（constructive collision）は許容する。
fn find_magic(sq: Square, mask: u64, bits: u32, dirs: &[(i32, i32)], rng: &mut Prng) -> u64 {
    // マスクの全部分集合とその利きを列挙しておく
    let mut occupancies = Vec::with_capacity(1 << mask.count_ones());
    let mut occ = 0u64;
    loop {
        occupancies.push((occ, sliding_attack(sq, occ, dirs)));
        occ = occ.wrapping_sub(mask) & mask;
        if occ == 0 {
            break;
        }
    }

    let mut used = vec![0u64; 1 << bits];
    let mut epoch = vec![0u32; 1 << bits];
    let mut current = 0u32;

    loop {
        // マスク上位バイトに十分なビットが乗らない候補は弾く
        let magic = rng.sparse_rand64();
        if (mask.wrapping_mul(magic) >> 56).count_ones() < 6 {
            continue;
        }

        current += 1;
        let mut ok = true;
        for &(occ, attack) in &occupancies {
            let idx = ((occ & mask).wrapping_mul(magic) >> (64 - bits)) as usize;
            if epoch[idx] != current {
                epoch[idx] = current;
                used[idx] = attack;
            } else if used[idx] != attack {
                ok = false;
                break;
            }
        }
        if ok {
            return magic;
        }
    }
}

/// ビショップの利きを計算
///
/// # Arguments
/// * `sq` - 駒の位置
/// * `occupied` - 盤上の駒があるマスのBitboard
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    let table = slider_table();
    let idx = table.bishop_index(sq.index(), occupied.bits());
    table.bishop_attacks[(sq.index() << BISHOP_BITS) + idx]
}

/// ルークの利きを計算
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    let table = slider_table();
    let idx = table.rook_index(sq.index(), occupied.bits());
    table.rook_attacks[(sq.index() << ROOK_BITS) + idx]
}

/// クイーンの利きを計算（ビショップ + ルーク）
#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}
