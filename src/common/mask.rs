use std::ops::Deref;

use tracing::trace;

use super::error::{QRError, QRResult};
use super::metadata::Color;
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern > 7 {
            return Err(QRError::InvalidMaskingPattern(pattern));
        }
        Ok(Self(pattern))
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).map(Self)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (p & 1) + (p % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        ((p & 1) + (p % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (((r + c) & 1) as i32 + (p % 3)) & 1 == 0
    }
}

impl MaskPattern {
    /// Predicate over (row, col); true means the data module is flipped.
    pub fn mask_functions(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            _ => mask_functions::meadow,
        }
    }
}


// Mask selection
//------------------------------------------------------------------------------

/// Scores every candidate on its own copy of `qr` and returns the one with the
/// lowest penalty. Ties keep the lower pattern id.
pub fn select_best_mask(qr: &QR) -> MaskPattern {
    let mut best = (MaskPattern(0), u32::MAX);
    for mask in MaskPattern::all() {
        let mut candidate = qr.clone();
        candidate.apply_mask(mask);
        let penalty = compute_total_penalty(&candidate);
        trace!(mask = *mask, penalty, "Scored mask");
        if penalty < best.1 {
            best = (mask, penalty);
        }
    }
    best.0
}

pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let best_mask = select_best_mask(qr);
    qr.apply_mask(best_mask);
    best_mask
}

// Penalty rules
//------------------------------------------------------------------------------

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let adj_pen = compute_adjacent_penalty(qr);
    let blk_pen = compute_block_penalty(qr);
    let fp_pen = compute_finder_pattern_penalty(qr);
    let bal_pen = compute_balance_penalty(qr);
    adj_pen + blk_pen + fp_pen + bal_pen
}

// Rule 1
fn compute_adjacent_penalty(qr: &QR) -> u32 {
    let w = qr.width() as i16;
    let run_penalty = |len: u32| if len >= 5 { len - 2 } else { 0 };
    let mut pen = 0;
    for i in 0..w {
        let (mut row_clr, mut row_run) = (*qr.get(i, 0), 0);
        let (mut col_clr, mut col_run) = (*qr.get(0, i), 0);
        for j in 0..w {
            let clr = *qr.get(i, j);
            if clr == row_clr {
                row_run += 1;
            } else {
                pen += run_penalty(row_run);
                (row_clr, row_run) = (clr, 1);
            }

            let clr = *qr.get(j, i);
            if clr == col_clr {
                col_run += 1;
            } else {
                pen += run_penalty(col_run);
                (col_clr, col_run) = (clr, 1);
            }
        }
        pen += run_penalty(row_run) + run_penalty(col_run);
    }
    pen
}

// Rule 2
fn compute_block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = *qr.get(r, c);
            if clr == *qr.get(r + 1, c) && clr == *qr.get(r, c + 1) && clr == *qr.get(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

const D: Color = Color::Dark;
const L: Color = Color::Light;

static FINDER_LIKE_PATTERNS: [[Color; 11]; 2] =
    [[D, L, D, D, D, L, D, L, L, L, L], [L, L, L, L, D, L, D, D, D, L, D]];

// Rule 3
fn compute_finder_pattern_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for i in 0..w {
        for j in 0..=w - 11 {
            for pattern in FINDER_LIKE_PATTERNS.iter() {
                if (0..11).all(|k| *qr.get(i, j + k) == pattern[k as usize]) {
                    pen += 40;
                }
                if (0..11).all(|k| *qr.get(j + k, i) == pattern[k as usize]) {
                    pen += 40;
                }
            }
        }
    }
    pen
}

// Rule 4
fn compute_balance_penalty(qr: &QR) -> u32 {
    let dark_cnt = qr.count_dark_modules();
    let w = qr.width();
    let dark_percent = (dark_cnt * 100 / (w * w)) as i32;
    (10 * (dark_percent / 5 - 10).abs()) as u32
}
