use super::metadata::Version;

// Zigzag walk over the symbol for placing codeword bits
//------------------------------------------------------------------------------

/// Visits every cell of the symbol in placement order: column pairs from the
/// right edge leftwards, alternating upward and downward, right cell before
/// left cell, skipping the vertical timing column entirely. Callers skip the
/// cells already taken by function patterns.
pub struct EncRegionIter {
    r: i16,
    c: i16,
    width: i16,
}

const VERT_TIMING_COL: i16 = 6;

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { r: w - 1, c: w - 1, width: w }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.c < 0 {
            return None;
        }
        // Columns left of the timing column are shifted by one to keep pairs aligned
        let adjusted_col = if self.c <= VERT_TIMING_COL { self.c + 1 } else { self.c };
        let res = (self.r, self.c);
        let col_type = (self.width - adjusted_col) % 4;
        match col_type {
            2 if self.r > 0 => {
                self.r -= 1;
                self.c += 1;
            }
            0 if self.r < self.width - 1 => {
                self.r += 1;
                self.c += 1;
            }
            0 | 2 if self.c == VERT_TIMING_COL + 1 => {
                self.c -= 2;
            }
            _ => {
                self.c -= 1;
            }
        }
        Some(res)
    }
}
