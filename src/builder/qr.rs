use std::ops::Deref;

use tracing::debug;

use super::render::ModuleMatrix;
use crate::common::bit_utils::BitStream;
use crate::common::iter::EncRegionIter;
use crate::common::mask::MaskPattern;
use crate::common::metadata::{
    format_info, Color, ECLevel, Version, FORMAT_INFO_BIT_LEN, VERSION_INFO_BIT_LEN,
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Version(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

/// Module grid of a symbol under construction. Rows and columns accept
/// negative indices counted from the far edge.
#[derive(Debug, Clone)]
pub struct QR {
    grid: Vec<Module>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub(crate) fn new(ver: Version, ecl: ECLevel) -> Self {
        let w = ver.width();
        Self { grid: vec![Module::Empty; w * w], w, ver, ecl, mask: None }
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    /// True for cells fixed by a structural pattern, format or version info.
    pub fn is_function(&self, r: i16, c: i16) -> bool {
        matches!(self.get(r, c), Module::Func(_) | Module::Format(_) | Module::Version(_))
    }

    pub fn to_matrix(&self) -> ModuleMatrix {
        ModuleMatrix::with_quiet_zone(self.w, self.grid.iter().map(|m| **m == Color::Dark))
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Version(Color::Dark) => 'v',
                    Module::Version(Color::Light) => 'V',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "row should be greater than or equal to w");
        debug_assert!(-w <= c && c < w, "column should be greater than or equal to w");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub(crate) fn get_mut(&mut self, r: i16, c: i16) -> &mut Module {
        let index = self.coord_to_index(r, c);
        &mut self.grid[index]
    }

    pub(crate) fn set(&mut self, r: i16, c: i16, module: Module) {
        *self.get_mut(r, c) = module;
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // Draws the 7x7 pattern centred at (r, c) with its separator on the inner sides
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_left, dr_right) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_top, dc_bottom) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_left..=dr_right {
            for j in dc_top..=dc_bottom {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (4 | -4, _) | (_, 4 | -4) => Module::Func(Color::Light),
                        (3 | -3, _) | (_, 3 | -3) => Module::Func(Color::Dark),
                        (2 | -2, _) | (_, 2 | -2) => Module::Func(Color::Light),
                        _ => Module::Func(Color::Dark),
                    },
                );
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_pattern(&mut self) {
        let w = self.w as i16;
        let (off, last) = (6, w - 9);
        self.draw_line(off, 8, off, last);
        self.draw_line(8, off, last, off);
    }

    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        if r1 == r2 {
            for j in c1..=c2 {
                let m =
                    if j & 1 == 0 { Module::Func(Color::Dark) } else { Module::Func(Color::Light) };
                self.set(r1, j, m);
            }
        } else {
            for i in r1..=r2 {
                let m =
                    if i & 1 == 0 { Module::Func(Color::Dark) } else { Module::Func(Color::Light) };
                self.set(i, c1, m);
            }
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        for &r in poses {
            for &c in poses {
                self.draw_alignment_pattern_at(r, c)
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        let w = self.w as i16;
        // Centres that would overlap a finder pattern
        if (r == 6 && (c == 6 || c - w == -7)) || (r - w == -7 && c == 6) {
            return;
        }
        for i in -2..=2 {
            for j in -2..=2 {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Module::Func(Color::Dark),
                        _ => Module::Func(Color::Light),
                    },
                )
            }
        }
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl QR {
    pub(crate) fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_timing_pattern();
        self.draw_alignment_patterns();
        self.set(-8, 8, Module::Func(Color::Dark));
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl QR {
    fn reserve_format_area(&mut self) {
        self.draw_format_info((1 << FORMAT_INFO_BIT_LEN) - 1);
    }

    fn draw_format_info(&mut self, format_info: u32) {
        self.draw_number(
            format_info,
            FORMAT_INFO_BIT_LEN,
            Module::Format(Color::Light),
            Module::Format(Color::Dark),
            &FORMAT_INFO_COORDS_MAIN,
        );
        self.draw_number(
            format_info,
            FORMAT_INFO_BIT_LEN,
            Module::Format(Color::Light),
            Module::Format(Color::Dark),
            &FORMAT_INFO_COORDS_SIDE,
        );
    }

    fn draw_version_info(&mut self) {
        let Some(ver_info) = self.ver.info() else {
            return;
        };
        self.draw_number(
            ver_info,
            VERSION_INFO_BIT_LEN,
            Module::Version(Color::Light),
            Module::Version(Color::Dark),
            &VERSION_INFO_COORDS_BL,
        );
        self.draw_number(
            ver_info,
            VERSION_INFO_BIT_LEN,
            Module::Version(Color::Light),
            Module::Version(Color::Dark),
            &VERSION_INFO_COORDS_TR,
        );
    }

    // Coordinates are listed from the most significant bit down
    fn draw_number(
        &mut self,
        number: u32,
        bit_len: usize,
        off_clr: Module,
        on_clr: Module,
        coords: &[(i16, i16)],
    ) {
        let mut mask = 1 << (bit_len - 1);
        for (r, c) in coords {
            if number & mask == 0 {
                self.set(*r, *c, off_clr);
            } else {
                self.set(*r, *c, on_clr);
            }
            mask >>= 1;
        }
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl QR {
    pub(crate) fn draw_encoding_region(&mut self, payload: &[u8]) {
        self.reserve_format_area();
        self.draw_version_info();
        self.draw_payload(payload);

        debug_assert!(!self.grid.contains(&Module::Empty), "Empty module found in debug");
    }

    /// Places the payload bits along the zigzag walk, skipping function cells.
    /// Cells left once the bits run out stay light.
    fn draw_payload(&mut self, payload: &[u8]) {
        let mut coords = EncRegionIter::new(self.ver);
        for bit in BitStream::from(payload) {
            let module = Module::Data(Color::from(bit));
            for (r, c) in coords.by_ref() {
                if matches!(self.get(r, c), Module::Empty) {
                    self.set(r, c, module);
                    break;
                }
            }
        }
        for (r, c) in coords {
            if matches!(self.get(r, c), Module::Empty) {
                self.set(r, c, Module::Data(Color::Light));
            }
        }
        debug!(bits = payload.len() * 8, "Placed payload");
    }

    /// Flips the data cells selected by `pattern` and writes the matching
    /// format info. A mask applied earlier is removed first.
    pub(crate) fn apply_mask(&mut self, pattern: MaskPattern) {
        if let Some(prev) = self.mask.take() {
            debug!(prev = *prev, "Removing previous mask");
            self.flip_data(prev);
        }

        self.mask = Some(pattern);
        self.flip_data(pattern);
        let format_info = format_info(self.ecl, pattern);
        self.draw_format_info(format_info as u32);
    }

    fn flip_data(&mut self, pattern: MaskPattern) {
        let mask_fn = pattern.mask_functions();
        let w = self.w as i16;
        for r in 0..w {
            for c in 0..w {
                if mask_fn(r, c) {
                    if let Module::Data(clr) = self.get(r, c) {
                        self.set(r, c, Module::Data(!clr))
                    }
                }
            }
        }
    }
}


// Global constants
//------------------------------------------------------------------------------

static FORMAT_INFO_COORDS_MAIN: [(i16, i16); 15] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

static FORMAT_INFO_COORDS_SIDE: [(i16, i16); 15] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];

static VERSION_INFO_COORDS_BL: [(i16, i16); 18] = [
    (-9, 5),
    (-10, 5),
    (-11, 5),
    (-9, 4),
    (-10, 4),
    (-11, 4),
    (-9, 3),
    (-10, 3),
    (-11, 3),
    (-9, 2),
    (-10, 2),
    (-11, 2),
    (-9, 1),
    (-10, 1),
    (-11, 1),
    (-9, 0),
    (-10, 0),
    (-11, 0),
];

static VERSION_INFO_COORDS_TR: [(i16, i16); 18] = [
    (5, -9),
    (5, -10),
    (5, -11),
    (4, -9),
    (4, -10),
    (4, -11),
    (3, -9),
    (3, -10),
    (3, -11),
    (2, -9),
    (2, -10),
    (2, -11),
    (1, -9),
    (1, -10),
    (1, -11),
    (0, -9),
    (0, -10),
    (0, -11),
];
