use std::fmt::{Display, Error, Formatter};
use std::ops::{Deref, Not};
use std::str::FromStr;

use super::codec::Mode;
use super::error::{QRError, QRResult};
use super::mask::MaskPattern;
use super::version_db::{
    ALIGNMENT_PATTERN_POSITIONS, CHAR_COUNT_BITS, DATA_CAPACITY, EC_BLOCK_TABLE, VERSION_INFOS,
};

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(usize);

impl Version {
    pub fn new(version: usize) -> QRResult<Self> {
        if !(1..=40).contains(&version) {
            return Err(QRError::InvalidVersion(version));
        }
        Ok(Self(version))
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    pub fn mode_bits(self) -> usize {
        4
    }

    pub fn char_cnt_bits(self, mode: Mode) -> usize {
        let band = match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        let mode_index = match mode {
            Mode::Numeric => 0,
            Mode::Alphanumeric => 1,
            Mode::Byte => 2,
            Mode::Kanji => 3,
        };
        CHAR_COUNT_BITS[mode_index][band]
    }

    pub fn data_capacity(self, ecl: ECLevel) -> usize {
        DATA_CAPACITY[self.0 - 1][ecl as usize]
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        self.data_capacity(ecl) << 3
    }

    pub fn ec_blocks(self, ecl: ECLevel) -> BlockInfo {
        let (ec_per_block, g1_cnt, g1_sz, g2_cnt, g2_sz) = EC_BLOCK_TABLE[self.0 - 1][ecl as usize];
        let group2 =
            (g2_cnt > 0).then_some(BlockGroup { num_blocks: g2_cnt, data_per_block: g2_sz });
        BlockInfo {
            ec_per_block,
            group1: BlockGroup { num_blocks: g1_cnt, data_per_block: g1_sz },
            group2,
        }
    }

    // Data and ec codewords together, independent of the level
    pub fn total_codewords(self) -> usize {
        let info = self.ec_blocks(ECLevel::L);
        info.data_codewords() + info.ec_codewords()
    }

    // Modules left over in the encoding region after the last codeword
    pub fn remainder_bits(self) -> usize {
        match self.0 {
            2..=6 => 7,
            14..=20 | 28..=34 => 3,
            21..=27 => 4,
            _ => 0,
        }
    }

    pub fn alignment_pattern(self) -> &'static [i16] {
        ALIGNMENT_PATTERN_POSITIONS[self.0 - 1]
    }

    pub fn info(self) -> Option<u32> {
        match self.0 {
            7..=40 => Some(VERSION_INFOS[self.0 - 7]),
            _ => None,
        }
    }
}

impl Default for Version {
    fn default() -> Self {
        Self(4)
    }
}

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Version {
    type Err = QRError;
    fn from_str(s: &str) -> QRResult<Self> {
        let version = s.trim().parse::<usize>().map_err(|_| QRError::InvalidVersion(0))?;
        Self::new(version)
    }
}

#[cfg(test)]
mod version_tests {
    use test_case::test_case;

    use super::{ECLevel, Version};
    use crate::common::codec::Mode;
    use crate::common::error::QRError;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(Version::new(0), Err(QRError::InvalidVersion(0)));
        assert_eq!(Version::new(41), Err(QRError::InvalidVersion(41)));
        assert_eq!(*Version::new(40).unwrap(), 40);
        assert_eq!("7".parse::<Version>(), Version::new(7));
    }

    #[test_case(1, 21)]
    #[test_case(4, 33)]
    #[test_case(40, 177)]
    fn test_width(ver: usize, exp_width: usize) {
        assert_eq!(Version::new(ver).unwrap().width(), exp_width);
    }

    #[test_case(9, Mode::Numeric, 10)]
    #[test_case(10, Mode::Numeric, 12)]
    #[test_case(27, Mode::Numeric, 14)]
    #[test_case(1, Mode::Alphanumeric, 9)]
    #[test_case(26, Mode::Alphanumeric, 11)]
    #[test_case(40, Mode::Alphanumeric, 13)]
    #[test_case(9, Mode::Byte, 8)]
    #[test_case(10, Mode::Byte, 16)]
    #[test_case(40, Mode::Byte, 16)]
    #[test_case(1, Mode::Kanji, 8)]
    #[test_case(20, Mode::Kanji, 10)]
    #[test_case(30, Mode::Kanji, 12)]
    fn test_char_cnt_bits(ver: usize, mode: Mode, exp_bits: usize) {
        assert_eq!(Version::new(ver).unwrap().char_cnt_bits(mode), exp_bits);
    }

    #[test]
    fn test_block_sums_match_capacity() {
        for v in 1..=40 {
            let ver = Version::new(v).unwrap();
            for ecl in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
                let info = ver.ec_blocks(ecl);
                assert_eq!(info.data_codewords(), ver.data_capacity(ecl), "{v} {ecl:?}");
                assert_eq!(
                    info.data_codewords() + info.ec_codewords(),
                    ver.total_codewords(),
                    "{v} {ecl:?}"
                );
                if let Some(g2) = info.group2 {
                    assert_eq!(g2.data_per_block, info.group1.data_per_block + 1, "{v} {ecl:?}");
                }
            }
        }
    }

    #[test]
    fn test_total_codewords() {
        assert_eq!(Version::new(1).unwrap().total_codewords(), 26);
        assert_eq!(Version::new(7).unwrap().total_codewords(), 196);
        assert_eq!(Version::new(40).unwrap().total_codewords(), 3706);
    }

    #[test]
    fn test_alignment_pattern() {
        assert!(Version::new(1).unwrap().alignment_pattern().is_empty());
        assert_eq!(Version::new(2).unwrap().alignment_pattern(), &[6, 18]);
        assert_eq!(Version::new(40).unwrap().alignment_pattern(), &[6, 30, 58, 86, 114, 142, 170]);
        for v in 2..=40 {
            let ver = Version::new(v).unwrap();
            let last = *ver.alignment_pattern().last().unwrap();
            assert_eq!(last as usize, ver.width() - 7, "{v}");
        }
    }

    // BCH(18,6) with generator x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
    fn compute_version_info(v: u32) -> u32 {
        let mut rem = v << 12;
        for i in (12..18).rev() {
            if rem & (1 << i) != 0 {
                rem ^= 0x1F25 << (i - 12);
            }
        }
        (v << 12) | rem
    }

    #[test]
    fn test_version_info() {
        for v in 1..=6 {
            assert_eq!(Version::new(v).unwrap().info(), None);
        }
        assert_eq!(Version::new(7).unwrap().info(), Some(0x07C94));
        for v in 7..=40 {
            let exp = compute_version_info(v as u32);
            assert_eq!(Version::new(v).unwrap().info(), Some(exp), "{v}");
        }
    }
}

// Block structure
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct BlockGroup {
    pub num_blocks: usize,
    pub data_per_block: usize,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct BlockInfo {
    pub ec_per_block: usize,
    pub group1: BlockGroup,
    pub group2: Option<BlockGroup>,
}

impl BlockInfo {
    pub fn total_blocks(&self) -> usize {
        self.group1.num_blocks + self.group2.map_or(0, |g| g.num_blocks)
    }

    pub fn data_codewords(&self) -> usize {
        self.groups().map(|g| g.num_blocks * g.data_per_block).sum()
    }

    pub fn ec_codewords(&self) -> usize {
        self.ec_per_block * self.total_blocks()
    }

    pub fn groups(&self) -> impl Iterator<Item = BlockGroup> {
        std::iter::once(self.group1).chain(self.group2)
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    #[default]
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    // 2-bit indicator carried in the format information
    pub fn format_bits(self) -> u16 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }
}

impl FromStr for ECLevel {
    type Err = QRError;
    fn from_str(s: &str) -> QRResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            _ => Err(QRError::InvalidECLevel),
        }
    }
}

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl From<bool> for Color {
    fn from(bit: bool) -> Self {
        if bit {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

// Format info
//------------------------------------------------------------------------------

pub const FORMAT_INFO_BIT_LEN: usize = 15;

pub const VERSION_INFO_BIT_LEN: usize = 18;

const FORMAT_GENERATOR: u16 = 0b101_0011_0111;

const FORMAT_MASK: u16 = 0b101_0100_0001_0010;

/// BCH(15,5) coded format information for a level and mask, already XORed
/// with the fixed format mask.
pub fn format_info(ecl: ECLevel, mask: MaskPattern) -> u16 {
    let data = (ecl.format_bits() << 3) | *mask as u16;
    let mut rem = data << 10;
    for i in (10..15).rev() {
        if rem & (1 << i) != 0 {
            rem ^= FORMAT_GENERATOR << (i - 10);
        }
    }
    ((data << 10) | rem) ^ FORMAT_MASK
}

/// [`format_info`] as a 15 character binary string, most significant bit first.
pub fn format_info_string(ecl: ECLevel, mask: MaskPattern) -> String {
    format!("{:015b}", format_info(ecl, mask))
}
