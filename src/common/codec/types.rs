use std::str::FromStr;

use encoding_rs::SHIFT_JIS;

use crate::common::error::{QRError, QRResult};

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
    Kanji = 0b1000,
}

impl FromStr for Mode {
    type Err = QRError;
    fn from_str(s: &str) -> QRResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numeric" => Ok(Self::Numeric),
            "alphanumeric" => Ok(Self::Alphanumeric),
            "byte" => Ok(Self::Byte),
            "kanji" => Ok(Self::Kanji),
            _ => Err(QRError::InvalidMode),
        }
    }
}

static ALPHANUMERIC_SPECIALS: [char; 9] = [' ', '$', '%', '*', '+', '-', '.', '/', ':'];

impl Mode {
    #[inline]
    fn numeric_digit(ch: char) -> u16 {
        debug_assert!(Mode::Numeric.contains(ch), "Invalid numeric data: {ch}");
        ch as u16 - '0' as u16
    }

    #[inline]
    fn alphanumeric_digit(ch: char) -> u16 {
        debug_assert!(Mode::Alphanumeric.contains(ch), "Invalid alphanumeric data: {ch}");
        match ch {
            '0'..='9' => ch as u16 - '0' as u16,
            'A'..='Z' => ch as u16 - 'A' as u16 + 10,
            _ => ALPHANUMERIC_SPECIALS.iter().position(|&s| s == ch).map_or(0, |i| 36 + i as u16),
        }
    }

    /// 13-bit Kanji value of a character, if Shift-JIS maps it into one of the
    /// two double-byte ranges QR supports.
    pub fn kanji_value(ch: char) -> Option<u16> {
        let mut buf = [0; 4];
        let (bytes, _, has_err) = SHIFT_JIS.encode(ch.encode_utf8(&mut buf));
        if has_err || bytes.len() != 2 {
            return None;
        }
        let sjw = u16::from_be_bytes([bytes[0], bytes[1]]);
        let offset = match sjw {
            0x8140..=0x9FFC => sjw - 0x8140,
            0xE040..=0xEBBF => sjw - 0xC140,
            _ => return None,
        };
        Some((offset >> 8) * 0xC0 + (offset & 0xFF))
    }

    pub fn contains(&self, ch: char) -> bool {
        match self {
            Self::Numeric => ch.is_ascii_digit(),
            Self::Alphanumeric => {
                ch.is_ascii_digit()
                    || ch.is_ascii_uppercase()
                    || ALPHANUMERIC_SPECIALS.contains(&ch)
            }
            Self::Byte => (ch as u32) <= 0xFF,
            Self::Kanji => Self::kanji_value(ch).is_some(),
        }
    }

    /// Packs up to 3 digits, 2 alphanumerics, or a single byte/kanji character.
    pub fn encode_chunk(&self, chunk: &[char]) -> QRResult<u16> {
        let len = chunk.len();
        match self {
            Self::Numeric => {
                debug_assert!(len <= 3, "Data is too long for numeric conversion: {len}");
                Ok(chunk.iter().fold(0_u16, |n, ch| n * 10 + Self::numeric_digit(*ch)))
            }
            Self::Alphanumeric => {
                debug_assert!(len <= 2, "Data is too long for alphanumeric conversion: {len}");
                Ok(chunk.iter().fold(0_u16, |n, ch| n * 45 + Self::alphanumeric_digit(*ch)))
            }
            Self::Byte => {
                debug_assert!(len == 1, "Data is too long for byte conversion: {len}");
                Ok(chunk[0] as u16)
            }
            Self::Kanji => {
                debug_assert!(len == 1, "Data is too long for kanji conversion: {len}");
                let ch = chunk[0];
                Self::kanji_value(ch).ok_or(QRError::InvalidChar { ch, mode: *self })
            }
        }
    }

    /// Bit length of `len` characters packed in this mode.
    pub fn encoded_len(&self, len: usize) -> usize {
        match *self {
            Self::Numeric => (len * 10).div_ceil(3),
            Self::Alphanumeric => (len * 11).div_ceil(2),
            Self::Byte => len * 8,
            Self::Kanji => len * 13,
        }
    }
}

#[cfg(test)]
impl Mode {
    fn char_from_digit(&self, digit: u16) -> char {
        match (self, digit) {
            (_, 0..=9) => char::from(b'0' + digit as u8),
            (Self::Alphanumeric, 10..=35) => char::from(b'A' + (digit - 10) as u8),
            (Self::Alphanumeric, 36..=44) => ALPHANUMERIC_SPECIALS[(digit - 36) as usize],
            _ => unreachable!("Invalid {self:?} digit {digit}"),
        }
    }

    pub fn decode_chunk(&self, data: u16, bit_len: usize) -> Vec<char> {
        match self {
            Self::Numeric => {
                let len = bit_len / 3;
                let digit = |i: usize| data / 10u16.pow(i as u32) % 10;
                (0..len).rev().map(|i| self.char_from_digit(digit(i))).collect()
            }
            Self::Alphanumeric => {
                let len = bit_len / 5;
                let digit = |i: usize| data / 45u16.pow(i as u32) % 45;
                (0..len).rev().map(|i| self.char_from_digit(digit(i))).collect()
            }
            Self::Byte => vec![char::from(data as u8)],
            Self::Kanji => {
                let offset = ((data / 0xC0) << 8) | (data % 0xC0);
                let sjw = if offset + 0x8140 <= 0x9FFC { offset + 0x8140 } else { offset + 0xC140 };
                let bytes = sjw.to_be_bytes();
                let (decoded, _, _) = SHIFT_JIS.decode(&bytes);
                decoded.chars().collect()
            }
        }
    }
}


// Mode detection
//------------------------------------------------------------------------------

/// Smallest single mode able to hold every character of `text`.
pub fn detect_best_mode(text: &str) -> Mode {
    [Mode::Numeric, Mode::Alphanumeric, Mode::Byte]
        .into_iter()
        .find(|mode| text.chars().all(|ch| mode.contains(ch)))
        .unwrap_or(Mode::Kanji)
}
