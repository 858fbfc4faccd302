use crate::common::bit_utils::BitStream;
use crate::common::codec::Mode;
use crate::common::metadata::Version;

// Reader for encoded data
//------------------------------------------------------------------------------

/// Reads back the single segment written by the encoder. Returns `None` if the
/// stream is truncated or carries an unknown mode indicator.
pub fn decode(data: &[u8], ver: Version) -> Option<(Mode, String)> {
    let mut inp = BitStream::from(data);
    let (mode, char_cnt) = take_header(&mut inp, ver)?;
    let chunk_sz = match mode {
        Mode::Numeric => 3,
        Mode::Alphanumeric => 2,
        Mode::Byte | Mode::Kanji => 1,
    };

    let mut out = String::with_capacity(char_cnt);
    let mut remaining = char_cnt;
    while remaining > 0 {
        let n = remaining.min(chunk_sz);
        let bit_len = mode.encoded_len(n);
        let chunk = inp.take_bits(bit_len)?;
        out.extend(mode.decode_chunk(chunk, bit_len));
        remaining -= n;
    }
    Some((mode, out))
}

fn take_header(inp: &mut BitStream, ver: Version) -> Option<(Mode, usize)> {
    let mode = match inp.take_bits(ver.mode_bits())? {
        0b0001 => Mode::Numeric,
        0b0010 => Mode::Alphanumeric,
        0b0100 => Mode::Byte,
        0b1000 => Mode::Kanji,
        _ => return None,
    };
    let char_cnt = inp.take_bits(ver.char_cnt_bits(mode))?;
    Some((mode, char_cnt as usize))
}

#[cfg(test)]
mod reader_tests {
    use super::{decode, take_header};
    use crate::common::bit_utils::BitStream;
    use crate::common::codec::Mode;
    use crate::common::metadata::Version;

    #[test]
    fn test_take_header_v1() {
        let ver = Version::new(1).unwrap();
        let mut bs = BitStream::from(&[0b00011111, 0b11111100]);
        assert_eq!(take_header(&mut bs, ver), Some((Mode::Numeric, 1023)));
        let mut bs = BitStream::from(&[0b01001111, 0b11110000]);
        assert_eq!(take_header(&mut bs, ver), Some((Mode::Byte, 255)));
    }

    #[test]
    fn test_take_header_unknown_mode() {
        let ver = Version::new(1).unwrap();
        let mut bs = BitStream::from(&[0b01110000, 0]);
        assert_eq!(take_header(&mut bs, ver), None);
    }

    #[test]
    fn test_decode() {
        let ver = Version::new(1).unwrap();
        let data = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        assert_eq!(decode(data, ver), Some((Mode::Alphanumeric, "HELLO WORLD".to_string())));
    }

    #[test]
    fn test_decode_truncated() {
        let ver = Version::new(1).unwrap();
        assert_eq!(decode(&[0x20, 0x5b], ver), None);
    }
}
