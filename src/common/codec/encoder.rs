pub use encode::*;

// Encoder
//------------------------------------------------------------------------------

pub mod encode {
    use tracing::debug;

    use super::writer::{pad_remaining_capacity, push_segment, push_terminator};
    use crate::common::bit_utils::BitStream;
    use crate::common::codec::Mode;
    use crate::common::error::{QRError, QRResult};
    use crate::common::metadata::{ECLevel, Version};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Segment {
        pub mode: Mode,
        pub mode_bits: usize,
        pub len_bits: usize,
        pub data: Vec<char>,
    }

    impl Segment {
        pub fn new(mode: Mode, mode_bits: usize, len_bits: usize, data: Vec<char>) -> Self {
            Self { mode, mode_bits, len_bits, data }
        }

        pub fn bit_len(&self) -> usize {
            self.mode_bits + self.len_bits + self.mode.encoded_len(self.data.len())
        }
    }

    /// Packs `text` as a single segment and pads it to exactly the data capacity
    /// of `ver` at `ecl`.
    pub fn encode(text: &str, ver: Version, ecl: ECLevel, mode: Mode) -> QRResult<Vec<u8>> {
        let data = text.chars().collect::<Vec<_>>();
        if let Some(&ch) = data.iter().find(|ch| !mode.contains(**ch)) {
            return Err(QRError::InvalidChar { ch, mode });
        }

        let seg = Segment::new(mode, ver.mode_bits(), ver.char_cnt_bits(mode), data);
        let bit_capacity = ver.data_bit_capacity(ecl);
        let required = seg.bit_len();
        if required > bit_capacity {
            return Err(QRError::CapacityExceeded { required, capacity: bit_capacity });
        }
        debug!(?mode, chars = seg.data.len(), required, bit_capacity, "Packing segment");

        let mut out = BitStream::new(bit_capacity);
        push_segment(&seg, &mut out)?;
        push_terminator(&mut out);
        pad_remaining_capacity(&mut out);

        debug_assert_eq!(out.len(), bit_capacity, "Encoded length must equal capacity");
        Ok(out.into_bytes())
    }

}

// Writer for encoded data
//------------------------------------------------------------------------------

pub(super) mod writer {
    use super::Segment;
    use crate::common::bit_utils::BitStream;
    use crate::common::codec::{Mode, PADDING_CODEWORDS};
    use crate::common::error::QRResult;

    pub fn push_segment(seg: &Segment, out: &mut BitStream) -> QRResult<()> {
        push_header(seg, out);
        match seg.mode {
            Mode::Numeric => push_chunks(Mode::Numeric, &seg.data, 3, out),
            Mode::Alphanumeric => push_chunks(Mode::Alphanumeric, &seg.data, 2, out),
            Mode::Byte | Mode::Kanji => push_chunks(seg.mode, &seg.data, 1, out),
        }
    }

    fn push_header(seg: &Segment, out: &mut BitStream) {
        out.push_bits(seg.mode as u8, seg.mode_bits);
        let char_cnt = seg.data.len();
        debug_assert!(
            char_cnt < (1 << seg.len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {}",
            seg.len_bits
        );
        out.push_bits(char_cnt as u16, seg.len_bits);
    }

    fn push_chunks(
        mode: Mode,
        data: &[char],
        chunk_sz: usize,
        out: &mut BitStream,
    ) -> QRResult<()> {
        for chunk in data.chunks(chunk_sz) {
            let len = mode.encoded_len(chunk.len());
            out.push_bits(mode.encode_chunk(chunk)?, len);
        }
        Ok(())
    }

    pub fn push_terminator(out: &mut BitStream) {
        let bit_len = out.len();
        let bit_capacity = out.capacity();
        if bit_len < bit_capacity {
            let term_len = std::cmp::min(4, bit_capacity - bit_len);
            out.push_bits(0u8, term_len);
        }
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 && out.len() < out.capacity() {
            let padding_bits_len = 8 - offset;
            out.push_bits(0u8, padding_bits_len);
        }
    }

    fn push_padding_codewords(out: &mut BitStream) {
        let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
        PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
            out.push_bits(pc, 8);
        });
    }

    #[cfg(test)]
    mod writer_tests {
        use super::{
            push_chunks, push_header, push_padding_bits, push_padding_codewords, push_terminator,
            Segment,
        };
        use crate::common::bit_utils::BitStream;
        use crate::common::codec::{Mode, PADDING_CODEWORDS};
        use crate::common::metadata::{ECLevel, Version};

        fn header_bytes(ver: usize, counts: [usize; 4]) -> Vec<Vec<u8>> {
            let ver = Version::new(ver).unwrap();
            let modes = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte, Mode::Kanji];
            modes
                .iter()
                .zip(counts)
                .map(|(mode, cnt)| {
                    let mut bs = BitStream::new(ver.data_bit_capacity(ECLevel::L));
                    let len_bits = ver.char_cnt_bits(*mode);
                    let seg = Segment::new(*mode, ver.mode_bits(), len_bits, vec!['0'; cnt]);
                    push_header(&seg, &mut bs);
                    bs.into_bytes()
                })
                .collect()
        }

        #[test]
        fn test_push_header_v1() {
            let exp_vecs: Vec<Vec<u8>> = vec![
                vec![0b00011111, 0b11111100],
                vec![0b00101111, 0b11111000],
                vec![0b01001111, 0b11110000],
                vec![0b10001111, 0b11110000],
            ];
            assert_eq!(header_bytes(1, [1023, 511, 255, 255]), exp_vecs);
        }

        #[test]
        fn test_push_header_v10() {
            let exp_vecs: Vec<Vec<u8>> = vec![
                vec![0b00011111, 0b11111111],
                vec![0b00101111, 0b11111110],
                vec![0b01001111, 0b11111111, 0b11110000],
                vec![0b10001111, 0b11111100],
            ];
            assert_eq!(header_bytes(10, [4095, 2047, 65535, 1023]), exp_vecs);
        }

        #[test]
        fn test_push_header_v27() {
            let exp_vecs: Vec<Vec<u8>> = vec![
                vec![0b00011111, 0b11111111, 0b11000000],
                vec![0b00101111, 0b11111111, 0b10000000],
                vec![0b01001111, 0b11111111, 0b11110000],
                vec![0b10001111, 0b11111111],
            ];
            assert_eq!(header_bytes(27, [16383, 8191, 65535, 4095]), exp_vecs);
        }

        #[test]
        fn test_push_numeric_data() {
            let mut bs = BitStream::new(152);
            let digits = "01234567".chars().collect::<Vec<_>>();
            push_chunks(Mode::Numeric, &digits, 3, &mut bs).unwrap();
            assert_eq!(bs.data(), vec![0b00000011, 0b00010101, 0b10011000, 0b01100000]);
            let mut bs = BitStream::new(152);
            push_chunks(Mode::Numeric, &['8'], 3, &mut bs).unwrap();
            assert_eq!(bs.data(), vec![0b10000000]);
        }

        #[test]
        fn test_push_alphanumeric_data() {
            let mut bs = BitStream::new(152);
            push_chunks(Mode::Alphanumeric, &"AC-42".chars().collect::<Vec<_>>(), 2, &mut bs)
                .unwrap();
            assert_eq!(bs.data(), vec![0b00111001, 0b11011100, 0b11100100, 0b00100000])
        }

        #[test]
        fn test_push_byte_data() {
            let mut bs = BitStream::new(152);
            push_chunks(Mode::Byte, &['a', 'é'], 1, &mut bs).unwrap();
            assert_eq!(bs.data(), vec![0b01100001, 0xE9])
        }

        #[test]
        fn test_push_terminator() {
            let mut bs = BitStream::new(152);
            bs.push_bits(0b1u8, 1);
            push_terminator(&mut bs);
            assert_eq!(bs.data(), vec![0b10000000]);
            assert_eq!(bs.len(), 5);
            for _ in 0..18 {
                bs.push_bits(0b11111111u8, 8);
            }
            // Only 3 bits of capacity left
            push_terminator(&mut bs);
            assert_eq!(bs.len(), 152);
        }

        #[test]
        fn test_push_padding_bits() {
            let mut bs = BitStream::new(152);
            bs.push_bits(1u8, 1);
            push_padding_bits(&mut bs);
            assert_eq!(bs.data(), vec![0b10000000]);
            assert_eq!(bs.len() & 7, 0);
        }

        #[test]
        fn test_push_padding_codewords() {
            let mut bs = BitStream::new(152);
            bs.push_bits(1u8, 1);
            push_padding_bits(&mut bs);
            push_padding_codewords(&mut bs);
            let mut output = vec![0b10000000];
            output.extend(PADDING_CODEWORDS.iter().cycle().take(18));
            assert_eq!(bs.data(), output);
        }
    }
}
