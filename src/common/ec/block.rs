use std::ops::Deref;

use tracing::debug;

use super::encoder::reed_solomon_encode;
use crate::common::error::{QRError, QRResult};
use crate::common::metadata::{ECLevel, Version};

// Codeword block
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Block {
    // Data codewords followed by ec codewords
    codewords: Vec<u8>,
    // Data length
    dlen: usize,
}

impl Block {
    pub fn new(raw: &[u8], ec_len: usize) -> Self {
        let dlen = raw.len();
        let mut codewords = Vec::with_capacity(dlen + ec_len);
        codewords.extend_from_slice(raw);
        codewords.extend(reed_solomon_encode(raw, ec_len));
        Self { codewords, dlen }
    }

    pub fn data(&self) -> &[u8] {
        &self.codewords[..self.dlen]
    }

    pub fn ecc(&self) -> &[u8] {
        &self.codewords[self.dlen..]
    }
}

// Error correction
//------------------------------------------------------------------------------

/// Splits the data codewords into the blocks of `ver` at `ecl`, appends the ec
/// codewords of each block and interleaves data then ec codewords.
pub fn implement_error_correction(data: &[u8], ver: Version, ecl: ECLevel) -> QRResult<Vec<u8>> {
    let info = ver.ec_blocks(ecl);
    let expected = info.data_codewords();
    if data.len() != expected {
        return Err(QRError::InvalidBlockLength { expected, actual: data.len() });
    }

    let blocks = blockify(data, ver, ecl)
        .into_iter()
        .map(|b| Block::new(b, info.ec_per_block))
        .collect::<Vec<_>>();
    debug!(
        blocks = blocks.len(),
        ec_per_block = info.ec_per_block,
        "Computed error correction codewords"
    );

    let data_blocks = blocks.iter().map(Block::data).collect::<Vec<_>>();
    let ecc_blocks = blocks.iter().map(Block::ecc).collect::<Vec<_>>();
    let mut res = interleave(&data_blocks);
    res.extend(interleave(&ecc_blocks));

    debug_assert_eq!(res.len(), info.data_codewords() + info.ec_codewords());
    Ok(res)
}

pub fn blockify(data: &[u8], ver: Version, ecl: ECLevel) -> Vec<&[u8]> {
    let info = ver.ec_blocks(ecl);
    let g1 = info.group1;
    let total_g1_size = g1.num_blocks * g1.data_per_block;

    debug_assert!(
        info.data_codewords() == data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        info.data_codewords()
    );

    let mut data_blocks = Vec::with_capacity(info.total_blocks());
    data_blocks.extend(data[..total_g1_size].chunks(g1.data_per_block));
    if let Some(g2) = info.group2 {
        data_blocks.extend(data[total_g1_size..].chunks(g2.data_per_block));
    }
    data_blocks
}

pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}

#[cfg(test)]
mod block_tests {
    use super::{blockify, implement_error_correction, interleave, Block};
    use crate::common::error::QRError;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_block() {
        let block = Block::new(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11", 10);
        assert_eq!(block.data().len() + block.ecc().len(), 26);
        assert_eq!(block.data()[0], b' ');
        assert_eq!(block.ecc(), b"\xc4\x23\x27\x77\xeb\xd7\xe7\xe2\x5d\x17");
    }

    #[test]
    fn test_interleave() {
        let blocks = vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9, 0]];
        let interleaved = interleave(&blocks);
        let exp_interleaved = vec![1, 4, 7, 2, 5, 8, 3, 6, 9, 0];
        assert_eq!(interleaved, exp_interleaved);
    }

    #[test]
    fn test_blockify_two_groups() {
        let data = (0..62).collect::<Vec<u8>>();
        let blocks = blockify(&data, Version::new(5).unwrap(), ECLevel::Q);
        let lens = blocks.iter().map(|b| b.len()).collect::<Vec<_>>();
        assert_eq!(lens, vec![15, 15, 16, 16]);
        assert_eq!(blocks[2][0], 30);
    }

    #[test]
    fn test_single_block() {
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let res = implement_error_correction(msg, Version::new(1).unwrap(), ECLevel::M).unwrap();
        assert_eq!(&res[..16], msg);
        assert_eq!(&res[16..], b"\xc4\x23\x27\x77\xeb\xd7\xe7\xe2\x5d\x17");
    }

    #[test]
    fn test_multiple_blocks() {
        let msg = b"CUF\x86W&U\xc2w2\x06\x12\x06g&\xf6\xf6B\x07v\x86\xf2\x07&V\x16\xc6\xc7\x92\x06\
                    \xb6\xe6\xf7w2\x07v\x86W&R\x06\x86\x972\x07F\xf7vV\xc2\x06\x972\x10\xec\x11\xec\
                    \x11\xec\x11\xec";
        let expected_ec = [
            b"\xd5\xc7\x0b\x2d\x73\xf7\xf1\xdf\xe5\xf8\x9a\x75\x9a\x6f\x56\xa1\x6f\x27",
            b"\x57\xcc\x60\x3c\xca\xb6\x7c\x9d\xc8\x86\x1b\x81\xd1\x11\xa3\xa3\x78\x85",
            b"\x94\x74\xb1\xd4\x4c\x85\x4b\xf2\xee\x4c\xc3\xe6\xbd\x0a\x6c\xf0\xc0\x8d",
            b"\xeb\x9f\x05\xad\x18\x93\x3b\x21\x6a\x28\xff\xac\x52\x02\x83\x20\xb2\xec",
        ];
        let res = implement_error_correction(msg, Version::new(5).unwrap(), ECLevel::Q).unwrap();
        assert_eq!(res.len(), 62 + 4 * 18);
        // Data rounds: block starts, then the extra codeword of each group 2 block
        assert_eq!(&res[..4], &[msg[0], msg[15], msg[30], msg[46]]);
        assert_eq!(&res[60..62], &[msg[45], msg[61]]);
        let first_ec = expected_ec.iter().map(|ec| ec[0]).collect::<Vec<_>>();
        assert_eq!(&res[62..66], &first_ec[..]);
        assert_eq!(res[62 + 4 * 17 + 3], expected_ec[3][17]);
    }

    #[test]
    fn test_invalid_block_length() {
        let res = implement_error_correction(&[1, 2, 3], Version::new(4).unwrap(), ECLevel::L);
        let err = res.unwrap_err();
        assert_eq!(err, QRError::InvalidBlockLength { expected: 80, actual: 3 });
        assert!(err.to_string().starts_with("Data length must be 80 codewords"));
    }

    #[test]
    fn test_interleaved_length_all_versions() {
        for v in 1..=40 {
            let ver = Version::new(v).unwrap();
            for ecl in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
                let info = ver.ec_blocks(ecl);
                let data = vec![0x5A; ver.data_capacity(ecl)];
                let res = implement_error_correction(&data, ver, ecl).unwrap();
                let exp_len = ver.data_capacity(ecl) + info.ec_per_block * info.total_blocks();
                assert_eq!(res.len(), exp_len, "{v} {ecl:?}");
            }
        }
    }
}
