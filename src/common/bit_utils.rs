use std::mem;

use num_traits::PrimInt;

// Bit stream
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Max bit capacity
    capacity: usize,
    // Pointer to take bits
    cursor: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        Self { data: Vec::with_capacity((capacity + 7) >> 3), len: 0, capacity, cursor: 0 }
    }

    pub fn from(inp: &[u8]) -> Self {
        let bit_len = inp.len() << 3;
        Self { data: inp.to_vec(), len: bit_len, capacity: bit_len, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[cfg(test)]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    /// Appends the low `size` bits of `bits`, most significant first.
    pub fn push_bits<T: PrimInt>(&mut self, bits: T, size: usize) {
        let max_bits = mem::size_of::<T>() * 8;
        debug_assert!(size <= max_bits, "Bit count exceeds type width: Size {size}");
        debug_assert!(
            size >= max_bits - bits.leading_zeros() as usize,
            "Value doesn't fit in bit length: Length {size}"
        );
        debug_assert!(
            self.len + size <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + size
        );

        for i in (0..size).rev() {
            self.push((bits >> i) & T::one() == T::one());
        }
    }

    pub fn push(&mut self, bit: bool) {
        debug_assert!(
            self.len < self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + 1
        );

        let offset = self.len & 7;
        if offset == 0 {
            self.data.push(0);
        }
        if bit {
            let pos = self.len >> 3;
            self.data[pos] |= 0b10000000 >> offset;
        }

        self.len += 1;
    }
}

#[cfg(test)]
mod bit_stream_push_tests {

    use super::BitStream;

    #[test]
    fn test_len() {
        let bit_capacity = 152;
        let mut bs = BitStream::new(bit_capacity);
        assert_eq!(bs.len(), 0);
        bs.push_bits(0, 0);
        assert_eq!(bs.len(), 0);
        bs.push_bits(0b1000, 4);
        assert_eq!(bs.len(), 4);
        bs.push_bits(0b1000, 8);
        assert_eq!(bs.len(), 12);
        bs.push_bits(0b1111111, 7);
        assert_eq!(bs.len(), 19);
        bs.push_bits(0b1111111111111u16, 13);
        assert_eq!(bs.len(), 32);
        assert_eq!(bs.data().len(), 4);
    }

    #[test]
    fn test_push() {
        let mut bs = BitStream::new(2);
        bs.push(false);
        assert_eq!(bs.data(), &[0b00000000]);
        bs.push(true);
        assert_eq!(bs.data(), &[0b01000000]);
    }

    #[test]
    fn test_push_bits() {
        let bit_capacity = 152;
        let exp_vec = [210, 52, 141, 35, 72, 210, 183, 42, 7, 219, 91, 14, 253, 68, 120, 193];
        let mut inp = BitStream::from(&exp_vec);
        let mut out = BitStream::new(bit_capacity);
        for n in [0, 1, 2, 3, 4, 5, 6, 7, 8, 4, 8, 9, 11, 15, 16, 5, 14] {
            let bits = inp.take_bits(n).unwrap();
            out.push_bits(bits, n);
            let out_off = out.len() & 7;
            let len = out.len() >> 3;
            assert_eq!(out.data()[..len], exp_vec[..len], "n {n}");
            if out_off > 0 {
                assert_eq!(out.data()[len] >> (8 - out_off), exp_vec[len] >> (8 - out_off));
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_push_bits_capacity_overflow() {
        let mut bs = BitStream::new(8);
        bs.push_bits(0b1u8, 8);
        bs.push_bits(0b1u8, 1)
    }
}

// Take bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    #[cfg(test)]
    pub fn take_bits(&mut self, n: usize) -> Option<u16> {
        debug_assert!(n <= 16, "Cannot take more than 16 bits: N {n}");

        if self.cursor + n > self.len {
            return None;
        }

        let mut res = 0u16;
        for _ in 0..n {
            res = (res << 1) | self.take()? as u16;
        }
        Some(res)
    }

    pub fn take(&mut self) -> Option<bool> {
        if self.cursor == self.len {
            return None;
        }

        let offset = self.cursor & 7;
        let pos = self.cursor >> 3;
        let bit = (self.data[pos] << offset) >> 7;

        self.cursor += 1;

        Some(bit != 0)
    }

    #[cfg(test)]
    pub fn remaining(&self) -> usize {
        self.len - self.cursor
    }
}


// Iterator for bit stream
//------------------------------------------------------------------------------

impl Iterator for BitStream {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        self.take()
    }
}
