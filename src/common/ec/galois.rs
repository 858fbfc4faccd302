use std::ops::{Add, AddAssign, Mul};

// GF(256) over the primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
//------------------------------------------------------------------------------

const PRIMITIVE: u16 = 0x11D;

const fn build_exp_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[i] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE;
        }
        i += 1;
    }
    table[255] = table[0];
    table
}

const fn build_log_table() -> [u8; 256] {
    let exp = build_exp_table();
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

pub static EXP_TABLE: [u8; 256] = build_exp_table();

pub static LOG_TABLE: [u8; 256] = build_log_table();

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct G(pub u8);

impl G {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);

    /// alpha^i
    pub fn gen_pow(i: usize) -> Self {
        Self(EXP_TABLE[i % 255])
    }
}

impl Add for G {
    type Output = Self;
    #[allow(clippy::suspicious_arithmetic_impl)]
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl AddAssign for G {
    #[allow(clippy::suspicious_op_assign_impl)]
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Mul for G {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        if self.0 == 0 || rhs.0 == 0 {
            return Self::ZERO;
        }
        let log_sum = LOG_TABLE[self.0 as usize] as usize + LOG_TABLE[rhs.0 as usize] as usize;
        Self(EXP_TABLE[log_sum % 255])
    }
}
