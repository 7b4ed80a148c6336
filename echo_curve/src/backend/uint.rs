//! 256-bit unsigned integers as four little-endian `u64` limbs and arithmetic modulo a prime of
//! the form `2²⁵⁶ - c`. Both secp256k1 moduli have this shape.

pub type Limbs = [u64; 4];

pub const fn from_be_bytes(bytes: &[u8; 32]) -> Limbs {
    let mut limbs = [0u64; 4];
    let mut i = 0;
    while i < 4 {
        let mut limb = 0u64;
        let mut j = 0;
        while j < 8 {
            limb = (limb << 8) | bytes[(3 - i) * 8 + j] as u64;
            j += 1;
        }
        limbs[i] = limb;
        i += 1;
    }
    limbs
}

pub fn to_be_bytes(limbs: &Limbs) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (i, limb) in limbs.iter().enumerate() {
        bytes[(3 - i) * 8..(4 - i) * 8].copy_from_slice(&limb.to_be_bytes());
    }
    bytes
}

const fn wrapping_neg(a: Limbs) -> Limbs {
    let mut out = [0u64; 4];
    let mut carry = 1u64;
    let mut i = 0;
    while i < 4 {
        let (v, c) = (!a[i]).overflowing_add(carry);
        out[i] = v;
        carry = c as u64;
        i += 1;
    }
    out
}

const fn sub_word(a: Limbs, w: u64) -> Limbs {
    let mut out = a;
    let mut borrow = w;
    let mut i = 0;
    while i < 4 && borrow != 0 {
        let (v, b) = out[i].overflowing_sub(borrow);
        out[i] = v;
        borrow = b as u64;
        i += 1;
    }
    out
}

const fn add_word(a: Limbs, w: u64) -> Limbs {
    let mut out = a;
    let mut carry = w;
    let mut i = 0;
    while i < 4 && carry != 0 {
        let (v, c) = out[i].overflowing_add(carry);
        out[i] = v;
        carry = c as u64;
        i += 1;
    }
    out
}

const fn shr(a: Limbs, bits: u32) -> Limbs {
    let mut out = [0u64; 4];
    let mut i = 0;
    while i < 4 {
        out[i] = a[i] >> bits;
        if i < 3 {
            out[i] |= a[i + 1] << (64 - bits);
        }
        i += 1;
    }
    out
}

pub fn is_zero(a: &Limbs) -> bool {
    (a[0] | a[1] | a[2] | a[3]) == 0
}

/// `a >= b`
pub fn gte(a: &Limbs, b: &Limbs) -> bool {
    for i in (0..4).rev() {
        if a[i] != b[i] {
            return a[i] > b[i];
        }
    }
    true
}

fn add(a: &Limbs, b: &Limbs) -> (Limbs, bool) {
    let mut out = [0u64; 4];
    let mut carry = 0u128;
    for i in 0..4 {
        let sum = a[i] as u128 + b[i] as u128 + carry;
        out[i] = sum as u64;
        carry = sum >> 64;
    }
    (out, carry != 0)
}

fn sub(a: &Limbs, b: &Limbs) -> (Limbs, bool) {
    let mut out = [0u64; 4];
    let mut borrow = false;
    for i in 0..4 {
        let (v, b1) = a[i].overflowing_sub(b[i]);
        let (v, b2) = v.overflowing_sub(borrow as u64);
        out[i] = v;
        borrow = b1 | b2;
    }
    (out, borrow)
}

fn mul_wide(a: &Limbs, b: &Limbs) -> [u64; 8] {
    let mut out = [0u64; 8];
    for i in 0..4 {
        let mut carry = 0u128;
        for j in 0..4 {
            let t = a[i] as u128 * b[j] as u128 + out[i + j] as u128 + carry;
            out[i + j] = t as u64;
            carry = t >> 64;
        }
        out[i + 4] = carry as u64;
    }
    out
}

fn add_wide(a: &[u64; 8], b: &[u64; 8]) -> [u64; 8] {
    let mut out = [0u64; 8];
    let mut carry = 0u128;
    for i in 0..8 {
        let sum = a[i] as u128 + b[i] as u128 + carry;
        out[i] = sum as u64;
        carry = sum >> 64;
    }
    out
}

/// A prime modulus `m = 2²⁵⁶ - c`.
#[derive(Clone, Copy, Debug)]
pub struct Modulus {
    pub m: Limbs,
    c: Limbs,
    /// `m - 2`, the exponent for inversion by Fermat's little theorem.
    pub m_minus_2: Limbs,
}

impl Modulus {
    pub const fn new(be_bytes: &[u8; 32]) -> Self {
        let m = from_be_bytes(be_bytes);
        Modulus {
            m,
            c: wrapping_neg(m),
            m_minus_2: sub_word(m, 2),
        }
    }

    /// `(m + 1) / 4`. Only meaningful when `m ≡ 3 (mod 4)`.
    pub const fn sqrt_exponent(&self) -> Limbs {
        shr(add_word(self.m, 1), 2)
    }

    /// Reduces a 512-bit value by repeatedly folding the high half in with `2²⁵⁶ ≡ c`.
    fn reduce_wide(&self, mut t: [u64; 8]) -> Limbs {
        loop {
            let hi = [t[4], t[5], t[6], t[7]];
            if is_zero(&hi) {
                break;
            }
            let lo = [t[0], t[1], t[2], t[3], 0, 0, 0, 0];
            t = add_wide(&mul_wide(&hi, &self.c), &lo);
        }
        let mut lo = [t[0], t[1], t[2], t[3]];
        while gte(&lo, &self.m) {
            lo = sub(&lo, &self.m).0;
        }
        lo
    }

    /// Reduces any 256-bit integer into `[0, m)`.
    pub fn reduce(&self, a: &Limbs) -> Limbs {
        self.reduce_wide([a[0], a[1], a[2], a[3], 0, 0, 0, 0])
    }

    pub fn add(&self, a: &Limbs, b: &Limbs) -> Limbs {
        let (sum, carry) = add(a, b);
        self.reduce_wide([sum[0], sum[1], sum[2], sum[3], carry as u64, 0, 0, 0])
    }

    pub fn sub(&self, a: &Limbs, b: &Limbs) -> Limbs {
        let (diff, borrow) = sub(a, b);
        if borrow {
            add(&diff, &self.m).0
        } else {
            diff
        }
    }

    pub fn neg(&self, a: &Limbs) -> Limbs {
        if is_zero(a) { *a } else { sub(&self.m, a).0 }
    }

    pub fn mul(&self, a: &Limbs, b: &Limbs) -> Limbs {
        self.reduce_wide(mul_wide(a, b))
    }

    /// Square and multiply from the most significant bit. The exponent is always public.
    pub fn pow(&self, base: &Limbs, exponent: &Limbs) -> Limbs {
        let mut acc = [1, 0, 0, 0];
        for i in (0..256).rev() {
            acc = self.mul(&acc, &acc);
            if (exponent[i / 64] >> (i % 64)) & 1 == 1 {
                acc = self.mul(&acc, base);
            }
        }
        acc
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::CURVE;

    #[test]
    fn c_is_small_for_the_field_prime() {
        let p = Modulus::new(&CURVE.p);
        assert_eq!(p.c, [0x1_0000_03d1, 0, 0, 0]);
    }

    #[test]
    fn c_for_the_group_order() {
        let n = Modulus::new(&CURVE.n);
        assert_eq!(n.c, [0x402d_a173_2fc9_bebf, 0x4551_2319_50b7_5fc4, 1, 0]);
    }

    #[test]
    fn sqrt_exponent_of_p() {
        let p = Modulus::new(&CURVE.p);
        assert_eq!(
            p.sqrt_exponent(),
            [
                0xffff_ffff_bfff_ff0c,
                u64::MAX,
                u64::MAX,
                0x3fff_ffff_ffff_ffff
            ]
        );
    }

    #[test]
    fn reduce_wraps_values_above_modulus() {
        let p = Modulus::new(&CURVE.p);
        let above = add_word(p.m, 5);
        assert_eq!(p.reduce(&above), [5, 0, 0, 0]);
        assert_eq!(p.add(&p.sub(&[0; 4], &[1, 0, 0, 0]), &[2, 0, 0, 0]), [1, 0, 0, 0]);
    }

    #[test]
    fn byte_conversion_is_big_endian() {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        bytes[0] = 0x80;
        let limbs = from_be_bytes(&bytes);
        assert_eq!(limbs, [1, 0, 0, 0x8000_0000_0000_0000]);
        assert_eq!(to_be_bytes(&limbs), bytes);
    }
}
