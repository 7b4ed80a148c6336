use super::uint::{self, Limbs, Modulus};
use crate::CURVE;
use subtle::{Choice, ConstantTimeEq};

pub(crate) const N: Modulus = Modulus::new(&CURVE.n);

/// Integer mod `n` as little-endian limbs, always fully reduced.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Scalar(pub(crate) Limbs);

impl Scalar {
    pub const ZERO: Self = Scalar([0; 4]);
    pub const ONE: Self = Scalar([1, 0, 0, 0]);

    pub fn from_u32(int: u32) -> Self {
        Scalar([int as u64, 0, 0, 0])
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Option<Self> {
        let limbs = uint::from_be_bytes(&bytes);
        if uint::gte(&limbs, &N.m) {
            return None;
        }
        Some(Scalar(limbs))
    }

    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Self {
        Scalar(N.reduce(&uint::from_be_bytes(&bytes)))
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        uint::to_be_bytes(&self.0)
    }

    pub fn is_zero(&self) -> bool {
        uint::is_zero(&self.0)
    }

    pub fn bit(&self, i: usize) -> bool {
        (self.0[i / 64] >> (i % 64)) & 1 == 1
    }

    pub fn add(&self, rhs: &Self) -> Self {
        Scalar(N.add(&self.0, &rhs.0))
    }

    pub fn sub(&self, rhs: &Self) -> Self {
        Scalar(N.sub(&self.0, &rhs.0))
    }

    pub fn mul(&self, rhs: &Self) -> Self {
        Scalar(N.mul(&self.0, &rhs.0))
    }

    pub fn neg(&self) -> Self {
        Scalar(N.neg(&self.0))
    }

    /// Fermat inversion. Returns zero for zero.
    pub fn pow_invert(&self) -> Self {
        Scalar(N.pow(&self.0, &N.m_minus_2))
    }

    pub fn ct_eq(&self, rhs: &Self) -> Choice {
        self.to_bytes()[..].ct_eq(&rhs.to_bytes()[..])
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn order_reduces_to_zero() {
        assert!(Scalar::from_bytes(CURVE.n).is_none());
        assert!(Scalar::from_bytes_mod_order(CURVE.n).is_zero());
    }

    #[test]
    fn all_ones_reduces_below_order() {
        // 2²⁵⁶ - 1 - n
        let reduced = Scalar::from_bytes_mod_order([0xff; 32]);
        let expected = Scalar([0x402d_a173_2fc9_bebe, 0x4551_2319_50b7_5fc4, 1, 0]);
        assert_eq!(reduced, expected);
    }

    #[test]
    fn negation_sums_to_zero() {
        let x = Scalar::from_u32(7);
        assert!(x.add(&x.neg()).is_zero());
        assert!(Scalar::ZERO.neg().is_zero());
    }

    #[test]
    fn invert() {
        let x = Scalar::from_u32(0xdead_beef);
        assert_eq!(x.mul(&x.pow_invert()), Scalar::ONE);
    }
}
