use super::uint::{self, Limbs, Modulus};
use crate::{CURVE, CurveError};
use core::ops::{Add, Mul, Neg, Sub};
use subtle::{Choice, ConditionallySelectable};

pub(crate) const P: Modulus = Modulus::new(&CURVE.p);
const SQRT_EXP: Limbs = P.sqrt_exponent();

/// An element of the secp256k1 base field (an integer mod `p`).
///
/// Point coordinates live here. Group order arithmetic lives in [`Scalar`] and the two types
/// can't be mixed.
///
/// [`Scalar`]: crate::Scalar
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldElement(pub(crate) Limbs);

impl FieldElement {
    /// The additive identity.
    pub const ZERO: Self = FieldElement([0; 4]);
    /// The multiplicative identity.
    pub const ONE: Self = FieldElement([1, 0, 0, 0]);

    pub(crate) const fn from_be_bytes_unchecked(bytes: &[u8; 32]) -> Self {
        FieldElement(uint::from_be_bytes(bytes))
    }

    /// The curve coefficient `b`.
    pub const fn curve_b() -> Self {
        FieldElement([CURVE.b, 0, 0, 0])
    }

    /// Interprets 32 big-endian bytes as a field element. Returns `None` if the value is `>= p`.
    pub fn from_bytes(bytes: [u8; 32]) -> Option<Self> {
        let limbs = uint::from_be_bytes(&bytes);
        if uint::gte(&limbs, &P.m) {
            return None;
        }
        Some(FieldElement(limbs))
    }

    /// Big-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        uint::to_be_bytes(&self.0)
    }

    /// Whether this is zero.
    pub fn is_zero(&self) -> bool {
        uint::is_zero(&self.0)
    }

    /// Whether the canonical representative is even.
    pub fn is_even(&self) -> bool {
        self.0[0] & 1 == 0
    }

    /// `self²`
    pub fn square(&self) -> Self {
        *self * *self
    }

    /// `self^exponent` where the exponent is given as little-endian limbs.
    pub fn pow(&self, exponent: &[u64; 4]) -> Self {
        FieldElement(P.pow(&self.0, exponent))
    }

    /// The multiplicative inverse `self^(p-2)`.
    ///
    /// # Errors
    ///
    /// [`CurveError::DivisionByZero`] if `self` is zero.
    pub fn invert(&self) -> Result<Self, CurveError> {
        if self.is_zero() {
            return Err(CurveError::DivisionByZero);
        }
        Ok(self.pow(&P.m_minus_2))
    }

    /// A square root of `self`, if there is one. Uses `p ≡ 3 (mod 4)`.
    pub fn sqrt(&self) -> Option<Self> {
        let root = self.pow(&SQRT_EXP);
        if root.square() == *self {
            Some(root)
        } else {
            None
        }
    }

    /// The right hand side of the curve equation, `x³ + b`.
    pub fn curve_rhs(&self) -> Self {
        self.square() * *self + Self::curve_b()
    }
}

impl Add for FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: Self) -> Self::Output {
        FieldElement(P.add(&self.0, &rhs.0))
    }
}

impl Sub for FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: Self) -> Self::Output {
        FieldElement(P.sub(&self.0, &rhs.0))
    }
}

impl Mul for FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: Self) -> Self::Output {
        FieldElement(P.mul(&self.0, &rhs.0))
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;
    fn neg(self) -> Self::Output {
        FieldElement(P.neg(&self.0))
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut out = [0u64; 4];
        for (i, limb) in out.iter_mut().enumerate() {
            *limb = u64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        FieldElement(out)
    }
}

impl core::fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "FieldElement(")?;
        for byte in self.to_bytes().iter() {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}
