//! Scalar arithmetic (integers mod the secp256k1 group order)
use crate::{backend, hash::HashInto, marker::*, op};
use core::marker::PhantomData;
use digest::{Digest, generic_array::typenum::U32};
use rand_core::{CryptoRng, RngCore};

/// A secp256k1 scalar (an integer mod the curve order `n`)
///
/// `n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141`
///
/// Scalars are secret keys, nonces, challenges and signature components. Multiplying the
/// generator by a scalar is cheap but recovering the scalar from the product is the discrete
/// logarithm problem:
///
/// ```
/// use echo_curve::{G, Scalar, op};
/// let x = Scalar::random(&mut rand::thread_rng());
/// let X = op::scalar_mul_point(&x, G);
/// # let _ = X;
/// ```
///
/// # Markers
///
/// A `Scalar<S,Z>` has two markers:
///
/// - `S`: A [`Secrecy`] deciding which backend point multiplication and inversion run on.
///   Scalars are [`Secret`] by default.
/// - `Z`: A [`ZeroChoice`] tracking whether the scalar may be zero.
///
/// [`Secrecy`]: crate::marker::Secrecy
/// [`Secret`]: crate::marker::Secret
/// [`ZeroChoice`]: crate::marker::ZeroChoice
pub struct Scalar<S = Secret, Z = NonZero>(pub(crate) backend::Scalar, PhantomData<(S, Z)>);

impl<S, Z> Copy for Scalar<S, Z> {}

impl<S, Z> Clone for Scalar<S, Z> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, Z> Scalar<S, Z> {
    pub(crate) const fn from_inner(inner: backend::Scalar) -> Self {
        Scalar(inner, PhantomData)
    }

    /// Serializes the scalar to 32 big-endian bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// Decodes 32 big-endian bytes. Returns `None` if the value is `>= n`, or if it is zero and
    /// the scalar is marked [`NonZero`].
    ///
    /// ```
    /// use echo_curve::{Scalar, marker::*};
    /// assert!(Scalar::<Secret, Zero>::from_bytes([0u8; 32]).is_some());
    /// assert!(Scalar::<Secret, NonZero>::from_bytes([0u8; 32]).is_none());
    /// // >= curve order
    /// assert!(Scalar::<Secret, Zero>::from_bytes([255u8; 32]).is_none());
    /// ```
    pub fn from_bytes(bytes: [u8; 32]) -> Option<Self>
    where
        Z: ZeroChoice,
    {
        let inner = backend::Scalar::from_bytes(bytes)?;
        if inner.is_zero() && !Z::is_zero() {
            return None;
        }
        Some(Self::from_inner(inner))
    }

    /// [`from_bytes`] for a slice that must be exactly 32 bytes long.
    ///
    /// [`from_bytes`]: Self::from_bytes
    pub fn from_slice(slice: &[u8]) -> Option<Self>
    where
        Z: ZeroChoice,
    {
        let bytes: [u8; 32] = slice.try_into().ok()?;
        Self::from_bytes(bytes)
    }

    /// Whether this is the zero scalar.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Negates the scalar if `cond` is true.
    pub fn conditional_negate(&mut self, cond: bool) {
        if cond {
            self.0 = self.0.neg();
        }
    }

    /// Marks the scalar as [`Public`].
    pub fn public(self) -> Scalar<Public, Z> {
        Scalar::from_inner(self.0)
    }

    /// Marks the scalar as [`Secret`].
    pub fn secret(self) -> Scalar<Secret, Z> {
        Scalar::from_inner(self.0)
    }

    /// Forgets that the scalar is non-zero.
    pub fn mark_zero(self) -> Scalar<S, Zero> {
        Scalar::from_inner(self.0)
    }

    /// Returns the scalar marked [`NonZero`] or `None` if it is zero.
    pub fn non_zero(self) -> Option<Scalar<S, NonZero>> {
        if self.is_zero() {
            None
        } else {
            Some(Scalar::from_inner(self.0))
        }
    }
}

impl<S> Scalar<S, Zero> {
    /// Interprets 32 bytes as a big-endian integer and reduces it mod `n`.
    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Self {
        Self::from_inner(backend::Scalar::from_bytes_mod_order(bytes))
    }

    /// Reduces the output of a 32-byte hash mod `n`.
    ///
    /// ```
    /// use echo_curve::{Scalar, hash::tagged_hash, marker::*};
    /// use digest::Digest;
    /// let e = Scalar::<Public, _>::from_hash(tagged_hash(b"BIP0340/challenge").chain_update(b"m"));
    /// # let _ = e;
    /// ```
    pub fn from_hash(hash: impl Digest<OutputSize = U32>) -> Self {
        Self::from_bytes_mod_order(hash.finalize().into())
    }

    /// The zero scalar.
    pub fn zero() -> Self {
        Self::from_inner(backend::Scalar::ZERO)
    }
}

impl<S> Scalar<S, NonZero> {
    /// The scalar `1`.
    pub fn one() -> Self {
        Self::from_inner(backend::Scalar::ONE)
    }

    /// A small non-zero scalar.
    pub fn from_non_zero_u32(int: core::num::NonZeroU32) -> Self {
        Self::from_inner(backend::Scalar::from_u32(int.get()))
    }

    /// The multiplicative inverse. Never fails because the scalar is known to be non-zero.
    pub fn invert(&self) -> Self
    where
        S: Secrecy,
    {
        Scalar::from_inner(op::invert_inner::<S>(&self.0))
    }
}

impl Scalar<Secret, NonZero> {
    /// Samples a uniformly random non-zero scalar.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        loop {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            if let Some(scalar) = Scalar::from_bytes(bytes) {
                return scalar;
            }
        }
    }
}

impl<S1, Z1, S2, Z2> PartialEq<Scalar<S2, Z2>> for Scalar<S1, Z1> {
    fn eq(&self, rhs: &Scalar<S2, Z2>) -> bool {
        self.0.ct_eq(&rhs.0).into()
    }
}

impl<S, Z> Eq for Scalar<S, Z> {}

impl<S, Z> core::hash::Hash for Scalar<S, Z> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.to_bytes().hash(state)
    }
}

impl<S, Z> core::ops::Neg for Scalar<S, Z> {
    type Output = Scalar<S, Z>;

    fn neg(self) -> Self::Output {
        Scalar::from_inner(self.0.neg())
    }
}

impl<S, Z> core::ops::Neg for &Scalar<S, Z> {
    type Output = Scalar<S, Z>;

    fn neg(self) -> Self::Output {
        Scalar::from_inner(self.0.neg())
    }
}

impl<S, Z> HashInto for Scalar<S, Z> {
    fn hash_into(&self, hash: &mut impl digest::Update) {
        hash.update(&self.to_bytes())
    }
}

impl<S, Z> Default for Scalar<S, Z>
where
    Z: ZeroChoice,
{
    /// Zero for `Zero` scalars and one for `NonZero` ones.
    fn default() -> Self {
        if Z::is_zero() {
            Self::from_inner(backend::Scalar::ZERO)
        } else {
            Self::from_inner(backend::Scalar::ONE)
        }
    }
}

crate::impl_fromstr_deserialize! {
    name => "secp256k1 scalar",
    impl[S, Z: ZeroChoice] for Scalar<S, Z>, 32, |bytes| Scalar::from_bytes(bytes)
}

crate::impl_display_debug_serialize! {
    impl[S, Z] for Scalar<S, Z>, 32, |scalar| scalar.to_bytes()
}

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;
    use std::string::ToString;

    #[test]
    fn zero_and_non_zero_parsing() {
        let zero = Scalar::<Public, Zero>::from_str(
            "0000000000000000000000000000000000000000000000000000000000000000",
        )
        .unwrap();
        assert!(zero.is_zero());
        assert!(zero.non_zero().is_none());
        assert!(
            Scalar::<Public, NonZero>::from_str(
                "0000000000000000000000000000000000000000000000000000000000000000"
            )
            .is_err()
        );
    }

    #[test]
    fn display_is_hex() {
        let one = Scalar::<Secret, NonZero>::one();
        assert_eq!(
            one.to_string(),
            "0000000000000000000000000000000000000000000000000000000000000001"
        );
        assert_eq!(
            format!("{:?}", one),
            "Scalar(0000000000000000000000000000000000000000000000000000000000000001)"
        );
    }

    #[test]
    fn from_slice_checks_length() {
        assert!(Scalar::<Secret, Zero>::from_slice(&[0u8; 31]).is_none());
        assert!(Scalar::<Secret, Zero>::from_slice(&[0u8; 33]).is_none());
        assert!(Scalar::<Secret, Zero>::from_slice(&[0u8; 32]).is_some());
    }

    #[test]
    fn invert_round_trips() {
        let x = Scalar::random(&mut rand::thread_rng());
        assert_eq!(op::scalar_mul(&x, &x.invert()), Scalar::<Secret, _>::one());
    }

    #[test]
    fn conditional_negate() {
        let mut x = Scalar::<Secret, NonZero>::one();
        x.conditional_negate(false);
        assert_eq!(x, Scalar::<Secret, NonZero>::one());
        x.conditional_negate(true);
        assert_eq!(x, -Scalar::<Secret, NonZero>::one());
    }
}
