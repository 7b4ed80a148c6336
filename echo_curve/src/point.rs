use crate::{
    CurveError, FieldElement, Scalar,
    backend::{self, Affine},
    hash::HashInto,
    marker::*,
    op,
};
use core::marker::PhantomData;
use rand_core::{CryptoRng, RngCore};

/// A point on the secp256k1 curve in affine coordinates.
///
/// Every non-zero point satisfies `y² = x³ + 7 (mod p)`. A `Point<Zero>` may also be the point
/// at infinity (the identity of the group), which is what arithmetic returns when it can't rule
/// that out. Use [`non_zero`] to get back to a `Point<NonZero>`.
///
/// ```
/// use echo_curve::{G, Point, Scalar, op};
/// let x = Scalar::random(&mut rand::thread_rng());
/// let X: Point = op::scalar_mul_point(&x, G).non_zero().unwrap();
/// assert!(X.is_on_curve());
/// ```
///
/// [`non_zero`]: Point::non_zero
pub struct Point<Z = NonZero>(pub(crate) Affine, PhantomData<Z>);

impl<Z> Copy for Point<Z> {}

impl<Z> Clone for Point<Z> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Z> Point<Z> {
    pub(crate) const fn from_inner(inner: Affine) -> Self {
        Point(inner, PhantomData)
    }

    /// Whether this is the point at infinity.
    pub fn is_zero(&self) -> bool {
        self.0.infinity
    }

    /// Returns the point marked [`NonZero`] or `None` if it is the point at infinity.
    pub fn non_zero(self) -> Option<Point<NonZero>> {
        if self.is_zero() {
            None
        } else {
            Some(Point::from_inner(self.0))
        }
    }

    /// Forgets that the point is non-zero.
    pub fn mark_zero(self) -> Point<Zero> {
        Point::from_inner(self.0)
    }

    /// Checks the curve equation. Always true for points built through this crate.
    pub fn is_on_curve(&self) -> bool {
        self.0.is_on_curve()
    }

    /// `-P = (x, p - y)`. The point at infinity is its own negation.
    pub fn negate(&self) -> Self {
        Point::from_inner(self.0.neg())
    }

    /// Negates the point if `cond` is true.
    pub fn conditional_negate(&self, cond: bool) -> Self {
        if cond { self.negate() } else { *self }
    }
}

impl Point<Zero> {
    /// The point at infinity.
    pub fn zero() -> Self {
        Point::from_inner(backend::INFINITY)
    }
}

impl Point<NonZero> {
    pub(crate) const fn generator() -> Self {
        Point::from_inner(backend::GENERATOR)
    }

    /// Builds a point from affine coordinates.
    ///
    /// # Errors
    ///
    /// [`CurveError::PointNotOnCurve`] if `y² ≠ x³ + 7`.
    pub fn from_coordinates(x: FieldElement, y: FieldElement) -> Result<Self, CurveError> {
        let affine = Affine {
            x,
            y,
            infinity: false,
        };
        if !affine.is_on_curve() {
            return Err(CurveError::PointNotOnCurve);
        }
        Ok(Point::from_inner(affine))
    }

    /// The BIP-340 `lift_x`: the point with x-coordinate `x_bytes` and an even y-coordinate.
    ///
    /// # Errors
    ///
    /// [`CurveError::PointNotOnCurve`] if `x >= p` or `x³ + 7` is not a square.
    ///
    /// ```
    /// use echo_curve::{G, Point};
    /// let lifted = Point::lift_x(G.x_bytes()).unwrap();
    /// assert_eq!(&lifted, G);
    /// assert!(Point::lift_x([0xff; 32]).is_err());
    /// ```
    pub fn lift_x(x_bytes: [u8; 32]) -> Result<Self, CurveError> {
        let x = FieldElement::from_bytes(x_bytes).ok_or(CurveError::PointNotOnCurve)?;
        let affine = Affine::from_x_and_parity(x, false).ok_or(CurveError::PointNotOnCurve)?;
        Ok(Point::from_inner(affine))
    }

    /// Decodes a 33-byte compressed point (`0x02`/`0x03` prefix followed by x).
    pub fn from_bytes(bytes: [u8; 33]) -> Option<Self> {
        let y_odd = match bytes[0] {
            0x02 => false,
            0x03 => true,
            _ => return None,
        };
        let mut x_bytes = [0u8; 32];
        x_bytes.copy_from_slice(&bytes[1..]);
        let x = FieldElement::from_bytes(x_bytes)?;
        Some(Point::from_inner(Affine::from_x_and_parity(x, y_odd)?))
    }

    /// [`from_bytes`] for a slice that must be exactly 33 bytes long.
    ///
    /// [`from_bytes`]: Self::from_bytes
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        Self::from_bytes(slice.try_into().ok()?)
    }

    /// Decodes a 65-byte uncompressed point (`0x04 ‖ x ‖ y`).
    pub fn from_bytes_uncompressed(bytes: [u8; 65]) -> Option<Self> {
        if bytes[0] != 0x04 {
            return None;
        }
        let mut x = [0u8; 32];
        let mut y = [0u8; 32];
        x.copy_from_slice(&bytes[1..33]);
        y.copy_from_slice(&bytes[33..65]);
        let x = FieldElement::from_bytes(x)?;
        let y = FieldElement::from_bytes(y)?;
        Self::from_coordinates(x, y).ok()
    }

    /// The affine coordinates.
    pub fn coordinates(&self) -> (FieldElement, FieldElement) {
        (self.0.x, self.0.y)
    }

    /// The big-endian x-coordinate.
    pub fn x_bytes(&self) -> [u8; 32] {
        self.0.x.to_bytes()
    }

    /// Whether the y-coordinate is even.
    pub fn is_y_even(&self) -> bool {
        self.0.y.is_even()
    }

    /// Compressed SEC1 encoding.
    pub fn to_bytes(&self) -> [u8; 33] {
        let mut bytes = [0u8; 33];
        bytes[0] = if self.is_y_even() { 0x02 } else { 0x03 };
        bytes[1..].copy_from_slice(&self.x_bytes());
        bytes
    }

    /// Uncompressed SEC1 encoding.
    pub fn to_bytes_uncompressed(&self) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        bytes[0] = 0x04;
        bytes[1..33].copy_from_slice(&self.0.x.to_bytes());
        bytes[33..].copy_from_slice(&self.0.y.to_bytes());
        bytes
    }

    /// Negates the point if its y-coordinate is odd. Returns the even-y point and whether it had
    /// to be negated.
    pub fn into_point_with_even_y(self) -> (Self, bool) {
        let needs_negation = !self.is_y_even();
        (self.conditional_negate(needs_negation), needs_negation)
    }

    /// Computes `x * G` and, if the result has an odd y-coordinate, negates both `x` and the
    /// point so the returned point has even y and still equals `x * G`.
    pub fn even_y_from_scalar_mul<S: Secrecy>(x: &mut Scalar<S, NonZero>) -> Self {
        let X = op::scalar_mul_point(x, &Self::generator());
        // x is non-zero and G has prime order
        let X: Point = Point::from_inner(X.0);
        let (X, needs_negation) = X.into_point_with_even_y();
        x.conditional_negate(needs_negation);
        X
    }

    /// A random point. For tests.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let x = Scalar::random(rng);
        Point::from_inner(op::scalar_mul_point(&x, &Self::generator()).0)
    }
}

impl<Z1, Z2> PartialEq<Point<Z2>> for Point<Z1> {
    fn eq(&self, rhs: &Point<Z2>) -> bool {
        self.0 == rhs.0
    }
}

impl<Z> Eq for Point<Z> {}

impl<Z> core::hash::Hash for Point<Z> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.0.infinity.hash(state);
        self.0.x.to_bytes().hash(state);
        self.0.y.to_bytes().hash(state);
    }
}

impl<Z> core::ops::Neg for Point<Z> {
    type Output = Point<Z>;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl HashInto for Point<NonZero> {
    fn hash_into(&self, hash: &mut impl digest::Update) {
        hash.update(&self.to_bytes())
    }
}

crate::impl_fromstr_deserialize! {
    name => "compressed secp256k1 point",
    impl for Point, 33, |bytes| Point::from_bytes(bytes)
}

crate::impl_display_debug_serialize! {
    impl for Point, 33, |point| point.to_bytes()
}

impl core::fmt::Debug for Point<Zero> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.non_zero() {
            Some(point) => write!(f, "{:?}", point),
            None => write!(f, "Point(infinity)"),
        }
    }
}
