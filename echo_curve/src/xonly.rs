use crate::{Point, Scalar, hash::HashInto, marker::*};

/// An [`XOnly`] is the compressed representation of a [`Point`] with an even y-coordinate: just
/// its 32 byte x-coordinate. This is how BIP-340 encodes public keys and nonces.
///
/// Construction lifts the x-coordinate so [`to_point`] is free and can't fail.
///
/// The ordering is lexicographic on the bytes.
///
/// [`to_point`]: XOnly::to_point
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct XOnly {
    bytes: [u8; 32],
    point: Point,
}

impl XOnly {
    /// Decodes 32 bytes. Returns `None` if they are not the x-coordinate of a curve point.
    pub fn from_bytes(bytes: [u8; 32]) -> Option<Self> {
        let point = Point::lift_x(bytes).ok()?;
        Some(XOnly { bytes, point })
    }

    /// [`from_bytes`] for a slice which must be 32 bytes long.
    ///
    /// [`from_bytes`]: Self::from_bytes
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        Self::from_bytes(slice.try_into().ok()?)
    }

    /// Computes `x * G`, negating `x` if needed so it corresponds to the returned even-y key.
    ///
    /// ```
    /// use echo_curve::{G, Scalar, XOnly, op};
    /// let mut x = Scalar::random(&mut rand::thread_rng());
    /// let X = XOnly::from_scalar_mul(&mut x);
    /// assert_eq!(X.to_point(), op::scalar_mul_point(&x, G));
    /// ```
    pub fn from_scalar_mul<S: Secrecy>(x: &mut Scalar<S, NonZero>) -> Self {
        let point = Point::even_y_from_scalar_mul(x);
        XOnly {
            bytes: point.x_bytes(),
            point,
        }
    }

    /// The x-coordinate of `point`. Loses the parity of y.
    pub fn from_point(point: &Point) -> Self {
        let (point, _) = point.into_point_with_even_y();
        XOnly {
            bytes: point.x_bytes(),
            point,
        }
    }

    /// The point with this x-coordinate and an even y-coordinate.
    pub fn to_point(&self) -> Point {
        self.point
    }

    /// The 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// The 32 bytes.
    pub fn into_bytes(self) -> [u8; 32] {
        self.bytes
    }
}

impl PartialOrd for XOnly {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for XOnly {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl AsRef<[u8]> for XOnly {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl HashInto for XOnly {
    fn hash_into(&self, hash: &mut impl digest::Update) {
        hash.update(&self.bytes)
    }
}

crate::impl_fromstr_deserialize! {
    name => "secp256k1 x-only public key",
    impl for XOnly, 32, |bytes| XOnly::from_bytes(bytes)
}

crate::impl_display_debug_serialize! {
    impl for XOnly, 32, |xonly| xonly.bytes
}
