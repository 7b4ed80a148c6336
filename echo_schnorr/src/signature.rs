use crate::fun::{Scalar, XOnly, marker::*};

/// A BIP-340 Schnorr signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// The x-only public nonce.
    pub R: XOnly,
    /// The challenge response.
    pub s: Scalar<Public, Zero>,
}

impl Signature {
    /// Serializes the signature as 64 bytes: the nonce's x-coordinate then `s`.
    ///
    /// # Examples
    /// ```
    /// # let signature = echo_schnorr::Signature::random(&mut rand::thread_rng());
    /// let bytes = signature.to_bytes();
    /// assert_eq!(signature.R.as_bytes()[..], bytes[..32]);
    /// assert_eq!(signature.s.to_bytes(), bytes[32..]);
    /// ```
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[0..32].copy_from_slice(self.R.as_bytes());
        bytes[32..64].copy_from_slice(&self.s.to_bytes());
        bytes
    }

    /// Deserializes a signature from the output of [`to_bytes`].
    ///
    /// Returns `None` if the first 32 bytes are not the x-coordinate of a point or the last 32
    /// bytes are not less than the curve order.
    ///
    /// [`to_bytes`]: Self::to_bytes
    pub fn from_bytes(bytes: [u8; 64]) -> Option<Self> {
        Self::from_slice(&bytes)
    }

    /// [`from_bytes`](Self::from_bytes) for a slice that must be 64 bytes long.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() != 64 {
            return None;
        }
        Some(Signature {
            R: XOnly::from_slice(&slice[..32])?,
            s: Scalar::from_slice(&slice[32..])?,
        })
    }

    /// A uniformly random signature. It's valid for nothing you'll ever find. For tests.
    pub fn random<R: crate::fun::rand_core::RngCore + crate::fun::rand_core::CryptoRng>(
        rng: &mut R,
    ) -> Self {
        Signature {
            R: XOnly::from_point(&crate::fun::Point::random(rng)),
            s: Scalar::random(rng).public().mark_zero(),
        }
    }
}

crate::fun::impl_fromstr_deserialize! {
    name => "BIP-340 Schnorr signature",
    impl for Signature, 64, |bytes| Signature::from_bytes(bytes)
}

crate::fun::impl_display_debug_serialize! {
    impl for Signature, 64, |signature| signature.to_bytes()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_out_of_range_components() {
        let signature = Signature::random(&mut rand::thread_rng());
        let mut bytes = signature.to_bytes();
        assert_eq!(Signature::from_bytes(bytes), Some(signature));
        bytes[32..].copy_from_slice(&[0xff; 32]);
        assert_eq!(Signature::from_bytes(bytes), None);
        assert_eq!(Signature::from_slice(&bytes[..63]), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn signature_serde_is_hex() {
        let signature = Signature::random(&mut rand::thread_rng());
        let json = serde_json::to_string(&signature).unwrap();
        assert_eq!(json, format!("\"{}\"", signature));
        assert_eq!(serde_json::from_str::<Signature>(&json).unwrap(), signature);
    }
}
