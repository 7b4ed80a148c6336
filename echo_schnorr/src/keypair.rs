use crate::fun::{Point, Scalar, XOnly, marker::*, rand_core::{CryptoRng, RngCore}};

/// A secret key and its x-only public key.
///
/// The secret key is always the one whose public key has an even y-coordinate, so it may be the
/// negation of the scalar you created the `KeyPair` from.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KeyPair {
    pub(crate) sk: Scalar,
    pub(crate) pk: XOnly,
}

impl KeyPair {
    /// Creates a key pair from a secret scalar, negating it if `sk * G` has odd y.
    pub fn new(mut sk: Scalar) -> Self {
        let pk = XOnly::from_scalar_mul(&mut sk);
        KeyPair { sk, pk }
    }

    /// Returns a reference to the secret key.
    pub fn secret_key(&self) -> &Scalar {
        &self.sk
    }

    /// Returns a reference to the public key.
    pub fn public_key(&self) -> &XOnly {
        &self.pk
    }

    /// Gets a reference to the key-pair as a tuple
    ///
    /// ```
    /// # use echo_schnorr::KeyPair;
    /// # let keypair = KeyPair::random(&mut rand::thread_rng());
    /// let (sec_key, pub_key) = keypair.as_tuple();
    /// ```
    pub fn as_tuple(&self) -> (&Scalar, &XOnly) {
        (&self.sk, &self.pk)
    }

    /// A key pair from a random secret key.
    pub fn random<R: CryptoRng + RngCore>(rng: &mut R) -> KeyPair {
        Self::new(Scalar::random(rng))
    }

    /// The even-y public key as a [`Point`].
    pub fn verification_key(&self) -> Point {
        self.pk.to_point()
    }
}

impl core::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyPair")
            .field("pk", &self.pk)
            .finish_non_exhaustive()
    }
}

impl From<KeyPair> for (Scalar, XOnly) {
    fn from(kp: KeyPair) -> Self {
        (kp.sk, kp.pk)
    }
}

#[cfg(all(test, feature = "alloc"))]
mod test {
    use super::*;
    use alloc::{format, string::ToString};

    #[test]
    fn debug_shows_only_the_public_key() {
        let keypair = KeyPair::random(&mut rand::thread_rng());
        let debug = format!("{:?}", keypair);
        assert!(debug.contains(&keypair.public_key().to_string()));
        assert!(!debug.contains(&keypair.secret_key().to_string()));
    }
}
