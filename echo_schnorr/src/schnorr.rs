use crate::{
    KeyPair, Signature,
    fun::{
        G, Point, Scalar, XOnly,
        digest::Digest,
        hash::{HashAdd, tagged_hash},
        marker::*,
        op,
    },
};

/// Errors that can happen while deriving keys or signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SignError {
    /// The secret key is zero or not less than the curve order.
    #[error("secret key is not in [1, n)")]
    OutOfRangeScalar,
    /// The derived nonce was zero.
    #[error("derived nonce is zero")]
    ZeroNonce,
    /// A point that must be on the curve came out as the point at infinity.
    #[error("derived point is the point at infinity")]
    InfinityPoint,
    /// The auxiliary randomness must be exactly 32 bytes.
    #[error("aux_rand must be 32 bytes, got {0}")]
    InvalidAuxLength(usize),
}

/// [BIP-340] Schnorr signatures over secp256k1 with SHA256 tagged hashes.
///
/// # Synopsis
///
/// ```
/// use echo_schnorr::Schnorr;
/// let schnorr = Schnorr;
/// let keypair = schnorr.derive_xonly_key([0x42; 32]).unwrap();
/// let message = b"Chancellor on brink of second bailout for banks";
/// let signature = schnorr.sign(&keypair, message, None).unwrap();
/// assert!(schnorr.verify(
///     keypair.public_key().as_bytes(),
///     message,
///     &signature.to_bytes()
/// ));
/// ```
///
/// [BIP-340]: https://github.com/bitcoin/bips/blob/master/bip-0340.mediawiki
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schnorr;

impl Schnorr {
    /// Interprets 32 bytes as a secret key and derives its x-only public key.
    ///
    /// **The secret key in the resulting key pair is not guaranteed to be the same as the
    /// input**. For half of all inputs it is the negation, so that the public key has an even
    /// y-coordinate.
    ///
    /// # Errors
    ///
    /// [`SignError::OutOfRangeScalar`] unless the bytes are in `[1, n)`.
    pub fn derive_xonly_key(&self, secret_key: [u8; 32]) -> Result<KeyPair, SignError> {
        let sk = Scalar::from_bytes(secret_key).ok_or(SignError::OutOfRangeScalar)?;
        Ok(self.new_keypair(sk))
    }

    /// Converts a non-zero scalar to a key pair. See [`derive_xonly_key`](Self::derive_xonly_key).
    pub fn new_keypair(&self, sk: Scalar) -> KeyPair {
        KeyPair::new(sk)
    }

    /// Signs `message` following BIP-340.
    ///
    /// `aux_rand` is mixed into the nonce. `None` means 32 zero bytes.
    ///
    /// # Errors
    ///
    /// - [`SignError::InvalidAuxLength`] if `aux_rand` is not 32 bytes.
    /// - [`SignError::ZeroNonce`] if the nonce hash reduces to zero.
    pub fn sign(
        &self,
        keypair: &KeyPair,
        message: &[u8],
        aux_rand: Option<&[u8]>,
    ) -> Result<Signature, SignError> {
        let aux_rand = match aux_rand {
            Some(aux_rand) => aux_rand,
            None => &[0u8; 32][..],
        };
        if aux_rand.len() != 32 {
            return Err(SignError::InvalidAuxLength(aux_rand.len()));
        }
        let (x, X) = keypair.as_tuple();

        let aux_hash: [u8; 32] = tagged_hash(b"BIP0340/aux").add(aux_rand).finalize().into();
        let mut t = x.to_bytes();
        for (t_byte, aux_byte) in t.iter_mut().zip(aux_hash.iter()) {
            *t_byte ^= aux_byte;
        }

        let mut r = Scalar::<Secret, Zero>::from_hash(
            tagged_hash(b"BIP0340/nonce").add(&t).add(X).add(message),
        )
        .non_zero()
        .ok_or(SignError::ZeroNonce)?;

        let R = XOnly::from_scalar_mul(&mut r);
        let c = self.challenge(&R, X, message);
        let s = op::scalar_add(&r, &op::scalar_mul(&c, x)).public();

        Ok(Signature { R, s })
    }

    /// The BIP-340 challenge `H(R ‖ X ‖ m) mod n`.
    pub fn challenge(&self, R: &XOnly, X: &XOnly, message: &[u8]) -> Scalar<Public, Zero> {
        // the pre-image is adversarially controlled so the challenge may be zero
        Scalar::from_hash(tagged_hash(b"BIP0340/challenge").add(R).add(X).add(message))
    }

    /// Verifies a signature given as raw bytes.
    ///
    /// Anything malformed (wrong lengths, a public key that isn't on the curve, `r >= p`,
    /// `s >= n`) makes this return `false`.
    #[must_use]
    pub fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
        let Some(public_key) = XOnly::from_slice(public_key) else {
            return false;
        };
        let Some(signature) = Signature::from_slice(signature) else {
            return false;
        };
        self.verify_signature(&public_key.to_point(), message, &signature)
    }

    /// Verifies a signature on a message under an even-y public key.
    #[must_use]
    pub fn verify_signature(
        &self,
        public_key: &Point,
        message: &[u8],
        signature: &Signature,
    ) -> bool {
        let X = XOnly::from_point(public_key);
        let c = self.challenge(&signature.R, &X, message);
        let R = op::double_mul(&signature.s, G, &-c, &X.to_point());
        match R.non_zero() {
            Some(R) => R.is_y_even() && R.x_bytes() == *signature.R.as_bytes(),
            None => false,
        }
    }
}
