//! A MuSig2 signing session that produces ordinary BIP-340 signatures.
//!
//! ## Synopsis
//!
//! ```
//! use echo_schnorr::{
//!     KeyPair, Schnorr,
//!     musig2::{MuSig2Session, generate_nonce},
//! };
//! let alice = KeyPair::random(&mut rand::thread_rng());
//! let bob = KeyPair::random(&mut rand::thread_rng());
//! let message = b"chancellor on brink of second bailout for banks";
//!
//! // everyone builds the same session from the same public keys
//! let public_keys = [alice.public_key().into_bytes(), bob.public_key().into_bytes()];
//! let mut session = MuSig2Session::create(&public_keys, message).unwrap();
//!
//! // each party makes a nonce for this session and shares the public half
//! let alice_nonce = generate_nonce(alice.secret_key(), b"alice-session-0001", message, None).unwrap();
//! let bob_nonce = generate_nonce(bob.secret_key(), b"bob-session-000001", message, None).unwrap();
//! session.register_nonce(alice.public_key(), alice_nonce.public().as_bytes()).unwrap();
//! session.register_nonce(bob.public_key(), bob_nonce.public().as_bytes()).unwrap();
//!
//! // with every nonce in, each party signs
//! let alice_partial = session
//!     .compute_partial_signature(alice.public_key(), alice.secret_key(), alice_nonce.secret())
//!     .unwrap();
//! let bob_partial = session
//!     .compute_partial_signature(bob.public_key(), bob.secret_key(), bob_nonce.secret())
//!     .unwrap();
//! assert!(session.verify_partial_signature(bob.public_key(), &bob_partial).unwrap());
//! session.add_partial_signature(alice.public_key(), &alice_partial.to_bytes()).unwrap();
//! session.add_partial_signature(bob.public_key(), &bob_partial.to_bytes()).unwrap();
//!
//! let signature = session.final_signature().unwrap();
//! assert!(Schnorr.verify(
//!     session.agg_public_key().as_bytes(),
//!     message,
//!     &signature.to_bytes()
//! ));
//! ```
//!
//! ## Description
//!
//! Key aggregation hashes the sorted list of x-only keys into `L` and gives each key the
//! coefficient `H("MuSig/KeyAgg coefficient", L ‖ key) mod n`. The aggregate key is the
//! coefficient weighted sum, negated if needed so it has an even y-coordinate. A session with a
//! single key uses that key as is.
//!
//! Each party contributes a single x-only nonce. The session adds them up once all have arrived
//! and from then on the BIP-340 challenge over the aggregate nonce and key is fixed.
//!
//! The session moves through the [`Phase`]s in order and every call made in the wrong phase is an
//! error rather than a silently wrong result.
use crate::fun::{
    CurveError, Scalar, XOnly,
    hash::{HashAdd, tagged_hash},
    marker::*,
};
use core::fmt;

mod key_agg;
pub use key_agg::KeyAgg;
mod session;
pub use session::MuSig2Session;
mod wire;
pub use wire::{SessionWire, WireError};

/// Minimum length of the session id passed to [`generate_nonce`].
pub const MIN_SESSION_ID_LEN: usize = 16;

/// Where a [`MuSig2Session`] is in the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for a nonce from every participant.
    CollectingNonces,
    /// Every nonce is in and the aggregate nonce and challenge are fixed.
    NonceFinalized,
    /// At least one partial signature has been added.
    CollectingPartials,
    /// Every participant's partial signature is in.
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Phase::CollectingNonces => "collecting nonces",
            Phase::NonceFinalized => "nonce finalized",
            Phase::CollectingPartials => "collecting partial signatures",
            Phase::Complete => "complete",
        })
    }
}

/// Errors from key aggregation and the signing session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MuSig2Error {
    /// A session needs at least one public key.
    #[error("at least one public key is required")]
    NoPublicKeys,
    /// The public key at `index` is not 32 bytes or not the x-coordinate of a point.
    #[error("public key {index} is not a valid x-only public key")]
    InvalidPublicKey {
        /// Position in the list passed in.
        index: usize,
    },
    /// The same public key was passed twice.
    #[error("public key {0} appears more than once")]
    DuplicateParticipant(XOnly),
    /// The key isn't one of the session's participants.
    #[error("{0} is not a participant in this session")]
    UnknownParticipant(XOnly),
    /// Public nonces are 32 bytes.
    #[error("public nonce must be 32 bytes, got {0}")]
    InvalidNonceLength(usize),
    /// The public nonce is not the x-coordinate of a point.
    #[error("public nonce is not a valid x-only point")]
    InvalidNonce(#[source] CurveError),
    /// The participant already registered a nonce.
    #[error("{0} already registered a nonce")]
    NonceAlreadyRegistered(XOnly),
    /// The secret key passed in isn't the one behind the participant's public key.
    #[error("secret key does not belong to {0}")]
    KeyMismatch(XOnly),
    /// The secret nonce passed in isn't the one behind the participant's registered nonce.
    #[error("secret nonce does not match the nonce registered by {0}")]
    NonceMismatch(XOnly),
    /// The participant already contributed a partial signature.
    #[error("{0} already contributed a partial signature")]
    PartialAlreadyRegistered(XOnly),
    /// The call isn't valid in the session's current phase.
    #[error("session is {found} but must be {expected}")]
    WrongState {
        /// The phase the call needs.
        expected: Phase,
        /// The phase the session is in.
        found: Phase,
    },
    /// Not every participant has registered a nonce yet.
    #[error("the aggregate nonce has not been finalized")]
    AggregateNotFinalized,
    /// Not every participant has contributed a partial signature yet.
    #[error("{missing} partial signatures are missing")]
    MissingPartialSignatures {
        /// How many are still needed.
        missing: usize,
    },
    /// An aggregate key or nonce summed to the point at infinity.
    #[error("aggregated point is the point at infinity")]
    InfinityPoint,
    /// Session ids must carry at least [`MIN_SESSION_ID_LEN`] bytes.
    #[error("session id must be at least 16 bytes, got {0}")]
    ShortSessionId(usize),
    /// The nonce hash reduced to zero.
    #[error("derived nonce is zero")]
    ZeroNonce,
    /// Partial signatures are 32-byte scalars less than the curve order.
    #[error("partial signature must be a 32 byte scalar less than n")]
    InvalidPartialSignature,
    /// A [`SessionWire`] couldn't be turned back into a session.
    #[error(transparent)]
    Wire(#[from] WireError),
}

/// A secret nonce and its x-only public nonce.
///
/// The secret is normalised so that `secret * G` has an even y-coordinate, i.e. it is exactly
/// the point the other parties get by lifting [`public`](Self::public).
#[derive(Clone, PartialEq)]
pub struct NonceKeyPair {
    secret: Scalar,
    public: XOnly,
}

impl core::fmt::Debug for NonceKeyPair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NonceKeyPair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl NonceKeyPair {
    /// Creates a nonce pair from a secret nonce, negating it if needed.
    pub fn new(mut secret: Scalar) -> Self {
        let public = XOnly::from_scalar_mul(&mut secret);
        NonceKeyPair { secret, public }
    }

    /// The secret nonce. Use it for exactly one partial signature.
    pub fn secret(&self) -> &Scalar {
        &self.secret
    }

    /// The public nonce to share with the other participants.
    pub fn public(&self) -> &XOnly {
        &self.public
    }
}

/// Derives a nonce from `H("MuSig/Nonce", session_id ‖ secret ‖ message [‖ extra_input]) mod n`.
///
/// The nonce is deterministic so **you must never use the same `session_id` twice** with the same
/// secret key. If you do, your secret key can be computed from the two partial signatures.
///
/// # Errors
///
/// - [`MuSig2Error::ShortSessionId`] if `session_id` is shorter than [`MIN_SESSION_ID_LEN`].
/// - [`MuSig2Error::ZeroNonce`] if the hash reduces to zero.
pub fn generate_nonce(
    secret: &Scalar,
    session_id: &[u8],
    message: &[u8],
    extra_input: Option<&[u8]>,
) -> Result<NonceKeyPair, MuSig2Error> {
    if session_id.len() < MIN_SESSION_ID_LEN {
        return Err(MuSig2Error::ShortSessionId(session_id.len()));
    }
    let mut hash = tagged_hash(b"MuSig/Nonce")
        .add(session_id)
        .add(&secret.to_bytes())
        .add(message);
    if let Some(extra_input) = extra_input {
        hash = hash.add(extra_input);
    }
    let secret = Scalar::<Secret, Zero>::from_hash(hash)
        .non_zero()
        .ok_or(MuSig2Error::ZeroNonce)?;
    Ok(NonceKeyPair::new(secret))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fun::{G, op};
    use alloc::string::ToString;

    #[test]
    fn nonce_debug_hides_the_secret() {
        let nonce = NonceKeyPair::new(Scalar::random(&mut rand::thread_rng()));
        let debug = format!("{:?}", nonce);
        assert!(debug.contains(&nonce.public().to_string()));
        assert!(!debug.contains(&nonce.secret().to_string()));
    }

    #[test]
    fn short_session_id() {
        let secret = Scalar::random(&mut rand::thread_rng());
        assert_eq!(
            generate_nonce(&secret, &[0u8; 15], b"m", None),
            Err(MuSig2Error::ShortSessionId(15))
        );
        assert!(generate_nonce(&secret, &[0u8; 16], b"m", None).is_ok());
    }

    #[test]
    fn nonce_is_even_and_deterministic() {
        let secret = Scalar::random(&mut rand::thread_rng());
        let sid = b"0123456789abcdef";
        let nonce = generate_nonce(&secret, sid, b"m", None).unwrap();
        assert_eq!(nonce, generate_nonce(&secret, sid, b"m", None).unwrap());
        assert_eq!(op::scalar_mul_point(nonce.secret(), G), nonce.public().to_point());
        assert_ne!(
            nonce,
            generate_nonce(&secret, sid, b"m", Some(&b"extra"[..])).unwrap()
        );
        let hashed = Scalar::<Secret, Zero>::from_hash(
            tagged_hash(b"MuSig/Nonce")
                .add(&sid[..])
                .add(&secret.to_bytes())
                .add(b"m"),
        );
        assert!(hashed == *nonce.secret() || hashed == -nonce.secret());
    }
}
