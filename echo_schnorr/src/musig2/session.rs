use super::{KeyAgg, MuSig2Error, Phase};
use crate::{
    Schnorr, Signature,
    fun::{G, Point, Scalar, XOnly, marker::*, op},
};
use alloc::{collections::BTreeMap, vec::Vec};

/// The aggregate nonce and everything fixed by it.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AggregateNonce {
    R: XOnly,
    parity: bool,
    challenge: Scalar<Public, Zero>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SessionState {
    CollectingNonces,
    NonceFinalized(AggregateNonce),
    CollectingPartials(AggregateNonce),
    Complete(AggregateNonce),
}

impl SessionState {
    fn phase(&self) -> Phase {
        match self {
            SessionState::CollectingNonces => Phase::CollectingNonces,
            SessionState::NonceFinalized(_) => Phase::NonceFinalized,
            SessionState::CollectingPartials(_) => Phase::CollectingPartials,
            SessionState::Complete(_) => Phase::Complete,
        }
    }

    fn aggregate(&self) -> Option<&AggregateNonce> {
        match self {
            SessionState::CollectingNonces => None,
            SessionState::NonceFinalized(agg)
            | SessionState::CollectingPartials(agg)
            | SessionState::Complete(agg) => Some(agg),
        }
    }
}

/// One round of MuSig2 signing over a single message.
///
/// Create it with [`create`], feed it every participant's public nonce with [`register_nonce`]
/// and then every partial signature with [`add_partial_signature`]. See the [module
/// documentation](super) for a full example.
///
/// [`create`]: Self::create
/// [`register_nonce`]: Self::register_nonce
/// [`add_partial_signature`]: Self::add_partial_signature
#[derive(Debug, Clone, PartialEq)]
pub struct MuSig2Session {
    message: Vec<u8>,
    key_agg: KeyAgg,
    nonces: BTreeMap<XOnly, XOnly>,
    partial_signatures: BTreeMap<XOnly, Scalar<Public, Zero>>,
    state: SessionState,
}

impl MuSig2Session {
    /// Starts a session from 32-byte x-only public keys.
    ///
    /// # Errors
    ///
    /// - [`MuSig2Error::InvalidPublicKey`] if a key isn't 32 bytes or isn't on the curve.
    /// - anything [`KeyAgg::new`] returns.
    pub fn create<K: AsRef<[u8]>>(public_keys: &[K], message: &[u8]) -> Result<Self, MuSig2Error> {
        let keys = public_keys
            .iter()
            .enumerate()
            .map(|(index, key)| {
                XOnly::from_slice(key.as_ref()).ok_or(MuSig2Error::InvalidPublicKey { index })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_key_agg(KeyAgg::new(keys)?, message))
    }

    /// Starts a session from keys that were already aggregated.
    pub fn from_key_agg(key_agg: KeyAgg, message: &[u8]) -> Self {
        tracing::debug!(
            participants = key_agg.len(),
            agg_key = %key_agg.agg_public_key(),
            "musig2 session created"
        );
        MuSig2Session {
            message: message.to_vec(),
            key_agg,
            nonces: BTreeMap::new(),
            partial_signatures: BTreeMap::new(),
            state: SessionState::CollectingNonces,
        }
    }

    /// Where the session is in the protocol.
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// The message being signed.
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// The participants' keys and coefficients.
    pub fn key_agg(&self) -> &KeyAgg {
        &self.key_agg
    }

    /// The key the final signature verifies under.
    pub fn agg_public_key(&self) -> XOnly {
        self.key_agg.agg_public_key()
    }

    /// Whether the aggregate key was negated to make its y-coordinate even.
    pub fn key_parity(&self) -> bool {
        self.key_agg.key_parity()
    }

    /// The x-only aggregate nonce once every nonce has been registered.
    pub fn aggregated_nonce(&self) -> Option<XOnly> {
        self.state.aggregate().map(|agg| agg.R)
    }

    /// Whether the sum of the nonces was negated. `None` until the nonce is finalized.
    pub fn nonce_parity(&self) -> Option<bool> {
        self.state.aggregate().map(|agg| agg.parity)
    }

    /// The public nonces registered so far, ordered by participant key.
    pub fn nonces(&self) -> impl Iterator<Item = (XOnly, XOnly)> + '_ {
        self.nonces.iter().map(|(participant, nonce)| (*participant, *nonce))
    }

    /// The partial signatures added so far, ordered by participant key.
    pub fn partial_signatures(&self) -> impl Iterator<Item = (XOnly, Scalar<Public, Zero>)> + '_ {
        self.partial_signatures
            .iter()
            .map(|(participant, partial)| (*participant, *partial))
    }

    /// Records `participant`'s 32-byte x-only public nonce.
    ///
    /// The last nonce to arrive finalizes the aggregate nonce and moves the session to
    /// [`Phase::NonceFinalized`].
    ///
    /// # Errors
    ///
    /// - [`MuSig2Error::WrongState`] if the nonce was already finalized.
    /// - [`MuSig2Error::UnknownParticipant`] if `participant` isn't in the session.
    /// - [`MuSig2Error::InvalidNonceLength`] and [`MuSig2Error::InvalidNonce`] for bad nonces.
    /// - [`MuSig2Error::NonceAlreadyRegistered`] if `participant` already sent one.
    /// - [`MuSig2Error::InfinityPoint`] if the nonces sum to infinity. The offending nonce is not
    ///   kept.
    pub fn register_nonce(&mut self, participant: &XOnly, nonce: &[u8]) -> Result<(), MuSig2Error> {
        if !matches!(self.state, SessionState::CollectingNonces) {
            return Err(self.reject(MuSig2Error::WrongState {
                expected: Phase::CollectingNonces,
                found: self.phase(),
            }));
        }
        self.ensure_participant(participant)?;
        let nonce: [u8; 32] = nonce
            .try_into()
            .map_err(|_| self.reject(MuSig2Error::InvalidNonceLength(nonce.len())))?;
        let nonce = Point::lift_x(nonce).map_err(|e| self.reject(MuSig2Error::InvalidNonce(e)))?;
        if self.nonces.contains_key(participant) {
            return Err(self.reject(MuSig2Error::NonceAlreadyRegistered(*participant)));
        }

        self.nonces.insert(*participant, XOnly::from_point(&nonce));
        tracing::debug!(
            %participant,
            registered = self.nonces.len(),
            participants = self.key_agg.len(),
            "nonce registered"
        );

        if self.nonces.len() == self.key_agg.len() {
            let points = self.nonces.values().map(XOnly::to_point).collect::<Vec<_>>();
            let sum = points
                .iter()
                .fold(Point::zero(), |acc, point| op::point_add(&acc, point));
            let Some(sum) = sum.non_zero() else {
                self.nonces.remove(participant);
                return Err(self.reject(MuSig2Error::InfinityPoint));
            };
            let (R, parity) = sum.into_point_with_even_y();
            let R = XOnly::from_point(&R);
            let challenge = Schnorr.challenge(&R, &self.key_agg.agg_public_key(), &self.message);
            self.state = SessionState::NonceFinalized(AggregateNonce {
                R,
                parity,
                challenge,
            });
            tracing::debug!(
                aggregated_nonce = %R,
                nonce_parity = parity,
                "{} -> {}",
                Phase::CollectingNonces,
                Phase::NonceFinalized
            );
        }
        Ok(())
    }

    /// The BIP-340 challenge over the aggregate nonce, aggregate key and message.
    ///
    /// # Errors
    ///
    /// [`MuSig2Error::AggregateNotFinalized`] until every nonce is registered.
    pub fn challenge(&self) -> Result<Scalar<Public, Zero>, MuSig2Error> {
        Ok(self.finalized_nonce()?.challenge)
    }

    /// Computes `participant`'s partial signature `k' + e·a·x'`.
    ///
    /// `k'` and `x'` are the secret nonce and key negated as needed to match the parity of the
    /// aggregate nonce and key. Both secrets must be the ones behind `participant`'s x-only key
    /// and registered nonce; negated forms of either are accepted.
    ///
    /// This doesn't change the session. Hand the result to every coordinator with
    /// [`add_partial_signature`](Self::add_partial_signature).
    ///
    /// # Errors
    ///
    /// - [`MuSig2Error::AggregateNotFinalized`] until every nonce is registered.
    /// - [`MuSig2Error::WrongState`] once the session is complete.
    /// - [`MuSig2Error::UnknownParticipant`] if `participant` isn't in the session.
    /// - [`MuSig2Error::KeyMismatch`] or [`MuSig2Error::NonceMismatch`] if a secret doesn't
    ///   belong to `participant`.
    pub fn compute_partial_signature(
        &self,
        participant: &XOnly,
        secret_key: &Scalar,
        secret_nonce: &Scalar,
    ) -> Result<Scalar<Public, Zero>, MuSig2Error> {
        let agg = *self.finalized_nonce()?;
        if let SessionState::Complete(_) = self.state {
            return Err(self.reject(MuSig2Error::WrongState {
                expected: Phase::CollectingPartials,
                found: Phase::Complete,
            }));
        }
        let a = self.ensure_participant(participant)?;

        let mut x = *secret_key;
        if XOnly::from_scalar_mul(&mut x) != *participant {
            return Err(self.reject(MuSig2Error::KeyMismatch(*participant)));
        }
        let mut k = *secret_nonce;
        if Some(&XOnly::from_scalar_mul(&mut k)) != self.nonces.get(participant) {
            return Err(self.reject(MuSig2Error::NonceMismatch(*participant)));
        }
        x.conditional_negate(self.key_agg.key_parity());
        k.conditional_negate(agg.parity);

        let eax = op::scalar_mul(&op::scalar_mul(&agg.challenge, &a), &x);
        Ok(op::scalar_add(&k, &eax).public())
    }

    /// Checks `partial` against `participant`'s key and registered nonce.
    ///
    /// # Errors
    ///
    /// - [`MuSig2Error::AggregateNotFinalized`] until every nonce is registered.
    /// - [`MuSig2Error::UnknownParticipant`] if `participant` isn't in the session.
    pub fn verify_partial_signature(
        &self,
        participant: &XOnly,
        partial: &Scalar<Public, Zero>,
    ) -> Result<bool, MuSig2Error> {
        let agg = self.finalized_nonce()?;
        let a = self.ensure_participant(participant)?;
        let R_i = match self.nonces.get(participant) {
            Some(nonce) => nonce.to_point().conditional_negate(agg.parity),
            None => return Err(self.reject(MuSig2Error::AggregateNotFinalized)),
        };
        let X_i = participant
            .to_point()
            .conditional_negate(self.key_agg.key_parity());
        let ea = op::scalar_mul(&agg.challenge, &a).public();
        let lhs = op::scalar_mul_point(partial, G);
        let rhs = op::point_add(&R_i, &op::scalar_mul_point(&ea, &X_i));
        Ok(lhs == rhs)
    }

    /// Adds `participant`'s 32-byte partial signature after checking it.
    ///
    /// The first partial moves the session to [`Phase::CollectingPartials`] and the last one to
    /// [`Phase::Complete`].
    ///
    /// # Errors
    ///
    /// - [`MuSig2Error::AggregateNotFinalized`] until every nonce is registered.
    /// - [`MuSig2Error::WrongState`] once the session is complete.
    /// - [`MuSig2Error::UnknownParticipant`] if `participant` isn't in the session.
    /// - [`MuSig2Error::PartialAlreadyRegistered`] if `participant` already added one.
    /// - [`MuSig2Error::InvalidPartialSignature`] if the bytes aren't a scalar less than `n` or the
    ///   partial signature doesn't verify.
    pub fn add_partial_signature(
        &mut self,
        participant: &XOnly,
        partial: &[u8],
    ) -> Result<(), MuSig2Error> {
        let agg = *self.finalized_nonce()?;
        if let SessionState::Complete(_) = self.state {
            return Err(self.reject(MuSig2Error::WrongState {
                expected: Phase::CollectingPartials,
                found: Phase::Complete,
            }));
        }
        self.ensure_participant(participant)?;
        if self.partial_signatures.contains_key(participant) {
            return Err(self.reject(MuSig2Error::PartialAlreadyRegistered(*participant)));
        }
        let partial = Scalar::<Public, Zero>::from_slice(partial)
            .ok_or_else(|| self.reject(MuSig2Error::InvalidPartialSignature))?;
        if !self.verify_partial_signature(participant, &partial)? {
            return Err(self.reject(MuSig2Error::InvalidPartialSignature));
        }

        self.partial_signatures.insert(*participant, partial);
        tracing::debug!(
            %participant,
            added = self.partial_signatures.len(),
            participants = self.key_agg.len(),
            "partial signature added"
        );

        let before = self.phase();
        self.state = if self.partial_signatures.len() == self.key_agg.len() {
            SessionState::Complete(agg)
        } else {
            SessionState::CollectingPartials(agg)
        };
        if before != self.phase() {
            tracing::debug!("{} -> {}", before, self.phase());
        }
        Ok(())
    }

    /// Combines the partial signatures into a BIP-340 signature under
    /// [`agg_public_key`](Self::agg_public_key).
    ///
    /// # Errors
    ///
    /// - [`MuSig2Error::AggregateNotFinalized`] until every nonce is registered.
    /// - [`MuSig2Error::MissingPartialSignatures`] until every partial signature is added.
    pub fn final_signature(&self) -> Result<Signature, MuSig2Error> {
        let agg = self.finalized_nonce()?;
        if !matches!(self.state, SessionState::Complete(_)) {
            return Err(self.reject(MuSig2Error::MissingPartialSignatures {
                missing: self.key_agg.len() - self.partial_signatures.len(),
            }));
        }
        let s = self
            .partial_signatures
            .values()
            .fold(Scalar::<Public, Zero>::zero(), |acc, partial| {
                op::scalar_add(&acc, partial).public()
            });
        Ok(Signature { R: agg.R, s })
    }

    fn finalized_nonce(&self) -> Result<&AggregateNonce, MuSig2Error> {
        self.state
            .aggregate()
            .ok_or_else(|| self.reject(MuSig2Error::AggregateNotFinalized))
    }

    fn ensure_participant(&self, participant: &XOnly) -> Result<Scalar<Public>, MuSig2Error> {
        self.key_agg
            .coefficient(participant)
            .ok_or_else(|| self.reject(MuSig2Error::UnknownParticipant(*participant)))
    }

    fn reject(&self, error: MuSig2Error) -> MuSig2Error {
        tracing::warn!(phase = %self.phase(), %error, "musig2 call rejected");
        error
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        KeyPair,
        musig2::{NonceKeyPair, generate_nonce},
    };

    struct Party {
        keypair: KeyPair,
        nonce: NonceKeyPair,
    }

    fn setup(n: usize, message: &[u8]) -> (MuSig2Session, Vec<Party>) {
        let parties = (0..n)
            .map(|i| {
                let keypair = KeyPair::random(&mut rand::thread_rng());
                let mut session_id = [0u8; 32];
                session_id[0] = i as u8;
                let nonce =
                    generate_nonce(keypair.secret_key(), &session_id, message, None).unwrap();
                Party { keypair, nonce }
            })
            .collect::<Vec<_>>();
        let keys = parties
            .iter()
            .map(|party| party.keypair.public_key().into_bytes())
            .collect::<Vec<_>>();
        (MuSig2Session::create(&keys, message).unwrap(), parties)
    }

    #[test]
    fn out_of_order_calls_fail() {
        let (mut session, parties) = setup(2, b"m");
        let alice = &parties[0];
        let pk = alice.keypair.public_key();
        assert_eq!(session.challenge(), Err(MuSig2Error::AggregateNotFinalized));
        assert_eq!(
            session.final_signature(),
            Err(MuSig2Error::AggregateNotFinalized)
        );
        assert_eq!(
            session.add_partial_signature(pk, &[0u8; 32]),
            Err(MuSig2Error::AggregateNotFinalized)
        );

        session
            .register_nonce(pk, alice.nonce.public().as_bytes())
            .unwrap();
        assert_eq!(
            session.register_nonce(pk, alice.nonce.public().as_bytes()),
            Err(MuSig2Error::NonceAlreadyRegistered(*pk))
        );
        assert_eq!(session.phase(), Phase::CollectingNonces);

        let bob = &parties[1];
        session
            .register_nonce(bob.keypair.public_key(), bob.nonce.public().as_bytes())
            .unwrap();
        assert_eq!(session.phase(), Phase::NonceFinalized);
        assert_eq!(
            session.register_nonce(pk, alice.nonce.public().as_bytes()),
            Err(MuSig2Error::WrongState {
                expected: Phase::CollectingNonces,
                found: Phase::NonceFinalized
            })
        );
        assert_eq!(
            session.final_signature(),
            Err(MuSig2Error::MissingPartialSignatures { missing: 2 })
        );
    }

    #[test]
    fn rejects_bad_inputs() {
        let (mut session, parties) = setup(2, b"m");
        let stranger = KeyPair::random(&mut rand::thread_rng());
        let pk = parties[0].keypair.public_key();
        assert_eq!(
            session.register_nonce(stranger.public_key(), &[0u8; 32]),
            Err(MuSig2Error::UnknownParticipant(*stranger.public_key()))
        );
        assert_eq!(
            session.register_nonce(pk, &[0u8; 31]),
            Err(MuSig2Error::InvalidNonceLength(31))
        );
        assert!(matches!(
            session.register_nonce(pk, &[0xff; 32]),
            Err(MuSig2Error::InvalidNonce(_))
        ));
        assert_eq!(
            MuSig2Session::create(&[[0xffu8; 32]], b"m"),
            Err(MuSig2Error::InvalidPublicKey { index: 0 })
        );
    }

    #[test]
    fn partial_signatures_are_checked() {
        let (mut session, parties) = setup(3, b"m");
        for party in &parties {
            session
                .register_nonce(party.keypair.public_key(), party.nonce.public().as_bytes())
                .unwrap();
        }
        let (alice, bob) = (&parties[0], &parties[1]);
        let pk = alice.keypair.public_key();

        assert_eq!(
            session.compute_partial_signature(pk, bob.keypair.secret_key(), alice.nonce.secret()),
            Err(MuSig2Error::KeyMismatch(*pk))
        );
        assert_eq!(
            session.compute_partial_signature(pk, alice.keypair.secret_key(), bob.nonce.secret()),
            Err(MuSig2Error::NonceMismatch(*pk))
        );

        let partial = session
            .compute_partial_signature(pk, alice.keypair.secret_key(), alice.nonce.secret())
            .unwrap();
        // accepts the negated key too
        let negated = session
            .compute_partial_signature(pk, &-alice.keypair.secret_key(), alice.nonce.secret())
            .unwrap();
        assert_eq!(partial, negated);

        assert_eq!(session.verify_partial_signature(pk, &partial), Ok(true));
        assert_eq!(
            session.verify_partial_signature(bob.keypair.public_key(), &partial),
            Ok(false)
        );
        assert_eq!(
            session.add_partial_signature(bob.keypair.public_key(), &partial.to_bytes()),
            Err(MuSig2Error::InvalidPartialSignature)
        );
        assert_eq!(
            session.add_partial_signature(pk, &crate::fun::CURVE.n),
            Err(MuSig2Error::InvalidPartialSignature)
        );

        session
            .add_partial_signature(pk, &partial.to_bytes())
            .unwrap();
        assert_eq!(session.phase(), Phase::CollectingPartials);
        assert_eq!(
            session.add_partial_signature(pk, &partial.to_bytes()),
            Err(MuSig2Error::PartialAlreadyRegistered(*pk))
        );
        assert_eq!(
            session.final_signature(),
            Err(MuSig2Error::MissingPartialSignatures { missing: 2 })
        );

        for party in &parties[1..] {
            let pk = party.keypair.public_key();
            let partial = session
                .compute_partial_signature(pk, party.keypair.secret_key(), party.nonce.secret())
                .unwrap();
            session
                .add_partial_signature(pk, &partial.to_bytes())
                .unwrap();
        }
        assert_eq!(session.phase(), Phase::Complete);
        assert_eq!(
            session.compute_partial_signature(pk, alice.keypair.secret_key(), alice.nonce.secret()),
            Err(MuSig2Error::WrongState {
                expected: Phase::CollectingPartials,
                found: Phase::Complete
            })
        );
        let signature = session.final_signature().unwrap();
        assert!(Schnorr.verify_signature(
            &session.agg_public_key().to_point(),
            b"m",
            &signature
        ));
    }
}
