use super::{MuSig2Error, MuSig2Session};
use crate::fun::{Scalar, XOnly, hex, marker::*};
use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};

/// A [`MuSig2Session`] as plain strings, for storing it or sending it to another coordinator.
///
/// Participants are keyed by their x-only public key hex. All byte strings are lowercase hex.
///
/// ```
/// # use echo_schnorr::{KeyPair, musig2::{MuSig2Session, SessionWire}};
/// # let alice = KeyPair::random(&mut rand::thread_rng());
/// # let bob = KeyPair::random(&mut rand::thread_rng());
/// let session = MuSig2Session::create(&[alice.public_key(), bob.public_key()], b"hello").unwrap();
/// let wire = session.to_wire();
/// assert_eq!(wire.message, "68656c6c6f");
/// assert_eq!(MuSig2Session::from_wire(&wire).unwrap(), session);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(crate::fun::serde::Serialize, crate::fun::serde::Deserialize),
    serde(crate = "crate::fun::serde")
)]
pub struct SessionWire {
    /// The message being signed.
    pub message: String,
    /// The participants' x-only keys in session order.
    pub public_keys: Vec<String>,
    /// The even-y aggregate key.
    pub aggregated_public_key: String,
    /// `1` if the weighted key sum was negated, otherwise `0`.
    pub key_parity: u8,
    /// Each participant's aggregation coefficient as 64 hex digits.
    pub coefficients: BTreeMap<String, String>,
    /// The x-only public nonces registered so far.
    pub nonces: BTreeMap<String, String>,
    /// The x-only aggregate nonce once it's finalized.
    pub aggregated_nonce: Option<String>,
    /// `1` if the nonce sum was negated. `0` until the nonce is finalized.
    pub nonce_parity: u8,
    /// The partial signatures added so far as 64 hex digits.
    pub partial_signatures: BTreeMap<String, String>,
}

/// Why a [`SessionWire`] was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// The field isn't valid hex of the right length or doesn't decode to a valid value.
    #[error("wire field `{field}` is malformed")]
    InvalidField {
        /// Name of the field.
        field: &'static str,
    },
    /// Parity bits are `0` or `1`.
    #[error("wire field `{field}` must be 0 or 1, got {value}")]
    InvalidParity {
        /// Name of the field.
        field: &'static str,
        /// The value found.
        value: u8,
    },
    /// The stored value differs from the one recomputed from the public keys and nonces.
    #[error("wire field `{field}` does not match the recomputed session")]
    Mismatch {
        /// Name of the field.
        field: &'static str,
    },
}

fn parity(field: &'static str, value: u8) -> Result<bool, WireError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(WireError::InvalidParity { field, value }),
    }
}

fn xonly(field: &'static str, value: &str) -> Result<XOnly, WireError> {
    value.parse().map_err(|_| WireError::InvalidField { field })
}

impl MuSig2Session {
    /// Converts the session to its wire form.
    pub fn to_wire(&self) -> SessionWire {
        let key_agg = self.key_agg();
        SessionWire {
            message: hex::encode(self.message()),
            public_keys: key_agg.keys().map(|key| key.to_string()).collect(),
            aggregated_public_key: self.agg_public_key().to_string(),
            key_parity: self.key_parity() as u8,
            coefficients: key_agg
                .keys()
                .filter_map(|key| Some((key.to_string(), key_agg.coefficient(&key)?.to_string())))
                .collect(),
            nonces: self
                .nonces()
                .map(|(participant, nonce)| (participant.to_string(), nonce.to_string()))
                .collect(),
            aggregated_nonce: self.aggregated_nonce().map(|R| R.to_string()),
            nonce_parity: self.nonce_parity().unwrap_or(false) as u8,
            partial_signatures: self
                .partial_signatures()
                .map(|(participant, partial)| (participant.to_string(), partial.to_string()))
                .collect(),
        }
    }

    /// Rebuilds a session from its wire form.
    ///
    /// The session is recreated from `public_keys` and `message` and then replayed: every nonce is
    /// registered and every partial signature added again, so they are all re-validated. The
    /// stored aggregate key, coefficients and aggregate nonce must match what the replay computes.
    ///
    /// # Errors
    ///
    /// [`MuSig2Error::Wire`] for malformed or inconsistent fields, or whatever the replay returns.
    pub fn from_wire(wire: &SessionWire) -> Result<MuSig2Session, MuSig2Error> {
        let message = hex::decode(&wire.message).map_err(|_| WireError::InvalidField {
            field: "message",
        })?;
        let public_keys = wire
            .public_keys
            .iter()
            .map(|key| xonly("public_keys", key).map(XOnly::into_bytes))
            .collect::<Result<Vec<_>, _>>()?;
        let mut session = MuSig2Session::create(&public_keys, &message)?;

        if xonly("aggregated_public_key", &wire.aggregated_public_key)? != session.agg_public_key() {
            return Err(WireError::Mismatch {
                field: "aggregated_public_key",
            }
            .into());
        }
        if parity("key_parity", wire.key_parity)? != session.key_parity() {
            return Err(WireError::Mismatch {
                field: "key_parity",
            }
            .into());
        }
        if wire.coefficients.len() != session.key_agg().len() {
            return Err(WireError::Mismatch {
                field: "coefficients",
            }
            .into());
        }
        for (participant, coefficient) in &wire.coefficients {
            let participant = xonly("coefficients", participant)?;
            let coefficient = coefficient
                .parse::<Scalar<Public>>()
                .map_err(|_| WireError::InvalidField {
                    field: "coefficients",
                })?;
            if session.key_agg().coefficient(&participant) != Some(coefficient) {
                return Err(WireError::Mismatch {
                    field: "coefficients",
                }
                .into());
            }
        }

        for (participant, nonce) in &wire.nonces {
            let participant = xonly("nonces", participant)?;
            let nonce = hex::decode_array::<32>(nonce)
                .map_err(|_| WireError::InvalidField { field: "nonces" })?;
            session.register_nonce(&participant, &nonce)?;
        }

        let aggregated_nonce = wire
            .aggregated_nonce
            .as_deref()
            .map(|R| xonly("aggregated_nonce", R))
            .transpose()?;
        if aggregated_nonce != session.aggregated_nonce() {
            return Err(WireError::Mismatch {
                field: "aggregated_nonce",
            }
            .into());
        }
        if parity("nonce_parity", wire.nonce_parity)? != session.nonce_parity().unwrap_or(false) {
            return Err(WireError::Mismatch {
                field: "nonce_parity",
            }
            .into());
        }

        for (participant, partial) in &wire.partial_signatures {
            let participant = xonly("partial_signatures", participant)?;
            let partial = hex::decode_array::<32>(partial).map_err(|_| WireError::InvalidField {
                field: "partial_signatures",
            })?;
            session.add_partial_signature(&participant, &partial)?;
        }

        Ok(session)
    }
}
