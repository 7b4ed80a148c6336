//! Wallet Import Format private keys.
//!
//! A WIF string is `Base58Check(prefix ‖ secret [‖ 0x01])`. The prefix is `0x80` on mainnet and
//! `0xEF` on testnet. The trailing `0x01` marks that the key's public key is used compressed.
use crate::{
    base58::{self, Base58Error},
    version_table::Network,
};
use echo_curve::{Scalar, marker::*};

const MAINNET_PREFIX: u8 = 0x80;
const TESTNET_PREFIX: u8 = 0xEF;
const COMPRESSED_FLAG: u8 = 0x01;

/// Errors from [`parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WifError {
    /// The string was not valid Base58Check.
    #[error(transparent)]
    Base58(#[from] Base58Error),
    /// The payload must be 33 bytes (uncompressed) or 34 bytes (compressed).
    #[error("WIF payload must be 33 or 34 bytes, got {0}")]
    WrongLength(usize),
    /// The first byte was neither `0x80` nor `0xEF`.
    #[error("unknown WIF network prefix {0:#04x}")]
    UnknownNetwork(u8),
    /// A 34 byte payload must end in `0x01`.
    #[error("34 byte WIF payload ends in {0:#04x} instead of the compression flag")]
    MissingCompressionFlag(u8),
    /// The secret is zero or not less than the curve order.
    #[error("WIF secret is not a valid secp256k1 scalar")]
    OutOfRangeScalar,
}

/// A decoded WIF private key.
#[derive(Clone, Copy, PartialEq)]
pub struct WifKey {
    /// Which network the prefix was for.
    pub network: Network,
    /// Whether the public key should be serialised compressed.
    pub compressed: bool,
    /// The private key.
    pub secret: Scalar,
}

/// Decodes a WIF string. Surrounding whitespace is ignored.
///
/// ```
/// use echo_keys::{version_table::Network, wif};
/// let key = wif::parse("KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn").unwrap();
/// assert_eq!(key.network, Network::Mainnet);
/// assert!(key.compressed);
/// assert_eq!(key.secret, echo_curve::Scalar::<echo_curve::marker::Secret, _>::one());
/// ```
pub fn parse(wif: &str) -> Result<WifKey, WifError> {
    let payload = base58::check_decode(wif.trim())?;
    let compressed = match payload.len() {
        33 => false,
        34 => match payload[33] {
            COMPRESSED_FLAG => true,
            flag => return Err(WifError::MissingCompressionFlag(flag)),
        },
        len => return Err(WifError::WrongLength(len)),
    };
    let network = match payload[0] {
        MAINNET_PREFIX => Network::Mainnet,
        TESTNET_PREFIX => Network::Testnet,
        prefix => return Err(WifError::UnknownNetwork(prefix)),
    };
    let secret = Scalar::<Secret, NonZero>::from_slice(&payload[1..33])
        .ok_or(WifError::OutOfRangeScalar)?;
    tracing::trace!(%network, compressed, "parsed WIF key");
    Ok(WifKey {
        network,
        compressed,
        secret,
    })
}

impl WifKey {
    /// Encodes the key back into WIF.
    pub fn encode(&self) -> String {
        let mut payload = Vec::with_capacity(34);
        payload.push(match self.network {
            Network::Mainnet => MAINNET_PREFIX,
            Network::Testnet => TESTNET_PREFIX,
        });
        payload.extend_from_slice(&self.secret.to_bytes());
        if self.compressed {
            payload.push(COMPRESSED_FLAG);
        }
        base58::check_encode(&payload)
    }
}

impl core::fmt::Debug for WifKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WifKey")
            .field("network", &self.network)
            .field("compressed", &self.compressed)
            .finish_non_exhaustive()
    }
}

impl core::str::FromStr for WifKey {
    type Err = WifError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl core::fmt::Display for WifKey {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.encode())
    }
}
