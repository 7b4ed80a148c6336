//! Parsing BIP32 extended keys.
//!
//! The serialised form is 78 bytes behind Base58Check:
//!
//! ```text
//! version(4) ‖ depth(1) ‖ parent_fingerprint(4) ‖ child_index(4) ‖ chain_code(32) ‖ key(33)
//! ```
//!
//! Only parsing and validation live here. There is no child key derivation.
use crate::{
    base58::{self, Base58Error},
    version_table::{self, VersionInfo},
};
use echo_curve::{Point, Scalar, marker::*};

/// Length of the serialised payload.
pub const EXTENDED_KEY_LEN: usize = 78;

/// Errors from [`parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExtendedKeyError {
    /// The string was not valid Base58Check.
    #[error(transparent)]
    Base58(#[from] Base58Error),
    /// The payload was not 78 bytes.
    #[error("extended key payload must be 78 bytes, got {0}")]
    WrongLength(usize),
    /// The version bytes are not in the [version table](crate::version_table).
    #[error("unknown extended key version {0:#010x}")]
    UnknownVersion(u32),
    /// A private key's material must start with `0x00`.
    #[error("private key material starts with {0:#04x} instead of 0x00")]
    MissingPrivatePadding(u8),
    /// A public key's material must start with `0x02` or `0x03`.
    #[error("public key material starts with {0:#04x} instead of 0x02 or 0x03")]
    InvalidCompressionPrefix(u8),
}

/// The last 33 bytes of an extended key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyMaterial {
    /// A 32-byte private key (the `0x00` padding removed).
    Private([u8; 32]),
    /// A compressed public key.
    Public([u8; 33]),
}

impl core::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            KeyMaterial::Private(_) => f.write_str("Private(..)"),
            KeyMaterial::Public(bytes) => {
                write!(f, "Public(")?;
                for byte in bytes {
                    write!(f, "{:02x}", byte)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl KeyMaterial {
    fn to_bytes(self) -> [u8; 33] {
        match self {
            KeyMaterial::Private(secret) => {
                let mut bytes = [0u8; 33];
                bytes[1..].copy_from_slice(&secret);
                bytes
            }
            KeyMaterial::Public(bytes) => bytes,
        }
    }
}

/// A parsed extended key.
///
/// The only way to get one is [`parse`] (or `FromStr`), so the fields always agree with a
/// version in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtendedKey {
    version_info: VersionInfo,
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_index: u32,
    chain_code: [u8; 32],
    key: KeyMaterial,
}

/// Decodes and validates an extended key string.
///
/// ```
/// use echo_keys::{extended_key, version_table::Coin};
/// let xpub = extended_key::parse(
///     "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8",
/// )
/// .unwrap();
/// assert_eq!(xpub.version_info().coin, Coin::Bitcoin);
/// assert!(!xpub.version_info().is_private);
/// assert_eq!(xpub.depth(), 0);
/// ```
pub fn parse(string: &str) -> Result<ExtendedKey, ExtendedKeyError> {
    let payload = base58::check_decode(string)?;
    if payload.len() != EXTENDED_KEY_LEN {
        return Err(ExtendedKeyError::WrongLength(payload.len()));
    }

    let version = u32::from_be_bytes(array(&payload[0..4]));
    let version_info =
        *version_table::lookup(version).ok_or(ExtendedKeyError::UnknownVersion(version))?;
    let depth = payload[4];
    let parent_fingerprint = array(&payload[5..9]);
    let child_index = u32::from_be_bytes(array(&payload[9..13]));
    let chain_code = array(&payload[13..45]);
    let material = &payload[45..78];

    let key = if version_info.is_private {
        if material[0] != 0x00 {
            return Err(ExtendedKeyError::MissingPrivatePadding(material[0]));
        }
        KeyMaterial::Private(array(&material[1..]))
    } else {
        if !matches!(material[0], 0x02 | 0x03) {
            return Err(ExtendedKeyError::InvalidCompressionPrefix(material[0]));
        }
        KeyMaterial::Public(array(material))
    };

    tracing::trace!(
        coin = %version_info.coin,
        network = %version_info.network,
        is_private = version_info.is_private,
        depth,
        "parsed extended key"
    );

    Ok(ExtendedKey {
        version_info,
        depth,
        parent_fingerprint,
        child_index,
        chain_code,
        key,
    })
}

// callers slice exactly N bytes out of a length-checked payload
fn array<const N: usize>(slice: &[u8]) -> [u8; N] {
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(slice);
    bytes
}

impl ExtendedKey {
    /// Coin, network and whether this is a private key.
    pub fn version_info(&self) -> &VersionInfo {
        &self.version_info
    }

    /// `0` for a master key.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// The first four bytes of the parent key's HASH160.
    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    /// The index this key was derived at. Hardened indexes have the top bit set.
    pub fn child_index(&self) -> u32 {
        self.child_index
    }

    /// Whether [`child_index`](Self::child_index) is hardened.
    pub fn is_hardened(&self) -> bool {
        self.child_index & 0x8000_0000 != 0
    }

    /// The chain code.
    pub fn chain_code(&self) -> [u8; 32] {
        self.chain_code
    }

    /// The key material.
    pub fn key(&self) -> &KeyMaterial {
        &self.key
    }

    /// The curve point of a public extended key.
    ///
    /// Returns `None` for private keys, or if the public key bytes are not on the curve (parsing
    /// only checks the prefix).
    pub fn public_point(&self) -> Option<Point> {
        match self.key {
            KeyMaterial::Public(bytes) => Point::from_bytes(bytes),
            KeyMaterial::Private(_) => None,
        }
    }

    /// The secret scalar of a private extended key, if it is in range.
    pub fn secret_key(&self) -> Option<Scalar<Secret, NonZero>> {
        match self.key {
            KeyMaterial::Private(bytes) => Scalar::from_bytes(bytes),
            KeyMaterial::Public(_) => None,
        }
    }

    /// The 78 byte payload.
    pub fn to_bytes(&self) -> [u8; EXTENDED_KEY_LEN] {
        let mut bytes = [0u8; EXTENDED_KEY_LEN];
        bytes[0..4].copy_from_slice(&self.version_info.version.to_be_bytes());
        bytes[4] = self.depth;
        bytes[5..9].copy_from_slice(&self.parent_fingerprint);
        bytes[9..13].copy_from_slice(&self.child_index.to_be_bytes());
        bytes[13..45].copy_from_slice(&self.chain_code);
        bytes[45..].copy_from_slice(&self.key.to_bytes());
        bytes
    }
}

impl core::str::FromStr for ExtendedKey {
    type Err = ExtendedKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl core::fmt::Display for ExtendedKey {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&base58::check_encode(&self.to_bytes()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::version_table::{Coin, Network};
    use echo_curve::{G, hex, op};

    const XPRV: &str = "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi";
    const XPUB: &str = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8";

    fn payload(version: u32, material: [u8; 33]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(EXTENDED_KEY_LEN);
        bytes.extend_from_slice(&version.to_be_bytes());
        bytes.push(3);
        bytes.extend_from_slice(&[0xaa, 0xbb, 0xcc, 0xdd]);
        bytes.extend_from_slice(&0x8000_0002u32.to_be_bytes());
        bytes.extend_from_slice(&[0x42; 32]);
        bytes.extend_from_slice(&material);
        bytes
    }

    fn private_material() -> [u8; 33] {
        let mut material = [0u8; 33];
        material[1..].copy_from_slice(&[0x11; 32]);
        material
    }

    #[test]
    fn master_key_pair() {
        let xprv = parse(XPRV).unwrap();
        let xpub = parse(XPUB).unwrap();
        assert!(xprv.version_info().is_private);
        assert_eq!(xprv.version_info().network, Network::Mainnet);
        assert_eq!(xprv.chain_code(), xpub.chain_code());
        assert_eq!(
            hex::encode(&xprv.chain_code()),
            "873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508"
        );
        assert_eq!(xprv.parent_fingerprint(), [0u8; 4]);
        assert_eq!(xprv.child_index(), 0);

        let secret = xprv.secret_key().unwrap();
        let public = op::scalar_mul_point(&secret, G).non_zero().unwrap();
        assert_eq!(xpub.public_point(), Some(public));
        assert_eq!(xprv.public_point(), None);
        assert_eq!(xpub.secret_key(), None);

        assert_eq!(xprv.to_string(), XPRV);
        assert_eq!(xpub.to_string(), XPUB);
    }

    #[test]
    fn debug_hides_private_material() {
        let xprv = parse(XPRV).unwrap();
        let secret = hex::encode(&xprv.secret_key().unwrap().to_bytes());
        let debug = format!("{:?}", xprv);
        assert!(debug.contains("Private(..)"));
        assert!(!debug.contains(&secret));

        let xpub = parse(XPUB).unwrap();
        assert!(format!("{:?}", xpub.key()).starts_with("Public(0"));
    }

    #[test]
    fn bitcoin_mainnet_private_version() {
        let encoded = base58::check_encode(&payload(0x0488_ADE4, private_material()));
        let key = parse(&encoded).unwrap();
        let info = key.version_info();
        assert!(info.is_private);
        assert_eq!(info.coin.name(), "bitcoin");
        assert_eq!(info.network.name(), "mainnet");
        assert_eq!(key.depth(), 3);
        assert_eq!(key.parent_fingerprint(), [0xaa, 0xbb, 0xcc, 0xdd]);
        assert_eq!(key.child_index(), 0x8000_0002);
        assert!(key.is_hardened());
        assert_eq!(key.key(), &KeyMaterial::Private([0x11; 32]));
        assert_eq!(key.to_string(), encoded);
    }

    #[test]
    fn other_coins() {
        let mut material = [0u8; 33];
        material.copy_from_slice(&G.to_bytes());
        let dgub = parse(&base58::check_encode(&payload(0x02FA_CAFD, material))).unwrap();
        assert_eq!(dgub.version_info().coin, Coin::Dogecoin);
        assert_eq!(dgub.public_point().as_ref(), Some(G));

        let ttpv = parse(&base58::check_encode(&payload(0x0436_EF7D, private_material()))).unwrap();
        assert_eq!(ttpv.version_info().coin, Coin::Litecoin);
        assert_eq!(ttpv.version_info().network, Network::Testnet);
    }

    #[test]
    fn unknown_version() {
        let encoded = base58::check_encode(&payload(0xdead_beef, private_material()));
        assert_eq!(parse(&encoded), Err(ExtendedKeyError::UnknownVersion(0xdead_beef)));
    }

    #[test]
    fn wrong_length() {
        let mut bytes = payload(0x0488_ADE4, private_material());
        bytes.pop();
        assert_eq!(
            parse(&base58::check_encode(&bytes)),
            Err(ExtendedKeyError::WrongLength(77))
        );
    }

    #[test]
    fn padding_and_prefix() {
        let mut material = private_material();
        material[0] = 0x01;
        assert_eq!(
            parse(&base58::check_encode(&payload(0x0488_ADE4, material))),
            Err(ExtendedKeyError::MissingPrivatePadding(0x01))
        );
        assert_eq!(
            parse(&base58::check_encode(&payload(0x0488_B21E, private_material()))),
            Err(ExtendedKeyError::InvalidCompressionPrefix(0x00))
        );
    }

    #[test]
    fn corrupted_checksum() {
        let mut corrupted = XPUB.to_string();
        corrupted.replace_range(20..21, if &XPUB[20..21] == "z" { "y" } else { "z" });
        assert!(matches!(
            parse(&corrupted),
            Err(ExtendedKeyError::Base58(Base58Error::ChecksumMismatch { .. }))
        ));
    }
}
