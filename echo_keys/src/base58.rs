//! Base58 and Base58Check.
//!
//! The integer conversion is done by [`bs58`]. The checksum is the first four bytes of
//! `SHA256(SHA256(payload))`.
use echo_curve::hash::sha256d;

/// The Bitcoin Base58 alphabet. `0`, `O`, `I` and `l` are left out.
pub const ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

const CHECKSUM_LEN: usize = 4;

/// Errors decoding Base58 or Base58Check strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Base58Error {
    /// A character outside of [`ALPHABET`].
    #[error("invalid base58 character {character:?} at index {index}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Its byte offset in the input.
        index: usize,
    },
    /// The trailing four bytes don't match the checksum of the payload.
    #[error("checksum mismatch: expected {expected:02x?}, found {found:02x?}")]
    ChecksumMismatch {
        /// The checksum computed from the payload.
        expected: [u8; 4],
        /// The checksum carried by the string.
        found: [u8; 4],
    },
    /// Fewer than four bytes were decoded so there is no room for a checksum.
    #[error("decoded {0} bytes, too short to carry a checksum")]
    PayloadTooShort(usize),
}

/// Encodes `bytes` as Base58. Each leading zero byte becomes a leading `'1'`.
///
/// ```
/// assert_eq!(echo_keys::base58::encode(b"Hello World!"), "2NEpo7TZRRrLZSi2U");
/// assert_eq!(echo_keys::base58::encode(&[0, 0, 1]), "112");
/// ```
pub fn encode(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Decodes a Base58 string. Each leading `'1'` becomes a leading zero byte.
pub fn decode(string: &str) -> Result<Vec<u8>, Base58Error> {
    bs58::decode(string).into_vec().map_err(|e| match e {
        bs58::decode::Error::InvalidCharacter { character, index } => {
            Base58Error::InvalidCharacter { character, index }
        }
        _ => first_invalid_character(string),
    })
}

// bs58 reports non-ascii input by byte offset only
fn first_invalid_character(string: &str) -> Base58Error {
    let (index, character) = string
        .char_indices()
        .find(|(_, c)| !ALPHABET.contains(*c))
        .unwrap_or((0, '\0'));
    Base58Error::InvalidCharacter { character, index }
}

fn checksum(payload: &[u8]) -> [u8; 4] {
    let hash = sha256d(payload);
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Appends the four byte checksum to `payload` and encodes the result.
///
/// ```
/// use echo_keys::base58;
/// let encoded = base58::check_encode(b"payload");
/// assert_eq!(base58::check_decode(&encoded).unwrap(), b"payload");
/// ```
pub fn check_encode(payload: &[u8]) -> String {
    let mut bytes = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    bytes.extend_from_slice(payload);
    bytes.extend_from_slice(&checksum(payload));
    encode(&bytes)
}

/// Decodes `string` and verifies and strips its checksum.
pub fn check_decode(string: &str) -> Result<Vec<u8>, Base58Error> {
    let mut bytes = decode(string)?;
    if bytes.len() < CHECKSUM_LEN {
        return Err(Base58Error::PayloadTooShort(bytes.len()));
    }
    let payload_len = bytes.len() - CHECKSUM_LEN;
    let mut found = [0u8; 4];
    found.copy_from_slice(&bytes[payload_len..]);
    let expected = checksum(&bytes[..payload_len]);
    if expected != found {
        return Err(Base58Error::ChecksumMismatch { expected, found });
    }
    bytes.truncate(payload_len);
    Ok(bytes)
}
