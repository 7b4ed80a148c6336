//! Hex encoding and decoding used for `Display`, `FromStr` and human readable serde.
#[cfg(feature = "alloc")]
use alloc::{string::String, vec::Vec};

/// A failed conversion from hex into the bytes of some type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    /// The string contained a non-hex character or had an odd length.
    #[error("invalid hex string")]
    InvalidHex,
    /// The string was not the right length for the target type.
    #[error("hex string has the wrong length for the target type")]
    InvalidLength,
    /// The bytes were not a valid encoding of the target type.
    #[error("hex value does not encode the expected type")]
    InvalidEncoding,
}

#[doc(hidden)]
pub fn hex_val(c: u8) -> Result<u8, HexError> {
    match c {
        b'A'..=b'F' => Ok(c - b'A' + 10),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'0'..=b'9' => Ok(c - b'0'),
        _ => Err(HexError::InvalidHex),
    }
}

#[cfg(feature = "alloc")]
/// Encode bytes as a lowercase hex `String`.
///
/// ```
/// use echo_curve::{G, hex};
/// assert_eq!(
///     hex::encode(&G.to_bytes()),
///     "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
/// );
/// ```
pub fn encode(bytes: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        hex.push(DIGITS[(byte >> 4) as usize] as char);
        hex.push(DIGITS[(byte & 0x0f) as usize] as char);
    }
    hex
}

#[cfg(feature = "alloc")]
/// Decode a hex string of any even length.
pub fn decode(hex: &str) -> Result<Vec<u8>, HexError> {
    if hex.len() % 2 != 0 {
        return Err(HexError::InvalidHex);
    }
    hex.as_bytes()
        .chunks(2)
        .map(|pair| Ok(hex_val(pair[0])? << 4 | hex_val(pair[1])?))
        .collect()
}

/// Decode a hex string into a fixed length array.
///
/// ```
/// use echo_curve::hex;
/// let bytes: [u8; 2] = hex::decode_array("beef").unwrap();
/// assert_eq!(bytes, [0xbe, 0xef]);
/// assert!(hex::decode_array::<3>("beef").is_err());
/// ```
pub fn decode_array<const N: usize>(hex: &str) -> Result<[u8; N], HexError> {
    if hex.len() % 2 != 0 {
        return Err(HexError::InvalidHex);
    }
    if hex.len() != N * 2 {
        return Err(HexError::InvalidLength);
    }
    let mut bytes = [0u8; N];
    for (pair, byte) in hex.as_bytes().chunks(2).zip(bytes.iter_mut()) {
        *byte = hex_val(pair[0])? << 4 | hex_val(pair[1])?;
    }
    Ok(bytes)
}

#[cfg(all(test, feature = "alloc"))]
mod test {
    use super::*;

    #[test]
    fn decode_rejects_bad_input() {
        assert_eq!(decode("abc"), Err(HexError::InvalidHex));
        assert_eq!(decode("zz"), Err(HexError::InvalidHex));
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn mixed_case() {
        assert_eq!(decode("DeAdBeEf").unwrap(), [0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(encode(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
    }
}
