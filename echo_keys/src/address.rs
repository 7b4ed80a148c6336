//! Pay-to-public-key-hash addresses.
use crate::{base58, version_table::Network};
use echo_curve::Point;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

const MAINNET_VERSION: u8 = 0x00;
const TESTNET_VERSION: u8 = 0x6F;

/// `RIPEMD160(SHA256(data))`
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(Sha256::digest(data)).into()
}

/// The P2PKH address of `public_key`, hashing its compressed or uncompressed encoding.
///
/// ```
/// use echo_curve::G;
/// use echo_keys::{address, version_table::Network};
/// assert_eq!(
///     address::p2pkh(G, true, Network::Mainnet),
///     "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
/// );
/// ```
pub fn p2pkh(public_key: &Point, compressed: bool, network: Network) -> String {
    let hash = if compressed {
        hash160(&public_key.to_bytes())
    } else {
        hash160(&public_key.to_bytes_uncompressed())
    };
    let mut payload = [0u8; 21];
    payload[0] = match network {
        Network::Mainnet => MAINNET_VERSION,
        Network::Testnet => TESTNET_VERSION,
    };
    payload[1..].copy_from_slice(&hash);
    base58::check_encode(&payload)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wif;
    use echo_curve::{G, hex, op};

    #[test]
    fn private_key_one_addresses() {
        assert_eq!(
            p2pkh(G, true, Network::Mainnet),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );
        assert_eq!(
            p2pkh(G, false, Network::Mainnet),
            "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm"
        );
    }

    #[test]
    fn hash160_of_generator() {
        assert_eq!(
            hex::encode(&hash160(&G.to_bytes())),
            "751e76e8199196d454941c45d1b3a323f1433bd6"
        );
    }

    #[test]
    fn testnet_prefix() {
        let address = p2pkh(G, true, Network::Testnet);
        assert!(address.starts_with('m') || address.starts_with('n'));
        let payload = base58::check_decode(&address).unwrap();
        assert_eq!(payload[0], TESTNET_VERSION);
        assert_eq!(&payload[1..], &hash160(&G.to_bytes()));
    }

    #[test]
    fn address_from_wif() {
        let key = wif::parse("KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn").unwrap();
        let public_key = op::scalar_mul_point(&key.secret, G).non_zero().unwrap();
        assert_eq!(
            p2pkh(&public_key, key.compressed, key.network),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );
    }
}
