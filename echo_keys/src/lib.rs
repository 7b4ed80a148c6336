//! Encodings for secp256k1 key material.
//!
//! - [`base58`]: Base58 and Base58Check.
//! - [`extended_key`]: parsing and validating BIP32 extended keys against the [`version_table`].
//! - [`wif`]: Wallet Import Format private keys.
//! - [`address`]: P2PKH addresses.
//!
//! ```
//! use echo_curve::{G, op};
//! use echo_keys::{address, wif};
//!
//! let key = wif::parse("KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn").unwrap();
//! let public_key = op::scalar_mul_point(&key.secret, G).non_zero().unwrap();
//! assert_eq!(
//!     address::p2pkh(&public_key, key.compressed, key.network),
//!     "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
//! );
//! ```
#![warn(missing_docs)]

pub mod address;
pub mod base58;
pub mod extended_key;
pub mod version_table;
pub mod wif;

pub use base58::Base58Error;
pub use extended_key::{ExtendedKey, ExtendedKeyError, KeyMaterial};
pub use version_table::{Coin, Network, VersionInfo};
pub use wif::{WifError, WifKey};
