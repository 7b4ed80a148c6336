//! BIP-340 Schnorr signatures and MuSig2 over [`echo_curve`].
//!
//! ```
//! use echo_schnorr::{Schnorr, Signature};
//! let keypair = Schnorr.derive_xonly_key([0x01; 32]).unwrap();
//! let signature = Schnorr.sign(&keypair, b"hello", Some(&[0xaa; 32][..])).unwrap();
//! let bytes = signature.to_bytes();
//! assert!(Schnorr.verify(keypair.public_key().as_bytes(), b"hello", &bytes));
//! assert_eq!(Signature::from_bytes(bytes), Some(signature));
//! ```
//!
//! The [`musig2`] module builds signatures that verify the same way from several keys.
#![no_std]
#![allow(non_snake_case)]
#![warn(missing_docs)]

#[cfg(all(feature = "alloc", not(feature = "std")))]
#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate alloc;

#[cfg(feature = "std")]
#[macro_use]
extern crate std;

pub use echo_curve as fun;

mod keypair;
pub use keypair::KeyPair;
mod schnorr;
pub use schnorr::{Schnorr, SignError};
mod signature;
pub use signature::Signature;

// musig2 needs vecs
#[cfg(feature = "alloc")]
pub mod musig2;
