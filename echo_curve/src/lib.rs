//! secp256k1 arithmetic written from scratch.
//!
//! - [`FieldElement`]: integers mod the field prime `p`.
//! - [`Scalar`]: integers mod the group order `n`.
//! - [`Point`] and [`XOnly`]: curve points and their BIP-340 x-only encoding.
//! - [`op`]: the group operations.
//!
//! ```
//! use echo_curve::{G, Scalar, op};
//! let one = Scalar::<echo_curve::marker::Secret, _>::one();
//! let P = op::scalar_mul_point(&one, G);
//! assert_eq!(
//!     P.non_zero().unwrap().to_string(),
//!     "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
//! );
//! ```
#![no_std]
#![allow(non_snake_case)]
#![warn(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
#[macro_use]
extern crate std;

pub mod hash;
pub mod hex;
pub mod marker;
pub mod op;

pub use digest;
pub use rand_core;

mod backend;
mod error;
mod params;
mod point;
mod scalar;
mod xonly;

mod macros;
pub use backend::FieldElement;
pub use error::CurveError;
pub use params::{CURVE, CurveParams};
pub use point::Point;
pub use scalar::Scalar;
pub use xonly::XOnly;

#[cfg(feature = "serde")]
pub extern crate serde;

#[cfg(feature = "proptest")]
mod proptest_impls;

/// The generator of the secp256k1 group.
///
/// ```
/// use echo_curve::G;
/// assert_eq!(
///     format!("{}", G),
///     "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
/// );
/// ```
pub static G: &Point = &Point::generator();
