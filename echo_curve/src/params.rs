//! The secp256k1 domain parameters.
//!
//! Every other module derives its constants from [`CURVE`] so there is exactly one place where
//! the numbers are written down.

/// The secp256k1 domain parameters as specified in [_SEC 2: Recommended Elliptic Curve Domain Parameters_].
///
/// All values are 32-byte big-endian integers.
///
/// [_SEC 2: Recommended Elliptic Curve Domain Parameters_]: https://www.secg.org/sec2-v2.pdf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveParams {
    /// The prime `p` of the base field.
    pub p: [u8; 32],
    /// The order `n` of the group generated by `G`.
    pub n: [u8; 32],
    /// The coefficient `b` in `y² = x³ + b`.
    pub b: u64,
    /// The x-coordinate of the generator `G`.
    pub g_x: [u8; 32],
    /// The y-coordinate of the generator `G`.
    pub g_y: [u8; 32],
}

/// The one and only set of curve parameters.
///
/// ```
/// use echo_curve::{CURVE, G};
/// assert_eq!(G.to_bytes()[1..], CURVE.g_x);
/// ```
pub const CURVE: CurveParams = CurveParams {
    p: [
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe, 0xff, 0xff,
        0xfc, 0x2f,
    ],
    n: [
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xfe, 0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36,
        0x41, 0x41,
    ],
    b: 7,
    g_x: [
        0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac, 0x55, 0xa0, 0x62, 0x95, 0xce, 0x87, 0x0b,
        0x07, 0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9, 0x59, 0xf2, 0x81, 0x5b, 0x16, 0xf8,
        0x17, 0x98,
    ],
    g_y: [
        0x48, 0x3a, 0xda, 0x77, 0x26, 0xa3, 0xc4, 0x65, 0x5d, 0xa4, 0xfb, 0xfc, 0x0e, 0x11, 0x08,
        0xa8, 0xfd, 0x17, 0xb4, 0x48, 0xa6, 0x85, 0x54, 0x19, 0x9c, 0x47, 0xd0, 0x8f, 0xfb, 0x10,
        0xd4, 0xb8,
    ],
};
