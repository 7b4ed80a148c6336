//! The arithmetic behind the public types.
//!
//! Anything whose running time could depend on a secret goes through [`TimeSensitive`]. Callers
//! pick [`ConstantTime`] or [`VariableTime`] with the [`Secrecy`] marker on the scalar.
//!
//! [`Secrecy`]: crate::marker::Secrecy
mod field;
mod group;
mod scalar;
mod uint;

pub use field::FieldElement;
pub(crate) use group::{Affine, GENERATOR, INFINITY, Jacobian};
pub(crate) use scalar::Scalar;

use subtle::{Choice, ConditionallySelectable};

pub(crate) trait TimeSensitive {
    fn scalar_mul_point(scalar: &Scalar, point: &Affine) -> Affine;
    fn scalar_invert(scalar: &Scalar) -> Scalar;
    fn scalar_eq(lhs: &Scalar, rhs: &Scalar) -> bool;
}

pub(crate) struct ConstantTime;

pub(crate) struct VariableTime;

impl TimeSensitive for ConstantTime {
    /// Montgomery ladder over all 256 bits. Which register gets doubled is chosen with a
    /// conditional swap so every step does one add and one double whatever the bit is.
    ///
    /// This is not a constant-time guarantee. `r0` starts at infinity and the `Jacobian`
    /// formulas short-circuit on infinity and on equal inputs, so the leading zero bits of the
    /// scalar take a cheaper path.
    fn scalar_mul_point(scalar: &Scalar, point: &Affine) -> Affine {
        let mut r0 = Jacobian::INFINITY;
        let mut r1 = point.to_jacobian();
        for i in (0..256).rev() {
            let bit = Choice::from(scalar.bit(i) as u8);
            Jacobian::conditional_swap(&mut r0, &mut r1, bit);
            r1 = r0.add(&r1);
            r0 = r0.double();
            Jacobian::conditional_swap(&mut r0, &mut r1, bit);
        }
        r0.to_affine()
    }

    fn scalar_invert(scalar: &Scalar) -> Scalar {
        scalar.pow_invert()
    }

    fn scalar_eq(lhs: &Scalar, rhs: &Scalar) -> bool {
        lhs.ct_eq(rhs).into()
    }
}

impl TimeSensitive for VariableTime {
    fn scalar_mul_point(scalar: &Scalar, point: &Affine) -> Affine {
        let base = point.to_jacobian();
        let mut acc = Jacobian::INFINITY;
        for i in (0..256).rev() {
            acc = acc.double();
            if scalar.bit(i) {
                acc = acc.add(&base);
            }
        }
        acc.to_affine()
    }

    fn scalar_invert(scalar: &Scalar) -> Scalar {
        scalar.pow_invert()
    }

    fn scalar_eq(lhs: &Scalar, rhs: &Scalar) -> bool {
        lhs == rhs
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ladder_agrees_with_double_and_add() {
        let k = Scalar::from_bytes_mod_order([0xa5; 32]);
        assert_eq!(
            ConstantTime::scalar_mul_point(&k, &GENERATOR),
            VariableTime::scalar_mul_point(&k, &GENERATOR)
        );
    }

    #[test]
    fn ladder_handles_short_scalars() {
        // all but the last few steps run with r0 at infinity
        for last in [1u8, 2, 3, 0x80, 0xff] {
            let mut bytes = [0u8; 32];
            bytes[31] = last;
            let k = Scalar::from_bytes_mod_order(bytes);
            assert_eq!(
                ConstantTime::scalar_mul_point(&k, &GENERATOR),
                VariableTime::scalar_mul_point(&k, &GENERATOR)
            );
        }
        assert_eq!(
            ConstantTime::scalar_mul_point(&Scalar::ONE, &GENERATOR),
            GENERATOR
        );
    }

    #[test]
    fn zero_times_anything_is_infinity() {
        assert_eq!(
            ConstantTime::scalar_mul_point(&Scalar::ZERO, &GENERATOR),
            INFINITY
        );
        assert_eq!(
            VariableTime::scalar_mul_point(&Scalar::ONE, &INFINITY),
            INFINITY
        );
    }

    #[test]
    fn order_minus_one_is_negation() {
        let minus_one = Scalar::ONE.neg();
        assert_eq!(
            ConstantTime::scalar_mul_point(&minus_one, &GENERATOR),
            GENERATOR.neg()
        );
    }
}
