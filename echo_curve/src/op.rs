//! Operations in the secp256k1 group.
//!
//! Every operation that touches a [`Scalar`] in a way that could leak it through timing goes
//! through the backend chosen by the scalar's [`Secrecy`] marker:
//!
//! ```
//! use echo_curve::{G, Scalar, op};
//! let x = Scalar::random(&mut rand::thread_rng());
//! let X1 = op::scalar_mul_point(&x, G); // Montgomery ladder
//! let X2 = op::scalar_mul_point(&x.public(), G); // double-and-add
//! assert_eq!(X1, X2);
//! ```
//! [`Secrecy`]: crate::marker::Secrecy
use crate::{
    CurveError, Point, Scalar,
    backend::{self, ConstantTime, TimeSensitive, VariableTime},
    marker::*,
};

pub(crate) fn invert_inner<S: Secrecy>(scalar: &backend::Scalar) -> backend::Scalar {
    if S::CONSTANT_TIME {
        ConstantTime::scalar_invert(scalar)
    } else {
        VariableTime::scalar_invert(scalar)
    }
}

pub(crate) fn mul_point_inner<S: Secrecy>(
    scalar: &backend::Scalar,
    point: &backend::Affine,
) -> backend::Affine {
    if S::CONSTANT_TIME {
        ConstantTime::scalar_mul_point(scalar, point)
    } else {
        VariableTime::scalar_mul_point(scalar, point)
    }
}

/// Multiplies the point `P` by the scalar `x`.
///
/// Returns the point at infinity if `x` is zero or `P` is the point at infinity.
pub fn scalar_mul_point<S: Secrecy, Z1, Z2>(x: &Scalar<S, Z1>, P: &Point<Z2>) -> Point<Zero> {
    Point::from_inner(mul_point_inner::<S>(&x.0, &P.0))
}

/// Computes `x * A + y * B`. Both scalars are treated as public.
pub fn double_mul<Z1, Z2, Z3, Z4>(
    x: &Scalar<Public, Z1>,
    A: &Point<Z2>,
    y: &Scalar<Public, Z3>,
    B: &Point<Z4>,
) -> Point<Zero> {
    point_add(&scalar_mul_point(x, A), &scalar_mul_point(y, B))
}

/// Sums `scalars[i] * points[i]`.
pub fn lincomb<'a, S: Secrecy, Z1: 'a, Z2: 'a>(
    scalars: impl IntoIterator<Item = &'a Scalar<S, Z1>>,
    points: impl IntoIterator<Item = &'a Point<Z2>>,
) -> Point<Zero>
where
    S: 'a,
{
    scalars
        .into_iter()
        .zip(points)
        .fold(Point::zero(), |acc, (x, P)| {
            point_add(&acc, &scalar_mul_point(x, P))
        })
}

/// Adds two points together.
pub fn point_add<Z1, Z2>(A: &Point<Z1>, B: &Point<Z2>) -> Point<Zero> {
    Point::from_inner(A.0.to_jacobian().add(&B.0.to_jacobian()).to_affine())
}

/// Subtracts `B` from `A`.
pub fn point_sub<Z1, Z2>(A: &Point<Z1>, B: &Point<Z2>) -> Point<Zero> {
    Point::from_inner(
        A.0.to_jacobian()
            .add(&B.0.to_jacobian().neg())
            .to_affine(),
    )
}

/// Multiplies two scalars together (modulo the curve order)
pub fn scalar_mul<Z1, Z2, S1, S2>(x: &Scalar<S1, Z1>, y: &Scalar<S2, Z2>) -> Scalar<Secret, Z1::Out>
where
    Z1: DecideZero<Z2>,
{
    Scalar::from_inner(x.0.mul(&y.0))
}

/// Adds two scalars together (modulo the curve order)
pub fn scalar_add<Z1, Z2, S1, S2>(x: &Scalar<S1, Z1>, y: &Scalar<S2, Z2>) -> Scalar<Secret, Zero> {
    Scalar::from_inner(x.0.add(&y.0))
}

/// Subtracts one scalar from another
pub fn scalar_sub<Z1, Z2, S1, S2>(x: &Scalar<S1, Z1>, y: &Scalar<S2, Z2>) -> Scalar<Secret, Zero> {
    Scalar::from_inner(x.0.sub(&y.0))
}

/// Inverts a scalar that might be zero.
///
/// # Errors
///
/// [`CurveError::DivisionByZero`] if `x` is zero.
pub fn scalar_invert<S: Secrecy, Z>(x: &Scalar<S, Z>) -> Result<Scalar<S, NonZero>, CurveError> {
    let x = x.non_zero().ok_or(CurveError::DivisionByZero)?;
    Ok(x.invert())
}
