/// A marker trait implemented by [`Secret`] and [`Public`].
///
/// [`Scalar`s] carry a `Secrecy` type parameter which decides which backend the secret-dependent
/// operations (multiplying a point, inverting) run on:
///
/// - [`Secret`]: the value must stay hidden, so the Montgomery ladder is used.
/// - [`Public`]: the value is known to everyone, so the faster double-and-add is fine.
///
/// Scalars are [`Secret`] by default. `.public()` and `.secret()` change the marker.
///
/// ```
/// use echo_curve::{G, Scalar, op};
/// let x = Scalar::random(&mut rand::thread_rng());
/// let X = op::scalar_mul_point(&x, G); // ladder because x is secret
/// let x = x.public();
/// let X2 = op::scalar_mul_point(&x, G); // may run in variable time
/// assert_eq!(X, X2);
/// ```
///
/// [`Scalar`s]: crate::Scalar
pub trait Secrecy: Default + Clone + PartialEq + Eq + Copy + 'static {
    /// Whether operations on values with this marker go through the ladder backend.
    const CONSTANT_TIME: bool;
}

/// Indicates that the value is secret and operations on it should not branch on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Copy, Hash)]
pub struct Secret;

/// Indicates that variable time operations may be used on the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Copy, Hash)]
pub struct Public;

impl Secrecy for Secret {
    const CONSTANT_TIME: bool = true;
}

impl Secrecy for Public {
    const CONSTANT_TIME: bool = false;
}
