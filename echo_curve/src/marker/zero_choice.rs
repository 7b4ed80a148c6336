/// Something marked with `Zero` might be `0` (or the point at infinity).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Zero;

/// Something marked with `NonZero` is guaranteed not to be `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NonZero;

/// A marker trait over [`Zero`] and [`NonZero`].
pub trait ZeroChoice: Default + Clone + Copy + PartialEq + Eq + 'static {
    /// Whether the marker allows zero.
    fn is_zero() -> bool;
}

impl ZeroChoice for Zero {
    fn is_zero() -> bool {
        true
    }
}

impl ZeroChoice for NonZero {
    fn is_zero() -> bool {
        false
    }
}

/// Works out the zero-ness of a product: only `NonZero × NonZero` is `NonZero`.
pub trait DecideZero<ZZ> {
    /// The resulting marker.
    type Out: ZeroChoice;
}

impl<Z: ZeroChoice> DecideZero<Z> for Zero {
    type Out = Zero;
}

impl<Z: ZeroChoice> DecideZero<Z> for NonZero {
    type Out = Z;
}
