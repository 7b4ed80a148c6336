//! Implementations of [`Arbitrary`] for the core types.
//!
//! [`Arbitrary`]: proptest::arbitrary::Arbitrary
use crate::{G, Point, Scalar, XOnly, marker::*, op};
use ::proptest::prelude::*;

impl<S: Secrecy + core::fmt::Debug> Arbitrary for Scalar<S, NonZero> {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            // pathological cases
            1 => Just(Scalar::<S, NonZero>::one()),
            1 => Just(-Scalar::<S, NonZero>::one()),
            18 => any::<[u8; 32]>().prop_filter_map("zero is not acceptable", |bytes| {
                Scalar::<S, Zero>::from_bytes_mod_order(bytes).non_zero()
            }),
        ]
        .boxed()
    }
}

impl<S: Secrecy + core::fmt::Debug> Arbitrary for Scalar<S, Zero> {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            1 => Just(Scalar::<S, Zero>::zero()),
            1 => Just(Scalar::<S, NonZero>::one().mark_zero()),
            28 => any::<[u8; 32]>().prop_map(Scalar::<S, Zero>::from_bytes_mod_order),
        ]
        .boxed()
    }
}

impl Arbitrary for Point<NonZero> {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        any::<Scalar<Public, NonZero>>()
            .prop_filter_map("point at infinity", |x| {
                op::scalar_mul_point(&x, G).non_zero()
            })
            .boxed()
    }
}

impl Arbitrary for Point<Zero> {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            1 => Just(Point::zero()),
            9 => any::<Point>().prop_map(|P| P.mark_zero()),
        ]
        .boxed()
    }
}

impl Arbitrary for XOnly {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        any::<Point>().prop_map(|P| XOnly::from_point(&P)).boxed()
    }
}
