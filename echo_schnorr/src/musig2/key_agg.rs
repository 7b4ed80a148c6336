use super::MuSig2Error;
use crate::fun::{
    Point, Scalar, XOnly,
    digest::Digest,
    hash::{HashAdd, tagged_hash},
    marker::*,
    op,
};
use alloc::vec::Vec;

/// A list of x-only keys aggregated into a single key.
///
/// The participants keep the order they were given in but the aggregate key only depends on the
/// set of keys.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyAgg {
    /// The parties involved in the key aggregation.
    keys: Vec<XOnly>,
    /// The coefficient of each key
    coefs: Vec<Scalar<Public>>,
    /// The even-y aggregate key
    agg_key: XOnly,
    /// Whether the weighted sum had to be negated to get `agg_key`.
    key_parity: bool,
}

impl KeyAgg {
    /// Aggregates `keys`.
    ///
    /// # Errors
    ///
    /// - [`MuSig2Error::NoPublicKeys`] if `keys` is empty.
    /// - [`MuSig2Error::DuplicateParticipant`] if a key appears twice.
    /// - [`MuSig2Error::InfinityPoint`] if the weighted sum is the point at infinity.
    pub fn new(keys: Vec<XOnly>) -> Result<Self, MuSig2Error> {
        if keys.is_empty() {
            return Err(MuSig2Error::NoPublicKeys);
        }
        let mut sorted = keys.clone();
        sorted.sort();
        if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(MuSig2Error::DuplicateParticipant(pair[0]));
        }

        if keys.len() == 1 {
            return Ok(KeyAgg {
                agg_key: keys[0],
                coefs: vec![Scalar::one()],
                keys,
                key_parity: false,
            });
        }

        let L: [u8; 32] = sorted
            .iter()
            .fold(tagged_hash(b"MuSig/KeyAgg list"), |hash, key| hash.add(key))
            .finalize()
            .into();
        let coefs = keys
            .iter()
            .map(|key| {
                Scalar::<Public, Zero>::from_hash(
                    tagged_hash(b"MuSig/KeyAgg coefficient").add(&L).add(key),
                )
                .non_zero()
                .unwrap_or_else(Scalar::one)
            })
            .collect::<Vec<_>>();
        let points = keys.iter().map(XOnly::to_point).collect::<Vec<_>>();

        let (agg_key, key_parity) = op::lincomb(coefs.iter(), points.iter())
            .non_zero()
            .ok_or(MuSig2Error::InfinityPoint)?
            .into_point_with_even_y();

        Ok(KeyAgg {
            keys,
            coefs,
            agg_key: XOnly::from_point(&agg_key),
            key_parity,
        })
    }

    /// The `XOnly` aggregate key.
    pub fn agg_public_key(&self) -> XOnly {
        self.agg_key
    }

    /// The aggregate key as a `Point` (with even y).
    pub fn agg_verification_key(&self) -> Point {
        self.agg_key.to_point()
    }

    /// Whether the coefficient weighted sum of the keys had odd y and was negated.
    pub fn key_parity(&self) -> bool {
        self.key_parity
    }

    /// The keys in the order they were given.
    pub fn keys(&self) -> impl Iterator<Item = XOnly> + '_ {
        self.keys.iter().copied()
    }

    /// The number of participants.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false since a `KeyAgg` has at least one key.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The aggregation coefficient of `key`, or `None` if it isn't in the list.
    pub fn coefficient(&self, key: &XOnly) -> Option<Scalar<Public>> {
        let index = self.keys.iter().position(|candidate| candidate == key)?;
        Some(self.coefs[index])
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fun::G;

    fn random_keys(n: usize) -> Vec<XOnly> {
        (0..n)
            .map(|_| XOnly::from_point(&Point::random(&mut rand::thread_rng())))
            .collect()
    }

    #[test]
    fn single_key_is_identity() {
        let keys = random_keys(1);
        let key_agg = KeyAgg::new(keys.clone()).unwrap();
        assert_eq!(key_agg.agg_public_key(), keys[0]);
        assert_eq!(key_agg.coefficient(&keys[0]), Some(Scalar::one()));
        assert!(!key_agg.key_parity());
    }

    #[test]
    fn order_does_not_change_the_aggregate() {
        let keys = random_keys(3);
        let reversed = keys.iter().rev().copied().collect::<Vec<_>>();
        let a = KeyAgg::new(keys.clone()).unwrap();
        let b = KeyAgg::new(reversed).unwrap();
        assert_eq!(a.agg_public_key(), b.agg_public_key());
        assert_eq!(a.key_parity(), b.key_parity());
        for key in &keys {
            assert_eq!(a.coefficient(key), b.coefficient(key));
        }
    }

    #[test]
    fn aggregate_is_weighted_sum() {
        let keys = random_keys(4);
        let key_agg = KeyAgg::new(keys.clone()).unwrap();
        let sum = keys.iter().fold(Point::zero(), |acc, key| {
            op::point_add(
                &acc,
                &op::scalar_mul_point(&key_agg.coefficient(key).unwrap(), &key.to_point()),
            )
        });
        let sum = sum.non_zero().unwrap();
        assert_eq!(
            sum.conditional_negate(key_agg.key_parity()),
            key_agg.agg_verification_key()
        );
        assert!(key_agg.agg_verification_key().is_y_even());
        assert!(key_agg.agg_verification_key() != *G);
    }

    #[test]
    fn rejects_duplicates_and_empty() {
        let mut keys = random_keys(2);
        keys.push(keys[0]);
        assert_eq!(
            KeyAgg::new(keys.clone()),
            Err(MuSig2Error::DuplicateParticipant(keys[0]))
        );
        assert_eq!(KeyAgg::new(vec![]), Err(MuSig2Error::NoPublicKeys));
    }
}
