//! Tagged hashing.
//!
//! Everything here is defined against the [`Digest`] trait from [`RustCrypto`].
//!
//! [`Digest`]: digest::Digest
//! [`RustCrypto`]: https://github.com/RustCrypto/hashes
use digest::{Digest, Update};
use sha2::Sha256;

/// Creates a BIP-340 tagged hash for a tag.
///
/// The returned SHA256 instance has already absorbed `SHA256(tag) ‖ SHA256(tag)` so whatever you
/// add to it is domain separated by `tag`.
///
/// ```
/// use digest::Digest;
/// use echo_curve::hash::tagged_hash;
/// let mut hash = tagged_hash(b"BIP0340/challenge");
/// hash.update(b"hello world");
/// let _digest: [u8; 32] = hash.finalize().into();
/// ```
pub fn tagged_hash(tag: &[u8]) -> Sha256 {
    let hashed_tag = Sha256::digest(tag);
    let mut tagged = Sha256::default();
    Digest::update(&mut tagged, hashed_tag);
    Digest::update(&mut tagged, hashed_tag);
    tagged
}

/// Convenience for hashing `data` under `tag` in one go.
pub fn tagged_digest(tag: &[u8], data: &[&[u8]]) -> [u8; 32] {
    let mut hash = tagged_hash(tag);
    for chunk in data {
        Digest::update(&mut hash, *chunk);
    }
    hash.finalize().into()
}

/// `SHA256(SHA256(data))`
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}

/// Anything that can be hashed.
///
/// The implementation decides which bytes of the type go into the hash.
pub trait HashInto {
    /// Feed the bytes of `self` to `hash`.
    fn hash_into(&self, hash: &mut impl Update);
}

impl HashInto for [u8] {
    fn hash_into(&self, hash: &mut impl Update) {
        hash.update(self)
    }
}

impl<const N: usize> HashInto for [u8; N] {
    fn hash_into(&self, hash: &mut impl Update) {
        hash.update(&self[..])
    }
}

/// Extension trait for [`digest::Update`] so hashes can be built up in a chain.
///
/// ```
/// use digest::Digest;
/// use echo_curve::{G, hash::{HashAdd, tagged_hash}};
/// let digest = tagged_hash(b"my-tag").add(G).add(b"bytes").finalize();
/// # let _ = digest;
/// ```
pub trait HashAdd {
    /// Hash `data` into `self` and return it.
    fn add<HI: HashInto + ?Sized>(self, data: &HI) -> Self;
}

impl<D: Update> HashAdd for D {
    fn add<HI: HashInto + ?Sized>(mut self, data: &HI) -> Self {
        data.hash_into(&mut self);
        self
    }
}
