//! Feature hashing.
//!
//! Bucket assignments are shared with the process that trained the weights. Constants in
//! this module must not change.

use crate::feature::FeatureToken;

/// Seed of the feature hash. Unicode features use `SEED ^ 2`, and Unicode class features use
/// `SEED ^ 4`.
pub const SEED: u32 = 3242157231;

const M: u32 = 0x5bd1e995;

/// Hashes a 32-bit integer with the MurmurHash2 mixing steps.
///
/// # Examples
///
/// ```
/// use lingohash::{murmurhash2, SEED};
///
/// assert_eq!(800413918, murmurhash2(0, SEED));
/// ```
#[inline]
pub const fn murmurhash2(mut k: u32, seed: u32) -> u32 {
    k = k.wrapping_mul(M);
    k ^= k >> 24;
    k = k.wrapping_mul(M);
    let mut h = seed.wrapping_mul(M);
    h ^= k;
    h ^= h >> 13;
    h = h.wrapping_mul(M);
    h ^= h >> 15;
    h
}

impl FeatureToken {
    /// Gets the hash value of the feature.
    #[inline]
    pub const fn hash(self) -> u32 {
        match self {
            Self::AsciiNgram(key) => murmurhash2(key, SEED),
            // Neighboring codepoints share a hash.
            Self::Unicode(cp) => murmurhash2(cp / 128, SEED ^ 2),
            Self::UnicodeClass(idx) => murmurhash2(idx, SEED ^ 4),
        }
    }

    /// Gets the bucket of the feature in a hash space of size `dimension`.
    ///
    /// # Panics
    ///
    /// Panics if `dimension` is zero.
    #[inline]
    pub const fn bucket(self, dimension: u32) -> u32 {
        self.hash() % dimension
    }
}
