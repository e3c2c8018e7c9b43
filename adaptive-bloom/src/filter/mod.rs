// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Adaptive membership filter with an exact hash-set phase and a Bloom phase.
//!
//! [`AdaptiveBloomFilter`] answers approximate set-membership queries with:
//!
//! - **No false negatives**: an inserted key always tests `true`
//! - **Exact answers while small**: below the storage crossover the filter is
//!   an open-addressed hash set and `contains()` is exact
//! - **Bounded memory**: once the hash set would cost as much as the Bloom
//!   bit array sized for the configured capacity, the filter upgrades to that
//!   bit array and never grows again
//!
//! # Modes
//!
//! The filter starts in **hash mode**, a Robin Hood open-addressed table of
//! 56-bit keys. Every time the table reaches half load it doubles. When the
//! doubled table would meet or exceed the byte size of the Bloom bit array,
//! the filter instead **upgrades**: it allocates the bit array, replays every
//! stored key through the Bloom probe sequence, and drops the table. The
//! upgrade is one-way; [`reset()`](AdaptiveBloomFilter::reset) empties the
//! filter but never returns it to hash mode.
//!
//! # Usage
//!
//! ```rust
//! use adaptive_bloom::filter::AdaptiveBloomFilter;
//!
//! // Sized for 10,000 keys at a 1% false-positive rate
//! let mut filter = AdaptiveBloomFilter::new(10_000, 0.01);
//!
//! filter.insert(12031).unwrap();
//!
//! assert!(filter.contains(12031)); // inserted
//! assert!(!filter.contains(99999)); // exact while in hash mode
//! assert!(!filter.is_upgraded());
//! ```
//!
//! # Keys
//!
//! Keys are opaque `u64` values; callers hash non-integer inputs themselves.
//! The filter scrambles every incoming key with a 64-bit avalanche before
//! use, so low-entropy integers (sequential IDs, pointers) are fine as-is.
//!
//! # References
//!
//! - Celis, Larson, Munro (1985). "Robin Hood Hashing"
//! - Bloom, Burton H. (1970). "Space/time trade-offs in hash coding with
//!   allowable errors"

mod bits;
mod mode;
mod sketch;
mod table;

pub use self::sketch::AdaptiveBloomFilter;

const KEY_BITS_56: u32 = 56;
const KEY_MASK_56: u64 = (1 << KEY_BITS_56) - 1;

/// Smallest capacity the parameter derivation accepts; lower values clamp up.
const MIN_CAPACITY: u64 = 16;

/// Number of slots in the first hash table allocation.
const MIN_NUM_BUCKETS: usize = 16;

/// Extract the 56-bit key payload from a slot entry
#[inline]
fn entry_key(entry: u64) -> u64 {
    entry & KEY_MASK_56
}

/// Extract the distance-from-ideal-bucket (top 8 bits) from a slot entry
///
/// A distance of 0 marks an empty slot; occupied slots carry 1 or more.
#[inline]
fn entry_dib(entry: u64) -> u64 {
    entry >> KEY_BITS_56
}

/// Pack a 56-bit key and its distance into a slot entry
///
/// Format: [dib (8 bits) << 56] | [key (56 bits)]
#[inline]
fn pack_entry(key: u64, dib: u64) -> u64 {
    (dib << KEY_BITS_56) | (key & KEY_MASK_56)
}

/// Derive the Bloom geometry `(num_bits, num_hashes)` for a capacity and
/// target false-positive rate.
///
/// `num_bits` is the textbook optimum `-n·ln(p)/ln(2)²` rounded up to a power
/// of two so probe indices reduce with a bitmask; `num_hashes` is the textbook
/// `(m/n)·ln(2)` rescaled by the ratio of optimal to rounded bits, which keeps
/// the achieved false-positive rate close to `p` after the rounding.
fn derive_bloom_params(capacity: u64, fpp: f64) -> (u64, u32) {
    let n = capacity.max(MIN_CAPACITY) as f64;
    let ln2 = std::f64::consts::LN_2;
    let ln2_squared = ln2 * ln2;

    let raw_bits = -n * fpp.ln() / ln2_squared;
    let raw_hashes = (raw_bits / n * ln2).round();

    let num_bits = (raw_bits.ceil() as u64).next_power_of_two().max(2);
    let num_hashes = ((raw_bits / num_bits as f64 * raw_hashes).round() as u32).max(1);

    (num_bits, num_hashes)
}

#[cfg(test)]
mod tests {
    use super::derive_bloom_params;
    use super::entry_dib;
    use super::entry_key;
    use super::pack_entry;

    #[test]
    fn test_pack_unpack_entry() {
        let key = 0x00aa_bbcc_dded_f012u64;
        let dib = 42u64;
        let entry = pack_entry(key, dib);
        assert_eq!(entry_key(entry), key);
        assert_eq!(entry_dib(entry), dib);
    }

    #[test]
    fn test_pack_entry_truncates_key_to_56_bits() {
        let entry = pack_entry(u64::MAX, 1);
        assert_eq!(entry_key(entry), (1u64 << 56) - 1);
        assert_eq!(entry_dib(entry), 1);
    }

    #[test]
    fn test_derive_known_geometries() {
        assert_eq!(derive_bloom_params(1000, 0.01), (16384, 4));
        assert_eq!(derive_bloom_params(10_000, 0.01), (131072, 5));
        assert_eq!(derive_bloom_params(1_000_000, 0.01), (1 << 24, 4));
        assert_eq!(derive_bloom_params(1000, 0.05), (8192, 3));
        assert_eq!(derive_bloom_params(16, 0.5), (32, 1));
    }

    #[test]
    fn test_derive_clamps_small_capacities() {
        // Anything below 16 derives the same geometry as 16.
        assert_eq!(derive_bloom_params(0, 0.01), derive_bloom_params(16, 0.01));
        assert_eq!(derive_bloom_params(5, 0.01), (256, 4));
    }

    #[test]
    fn test_derive_keeps_at_least_one_hash() {
        // A near-1 target rate would otherwise round num_hashes down to zero.
        let (_, num_hashes) = derive_bloom_params(16, 0.99);
        assert_eq!(num_hashes, 1);
    }

    #[test]
    fn test_num_bits_is_a_power_of_two() {
        for n in [16u64, 100, 1000, 54321, 1_000_000] {
            for p in [0.5, 0.1, 0.01, 0.001] {
                let (num_bits, num_hashes) = derive_bloom_params(n, p);
                assert!(num_bits.is_power_of_two());
                assert!(num_hashes >= 1);
            }
        }
    }
}
