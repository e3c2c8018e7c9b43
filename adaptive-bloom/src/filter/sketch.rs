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

//! Adaptive membership filter implementation
//!
//! This module provides the main [`AdaptiveBloomFilter`] struct, which routes
//! inserts and queries to the active representation and drives the one-way
//! upgrade from the exact hash table to the Bloom bit array.

use crate::error::Error;
use crate::filter::KEY_MASK_56;
use crate::filter::MIN_NUM_BUCKETS;
use crate::filter::bits::BloomBits;
use crate::filter::derive_bloom_params;
use crate::filter::mode::Mode;
use crate::filter::table::RobinHoodTable;
use crate::hash::mix13;

/// An adaptive membership filter.
///
/// See the [filter module level documentation](crate::filter) for more.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveBloomFilter {
    /// Total Bloom bits (m), fixed at construction
    num_bits: u64,
    /// Probe indices per key (k), fixed at construction
    num_hashes: u32,
    mode: Mode,
}

impl AdaptiveBloomFilter {
    /// Create a new filter for `capacity` keys at a target false-positive
    /// rate of `fpp`.
    ///
    /// The Bloom geometry is derived here, but no storage is allocated until
    /// the first insertion. Capacities below 16 are clamped up to 16.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of distinct keys expected; the memory
    ///   ceiling and the false-positive guarantee are sized for this
    /// * `fpp` - Target false positive probability in Bloom mode (e.g. 0.01
    ///   for 1%)
    ///
    /// # Panics
    ///
    /// Panics if `fpp` is not a finite value in (0.0, 1.0).
    pub fn new(capacity: u64, fpp: f64) -> Self {
        assert!(
            fpp.is_finite() && fpp > 0.0 && fpp < 1.0,
            "fpp must be between 0.0 and 1.0 (exclusive), got {}",
            fpp
        );

        let (num_bits, num_hashes) = derive_bloom_params(capacity, fpp);

        Self {
            num_bits,
            num_hashes,
            mode: Mode::Hash(RobinHoodTable::default()),
        }
    }

    /// Insert a key into the filter.
    ///
    /// After insertion, `contains(key)` will always return `true`. Inserting
    /// a key that is already present changes nothing.
    ///
    /// # Errors
    ///
    /// Returns an out-of-memory error if growing the hash table (or
    /// allocating the Bloom bit array during an upgrade) fails. The filter is
    /// left in its pre-insert state and remains usable; the key is not
    /// inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// # use adaptive_bloom::filter::AdaptiveBloomFilter;
    /// let mut filter = AdaptiveBloomFilter::new(1000, 0.01);
    ///
    /// filter.insert(42).unwrap();
    ///
    /// assert!(filter.contains(42));
    /// assert!(!filter.contains(7));
    /// ```
    pub fn insert(&mut self, key: u64) -> Result<(), Error> {
        let key = mix13(key);

        // Growing may upgrade the representation, so re-dispatch on the mode
        // until the key lands somewhere.
        loop {
            match &mut self.mode {
                Mode::Bloom(bits) => {
                    bits.insert(key);
                    return Ok(());
                }
                Mode::Hash(table) => {
                    if table.num_entries() != table.num_buckets() >> 1 {
                        table.insert(key & KEY_MASK_56);
                        return Ok(());
                    }
                }
            }
            self.grow()?;
        }
    }

    /// Test whether a key is possibly in the filter.
    ///
    /// Returns:
    /// - `true`: the key was inserted, or (in Bloom mode only) is a false
    ///   positive
    /// - `false`: the key was **definitely not** inserted
    ///
    /// Before the upgrade the answer is exact; afterwards `false` stays
    /// definitive while `true` is probabilistic.
    ///
    /// # Examples
    ///
    /// ```
    /// # use adaptive_bloom::filter::AdaptiveBloomFilter;
    /// let mut filter = AdaptiveBloomFilter::new(1000, 0.01);
    /// filter.insert(12031).unwrap();
    ///
    /// assert!(filter.contains(12031));
    /// assert!(!filter.contains(99999));
    /// ```
    pub fn contains(&self, key: u64) -> bool {
        let key = mix13(key);
        match &self.mode {
            Mode::Bloom(bits) => bits.contains(key),
            Mode::Hash(table) => table.contains(key & KEY_MASK_56),
        }
    }

    /// Empty the filter while keeping its current representation.
    ///
    /// In hash mode the table is zeroed; in Bloom mode the bit array is
    /// zeroed. An upgraded filter stays upgraded; callers wanting the small
    /// exact representation back must construct a new filter.
    ///
    /// # Examples
    ///
    /// ```
    /// # use adaptive_bloom::filter::AdaptiveBloomFilter;
    /// let mut filter = AdaptiveBloomFilter::new(1000, 0.01);
    /// filter.insert(42).unwrap();
    ///
    /// filter.reset();
    /// assert!(!filter.contains(42));
    /// assert!(filter.is_empty());
    /// ```
    pub fn reset(&mut self) {
        match &mut self.mode {
            Mode::Bloom(bits) => bits.clear(),
            Mode::Hash(table) => table.clear(),
        }
    }

    /// Returns whether the filter has upgraded to its Bloom representation.
    ///
    /// Once true, it stays true for the lifetime of the filter.
    pub fn is_upgraded(&self) -> bool {
        matches!(self.mode, Mode::Bloom(_))
    }

    /// Returns whether the filter is empty (no keys inserted).
    pub fn is_empty(&self) -> bool {
        match &self.mode {
            Mode::Bloom(bits) => bits.is_empty(),
            Mode::Hash(table) => table.is_empty(),
        }
    }

    /// Current storage footprint in bytes.
    ///
    /// Grows with the hash table until the upgrade, then stays at the Bloom
    /// bit array's size. [`reset()`](Self::reset) does not change it.
    pub fn size_bytes(&self) -> usize {
        match &self.mode {
            Mode::Bloom(bits) => bits.size_bytes(),
            Mode::Hash(table) => table.num_buckets() * 8,
        }
    }

    /// Returns the number of keys stored exactly; zero once upgraded.
    pub fn num_entries(&self) -> usize {
        match &self.mode {
            Mode::Bloom(_) => 0,
            Mode::Hash(table) => table.num_entries(),
        }
    }

    /// Returns the total number of bits in the Bloom representation (m).
    pub fn num_bits(&self) -> u64 {
        self.num_bits
    }

    /// Returns the number of probe indices per key (k).
    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }

    /// Replace the hash table with either a doubled table or the Bloom bit
    /// array, migrating every stored key.
    ///
    /// The next table doubles (starting at 16 slots); if that table would
    /// meet or exceed the Bloom array's byte size, the Bloom array is
    /// allocated instead and the filter upgrades for good. New storage is
    /// fully built before the old is dropped, so a failed allocation leaves
    /// the filter untouched.
    fn grow(&mut self) -> Result<(), Error> {
        let Mode::Hash(table) = &self.mode else {
            unreachable!("grow is only reachable from hash mode");
        };

        let num_buckets_new = match table.num_buckets() {
            0 => MIN_NUM_BUCKETS,
            num_buckets => num_buckets * 2,
        };

        let new_mode = if (num_buckets_new * 8) as u64 >= self.num_bits >> 3 {
            upgrade_to_bloom(table, self.num_bits, self.num_hashes)?
        } else {
            expand_table(table, num_buckets_new)?
        };
        self.mode = new_mode;
        Ok(())
    }
}

fn upgrade_to_bloom(table: &RobinHoodTable, num_bits: u64, num_hashes: u32) -> Result<Mode, Error> {
    let mut bits = BloomBits::new(num_bits, num_hashes)?;
    // Stored keys are already mixed and truncated; feeding them to the probe
    // unchanged is what keeps prior memberships observable.
    for key in table.iter() {
        bits.insert(key);
    }
    Ok(Mode::Bloom(bits))
}

fn expand_table(old_table: &RobinHoodTable, num_buckets: usize) -> Result<Mode, Error> {
    let mut table = RobinHoodTable::with_buckets(num_buckets)?;
    for key in old_table.iter() {
        table.insert(key);
    }
    Ok(Mode::Hash(table))
}
