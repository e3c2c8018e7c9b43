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

use adaptive_bloom::filter::AdaptiveBloomFilter;

fn main() {
    // Sized for up to 100,000 keys at a 1% false-positive rate
    let mut filter = AdaptiveBloomFilter::new(100_000, 0.01);

    println!(
        "Created filter: {} bloom bits, {} hashes per key",
        filter.num_bits(),
        filter.num_hashes()
    );
    println!("Initial footprint: {} bytes", filter.size_bytes());

    // A small population stays in the exact hash-set phase
    println!("\nInserting 1,000 keys...");
    for key in 0..1_000u64 {
        filter.insert(key).expect("allocation failed");
    }
    println!("Upgraded: {}", filter.is_upgraded());
    println!("Exact entries: {}", filter.num_entries());
    println!("Footprint: {} bytes", filter.size_bytes());

    // Membership is exact before the upgrade
    println!("contains(500): {}", filter.contains(500));
    println!("contains(123_456): {}", filter.contains(123_456));

    // Pushing towards capacity crosses the storage threshold and upgrades
    println!("\nInserting the remaining 99,000 keys...");
    for key in 1_000..100_000u64 {
        filter.insert(key).expect("allocation failed");
    }
    println!("Upgraded: {}", filter.is_upgraded());
    println!("Footprint: {} bytes", filter.size_bytes());

    // Every inserted key is still observable after the upgrade
    let misses = (0..100_000u64).filter(|&key| !filter.contains(key)).count();
    println!("False negatives after upgrade: {}", misses);

    // Foreign keys now come back positive at roughly the configured rate
    let false_positives = (100_001..=200_000u64)
        .filter(|&key| filter.contains(key))
        .count();
    println!(
        "Measured false-positive rate: {:.4}%",
        false_positives as f64 / 100_000.0 * 100.0
    );

    // Reset empties the filter but keeps the Bloom representation
    filter.reset();
    println!("\nAfter reset: upgraded={}", filter.is_upgraded());
    println!("contains(500): {}", filter.contains(500));
}
