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

const M1: u64 = 0xbf58476d1ce4e5b9;
const M2: u64 = 0x94d049bb133111eb;

/// The mix13 variant of the SplitMix64 finalizer: three xor-shift / multiply
/// stages with full 64-bit avalanche.
///
/// Every key entering the filter passes through this function exactly once, at
/// the public boundary. The function is a bijection on `u64`, so distinct
/// caller keys stay distinct until the 56-bit slot truncation.
#[inline]
pub(crate) fn mix13(mut key: u64) -> u64 {
    key ^= key >> 30;
    key = key.wrapping_mul(M1);
    key ^= key >> 27;
    key = key.wrapping_mul(M2);
    key ^= key >> 31;
    key
}

/// One step of the Bloom probe sequence: the final multiply / xor-shift stage
/// of [`mix13`] applied again.
///
/// Iterating this over an already-mixed key yields the successive bit indices
/// of a Bloom insertion or query. Callers must feed keys that have been mixed
/// once; re-mixing a stored key instead would diverge from the indices chosen
/// at insertion time.
#[inline]
pub(crate) fn remix(mut key: u64) -> u64 {
    key = key.wrapping_mul(M2);
    key ^= key >> 31;
    key
}
