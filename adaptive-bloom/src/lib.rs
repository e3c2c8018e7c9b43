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

//! # Adaptive Bloom filter
//!
//! An approximate set-membership data structure for workloads where the
//! eventual population is bounded and known, but may in practice be much
//! smaller. The filter begins life as an exact open-addressed hash set and,
//! once the hash set would outgrow the memory footprint of the equivalent bit
//! array, irreversibly upgrades itself into a classical Bloom filter sized to
//! the originally configured capacity and target false-positive rate.
//!
//! Small populations pay only for the keys actually inserted; large
//! populations pay the fixed Bloom cost that would have been paid anyway.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod error;
pub mod filter;

mod hash;
