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

//! Error types for adaptive-bloom operations

use std::fmt;

/// ErrorKind is all kinds of Error of adaptive-bloom.
///
/// Allocation failure while growing or upgrading is the only runtime failure
/// the filter can produce; every other operation is infallible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Storage for a grow or upgrade could not be allocated.
    OutOfMemory,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::OutOfMemory => write!(f, "out of memory"),
        }
    }
}

/// Error is the error struct returned by all adaptive-bloom functions.
///
/// Carries the failing allocation's name and, when attached, the size that
/// could not be satisfied.
///
/// # Examples
///
/// ```
/// # use adaptive_bloom::error::Error;
/// # use adaptive_bloom::error::ErrorKind;
/// let err = Error::new(ErrorKind::OutOfMemory, "bucket array").with_context("num_buckets", 2048);
/// assert_eq!(err.kind(), ErrorKind::OutOfMemory);
/// assert_eq!(err.message(), "bucket array");
/// assert_eq!(err.to_string(), "out of memory: bucket array (num_buckets: 2048)");
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    context: Option<(&'static str, String)>,
}

impl Error {
    /// Create a new Error with error kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
        }
    }

    /// Attach the requested size (or a similar detail) to the error.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context = Some((key, value.to_string()));
        self
    }

    /// Return error's kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return error's message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl Error {
    pub(crate) fn out_of_memory(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::OutOfMemory, msg)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some((key, value)) = &self.context {
            write!(f, " ({key}: {value})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}
