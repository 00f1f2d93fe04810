// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Immutable name/value pair

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A validated name/value tuple. The name is never empty; the value may be.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPair")]
pub struct NameValuePair {
    name: String,
    value: String,
}

/// Unvalidated wire shape
#[derive(Deserialize)]
struct RawPair {
    name: String,
    value: String,
}

impl TryFrom<RawPair> for NameValuePair {
    type Error = Error;

    fn try_from(raw: RawPair) -> Result<Self> {
        Self::new(raw.name, raw.value)
    }
}

impl NameValuePair {
    /// Create a new pair. Fails when `name` is empty or only whitespace.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_argument("Null/Empty name"));
        }

        Ok(Self {
            name,
            value: value.into(),
        })
    }

    /// Pair name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pair value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Split into `(name, value)`
    pub fn into_parts(self) -> (String, String) {
        (self.name, self.value)
    }
}

impl fmt::Display for NameValuePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}
