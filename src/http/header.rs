// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP header value object

use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use super::pair::NameValuePair;
use crate::error::{Error, Result};

/// Structured view of a header value.
///
/// Headers expose exactly one element carrying the raw value as its name;
/// parameters such as `;charset=` are not split out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeaderElement {
    pub name: String,
    pub value: Option<String>,
}

/// A single HTTP header.
///
/// Serialized as `{"name", "value"}`; the element view is rebuilt on load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawHeader", into = "RawHeader")]
pub struct HttpHeader {
    pair: NameValuePair,
    elements: [HeaderElement; 1],
}

#[derive(Serialize, Deserialize)]
struct RawHeader {
    name: String,
    value: String,
}

impl TryFrom<RawHeader> for HttpHeader {
    type Error = Error;

    fn try_from(raw: RawHeader) -> Result<Self> {
        Self::new(raw.name, raw.value)
    }
}

impl From<HttpHeader> for RawHeader {
    fn from(header: HttpHeader) -> Self {
        let (name, value) = header.pair.into_parts();
        RawHeader { name, value }
    }
}

impl HttpHeader {
    /// Create a new header. Fails when `name` is empty.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let pair = NameValuePair::new(name, value)?;
        let element = HeaderElement {
            name: pair.value().to_string(),
            value: None,
        };

        Ok(Self {
            pair,
            elements: [element],
        })
    }

    /// Header name
    pub fn name(&self) -> &str {
        self.pair.name()
    }

    /// Raw header value
    pub fn value(&self) -> &str {
        self.pair.value()
    }

    /// Underlying name/value pair
    pub fn pair(&self) -> &NameValuePair {
        &self.pair
    }

    /// Structured elements (always exactly one)
    pub fn elements(&self) -> &[HeaderElement] {
        &self.elements
    }

    /// Case-insensitive name comparison
    pub fn is(&self, name: &str) -> bool {
        self.name().eq_ignore_ascii_case(name)
    }

    /// Convert into wire types
    pub fn to_wire(&self) -> Result<(HeaderName, HeaderValue)> {
        let name = HeaderName::from_bytes(self.name().as_bytes())
            .map_err(|_| Error::invalid_argument(format!("Invalid header name '{}'", self.name())))?;
        let value = HeaderValue::from_str(self.value()).map_err(|_| {
            Error::invalid_argument(format!("Invalid value for header '{}'", self.name()))
        })?;
        Ok((name, value))
    }

    /// Convert a wire header back into a value object.
    /// Non-UTF-8 bytes are replaced lossily.
    pub fn from_wire(name: &HeaderName, value: &HeaderValue) -> Result<Self> {
        Self::new(
            name.as_str(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        )
    }
}

impl From<HttpHeader> for NameValuePair {
    fn from(header: HttpHeader) -> Self {
        header.pair
    }
}

impl TryFrom<NameValuePair> for HttpHeader {
    type Error = Error;

    fn try_from(pair: NameValuePair) -> Result<Self> {
        let (name, value) = pair.into_parts();
        Self::new(name, value)
    }
}

impl fmt::Display for HttpHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name(), self.value())
    }
}

/// Build a wire header map, keeping order and duplicates
pub fn to_header_map(headers: &[HttpHeader]) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for header in headers {
        let (name, value) = header.to_wire()?;
        map.append(name, value);
    }
    Ok(map)
}

/// Flatten a wire header map into value objects
pub fn from_header_map(map: &HeaderMap) -> Vec<HttpHeader> {
    map.iter()
        .filter_map(|(name, value)| HttpHeader::from_wire(name, value).ok())
        .collect()
}
