// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Set-Cookie header parsing

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A cookie parsed from one `Set-Cookie` line.
///
/// Attribute values are kept as raw strings; only `Max-Age` is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCookie")]
pub struct HttpCookie {
    name: String,
    value: Option<String>,
    expires: Option<String>,
    max_age: i32,
    domain: Option<String>,
    path: Option<String>,
    secure: bool,
    http_only: bool,
}

#[derive(Deserialize)]
struct RawCookie {
    name: String,
    value: Option<String>,
    expires: Option<String>,
    max_age: i32,
    domain: Option<String>,
    path: Option<String>,
    secure: bool,
    http_only: bool,
}

impl TryFrom<RawCookie> for HttpCookie {
    type Error = Error;

    fn try_from(raw: RawCookie) -> Result<Self> {
        if raw.name.trim().is_empty() {
            return Err(Error::invalid_argument("Null/Empty cookie name"));
        }

        Ok(HttpCookie {
            name: raw.name,
            value: raw.value,
            expires: raw.expires,
            max_age: raw.max_age,
            domain: raw.domain,
            path: raw.path,
            secure: raw.secure,
            http_only: raw.http_only,
        })
    }
}

/// Split a segment on its first `=`
fn split_entry(segment: &str) -> (&str, Option<&str>) {
    match segment.split_once('=') {
        Some((key, value)) => (key.trim(), Some(value.trim())),
        None => (segment.trim(), None),
    }
}

impl HttpCookie {
    fn named(name: String, value: Option<String>) -> Self {
        Self {
            name,
            value,
            expires: None,
            max_age: 0,
            domain: None,
            path: None,
            secure: false,
            http_only: false,
        }
    }

    /// Create a new cookie
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_argument("Null/Empty cookie name"));
        }

        Ok(Self::named(name, Some(value.into())))
    }

    /// Parse a Set-Cookie header value
    pub fn parse(header_line: &str) -> Result<Self> {
        let mut segments = header_line.split(';');

        let (name, value) = split_entry(segments.next().unwrap_or_default());
        if name.is_empty() {
            return Err(Error::invalid_argument(format!(
                "Cookie without name: '{}'",
                header_line
            )));
        }

        let mut cookie = Self::named(name.to_string(), value.map(str::to_string));

        for segment in segments {
            let (key, value) = split_entry(segment);
            if key.is_empty() {
                continue;
            }

            match key.to_ascii_lowercase().as_str() {
                "expires" => cookie.expires = value.map(str::to_string),
                "max-age" => {
                    let raw = value.unwrap_or_default();
                    cookie.max_age = raw.parse().map_err(|source| Error::CookieMaxAge {
                        value: raw.to_string(),
                        source,
                    })?;
                }
                "domain" => cookie.domain = value.map(str::to_string),
                "path" => cookie.path = value.map(str::to_string),
                "secure" => cookie.secure = true,
                "httponly" => cookie.http_only = true,
                _ => {}
            }
        }

        Ok(cookie)
    }

    /// Cookie name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cookie value, `None` when the header carried a bare name
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Raw `Expires` attribute
    pub fn expires(&self) -> Option<&str> {
        self.expires.as_deref()
    }

    /// `Max-Age` in seconds, 0 when absent
    pub fn max_age(&self) -> i32 {
        self.max_age
    }

    /// `Domain` attribute
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// `Path` attribute
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// `Secure` flag
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// `HttpOnly` flag
    pub fn is_http_only(&self) -> bool {
        self.http_only
    }

    /// Set the expiration string
    pub fn with_expires(mut self, expires: impl Into<String>) -> Self {
        self.expires = Some(expires.into());
        self
    }

    /// Set max-age
    pub fn with_max_age(mut self, max_age: i32) -> Self {
        self.max_age = max_age;
        self
    }

    /// Set the domain
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Set the path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set secure flag
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set http_only flag
    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Interpret `Expires` as a date.
    ///
    /// Accepts RFC 2822 and the Netscape `Wdy, DD-Mon-YYYY HH:MM:SS GMT` form.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.expires.as_deref()?;

        if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
            return Some(dt.with_timezone(&Utc));
        }

        NaiveDateTime::parse_from_str(raw, "%a, %d-%b-%Y %H:%M:%S GMT")
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Convert to cookie header format
    pub fn to_header_value(&self) -> String {
        format!("{}={}", self.name, self.value.as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_cookie_parsing() {
        let cookie = HttpCookie::parse("sid=abc123; Max-Age=3600; Path=/; Secure; HttpOnly").unwrap();

        assert_eq!(cookie.name(), "sid");
        assert_eq!(cookie.value(), Some("abc123"));
        assert_eq!(cookie.max_age(), 3600);
        assert_eq!(cookie.path(), Some("/"));
        assert!(cookie.is_secure());
        assert!(cookie.is_http_only());
        assert_eq!(cookie.domain(), None);
        assert_eq!(cookie.expires(), None);
    }

    #[test]
    fn test_max_age_not_a_number() {
        let err = HttpCookie::parse("sid=abc123; Max-Age=notanumber").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_bare_max_age_fails() {
        assert!(HttpCookie::parse("sid=abc123; Max-Age").unwrap_err().is_parse());
    }

    #[test]
    fn test_negative_max_age() {
        let cookie = HttpCookie::parse("sid=gone; Max-Age=-1").unwrap();
        assert_eq!(cookie.max_age(), -1);
    }

    #[test]
    fn test_name_value_kept_verbatim() {
        let cookie = HttpCookie::parse("SessionID=AbC=; domain=Example.COM").unwrap();
        assert_eq!(cookie.name(), "SessionID");
        assert_eq!(cookie.value(), Some("AbC="));
        assert_eq!(cookie.domain(), Some("Example.COM"));
    }

    #[test]
    fn test_missing_value_tolerated() {
        let cookie = HttpCookie::parse("flag; Path=/app").unwrap();
        assert_eq!(cookie.name(), "flag");
        assert_eq!(cookie.value(), None);
        assert_eq!(cookie.path(), Some("/app"));
    }

    #[test]
    fn test_missing_name_rejected() {
        assert!(HttpCookie::parse("=abc; Path=/").unwrap_err().is_invalid_argument());
        assert!(HttpCookie::parse("").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_attributes_cannot_override_name() {
        let cookie = HttpCookie::parse("a=1; name=evil; value=evil; a=2").unwrap();
        assert_eq!(cookie.name(), "a");
        assert_eq!(cookie.value(), Some("1"));
    }

    #[test]
    fn test_trailing_and_empty_segments_ignored() {
        let cookie = HttpCookie::parse("a=1;; Secure; ;").unwrap();
        assert!(cookie.is_secure());
        assert!(!cookie.is_http_only());
    }

    #[test]
    fn test_flag_value_ignored() {
        let cookie = HttpCookie::parse("a=1; Secure=false; HTTPONLY=0").unwrap();
        assert!(cookie.is_secure());
        assert!(cookie.is_http_only());
    }

    #[test]
    fn test_unknown_attributes_ignored() {
        let cookie = HttpCookie::parse("a=1; SameSite=Lax; Priority=High").unwrap();
        assert_eq!(cookie, HttpCookie::new("a", "1").unwrap());
    }

    #[test]
    fn test_expires_kept_raw_and_interpreted() {
        let cookie = HttpCookie::parse("a=1; Expires=Wed, 21 Oct 2015 07:28:00 GMT").unwrap();
        assert_eq!(cookie.expires(), Some("Wed, 21 Oct 2015 07:28:00 GMT"));

        let at = cookie.expires_at().unwrap();
        assert_eq!((at.year(), at.month(), at.day()), (2015, 10, 21));
        assert_eq!(at.hour(), 7);
    }

    #[test]
    fn test_netscape_expires() {
        let cookie = HttpCookie::parse("a=1; expires=Wed, 21-Oct-2015 07:28:00 GMT").unwrap();
        assert_eq!(cookie.expires_at().map(|d| d.year()), Some(2015));
    }

    #[test]
    fn test_unparseable_expires() {
        let cookie = HttpCookie::parse("a=1; expires=tomorrow").unwrap();
        assert_eq!(cookie.expires(), Some("tomorrow"));
        assert!(cookie.expires_at().is_none());
    }

    #[test]
    fn test_builder_and_header_value() {
        let cookie = HttpCookie::new("token", "xyz")
            .unwrap()
            .with_domain("example.com")
            .with_path("/")
            .with_secure(true);
        assert_eq!(cookie.domain(), Some("example.com"));
        assert!(cookie.is_secure());
        assert_eq!(cookie.to_header_value(), "token=xyz");
    }

    #[test]
    fn test_new_cookie_defaults() {
        let cookie = HttpCookie::new("a", "1").unwrap();
        assert_eq!(cookie.max_age(), 0);
        assert_eq!(cookie.path(), None);
        assert!(!cookie.is_secure());
        assert!(HttpCookie::new(" ", "1").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_repeated_attribute_last_wins() {
        let cookie = HttpCookie::parse("a=1; Path=/first; Max-Age=10; path=/second; Max-Age=20").unwrap();
        assert_eq!(cookie.path(), Some("/second"));
        assert_eq!(cookie.max_age(), 20);
    }

    #[test]
    fn test_serde_round_trip_and_validation() {
        let cookie = HttpCookie::parse("sid=1; Path=/; HttpOnly").unwrap();
        let json = serde_json::to_string(&cookie).unwrap();
        assert_eq!(serde_json::from_str::<HttpCookie>(&json).unwrap(), cookie);

        let nameless = json.replace(r#""name":"sid""#, r#""name":"""#);
        assert!(serde_json::from_str::<HttpCookie>(&nameless).is_err());
    }
}
