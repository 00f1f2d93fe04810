// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types

use std::sync::OnceLock;

use bytes::buf::Reader;
use bytes::{Buf, Bytes};
use futures::Stream;
use reqwest::header::{CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{StatusCode, Version};
use serde::de::DeserializeOwned;
use url::Url;

use super::charset;
use super::client::HttpClient;
use super::cookie::HttpCookie;
use super::header::{from_header_map, HttpHeader};
use super::headers::SET_COOKIE;
use super::request::HttpRequest;
use crate::error::{Error, Result};

fn version_string(version: Version) -> String {
    let s = match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_11 => "1.1",
        Version::HTTP_2 => "2.0",
        Version::HTTP_3 => "3.0",
        _ => "1.1",
    };
    s.to_string()
}

fn first_named<'a>(headers: &'a [HttpHeader], name: &str) -> Option<&'a HttpHeader> {
    headers.iter().find(|h| h.is(name))
}

fn all_named<'a>(headers: &'a [HttpHeader], name: &str) -> Vec<&'a HttpHeader> {
    headers.iter().filter(|h| h.is(name)).collect()
}

/// Parse every `Set-Cookie` header, skipping malformed ones
fn parse_cookies(headers: &[HttpHeader]) -> Vec<HttpCookie> {
    all_named(headers, SET_COOKIE)
        .into_iter()
        .filter_map(|h| match HttpCookie::parse(h.value()) {
            Ok(cookie) => Some(cookie),
            Err(e) => {
                tracing::warn!(header = %h.value(), error = %e, "Skipping malformed Set-Cookie");
                None
            }
        })
        .collect()
}

/// A received response.
///
/// Header value objects are built on first access and cached.
#[derive(Debug)]
pub struct HttpResponse {
    inner: reqwest::Response,
    headers: OnceLock<Vec<HttpHeader>>,
}

impl HttpResponse {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self {
            inner,
            headers: OnceLock::new(),
        }
    }

    /// Response status
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    /// Check if status is redirect (3xx)
    pub fn is_redirect(&self) -> bool {
        self.inner.status().is_redirection()
    }

    /// Final URL (after redirects)
    pub fn url(&self) -> &Url {
        self.inner.url()
    }

    /// Protocol version as `major.minor`
    pub fn protocol_version(&self) -> String {
        version_string(self.inner.version())
    }

    /// Declared content length.
    ///
    /// Prefers the `Content-Length` header and falls back to the transport's
    /// body size hint.
    pub fn content_length(&self) -> Option<u64> {
        self.inner
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
            .or_else(|| self.inner.content_length())
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.inner.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// Get content encoding
    pub fn content_encoding(&self) -> Option<&str> {
        self.inner
            .headers()
            .get(CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
    }

    /// All headers in wire order
    pub fn headers(&self) -> &[HttpHeader] {
        self.headers
            .get_or_init(|| from_header_map(self.inner.headers()))
    }

    /// First header named `name` (case-insensitive)
    pub fn first_header(&self, name: &str) -> Option<&HttpHeader> {
        first_named(self.headers(), name)
    }

    /// All headers named `name` (case-insensitive)
    pub fn headers_named(&self, name: &str) -> Vec<&HttpHeader> {
        all_named(self.headers(), name)
    }

    /// Cookies set by this response
    pub fn cookies(&self) -> Vec<HttpCookie> {
        parse_cookies(self.headers())
    }

    /// Read the next chunk of content, `None` at the end
    pub async fn chunk(&mut self) -> Result<Option<Bytes>> {
        Ok(self.inner.chunk().await?)
    }

    /// Content as a byte stream
    pub fn bytes_stream(self) -> impl Stream<Item = Result<Bytes>> {
        use futures::TryStreamExt;
        self.inner.bytes_stream().map_err(Error::from)
    }

    /// Read the whole content
    pub async fn bytes(self) -> Result<Bytes> {
        Ok(self.inner.bytes().await?)
    }

    /// Release the response and its connection
    pub fn close(self) {
        drop(self.inner);
    }
}

/// A response whose body was read eagerly into a string.
///
/// The content is held twice: decoded as a `String`, and re-encoded with the
/// caller's charset. `content_length` and `content_reader` report the latter.
#[derive(Debug, Clone)]
pub struct StringResponse {
    status: StatusCode,
    protocol_version: String,
    url: Url,
    headers: Vec<HttpHeader>,
    content: String,
    charset: String,
    buffer: Bytes,
}

impl StringResponse {
    /// Consume `response`, enforcing `max_length` (`None` = unbounded).
    ///
    /// An oversized declared length fails before the body is read. The body
    /// is decoded with the charset from the response's content type (UTF-8
    /// if absent) and re-encoded with `charset`.
    pub async fn from_response(
        response: HttpResponse,
        charset: &str,
        max_length: Option<u64>,
    ) -> Result<Self> {
        let encoding = charset::lookup(charset)?;

        if let (Some(max_length), Some(length)) = (max_length, response.content_length()) {
            if length > max_length {
                return Err(Error::body_too_large(length, max_length));
            }
        }

        let status = response.status();
        let protocol_version = response.protocol_version();
        let url = response.url().clone();
        let headers = response.headers().to_vec();

        let content = response.inner.text().await?;
        let buffer = Bytes::from(charset::encode(encoding, &content));

        tracing::debug!(
            status = %status,
            decoded_length = content.len(),
            length = buffer.len(),
            charset,
            "Response consumed"
        );

        Ok(Self {
            status,
            protocol_version,
            url,
            headers,
            content,
            charset: charset.to_string(),
            buffer,
        })
    }

    /// Response status
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Final URL (after redirects)
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Protocol version as `major.minor`
    pub fn protocol_version(&self) -> &str {
        &self.protocol_version
    }

    /// Charset the buffer was encoded with
    pub fn charset(&self) -> &str {
        &self.charset
    }

    /// Decoded body
    pub fn content_string(&self) -> &str {
        &self.content
    }

    /// Size in bytes of the re-encoded body
    pub fn content_length(&self) -> u64 {
        self.buffer.len() as u64
    }

    /// Re-encoded body
    pub fn content_bytes(&self) -> &Bytes {
        &self.buffer
    }

    /// Reader over the re-encoded body
    pub fn content_reader(&self) -> Reader<Bytes> {
        self.buffer.clone().reader()
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.first_header(CONTENT_TYPE.as_str()).map(HttpHeader::value)
    }

    /// Get content encoding
    pub fn content_encoding(&self) -> Option<&str> {
        self.first_header(CONTENT_ENCODING.as_str()).map(HttpHeader::value)
    }

    /// All headers in wire order
    pub fn headers(&self) -> &[HttpHeader] {
        &self.headers
    }

    /// First header named `name` (case-insensitive)
    pub fn first_header(&self, name: &str) -> Option<&HttpHeader> {
        first_named(&self.headers, name)
    }

    /// All headers named `name` (case-insensitive)
    pub fn headers_named(&self, name: &str) -> Vec<&HttpHeader> {
        all_named(&self.headers, name)
    }

    /// Cookies set by this response
    pub fn cookies(&self) -> Vec<HttpCookie> {
        parse_cookies(&self.headers)
    }

    /// Parse body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.content).map_err(Error::from)
    }
}

/// Execute `request` with a throwaway client and read the response as a
/// string. The client is released on every path.
pub async fn get_string_response(
    request: &mut HttpRequest,
    charset: &str,
    max_length: Option<u64>,
) -> Result<StringResponse> {
    let client = HttpClient::new();
    let result = get_string_response_with_client(&client, request, charset, max_length).await;

    let closed = if client.is_open() { client.close() } else { Ok(()) };
    let response = result?;
    closed?;
    Ok(response)
}

/// Execute `request` with `client` and read the response as a string.
/// Only the intermediate response is released; the client stays open.
pub async fn get_string_response_with_client(
    client: &HttpClient,
    request: &mut HttpRequest,
    charset: &str,
    max_length: Option<u64>,
) -> Result<StringResponse> {
    let response = request.execute(client).await?;
    StringResponse::from_response(response, charset, max_length).await
}
