// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer
//!
//! Value objects (pairs, headers, cookies), entity bodies, and the
//! client/request/response wrappers around reqwest.

mod charset;
mod client;
mod cookie;
mod entity;
mod header;
mod pair;
mod request;
mod response;
mod uri;

pub use client::{HttpClient, HttpClientConfig};
pub use cookie::HttpCookie;
pub use entity::{FormBody, MultipartBody, MultipartPart, RequestBody, StringBody};
pub use header::{HeaderElement, HttpHeader};
pub use pair::NameValuePair;
pub use request::{merge_headers, EntityMethod, HttpRequest, RequestPhase};
pub use response::{
    get_string_response, get_string_response_with_client, HttpResponse, StringResponse,
};
pub use uri::{encode_component, format_uri, UriArg};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("ahttp/", env!("CARGO_PKG_VERSION"));

/// Common HTTP headers
pub mod headers {
    pub const CONTENT_TYPE: &str = "content-type";
    pub const CONTENT_LENGTH: &str = "content-length";
    pub const CONTENT_ENCODING: &str = "content-encoding";
    pub const SET_COOKIE: &str = "set-cookie";
    pub const USER_AGENT: &str = "user-agent";
    pub const ACCEPT: &str = "accept";
    pub const AUTHORIZATION: &str = "authorization";
}

/// MIME types used by the entity bodies
pub mod mime {
    pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
    pub const OCTET_STREAM: &str = "application/octet-stream";
    pub const JSON: &str = "application/json";
    pub const TEXT_PLAIN: &str = "text/plain";
}
