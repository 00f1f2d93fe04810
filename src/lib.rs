// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # ahttp - Convenience layer over reqwest
//!
//! Small value objects and request shapes that cut the boilerplate of
//! issuing HTTP requests and reading responses. Transport, TLS, redirects,
//! pooling and multipart framing are all reqwest's job.
//!
//! ## Features
//!
//! - Value objects: `NameValuePair`, `HttpHeader`, `HttpCookie`
//! - Cookie parsing: `Set-Cookie` lines into structured records
//! - Default headers: client-wide headers merged per call, request values last
//! - Entity requests: form-urlencoded, multipart and string bodies on POST/PUT/PATCH
//! - URI templates: `printf`-style with percent-encoded text arguments
//! - String responses: eager body read with a size cap and charset re-encoding
//!
//! ## Example
//!
//! ```rust,no_run
//! use ahttp::{EntityMethod, HttpClient, HttpRequest, StringResponse};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::new();
//!     client.add_default_header("Accept", "text/html")?;
//!
//!     let mut login = HttpRequest::form(EntityMethod::Post, "https://example.com/login", "utf-8")?;
//!     login.form_mut()?.add_parameter("user", "ana")?;
//!
//!     let response = login.execute(&client).await?;
//!     for cookie in response.cookies() {
//!         println!("cookie: {}", cookie.to_header_value());
//!     }
//!
//!     let page = StringResponse::from_response(response, "utf-8", Some(1 << 20)).await?;
//!     println!("{}", page.content_string());
//!
//!     client.close()?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;

// Re-exports for convenience

// Errors
pub use error::{Error, Result};

// Value objects
pub use http::{HeaderElement, HttpCookie, HttpHeader, NameValuePair};

// Client and requests
pub use http::{merge_headers, EntityMethod, HttpClient, HttpClientConfig, HttpRequest, RequestPhase};
pub use http::{FormBody, MultipartBody, MultipartPart, RequestBody, StringBody};
pub use http::{encode_component, format_uri, UriArg};

// Responses
pub use http::{get_string_response, get_string_response_with_client, HttpResponse, StringResponse};

/// ahttp version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
