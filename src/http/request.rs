// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request type and execution

use std::fmt;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use url::Url;

use super::client::HttpClient;
use super::entity::{Entity, FormBody, MultipartBody, RequestBody, StringBody};
use super::header::{to_header_map, HttpHeader};
use super::mime;
use super::response::HttpResponse;
use super::uri::{format_uri, UriArg};
use crate::error::{Error, Result};

/// Methods that carry an entity body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityMethod {
    Post,
    Put,
    Patch,
}

impl From<EntityMethod> for Method {
    fn from(method: EntityMethod) -> Self {
        match method {
            EntityMethod::Post => Method::POST,
            EntityMethod::Put => Method::PUT,
            EntityMethod::Patch => Method::PATCH,
        }
    }
}

/// Observable lifecycle of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    /// URI set, nothing bound yet
    Unconfigured,
    /// Headers attached to the bound URI
    Bound,
    /// Dispatched at least once; may be executed again
    Executed,
}

#[derive(Debug, Clone)]
struct Binding {
    uri: String,
    headers: Vec<HttpHeader>,
}

#[derive(Debug, Clone)]
enum RequestState {
    Unconfigured,
    Bound(Binding),
    Executed(Binding),
}

/// An HTTP request: method, URI, own headers and a body strategy.
///
/// Executing never alters the request's own headers; the client's default
/// headers are merged into a per-call copy.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    uri: Option<String>,
    body: RequestBody,
    state: RequestState,
}

fn validate_uri(uri: String) -> Result<String> {
    if uri.trim().is_empty() {
        return Err(Error::invalid_argument("Null/Empty URI"));
    }
    Ok(uri)
}

impl HttpRequest {
    /// Create a new request with arbitrary method
    pub fn new(method: Method, uri: impl Into<String>) -> Result<Self> {
        Ok(Self {
            method,
            uri: Some(validate_uri(uri.into())?),
            body: RequestBody::Empty,
            state: RequestState::Unconfigured,
        })
    }

    /// Create a request whose URI is filled from a template.
    /// Text arguments are percent-encoded first.
    pub fn template(method: Method, template: &str, args: &[UriArg]) -> Result<Self> {
        let uri = format_uri(validate_uri(template.to_string())?.as_str(), args)?;
        Self::new(method, uri)
    }

    /// Create a request without a URI; `set_uri` must be called before use
    pub fn without_uri(method: Method) -> Self {
        Self {
            method,
            uri: None,
            body: RequestBody::Empty,
            state: RequestState::Unconfigured,
        }
    }

    /// Create a new GET request
    pub fn get(uri: impl Into<String>) -> Result<Self> {
        Self::new(Method::GET, uri)
    }

    /// Create a new DELETE request
    pub fn delete(uri: impl Into<String>) -> Result<Self> {
        Self::new(Method::DELETE, uri)
    }

    /// Create a new HEAD request
    pub fn head(uri: impl Into<String>) -> Result<Self> {
        Self::new(Method::HEAD, uri)
    }

    /// Create a new OPTIONS request
    pub fn options(uri: impl Into<String>) -> Result<Self> {
        Self::new(Method::OPTIONS, uri)
    }

    /// Create a form-urlencoded request
    pub fn form(method: EntityMethod, uri: impl Into<String>, charset: &str) -> Result<Self> {
        Ok(Self::new(method.into(), uri)?.with_body(RequestBody::Form(FormBody::new(charset)?)))
    }

    /// Create a multipart request
    pub fn multipart(method: EntityMethod, uri: impl Into<String>) -> Result<Self> {
        Ok(Self::new(method.into(), uri)?.with_body(RequestBody::Multipart(MultipartBody::new())))
    }

    /// Create a string entity request
    pub fn string_entity(
        method: EntityMethod,
        uri: impl Into<String>,
        mime_type: &str,
        charset: &str,
    ) -> Result<Self> {
        let body = StringBody::new(mime_type, charset)?;
        Ok(Self::new(method.into(), uri)?.with_body(RequestBody::Text(body)))
    }

    /// Create a JSON string entity request
    pub fn json<T: Serialize>(method: EntityMethod, uri: impl Into<String>, data: &T) -> Result<Self> {
        let mut body = StringBody::new(mime::JSON, "utf-8")?;
        body.set_content_body(serde_json::to_string(data)?);
        Ok(Self::new(method.into(), uri)?.with_body(RequestBody::Text(body)))
    }

    /// Replace the body
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// HTTP method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request URI, if set
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Set the URI. A bound request keeps its headers and moves to the new URI.
    pub fn set_uri(&mut self, uri: impl Into<String>) -> Result<()> {
        let uri = validate_uri(uri.into())?;
        if let RequestState::Bound(binding) | RequestState::Executed(binding) = &mut self.state {
            binding.uri = uri.clone();
        }
        self.uri = Some(uri);
        Ok(())
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> RequestPhase {
        match self.state {
            RequestState::Unconfigured => RequestPhase::Unconfigured,
            RequestState::Bound(_) => RequestPhase::Bound,
            RequestState::Executed(_) => RequestPhase::Executed,
        }
    }

    /// Body strategy
    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Mutable body strategy
    pub fn body_mut(&mut self) -> &mut RequestBody {
        &mut self.body
    }

    /// Form body, if this is a form request
    pub fn form_mut(&mut self) -> Result<&mut FormBody> {
        match &mut self.body {
            RequestBody::Form(form) => Ok(form),
            other => Err(Error::invalid_argument(format!("Not a form request ({})", other.kind()))),
        }
    }

    /// Multipart body, if this is a multipart request
    pub fn multipart_mut(&mut self) -> Result<&mut MultipartBody> {
        match &mut self.body {
            RequestBody::Multipart(multipart) => Ok(multipart),
            other => Err(Error::invalid_argument(format!(
                "Not a multipart request ({})",
                other.kind()
            ))),
        }
    }

    /// String body, if this is a string entity request
    pub fn text_mut(&mut self) -> Result<&mut StringBody> {
        match &mut self.body {
            RequestBody::Text(text) => Ok(text),
            other => Err(Error::invalid_argument(format!(
                "Not a string entity request ({})",
                other.kind()
            ))),
        }
    }

    fn binding_mut(&mut self) -> Result<&mut Binding> {
        if let RequestState::Unconfigured = self.state {
            let uri = self
                .uri
                .clone()
                .ok_or_else(|| Error::invalid_argument("Null/Empty URI"))?;
            self.state = RequestState::Bound(Binding {
                uri,
                headers: Vec::new(),
            });
        }

        match &mut self.state {
            RequestState::Bound(binding) | RequestState::Executed(binding) => Ok(binding),
            RequestState::Unconfigured => Err(Error::invalid_argument("Request is not bound")),
        }
    }

    /// Add a header
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let header = HttpHeader::new(name, value)?;
        self.binding_mut()?.headers.push(header);
        Ok(())
    }

    /// Add several headers, left to right
    pub fn add_headers(&mut self, headers: &[HttpHeader]) -> Result<()> {
        if headers.is_empty() {
            return Err(Error::invalid_argument("Empty headers"));
        }

        self.binding_mut()?.headers.extend_from_slice(headers);
        Ok(())
    }

    /// The request's own headers (empty until the request is bound)
    pub fn headers(&self) -> &[HttpHeader] {
        match &self.state {
            RequestState::Bound(binding) | RequestState::Executed(binding) => &binding.headers,
            RequestState::Unconfigured => &[],
        }
    }

    /// Remove all of the request's own headers
    pub fn clear_headers(&mut self) -> Result<()> {
        self.binding_mut()?.headers.clear();
        Ok(())
    }

    /// Execute this request through `client`
    pub async fn execute(&mut self, client: &HttpClient) -> Result<HttpResponse> {
        let binding = self.binding_mut()?.clone();
        let transport = client.transport()?;

        let effective = merge_headers(&client.default_headers(), &binding.headers);
        let mut headers = to_header_map(&effective)?;
        let url = Url::parse(&binding.uri)?;

        let entity = self.body.materialize().await?;

        tracing::debug!(
            method = %self.method,
            url = %url,
            headers = effective.len(),
            body = self.body.kind(),
            "Dispatching request"
        );

        let mut builder = transport.request(self.method.clone(), url);
        builder = match entity {
            Some(Entity::Bytes { content_type, data }) => {
                if !headers.contains_key(CONTENT_TYPE) {
                    let value = HeaderValue::from_str(&content_type).map_err(|_| {
                        Error::invalid_argument(format!("Invalid content type '{}'", content_type))
                    })?;
                    headers.insert(CONTENT_TYPE, value);
                }
                builder.headers(headers).body(data)
            }
            Some(Entity::Multipart(form)) => builder.headers(headers).multipart(form),
            None => builder.headers(headers),
        };

        let response = builder.send().await?;
        tracing::debug!(status = %response.status(), url = %response.url(), "Response received");

        self.state = RequestState::Executed(binding);
        Ok(HttpResponse::new(response))
    }
}

impl fmt::Display for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.uri.as_deref().unwrap_or_default())
    }
}

/// Effective header list for one call.
///
/// Defaults come first and the request's own headers follow, duplicates
/// included, so a last-wins reader sees the request's value.
pub fn merge_headers(defaults: &[HttpHeader], own: &[HttpHeader]) -> Vec<HttpHeader> {
    defaults.iter().chain(own.iter()).cloned().collect()
}
