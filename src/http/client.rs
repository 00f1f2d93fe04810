// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation

use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use reqwest::redirect::Policy;
use reqwest::Client;

use super::header::{to_header_map, HttpHeader};
use super::request::HttpRequest;
use super::response::HttpResponse;
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Follow redirects
    pub enable_redirects: bool,
    /// Maximum redirects to follow when enabled
    pub max_redirects: usize,
    /// Per-request timeout (None = no timeout)
    pub timeout: Option<Duration>,
    /// User agent string
    pub user_agent: String,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            enable_redirects: false,
            max_redirects: 10,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_invalid_certs: false,
            proxy: None,
        }
    }
}

impl HttpClientConfig {
    /// Create a new client config
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable/disable redirect following
    pub fn enable_redirects(mut self, enable: bool) -> Self {
        self.enable_redirects = enable;
        self
    }

    /// Set max redirects
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Accept invalid TLS certificates
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}

/// Transport handle lifecycle
#[derive(Debug)]
enum Transport {
    Uninitialized,
    Open(Client),
    Closed,
}

/// HTTP client holding default headers and a lazily created transport.
///
/// The transport is built on first use from the configuration and the
/// default headers present at that moment. Headers added later still go out
/// on every request through the per-call merge, but the transport's own
/// defaults keep the snapshot it was built with.
#[derive(Debug)]
pub struct HttpClient {
    config: HttpClientConfig,
    default_headers: RwLock<Vec<HttpHeader>>,
    transport: Mutex<Transport>,
}

impl HttpClient {
    /// Create a new HTTP client with redirects disabled
    pub fn new() -> Self {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with the given redirect behaviour
    pub fn with_redirects(enable_redirects: bool) -> Self {
        Self::with_config(HttpClientConfig::default().enable_redirects(enable_redirects))
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Self {
        Self {
            config,
            default_headers: RwLock::new(Vec::new()),
            transport: Mutex::new(Transport::Uninitialized),
        }
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Whether redirects are followed
    pub fn redirects_enabled(&self) -> bool {
        self.config.enable_redirects
    }

    /// Append a default header sent with every request
    pub fn add_default_header(&self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let header = HttpHeader::new(name, value)?;
        self.default_headers.write().push(header);
        Ok(())
    }

    /// Append several default headers, left to right
    pub fn add_default_headers(&self, headers: &[HttpHeader]) -> Result<()> {
        if headers.is_empty() {
            return Err(Error::invalid_argument("Empty headers"));
        }

        self.default_headers.write().extend_from_slice(headers);
        Ok(())
    }

    /// Remove all default headers
    pub fn clear_default_headers(&self) {
        self.default_headers.write().clear();
    }

    /// Snapshot of the default headers
    pub fn default_headers(&self) -> Vec<HttpHeader> {
        self.default_headers.read().clone()
    }

    /// Whether a transport handle is currently held
    pub fn is_open(&self) -> bool {
        matches!(*self.transport.lock(), Transport::Open(_))
    }

    /// Release the transport handle.
    ///
    /// Fails when no handle is held: the client was never used, or it has
    /// already been closed.
    pub fn close(&self) -> Result<()> {
        let mut state = self.transport.lock();
        match std::mem::replace(&mut *state, Transport::Closed) {
            Transport::Open(_) => {
                tracing::debug!("HTTP transport closed");
                Ok(())
            }
            previous => {
                *state = previous;
                Err(Error::ClientNotInitialized)
            }
        }
    }

    /// Execute a request through this client
    pub async fn execute(&self, request: &mut HttpRequest) -> Result<HttpResponse> {
        request.execute(self).await
    }

    /// Transport handle, created on first use
    pub(crate) fn transport(&self) -> Result<Client> {
        let mut state = self.transport.lock();
        match &*state {
            Transport::Open(client) => Ok(client.clone()),
            Transport::Closed => Err(Error::ClientClosed),
            Transport::Uninitialized => {
                let client = self.build_transport()?;
                *state = Transport::Open(client.clone());
                Ok(client)
            }
        }
    }

    fn build_transport(&self) -> Result<Client> {
        let default_headers = to_header_map(&self.default_headers.read())?;
        let policy = if self.config.enable_redirects {
            Policy::limited(self.config.max_redirects)
        } else {
            Policy::none()
        };

        let mut builder = Client::builder()
            .user_agent(&self.config.user_agent)
            .redirect(policy)
            .danger_accept_invalid_certs(self.config.accept_invalid_certs)
            .default_headers(default_headers);

        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(ref proxy_url) = self.config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::invalid_argument(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;
        tracing::debug!(
            redirects = self.config.enable_redirects,
            default_headers = self.default_headers.read().len(),
            "HTTP transport created"
        );
        Ok(client)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new();
        assert!(!client.redirects_enabled());
        assert_eq!(client.config().user_agent, DEFAULT_USER_AGENT);
        assert!(!client.is_open());

        assert!(HttpClient::with_redirects(true).redirects_enabled());
    }

    #[test]
    fn test_default_headers() {
        let client = HttpClient::new();
        client.add_default_header("Accept", "text/html").unwrap();
        client.add_default_header("Accept", "application/json").unwrap();
        client
            .add_default_headers(&[HttpHeader::new("X-Api", "1").unwrap()])
            .unwrap();

        let headers = client.default_headers();
        assert_eq!(headers.len(), 3);
        assert_eq!(headers[1].value(), "application/json");
        assert_eq!(headers[2].name(), "X-Api");

        client.clear_default_headers();
        assert!(client.default_headers().is_empty());
    }

    #[test]
    fn test_add_default_headers_rejects_empty() {
        let client = HttpClient::new();
        assert!(client.add_default_headers(&[]).unwrap_err().is_invalid_argument());
        assert!(client.add_default_header("", "x").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_close_unused_client_fails() {
        let client = HttpClient::new();
        let err = client.close().unwrap_err();
        assert!(err.is_io());
        assert!(matches!(err, Error::ClientNotInitialized));
    }

    #[test]
    fn test_transport_lifecycle() {
        let client = HttpClient::new();
        client.transport().unwrap();
        assert!(client.is_open());

        client.close().unwrap();
        assert!(!client.is_open());
        assert!(matches!(client.close().unwrap_err(), Error::ClientNotInitialized));
        assert!(matches!(client.transport().unwrap_err(), Error::ClientClosed));
    }

    #[tokio::test]
    async fn test_used_client_closes_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = HttpClient::new();
        let mut request = HttpRequest::get(format!("{}/ping", server.uri())).unwrap();
        let response = client.execute(&mut request).await.unwrap();
        assert_eq!(response.status_code(), 204);

        client.close().unwrap();
        assert!(client.close().unwrap_err().is_io());
    }

    #[tokio::test]
    async fn test_transport_keeps_first_use_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/first"))
            .and(header("x-default", "d"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        // Cleared defaults still go out from the transport; new ones come from the merge
        Mock::given(method("GET"))
            .and(path("/second"))
            .and(header("x-default", "d"))
            .and(header("x-late", "l"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new();
        client.add_default_header("X-Default", "d").unwrap();

        let mut first = HttpRequest::get(format!("{}/first", server.uri())).unwrap();
        assert_eq!(client.execute(&mut first).await.unwrap().status_code(), 200);

        client.clear_default_headers();
        client.add_default_header("X-Late", "l").unwrap();

        let mut second = HttpRequest::get(format!("{}/second", server.uri())).unwrap();
        assert_eq!(client.execute(&mut second).await.unwrap().status_code(), 200);
        assert_eq!(client.default_headers().len(), 1);
        client.close().unwrap();
    }

    #[tokio::test]
    async fn test_redirect_flag() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", "/new"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let uri = format!("{}/old", server.uri());

        let plain = HttpClient::new();
        let response = HttpRequest::get(&uri).unwrap().execute(&plain).await.unwrap();
        assert_eq!(response.status_code(), 302);

        let following = HttpClient::with_redirects(true);
        let response = HttpRequest::get(&uri).unwrap().execute(&following).await.unwrap();
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.url().path(), "/new");
    }
}
