//! HTTP client and builder.
//!
//! [`Transport`] is the seam between a built [`Request`] and the network.
//! [`Client`] is the default implementation: it hands requests to
//! `reqwest` and blocks on a private single-threaded runtime until the
//! whole response has been read. Create one via [`Client::builder()`],
//! configure timeouts and defaults, then call
//! [`.build()`](ClientBuilder::build). `Client` is cheap to clone (`Arc`
//! internally).

use crate::error::Error;
use crate::request::Request;
use crate::response::Response;
use crate::runtime::Runtime;
use http::{HeaderMap, HeaderValue};
use std::sync::Arc;
use std::time::Duration;

/// Something that can carry a [`Request`] to a server and return the
/// [`Response`].
///
/// [`RequestBuilder::send_with()`](crate::RequestBuilder::send_with)
/// dispatches through any implementation, so tests and callers with
/// special needs can substitute their own.
///
/// # Example
///
/// ```rust
/// use reqforge::{Error, Request, RequestBuilder, Response, StatusCode, Transport};
///
/// struct Offline;
///
/// impl Transport for Offline {
///     fn execute(&self, _request: Request) -> Result<Response, Error> {
///         let mut resp = http::Response::new("offline");
///         *resp.status_mut() = StatusCode::SERVICE_UNAVAILABLE;
///         Ok(resp.into())
///     }
/// }
///
/// let resp = RequestBuilder::new().host("localhost").send_with(&Offline)?;
/// assert_eq!(resp.status(), 503);
/// assert_eq!(resp.text()?, "offline");
/// # Ok::<(), reqforge::Error>(())
/// ```
pub trait Transport {
    /// Send `request` and wait for the complete response.
    fn execute(&self, request: Request) -> Result<Response, Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: Request) -> Result<Response, Error> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: Request) -> Result<Response, Error> {
        (**self).execute(request)
    }
}

/// A blocking HTTP client backed by `reqwest`.
///
/// `Client` is cheap to [`Clone`]; clones share the connection pool and
/// the runtime.
///
/// A `Client` must not be used or dropped from within an async runtime.
///
/// # Example
///
/// ```rust,no_run
/// use reqforge::{Client, RequestBuilder};
/// use std::time::Duration;
///
/// let client = Client::builder()
///     .timeout(Duration::from_secs(30))
///     .connect_timeout(Duration::from_secs(10))
///     .user_agent("reqforge-demo/1.0")
///     .build()?;
///
/// let resp = RequestBuilder::new()
///     .scheme("https")
///     .host("example.com")
///     .send_with(&client)?;
/// # Ok::<(), reqforge::Error>(())
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

/// Shared state behind `Arc` in [`Client`].
struct ClientInner {
    http: reqwest::Client,
    /// Drives `http`. Dropped after it, so pooled connections close on a
    /// live runtime.
    runtime: Runtime,
    timeout: Option<Duration>,
}

impl Client {
    /// Create a new [`ClientBuilder`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Returns the total request timeout, if one was configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.inner.timeout
    }
}

impl Transport for Client {
    /// Convert the request for `reqwest`, send it and read the full
    /// response body.
    ///
    /// URL credentials become an `Authorization: Basic` header unless the
    /// request already has one. A reader payload is read to the end
    /// first; a read failure is a body error and nothing is sent.
    fn execute(&self, request: Request) -> Result<Response, Error> {
        let request = into_transport_request(request)?;
        let inner = &*self.inner;

        trace!(
            method = %request.method(),
            url = %request.url(),
            timeout_ms = inner.timeout.map(|d| d.as_millis() as u64),
            "Client::execute",
        );

        inner.runtime.block_on(async {
            let resp = inner.http.execute(request).await.map_err(|e| {
                warn!(error = %e, "request failed");
                Error::from_transport(e)
            })?;
            Response::from_transport(resp).await
        })
    }
}

/// Turn a built [`Request`] into the transport's request type.
fn into_transport_request(request: Request) -> Result<reqwest::Request, Error> {
    let (method, url, mut headers, body) = request.into_parts();

    if let Some(password) = url.password()
        && !headers.contains_key(http::header::AUTHORIZATION)
    {
        let value = crate::util::basic_auth(url.username(), Some(password))
            .ok_or_else(|| Error::builder("credentials are not a valid header value"))?;
        headers.insert(http::header::AUTHORIZATION, value);
        trace!("injected Basic auth from URL userinfo");
    }

    let target = url.to_transport()?;
    let body = body
        .map(crate::Body::into_bytes)
        .transpose()
        .map_err(|e| e.with_url(target.as_str()))?;

    let mut out = reqwest::Request::new(method, target);
    *out.headers_mut() = headers;
    if let Some(bytes) = body {
        *out.body_mut() = Some(reqwest::Body::from(bytes));
    }
    Ok(out)
}

/// Builder for configuring and constructing a [`Client`].
///
/// Obtain via [`Client::builder()`]. Invalid settings are reported by
/// [`build()`](Self::build).
#[derive(Debug)]
pub struct ClientBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<HeaderValue>,
    default_headers: HeaderMap,
    error: Option<Error>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a new `ClientBuilder` with default settings.
    ///
    /// No timeout, no `User-Agent`, no default headers.
    pub fn new() -> Self {
        Self {
            timeout: None,
            connect_timeout: None,
            user_agent: None,
            default_headers: HeaderMap::new(),
            error: None,
        }
    }

    /// Set the total request timeout.
    ///
    /// Covers connecting, sending and reading the whole response body.
    /// Expiry is reported as [`Error::is_timeout()`].
    ///
    /// Default: **no timeout**.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    ///
    /// Limits only the connect phase (including TLS).
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the `User-Agent` header sent with every request.
    ///
    /// By default no `User-Agent` header is sent.
    #[must_use]
    pub fn user_agent<V>(mut self, value: V) -> Self
    where
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        match HeaderValue::try_from(value) {
            Ok(v) => self.user_agent = Some(v),
            Err(e) => {
                let e: http::Error = e.into();
                self.error = Some(Error::builder("invalid user-agent").with_source(e));
            }
        }
        self
    }

    /// Set default headers that will be included in every request.
    ///
    /// A request header with the same name replaces the default.
    #[must_use]
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }

    /// Build the [`Client`].
    ///
    /// Starts the client's runtime and the underlying `reqwest` client.
    pub fn build(self) -> Result<Client, Error> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let runtime = crate::runtime::runtime()
            .map_err(|e| Error::builder("failed to start runtime").with_source(e))?;

        let mut builder = reqwest::Client::builder().default_headers(self.default_headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let http = {
            let _guard = runtime.enter();
            builder.build().map_err(Error::from_transport)?
        };

        debug!(
            total_timeout_ms = self.timeout.map(|d| d.as_millis() as u64),
            connect_timeout_ms = self.connect_timeout.map(|d| d.as_millis() as u64),
            "client built",
        );

        Ok(Client {
            inner: Arc::new(ClientInner {
                http,
                runtime,
                timeout: self.timeout,
            }),
        })
    }
}
