//! Error type for reqforge.
//!
//! Provides [`Error`] with query methods shaped like `reqwest::Error`:
//! [`is_builder()`](Error::is_builder), [`is_connect()`](Error::is_connect),
//! [`is_timeout()`](Error::is_timeout), [`is_request()`](Error::is_request),
//! [`is_body()`](Error::is_body), [`is_decode()`](Error::is_decode),
//! [`is_status()`](Error::is_status),
//! [`status()`](Error::status), and [`url()`](Error::url).
//!
//! Two phases produce errors: finalizing a
//! [`RequestBuilder`](crate::RequestBuilder) (always a builder error) and
//! dispatching a [`Request`](crate::Request) through a
//! [`Transport`](crate::Transport) (classified from the transport's own
//! error).

use http::StatusCode;
use std::fmt;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The error type for reqforge operations.
///
/// Errors carry a `kind` classification that powers the `is_*()` query
/// methods. When a request URL is known it is included in the `Display`
/// output.
pub struct Error {
    pub(crate) kind: ErrorKind,
    pub(crate) message: String,
    pub(crate) source: Option<BoxError>,
    pub(crate) status: Option<StatusCode>,
    pub(crate) url: Option<String>,
}

/// Classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorKind {
    /// The assembled method, URL or headers were rejected, or a client
    /// could not be constructed.
    Builder,
    /// DNS failure, connection refused, TLS handshake failure.
    Connect,
    /// The transport gave up waiting.
    Timeout,
    /// HTTP status error (from [`Response::error_for_status`](crate::Response::error_for_status)).
    Status,
    /// Any other transport failure, including redirect-policy errors.
    Request,
    /// Reading the request payload or the response body failed.
    Body,
    /// [`Response::text`](crate::Response::text) found invalid UTF-8.
    Decode,
}

impl Error {
    /// Returns `true` if this is a builder error.
    ///
    /// Every error returned by [`RequestBuilder::build`](crate::RequestBuilder::build)
    /// is a builder error.
    pub fn is_builder(&self) -> bool {
        matches!(self.kind, ErrorKind::Builder)
    }

    /// Returns `true` if this is a connection error.
    pub fn is_connect(&self) -> bool {
        matches!(self.kind, ErrorKind::Connect)
    }

    /// Returns `true` if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout)
    }

    /// Returns `true` if this error was produced by
    /// [`Response::error_for_status`](crate::Response::error_for_status).
    pub fn is_status(&self) -> bool {
        matches!(self.kind, ErrorKind::Status)
    }

    /// Returns `true` if this is a request-phase error.
    pub fn is_request(&self) -> bool {
        matches!(self.kind, ErrorKind::Request)
    }

    /// Returns `true` if this is a body error.
    pub fn is_body(&self) -> bool {
        matches!(self.kind, ErrorKind::Body)
    }

    /// Returns `true` if the response body could not be viewed as text.
    pub fn is_decode(&self) -> bool {
        matches!(self.kind, ErrorKind::Decode)
    }

    /// Returns the HTTP status code, if this error carries one.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Returns the request URL associated with this error, if available.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Strips the URL from this error.
    #[must_use]
    pub fn without_url(mut self) -> Self {
        self.url = None;
        self
    }

    /// Attach a request URL to this error.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Attach a source error.
    ///
    /// The cause is returned from [`std::error::Error::source`].
    #[must_use]
    pub(crate) fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    // -- Internal constructors --

    fn with_kind(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            message: msg.into(),
            source: None,
            status: None,
            url: None,
        }
    }

    /// Create a builder-phase error.
    pub(crate) fn builder(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Builder, msg)
    }

    /// Create a status error for a failed HTTP status code.
    pub(crate) fn status_error(code: StatusCode, url: impl Into<String>) -> Self {
        let prefix = if code.is_client_error() {
            "HTTP status client error"
        } else {
            "HTTP status server error"
        };
        let reason = code.canonical_reason().unwrap_or("<unknown status code>");
        Self {
            kind: ErrorKind::Status,
            message: format!("{prefix} ({} {reason})", code.as_str()),
            source: None,
            status: Some(code),
            url: Some(url.into()),
        }
    }

    /// Create a body error.
    pub(crate) fn body(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Body, msg)
    }

    /// Create a decode error.
    pub(crate) fn decode(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Decode, msg)
    }

    /// Wrap an error reported by the `reqwest` transport.
    ///
    /// This is the single place in the crate that classifies transport
    /// failures into [`ErrorKind`] variants. The `reqwest` error stays in
    /// the source chain.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        let kind = error_kind_from_transport(&err);
        Self {
            kind,
            message: err.to_string(),
            status: err.status(),
            url: err.url().map(|u| u.as_str().to_owned()),
            source: Some(Box::new(err)),
        }
    }
}

impl fmt::Display for Error {
    /// A kind-based prefix, then ` for url (...)` when the URL is known.
    /// The detail is available via [`std::error::Error::source`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::Builder => f.write_str("builder error")?,
            ErrorKind::Request => f.write_str("error sending request")?,
            ErrorKind::Body => f.write_str("request or response body error")?,
            ErrorKind::Decode => f.write_str("error decoding response body")?,
            ErrorKind::Connect => f.write_str("error trying to connect")?,
            ErrorKind::Timeout => f.write_str("operation timed out")?,
            ErrorKind::Status => f.write_str(&self.message)?,
        }
        if let Some(url) = &self.url {
            write!(f, " for url ({url})")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("url", &self.url)
            .field("status", &self.status)
            .field("source", &self.source)
            .finish()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| &**e as &(dyn std::error::Error + 'static))
    }
}

/// Classify a transport error into an [`ErrorKind`].
///
/// Timeouts are checked first: reqwest reports a connect timeout as both
/// `is_connect()` and `is_timeout()`. Status and decode errors never come
/// from the transport here; responses are returned raw.
fn error_kind_from_transport(err: &reqwest::Error) -> ErrorKind {
    if err.is_timeout() {
        ErrorKind::Timeout
    } else if err.is_connect() {
        ErrorKind::Connect
    } else if err.is_builder() {
        ErrorKind::Builder
    } else if err.is_body() {
        ErrorKind::Body
    } else {
        ErrorKind::Request
    }
}

// Ensure Error is Send + Sync.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
};
