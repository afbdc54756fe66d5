//! HTTP response.
//!
//! [`Response`] is the raw response handed back by a
//! [`Transport`](crate::Transport). The body has already been read in
//! full, so every accessor is synchronous.

use crate::error::Error;
use bytes::Bytes;
use http::{HeaderMap, StatusCode, Version};

/// An HTTP response with a fully-read body.
///
/// Created by [`RequestBuilder::send()`](crate::RequestBuilder::send), or
/// converted from an [`http::Response`] by custom transports.
pub struct Response {
    status: StatusCode,
    version: Version,
    url: String,
    headers: HeaderMap,
    body: Bytes,
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("version", &self.version)
            .field("url", &self.url)
            .field("body_len", &self.body.len())
            .finish()
    }
}

impl Response {
    /// Read the whole body of a `reqwest` response.
    pub(crate) async fn from_transport(resp: reqwest::Response) -> Result<Self, Error> {
        let status = resp.status();
        let version = resp.version();
        let url = resp.url().as_str().to_owned();
        let headers = resp.headers().clone();

        debug!(
            status = status.as_u16(),
            version = ?version,
            url = %url,
            "response received",
        );

        let body = resp.bytes().await.map_err(Error::from_transport)?;
        trace!(len = body.len(), "response body read");

        Ok(Self {
            status,
            version,
            url,
            headers,
            body,
        })
    }

    /// Returns the HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the HTTP version of the response.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the final URL of this response.
    ///
    /// If the request was redirected, this is the URL of the final
    /// destination. Responses converted from [`http::Response`] have an
    /// empty URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a mutable reference to the response headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Returns the `Content-Length` header value, if present and valid.
    ///
    /// This is what the server announced; [`bytes()`](Self::bytes) gives
    /// what was actually received.
    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get(http::header::CONTENT_LENGTH)?
            .to_str()
            .ok()?
            .parse()
            .ok()
    }

    /// Returns the response body.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Consume the response and return the body.
    pub fn into_bytes(self) -> Bytes {
        self.body
    }

    /// View the raw body as UTF-8 text. No charset handling or other
    /// decoding is applied.
    ///
    /// Fails with a decode error ([`Error::is_decode()`]) if the body is
    /// not valid UTF-8.
    pub fn text(&self) -> Result<String, Error> {
        String::from_utf8(self.body.to_vec()).map_err(|e| {
            Error::decode("response body is not valid UTF-8")
                .with_source(e)
                .with_url(self.url.clone())
        })
    }

    /// Check the status code and return an error if it indicates a
    /// client or server error (4xx or 5xx).
    ///
    /// Consumes and returns `self` on success (2xx/3xx), or returns
    /// an `Error` with `is_status() == true` on failure.
    pub fn error_for_status(self) -> Result<Response, Error> {
        let status = self.status;
        if status.is_client_error() || status.is_server_error() {
            Err(Error::status_error(status, self.url))
        } else {
            Ok(self)
        }
    }

    /// Check the status code without consuming the response.
    pub fn error_for_status_ref(&self) -> Result<&Response, Error> {
        let status = self.status;
        if status.is_client_error() || status.is_server_error() {
            Err(Error::status_error(status, self.url.clone()))
        } else {
            Ok(self)
        }
    }
}

impl<T: Into<Bytes>> From<http::Response<T>> for Response {
    fn from(resp: http::Response<T>) -> Self {
        let (parts, body) = resp.into_parts();
        Self {
            status: parts.status,
            version: parts.version,
            url: String::new(),
            headers: parts.headers,
            body: body.into(),
        }
    }
}
