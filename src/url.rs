//! URL assembly.
//!
//! [`Url`] is produced by [`RequestBuilder::build()`](crate::RequestBuilder::build)
//! from the components collected on the builder (scheme, credentials,
//! host, path, raw query). Components are escaped individually and
//! joined without any normalization, so a builder configured with only a
//! host serializes as `http://localhost` -- no trailing slash is invented.
//!
//! # Escaping
//!
//! | Component | Left as-is besides alphanumerics and `-._~` |
//! |-----------|---------------------------------------------|
//! | user, password | `$&+,;=` |
//! | path      | `$&+,/:;=@` |
//! | host      | not escaped -- characters outside the allowed set are a [`ParseError`] |
//! | query     | already form-encoded by [`Values::encode`](crate::Values::encode) |
//!
//! Conversion to the transport's own URL type happens only at dispatch
//! time (see [`Url::to_transport`]), so a request whose URL the transport
//! cannot accept still builds.

use crate::Error;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters escaped in the user and password components.
const USERINFO: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=');

/// Characters escaped in the path component.
const PATH: &AsciiSet = &USERINFO.remove(b'/').remove(b':').remove(b'@');

// ---------------------------------------------------------------------------
// ParseError
// ---------------------------------------------------------------------------

/// An error type for URL assembly failures.
///
/// Returned (wrapped in a builder [`Error`]) by
/// [`RequestBuilder::build()`](crate::RequestBuilder::build) when a
/// component cannot be placed into a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// The scheme is empty after defaulting, does not start with a letter,
    /// or contains characters other than letters, digits, `+`, `-` and `.`.
    InvalidScheme,

    /// The host contains a character that is not allowed in an authority
    /// (whitespace, control characters, `/`, `?`, `#`, `@`, `%`, ...).
    InvalidHostCharacter,

    /// The text after the port separator is not made of digits.
    InvalidPort,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidScheme => f.write_str("invalid URL scheme"),
            ParseError::InvalidHostCharacter => f.write_str("invalid host character"),
            ParseError::InvalidPort => f.write_str("invalid port number"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::builder("invalid URL").with_source(err)
    }
}

// ---------------------------------------------------------------------------
// Url
// ---------------------------------------------------------------------------

/// An assembled request URL.
///
/// `Display` and [`as_str()`](Self::as_str) include the credentials, if
/// any; `Debug` redacts the password.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Url {
    /// The full serialized URL, credentials included.
    serialized: String,
    /// Scheme as given (defaulted to `http` by the builder).
    scheme: String,
    /// Username and password, unescaped.
    user_info: Option<(String, String)>,
    /// `host[:port]` as given.
    host: String,
    /// Path as given, unescaped.
    path: String,
    /// Raw (already encoded) query without the leading `?`.
    query: Option<String>,
}

impl Url {
    /// Assemble a URL from its components.
    ///
    /// An empty `raw_query` is treated as no query: no `?` is emitted.
    pub(crate) fn assemble(
        scheme: &str,
        user_info: Option<(&str, &str)>,
        host: &str,
        path: &str,
        raw_query: &str,
    ) -> Result<Self, ParseError> {
        validate_scheme(scheme)?;
        validate_host(host)?;

        let mut url = Url {
            serialized: String::new(),
            scheme: scheme.to_owned(),
            user_info: user_info.map(|(u, p)| (u.to_owned(), p.to_owned())),
            host: host.to_owned(),
            path: path.to_owned(),
            query: (!raw_query.is_empty()).then(|| raw_query.to_owned()),
        };
        url.serialized = url.serialize(true);
        Ok(url)
    }

    /// Join the components into a URL string.
    fn serialize(&self, with_user_info: bool) -> String {
        let user_info = self.user_info.as_ref().filter(|_| with_user_info);

        let mut out = String::with_capacity(
            self.scheme.len() + self.host.len() + self.path.len() + 8,
        );
        out.push_str(&self.scheme);
        out.push(':');

        if !self.host.is_empty() || !self.path.is_empty() || user_info.is_some() {
            out.push_str("//");
        }
        if let Some((user, pass)) = user_info {
            out.extend(utf8_percent_encode(user, USERINFO));
            out.push(':');
            out.extend(utf8_percent_encode(pass, USERINFO));
            out.push('@');
        }
        out.push_str(&self.host);

        if !self.path.is_empty() && !self.path.starts_with('/') && !self.host.is_empty() {
            out.push('/');
        }
        out.extend(utf8_percent_encode(&self.path, PATH));

        if let Some(q) = &self.query {
            out.push('?');
            out.push_str(q);
        }
        out
    }

    /// Return the serialized URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Return the URL scheme.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Return the host without the port, if a host was set.
    ///
    /// IPv6 literals keep their brackets (`[::1]`).
    pub fn host_str(&self) -> Option<&str> {
        if self.host.is_empty() {
            return None;
        }
        Some(split_port(&self.host).0)
    }

    /// Return the explicit port, if one was given and fits in a `u16`.
    pub fn port(&self) -> Option<u16> {
        split_port(&self.host).1.and_then(|p| p.parse().ok())
    }

    /// Return the unescaped path component.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Return the query string without the leading `?`, if present.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Return the username, or `""` when no credentials were set.
    pub fn username(&self) -> &str {
        self.user_info.as_ref().map_or("", |(u, _)| u.as_str())
    }

    /// Return the password, if credentials were set.
    pub fn password(&self) -> Option<&str> {
        self.user_info.as_ref().map(|(_, p)| p.as_str())
    }

    /// The serialized URL with the credentials left out.
    pub(crate) fn without_user_info(&self) -> String {
        self.serialize(false)
    }

    /// Convert into the transport's URL type.
    ///
    /// Credentials are not carried over; the client turns them into an
    /// `Authorization` header instead. Fails with a builder error when the
    /// transport cannot represent the URL (e.g. no host, port out of range).
    ///
    /// The transport's parser resolves `.` and `..` path segments, so the
    /// path sent on the wire can be shorter than [`path()`](Self::path).
    pub(crate) fn to_transport(&self) -> Result<reqwest::Url, Error> {
        let bare = self.without_user_info();
        reqwest::Url::parse(&bare).map_err(|e| {
            Error::builder("URL not accepted by transport")
                .with_source(e)
                .with_url(bare.clone())
        })
    }
}

impl std::fmt::Display for Url {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.serialized)
    }
}

impl std::fmt::Debug for Url {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Url")
            .field("scheme", &self.scheme)
            .field("username", &self.username())
            .field("password", &self.password().map(|_| "[redacted]"))
            .field("host", &self.host_str())
            .field("port", &self.port())
            .field("path", &self.path)
            .field("query", &self.query)
            .finish()
    }
}

impl AsRef<str> for Url {
    fn as_ref(&self) -> &str {
        &self.serialized
    }
}

impl From<Url> for String {
    fn from(url: Url) -> Self {
        url.serialized
    }
}

// ---------------------------------------------------------------------------
// Component validation
// ---------------------------------------------------------------------------

/// RFC 3986 §3.1: `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
fn validate_scheme(scheme: &str) -> Result<(), ParseError> {
    let mut bytes = scheme.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() => {}
        _ => return Err(ParseError::InvalidScheme),
    }
    if bytes.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.')) {
        Ok(())
    } else {
        Err(ParseError::InvalidScheme)
    }
}

/// Accepts unreserved characters, sub-delims, `:`, `[`, `]` and any
/// non-ASCII character. An empty host is allowed.
fn validate_host(host: &str) -> Result<(), ParseError> {
    let allowed = |c: char| {
        !c.is_ascii()
            || c.is_ascii_alphanumeric()
            || matches!(
                c,
                '-' | '.'
                    | '_'
                    | '~'
                    | '!'
                    | '$'
                    | '&'
                    | '\''
                    | '('
                    | ')'
                    | '*'
                    | '+'
                    | ','
                    | ';'
                    | '='
                    | ':'
                    | '['
                    | ']'
            )
    };
    if !host.chars().all(allowed) {
        return Err(ParseError::InvalidHostCharacter);
    }
    match split_port(host).1 {
        Some(port) if !port.bytes().all(|b| b.is_ascii_digit()) => Err(ParseError::InvalidPort),
        _ => Ok(()),
    }
}

/// Split `host[:port]` at the last `:` that is not inside `[...]`.
///
/// `"localhost:"` yields an empty port, which is accepted.
fn split_port(host: &str) -> (&str, Option<&str>) {
    let search_from = host.rfind(']').unwrap_or(0);
    match host[search_from..].rfind(':') {
        Some(i) => {
            let at = search_from + i;
            (&host[..at], Some(&host[at + 1..]))
        }
        None => (host, None),
    }
}
