//! Request body type.
//!
//! [`Body`] wraps request data. It can be created from in-memory types
//! (`String`, `Vec<u8>`, `Bytes`, etc.) or from any [`std::io::Read`]
//! source via [`Body::from_reader()`].
//!
//! A reader body is single-use: it moves into the first
//! [`Request`](crate::Request) built from it and is buffered in full
//! when that request is dispatched.

use bytes::Bytes;
use std::io::Read;

/// A request body.
///
/// # Example
///
/// ```rust
/// use reqforge::Body;
///
/// // In-memory
/// let body: Body = "hello".into();
/// assert_eq!(body.as_bytes(), Some(&b"hello"[..]));
///
/// // From a reader
/// let body = Body::from_reader(std::io::Cursor::new(b"payload".to_vec()));
/// assert!(body.as_bytes().is_none());
/// ```
pub struct Body {
    inner: BodyInner,
}

enum BodyInner {
    /// In-memory body bytes.
    Bytes(Bytes),
    /// Arbitrary byte source, read to the end at dispatch.
    Reader(Box<dyn Read + Send>),
}

impl std::fmt::Debug for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            BodyInner::Bytes(v) => f
                .debug_struct("Body")
                .field("kind", &"bytes")
                .field("length", &v.len())
                .finish(),
            BodyInner::Reader(_) => f.debug_struct("Body").field("kind", &"reader").finish(),
        }
    }
}

impl Body {
    /// Wrap a reader as a request body.
    ///
    /// The payload is not streamed. When the request is sent the reader is
    /// read to the end into memory, and the buffered bytes go out as one
    /// body. If reading fails, sending fails with a body error
    /// ([`Error::is_body()`](crate::Error::is_body)) and nothing is sent.
    pub fn from_reader<R>(reader: R) -> Body
    where
        R: Read + Send + 'static,
    {
        Body {
            inner: BodyInner::Reader(Box::new(reader)),
        }
    }

    /// View the body contents as a byte slice.
    ///
    /// Returns `None` for reader bodies (created via
    /// [`from_reader()`](Self::from_reader)).
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.inner {
            BodyInner::Bytes(v) => Some(v),
            BodyInner::Reader(_) => None,
        }
    }

    /// Returns `true` for a body created from a reader.
    pub fn is_reader(&self) -> bool {
        matches!(self.inner, BodyInner::Reader(_))
    }

    /// Try to clone this body.
    ///
    /// Returns `None` for reader bodies, since a reader cannot be replayed.
    pub fn try_clone(&self) -> Option<Body> {
        match &self.inner {
            BodyInner::Bytes(v) => Some(Body {
                inner: BodyInner::Bytes(v.clone()),
            }),
            BodyInner::Reader(_) => None,
        }
    }

    /// Consume the body and collect it into bytes.
    ///
    /// For in-memory bodies this is zero-copy. Reader bodies are read to
    /// the end.
    pub(crate) fn into_bytes(self) -> Result<Bytes, crate::Error> {
        match self.inner {
            BodyInner::Bytes(v) => Ok(v),
            BodyInner::Reader(mut reader) => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf).map_err(|e| {
                    crate::Error::body(format!("reading request payload: {e}")).with_source(e)
                })?;
                Ok(Bytes::from(buf))
            }
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(v: Vec<u8>) -> Self {
        Self {
            inner: BodyInner::Bytes(Bytes::from(v)),
        }
    }
}

impl From<&'static [u8]> for Body {
    fn from(s: &'static [u8]) -> Self {
        Self {
            inner: BodyInner::Bytes(Bytes::from_static(s)),
        }
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Self {
            inner: BodyInner::Bytes(Bytes::from(s)),
        }
    }
}

impl From<&'static str> for Body {
    fn from(s: &'static str) -> Self {
        Self {
            inner: BodyInner::Bytes(Bytes::from_static(s.as_bytes())),
        }
    }
}

impl From<Bytes> for Body {
    fn from(b: Bytes) -> Self {
        Self {
            inner: BodyInner::Bytes(b),
        }
    }
}

impl Default for Body {
    /// Create an empty body.
    fn default() -> Self {
        Self {
            inner: BodyInner::Bytes(Bytes::new()),
        }
    }
}
