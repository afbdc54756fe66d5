#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

#[macro_use]
mod tracing;

mod body;
mod client;
mod error;
mod query;
mod request;
mod response;
pub mod runtime;
mod url;
mod util;

pub use body::Body;
pub use client::{Client, ClientBuilder, Transport};
pub use error::Error;
pub use query::Values;
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use runtime::block_on;
pub use url::{ParseError, Url};

pub use http::Method;
pub use http::StatusCode;
pub use http::Version;
/// Re-export the `http::header` module for header name constants.
pub use http::header;
pub use http::header::HeaderMap;

pub use bytes::Bytes;

/// A `Result` alias where the `Err` case is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_re_export() {
        let ok = StatusCode::OK;
        assert_eq!(ok.as_u16(), 200);
        assert_eq!(format!("{ok}"), "200 OK");
        assert!(StatusCode::NOT_FOUND.is_client_error());
        assert!(StatusCode::INTERNAL_SERVER_ERROR.is_server_error());
    }

    /// Pin the `Debug` format of `Version` so that log output is stable.
    #[test]
    fn version_debug_format_pinned() {
        assert_eq!(format!("{:?}", Version::HTTP_11), "HTTP/1.1");
        assert_eq!(format!("{:?}", Version::HTTP_2), "HTTP/2.0");
    }

    #[test]
    fn result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }

    #[test]
    fn header_module_re_export() {
        assert_eq!(header::ACCEPT.as_str(), "accept");
        assert_eq!(header::AUTHORIZATION.as_str(), "authorization");
        assert_eq!(header::USER_AGENT.as_str(), "user-agent");
    }

    /// One `format!()` per public `Debug`/`Display` impl, so none of them
    /// goes unexecuted. Format-pinning tests live next to the types.
    #[test]
    fn fmt_traits_smoke() {
        // -- Client (Debug) --
        let client = Client::builder().build().unwrap();
        let s = format!("{client:?}");
        assert!(s.contains("Client"), "Client debug: {s}");

        // -- RequestBuilder (Debug) --
        let mut rb = RequestBuilder::new();
        rb.method("POST").host("example.com").path("/fmt");
        let s = format!("{rb:?}");
        assert!(s.contains("RequestBuilder"), "RequestBuilder debug: {s}");

        // -- Request (Debug) --
        let req = rb.build().unwrap();
        let s = format!("{req:?}");
        assert!(s.contains("Request"), "Request debug: {s}");
        assert!(s.contains("POST"), "Request debug should show method: {s}");

        // -- Body (Debug) --
        let s = format!("{:?}", Body::from("hello"));
        assert!(s.starts_with("Body"), "Body debug: {s}");

        // -- Url (Display + Debug) --
        let url = req.url();
        let s = format!("{url}");
        assert_eq!(s, "http://example.com/fmt", "Url display");
        let s = format!("{url:?}");
        assert!(s.starts_with("Url { "), "Url debug should be struct format: {s}");

        // -- Values (Display + Debug) --
        let values: Values = [("a", "1")].into_iter().collect();
        assert_eq!(format!("{values}"), "a=1");
        assert!(format!("{values:?}").starts_with("Values"));

        // -- ParseError (Display) --
        assert_eq!(ParseError::InvalidPort.to_string(), "invalid port number");

        // -- Response (Debug) --
        let resp: Response = http::Response::new("x").into();
        assert!(format!("{resp:?}").starts_with("Response"));

        // -- Error (Display + Debug) --
        let err = Error::builder("test");
        assert_eq!(format!("{err}"), "builder error");
        assert!(format!("{err:?}").contains("Builder"));
    }
}
