//! Shared utility functions.

use base64::Engine as _;
use http::HeaderValue;

/// Build an `Authorization: Basic` header value for `username` and
/// `password`.
///
/// The value is flagged sensitive so it is redacted from `Debug` output.
/// Returns `None` only if the credentials produce bytes that are not a
/// valid header value, which base64 output never does.
pub(crate) fn basic_auth(username: &str, password: Option<&str>) -> Option<HeaderValue> {
    let credentials = match password {
        Some(pass) => format!("{username}:{pass}"),
        None => format!("{username}:"),
    };
    let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
    let mut value = HeaderValue::from_str(&format!("Basic {encoded}")).ok()?;
    value.set_sensitive(true);
    Some(value)
}
