//! Internal tracing shims.
//!
//! With the `tracing` feature these macros forward to [`tracing`]. Without
//! it they expand to nothing, so call-sites never carry `#[cfg]`.

// Only one side of each cfg pair is active at a time.
#![allow(unused_macros)]

// ---- feature = "tracing" ----

#[cfg(feature = "tracing")]
macro_rules! trace {
    ($($tt:tt)*) => { tracing::trace!($($tt)*) }
}

#[cfg(feature = "tracing")]
macro_rules! debug {
    ($($tt:tt)*) => { tracing::debug!($($tt)*) }
}

#[cfg(feature = "tracing")]
macro_rules! warn {
    ($($tt:tt)*) => { tracing::warn!($($tt)*) }
}

// ---- not(feature = "tracing") ----

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($tt:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($tt:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! warn {
    ($($tt:tt)*) => {};
}

// ---------------------------------------------------------------------------
// Test-only: a subscriber that accepts everything, so the macro arguments
// are actually evaluated under test.
// ---------------------------------------------------------------------------

#[cfg(all(test, feature = "tracing"))]
pub(crate) struct SinkSubscriber;

#[cfg(all(test, feature = "tracing"))]
impl ::tracing::Subscriber for SinkSubscriber {
    fn enabled(&self, _: &::tracing::Metadata<'_>) -> bool {
        true
    }
    fn new_span(&self, _: &::tracing::span::Attributes<'_>) -> ::tracing::span::Id {
        ::tracing::span::Id::from_u64(1)
    }
    fn record(&self, _: &::tracing::span::Id, _: &::tracing::span::Record<'_>) {}
    fn record_follows_from(&self, _: &::tracing::span::Id, _: &::tracing::span::Id) {}
    fn event(&self, _: &::tracing::Event<'_>) {}
    fn enter(&self, _: &::tracing::span::Id) {}
    fn exit(&self, _: &::tracing::span::Id) {}
}

/// Build a request with the sink installed so every `trace!`/`debug!`
/// field expression in the build path is evaluated.
#[cfg(all(test, feature = "tracing"))]
#[test]
fn build_path_events_evaluate_under_sink() {
    let _guard = ::tracing::subscriber::set_default(SinkSubscriber);
    let req = crate::RequestBuilder::new()
        .host("localhost:8080")
        .path("/traced")
        .add_value("k", "v")
        .build()
        .expect("build should succeed");
    assert_eq!(req.url().as_str(), "http://localhost:8080/traced?k=v");
}
