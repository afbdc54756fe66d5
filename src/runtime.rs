//! Blocking executor helpers.
//!
//! Every [`Client`](crate::Client) owns a single-threaded tokio runtime
//! and drives the async transport on it, which is what makes
//! [`RequestBuilder::send()`](crate::RequestBuilder::send) blocking. The
//! same helpers are exported for callers that need to run a future
//! (for example a mock server) alongside the blocking API.

/// The executor type, [`tokio::runtime::Runtime`].
pub type Runtime = tokio::runtime::Runtime;

/// Create a new single-threaded [`Runtime`] with I/O and timers enabled.
///
/// # Errors
///
/// Returns [`std::io::Error`] if the tokio runtime cannot be created.
pub fn runtime() -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Create a [`Runtime`] and run `f` to completion on it.
///
/// # Errors
///
/// Returns [`std::io::Error`] if the runtime cannot be created.
pub fn block_on<F: std::future::Future<Output = T>, T>(f: F) -> std::io::Result<T> {
    let rt = runtime()?;
    Ok(rt.block_on(f))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_lifecycle() {
        let rt = runtime().expect("runtime() should succeed");

        let val = rt.block_on(async { 7 + 3 });
        assert_eq!(val, 10);

        // reuse for multiple futures
        let a = rt.block_on(async { 1 });
        let b = rt.block_on(async { 2 });
        assert_eq!(a + b, 3);

        let val = block_on(async { 42 }).expect("runtime creation should succeed");
        assert_eq!(val, 42);
    }

    #[test]
    fn runtime_has_timers() {
        let elapsed = block_on(async {
            let start = tokio::time::Instant::now();
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            start.elapsed()
        })
        .unwrap();
        assert!(elapsed >= std::time::Duration::from_millis(5));
    }
}
