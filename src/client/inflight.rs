//! Request coalescing
//!
//! While a fetch for a key is running, later callers for the same key await
//! the running fetch instead of starting their own.

use std::collections::HashMap;
use std::sync::Mutex;

use futures::future::{BoxFuture, FutureExt, Shared};

use crate::error::ApiResult;

type SharedFetch<T> = Shared<BoxFuture<'static, ApiResult<T>>>;

/// Map of running fetches keyed by cache key
pub struct InFlight<T: Clone> {
    pending: Mutex<HashMap<String, SharedFetch<T>>>,
}

impl<T: Clone> Default for InFlight<T> {
    fn default() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
        }
    }
}

impl<T> InFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Join the fetch running for `key`, or start one with `start`
    pub async fn run<F>(&self, key: &str, start: F) -> ApiResult<T>
    where
        F: FnOnce() -> BoxFuture<'static, ApiResult<T>>,
    {
        let fetch = {
            let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
            match pending.get(key) {
                Some(running) => {
                    log::debug!("Joining in-flight fetch: {}", key);
                    running.clone()
                }
                None => {
                    let fetch = start().shared();
                    pending.insert(key.to_string(), fetch.clone());
                    fetch
                }
            }
        };

        let result = fetch.clone().await;

        // Whoever finishes first removes the entry, unless a newer fetch replaced it
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if pending.get(key).is_some_and(|f| f.ptr_eq(&fetch)) {
            pending.remove(key);
        }

        result
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn counted_fetch(
        calls: &Arc<AtomicUsize>,
        value: u32,
    ) -> impl FnOnce() -> BoxFuture<'static, ApiResult<u32>> {
        let calls = calls.clone();
        move || {
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok(value)
            }
            .boxed()
        }
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_fetch() {
        let inflight = InFlight::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let (a, b) = tokio::join!(
            inflight.run("eu_realms", counted_fetch(&calls, 1)),
            inflight.run("eu_realms", counted_fetch(&calls, 2)),
        );

        assert_eq!(a.unwrap(), 1);
        assert_eq!(b.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(inflight.len(), 0);
    }

    #[tokio::test]
    async fn test_different_keys_run_separately() {
        let inflight = InFlight::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let (a, b) = tokio::join!(
            inflight.run("eu_realms", counted_fetch(&calls, 1)),
            inflight.run("us_realms", counted_fetch(&calls, 2)),
        );

        assert_eq!(a.unwrap(), 1);
        assert_eq!(b.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_sequential_calls_fetch_again() {
        let inflight = InFlight::new();
        let calls = Arc::new(AtomicUsize::new(0));

        inflight.run("k", counted_fetch(&calls, 1)).await.unwrap();
        let second = inflight.run("k", counted_fetch(&calls, 2)).await.unwrap();

        assert_eq!(second, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_error_is_shared_and_not_retained() {
        let inflight: InFlight<u32> = InFlight::new();

        let failing = || async { Err::<u32, _>(ApiError::Network("down".to_string())) }.boxed();
        let (a, b) = tokio::join!(inflight.run("k", failing), inflight.run("k", failing));

        assert!(matches!(a, Err(ApiError::Network(_))));
        assert!(matches!(b, Err(ApiError::Network(_))));
        assert_eq!(inflight.len(), 0);
    }
}
