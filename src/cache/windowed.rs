//! A single value cached for a fixed time window.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::cache::{Clock, SystemClock};

/// Freshness of a [`TimeWindowedCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Nothing has been fetched yet.
    Empty,
    /// The value is younger than the time-to-live.
    Fresh,
    /// The time-to-live elapsed; the next read refreshes.
    Stale,
}

struct Snapshot<T> {
    value: Arc<T>,
    refreshed_at: Instant,
}

/// Caches one value and refreshes it once its time-to-live has elapsed.
///
/// The value is replaced whole, never patched. Reads never hold the lock
/// across a fetch, so concurrent callers that find the cache stale may each
/// fetch; the last successful refresh wins. A failed fetch leaves the previous
/// value and timestamp untouched.
pub struct TimeWindowedCache<T> {
    slot: RwLock<Option<Snapshot<T>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<T> TimeWindowedCache<T>
where
    T: Send + Sync,
{
    /// Create an empty cache driven by the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create an empty cache driven by the given clock.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
            clock,
        }
    }

    /// Return the cached value, fetching it first when empty or stale.
    pub async fn get<F, Fut, E>(&self, fetch: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        if let Some(value) = self.fresh_value().await {
            return Ok(value);
        }

        tracing::debug!(ttl_secs = self.ttl.as_secs(), "refreshing cached value");
        match fetch().await {
            Ok(value) => {
                let value = Arc::new(value);
                let mut slot = self.slot.write().await;
                *slot = Some(Snapshot {
                    value: Arc::clone(&value),
                    refreshed_at: self.clock.now(),
                });
                Ok(value)
            }
            Err(e) => {
                tracing::warn!("cache refresh failed, keeping previous value: {}", e);
                Err(e)
            }
        }
    }

    /// Current freshness.
    pub async fn state(&self) -> CacheState {
        match self.slot.read().await.as_ref() {
            None => CacheState::Empty,
            Some(snapshot) if self.is_fresh(snapshot) => CacheState::Fresh,
            Some(_) => CacheState::Stale,
        }
    }

    /// The last fetched value, fresh or not, without triggering a fetch.
    pub async fn peek(&self) -> Option<Arc<T>> {
        self.slot
            .read()
            .await
            .as_ref()
            .map(|snapshot| Arc::clone(&snapshot.value))
    }

    /// Drop the cached value so the next read fetches.
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }

    /// The time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    async fn fresh_value(&self) -> Option<Arc<T>> {
        self.slot
            .read()
            .await
            .as_ref()
            .filter(|snapshot| self.is_fresh(snapshot))
            .map(|snapshot| Arc::clone(&snapshot.value))
    }

    fn is_fresh(&self, snapshot: &Snapshot<T>) -> bool {
        self.clock
            .now()
            .saturating_duration_since(snapshot.refreshed_at)
            < self.ttl
    }
}

impl<T> fmt::Debug for TimeWindowedCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeWindowedCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn cache_with_clock(ttl: Duration) -> (TimeWindowedCache<Vec<u32>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = TimeWindowedCache::with_clock(ttl, clock.clone());
        (cache, clock)
    }

    async fn counted_fetch(
        calls: &AtomicUsize,
        value: Vec<u32>,
    ) -> Result<Vec<u32>, String> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    #[tokio::test]
    async fn test_starts_empty() {
        let (cache, _clock) = cache_with_clock(Duration::from_secs(60));
        assert_eq!(cache.state().await, CacheState::Empty);
        assert!(cache.peek().await.is_none());
    }

    #[tokio::test]
    async fn test_single_fetch_within_window() {
        let (cache, clock) = cache_with_clock(Duration::from_secs(3600));
        let calls = AtomicUsize::new(0);
        let pairs: Vec<u32> = (0..10).collect();

        let first = cache.get(|| counted_fetch(&calls, pairs.clone())).await.unwrap();
        assert_eq!(cache.state().await, CacheState::Fresh);

        clock.advance(Duration::from_secs(3599));
        let second = cache.get(|| counted_fetch(&calls, vec![])).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.len(), 10);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_refetch_after_window() {
        let (cache, clock) = cache_with_clock(Duration::from_secs(3600));
        let calls = AtomicUsize::new(0);

        cache.get(|| counted_fetch(&calls, vec![1])).await.unwrap();
        clock.advance(Duration::from_secs(3600));
        assert_eq!(cache.state().await, CacheState::Stale);

        let refreshed = cache.get(|| counted_fetch(&calls, vec![1, 2])).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(*refreshed, vec![1, 2]);
        assert_eq!(cache.state().await, CacheState::Fresh);

        cache.get(|| counted_fetch(&calls, vec![])).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_value() {
        let (cache, clock) = cache_with_clock(Duration::from_secs(10));
        let calls = AtomicUsize::new(0);

        cache.get(|| counted_fetch(&calls, vec![7, 8])).await.unwrap();
        clock.advance(Duration::from_secs(11));

        let result = cache
            .get(|| async { Err::<Vec<u32>, _>("exchange unavailable".to_string()) })
            .await;
        assert_eq!(result.unwrap_err(), "exchange unavailable");
        assert_eq!(cache.state().await, CacheState::Stale);
        assert_eq!(*cache.peek().await.unwrap(), vec![7, 8]);
    }

    #[tokio::test]
    async fn test_failed_first_fetch_stays_empty() {
        let (cache, _clock) = cache_with_clock(Duration::from_secs(10));
        let result = cache
            .get(|| async { Err::<Vec<u32>, _>("timeout".to_string()) })
            .await;
        assert!(result.is_err());
        assert_eq!(cache.state().await, CacheState::Empty);
    }

    #[tokio::test]
    async fn test_invalidate_forces_fetch() {
        let (cache, _clock) = cache_with_clock(Duration::from_secs(3600));
        let calls = AtomicUsize::new(0);

        cache.get(|| counted_fetch(&calls, vec![1])).await.unwrap();
        cache.invalidate().await;
        assert_eq!(cache.state().await, CacheState::Empty);

        cache.get(|| counted_fetch(&calls, vec![1])).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
