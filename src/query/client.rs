use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::runtime::Handle;

use crate::api::ApiError;

use super::key::{QueryData, QueryKey};
use super::options::QueryOptions;
use super::state::{QueryState, QueryStatus};

/// Completion of one fetch, delivered back to the owner of the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySettled {
    pub key: QueryKey,
    /// Generation issued when the fetch started.
    pub generation: u64,
    pub result: Result<QueryData, ApiError>,
}

/// Callback invoked from the runtime when a fetch completes.
pub type SettleNotifier = Arc<dyn Fn(QuerySettled) + Send + Sync>;

#[derive(Debug, Default)]
struct QueryEntry {
    status: QueryStatus,
    data: Option<QueryData>,
    error: Option<ApiError>,
    last_fetched_at: Option<Instant>,
    last_accessed_at: Option<Instant>,
    enabled: bool,
    /// Generation of the fetch currently running, if any.
    in_flight: Option<u64>,
    /// Only a completion carrying this generation may update the entry.
    latest_generation: u64,
    /// Cleared to stop the running fetch from retrying.
    retry_gate: Option<Arc<AtomicBool>>,
}

impl QueryEntry {
    fn is_stale(&self, now: Instant, stale_time: Duration) -> bool {
        match self.last_fetched_at {
            Some(at) => now.saturating_duration_since(at) >= stale_time,
            None => true,
        }
    }

    fn needs_fetch(&self, now: Instant, stale_time: Duration) -> bool {
        match self.status {
            QueryStatus::Idle | QueryStatus::Loading | QueryStatus::Error => true,
            QueryStatus::Success => self.is_stale(now, stale_time),
        }
    }

    fn snapshot(&self) -> QueryState<QueryData> {
        QueryState {
            status: self.status,
            data: self.data.clone(),
            error: self.error.clone(),
            is_fetching: self.in_flight.is_some(),
        }
    }
}

/// Process-wide store of query results.
///
/// Created once at startup and injected into the app. All methods are
/// called from the UI thread; only the fetch futures run elsewhere.
pub struct QueryClient {
    entries: HashMap<QueryKey, QueryEntry>,
    next_generation: u64,
    fetch_count: u64,
    runtime: Handle,
    notifier: SettleNotifier,
}

impl QueryClient {
    pub fn new(runtime: Handle, notifier: SettleNotifier) -> Self {
        Self {
            entries: HashMap::new(),
            next_generation: 0,
            fetch_count: 0,
            runtime,
            notifier,
        }
    }

    /// Return the cached state for `key`, starting a fetch when the entry is
    /// absent, failed, or stale and no fetch for it is already running.
    pub fn subscribe<F, Fut>(
        &mut self,
        key: QueryKey,
        options: &QueryOptions,
        now: Instant,
        fetch: F,
    ) -> QueryState<QueryData>
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<QueryData, ApiError>> + Send + 'static,
    {
        let needs_fetch = {
            let entry = self.entries.entry(key.clone()).or_default();
            entry.enabled = options.enabled;
            entry.last_accessed_at = Some(now);
            if let Some(gate) = &entry.retry_gate {
                gate.store(options.enabled, Ordering::Relaxed);
            }

            if !options.enabled {
                false
            } else if entry.in_flight.is_some() {
                tracing::debug!(%key, "Fetch already in flight, reusing it");
                false
            } else {
                entry.needs_fetch(now, options.stale_time)
            }
        };

        if needs_fetch {
            self.start_fetch(key.clone(), options, fetch);
        }
        self.state(&key)
    }

    /// Start a new fetch even if one is running; the older one's result
    /// will be discarded.
    pub fn refetch<F, Fut>(
        &mut self,
        key: QueryKey,
        options: &QueryOptions,
        now: Instant,
        fetch: F,
    ) -> QueryState<QueryData>
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<QueryData, ApiError>> + Send + 'static,
    {
        {
            let entry = self.entries.entry(key.clone()).or_default();
            entry.enabled = options.enabled;
            entry.last_accessed_at = Some(now);
            if let Some(gate) = &entry.retry_gate {
                gate.store(options.enabled, Ordering::Relaxed);
            }
            if !options.enabled {
                return entry.snapshot();
            }
            if let Some(previous) = entry.in_flight {
                tracing::debug!(%key, previous, "Superseding in-flight fetch");
            }
        }

        self.start_fetch(key.clone(), options, fetch);
        self.state(&key)
    }

    fn start_fetch<F, Fut>(&mut self, key: QueryKey, options: &QueryOptions, fetch: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<QueryData, ApiError>> + Send + 'static,
    {
        self.next_generation += 1;
        self.fetch_count += 1;
        let generation = self.next_generation;

        let retry_gate = Arc::new(AtomicBool::new(true));
        let entry = self.entries.entry(key.clone()).or_default();
        if let Some(previous) = entry.retry_gate.replace(Arc::clone(&retry_gate)) {
            previous.store(false, Ordering::Relaxed);
        }
        entry.in_flight = Some(generation);
        entry.latest_generation = generation;
        if entry.data.is_none() {
            entry.status = QueryStatus::Loading;
        }
        tracing::debug!(%key, generation, "Fetch started");

        let notifier = Arc::clone(&self.notifier);
        let options = options.clone();
        self.runtime.spawn(async move {
            let mut failures = 0;
            let result = loop {
                match fetch().await {
                    Ok(data) => break Ok(data),
                    Err(err) => {
                        failures += 1;
                        if !options.retry.allows(failures) {
                            break Err(err);
                        }
                        let delay = options.backoff_for(failures);
                        tracing::debug!(%key, failures, ?delay, error = %err, "Retrying fetch");
                        tokio::time::sleep(delay).await;
                        // Key disabled or fetch superseded while backing off.
                        if !retry_gate.load(Ordering::Relaxed) {
                            tracing::debug!(%key, generation, "Retry cancelled");
                            break Err(err);
                        }
                    }
                }
            };
            notifier(QuerySettled {
                key,
                generation,
                result,
            });
        });
    }

    /// Apply a completed fetch. Returns false when it was discarded because
    /// a newer fetch for the same key has been issued since.
    pub fn apply(&mut self, settled: QuerySettled, now: Instant) -> bool {
        let QuerySettled {
            key,
            generation,
            result,
        } = settled;

        let Some(entry) = self.entries.get_mut(&key) else {
            tracing::debug!(%key, generation, "Dropping result for evicted entry");
            return false;
        };

        if generation != entry.latest_generation {
            tracing::debug!(
                %key,
                generation,
                latest = entry.latest_generation,
                "Discarding superseded response"
            );
            return false;
        }

        entry.in_flight = None;
        entry.retry_gate = None;
        match result {
            Ok(data) => {
                entry.status = QueryStatus::Success;
                entry.data = Some(data);
                entry.error = None;
                entry.last_fetched_at = Some(now);
            }
            Err(err) => {
                tracing::info!(%key, error = %err, details = %err.details(), "Query failed");
                entry.status = QueryStatus::Error;
                entry.error = Some(err);
            }
        }
        true
    }

    /// Snapshot of `key` without triggering anything.
    pub fn state(&self, key: &QueryKey) -> QueryState<QueryData> {
        self.entries
            .get(key)
            .map(QueryEntry::snapshot)
            .unwrap_or_default()
    }

    pub fn is_enabled(&self, key: &QueryKey) -> bool {
        self.entries.get(key).is_some_and(|entry| entry.enabled)
    }

    /// Number of fetches started since creation.
    pub fn fetch_count(&self) -> u64 {
        self.fetch_count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop entries nobody subscribed to for `gc_time`. Entries with a
    /// fetch in flight and the keys in `active` are kept.
    pub fn collect_garbage(&mut self, now: Instant, gc_time: Duration, active: &[QueryKey]) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, entry| {
            if entry.in_flight.is_some() || active.contains(key) {
                return true;
            }
            let idle_for = entry
                .last_accessed_at
                .map(|at| now.saturating_duration_since(at))
                .unwrap_or(Duration::MAX);
            idle_for < gc_time
        });
        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::debug!(removed, "Evicted unused queries");
        }
        removed
    }
}
