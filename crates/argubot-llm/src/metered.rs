//! Call accounting for generation providers

use argubot_domain::{ChatMessage, Generator};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Counters shared by every clone of a [`MeteredProvider`]
#[derive(Debug, Default)]
pub struct GenerationMetrics {
    /// Total calls
    pub calls: AtomicU64,
    /// Calls that returned an error
    pub failures: AtomicU64,
    /// Characters sent across all messages
    pub prompt_chars: AtomicU64,
    /// Characters received in successful replies
    pub response_chars: AtomicU64,
    /// Wall-clock time spent waiting on the provider
    pub latency_ms: AtomicU64,
}

impl GenerationMetrics {
    /// Create new counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finished call
    pub fn record(&self, prompt_chars: u64, response_chars: Option<u64>, latency_ms: u64) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.prompt_chars.fetch_add(prompt_chars, Ordering::Relaxed);
        self.latency_ms.fetch_add(latency_ms, Ordering::Relaxed);
        match response_chars {
            Some(chars) => {
                self.response_chars.fetch_add(chars, Ordering::Relaxed);
            }
            None => {
                self.failures.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            calls: self.calls.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            prompt_chars: self.prompt_chars.load(Ordering::Relaxed),
            response_chars: self.response_chars.load(Ordering::Relaxed),
            latency_ms: self.latency_ms.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Total calls
    pub calls: u64,
    /// Failed calls
    pub failures: u64,
    /// Characters sent
    pub prompt_chars: u64,
    /// Characters received
    pub response_chars: u64,
    /// Total latency in milliseconds
    pub latency_ms: u64,
}

impl MetricsSnapshot {
    /// Share of calls that failed
    pub fn error_rate(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.failures as f64 / self.calls as f64
        }
    }

    /// Mean latency per call in milliseconds
    pub fn mean_latency_ms(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.latency_ms as f64 / self.calls as f64
        }
    }
}

/// Wraps a generator and counts what flows through it
#[derive(Debug, Clone)]
pub struct MeteredProvider<G> {
    inner: G,
    metrics: Arc<GenerationMetrics>,
}

impl<G: Generator> MeteredProvider<G> {
    /// Wrap `inner` with fresh counters
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            metrics: Arc::new(GenerationMetrics::new()),
        }
    }

    /// Shared handle to the counters
    pub fn metrics(&self) -> Arc<GenerationMetrics> {
        Arc::clone(&self.metrics)
    }

    /// The wrapped provider
    pub fn inner(&self) -> &G {
        &self.inner
    }
}

/// One in-flight call, recorded when dropped
///
/// A call whose future is dropped before it finishes (a caller timeout, a
/// cancelled turn) is recorded as a failure with the time spent so far.
struct CallRecord<'a> {
    metrics: &'a GenerationMetrics,
    prompt_chars: u64,
    start: Instant,
    response_chars: Option<u64>,
}

impl CallRecord<'_> {
    fn succeeded(&mut self, response_chars: u64) {
        self.response_chars = Some(response_chars);
    }
}

impl Drop for CallRecord<'_> {
    fn drop(&mut self) {
        self.metrics.record(
            self.prompt_chars,
            self.response_chars,
            self.start.elapsed().as_millis() as u64,
        );
    }
}

impl<G: Generator> Generator for MeteredProvider<G> {
    type Error = G::Error;

    async fn complete(&self, messages: &[ChatMessage], model: &str) -> Result<String, G::Error> {
        let prompt_chars: usize = messages.iter().map(|m| m.content.chars().count()).sum();
        let mut record = CallRecord {
            metrics: &self.metrics,
            prompt_chars: prompt_chars as u64,
            start: Instant::now(),
            response_chars: None,
        };

        let result = self.inner.complete(messages, model).await;

        if let Ok(text) = &result {
            record.succeeded(text.chars().count() as u64);
        }
        result
    }
}
