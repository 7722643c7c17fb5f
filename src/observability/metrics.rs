//! Metrics registry
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on process start
//! - Thread-safe; schemas are shared across threads even though instances
//!   are not

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use serde::Serialize;

/// Operational counters
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    schemas_generated: AtomicU64,
    passthroughs: AtomicU64,
    instances_constructed: AtomicU64,
    writes_accepted: AtomicU64,
    writes_rejected: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_schemas_generated(&self) {
        self.schemas_generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_passthroughs(&self) {
        self.passthroughs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_instances_constructed(&self) {
        self.instances_constructed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_writes_accepted(&self) {
        self.writes_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_writes_rejected(&self) {
        self.writes_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            schemas_generated: self.schemas_generated.load(Ordering::Relaxed),
            passthroughs: self.passthroughs.load(Ordering::Relaxed),
            instances_constructed: self.instances_constructed.load(Ordering::Relaxed),
            writes_accepted: self.writes_accepted.load(Ordering::Relaxed),
            writes_rejected: self.writes_rejected.load(Ordering::Relaxed),
        }
    }

    /// Snapshot as a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        // A struct of plain u64 fields always serializes
        serde_json::to_value(self.snapshot()).unwrap_or(serde_json::Value::Null)
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub schemas_generated: u64,
    pub passthroughs: u64,
    pub instances_constructed: u64,
    pub writes_accepted: u64,
    pub writes_rejected: u64,
}

/// Process-wide registry
pub fn metrics() -> &'static MetricsRegistry {
    static REGISTRY: OnceLock<MetricsRegistry> = OnceLock::new();
    REGISTRY.get_or_init(MetricsRegistry::new)
}
