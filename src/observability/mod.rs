//! Observability subsystem for shapegen
//!
//! - Structured logging (JSON lines on stderr)
//! - Process-wide counters
//!
//! Observability is read-only: it never changes the outcome of the
//! operation being observed.
//!
//! # Usage
//!
//! ```ignore
//! use shapegen::observability::{log_event_with_fields, metrics, Event};
//!
//! log_event_with_fields(Event::SchemaGenerated, &[("fields", "3")]);
//! metrics().increment_schemas_generated();
//! ```

mod events;
mod logger;
pub mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{metrics, MetricsRegistry, MetricsSnapshot};

/// Log an event at its default severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log an event with fields at its default severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // Verifies no panic regardless of the current threshold
        log_event(Event::CommandComplete);
        log_event_with_fields(Event::WriteRejected, &[("field", "age")]);
    }
}
