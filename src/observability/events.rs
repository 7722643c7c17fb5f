//! Observable events
//!
//! Events are explicit and typed. Each carries a default severity so that
//! high-volume events stay below the default log threshold.

use std::fmt;

use super::logger::Severity;

/// Observable events in shapegen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Schema building
    /// A schema was derived from a sample
    SchemaGenerated,
    /// A nested schema was registered on its parent
    NestedSchemaRegistered,
    /// A non-mapping sample was returned unchanged
    SamplePassedThrough,

    // Instances
    /// An instance was constructed from initial values
    InstanceConstructed,
    /// A field write failed validation
    WriteRejected,

    // CLI
    /// Configuration loaded
    ConfigLoaded,
    /// Command finished successfully
    CommandComplete,
    /// Command failed
    CommandFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SchemaGenerated => "SCHEMA_GENERATED",
            Event::NestedSchemaRegistered => "NESTED_SCHEMA_REGISTERED",
            Event::SamplePassedThrough => "SAMPLE_PASSED_THROUGH",
            Event::InstanceConstructed => "INSTANCE_CONSTRUCTED",
            Event::WriteRejected => "WRITE_REJECTED",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::CommandComplete => "COMMAND_COMPLETE",
            Event::CommandFailed => "COMMAND_FAILED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::SchemaGenerated
            | Event::NestedSchemaRegistered
            | Event::SamplePassedThrough
            | Event::InstanceConstructed => Severity::Trace,
            Event::WriteRejected | Event::ConfigLoaded | Event::CommandComplete => Severity::Info,
            Event::CommandFailed => Severity::Error,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
