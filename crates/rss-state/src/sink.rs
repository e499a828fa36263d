//! State logging sinks
//!
//! Every value type renders itself through `Display` as
//! `TypeName(field:value,field:value)`. A sink decides what happens with the
//! rendering; the checks never depend on a sink succeeding.

use std::fmt;
use tracing::debug;

/// Receiver of rendered values
pub trait StateSink {
    fn emit(&self, label: &'static str, value: &dyn fmt::Display);
}

impl<S: StateSink + ?Sized> StateSink for &S {
    fn emit(&self, label: &'static str, value: &dyn fmt::Display) {
        (**self).emit(label, value)
    }
}

/// Discards everything; nothing is rendered
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl StateSink for NoopSink {
    fn emit(&self, _label: &'static str, _value: &dyn fmt::Display) {}
}

/// Forwards renderings to `tracing` at debug level on target `rss`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl StateSink for TracingSink {
    fn emit(&self, label: &'static str, value: &dyn fmt::Display) {
        debug!(target: "rss", "{}: {}", label, value);
    }
}
