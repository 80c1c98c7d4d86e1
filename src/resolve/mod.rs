//! Resolution of ranked permission sources.
//!
//! Positions are applied from highest to lowest rank, with overrides acting
//! as a rank-0 position appended last. Negators, wildcards and `@clear`
//! directives are applied as rewrite rules over one accumulating,
//! insertion-ordered working set.
//!
//! Every call allocates its own working set, so resolution is reentrant and
//! may run concurrently from any number of threads. Diagnostics are opt-in via
//! an explicit [`ResolveSink`].

mod resolver;
mod sink;

pub use resolver::{resolve, resolve_with};
pub use sink::{NoopSink, RecordingSink, ResolveEvent, ResolveSink, TracingSink};
