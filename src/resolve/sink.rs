//! Diagnostic sinks that observe each step of a resolution

use tracing::{debug, trace};

use crate::permission::Permission;

/// One rewrite step taken by the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveEvent {
    /// A `global.@clear` directive emptied the working set
    Cleared {
        source: String,
        rank: i32,
        removed: Vec<Permission>,
    },

    /// A `<namespace>.@clear` directive removed every entry in that namespace
    ClearedNamespace {
        source: String,
        rank: i32,
        namespace: String,
        removed: Vec<Permission>,
    },

    /// A wildcard grant purged negators recorded for its namespace
    WildcardPurged {
        source: String,
        rank: i32,
        wildcard: Permission,
        removed: Vec<Permission>,
    },

    /// A new entry was added
    Inserted {
        source: String,
        rank: i32,
        permission: Permission,
    },

    /// An entry evicted its opposite-polarity counterpart
    Replaced {
        source: String,
        rank: i32,
        removed: Permission,
        inserted: Permission,
    },

    /// An identical entry was already present
    Skipped {
        source: String,
        rank: i32,
        permission: Permission,
    },

    /// Final working set, with the rank that inserted each entry
    Resolved { applied: Vec<(Permission, i32)> },
}

/// Receives resolver steps
///
/// Sinks are passed explicitly to [`resolve_with`](crate::resolve_with); no
/// global diagnostic switch exists.
pub trait ResolveSink {
    /// Whether events should be built at all
    ///
    /// Gates the final [`ResolveEvent::Resolved`] summary.
    fn enabled(&self) -> bool {
        true
    }

    /// Whether per-step events should be built
    ///
    /// Defaults to [`enabled`](ResolveSink::enabled).
    fn steps_enabled(&self) -> bool {
        self.enabled()
    }

    /// Records one event
    fn record(&mut self, event: ResolveEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl ResolveSink for NoopSink {
    fn enabled(&self) -> bool {
        false
    }

    fn record(&mut self, _event: ResolveEvent) {}
}

/// Forwards events to `tracing`
///
/// Individual steps are emitted at TRACE, the final set at DEBUG.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ResolveSink for TracingSink {
    fn enabled(&self) -> bool {
        tracing::enabled!(tracing::Level::DEBUG)
    }

    fn steps_enabled(&self) -> bool {
        tracing::enabled!(tracing::Level::TRACE)
    }

    fn record(&mut self, event: ResolveEvent) {
        match event {
            ResolveEvent::Cleared {
                source,
                rank,
                removed,
            } => {
                trace!(%source, rank, removed = removed.len(), "global clear");
            }
            ResolveEvent::ClearedNamespace {
                source,
                rank,
                namespace,
                removed,
            } => {
                trace!(%source, rank, %namespace, removed = ?Permission::to_list(&removed), "namespace clear");
            }
            ResolveEvent::WildcardPurged {
                source,
                rank,
                wildcard,
                removed,
            } => {
                trace!(%source, rank, %wildcard, removed = ?Permission::to_list(&removed), "wildcard purged negators");
            }
            ResolveEvent::Inserted {
                source,
                rank,
                permission,
            } => {
                trace!(%source, rank, %permission, "inserted");
            }
            ResolveEvent::Replaced {
                source,
                rank,
                removed,
                inserted,
            } => {
                trace!(%source, rank, %removed, %inserted, "replaced");
            }
            ResolveEvent::Skipped {
                source,
                rank,
                permission,
            } => {
                trace!(%source, rank, %permission, "skipped duplicate");
            }
            ResolveEvent::Resolved { applied } => {
                let rendered: Vec<String> = applied
                    .iter()
                    .map(|(perm, rank)| format!("{} -> {}", perm, rank))
                    .collect();
                debug!("Applied perms: {}", rendered.join(", "));
            }
        }
    }
}

/// Collects events in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<ResolveEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far, in order
    pub fn events(&self) -> &[ResolveEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<ResolveEvent> {
        self.events
    }
}

impl ResolveSink for RecordingSink {
    fn record(&mut self, event: ResolveEvent) {
        self.events.push(event);
    }
}
