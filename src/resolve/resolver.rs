//! Ranked resolution of permission sources into an effective set

use indexmap::IndexMap;

use super::sink::{NoopSink, ResolveEvent, ResolveSink};
use crate::permission::{Permission, PermissionProfile, PositionGrant};

/// Working set: permission -> rank of the source that inserted it
///
/// Insertion-ordered so the resolved output is reproducible; every removal
/// preserves the relative order of the remaining entries.
type Applied = IndexMap<Permission, i32>;

/// Resolves the effective permissions of a profile
///
/// Sources are considered from highest to lowest rank (ties keep their
/// input order, with overrides last among rank 0), and within a source in
/// grant order:
///
/// - `@clear` removes every entry in its namespace, or everything for
///   `global.@clear`
/// - a negator evicts the plain grant for the same key if present
/// - a plain grant evicts the negator for the same key if present
/// - a `*` grant first purges every negator already recorded in its namespace
/// - an exact duplicate of a present entry is ignored
///
/// The result never contains `@clear` and never holds both polarities of a
/// key.
///
/// # Examples
///
/// ```
/// use rankperms::{resolve, Permission, PermissionProfile, PositionGrant};
///
/// let profile = PermissionProfile::new(
///     vec![PositionGrant::new("reviewer", 1, Permission::from_list(["rpc.Claim"]))],
///     Permission::from_list(["~rpc.Claim"]),
/// );
///
/// assert_eq!(resolve(&profile), Permission::from_list(["~rpc.Claim"]));
/// ```
pub fn resolve(profile: &PermissionProfile) -> Vec<Permission> {
    resolve_with(profile, &mut NoopSink)
}

/// Resolves a profile, reporting every step to `sink`
///
/// Produces exactly the same result as [`resolve`].
pub fn resolve_with<S>(profile: &PermissionProfile, sink: &mut S) -> Vec<Permission>
where
    S: ResolveSink + ?Sized,
{
    let mut sources = profile.sources();

    // Stable: equal ranks keep insertion order
    sources.sort_by(|a, b| b.rank.cmp(&a.rank));

    let mut applied = Applied::new();

    for source in &sources {
        for grant in &source.grants {
            if grant.is_clear_directive() {
                apply_clear(&mut applied, source, grant, sink);
            } else if grant.negated {
                apply_negator(&mut applied, source, grant, sink);
            } else {
                apply_grant(&mut applied, source, grant, sink);
            }
        }
    }

    if sink.enabled() {
        sink.record(ResolveEvent::Resolved {
            applied: applied
                .iter()
                .map(|(perm, rank)| (perm.clone(), *rank))
                .collect(),
        });
    }

    applied.into_keys().collect()
}

impl PermissionProfile {
    /// Resolves this profile; see [`resolve`]
    pub fn resolve(&self) -> Vec<Permission> {
        resolve(self)
    }
}

fn apply_clear<S>(applied: &mut Applied, source: &PositionGrant, directive: &Permission, sink: &mut S)
where
    S: ResolveSink + ?Sized,
{
    if directive.is_global() {
        let removed: Vec<Permission> = if sink.steps_enabled() {
            applied.keys().cloned().collect()
        } else {
            Vec::new()
        };
        applied.clear();

        if sink.steps_enabled() {
            sink.record(ResolveEvent::Cleared {
                source: source.id.clone(),
                rank: source.rank,
                removed,
            });
        }
        return;
    }

    let removed = remove_where(applied, |perm| perm.namespace == directive.namespace);

    if sink.steps_enabled() {
        sink.record(ResolveEvent::ClearedNamespace {
            source: source.id.clone(),
            rank: source.rank,
            namespace: directive.namespace.clone(),
            removed,
        });
    }
}

fn apply_negator<S>(applied: &mut Applied, source: &PositionGrant, negator: &Permission, sink: &mut S)
where
    S: ResolveSink + ?Sized,
{
    let plain = negator.unnegated();
    replace_or_insert(applied, source, negator, &plain, sink);
}

fn apply_grant<S>(applied: &mut Applied, source: &PositionGrant, grant: &Permission, sink: &mut S)
where
    S: ResolveSink + ?Sized,
{
    if grant.is_wildcard() {
        // A wildcard overrides narrower negators recorded in its namespace
        let removed = remove_where(applied, |perm| {
            perm.negated && perm.namespace == grant.namespace
        });

        if !removed.is_empty() && sink.steps_enabled() {
            sink.record(ResolveEvent::WildcardPurged {
                source: source.id.clone(),
                rank: source.rank,
                wildcard: grant.clone(),
                removed,
            });
        }
    }

    let negator = grant.negate();
    replace_or_insert(applied, source, grant, &negator, sink);
}

/// Inserts `perm`, evicting `opposite` if present; an existing `perm` wins
fn replace_or_insert<S>(
    applied: &mut Applied,
    source: &PositionGrant,
    perm: &Permission,
    opposite: &Permission,
    sink: &mut S,
) where
    S: ResolveSink + ?Sized,
{
    if applied.shift_remove(opposite).is_some() {
        applied.insert(perm.clone(), source.rank);

        if sink.steps_enabled() {
            sink.record(ResolveEvent::Replaced {
                source: source.id.clone(),
                rank: source.rank,
                removed: opposite.clone(),
                inserted: perm.clone(),
            });
        }
    } else if applied.contains_key(perm) {
        if sink.steps_enabled() {
            sink.record(ResolveEvent::Skipped {
                source: source.id.clone(),
                rank: source.rank,
                permission: perm.clone(),
            });
        }
    } else {
        applied.insert(perm.clone(), source.rank);

        if sink.steps_enabled() {
            sink.record(ResolveEvent::Inserted {
                source: source.id.clone(),
                rank: source.rank,
                permission: perm.clone(),
            });
        }
    }
}

/// Removes every entry matching `pred`, keeping the order of the rest
fn remove_where<F>(applied: &mut Applied, pred: F) -> Vec<Permission>
where
    F: Fn(&Permission) -> bool,
{
    let removed: Vec<Permission> = applied.keys().filter(|perm| pred(*perm)).cloned().collect();

    if !removed.is_empty() {
        applied.retain(|perm, _| !pred(perm));
    }

    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::sink::RecordingSink;

    fn position(id: &str, rank: i32, grants: &[&str]) -> PositionGrant {
        PositionGrant::new(id, rank, Permission::from_list(grants))
    }

    #[test]
    fn test_remove_where_keeps_order() {
        let mut applied = Applied::new();
        for (i, text) in ["a.1", "b.1", "a.2", "c.1"].iter().enumerate() {
            applied.insert(Permission::parse(text), i as i32);
        }

        let removed = remove_where(&mut applied, |perm| perm.namespace == "a");
        assert_eq!(removed, Permission::from_list(["a.1", "a.2"]));
        assert_eq!(
            applied.keys().cloned().collect::<Vec<_>>(),
            Permission::from_list(["b.1", "c.1"])
        );
    }

    #[test]
    fn test_replace_keeps_order_of_others() {
        let profile = PermissionProfile::new(
            vec![
                position("high", 2, &["~rpc.a", "rpc.b", "rpc.c"]),
                position("low", 1, &["rpc.a"]),
            ],
            vec![],
        );

        assert_eq!(resolve(&profile), Permission::from_list(["rpc.b", "rpc.c", "rpc.a"]));
    }

    #[test]
    fn test_recording_sink_sees_every_step() {
        let profile = PermissionProfile::new(
            vec![
                position("senior", 2, &["~rpc.test", "apps.view"]),
                position("junior", 1, &["rpc.*", "apps.view", "apps.@clear"]),
            ],
            vec![],
        );

        let mut sink = RecordingSink::new();
        let resolved = resolve_with(&profile, &mut sink);
        assert_eq!(resolved, Permission::from_list(["rpc.*"]));

        let events = sink.into_events();
        assert_eq!(
            events,
            vec![
                ResolveEvent::Inserted {
                    source: "senior".to_string(),
                    rank: 2,
                    permission: Permission::parse("~rpc.test"),
                },
                ResolveEvent::Inserted {
                    source: "senior".to_string(),
                    rank: 2,
                    permission: Permission::parse("apps.view"),
                },
                ResolveEvent::WildcardPurged {
                    source: "junior".to_string(),
                    rank: 1,
                    wildcard: Permission::parse("rpc.*"),
                    removed: Permission::from_list(["~rpc.test"]),
                },
                ResolveEvent::Inserted {
                    source: "junior".to_string(),
                    rank: 1,
                    permission: Permission::parse("rpc.*"),
                },
                ResolveEvent::Skipped {
                    source: "junior".to_string(),
                    rank: 1,
                    permission: Permission::parse("apps.view"),
                },
                ResolveEvent::ClearedNamespace {
                    source: "junior".to_string(),
                    rank: 1,
                    namespace: "apps".to_string(),
                    removed: Permission::from_list(["apps.view"]),
                },
                ResolveEvent::Resolved {
                    applied: vec![(Permission::parse("rpc.*"), 1)],
                },
            ]
        );
    }

    /// Records only what the resolver builds when steps are switched off
    #[derive(Default)]
    struct SummarySink {
        events: Vec<ResolveEvent>,
    }

    impl ResolveSink for SummarySink {
        fn steps_enabled(&self) -> bool {
            false
        }

        fn record(&mut self, event: ResolveEvent) {
            self.events.push(event);
        }
    }

    #[test]
    fn test_steps_disabled_records_only_summary() {
        let profile = PermissionProfile::new(
            vec![
                position("senior", 2, &["~rpc.test", "apps.view"]),
                position("junior", 1, &["rpc.*", "apps.view", "global.@clear", "rpc.a"]),
            ],
            vec![],
        );

        let mut sink = SummarySink::default();
        let resolved = resolve_with(&profile, &mut sink);
        assert_eq!(resolved, resolve(&profile));
        assert_eq!(
            sink.events,
            vec![ResolveEvent::Resolved {
                applied: vec![(Permission::parse("rpc.a"), 1)],
            }]
        );
    }

    #[test]
    fn test_noop_sink_matches_recording_sink() {
        let profile = PermissionProfile::new(
            vec![position("a", 1, &["~rpc.x", "global.@clear", "rpc.y"])],
            Permission::from_list(["rpc.z"]),
        );

        let mut sink = RecordingSink::new();
        assert_eq!(resolve(&profile), resolve_with(&profile, &mut sink));
        assert!(matches!(sink.events()[1], ResolveEvent::Cleared { .. }));
    }
}
