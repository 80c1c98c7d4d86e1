//! # Ranked permission resolution (rankperms)
//!
//! Resolves the effective permissions of a principal from ranked sources and
//! validates edits to them:
//! - `namespace.action` permissions with `~` negators
//! - `*` wildcard actions and the cross-namespace `global` namespace
//! - `@clear` directives that reset accumulated grants
//! - Rank-ordered positions plus per-principal overrides
//! - Patch validation so managers can only change what they hold
//!
//! Every operation is a pure function over immutable inputs, so all of them
//! can be called concurrently without coordination.
//!
//! ## Example
//!
//! ```rust
//! use rankperms::{check_patch_changes, has_permission, resolve, Permission, PermissionProfile, PositionGrant};
//!
//! let profile = PermissionProfile::new(
//!     vec![
//!         PositionGrant::new("moderator", 2, Permission::from_list(["rpc.*", "~rpc.Ban"])),
//!         PositionGrant::new("reviewer", 1, Permission::from_list(["rpc.Claim", "apps.view"])),
//!     ],
//!     Permission::from_list(["apps.edit"]),
//! );
//!
//! let resolved = resolve(&profile);
//! assert!(has_permission(&resolved, &Permission::parse("rpc.Claim")));
//! assert!(!has_permission(&resolved, &Permission::parse("rpc.Ban")));
//!
//! // The moderator may hand out rpc.Claim, but not apps.admin
//! let current = Permission::from_list(["apps.view"]);
//! let proposed = Permission::from_list(["apps.view", "rpc.Claim"]);
//! assert!(check_patch_changes(&resolved, &current, &proposed).is_ok());
//!
//! let proposed = Permission::from_list(["apps.view", "apps.admin"]);
//! assert!(check_patch_changes(&resolved, &current, &proposed).is_err());
//! ```

pub mod check;
pub mod error;
pub mod permission;
pub mod resolve;

pub use check::{check_patch_changes, check_patch_changes_str, has_permission, has_permission_str};
pub use error::{AuthzError, Result};
pub use permission::{Permission, PermissionProfile, PositionGrant};
pub use resolve::{resolve, resolve_with, NoopSink, RecordingSink, ResolveEvent, ResolveSink, TracingSink};
