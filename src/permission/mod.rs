//! Permission data model.
//!
//! - [`Permission`]: a `(namespace, action, negated)` triple with canonical
//!   text form `[~]namespace.action`
//! - [`PositionGrant`]: a ranked source of permissions
//! - [`PermissionProfile`]: every source held by one principal

mod profile;
mod types;

pub use profile::{PermissionProfile, PositionGrant, OVERRIDES_RANK, OVERRIDES_SOURCE_ID};
pub use types::{Permission, CLEAR_DIRECTIVE, GLOBAL_NAMESPACE, NEGATOR_PREFIX, WILDCARD_ACTION};
