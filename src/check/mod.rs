//! Checks over resolved permission sets.
//!
//! - [`has_permission`]: does a resolved set authorize one permission
//! - [`check_patch_changes`]: may a manager turn one resolved set into another
//!
//! Both are pure functions over borrowed slices and are safe to call
//! concurrently.

mod authorizer;
mod patch;

pub use authorizer::{has_permission, has_permission_str};
pub use patch::{check_patch_changes, check_patch_changes_str};
