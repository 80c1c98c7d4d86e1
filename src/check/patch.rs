//! Validation of permission edits made by a manager

use indexmap::IndexSet;
use tracing::debug;

use super::authorizer::has_permission;
use crate::error::{AuthzError, Result};
use crate::permission::Permission;

/// Checks whether a manager may change a target's permissions from
/// `current_perms` to `new_perms`
///
/// All three sets must be resolved. Every permission present in exactly one
/// of `current_perms` and `new_perms` counts as changed, and for each one:
///
/// - the manager must hold it (negation stripped), otherwise
///   `AuthzError::Unauthorized`
/// - if it is a wildcard, every negator the manager has in that namespace
///   must also be in `new_perms`, otherwise
///   `AuthzError::UnauthorizedWildcardNegatorMismatch`
///
/// Changes are checked removals first (in `current_perms` order), then
/// additions (in `new_perms` order), and the first violation is returned.
///
/// # Examples
///
/// ```
/// use rankperms::{check_patch_changes, Permission};
///
/// let manager = Permission::from_list(["rpc.*"]);
/// let current = Permission::from_list(["rpc.test"]);
/// let proposed = Permission::from_list(["rpc.test", "rpc.test2"]);
/// assert!(check_patch_changes(&manager, &current, &proposed).is_ok());
///
/// let proposed = Permission::from_list(["apps.view"]);
/// assert!(check_patch_changes(&manager, &current, &proposed).is_err());
/// ```
pub fn check_patch_changes(
    manager_perms: &[Permission],
    current_perms: &[Permission],
    new_perms: &[Permission],
) -> Result<()> {
    for perm in changed_permissions(current_perms, new_perms) {
        let resolved_perm = perm.unnegated();

        if !has_permission(manager_perms, &resolved_perm) {
            debug!(permission = %resolved_perm, "patch rejected: manager lacks permission");
            return Err(AuthzError::Unauthorized {
                permission: resolved_perm,
            });
        }

        if perm.is_wildcard() {
            // The target must keep at least the manager's own negators in
            // this namespace
            let missing = manager_perms.iter().find(|manager_perm| {
                manager_perm.negated
                    && manager_perm.namespace == perm.namespace
                    && !new_perms.contains(manager_perm)
            });

            if let Some(negator) = missing {
                debug!(wildcard = %perm, negator = %negator, "patch rejected: wildcard without negator");
                return Err(AuthzError::UnauthorizedWildcardNegatorMismatch {
                    namespace: perm.namespace.clone(),
                    wildcard: perm.clone(),
                    negator: negator.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Same as [`check_patch_changes`], parsing every argument from text
///
/// ```
/// use rankperms::check_patch_changes_str;
///
/// assert!(check_patch_changes_str(&["global.*"], &["rpc.test"], &["rpc.test", "rpc.test2"]).is_ok());
/// assert!(check_patch_changes_str(&["rpc.*"], &["global.*"], &["rpc.test"]).is_err());
/// ```
pub fn check_patch_changes_str<S: AsRef<str>>(
    manager_perms: &[S],
    current_perms: &[S],
    new_perms: &[S],
) -> Result<()> {
    check_patch_changes(
        &Permission::from_list(manager_perms),
        &Permission::from_list(current_perms),
        &Permission::from_list(new_perms),
    )
}

/// Symmetric difference of two resolved sets in a stable order: removals in
/// `current` order, then additions in `new` order
fn changed_permissions<'a>(current: &'a [Permission], new: &'a [Permission]) -> IndexSet<&'a Permission> {
    let current_set: IndexSet<&Permission> = current.iter().collect();
    let new_set: IndexSet<&Permission> = new.iter().collect();

    current_set
        .difference(&new_set)
        .chain(new_set.difference(&current_set))
        .copied()
        .collect()
}
