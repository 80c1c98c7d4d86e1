//! Permission checks against a resolved set

use crate::permission::Permission;

/// Checks whether a resolved set of permissions grants `perm`
///
/// An entry matches when its namespace equals the candidate's (or is
/// `global`) and its action equals the candidate's (or is `*`). The check
/// passes when at least one entry matches and no matching entry is a
/// negator. An unnegated `global.*` anywhere in the set passes
/// unconditionally.
///
/// `perms` must be resolved: it must not contain `@clear` directives.
///
/// # Examples
///
/// ```
/// use rankperms::{has_permission, Permission};
///
/// let perms = Permission::from_list(["rpc.*", "~rpc.Ban"]);
/// assert!(has_permission(&perms, &Permission::parse("rpc.Claim")));
/// assert!(!has_permission(&perms, &Permission::parse("rpc.Ban")));
/// assert!(!has_permission(&perms, &Permission::parse("apps.view")));
/// ```
pub fn has_permission(perms: &[Permission], perm: &Permission) -> bool {
    let mut matched = false;
    let mut has_negator = false;

    for user_perm in perms {
        if user_perm.is_superuser() {
            return true;
        }

        if grants_key(user_perm, perm) {
            matched = true;

            if user_perm.negated {
                has_negator = true;
            }
        }
    }

    matched && !has_negator
}

/// Same as [`has_permission`], parsing every argument from text
///
/// ```
/// use rankperms::has_permission_str;
///
/// assert!(has_permission_str(&["global.*"], "test"));
/// assert!(!has_permission_str(&["apps.*"], "rpc.Claim"));
/// ```
pub fn has_permission_str<S: AsRef<str>>(perms: &[S], perm: &str) -> bool {
    let perms = Permission::from_list(perms);
    has_permission(&perms, &Permission::parse(perm))
}

/// Whether `entry` covers the namespace and action of `perm`
fn grants_key(entry: &Permission, perm: &Permission) -> bool {
    (entry.namespace == perm.namespace || entry.is_global())
        && (entry.is_wildcard() || entry.action == perm.action)
}
