//! Permission value type and its canonical text form

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Namespace that matches every namespace during authorization checks
pub const GLOBAL_NAMESPACE: &str = "global";

/// Action that matches every action within its namespace
pub const WILDCARD_ACTION: &str = "*";

/// Resolver directive that erases previously accumulated grants
pub const CLEAR_DIRECTIVE: &str = "@clear";

/// Prefix marking a negator in canonical text
pub const NEGATOR_PREFIX: char = '~';

/// A deconstructed permission
///
/// Permissions are written as `namespace.action`, optionally prefixed with
/// `~` to mark a negator that revokes the pair instead of granting it:
///
/// - `rpc.Claim` grants `Claim` in the `rpc` namespace
/// - `rpc.*` grants every action in `rpc`
/// - `global.view` grants `view` in every namespace
/// - `~rpc.Claim` revokes `rpc.Claim`
/// - `apps.@clear` is a resolver directive, never a grant
///
/// Text without a `.` is an action in the `global` namespace.
///
/// Equality and hashing are structural over the triple, so permissions can be
/// used directly as map keys.
///
/// # Examples
///
/// ```
/// use rankperms::Permission;
///
/// let perm = Permission::parse("~rpc.Claim");
/// assert_eq!(perm.namespace, "rpc");
/// assert_eq!(perm.action, "Claim");
/// assert!(perm.negated);
/// assert_eq!(perm.to_string(), "~rpc.Claim");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Permission {
    /// Top-level grouping, e.g. `rpc` or `apps`
    pub namespace: String,

    /// Capability within the namespace
    pub action: String,

    /// Whether this entry revokes rather than grants
    pub negated: bool,
}

impl Permission {
    /// Creates a permission from its parts
    pub fn new(namespace: impl Into<String>, action: impl Into<String>, negated: bool) -> Self {
        Self {
            namespace: namespace.into(),
            action: action.into(),
            negated,
        }
    }

    /// Parses a permission from text
    ///
    /// Never fails: text without a `.` is treated as an action under the
    /// `global` namespace. A leading `~` marks a negator and is stripped from
    /// the namespace segment.
    ///
    /// ```
    /// use rankperms::Permission;
    ///
    /// assert_eq!(Permission::parse("rpc.test"), Permission::new("rpc", "test", false));
    /// assert_eq!(Permission::parse("test"), Permission::new("global", "test", false));
    /// assert_eq!(Permission::parse("rpc.a.b"), Permission::new("rpc", "a.b", false));
    /// ```
    pub fn parse(text: &str) -> Self {
        let negated = text.starts_with(NEGATOR_PREFIX);

        let (namespace, action) = match text.split_once('.') {
            Some((namespace, action)) => (
                namespace.strip_prefix(NEGATOR_PREFIX).unwrap_or(namespace),
                action,
            ),
            None => (GLOBAL_NAMESPACE, text),
        };

        Self::new(namespace, action, negated)
    }

    /// Parses a sequence of texts, preserving order
    pub fn from_list<I, S>(texts: I) -> Vec<Permission>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        texts
            .into_iter()
            .map(|text| Permission::parse(text.as_ref()))
            .collect()
    }

    /// Renders a sequence of permissions to canonical text, preserving order
    pub fn to_list(perms: &[Permission]) -> Vec<String> {
        perms.iter().map(Permission::to_string).collect()
    }

    /// Returns this permission with negation stripped
    pub fn unnegated(&self) -> Permission {
        Permission {
            negated: false,
            ..self.clone()
        }
    }

    /// Returns the negator for this permission's key
    pub fn negate(&self) -> Permission {
        Permission {
            negated: true,
            ..self.clone()
        }
    }

    /// Whether the action is the `*` wildcard
    pub fn is_wildcard(&self) -> bool {
        self.action == WILDCARD_ACTION
    }

    /// Whether this entry is an `@clear` resolver directive
    pub fn is_clear_directive(&self) -> bool {
        self.action == CLEAR_DIRECTIVE
    }

    /// Whether the namespace is the cross-namespace `global` quantifier
    pub fn is_global(&self) -> bool {
        self.namespace == GLOBAL_NAMESPACE
    }

    /// Whether this is the unnegated `global.*` superuser grant
    pub fn is_superuser(&self) -> bool {
        !self.negated && self.is_global() && self.is_wildcard()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "{}", NEGATOR_PREFIX)?;
        }

        write!(f, "{}.{}", self.namespace, self.action)
    }
}

impl FromStr for Permission {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Permission::parse(s))
    }
}

impl From<&str> for Permission {
    fn from(text: &str) -> Self {
        Permission::parse(text)
    }
}

impl From<String> for Permission {
    fn from(text: String) -> Self {
        Permission::parse(&text)
    }
}

impl From<&String> for Permission {
    fn from(text: &String) -> Self {
        Permission::parse(text)
    }
}

impl From<Permission> for String {
    fn from(perm: Permission) -> Self {
        perm.to_string()
    }
}

impl PartialEq<str> for Permission {
    fn eq(&self, other: &str) -> bool {
        *self == Permission::parse(other)
    }
}

impl PartialEq<&str> for Permission {
    fn eq(&self, other: &&str) -> bool {
        *self == Permission::parse(other)
    }
}

impl PartialEq<String> for Permission {
    fn eq(&self, other: &String) -> bool {
        *self == Permission::parse(other)
    }
}
