//! Error types for permission resolution and patch validation

use thiserror::Error;

use crate::permission::Permission;

/// Result type alias for permission operations
pub type Result<T> = std::result::Result<T, AuthzError>;

/// Errors raised while loading profiles or validating permission edits
///
/// None of these are retryable: every input is an in-memory value, so the
/// same call always fails the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// A position's rank is not an integer (or does not fit in an `i32`)
    #[error("Position '{position}' has invalid rank {rank}: rank must be an integer")]
    InvalidRank { position: String, rank: String },

    /// Profile input does not have the expected shape
    #[error("Invalid permission profile: {reason}")]
    InvalidProfile { reason: String },

    /// The acting manager does not hold a permission touched by the edit
    #[error("You do not have permission to add this permission: {permission}")]
    Unauthorized { permission: Permission },

    /// A wildcard was changed while the target lacks one of the manager's
    /// own negators in that namespace
    #[error(
        "You do not have permission to add wildcard permission {wildcard} with negators due to lack of negator {negator} in namespace '{namespace}'"
    )]
    UnauthorizedWildcardNegatorMismatch {
        namespace: String,
        wildcard: Permission,
        negator: Permission,
    },
}

impl AuthzError {
    /// Whether this error came from patch validation rather than input loading
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AuthzError::Unauthorized { .. } | AuthzError::UnauthorizedWildcardNegatorMismatch { .. }
        )
    }
}

impl From<serde_json::Error> for AuthzError {
    fn from(err: serde_json::Error) -> Self {
        AuthzError::InvalidProfile {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_display() {
        let err = AuthzError::Unauthorized {
            permission: Permission::parse("rpc.test"),
        };
        assert_eq!(
            err.to_string(),
            "You do not have permission to add this permission: rpc.test"
        );
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_wildcard_mismatch_display() {
        let err = AuthzError::UnauthorizedWildcardNegatorMismatch {
            namespace: "rpc".to_string(),
            wildcard: Permission::parse("rpc.*"),
            negator: Permission::parse("~rpc.test"),
        };
        let msg = err.to_string();
        assert!(msg.contains("wildcard permission rpc.*"));
        assert!(msg.contains("lack of negator ~rpc.test"));
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_invalid_rank_display() {
        let err = AuthzError::InvalidRank {
            position: "mod".to_string(),
            rank: "1.5".to_string(),
        };
        assert!(err.to_string().contains("'mod'"));
        assert!(err.to_string().contains("1.5"));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_error_equality() {
        let err1 = AuthzError::InvalidProfile {
            reason: "missing field".to_string(),
        };
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
