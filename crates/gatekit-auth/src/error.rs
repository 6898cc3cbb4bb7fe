//! Integrity errors surfaced during access resolution.
//!
//! Deny-by-default covers configuration *absence*; these errors cover
//! configuration *corruption*. They are fatal to the request and must
//! reach an operator — converting one into a quiet deny would hide a
//! broken hierarchy behind ordinary-looking denials.

use gatekit_types::{ErrorCode, OrgId, RoleId};
use thiserror::Error;

/// Fatal data-integrity faults detected while resolving access.
///
/// Callers should log these at error level and fail the request;
/// retrying without repairing the stored configuration will fail the
/// same way.
#[derive(Debug, Clone, Error)]
pub enum AccessError {
    /// A role-hierarchy walk revisited a node: the stored parent graph
    /// contains a cycle. The write path is expected to prevent this;
    /// seeing it means the stored data is corrupt.
    #[error("role hierarchy cycle detected at {role} in {org}")]
    RoleCycle {
        /// Organization whose hierarchy is corrupt.
        org: OrgId,
        /// The role at which the walk revisited a node.
        role: RoleId,
    },

    /// A stored reference points at a role that does not exist.
    #[error("dangling role reference: {role} is not registered")]
    DanglingRole {
        /// The missing role.
        role: RoleId,
    },

    /// Internal lock was poisoned (a thread panicked while holding it).
    #[error("access store lock poisoned: {context}")]
    LockPoisoned {
        /// Which lock was poisoned.
        context: &'static str,
    },
}

impl ErrorCode for AccessError {
    fn code(&self) -> &'static str {
        match self {
            Self::RoleCycle { .. } => "ACCESS_ROLE_CYCLE",
            Self::DanglingRole { .. } => "ACCESS_DANGLING_ROLE",
            Self::LockPoisoned { .. } => "ACCESS_LOCK_POISONED",
        }
    }

    fn is_recoverable(&self) -> bool {
        // All three indicate corrupted state, not transient conditions.
        // Repair the configuration (or restart the process for a
        // poisoned lock); retrying the same call cannot succeed.
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatekit_types::assert_error_codes;

    #[test]
    fn error_codes_follow_conventions() {
        let role = RoleId::new();
        assert_error_codes(
            &[
                AccessError::RoleCycle {
                    org: OrgId::new(),
                    role,
                },
                AccessError::DanglingRole { role },
                AccessError::LockPoisoned { context: "roles" },
            ],
            "ACCESS_",
        );
    }

    #[test]
    fn none_are_recoverable() {
        let err = AccessError::DanglingRole { role: RoleId::new() };
        assert!(!err.is_recoverable());
    }

    #[test]
    fn cycle_display_names_org_and_role() {
        let org = OrgId::new();
        let role = RoleId::new();
        let msg = AccessError::RoleCycle { org, role }.to_string();
        assert!(msg.contains(&role.to_string()), "got: {msg}");
        assert!(msg.contains(&org.to_string()), "got: {msg}");
    }

    #[test]
    fn lock_poisoned_display_names_context() {
        let msg = AccessError::LockPoisoned { context: "manual shares" }.to_string();
        assert!(msg.contains("manual shares"), "got: {msg}");
    }
}
