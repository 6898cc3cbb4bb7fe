//! Administrative write-path errors.
//!
//! Every rejected write leaves the stores untouched: validation runs
//! under the same lock acquisition as the mutation it guards, so no
//! partial state is ever visible.

use gatekit_auth::AccessError;
use gatekit_types::{ErrorCode, OrgId, ProfileId, RoleId};
use thiserror::Error;

/// Errors returned by the administrative write paths.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The proposed parent assignment would make the role its own
    /// ancestor.
    #[error("reparenting {role} under {parent} would create a cycle")]
    CycleRejected {
        /// Role being reparented.
        role: RoleId,
        /// Proposed parent.
        parent: RoleId,
    },

    /// A role can never be its own parent.
    #[error("{role} cannot be its own parent")]
    SelfParent {
        /// The offending role.
        role: RoleId,
    },

    /// Parent and child roles must belong to the same organization.
    #[error("{role} and proposed parent {parent} belong to different organizations")]
    CrossOrgParent {
        /// Role being reparented.
        role: RoleId,
        /// Proposed parent from another organization.
        parent: RoleId,
    },

    /// A referenced role is not registered.
    #[error("unknown role {role}")]
    UnknownRole {
        /// The missing role.
        role: RoleId,
    },

    /// A referenced profile is not registered.
    #[error("unknown profile {profile}")]
    UnknownProfile {
        /// The missing profile.
        profile: ProfileId,
    },

    /// A referenced organization is not registered.
    #[error("unknown organization {org}")]
    UnknownOrg {
        /// The missing organization.
        org: OrgId,
    },

    /// A profile with this name already exists in the organization.
    #[error("profile '{name}' already exists in {org}")]
    DuplicateProfileName {
        /// Organization the profile was being created in.
        org: OrgId,
        /// The conflicting name.
        name: String,
    },

    /// A sharing rule with this name already exists for the object.
    #[error("sharing rule '{name}' already exists for object '{object}' in {org}")]
    DuplicateRuleName {
        /// Organization the rule was being created in.
        org: OrgId,
        /// Object the rule targets.
        object: String,
        /// The conflicting name.
        name: String,
    },

    /// A referenced sharing rule is not stored.
    #[error("no sharing rule '{name}' for object '{object}' in {org}")]
    UnknownRule {
        /// Organization queried.
        org: OrgId,
        /// Object queried.
        object: String,
        /// The missing rule name.
        name: String,
    },

    /// Internal lock was poisoned (a thread panicked while holding it).
    #[error("store lock poisoned: {context}")]
    LockPoisoned {
        /// Which lock was poisoned.
        context: &'static str,
    },

    /// Existing stored data is corrupt (e.g. a hierarchy cycle found
    /// while validating a write).
    #[error(transparent)]
    Integrity(#[from] AccessError),
}

impl ErrorCode for StoreError {
    fn code(&self) -> &'static str {
        match self {
            Self::CycleRejected { .. } => "STORE_CYCLE_REJECTED",
            Self::SelfParent { .. } => "STORE_SELF_PARENT",
            Self::CrossOrgParent { .. } => "STORE_CROSS_ORG_PARENT",
            Self::UnknownRole { .. } => "STORE_UNKNOWN_ROLE",
            Self::UnknownProfile { .. } => "STORE_UNKNOWN_PROFILE",
            Self::UnknownOrg { .. } => "STORE_UNKNOWN_ORG",
            Self::DuplicateProfileName { .. } => "STORE_DUPLICATE_PROFILE_NAME",
            Self::DuplicateRuleName { .. } => "STORE_DUPLICATE_RULE_NAME",
            Self::UnknownRule { .. } => "STORE_UNKNOWN_RULE",
            Self::LockPoisoned { .. } => "STORE_LOCK_POISONED",
            Self::Integrity(_) => "STORE_INTEGRITY",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            // The administrator can correct the request and retry.
            Self::CycleRejected { .. }
            | Self::SelfParent { .. }
            | Self::CrossOrgParent { .. }
            | Self::UnknownRole { .. }
            | Self::UnknownProfile { .. }
            | Self::UnknownOrg { .. }
            | Self::DuplicateProfileName { .. }
            | Self::DuplicateRuleName { .. }
            | Self::UnknownRule { .. } => true,
            // Corruption and poisoning require repair, not retry.
            Self::LockPoisoned { .. } | Self::Integrity(_) => false,
        }
    }
}
