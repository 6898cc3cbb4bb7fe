//! Principal (trusted claims) types.
//!
//! A [`Principal`] describes the actor on whose behalf an access
//! decision is requested: which user, in which organization, on which
//! profile, and (optionally) in which role.
//!
//! # Design Rationale
//!
//! Principal lives in `gatekit-types` (not `gatekit-auth`) because:
//!
//! 1. **Claims boundary**: the authentication layer constructs it and
//!    callers pass it through untouched
//! 2. **No permission logic**: Principal is pure identity; what the
//!    principal may do is decided elsewhere
//! 3. **Avoid circular dependency**: stores and resolvers both consume
//!    it, so it must sit below both
//!
//! The engine never authenticates. Callers must only construct a
//! `Principal` from claims an authentication layer has already
//! verified.

use crate::{OrgId, ProfileId, RoleId, UserId};
use serde::{Deserialize, Serialize};

/// A verified identity descriptor for one acting user.
///
/// The four associations are supplied as trusted claims:
///
/// | Field | Meaning |
/// |-------|---------|
/// | `user` | Who is acting |
/// | `org` | Which tenant the actor belongs to |
/// | `profile` | Which permission template applies |
/// | `role` | Position in the role hierarchy, if any |
///
/// # Why Not Just a UserId?
///
/// Every access decision needs the organization (tenant scoping), the
/// profile (object/field gates), and the role (hierarchy and sharing
/// tiers). Carrying them on one immutable descriptor keeps the
/// decision functions pure — they never reach back into an identity
/// service mid-decision.
///
/// # Example
///
/// ```
/// use gatekit_types::{OrgId, Principal, ProfileId, RoleId, UserId};
///
/// let rep = Principal::new(UserId::new(), OrgId::new(), ProfileId::new())
///     .with_role(RoleId::new());
/// assert!(rep.has_role());
///
/// // Integration users often have a profile but no role.
/// let integration = Principal::new(UserId::new(), OrgId::new(), ProfileId::new());
/// assert!(!integration.has_role());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The acting user.
    pub user: UserId,
    /// The organization the user belongs to.
    pub org: OrgId,
    /// The permission template the user references.
    pub profile: ProfileId,
    /// The user's position in the role hierarchy, if assigned.
    pub role: Option<RoleId>,
}

impl Principal {
    /// Creates a principal with no role assignment.
    ///
    /// Use [`with_role`](Self::with_role) to attach a role claim.
    #[must_use]
    pub fn new(user: UserId, org: OrgId, profile: ProfileId) -> Self {
        Self {
            user,
            org,
            profile,
            role: None,
        }
    }

    /// Returns a copy of this principal carrying the given role claim.
    #[must_use]
    pub fn with_role(self, role: RoleId) -> Self {
        Self {
            role: Some(role),
            ..self
        }
    }

    /// Returns `true` if the principal has a role assignment.
    #[must_use]
    pub fn has_role(&self) -> bool {
        self.role.is_some()
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.role {
            Some(role) => write!(f, "{}@{} ({})", self.user, self.org, role),
            None => write!(f, "{}@{}", self.user, self.org),
        }
    }
}
