//! Identifier types for GateKit.
//!
//! All identifiers are UUID-based so they are safe to transmit across
//! processes and services without coordination. The engine never mints
//! identifiers for domain entities itself — they arrive from the
//! authentication layer (users) and the storage layer (records); the
//! `new()` constructors exist for the administrative write paths and
//! for tests.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for an Organization — the tenant isolation boundary.
///
/// Every other entity in the access model belongs, directly or
/// transitively, to exactly one organization. Two principals from
/// different organizations can never see each other's configuration,
/// so every store keys its rows by `OrgId` (directly or through an
/// owning entity).
///
/// # Example
///
/// ```
/// use gatekit_types::OrgId;
///
/// let acme = OrgId::new();
/// let globex = OrgId::new();
///
/// assert_ne!(acme, globex);
/// assert!(format!("{acme}").starts_with("org:"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrgId(pub Uuid);

impl OrgId {
    /// Creates a new [`OrgId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for OrgId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OrgId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "org:{}", self.0)
    }
}

/// Identifier for a User — the acting principal.
///
/// A `UserId` identifies *who* is asking, separate from *what they are
/// allowed to do*. Permission comes from the user's profile and role,
/// both carried on the [`Principal`](crate::Principal) claims
/// descriptor. The same `UserId` also appears on the other side of a
/// request: as the owner of a record, or as the grantee of a manual
/// share.
///
/// # Example
///
/// ```
/// use gatekit_types::UserId;
///
/// let alice = UserId::new();
/// let bob = UserId::new();
///
/// assert_ne!(alice, bob);
/// assert!(format!("{alice}").starts_with("user:"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Creates a new [`UserId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

/// Identifier for a Profile — a reusable named permission template.
///
/// Many users reference the same profile; a profile belongs to one
/// organization and is unique by (org, name). Object-level CRUD grants
/// and field-level read/edit grants are keyed by `ProfileId`, never by
/// `UserId` — changing a profile changes every user on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub Uuid);

impl ProfileId {
    /// Creates a new [`ProfileId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "profile:{}", self.0)
    }
}

/// Identifier for a Role — a node in an organization's role hierarchy.
///
/// Roles form a forest within one organization: each role has an
/// optional parent, and a principal whose role is an *ancestor* of a
/// record owner's role implicitly sees the owner's records.
///
/// # Example
///
/// ```
/// use gatekit_types::RoleId;
///
/// let manager = RoleId::new();
/// assert!(format!("{manager}").starts_with("role:"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleId(pub Uuid);

#[allow(clippy::new_without_default)] // Default intentionally not implemented - see below
impl RoleId {
    /// Creates a new [`RoleId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

// NOTE: RoleId intentionally does NOT implement Default.
// Default::default() would mint an id that is not registered in any
// role hierarchy; hierarchy queries on it always come back empty and
// the mistake is invisible. Register roles through the role store and
// keep the id it was created with.

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "role:{}", self.0)
    }
}

/// Identifier for a Record — one row of an object type.
///
/// The engine never inspects record contents; it only needs the
/// record's identity (for manual shares) and its owner (for ownership
/// and hierarchy checks). Both arrive from the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    /// Creates a new [`RecordId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "record:{}", self.0)
    }
}

// Tests are in lib.rs as integration tests for public API
