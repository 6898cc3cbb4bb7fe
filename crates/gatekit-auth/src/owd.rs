//! Organization-wide default visibility.

use crate::AccessLevel;
use serde::{Deserialize, Serialize};

/// An organization's baseline visibility for one object's records.
///
/// The org-wide default is the weakest record-level tier: it is only
/// consulted for records the principal does not own and has no
/// hierarchical grant for, and it is overridden upward (never
/// downward) by sharing rules and manual shares.
///
/// # Closed Set
///
/// This is a closed enum on purpose. A value arriving from storage
/// that is not one of the three variants fails deserialization — it
/// can never fall through to a permissive branch.
///
/// # Example
///
/// ```
/// use gatekit_auth::{AccessLevel, OrgDefault};
///
/// assert!(OrgDefault::PublicReadOnly.grants(AccessLevel::Read));
/// assert!(!OrgDefault::PublicReadOnly.grants(AccessLevel::ReadWrite));
/// assert!(!OrgDefault::Private.grants(AccessLevel::Read));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgDefault {
    /// Non-owners see nothing at this tier.
    Private,
    /// Every user in the organization may read, not mutate.
    PublicReadOnly,
    /// Every user in the organization may read and mutate.
    PublicReadWrite,
}

impl OrgDefault {
    /// Returns `true` if this default grants the needed access level.
    #[must_use]
    pub fn grants(self, needed: AccessLevel) -> bool {
        match self {
            OrgDefault::Private => false,
            OrgDefault::PublicReadOnly => needed == AccessLevel::Read,
            OrgDefault::PublicReadWrite => true,
        }
    }

    /// Parses a default from its lowercase name.
    ///
    /// Returns `None` for anything else.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "private" => Some(OrgDefault::Private),
            "public_read_only" => Some(OrgDefault::PublicReadOnly),
            "public_read_write" => Some(OrgDefault::PublicReadWrite),
            _ => None,
        }
    }

    /// Returns the lowercase name of the default.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            OrgDefault::Private => "private",
            OrgDefault::PublicReadOnly => "public_read_only",
            OrgDefault::PublicReadWrite => "public_read_write",
        }
    }
}

impl std::fmt::Display for OrgDefault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
