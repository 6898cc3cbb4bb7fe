//! Record-level access levels.

use serde::{Deserialize, Serialize};

/// The level of access a sharing tier grants on a record.
///
/// The derived ordering is load-bearing: `Read < ReadWrite`, so the
/// union of several grants is simply the maximum, and "does grant X
/// cover need Y" is `x >= y` (see [`satisfies`](Self::satisfies)).
///
/// # Union Fold
///
/// When multiple sharing rules match the same principal, their grants
/// fold to the strongest one:
///
/// ```
/// use gatekit_auth::AccessLevel;
///
/// let granted = [AccessLevel::Read, AccessLevel::ReadWrite, AccessLevel::Read]
///     .into_iter()
///     .max();
/// assert_eq!(granted, Some(AccessLevel::ReadWrite));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// See the record.
    Read,
    /// See and mutate the record.
    ReadWrite,
}

impl AccessLevel {
    /// Returns `true` if this grant covers the needed level.
    ///
    /// `ReadWrite` covers both levels; `Read` covers only `Read`.
    ///
    /// # Example
    ///
    /// ```
    /// use gatekit_auth::AccessLevel;
    ///
    /// assert!(AccessLevel::ReadWrite.satisfies(AccessLevel::Read));
    /// assert!(AccessLevel::Read.satisfies(AccessLevel::Read));
    /// assert!(!AccessLevel::Read.satisfies(AccessLevel::ReadWrite));
    /// ```
    #[must_use]
    pub fn satisfies(self, needed: AccessLevel) -> bool {
        self >= needed
    }

    /// Parses an access level from its lowercase name.
    ///
    /// Returns `None` for anything else — an unrecognized level must
    /// never widen into a permissive default.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "read" => Some(AccessLevel::Read),
            "read_write" => Some(AccessLevel::ReadWrite),
            _ => None,
        }
    }

    /// Returns the lowercase name of the level.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Read => "read",
            AccessLevel::ReadWrite => "read_write",
        }
    }
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
