//! Profile permission rows and the configured-vs-absent distinction.
//!
//! Permission tables are sparse: most (profile, object) pairs have no
//! row at all. Absence resolves to deny, exactly like a row of all
//! `false` — but audit needs to tell the two apart, so lookups return
//! [`GrantLookup`] instead of a bare default-constructed row.

use crate::{Action, FieldMode};
use serde::{Deserialize, Serialize};

/// Object-level CRUD grants for one (profile, object) pair.
///
/// The four booleans are independent: holding `update` does not imply
/// `read`, and none of them implies any field-level grant.
///
/// # Example
///
/// ```
/// use gatekit_auth::{Action, ObjectGrants};
///
/// let grants = ObjectGrants::read_only();
/// assert!(grants.allows(Action::Read));
/// assert!(!grants.allows(Action::Update));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectGrants {
    /// May create records of the object.
    pub create: bool,
    /// May read records of the object.
    pub read: bool,
    /// May update records of the object.
    pub update: bool,
    /// May delete records of the object.
    pub delete: bool,
}

impl ObjectGrants {
    /// All four actions granted.
    #[must_use]
    pub fn full() -> Self {
        Self {
            create: true,
            read: true,
            update: true,
            delete: true,
        }
    }

    /// Only `read` granted.
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            read: true,
            ..Self::default()
        }
    }

    /// All four actions explicitly denied.
    ///
    /// Behaves exactly like an absent row at decision time; the
    /// difference is visible only through [`GrantLookup`].
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns the boolean for the given action.
    #[must_use]
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Create => self.create,
            Action::Read => self.read,
            Action::Update => self.update,
            Action::Delete => self.delete,
        }
    }
}

/// Field-level grants for one (profile, object, field) triple.
///
/// Read and edit are independent booleans; neither is implied by any
/// object-level grant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGrants {
    /// May see the field's value.
    pub read: bool,
    /// May change the field's value.
    pub edit: bool,
}

impl FieldGrants {
    /// Both modes granted.
    #[must_use]
    pub fn read_write() -> Self {
        Self {
            read: true,
            edit: true,
        }
    }

    /// Only `read` granted.
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            read: true,
            edit: false,
        }
    }

    /// Returns the boolean for the given mode.
    #[must_use]
    pub fn allows(&self, mode: FieldMode) -> bool {
        match mode {
            FieldMode::Read => self.read,
            FieldMode::Edit => self.edit,
        }
    }
}

/// The result of a sparse permission-table lookup.
///
/// Both variants may resolve to deny; the distinction exists so audit
/// records can say *why* — "administrator denied this" versus "nobody
/// ever configured this".
///
/// # Example
///
/// ```
/// use gatekit_auth::{GrantLookup, ObjectGrants};
///
/// let configured: GrantLookup<ObjectGrants> = GrantLookup::Configured(ObjectGrants::none());
/// let absent: GrantLookup<ObjectGrants> = GrantLookup::Absent;
///
/// assert!(configured.is_configured());
/// assert!(absent.is_absent());
/// assert!(absent.configured().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantLookup<T> {
    /// A row exists; its booleans decide.
    Configured(T),
    /// No row exists for the key. Deny, reported as unconfigured.
    Absent,
}

impl<T> GrantLookup<T> {
    /// Returns `true` if a row exists.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }

    /// Returns `true` if no row exists.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the configured row, if any.
    #[must_use]
    pub fn configured(self) -> Option<T> {
        match self {
            Self::Configured(row) => Some(row),
            Self::Absent => None,
        }
    }
}

impl<T> From<Option<T>> for GrantLookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(row) => Self::Configured(row),
            None => Self::Absent,
        }
    }
}
