//! Object-level actions and field access modes.

use crate::AccessLevel;
use serde::{Deserialize, Serialize};

/// A CRUD action on an object type.
///
/// Actions are the unit the object-level permission gate is keyed by:
/// a profile either holds or does not hold each of the four actions
/// for an object, independently.
///
/// # Record-Level Mapping
///
/// For existing records the action also determines which record-level
/// access the sharing tiers must grant:
///
/// | Action | Record-level access needed |
/// |--------|----------------------------|
/// | `Create` | none (no record exists yet) |
/// | `Read` | `AccessLevel::Read` |
/// | `Update` | `AccessLevel::ReadWrite` |
/// | `Delete` | `AccessLevel::ReadWrite` |
///
/// # Example
///
/// ```
/// use gatekit_auth::{AccessLevel, Action};
///
/// assert_eq!(Action::Read.needed_access(), Some(AccessLevel::Read));
/// assert_eq!(Action::Delete.needed_access(), Some(AccessLevel::ReadWrite));
/// assert_eq!(Action::Create.needed_access(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create a new record of the object.
    Create,
    /// Read existing records.
    Read,
    /// Modify existing records.
    Update,
    /// Remove existing records.
    Delete,
}

impl Action {
    /// All four actions, in gate-check order.
    pub const ALL: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

    /// Parses an action from its lowercase name.
    ///
    /// Returns `None` for anything else — an unrecognized action name
    /// must never map onto a permissive default.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "create" => Some(Action::Create),
            "read" => Some(Action::Read),
            "update" => Some(Action::Update),
            "delete" => Some(Action::Delete),
            _ => None,
        }
    }

    /// Returns the lowercase name of the action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    /// Returns the record-level access this action requires, or `None`
    /// for [`Action::Create`] (there is no record to resolve yet).
    #[must_use]
    pub fn needed_access(&self) -> Option<AccessLevel> {
        match self {
            Action::Create => None,
            Action::Read => Some(AccessLevel::Read),
            Action::Update | Action::Delete => Some(AccessLevel::ReadWrite),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field-level access mode.
///
/// Field permissions are independent of both object permissions and
/// record visibility: a principal with record-level read access but no
/// field-level read grant for a given field must still have that field
/// redacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldMode {
    /// See the field's value.
    Read,
    /// Change the field's value.
    Edit,
}

impl FieldMode {
    /// Returns the lowercase name of the mode.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldMode::Read => "read",
            FieldMode::Edit => "edit",
        }
    }
}

impl std::fmt::Display for FieldMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
