//! Authorization decision types.
//!
//! Provides [`Decision`] — the result every resolver entry point
//! returns — and [`DenyReason`], the machine-readable audit code
//! attached to denials.

use serde::{Deserialize, Serialize};

/// Why a request was denied.
///
/// Reasons are for **internal audit only**. End users receive the
/// uniform [`user_message`](DenyReason::user_message) regardless of
/// which tier denied, so an unauthorized principal cannot probe which
/// objects or fields exist by comparing denial messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// The profile holds no object-level grant for the action.
    NoObjectPermission,
    /// The profile holds no field-level grant for the mode.
    NoFieldPermission,
    /// No sharing tier granted sufficient access to the record.
    NoRecordVisibility,
}

impl DenyReason {
    /// Returns the audit code for this reason.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoObjectPermission => "no_object_permission",
            Self::NoFieldPermission => "no_field_permission",
            Self::NoRecordVisibility => "no_record_visibility",
        }
    }

    /// Returns the uniform end-user message.
    ///
    /// Deliberately identical for every reason.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        "not permitted"
    }
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of an authorization request.
///
/// # Variants
///
/// - `Allowed`: the request may proceed
/// - `Denied`: the request must be refused; the reason is for audit
///
/// # Example
///
/// ```
/// use gatekit_auth::{Decision, DenyReason};
///
/// let ok = Decision::Allowed;
/// assert!(ok.is_allowed());
///
/// let no = Decision::Denied(DenyReason::NoObjectPermission);
/// assert!(no.is_denied());
/// assert_eq!(no.reason(), Some(DenyReason::NoObjectPermission));
/// assert_eq!(no.status_str(), "denied");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "decision", content = "reason")]
pub enum Decision {
    /// The request is allowed.
    Allowed,
    /// The request is denied, with an audit reason.
    Denied(DenyReason),
}

impl Decision {
    /// Returns `true` if the request is allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Returns `true` if the request is denied.
    #[must_use]
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied(_))
    }

    /// Returns the denial reason, if denied.
    #[must_use]
    pub fn reason(&self) -> Option<DenyReason> {
        match self {
            Self::Allowed => None,
            Self::Denied(reason) => Some(*reason),
        }
    }

    /// Returns the status as a string ("allowed", "denied").
    #[must_use]
    pub fn status_str(&self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::Denied(_) => "denied",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Allowed => f.write_str("allowed"),
            Self::Denied(reason) => write!(f, "denied ({reason})"),
        }
    }
}
