//! Sharing rules — administrator-defined, role-scoped record grants.

use crate::AccessLevel;
use gatekit_types::{OrgId, RoleId, TryNew};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a sharing rule selects the records it shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RuleKind {
    /// Shares records based on who owns them.
    OwnershipBased,
    /// Shares records whose field values match a stored criteria
    /// payload.
    ///
    /// The payload is carried opaquely. Criteria evaluation is not
    /// implemented: the resolver skips these rules with a warning and
    /// they never grant access. Storing the payload keeps
    /// administrative round-trips lossless until evaluation lands.
    CriteriaBased {
        /// Opaque criteria payload, owned by the administrative UI.
        criteria: serde_json::Value,
    },
}

impl RuleKind {
    /// Returns `true` for [`RuleKind::CriteriaBased`].
    #[must_use]
    pub fn is_criteria_based(&self) -> bool {
        matches!(self, Self::CriteriaBased { .. })
    }
}

/// Validation errors for sharing rule construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleValidationError {
    /// The rule name is empty. Names are the uniqueness key
    /// administrators address rules by, so they must be non-empty.
    #[error("sharing rule for object '{object}' has an empty name")]
    EmptyName {
        /// Object the rule was being created for.
        object: String,
    },

    /// The object name is empty.
    #[error("sharing rule '{name}' has an empty object name")]
    EmptyObject {
        /// Name the rule was being created with.
        name: String,
    },
}

/// Arguments for [`SharingRule::try_new`].
///
/// Rules start active; use [`SharingRule::deactivate`] (or the store's
/// administrative surface) to suspend one without deleting it.
#[derive(Debug, Clone)]
pub struct SharingRuleConfig {
    /// Rule name, unique per (org, object).
    pub name: String,
    /// Organization the rule belongs to.
    pub org: OrgId,
    /// Object whose records the rule shares.
    pub object: String,
    /// Record selection strategy.
    pub kind: RuleKind,
    /// Role the records are shared to.
    pub shared_to: RoleId,
    /// Whether descendants of `shared_to` are also covered.
    pub include_subordinates: bool,
    /// Access level granted to matching principals.
    pub access: AccessLevel,
}

/// An administrator-defined rule granting role-scoped access to an
/// object's records.
///
/// A rule matches a principal when `shared_to` equals the principal's
/// role, or — with `include_subordinates` — when the principal's role
/// is a descendant of `shared_to`. Matching is resolved against the
/// role hierarchy at decision time, so re-parenting a role immediately
/// changes which rules cover it.
///
/// # Example
///
/// ```
/// use gatekit_auth::{AccessLevel, RuleKind, SharingRule, SharingRuleConfig};
/// use gatekit_types::{OrgId, RoleId, TryNew};
///
/// let rule = SharingRule::try_new(SharingRuleConfig {
///     name: "emea-accounts".to_string(),
///     org: OrgId::new(),
///     object: "accounts".to_string(),
///     kind: RuleKind::OwnershipBased,
///     shared_to: RoleId::new(),
///     include_subordinates: true,
///     access: AccessLevel::Read,
/// })
/// .expect("valid rule");
///
/// assert!(rule.active);
/// assert_eq!(rule.access, AccessLevel::Read);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharingRule {
    /// Rule name, unique per (org, object).
    pub name: String,
    /// Organization the rule belongs to.
    pub org: OrgId,
    /// Object whose records the rule shares.
    pub object: String,
    /// Record selection strategy.
    pub kind: RuleKind,
    /// Role the records are shared to.
    pub shared_to: RoleId,
    /// Whether descendants of `shared_to` are also covered.
    pub include_subordinates: bool,
    /// Access level granted to matching principals.
    pub access: AccessLevel,
    /// Inactive rules are kept but never grant anything.
    pub active: bool,
}

impl TryNew for SharingRule {
    type Error = RuleValidationError;
    type Args = SharingRuleConfig;

    fn try_new(config: SharingRuleConfig) -> Result<Self, Self::Error> {
        if config.name.is_empty() {
            return Err(RuleValidationError::EmptyName {
                object: config.object,
            });
        }
        if config.object.is_empty() {
            return Err(RuleValidationError::EmptyObject { name: config.name });
        }
        Ok(Self {
            name: config.name,
            org: config.org,
            object: config.object,
            kind: config.kind,
            shared_to: config.shared_to,
            include_subordinates: config.include_subordinates,
            access: config.access,
            active: true,
        })
    }
}

impl SharingRule {
    /// Returns a copy of this rule marked inactive.
    #[must_use]
    pub fn deactivate(mut self) -> Self {
        self.active = false;
        self
    }

    /// Returns a copy of this rule marked active.
    #[must_use]
    pub fn activate(mut self) -> Self {
        self.active = true;
        self
    }

    /// Returns `true` if the rule directly targets the given role
    /// (no hierarchy expansion).
    #[must_use]
    pub fn targets_directly(&self, role: RoleId) -> bool {
        self.shared_to == role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(name: &str, object: &str) -> SharingRuleConfig {
        SharingRuleConfig {
            name: name.to_string(),
            org: OrgId::new(),
            object: object.to_string(),
            kind: RuleKind::OwnershipBased,
            shared_to: RoleId::new(),
            include_subordinates: false,
            access: AccessLevel::Read,
        }
    }

    #[test]
    fn try_new_valid_rule_starts_active() {
        let rule = SharingRule::try_new(config("emea", "accounts")).expect("valid rule");
        assert!(rule.active);
        assert_eq!(rule.name, "emea");
        assert_eq!(rule.object, "accounts");
    }

    #[test]
    fn try_new_rejects_empty_name() {
        let err = SharingRule::try_new(config("", "accounts")).unwrap_err();
        assert_eq!(
            err,
            RuleValidationError::EmptyName {
                object: "accounts".to_string()
            }
        );
    }

    #[test]
    fn try_new_rejects_empty_object() {
        let err = SharingRule::try_new(config("emea", "")).unwrap_err();
        assert_eq!(
            err,
            RuleValidationError::EmptyObject {
                name: "emea".to_string()
            }
        );
    }

    #[test]
    fn deactivate_and_activate() {
        let rule = SharingRule::try_new(config("emea", "accounts")).expect("valid rule");
        let inactive = rule.deactivate();
        assert!(!inactive.active);

        let active = inactive.activate();
        assert!(active.active);
    }

    #[test]
    fn targets_directly_compares_role() {
        let rule = SharingRule::try_new(config("emea", "accounts")).expect("valid rule");
        assert!(rule.targets_directly(rule.shared_to));
        assert!(!rule.targets_directly(RoleId::new()));
    }

    #[test]
    fn criteria_kind_is_flagged() {
        let mut cfg = config("big-deals", "opportunities");
        cfg.kind = RuleKind::CriteriaBased {
            criteria: serde_json::json!({"field": "amount", "op": ">", "value": 100_000}),
        };
        let rule = SharingRule::try_new(cfg).expect("valid rule");
        assert!(rule.kind.is_criteria_based());
    }

    #[test]
    fn serde_roundtrip_preserves_criteria_payload() {
        let mut cfg = config("big-deals", "opportunities");
        cfg.kind = RuleKind::CriteriaBased {
            criteria: serde_json::json!({"field": "stage", "op": "=", "value": "closed"}),
        };
        let rule = SharingRule::try_new(cfg).expect("valid rule");

        let json = serde_json::to_string(&rule).expect("serialize");
        let parsed: SharingRule = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, rule);
    }

    #[test]
    fn error_display_names_the_rule() {
        let err = RuleValidationError::EmptyObject {
            name: "emea".to_string(),
        };
        assert!(err.to_string().contains("emea"));
    }
}
