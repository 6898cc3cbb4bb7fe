//! Record-level visibility resolution.
//!
//! Implements the fixed five-tier precedence that decides whether a
//! principal may see or mutate one specific record. The object-level
//! gate is **not** checked here — callers go through
//! [`AccessResolver`](crate::AccessResolver), which gates first and
//! only then consults this module.
//!
//! # Precedence
//!
//! First tier granting *sufficient* access wins; later tiers are only
//! consulted when earlier ones do not cover the needed level:
//!
//! | Tier | Grant | Covers |
//! |------|-------|--------|
//! | 1 | Ownership | read + write |
//! | 2 | Role hierarchy (ancestor of owner) | read + write |
//! | 3 | Org-wide default | per its level |
//! | 4 | Sharing rules (union of matches) | per folded level |
//! | 5 | Manual share | per its level |
//!
//! Nothing matching means no grant — deny-by-default.

use crate::{AccessData, AccessError, AccessLevel, RuleKind};
use gatekit_types::{Principal, RecordId, UserId};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A record identity plus its owner, as supplied by the storage layer.
///
/// The engine never sees record contents; these two identifiers are
/// all the sharing tiers need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef {
    /// The record being accessed.
    pub id: RecordId,
    /// The user who owns the record.
    pub owner: UserId,
}

impl RecordRef {
    /// Creates a record reference.
    #[must_use]
    pub fn new(id: RecordId, owner: UserId) -> Self {
        Self { id, owner }
    }
}

/// Which tier granted record-level access, for audit logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantSource {
    /// The principal owns the record.
    Ownership,
    /// The principal's role is an ancestor of the owner's role.
    RoleHierarchy,
    /// The organization-wide default covers the needed level.
    OrgDefault,
    /// One or more active sharing rules cover the needed level.
    SharingRule,
    /// A manual share on this record covers the needed level.
    ManualShare,
}

impl GrantSource {
    /// Returns the audit name of the tier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ownership => "ownership",
            Self::RoleHierarchy => "role_hierarchy",
            Self::OrgDefault => "org_default",
            Self::SharingRule => "sharing_rule",
            Self::ManualShare => "manual_share",
        }
    }
}

impl std::fmt::Display for GrantSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves whether `principal` holds `needed` access on `record`.
///
/// Returns the granting tier, or `None` when no tier grants enough.
/// Must only be called after the object-level gate has passed.
///
/// # Errors
///
/// Propagates integrity faults from the data traits: a corrupted
/// hierarchy ([`AccessError::RoleCycle`]), a reference to a missing
/// role ([`AccessError::DanglingRole`]), or an inaccessible store.
pub fn resolve_record<D>(
    data: &D,
    principal: &Principal,
    object: &str,
    record: &RecordRef,
    needed: AccessLevel,
) -> Result<Option<GrantSource>, AccessError>
where
    D: AccessData + ?Sized,
{
    // Tier 1: ownership. Covers both access levels.
    if principal.user == record.owner {
        return Ok(Some(GrantSource::Ownership));
    }

    // Tier 2: role-hierarchy escalation. A principal above the owner
    // in the role tree sees and manages the owner's records. An owner
    // without a role (or unknown to the directory) simply never
    // matches here.
    if let Some(principal_role) = principal.role {
        if let Some(owner_role) = data.role_of(record.owner)? {
            if data.is_ancestor(principal_role, owner_role)? {
                return Ok(Some(GrantSource::RoleHierarchy));
            }
        }
    }

    // Tier 3: org-wide default. Absent configuration behaves like
    // Private: grants nothing.
    if let Some(default) = data.default_for(principal.org, object)?.configured() {
        if default.grants(needed) {
            return Ok(Some(GrantSource::OrgDefault));
        }
    }

    // Tier 4: sharing rules. All matching active rules fold to their
    // strongest grant before the sufficiency check.
    if let Some(granted) = fold_rule_grants(data, principal, object)? {
        if granted.satisfies(needed) {
            return Ok(Some(GrantSource::SharingRule));
        }
    }

    // Tier 5: manual share on this exact record.
    if let Some(granted) = data.share_for(object, record.id, principal.user)? {
        if granted.satisfies(needed) {
            return Ok(Some(GrantSource::ManualShare));
        }
    }

    Ok(None)
}

/// Folds the grants of all active sharing rules matching `principal`
/// into the strongest one, or `None` when nothing matches.
///
/// A rule matches when it directly targets the principal's role, or
/// when `include_subordinates` is set and the principal's role sits
/// below the target. Criteria-based rules are skipped: their payloads
/// are not evaluated, and an unevaluated rule must not grant.
fn fold_rule_grants<D>(
    data: &D,
    principal: &Principal,
    object: &str,
) -> Result<Option<AccessLevel>, AccessError>
where
    D: AccessData + ?Sized,
{
    let Some(role) = principal.role else {
        // Rules are role-scoped; a principal without a role can only
        // be reached by manual shares or the org default.
        return Ok(None);
    };

    let mut granted: Option<AccessLevel> = None;
    for rule in data.rules_for(principal.org, object)? {
        if !rule.active {
            continue;
        }
        if let RuleKind::CriteriaBased { .. } = rule.kind {
            warn!(
                rule = %rule.name,
                object = %rule.object,
                "skipping criteria-based sharing rule: criteria evaluation is not supported"
            );
            continue;
        }

        let matches = rule.targets_directly(role)
            || (rule.include_subordinates && data.is_descendant(role, rule.shared_to)?);
        if matches {
            granted = Some(match granted {
                Some(existing) => existing.max(rule.access),
                None => rule.access,
            });
        }
    }
    Ok(granted)
}
