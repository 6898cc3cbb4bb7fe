//! Data-access traits the resolver reads through.
//!
//! Trait definitions live here; concrete implementations live in
//! `gatekit-store`. This keeps the decision logic runtime-independent:
//! it can resolve against in-memory maps in tests and against an
//! indexed database snapshot in production without changing.
//!
//! # Architecture
//!
//! ```text
//! RoleGraph / ObjectPermissions / OrgDefaults /      ← trait definitions
//! SharingRules / ManualShares / UserDirectory          (THIS MODULE)
//!          │
//!          └── Directory (gatekit-store)             ← concrete impls
//! ```
//!
//! Every method returns `Result` so implementations can surface
//! integrity faults ([`AccessError`]) instead of quietly denying.
//! All reads are snapshot reads: the resolver never writes.

use crate::{
    AccessError, AccessLevel, Action, FieldGrants, FieldMode, GrantLookup, ObjectGrants,
    OrgDefault, SharingRule,
};
use gatekit_types::{OrgId, ProfileId, RecordId, RoleId, UserId};
use std::collections::BTreeSet;

/// Ancestor/descendant queries over an organization's role hierarchy.
///
/// # Contract
///
/// - A role is **not** its own ancestor or descendant.
/// - Walks must be bounded: a cycle in stored data surfaces
///   [`AccessError::RoleCycle`], never an unbounded loop.
/// - Queries on unknown roles surface [`AccessError::DanglingRole`].
pub trait RoleGraph: Send + Sync {
    /// Returns `true` if `candidate` is reachable by repeatedly
    /// following `role`'s parent pointer.
    ///
    /// # Errors
    ///
    /// [`AccessError::RoleCycle`] if the walk revisits a node;
    /// [`AccessError::DanglingRole`] if either role is unknown.
    fn is_ancestor(&self, candidate: RoleId, role: RoleId) -> Result<bool, AccessError>;

    /// Returns `true` if `candidate` sits below `role` in the
    /// hierarchy. Symmetric to [`is_ancestor`](Self::is_ancestor);
    /// used to expand `include_subordinates` sharing rules.
    ///
    /// # Errors
    ///
    /// Same as [`is_ancestor`](Self::is_ancestor).
    fn is_descendant(&self, candidate: RoleId, role: RoleId) -> Result<bool, AccessError> {
        self.is_ancestor(role, candidate)
    }
}

/// Profile-keyed object and field permission lookups.
///
/// Absence of a row is a normal outcome, reported through
/// [`GrantLookup`] so audit can distinguish "explicitly all-false"
/// from "not configured". Both resolve to deny.
pub trait ObjectPermissions: Send + Sync {
    /// Looks up the object-level grant row for (profile, object).
    ///
    /// # Errors
    ///
    /// [`AccessError::LockPoisoned`] if the backing store is
    /// inaccessible.
    fn object_grants(
        &self,
        profile: ProfileId,
        object: &str,
    ) -> Result<GrantLookup<ObjectGrants>, AccessError>;

    /// Looks up the field-level grant row for (profile, object, field).
    ///
    /// # Errors
    ///
    /// [`AccessError::LockPoisoned`] if the backing store is
    /// inaccessible.
    fn field_grants(
        &self,
        profile: ProfileId,
        object: &str,
        field: &str,
    ) -> Result<GrantLookup<FieldGrants>, AccessError>;

    /// Returns the set of fields of `object` the profile may read.
    ///
    /// Callers intersect this with a projection before returning data.
    ///
    /// # Errors
    ///
    /// [`AccessError::LockPoisoned`] if the backing store is
    /// inaccessible.
    fn visible_fields(
        &self,
        profile: ProfileId,
        object: &str,
    ) -> Result<BTreeSet<String>, AccessError>;

    /// Returns whether the profile holds the given object-level action.
    ///
    /// Deny-by-default: an absent row answers `false` for all four
    /// actions.
    ///
    /// # Errors
    ///
    /// Propagates [`object_grants`](Self::object_grants) errors.
    fn can_perform(
        &self,
        profile: ProfileId,
        object: &str,
        action: Action,
    ) -> Result<bool, AccessError> {
        Ok(self
            .object_grants(profile, object)?
            .configured()
            .map(|grants| grants.allows(action))
            .unwrap_or(false))
    }

    /// Returns whether the profile holds the given field-level mode.
    ///
    /// Deny-by-default: an absent row answers `false` for both modes.
    ///
    /// # Errors
    ///
    /// Propagates [`field_grants`](Self::field_grants) errors.
    fn can_access_field(
        &self,
        profile: ProfileId,
        object: &str,
        field: &str,
        mode: FieldMode,
    ) -> Result<bool, AccessError> {
        Ok(self
            .field_grants(profile, object, field)?
            .configured()
            .map(|grants| grants.allows(mode))
            .unwrap_or(false))
    }
}

/// Per-organization, per-object default visibility lookups.
pub trait OrgDefaults: Send + Sync {
    /// Looks up the org-wide default for (org, object).
    ///
    /// Absence behaves like [`OrgDefault::Private`] at decision time
    /// but is reported distinctly for audit.
    ///
    /// # Errors
    ///
    /// [`AccessError::LockPoisoned`] if the backing store is
    /// inaccessible.
    fn default_for(
        &self,
        org: OrgId,
        object: &str,
    ) -> Result<GrantLookup<OrgDefault>, AccessError>;
}

/// Sharing-rule enumeration for one (org, object) pair.
pub trait SharingRules: Send + Sync {
    /// Returns all rules stored for (org, object), active or not.
    ///
    /// The resolver filters on `active` itself so audit can count
    /// suspended rules that would otherwise have matched.
    ///
    /// # Errors
    ///
    /// [`AccessError::LockPoisoned`] if the backing store is
    /// inaccessible.
    fn rules_for(&self, org: OrgId, object: &str) -> Result<Vec<SharingRule>, AccessError>;
}

/// Per-record manual grant lookups.
pub trait ManualShares: Send + Sync {
    /// Returns the manual grant stored for (object, record, grantee),
    /// if any. At most one grant exists per grantee per record.
    ///
    /// # Errors
    ///
    /// [`AccessError::LockPoisoned`] if the backing store is
    /// inaccessible.
    fn share_for(
        &self,
        object: &str,
        record: RecordId,
        grantee: UserId,
    ) -> Result<Option<AccessLevel>, AccessError>;
}

/// Record-owner role resolution.
///
/// The storage layer hands the resolver a record's *owner id*; the
/// hierarchy tier needs the owner's *role*. Identity data is owned by
/// the external layer, so an unknown user resolves to `None` (the
/// tier simply does not match) rather than an integrity fault.
pub trait UserDirectory: Send + Sync {
    /// Returns the role of the given user, if the user is known and
    /// has one.
    ///
    /// # Errors
    ///
    /// [`AccessError::LockPoisoned`] if the backing store is
    /// inaccessible.
    fn role_of(&self, user: UserId) -> Result<Option<RoleId>, AccessError>;
}

/// Everything the resolver needs, bundled.
///
/// Blanket-implemented for any type implementing the six data traits;
/// `Directory` in `gatekit-store` is the standard implementation.
pub trait AccessData:
    RoleGraph + ObjectPermissions + OrgDefaults + SharingRules + ManualShares + UserDirectory
{
}

impl<T> AccessData for T where
    T: RoleGraph + ObjectPermissions + OrgDefaults + SharingRules + ManualShares + UserDirectory
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    // ─── Mock ObjectPermissions ─────────────────────────────────────

    /// In-memory mock for contract testing the provided methods.
    struct MockPermissions {
        objects: HashMap<(ProfileId, String), ObjectGrants>,
        fields: HashMap<(ProfileId, String, String), FieldGrants>,
    }

    impl MockPermissions {
        fn new() -> Self {
            Self {
                objects: HashMap::new(),
                fields: HashMap::new(),
            }
        }
    }

    impl ObjectPermissions for MockPermissions {
        fn object_grants(
            &self,
            profile: ProfileId,
            object: &str,
        ) -> Result<GrantLookup<ObjectGrants>, AccessError> {
            Ok(self
                .objects
                .get(&(profile, object.to_string()))
                .copied()
                .into())
        }

        fn field_grants(
            &self,
            profile: ProfileId,
            object: &str,
            field: &str,
        ) -> Result<GrantLookup<FieldGrants>, AccessError> {
            Ok(self
                .fields
                .get(&(profile, object.to_string(), field.to_string()))
                .copied()
                .into())
        }

        fn visible_fields(
            &self,
            profile: ProfileId,
            object: &str,
        ) -> Result<BTreeSet<String>, AccessError> {
            Ok(self
                .fields
                .iter()
                .filter(|((p, o, _), grants)| *p == profile && o == object && grants.read)
                .map(|((_, _, f), _)| f.clone())
                .collect())
        }
    }

    // ─── Contract Tests ─────────────────────────────────────────────

    #[test]
    fn can_perform_denies_on_absent_row() {
        let perms = MockPermissions::new();
        let profile = ProfileId::new();

        for action in Action::ALL {
            let allowed = perms
                .can_perform(profile, "invoices", action)
                .expect("lookup");
            assert!(!allowed, "absent row must deny {action}");
        }
    }

    #[test]
    fn can_perform_reads_configured_row() {
        let mut perms = MockPermissions::new();
        let profile = ProfileId::new();
        perms.objects.insert(
            (profile, "invoices".to_string()),
            ObjectGrants::read_only(),
        );

        assert!(perms
            .can_perform(profile, "invoices", Action::Read)
            .expect("lookup"));
        assert!(!perms
            .can_perform(profile, "invoices", Action::Delete)
            .expect("lookup"));
    }

    #[test]
    fn can_access_field_denies_on_absent_row() {
        let perms = MockPermissions::new();
        let profile = ProfileId::new();

        assert!(!perms
            .can_access_field(profile, "invoices", "amount", FieldMode::Read)
            .expect("lookup"));
        assert!(!perms
            .can_access_field(profile, "invoices", "amount", FieldMode::Edit)
            .expect("lookup"));
    }

    #[test]
    fn visible_fields_only_includes_readable() {
        let mut perms = MockPermissions::new();
        let profile = ProfileId::new();
        perms.fields.insert(
            (profile, "invoices".to_string(), "amount".to_string()),
            FieldGrants::read_only(),
        );
        perms.fields.insert(
            (profile, "invoices".to_string(), "margin".to_string()),
            FieldGrants::default(),
        );

        let visible = perms.visible_fields(profile, "invoices").expect("lookup");
        assert!(visible.contains("amount"));
        assert!(!visible.contains("margin"));
    }

    #[test]
    fn default_is_descendant_mirrors_is_ancestor() {
        struct OneEdge {
            parent: RoleId,
            child: RoleId,
        }

        impl RoleGraph for OneEdge {
            fn is_ancestor(&self, candidate: RoleId, role: RoleId) -> Result<bool, AccessError> {
                Ok(candidate == self.parent && role == self.child)
            }
        }

        let graph = OneEdge {
            parent: RoleId::new(),
            child: RoleId::new(),
        };

        assert!(graph
            .is_descendant(graph.child, graph.parent)
            .expect("walk"));
        assert!(!graph
            .is_descendant(graph.parent, graph.child)
            .expect("walk"));
    }

    #[test]
    fn trait_object_box_dyn() {
        let perms: Box<dyn ObjectPermissions> = Box::new(MockPermissions::new());
        let profile = ProfileId::new();
        assert!(!perms
            .can_perform(profile, "invoices", Action::Read)
            .expect("lookup"));
    }
}
