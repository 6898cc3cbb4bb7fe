//! The combined policy directory.
//!
//! [`Directory`] bundles every store the resolver reads through and
//! owns the cross-store administrative operations — the cascading
//! deletes that keep permission and sharing rows from dangling when a
//! profile, role, or organization goes away.
//!
//! # Architecture
//!
//! ```text
//! gatekit-auth (traits + decision logic)
//!     RoleGraph, ObjectPermissions, OrgDefaults,
//!     SharingRules, ManualShares, UserDirectory
//!         ↓ implemented by
//! Directory (THIS MODULE)
//!     OrgStore + ProfileStore + RoleStore + PermissionStore
//!     + OrgDefaultStore + SharingRuleStore + ManualShareStore
//!     + UserStore
//! ```
//!
//! The resolver only ever reads; every mutation below is an
//! administrative write path.

use crate::{
    ManualShareStore, OrgDefaultStore, OrgStore, PermissionStore, ProfileStore, RoleStore,
    SharingRuleStore, StoreError, UserStore,
};
use gatekit_auth::{
    AccessError, AccessLevel, FieldGrants, GrantLookup, ManualShares, ObjectGrants,
    ObjectPermissions, OrgDefault, OrgDefaults, RoleGraph, SharingRule, SharingRules,
    UserDirectory,
};
use gatekit_types::{OrgId, ProfileId, RecordId, RoleId, UserId};
use std::collections::BTreeSet;
use tracing::debug;

/// Every store the access engine needs, in one bundle.
///
/// All stores use interior mutability, so a shared `&Directory` (or
/// an `AccessResolver` holding one) supports concurrent resolution
/// and administration without external locking.
///
/// # Example
///
/// ```
/// use gatekit_auth::{AccessResolver, Action, ObjectGrants, Principal};
/// use gatekit_store::Directory;
/// use gatekit_types::UserId;
///
/// let directory = Directory::new();
/// let org = directory.orgs().create("Acme").expect("org");
/// let sales = directory.profiles().create(org, "Sales").expect("profile");
/// directory
///     .permissions()
///     .set_object_grants(sales, "accounts", ObjectGrants::read_only())
///     .expect("grants");
///
/// let resolver = AccessResolver::new(directory);
/// let principal = Principal::new(UserId::new(), org, sales);
///
/// let decision = resolver
///     .authorize(&principal, "accounts", Action::Read)
///     .expect("resolve");
/// assert!(decision.is_allowed());
/// ```
#[derive(Debug, Default)]
pub struct Directory {
    orgs: OrgStore,
    profiles: ProfileStore,
    roles: RoleStore,
    permissions: PermissionStore,
    defaults: OrgDefaultStore,
    rules: SharingRuleStore,
    shares: ManualShareStore,
    users: UserStore,
}

impl Directory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The organization registry.
    #[must_use]
    pub fn orgs(&self) -> &OrgStore {
        &self.orgs
    }

    /// The profile registry.
    #[must_use]
    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    /// The role hierarchy store.
    #[must_use]
    pub fn roles(&self) -> &RoleStore {
        &self.roles
    }

    /// The object/field permission store.
    #[must_use]
    pub fn permissions(&self) -> &PermissionStore {
        &self.permissions
    }

    /// The org-wide default store.
    #[must_use]
    pub fn defaults(&self) -> &OrgDefaultStore {
        &self.defaults
    }

    /// The sharing rule store.
    #[must_use]
    pub fn rules(&self) -> &SharingRuleStore {
        &self.rules
    }

    /// The manual share store.
    #[must_use]
    pub fn shares(&self) -> &ManualShareStore {
        &self.shares
    }

    /// The user registry.
    #[must_use]
    pub fn users(&self) -> &UserStore {
        &self.users
    }

    /// Deletes a profile and every permission row that referenced it.
    ///
    /// # Errors
    ///
    /// - [`StoreError::UnknownProfile`] if the profile is not registered
    /// - [`StoreError::LockPoisoned`] if a store is inaccessible
    pub fn delete_profile(&self, profile: ProfileId) -> Result<(), StoreError> {
        if self.profiles.remove(profile)?.is_none() {
            return Err(StoreError::UnknownProfile { profile });
        }
        let rows = self.permissions.remove_profile(profile)?;
        debug!(%profile, rows, "deleted profile and cascaded permission rows");
        Ok(())
    }

    /// Deletes a role: splices its children onto its parent, removes
    /// sharing rules targeting it, and clears user role references.
    ///
    /// # Errors
    ///
    /// - [`StoreError::UnknownRole`] if the role is not registered
    /// - [`StoreError::LockPoisoned`] if a store is inaccessible
    pub fn delete_role(&self, role: RoleId) -> Result<(), StoreError> {
        if self.roles.remove(role)?.is_none() {
            return Err(StoreError::UnknownRole { role });
        }
        let rules = self.rules.remove_rules_targeting(role)?;
        let users = self.users.clear_role_references(role)?;
        debug!(%role, rules, users, "deleted role and cascaded dependents");
        Ok(())
    }

    /// Deletes an organization and everything scoped to it: roles,
    /// profiles (with their permission rows), org defaults, sharing
    /// rules, and users.
    ///
    /// Manual shares are record-scoped, not org-scoped; the storage
    /// layer deletes them alongside the records themselves.
    ///
    /// # Errors
    ///
    /// - [`StoreError::UnknownOrg`] if the organization is not registered
    /// - [`StoreError::LockPoisoned`] if a store is inaccessible
    pub fn delete_org(&self, org: OrgId) -> Result<(), StoreError> {
        if self.orgs.remove(org)?.is_none() {
            return Err(StoreError::UnknownOrg { org });
        }

        let roles = self.roles.remove_org(org)?;
        for role in &roles {
            self.rules.remove_rules_targeting(*role)?;
        }
        let profiles = self.profiles.remove_org(org)?;
        for profile in &profiles {
            self.permissions.remove_profile(*profile)?;
        }
        let defaults = self.defaults.remove_org(org)?;
        let rules = self.rules.remove_org(org)?;
        let users = self.users.remove_org(org)?;
        debug!(
            %org,
            roles = roles.len(),
            profiles = profiles.len(),
            defaults,
            rules,
            users,
            "deleted organization and cascaded dependents"
        );
        Ok(())
    }
}

// ─── Data trait delegation ──────────────────────────────────────────

impl RoleGraph for Directory {
    fn is_ancestor(&self, candidate: RoleId, role: RoleId) -> Result<bool, AccessError> {
        self.roles.is_ancestor(candidate, role)
    }
}

impl ObjectPermissions for Directory {
    fn object_grants(
        &self,
        profile: ProfileId,
        object: &str,
    ) -> Result<GrantLookup<ObjectGrants>, AccessError> {
        self.permissions.object_grants(profile, object)
    }

    fn field_grants(
        &self,
        profile: ProfileId,
        object: &str,
        field: &str,
    ) -> Result<GrantLookup<FieldGrants>, AccessError> {
        self.permissions.field_grants(profile, object, field)
    }

    fn visible_fields(
        &self,
        profile: ProfileId,
        object: &str,
    ) -> Result<BTreeSet<String>, AccessError> {
        self.permissions.visible_fields(profile, object)
    }
}

impl OrgDefaults for Directory {
    fn default_for(
        &self,
        org: OrgId,
        object: &str,
    ) -> Result<GrantLookup<OrgDefault>, AccessError> {
        self.defaults.default_for(org, object)
    }
}

impl SharingRules for Directory {
    fn rules_for(&self, org: OrgId, object: &str) -> Result<Vec<SharingRule>, AccessError> {
        self.rules.rules_for(org, object)
    }
}

impl ManualShares for Directory {
    fn share_for(
        &self,
        object: &str,
        record: RecordId,
        grantee: UserId,
    ) -> Result<Option<AccessLevel>, AccessError> {
        self.shares.share_for(object, record, grantee)
    }
}

impl UserDirectory for Directory {
    fn role_of(&self, user: UserId) -> Result<Option<RoleId>, AccessError> {
        self.users.role_of(user)
    }
}
