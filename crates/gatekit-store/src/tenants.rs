//! Organization and profile registries.
//!
//! Small administrative registries backing the tenant lifecycle:
//! organizations are created at onboarding and immutable afterwards
//! except for their activation flag; profiles are named permission
//! templates unique by (org, name).

use crate::StoreError;
use gatekit_types::{OrgId, ProfileId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// One organization row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgRecord {
    /// The organization's identity.
    pub id: OrgId,
    /// Display name.
    pub name: String,
    /// Suspended organizations keep their configuration but are
    /// refused at the door by the calling layers.
    pub active: bool,
}

/// Thread-safe organization registry.
#[derive(Debug, Default)]
pub struct OrgStore {
    inner: RwLock<HashMap<OrgId, OrgRecord>>,
}

impl OrgStore {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new organization, active by default.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the registry is inaccessible.
    pub fn create(&self, name: &str) -> Result<OrgId, StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned { context: "orgs" })?;
        let id = OrgId::new();
        map.insert(
            id,
            OrgRecord {
                id,
                name: name.to_string(),
                active: true,
            },
        );
        Ok(id)
    }

    /// Flips the activation flag — the only mutable field.
    ///
    /// # Errors
    ///
    /// - [`StoreError::UnknownOrg`] if the organization is not registered
    /// - [`StoreError::LockPoisoned`] if the registry is inaccessible
    pub fn set_active(&self, org: OrgId, active: bool) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned { context: "orgs" })?;
        let record = map.get_mut(&org).ok_or(StoreError::UnknownOrg { org })?;
        record.active = active;
        Ok(())
    }

    /// Removes an organization row.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the registry is inaccessible.
    pub fn remove(&self, org: OrgId) -> Result<Option<OrgRecord>, StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned { context: "orgs" })?;
        Ok(map.remove(&org))
    }

    /// Returns a copy of the organization row, if registered.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the registry is inaccessible.
    pub fn get(&self, org: OrgId) -> Result<Option<OrgRecord>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned { context: "orgs" })?;
        Ok(map.get(&org).cloned())
    }
}

/// One profile row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// The profile's identity.
    pub id: ProfileId,
    /// Organization the profile belongs to.
    pub org: OrgId,
    /// Template name, unique within the organization.
    pub name: String,
}

/// Thread-safe profile registry enforcing (org, name) uniqueness.
///
/// # Example
///
/// ```
/// use gatekit_store::ProfileStore;
/// use gatekit_types::OrgId;
///
/// let store = ProfileStore::new();
/// let org = OrgId::new();
///
/// let sales = store.create(org, "Sales").expect("create");
/// assert!(store.create(org, "Sales").is_err()); // duplicate name
/// assert!(store.get(sales).expect("get").is_some());
/// ```
#[derive(Debug, Default)]
pub struct ProfileStore {
    inner: RwLock<HashMap<ProfileId, ProfileRecord>>,
}

impl ProfileStore {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new profile.
    ///
    /// # Errors
    ///
    /// - [`StoreError::DuplicateProfileName`] if the organization
    ///   already has a profile with this name
    /// - [`StoreError::LockPoisoned`] if the registry is inaccessible
    pub fn create(&self, org: OrgId, name: &str) -> Result<ProfileId, StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned { context: "profiles" })?;

        if map.values().any(|p| p.org == org && p.name == name) {
            return Err(StoreError::DuplicateProfileName {
                org,
                name: name.to_string(),
            });
        }
        let id = ProfileId::new();
        map.insert(
            id,
            ProfileRecord {
                id,
                org,
                name: name.to_string(),
            },
        );
        Ok(id)
    }

    /// Removes a profile row.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the registry is inaccessible.
    pub fn remove(&self, profile: ProfileId) -> Result<Option<ProfileRecord>, StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned { context: "profiles" })?;
        Ok(map.remove(&profile))
    }

    /// Removes every profile of the given organization, returning
    /// their ids for downstream cascades.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the registry is inaccessible.
    pub fn remove_org(&self, org: OrgId) -> Result<Vec<ProfileId>, StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned { context: "profiles" })?;
        let removed: Vec<ProfileId> = map
            .values()
            .filter(|p| p.org == org)
            .map(|p| p.id)
            .collect();
        for id in &removed {
            map.remove(id);
        }
        Ok(removed)
    }

    /// Returns a copy of the profile row, if registered.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the registry is inaccessible.
    pub fn get(&self, profile: ProfileId) -> Result<Option<ProfileRecord>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned { context: "profiles" })?;
        Ok(map.get(&profile).cloned())
    }

    /// Returns the number of registered profiles.
    #[must_use]
    pub fn profile_count(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }
}
