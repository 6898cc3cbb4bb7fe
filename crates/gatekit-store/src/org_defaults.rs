//! Thread-safe, in-memory org-wide default store.

use crate::StoreError;
use gatekit_auth::{AccessError, GrantLookup, OrgDefault, OrgDefaults};
use gatekit_types::OrgId;
use std::collections::HashMap;
use std::sync::RwLock;

/// Thread-safe, in-memory org-wide default visibility table.
///
/// One row per (org, object). Absence behaves like
/// [`OrgDefault::Private`] at decision time and is reported as
/// [`GrantLookup::Absent`] for audit.
///
/// # Example
///
/// ```
/// use gatekit_auth::{OrgDefault, OrgDefaults};
/// use gatekit_store::OrgDefaultStore;
/// use gatekit_types::OrgId;
///
/// let store = OrgDefaultStore::new();
/// let org = OrgId::new();
///
/// assert!(store.default_for(org, "accounts").expect("lookup").is_absent());
///
/// store.set_default(org, "accounts", OrgDefault::PublicReadOnly).expect("write");
/// assert_eq!(
///     store.default_for(org, "accounts").expect("lookup").configured(),
///     Some(OrgDefault::PublicReadOnly)
/// );
/// ```
#[derive(Debug, Default)]
pub struct OrgDefaultStore {
    inner: RwLock<HashMap<(OrgId, String), OrgDefault>>,
}

impl OrgDefaultStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets (or replaces) the default for (org, object).
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the store is inaccessible.
    pub fn set_default(
        &self,
        org: OrgId,
        object: &str,
        default: OrgDefault,
    ) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned {
            context: "org defaults",
        })?;
        map.insert((org, object.to_string()), default);
        Ok(())
    }

    /// Removes the default for (org, object), returning to the
    /// "not configured" state.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the store is inaccessible.
    pub fn clear_default(&self, org: OrgId, object: &str) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned {
            context: "org defaults",
        })?;
        map.remove(&(org, object.to_string()));
        Ok(())
    }

    /// Removes every default of the given organization.
    ///
    /// Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the store is inaccessible.
    pub fn remove_org(&self, org: OrgId) -> Result<usize, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned {
            context: "org defaults",
        })?;
        let before = map.len();
        map.retain(|(o, _), _| *o != org);
        Ok(before - map.len())
    }

    /// Returns the number of configured rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }
}

impl OrgDefaults for OrgDefaultStore {
    fn default_for(
        &self,
        org: OrgId,
        object: &str,
    ) -> Result<GrantLookup<OrgDefault>, AccessError> {
        let map = self.inner.read().map_err(|_| AccessError::LockPoisoned {
            context: "org defaults",
        })?;
        Ok(map.get(&(org, object.to_string())).copied().into())
    }
}
