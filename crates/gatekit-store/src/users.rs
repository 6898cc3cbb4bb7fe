//! Thread-safe, in-memory user registry.
//!
//! Identity is owned by the external authentication layer; this
//! registry mirrors just enough of it for the engine's own needs —
//! resolving a record *owner's* role for the hierarchy tier, which
//! claims alone cannot answer.

use crate::StoreError;
use gatekit_auth::{AccessError, UserDirectory};
use gatekit_types::{OrgId, ProfileId, RoleId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// One mirrored user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// The user's identity.
    pub id: UserId,
    /// Organization the user belongs to.
    pub org: OrgId,
    /// The user's permission template.
    pub profile: ProfileId,
    /// The user's role, if assigned.
    pub role: Option<RoleId>,
}

/// Thread-safe, in-memory user registry.
///
/// # Example
///
/// ```
/// use gatekit_auth::UserDirectory;
/// use gatekit_store::{UserRecord, UserStore};
/// use gatekit_types::{OrgId, ProfileId, RoleId, UserId};
///
/// let store = UserStore::new();
/// let rep = UserId::new();
/// let rep_role = RoleId::new();
///
/// store.upsert(UserRecord {
///     id: rep,
///     org: OrgId::new(),
///     profile: ProfileId::new(),
///     role: Some(rep_role),
/// })
/// .expect("register");
///
/// assert_eq!(store.role_of(rep).expect("lookup"), Some(rep_role));
/// assert_eq!(store.role_of(UserId::new()).expect("lookup"), None);
/// ```
#[derive(Debug, Default)]
pub struct UserStore {
    inner: RwLock<HashMap<UserId, UserRecord>>,
}

impl UserStore {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a user row.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the registry is inaccessible.
    pub fn upsert(&self, record: UserRecord) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned { context: "users" })?;
        map.insert(record.id, record);
        Ok(())
    }

    /// Reassigns a user's role.
    ///
    /// # Errors
    ///
    /// - [`StoreError::UnknownRole`] is *not* checked here — the
    ///   registry mirrors external identity data verbatim
    /// - [`StoreError::LockPoisoned`] if the registry is inaccessible
    pub fn assign_role(&self, user: UserId, role: Option<RoleId>) -> Result<bool, StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned { context: "users" })?;
        match map.get_mut(&user) {
            Some(record) => {
                record.role = role;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes a user row.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the registry is inaccessible.
    pub fn remove(&self, user: UserId) -> Result<Option<UserRecord>, StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned { context: "users" })?;
        Ok(map.remove(&user))
    }

    /// Clears the role field of every user holding the given role —
    /// the cascade half of role deletion.
    ///
    /// Returns the number of users affected.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the registry is inaccessible.
    pub fn clear_role_references(&self, role: RoleId) -> Result<usize, StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned { context: "users" })?;
        let mut affected = 0;
        for record in map.values_mut() {
            if record.role == Some(role) {
                record.role = None;
                affected += 1;
            }
        }
        Ok(affected)
    }

    /// Removes every user of the given organization.
    ///
    /// Returns the number of users removed.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the registry is inaccessible.
    pub fn remove_org(&self, org: OrgId) -> Result<usize, StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned { context: "users" })?;
        let before = map.len();
        map.retain(|_, record| record.org != org);
        Ok(before - map.len())
    }

    /// Returns a copy of the user row, if registered.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the registry is inaccessible.
    pub fn get(&self, user: UserId) -> Result<Option<UserRecord>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned { context: "users" })?;
        Ok(map.get(&user).copied())
    }

    /// Returns the number of registered users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }
}

impl UserDirectory for UserStore {
    fn role_of(&self, user: UserId) -> Result<Option<RoleId>, AccessError> {
        let map = self
            .inner
            .read()
            .map_err(|_| AccessError::LockPoisoned { context: "users" })?;
        Ok(map.get(&user).and_then(|record| record.role))
    }
}
