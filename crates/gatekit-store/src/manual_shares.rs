//! Thread-safe, in-memory manual share store.

use crate::StoreError;
use gatekit_auth::{AccessError, AccessLevel, ManualShares};
use gatekit_types::{RecordId, UserId};
use std::collections::HashMap;
use std::sync::RwLock;

/// Thread-safe, in-memory manual share table.
///
/// One grant per (object, record, grantee): granting again replaces
/// the stored access level rather than accumulating rows, so a
/// downgrade from `read_write` to `read` actually narrows access.
///
/// # Example
///
/// ```
/// use gatekit_auth::{AccessLevel, ManualShares};
/// use gatekit_store::ManualShareStore;
/// use gatekit_types::{RecordId, UserId};
///
/// let store = ManualShareStore::new();
/// let record = RecordId::new();
/// let grantee = UserId::new();
///
/// store.grant("accounts", record, grantee, AccessLevel::Read).expect("grant");
/// assert_eq!(
///     store.share_for("accounts", record, grantee).expect("lookup"),
///     Some(AccessLevel::Read)
/// );
///
/// // Another record of the same object stays inaccessible.
/// assert_eq!(
///     store.share_for("accounts", RecordId::new(), grantee).expect("lookup"),
///     None
/// );
/// ```
#[derive(Debug, Default)]
pub struct ManualShareStore {
    inner: RwLock<HashMap<(String, RecordId, UserId), AccessLevel>>,
}

impl ManualShareStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants (or replaces) access on one record for one user.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the store is inaccessible.
    pub fn grant(
        &self,
        object: &str,
        record: RecordId,
        grantee: UserId,
        access: AccessLevel,
    ) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned {
            context: "manual shares",
        })?;
        map.insert((object.to_string(), record, grantee), access);
        Ok(())
    }

    /// Revokes the grant on one record for one user.
    ///
    /// Returns the revoked access level, or `None` if no grant
    /// existed.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the store is inaccessible.
    pub fn revoke(
        &self,
        object: &str,
        record: RecordId,
        grantee: UserId,
    ) -> Result<Option<AccessLevel>, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned {
            context: "manual shares",
        })?;
        Ok(map.remove(&(object.to_string(), record, grantee)))
    }

    /// Removes every grant on the given record — used when the
    /// storage layer hard-deletes a record.
    ///
    /// Returns the number of grants removed.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the store is inaccessible.
    pub fn revoke_record(&self, object: &str, record: RecordId) -> Result<usize, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned {
            context: "manual shares",
        })?;
        let before = map.len();
        map.retain(|(o, r, _), _| !(o == object && *r == record));
        Ok(before - map.len())
    }

    /// Removes every grant held by the given user.
    ///
    /// Returns the number of grants removed.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the store is inaccessible.
    pub fn revoke_grantee(&self, grantee: UserId) -> Result<usize, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned {
            context: "manual shares",
        })?;
        let before = map.len();
        map.retain(|(_, _, g), _| *g != grantee);
        Ok(before - map.len())
    }

    /// Returns the number of stored grants.
    #[must_use]
    pub fn share_count(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }
}

impl ManualShares for ManualShareStore {
    fn share_for(
        &self,
        object: &str,
        record: RecordId,
        grantee: UserId,
    ) -> Result<Option<AccessLevel>, AccessError> {
        let map = self.inner.read().map_err(|_| AccessError::LockPoisoned {
            context: "manual shares",
        })?;
        Ok(map.get(&(object.to_string(), record, grantee)).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_has_no_grants() {
        let store = ManualShareStore::new();
        assert_eq!(store.share_count(), 0);
        assert_eq!(
            store
                .share_for("accounts", RecordId::new(), UserId::new())
                .expect("lookup"),
            None
        );
    }

    #[test]
    fn grant_is_scoped_to_one_record() {
        let store = ManualShareStore::new();
        let grantee = UserId::new();
        let r1 = RecordId::new();
        let r2 = RecordId::new();

        store
            .grant("accounts", r1, grantee, AccessLevel::ReadWrite)
            .expect("grant");

        assert_eq!(
            store.share_for("accounts", r1, grantee).expect("lookup"),
            Some(AccessLevel::ReadWrite)
        );
        assert_eq!(store.share_for("accounts", r2, grantee).expect("lookup"), None);
    }

    #[test]
    fn grant_is_scoped_to_one_object_namespace() {
        let store = ManualShareStore::new();
        let grantee = UserId::new();
        let record = RecordId::new();

        store
            .grant("accounts", record, grantee, AccessLevel::Read)
            .expect("grant");
        assert_eq!(
            store.share_for("invoices", record, grantee).expect("lookup"),
            None
        );
    }

    #[test]
    fn regrant_replaces_level() {
        let store = ManualShareStore::new();
        let grantee = UserId::new();
        let record = RecordId::new();

        store
            .grant("accounts", record, grantee, AccessLevel::ReadWrite)
            .expect("grant");
        store
            .grant("accounts", record, grantee, AccessLevel::Read)
            .expect("downgrade");

        assert_eq!(
            store.share_for("accounts", record, grantee).expect("lookup"),
            Some(AccessLevel::Read)
        );
        assert_eq!(store.share_count(), 1);
    }

    #[test]
    fn revoke_removes_the_grant() {
        let store = ManualShareStore::new();
        let grantee = UserId::new();
        let record = RecordId::new();

        store
            .grant("accounts", record, grantee, AccessLevel::Read)
            .expect("grant");
        let revoked = store.revoke("accounts", record, grantee).expect("revoke");
        assert_eq!(revoked, Some(AccessLevel::Read));
        assert_eq!(store.share_for("accounts", record, grantee).expect("lookup"), None);
    }

    #[test]
    fn revoke_nonexistent_is_none() {
        let store = ManualShareStore::new();
        let revoked = store
            .revoke("accounts", RecordId::new(), UserId::new())
            .expect("revoke");
        assert_eq!(revoked, None);
    }

    #[test]
    fn revoke_record_clears_all_grantees() {
        let store = ManualShareStore::new();
        let record = RecordId::new();

        store
            .grant("accounts", record, UserId::new(), AccessLevel::Read)
            .expect("grant");
        store
            .grant("accounts", record, UserId::new(), AccessLevel::ReadWrite)
            .expect("grant");
        store
            .grant("accounts", RecordId::new(), UserId::new(), AccessLevel::Read)
            .expect("grant");

        let removed = store.revoke_record("accounts", record).expect("cascade");
        assert_eq!(removed, 2);
        assert_eq!(store.share_count(), 1);
    }

    #[test]
    fn revoke_grantee_clears_all_records() {
        let store = ManualShareStore::new();
        let grantee = UserId::new();

        store
            .grant("accounts", RecordId::new(), grantee, AccessLevel::Read)
            .expect("grant");
        store
            .grant("invoices", RecordId::new(), grantee, AccessLevel::Read)
            .expect("grant");
        store
            .grant("accounts", RecordId::new(), UserId::new(), AccessLevel::Read)
            .expect("grant");

        let removed = store.revoke_grantee(grantee).expect("cascade");
        assert_eq!(removed, 2);
        assert_eq!(store.share_count(), 1);
    }
}
