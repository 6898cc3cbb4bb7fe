//! Thread-safe, in-memory profile permission store.
//!
//! Two sparse tables behind `RwLock`: object-level CRUD grants keyed
//! by (profile, object) and field-level grants keyed by (profile,
//! object, field). A missing key means "not configured", which the
//! read side reports as [`GrantLookup::Absent`] — deny, but
//! distinguishable from an explicit all-false row.

use crate::StoreError;
use gatekit_auth::{
    AccessError, FieldGrants, GrantLookup, ObjectGrants, ObjectPermissions,
};
use gatekit_types::ProfileId;
use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

/// Thread-safe, in-memory permission tables for profiles.
///
/// # Example
///
/// ```
/// use gatekit_auth::{Action, ObjectGrants, ObjectPermissions};
/// use gatekit_store::PermissionStore;
/// use gatekit_types::ProfileId;
///
/// let store = PermissionStore::new();
/// let sales = ProfileId::new();
///
/// // Nothing configured: every action denies.
/// assert!(!store.can_perform(sales, "accounts", Action::Read).expect("lookup"));
///
/// store.set_object_grants(sales, "accounts", ObjectGrants::read_only()).expect("write");
/// assert!(store.can_perform(sales, "accounts", Action::Read).expect("lookup"));
/// assert!(!store.can_perform(sales, "accounts", Action::Delete).expect("lookup"));
/// ```
#[derive(Debug, Default)]
pub struct PermissionStore {
    /// Object-level grants keyed by (profile, object).
    objects: RwLock<HashMap<(ProfileId, String), ObjectGrants>>,
    /// Field-level grants keyed by (profile, object, field).
    fields: RwLock<HashMap<(ProfileId, String, String), FieldGrants>>,
}

impl PermissionStore {
    /// Creates a new empty permission store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets (or replaces) the object-level grant row for
    /// (profile, object). The (profile, object) key is unique, so this
    /// is an upsert.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the store is inaccessible.
    pub fn set_object_grants(
        &self,
        profile: ProfileId,
        object: &str,
        grants: ObjectGrants,
    ) -> Result<(), StoreError> {
        let mut map = self.objects.write().map_err(|_| StoreError::LockPoisoned {
            context: "object permissions",
        })?;
        map.insert((profile, object.to_string()), grants);
        Ok(())
    }

    /// Removes the object-level grant row, returning to the
    /// "not configured" state.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the store is inaccessible.
    pub fn clear_object_grants(&self, profile: ProfileId, object: &str) -> Result<(), StoreError> {
        let mut map = self.objects.write().map_err(|_| StoreError::LockPoisoned {
            context: "object permissions",
        })?;
        map.remove(&(profile, object.to_string()));
        Ok(())
    }

    /// Sets (or replaces) the field-level grant row for
    /// (profile, object, field).
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the store is inaccessible.
    pub fn set_field_grants(
        &self,
        profile: ProfileId,
        object: &str,
        field: &str,
        grants: FieldGrants,
    ) -> Result<(), StoreError> {
        let mut map = self.fields.write().map_err(|_| StoreError::LockPoisoned {
            context: "field permissions",
        })?;
        map.insert((profile, object.to_string(), field.to_string()), grants);
        Ok(())
    }

    /// Removes the field-level grant row.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the store is inaccessible.
    pub fn clear_field_grants(
        &self,
        profile: ProfileId,
        object: &str,
        field: &str,
    ) -> Result<(), StoreError> {
        let mut map = self.fields.write().map_err(|_| StoreError::LockPoisoned {
            context: "field permissions",
        })?;
        map.remove(&(profile, object.to_string(), field.to_string()));
        Ok(())
    }

    /// Removes every permission row of the given profile — the
    /// cascade half of profile deletion.
    ///
    /// Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the store is inaccessible.
    pub fn remove_profile(&self, profile: ProfileId) -> Result<usize, StoreError> {
        let mut objects = self.objects.write().map_err(|_| StoreError::LockPoisoned {
            context: "object permissions",
        })?;
        let mut fields = self.fields.write().map_err(|_| StoreError::LockPoisoned {
            context: "field permissions",
        })?;

        let before = objects.len() + fields.len();
        objects.retain(|(p, _), _| *p != profile);
        fields.retain(|(p, _, _), _| *p != profile);
        Ok(before - (objects.len() + fields.len()))
    }

    /// Returns the number of configured rows (object + field).
    #[must_use]
    pub fn row_count(&self) -> usize {
        let objects = self.objects.read().map(|m| m.len()).unwrap_or(0);
        let fields = self.fields.read().map(|m| m.len()).unwrap_or(0);
        objects + fields
    }
}

impl ObjectPermissions for PermissionStore {
    fn object_grants(
        &self,
        profile: ProfileId,
        object: &str,
    ) -> Result<GrantLookup<ObjectGrants>, AccessError> {
        let map = self.objects.read().map_err(|_| AccessError::LockPoisoned {
            context: "object permissions",
        })?;
        Ok(map.get(&(profile, object.to_string())).copied().into())
    }

    fn field_grants(
        &self,
        profile: ProfileId,
        object: &str,
        field: &str,
    ) -> Result<GrantLookup<FieldGrants>, AccessError> {
        let map = self.fields.read().map_err(|_| AccessError::LockPoisoned {
            context: "field permissions",
        })?;
        Ok(map
            .get(&(profile, object.to_string(), field.to_string()))
            .copied()
            .into())
    }

    fn visible_fields(
        &self,
        profile: ProfileId,
        object: &str,
    ) -> Result<BTreeSet<String>, AccessError> {
        let map = self.fields.read().map_err(|_| AccessError::LockPoisoned {
            context: "field permissions",
        })?;
        Ok(map
            .iter()
            .filter(|((p, o, _), grants)| *p == profile && o == object && grants.read)
            .map(|((_, _, field), _)| field.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatekit_auth::{Action, FieldMode};

    #[test]
    fn new_store_denies_everything() {
        let store = PermissionStore::new();
        let profile = ProfileId::new();

        for action in Action::ALL {
            assert!(!store
                .can_perform(profile, "accounts", action)
                .expect("lookup"));
        }
        assert!(!store
            .can_access_field(profile, "accounts", "name", FieldMode::Read)
            .expect("lookup"));
        assert_eq!(store.row_count(), 0);
    }

    #[test]
    fn absent_row_reports_absent_not_all_false() {
        let store = PermissionStore::new();
        let profile = ProfileId::new();

        assert!(store
            .object_grants(profile, "accounts")
            .expect("lookup")
            .is_absent());

        store
            .set_object_grants(profile, "accounts", ObjectGrants::none())
            .expect("write");
        assert!(store
            .object_grants(profile, "accounts")
            .expect("lookup")
            .is_configured());
    }

    #[test]
    fn object_grants_upsert_replaces() {
        let store = PermissionStore::new();
        let profile = ProfileId::new();

        store
            .set_object_grants(profile, "accounts", ObjectGrants::read_only())
            .expect("write");
        store
            .set_object_grants(profile, "accounts", ObjectGrants::full())
            .expect("write");

        assert!(store
            .can_perform(profile, "accounts", Action::Delete)
            .expect("lookup"));
        assert_eq!(store.row_count(), 1);
    }

    #[test]
    fn clearing_returns_to_absent() {
        let store = PermissionStore::new();
        let profile = ProfileId::new();

        store
            .set_object_grants(profile, "accounts", ObjectGrants::full())
            .expect("write");
        store
            .clear_object_grants(profile, "accounts")
            .expect("clear");

        assert!(store
            .object_grants(profile, "accounts")
            .expect("lookup")
            .is_absent());
    }

    #[test]
    fn field_grants_independent_of_object_grants() {
        let store = PermissionStore::new();
        let profile = ProfileId::new();

        store
            .set_object_grants(profile, "accounts", ObjectGrants::full())
            .expect("write");

        // Full object grants imply nothing at field level.
        assert!(!store
            .can_access_field(profile, "accounts", "revenue", FieldMode::Read)
            .expect("lookup"));

        store
            .set_field_grants(profile, "accounts", "revenue", FieldGrants::read_only())
            .expect("write");
        assert!(store
            .can_access_field(profile, "accounts", "revenue", FieldMode::Read)
            .expect("lookup"));
        assert!(!store
            .can_access_field(profile, "accounts", "revenue", FieldMode::Edit)
            .expect("lookup"));
    }

    #[test]
    fn visible_fields_scoped_to_profile_and_object() {
        let store = PermissionStore::new();
        let sales = ProfileId::new();
        let support = ProfileId::new();

        store
            .set_field_grants(sales, "accounts", "name", FieldGrants::read_write())
            .expect("write");
        store
            .set_field_grants(sales, "accounts", "ssn", FieldGrants::default())
            .expect("write");
        store
            .set_field_grants(sales, "invoices", "amount", FieldGrants::read_only())
            .expect("write");
        store
            .set_field_grants(support, "accounts", "tier", FieldGrants::read_only())
            .expect("write");

        let visible = store.visible_fields(sales, "accounts").expect("lookup");
        assert_eq!(visible, BTreeSet::from(["name".to_string()]));
    }

    #[test]
    fn remove_profile_cascades_both_tables() {
        let store = PermissionStore::new();
        let doomed = ProfileId::new();
        let survivor = ProfileId::new();

        store
            .set_object_grants(doomed, "accounts", ObjectGrants::full())
            .expect("write");
        store
            .set_field_grants(doomed, "accounts", "name", FieldGrants::read_only())
            .expect("write");
        store
            .set_object_grants(survivor, "accounts", ObjectGrants::read_only())
            .expect("write");

        let removed = store.remove_profile(doomed).expect("cascade");
        assert_eq!(removed, 2);
        assert_eq!(store.row_count(), 1);
        assert!(store
            .can_perform(survivor, "accounts", Action::Read)
            .expect("lookup"));
    }

    #[test]
    fn thread_safety_basic() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(PermissionStore::new());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let profile = ProfileId::new();
                    let object = format!("object-{i}");
                    store
                        .set_object_grants(profile, &object, ObjectGrants::read_only())
                        .expect("write");
                    assert!(store
                        .can_perform(profile, &object, Action::Read)
                        .expect("lookup"));
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread panicked");
        }

        assert_eq!(store.row_count(), 4);
    }
}
