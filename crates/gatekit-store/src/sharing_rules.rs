//! Thread-safe, in-memory sharing rule store.

use crate::StoreError;
use gatekit_auth::{AccessError, SharingRule, SharingRules};
use gatekit_types::{OrgId, RoleId};
use std::collections::HashMap;
use std::sync::RwLock;

/// Thread-safe, in-memory sharing rule table.
///
/// Rules are keyed by (org, object, name); [`insert`](Self::insert)
/// enforces the uniqueness, so two administrators racing to create
/// the same rule name cannot both succeed.
///
/// # Example
///
/// ```
/// use gatekit_auth::{AccessLevel, RuleKind, SharingRule, SharingRuleConfig, SharingRules};
/// use gatekit_store::SharingRuleStore;
/// use gatekit_types::{OrgId, RoleId, TryNew};
///
/// let store = SharingRuleStore::new();
/// let org = OrgId::new();
///
/// let rule = SharingRule::try_new(SharingRuleConfig {
///     name: "emea".to_string(),
///     org,
///     object: "accounts".to_string(),
///     kind: RuleKind::OwnershipBased,
///     shared_to: RoleId::new(),
///     include_subordinates: false,
///     access: AccessLevel::Read,
/// })
/// .expect("valid rule");
///
/// store.insert(rule.clone()).expect("insert");
/// assert!(store.insert(rule).is_err()); // duplicate (org, object, name)
/// assert_eq!(store.rules_for(org, "accounts").expect("list").len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SharingRuleStore {
    inner: RwLock<HashMap<(OrgId, String, String), SharingRule>>,
}

impl SharingRuleStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a rule.
    ///
    /// # Errors
    ///
    /// - [`StoreError::DuplicateRuleName`] if a rule with the same
    ///   (org, object, name) already exists
    /// - [`StoreError::LockPoisoned`] if the store is inaccessible
    pub fn insert(&self, rule: SharingRule) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned {
            context: "sharing rules",
        })?;

        let key = (rule.org, rule.object.clone(), rule.name.clone());
        if map.contains_key(&key) {
            return Err(StoreError::DuplicateRuleName {
                org: rule.org,
                object: rule.object,
                name: rule.name,
            });
        }
        map.insert(key, rule);
        Ok(())
    }

    /// Activates or suspends a rule in place.
    ///
    /// # Errors
    ///
    /// - [`StoreError::UnknownRule`] if no such rule is stored
    /// - [`StoreError::LockPoisoned`] if the store is inaccessible
    pub fn set_active(
        &self,
        org: OrgId,
        object: &str,
        name: &str,
        active: bool,
    ) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned {
            context: "sharing rules",
        })?;

        let rule = map
            .get_mut(&(org, object.to_string(), name.to_string()))
            .ok_or_else(|| StoreError::UnknownRule {
                org,
                object: object.to_string(),
                name: name.to_string(),
            })?;
        rule.active = active;
        Ok(())
    }

    /// Removes a rule.
    ///
    /// Returns the removed rule, or `None` if it was not stored.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the store is inaccessible.
    pub fn remove(
        &self,
        org: OrgId,
        object: &str,
        name: &str,
    ) -> Result<Option<SharingRule>, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned {
            context: "sharing rules",
        })?;
        Ok(map.remove(&(org, object.to_string(), name.to_string())))
    }

    /// Removes every rule targeting the given role — the cascade half
    /// of role deletion.
    ///
    /// Returns the number of rules removed.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the store is inaccessible.
    pub fn remove_rules_targeting(&self, role: RoleId) -> Result<usize, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned {
            context: "sharing rules",
        })?;
        let before = map.len();
        map.retain(|_, rule| rule.shared_to != role);
        Ok(before - map.len())
    }

    /// Removes every rule of the given organization.
    ///
    /// Returns the number of rules removed.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockPoisoned`] if the store is inaccessible.
    pub fn remove_org(&self, org: OrgId) -> Result<usize, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned {
            context: "sharing rules",
        })?;
        let before = map.len();
        map.retain(|(o, _, _), _| *o != org);
        Ok(before - map.len())
    }

    /// Returns the number of stored rules (active or not).
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }
}

impl SharingRules for SharingRuleStore {
    fn rules_for(&self, org: OrgId, object: &str) -> Result<Vec<SharingRule>, AccessError> {
        let map = self.inner.read().map_err(|_| AccessError::LockPoisoned {
            context: "sharing rules",
        })?;
        Ok(map
            .values()
            .filter(|rule| rule.org == org && rule.object == object)
            .cloned()
            .collect())
    }
}
