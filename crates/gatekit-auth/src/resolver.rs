//! The top-level authorization façade.
//!
//! [`AccessResolver`] composes the object-level gate, field-level
//! security, and record-level sharing into single-call decisions.
//!
//! # Gate Ordering
//!
//! The object-level gate is a hard prerequisite: when it fails, record
//! visibility is never consulted — not even ownership. Field-level
//! permissions are orthogonal to both; callers must check the object
//! gate *and* the field gate before exposing a field's value.
//!
//! # Audit Logging
//!
//! Every decision is logged for audit:
//! - Allowed: debug level, with the granting tier where one applies
//! - Denied: warn level, with the machine-readable reason
//! - Integrity faults: error level, then propagated to the caller

use crate::{
    resolve_record, AccessData, AccessError, Action, Decision, DenyReason, FieldMode, RecordRef,
};
use gatekit_types::Principal;
use std::collections::BTreeSet;
use tracing::{debug, error, warn};

/// Pure, reusable authorization decision engine.
///
/// The resolver holds a data bundle (any [`AccessData`] implementor)
/// and answers authorization questions against it. It never mutates
/// anything: calling the same method twice with identical store state
/// yields identical results.
///
/// # Example
///
/// ```ignore
/// use gatekit_auth::{AccessResolver, Action};
/// use gatekit_store::Directory;
///
/// let directory = Directory::new();
/// // ... populate via the directory's administrative surface ...
/// let resolver = AccessResolver::new(directory);
///
/// let decision = resolver.authorize(&principal, "accounts", Action::Create)?;
/// if decision.is_denied() {
///     // uniform user-facing refusal; detailed reason goes to audit
/// }
/// ```
#[derive(Debug)]
pub struct AccessResolver<D> {
    data: D,
}

impl<D: AccessData> AccessResolver<D> {
    /// Creates a resolver over the given data bundle.
    #[must_use]
    pub fn new(data: D) -> Self {
        Self { data }
    }

    /// Returns a reference to the underlying data bundle.
    ///
    /// Stores use interior mutability, so administrative writes can
    /// continue through this reference while the resolver is live.
    #[must_use]
    pub fn data(&self) -> &D {
        &self.data
    }

    /// Consumes the resolver, returning the data bundle.
    #[must_use]
    pub fn into_inner(self) -> D {
        self.data
    }

    /// Decides whether `principal` may perform `action` on the object
    /// type — the object-level gate alone.
    ///
    /// This is the complete check for [`Action::Create`] (no record
    /// exists yet). For actions on existing records, use
    /// [`authorize_record`](Self::authorize_record), which runs this
    /// gate first.
    ///
    /// # Errors
    ///
    /// Propagates integrity faults ([`AccessError`]) after logging
    /// them at error level.
    pub fn authorize(
        &self,
        principal: &Principal,
        object: &str,
        action: Action,
    ) -> Result<Decision, AccessError> {
        let allowed = self
            .data
            .can_perform(principal.profile, object, action)
            .map_err(|e| self.log_fault(principal, object, &e))?;

        let decision = if allowed {
            Decision::Allowed
        } else {
            Decision::Denied(DenyReason::NoObjectPermission)
        };
        self.log_decision(principal, object, action.as_str(), None, decision);
        Ok(decision)
    }

    /// Decides whether `principal` may perform `action` on one
    /// specific record.
    ///
    /// Runs the object-level gate, then — only if it passes and the
    /// action targets an existing record — resolves record visibility
    /// at the access level the action requires.
    ///
    /// # Errors
    ///
    /// Propagates integrity faults ([`AccessError`]) after logging
    /// them at error level.
    pub fn authorize_record(
        &self,
        principal: &Principal,
        object: &str,
        action: Action,
        record: &RecordRef,
    ) -> Result<Decision, AccessError> {
        let gate = self
            .data
            .can_perform(principal.profile, object, action)
            .map_err(|e| self.log_fault(principal, object, &e))?;
        if !gate {
            let decision = Decision::Denied(DenyReason::NoObjectPermission);
            self.log_decision(principal, object, action.as_str(), None, decision);
            return Ok(decision);
        }

        // Create has no record-level component; the gate was the
        // whole check.
        let Some(needed) = action.needed_access() else {
            let decision = Decision::Allowed;
            self.log_decision(principal, object, action.as_str(), None, decision);
            return Ok(decision);
        };

        let source = resolve_record(&self.data, principal, object, record, needed)
            .map_err(|e| self.log_fault(principal, object, &e))?;

        let decision = match source {
            Some(_) => Decision::Allowed,
            None => Decision::Denied(DenyReason::NoRecordVisibility),
        };
        self.log_decision(
            principal,
            object,
            action.as_str(),
            source.map(|s| s.as_str()),
            decision,
        );
        Ok(decision)
    }

    /// Decides whether `principal` may access one field in the given
    /// mode — field-level security alone.
    ///
    /// Field permissions are independent of object permissions and of
    /// record visibility; callers combine the checks. A principal with
    /// record-level read access but no field-level read grant must
    /// still have the field redacted.
    ///
    /// # Errors
    ///
    /// Propagates integrity faults ([`AccessError`]) after logging
    /// them at error level.
    pub fn authorize_field(
        &self,
        principal: &Principal,
        object: &str,
        field: &str,
        mode: FieldMode,
    ) -> Result<Decision, AccessError> {
        let allowed = self
            .data
            .can_access_field(principal.profile, object, field, mode)
            .map_err(|e| self.log_fault(principal, object, &e))?;

        let decision = if allowed {
            Decision::Allowed
        } else {
            Decision::Denied(DenyReason::NoFieldPermission)
        };
        self.log_decision(principal, object, mode.as_str(), None, decision);
        Ok(decision)
    }

    /// Returns the fields of `object` the principal's profile may
    /// read, for intersecting with a projection before returning data.
    ///
    /// # Errors
    ///
    /// Propagates integrity faults ([`AccessError`]) after logging
    /// them at error level.
    pub fn readable_fields(
        &self,
        principal: &Principal,
        object: &str,
    ) -> Result<BTreeSet<String>, AccessError> {
        self.data
            .visible_fields(principal.profile, object)
            .map_err(|e| self.log_fault(principal, object, &e))
    }

    fn log_decision(
        &self,
        principal: &Principal,
        object: &str,
        operation: &str,
        source: Option<&str>,
        decision: Decision,
    ) {
        match decision {
            Decision::Allowed => {
                debug!(
                    principal = %principal,
                    object,
                    operation,
                    source = source.unwrap_or("object_gate"),
                    "access allowed"
                );
            }
            Decision::Denied(reason) => {
                warn!(
                    principal = %principal,
                    object,
                    operation,
                    reason = %reason,
                    "access denied"
                );
            }
        }
    }

    fn log_fault(&self, principal: &Principal, object: &str, err: &AccessError) -> AccessError {
        error!(
            principal = %principal,
            object,
            error = %err,
            "integrity fault during access resolution"
        );
        err.clone()
    }
}
