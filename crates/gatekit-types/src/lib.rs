//! Core types for GateKit.
//!
//! This crate provides the foundational identifier and claims types
//! for GateKit, a multi-tenant record access control engine.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       Primitives Layer                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  gatekit-types : ID types, Principal, ErrorCode   ◄── HERE   │
//! │  gatekit-auth  : actions, grants, rules, the resolver        │
//! └──────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Store Layer                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  gatekit-store : in-memory stores, admin write paths         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Identifier Design
//!
//! All identifiers are UUID-based for:
//!
//! - **Network compatibility**: safe to transmit across processes/services
//! - **Multi-tenancy**: globally unique without per-tenant coordination
//! - **Serialization**: first-class serde support
//!
//! # Trust Model
//!
//! [`Principal`] is a *trusted claims descriptor*: the external
//! authentication layer verifies identity and hands the engine a
//! `{user, org, profile, role?}` tuple. Nothing in this workspace
//! re-validates those claims — callers must not construct a
//! `Principal` from unverified data.
//!
//! # Example
//!
//! ```
//! use gatekit_types::{OrgId, Principal, ProfileId, RoleId, UserId};
//!
//! let org = OrgId::new();
//! let sales = ProfileId::new();
//!
//! let manager = Principal::new(UserId::new(), org, sales).with_role(RoleId::new());
//! assert!(manager.has_role());
//! ```

mod construct;
mod error;
mod id;
mod principal;

pub use construct::TryNew;
pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{OrgId, ProfileId, RecordId, RoleId, UserId};
pub use principal::Principal;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn org_id_uniqueness() {
        let id1 = OrgId::new();
        let id2 = OrgId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn org_id_display() {
        let id = OrgId::new();
        let display = format!("{id}");
        assert!(display.starts_with("org:"));
        assert!(display.contains(&id.uuid().to_string()));
    }

    #[test]
    fn user_id_display() {
        let id = UserId::new();
        let display = format!("{id}");
        assert!(display.starts_with("user:"));
        assert!(display.contains(&id.uuid().to_string()));
    }

    #[test]
    fn profile_id_display() {
        let id = ProfileId::new();
        assert!(format!("{id}").starts_with("profile:"));
    }

    #[test]
    fn role_id_display() {
        let id = RoleId::new();
        assert!(format!("{id}").starts_with("role:"));
    }

    // NOTE: RoleId does not implement Default intentionally.
    // See id.rs for rationale.

    #[test]
    fn record_id_display() {
        let id = RecordId::new();
        assert!(format!("{id}").starts_with("record:"));
    }

    #[test]
    fn record_id_uniqueness() {
        let id1 = RecordId::new();
        let id2 = RecordId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn user_id_default_is_random() {
        let id1 = UserId::default();
        let id2 = UserId::default();
        assert_ne!(id1, id2);
    }

    #[test]
    fn id_uuid_accessors() {
        let user = UserId::new();
        assert_eq!(user.uuid(), user.0);

        let role = RoleId::new();
        assert_eq!(role.uuid(), role.0);
    }

    #[test]
    fn ids_serde_roundtrip() {
        let org = OrgId::new();
        let json = serde_json::to_string(&org).expect("serialize");
        let parsed: OrgId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, org);
    }
}
