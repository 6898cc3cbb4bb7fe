//! Access control primitives and the resolution engine for GateKit.
//!
//! This crate decides whether a principal may act on an object type
//! and, for existing records, whether it may see or mutate one
//! specific record — down to individual fields. Several independent
//! authorization mechanisms layer into one deterministic,
//! deny-by-default decision.
//!
//! # Decision Layers
//!
//! ```text
//! authorize(principal, object, action [, record])
//!     │
//!     ├── 1. Object gate      profile → ObjectGrants   (hard prerequisite)
//!     ├── 2. Record sharing   ownership → hierarchy → org default
//!     │                       → sharing rules → manual share
//!     └── 3. Field security   profile → FieldGrants    (independent overlay)
//! ```
//!
//! | Layer | Keyed by | Answers |
//! |-------|----------|---------|
//! | Object gate | (profile, object) | may this profile act on the type at all? |
//! | Record sharing | principal + record owner | may it touch *this* record? |
//! | Field security | (profile, object, field) | may it see/edit *this* field? |
//!
//! # Crate Architecture
//!
//! ```text
//! gatekit-types  (IDs, Principal, ErrorCode, TryNew)
//!     ↑
//! gatekit-auth   (actions, grants, rules, resolver)  ◄── THIS CRATE
//!     ↑
//! gatekit-store  (Directory: in-memory stores, admin write paths)
//! ```
//!
//! # Design Principles
//!
//! - **Trait definitions here, implementations in consumers** —
//!   `gatekit-store` provides the standard `Directory`; tests provide
//!   small fixtures
//! - **Deny by default** — any lookup miss, unmatched tier, or
//!   unparseable enumeration value resolves to denial, never to an
//!   implicit allow
//! - **Read-only** — nothing in this crate mutates policy state;
//!   identical inputs always produce identical decisions
//! - **Loud integrity faults** — corrupted configuration (hierarchy
//!   cycles, dangling references) surfaces as [`AccessError`], not as
//!   an ordinary-looking denial

pub mod access;
pub mod action;
pub mod decision;
pub mod error;
pub mod owd;
pub mod perms;
pub mod resolver;
pub mod rule;
pub mod sharing;
pub mod store;

// Re-export core types
pub use access::AccessLevel;
pub use action::{Action, FieldMode};
pub use decision::{Decision, DenyReason};
pub use error::AccessError;
pub use owd::OrgDefault;
pub use perms::{FieldGrants, GrantLookup, ObjectGrants};
pub use resolver::AccessResolver;
pub use rule::{RuleKind, RuleValidationError, SharingRule, SharingRuleConfig};
pub use sharing::{resolve_record, GrantSource, RecordRef};
pub use store::{
    AccessData, ManualShares, ObjectPermissions, OrgDefaults, RoleGraph, SharingRules,
    UserDirectory,
};

// Re-export Principal from gatekit_types for convenience
pub use gatekit_types::Principal;
