//! In-memory policy stores for GateKit.
//!
//! This crate provides the standard implementations of the data-access
//! traits defined in `gatekit-auth`, plus the administrative write
//! paths — validated mutation and the cascade deletes the data model
//! requires.
//!
//! # Architecture
//!
//! ```text
//! gatekit-auth (traits + decision logic)
//!     RoleGraph, ObjectPermissions, OrgDefaults,
//!     SharingRules, ManualShares, UserDirectory
//!         ↓
//! gatekit-store (implementations)           ◄── THIS CRATE
//!     RoleStore, PermissionStore, OrgDefaultStore,
//!     SharingRuleStore, ManualShareStore, UserStore,
//!     OrgStore, ProfileStore — bundled by Directory
//! ```
//!
//! # Concurrency
//!
//! Every store is `Send + Sync` behind `std::sync::RwLock`: reads run
//! concurrently, writes serialize per store, and a poisoned lock
//! surfaces as an error rather than a silent allow or deny. The one
//! operation needing cross-row coordination — role reparenting with
//! its cycle check — validates and mutates under a single write-lock
//! acquisition (see [`RoleStore::set_parent`]).
//!
//! # Snapshot Semantics
//!
//! The resolver treats these stores as read-through snapshots of
//! durable storage owned by the data layer. Nothing here caches
//! across calls; every lookup reads current state.

mod directory;
mod error;
mod manual_shares;
mod org_defaults;
mod permissions;
mod roles;
mod sharing_rules;
mod tenants;
mod users;

pub use directory::Directory;
pub use error::StoreError;
pub use manual_shares::ManualShareStore;
pub use org_defaults::OrgDefaultStore;
pub use permissions::PermissionStore;
pub use roles::{RoleRecord, RoleStore, MAX_ROLE_DEPTH};
pub use sharing_rules::SharingRuleStore;
pub use tenants::{OrgRecord, OrgStore, ProfileRecord, ProfileStore};
pub use users::{UserRecord, UserStore};

// Re-export the resolver and Principal for one-stop consumers
pub use gatekit_auth::AccessResolver;
pub use gatekit_types::Principal;
