//! Domain model tracked by the observable store.
//!
//! # Responsibility
//! - Define the entity contract the generic store relies on.
//! - Define the concrete project record and its status lifecycle.
//!
//! # Invariants
//! - Every entity is identified by a stable `EntityId` assigned at creation.
//! - Entities are never deleted; only their status changes.

pub mod entity;
pub mod project;
