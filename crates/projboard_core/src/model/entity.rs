//! Entity contract for store-managed records.

use std::fmt::Debug;
use uuid::Uuid;

/// Stable identifier assigned by the store when an entity is created.
pub type EntityId = Uuid;

/// Record shape the observable store can own and transition.
///
/// The store is the only authority that creates entities, so construction
/// goes through [`Entity::from_draft`] with a store-issued id and the
/// default status.
pub trait Entity: Clone {
    /// Mutually exclusive lifecycle states. `Default` is the initial status.
    type Status: Copy + Eq + Default + Debug;
    /// Caller-supplied fields, everything except id and status.
    type Draft;

    fn from_draft(id: EntityId, status: Self::Status, draft: Self::Draft) -> Self;

    fn id(&self) -> EntityId;

    fn status(&self) -> Self::Status;

    fn set_status(&mut self, status: Self::Status);
}
