//! Observable entity store.
//!
//! # Responsibility
//! - Own the authoritative ordered entity collection.
//! - Broadcast a copied snapshot to every listener after each committed
//!   mutation, synchronously and in registration order.
//!
//! # Invariants
//! - Listeners never receive a live reference to store-owned items.
//! - Mutations that change nothing observable send no notification.
//! - Listener failures are isolated: every listener runs on every change.

pub mod listener;
pub mod observable;
pub mod shared;
