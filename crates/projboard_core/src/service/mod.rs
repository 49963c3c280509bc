//! Use-case services over the shared project store.
//!
//! # Responsibility
//! - Validate producer input before it reaches the store.
//! - Keep callers decoupled from store locking details.

pub mod project_service;
