//! Single-owner observable collection.
//!
//! # Responsibility
//! - Append entities with store-issued ids and the default status.
//! - Transition entity status by id with no-op suppression.
//! - Notify listeners with a fresh copy of the items per listener.
//!
//! # Invariants
//! - Mutation requires `&mut self`, so no listener can re-enter the store.
//! - A mutation is fully applied before the first listener runs.
//! - Listeners are invoked in registration order.

use crate::model::entity::{Entity, EntityId};
use crate::store::listener::{Listener, ListenerFailure, ListenerId, ListenerResult, NotifyReport};
use log::{debug, warn};
use std::fmt::{Debug, Formatter};
use uuid::Uuid;

/// Result of [`ObservableStore::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Added {
    /// Id assigned to the new entity.
    pub id: EntityId,
    pub report: NotifyReport,
}

/// Result of [`ObservableStore::transition`].
///
/// Unknown ids and same-status moves are silent no-ops; the outcome only
/// tells the caller which case happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Status changed and listeners were notified.
    Moved(NotifyReport),
    /// Entity already had the requested status.
    Unchanged,
    /// No entity with that id.
    UnknownId,
}

impl TransitionOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved(_))
    }

    pub fn report(&self) -> Option<&NotifyReport> {
        match self {
            Self::Moved(report) => Some(report),
            Self::Unchanged | Self::UnknownId => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Moved(_) => "moved",
            Self::Unchanged => "unchanged",
            Self::UnknownId => "unknown_id",
        }
    }
}

/// Ordered entity collection with synchronous snapshot broadcast.
pub struct ObservableStore<T: Entity> {
    items: Vec<T>,
    listeners: Vec<(ListenerId, Listener<T>)>,
    next_listener_id: u64,
}

impl<T: Entity> Default for ObservableStore<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }
}

impl<T: Entity> Debug for ObservableStore<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableStore")
            .field("items", &self.items.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<T: Entity> ObservableStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for future changes.
    ///
    /// The current items are not replayed. Registering the same closure
    /// twice yields two independent listeners.
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(Vec<T>) -> ListenerResult + Send + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        debug!(
            "event=listener_added module=store status=ok listener={} listeners={}",
            id,
            self.listeners.len()
        );
        id
    }

    /// Unregisters a listener. Returns `false` when the id is not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        let removed = self.listeners.len() != before;
        debug!(
            "event=listener_removed module=store status={} listener={}",
            if removed { "ok" } else { "not_found" },
            id
        );
        removed
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Appends a new entity with a fresh id and the default status, then
    /// notifies every listener.
    ///
    /// The draft is not validated here.
    pub fn add(&mut self, draft: T::Draft) -> Added {
        let id = Uuid::new_v4();
        self.items.push(T::from_draft(id, Default::default(), draft));
        debug!(
            "event=store_add module=store status=ok id={} items={}",
            id,
            self.items.len()
        );
        let report = self.notify();
        Added { id, report }
    }

    /// Moves the first entity matching `id` to `status`.
    pub fn transition(&mut self, id: EntityId, status: T::Status) -> TransitionOutcome {
        let outcome = match self.items.iter().position(|item| item.id() == id) {
            None => TransitionOutcome::UnknownId,
            Some(index) if self.items[index].status() == status => TransitionOutcome::Unchanged,
            Some(index) => {
                self.items[index].set_status(status);
                TransitionOutcome::Moved(self.notify())
            }
        };
        debug!(
            "event=store_transition module=store status={} id={} target={:?}",
            outcome.as_str(),
            id,
            status
        );
        outcome
    }

    /// Read-only view of the items in insertion order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Owned copy of the items in insertion order.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.clone()
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn notify(&mut self) -> NotifyReport {
        let mut report = NotifyReport::default();
        for (id, listener) in self.listeners.iter_mut() {
            report.delivered += 1;
            if let Err(error) = listener(self.items.clone()) {
                warn!(
                    "event=listener_failed module=store status=error listener={} error={}",
                    id, error
                );
                report.failures.push(ListenerFailure {
                    listener: *id,
                    error,
                });
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::{ObservableStore, TransitionOutcome};
    use crate::model::project::{Project, ProjectDraft, ProjectStatus};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn draft(title: &str) -> ProjectDraft {
        ProjectDraft::new(title, "some description", 2)
    }

    #[test]
    fn add_assigns_unique_ids_and_default_status() {
        let mut store = ObservableStore::<Project>::new();
        let first = store.add(draft("one"));
        let second = store.add(draft("two"));

        assert_ne!(first.id, second.id);
        assert_eq!(store.len(), 2);
        assert!(store
            .items()
            .iter()
            .all(|project| project.status == ProjectStatus::Active));
        assert_eq!(first.report.delivered, 0);
    }

    #[test]
    fn remove_listener_only_affects_that_listener() {
        let mut store = ObservableStore::<Project>::new();
        let kept = Arc::new(AtomicUsize::new(0));
        let dropped = Arc::new(AtomicUsize::new(0));

        let kept_calls = Arc::clone(&kept);
        store.add_listener(move |_| {
            kept_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let dropped_calls = Arc::clone(&dropped);
        let dropped_id = store.add_listener(move |_| {
            dropped_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        assert!(store.remove_listener(dropped_id));
        assert!(!store.remove_listener(dropped_id));
        store.add(draft("one"));

        assert_eq!(kept.load(Ordering::SeqCst), 1);
        assert_eq!(dropped.load(Ordering::SeqCst), 0);
        assert_eq!(store.listener_count(), 1);
    }

    #[test]
    fn transition_reports_outcome_without_notifying_on_noop() {
        let mut store = ObservableStore::<Project>::new();
        let id = store.add(draft("one")).id;
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        store.add_listener(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        assert_eq!(
            store.transition(id, ProjectStatus::Active),
            TransitionOutcome::Unchanged
        );
        assert_eq!(
            store.transition(uuid::Uuid::new_v4(), ProjectStatus::Finished),
            TransitionOutcome::UnknownId
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let outcome = store.transition(id, ProjectStatus::Finished);
        assert!(outcome.is_moved());
        assert_eq!(outcome.report().map(|report| report.delivered), Some(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
