//! Thread-safe handle onto one observable store.
//!
//! # Responsibility
//! - Give producers and views clones that all point at the same store.
//! - Hold one exclusive lock across mutate-and-notify.
//!
//! # Invariants
//! - All clones observe the same items and listeners.
//! - Listeners must not call back into the same `SharedStore`; the lock is
//!   held while they run.

use crate::model::entity::{Entity, EntityId};
use crate::store::listener::{ListenerId, ListenerResult};
use crate::store::observable::{Added, ObservableStore, TransitionOutcome};
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle to the process's store instance.
pub struct SharedStore<T: Entity> {
    inner: Arc<Mutex<ObservableStore<T>>>,
}

impl<T: Entity> Clone for SharedStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Entity> Default for SharedStore<T> {
    fn default() -> Self {
        Self::from_store(ObservableStore::new())
    }
}

impl<T: Entity> Debug for SharedStore<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedStore").field(&*self.lock()).finish()
    }
}

impl<T: Entity> SharedStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_store(store: ObservableStore<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// See [`ObservableStore::add_listener`].
    pub fn add_listener<F>(&self, listener: F) -> ListenerId
    where
        F: FnMut(Vec<T>) -> ListenerResult + Send + 'static,
    {
        self.lock().add_listener(listener)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.lock().remove_listener(id)
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listener_count()
    }

    /// See [`ObservableStore::add`]. Returns after every listener has run.
    pub fn add(&self, draft: T::Draft) -> Added {
        self.lock().add(draft)
    }

    /// See [`ObservableStore::transition`].
    pub fn transition(&self, id: EntityId, status: T::Status) -> TransitionOutcome {
        self.lock().transition(id, status)
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.lock().snapshot()
    }

    pub fn get(&self, id: EntityId) -> Option<T> {
        self.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Whether both handles point at the same store.
    pub fn same_store(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn lock(&self) -> MutexGuard<'_, ObservableStore<T>> {
        // A panicking listener poisons the lock only after the mutation was
        // committed, so the items are still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::SharedStore;
    use crate::model::project::{Project, ProjectDraft, ProjectStatus};
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread;

    #[test]
    fn clones_share_items_and_listeners() {
        let store = SharedStore::<Project>::new();
        let view = store.clone();
        assert!(store.same_store(&view));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        view.add_listener(move |items| {
            sink.lock().expect("sink lock").push(items.len());
            Ok(())
        });

        let id = store.add(ProjectDraft::new("a", "desc a", 1)).id;
        store.transition(id, ProjectStatus::Finished);

        assert_eq!(view.len(), 1);
        assert_eq!(
            view.get(id).map(|project| project.status),
            Some(ProjectStatus::Finished)
        );
        assert_eq!(*seen.lock().expect("sink lock"), vec![1, 1]);
    }

    #[test]
    fn concurrent_adds_are_serialized() {
        let store = SharedStore::<Project>::new();
        let sizes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&sizes);
        store.add_listener(move |items| {
            sink.lock().expect("sink lock").push(items.len());
            Ok(())
        });

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let store = store.clone();
                thread::spawn(move || {
                    for index in 0..5 {
                        store.add(ProjectDraft::new(
                            format!("w{worker}-{index}"),
                            "parallel",
                            1,
                        ));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker should finish");
        }

        assert_eq!(store.len(), 20);
        let sizes = sizes.lock().expect("sink lock");
        assert_eq!(*sizes, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn panicking_listener_leaves_store_usable() {
        let store = SharedStore::<Project>::new();
        let armed = Arc::new(AtomicBool::new(true));
        let trigger = Arc::clone(&armed);
        store.add_listener(move |_| {
            if trigger.swap(false, Ordering::SeqCst) {
                panic!("render blew up");
            }
            Ok(())
        });

        let first = catch_unwind(AssertUnwindSafe(|| {
            store.add(ProjectDraft::new("first", "committed before panic", 1))
        }));
        assert!(first.is_err());
        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0].title, "first");

        let second = store.add(ProjectDraft::new("second", "after recovery", 2));
        assert_eq!(second.report.delivered, 1);
        assert!(second.report.is_clean());
        assert_eq!(store.len(), 2);
    }
}
