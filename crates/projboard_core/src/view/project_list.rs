//! Status-partitioned project list.
//!
//! # Responsibility
//! - Subscribe to the project store and keep the projects of one status.
//! - Produce the text rendering of the list.
//!
//! # Invariants
//! - Each notification replaces the assigned projects wholesale.
//! - Assigned projects keep store insertion order.

use crate::model::project::{Project, ProjectStatus};
use crate::store::listener::{ListenerError, ListenerId};
use crate::store::shared::SharedStore;
use log::debug;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct ListState {
    assigned: Vec<Project>,
    renders: usize,
}

/// List of projects sharing one status, fed by store notifications.
///
/// Dropping the view unsubscribes it. A view must not be dropped from inside
/// a store listener: the store lock is held while listeners run.
pub struct ProjectListView {
    status: ProjectStatus,
    state: Arc<Mutex<ListState>>,
    attachment: Option<(SharedStore<Project>, ListenerId)>,
}

impl ProjectListView {
    pub fn new(status: ProjectStatus) -> Self {
        Self {
            status,
            state: Arc::new(Mutex::new(ListState::default())),
            attachment: None,
        }
    }

    /// Subscribes to `store`, replacing any earlier subscription.
    ///
    /// Current store contents are not pulled in; the list fills on the next
    /// change.
    pub fn attach(&mut self, store: &SharedStore<Project>) -> ListenerId {
        self.detach();

        let status = self.status;
        let state = Arc::clone(&self.state);
        let listener = store.add_listener(move |projects| {
            let assigned = filter_by_status(&projects, status);
            let mut state = state.lock().map_err(|_| {
                ListenerError::Unavailable(format!("{status} list state is poisoned"))
            })?;
            debug!(
                "event=list_render module=view status=ok list={} projects={}",
                status,
                assigned.len()
            );
            state.assigned = assigned;
            state.renders += 1;
            Ok(())
        });
        self.attachment = Some((store.clone(), listener));
        listener
    }

    /// Unsubscribes from the store. Returns `false` when not attached.
    pub fn detach(&mut self) -> bool {
        match self.attachment.take() {
            Some((store, listener)) => store.remove_listener(listener),
            None => false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    /// `ACTIVE PROJECTS` or `FINISHED PROJECTS`.
    pub fn heading(&self) -> String {
        format!("{} PROJECTS", self.status.as_str().to_uppercase())
    }

    /// Stable element id for the list, e.g. `active-projects-list`.
    pub fn list_id(&self) -> String {
        format!("{}-projects-list", self.status)
    }

    pub fn assigned(&self) -> Vec<Project> {
        self.lock_state().assigned.clone()
    }

    /// Number of notifications this list has rendered.
    pub fn render_count(&self) -> usize {
        self.lock_state().renders
    }

    /// Text rendering: heading, then title, assignees, and description per
    /// project.
    pub fn render(&self) -> Vec<String> {
        let state = self.lock_state();
        let mut lines = Vec::with_capacity(1 + state.assigned.len() * 3);
        lines.push(self.heading());
        for project in &state.assigned {
            lines.push(format!("- {}", project.title));
            lines.push(format!("  {} assigned.", project.persons_label()));
            lines.push(format!("  {}", project.description));
        }
        lines
    }

    fn lock_state(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// Prints only the listener id; formatting the store handle would take the
// store lock, which is held while listeners run.
impl Debug for ProjectListView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectListView")
            .field("status", &self.status)
            .field(
                "listener",
                &self.attachment.as_ref().map(|(_, listener)| *listener),
            )
            .finish()
    }
}

impl Drop for ProjectListView {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Projects with `status`, in snapshot order.
pub fn filter_by_status(projects: &[Project], status: ProjectStatus) -> Vec<Project> {
    projects
        .iter()
        .filter(|project| project.status == status)
        .cloned()
        .collect()
}
