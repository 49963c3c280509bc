//! Project use-case service.
//!
//! # Responsibility
//! - Accept form submissions and add valid projects to the store.
//! - Move projects between statuses, including by dragged id text.
//!
//! # Invariants
//! - Invalid input never reaches the store.
//! - Unknown ids and same-status moves stay silent no-ops at the store.

use crate::config::InputRules;
use crate::model::project::{Project, ProjectId, ProjectStatus};
use crate::store::observable::TransitionOutcome;
use crate::store::shared::SharedStore;
use crate::validation::{validate_project_input, InputError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Errors from project use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectServiceError {
    /// Form input failed validation.
    InvalidInput(InputError),
    /// Dragged id text is not a project id.
    InvalidProjectId(String),
}

impl Display for ProjectServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::InvalidProjectId(value) => write!(f, "invalid project id: `{value}`"),
        }
    }
}

impl Error for ProjectServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::InvalidProjectId(_) => None,
        }
    }
}

impl From<InputError> for ProjectServiceError {
    fn from(value: InputError) -> Self {
        Self::InvalidInput(value)
    }
}

/// Producer and status mutator for the project board.
pub struct ProjectService {
    store: SharedStore<Project>,
    rules: InputRules,
}

impl ProjectService {
    /// Creates a service using the default form rules.
    pub fn new(store: SharedStore<Project>) -> Self {
        Self::with_rules(store, InputRules::default())
    }

    pub fn with_rules(store: SharedStore<Project>, rules: InputRules) -> Self {
        Self { store, rules }
    }

    pub fn store(&self) -> &SharedStore<Project> {
        &self.store
    }

    /// Validates raw form values and adds a new active project.
    ///
    /// Returns after every store listener has processed the new snapshot.
    pub fn submit(
        &self,
        title: &str,
        description: &str,
        people: &str,
    ) -> Result<ProjectId, ProjectServiceError> {
        let draft = validate_project_input(title, description, people, &self.rules)
            .inspect_err(|err| {
                warn!(
                    "event=project_submit module=service status=rejected field={}",
                    err.field()
                );
            })?;

        let added = self.store.add(draft);
        info!(
            "event=project_submit module=service status=ok id={} listener_failures={}",
            added.id,
            added.report.failures.len()
        );
        Ok(added.id)
    }

    /// Moves one project to `status`.
    pub fn move_project(&self, id: ProjectId, status: ProjectStatus) -> TransitionOutcome {
        self.store.transition(id, status)
    }

    /// Moves the project whose id arrives as drag payload text.
    pub fn drop_project(
        &self,
        raw_id: &str,
        status: ProjectStatus,
    ) -> Result<TransitionOutcome, ProjectServiceError> {
        let trimmed = raw_id.trim();
        let id = Uuid::parse_str(trimmed)
            .map_err(|_| ProjectServiceError::InvalidProjectId(trimmed.to_string()))?;
        Ok(self.move_project(id, status))
    }
}

#[cfg(test)]
mod tests {
    use super::{ProjectService, ProjectServiceError};
    use crate::model::project::ProjectStatus;
    use crate::store::shared::SharedStore;
    use crate::validation::InputError;

    #[test]
    fn submit_rejects_short_description_without_touching_store() {
        let service = ProjectService::new(SharedStore::new());
        let err = service
            .submit("Build API", "tiny", "3")
            .expect_err("description below min length must fail");

        assert!(matches!(
            err,
            ProjectServiceError::InvalidInput(InputError::TooShort {
                field: "description",
                ..
            })
        ));
        assert!(service.store().is_empty());
    }

    #[test]
    fn drop_project_rejects_malformed_id() {
        let service = ProjectService::new(SharedStore::new());
        let err = service
            .drop_project("1700000000000", ProjectStatus::Finished)
            .expect_err("non-uuid payload must fail");
        assert_eq!(
            err,
            ProjectServiceError::InvalidProjectId("1700000000000".to_string())
        );
    }
}
