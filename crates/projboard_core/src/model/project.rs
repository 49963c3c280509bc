//! Project domain model.
//!
//! # Responsibility
//! - Define the project record rendered by the active/finished lists.
//! - Provide the display helpers shared by list views.
//!
//! # Invariants
//! - `id` never changes after the store assigns it.
//! - `status` starts as `ProjectStatus::Active`.

use crate::model::entity::{Entity, EntityId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Stable identifier for a project.
pub type ProjectId = EntityId;

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Newly created and still being worked on.
    #[default]
    Active,
    /// Dropped onto the finished list.
    Finished,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 2] = [ProjectStatus::Active, ProjectStatus::Finished];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project record owned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    /// Number of people assigned.
    pub people: u32,
    pub status: ProjectStatus,
}

/// Validated form input used to create a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub people: u32,
}

impl ProjectDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>, people: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            people,
        }
    }
}

impl Project {
    /// Human-readable assignee count, e.g. `1 person` or `3 persons`.
    pub fn persons_label(&self) -> String {
        if self.people == 1 {
            "1 person".to_string()
        } else {
            format!("{} persons", self.people)
        }
    }
}

impl Entity for Project {
    type Status = ProjectStatus;
    type Draft = ProjectDraft;

    fn from_draft(id: EntityId, status: ProjectStatus, draft: ProjectDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            people: draft.people,
            status,
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn status(&self) -> ProjectStatus {
        self.status
    }

    fn set_status(&mut self, status: ProjectStatus) {
        self.status = status;
    }
}
