//! Core domain logic for the project board.
//! The observable store is the single source of truth for project state.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod validation;
pub mod view;

pub use config::{default_log_level, ConfigError, CoreConfig, InputRules, LogConfig};
pub use logging::{init_logging, logging_status, LoggingError};
pub use model::entity::{Entity, EntityId};
pub use model::project::{Project, ProjectDraft, ProjectId, ProjectStatus};
pub use service::project_service::{ProjectService, ProjectServiceError};
pub use store::listener::{
    ListenerError, ListenerFailure, ListenerId, ListenerResult, NotifyReport,
};
pub use store::observable::{Added, ObservableStore, TransitionOutcome};
pub use store::shared::SharedStore;
pub use validation::{validate_project_input, InputError, NumberRule, TextRule};
pub use view::project_list::{filter_by_status, ProjectListView};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
