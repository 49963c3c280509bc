//! Listener handles, failures, and delivery reports.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ListenerResult = Result<(), ListenerError>;

/// Boxed subscriber callback. Receives its own copy of the items.
pub type Listener<T> = Box<dyn FnMut(Vec<T>) -> ListenerResult + Send>;

/// Handle returned on registration, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub(crate) u64);

impl ListenerId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl Display for ListenerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// Error a listener reports back while handling a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerError {
    /// Listener refused the snapshot.
    Rejected(String),
    /// Listener-side resource is gone (e.g. the view was torn down).
    Unavailable(String),
}

impl ListenerError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}

impl Display for ListenerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(message) => write!(f, "listener rejected snapshot: {message}"),
            Self::Unavailable(message) => write!(f, "listener unavailable: {message}"),
        }
    }
}

impl Error for ListenerError {}

/// One listener failure captured during a notification round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    pub listener: ListenerId,
    pub error: ListenerError,
}

/// Result of one notification round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotifyReport {
    /// Listeners invoked, failed ones included.
    pub delivered: usize,
    /// Failures in registration order.
    pub failures: Vec<ListenerFailure>,
}

impl NotifyReport {
    /// Whether every listener accepted the snapshot.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{ListenerError, ListenerFailure, ListenerId, NotifyReport};

    #[test]
    fn listener_id_display_is_stable() {
        assert_eq!(ListenerId(7).to_string(), "listener-7");
    }

    #[test]
    fn report_with_failure_is_not_clean() {
        let mut report = NotifyReport::default();
        assert!(report.is_clean());

        report.failures.push(ListenerFailure {
            listener: ListenerId(0),
            error: ListenerError::rejected("boom"),
        });
        assert!(!report.is_clean());
        assert_eq!(
            report.failures[0].error.to_string(),
            "listener rejected snapshot: boom"
        );
    }
}
