//! Defines the crate level error type.

use crate::{config::ConfigError, validation::ValidationErrors};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// There is no logged-in user, or their session is no longer valid.
    #[error("no user is logged in")]
    NotAuthenticated,

    /// The requested resource was not found.
    ///
    /// Collaborators should return this when a lookup by ID (e.g., a linked
    /// bank item) matches nothing.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A shareable ID could not be decoded back into an account ID.
    #[error("\"{0}\" is not a valid shareable ID")]
    InvalidShareableId(String),

    /// A submitted sign-up or sign-in form has invalid fields.
    #[error(transparent)]
    InvalidForm(#[from] ValidationErrors),

    /// A transfer request was rejected before reaching the payments network.
    #[error("invalid transfer: {0}")]
    InvalidTransfer(String),

    /// An external service (auth backend, bank-data aggregator or payments
    /// network) failed.
    ///
    /// The message should only be logged for debugging on the server. When
    /// communicating with the client this error should be replaced with a
    /// general error message.
    #[error("{service} request failed: {message}")]
    Upstream {
        /// The name of the service that failed, e.g. "payments".
        service: &'static str,
        /// A description of the failure.
        message: String,
    },

    /// The application configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Shortcut for creating an [Error::Upstream].
    pub fn upstream(service: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!("{service} request failed: {message}");

        Self::Upstream { service, message }
    }
}
