use thiserror::Error;

/// Errors that can occur when constructing or ticking a simulation.
#[derive(Error, Debug)]
pub enum SimError {
    /// The configuration is unusable; construction must not proceed.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The particle set handed to a tick is malformed (inconsistent
    /// partition, empty population). Fatal to that tick only; the caller
    /// should skip drawing the frame and may retry on the next tick.
    #[error("invalid simulation state: {reason}")]
    InvalidState { reason: String },
}

impl SimError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        SimError::InvalidConfig {
            reason: reason.into(),
        }
    }

    pub(crate) fn state(reason: impl Into<String>) -> Self {
        SimError::InvalidState {
            reason: reason.into(),
        }
    }
}
