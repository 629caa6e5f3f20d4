use thiserror::Error;

/// Errors the catalog core surfaces to its callers.
///
/// `InvalidInput` and `AlreadyRated` are expected, user-facing outcomes;
/// `NotFound` and `Store` are translated by the request layer.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    #[error("user already rated this book")]
    AlreadyRated,

    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }
}
