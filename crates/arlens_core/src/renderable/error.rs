//! Asset load errors

use thiserror::Error;

/// Ошибка загрузки renderable
///
/// Не fatal: slot помечается Failed, anchor строится без этой геометрии.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("asset '{path}' not found")]
    NotFound { path: String },

    #[error("failed to read asset '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("asset '{path}' is empty")]
    Empty { path: String },
}
