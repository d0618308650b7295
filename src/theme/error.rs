//! Error taxonomy for the theme subsystem.
//!
//! None of these ever reach the user. Callers log and degrade to `light`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// Persisted storage threw or is disabled (private browsing, sandboxed iframe)
    #[error("preference storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The host has no `matchMedia` (or the query failed to parse)
    #[error("color-scheme media query unsupported")]
    MediaQueryUnsupported,

    /// The host cannot observe attribute changes on the root element
    #[error("attribute mutation observation unsupported")]
    MutationObservationUnsupported,
}

pub type ThemeResult<T> = Result<T, ThemeError>;
