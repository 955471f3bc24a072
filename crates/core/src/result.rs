//! Result alias and logging combinators.

use std::fmt::Display;

use crate::error::Error;

/// The standard Result type for spanstep operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for reporting failures without swallowing them.
pub trait ResultExt<T, E> {
    /// Log the error (if any) with a context message and pass the result through.
    #[must_use]
    fn log_failure<C: Display>(self, context: C) -> Self;
}

impl<T, E: Display> ResultExt<T, E> for std::result::Result<T, E> {
    fn log_failure<C: Display>(self, context: C) -> Self {
        if let Err(ref e) = self {
            tracing::error!(error = %e, "{context}");
        }
        self
    }
}
