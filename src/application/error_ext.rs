//! Error conversion helpers for I/O and provider calls
//!
//! Provides extension traits for cleaner error handling with context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::DomainError;
use crate::infrastructure::traits::ProviderResult;

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// fs.write(&path, &xml)
    ///     .with_path_context("write xml", &path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }
}

/// Extension trait turning provider failures into `ProviderUnavailable`.
pub trait ProviderResultExt<T> {
    /// Name the provider operation that failed.
    ///
    /// # Example
    /// ```ignore
    /// let classes = provider.top_level_classes().during("list top-level classes")?;
    /// ```
    fn during(self, operation: &str) -> ApplicationResult<T>;
}

impl<T> ProviderResultExt<T> for ProviderResult<T> {
    fn during(self, operation: &str) -> ApplicationResult<T> {
        self.map_err(|e| {
            DomainError::ProviderUnavailable {
                operation: operation.to_string(),
                message: e.message,
            }
            .into()
        })
    }
}
