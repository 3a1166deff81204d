//! Result type alias for trialchain

use super::errors::RegistryError;

/// Result type alias for registry operations
///
/// # Examples
///
/// ```
/// use trialchain::domain::result::Result;
/// use trialchain::domain::errors::RegistryError;
///
/// fn failing_function() -> Result<()> {
///     Err(RegistryError::Validation("title is required".to_string()))
/// }
///
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, RegistryError>;
