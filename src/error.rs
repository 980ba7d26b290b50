//! Construction errors for the hash map

use thiserror::Error;

/// Errors reported while validating constructor arguments.
///
/// Both variants are raised before anything is allocated; a failed
/// constructor produces no partial map. Every operation on a constructed
/// map is total: absent keys yield `None`, never an error.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MapConfigError {
    /// The bucket array needs at least one slot
    #[error("initial capacity must be greater than zero")]
    ZeroCapacity,
    /// The load factor must lie in `(0.0, 1.0]` and must not be NaN
    #[error("load factor must be in (0.0, 1.0], got {0}")]
    InvalidLoadFactor(f64),
}

#[cfg(test)]
#[allow(clippy::missing_docs_in_private_items)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MapConfigError::ZeroCapacity.to_string(),
            "initial capacity must be greater than zero"
        );
        assert_eq!(
            MapConfigError::InvalidLoadFactor(1.5).to_string(),
            "load factor must be in (0.0, 1.0], got 1.5"
        );
    }
}
