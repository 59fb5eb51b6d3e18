//! Custom error types for dealer-desk
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Only fallible I/O-facing layers (storage,
//! config, import, export to disk) return these; the deep-link codec and the
//! report builders never fail.

use thiserror::Error;

/// The main error type for dealer-desk operations
#[derive(Error, Debug)]
pub enum DealerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// The current role may not touch a field
    #[error("Permission denied: {role} cannot {action} {field}")]
    Permission {
        role: String,
        action: &'static str,
        field: String,
    },
}

impl DealerError {
    /// Create a "not found" error for vehicles
    pub fn vehicle_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Vehicle",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a permission error
    pub fn is_permission(&self) -> bool {
        matches!(self, Self::Permission { .. })
    }
}

impl From<std::io::Error> for DealerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DealerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for DealerError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for dealer-desk operations
pub type DealerResult<T> = Result<T, DealerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DealerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = DealerError::vehicle_not_found("abc-123");
        assert_eq!(err.to_string(), "Vehicle not found: abc-123");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_permission_error() {
        let err = DealerError::Permission {
            role: "editor".into(),
            action: "edit",
            field: "purchase_price".into(),
        };
        assert_eq!(
            err.to_string(),
            "Permission denied: editor cannot edit purchase_price"
        );
        assert!(err.is_permission());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DealerError = io_err.into();
        assert!(matches!(err, DealerError::Io(_)));
    }
}
