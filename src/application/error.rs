//! # Application Errors
//!
//! Error types for the application layer.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)     - Invalid products, packages or postal codes
//! ├── Validation(String)      - Malformed requests
//! ├── NotFound                - Missing rate rows
//! ├── Conflict(String)        - Duplicate rate rows
//! ├── BadRequest(String)      - Catalog rejected the product references
//! ├── BadGateway(String)      - Catalog unreachable or failing
//! └── Repository(String)      - Persistence failures
//! ```
//!
//! # Examples
//!
//! ```
//! use freight_quote::application::error::ApplicationError;
//! use freight_quote::infrastructure::persistence::RepositoryError;
//!
//! let err: ApplicationError = RepositoryError::duplicate("RegionRate", "south:1000:3").into();
//! assert!(matches!(err, ApplicationError::Conflict(_)));
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::catalog::CatalogError;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Clone, Error)]
pub enum ApplicationError {
    /// Domain validation failure.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("not found: {resource_type} with id {id}")]
    NotFound {
        /// Type of resource.
        resource_type: String,
        /// Resource identifier.
        id: String,
    },

    /// Resource already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Upstream rejected the request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Upstream failed.
    #[error("upstream error: {0}")]
    BadGateway(String),

    /// Persistence failure.
    #[error("repository error: {0}")]
    Repository(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(resource_type: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.to_string(),
        }
    }

    /// Returns true if the caller sent something invalid.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Domain(_) | Self::Validation(_) | Self::BadRequest(_)
        )
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound { entity_type, id } => Self::not_found(entity_type, id),
            RepositoryError::Duplicate { .. } => Self::Conflict(error.to_string()),
            other => Self::Repository(other.to_string()),
        }
    }
}

impl From<CatalogError> for ApplicationError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::NotFound { .. } | CatalogError::BadRequest(_) => {
                Self::BadRequest(error.to_string())
            }
            other => Self::BadGateway(other.to_string()),
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::HttpError;

    #[test]
    fn repository_errors_map_by_kind() {
        let err: ApplicationError = RepositoryError::not_found("DealerRate", 9).into();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
        assert_eq!(err.to_string(), "not found: DealerRate with id 9");

        let err: ApplicationError = RepositoryError::duplicate("CourierRate", "mg:contagem").into();
        assert!(matches!(err, ApplicationError::Conflict(_)));

        let err: ApplicationError = RepositoryError::query("syntax").into();
        assert!(matches!(err, ApplicationError::Repository(_)));
    }

    #[test]
    fn catalog_errors_map_by_kind() {
        let err: ApplicationError = CatalogError::NotFound {
            requested: 2,
            found: 1,
        }
        .into();
        assert!(err.is_client_error());

        let err: ApplicationError = CatalogError::Http(HttpError::Timeout("slow".to_string())).into();
        assert!(matches!(err, ApplicationError::BadGateway(_)));
    }

    #[test]
    fn domain_errors_are_client_errors() {
        let err: ApplicationError = DomainError::EmptyShipment.into();
        assert!(err.is_client_error());
    }
}
