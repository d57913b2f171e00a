//! Error types for route expansion
//!
//! Data-driven mismatches (a version's model not containing an entity set
//! or operation, an unroutable parameter shape) are silent skips, not
//! errors. The only fatal case is a misconfigured mapping.

use thiserror::Error;

/// Result type alias for route expansion operations
pub type Result<T, E = RouteExpansionError> = std::result::Result<T, E>;

/// A fatal route expansion failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteExpansionError {
    /// A mapping's service scope does not resolve a path-template
    /// handler. This is a configuration error and is surfaced
    /// immediately rather than being treated as a skippable route.
    #[error("route mapping '{route_name}' resolves no path-template handler")]
    MissingTemplateHandler {
        /// Name of the misconfigured route mapping
        route_name: String,
    },
}
