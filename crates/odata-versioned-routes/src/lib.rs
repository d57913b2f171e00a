//! Versioned OData route expansion
//!
//! Resolves, for a single controller action exposed through an OData-based
//! API, the full set of concrete route templates and parameter-binding
//! sources that apply across its declared API versions: one route
//! descriptor per (action, matching mapping, matching version)
//! combination, with every action parameter classified as bound from the
//! URL path, the query string, or a special source.
//!
//! # Example
//!
//! ```rust,ignore
//! use odata_versioned_routes::{
//!     ApiVersion, ApiVersionModel, ActionDescriptor, MappingServices,
//!     NullMetadataProvider, RouteBindingConvention, RouteMapping,
//!     RouteMappingCatalog, VersionSelector, VersioningOptions,
//! };
//!
//! let catalog = RouteMappingCatalog::new()
//!     .mapping(
//!         RouteMapping::new("odata-v1", VersionSelector::new([ApiVersion::v1()]), services)
//!             .with_prefix("api"),
//!     );
//!
//! let convention = RouteBindingConvention::new(
//!     Arc::new(catalog),
//!     Arc::new(NullMetadataProvider),
//!     VersioningOptions::new(),
//! );
//!
//! let action = ActionDescriptor::new(
//!     "Orders",
//!     "get",
//!     ApiVersionModel::versioned([ApiVersion::v1()]),
//! );
//!
//! for clone in convention.apply(&action)? {
//!     println!("{}", clone.route().unwrap().template());
//! }
//! ```
//!
//! Routing is a pure, in-memory computation: the catalog and its mappings
//! are immutable inputs, and each `apply` call works on its own state, so
//! independent actions can be expanded concurrently.

mod binding;
mod config;
mod convention;
mod descriptor;
mod error;
mod mapping;
mod route_builder;
mod route_info;
mod template;
mod version;


pub use binding::{
    classify_parameter, classify_parameters, ModelMetadataProvider, NullMetadataProvider,
    ParameterContext,
};
pub use config::{UrlKeyDelimiter, VersioningOptions};
pub use convention::{trim_trailing_numbers, RouteBindingConvention};
pub use descriptor::{
    ActionDescriptor, BindingSource, ControllerKind, ParameterDescriptor, ParameterType,
};
pub use error::{Result, RouteExpansionError};
pub use mapping::{
    MappingServices, RouteMapping, RouteMappingCatalog, ServiceScope, VersionSelector,
};
pub use route_builder::{ODataActionType, RouteBuilder, RouteBuilderContext};
pub use route_info::RouteDescriptor;
pub use template::{KeySegmentTemplate, PathSegmentTemplate, PathTemplate, PathTemplateHandler};
pub use version::{ApiVersion, ApiVersionModel, VersionParseError};
