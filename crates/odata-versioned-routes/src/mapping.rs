//! Route mappings and the mapping catalog
//!
//! A route mapping binds a route name and optional prefix to the set of
//! API versions it serves and to the services (versioned models, the
//! path-template handler) used when building routes for it. Mappings are
//! registered once and treated as immutable for the process lifetime.

use crate::template::PathTemplateHandler;
use crate::version::ApiVersion;
use odata_edm::EdmModel;
use std::fmt;
use std::sync::Arc;

/// Per-mapping service resolution.
///
/// Each mapping carries its own scope so that entity-model lookups for
/// one mapping never resolve against another mapping's versioned models.
pub trait ServiceScope: Send + Sync {
    /// The EDM for the given version, if this scope serves it.
    fn model(&self, version: &ApiVersion) -> Option<&EdmModel>;

    /// The path-template handler registered for this scope.
    ///
    /// Returning `None` is a configuration error; route expansion fails
    /// loudly rather than skipping.
    fn template_handler(&self) -> Option<&dyn PathTemplateHandler>;
}

/// The default [`ServiceScope`] implementation: a fixed set of versioned
/// models plus an optional template handler.
#[derive(Default)]
pub struct MappingServices {
    models: Vec<(ApiVersion, Arc<EdmModel>)>,
    handler: Option<Arc<dyn PathTemplateHandler>>,
}

impl MappingServices {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the EDM served for a version.
    pub fn with_model(mut self, version: ApiVersion, model: Arc<EdmModel>) -> Self {
        self.models.push((version, model));
        self
    }

    /// Register the path-template handler.
    pub fn with_template_handler(mut self, handler: Arc<dyn PathTemplateHandler>) -> Self {
        self.handler = Some(handler);
        self
    }
}

impl ServiceScope for MappingServices {
    fn model(&self, version: &ApiVersion) -> Option<&EdmModel> {
        self.models
            .iter()
            .find(|(candidate, _)| candidate == version)
            .map(|(_, model)| model.as_ref())
    }

    fn template_handler(&self) -> Option<&dyn PathTemplateHandler> {
        self.handler.as_deref()
    }
}

/// The version-selector predicate of a mapping: the ordered, non-empty
/// set of API versions the mapping serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSelector {
    versions: Vec<ApiVersion>,
}

impl VersionSelector {
    /// Create a selector from the versions a mapping serves.
    ///
    /// Duplicates are collapsed; the first occurrence keeps its position.
    ///
    /// # Panics
    ///
    /// Panics if `versions` yields nothing; a registered mapping always
    /// serves at least one version.
    pub fn new(versions: impl IntoIterator<Item = ApiVersion>) -> Self {
        let mut distinct: Vec<ApiVersion> = Vec::new();

        for version in versions {
            if !distinct.contains(&version) {
                distinct.push(version);
            }
        }

        assert!(
            !distinct.is_empty(),
            "a route mapping must serve at least one API version"
        );

        Self { versions: distinct }
    }

    /// Whether the selector contains the given version.
    pub fn contains(&self, version: &ApiVersion) -> bool {
        self.versions.contains(version)
    }

    /// The versions served, in registration order.
    pub fn versions(&self) -> &[ApiVersion] {
        &self.versions
    }
}

/// One registered OData model binding: a route name, an optional route
/// prefix, the versions it serves, and its service scope.
#[derive(Clone)]
pub struct RouteMapping {
    route_name: String,
    route_prefix: Option<String>,
    selector: VersionSelector,
    services: Arc<dyn ServiceScope>,
}

impl RouteMapping {
    /// Create a mapping with no route prefix.
    pub fn new(
        route_name: impl Into<String>,
        selector: VersionSelector,
        services: Arc<dyn ServiceScope>,
    ) -> Self {
        Self {
            route_name: route_name.into(),
            route_prefix: None,
            selector,
            services,
        }
    }

    /// Set the route prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.route_prefix = Some(prefix.into());
        self
    }

    /// The route name.
    pub fn route_name(&self) -> &str {
        &self.route_name
    }

    /// The route prefix, if any.
    pub fn route_prefix(&self) -> Option<&str> {
        self.route_prefix.as_deref()
    }

    /// The version selector.
    pub fn selector(&self) -> &VersionSelector {
        &self.selector
    }

    /// The mapping's service scope.
    pub fn services(&self) -> &dyn ServiceScope {
        self.services.as_ref()
    }
}

impl fmt::Debug for RouteMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMapping")
            .field("route_name", &self.route_name)
            .field("route_prefix", &self.route_prefix)
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}

/// The ordered, read-only collection of registered route mappings.
#[derive(Debug, Clone, Default)]
pub struct RouteMappingCatalog {
    items: Vec<RouteMapping>,
}

impl RouteMappingCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mapping. Registration order is iteration order.
    pub fn mapping(mut self, mapping: RouteMapping) -> Self {
        self.items.push(mapping);
        self
    }

    /// The registered mappings, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteMapping> {
        self.items.iter()
    }

    /// Number of registered mappings.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no mappings.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
