//! The route expansion engine
//!
//! For one controller action, [`RouteBindingConvention::apply`] produces
//! one cloned action descriptor per surviving (action, mapping, version)
//! route: versioned actions expand across their declared versions and
//! every mapping whose selector serves them; version-neutral actions
//! visit each distinct version known to the catalog exactly once, through
//! the first mapping that serves it. Build attempts that are excluded or
//! unsupported are skipped silently; surviving routes are de-duplicated
//! by case-insensitive (template, name) in attempt order.

use crate::binding::{classify_parameters, ModelMetadataProvider, ParameterContext};
use crate::config::VersioningOptions;
use crate::descriptor::{ActionDescriptor, ParameterDescriptor};
use crate::error::{Result, RouteExpansionError};
use crate::mapping::{RouteMapping, RouteMappingCatalog};
use crate::route_builder::{RouteBuilder, RouteBuilderContext};
use crate::route_info::{RouteDescriptor, RouteSet};
use crate::version::ApiVersion;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// One surviving route attempt: the route descriptor plus the parameter
/// list classified under it.
struct ExpandedRoute {
    descriptor: RouteDescriptor,
    parameters: Vec<ParameterDescriptor>,
}

/// Expands controller actions into per-(version, mapping) route clones.
///
/// The convention holds no mutable state: every `apply` call allocates
/// its own working set, so independent actions can be expanded
/// concurrently over the same catalog.
pub struct RouteBindingConvention {
    catalog: Arc<RouteMappingCatalog>,
    metadata_provider: Arc<dyn ModelMetadataProvider>,
    options: VersioningOptions,
}

impl RouteBindingConvention {
    /// Create a convention over a mapping catalog.
    pub fn new(
        catalog: Arc<RouteMappingCatalog>,
        metadata_provider: Arc<dyn ModelMetadataProvider>,
        options: VersioningOptions,
    ) -> Self {
        Self {
            catalog,
            metadata_provider,
            options,
        }
    }

    /// Expand one action into its route clones.
    ///
    /// The input descriptor is never mutated; each output clone carries
    /// the normalized controller name, one route descriptor, and the
    /// parameter list classified for that route.
    pub fn apply(&self, action: &ActionDescriptor) -> Result<Vec<ActionDescriptor>> {
        let action = normalize_controller_name(action);

        let routes = if action.version_model().is_version_neutral() {
            self.expand_version_neutral(&action)?
        } else {
            self.expand_versioned(&action)?
        };

        debug!(
            controller = action.controller_name(),
            action = action.action_name(),
            routes = routes.len(),
            "expanded action routes"
        );

        Ok(routes
            .into_iter()
            .map(|route| action.with_route(route.descriptor, route.parameters))
            .collect())
    }

    fn expand_versioned(&self, action: &ActionDescriptor) -> Result<Vec<ExpandedRoute>> {
        let mut routes = RouteSet::new();
        let metadata = action.is_metadata_controller();

        for version in action.version_model().declared_versions() {
            for mapping in self.catalog.iter() {
                if !mapping.selector().contains(version) {
                    continue;
                }

                if metadata {
                    // Metadata routes are version-independent within a
                    // mapping; all of its mapped versions collapse to one
                    // build.
                    let route = self.metadata_route(action, mapping)?;
                    routes.insert(route.descriptor.route_key(), route);
                } else {
                    for mapped in mapping.selector().versions() {
                        if let Some(route) = self.try_build(action, *mapped, mapping)? {
                            routes.insert(route.descriptor.route_key(), route);
                        }
                    }
                }
            }
        }

        Ok(routes.into_vec())
    }

    fn expand_version_neutral(&self, action: &ActionDescriptor) -> Result<Vec<ExpandedRoute>> {
        let mut routes = RouteSet::new();
        let mut visited: HashSet<ApiVersion> = HashSet::new();

        for mapping in self.catalog.iter() {
            for version in mapping.selector().versions() {
                // First mapping that introduces a version wins the visit.
                if visited.insert(*version) {
                    if let Some(route) = self.try_build(action, *version, mapping)? {
                        routes.insert(route.descriptor.route_key(), route);
                    }
                }
            }
        }

        Ok(routes.into_vec())
    }

    fn try_build(
        &self,
        action: &ActionDescriptor,
        version: ApiVersion,
        mapping: &RouteMapping,
    ) -> Result<Option<ExpandedRoute>> {
        let context = RouteBuilderContext::new(version, mapping, action, &self.options);

        if context.is_route_excluded() {
            trace!(
                action = action.action_name(),
                version = %version,
                route = mapping.route_name(),
                "route excluded for version"
            );
            return Ok(None);
        }

        let builder = RouteBuilder::new(&context);
        let parameter_context = ParameterContext::new(&builder)?;

        if !parameter_context.is_supported() {
            trace!(
                action = action.action_name(),
                version = %version,
                route = mapping.route_name(),
                "action unsupported for routing"
            );
            return Ok(None);
        }

        let parameters =
            classify_parameters(action, &parameter_context, self.metadata_provider.as_ref());
        let template = builder.build_path(true);
        let descriptor = RouteDescriptor::new(
            mapping.route_name(),
            template,
            parameter_context.into_path_template(),
            mapping.route_prefix().map(str::to_string),
        );

        Ok(Some(ExpandedRoute {
            descriptor,
            parameters,
        }))
    }

    /// Build the single, version-independent route of a metadata-controller
    /// action for one mapping.
    fn metadata_route(
        &self,
        action: &ActionDescriptor,
        mapping: &RouteMapping,
    ) -> Result<ExpandedRoute> {
        let path = if action.is_metadata_document_action() {
            "$metadata"
        } else {
            "/"
        };

        let template = match mapping.route_prefix() {
            Some(prefix) if !prefix.is_empty() => {
                if path == "/" {
                    prefix.to_string()
                } else {
                    format!("{prefix}/{path}")
                }
            }
            _ => path.to_string(),
        };

        let scope = mapping.services();
        let handler =
            scope
                .template_handler()
                .ok_or_else(|| RouteExpansionError::MissingTemplateHandler {
                    route_name: mapping.route_name().to_string(),
                })?;

        // Metadata templates involve no model lookups; any mapped version
        // resolves them. The selector is non-empty by construction.
        let version = mapping.selector().versions()[0];
        let path_template = handler.parse_template(path, scope, &version);
        let descriptor = RouteDescriptor::new(
            mapping.route_name(),
            template,
            path_template,
            mapping.route_prefix().map(str::to_string),
        );

        Ok(ExpandedRoute {
            descriptor,
            parameters: action.parameters().to_vec(),
        })
    }
}

/// Clone the action under its normalized controller name: the route-value
/// `"controller"` entry when present, else the controller name, with any
/// trailing version suffix stripped.
fn normalize_controller_name(action: &ActionDescriptor) -> ActionDescriptor {
    let raw = action
        .route_values()
        .get("controller")
        .map(String::as_str)
        .unwrap_or_else(|| action.controller_name());

    action.with_controller_name(trim_trailing_numbers(raw))
}

/// Strip a maximal trailing run of decimal digits, unless doing so would
/// leave nothing. Lets version-suffixed controller type names ("Orders2")
/// share one logical controller identity ("Orders") for routing.
pub fn trim_trailing_numbers(name: &str) -> &str {
    let trimmed = name.trim_end_matches(|c: char| c.is_ascii_digit());

    if trimmed.is_empty() {
        name
    } else {
        trimmed
    }
}
