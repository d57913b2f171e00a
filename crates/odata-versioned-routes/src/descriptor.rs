//! Action and parameter descriptors
//!
//! Descriptors are the routing-facing view of a controller action: its
//! names, its declared parameters with their binding sources, and opaque
//! metadata the hosting framework passes through untouched. Descriptors
//! are immutable once built; expansion emits modified clones rather than
//! mutating shared state.

use crate::route_info::RouteDescriptor;
use crate::version::ApiVersionModel;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The origin a framework resolves an action parameter's value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingSource {
    /// A route path segment
    Path,
    /// The query string
    Query,
    /// The request body
    Body,
    /// A request header
    Header,
    /// The service container
    Services,
    /// A user-registered custom binder
    Custom,
    /// A framework-internal special binder
    Special,
}

/// The declared type of an action parameter.
///
/// The two OData context types are distinguished structurally because the
/// classifier treats them specially; everything else is carried by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterType {
    /// The OData query-options context type
    QueryOptions,
    /// The OData path context type
    ODataPath,
    /// Any other declared type, identified by name
    Named(String),
}

impl ParameterType {
    /// A named (non-OData-context) parameter type.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Whether this is one of the two OData context types.
    pub fn is_odata_context(&self) -> bool {
        matches!(self, Self::QueryOptions | Self::ODataPath)
    }
}

/// One declared parameter of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    name: String,
    parameter_type: ParameterType,
    binding_source: Option<BindingSource>,
}

impl ParameterDescriptor {
    /// Create a parameter with no pre-assigned binding source.
    pub fn new(name: impl Into<String>, parameter_type: ParameterType) -> Self {
        Self {
            name: name.into(),
            parameter_type,
            binding_source: None,
        }
    }

    /// Pre-assign an explicit binding source.
    pub fn with_binding_source(mut self, source: BindingSource) -> Self {
        self.binding_source = Some(source);
        self
    }

    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared parameter type.
    pub fn parameter_type(&self) -> &ParameterType {
        &self.parameter_type
    }

    /// The assigned binding source, if any.
    pub fn binding_source(&self) -> Option<BindingSource> {
        self.binding_source
    }
}

/// Whether a controller serves resources or the service/metadata
/// documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerKind {
    /// An ordinary resource controller
    #[default]
    Resource,
    /// The metadata controller (`$metadata`, service document)
    Metadata,
}

/// Describes one controller action for routing purposes.
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    controller_name: String,
    action_name: String,
    controller_kind: ControllerKind,
    version_model: ApiVersionModel,
    parameters: Vec<ParameterDescriptor>,
    route_values: HashMap<String, String>,
    route: Option<RouteDescriptor>,
    filters: Vec<String>,
    properties: HashMap<String, serde_json::Value>,
}

impl ActionDescriptor {
    /// Create an action descriptor.
    pub fn new(
        controller_name: impl Into<String>,
        action_name: impl Into<String>,
        version_model: ApiVersionModel,
    ) -> Self {
        Self {
            controller_name: controller_name.into(),
            action_name: action_name.into(),
            controller_kind: ControllerKind::Resource,
            version_model,
            parameters: Vec::new(),
            route_values: HashMap::new(),
            route: None,
            filters: Vec::new(),
            properties: HashMap::new(),
        }
    }

    /// Mark the action as belonging to the metadata controller.
    pub fn metadata_controller(mut self) -> Self {
        self.controller_kind = ControllerKind::Metadata;
        self
    }

    /// Add a declared parameter.
    pub fn parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Add a route value.
    pub fn route_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.route_values.insert(key.into(), value.into());
        self
    }

    /// Add an opaque filter name (pass-through metadata).
    pub fn filter(mut self, name: impl Into<String>) -> Self {
        self.filters.push(name.into());
        self
    }

    /// Add an opaque property (pass-through metadata).
    pub fn property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// The controller name.
    pub fn controller_name(&self) -> &str {
        &self.controller_name
    }

    /// The action name.
    pub fn action_name(&self) -> &str {
        &self.action_name
    }

    /// The controller kind.
    pub fn controller_kind(&self) -> ControllerKind {
        self.controller_kind
    }

    /// Whether the action belongs to the metadata controller.
    pub fn is_metadata_controller(&self) -> bool {
        self.controller_kind == ControllerKind::Metadata
    }

    /// Whether the action serves the `$metadata` document itself (as
    /// opposed to the service document).
    pub fn is_metadata_document_action(&self) -> bool {
        self.is_metadata_controller()
            && (self.action_name.eq_ignore_ascii_case("metadata")
                || self.action_name.eq_ignore_ascii_case("options"))
    }

    /// The merged explicit + implicit version model.
    pub fn version_model(&self) -> &ApiVersionModel {
        &self.version_model
    }

    /// The declared parameters, in declaration order.
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// The route values.
    pub fn route_values(&self) -> &HashMap<String, String> {
        &self.route_values
    }

    /// The attached route descriptor, once expansion has produced one.
    pub fn route(&self) -> Option<&RouteDescriptor> {
        self.route.as_ref()
    }

    /// The opaque filter names.
    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    /// The opaque properties.
    pub fn properties(&self) -> &HashMap<String, serde_json::Value> {
        &self.properties
    }

    /// Clone the descriptor under a different controller name. All other
    /// routing metadata is carried over unchanged.
    pub fn with_controller_name(&self, name: impl Into<String>) -> Self {
        let mut clone = self.clone();
        clone.controller_name = name.into();
        clone
    }

    /// Clone the descriptor, replacing only the route descriptor and the
    /// (classified) parameter list.
    pub fn with_route(&self, route: RouteDescriptor, parameters: Vec<ParameterDescriptor>) -> Self {
        let mut clone = self.clone();
        clone.route = Some(route);
        clone.parameters = parameters;
        clone
    }
}
