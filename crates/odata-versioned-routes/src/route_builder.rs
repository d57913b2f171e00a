//! Per-attempt route building
//!
//! A [`RouteBuilderContext`] is derived for every (version, mapping,
//! action) attempt. It classifies the action against that version's model
//! and resolves the entity set, singleton, or operation the action
//! targets. Classification failure marks the route excluded; exclusion,
//! not failure, is the normal outcome for "this action doesn't exist in
//! this version". The [`RouteBuilder`] then renders the template string
//! from the classified context.

use crate::config::{UrlKeyDelimiter, VersioningOptions};
use crate::descriptor::ActionDescriptor;
use crate::mapping::RouteMapping;
use crate::version::ApiVersion;
use odata_edm::{EdmOperation, EntitySet, EntityType, Singleton};
use smallvec::SmallVec;

/// The classified OData action type of a (version, mapping, action)
/// combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ODataActionType {
    /// The action cannot be routed under this version's model
    Unsupported,
    /// Direct entity set access
    EntitySet,
    /// An operation bound to the targeted entity type
    BoundOperation,
    /// An operation exposed at the service root
    UnboundOperation,
    /// Singleton access
    Singleton,
    /// A metadata-controller action
    Metadata,
}

/// The classified routing context for one build attempt.
pub struct RouteBuilderContext<'a> {
    version: ApiVersion,
    mapping: &'a RouteMapping,
    action: &'a ActionDescriptor,
    options: &'a VersioningOptions,
    action_type: ODataActionType,
    entity_set: Option<&'a EntitySet>,
    singleton: Option<&'a Singleton>,
    operation: Option<&'a EdmOperation>,
}

impl<'a> RouteBuilderContext<'a> {
    /// Classify an action against one version of one mapping.
    pub fn new(
        version: ApiVersion,
        mapping: &'a RouteMapping,
        action: &'a ActionDescriptor,
        options: &'a VersioningOptions,
    ) -> Self {
        let mut context = Self {
            version,
            mapping,
            action,
            options,
            action_type: ODataActionType::Unsupported,
            entity_set: None,
            singleton: None,
            operation: None,
        };

        if action.is_metadata_controller() {
            context.action_type = ODataActionType::Metadata;
            return context;
        }

        let Some(model) = mapping.services().model(&version) else {
            return context;
        };

        let controller = action.controller_name();

        if let Some(entity_set) = model.find_entity_set(controller) {
            context.entity_set = Some(entity_set);
            let entity_type = entity_set.entity_type().name();

            if let Some(operation) = model.find_bound_operation(action.action_name(), entity_type) {
                context.operation = Some(operation);
                context.action_type = ODataActionType::BoundOperation;
            } else {
                context.action_type = ODataActionType::EntitySet;
            }
        } else if let Some(singleton) = model.find_singleton(controller) {
            context.singleton = Some(singleton);
            let entity_type = singleton.entity_type().name();

            if let Some(operation) = model.find_bound_operation(action.action_name(), entity_type) {
                context.operation = Some(operation);
                context.action_type = ODataActionType::BoundOperation;
            } else {
                context.action_type = ODataActionType::Singleton;
            }
        } else if let Some(operation) = model.find_unbound_operation(action.action_name()) {
            context.operation = Some(operation);
            context.action_type = ODataActionType::UnboundOperation;
        }

        context
    }

    /// The version this attempt targets.
    pub fn api_version(&self) -> ApiVersion {
        self.version
    }

    /// The mapping this attempt targets.
    pub fn mapping(&self) -> &'a RouteMapping {
        self.mapping
    }

    /// The action being expanded.
    pub fn action(&self) -> &'a ActionDescriptor {
        self.action
    }

    /// The classified action type.
    pub fn action_type(&self) -> ODataActionType {
        self.action_type
    }

    /// The resolved entity set, when the action targets one.
    pub fn entity_set(&self) -> Option<&'a EntitySet> {
        self.entity_set
    }

    /// The resolved singleton, when the action targets one.
    pub fn singleton(&self) -> Option<&'a Singleton> {
        self.singleton
    }

    /// The resolved operation, when the action targets one.
    pub fn operation(&self) -> Option<&'a EdmOperation> {
        self.operation
    }

    /// Whether this (version, mapping) combination cannot produce a
    /// valid route for the action.
    pub fn is_route_excluded(&self) -> bool {
        self.action_type == ODataActionType::Unsupported
    }
}

/// Renders route template strings for a classified context.
pub struct RouteBuilder<'a> {
    context: &'a RouteBuilderContext<'a>,
}

impl<'a> RouteBuilder<'a> {
    /// Create a builder over a classified context.
    pub fn new(context: &'a RouteBuilderContext<'a>) -> Self {
        Self { context }
    }

    /// The context being built from.
    pub fn context(&self) -> &'a RouteBuilderContext<'a> {
        self.context
    }

    /// Build the route template string.
    ///
    /// Without a prefix the service root renders as `"/"`; with
    /// `include_prefix` the prefix replaces the root (`"api"`) or is
    /// joined ahead of the path (`"api/$metadata"`).
    pub fn build_path(&self, include_prefix: bool) -> String {
        let segments = self.segments();
        let path = if segments.is_empty() {
            "/".to_string()
        } else {
            segments.join("/")
        };

        if !include_prefix {
            return path;
        }

        match self.context.mapping().route_prefix() {
            Some(prefix) if !prefix.is_empty() => {
                if segments.is_empty() {
                    prefix.to_string()
                } else {
                    format!("{prefix}/{path}")
                }
            }
            _ => path,
        }
    }

    fn segments(&self) -> SmallVec<[String; 4]> {
        let mut segments: SmallVec<[String; 4]> = SmallVec::new();
        let context = self.context;

        match context.action_type() {
            ODataActionType::Metadata => {
                // The service-document action renders as the service root.
                if context.action().is_metadata_document_action() {
                    segments.push("$metadata".to_string());
                }
            }
            ODataActionType::EntitySet => {
                if let Some(entity_set) = context.entity_set() {
                    segments.push(entity_set.name().to_string());
                    self.append_key_segment(&mut segments, entity_set.entity_type());
                }
            }
            ODataActionType::BoundOperation => {
                if let Some(operation) = context.operation() {
                    if let Some(entity_set) = context.entity_set() {
                        segments.push(entity_set.name().to_string());
                        if !operation.is_collection_bound() {
                            self.append_key_segment(&mut segments, entity_set.entity_type());
                        }
                    } else if let Some(singleton) = context.singleton() {
                        segments.push(singleton.name().to_string());
                    }
                    segments.push(operation.name().to_string());
                }
            }
            ODataActionType::UnboundOperation => {
                if let Some(operation) = context.operation() {
                    segments.push(operation.name().to_string());
                }
            }
            ODataActionType::Singleton => {
                if let Some(singleton) = context.singleton() {
                    segments.push(singleton.name().to_string());
                }
            }
            ODataActionType::Unsupported => {}
        }

        segments
    }

    /// Append the entity key segment when the action's parameters cover
    /// every key property of the entity type.
    fn append_key_segment(&self, segments: &mut SmallVec<[String; 4]>, entity_type: &EntityType) {
        let keys = entity_type.keys();

        if keys.is_empty() || !self.action_covers_keys(entity_type) {
            return;
        }

        match self.context.options.url_key_delimiter {
            UrlKeyDelimiter::Parentheses => {
                let rendered = if keys.len() == 1 {
                    format!("({{{}}})", keys[0])
                } else {
                    let pairs: Vec<String> = keys
                        .iter()
                        .map(|key| format!("{key}={{{key}}}"))
                        .collect();
                    format!("({})", pairs.join(","))
                };

                // Parenthesized keys attach to the preceding segment
                // rather than forming one of their own.
                if let Some(last) = segments.last_mut() {
                    last.push_str(&rendered);
                }
            }
            UrlKeyDelimiter::Slash => {
                for key in keys {
                    segments.push(format!("{{{key}}}"));
                }
            }
        }
    }

    fn action_covers_keys(&self, entity_type: &EntityType) -> bool {
        let parameters = self.context.action().parameters();

        entity_type.keys().iter().all(|key| {
            parameters
                .iter()
                .any(|parameter| parameter.name().eq_ignore_ascii_case(key))
        })
    }
}
