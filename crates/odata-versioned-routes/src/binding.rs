//! Action-parameter binding-source classification
//!
//! Path segments are the authoritative source for resource-addressing
//! values (entity keys, bound-operation targets); everything else is
//! assumed to arrive via the query string unless a metadata provider or
//! an explicit assignment says otherwise. Classification never mutates
//! the input descriptor; it always produces a new one.

use crate::descriptor::{ActionDescriptor, BindingSource, ParameterDescriptor, ParameterType};
use crate::error::{Result, RouteExpansionError};
use crate::route_builder::{ODataActionType, RouteBuilder, RouteBuilderContext};
use crate::template::PathTemplate;

/// Type-level binding metadata supplied by the hosting framework.
pub trait ModelMetadataProvider: Send + Sync {
    /// The default binding source registered for a parameter type, if
    /// any.
    fn binding_source(&self, parameter_type: &ParameterType) -> Option<BindingSource>;
}

/// A [`ModelMetadataProvider`] with no registered metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMetadataProvider;

impl ModelMetadataProvider for NullMetadataProvider {
    fn binding_source(&self, _parameter_type: &ParameterType) -> Option<BindingSource> {
        None
    }
}

/// The parameter-classification context of one build attempt: whether the
/// action is routable at all, and the resolved structured path template.
pub struct ParameterContext<'a> {
    route_context: &'a RouteBuilderContext<'a>,
    path_template: Option<PathTemplate>,
    supported: bool,
}

impl<'a> ParameterContext<'a> {
    /// Resolve the structured path template for a build attempt.
    ///
    /// A scope without a path-template handler is a configuration error
    /// and fails loudly; a path the handler cannot parse merely marks
    /// the attempt unsupported.
    pub fn new(builder: &RouteBuilder<'a>) -> Result<Self> {
        let route_context = builder.context();
        let mapping = route_context.mapping();
        let scope = mapping.services();

        let handler =
            scope
                .template_handler()
                .ok_or_else(|| RouteExpansionError::MissingTemplateHandler {
                    route_name: mapping.route_name().to_string(),
                })?;

        let path = builder.build_path(false);
        let version = route_context.api_version();
        let path_template = handler.parse_template(&path, scope, &version);

        Ok(Self {
            supported: path_template.is_some(),
            route_context,
            path_template,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        route_context: &'a RouteBuilderContext<'a>,
        path_template: Option<PathTemplate>,
    ) -> Self {
        Self {
            supported: path_template.is_some(),
            route_context,
            path_template,
        }
    }

    /// Whether the action can be routed at all under this attempt.
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// The resolved structured path template.
    pub fn path_template(&self) -> Option<&PathTemplate> {
        self.path_template.as_ref()
    }

    /// The route context of the attempt.
    pub fn route_context(&self) -> &'a RouteBuilderContext<'a> {
        self.route_context
    }

    /// Consume the context, yielding the resolved template.
    pub fn into_path_template(self) -> Option<PathTemplate> {
        self.path_template
    }
}

/// Classify every parameter of an action for one build attempt.
pub fn classify_parameters(
    action: &ActionDescriptor,
    context: &ParameterContext<'_>,
    provider: &dyn ModelMetadataProvider,
) -> Vec<ParameterDescriptor> {
    action
        .parameters()
        .iter()
        .map(|parameter| classify_parameter(parameter, context, provider))
        .collect()
}

/// Assign a binding source to one parameter.
///
/// An explicitly assigned source is left untouched, except that `Custom`
/// on one of the two OData context types is corrected to `Special`: the
/// context objects are bound by the framework itself, not by a
/// user-registered binder.
pub fn classify_parameter(
    parameter: &ParameterDescriptor,
    context: &ParameterContext<'_>,
    provider: &dyn ModelMetadataProvider,
) -> ParameterDescriptor {
    if let Some(explicit) = parameter.binding_source() {
        let corrected = correct_custom_source(parameter.parameter_type(), explicit);
        return parameter.clone().with_binding_source(corrected);
    }

    if let Some(provided) = provider.binding_source(parameter.parameter_type()) {
        let corrected = correct_custom_source(parameter.parameter_type(), provided);
        return parameter.clone().with_binding_source(corrected);
    }

    let inferred = infer_source(parameter, context);
    parameter.clone().with_binding_source(inferred)
}

fn correct_custom_source(parameter_type: &ParameterType, source: BindingSource) -> BindingSource {
    if parameter_type.is_odata_context() && source == BindingSource::Custom {
        BindingSource::Special
    } else {
        source
    }
}

fn infer_source(parameter: &ParameterDescriptor, context: &ParameterContext<'_>) -> BindingSource {
    let route_context = context.route_context();

    match route_context.action_type() {
        ODataActionType::EntitySet => {
            path_source_from_keys(parameter.name(), context).unwrap_or(BindingSource::Query)
        }
        ODataActionType::BoundOperation | ODataActionType::UnboundOperation => {
            let Some(operation) = route_context.operation() else {
                return BindingSource::Query;
            };

            if operation.parameter_named(parameter.name()).is_some() {
                return BindingSource::Path;
            }

            // A bound operation's implicit binding parameter is itself
            // path-resolved, so unmatched names still consult the key
            // set of the targeted entity.
            if operation.is_bound() {
                return path_source_from_keys(parameter.name(), context)
                    .unwrap_or(BindingSource::Query);
            }

            BindingSource::Query
        }
        _ => BindingSource::Query,
    }
}

/// The entity-set rule shared by direct access and bound operations: a
/// parameter is path-bound when it names an entity key or a key-segment
/// route parameter of the resolved template.
fn path_source_from_keys(name: &str, context: &ParameterContext<'_>) -> Option<BindingSource> {
    let route_context = context.route_context();

    if let Some(entity_set) = route_context.entity_set() {
        if entity_set.entity_type().key_named(name).is_some() {
            return Some(BindingSource::Path);
        }
    }

    if let Some(template) = context.path_template() {
        if template.maps_key_parameter(name) {
            return Some(BindingSource::Path);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VersioningOptions;
    use crate::mapping::{MappingServices, RouteMapping, VersionSelector};
    use crate::template::{KeySegmentTemplate, PathSegmentTemplate};
    use crate::version::{ApiVersion, ApiVersionModel};
    use odata_edm::{EdmModel, EdmOperation, EntitySet, EntityType, OperationParameter};
    use std::sync::Arc;

    fn sample_model() -> EdmModel {
        EdmModel::new()
            .entity_set(EntitySet::new("Orders", EntityType::new("Order").key("id")))
            .operation(
                EdmOperation::bound("Rate", "Order")
                    .parameter(OperationParameter::new("percent", "Edm.Double")),
            )
            .operation(
                EdmOperation::unbound("GetSalesTaxRate")
                    .parameter(OperationParameter::new("PostalCode", "Edm.String")),
            )
    }

    fn sample_mapping() -> RouteMapping {
        let services = Arc::new(
            MappingServices::new().with_model(ApiVersion::v1(), Arc::new(sample_model())),
        );
        RouteMapping::new("odata", VersionSelector::new([ApiVersion::v1()]), services)
    }

    fn orders_template() -> PathTemplate {
        PathTemplate::new()
            .segment(PathSegmentTemplate::EntitySet("Orders".to_string()))
            .segment(PathSegmentTemplate::Key(
                KeySegmentTemplate::new().mapping("id", "id"),
            ))
    }

    fn classify_on(
        controller: &str,
        action_name: &str,
        parameter: ParameterDescriptor,
        template: Option<PathTemplate>,
    ) -> Option<BindingSource> {
        let mapping = sample_mapping();
        let options = VersioningOptions::new();
        let action = ActionDescriptor::new(
            controller,
            action_name,
            ApiVersionModel::versioned([ApiVersion::v1()]),
        )
        .parameter(parameter.clone());
        let route_context =
            RouteBuilderContext::new(ApiVersion::v1(), &mapping, &action, &options);
        let context = ParameterContext::from_parts(&route_context, template);

        classify_parameter(&parameter, &context, &NullMetadataProvider).binding_source()
    }

    #[test]
    fn test_entity_key_parameter_binds_to_path() {
        let parameter = ParameterDescriptor::new("id", ParameterType::named("i32"));

        let source = classify_on("Orders", "get", parameter, Some(orders_template()));

        assert_eq!(source, Some(BindingSource::Path));
    }

    #[test]
    fn test_unmatched_parameter_binds_to_query() {
        let parameter = ParameterDescriptor::new("$top", ParameterType::named("String"));

        let source = classify_on("Orders", "get", parameter, Some(orders_template()));

        assert_eq!(source, Some(BindingSource::Query));
    }

    #[test]
    fn test_template_key_segment_binds_to_path() {
        // not an entity key, but the template maps it as a key parameter
        let template = PathTemplate::new()
            .segment(PathSegmentTemplate::EntitySet("Orders".to_string()))
            .segment(PathSegmentTemplate::Key(
                KeySegmentTemplate::new().mapping("id", "orderId"),
            ));
        let parameter = ParameterDescriptor::new("orderId", ParameterType::named("i32"));

        let source = classify_on("Orders", "get", parameter, Some(template));

        assert_eq!(source, Some(BindingSource::Path));
    }

    #[test]
    fn test_operation_parameter_binds_to_path() {
        let parameter = ParameterDescriptor::new("percent", ParameterType::named("f64"));

        let source = classify_on("Orders", "Rate", parameter, Some(orders_template()));

        assert_eq!(source, Some(BindingSource::Path));
    }

    #[test]
    fn test_bound_operation_falls_back_to_entity_keys() {
        // not an operation parameter, but the bound target's key
        let parameter = ParameterDescriptor::new("id", ParameterType::named("i32"));

        let source = classify_on("Orders", "Rate", parameter, Some(orders_template()));

        assert_eq!(source, Some(BindingSource::Path));
    }

    #[test]
    fn test_unbound_operation_unmatched_binds_to_query() {
        let parameter = ParameterDescriptor::new("id", ParameterType::named("i32"));

        let source = classify_on(
            "SalesTax",
            "GetSalesTaxRate",
            parameter,
            Some(PathTemplate::new().segment(PathSegmentTemplate::Operation(
                "GetSalesTaxRate".to_string(),
            ))),
        );

        assert_eq!(source, Some(BindingSource::Query));
    }

    #[test]
    fn test_explicit_custom_on_query_options_becomes_special() {
        let parameter = ParameterDescriptor::new("options", ParameterType::QueryOptions)
            .with_binding_source(BindingSource::Custom);

        let source = classify_on("Orders", "get", parameter, Some(orders_template()));

        assert_eq!(source, Some(BindingSource::Special));
    }

    #[test]
    fn test_explicit_custom_on_odata_path_becomes_special() {
        let parameter = ParameterDescriptor::new("path", ParameterType::ODataPath)
            .with_binding_source(BindingSource::Custom);

        let source = classify_on("Orders", "get", parameter, Some(orders_template()));

        assert_eq!(source, Some(BindingSource::Special));
    }

    #[test]
    fn test_other_explicit_sources_are_untouched() {
        for explicit in [
            BindingSource::Body,
            BindingSource::Header,
            BindingSource::Query,
            BindingSource::Services,
        ] {
            let parameter = ParameterDescriptor::new("value", ParameterType::QueryOptions)
                .with_binding_source(explicit);

            let source = classify_on("Orders", "get", parameter, Some(orders_template()));

            assert_eq!(source, Some(explicit));
        }
    }

    #[test]
    fn test_explicit_custom_on_named_type_is_untouched() {
        let parameter = ParameterDescriptor::new("value", ParameterType::named("MyBinder"))
            .with_binding_source(BindingSource::Custom);

        let source = classify_on("Orders", "get", parameter, Some(orders_template()));

        assert_eq!(source, Some(BindingSource::Custom));
    }

    #[test]
    fn test_metadata_provider_source_wins_over_inference() {
        struct BodyProvider;

        impl ModelMetadataProvider for BodyProvider {
            fn binding_source(&self, parameter_type: &ParameterType) -> Option<BindingSource> {
                match parameter_type {
                    ParameterType::Named(name) if name == "OrderDto" => Some(BindingSource::Body),
                    _ => None,
                }
            }
        }

        let mapping = sample_mapping();
        let options = VersioningOptions::new();
        let parameter = ParameterDescriptor::new("id", ParameterType::named("OrderDto"));
        let action = ActionDescriptor::new(
            "Orders",
            "get",
            ApiVersionModel::versioned([ApiVersion::v1()]),
        )
        .parameter(parameter.clone());
        let route_context =
            RouteBuilderContext::new(ApiVersion::v1(), &mapping, &action, &options);
        let context = ParameterContext::from_parts(&route_context, Some(orders_template()));

        // "id" would infer Path, but the provider's default wins first
        let classified = classify_parameter(&parameter, &context, &BodyProvider);

        assert_eq!(classified.binding_source(), Some(BindingSource::Body));
    }

    #[test]
    fn test_provider_custom_on_context_type_becomes_special() {
        struct CustomProvider;

        impl ModelMetadataProvider for CustomProvider {
            fn binding_source(&self, _parameter_type: &ParameterType) -> Option<BindingSource> {
                Some(BindingSource::Custom)
            }
        }

        let mapping = sample_mapping();
        let options = VersioningOptions::new();
        let parameter = ParameterDescriptor::new("options", ParameterType::QueryOptions);
        let action = ActionDescriptor::new(
            "Orders",
            "get",
            ApiVersionModel::versioned([ApiVersion::v1()]),
        )
        .parameter(parameter.clone());
        let route_context =
            RouteBuilderContext::new(ApiVersion::v1(), &mapping, &action, &options);
        let context = ParameterContext::from_parts(&route_context, Some(orders_template()));

        let classified = classify_parameter(&parameter, &context, &CustomProvider);

        assert_eq!(classified.binding_source(), Some(BindingSource::Special));
    }
}
