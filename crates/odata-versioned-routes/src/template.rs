//! Structured path templates
//!
//! A path template is the parsed form of a route template string: a
//! sequence of typed segments, some of which declare named parameter
//! mappings. Parsing itself is performed by an external
//! [`PathTemplateHandler`]; this module only defines the structure the
//! handler produces and the handler seam.

use crate::mapping::ServiceScope;
use crate::version::ApiVersion;
use smallvec::SmallVec;

/// Number of segments stored inline. OData routes rarely exceed an entity
/// set, a key, and an operation segment.
const STACK_SEGMENTS: usize = 4;

/// A key segment with its key-property to route-parameter mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySegmentTemplate {
    mappings: SmallVec<[(String, String); 2]>,
}

impl KeySegmentTemplate {
    /// Create an empty key segment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a key property to a route parameter name.
    pub fn mapping(mut self, key_property: impl Into<String>, parameter: impl Into<String>) -> Self {
        self.mappings.push((key_property.into(), parameter.into()));
        self
    }

    /// The (key property, route parameter) pairs, in declaration order.
    pub fn parameter_mappings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.mappings
            .iter()
            .map(|(property, parameter)| (property.as_str(), parameter.as_str()))
    }

    /// Whether any mapping resolves to the given route parameter name,
    /// ignoring ASCII case.
    pub fn maps_parameter(&self, name: &str) -> bool {
        self.mappings
            .iter()
            .any(|(_, parameter)| parameter.eq_ignore_ascii_case(name))
    }
}

/// One segment of a structured path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegmentTemplate {
    /// An entity set segment, e.g. `Orders`
    EntitySet(String),
    /// A singleton segment, e.g. `Me`
    Singleton(String),
    /// An entity key segment with its parameter mappings
    Key(KeySegmentTemplate),
    /// A bound or unbound operation segment
    Operation(String),
    /// The `$metadata` segment
    Metadata,
}

/// The parsed form of a route template string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTemplate {
    segments: SmallVec<[PathSegmentTemplate; STACK_SEGMENTS]>,
}

impl PathTemplate {
    /// Create an empty template (the service root).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a template from segments.
    pub fn from_segments(segments: impl IntoIterator<Item = PathSegmentTemplate>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// Append a segment.
    pub fn segment(mut self, segment: PathSegmentTemplate) -> Self {
        self.segments.push(segment);
        self
    }

    /// The segments, in path order.
    pub fn segments(&self) -> &[PathSegmentTemplate] {
        &self.segments
    }

    /// Whether any key segment maps a route parameter with the given
    /// name, ignoring ASCII case.
    pub fn maps_key_parameter(&self, name: &str) -> bool {
        self.segments.iter().any(|segment| match segment {
            PathSegmentTemplate::Key(key) => key.maps_parameter(name),
            _ => false,
        })
    }
}

/// The external path-template parsing engine.
///
/// Given a raw path string, produces the structured template for it, or
/// `None` when the path has no representation under the scope's model;
/// the caller treats that as an unroutable action, not an error. The
/// handler receives the mapping's own [`ServiceScope`] and the version
/// being expanded so entity-model lookups resolve against the correct
/// versioned model.
pub trait PathTemplateHandler: Send + Sync {
    /// Parse a raw path string into a structured template.
    fn parse_template(
        &self,
        path: &str,
        scope: &dyn ServiceScope,
        version: &ApiVersion,
    ) -> Option<PathTemplate>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parameter_lookup_is_case_insensitive() {
        let template = PathTemplate::new()
            .segment(PathSegmentTemplate::EntitySet("Orders".to_string()))
            .segment(PathSegmentTemplate::Key(
                KeySegmentTemplate::new().mapping("Id", "Id"),
            ));

        assert!(template.maps_key_parameter("id"));
        assert!(template.maps_key_parameter("ID"));
        assert!(!template.maps_key_parameter("region"));
    }

    #[test]
    fn test_empty_template_maps_nothing() {
        assert!(!PathTemplate::new().maps_key_parameter("id"));
    }
}
