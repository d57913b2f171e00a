//! Route descriptors and the de-duplicating route set

use crate::template::PathTemplate;

/// One concrete route produced for an action: the route name, the
/// rendered template string, the structured path template, and the
/// mapping's route prefix.
///
/// Two descriptors are equivalent iff their `(template, name)` pair
/// matches case-insensitively; that pair is the de-duplication key used
/// during expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    name: String,
    template: String,
    path_template: Option<PathTemplate>,
    prefix: Option<String>,
}

impl RouteDescriptor {
    /// Create a route descriptor.
    pub fn new(
        name: impl Into<String>,
        template: impl Into<String>,
        path_template: Option<PathTemplate>,
        prefix: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            path_template,
            prefix,
        }
    }

    /// The route name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rendered route template string.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The structured path template, when one was resolved.
    pub fn path_template(&self) -> Option<&PathTemplate> {
        self.path_template.as_ref()
    }

    /// The route prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The case-normalized `(template, name)` de-duplication key.
    pub fn route_key(&self) -> (String, String) {
        (
            self.template.to_ascii_lowercase(),
            self.name.to_ascii_lowercase(),
        )
    }

    /// Whether two descriptors address the same route.
    pub fn same_route(&self, other: &RouteDescriptor) -> bool {
        self.template.eq_ignore_ascii_case(&other.template)
            && self.name.eq_ignore_ascii_case(&other.name)
    }
}

/// An insertion-ordered collection of values keyed by route descriptor,
/// discarding entries whose `(template, name)` key was already seen.
///
/// Iteration order is attempt order, which keeps expansion output
/// deterministic for identical inputs.
#[derive(Debug, Default)]
pub(crate) struct RouteSet<T> {
    entries: Vec<T>,
    seen: std::collections::HashSet<(String, String)>,
}

impl<T> RouteSet<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            seen: std::collections::HashSet::new(),
        }
    }

    /// Insert a value under a descriptor's [`route_key`]. Returns `false`
    /// when an equivalent route was already present.
    ///
    /// [`route_key`]: RouteDescriptor::route_key
    pub(crate) fn insert(&mut self, key: (String, String), value: T) -> bool {
        if self.seen.insert(key) {
            self.entries.push(value);
            true
        } else {
            false
        }
    }

    pub(crate) fn into_vec(self) -> Vec<T> {
        self.entries
    }
}
