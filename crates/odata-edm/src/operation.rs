//! Bound and unbound operations (OData actions and functions)

/// A declared parameter of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationParameter {
    name: String,
    parameter_type: String,
}

impl OperationParameter {
    /// Create an operation parameter with its EDM type name.
    pub fn new(name: impl Into<String>, parameter_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameter_type: parameter_type.into(),
        }
    }

    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The EDM type name of the parameter.
    pub fn parameter_type(&self) -> &str {
        &self.parameter_type
    }
}

/// An OData action or function, either bound to an entity type or exposed
/// independently at the service root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdmOperation {
    name: String,
    binding: Option<String>,
    binds_collection: bool,
    parameters: Vec<OperationParameter>,
}

impl EdmOperation {
    /// Create an operation bound to the given entity type.
    ///
    /// The binding defaults to a single entity; use
    /// [`binds_collection`](Self::binds_collection) for operations bound to
    /// the whole collection.
    pub fn bound(name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            binding: Some(entity_type.into()),
            binds_collection: false,
            parameters: Vec::new(),
        }
    }

    /// Create an unbound operation.
    pub fn unbound(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            binding: None,
            binds_collection: false,
            parameters: Vec::new(),
        }
    }

    /// Mark a bound operation as binding to the entity collection rather
    /// than a single entity.
    pub fn binds_collection(mut self) -> Self {
        self.binds_collection = true;
        self
    }

    /// Add a declared parameter.
    pub fn parameter(mut self, parameter: OperationParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// The operation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the operation is bound to an entity type.
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// The entity type the operation is bound to, if any.
    pub fn binding(&self) -> Option<&str> {
        self.binding.as_deref()
    }

    /// Whether a bound operation binds to the collection instead of a
    /// single entity.
    pub fn is_collection_bound(&self) -> bool {
        self.binds_collection
    }

    /// The declared parameters, in declaration order.
    pub fn parameters(&self) -> &[OperationParameter] {
        &self.parameters
    }

    /// Find a declared parameter by name, ignoring ASCII case.
    pub fn parameter_named(&self, name: &str) -> Option<&OperationParameter> {
        self.parameters
            .iter()
            .find(|parameter| parameter.name().eq_ignore_ascii_case(name))
    }
}
