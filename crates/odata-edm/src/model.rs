//! The EDM container and its lookup operations

use crate::operation::EdmOperation;
use crate::types::{EntitySet, Singleton};

/// The schema of one OData service: entity sets, singletons, and
/// operations.
///
/// A model is assembled once during service configuration and read-only
/// afterwards. Name lookups are exact (EDM element names are canonical);
/// case-insensitive matching is reserved for parameter and key names at
/// the routing layer.
#[derive(Debug, Clone, Default)]
pub struct EdmModel {
    entity_sets: Vec<EntitySet>,
    singletons: Vec<Singleton>,
    operations: Vec<EdmOperation>,
}

impl EdmModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity set.
    pub fn entity_set(mut self, entity_set: EntitySet) -> Self {
        self.entity_sets.push(entity_set);
        self
    }

    /// Add a singleton.
    pub fn singleton(mut self, singleton: Singleton) -> Self {
        self.singletons.push(singleton);
        self
    }

    /// Add an operation.
    pub fn operation(mut self, operation: EdmOperation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Find an entity set by name.
    pub fn find_entity_set(&self, name: &str) -> Option<&EntitySet> {
        self.entity_sets.iter().find(|set| set.name() == name)
    }

    /// Find a singleton by name.
    pub fn find_singleton(&self, name: &str) -> Option<&Singleton> {
        self.singletons
            .iter()
            .find(|singleton| singleton.name() == name)
    }

    /// Find an operation bound to the given entity type.
    pub fn find_bound_operation(&self, name: &str, entity_type: &str) -> Option<&EdmOperation> {
        self.operations
            .iter()
            .find(|op| op.name() == name && op.binding() == Some(entity_type))
    }

    /// Find an unbound operation by name.
    pub fn find_unbound_operation(&self, name: &str) -> Option<&EdmOperation> {
        self.operations
            .iter()
            .find(|op| op.name() == name && !op.is_bound())
    }

    /// All entity sets, in declaration order.
    pub fn entity_sets(&self) -> &[EntitySet] {
        &self.entity_sets
    }

    /// All singletons, in declaration order.
    pub fn singletons(&self) -> &[Singleton] {
        &self.singletons
    }

    /// All operations, in declaration order.
    pub fn operations(&self) -> &[EdmOperation] {
        &self.operations
    }
}
