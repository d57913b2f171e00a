//! Minimal entity data model (EDM) for versioned OData routing
//!
//! This crate holds just enough of an EDM for route expansion to classify
//! controller actions and build path templates: entity types with their key
//! properties, entity sets, singletons, and bound/unbound operations with
//! their parameter lists.
//!
//! Models are built once, up front, and consumed read-only afterwards:
//!
//! ```rust
//! use odata_edm::{EdmModel, EntitySet, EntityType, EdmOperation};
//!
//! let model = EdmModel::new()
//!     .entity_set(EntitySet::new(
//!         "Orders",
//!         EntityType::new("Order").key("id"),
//!     ))
//!     .operation(EdmOperation::bound("MostExpensive", "Order"));
//!
//! assert!(model.find_entity_set("Orders").is_some());
//! assert!(model.find_bound_operation("MostExpensive", "Order").is_some());
//! ```

mod model;
mod operation;
mod types;

pub use model::EdmModel;
pub use operation::{EdmOperation, OperationParameter};
pub use types::{EntitySet, EntityType, Singleton};
