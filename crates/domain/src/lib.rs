//! Domain layer for the Orders API
//!
//! Contains the order vocabulary, route keys used for metric labelling and
//! fault lookup, and domain errors. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
