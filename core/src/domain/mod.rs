//! Domain layer: entities and value objects of the sign-up flow.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
