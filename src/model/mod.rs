//! # Query Entity Model
//!
//! Clean DTOs shared by the parser and the validator.
//! This module is pure data — no I/O, no state, no schema knowledge.

pub mod entity;
pub mod prop_path;
pub mod property_map;
pub mod value;

pub use entity::{Direction, Entity, NodePattern, RelPattern};
pub use prop_path::PropertyPath;
pub use property_map::PropertyMap;
pub use value::{Value, ValueKind};
