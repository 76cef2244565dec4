//! Skein Types - the type registry consumed by syntax resolution.
//!
//! A registered type carries its singular and plural display names (pattern
//! slots are written against them), an optional literal parser, and a parent
//! type that defines assignability: a value type is assignable to any of its
//! ancestors, and every type ultimately reaches the root `object` type.
//! Cross-type coercions are registered separately as plain conversion
//! functions and looked up by (from, to) pair when a matched node's runtime
//! return type disagrees with its declared one.
//!
//! Registries are built up front and treated as immutable snapshots for the
//! duration of a parse session; no registration occurs mid-resolution.

mod pattern_type;
mod registry;

pub use pattern_type::{Arity, PatternType};
pub use registry::{Coercion, LiteralParser, TypeError, TypeInfo, TypeRegistry, TypeSpec};
