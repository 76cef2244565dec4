//! Type registration, assignability, and coercion lookup.

use std::fmt;

use rustc_hash::FxHashMap;
use skein_ir::{TypeId, Value};

use crate::Arity;

/// Literal parsing function: raw text to a value, or `None` when the text is
/// not a literal of this type.
pub type LiteralParser = fn(&str) -> Option<Value>;

/// Conversion function from one value type's payload to another's.
pub type Coercion = fn(&Value) -> Option<Value>;

/// Error raised at type registration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// The singular or plural name is already taken by a registered type.
    DuplicateName(String),
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::DuplicateName(name) => {
                write!(f, "a type named '{name}' is already registered")
            }
        }
    }
}

impl std::error::Error for TypeError {}

/// Registration record for a value type.
pub struct TypeSpec {
    name: String,
    plural: String,
    parent: Option<TypeId>,
    literal_parser: Option<LiteralParser>,
}

impl TypeSpec {
    /// Describe a type by its singular and plural display names.
    ///
    /// The parent defaults to `object` unless overridden.
    pub fn new(name: impl Into<String>, plural: impl Into<String>) -> Self {
        TypeSpec {
            name: name.into(),
            plural: plural.into(),
            parent: None,
            literal_parser: None,
        }
    }

    /// Set the parent type in the assignability chain.
    #[must_use]
    pub fn parent(mut self, parent: TypeId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Attach a literal parser.
    #[must_use]
    pub fn literal_parser(mut self, parser: LiteralParser) -> Self {
        self.literal_parser = Some(parser);
        self
    }
}

/// A registered value type.
#[derive(Debug)]
pub struct TypeInfo {
    name: String,
    plural: String,
    parent: Option<TypeId>,
    literal_parser: Option<LiteralParser>,
}

impl TypeInfo {
    /// Singular display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plural display name.
    pub fn plural(&self) -> &str {
        &self.plural
    }

    /// Parent in the assignability chain (`None` only for the root).
    pub fn parent(&self) -> Option<TypeId> {
        self.parent
    }

    /// The literal parser, if this type has literal syntax.
    pub fn literal_parser(&self) -> Option<LiteralParser> {
        self.literal_parser
    }
}

/// Number literal parser: standard float syntax, finite values only.
fn parse_number(text: &str) -> Option<Value> {
    let n: f64 = text.parse().ok()?;
    if n.is_finite() {
        Some(Value::number(n))
    } else {
        None
    }
}

/// Registry of value types, their literal parsers, and coercions.
pub struct TypeRegistry {
    types: Vec<TypeInfo>,
    // Lowercased singular and plural names, each mapping to the type and the
    // arity that name denotes in a pattern slot.
    by_name: FxHashMap<String, (TypeId, Arity)>,
    coercions: FxHashMap<(TypeId, TypeId), Coercion>,
}

impl TypeRegistry {
    /// Create a registry with the builtin types pre-registered in the order
    /// fixed by the `TypeId` constants.
    pub fn new() -> Self {
        let mut registry = TypeRegistry {
            types: Vec::new(),
            by_name: FxHashMap::default(),
            coercions: FxHashMap::default(),
        };
        let object = registry.insert(TypeSpec::new("object", "objects"));
        debug_assert_eq!(object, TypeId::OBJECT);
        let boolean = registry.insert(TypeSpec::new("boolean", "booleans").parent(object));
        debug_assert_eq!(boolean, TypeId::BOOLEAN);
        let number = registry.insert(
            TypeSpec::new("number", "numbers")
                .parent(object)
                .literal_parser(parse_number),
        );
        debug_assert_eq!(number, TypeId::NUMBER);
        let string = registry.insert(TypeSpec::new("string", "strings").parent(object));
        debug_assert_eq!(string, TypeId::STRING);
        registry
    }

    /// Register a type. Non-root types without an explicit parent hang off
    /// `object`.
    pub fn register(&mut self, spec: TypeSpec) -> Result<TypeId, TypeError> {
        for name in [&spec.name, &spec.plural] {
            if self.by_name.contains_key(&name.to_ascii_lowercase()) {
                return Err(TypeError::DuplicateName(name.clone()));
            }
        }
        Ok(self.insert(spec))
    }

    fn insert(&mut self, spec: TypeSpec) -> TypeId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "registries are orders of magnitude smaller than u32::MAX"
        )]
        let id = TypeId::from_raw(self.types.len() as u32);
        let parent = match spec.parent {
            Some(parent) => Some(parent),
            None if self.types.is_empty() => None,
            None => Some(TypeId::OBJECT),
        };
        self.by_name
            .insert(spec.name.to_ascii_lowercase(), (id, Arity::Single));
        self.by_name
            .insert(spec.plural.to_ascii_lowercase(), (id, Arity::Plural));
        self.types.push(TypeInfo {
            name: spec.name,
            plural: spec.plural,
            parent,
            literal_parser: spec.literal_parser,
        });
        id
    }

    /// Look up a registered type.
    pub fn get(&self, id: TypeId) -> &TypeInfo {
        &self.types[id.raw() as usize]
    }

    /// Resolve a singular or plural display name (case-insensitive) to the
    /// type and the arity the name denotes.
    pub fn lookup_name(&self, name: &str) -> Option<(TypeId, Arity)> {
        self.by_name.get(&name.to_ascii_lowercase()).copied()
    }

    /// Whether a value of type `source` can stand where `target` is
    /// expected: `source` is `target` or has it in its parent chain.
    pub fn is_assignable(&self, target: TypeId, source: TypeId) -> bool {
        let mut current = Some(source);
        while let Some(id) = current {
            if id == target {
                return true;
            }
            current = self.get(id).parent();
        }
        false
    }

    /// Register a coercion from one type's values to another's.
    pub fn add_coercion(&mut self, from: TypeId, to: TypeId, convert: Coercion) {
        self.coercions.insert((from, to), convert);
    }

    /// Look up a registered coercion.
    pub fn coercion(&self, from: TypeId, to: TypeId) -> Option<Coercion> {
        self.coercions.get(&(from, to)).copied()
    }

    /// All registered types in registration order.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "registries are orders of magnitude smaller than u32::MAX"
    )]
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeInfo)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, info)| (TypeId::from_raw(i as u32), info))
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty (never true: builtins are always
    /// present).
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtins_match_constants() {
        let types = TypeRegistry::new();
        assert_eq!(types.get(TypeId::OBJECT).name(), "object");
        assert_eq!(types.get(TypeId::BOOLEAN).name(), "boolean");
        assert_eq!(types.get(TypeId::NUMBER).name(), "number");
        assert_eq!(types.get(TypeId::STRING).name(), "string");
        assert_eq!(types.len(), 4);
    }

    #[test]
    fn number_literal_parser() {
        let types = TypeRegistry::new();
        let parser = types.get(TypeId::NUMBER).literal_parser().unwrap();
        assert_eq!(parser("2.5"), Some(Value::number(2.5)));
        assert_eq!(parser("-3"), Some(Value::number(-3.0)));
        assert_eq!(parser("banana"), None);
        assert_eq!(parser("inf"), None);
        assert_eq!(parser("NaN"), None);
    }

    #[test]
    fn name_lookup_is_case_insensitive_and_arity_aware() {
        let types = TypeRegistry::new();
        assert_eq!(
            types.lookup_name("Number"),
            Some((TypeId::NUMBER, Arity::Single))
        );
        assert_eq!(
            types.lookup_name("NUMBERS"),
            Some((TypeId::NUMBER, Arity::Plural))
        );
        assert_eq!(types.lookup_name("nope"), None);
    }

    #[test]
    fn assignability_walks_the_parent_chain() {
        let mut types = TypeRegistry::new();
        let duration = types
            .register(TypeSpec::new("duration", "durations"))
            .unwrap();
        assert!(types.is_assignable(TypeId::OBJECT, duration));
        assert!(types.is_assignable(duration, duration));
        assert!(!types.is_assignable(duration, TypeId::OBJECT));
        assert!(!types.is_assignable(TypeId::NUMBER, duration));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut types = TypeRegistry::new();
        let err = types.register(TypeSpec::new("Number", "nums"));
        assert_eq!(err, Err(TypeError::DuplicateName("Number".to_string())));
    }

    #[test]
    fn coercion_round_trip() {
        let mut types = TypeRegistry::new();
        types.add_coercion(TypeId::NUMBER, TypeId::STRING, |v| {
            Some(Value::string(v.to_string()))
        });
        let convert = types.coercion(TypeId::NUMBER, TypeId::STRING).unwrap();
        assert_eq!(
            convert(&Value::number(4.0)),
            Some(Value::string("4".to_string()))
        );
        assert!(types.coercion(TypeId::STRING, TypeId::NUMBER).is_none());
    }
}
