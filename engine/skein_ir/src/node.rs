//! Runtime node traits and match metadata.
//!
//! Syntax registered with the engine supplies a factory producing a fresh,
//! uninitialized node; after a pattern match succeeds the node is
//! initialized with the bound operand expressions, the index of the pattern
//! alternative that matched, and the `ParseOutcome` the matcher deposited.

use std::fmt;

use crate::{Expr, TypeId};

/// Metadata produced by a successful pattern match.
///
/// Created per match attempt, consumed by the resolved node's initializer on
/// success, discarded on failure.
#[derive(Clone, Debug, Default)]
pub struct ParseOutcome {
    /// The text the pattern matched against.
    pub source: String,
    /// XOR of the parse marks of every matched choice alternative.
    pub mark: u32,
}

impl ParseOutcome {
    /// Create an outcome for the given matched text and combined mark.
    pub fn new(source: impl Into<String>, mark: u32) -> Self {
        ParseOutcome {
            source: source.into(),
            mark,
        }
    }
}

/// A typed, executable expression node produced by a syntax candidate's
/// factory.
///
/// `init` receives the operands bound during the match, in pattern order.
/// Returning `false` signals an initialization fault (a registration defect,
/// not a text-matching failure); the engine reports it and treats the
/// alternative as failed.
pub trait RuntimeExpr: fmt::Debug {
    /// Initialize the node from a successful match.
    fn init(&mut self, operands: Vec<Expr>, pattern_index: usize, outcome: ParseOutcome) -> bool;

    /// The value type this node actually returns at runtime.
    fn return_type(&self) -> TypeId;

    /// Whether this node yields a single value.
    ///
    /// Only consulted for dynamic-arity candidates, whose cardinality is
    /// knowable only after initialization.
    fn is_single(&self) -> bool {
        true
    }
}

/// An executable, untyped effect node.
pub trait RuntimeEffect: fmt::Debug {
    /// Initialize the node from a successful match.
    fn init(&mut self, operands: Vec<Expr>, pattern_index: usize, outcome: ParseOutcome) -> bool;
}

/// The header node of a structured block.
pub trait RuntimeSection: fmt::Debug {
    /// Initialize the node from a successful match.
    fn init(&mut self, operands: Vec<Expr>, pattern_index: usize, outcome: ParseOutcome) -> bool;
}

/// A resolved effect line.
pub type EffectNode = Box<dyn RuntimeEffect>;

/// A resolved section header line.
pub type SectionNode = Box<dyn RuntimeSection>;
