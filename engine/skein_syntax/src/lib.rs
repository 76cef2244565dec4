//! Skein Syntax - candidate registration for the Skein engine.
//!
//! A syntax candidate is an immutable registration record: the ordered
//! pattern alternatives of a surface form, a factory producing a fresh
//! uninitialized node, and (for expressions) the declared return type with
//! its arity plus capability flags. Candidates are compiled once at
//! registration time, held behind `Arc`, and referenced (never copied) by
//! the resolution engines; their `Arc` pointer is their identity.
//!
//! Capabilities the resolution engines need to know about are explicit
//! flags, not type inspection: `DYNAMIC_ARITY` for candidates whose true
//! cardinality is only knowable after initialization, `CONDITIONAL_ONLY`
//! for boolean expressions usable only inside condition contexts.

mod candidate;
mod registry;

pub use candidate::{
    CandidateFlags, EffectCandidate, EffectFactory, ExprCandidate, ExprFactory, SectionCandidate,
    SectionFactory,
};
pub use registry::{
    EffectBuilder, ExpressionBuilder, RegistrationError, SectionBuilder, SyntaxRegistry,
};
