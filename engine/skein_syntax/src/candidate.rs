//! Immutable syntax candidate records.

use std::fmt;

use bitflags::bitflags;
use skein_ir::{RuntimeEffect, RuntimeExpr, RuntimeSection};
use skein_pattern::PatternTemplate;
use skein_types::PatternType;

bitflags! {
    /// Capability flags carried by a candidate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CandidateFlags: u8 {
        /// The candidate's true arity is only knowable after initialization;
        /// it is exempt from the static arity pre-check.
        const DYNAMIC_ARITY = 1 << 0;
        /// The expression is usable only inside boolean-context conditions.
        const CONDITIONAL_ONLY = 1 << 1;
    }
}

/// Factory producing a fresh, uninitialized expression node.
pub type ExprFactory = Box<dyn Fn() -> Box<dyn RuntimeExpr> + Send + Sync>;

/// Factory producing a fresh, uninitialized effect node.
pub type EffectFactory = Box<dyn Fn() -> Box<dyn RuntimeEffect> + Send + Sync>;

/// Factory producing a fresh, uninitialized section node.
pub type SectionFactory = Box<dyn Fn() -> Box<dyn RuntimeSection> + Send + Sync>;

/// A registered expression syntax.
pub struct ExprCandidate {
    name: String,
    patterns: Vec<PatternTemplate>,
    factory: ExprFactory,
    return_type: PatternType,
    flags: CandidateFlags,
}

impl ExprCandidate {
    pub(crate) fn new(
        name: String,
        patterns: Vec<PatternTemplate>,
        factory: ExprFactory,
        return_type: PatternType,
        flags: CandidateFlags,
    ) -> Self {
        ExprCandidate {
            name,
            patterns,
            factory,
            return_type,
            flags,
        }
    }

    /// The candidate's registration name, used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pattern alternatives in declared order.
    pub fn patterns(&self) -> &[PatternTemplate] {
        &self.patterns
    }

    /// Produce a fresh, uninitialized node.
    pub fn instantiate(&self) -> Box<dyn RuntimeExpr> {
        (self.factory)()
    }

    /// The declared return type and arity.
    pub fn return_type(&self) -> PatternType {
        self.return_type
    }

    /// The candidate's capability flags.
    pub fn flags(&self) -> CandidateFlags {
        self.flags
    }

    /// Whether the candidate's arity is only knowable after initialization.
    pub fn is_dynamic_arity(&self) -> bool {
        self.flags.contains(CandidateFlags::DYNAMIC_ARITY)
    }

    /// Whether the expression is restricted to condition contexts.
    pub fn is_conditional_only(&self) -> bool {
        self.flags.contains(CandidateFlags::CONDITIONAL_ONLY)
    }
}

impl fmt::Debug for ExprCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExprCandidate")
            .field("name", &self.name)
            .field("patterns", &self.patterns.len())
            .field("return_type", &self.return_type)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

/// A registered effect syntax.
pub struct EffectCandidate {
    name: String,
    patterns: Vec<PatternTemplate>,
    factory: EffectFactory,
}

impl EffectCandidate {
    pub(crate) fn new(name: String, patterns: Vec<PatternTemplate>, factory: EffectFactory) -> Self {
        EffectCandidate {
            name,
            patterns,
            factory,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn patterns(&self) -> &[PatternTemplate] {
        &self.patterns
    }

    pub fn instantiate(&self) -> Box<dyn RuntimeEffect> {
        (self.factory)()
    }
}

impl fmt::Debug for EffectCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectCandidate")
            .field("name", &self.name)
            .field("patterns", &self.patterns.len())
            .finish_non_exhaustive()
    }
}

/// A registered section-header syntax.
pub struct SectionCandidate {
    name: String,
    patterns: Vec<PatternTemplate>,
    factory: SectionFactory,
}

impl SectionCandidate {
    pub(crate) fn new(
        name: String,
        patterns: Vec<PatternTemplate>,
        factory: SectionFactory,
    ) -> Self {
        SectionCandidate {
            name,
            patterns,
            factory,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn patterns(&self) -> &[PatternTemplate] {
        &self.patterns
    }

    pub fn instantiate(&self) -> Box<dyn RuntimeSection> {
        (self.factory)()
    }
}

impl fmt::Debug for SectionCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionCandidate")
            .field("name", &self.name)
            .field("patterns", &self.patterns.len())
            .finish_non_exhaustive()
    }
}
