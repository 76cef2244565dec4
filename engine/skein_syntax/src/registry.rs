//! Candidate registration and enumeration.

use std::fmt;
use std::sync::Arc;

use skein_ir::{RuntimeEffect, RuntimeExpr, RuntimeSection, TypeId};
use skein_pattern::{PatternError, PatternTemplate};
use skein_types::{PatternType, TypeRegistry};

use crate::candidate::{
    CandidateFlags, EffectCandidate, EffectFactory, ExprCandidate, ExprFactory, SectionCandidate,
    SectionFactory,
};

/// Error raised at candidate registration time.
#[derive(Debug)]
pub enum RegistrationError {
    /// The candidate declared no patterns.
    NoPatterns { candidate: String },
    /// One of the candidate's patterns failed to compile.
    Pattern {
        candidate: String,
        source: String,
        error: PatternError,
    },
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::NoPatterns { candidate } => {
                write!(f, "candidate '{candidate}' declares no patterns")
            }
            RegistrationError::Pattern {
                candidate,
                source,
                error,
            } => write!(
                f,
                "candidate '{candidate}' pattern '{source}' failed to compile: {error}"
            ),
        }
    }
}

impl std::error::Error for RegistrationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistrationError::NoPatterns { .. } => None,
            RegistrationError::Pattern { error, .. } => Some(error),
        }
    }
}

/// Builder for an expression candidate.
pub struct ExpressionBuilder {
    name: String,
    patterns: Vec<String>,
    factory: ExprFactory,
    return_type: PatternType,
    flags: CandidateFlags,
}

impl ExpressionBuilder {
    /// Start a candidate with its registration name, declared return type,
    /// and node factory.
    pub fn new(
        name: impl Into<String>,
        return_type: PatternType,
        factory: impl Fn() -> Box<dyn RuntimeExpr> + Send + Sync + 'static,
    ) -> Self {
        ExpressionBuilder {
            name: name.into(),
            patterns: Vec::new(),
            factory: Box::new(factory),
            return_type,
            flags: CandidateFlags::empty(),
        }
    }

    /// Add a pattern alternative; order is significant.
    #[must_use]
    pub fn pattern(mut self, source: impl Into<String>) -> Self {
        self.patterns.push(source.into());
        self
    }

    /// Mark the candidate's arity as knowable only after initialization.
    #[must_use]
    pub fn dynamic_arity(mut self) -> Self {
        self.flags |= CandidateFlags::DYNAMIC_ARITY;
        self
    }

    /// Restrict the expression to boolean condition contexts.
    #[must_use]
    pub fn conditional_only(mut self) -> Self {
        self.flags |= CandidateFlags::CONDITIONAL_ONLY;
        self
    }
}

/// Builder for an effect candidate.
pub struct EffectBuilder {
    name: String,
    patterns: Vec<String>,
    factory: EffectFactory,
}

impl EffectBuilder {
    pub fn new(
        name: impl Into<String>,
        factory: impl Fn() -> Box<dyn RuntimeEffect> + Send + Sync + 'static,
    ) -> Self {
        EffectBuilder {
            name: name.into(),
            patterns: Vec::new(),
            factory: Box::new(factory),
        }
    }

    /// Add a pattern alternative; order is significant.
    #[must_use]
    pub fn pattern(mut self, source: impl Into<String>) -> Self {
        self.patterns.push(source.into());
        self
    }
}

/// Builder for a section candidate.
pub struct SectionBuilder {
    name: String,
    patterns: Vec<String>,
    factory: SectionFactory,
}

impl SectionBuilder {
    pub fn new(
        name: impl Into<String>,
        factory: impl Fn() -> Box<dyn RuntimeSection> + Send + Sync + 'static,
    ) -> Self {
        SectionBuilder {
            name: name.into(),
            patterns: Vec::new(),
            factory: Box::new(factory),
        }
    }

    /// Add a pattern alternative; order is significant.
    #[must_use]
    pub fn pattern(mut self, source: impl Into<String>) -> Self {
        self.patterns.push(source.into());
        self
    }
}

/// Ordered registry of syntax candidates per category.
#[derive(Debug, Default)]
pub struct SyntaxRegistry {
    expressions: Vec<Arc<ExprCandidate>>,
    effects: Vec<Arc<EffectCandidate>>,
    sections: Vec<Arc<SectionCandidate>>,
}

impl SyntaxRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an expression candidate, compiling its patterns against the
    /// type registry.
    pub fn register_expression(
        &mut self,
        builder: ExpressionBuilder,
        types: &TypeRegistry,
    ) -> Result<(), RegistrationError> {
        let patterns = compile_patterns(&builder.name, &builder.patterns, types)?;
        self.expressions.push(Arc::new(ExprCandidate::new(
            builder.name,
            patterns,
            builder.factory,
            builder.return_type,
            builder.flags,
        )));
        Ok(())
    }

    /// Register an effect candidate.
    pub fn register_effect(
        &mut self,
        builder: EffectBuilder,
        types: &TypeRegistry,
    ) -> Result<(), RegistrationError> {
        let patterns = compile_patterns(&builder.name, &builder.patterns, types)?;
        self.effects.push(Arc::new(EffectCandidate::new(
            builder.name,
            patterns,
            builder.factory,
        )));
        Ok(())
    }

    /// Register a section candidate.
    pub fn register_section(
        &mut self,
        builder: SectionBuilder,
        types: &TypeRegistry,
    ) -> Result<(), RegistrationError> {
        let patterns = compile_patterns(&builder.name, &builder.patterns, types)?;
        self.sections.push(Arc::new(SectionCandidate::new(
            builder.name,
            patterns,
            builder.factory,
        )));
        Ok(())
    }

    /// Expression candidates in registration order.
    pub fn expressions(&self) -> &[Arc<ExprCandidate>] {
        &self.expressions
    }

    /// Expression candidates whose declared return value type is exactly
    /// `type_id`, in registration order.
    pub fn expressions_returning(
        &self,
        type_id: TypeId,
    ) -> impl Iterator<Item = &Arc<ExprCandidate>> {
        self.expressions
            .iter()
            .filter(move |candidate| candidate.return_type().type_id == type_id)
    }

    /// Effect candidates in registration order.
    pub fn effects(&self) -> &[Arc<EffectCandidate>] {
        &self.effects
    }

    /// Section candidates in registration order.
    pub fn sections(&self) -> &[Arc<SectionCandidate>] {
        &self.sections
    }
}

fn compile_patterns(
    candidate: &str,
    sources: &[String],
    types: &TypeRegistry,
) -> Result<Vec<PatternTemplate>, RegistrationError> {
    if sources.is_empty() {
        return Err(RegistrationError::NoPatterns {
            candidate: candidate.to_owned(),
        });
    }
    sources
        .iter()
        .map(|source| {
            PatternTemplate::compile(source, types).map_err(|error| RegistrationError::Pattern {
                candidate: candidate.to_owned(),
                source: source.clone(),
                error,
            })
        })
        .collect()
}
