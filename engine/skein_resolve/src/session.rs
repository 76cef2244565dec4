//! The resolution session owning all shared mutable state.

use skein_diagnostic::{Diagnostic, DiagnosticLog};
use skein_ir::{Expr, TypeId};
use skein_pattern::SlotResolver;
use skein_syntax::{EffectCandidate, ExprCandidate, SectionCandidate, SyntaxRegistry};
use skein_types::{PatternType, TypeRegistry};

use crate::mru::MruCache;

/// A syntax resolution session.
///
/// Owns the per-category move-to-front caches and the diagnostic log;
/// borrows the registries, which are immutable for the session's lifetime.
/// The caches adapt monotonically across calls and are never cleared, so a
/// session should live as long as the parse it serves. Sessions are not
/// shareable across threads; parallel parsing uses one session per thread.
pub struct ResolverSession<'r> {
    pub(crate) types: &'r TypeRegistry,
    pub(crate) syntax: &'r SyntaxRegistry,
    pub(crate) recent_expressions: MruCache<ExprCandidate>,
    pub(crate) recent_effects: MruCache<EffectCandidate>,
    pub(crate) recent_sections: MruCache<SectionCandidate>,
    pub(crate) diagnostics: DiagnosticLog,
}

impl<'r> ResolverSession<'r> {
    /// Create a session over the given registries.
    pub fn new(types: &'r TypeRegistry, syntax: &'r SyntaxRegistry) -> Self {
        ResolverSession {
            types,
            syntax,
            recent_expressions: MruCache::new(),
            recent_effects: MruCache::new(),
            recent_sections: MruCache::new(),
            diagnostics: DiagnosticLog::new(),
        }
    }

    /// The type registry this session resolves against.
    pub fn types(&self) -> &TypeRegistry {
        self.types
    }

    /// Everything reported during resolution so far.
    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }

    /// Drain the diagnostics reported so far.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }

    pub(crate) fn report(&mut self, message: impl Into<String>) {
        self.diagnostics.report(Diagnostic::error(message));
    }
}

impl SlotResolver for ResolverSession<'_> {
    fn resolve_value(&mut self, text: &str, expected: &PatternType) -> Option<Expr> {
        if expected.type_id == TypeId::BOOLEAN {
            self.resolve_boolean(text, true)
        } else {
            self.resolve_expression(text, expected)
        }
    }

    fn resolve_boolean(&mut self, text: &str, disallow_conditional: bool) -> Option<Expr> {
        ResolverSession::resolve_boolean(self, text, disallow_conditional)
    }
}
