//! Boolean and conditional expression resolution.

use std::sync::Arc;

use skein_ir::{Expr, Literal, TypeId, Value};
use skein_types::PatternType;

use crate::session::ResolverSession;

const CONDITIONAL_CONTEXT_ERROR: &str =
    "this expression can't be used outside of conditions and 'whether %boolean%'";

fn keyword_literal(value: bool) -> Expr {
    Expr::Literal(Literal::new(Value::boolean(value), TypeId::BOOLEAN))
}

impl ResolverSession<'_> {
    /// Resolve a line into a boolean expression node.
    ///
    /// The keywords `true`/`false` (case-insensitive) resolve immediately,
    /// bypassing the general literal path. The candidate search is filtered
    /// to candidates declared to return exactly the boolean type; there is
    /// no list fallback. When `disallow_conditional` is set and the matched
    /// candidate is conditional-only, resolution fails with a reported
    /// contextual violation even though the pattern matched.
    pub fn resolve_boolean(&mut self, text: &str, disallow_conditional: bool) -> Option<Expr> {
        if text.eq_ignore_ascii_case("true") {
            return Some(keyword_literal(true));
        }
        if text.eq_ignore_ascii_case("false") {
            return Some(keyword_literal(false));
        }
        let expected = PatternType::single(TypeId::BOOLEAN);
        let recent = self.recent_expressions.snapshot();
        for candidate in &recent {
            if candidate.return_type().type_id != TypeId::BOOLEAN {
                continue;
            }
            let Some(expr) = self.try_match_expression(text, candidate, &expected) else {
                continue;
            };
            if disallow_conditional && candidate.is_conditional_only() {
                self.report(CONDITIONAL_CONTEXT_ERROR);
                return None;
            }
            self.recent_expressions.promote(candidate);
            tracing::debug!(candidate = candidate.name(), "boolean candidate matched");
            return Some(expr);
        }
        let syntax = self.syntax;
        for candidate in syntax.expressions_returning(TypeId::BOOLEAN) {
            if recent.iter().any(|seen| Arc::ptr_eq(seen, candidate)) {
                continue;
            }
            let Some(expr) = self.try_match_expression(text, candidate, &expected) else {
                continue;
            };
            if disallow_conditional && candidate.is_conditional_only() {
                self.report(CONDITIONAL_CONTEXT_ERROR);
                return None;
            }
            self.recent_expressions.promote(candidate);
            tracing::debug!(candidate = candidate.name(), "boolean candidate matched");
            return Some(expr);
        }
        None
    }
}
