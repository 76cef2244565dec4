//! Expression resolution and shared candidate matching.

use std::sync::Arc;

use skein_ir::{Expr, Literal, TypeId};
use skein_pattern::{match_pattern, parse_quoted};
use skein_syntax::ExprCandidate;
use skein_types::{Arity, PatternType};

use crate::convert::ConvertedExpr;
use crate::session::ResolverSession;

impl ResolverSession<'_> {
    /// Resolve a line of script text into a typed expression node.
    ///
    /// Tries, in order: the literal fast path, the candidate search
    /// (most-recently-successful first), and for plural expected types the
    /// list literal fallback. Returns `None` when nothing matched; a
    /// successful match promotes its candidate in the cache.
    ///
    /// # Panics
    /// Boolean resolution has its own entry point with the conditional
    /// restriction; calling this with a boolean expected type is a
    /// programming error.
    pub fn resolve_expression(&mut self, text: &str, expected: &PatternType) -> Option<Expr> {
        assert!(
            expected.type_id != TypeId::BOOLEAN,
            "boolean expressions must be resolved through resolve_boolean"
        );
        if let Some(literal) = self.resolve_literal(text, expected) {
            return Some(literal);
        }
        let recent = self.recent_expressions.snapshot();
        for candidate in &recent {
            if let Some(expr) = self.try_match_expression(text, candidate, expected) {
                self.recent_expressions.promote(candidate);
                tracing::debug!(candidate = candidate.name(), "expression candidate matched");
                return Some(expr);
            }
        }
        let syntax = self.syntax;
        for candidate in syntax.expressions() {
            if recent.iter().any(|seen| Arc::ptr_eq(seen, candidate)) {
                continue;
            }
            if let Some(expr) = self.try_match_expression(text, candidate, expected) {
                self.recent_expressions.promote(candidate);
                tracing::debug!(candidate = candidate.name(), "expression candidate matched");
                return Some(expr);
            }
        }
        if !expected.is_single() {
            return self.resolve_list_literal(text, expected);
        }
        None
    }

    /// Literal fast path: the literal parser of every type assignable to the
    /// expected one, then the quoted-string resolver when a string is
    /// expected.
    fn resolve_literal(&mut self, text: &str, expected: &PatternType) -> Option<Expr> {
        let types = self.types;
        for (id, info) in types.iter() {
            if !types.is_assignable(expected.type_id, id) {
                continue;
            }
            let Some(parser) = info.literal_parser() else {
                continue;
            };
            if let Some(value) = parser(text) {
                return Some(Expr::Literal(Literal::new(value, id)));
            }
        }
        if expected.type_id == TypeId::STRING && types.get(TypeId::STRING).literal_parser().is_none()
        {
            return parse_quoted(text, self);
        }
        None
    }

    /// Try one candidate's pattern alternatives in declared order.
    ///
    /// A failed coercion ends the whole attempt for the candidate; an
    /// initialization fault or a runtime-plural-where-single-expected fault
    /// is reported and the next alternative is tried.
    pub(crate) fn try_match_expression(
        &mut self,
        text: &str,
        candidate: &Arc<ExprCandidate>,
        expected: &PatternType,
    ) -> Option<Expr> {
        for (index, template) in candidate.patterns().iter().enumerate() {
            let Some(output) = match_pattern(template, text, self) else {
                continue;
            };
            let declared = candidate.return_type();
            if declared.arity == Arity::Plural
                && expected.is_single()
                && !candidate.is_dynamic_arity()
            {
                // Statically plural; cannot satisfy a singular caller.
                continue;
            }
            let mut node = candidate.instantiate();
            if !node.init(output.operands, index, output.outcome) {
                self.report(format!(
                    "parsing of '{}' succeeded, but it couldn't be initialized",
                    candidate.name()
                ));
                continue;
            }
            let actual = node.return_type();
            if !self.types.is_assignable(declared.type_id, actual) {
                if let Some(convert) = self.types.coercion(actual, declared.type_id) {
                    tracing::debug!(
                        candidate = candidate.name(),
                        "return type coerced to the declared type"
                    );
                    return Some(Expr::Runtime(Box::new(ConvertedExpr::new(
                        node,
                        declared.type_id,
                        convert,
                    ))));
                }
                self.report(format!(
                    "unmatching return types: expected {} or a subtype, but found {}",
                    self.types.get(declared.type_id).name(),
                    self.types.get(actual).name(),
                ));
                return None;
            }
            if candidate.is_dynamic_arity() && expected.is_single() && !node.is_single() {
                self.report("expected a single value, but multiple were given");
                continue;
            }
            return Some(Expr::Runtime(node));
        }
        self.report(format!("can't understand the expression: '{text}'"));
        None
    }
}
