//! Comma/"and"/"or" list literal splitting.

use skein_ir::{Expr, ExpressionList, LiteralList};
use skein_pattern::opaque_run_end;
use skein_types::PatternType;
use smallvec::SmallVec;

use crate::session::ResolverSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeparatorKind {
    Comma,
    And,
    Or,
}

/// Match the separator grammar anchored at `index`: `\s*(,)\s*` or
/// `\s+(and|or)\s+`, case-insensitive. Returns the end of the separator run
/// and its kind.
fn separator_at(text: &str, index: usize) -> Option<(usize, SeparatorKind)> {
    let bytes = text.as_bytes();
    let mut i = index;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if bytes.get(i) == Some(&b',') {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        return Some((i, SeparatorKind::Comma));
    }
    if i == index {
        // Word separators require whitespace on both sides.
        return None;
    }
    for (word, kind) in [("and", SeparatorKind::And), ("or", SeparatorKind::Or)] {
        let end = i + word.len();
        if end > bytes.len() || !bytes[i..end].eq_ignore_ascii_case(word.as_bytes()) {
            continue;
        }
        let mut j = end;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if j > end {
            return Some((j, kind));
        }
    }
    None
}

impl ResolverSession<'_> {
    /// Split a line into comma/"and"/"or" separated elements, resolve each
    /// element, and build the composite list node.
    ///
    /// Only meaningful when the expected type is plural. Fails as a whole if
    /// a separator has no preceding element or any element fails to resolve.
    /// A single-element "list" collapses to the bare element node.
    pub fn resolve_list_literal(&mut self, text: &str, expected: &PatternType) -> Option<Expr> {
        debug_assert!(
            !expected.is_single(),
            "list literals require a plural expected type"
        );
        let mut elements: SmallVec<[String; 4]> = SmallVec::new();
        let mut separators: SmallVec<[SeparatorKind; 4]> = SmallVec::new();
        let mut buf = String::new();
        let mut i = 0;
        while i < text.len() {
            let run = opaque_run_end(text, i);
            if run > i {
                // Quoted or escaped span: separators inside do not count.
                buf.push_str(&text[i..run]);
                i = run;
                continue;
            }
            let Some(c) = text[i..].chars().next() else {
                break;
            };
            if c == ' ' || c == ',' {
                if let Some((end, kind)) = separator_at(text, i) {
                    if buf.is_empty() {
                        // A separator with no preceding element.
                        return None;
                    }
                    elements.push(std::mem::take(&mut buf));
                    separators.push(kind);
                    i = end;
                    continue;
                }
            }
            buf.push(c);
            i += c.len_utf8();
        }
        if !buf.is_empty() {
            elements.push(buf);
        }
        if elements.is_empty() {
            return None;
        }
        if elements.len() == 1 && elements[0] == text {
            // Re-resolving identical text cannot succeed where the literal
            // and candidate paths already failed, and would recurse without
            // bound.
            return None;
        }
        // "and" wins permanently; "or" keeps a not-yet-true state false;
        // no word separator at all defaults to conjunctive.
        let mut is_and: Option<bool> = None;
        for kind in &separators {
            match kind {
                SeparatorKind::And => is_and = Some(true),
                SeparatorKind::Or => is_and = Some(is_and == Some(true)),
                SeparatorKind::Comma => {}
            }
        }
        let conjunctive = is_and.unwrap_or(true);
        let mut items = Vec::with_capacity(elements.len());
        let mut all_literal = true;
        for element in &elements {
            let node = self.resolve_expression(element, expected)?;
            all_literal &= matches!(node, Expr::Literal(_));
            items.push(node);
        }
        if items.len() == 1 {
            return items.pop();
        }
        tracing::debug!(elements = items.len(), conjunctive, "list literal split");
        if all_literal {
            let literals = items
                .into_iter()
                .filter_map(|node| match node {
                    Expr::Literal(literal) => Some(literal),
                    _ => None,
                })
                .collect();
            return Some(Expr::LiteralList(LiteralList::new(
                literals,
                expected.type_id,
                conjunctive,
            )));
        }
        Some(Expr::ExpressionList(ExpressionList::new(
            items,
            expected.type_id,
            conjunctive,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn comma_separator_swallows_surrounding_whitespace() {
        assert_eq!(separator_at("1 , 2", 1), Some((4, SeparatorKind::Comma)));
        assert_eq!(separator_at("1,2", 1), Some((2, SeparatorKind::Comma)));
    }

    #[test]
    fn word_separators_need_whitespace_on_both_sides() {
        assert_eq!(separator_at("1 and 2", 1), Some((6, SeparatorKind::And)));
        assert_eq!(separator_at("1 OR 2", 1), Some((5, SeparatorKind::Or)));
        assert_eq!(separator_at("1 and2", 1), None);
        assert_eq!(separator_at("1 android 2", 1), None);
    }

    #[test]
    fn plain_spaces_are_not_separators() {
        assert_eq!(separator_at("foo bar", 3), None);
    }

    #[test]
    fn oxford_comma_is_a_comma_separator() {
        // ", and" matches the comma branch; the word lands in the next
        // element.
        assert_eq!(separator_at("1, and 2", 1), Some((3, SeparatorKind::Comma)));
    }
}
