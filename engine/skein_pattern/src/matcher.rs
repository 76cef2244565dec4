//! Anchored trial-matching of compiled templates.

use skein_ir::{Expr, ParseOutcome, TypeId};
use skein_types::PatternType;
use smallvec::{smallvec, SmallVec};

use crate::template::{PatternElement, PatternTemplate};

/// Callback seam through which expression slots are resolved.
///
/// The resolution session implements this; the matcher hands it the slot's
/// candidate sub-text and expected type and uses whatever comes back as the
/// bound operand.
pub trait SlotResolver {
    /// Resolve a non-boolean slot.
    fn resolve_value(&mut self, text: &str, expected: &PatternType) -> Option<Expr>;

    /// Resolve a boolean slot.
    fn resolve_boolean(&mut self, text: &str, disallow_conditional: bool) -> Option<Expr>;
}

/// Everything a successful match deposits.
#[derive(Debug)]
pub struct MatchOutput {
    /// Bound sub-expressions in pattern order.
    pub operands: Vec<Expr>,
    pub outcome: ParseOutcome,
}

#[derive(Default)]
struct MatchState {
    operands: Vec<Expr>,
    mark: u32,
}

impl MatchState {
    fn save(&self) -> (usize, u32) {
        (self.operands.len(), self.mark)
    }

    fn restore(&mut self, (len, mark): (usize, u32)) {
        self.operands.truncate(len);
        self.mark = mark;
    }
}

/// What remains to be matched after the current element sequence.
enum Cont<'a> {
    Done,
    Seq(&'a [PatternElement], &'a Cont<'a>),
}

/// Attempt to match `text` in full against a compiled template.
///
/// Expression slots try candidate end offsets longest-first and resolve the
/// sub-text through `resolver`; failed branches roll back any operands they
/// bound. Returns the bound operands and the match outcome on success.
pub fn match_pattern(
    template: &PatternTemplate,
    text: &str,
    resolver: &mut dyn SlotResolver,
) -> Option<MatchOutput> {
    let mut state = MatchState::default();
    if match_seq(template.elements(), text, 0, &mut state, resolver, &Cont::Done) {
        Some(MatchOutput {
            operands: state.operands,
            outcome: ParseOutcome::new(text, state.mark),
        })
    } else {
        None
    }
}

fn match_seq(
    elements: &[PatternElement],
    text: &str,
    pos: usize,
    state: &mut MatchState,
    resolver: &mut dyn SlotResolver,
    cont: &Cont<'_>,
) -> bool {
    let Some((first, rest)) = elements.split_first() else {
        return match_cont(text, pos, state, resolver, cont);
    };
    match first {
        PatternElement::Text(expected) => {
            let end = pos + expected.len();
            if end > text.len() {
                return false;
            }
            if !text.as_bytes()[pos..end].eq_ignore_ascii_case(expected.as_bytes()) {
                return false;
            }
            match_seq(rest, text, end, state, resolver, cont)
        }
        PatternElement::Optional(inner) => {
            let saved = state.save();
            if match_seq(inner, text, pos, state, resolver, &Cont::Seq(rest, cont)) {
                return true;
            }
            state.restore(saved);
            match_seq(rest, text, pos, state, resolver, cont)
        }
        PatternElement::Choice(alternatives) => {
            for alternative in alternatives {
                let saved = state.save();
                state.mark ^= alternative.mark;
                if match_seq(
                    &alternative.elements,
                    text,
                    pos,
                    state,
                    resolver,
                    &Cont::Seq(rest, cont),
                ) {
                    return true;
                }
                state.restore(saved);
            }
            false
        }
        PatternElement::Slot(spec) => {
            // Candidate end offsets, tried longest-first. Where the pattern
            // continues with fixed text, only offsets at an occurrence of
            // that text are tried; a trailing slot can only run to the end.
            // This keeps speculative sub-resolution off spans the rest of
            // the pattern could never follow.
            let ends: SmallVec<[usize; 16]> = match next_fixed_text(rest, cont) {
                NextHint::End => smallvec![text.len()],
                NextHint::Text(needle) => occurrence_starts(text, pos + 1, needle),
                NextHint::Unknown => text[pos..]
                    .char_indices()
                    .skip(1)
                    .map(|(offset, _)| pos + offset)
                    .chain(std::iter::once(text.len()))
                    .collect(),
            };
            for &end in ends.iter().rev() {
                if end <= pos {
                    continue;
                }
                let saved = state.save();
                let sub = &text[pos..end];
                let resolved = if spec.expected.type_id == TypeId::BOOLEAN {
                    resolver.resolve_boolean(sub, !spec.allow_conditional)
                } else {
                    resolver.resolve_value(sub, &spec.expected)
                };
                let Some(expr) = resolved else { continue };
                state.operands.push(expr);
                if match_seq(rest, text, end, state, resolver, cont) {
                    return true;
                }
                state.restore(saved);
            }
            false
        }
    }
}

fn match_cont(
    text: &str,
    pos: usize,
    state: &mut MatchState,
    resolver: &mut dyn SlotResolver,
    cont: &Cont<'_>,
) -> bool {
    match cont {
        Cont::Done => pos == text.len(),
        Cont::Seq(elements, parent) => match_seq(elements, text, pos, state, resolver, parent),
    }
}

/// What a slot knows about the pattern content that must follow it.
enum NextHint<'a> {
    /// Nothing follows; the slot runs to the end of the text.
    End,
    /// Fixed text follows; the slot must end at one of its occurrences.
    Text(&'a str),
    /// A group or another slot follows; no cheap bound exists.
    Unknown,
}

fn next_fixed_text<'a>(rest: &'a [PatternElement], cont: &Cont<'a>) -> NextHint<'a> {
    match rest.first() {
        Some(PatternElement::Text(text)) => NextHint::Text(text),
        Some(_) => NextHint::Unknown,
        None => match cont {
            Cont::Done => NextHint::End,
            Cont::Seq(elements, parent) => next_fixed_text(elements, parent),
        },
    }
}

/// Char-boundary start offsets of case-insensitive occurrences of `needle`
/// in `text`, at or after `from`, in ascending order.
fn occurrence_starts(text: &str, from: usize, needle: &str) -> SmallVec<[usize; 16]> {
    let mut starts = SmallVec::new();
    let bytes = text.as_bytes();
    let needle = needle.as_bytes();
    if bytes.len() < needle.len() {
        return starts;
    }
    for start in from..=bytes.len() - needle.len() {
        if text.is_char_boundary(start)
            && bytes[start..start + needle.len()].eq_ignore_ascii_case(needle)
        {
            starts.push(start);
        }
    }
    starts
}
