//! Skein Pattern - the pattern-matching primitive of the Skein engine.
//!
//! A syntax candidate's surface forms are written in a small template
//! language and compiled against the type registry at registration time:
//!
//! - plain text, matched case-insensitively
//! - `[optional part]`
//! - `(choice|of|alternatives)`, where an alternative may carry a numeric
//!   parse mark (`(1:walk|2:run)`) that is XORed into the match outcome
//! - `%type%` expression slots, written with a registered type's singular or
//!   plural display name; `%=boolean%` accepts conditional expressions where
//!   plain `%boolean%` does not
//! - `\` escapes the next character
//!
//! Matching is anchored trial-matching with backtracking. Expression slots
//! hand the candidate sub-text back to the caller through the
//! [`SlotResolver`] seam, so the primitive itself stays ignorant of how
//! expressions are resolved; on success it deposits the bound
//! sub-expressions in pattern order plus a [`skein_ir::ParseOutcome`].

mod lexical;
mod matcher;
mod quoted;
mod template;

pub use lexical::opaque_run_end;
pub use matcher::{match_pattern, MatchOutput, SlotResolver};
pub use quoted::{parse_quoted, StringPart, StringTemplate};
pub use template::{PatternError, PatternTemplate};
