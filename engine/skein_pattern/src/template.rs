//! Pattern templates and their compiler.

use std::fmt;

use skein_types::{PatternType, TypeRegistry};

/// One element of a compiled pattern.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PatternElement {
    /// Plain text, matched case-insensitively.
    Text(String),
    /// `[optional part]`, tried present-first.
    Optional(Vec<PatternElement>),
    /// `(alternatives|in|declared order)`.
    Choice(Vec<ChoiceAlt>),
    /// `%type%` expression slot.
    Slot(SlotSpec),
}

/// One alternative of a choice group.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ChoiceAlt {
    /// Parse mark XORed into the outcome when this alternative matches.
    pub(crate) mark: u32,
    pub(crate) elements: Vec<PatternElement>,
}

/// Expected type of an expression slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SlotSpec {
    pub(crate) expected: PatternType,
    /// Whether a boolean slot accepts conditional expressions (`%=boolean%`).
    pub(crate) allow_conditional: bool,
}

/// Error raised while compiling a pattern source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// A `[`, `(`, or `%` group was never closed.
    UnclosedGroup(char),
    /// A `]`, `)`, or `|` appeared outside its group.
    UnexpectedClose(char),
    /// The pattern ends in a bare `\`.
    TrailingEscape,
    /// `%%` with no type name between the percent signs.
    EmptySlot,
    /// The slot names no registered type.
    UnknownType(String),
    /// A choice group has an empty alternative.
    EmptyAlternative,
    /// A parse mark does not fit in a u32.
    InvalidMark(String),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::UnclosedGroup(open) => write!(f, "unclosed '{open}' group"),
            PatternError::UnexpectedClose(close) => write!(f, "unexpected '{close}'"),
            PatternError::TrailingEscape => write!(f, "pattern ends in a bare escape"),
            PatternError::EmptySlot => write!(f, "expression slot names no type"),
            PatternError::UnknownType(name) => write!(f, "unknown type name '{name}'"),
            PatternError::EmptyAlternative => write!(f, "choice group has an empty alternative"),
            PatternError::InvalidMark(mark) => write!(f, "invalid parse mark '{mark}'"),
        }
    }
}

impl std::error::Error for PatternError {}

/// A pre-compiled surface form of a syntax candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternTemplate {
    source: String,
    elements: Vec<PatternElement>,
}

impl PatternTemplate {
    /// Compile a pattern source string, resolving `%type%` slots against the
    /// registry.
    pub fn compile(source: &str, types: &TypeRegistry) -> Result<Self, PatternError> {
        let mut compiler = Compiler {
            src: source,
            pos: 0,
            types,
        };
        let elements = compiler.parse_seq(&[])?;
        Ok(PatternTemplate {
            source: source.to_owned(),
            elements,
        })
    }

    /// The pattern source as written at registration.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn elements(&self) -> &[PatternElement] {
        &self.elements
    }
}

struct Compiler<'a> {
    src: &'a str,
    pos: usize,
    types: &'a TypeRegistry,
}

impl Compiler<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    fn parse_seq(&mut self, terminators: &[char]) -> Result<Vec<PatternElement>, PatternError> {
        let mut elements = Vec::new();
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if terminators.contains(&c) {
                break;
            }
            match c {
                '\\' => {
                    self.bump(c);
                    let escaped = self.peek().ok_or(PatternError::TrailingEscape)?;
                    text.push(escaped);
                    self.bump(escaped);
                }
                '[' => {
                    self.bump(c);
                    flush_text(&mut elements, &mut text);
                    let inner = self.parse_seq(&[']'])?;
                    if self.peek() != Some(']') {
                        return Err(PatternError::UnclosedGroup('['));
                    }
                    self.bump(']');
                    elements.push(PatternElement::Optional(inner));
                }
                '(' => {
                    self.bump(c);
                    flush_text(&mut elements, &mut text);
                    elements.push(PatternElement::Choice(self.parse_choice()?));
                }
                '%' => {
                    self.bump(c);
                    flush_text(&mut elements, &mut text);
                    elements.push(PatternElement::Slot(self.parse_slot()?));
                }
                ']' | ')' | '|' => return Err(PatternError::UnexpectedClose(c)),
                _ => {
                    text.push(c);
                    self.bump(c);
                }
            }
        }
        flush_text(&mut elements, &mut text);
        Ok(elements)
    }

    fn parse_choice(&mut self) -> Result<Vec<ChoiceAlt>, PatternError> {
        let mut alternatives = Vec::new();
        loop {
            let mark = self.parse_mark()?;
            let elements = self.parse_seq(&['|', ')'])?;
            if elements.is_empty() {
                return Err(PatternError::EmptyAlternative);
            }
            alternatives.push(ChoiceAlt { mark, elements });
            match self.peek() {
                Some('|') => self.bump('|'),
                Some(')') => {
                    self.bump(')');
                    return Ok(alternatives);
                }
                _ => return Err(PatternError::UnclosedGroup('(')),
            }
        }
    }

    /// Leading `digits:` of a choice alternative; absent means mark 0.
    fn parse_mark(&mut self) -> Result<u32, PatternError> {
        let rest = &self.src[self.pos..];
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits_end == 0 || !rest[digits_end..].starts_with(':') {
            return Ok(0);
        }
        let digits = &rest[..digits_end];
        let mark = digits
            .parse()
            .map_err(|_| PatternError::InvalidMark(digits.to_owned()))?;
        self.pos += digits_end + 1;
        Ok(mark)
    }

    fn parse_slot(&mut self) -> Result<SlotSpec, PatternError> {
        let rest = &self.src[self.pos..];
        let close = rest.find('%').ok_or(PatternError::UnclosedGroup('%'))?;
        let raw = &rest[..close];
        self.pos += close + 1;
        let (name, allow_conditional) = match raw.strip_prefix('=') {
            Some(stripped) => (stripped, true),
            None => (raw, false),
        };
        if name.is_empty() {
            return Err(PatternError::EmptySlot);
        }
        let (type_id, arity) = self
            .types
            .lookup_name(name)
            .ok_or_else(|| PatternError::UnknownType(name.to_owned()))?;
        Ok(SlotSpec {
            expected: PatternType::new(type_id, arity),
            allow_conditional,
        })
    }
}

fn flush_text(elements: &mut Vec<PatternElement>, text: &mut String) {
    if !text.is_empty() {
        elements.push(PatternElement::Text(std::mem::take(text)));
    }
}
