//! Quoted and interpolated string resolution.

use skein_ir::{Expr, Literal, ParseOutcome, RuntimeExpr, TypeId, Value};
use skein_types::PatternType;

use crate::SlotResolver;

/// One run of an interpolated string.
#[derive(Debug)]
pub enum StringPart {
    /// Fixed text.
    Text(String),
    /// An embedded expression, substituted at evaluation time.
    Expr(Expr),
}

/// A string with embedded expressions.
#[derive(Debug)]
pub struct StringTemplate {
    parts: Vec<StringPart>,
}

impl StringTemplate {
    /// The text and expression runs in source order.
    pub fn parts(&self) -> &[StringPart] {
        &self.parts
    }
}

impl RuntimeExpr for StringTemplate {
    fn init(&mut self, _operands: Vec<Expr>, _pattern_index: usize, _outcome: ParseOutcome) -> bool {
        // Built fully formed by parse_quoted; nothing left to initialize.
        true
    }

    fn return_type(&self) -> TypeId {
        TypeId::STRING
    }
}

/// Parse a double-quoted string, resolving `%...%` embedded expressions
/// through the resolver.
///
/// `""` escapes a quote, `%%` escapes a percent sign. Returns a plain string
/// literal when nothing is embedded, a [`StringTemplate`] otherwise, and
/// `None` when the text is not a single well-formed quoted string or an
/// embedded expression fails to resolve.
pub fn parse_quoted(text: &str, resolver: &mut dyn SlotResolver) -> Option<Expr> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    let bytes = inner.as_bytes();
    let mut parts: Vec<StringPart> = Vec::new();
    let mut buf = String::new();
    let mut i = 0;
    while i < inner.len() {
        match bytes[i] {
            b'"' => {
                if bytes.get(i + 1) == Some(&b'"') {
                    buf.push('"');
                    i += 2;
                } else {
                    return None;
                }
            }
            b'%' => {
                if bytes.get(i + 1) == Some(&b'%') {
                    buf.push('%');
                    i += 2;
                } else {
                    let offset = inner[i + 1..].find('%')?;
                    let embedded = &inner[i + 1..i + 1 + offset];
                    let expr =
                        resolver.resolve_value(embedded, &PatternType::single(TypeId::OBJECT))?;
                    if !buf.is_empty() {
                        parts.push(StringPart::Text(std::mem::take(&mut buf)));
                    }
                    parts.push(StringPart::Expr(expr));
                    i += offset + 2;
                }
            }
            _ => {
                let c = inner[i..].chars().next()?;
                buf.push(c);
                i += c.len_utf8();
            }
        }
    }
    if parts.is_empty() {
        return Some(Expr::Literal(Literal::new(
            Value::string(buf),
            TypeId::STRING,
        )));
    }
    if !buf.is_empty() {
        parts.push(StringPart::Text(buf));
    }
    Some(Expr::Runtime(Box::new(StringTemplate { parts })))
}
