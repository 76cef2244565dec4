//! Skein Resolve - the line-to-node syntax resolution engine.
//!
//! A [`ResolverSession`] turns one line of script text into a typed
//! expression node, an effect node, or a section node by ordered
//! trial-matching over the registered syntax candidates:
//!
//! 1. literal fast path (registered literal parsers, then the quoted-string
//!    resolver when a string is expected)
//! 2. candidate search, most-recently-successful candidates first
//! 3. for plural expected types, comma/"and"/"or" list decomposition
//!
//! "Not found" is `None`, an expected and recoverable outcome; faults found
//! along the way (initialization failures, type or arity mismatches,
//! contextual violations) are reported into the session's diagnostic log
//! and the search moves on.
//!
//! The session owns the per-category move-to-front caches and the log, so
//! all shared mutable state is explicit: one session per thread, registries
//! shared immutably behind `&`.

mod boolean;
mod convert;
mod effect;
mod expr;
mod list;
mod mru;
mod session;

#[cfg(test)]
mod tests;

pub use convert::ConvertedExpr;
pub use mru::{MruCache, DEFAULT_MRU_CAPACITY};
pub use session::ResolverSession;
