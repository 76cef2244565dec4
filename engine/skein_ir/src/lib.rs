//! Skein IR - core node and value types for the Skein engine.
//!
//! This crate provides:
//! - Type identifiers (`TypeId`) with pre-interned builtin constants
//! - Runtime values (`Value`)
//! - The closed expression node sum type (`Expr`) and its variants
//!   (`Literal`, `LiteralList`, `ExpressionList`, runtime instances)
//! - The runtime node traits (`RuntimeExpr`, `RuntimeEffect`,
//!   `RuntimeSection`) and the match metadata they are initialized with
//!   (`ParseOutcome`)
//!
//! # Architecture
//!
//! `Expr` is a closed sum type with exhaustive matching at every consumption
//! site: every new node kind must be handled everywhere it matters. Syntax
//! defined at registration time plugs in through the `RuntimeExpr` /
//! `RuntimeEffect` / `RuntimeSection` traits behind the `Runtime` variant,
//! so the set of *syntaxes* stays open while the set of *node shapes* stays
//! closed.

mod expr;
mod node;
mod type_id;
mod value;

pub use expr::{Expr, ExpressionList, Literal, LiteralList};
pub use node::{EffectNode, ParseOutcome, RuntimeEffect, RuntimeExpr, RuntimeSection, SectionNode};
pub use type_id::TypeId;
pub use value::Value;
