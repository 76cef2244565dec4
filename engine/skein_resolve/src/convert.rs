//! Coercion wrapper for matched nodes.

use skein_ir::{Expr, ParseOutcome, RuntimeExpr, TypeId};
use skein_types::Coercion;

/// A matched node whose natural return type was coerced to the candidate's
/// declared one through a registered conversion.
#[derive(Debug)]
pub struct ConvertedExpr {
    inner: Box<dyn RuntimeExpr>,
    target: TypeId,
    convert: Coercion,
}

impl ConvertedExpr {
    pub(crate) fn new(inner: Box<dyn RuntimeExpr>, target: TypeId, convert: Coercion) -> Self {
        ConvertedExpr {
            inner,
            target,
            convert,
        }
    }

    /// The wrapped node.
    pub fn inner(&self) -> &dyn RuntimeExpr {
        self.inner.as_ref()
    }

    /// The conversion applied to the inner node's values at evaluation time.
    pub fn conversion(&self) -> Coercion {
        self.convert
    }
}

impl RuntimeExpr for ConvertedExpr {
    fn init(&mut self, _operands: Vec<Expr>, _pattern_index: usize, _outcome: ParseOutcome) -> bool {
        // The wrapped node is already initialized.
        true
    }

    fn return_type(&self) -> TypeId {
        self.target
    }

    fn is_single(&self) -> bool {
        self.inner.is_single()
    }
}
