//! Class-name synthesis.
//!
//! The naming convention itself is the host's business: a
//! [`ClassNameSynthesizer`] receives the resolved [`BemRecord`] and returns
//! the expression to attach as the new `className`, or `None` for no
//! attribute.

use crate::ast::{Element, Expr};
use crate::classify::BemValue;
use crate::record::BemRecord;

pub trait ClassNameSynthesizer {
    fn synthesize(
        &self,
        record: &BemRecord,
        is_block_inherited: bool,
        element: &Element,
    ) -> Option<Expr>;
}

/// Emits `helper(block, elem, mods, className)` and leaves the naming rules
/// to the runtime helper.
///
/// Elements that declare nothing get no attribute. Elements that declare
/// only a `className` keep it as written, which also makes a second pass over
/// already-transformed output a no-op.
#[derive(Debug, Clone)]
pub struct HelperCallSynthesizer {
    helper: String,
}

impl HelperCallSynthesizer {
    pub const DEFAULT_HELPER: &'static str = "bem";

    pub fn new(helper: impl Into<String>) -> Self {
        HelperCallSynthesizer {
            helper: helper.into(),
        }
    }

    pub fn helper(&self) -> &str {
        &self.helper
    }
}

impl Default for HelperCallSynthesizer {
    fn default() -> Self {
        HelperCallSynthesizer::new(Self::DEFAULT_HELPER)
    }
}

fn argument(value: Option<&BemValue>) -> Expr {
    value.and_then(BemValue::to_expr).unwrap_or(Expr::NullLiteral)
}

impl ClassNameSynthesizer for HelperCallSynthesizer {
    fn synthesize(
        &self,
        record: &BemRecord,
        _is_block_inherited: bool,
        _element: &Element,
    ) -> Option<Expr> {
        if !record.has_local_declarations() {
            return None;
        }
        if record.is_class_name_only {
            return record.class_name.as_ref().and_then(BemValue::to_expr);
        }
        Some(Expr::call(
            Expr::ident(self.helper.clone()),
            vec![
                argument(record.block.as_deref()),
                argument(record.elem.as_ref()),
                argument(record.mods.as_ref()),
                argument(record.class_name.as_ref()),
            ],
        ))
    }
}
