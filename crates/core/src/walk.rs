//! Recursive descent over one markup root.

use crate::ast::{Attribute, Child, Element};
use crate::classify::{classify, BemValue, Classification};
use crate::diagnostics::Warning;
use crate::error::BemError;
use crate::policy::Policy;
use crate::record::build_record;
use crate::synthesize::ClassNameSynthesizer;
use serde::Serialize;
use std::rc::Rc;

/// Counters for one or more walks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransformStats {
    pub elements_visited: usize,
    pub attributes_removed: usize,
    pub class_names_added: usize,
    pub warnings: usize,
}

impl TransformStats {
    pub fn absorb(&mut self, other: TransformStats) {
        self.elements_visited += other.elements_visited;
        self.attributes_removed += other.attributes_removed;
        self.class_names_added += other.class_names_added;
        self.warnings += other.warnings;
    }
}

/// State threaded through a walk. `policy` is read-only for its duration.
///
/// Warnings are held back until [`WalkContext::finish`] so the caller can
/// drop them along with a walk that failed.
pub struct WalkContext<'a> {
    policy: &'a Policy,
    synthesizer: &'a dyn ClassNameSynthesizer,
    warnings: Vec<Warning>,
    stats: TransformStats,
}

impl<'a> WalkContext<'a> {
    pub fn new(policy: &'a Policy, synthesizer: &'a dyn ClassNameSynthesizer) -> Self {
        WalkContext {
            policy,
            synthesizer,
            warnings: Vec::new(),
            stats: TransformStats::default(),
        }
    }

    pub fn finish(self) -> (TransformStats, Vec<Warning>) {
        let stats = TransformStats {
            warnings: self.warnings.len(),
            ..self.stats
        };
        (stats, self.warnings)
    }
}

/// Resolve `element` and, in document order, every element below it.
///
/// All attributes are classified before the element is touched. Consumed
/// attributes are then removed in one step and the synthesized `className`
/// (if any) is appended after the survivors. Children inherit this
/// element's resolved block.
pub fn walk(
    element: &mut Element,
    inherited_block: Option<Rc<BemValue>>,
    ctx: &mut WalkContext<'_>,
) -> Result<(), BemError> {
    ctx.stats.elements_visited += 1;

    let mut accepted = Vec::new();
    let mut consumed = Vec::new();
    for (position, attr) in element.attributes.iter().enumerate() {
        match classify(attr, ctx.policy, &mut ctx.warnings)? {
            Classification::Skip => {}
            Classification::Accepted(classified) => {
                consumed.push(position);
                accepted.push(classified);
            }
        }
    }

    let record = build_record(accepted, inherited_block);

    ctx.stats.attributes_removed += element.remove_attributes(&consumed);
    let synthesized = ctx
        .synthesizer
        .synthesize(&record, record.is_block_inherited, element);
    if let Some(value) = synthesized {
        element.push_attribute(Attribute::class_name(value, element.prov.clone()));
        ctx.stats.class_names_added += 1;
    }

    tracing::trace!(
        element = %element.name,
        line = element.prov.line,
        consumed = consumed.len(),
        block_inherited = record.is_block_inherited,
        "resolved element"
    );

    for child in &mut element.children {
        if let Child::Element(child) = child {
            walk(child, record.block.clone(), ctx)?;
        }
    }

    Ok(())
}
