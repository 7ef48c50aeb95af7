//! Top-level entry points.
//!
//! Each markup root is one independent invocation: the policy is rebuilt
//! from defaults and the caller's overrides, and a fatal error leaves the
//! root exactly as it was.

use crate::ast::{Document, Element};
use crate::diagnostics::{self, DiagnosticSink};
use crate::error::BemError;
use crate::policy::{Policy, PolicyOverrides};
use crate::synthesize::ClassNameSynthesizer;
use crate::walk::{walk, TransformStats, WalkContext};

/// Transform a single root.
///
/// The walk runs on a working copy that replaces `root` only on success.
/// Warnings reach `sink` only for a committed root.
pub fn transform_root(
    root: &mut Element,
    overrides: &PolicyOverrides,
    synthesizer: &dyn ClassNameSynthesizer,
    sink: &mut dyn DiagnosticSink,
) -> Result<TransformStats, BemError> {
    let policy = Policy::resolve(&Policy::default(), overrides);
    let mut ctx = WalkContext::new(&policy, synthesizer);
    let mut working = root.clone();
    walk(&mut working, None, &mut ctx)?;

    *root = working;
    let (stats, warnings) = ctx.finish();
    for warning in warnings {
        diagnostics::report(sink, warning);
    }
    Ok(stats)
}

/// Transform every root of `doc`, stopping at the first fatal error.
///
/// Roots before the failing one keep their output; the failing root and
/// everything after it are left untouched.
pub fn transform_document(
    doc: &mut Document,
    overrides: &PolicyOverrides,
    synthesizer: &dyn ClassNameSynthesizer,
    sink: &mut dyn DiagnosticSink,
) -> Result<TransformStats, BemError> {
    let mut total = TransformStats::default();
    for (index, root) in doc.roots.iter_mut().enumerate() {
        let stats = transform_root(root, overrides, synthesizer, sink).map_err(|e| {
            tracing::debug!(file = %doc.file, root = index, error = %e, "root aborted");
            e
        })?;
        tracing::debug!(
            file = %doc.file,
            root = index,
            elements = stats.elements_visited,
            removed = stats.attributes_removed,
            added = stats.class_names_added,
            "transformed root"
        );
        total.absorb(stats);
    }
    Ok(total)
}
