//! bem-core: BEM attribute resolution for markup trees.
//!
//! Walks an already-parsed tree, collects the `block`, `elem`, `mods` and
//! `className` attributes of every element, validates their value shapes
//! against a [`Policy`], inherits `block` down the tree, and replaces the
//! consumed attributes with one synthesized `className`.
//!
//! # Public API
//!
//! - [`transform_document()`] / [`transform_root()`] -- top-level entry points
//! - [`Policy`], [`PolicyOverrides`] -- shape policy and its configuration
//! - [`ClassNameSynthesizer`] -- host hook producing the final expression;
//!   [`HelperCallSynthesizer`] is the stock implementation
//! - [`BemError`] -- located fatal error; [`Warning`] and
//!   [`DiagnosticSink`] -- non-fatal channel
//! - Tree types: [`Document`], [`Element`], [`Attribute`], [`AttrValue`],
//!   [`Expr`], [`Provenance`]
//!
//! The lower-level stages ([`classify()`], [`build_record()`], [`walk()`])
//! are public for hosts that drive their own traversal.

pub mod ast;
pub mod classify;
pub mod diagnostics;
pub mod error;
pub mod policy;
pub mod printer;
pub mod record;
pub mod synthesize;
pub mod transform;
pub mod walk;

// ── Convenience re-exports: key types ────────────────────────────────

pub use ast::{AttrValue, Attribute, Child, Document, Element, Expr, Property, Provenance};
pub use classify::{BemValue, Classification, ClassifiedAttr, Role, ValueShape};
pub use diagnostics::{DiagnosticSink, NullSink, Warning, WarningKind};
pub use error::{BemError, BemErrorKind, ConfigError};
pub use policy::{Policy, PolicyFlag, PolicyOverrides};
pub use record::BemRecord;
pub use synthesize::{ClassNameSynthesizer, HelperCallSynthesizer};
pub use walk::{TransformStats, WalkContext};

// ── Convenience re-exports: entry points ─────────────────────────────

pub use classify::classify;
pub use printer::{print_element, print_expr};
pub use record::build_record;
pub use transform::{transform_document, transform_root};
pub use walk::walk;
