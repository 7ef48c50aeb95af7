//! Non-fatal diagnostics.
//!
//! Fatal conditions are [`BemError`](crate::BemError)s. The only non-fatal
//! condition is an empty value accepted under `allowFalsyValue`, which is
//! reported through a [`DiagnosticSink`] supplied by the host and logged as
//! a `tracing` warning.

use crate::ast::Provenance;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    EmptyValueWarning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub attribute: String,
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl Warning {
    pub fn empty_value(attribute: &str, prov: &Provenance) -> Self {
        Warning {
            kind: WarningKind::EmptyValueWarning,
            attribute: attribute.to_owned(),
            file: prov.file.clone(),
            line: prov.line,
            column: prov.column,
            message: format!("'{}' has an empty value", attribute),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.file, self.line, self.column, self.message
        )
    }
}

/// Host-visible channel for warnings.
pub trait DiagnosticSink {
    fn warn(&mut self, warning: Warning);
}

impl DiagnosticSink for Vec<Warning> {
    fn warn(&mut self, warning: Warning) {
        self.push(warning);
    }
}

/// Discards every warning.
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn warn(&mut self, _warning: Warning) {}
}

/// Log `warning` and hand it to `sink`.
pub fn report(sink: &mut dyn DiagnosticSink, warning: Warning) {
    tracing::warn!(
        kind = ?warning.kind,
        attribute = %warning.attribute,
        file = %warning.file,
        line = warning.line,
        column = warning.column,
        "{}",
        warning
    );
    sink.warn(warning);
}
