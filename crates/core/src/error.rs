use crate::ast::Provenance;
use serde::{Deserialize, Serialize};

/// The fatal failure classes of BEM resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BemErrorKind {
    /// Recognized shape, forbidden by policy.
    DisallowedShape,
    /// Array value longer than `arrayMaxLength`.
    LimitExceeded,
    /// Shape not recognized for the attribute's role.
    UnsupportedShape,
    /// Empty value while `allowFalsyValue` is off.
    EmptyValue,
}

/// A located resolution error. Aborts the root it was raised in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{file}:{line}:{column}: {message}")]
pub struct BemError {
    pub kind: BemErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl BemError {
    pub fn new(
        kind: BemErrorKind,
        attribute: Option<&str>,
        prov: &Provenance,
        message: impl Into<String>,
    ) -> Self {
        BemError {
            kind,
            attribute: attribute.map(str::to_owned),
            file: prov.file.clone(),
            line: prov.line,
            column: prov.column,
            message: message.into(),
        }
    }

    pub fn disallowed_shape(attribute: &str, shape: &str, flag: &str, prov: &Provenance) -> Self {
        BemError::new(
            BemErrorKind::DisallowedShape,
            Some(attribute),
            prov,
            format!(
                "{} is not allowed as the value of '{}'; set {}: true to permit it",
                shape, attribute, flag
            ),
        )
    }

    pub fn limit_exceeded(attribute: &str, len: usize, max: usize, prov: &Provenance) -> Self {
        BemError::new(
            BemErrorKind::LimitExceeded,
            Some(attribute),
            prov,
            format!(
                "array value of '{}' has {} elements, more than arrayMaxLength ({})",
                attribute, len, max
            ),
        )
    }

    pub fn unsupported_shape(attribute: &str, found: &str, prov: &Provenance) -> Self {
        BemError::new(
            BemErrorKind::UnsupportedShape,
            Some(attribute),
            prov,
            format!("unsupported value for '{}': {}", attribute, found),
        )
    }

    pub fn empty_value(attribute: &str, prov: &Provenance) -> Self {
        BemError::new(
            BemErrorKind::EmptyValue,
            Some(attribute),
            prov,
            format!(
                "'{}' has an empty value; set allowFalsyValue: true to permit it",
                attribute
            ),
        )
    }

    /// Serialize with every field present (null for missing).
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "attribute": self.attribute,
            "column":    self.column,
            "file":      self.file,
            "kind":      self.kind,
            "line":      self.line,
            "message":   self.message,
        })
    }
}

/// Failure to load policy overrides.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A recognized option carried a value of the wrong type.
    #[error("invalid value for policy option '{key}': {message}")]
    InvalidOption { key: String, message: String },

    /// The overrides document itself could not be read.
    #[error("malformed policy overrides: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_leads_with_locator() {
        let err = BemError::empty_value("mods", &Provenance::new("a.jsx", 4, 12));
        assert_eq!(
            err.to_string(),
            "a.jsx:4:12: 'mods' has an empty value; set allowFalsyValue: true to permit it"
        );
    }

    #[test]
    fn json_form_includes_null_fields() {
        let err = BemError::new(
            BemErrorKind::UnsupportedShape,
            None,
            &Provenance::new("a.jsx", 1, 1),
            "boom",
        );
        let v = err.to_json_value();
        assert!(v["attribute"].is_null());
        assert_eq!(v["kind"], "unsupported_shape");
        assert_eq!(v["line"], 1);
    }
}
