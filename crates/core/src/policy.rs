//! Policy: which value shapes are legal for BEM attributes.
//!
//! A [`Policy`] is resolved once per top-level invocation from the defaults
//! and a caller-supplied [`PolicyOverrides`], then threaded read-only through
//! the whole walk.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub allow_string_literal: bool,
    pub allow_template_literal: bool,
    pub allow_array_expression: bool,
    pub allow_call_expression: bool,
    pub allow_object_expression: bool,
    pub allow_identifier: bool,
    pub allow_falsy_value: bool,
    pub array_max_length: usize,
}

impl Default for Policy {
    fn default() -> Self {
        Policy {
            allow_string_literal: true,
            allow_template_literal: true,
            allow_array_expression: true,
            allow_call_expression: true,
            allow_object_expression: true,
            allow_identifier: false,
            allow_falsy_value: false,
            array_max_length: 3,
        }
    }
}

/// The boolean switches of a [`Policy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyFlag {
    StringLiteral,
    TemplateLiteral,
    ArrayExpression,
    CallExpression,
    ObjectExpression,
    Identifier,
    FalsyValue,
}

impl PolicyFlag {
    /// The configuration key controlling this flag.
    pub fn option_name(self) -> &'static str {
        match self {
            PolicyFlag::StringLiteral => "allowStringLiteral",
            PolicyFlag::TemplateLiteral => "allowTemplateLiteral",
            PolicyFlag::ArrayExpression => "allowArrayExpression",
            PolicyFlag::CallExpression => "allowCallExpression",
            PolicyFlag::ObjectExpression => "allowObjectExpression",
            PolicyFlag::Identifier => "allowIdentifier",
            PolicyFlag::FalsyValue => "allowFalsyValue",
        }
    }
}

impl Policy {
    /// Per-field merge: overrides win where present.
    pub fn resolve(defaults: &Policy, overrides: &PolicyOverrides) -> Policy {
        Policy {
            allow_string_literal: overrides
                .allow_string_literal
                .unwrap_or(defaults.allow_string_literal),
            allow_template_literal: overrides
                .allow_template_literal
                .unwrap_or(defaults.allow_template_literal),
            allow_array_expression: overrides
                .allow_array_expression
                .unwrap_or(defaults.allow_array_expression),
            allow_call_expression: overrides
                .allow_call_expression
                .unwrap_or(defaults.allow_call_expression),
            allow_object_expression: overrides
                .allow_object_expression
                .unwrap_or(defaults.allow_object_expression),
            allow_identifier: overrides.allow_identifier.unwrap_or(defaults.allow_identifier),
            allow_falsy_value: overrides
                .allow_falsy_value
                .unwrap_or(defaults.allow_falsy_value),
            array_max_length: overrides
                .array_max_length
                .unwrap_or(defaults.array_max_length),
        }
    }

    pub fn allows(&self, flag: PolicyFlag) -> bool {
        match flag {
            PolicyFlag::StringLiteral => self.allow_string_literal,
            PolicyFlag::TemplateLiteral => self.allow_template_literal,
            PolicyFlag::ArrayExpression => self.allow_array_expression,
            PolicyFlag::CallExpression => self.allow_call_expression,
            PolicyFlag::ObjectExpression => self.allow_object_expression,
            PolicyFlag::Identifier => self.allow_identifier,
            PolicyFlag::FalsyValue => self.allow_falsy_value,
        }
    }
}

/// Caller-supplied subset of [`Policy`] fields. Unknown keys are ignored
/// when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_string_literal: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_template_literal: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_array_expression: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_call_expression: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_object_expression: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_identifier: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_falsy_value: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_max_length: Option<usize>,
}

impl PolicyOverrides {
    /// Read overrides from a JSON object.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        if !value.is_object() {
            return Err(ConfigError::Malformed(
                "policy overrides must be an object".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// Read overrides from TOML, either flat or under a `[bem]` table.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let mut table: toml::Table =
            toml::from_str(source).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        let table = match table.remove("bem") {
            Some(toml::Value::Table(bem)) => bem,
            Some(_) => {
                return Err(ConfigError::Malformed(
                    "'bem' must be a table".to_string(),
                ))
            }
            None => table,
        };
        toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::Malformed(e.to_string()))
    }

    /// Apply one `key=value` setting. Returns `Ok(false)` for an
    /// unrecognized key, which is left alone.
    pub fn apply_setting(&mut self, key: &str, raw: &str) -> Result<bool, ConfigError> {
        let slot = match key {
            "allowStringLiteral" => &mut self.allow_string_literal,
            "allowTemplateLiteral" => &mut self.allow_template_literal,
            "allowArrayExpression" => &mut self.allow_array_expression,
            "allowCallExpression" => &mut self.allow_call_expression,
            "allowObjectExpression" => &mut self.allow_object_expression,
            "allowIdentifier" => &mut self.allow_identifier,
            "allowFalsyValue" => &mut self.allow_falsy_value,
            "arrayMaxLength" => {
                let n = raw.trim().parse::<usize>().map_err(|e| ConfigError::InvalidOption {
                    key: key.to_owned(),
                    message: e.to_string(),
                })?;
                self.array_max_length = Some(n);
                return Ok(true);
            }
            _ => return Ok(false),
        };
        let flag = raw.trim().parse::<bool>().map_err(|_| ConfigError::InvalidOption {
            key: key.to_owned(),
            message: format!("expected true or false, found '{}'", raw),
        })?;
        *slot = Some(flag);
        Ok(true)
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: PolicyOverrides) -> PolicyOverrides {
        PolicyOverrides {
            allow_string_literal: other.allow_string_literal.or(self.allow_string_literal),
            allow_template_literal: other.allow_template_literal.or(self.allow_template_literal),
            allow_array_expression: other.allow_array_expression.or(self.allow_array_expression),
            allow_call_expression: other.allow_call_expression.or(self.allow_call_expression),
            allow_object_expression: other
                .allow_object_expression
                .or(self.allow_object_expression),
            allow_identifier: other.allow_identifier.or(self.allow_identifier),
            allow_falsy_value: other.allow_falsy_value.or(self.allow_falsy_value),
            array_max_length: other.array_max_length.or(self.array_max_length),
        }
    }
}
