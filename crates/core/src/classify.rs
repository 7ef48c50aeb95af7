//! Attribute classification: decide whether an attribute is BEM-relevant,
//! determine its value shape, and enforce the [`Policy`].

use crate::ast::{AttrValue, Attribute, Expr, Property, Provenance};
use crate::diagnostics::{DiagnosticSink, Warning};
use crate::error::BemError;
use crate::policy::{Policy, PolicyFlag};
use std::fmt;

// ──────────────────────────────────────────────
// Roles and shapes
// ──────────────────────────────────────────────

/// The closed set of BEM-relevant attribute names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Block,
    Elem,
    Mods,
    ClassName,
}

impl Role {
    pub fn from_name(name: &str) -> Option<Role> {
        match name {
            "block" => Some(Role::Block),
            "elem" => Some(Role::Elem),
            "mods" => Some(Role::Mods),
            "className" => Some(Role::ClassName),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Block => "block",
            Role::Elem => "elem",
            Role::Mods => "mods",
            Role::ClassName => "className",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    StringLiteral,
    TemplateLiteral,
    ArrayExpression,
    CallExpression,
    ObjectExpression,
    Identifier,
    Empty,
}

impl ValueShape {
    pub fn description(self) -> &'static str {
        match self {
            ValueShape::StringLiteral => "string literal",
            ValueShape::TemplateLiteral => "template literal",
            ValueShape::ArrayExpression => "array expression",
            ValueShape::CallExpression => "call expression",
            ValueShape::ObjectExpression => "object expression",
            ValueShape::Identifier => "identifier",
            ValueShape::Empty => "empty value",
        }
    }

    /// The policy flag that authorizes this shape.
    pub fn flag(self) -> PolicyFlag {
        match self {
            ValueShape::StringLiteral => PolicyFlag::StringLiteral,
            ValueShape::TemplateLiteral => PolicyFlag::TemplateLiteral,
            ValueShape::ArrayExpression => PolicyFlag::ArrayExpression,
            ValueShape::CallExpression => PolicyFlag::CallExpression,
            ValueShape::ObjectExpression => PolicyFlag::ObjectExpression,
            ValueShape::Identifier => PolicyFlag::Identifier,
            ValueShape::Empty => PolicyFlag::FalsyValue,
        }
    }
}

/// An accepted attribute value. The payload is forwarded, never interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum BemValue {
    StringLiteral(String),
    /// Always an [`Expr::TemplateLiteral`].
    Template(Expr),
    Array(Vec<Expr>),
    /// Always an [`Expr::Call`].
    Call(Expr),
    Object(Vec<Property>),
    Identifier(String),
    Empty,
}

impl BemValue {
    pub fn shape(&self) -> ValueShape {
        match self {
            BemValue::StringLiteral(_) => ValueShape::StringLiteral,
            BemValue::Template(_) => ValueShape::TemplateLiteral,
            BemValue::Array(_) => ValueShape::ArrayExpression,
            BemValue::Call(_) => ValueShape::CallExpression,
            BemValue::Object(_) => ValueShape::ObjectExpression,
            BemValue::Identifier(_) => ValueShape::Identifier,
            BemValue::Empty => ValueShape::Empty,
        }
    }

    /// Rebuild the value as an expression; `None` for [`BemValue::Empty`].
    pub fn to_expr(&self) -> Option<Expr> {
        match self {
            BemValue::StringLiteral(s) => Some(Expr::string(s.clone())),
            BemValue::Template(e) | BemValue::Call(e) => Some(e.clone()),
            BemValue::Array(elements) => Some(Expr::Array {
                elements: elements.clone(),
            }),
            BemValue::Object(properties) => Some(Expr::Object {
                properties: properties.clone(),
            }),
            BemValue::Identifier(name) => Some(Expr::ident(name.clone())),
            BemValue::Empty => None,
        }
    }

    /// Literal emptiness: `""`, `[]`, `{}` or no value at all. Calls,
    /// templates and identifiers are never empty.
    fn is_empty_literal(&self) -> bool {
        match self {
            BemValue::Empty => true,
            BemValue::StringLiteral(s) => s.is_empty(),
            BemValue::Array(elements) => elements.is_empty(),
            BemValue::Object(properties) => properties.is_empty(),
            BemValue::Template(_) | BemValue::Call(_) | BemValue::Identifier(_) => false,
        }
    }
}

// ──────────────────────────────────────────────
// Classification
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedAttr {
    pub role: Role,
    pub value: BemValue,
    pub prov: Provenance,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// Not BEM-relevant; leave the attribute alone.
    Skip,
    Accepted(ClassifiedAttr),
}

/// Classify one attribute against `policy`.
///
/// Checks run in a fixed order: shape recognition, array length, emptiness,
/// then shape authorization. An empty value accepted under
/// `allowFalsyValue` is reported to `sink` and comes back as
/// [`BemValue::Empty`].
pub fn classify(
    attr: &Attribute,
    policy: &Policy,
    sink: &mut dyn DiagnosticSink,
) -> Result<Classification, BemError> {
    let (name, value, prov) = match attr {
        Attribute::Named { name, value, prov } => (name, value, prov),
        Attribute::Spread { .. } => return Ok(Classification::Skip),
    };
    let Some(role) = Role::from_name(name) else {
        return Ok(Classification::Skip);
    };

    let value = recognize(role, value.as_ref(), prov)?;

    if let BemValue::Array(elements) = &value {
        if elements.len() > policy.array_max_length {
            return Err(BemError::limit_exceeded(
                role.as_str(),
                elements.len(),
                policy.array_max_length,
                prov,
            ));
        }
    }

    if value.is_empty_literal() {
        if !policy.allow_falsy_value {
            return Err(BemError::empty_value(role.as_str(), prov));
        }
        sink.warn(Warning::empty_value(role.as_str(), prov));
        return Ok(accepted(role, BemValue::Empty, prov));
    }

    let shape = value.shape();
    if !policy.allows(shape.flag()) {
        return Err(BemError::disallowed_shape(
            role.as_str(),
            shape.description(),
            shape.flag().option_name(),
            prov,
        ));
    }

    Ok(accepted(role, value, prov))
}

fn accepted(role: Role, value: BemValue, prov: &Provenance) -> Classification {
    Classification::Accepted(ClassifiedAttr {
        role,
        value,
        prov: prov.clone(),
    })
}

/// Map a raw attribute value onto a [`BemValue`] without consulting policy.
fn recognize(role: Role, value: Option<&AttrValue>, prov: &Provenance) -> Result<BemValue, BemError> {
    let expression = match value {
        None | Some(AttrValue::EmptyContainer) => return Ok(BemValue::Empty),
        Some(AttrValue::StringLiteral { value }) => return Ok(BemValue::StringLiteral(value.clone())),
        Some(AttrValue::Container { expression }) => expression,
    };
    match expression {
        Expr::StringLiteral { value } => Ok(BemValue::StringLiteral(value.clone())),
        Expr::TemplateLiteral { .. } => Ok(BemValue::Template(expression.clone())),
        Expr::Call { .. } => Ok(BemValue::Call(expression.clone())),
        Expr::Array { elements } => Ok(BemValue::Array(elements.clone())),
        Expr::Identifier { name } => Ok(BemValue::Identifier(name.clone())),
        Expr::Object { properties } if role == Role::Mods => {
            Ok(BemValue::Object(properties.clone()))
        }
        other => Err(BemError::unsupported_shape(
            role.as_str(),
            other.kind_name(),
            prov,
        )),
    }
}
