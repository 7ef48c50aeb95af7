//! Host tree types for the BEM resolver.
//!
//! These model an already-parsed markup tree: elements carrying ordered
//! attribute lists and ordered children. The resolver mutates them in place;
//! nothing here knows about BEM.

use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Provenance
// ──────────────────────────────────────────────

/// Source locator carried by every element and attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl Provenance {
    pub fn new(file: &str, line: u32, column: u32) -> Self {
        Provenance {
            file: file.to_owned(),
            line,
            column,
        }
    }
}

// ──────────────────────────────────────────────
// Expressions
// ──────────────────────────────────────────────

/// An expression appearing in an attribute value or as a child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expr {
    StringLiteral {
        value: String,
    },
    /// `quasis` always has one more entry than `expressions`.
    TemplateLiteral {
        quasis: Vec<String>,
        #[serde(default)]
        expressions: Vec<Expr>,
    },
    Array {
        #[serde(default)]
        elements: Vec<Expr>,
    },
    Call {
        callee: Box<Expr>,
        #[serde(default)]
        arguments: Vec<Expr>,
    },
    Object {
        #[serde(default)]
        properties: Vec<Property>,
    },
    Identifier {
        name: String,
    },
    NumericLiteral {
        value: f64,
    },
    BooleanLiteral {
        value: bool,
    },
    NullLiteral,
    Member {
        object: Box<Expr>,
        property: String,
    },
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
}

/// `key: value` entry of an object expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    pub value: Expr,
}

impl Expr {
    pub fn string(value: impl Into<String>) -> Self {
        Expr::StringLiteral {
            value: value.into(),
        }
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier { name: name.into() }
    }

    pub fn call(callee: Expr, arguments: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(callee),
            arguments,
        }
    }

    /// Human-readable name of the expression kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::StringLiteral { .. } => "string literal",
            Expr::TemplateLiteral { .. } => "template literal",
            Expr::Array { .. } => "array expression",
            Expr::Call { .. } => "call expression",
            Expr::Object { .. } => "object expression",
            Expr::Identifier { .. } => "identifier",
            Expr::NumericLiteral { .. } => "numeric literal",
            Expr::BooleanLiteral { .. } => "boolean literal",
            Expr::NullLiteral => "null literal",
            Expr::Member { .. } => "member expression",
            Expr::Conditional { .. } => "conditional expression",
        }
    }
}

// ──────────────────────────────────────────────
// Attributes
// ──────────────────────────────────────────────

/// The right-hand side of `name=...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttrValue {
    /// `name="text"`
    StringLiteral { value: String },
    /// `name={expr}`
    Container { expression: Expr },
    /// `name={}`
    EmptyContainer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Attribute {
    Named {
        name: String,
        /// `None` for a bare attribute such as `<div block>`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<AttrValue>,
        #[serde(default)]
        prov: Provenance,
    },
    /// `{...props}`; never statically classifiable.
    Spread {
        argument: Expr,
        #[serde(default)]
        prov: Provenance,
    },
}

impl Attribute {
    pub fn named(name: &str, value: Option<AttrValue>, prov: Provenance) -> Self {
        Attribute::Named {
            name: name.to_owned(),
            value,
            prov,
        }
    }

    /// `className={expr}` as appended by the resolver.
    pub fn class_name(expression: Expr, prov: Provenance) -> Self {
        let value = match expression {
            Expr::StringLiteral { value } => AttrValue::StringLiteral { value },
            expression => AttrValue::Container { expression },
        };
        Attribute::named("className", Some(value), prov)
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Attribute::Named { name, .. } => Some(name),
            Attribute::Spread { .. } => None,
        }
    }

    pub fn prov(&self) -> &Provenance {
        match self {
            Attribute::Named { prov, .. } | Attribute::Spread { prov, .. } => prov,
        }
    }

    fn prov_mut(&mut self) -> &mut Provenance {
        match self {
            Attribute::Named { prov, .. } | Attribute::Spread { prov, .. } => prov,
        }
    }
}

// ──────────────────────────────────────────────
// Elements
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Child {
    Element(Element),
    Text { value: String },
    Expression { expression: Expr },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub children: Vec<Child>,
    #[serde(default)]
    pub prov: Provenance,
}

impl Element {
    pub fn new(name: &str, prov: Provenance) -> Self {
        Element {
            name: name.to_owned(),
            attributes: Vec::new(),
            children: Vec::new(),
            prov,
        }
    }

    /// Remove the attributes at `positions`, keeping the survivors in their
    /// original relative order. Out-of-range and repeated positions are
    /// ignored. Returns the number of attributes removed.
    pub fn remove_attributes(&mut self, positions: &[usize]) -> usize {
        if positions.is_empty() {
            return 0;
        }
        let before = self.attributes.len();
        let mut index = 0;
        self.attributes.retain(|_| {
            let keep = !positions.contains(&index);
            index += 1;
            keep
        });
        before - self.attributes.len()
    }

    /// Append after every existing attribute.
    pub fn push_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// First attribute with the given name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name() == Some(name))
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Child::Element(e) => Some(e),
            _ => None,
        })
    }

    fn fill_file(&mut self, file: &str) {
        if self.prov.file.is_empty() {
            self.prov.file = file.to_owned();
        }
        for attr in &mut self.attributes {
            let prov = attr.prov_mut();
            if prov.file.is_empty() {
                prov.file = file.to_owned();
            }
        }
        for child in &mut self.children {
            if let Child::Element(e) = child {
                e.fill_file(file);
            }
        }
    }
}

// ──────────────────────────────────────────────
// Documents
// ──────────────────────────────────────────────

/// A parsed module: the independent markup roots found in one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub roots: Vec<Element>,
}

impl Document {
    /// Parse a JSON document. Locators without a file inherit the
    /// document's file name.
    pub fn from_json_str(source: &str) -> Result<Self, serde_json::Error> {
        let mut doc: Document = serde_json::from_str(source)?;
        doc.fill_provenance();
        Ok(doc)
    }

    /// Give every locator without a file the document's file name.
    pub fn fill_provenance(&mut self) {
        for root in &mut self.roots {
            root.fill_file(&self.file);
        }
    }
}
