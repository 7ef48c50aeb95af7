//! JSX-like rendering of a tree, for display and tests.

use crate::ast::{AttrValue, Attribute, Child, Element, Expr};
use std::fmt::Write;

const INDENT: &str = "  ";

pub fn print_element(element: &Element) -> String {
    let mut out = String::new();
    write_element(&mut out, element, 0);
    out
}

pub fn print_expr(expr: &Expr) -> String {
    match expr {
        Expr::StringLiteral { value } => quote(value),
        Expr::TemplateLiteral {
            quasis,
            expressions,
        } => {
            let mut out = String::from("`");
            for (i, quasi) in quasis.iter().enumerate() {
                out.push_str(&escape_quasi(quasi));
                if let Some(e) = expressions.get(i) {
                    let _ = write!(out, "${{{}}}", print_expr(e));
                }
            }
            out.push('`');
            out
        }
        Expr::Array { elements } => format!("[{}]", join(elements)),
        Expr::Call { callee, arguments } => {
            format!("{}({})", print_expr(callee), join(arguments))
        }
        Expr::Object { properties } => {
            if properties.is_empty() {
                return "{}".to_string();
            }
            let body: Vec<String> = properties
                .iter()
                .map(|p| format!("{}: {}", p.key, print_expr(&p.value)))
                .collect();
            format!("{{ {} }}", body.join(", "))
        }
        Expr::Identifier { name } => name.clone(),
        Expr::NumericLiteral { value } => value.to_string(),
        Expr::BooleanLiteral { value } => value.to_string(),
        Expr::NullLiteral => "null".to_string(),
        Expr::Member { object, property } => format!("{}.{}", print_expr(object), property),
        Expr::Conditional {
            test,
            consequent,
            alternate,
        } => format!(
            "{} ? {} : {}",
            print_expr(test),
            print_expr(consequent),
            print_expr(alternate)
        ),
    }
}

fn join(exprs: &[Expr]) -> String {
    exprs.iter().map(print_expr).collect::<Vec<_>>().join(", ")
}

/// Escape the characters that would end or interpolate a template chunk.
fn escape_quasi(quasi: &str) -> String {
    quasi
        .replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}

fn print_attribute(attr: &Attribute) -> String {
    match attr {
        Attribute::Named { name, value, .. } => match value {
            None => name.clone(),
            Some(AttrValue::StringLiteral { value }) => format!("{}={}", name, quote(value)),
            Some(AttrValue::Container { expression }) => {
                format!("{}={{{}}}", name, print_expr(expression))
            }
            Some(AttrValue::EmptyContainer) => format!("{}={{}}", name),
        },
        Attribute::Spread { argument, .. } => format!("{{...{}}}", print_expr(argument)),
    }
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    let pad = INDENT.repeat(depth);
    let _ = write!(out, "{}<{}", pad, element.name);
    for attr in &element.attributes {
        let _ = write!(out, " {}", print_attribute(attr));
    }

    let children: Vec<&Child> = element
        .children
        .iter()
        .filter(|c| !matches!(c, Child::Text { value } if value.trim().is_empty()))
        .collect();
    if children.is_empty() {
        out.push_str(" />\n");
        return;
    }
    out.push_str(">\n");
    for child in children {
        match child {
            Child::Element(e) => write_element(out, e, depth + 1),
            Child::Text { value } => {
                let _ = writeln!(out, "{}{}{}", pad, INDENT, value.trim());
            }
            Child::Expression { expression } => {
                let _ = writeln!(out, "{}{}{{{}}}", pad, INDENT, print_expr(expression));
            }
        }
    }
    let _ = writeln!(out, "{}</{}>", pad, element.name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Property, Provenance};
    use pretty_assertions::assert_eq;

    #[test]
    fn prints_nested_tree() {
        let mut root = Element::new("section", Provenance::default());
        root.push_attribute(Attribute::named(
            "id",
            Some(AttrValue::StringLiteral {
                value: "main".to_string(),
            }),
            Provenance::default(),
        ));
        root.push_attribute(Attribute::class_name(
            Expr::call(
                Expr::ident("bem"),
                vec![
                    Expr::string("card"),
                    Expr::NullLiteral,
                    Expr::Object {
                        properties: vec![Property {
                            key: "open".to_string(),
                            value: Expr::ident("isOpen"),
                        }],
                    },
                    Expr::NullLiteral,
                ],
            ),
            Provenance::default(),
        ));
        let mut child = Element::new("h2", Provenance::default());
        child.children.push(Child::Text {
            value: "  Title ".to_string(),
        });
        root.children.push(Child::Text {
            value: "\n   ".to_string(),
        });
        root.children.push(Child::Element(child));
        root.children.push(Child::Element(Element::new("hr", Provenance::default())));

        assert_eq!(
            print_element(&root),
            "<section id=\"main\" className={bem(\"card\", null, { open: isOpen }, null)}>\n  <h2>\n    Title\n  </h2>\n  <hr />\n</section>\n"
        );
    }

    #[test]
    fn prints_template_and_spread() {
        let template = Expr::TemplateLiteral {
            quasis: vec!["item-".to_string(), String::new()],
            expressions: vec![Expr::ident("n")],
        };
        assert_eq!(print_expr(&template), "`item-${n}`");

        let awkward = Expr::TemplateLiteral {
            quasis: vec!["a`b ${c} d\\".to_string(), String::new()],
            expressions: vec![Expr::ident("e")],
        };
        assert_eq!(print_expr(&awkward), "`a\\`b \\${c} d\\\\${e}`");

        let spread = Attribute::Spread {
            argument: Expr::ident("rest"),
            prov: Provenance::default(),
        };
        assert_eq!(print_attribute(&spread), "{...rest}");
    }
}
