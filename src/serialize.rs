//! Value Serializer
//!
//! Turns the collected prop values of one element into the object literal
//! text assigned to the style prop.

use oxc_ast::ast::{Expression, JSXExpression};
use oxc_span::GetSpan;
use oxc_syntax::operator::UnaryOperator;
use thiserror::Error;

/// The value shapes a system prop can be migrated from.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Numeric literal, kept as its source text (`2`, `0.5`, `-1`)
    Numeric(String),
    /// String literal, unescaped
    Str(String),
    Boolean(bool),
    Null,
    /// Reference to a binding, emitted by name
    Identifier(String),
    /// Anything else; never rendered
    Unsupported { shape: &'static str, text: String },
}

impl StyleValue {
    /// Classifies the contents of an `attr={...}` container.
    ///
    /// Returns None for an empty container (`attr={}`). Parentheses around the
    /// value are looked through.
    pub fn from_jsx_expression(expr: &JSXExpression<'_>, source: &str) -> Option<Self> {
        let expr = expr.as_expression()?.without_parentheses();
        let value = match expr {
            Expression::NumericLiteral(_) => StyleValue::Numeric(source_text(expr, source)),
            Expression::StringLiteral(s) => StyleValue::Str(s.value.to_string()),
            Expression::BooleanLiteral(b) => StyleValue::Boolean(b.value),
            Expression::NullLiteral(_) => StyleValue::Null,
            Expression::Identifier(id) => StyleValue::Identifier(id.name.to_string()),
            Expression::UnaryExpression(unary)
                if unary.operator == UnaryOperator::UnaryNegation
                    && matches!(
                        unary.argument.without_parentheses(),
                        Expression::NumericLiteral(_)
                    ) =>
            {
                StyleValue::Numeric(source_text(expr, source))
            }
            other => StyleValue::Unsupported {
                shape: shape_name(other),
                text: source_text(other, source),
            },
        };
        Some(value)
    }

    /// Classifies a bare `attr="..."` string.
    ///
    /// `raw` is the text between the quotes. JSX decodes character references
    /// in it, so the value is decoded the same way; a named reference outside
    /// the known set is not guessed at.
    pub fn from_jsx_string(raw: &str) -> Self {
        match decode_jsx_entities(raw) {
            Some(value) => StyleValue::Str(value),
            None => StyleValue::Unsupported {
                shape: "character reference",
                text: format!("\"{}\"", raw),
            },
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, StyleValue::Unsupported { .. })
    }
}

fn source_text<T: GetSpan>(node: &T, source: &str) -> String {
    let span = node.span();
    source
        .get(span.start as usize..span.end as usize)
        .unwrap_or_default()
        .to_string()
}

fn shape_name(expr: &Expression<'_>) -> &'static str {
    match expr {
        Expression::CallExpression(_) | Expression::NewExpression(_) => "call",
        Expression::StaticMemberExpression(_)
        | Expression::ComputedMemberExpression(_)
        | Expression::PrivateFieldExpression(_)
        | Expression::ChainExpression(_) => "member access",
        Expression::TemplateLiteral(_) | Expression::TaggedTemplateExpression(_) => "template",
        Expression::ConditionalExpression(_) => "conditional",
        Expression::LogicalExpression(_) => "logical",
        Expression::BinaryExpression(_) => "binary",
        Expression::UnaryExpression(_) => "unary",
        Expression::ObjectExpression(_) => "object",
        Expression::ArrayExpression(_) => "array",
        Expression::ArrowFunctionExpression(_) | Expression::FunctionExpression(_) => "function",
        Expression::JSXElement(_) | Expression::JSXFragment(_) => "jsx",
        _ => "expression",
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CHARACTER REFERENCES
// ═══════════════════════════════════════════════════════════════════════════════

/// Decodes `&name;`, `&#123;` and `&#x7B;` references in JSX attribute text.
///
/// Returns None when a named reference is not one of the common ones below.
/// An `&` that does not start a reference is kept as is.
pub fn decode_jsx_entities(raw: &str) -> Option<String> {
    if !raw.contains('&') {
        return Some(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let body = tail
            .find(';')
            .filter(|&semi| semi > 1 && semi <= 10)
            .map(|semi| &tail[1..semi]);

        let Some(body) = body.filter(|b| is_reference_body(b)) else {
            out.push('&');
            rest = &tail[1..];
            continue;
        };
        out.push(reference_char(body)?);
        rest = &tail[body.len() + 2..];
    }
    out.push_str(rest);
    Some(out)
}

fn is_reference_body(body: &str) -> bool {
    match body.strip_prefix('#') {
        Some(num) => !num.is_empty() && num.chars().all(|c| c.is_ascii_alphanumeric()),
        None => body.chars().all(|c| c.is_ascii_alphanumeric()),
    }
}

fn reference_char(body: &str) -> Option<char> {
    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RENDERING
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    #[error("`{key}` has an unsupported {shape} value `{text}`")]
    UnsupportedValueShape {
        key: String,
        shape: &'static str,
        text: String,
    },
}

/// Renders one value as JavaScript source.
pub fn render_value(key: &str, value: &StyleValue) -> Result<String, SerializeError> {
    match value {
        StyleValue::Numeric(text) => Ok(text.clone()),
        StyleValue::Str(s) => Ok(format!("\"{}\"", escape_js_string(s))),
        StyleValue::Boolean(b) => Ok(b.to_string()),
        StyleValue::Null => Ok("null".to_string()),
        StyleValue::Identifier(name) => Ok(name.clone()),
        StyleValue::Unsupported { shape, text } => Err(SerializeError::UnsupportedValueShape {
            key: key.to_string(),
            shape: *shape,
            text: text.clone(),
        }),
    }
}

/// Renders `{ key1: value1, key2: value2, }` in entry order.
///
/// Fails with every entry that could not be rendered.
pub fn render_object_literal<'e, I>(entries: I) -> Result<String, Vec<SerializeError>>
where
    I: IntoIterator<Item = (&'e str, &'e StyleValue)>,
{
    let mut out = String::from("{");
    let mut errors = Vec::new();
    for (key, value) in entries {
        match render_value(key, value) {
            Ok(text) => {
                out.push(' ');
                out.push_str(key);
                out.push_str(": ");
                out.push_str(&text);
                out.push(',');
            }
            Err(e) => errors.push(e),
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }
    out.push_str(" }");
    Ok(out)
}

fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_entries_in_order_comma_terminated() {
        let margin = StyleValue::Numeric("2".to_string());
        let color = StyleValue::Str("red".to_string());
        let bg = StyleValue::Identifier("theme".to_string());
        let out =
            render_object_literal([("margin", &margin), ("color", &color), ("bg", &bg)]).unwrap();
        assert_eq!(out, "{ margin: 2, color: \"red\", bg: theme, }");
    }

    #[test]
    fn test_empty_collection_renders_empty_object() {
        let none: [(&str, &StyleValue); 0] = [];
        assert_eq!(render_object_literal(none).unwrap(), "{ }");
    }

    #[test]
    fn test_literal_kinds() {
        assert_eq!(render_value("a", &StyleValue::Boolean(false)).unwrap(), "false");
        assert_eq!(render_value("a", &StyleValue::Null).unwrap(), "null");
        assert_eq!(render_value("a", &StyleValue::Numeric("-1".into())).unwrap(), "-1");
    }

    #[test]
    fn test_character_references_are_decoded() {
        assert_eq!(decode_jsx_entities("plain").as_deref(), Some("plain"));
        assert_eq!(decode_jsx_entities("a&quot;b").as_deref(), Some("a\"b"));
        assert_eq!(decode_jsx_entities("&lt;&#65;&#x42;&gt;").as_deref(), Some("<AB>"));
        assert_eq!(decode_jsx_entities("a & b; c").as_deref(), Some("a & b; c"));
        assert_eq!(decode_jsx_entities("R&D").as_deref(), Some("R&D"));
        assert_eq!(decode_jsx_entities("a&hellip;"), None);
    }

    #[test]
    fn test_unknown_reference_is_unsupported() {
        assert_eq!(
            StyleValue::from_jsx_string("a&quot;b"),
            StyleValue::Str("a\"b".to_string())
        );
        assert!(!StyleValue::from_jsx_string("x&hellip;").is_supported());
    }

    #[test]
    fn test_strings_are_escaped() {
        let value = StyleValue::Str("say \"hi\"\\\n".to_string());
        assert_eq!(render_value("a", &value).unwrap(), r#""say \"hi\"\\\n""#);
    }

    #[test]
    fn test_unsupported_shape_is_an_error() {
        let value = StyleValue::Unsupported {
            shape: "call",
            text: "space(2)".to_string(),
        };
        let ok = StyleValue::Numeric("1".into());
        let errors = render_object_literal([("p", &ok), ("m", &value), ("mx", &value)]).unwrap_err();
        assert_eq!(errors.len(), 2);
        let err = &errors[0];
        assert_eq!(
            err,
            &SerializeError::UnsupportedValueShape {
                key: "m".to_string(),
                shape: "call",
                text: "space(2)".to_string(),
            }
        );
        assert_eq!(err.to_string(), "`m` has an unsupported call value `space(2)`");
    }
}
