//! Attribute Classifier & Collector
//!
//! Picks the system props off a matched element and gathers their values, in
//! declaration order, into a [`CollectedStyle`].

use oxc_ast::ast::{JSXAttributeItem, JSXAttributeName, JSXAttributeValue, JSXOpeningElement};
use oxc_span::GetSpan;

use crate::diagnostics::SourcePosition;
use crate::options::BareLiteralPolicy;
use crate::registry::is_style_prop;
use crate::serialize::StyleValue;

/// One merged entry of the style object.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleEntry {
    pub key: String,
    pub value: StyleValue,
    /// Indexes into the element's attribute list that declared this key
    pub attributes: Vec<usize>,
    /// Position of the declaration whose value won
    pub position: SourcePosition,
}

/// Ordered key → value mapping collected from one element.
///
/// A key declared twice keeps the slot of its first declaration and the value
/// of its last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectedStyle {
    entries: Vec<StyleEntry>,
}

impl CollectedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        key: &str,
        value: StyleValue,
        attribute: usize,
        position: SourcePosition,
    ) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.value = value;
            entry.attributes.push(attribute);
            entry.position = position;
            return;
        }
        self.entries.push(StyleEntry {
            key: key.to_string(),
            value,
            attributes: vec![attribute],
            position,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleEntry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }

    pub fn retain(&mut self, keep: impl FnMut(&StyleEntry) -> bool) {
        self.entries.retain(keep);
    }

    /// Attribute indexes backing the entries, ascending.
    pub fn attribute_indexes(&self) -> Vec<usize> {
        let mut indexes: Vec<usize> = self
            .entries
            .iter()
            .flat_map(|e| e.attributes.iter().copied())
            .collect();
        indexes.sort_unstable();
        indexes
    }
}

/// Collects the system props of an element of registry kind `kind`.
///
/// Props in `name={expr}` form always contribute an entry, including ones whose
/// expression cannot be migrated (those carry [`StyleValue::Unsupported`]).
/// Bare string props contribute only under [`BareLiteralPolicy::Migrate`].
/// Valueless props and empty containers never contribute.
pub fn collect_style(
    opening: &JSXOpeningElement<'_>,
    kind: &str,
    source: &str,
    bare_literals: BareLiteralPolicy,
) -> CollectedStyle {
    let mut style = CollectedStyle::new();

    for (index, item) in opening.attributes.iter().enumerate() {
        let JSXAttributeItem::Attribute(attr) = item else {
            continue;
        };
        let JSXAttributeName::Identifier(name) = &attr.name else {
            continue;
        };
        let key = name.name.as_str();
        if !is_style_prop(kind, key) {
            continue;
        }

        let value = match &attr.value {
            Some(JSXAttributeValue::ExpressionContainer(container)) => {
                StyleValue::from_jsx_expression(&container.expression, source)
            }
            Some(JSXAttributeValue::StringLiteral(s)) => match bare_literals {
                BareLiteralPolicy::Migrate => Some(StyleValue::from_jsx_string(&s.value)),
                BareLiteralPolicy::Skip => None,
            },
            Some(JSXAttributeValue::Element(_)) | Some(JSXAttributeValue::Fragment(_)) => {
                Some(StyleValue::Unsupported {
                    shape: "jsx",
                    text: attribute_value_text(attr.value.as_ref(), source),
                })
            }
            None => None,
        };

        if let Some(value) = value {
            let position = SourcePosition::from_offset(source, attr.span.start);
            style.insert(key, value, index, position);
        }
    }

    style
}

fn attribute_value_text(value: Option<&JSXAttributeValue<'_>>, source: &str) -> String {
    value
        .map(|v| v.span())
        .and_then(|span| source.get(span.start as usize..span.end as usize))
        .unwrap_or_default()
        .to_string()
}

/// True if the element already declares an attribute called `name`.
pub fn has_attribute(opening: &JSXOpeningElement<'_>, name: &str) -> bool {
    opening.attributes.iter().any(|item| match item {
        JSXAttributeItem::Attribute(attr) => {
            matches!(&attr.name, JSXAttributeName::Identifier(id) if id.name.as_str() == name)
        }
        JSXAttributeItem::SpreadAttribute(_) => false,
    })
}
