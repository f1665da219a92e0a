//! Tree Mutator
//!
//! Plans the rewrite of one element from its collected style, then applies the
//! plan to the element's attribute list in a single batch.

use oxc_ast::ast::{JSXExpression, JSXOpeningElement};
use oxc_ast::AstBuilder;
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType, SPAN};

use crate::collect::{collect_style, has_attribute, CollectedStyle};
use crate::diagnostics::{
    Diagnostic, Severity, SourcePosition, DIAG_STYLE_ATTRIBUTE_EXISTS, DIAG_UNSUPPORTED_VALUE,
};
use crate::format::SourceEdit;
use crate::options::{TransformOptions, UnsupportedValuePolicy};
use crate::serialize::{render_object_literal, SerializeError};

/// Everything a planner needs to know about the file being migrated.
pub struct PlanContext<'c> {
    pub source: &'c str,
    pub file: &'c str,
    pub options: &'c TransformOptions,
}

/// Attribute edits for one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementPlan {
    /// Attributes to delete, ascending
    pub remove: Vec<usize>,
    /// Attribute replaced in place by the style prop
    pub replace: usize,
    /// Object literal assigned to the style prop
    pub literal: String,
    pub keys: Vec<String>,
}

/// Terminal state of one scanned element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementOutcome {
    Untouched,
    Migrate(ElementPlan),
}

/// Decides how the element of registry kind `kind` is rewritten.
///
/// Never mutates anything; problems come back as diagnostics next to the
/// outcome.
pub fn plan_element(
    opening: &JSXOpeningElement<'_>,
    kind: &str,
    tag: &str,
    ctx: &PlanContext<'_>,
) -> (ElementOutcome, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let mut style = collect_style(opening, kind, ctx.source, ctx.options.bare_literal_policy);
    if style.is_empty() {
        return (ElementOutcome::Untouched, diagnostics);
    }

    let style_attribute = ctx.options.style_attribute.as_str();
    if has_attribute(opening, style_attribute) {
        diagnostics.push(Diagnostic::new(
            DIAG_STYLE_ATTRIBUTE_EXISTS,
            Severity::Warning,
            format!(
                "already has a `{}` prop; {} system prop(s) not migrated",
                style_attribute,
                style.len()
            ),
            ctx.file,
            SourcePosition::from_offset(ctx.source, opening.span.start),
            tag,
            Some(style_attribute),
        ));
        return (ElementOutcome::Untouched, diagnostics);
    }

    let literal = match render(&style) {
        Ok(literal) => literal,
        Err(errors) => {
            for error in &errors {
                diagnostics.push(unsupported_value(error, &style, tag, ctx));
            }
            if ctx.options.unsupported_value_policy == UnsupportedValuePolicy::AbortElement {
                return (ElementOutcome::Untouched, diagnostics);
            }
            style.retain(|entry| entry.value.is_supported());
            if style.is_empty() {
                return (ElementOutcome::Untouched, diagnostics);
            }
            match render(&style) {
                Ok(literal) => literal,
                Err(_) => return (ElementOutcome::Untouched, diagnostics),
            }
        }
    };

    let mut remove = style.attribute_indexes();
    let Some(replace) = remove.pop() else {
        return (ElementOutcome::Untouched, diagnostics);
    };
    let keys = style.keys().into_iter().map(str::to_string).collect();

    (
        ElementOutcome::Migrate(ElementPlan {
            remove,
            replace,
            literal,
            keys,
        }),
        diagnostics,
    )
}

fn render(style: &CollectedStyle) -> Result<String, Vec<SerializeError>> {
    render_object_literal(style.iter().map(|e| (e.key.as_str(), &e.value)))
}

fn unsupported_value(
    error: &SerializeError,
    style: &CollectedStyle,
    tag: &str,
    ctx: &PlanContext<'_>,
) -> Diagnostic {
    let SerializeError::UnsupportedValueShape { key, .. } = error;
    let position = style
        .iter()
        .find(|e| &e.key == key)
        .map(|e| e.position)
        .unwrap_or_default();
    let consequence = match ctx.options.unsupported_value_policy {
        UnsupportedValuePolicy::SkipEntry => "left in place",
        UnsupportedValuePolicy::AbortElement => "element skipped",
    };
    Diagnostic::new(
        DIAG_UNSUPPORTED_VALUE,
        Severity::Warning,
        format!("{} ({})", error, consequence),
        ctx.file,
        position,
        tag,
        Some(key.as_str()),
    )
}

/// Applies `plan`: the replaced attribute becomes `style_attribute={literal}`,
/// then the removed attributes are dropped.
///
/// The literal is parsed before anything is touched; on failure the element is
/// unchanged and the parser messages are returned.
pub fn apply_plan<'a>(
    opening: &mut JSXOpeningElement<'a>,
    plan: &ElementPlan,
    ast: AstBuilder<'a>,
    style_attribute: &str,
) -> Result<(), Vec<String>> {
    let literal: &'a str = ast.allocator.alloc_str(&plan.literal);
    let source_type = SourceType::default().with_module(true).with_jsx(true);
    let expression = Parser::new(ast.allocator, literal, source_type)
        .parse_expression()
        .map_err(|errors| errors.iter().map(|e| e.to_string()).collect::<Vec<_>>())?;

    if plan.replace >= opening.attributes.len()
        || plan.remove.iter().any(|&i| i >= plan.replace)
    {
        return Err(vec![format!(
            "attribute plan out of range for {} attribute(s)",
            opening.attributes.len()
        )]);
    }

    let name_atom: &'a str = ast.allocator.alloc_str(style_attribute);
    let attribute = ast.jsx_attribute_item_attribute(
        SPAN,
        ast.jsx_attribute_name_identifier(SPAN, name_atom),
        Some(ast.jsx_attribute_value_expression_container(
            SPAN,
            JSXExpression::from(expression),
        )),
    );
    opening.attributes[plan.replace] = attribute;

    for &index in plan.remove.iter().rev() {
        opening.attributes.remove(index);
    }
    Ok(())
}

/// The text edits equivalent to [`apply_plan`], against the original source.
///
/// Must be called before the plan is applied, while the attribute spans still
/// point into `source`. A removed attribute takes the whitespace in front of
/// it along, so no gap is left behind.
pub fn source_edits(
    opening: &JSXOpeningElement<'_>,
    plan: &ElementPlan,
    source: &str,
    style_attribute: &str,
) -> Vec<SourceEdit> {
    let mut edits = Vec::with_capacity(plan.remove.len() + 1);
    for &index in &plan.remove {
        let Some(attr) = opening.attributes.get(index) else {
            continue;
        };
        let span = attr.span();
        let start = source
            .get(..span.start as usize)
            .map(|before| before.trim_end().len() as u32)
            .unwrap_or(span.start);
        edits.push(SourceEdit::delete(start, span.end));
    }
    if let Some(attr) = opening.attributes.get(plan.replace) {
        let span = attr.span();
        edits.push(SourceEdit {
            start: span.start,
            end: span.end,
            text: format!("{}={{{}}}", style_attribute, plan.literal),
        });
    }
    edits
}
