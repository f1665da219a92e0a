//! Transform driver
//!
//! One file in, one file out: parse, resolve library imports, rewrite every
//! registry element, then hand the tree to the formatter.

#[cfg(feature = "napi")]
use napi_derive::napi;
use oxc_allocator::Allocator;
use oxc_ast::ast::JSXOpeningElement;
use oxc_ast::AstBuilder;
use oxc_ast_visit::{walk_mut, VisitMut};
use oxc_parser::{Parser, ParserReturn};
use oxc_span::SourceType;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::diagnostics::{
    Diagnostic, Severity, SourcePosition, TransformError, DIAG_INVALID_STYLE_LITERAL,
};
use crate::format::{FileMeta, Formatter, SourceEdit, SpliceFormatter};
use crate::imports::AliasTable;
use crate::matcher::{match_element, tag_name};
use crate::mutate::{apply_plan, plan_element, source_edits, ElementOutcome, PlanContext};
use crate::options::TransformOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    pub code: String,
    /// False when no element was rewritten; `code` is then the input verbatim
    pub changed: bool,
    pub migrated_elements: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Migrates one file, splicing the rewritten attributes into the original
/// text.
pub fn transform(
    source: &str,
    file_path: &str,
    options: &TransformOptions,
) -> Result<TransformOutput, TransformError> {
    transform_with(source, file_path, options, &SpliceFormatter)
}

/// Migrates one file, rendering the result with `formatter`.
///
/// Only a parse failure is fatal. Everything else is reported through
/// [`TransformOutput::diagnostics`] and affects a single element.
pub fn transform_with(
    source: &str,
    file_path: &str,
    options: &TransformOptions,
    formatter: &dyn Formatter,
) -> Result<TransformOutput, TransformError> {
    let allocator = Allocator::default();
    let ParserReturn {
        mut program,
        errors,
        panicked,
        ..
    } = Parser::new(&allocator, source, source_type_for(file_path)).parse();

    if panicked || !errors.is_empty() {
        return Err(TransformError::Parse {
            file: file_path.to_string(),
            messages: errors.iter().map(|e| e.to_string()).collect(),
        });
    }

    let aliases = AliasTable::from_program(&program, &options.library_marker);
    if !aliases.is_empty() {
        debug!(file = file_path, imports = aliases.len(), "resolved library imports");
    }

    let mut migrator = StyleMigrator {
        ast: AstBuilder::new(&allocator),
        ctx: PlanContext {
            source,
            file: file_path,
            options,
        },
        aliases: &aliases,
        diagnostics: Vec::new(),
        edits: Vec::new(),
        migrated: 0,
    };
    migrator.visit_program(&mut program);
    let StyleMigrator {
        diagnostics,
        edits,
        migrated,
        ..
    } = migrator;

    if migrated == 0 {
        return Ok(TransformOutput {
            code: source.to_string(),
            changed: false,
            migrated_elements: 0,
            diagnostics,
        });
    }

    let file = FileMeta {
        path: file_path,
        source,
        edits: &edits,
    };
    Ok(TransformOutput {
        code: formatter.format(&program, &file),
        changed: true,
        migrated_elements: migrated,
        diagnostics,
    })
}

/// Parser settings for a path; JSX is enabled for everything except `.ts`.
pub fn source_type_for(file_path: &str) -> SourceType {
    match SourceType::from_path(file_path) {
        Ok(source_type) if source_type.is_typescript() => source_type,
        Ok(source_type) => source_type.with_jsx(true),
        Err(_) => SourceType::default().with_module(true).with_jsx(true),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ELEMENT REWRITER
// ═══════════════════════════════════════════════════════════════════════════════

struct StyleMigrator<'a, 'c> {
    ast: AstBuilder<'a>,
    ctx: PlanContext<'c>,
    aliases: &'c AliasTable,
    diagnostics: Vec<Diagnostic>,
    edits: Vec<SourceEdit>,
    migrated: usize,
}

impl<'a, 'c> StyleMigrator<'a, 'c> {
    fn report(&mut self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    fn migrate_element(&mut self, opening: &mut JSXOpeningElement<'a>, kind: &str) {
        let tag = tag_name(&opening.name);
        let (outcome, diagnostics) = plan_element(opening, kind, &tag, &self.ctx);
        for diagnostic in diagnostics {
            self.report(diagnostic);
        }

        let ElementOutcome::Migrate(plan) = outcome else {
            return;
        };
        let options = self.ctx.options;
        let style_attribute = options.style_attribute.as_str();
        let edits = source_edits(opening, &plan, self.ctx.source, style_attribute);
        match apply_plan(opening, &plan, self.ast, style_attribute) {
            Ok(()) => {
                self.edits.extend(edits);
                self.migrated += 1;
                debug!(
                    file = self.ctx.file,
                    element = %tag,
                    keys = ?plan.keys,
                    "migrated system props"
                );
            }
            Err(messages) => {
                let diagnostic = Diagnostic::new(
                    DIAG_INVALID_STYLE_LITERAL,
                    Severity::Error,
                    format!(
                        "generated `{}` does not parse: {}",
                        plan.literal,
                        messages.join("; ")
                    ),
                    self.ctx.file,
                    SourcePosition::from_offset(self.ctx.source, opening.span.start),
                    &tag,
                    Some(style_attribute),
                );
                self.report(diagnostic);
            }
        }
    }
}

impl<'a, 'c> VisitMut<'a> for StyleMigrator<'a, 'c> {
    fn visit_jsx_opening_element(&mut self, opening: &mut JSXOpeningElement<'a>) {
        if let Some(kind) = match_element(opening, self.aliases) {
            self.migrate_element(opening, &kind);
        }
        walk_mut::walk_jsx_opening_element(self, opening);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// NODE BINDING
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
#[napi]
pub fn transform_source_native(
    code: String,
    file_path: String,
    options_json: Option<String>,
) -> napi::Result<serde_json::Value> {
    let options = match options_json {
        Some(json) => TransformOptions::from_json(&json)
            .map_err(|e| napi::Error::from_reason(format!("Options parse error: {}", e)))?,
        None => TransformOptions::default(),
    };
    let output = transform(&code, &file_path, &options)
        .map_err(|e| napi::Error::from_reason(e.to_string()))?;
    serde_json::to_value(output).map_err(|e| napi::Error::from_reason(e.to_string()))
}
