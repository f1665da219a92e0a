use serde::{Deserialize, Serialize};
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// DIAGNOSTIC CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const DIAG_UNSUPPORTED_VALUE: &str = "SX001";
pub const DIAG_INVALID_STYLE_LITERAL: &str = "SX002";
pub const DIAG_STYLE_ATTRIBUTE_EXISTS: &str = "SX003";

fn get_consequence(code: &str) -> &'static str {
    match code {
        DIAG_UNSUPPORTED_VALUE => "The prop was left in place and must be migrated by hand.",
        DIAG_INVALID_STYLE_LITERAL => "The element was left unchanged.",
        DIAG_STYLE_ATTRIBUTE_EXISTS => {
            "The element was left unchanged; merge its system props into the existing prop by hand."
        }
        _ => "Unknown diagnostic.",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

// ═══════════════════════════════════════════════════════════════════════════════
// DIAGNOSTIC
// ═══════════════════════════════════════════════════════════════════════════════

/// A recoverable, file-scoped problem found while migrating one element.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub code: String,
    pub severity: Severity,
    pub message: String,
    pub consequence: String,
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub element: String,
    pub attribute: Option<String>,
}

impl Diagnostic {
    pub fn new(
        code: &str,
        severity: Severity,
        message: String,
        file: &str,
        position: SourcePosition,
        element: &str,
        attribute: Option<&str>,
    ) -> Self {
        Diagnostic {
            code: code.to_string(),
            severity,
            message,
            consequence: get_consequence(code).to_string(),
            file: file.to_string(),
            line: position.line,
            column: position.column,
            element: element.to_string(),
            attribute: attribute.map(str::to_string),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{} [{}] <{}> {}",
            self.file, self.line, self.column, self.code, self.element, self.message
        )
    }
}

/// 1-based line and column of a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

impl SourcePosition {
    pub fn from_offset(source: &str, offset: u32) -> Self {
        let offset = (offset as usize).min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count() as u32 + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() as u32 + 1;
        SourcePosition { line, column }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FATAL ERRORS
// ═══════════════════════════════════════════════════════════════════════════════

/// Failures that stop the transform of one file.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("failed to parse {file}: {}", .messages.join("; "))]
    Parse { file: String, messages: Vec<String> },
}
