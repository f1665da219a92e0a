//! Output formatting seam.
//!
//! The transform edits the tree and records the same changes as byte-range
//! edits against the original text. A [`Formatter`] turns either of the two
//! back into source.

use oxc_ast::ast::Program;
use oxc_codegen::Codegen;
use tracing::warn;

/// Replaces `source[start..end]` with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEdit {
    pub start: u32,
    pub end: u32,
    pub text: String,
}

impl SourceEdit {
    pub fn delete(start: u32, end: u32) -> Self {
        SourceEdit {
            start,
            end,
            text: String::new(),
        }
    }
}

/// Identity of the file being rendered.
#[derive(Debug, Clone, Copy)]
pub struct FileMeta<'f> {
    pub path: &'f str,
    /// Source text the tree was parsed from
    pub source: &'f str,
    /// Every change made to the tree, as edits against `source`
    pub edits: &'f [SourceEdit],
}

/// Renders a (possibly mutated) program back to source text.
///
/// Implementations must not change program semantics and must be idempotent on
/// their own output.
pub trait Formatter: Sync {
    fn format(&self, program: &Program<'_>, file: &FileMeta<'_>) -> String;
}

/// Applies the recorded edits to the original text. Bytes outside the edited
/// attributes are kept exactly, comments and blank lines included.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpliceFormatter;

impl Formatter for SpliceFormatter {
    fn format(&self, _program: &Program<'_>, file: &FileMeta<'_>) -> String {
        splice(file.source, file.edits, file.path)
    }
}

/// Reprints the whole tree with `oxc_codegen` defaults. Layout, quotes and
/// most comments of untouched code are not kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodegenFormatter;

impl Formatter for CodegenFormatter {
    fn format(&self, program: &Program<'_>, _file: &FileMeta<'_>) -> String {
        Codegen::new().build(program).code
    }
}

fn splice(source: &str, edits: &[SourceEdit], path: &str) -> String {
    let mut ordered: Vec<&SourceEdit> = edits.iter().collect();
    ordered.sort_by_key(|e| (e.start, e.end));

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0usize;
    for edit in ordered {
        let (start, end) = (edit.start as usize, edit.end as usize);
        // edits come from attributes of distinct elements and never overlap
        let Some(kept) = source.get(cursor..start).filter(|_| start <= end) else {
            warn!(file = path, start, end, "skipping overlapping or invalid edit");
            continue;
        };
        if source.get(start..end).is_none() {
            warn!(file = path, start, end, "skipping out of range edit");
            continue;
        }
        out.push_str(kept);
        out.push_str(&edit.text);
        cursor = end;
    }
    out.push_str(source.get(cursor..).unwrap_or_default());
    out
}
