//! Import Resolver
//!
//! Records how component library exports are bound in one file so aliased
//! imports (`import { Button as Btn }`) still resolve to their canonical kind.

use oxc_ast::ast::{ImportDeclaration, ImportDeclarationSpecifier, ModuleExportName, Program};
use oxc_ast_visit::Visit;
use std::collections::HashMap;

/// Canonical export name → local binding, for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    by_canonical: HashMap<String, String>,
    by_local: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `program` for named imports from any module whose path contains
    /// `library_marker`.
    pub fn from_program(program: &Program<'_>, library_marker: &str) -> Self {
        let mut resolver = ImportResolver {
            library_marker,
            table: AliasTable::new(),
        };
        resolver.visit_program(program);
        resolver.table
    }

    pub fn insert(&mut self, canonical: impl Into<String>, local: impl Into<String>) {
        let canonical = canonical.into();
        let local = local.into();
        // a re-import of the same export replaces the previous binding
        if let Some(previous) = self.by_canonical.insert(canonical.clone(), local.clone()) {
            self.by_local.remove(&previous);
        }
        self.by_local.insert(local, canonical);
    }

    /// Local alias the canonical export is bound to.
    pub fn local_for(&self, canonical: &str) -> Option<&str> {
        self.by_canonical.get(canonical).map(String::as_str)
    }

    /// Canonical export a local binding refers to.
    pub fn canonical_for(&self, local: &str) -> Option<&str> {
        self.by_local.get(local).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_canonical.is_empty()
    }
}

struct ImportResolver<'m> {
    library_marker: &'m str,
    table: AliasTable,
}

impl<'a, 'm> Visit<'a> for ImportResolver<'m> {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        if !decl.source.value.as_str().contains(self.library_marker) {
            return;
        }
        let Some(specifiers) = &decl.specifiers else {
            return;
        };
        for specifier in specifiers {
            // default and namespace imports carry no canonical export name
            if let ImportDeclarationSpecifier::ImportSpecifier(spec) = specifier {
                let imported = match &spec.imported {
                    ModuleExportName::IdentifierName(id) => id.name.to_string(),
                    ModuleExportName::IdentifierReference(id) => id.name.to_string(),
                    ModuleExportName::StringLiteral(s) => s.value.to_string(),
                };
                self.table.insert(imported, spec.local.name.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn table_for(code: &str) -> AliasTable {
        let allocator = Allocator::default();
        let source_type = SourceType::default().with_module(true).with_jsx(true);
        let ret = Parser::new(&allocator, code, source_type).parse();
        assert!(ret.errors.is_empty());
        AliasTable::from_program(&ret.program, "@primer/components")
    }

    #[test]
    fn test_records_aliased_and_plain_imports() {
        let table = table_for(
            "import { Button as Btn, Avatar } from '@primer/components';\nimport { Box } from 'other-lib';",
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.local_for("Button"), Some("Btn"));
        assert_eq!(table.canonical_for("Btn"), Some("Button"));
        assert_eq!(table.local_for("Avatar"), Some("Avatar"));
        assert_eq!(table.local_for("Box"), None);
    }

    #[test]
    fn test_marker_matches_subpaths() {
        let table = table_for("import { Link as L } from '@primer/components/lib/Link';");
        assert_eq!(table.canonical_for("L"), Some("Link"));
    }

    #[test]
    fn test_default_and_namespace_imports_are_ignored() {
        let table = table_for(
            "import Primer from '@primer/components';\nimport * as P from '@primer/components';",
        );
        assert!(table.is_empty());
    }

    #[test]
    fn test_no_library_import_yields_empty_table() {
        let table = table_for("import React from 'react';\nconst x = <div />;");
        assert!(table.is_empty());
    }

    #[test]
    fn test_reimport_replaces_previous_alias() {
        let mut table = AliasTable::new();
        table.insert("Button", "A");
        table.insert("Button", "B");
        assert_eq!(table.local_for("Button"), Some("B"));
        assert_eq!(table.canonical_for("A"), None);
        assert_eq!(table.canonical_for("B"), Some("Button"));
    }
}
