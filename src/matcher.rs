//! Element Matcher
//!
//! Resolves the component kind of a JSX element and decides whether it is a
//! registry member.

use oxc_ast::ast::{JSXElementName, JSXOpeningElement, Program};
use oxc_ast_visit::{walk, Visit};
use oxc_span::GetSpan;

use crate::diagnostics::SourcePosition;
use crate::imports::AliasTable;
use crate::registry::is_registered_kind;

/// A registry element found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateElement {
    /// Kind used for the registry lookup
    pub kind: String,
    /// Tag as written in the source, e.g. `Btn` or `Primer.Button`
    pub tag: String,
    pub position: SourcePosition,
}

/// Resolves the registry kind an element name refers to.
///
/// Member names (`Primer.Button`) resolve to their trailing segment. Plain
/// identifiers resolve through the alias table first and fall back to the
/// name as written. Namespaced names and `this` never resolve.
pub fn resolve_kind(name: &JSXElementName<'_>, aliases: &AliasTable) -> Option<String> {
    match name {
        JSXElementName::Identifier(id) => Some(resolve_local(id.name.as_str(), aliases)),
        JSXElementName::IdentifierReference(id) => Some(resolve_local(id.name.as_str(), aliases)),
        JSXElementName::MemberExpression(member) => Some(member.property.name.to_string()),
        JSXElementName::NamespacedName(_) | JSXElementName::ThisExpression(_) => None,
    }
}

fn resolve_local(local: &str, aliases: &AliasTable) -> String {
    aliases.canonical_for(local).unwrap_or(local).to_string()
}

/// Resolves the kind of `opening` and returns it only if it is registered.
pub fn match_element(opening: &JSXOpeningElement<'_>, aliases: &AliasTable) -> Option<String> {
    resolve_kind(&opening.name, aliases).filter(|kind| is_registered_kind(kind))
}

/// The tag of an element name exactly as written.
pub fn tag_name(name: &JSXElementName<'_>) -> String {
    match name {
        JSXElementName::Identifier(id) => id.name.to_string(),
        JSXElementName::IdentifierReference(id) => id.name.to_string(),
        JSXElementName::NamespacedName(ns) => format!("{}:{}", ns.namespace.name, ns.name.name),
        JSXElementName::MemberExpression(member) => {
            format!("{}.{}", member_object_name(&member.object), member.property.name)
        }
        JSXElementName::ThisExpression(_) => "this".to_string(),
    }
}

fn member_object_name(object: &oxc_ast::ast::JSXMemberExpressionObject<'_>) -> String {
    use oxc_ast::ast::JSXMemberExpressionObject;
    match object {
        JSXMemberExpressionObject::IdentifierReference(id) => id.name.to_string(),
        JSXMemberExpressionObject::MemberExpression(inner) => {
            format!("{}.{}", member_object_name(&inner.object), inner.property.name)
        }
        JSXMemberExpressionObject::ThisExpression(_) => "this".to_string(),
    }
}

/// Lists registry elements of `program` in document order.
pub fn find_candidates(
    program: &Program<'_>,
    source: &str,
    aliases: &AliasTable,
) -> Vec<CandidateElement> {
    let mut finder = CandidateFinder {
        source,
        aliases,
        found: Vec::new(),
    };
    finder.visit_program(program);
    finder.found
}

struct CandidateFinder<'s> {
    source: &'s str,
    aliases: &'s AliasTable,
    found: Vec<CandidateElement>,
}

impl<'a, 's> Visit<'a> for CandidateFinder<'s> {
    fn visit_jsx_opening_element(&mut self, opening: &JSXOpeningElement<'a>) {
        if let Some(kind) = match_element(opening, self.aliases) {
            self.found.push(CandidateElement {
                kind,
                tag: tag_name(&opening.name),
                position: SourcePosition::from_offset(self.source, opening.span().start),
            });
        }
        walk::walk_jsx_opening_element(self, opening);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn candidates(code: &str) -> Vec<CandidateElement> {
        let allocator = Allocator::default();
        let source_type = SourceType::default().with_module(true).with_jsx(true);
        let ret = Parser::new(&allocator, code, source_type).parse();
        assert!(ret.errors.is_empty(), "{:?}", ret.errors);
        let aliases = AliasTable::from_program(&ret.program, "@primer/components");
        find_candidates(&ret.program, code, &aliases)
    }

    #[test]
    fn test_candidates_in_document_order() {
        let found = candidates(
            "const a = (\n  <Box>\n    <Avatar />\n    <Button><Link /></Button>\n  </Box>\n);",
        );
        let kinds: Vec<&str> = found.iter().map(|c| c.kind.as_str()).collect();
        assert_eq!(kinds, vec!["Avatar", "Button", "Link"]);
        assert_eq!(found[0].position, SourcePosition { line: 3, column: 5 });
    }

    #[test]
    fn test_member_name_uses_trailing_segment() {
        let found = candidates("const a = <Primer.Button margin={2} />;");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, "Button");
        assert_eq!(found[0].tag, "Primer.Button");
    }

    #[test]
    fn test_alias_resolves_to_canonical_kind() {
        let found = candidates(
            "import { Button as Btn } from '@primer/components';\nconst a = <Btn margin={2} />;",
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, "Button");
        assert_eq!(found[0].tag, "Btn");
    }

    #[test]
    fn test_alias_shadows_literal_name() {
        // `Button` here is the library's Box, which has no registry entry
        let found = candidates(
            "import { Box as Button } from '@primer/components';\nconst a = <Button margin={2} />;",
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_unregistered_and_intrinsic_elements_are_skipped() {
        let found = candidates("const a = <div><Box m={1} /><button /></div>;");
        assert!(found.is_empty());
    }
}
