//! Statically known function resolution.
//!
//! Candidates for a function name come from three providers, consulted lazily and in
//! priority order:
//! 1. function declarations in the prolog of the module containing the reference,
//! 2. function declarations of modules imported for the name's namespace,
//! 3. the predefined catalogue of the configured profile.
//!
//! Each provider's candidates are ordered by descending arity. Nothing is filtered by
//! the argument count at the call site and nothing is deduplicated across providers.
use std::iter;

use crate::context::StaticContext;
use crate::names::ExpandedName;
use crate::namespaces::NamespaceType;
use crate::profile::Arity;
use crate::syntax::{SyntaxKind, SyntaxNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDeclaration<N> {
    pub name: ExpandedName,
    pub arity: Arity,
    pub is_variadic: bool,
    /// The `FunctionDecl` node; `None` for predefined functions.
    pub defining_node: Option<N>,
}

/// `QName` node a function reference is spelled with.
fn name_node<N: SyntaxNode>(reference: &N) -> Option<N> {
    match reference.kind() {
        SyntaxKind::QName => Some(reference.clone()),
        SyntaxKind::FunctionCall
        | SyntaxKind::NamedFunctionRef
        | SyntaxKind::ArrowFunctionSpecifier
        | SyntaxKind::FunctionDecl => reference.first_child(SyntaxKind::QName),
        _ => None,
    }
}

fn by_descending_arity<N>(mut decls: Vec<FunctionDeclaration<N>>) -> Vec<FunctionDeclaration<N>> {
    // stable: equal arities keep declaration order
    decls.sort_by(|a, b| b.arity.cmp(&a.arity));
    decls
}

impl<N: SyntaxNode> StaticContext<N> {
    /// Candidate declarations for the function named by `reference`.
    ///
    /// `reference` is a `QName` node or a node owning one (`FunctionCall`,
    /// `NamedFunctionRef`, `ArrowFunctionSpecifier`, `FunctionDecl`). An unprefixed
    /// name falls into the default function namespace; a prefix that is not bound
    /// yields no candidates.
    pub fn statically_known_functions<'a>(
        &'a self,
        reference: &N,
    ) -> impl Iterator<Item = FunctionDeclaration<N>> + use<'a, N> {
        let target = name_node(reference)
            .and_then(|name| self.expand_qname(&name, NamespaceType::DefaultFunctionDeclOrRef));
        if target.is_none() {
            tracing::trace!(
                reference = ?reference.kind(),
                "function name could not be expanded"
            );
        }
        let root = reference.root();
        target.into_iter().flat_map(move |target| {
            let local = {
                let (root, target) = (root.clone(), target.clone());
                iter::once_with(move || {
                    by_descending_arity(self.declared_functions(&root, &target))
                })
                .flatten()
            };
            let imported = {
                let (root, target) = (root.clone(), target.clone());
                iter::once_with(move || self.imported_functions(&root, &target)).flatten()
            };
            let predefined =
                iter::once_with(move || self.predefined_functions(&target)).flatten();
            local.chain(imported).chain(predefined)
        })
    }

    /// Prolog function declarations of `module` named `target`, in source order.
    fn declared_functions(&self, module: &N, target: &ExpandedName) -> Vec<FunctionDeclaration<N>> {
        let Some(prolog) = module.first_child(SyntaxKind::Prolog) else {
            return Vec::new();
        };
        prolog
            .children_of_kind(SyntaxKind::FunctionDecl)
            .into_iter()
            .filter_map(|decl| {
                let name = self.expand_qname(&decl, NamespaceType::DefaultFunctionDecl)?;
                if name != *target {
                    return None;
                }
                let params = decl.first_child(SyntaxKind::ParamList);
                let arity = params
                    .as_ref()
                    .map_or(0, |p| p.children_of_kind(SyntaxKind::Param).len());
                let is_variadic = params
                    .as_ref()
                    .is_some_and(|p| p.first_child(SyntaxKind::Variadic).is_some());
                Some(FunctionDeclaration {
                    name,
                    arity,
                    is_variadic,
                    defining_node: Some(decl),
                })
            })
            .collect()
    }

    /// Declarations of modules imported by `root` for the namespace of `target`.
    fn imported_functions(&self, root: &N, target: &ExpandedName) -> Vec<FunctionDeclaration<N>> {
        let Some(ns) = target.ns_uri.as_deref() else {
            return Vec::new();
        };
        let Some(prolog) = root.first_child(SyntaxKind::Prolog) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for import in prolog.children() {
            if !matches!(import.kind(), SyntaxKind::ModuleImport | SyntaxKind::SchemaImport)
                || import.child_text(SyntaxKind::UriLiteral).as_deref() != Some(ns)
            {
                continue;
            }
            match self.module_loader().resolve(ns, &import) {
                Some(module) if module.root() == *root => {
                    tracing::debug!(
                        namespace = ns,
                        "import resolves to the importing module, skipped"
                    );
                }
                Some(module) => out.extend(self.declared_functions(&module.root(), target)),
                None => tracing::debug!(namespace = ns, "imported module not available"),
            }
        }
        by_descending_arity(out)
    }

    fn predefined_functions(&self, target: &ExpandedName) -> Vec<FunctionDeclaration<N>> {
        let rows = self
            .profile()
            .functions_named(target)
            .map(|f| FunctionDeclaration {
                name: f.name.clone(),
                arity: f.arity,
                is_variadic: f.is_variadic,
                defining_node: None,
            })
            .collect();
        by_descending_arity(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(local: &str, arity: Arity) -> FunctionDeclaration<()> {
        FunctionDeclaration {
            name: ExpandedName::new(Some("urn:t"), local),
            arity,
            is_variadic: false,
            defining_node: None,
        }
    }

    #[test]
    fn ordering_by_arity_is_stable() {
        let input = vec![decl("a", 1), decl("b", 3), decl("c", 1), decl("d", 0)];
        let sorted = by_descending_arity(input);
        let seen: Vec<_> = sorted.iter().map(|d| (d.name.local.as_str(), d.arity)).collect();
        assert_eq!(seen, vec![("b", 3), ("a", 1), ("c", 1), ("d", 0)]);
    }
}
