//! Namespace resolution: statically known namespaces and default namespaces.
use std::iter;

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::consts::{FNS, XMLNS_PREFIX};
use crate::context::StaticContext;
use crate::names::{ExpandedName, QName};
use crate::syntax::{SyntaxKind, SyntaxNode};

/// Which namespace a name position asks for, and which positions a binding serves.
///
/// `accepts` is a fixed table: every variant stands for a set of basic categories,
/// and two variants accept each other when those sets intersect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamespaceType {
    DefaultElement,
    DefaultType,
    DefaultElementOrType,
    DefaultFunctionDecl,
    DefaultFunctionRef,
    DefaultFunctionDeclOrRef,
    None,
    Prefixed,
    Undefined,
    LanguageDefined,
}

impl NamespaceType {
    const ELEMENT: u8 = 1;
    const TYPE: u8 = 1 << 1;
    const FUNCTION_DECL: u8 = 1 << 2;
    const FUNCTION_REF: u8 = 1 << 3;
    const NONE: u8 = 1 << 4;
    const PREFIXED: u8 = 1 << 5;
    const UNDEFINED: u8 = 1 << 6;
    const LANGUAGE_DEFINED: u8 = 1 << 7;

    fn categories(self) -> u8 {
        match self {
            NamespaceType::DefaultElement => Self::ELEMENT,
            NamespaceType::DefaultType => Self::TYPE,
            NamespaceType::DefaultElementOrType => Self::ELEMENT | Self::TYPE,
            NamespaceType::DefaultFunctionDecl => Self::FUNCTION_DECL,
            NamespaceType::DefaultFunctionRef => Self::FUNCTION_REF,
            NamespaceType::DefaultFunctionDeclOrRef => Self::FUNCTION_DECL | Self::FUNCTION_REF,
            NamespaceType::None => Self::NONE,
            NamespaceType::Prefixed => Self::PREFIXED,
            NamespaceType::Undefined => Self::UNDEFINED,
            NamespaceType::LanguageDefined => Self::LANGUAGE_DEFINED,
        }
    }

    pub fn accepts(self, other: NamespaceType) -> bool {
        self.categories() & other.categories() != 0
    }

    pub fn is_function(self) -> bool {
        self.categories() & (Self::FUNCTION_DECL | Self::FUNCTION_REF) != 0
    }

    pub fn is_element_or_type(self) -> bool {
        self.categories() & (Self::ELEMENT | Self::TYPE) != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceBinding<N> {
    pub prefix: Option<CompactString>,
    pub uri: CompactString,
    pub kind: NamespaceType,
    /// Declaring node; `None` for profile entries and the language default.
    pub defining_node: Option<N>,
}

impl<N> NamespaceBinding<N> {
    pub fn accepts(&self, kind: NamespaceType) -> bool {
        self.kind.accepts(kind)
    }

    fn declared(
        prefix: Option<CompactString>,
        uri: CompactString,
        kind: NamespaceType,
        node: N,
    ) -> Self {
        Self {
            prefix,
            uri,
            kind,
            defining_node: Some(node),
        }
    }
}

/// Implementation default for `kind`: the function library namespace for function
/// names, no namespace for everything else.
fn language_default<N>(kind: NamespaceType) -> NamespaceBinding<N> {
    let (uri, kind) = if kind.is_function() {
        (FNS, NamespaceType::DefaultFunctionDeclOrRef)
    } else if kind.is_element_or_type() {
        ("", NamespaceType::DefaultElementOrType)
    } else {
        ("", kind)
    };
    NamespaceBinding {
        prefix: None,
        uri: uri.into(),
        kind,
        defining_node: None,
    }
}

type Declared<N> = SmallVec<[NamespaceBinding<N>; 4]>;

/// Prefixed and default bindings declared by `ancestor` itself, in source order.
fn declared_at<N: SyntaxNode>(ancestor: &N) -> Declared<N> {
    let mut out = Declared::new();
    match ancestor.kind() {
        SyntaxKind::DirElemConstructor => {
            if let Some(attrs) = ancestor.first_child(SyntaxKind::DirAttributeList) {
                for attr in attrs.children_of_kind(SyntaxKind::DirAttribute) {
                    let uri = attr.child_text(SyntaxKind::DirAttributeValue);
                    out.extend(xmlns_binding(&attr, uri));
                }
            }
        }
        SyntaxKind::WithExpr => {
            for decl in ancestor.children_of_kind(SyntaxKind::NamespaceDeclaration) {
                let uri = decl.child_text(SyntaxKind::UriLiteral);
                out.extend(xmlns_binding(&decl, uri));
            }
        }
        SyntaxKind::Module => {
            if let Some(decl) = ancestor.first_child(SyntaxKind::ModuleDecl) {
                out.extend(prefixed_binding(&decl));
            }
            if let Some(prolog) = ancestor.first_child(SyntaxKind::Prolog) {
                for decl in prolog.children() {
                    out.extend(prolog_binding(&decl));
                }
            }
        }
        _ => {}
    }
    out
}

fn prolog_binding<N: SyntaxNode>(decl: &N) -> Option<NamespaceBinding<N>> {
    match decl.kind() {
        SyntaxKind::NamespaceDecl | SyntaxKind::ModuleImport => prefixed_binding(decl),
        SyntaxKind::SchemaImport => {
            if decl.first_child(SyntaxKind::DefaultElementNamespace).is_some() {
                default_binding(decl, NamespaceType::DefaultElementOrType)
            } else {
                prefixed_binding(decl)
            }
        }
        SyntaxKind::DefaultElementNamespaceDecl => {
            default_binding(decl, NamespaceType::DefaultElementOrType)
        }
        SyntaxKind::DefaultFunctionNamespaceDecl => {
            default_binding(decl, NamespaceType::DefaultFunctionDeclOrRef)
        }
        _ => None,
    }
}

/// `Prefix` + `UriLiteral` declarations; nothing when either is missing.
fn prefixed_binding<N: SyntaxNode>(decl: &N) -> Option<NamespaceBinding<N>> {
    let prefix = decl.child_text(SyntaxKind::Prefix);
    let uri = decl.child_text(SyntaxKind::UriLiteral);
    match (prefix, uri) {
        (Some(prefix), Some(uri)) => Some(NamespaceBinding::declared(
            Some(prefix),
            uri,
            NamespaceType::Prefixed,
            decl.clone(),
        )),
        _ => {
            tracing::trace!(
                kind = ?decl.kind(),
                "namespace declaration without prefix or URI ignored"
            );
            None
        }
    }
}

fn default_binding<N: SyntaxNode>(decl: &N, kind: NamespaceType) -> Option<NamespaceBinding<N>> {
    let Some(uri) = decl.child_text(SyntaxKind::UriLiteral) else {
        tracing::trace!(kind = ?decl.kind(), "default namespace declaration without URI ignored");
        return None;
    };
    Some(NamespaceBinding::declared(None, uri, kind, decl.clone()))
}

/// `xmlns:p="uri"` (prefixed) and `xmlns="uri"` (default element/type) declarations.
fn xmlns_binding<N: SyntaxNode>(
    holder: &N,
    uri: Option<CompactString>,
) -> Option<NamespaceBinding<N>> {
    let (_, name) = QName::of_child(holder)?;
    let uri = uri?;
    match name.prefix.as_deref() {
        Some(XMLNS_PREFIX) => Some(NamespaceBinding::declared(
            Some(name.local),
            uri,
            NamespaceType::Prefixed,
            holder.clone(),
        )),
        None if name.local == XMLNS_PREFIX => Some(NamespaceBinding::declared(
            None,
            uri,
            NamespaceType::DefaultElementOrType,
            holder.clone(),
        )),
        _ => None,
    }
}

impl<N: SyntaxNode> StaticContext<N> {
    /// Prefix bindings visible at `position`: declared ones nearest first, followed by
    /// the profile's predefined table sorted by prefix.
    ///
    /// Several bindings may share a prefix; the first one wins.
    pub fn statically_known_namespaces<'a>(
        &'a self,
        position: &N,
    ) -> impl Iterator<Item = NamespaceBinding<N>> + use<'a, N> {
        let declared = position
            .ancestors_with_child()
            .flat_map(|(ancestor, _)| declared_at(&ancestor))
            .filter(|b| b.kind == NamespaceType::Prefixed);
        let predefined = self.profile().namespaces().iter().map(|ns| NamespaceBinding {
            prefix: Some(ns.prefix.clone()),
            uri: ns.uri.clone(),
            kind: NamespaceType::Prefixed,
            defining_node: None,
        });
        declared.chain(predefined)
    }

    /// Default namespace declarations accepting `kind`, nearest first, terminated by
    /// the language default. Never empty; the first entry is the effective default.
    pub fn default_namespace<'a>(
        &'a self,
        position: &N,
        kind: NamespaceType,
    ) -> impl Iterator<Item = NamespaceBinding<N>> + use<'a, N> {
        position
            .ancestors_with_child()
            .flat_map(|(ancestor, _)| declared_at(&ancestor))
            .filter(move |b| b.kind != NamespaceType::Prefixed && b.accepts(kind))
            .chain(iter::once(language_default(kind)))
    }

    /// Expand a name node (or the `QName` child of `name`) as seen from its position.
    pub fn expand_qname(&self, name: &N, kind: NamespaceType) -> Option<ExpandedName> {
        let name = if name.kind() == SyntaxKind::QName {
            name.clone()
        } else {
            name.first_child(SyntaxKind::QName)?
        };
        let q = QName::from_node(&name)?;
        self.expand(&q, &name, kind)
    }

    /// Expand `q` against the static context at `at`. A prefix that is not bound
    /// leaves the name unresolved.
    pub fn expand(&self, q: &QName, at: &N, kind: NamespaceType) -> Option<ExpandedName> {
        if let Some(ns) = &q.namespace {
            return Some(ExpandedName::new(Some(ns.as_str()), q.local.clone()));
        }
        let binding = match &q.prefix {
            Some(prefix) => self
                .statically_known_namespaces(at)
                .find(|b| b.prefix.as_ref() == Some(prefix)),
            None => self.default_namespace(at, kind).next(),
        }?;
        Some(ExpandedName::new(Some(binding.uri.as_str()), q.local.clone()))
    }
}
