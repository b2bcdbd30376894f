use core::fmt;

use compact_str::CompactString;

use crate::syntax::{SyntaxKind, SyntaxNode};

/// Lexical name as written in the source: `local`, `prefix:local` or `Q{uri}local`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub prefix: Option<CompactString>,
    /// Namespace given inline through a braced URI literal.
    pub namespace: Option<CompactString>,
    pub local: CompactString,
}

impl QName {
    pub fn new(prefix: Option<&str>, local: impl Into<CompactString>) -> Self {
        Self {
            prefix: prefix.map(CompactString::from),
            namespace: None,
            local: local.into(),
        }
    }

    pub fn with_namespace(prefix: Option<&str>, ns: &str, local: impl Into<CompactString>) -> Self {
        Self {
            prefix: prefix.map(CompactString::from),
            namespace: Some(CompactString::from(ns)),
            local: local.into(),
        }
    }

    /// Read a `QName` node. Returns `None` when the local name is missing.
    pub fn from_node<N: SyntaxNode>(name: &N) -> Option<Self> {
        if name.kind() != SyntaxKind::QName {
            return None;
        }
        let mut prefix = None;
        let mut namespace = None;
        let mut local = None;
        for c in name.children() {
            match c.kind() {
                SyntaxKind::Prefix => prefix = c.text(),
                SyntaxKind::BracedUriLiteral => namespace = c.text(),
                SyntaxKind::LocalName => local = c.text(),
                _ => {}
            }
        }
        let local = local.filter(|l| !l.is_empty())?;
        Some(Self {
            prefix,
            namespace,
            local,
        })
    }

    /// `QName` child of a binder or declaration node, read via [`QName::from_node`].
    pub fn of_child<N: SyntaxNode>(holder: &N) -> Option<(N, Self)> {
        let name = holder.first_child(SyntaxKind::QName)?;
        let q = Self::from_node(&name)?;
        Some((name, q))
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.namespace, &self.prefix) {
            (Some(ns), _) => write!(f, "Q{{{}}}{}", ns, self.local),
            (None, Some(p)) => write!(f, "{}:{}", p, self.local),
            (None, None) => f.write_str(&self.local),
        }
    }
}

/// Namespace URI plus local name; the unit of name comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpandedName {
    pub ns_uri: Option<CompactString>,
    pub local: CompactString,
}

impl ExpandedName {
    /// The empty URI means "no namespace" and is stored as `None`.
    pub fn new(ns_uri: Option<&str>, local: impl Into<CompactString>) -> Self {
        Self {
            ns_uri: ns_uri.filter(|u| !u.is_empty()).map(CompactString::from),
            local: local.into(),
        }
    }

    pub fn ns_str(&self) -> &str {
        self.ns_uri.as_deref().unwrap_or("")
    }
}

impl fmt::Display for ExpandedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{{{}}}{}", self.ns_str(), self.local)
    }
}

#[cfg(test)]
mod tests {
    use super::{ExpandedName, QName};
    use crate::syntax::SyntaxKind;
    use crate::syntax::tree::{node, qname, token};

    #[test]
    fn reads_prefixed_and_braced_names() {
        let q = QName::from_node(&qname("fn:count").build()).unwrap();
        assert_eq!(q, QName::new(Some("fn"), "count"));
        assert_eq!(q.to_string(), "fn:count");

        let q = QName::from_node(&qname("Q{urn:a}b").build()).unwrap();
        assert_eq!(q.namespace.as_deref(), Some("urn:a"));
        assert_eq!(q.to_string(), "Q{urn:a}b");
    }

    #[test]
    fn missing_local_name_is_not_a_name() {
        let broken = node(SyntaxKind::QName)
            .child(token(SyntaxKind::Prefix, "a"))
            .build();
        assert!(QName::from_node(&broken).is_none());
        let not_a_name = token(SyntaxKind::LocalName, "a").build();
        assert!(QName::from_node(&not_a_name).is_none());
    }

    #[test]
    fn empty_namespace_uri_is_no_namespace() {
        assert_eq!(ExpandedName::new(Some(""), "x"), ExpandedName::new(None, "x"));
        assert_eq!(ExpandedName::new(None, "x").to_string(), "Q{}x");
    }
}
