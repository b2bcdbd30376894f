//! Syntax tree access for the static context resolvers.
//!
//! The resolvers never own or mutate a tree. They only need the four accessors of
//! [`SyntaxNode`]; anything a parser produces can be plugged in by implementing that
//! trait. [`tree::TreeNode`] is the arena-backed implementation shipped with the crate.

mod kind;
pub mod tree;

pub use kind::SyntaxKind;

use compact_str::CompactString;

pub trait SyntaxNode: Clone + Eq + core::fmt::Debug + Send + Sync {
    fn kind(&self) -> SyntaxKind;
    fn parent(&self) -> Option<Self>;
    fn children(&self) -> Vec<Self>;
    /// Source text of a token node; `None` for structural nodes.
    fn text(&self) -> Option<CompactString>;

    fn first_child(&self, kind: SyntaxKind) -> Option<Self> {
        self.children().into_iter().find(|c| c.kind() == kind)
    }

    fn children_of_kind(&self, kind: SyntaxKind) -> Vec<Self> {
        self.children()
            .into_iter()
            .filter(|c| c.kind() == kind)
            .collect()
    }

    /// Text of the first child token of `kind`.
    fn child_text(&self, kind: SyntaxKind) -> Option<CompactString> {
        self.first_child(kind).and_then(|c| c.text())
    }

    /// Topmost ancestor (or `self` when it has no parent).
    fn root(&self) -> Self {
        let mut cur = self.clone();
        while let Some(parent) = cur.parent() {
            cur = parent;
        }
        cur
    }

    /// Upward walk yielding `(ancestor, child_on_path)` pairs, nearest first.
    fn ancestors_with_child(&self) -> AncestorWalk<Self> {
        AncestorWalk::new(self.clone())
    }
}

/// Iterator over the strict ancestors of a position.
///
/// Each item pairs an ancestor with its child that lies on the path back to the
/// starting position (the position itself for the first item). Resolvers use the
/// child to decide which sub-region of a binder the position sits in.
#[derive(Debug, Clone)]
pub struct AncestorWalk<N> {
    child: Option<N>,
}

impl<N: SyntaxNode> AncestorWalk<N> {
    pub fn new(position: N) -> Self {
        Self {
            child: Some(position),
        }
    }
}

impl<N: SyntaxNode> Iterator for AncestorWalk<N> {
    type Item = (N, N);

    fn next(&mut self) -> Option<Self::Item> {
        let child = self.child.take()?;
        let parent = child.parent()?;
        self.child = Some(parent.clone());
        Some((parent, child))
    }
}

/// Index of `child` among the children of `parent`, together with the children.
pub(crate) fn split_at_child<N: SyntaxNode>(parent: &N, child: &N) -> (Vec<N>, usize) {
    let children = parent.children();
    let idx = children
        .iter()
        .position(|c| c == child)
        .unwrap_or(children.len());
    (children, idx)
}

#[cfg(test)]
mod tests {
    use super::tree::{node, token};
    use super::{SyntaxKind, SyntaxNode};

    #[test]
    fn ancestor_walk_pairs_each_ancestor_with_path_child() {
        let root = node(SyntaxKind::Module)
            .child(node(SyntaxKind::QueryBody).child(token(SyntaxKind::StringLiteral, "leaf")))
            .build();
        let body = root.children()[0].clone();
        let leaf = body.children()[0].clone();

        let walk: Vec<_> = leaf.ancestors_with_child().collect();
        assert_eq!(walk.len(), 2);
        assert_eq!(walk[0], (body.clone(), leaf.clone()));
        assert_eq!(walk[1], (root.clone(), body));
        assert_eq!(leaf.root(), root);
        assert!(root.ancestors_with_child().next().is_none());
    }
}
