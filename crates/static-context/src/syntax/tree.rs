//! Arena-backed syntax tree used by parsers, tests and quick prototypes.
//!
//! Focus:
//! - Nested builder for concise tree construction
//! - Nodes are cheap handles (`Arc<SyntaxTree>` + index), parents are plain indices
//! - Thread-safe and immutable once built
//!
//! Example:
//! ```
//! use xquery_static_context::syntax::tree::{node, token};
//! use xquery_static_context::syntax::{SyntaxKind, SyntaxNode};
//!
//! // declare namespace p = "urn:p";
//! let module = node(SyntaxKind::Module)
//!     .child(
//!         node(SyntaxKind::Prolog).child(
//!             node(SyntaxKind::NamespaceDecl)
//!                 .child(token(SyntaxKind::Prefix, "p"))
//!                 .child(token(SyntaxKind::UriLiteral, "urn:p")),
//!         ),
//!     )
//!     .build();
//!
//! let decl = &module.children()[0].children()[0];
//! assert_eq!(decl.kind(), SyntaxKind::NamespaceDecl);
//! assert_eq!(decl.child_text(SyntaxKind::Prefix).as_deref(), Some("p"));
//! assert_eq!(decl.parent().unwrap().parent(), Some(module));
//! ```
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use compact_str::CompactString;
use smallvec::SmallVec;

use super::{SyntaxKind, SyntaxNode};

#[derive(Debug)]
struct NodeData {
    kind: SyntaxKind,
    text: Option<CompactString>,
    parent: Option<u32>,
    children: SmallVec<[u32; 4]>,
}

/// Flat storage of every node of one tree, in preorder.
#[derive(Debug)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(self: &Arc<Self>) -> TreeNode {
        TreeNode {
            tree: Arc::clone(self),
            index: 0,
        }
    }
}

/// Handle to one node of a [`SyntaxTree`].
#[derive(Clone)]
pub struct TreeNode {
    tree: Arc<SyntaxTree>,
    index: u32,
}

impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.tree, &other.tree) && self.index == other.index
    }
}
impl Eq for TreeNode {}

impl Hash for TreeNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.tree).hash(state);
        self.index.hash(state);
    }
}

impl fmt::Debug for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data();
        f.debug_struct("TreeNode")
            .field("index", &self.index)
            .field("kind", &data.kind)
            .field("text", &data.text)
            .finish()
    }
}

impl TreeNode {
    fn at(&self, index: u32) -> TreeNode {
        TreeNode {
            tree: Arc::clone(&self.tree),
            index,
        }
    }

    fn data(&self) -> &NodeData {
        &self.tree.nodes[self.index as usize]
    }

    /// Preorder position of the node inside its tree.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn tree(&self) -> &Arc<SyntaxTree> {
        &self.tree
    }

    /// Nodes of the subtree rooted here (inclusive), in document order.
    ///
    /// Subtrees are contiguous in the arena because nodes are stored in preorder.
    pub fn descendants(&self) -> impl Iterator<Item = TreeNode> + '_ {
        let end = self.subtree_end();
        (self.index..end).map(move |i| self.at(i))
    }

    /// First node of the subtree (inclusive) matching `pred`, in document order.
    pub fn find(&self, pred: impl Fn(&TreeNode) -> bool) -> Option<TreeNode> {
        self.descendants().find(|n| pred(n))
    }

    /// First token in the subtree whose kind and text match.
    pub fn find_token(&self, kind: SyntaxKind, text: &str) -> Option<TreeNode> {
        self.find(|n| n.kind() == kind && n.data().text.as_deref() == Some(text))
    }

    fn subtree_end(&self) -> u32 {
        let mut cur = self.index;
        loop {
            let data = &self.tree.nodes[cur as usize];
            match data.children.last() {
                Some(&last) => cur = last,
                None => return cur + 1,
            }
        }
    }
}

impl SyntaxNode for TreeNode {
    fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    fn parent(&self) -> Option<Self> {
        self.data().parent.map(|p| self.at(p))
    }

    fn children(&self) -> Vec<Self> {
        self.data().children.iter().map(|&c| self.at(c)).collect()
    }

    fn text(&self) -> Option<CompactString> {
        self.data().text.clone()
    }
}

/// Pending node for [`NodeBuilder::build`].
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    kind: SyntaxKind,
    text: Option<CompactString>,
    children: Vec<NodeBuilder>,
}

impl NodeBuilder {
    pub fn new(kind: SyntaxKind) -> Self {
        Self {
            kind,
            text: None,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn text(mut self, text: impl Into<CompactString>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: impl Into<NodeBuilder>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, it: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<NodeBuilder>,
    {
        self.children.extend(it.into_iter().map(Into::into));
        self
    }

    /// Child only when present; convenient for optional grammar parts.
    pub fn maybe_child(self, child: Option<impl Into<NodeBuilder>>) -> Self {
        match child {
            Some(c) => self.child(c),
            None => self,
        }
    }

    /// Flatten into an arena (preorder) and return the root handle.
    pub fn build(self) -> TreeNode {
        let mut nodes: Vec<NodeData> = Vec::new();
        let mut stack: Vec<(NodeBuilder, Option<u32>)> = vec![(self, None)];
        while let Some((b, parent)) = stack.pop() {
            let idx = u32::try_from(nodes.len()).unwrap_or(u32::MAX);
            nodes.push(NodeData {
                kind: b.kind,
                text: b.text,
                parent,
                children: SmallVec::new(),
            });
            if let Some(p) = parent {
                nodes[p as usize].children.push(idx);
            }
            // reversed so the first child is popped (and numbered) first
            for c in b.children.into_iter().rev() {
                stack.push((c, Some(idx)));
            }
        }
        Arc::new(SyntaxTree { nodes }).root()
    }
}

// Convenience helpers for concise tree construction
pub fn node(kind: SyntaxKind) -> NodeBuilder {
    NodeBuilder::new(kind)
}

pub fn token(kind: SyntaxKind, text: impl Into<CompactString>) -> NodeBuilder {
    NodeBuilder::new(kind).text(text)
}

/// Name node from its lexical form: `local`, `prefix:local` or `Q{uri}local`.
pub fn qname(lexical: &str) -> NodeBuilder {
    let name = node(SyntaxKind::QName);
    if let Some(rest) = lexical.strip_prefix("Q{") {
        if let Some((uri, local)) = rest.split_once('}') {
            return name
                .child(token(SyntaxKind::BracedUriLiteral, uri))
                .child(token(SyntaxKind::LocalName, local));
        }
    }
    match lexical.split_once(':') {
        Some((prefix, local)) => name
            .child(token(SyntaxKind::Prefix, prefix))
            .child(token(SyntaxKind::LocalName, local)),
        None => name.child(token(SyntaxKind::LocalName, lexical)),
    }
}
