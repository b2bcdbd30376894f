use std::collections::HashMap;

use compact_str::CompactString;

use crate::syntax::SyntaxNode;

/// Maps an imported namespace URI to the root of an already-built module tree.
///
/// Lookups are synchronous; caching and retrying belong to the implementation. A
/// `None` answer only removes that import's contribution from a resolution.
pub trait ModuleLoader<N>: Send + Sync {
    /// `importing` is the `ModuleImport`/`SchemaImport` node; its `LocationUri`
    /// children carry the location hints.
    fn resolve(&self, namespace_uri: &str, importing: &N) -> Option<N>;
}

/// Loader that resolves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullModuleLoader;

impl<N> ModuleLoader<N> for NullModuleLoader {
    fn resolve(&self, _namespace_uri: &str, _importing: &N) -> Option<N> {
        None
    }
}

/// Fixed namespace URI → module root table.
#[derive(Debug, Clone)]
pub struct MapModuleLoader<N> {
    modules: HashMap<CompactString, N>,
}

impl<N> Default for MapModuleLoader<N> {
    fn default() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }
}

impl<N: SyntaxNode> MapModuleLoader<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, namespace_uri: &str, root: N) -> Self {
        self.insert(namespace_uri, root);
        self
    }

    pub fn insert(&mut self, namespace_uri: &str, root: N) {
        self.modules.insert(namespace_uri.into(), root);
    }
}

impl<N: SyntaxNode> ModuleLoader<N> for MapModuleLoader<N> {
    fn resolve(&self, namespace_uri: &str, _importing: &N) -> Option<N> {
        self.modules.get(namespace_uri).cloned()
    }
}
