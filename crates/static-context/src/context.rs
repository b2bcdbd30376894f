use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::loader::{ModuleLoader, NullModuleLoader};
use crate::profile::{Profile, ProfileRegistry, default_profile};
use crate::syntax::SyntaxNode;

/// Entry point for all static context queries.
///
/// Holds the implementation profile and module loader a resolution runs against.
/// The queries themselves (`statically_known_namespaces`, `in_scope_variables`,
/// `statically_known_functions`, ...) are pure functions of the position and this
/// configuration; the context is immutable and can be shared across threads.
pub struct StaticContext<N> {
    profile: Arc<Profile>,
    loader: Arc<dyn ModuleLoader<N>>,
}

impl<N: SyntaxNode> Default for StaticContext<N> {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            loader: Arc::new(NullModuleLoader),
        }
    }
}

impl<N> Clone for StaticContext<N> {
    fn clone(&self) -> Self {
        Self {
            profile: Arc::clone(&self.profile),
            loader: Arc::clone(&self.loader),
        }
    }
}

impl<N> fmt::Debug for StaticContext<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticContext")
            .field("profile", self.profile.id())
            .finish_non_exhaustive()
    }
}

impl<N> StaticContext<N> {
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn module_loader(&self) -> &dyn ModuleLoader<N> {
        self.loader.as_ref()
    }
}

/// Builder for [`StaticContext`].
///
/// Unset parts fall back to the `w3c/1.0` profile and a loader that resolves no
/// imports.
pub struct StaticContextBuilder<N> {
    profile: Option<Arc<Profile>>,
    loader: Option<Arc<dyn ModuleLoader<N>>>,
}

impl<N: SyntaxNode> Default for StaticContextBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: SyntaxNode> StaticContextBuilder<N> {
    pub fn new() -> Self {
        Self {
            profile: None,
            loader: None,
        }
    }

    pub fn with_profile(mut self, profile: Arc<Profile>) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Select a built-in profile by its `vendor/version` identifier.
    pub fn with_profile_id(self, id: &str) -> Result<Self> {
        let profile = ProfileRegistry::builtin().get(id)?;
        Ok(self.with_profile(profile))
    }

    pub fn with_module_loader(mut self, loader: impl ModuleLoader<N> + 'static) -> Self {
        let loader: Arc<dyn ModuleLoader<N>> = Arc::new(loader);
        self.loader = Some(loader);
        self
    }

    pub fn with_shared_module_loader(mut self, loader: Arc<dyn ModuleLoader<N>>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn build(self) -> StaticContext<N> {
        let ctx = StaticContext {
            profile: self.profile.unwrap_or_else(default_profile),
            loader: self
                .loader
                .unwrap_or_else(|| Arc::new(NullModuleLoader) as Arc<dyn ModuleLoader<N>>),
        };
        tracing::debug!(profile = %ctx.profile.id(), "static context configured");
        ctx
    }
}
