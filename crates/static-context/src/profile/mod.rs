//! Implementation profiles: predefined namespaces and functions per (vendor, version).
//!
//! A profile is immutable configuration handed to a [`crate::StaticContext`]. Several
//! profiles can be alive at the same time; nothing here is process-global except the
//! lazily built registry of built-in profiles, which is itself read-only.
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::names::ExpandedName;

mod basex;
mod marklogic;
mod w3c;

pub type Arity = usize;

/// Profile used when none is configured explicitly.
pub const DEFAULT_PROFILE: &str = "w3c/1.0";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileId {
    pub vendor: CompactString,
    pub version: CompactString,
}

impl ProfileId {
    pub fn new(vendor: &str, version: &str) -> Self {
        Self {
            vendor: vendor.into(),
            version: version.into(),
        }
    }
}

impl FromStr for ProfileId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((vendor, version))
                if !vendor.is_empty() && !version.is_empty() && !version.contains('/') =>
            {
                Ok(Self::new(vendor, version))
            }
            _ => Err(Error::InvalidProfileId(s.to_string())),
        }
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.vendor, self.version)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredefinedNamespace {
    pub prefix: CompactString,
    pub uri: CompactString,
}

/// One row of a predefined function catalogue.
///
/// Variadic functions are registered as one row per synthetic arity, each flagged
/// `is_variadic`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredefinedFunction {
    pub name: ExpandedName,
    pub arity: Arity,
    pub is_variadic: bool,
}

#[derive(Debug)]
pub struct Profile {
    id: ProfileId,
    namespaces: Vec<PredefinedNamespace>,
    functions: Vec<PredefinedFunction>,
    by_name: HashMap<ExpandedName, SmallVec<[usize; 4]>>,
}

impl Profile {
    pub fn builder(id: ProfileId) -> ProfileBuilder {
        ProfileBuilder::new(id)
    }

    pub fn id(&self) -> &ProfileId {
        &self.id
    }

    /// Predefined namespace bindings, sorted by prefix.
    pub fn namespaces(&self) -> &[PredefinedNamespace] {
        &self.namespaces
    }

    pub fn functions(&self) -> &[PredefinedFunction] {
        &self.functions
    }

    pub fn namespace_uri(&self, prefix: &str) -> Option<&str> {
        self.namespaces
            .iter()
            .find(|ns| ns.prefix == prefix)
            .map(|ns| ns.uri.as_str())
    }

    /// Catalogue rows for `name`, in registration order.
    pub fn functions_named<'a>(
        &'a self,
        name: &ExpandedName,
    ) -> impl Iterator<Item = &'a PredefinedFunction> + use<'a> {
        let rows = self.by_name.get(name).map(|r| r.as_slice()).unwrap_or(&[]);
        rows.iter().map(|&i| &self.functions[i])
    }
}

pub struct ProfileBuilder {
    id: ProfileId,
    namespaces: Vec<PredefinedNamespace>,
    functions: Vec<PredefinedFunction>,
}

impl ProfileBuilder {
    pub fn new(id: ProfileId) -> Self {
        Self {
            id,
            namespaces: Vec::new(),
            functions: Vec::new(),
        }
    }

    /// Start from the tables of `base`.
    pub fn extend(mut self, base: &Profile) -> Self {
        self.namespaces.extend(base.namespaces.iter().cloned());
        self.functions.extend(base.functions.iter().cloned());
        self
    }

    /// Register a prefix. A later registration of the same prefix replaces the earlier one.
    pub fn namespace(mut self, prefix: &str, uri: &str) -> Self {
        self.namespaces.retain(|ns| ns.prefix != prefix);
        self.namespaces.push(PredefinedNamespace {
            prefix: prefix.into(),
            uri: uri.into(),
        });
        self
    }

    pub fn function(self, ns: &str, local: &str, arities: &[Arity]) -> Self {
        self.rows(ns, local, arities, false)
    }

    /// Register a variadic function through its synthetic arity set.
    pub fn variadic(self, ns: &str, local: &str, arities: &[Arity]) -> Self {
        self.rows(ns, local, arities, true)
    }

    fn rows(mut self, ns: &str, local: &str, arities: &[Arity], is_variadic: bool) -> Self {
        let name = ExpandedName::new(Some(ns), local);
        for &arity in arities {
            self.functions.push(PredefinedFunction {
                name: name.clone(),
                arity,
                is_variadic,
            });
        }
        self
    }

    /// Register every `(local, arities)` entry of `table` in namespace `ns`.
    pub fn functions(self, ns: &str, table: &[(&str, &[Arity])]) -> Self {
        table
            .iter()
            .fold(self, |b, (local, arities)| b.function(ns, local, arities))
    }

    pub fn build(mut self) -> Profile {
        self.namespaces.sort_by(|a, b| a.prefix.cmp(&b.prefix));
        let mut by_name: HashMap<ExpandedName, SmallVec<[usize; 4]>> = HashMap::new();
        for (i, f) in self.functions.iter().enumerate() {
            by_name.entry(f.name.clone()).or_default().push(i);
        }
        tracing::debug!(
            profile = %self.id,
            namespaces = self.namespaces.len(),
            functions = self.functions.len(),
            "built implementation profile"
        );
        Profile {
            id: self.id,
            namespaces: self.namespaces,
            functions: self.functions,
            by_name,
        }
    }
}

/// Profiles addressable by their `vendor/version` identifier.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: HashMap<ProfileId, Arc<Profile>>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in W3C, MarkLogic and BaseX profiles.
    pub fn with_builtin_profiles() -> Self {
        let mut reg = Self::new();
        let xq10 = reg.register(w3c::xquery_1_0());
        let xq30 = reg.register(w3c::xquery_3_0(&xq10));
        let xq31 = reg.register(w3c::xquery_3_1(&xq30));
        reg.register(marklogic::marklogic_8_0(&xq30));
        reg.register(basex::basex_8_4(&xq31));
        reg
    }

    /// Shared read-only instance of [`ProfileRegistry::with_builtin_profiles`].
    pub fn builtin() -> &'static ProfileRegistry {
        static BUILTIN: OnceLock<ProfileRegistry> = OnceLock::new();
        BUILTIN.get_or_init(ProfileRegistry::with_builtin_profiles)
    }

    /// Add or replace a profile; returns the shared handle.
    pub fn register(&mut self, profile: Profile) -> Arc<Profile> {
        let profile = Arc::new(profile);
        self.profiles
            .insert(profile.id().clone(), Arc::clone(&profile));
        profile
    }

    pub fn get(&self, id: &str) -> Result<Arc<Profile>> {
        let key: ProfileId = id.parse()?;
        self.profiles
            .get(&key)
            .cloned()
            .ok_or_else(|| Error::UnknownProfile(id.to_string()))
    }

    /// Registered identifiers in sorted order.
    pub fn ids(&self) -> Vec<ProfileId> {
        let mut ids: Vec<_> = self.profiles.keys().cloned().collect();
        ids.sort();
        ids
    }
}

/// The built-in `w3c/1.0` profile.
pub fn default_profile() -> Arc<Profile> {
    static DEFAULT: OnceLock<Arc<Profile>> = OnceLock::new();
    DEFAULT
        .get_or_init(|| match ProfileRegistry::builtin().get(DEFAULT_PROFILE) {
            Ok(p) => p,
            Err(_) => Arc::new(w3c::xquery_1_0()),
        })
        .clone()
}
