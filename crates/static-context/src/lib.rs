//! Static context resolution for XQuery syntax trees: statically known namespaces,
//! default namespaces, in-scope variables and statically known functions at any
//! position of an already parsed module.
pub mod consts;
pub mod context;
pub mod error;
pub mod functions;
pub mod loader;
pub mod names;
pub mod namespaces;
pub mod profile;
pub mod syntax;
pub mod variables;

pub use context::{StaticContext, StaticContextBuilder};
pub use error::{Error, Result};
pub use functions::FunctionDeclaration;
pub use loader::{MapModuleLoader, ModuleLoader, NullModuleLoader};
pub use names::{ExpandedName, QName};
pub use namespaces::{NamespaceBinding, NamespaceType};
pub use profile::{Profile, ProfileBuilder, ProfileId, ProfileRegistry};
pub use syntax::tree::{NodeBuilder, SyntaxTree, TreeNode};
pub use syntax::{SyntaxKind, SyntaxNode};
pub use variables::{ScopeFrame, VariableBinding, VariableRole};
