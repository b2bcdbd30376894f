#![allow(dead_code)]
//! Tree building shortcuts shared by the integration tests.
//!
//! Positions inside a tree are marked with string literal tokens carrying a
//! unique label that `at` looks up after the tree is built.
pub use xquery_static_context::syntax::tree::{NodeBuilder, node, qname, token};
use xquery_static_context::{
    QName, StaticContext, SyntaxKind as K, TreeNode, VariableBinding,
};

pub fn ctx() -> StaticContext<TreeNode> {
    StaticContext::default()
}

pub fn mark(label: &str) -> NodeBuilder {
    token(K::StringLiteral, label)
}

pub fn at(root: &TreeNode, label: &str) -> TreeNode {
    root.find_token(K::StringLiteral, label)
        .unwrap_or_else(|| panic!("no mark '{label}' in tree"))
}

/// First `QName` node in document order whose lexical form is `lexical`.
pub fn name_node(root: &TreeNode, lexical: &str) -> TreeNode {
    root.find(|n| QName::from_node(n).is_some_and(|q| q.to_string() == lexical))
        .unwrap_or_else(|| panic!("no name '{lexical}' in tree"))
}

pub fn query(body: impl Into<NodeBuilder>) -> NodeBuilder {
    node(K::Module).child(node(K::QueryBody).child(body))
}

pub fn main_module(
    decls: impl IntoIterator<Item = NodeBuilder>,
    body: impl Into<NodeBuilder>,
) -> NodeBuilder {
    node(K::Module)
        .child(node(K::Prolog).children(decls))
        .child(node(K::QueryBody).child(body))
}

pub fn library_module(
    prefix: &str,
    uri: &str,
    decls: impl IntoIterator<Item = NodeBuilder>,
) -> NodeBuilder {
    node(K::Module)
        .child(
            node(K::ModuleDecl)
                .child(token(K::Prefix, prefix))
                .child(token(K::UriLiteral, uri)),
        )
        .child(node(K::Prolog).children(decls))
}

pub fn namespace_decl(prefix: Option<&str>, uri: Option<&str>) -> NodeBuilder {
    node(K::NamespaceDecl)
        .maybe_child(prefix.map(|p| token(K::Prefix, p)))
        .maybe_child(uri.map(|u| token(K::UriLiteral, u)))
}

pub fn module_import(prefix: &str, uri: &str) -> NodeBuilder {
    node(K::ModuleImport)
        .child(token(K::Prefix, prefix))
        .child(token(K::UriLiteral, uri))
}

pub fn var_decl(name: &str, init: impl Into<NodeBuilder>) -> NodeBuilder {
    node(K::VarDecl).child(qname(name)).child(init)
}

pub fn param_list(params: &[&str]) -> NodeBuilder {
    node(K::ParamList).children(params.iter().map(|p| node(K::Param).child(qname(p))))
}

pub fn function_decl(name: &str, params: &[&str], body: impl Into<NodeBuilder>) -> NodeBuilder {
    node(K::FunctionDecl)
        .child(qname(name))
        .child(param_list(params))
        .child(node(K::FunctionBody).child(body))
}

pub fn function_call(name: &str) -> NodeBuilder {
    node(K::FunctionCall)
        .child(qname(name))
        .child(node(K::ArgumentList))
}

pub fn var_ref(name: &str) -> NodeBuilder {
    node(K::VarRef).child(qname(name))
}

pub fn flwor(
    clauses: impl IntoIterator<Item = NodeBuilder>,
    ret: impl Into<NodeBuilder>,
) -> NodeBuilder {
    node(K::FLWORExpr)
        .children(clauses)
        .child(node(K::ReturnClause).child(ret))
}

pub fn for_clause(bindings: impl IntoIterator<Item = NodeBuilder>) -> NodeBuilder {
    node(K::ForClause).children(bindings)
}

pub fn for_binding(var: &str, input: impl Into<NodeBuilder>) -> NodeBuilder {
    node(K::ForBinding).child(qname(var)).child(input)
}

pub fn for_binding_at(var: &str, pos: &str, input: impl Into<NodeBuilder>) -> NodeBuilder {
    node(K::ForBinding)
        .child(qname(var))
        .child(node(K::PositionalVar).child(qname(pos)))
        .child(input)
}

pub fn let_clause(bindings: impl IntoIterator<Item = NodeBuilder>) -> NodeBuilder {
    node(K::LetClause).children(bindings)
}

pub fn let_binding(var: &str, value: impl Into<NodeBuilder>) -> NodeBuilder {
    node(K::LetBinding).child(qname(var)).child(value)
}

pub fn quantified(
    bindings: impl IntoIterator<Item = (&'static str, NodeBuilder)>,
    satisfies: impl Into<NodeBuilder>,
) -> NodeBuilder {
    node(K::QuantifiedExpr)
        .children(
            bindings
                .into_iter()
                .map(|(var, input)| node(K::QuantifiedBinding).child(qname(var)).child(input)),
        )
        .child(satisfies)
}

/// Lexical names of `bindings`, in order.
pub fn names(bindings: impl IntoIterator<Item = VariableBinding<TreeNode>>) -> Vec<String> {
    bindings.into_iter().map(|b| b.name.to_string()).collect()
}

pub fn variables_at(root: &TreeNode, label: &str) -> Vec<String> {
    names(ctx().in_scope_variables(&at(root, label)))
}
