mod common;

use std::sync::Arc;

use common::*;
use rstest::{fixture, rstest};
use xquery_static_context::consts::{FNS, LOCAL_NS};
use xquery_static_context::{
    ExpandedName, FunctionDeclaration, MapModuleLoader, ModuleLoader, Profile, ProfileId,
    StaticContext, StaticContextBuilder, SyntaxKind as K, SyntaxNode, TreeNode,
};

const LIB_NS: &str = "urn:lib";

fn arities(decls: &[FunctionDeclaration<TreeNode>]) -> Vec<usize> {
    decls.iter().map(|d| d.arity).collect()
}

fn call_in(root: &TreeNode) -> TreeNode {
    root.find(|n| n.kind() == K::FunctionCall).unwrap()
}

/// Profile binding `lib` with a predefined `lib:f#5` and `t:f` with arities {0, 1, 3}.
#[fixture]
fn test_profile() -> Arc<Profile> {
    Arc::new(
        Profile::builder(ProfileId::new("test", "1.0"))
            .namespace("lib", LIB_NS)
            .namespace("t", "urn:t")
            .function(LIB_NS, "f", &[5])
            .function("urn:t", "f", &[0, 1, 3])
            .build(),
    )
}

#[fixture]
fn library() -> TreeNode {
    library_module(
        "lib",
        LIB_NS,
        [
            function_decl("lib:f", &["a"], mark("f1")),
            function_decl("lib:f", &["a", "b"], mark("f2")),
            function_decl("lib:other", &[], mark("o")),
        ],
    )
    .build()
}

#[rstest]
fn predefined_arities_are_descending(test_profile: Arc<Profile>) {
    let root = query(function_call("t:f")).build();
    let c: StaticContext<TreeNode> = StaticContextBuilder::new()
        .with_profile(test_profile)
        .build();
    let found: Vec<_> = c.statically_known_functions(&call_in(&root)).collect();
    assert_eq!(arities(&found), [3, 1, 0]);
    assert!(found.iter().all(|d| d.defining_node.is_none()));
    assert!(found.iter().all(|d| d.name == ExpandedName::new(Some("urn:t"), "f")));
}

#[rstest]
fn local_overloads_sorted_and_filtered_by_name() {
    let root = main_module(
        [
            function_decl("local:g", &["a"], mark("g1")),
            function_decl("local:g", &[], mark("g0")),
            function_decl("local:h", &["a"], mark("h1")),
            function_decl("local:g", &["a", "b"], mark("g2")),
        ],
        function_call("local:g"),
    )
    .build();
    let found: Vec<_> = ctx().statically_known_functions(&call_in(&root)).collect();
    assert_eq!(arities(&found), [2, 1, 0]);
    assert!(found.iter().all(|d| d.name == ExpandedName::new(Some(LOCAL_NS), "g")));
    assert!(
        found
            .iter()
            .all(|d| d.defining_node.as_ref().map(SyntaxNode::kind) == Some(K::FunctionDecl))
    );
}

#[rstest]
fn unprefixed_call_uses_default_function_namespace() {
    let root = query(function_call("count")).build();
    let found: Vec<_> = ctx().statically_known_functions(&call_in(&root)).collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, ExpandedName::new(Some(FNS), "count"));
    assert_eq!(found[0].arity, 1);

    let root = main_module(
        [
            node(K::DefaultFunctionNamespaceDecl).child(token(K::UriLiteral, "urn:my")),
            function_decl("count", &["a"], mark("body")),
        ],
        function_call("count"),
    )
    .build();
    let found: Vec<_> = ctx().statically_known_functions(&call_in(&root)).collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, ExpandedName::new(Some("urn:my"), "count"));
    assert!(found[0].defining_node.is_some());
}

#[rstest]
fn providers_keep_priority_order(test_profile: Arc<Profile>, library: TreeNode) {
    let main = main_module(
        [
            module_import("lib", LIB_NS),
            function_decl("lib:f", &["x", "y", "z"], mark("local")),
        ],
        function_call("lib:f"),
    )
    .build();
    let c: StaticContext<TreeNode> = StaticContextBuilder::new()
        .with_profile(test_profile)
        .with_module_loader(MapModuleLoader::new().with_module(LIB_NS, library.clone()))
        .build();
    let found: Vec<_> = c.statically_known_functions(&call_in(&main)).collect();
    assert_eq!(arities(&found), [3, 2, 1, 5]);
    assert_eq!(found[0].defining_node.as_ref().map(SyntaxNode::root), Some(main.clone()));
    assert!(
        found[1..3]
            .iter()
            .all(|d| d.defining_node.as_ref().map(SyntaxNode::root) == Some(library.clone()))
    );
    assert!(found[3].defining_node.is_none());
}

#[rstest]
fn loader_miss_contributes_nothing(library: TreeNode) {
    let main = main_module([module_import("lib", LIB_NS)], function_call("lib:f")).build();
    let found: Vec<_> = ctx().statically_known_functions(&call_in(&main)).collect();
    assert!(found.is_empty());

    let c: StaticContext<TreeNode> = StaticContextBuilder::new()
        .with_module_loader(MapModuleLoader::new().with_module("urn:elsewhere", library))
        .build();
    assert_eq!(c.statically_known_functions(&call_in(&main)).count(), 0);
}

#[rstest]
fn self_import_is_ignored() {
    let main = library_module(
        "lib",
        LIB_NS,
        [
            module_import("lib", LIB_NS),
            function_decl("lib:f", &["a"], function_call("lib:f")),
        ],
    )
    .build();
    let c: StaticContext<TreeNode> = StaticContextBuilder::new()
        .with_module_loader(MapModuleLoader::new().with_module(LIB_NS, main.clone()))
        .build();
    let found: Vec<_> = c.statically_known_functions(&call_in(&main)).collect();
    assert_eq!(arities(&found), [1]);
}

#[rstest]
fn schema_import_reaches_the_loader(library: TreeNode) {
    let schema_import = node(K::SchemaImport)
        .child(token(K::Prefix, "lib"))
        .child(token(K::UriLiteral, LIB_NS));
    let main = main_module([schema_import], function_call("lib:f")).build();
    let c: StaticContext<TreeNode> = StaticContextBuilder::new()
        .with_module_loader(MapModuleLoader::new().with_module(LIB_NS, library.clone()))
        .build();
    let found: Vec<_> = c.statically_known_functions(&call_in(&main)).collect();
    assert_eq!(arities(&found), [2, 1]);
    assert!(
        found
            .iter()
            .all(|d| d.defining_node.as_ref().map(SyntaxNode::root) == Some(library.clone()))
    );
}

#[rstest]
fn shared_loader_serves_several_contexts(library: TreeNode) {
    let loader: Arc<dyn ModuleLoader<TreeNode>> =
        Arc::new(MapModuleLoader::new().with_module(LIB_NS, library));
    let main = main_module([module_import("lib", LIB_NS)], function_call("lib:f")).build();
    let call = call_in(&main);
    for _ in 0..2 {
        let c: StaticContext<TreeNode> = StaticContextBuilder::new()
            .with_shared_module_loader(Arc::clone(&loader))
            .build();
        let found: Vec<_> = c.statically_known_functions(&call).collect();
        assert_eq!(arities(&found), [2, 1]);
    }
}

#[rstest]
fn repeated_queries_are_identical(test_profile: Arc<Profile>, library: TreeNode) {
    let main = main_module(
        [
            module_import("lib", LIB_NS),
            function_decl("lib:f", &["x", "y", "z"], mark("local")),
        ],
        function_call("lib:f"),
    )
    .build();
    let c: StaticContext<TreeNode> = StaticContextBuilder::new()
        .with_profile(test_profile)
        .with_module_loader(MapModuleLoader::new().with_module(LIB_NS, library))
        .build();
    let call = call_in(&main);
    let first: Vec<_> = c.statically_known_functions(&call).collect();
    let second: Vec<_> = c.statically_known_functions(&call).collect();
    assert_eq!(first, second);
}

#[rstest]
fn unbound_prefix_has_no_candidates() {
    let root = query(function_call("nope:f")).build();
    assert_eq!(ctx().statically_known_functions(&call_in(&root)).count(), 0);
}

#[rstest]
fn variadic_declarations_are_flagged() {
    let variadic = node(K::FunctionDecl)
        .child(qname("local:v"))
        .child(
            node(K::ParamList)
                .child(node(K::Param).child(qname("first")))
                .child(node(K::Variadic)),
        )
        .child(node(K::FunctionBody).child(mark("body")));
    let root = main_module([variadic], function_call("local:v")).build();
    let found: Vec<_> = ctx().statically_known_functions(&call_in(&root)).collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].arity, 1);
    assert!(found[0].is_variadic);

    let root = query(function_call("concat")).build();
    let concat: Vec<_> = ctx().statically_known_functions(&call_in(&root)).collect();
    assert_eq!(arities(&concat), [4, 3, 2]);
    assert!(concat.iter().all(|d| d.is_variadic && d.defining_node.is_none()));
}

#[rstest]
#[case::named_ref(K::NamedFunctionRef)]
#[case::arrow(K::ArrowFunctionSpecifier)]
#[case::call(K::FunctionCall)]
fn reference_forms_resolve_alike(#[case] kind: K) {
    let root = query(node(kind).child(qname("fn:count"))).build();
    let reference = root.find(|n| n.kind() == kind).unwrap();
    let c = ctx();
    let via_owner: Vec<_> = c.statically_known_functions(&reference).collect();
    let via_name: Vec<_> = c
        .statically_known_functions(&reference.first_child(K::QName).unwrap())
        .collect();
    assert_eq!(arities(&via_owner), [1]);
    assert_eq!(via_owner, via_name);
}

#[rstest]
fn declaration_resolves_its_own_overloads() {
    let root = main_module(
        [
            function_decl("local:g", &["a"], mark("g1")),
            function_decl("local:g", &[], mark("g0")),
        ],
        mark("main"),
    )
    .build();
    let decl = root.find(|n| n.kind() == K::FunctionDecl).unwrap();
    let found: Vec<_> = ctx().statically_known_functions(&decl).collect();
    assert_eq!(arities(&found), [1, 0]);
    assert_eq!(found[0].defining_node, Some(decl));
}

#[rstest]
fn non_reference_nodes_have_no_candidates() {
    let root = query(var_ref("x")).build();
    let reference = root.find(|n| n.kind() == K::VarRef).unwrap();
    assert_eq!(ctx().statically_known_functions(&reference).count(), 0);
}
