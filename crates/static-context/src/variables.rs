//! In-scope variable resolution.
//!
//! Every binder construct contributes one or more [`ScopeFrame`]s when the walk from a
//! position passes through it. Which bindings a frame holds depends on the child of
//! the binder that lies on the path: value regions see earlier siblings of their own
//! comma list, body regions see everything the construct binds.
//!
//! Ordering inside a frame follows the construct. Comma batches that are evaluated
//! as one unit (for/let/window/group by/copy) keep source order, while the bindings
//! of a quantified expression nest and are listed nearest first. Separate
//! declarations (FLWOR clauses, prolog variables, block variables) each get their own
//! frame, nearest first.
use compact_str::CompactString;
use smallvec::SmallVec;

use crate::consts::ERR_NS;
use crate::context::StaticContext;
use crate::names::QName;
use crate::namespaces::NamespaceType;
use crate::syntax::{SyntaxKind, SyntaxNode, split_at_child};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableRole {
    Ordinary,
    /// `at $i`
    Positional,
    CurrentItem,
    PreviousItem,
    NextItem,
    GroupKey,
    Count,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableBinding<N> {
    pub name: QName,
    /// The binding's `QName` node; the catch clause itself for implicit error variables.
    pub defining_node: N,
    pub role: VariableRole,
}

pub type Bindings<N> = SmallVec<[VariableBinding<N>; 4]>;

/// Bindings contributed by one binder construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFrame<N> {
    pub construct: N,
    pub bindings: Bindings<N>,
}

/// Local names of the variables implicitly bound inside a catch clause.
const ERR_VARIABLES: [&str; 7] = [
    "code",
    "description",
    "value",
    "module",
    "line-number",
    "column-number",
    "additional",
];

fn binding<N: SyntaxNode>(holder: &N, role: VariableRole) -> Option<VariableBinding<N>> {
    match QName::of_child(holder) {
        Some((defining_node, name)) => Some(VariableBinding {
            name,
            defining_node,
            role,
        }),
        None => {
            tracing::trace!(kind = ?holder.kind(), "binder without variable name ignored");
            None
        }
    }
}

fn frame<N: SyntaxNode>(construct: &N, bindings: Bindings<N>) -> ScopeFrame<N> {
    ScopeFrame {
        construct: construct.clone(),
        bindings,
    }
}

/// Variable then positional variable of a `for`/`for member`/`let` binding.
fn binding_vars<N: SyntaxNode>(b: &N, out: &mut Bindings<N>) {
    out.extend(binding(b, VariableRole::Ordinary));
    if let Some(pos) = b.first_child(SyntaxKind::PositionalVar) {
        out.extend(binding(&pos, VariableRole::Positional));
    }
}

fn condition_vars<N: SyntaxNode>(cond: &N, out: &mut Bindings<N>) {
    for c in cond.children() {
        let role = match c.kind() {
            SyntaxKind::CurrentItem => VariableRole::CurrentItem,
            SyntaxKind::PositionalVar => VariableRole::Positional,
            SyntaxKind::PreviousItem => VariableRole::PreviousItem,
            SyntaxKind::NextItem => VariableRole::NextItem,
            _ => continue,
        };
        out.extend(binding(&c, role));
    }
}

fn is_binding(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::ForBinding | SyntaxKind::ForMemberBinding | SyntaxKind::LetBinding
    )
}

/// Everything `clause` binds, as seen by the clauses that follow it.
fn clause_vars<N: SyntaxNode>(clause: &N) -> Bindings<N> {
    let mut out = Bindings::new();
    match clause.kind() {
        SyntaxKind::ForClause | SyntaxKind::ForMemberClause | SyntaxKind::LetClause => {
            for b in clause.children().iter().filter(|c| is_binding(c.kind())) {
                binding_vars(b, &mut out);
            }
        }
        SyntaxKind::TumblingWindowClause | SyntaxKind::SlidingWindowClause => {
            out.extend(binding(clause, VariableRole::Ordinary));
            if let Some(start) = clause.first_child(SyntaxKind::WindowStartCondition) {
                condition_vars(&start, &mut out);
            }
            if let Some(end) = clause.first_child(SyntaxKind::WindowEndCondition) {
                condition_vars(&end, &mut out);
            }
        }
        SyntaxKind::CountClause => out.extend(binding(clause, VariableRole::Count)),
        SyntaxKind::GroupByClause => {
            for spec in clause.children_of_kind(SyntaxKind::GroupingSpec) {
                out.extend(binding(&spec, VariableRole::GroupKey));
            }
        }
        _ => {}
    }
    out
}

/// Frames `ancestor` contributes to a position reached through `child`, nearest first.
fn frames_at<N: SyntaxNode>(ancestor: &N, child: &N) -> Vec<ScopeFrame<N>> {
    let mut frames = Vec::new();
    match ancestor.kind() {
        SyntaxKind::ForClause | SyntaxKind::ForMemberClause | SyntaxKind::LetClause => {
            let (children, k) = split_at_child(ancestor, child);
            let mut out = Bindings::new();
            for b in children[..k].iter().filter(|c| is_binding(c.kind())) {
                binding_vars(b, &mut out);
            }
            frames.push(frame(ancestor, out));
        }
        SyntaxKind::FLWORExpr => {
            let (children, k) = split_at_child(ancestor, child);
            frames.extend(
                children[..k]
                    .iter()
                    .rev()
                    .filter(|c| c.kind().is_flwor_clause())
                    .map(|c| frame(c, clause_vars(c))),
            );
        }
        SyntaxKind::TumblingWindowClause | SyntaxKind::SlidingWindowClause => {
            let mut out = Bindings::new();
            match child.kind() {
                SyntaxKind::WindowStartCondition => condition_vars(child, &mut out),
                SyntaxKind::WindowEndCondition => {
                    if let Some(start) = ancestor.first_child(SyntaxKind::WindowStartCondition) {
                        condition_vars(&start, &mut out);
                    }
                    condition_vars(child, &mut out);
                }
                _ => {}
            }
            frames.push(frame(ancestor, out));
        }
        SyntaxKind::GroupByClause => {
            let (children, k) = split_at_child(ancestor, child);
            let out = children[..k]
                .iter()
                .filter(|c| c.kind() == SyntaxKind::GroupingSpec)
                .filter_map(|spec| binding(spec, VariableRole::GroupKey))
                .collect();
            frames.push(frame(ancestor, out));
        }
        SyntaxKind::QuantifiedExpr => {
            let (children, k) = split_at_child(ancestor, child);
            let out = children[..k]
                .iter()
                .rev()
                .filter(|c| c.kind() == SyntaxKind::QuantifiedBinding)
                .filter_map(|b| binding(b, VariableRole::Ordinary))
                .collect();
            frames.push(frame(ancestor, out));
        }
        SyntaxKind::CaseClause | SyntaxKind::DefaultCaseClause => {
            if !matches!(child.kind(), SyntaxKind::QName | SyntaxKind::SequenceType) {
                let own = binding(ancestor, VariableRole::Ordinary);
                frames.push(frame(ancestor, own.into_iter().collect()));
            }
        }
        SyntaxKind::FunctionDecl | SyntaxKind::InlineFunctionExpr => {
            if child.kind() == SyntaxKind::FunctionBody {
                let out: Bindings<N> = ancestor
                    .first_child(SyntaxKind::ParamList)
                    .map(|params| {
                        params
                            .children_of_kind(SyntaxKind::Param)
                            .iter()
                            .filter_map(|p| binding(p, VariableRole::Ordinary))
                            .collect()
                    })
                    .unwrap_or_default();
                frames.push(frame(ancestor, out));
            }
        }
        SyntaxKind::Prolog => {
            let (children, k) = split_at_child(ancestor, child);
            let visible = if child.kind() == SyntaxKind::VarDecl {
                k
            } else {
                children.len()
            };
            frames.extend(declared_frames(&children[..visible], SyntaxKind::VarDecl));
        }
        SyntaxKind::Module => {
            if child.kind() == SyntaxKind::QueryBody
                && let Some(prolog) = ancestor.first_child(SyntaxKind::Prolog)
            {
                frames.extend(declared_frames(&prolog.children(), SyntaxKind::VarDecl));
            }
        }
        SyntaxKind::Block => {
            let (children, k) = split_at_child(ancestor, child);
            frames.extend(declared_frames(&children[..k], SyntaxKind::BlockVarDecl));
        }
        SyntaxKind::BlockVarDecl => {
            let (children, k) = split_at_child(ancestor, child);
            let out = children[..k]
                .iter()
                .filter(|c| c.kind() == SyntaxKind::BlockVarDeclEntry)
                .filter_map(|e| binding(e, VariableRole::Ordinary))
                .collect();
            frames.push(frame(ancestor, out));
        }
        SyntaxKind::CopyModifyExpr => {
            let (children, k) = split_at_child(ancestor, child);
            let out = children[..k]
                .iter()
                .filter(|c| c.kind() == SyntaxKind::CopyBinding)
                .filter_map(|b| binding(b, VariableRole::Ordinary))
                .collect();
            frames.push(frame(ancestor, out));
        }
        SyntaxKind::CatchClause => {
            if !matches!(child.kind(), SyntaxKind::CatchErrorList | SyntaxKind::QName) {
                let out = match binding(ancestor, VariableRole::Ordinary) {
                    Some(own) => std::iter::once(own).collect(),
                    None => implicit_error_vars(ancestor),
                };
                frames.push(frame(ancestor, out));
            }
        }
        _ => {}
    }
    frames
}

/// One frame per declaration of `kind` among `decls`, last declared first.
fn declared_frames<N: SyntaxNode>(
    decls: &[N],
    kind: SyntaxKind,
) -> impl Iterator<Item = ScopeFrame<N>> + '_ {
    decls.iter().rev().filter(move |d| d.kind() == kind).map(move |d| {
        let bindings = if kind == SyntaxKind::BlockVarDecl {
            d.children_of_kind(SyntaxKind::BlockVarDeclEntry)
                .iter()
                .filter_map(|e| binding(e, VariableRole::Ordinary))
                .collect()
        } else {
            binding(d, VariableRole::Ordinary).into_iter().collect()
        };
        frame(d, bindings)
    })
}

fn implicit_error_vars<N: SyntaxNode>(clause: &N) -> Bindings<N> {
    ERR_VARIABLES
        .iter()
        .map(|local| VariableBinding {
            name: QName::with_namespace(Some("err"), ERR_NS, CompactString::from(*local)),
            defining_node: clause.clone(),
            role: VariableRole::Ordinary,
        })
        .collect()
}

impl<N: SyntaxNode> StaticContext<N> {
    /// Binder frames enclosing `position`, nearest construct first. Frames without any
    /// binding are skipped.
    pub fn scope_frames(&self, position: &N) -> impl Iterator<Item = ScopeFrame<N>> + use<N> {
        position
            .ancestors_with_child()
            .flat_map(|(ancestor, child)| frames_at(&ancestor, &child))
            .filter(|f| !f.bindings.is_empty())
    }

    /// Variables in scope at `position`, nearest first. Shadowed bindings are kept;
    /// the first binding of a name is the visible one.
    pub fn in_scope_variables(
        &self,
        position: &N,
    ) -> impl Iterator<Item = VariableBinding<N>> + use<N> {
        self.scope_frames(position).flat_map(|f| f.bindings)
    }

    /// Binding a `VarRef` (or its `QName`) refers to, if any.
    pub fn resolve_variable(&self, var_ref: &N) -> Option<VariableBinding<N>> {
        let target = self.expand_qname(var_ref, NamespaceType::None)?;
        self.in_scope_variables(var_ref).find(|b| {
            self.expand(&b.name, &b.defining_node, NamespaceType::None)
                .is_some_and(|name| name == target)
        })
    }
}
