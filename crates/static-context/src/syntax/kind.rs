/// Construct kinds of an XPath/XQuery syntax tree.
///
/// The set is closed: every resolver matches on it directly. Token kinds carry their
/// source text (`SyntaxNode::text`); all other kinds are structural and only have
/// children. See the crate documentation for the child layout of each binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    // Tokens
    Prefix,
    LocalName,
    BracedUriLiteral,
    UriLiteral,
    LocationUri,
    StringLiteral,
    NumericLiteral,
    DirAttributeValue,
    // Markers (empty tokens)
    DefaultElementNamespace,
    AllowingEmpty,
    Variadic,

    // Names and types
    QName,
    SequenceType,
    Annotation,

    // Modules and prolog
    Module,
    VersionDecl,
    ModuleDecl,
    Prolog,
    NamespaceDecl,
    DefaultElementNamespaceDecl,
    DefaultFunctionNamespaceDecl,
    SchemaImport,
    ModuleImport,
    OptionDecl,
    VarDecl,
    FunctionDecl,
    ParamList,
    Param,
    FunctionBody,
    QueryBody,

    // General expressions
    Expr,
    EnclosedExpr,
    ParenthesizedExpr,
    VarRef,
    ContextItemExpr,
    FunctionCall,
    ArgumentList,
    NamedFunctionRef,
    InlineFunctionExpr,
    ArrowExpr,
    ArrowFunctionSpecifier,
    IfExpr,
    SwitchExpr,
    OrExpr,
    AndExpr,
    ComparisonExpr,
    RangeExpr,
    AdditiveExpr,
    MultiplicativeExpr,
    UnaryExpr,
    PathExpr,
    StepExpr,
    Predicate,

    // FLWOR
    FLWORExpr,
    ForClause,
    ForBinding,
    ForMemberClause,
    ForMemberBinding,
    PositionalVar,
    LetClause,
    LetBinding,
    TumblingWindowClause,
    SlidingWindowClause,
    WindowStartCondition,
    WindowEndCondition,
    CurrentItem,
    PreviousItem,
    NextItem,
    CountClause,
    WhereClause,
    GroupByClause,
    GroupingSpec,
    OrderByClause,
    OrderSpec,
    ReturnClause,

    // Other binders
    QuantifiedExpr,
    QuantifiedBinding,
    TypeswitchExpr,
    CaseClause,
    DefaultCaseClause,
    TryCatchExpr,
    TryClause,
    CatchClause,
    CatchErrorList,
    CopyModifyExpr,
    CopyBinding,
    Block,
    BlockVarDecl,
    BlockVarDeclEntry,
    WithExpr,
    NamespaceDeclaration,

    // Direct constructors
    DirElemConstructor,
    DirAttributeList,
    DirAttribute,
    DirElemContent,
}

impl SyntaxKind {
    /// Kinds whose nodes are leaf tokens carrying source text.
    pub fn is_token(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            Prefix
                | LocalName
                | BracedUriLiteral
                | UriLiteral
                | LocationUri
                | StringLiteral
                | NumericLiteral
                | DirAttributeValue
                | DefaultElementNamespace
                | AllowingEmpty
                | Variadic
        )
    }

    /// Clauses that may appear between the first clause and `return` of a FLWOR.
    pub fn is_flwor_clause(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            ForClause
                | ForMemberClause
                | LetClause
                | TumblingWindowClause
                | SlidingWindowClause
                | CountClause
                | WhereClause
                | GroupByClause
                | OrderByClause
        )
    }
}

#[cfg(test)]
mod tests {
    use super::SyntaxKind;

    #[test]
    fn tokens_and_clauses_are_disjoint() {
        for k in [
            SyntaxKind::Prefix,
            SyntaxKind::LocalName,
            SyntaxKind::UriLiteral,
            SyntaxKind::Variadic,
        ] {
            assert!(k.is_token());
            assert!(!k.is_flwor_clause());
        }
        assert!(SyntaxKind::LetClause.is_flwor_clause());
        assert!(!SyntaxKind::ReturnClause.is_flwor_clause());
        assert!(!SyntaxKind::QName.is_token());
    }
}
