//! SyntaxKind enum - the token and node kinds of the supported TypeScript subset.
//!
//! Variant order matters: keyword ranges are checked by discriminant, so
//! reserved words must stay before the contextual keywords and both groups
//! must stay contiguous.

/// The kind of a syntax token or node in the AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // ========================================================================
    // Tokens
    // ========================================================================
    Unknown,
    EndOfFileToken,

    // Literals
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    NoSubstitutionTemplateLiteral,

    // Pseudo-literals (template)
    TemplateHead,
    TemplateMiddle,
    TemplateTail,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    AtToken,
    QuestionQuestionToken,
    HashToken,

    // Assignments
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    AsteriskAsteriskEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    BarBarEqualsToken,
    AmpersandAmpersandEqualsToken,
    QuestionQuestionEqualsToken,

    // Identifiers
    Identifier,

    // Reserved words
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,

    // Contextual keywords (valid identifiers outside their context)
    AbstractKeyword,
    AccessorKeyword,
    AnyKeyword,
    AsKeyword,
    AssertsKeyword,
    AsyncKeyword,
    AwaitKeyword,
    BigIntKeyword,
    BooleanKeyword,
    ConstructorKeyword,
    DeclareKeyword,
    FromKeyword,
    GetKeyword,
    GlobalKeyword,
    ImplementsKeyword,
    InferKeyword,
    InterfaceKeyword,
    IsKeyword,
    KeyOfKeyword,
    LetKeyword,
    ModuleKeyword,
    NamespaceKeyword,
    NeverKeyword,
    NumberKeyword,
    ObjectKeyword,
    OfKeyword,
    OverrideKeyword,
    PackageKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    ReadonlyKeyword,
    SatisfiesKeyword,
    SetKeyword,
    StaticKeyword,
    StringKeyword,
    SymbolKeyword,
    TypeKeyword,
    UndefinedKeyword,
    UniqueKeyword,
    UnknownKeyword,
    YieldKeyword,

    // ========================================================================
    // Nodes
    // ========================================================================
    QualifiedName,
    ComputedPropertyName,

    // Signature elements
    TypeParameter,
    Parameter,

    // Type members
    PropertySignature,
    MethodSignature,
    CallSignature,
    ConstructSignature,
    IndexSignature,

    // Types
    TypePredicate,
    TypeReference,
    FunctionType,
    ConstructorType,
    TypeQuery,
    TypeLiteral,
    ArrayType,
    TupleType,
    NamedTupleMember,
    OptionalType,
    RestType,
    UnionType,
    IntersectionType,
    ConditionalType,
    InferType,
    ParenthesizedType,
    TypeOperator,
    IndexedAccessType,
    MappedType,
    LiteralType,

    // Binding patterns
    ObjectBindingPattern,
    ArrayBindingPattern,
    BindingElement,

    // Expressions
    ArrayLiteralExpression,
    ObjectLiteralExpression,
    PropertyAccessExpression,
    ElementAccessExpression,
    CallExpression,
    NewExpression,
    ParenthesizedExpression,
    FunctionExpression,
    ArrowFunction,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    BinaryExpression,
    ConditionalExpression,
    TemplateExpression,
    TemplateSpan,
    SpreadElement,
    OmittedExpression,
    AsExpression,
    SatisfiesExpression,
    TypeAssertionExpression,
    NonNullExpression,
    ExpressionWithTypeArguments,

    // Object literal members
    PropertyAssignment,
    ShorthandPropertyAssignment,
    SpreadAssignment,
    MethodDeclaration,
    GetAccessor,
    SetAccessor,

    // Statements
    Block,
    EmptyStatement,
    VariableStatement,
    ExpressionStatement,
    IfStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    ThrowStatement,
    SwitchStatement,
    CaseClause,
    DefaultClause,
    VariableDeclaration,
    VariableDeclarationList,

    // Declarations
    FunctionDeclaration,
    InterfaceDeclaration,
    TypeAliasDeclaration,
    EnumDeclaration,
    EnumMember,
    HeritageClause,
    ImportDeclaration,
    ImportClause,
    NamespaceImport,
    NamedImports,
    ImportSpecifier,
    ExportDeclaration,
    NamedExports,
    NamespaceExport,
    ExportSpecifier,
    ExportAssignment,
    UnsupportedStatement,
    MissingDeclaration,

    SourceFile,
}

impl SyntaxKind {
    /// Whether this kind is any keyword, reserved or contextual.
    pub fn is_keyword(self) -> bool {
        let v = self as u16;
        v >= SyntaxKind::BreakKeyword as u16 && v <= SyntaxKind::YieldKeyword as u16
    }

    /// Whether this keyword may be used as an identifier outside its context.
    pub fn is_contextual_keyword(self) -> bool {
        let v = self as u16;
        v >= SyntaxKind::AbstractKeyword as u16 && v <= SyntaxKind::YieldKeyword as u16
    }

    /// Whether this token may stand where an identifier is expected.
    pub fn is_identifier_or_contextual_keyword(self) -> bool {
        self == SyntaxKind::Identifier || self.is_contextual_keyword()
    }

    /// Whether this token may be used as a property name (`a.delete`, `{ if: 1 }`).
    pub fn is_identifier_or_keyword(self) -> bool {
        self == SyntaxKind::Identifier || self.is_keyword()
    }

    pub fn is_assignment_operator(self) -> bool {
        let v = self as u16;
        v >= SyntaxKind::EqualsToken as u16 && v <= SyntaxKind::QuestionQuestionEqualsToken as u16
    }

    /// Declaration modifiers recognised in front of statements and members.
    pub fn is_modifier_kind(self) -> bool {
        matches!(
            self,
            SyntaxKind::AbstractKeyword
                | SyntaxKind::AccessorKeyword
                | SyntaxKind::AsyncKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::ExportKeyword
                | SyntaxKind::OverrideKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::PublicKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::StaticKeyword
        )
    }

    /// Keywords that denote a type on their own (`string`, `unknown`, `this`, ...).
    pub fn is_keyword_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::AnyKeyword
                | SyntaxKind::BigIntKeyword
                | SyntaxKind::BooleanKeyword
                | SyntaxKind::NeverKeyword
                | SyntaxKind::NumberKeyword
                | SyntaxKind::ObjectKeyword
                | SyntaxKind::StringKeyword
                | SyntaxKind::SymbolKeyword
                | SyntaxKind::UndefinedKeyword
                | SyntaxKind::UnknownKeyword
                | SyntaxKind::VoidKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::ThisKeyword
                | SyntaxKind::ConstKeyword
        )
    }

    pub fn keyword_text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::BreakKeyword => "break",
            SyntaxKind::CaseKeyword => "case",
            SyntaxKind::CatchKeyword => "catch",
            SyntaxKind::ClassKeyword => "class",
            SyntaxKind::ConstKeyword => "const",
            SyntaxKind::ContinueKeyword => "continue",
            SyntaxKind::DebuggerKeyword => "debugger",
            SyntaxKind::DefaultKeyword => "default",
            SyntaxKind::DeleteKeyword => "delete",
            SyntaxKind::DoKeyword => "do",
            SyntaxKind::ElseKeyword => "else",
            SyntaxKind::EnumKeyword => "enum",
            SyntaxKind::ExportKeyword => "export",
            SyntaxKind::ExtendsKeyword => "extends",
            SyntaxKind::FalseKeyword => "false",
            SyntaxKind::FinallyKeyword => "finally",
            SyntaxKind::ForKeyword => "for",
            SyntaxKind::FunctionKeyword => "function",
            SyntaxKind::IfKeyword => "if",
            SyntaxKind::ImportKeyword => "import",
            SyntaxKind::InKeyword => "in",
            SyntaxKind::InstanceOfKeyword => "instanceof",
            SyntaxKind::NewKeyword => "new",
            SyntaxKind::NullKeyword => "null",
            SyntaxKind::ReturnKeyword => "return",
            SyntaxKind::SuperKeyword => "super",
            SyntaxKind::SwitchKeyword => "switch",
            SyntaxKind::ThisKeyword => "this",
            SyntaxKind::ThrowKeyword => "throw",
            SyntaxKind::TrueKeyword => "true",
            SyntaxKind::TryKeyword => "try",
            SyntaxKind::TypeOfKeyword => "typeof",
            SyntaxKind::VarKeyword => "var",
            SyntaxKind::VoidKeyword => "void",
            SyntaxKind::WhileKeyword => "while",
            SyntaxKind::WithKeyword => "with",
            SyntaxKind::AbstractKeyword => "abstract",
            SyntaxKind::AccessorKeyword => "accessor",
            SyntaxKind::AnyKeyword => "any",
            SyntaxKind::AsKeyword => "as",
            SyntaxKind::AssertsKeyword => "asserts",
            SyntaxKind::AsyncKeyword => "async",
            SyntaxKind::AwaitKeyword => "await",
            SyntaxKind::BigIntKeyword => "bigint",
            SyntaxKind::BooleanKeyword => "boolean",
            SyntaxKind::ConstructorKeyword => "constructor",
            SyntaxKind::DeclareKeyword => "declare",
            SyntaxKind::FromKeyword => "from",
            SyntaxKind::GetKeyword => "get",
            SyntaxKind::GlobalKeyword => "global",
            SyntaxKind::ImplementsKeyword => "implements",
            SyntaxKind::InferKeyword => "infer",
            SyntaxKind::InterfaceKeyword => "interface",
            SyntaxKind::IsKeyword => "is",
            SyntaxKind::KeyOfKeyword => "keyof",
            SyntaxKind::LetKeyword => "let",
            SyntaxKind::ModuleKeyword => "module",
            SyntaxKind::NamespaceKeyword => "namespace",
            SyntaxKind::NeverKeyword => "never",
            SyntaxKind::NumberKeyword => "number",
            SyntaxKind::ObjectKeyword => "object",
            SyntaxKind::OfKeyword => "of",
            SyntaxKind::OverrideKeyword => "override",
            SyntaxKind::PackageKeyword => "package",
            SyntaxKind::PrivateKeyword => "private",
            SyntaxKind::ProtectedKeyword => "protected",
            SyntaxKind::PublicKeyword => "public",
            SyntaxKind::ReadonlyKeyword => "readonly",
            SyntaxKind::SatisfiesKeyword => "satisfies",
            SyntaxKind::SetKeyword => "set",
            SyntaxKind::StaticKeyword => "static",
            SyntaxKind::StringKeyword => "string",
            SyntaxKind::SymbolKeyword => "symbol",
            SyntaxKind::TypeKeyword => "type",
            SyntaxKind::UndefinedKeyword => "undefined",
            SyntaxKind::UniqueKeyword => "unique",
            SyntaxKind::UnknownKeyword => "unknown",
            SyntaxKind::YieldKeyword => "yield",
            _ => return None,
        };
        Some(text)
    }

    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        let kind = match text {
            "break" => SyntaxKind::BreakKeyword,
            "case" => SyntaxKind::CaseKeyword,
            "catch" => SyntaxKind::CatchKeyword,
            "class" => SyntaxKind::ClassKeyword,
            "const" => SyntaxKind::ConstKeyword,
            "continue" => SyntaxKind::ContinueKeyword,
            "debugger" => SyntaxKind::DebuggerKeyword,
            "default" => SyntaxKind::DefaultKeyword,
            "delete" => SyntaxKind::DeleteKeyword,
            "do" => SyntaxKind::DoKeyword,
            "else" => SyntaxKind::ElseKeyword,
            "enum" => SyntaxKind::EnumKeyword,
            "export" => SyntaxKind::ExportKeyword,
            "extends" => SyntaxKind::ExtendsKeyword,
            "false" => SyntaxKind::FalseKeyword,
            "finally" => SyntaxKind::FinallyKeyword,
            "for" => SyntaxKind::ForKeyword,
            "function" => SyntaxKind::FunctionKeyword,
            "if" => SyntaxKind::IfKeyword,
            "import" => SyntaxKind::ImportKeyword,
            "in" => SyntaxKind::InKeyword,
            "instanceof" => SyntaxKind::InstanceOfKeyword,
            "new" => SyntaxKind::NewKeyword,
            "null" => SyntaxKind::NullKeyword,
            "return" => SyntaxKind::ReturnKeyword,
            "super" => SyntaxKind::SuperKeyword,
            "switch" => SyntaxKind::SwitchKeyword,
            "this" => SyntaxKind::ThisKeyword,
            "throw" => SyntaxKind::ThrowKeyword,
            "true" => SyntaxKind::TrueKeyword,
            "try" => SyntaxKind::TryKeyword,
            "typeof" => SyntaxKind::TypeOfKeyword,
            "var" => SyntaxKind::VarKeyword,
            "void" => SyntaxKind::VoidKeyword,
            "while" => SyntaxKind::WhileKeyword,
            "with" => SyntaxKind::WithKeyword,
            "abstract" => SyntaxKind::AbstractKeyword,
            "accessor" => SyntaxKind::AccessorKeyword,
            "any" => SyntaxKind::AnyKeyword,
            "as" => SyntaxKind::AsKeyword,
            "asserts" => SyntaxKind::AssertsKeyword,
            "async" => SyntaxKind::AsyncKeyword,
            "await" => SyntaxKind::AwaitKeyword,
            "bigint" => SyntaxKind::BigIntKeyword,
            "boolean" => SyntaxKind::BooleanKeyword,
            "constructor" => SyntaxKind::ConstructorKeyword,
            "declare" => SyntaxKind::DeclareKeyword,
            "from" => SyntaxKind::FromKeyword,
            "get" => SyntaxKind::GetKeyword,
            "global" => SyntaxKind::GlobalKeyword,
            "implements" => SyntaxKind::ImplementsKeyword,
            "infer" => SyntaxKind::InferKeyword,
            "interface" => SyntaxKind::InterfaceKeyword,
            "is" => SyntaxKind::IsKeyword,
            "keyof" => SyntaxKind::KeyOfKeyword,
            "let" => SyntaxKind::LetKeyword,
            "module" => SyntaxKind::ModuleKeyword,
            "namespace" => SyntaxKind::NamespaceKeyword,
            "never" => SyntaxKind::NeverKeyword,
            "number" => SyntaxKind::NumberKeyword,
            "object" => SyntaxKind::ObjectKeyword,
            "of" => SyntaxKind::OfKeyword,
            "override" => SyntaxKind::OverrideKeyword,
            "package" => SyntaxKind::PackageKeyword,
            "private" => SyntaxKind::PrivateKeyword,
            "protected" => SyntaxKind::ProtectedKeyword,
            "public" => SyntaxKind::PublicKeyword,
            "readonly" => SyntaxKind::ReadonlyKeyword,
            "satisfies" => SyntaxKind::SatisfiesKeyword,
            "set" => SyntaxKind::SetKeyword,
            "static" => SyntaxKind::StaticKeyword,
            "string" => SyntaxKind::StringKeyword,
            "symbol" => SyntaxKind::SymbolKeyword,
            "type" => SyntaxKind::TypeKeyword,
            "undefined" => SyntaxKind::UndefinedKeyword,
            "unique" => SyntaxKind::UniqueKeyword,
            "unknown" => SyntaxKind::UnknownKeyword,
            "yield" => SyntaxKind::YieldKeyword,
            _ => return None,
        };
        Some(kind)
    }

    pub fn punctuation_text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::DotToken => ".",
            SyntaxKind::DotDotDotToken => "...",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::QuestionDotToken => "?.",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::LessThanEqualsToken => "<=",
            SyntaxKind::GreaterThanEqualsToken => ">=",
            SyntaxKind::EqualsEqualsToken => "==",
            SyntaxKind::ExclamationEqualsToken => "!=",
            SyntaxKind::EqualsEqualsEqualsToken => "===",
            SyntaxKind::ExclamationEqualsEqualsToken => "!==",
            SyntaxKind::EqualsGreaterThanToken => "=>",
            SyntaxKind::PlusToken => "+",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::AsteriskAsteriskToken => "**",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::PercentToken => "%",
            SyntaxKind::PlusPlusToken => "++",
            SyntaxKind::MinusMinusToken => "--",
            SyntaxKind::LessThanLessThanToken => "<<",
            SyntaxKind::GreaterThanGreaterThanToken => ">>",
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => ">>>",
            SyntaxKind::AmpersandToken => "&",
            SyntaxKind::BarToken => "|",
            SyntaxKind::CaretToken => "^",
            SyntaxKind::ExclamationToken => "!",
            SyntaxKind::TildeToken => "~",
            SyntaxKind::AmpersandAmpersandToken => "&&",
            SyntaxKind::BarBarToken => "||",
            SyntaxKind::QuestionToken => "?",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::AtToken => "@",
            SyntaxKind::QuestionQuestionToken => "??",
            SyntaxKind::HashToken => "#",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::PlusEqualsToken => "+=",
            SyntaxKind::MinusEqualsToken => "-=",
            SyntaxKind::AsteriskEqualsToken => "*=",
            SyntaxKind::SlashEqualsToken => "/=",
            SyntaxKind::PercentEqualsToken => "%=",
            SyntaxKind::AsteriskAsteriskEqualsToken => "**=",
            SyntaxKind::LessThanLessThanEqualsToken => "<<=",
            SyntaxKind::GreaterThanGreaterThanEqualsToken => ">>=",
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
            SyntaxKind::AmpersandEqualsToken => "&=",
            SyntaxKind::BarEqualsToken => "|=",
            SyntaxKind::CaretEqualsToken => "^=",
            SyntaxKind::BarBarEqualsToken => "||=",
            SyntaxKind::AmpersandAmpersandEqualsToken => "&&=",
            SyntaxKind::QuestionQuestionEqualsToken => "??=",
            _ => return None,
        };
        Some(text)
    }

    /// Human-readable text for diagnostics: punctuation, keyword, or the kind name.
    pub fn display_text(self) -> String {
        self.punctuation_text()
            .or_else(|| self.keyword_text())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{:?}", self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for text in ["interface", "extends", "keyof", "satisfies", "typeof", "as"] {
            let kind = SyntaxKind::from_keyword(text).expect("keyword");
            assert_eq!(kind.keyword_text(), Some(text));
            assert!(kind.is_keyword());
        }
        assert_eq!(SyntaxKind::from_keyword("Structure"), None);
    }

    #[test]
    fn test_contextual_keywords_are_identifiers() {
        assert!(SyntaxKind::TypeKeyword.is_identifier_or_contextual_keyword());
        assert!(SyntaxKind::FromKeyword.is_identifier_or_contextual_keyword());
        assert!(!SyntaxKind::ReturnKeyword.is_identifier_or_contextual_keyword());
        assert!(SyntaxKind::ReturnKeyword.is_identifier_or_keyword());
    }

    #[test]
    fn test_assignment_operator_range() {
        assert!(SyntaxKind::EqualsToken.is_assignment_operator());
        assert!(SyntaxKind::QuestionQuestionEqualsToken.is_assignment_operator());
        assert!(!SyntaxKind::EqualsEqualsToken.is_assignment_operator());
    }

    #[test]
    fn test_display_text() {
        assert_eq!(SyntaxKind::CloseBraceToken.display_text(), "}");
        assert_eq!(SyntaxKind::InterfaceKeyword.display_text(), "interface");
        assert_eq!(SyntaxKind::ObjectLiteralExpression.display_text(), "ObjectLiteralExpression");
    }
}
