//! AST node definitions.
//!
//! Nodes are allocated in a `bumpalo` arena owned by the caller and reference
//! their children through `&'a` references and arena slices. Every node carries
//! a [`NodeData`] with its kind and the byte range from the first token (after
//! leading trivia) to the end of its last token.

use crate::syntax_kind::SyntaxKind;
use crate::types::*;
use morph_core::intern::InternedString;
use morph_core::text::{TextPos, TextRange};

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all AST nodes.
#[derive(Debug, Clone, Copy)]
pub struct NodeData {
    /// The kind of this node.
    pub kind: SyntaxKind,
    /// Source position range.
    pub range: TextRange,
    /// Node flags.
    pub flags: NodeFlags,
    /// Modifier flags (for declarations).
    pub modifier_flags: ModifierFlags,
}

impl NodeData {
    pub fn new(kind: SyntaxKind, pos: TextPos, end: TextPos) -> Self {
        Self {
            kind,
            range: TextRange::new(pos, end),
            flags: NodeFlags::NONE,
            modifier_flags: ModifierFlags::NONE,
        }
    }

    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_modifiers(mut self, modifier_flags: ModifierFlags) -> Self {
        self.modifier_flags |= modifier_flags;
        self
    }

    #[inline]
    pub fn has_modifier(&self, flag: ModifierFlags) -> bool {
        self.modifier_flags.contains(flag)
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

/// An optional arena-allocated node.
pub type OptionalNode<'a, T> = Option<&'a T>;

// ============================================================================
// Source File
// ============================================================================

#[derive(Debug)]
pub struct SourceFile<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
    pub file_name: &'a str,
    pub text: &'a str,
}

impl<'a> SourceFile<'a> {
    /// Import declarations in source order.
    pub fn imports(&self) -> impl Iterator<Item = &'a ImportDeclaration<'a>> + 'a {
        self.statements.iter().filter_map(|stmt| match stmt {
            Statement::ImportDeclaration(decl) => Some(*decl),
            _ => None,
        })
    }
}

// ============================================================================
// Token
// ============================================================================

/// A simple token with kind and range.
#[derive(Debug, Clone, Copy)]
pub struct Token {
    pub data: NodeData,
}

impl Token {
    pub fn new(kind: SyntaxKind, pos: TextPos, end: TextPos) -> Self {
        Self {
            data: NodeData::new(kind, pos, end),
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data.kind
    }
}

// ============================================================================
// Identifier & Literals
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct Identifier<'a> {
    pub data: NodeData,
    /// The interned text of this identifier.
    pub text: InternedString,
    /// The text of this identifier, borrowed from the arena.
    pub name: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct StringLiteral<'a> {
    pub data: NodeData,
    /// The unescaped value, without quotes.
    pub value: &'a str,
    pub single_quote: bool,
}

/// Numeric, bigint, regular expression and no-substitution template literals.
#[derive(Debug, Clone, Copy)]
pub struct LiteralExpression<'a> {
    pub data: NodeData,
    /// The literal's value as written (quotes and slashes excluded for templates).
    pub text: &'a str,
}

// ============================================================================
// Names
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum EntityName<'a> {
    Identifier(Identifier<'a>),
    QualifiedName(&'a QualifiedName<'a>),
}

impl<'a> EntityName<'a> {
    pub fn range(&self) -> TextRange {
        match self {
            EntityName::Identifier(id) => id.data.range,
            EntityName::QualifiedName(q) => q.data.range,
        }
    }

    /// The leftmost identifier: `A` for `A.B.C`.
    pub fn leftmost(&self) -> &Identifier<'a> {
        match self {
            EntityName::Identifier(id) => id,
            EntityName::QualifiedName(q) => q.left.leftmost(),
        }
    }

    /// The rightmost identifier: `C` for `A.B.C`.
    pub fn rightmost(&self) -> &Identifier<'a> {
        match self {
            EntityName::Identifier(id) => id,
            EntityName::QualifiedName(q) => &q.right,
        }
    }

    /// Split into `(left, right)` for a qualified name.
    pub fn as_qualified(&self) -> Option<(&EntityName<'a>, &Identifier<'a>)> {
        match self {
            EntityName::Identifier(_) => None,
            EntityName::QualifiedName(q) => Some((&q.left, &q.right)),
        }
    }
}

#[derive(Debug)]
pub struct QualifiedName<'a> {
    pub data: NodeData,
    pub left: EntityName<'a>,
    pub right: Identifier<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum BindingName<'a> {
    Identifier(Identifier<'a>),
    ObjectBindingPattern(&'a ObjectBindingPattern<'a>),
    ArrayBindingPattern(&'a ArrayBindingPattern<'a>),
}

impl<'a> BindingName<'a> {
    /// Every identifier bound by this name, including nested patterns.
    pub fn for_each_bound_identifier(&self, f: &mut impl FnMut(&Identifier<'a>)) {
        match self {
            BindingName::Identifier(id) => f(id),
            BindingName::ObjectBindingPattern(pattern) => {
                for element in pattern.elements.iter() {
                    element.name.for_each_bound_identifier(f);
                }
            }
            BindingName::ArrayBindingPattern(pattern) => {
                for element in pattern.elements.iter().flatten() {
                    element.name.for_each_bound_identifier(f);
                }
            }
        }
    }

    pub fn as_identifier(&self) -> Option<&Identifier<'a>> {
        match self {
            BindingName::Identifier(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct ComputedPropertyName<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum PropertyName<'a> {
    Identifier(Identifier<'a>),
    StringLiteral(StringLiteral<'a>),
    NumericLiteral(LiteralExpression<'a>),
    ComputedPropertyName(&'a ComputedPropertyName<'a>),
}

impl<'a> PropertyName<'a> {
    pub fn range(&self) -> TextRange {
        match self {
            PropertyName::Identifier(n) => n.data.range,
            PropertyName::StringLiteral(n) => n.data.range,
            PropertyName::NumericLiteral(n) => n.data.range,
            PropertyName::ComputedPropertyName(n) => n.data.range,
        }
    }

    /// The statically known name, if any. Computed names have none.
    pub fn text(&self) -> Option<&'a str> {
        match self {
            PropertyName::Identifier(n) => Some(n.name),
            PropertyName::StringLiteral(n) => Some(n.value),
            PropertyName::NumericLiteral(n) => Some(n.text),
            PropertyName::ComputedPropertyName(_) => None,
        }
    }
}

// ============================================================================
// Binding Patterns
// ============================================================================

#[derive(Debug)]
pub struct ObjectBindingPattern<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, BindingElement<'a>>,
}

/// Array binding pattern. `None` elements are holes (`[, b]`).
#[derive(Debug)]
pub struct ArrayBindingPattern<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, Option<BindingElement<'a>>>,
}

#[derive(Debug)]
pub struct BindingElement<'a> {
    pub data: NodeData,
    pub dot_dot_dot_token: Option<Token>,
    pub property_name: Option<PropertyName<'a>>,
    pub name: BindingName<'a>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

// ============================================================================
// Type Nodes
// ============================================================================

#[derive(Debug)]
pub enum TypeNode<'a> {
    /// `string`, `number`, `this`, `null`, and `const` in `as const`.
    KeywordType(Token),
    TypeReference(&'a TypeReferenceNode<'a>),
    FunctionType(&'a FunctionTypeNode<'a>),
    ConstructorType(&'a FunctionTypeNode<'a>),
    TypeQuery(&'a TypeQueryNode<'a>),
    TypeLiteral(&'a TypeLiteralNode<'a>),
    ArrayType(&'a ArrayTypeNode<'a>),
    TupleType(&'a TupleTypeNode<'a>),
    NamedTupleMember(&'a NamedTupleMemberNode<'a>),
    OptionalType(&'a WrappedTypeNode<'a>),
    RestType(&'a WrappedTypeNode<'a>),
    UnionType(&'a UnionOrIntersectionTypeNode<'a>),
    IntersectionType(&'a UnionOrIntersectionTypeNode<'a>),
    ConditionalType(&'a ConditionalTypeNode<'a>),
    InferType(&'a InferTypeNode<'a>),
    ParenthesizedType(&'a WrappedTypeNode<'a>),
    TypeOperator(&'a TypeOperatorNode<'a>),
    IndexedAccessType(&'a IndexedAccessTypeNode<'a>),
    MappedType(&'a MappedTypeNode<'a>),
    LiteralType(&'a LiteralTypeNode<'a>),
    TypePredicate(&'a TypePredicateNode<'a>),
}

impl<'a> TypeNode<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            TypeNode::KeywordType(n) => &n.data,
            TypeNode::TypeReference(n) => &n.data,
            TypeNode::FunctionType(n) | TypeNode::ConstructorType(n) => &n.data,
            TypeNode::TypeQuery(n) => &n.data,
            TypeNode::TypeLiteral(n) => &n.data,
            TypeNode::ArrayType(n) => &n.data,
            TypeNode::TupleType(n) => &n.data,
            TypeNode::NamedTupleMember(n) => &n.data,
            TypeNode::OptionalType(n) | TypeNode::RestType(n) | TypeNode::ParenthesizedType(n) => &n.data,
            TypeNode::UnionType(n) | TypeNode::IntersectionType(n) => &n.data,
            TypeNode::ConditionalType(n) => &n.data,
            TypeNode::InferType(n) => &n.data,
            TypeNode::TypeOperator(n) => &n.data,
            TypeNode::IndexedAccessType(n) => &n.data,
            TypeNode::MappedType(n) => &n.data,
            TypeNode::LiteralType(n) => &n.data,
            TypeNode::TypePredicate(n) => &n.data,
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        self.data().range
    }

    /// Look through any number of parentheses.
    pub fn skip_parentheses(&self) -> &TypeNode<'a> {
        let mut current = self;
        while let TypeNode::ParenthesizedType(inner) = current {
            current = inner.type_node;
        }
        current
    }
}

#[derive(Debug)]
pub struct TypeReferenceNode<'a> {
    pub data: NodeData,
    pub type_name: EntityName<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
}

/// Function and constructor types; `data.kind` tells them apart.
#[derive(Debug)]
pub struct FunctionTypeNode<'a> {
    pub data: NodeData,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct TypeQueryNode<'a> {
    pub data: NodeData,
    pub expr_name: EntityName<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
}

#[derive(Debug)]
pub struct TypeLiteralNode<'a> {
    pub data: NodeData,
    pub members: NodeList<'a, TypeElement<'a>>,
}

#[derive(Debug)]
pub struct ArrayTypeNode<'a> {
    pub data: NodeData,
    pub element_type: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct TupleTypeNode<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct NamedTupleMemberNode<'a> {
    pub data: NodeData,
    pub dot_dot_dot_token: Option<Token>,
    pub name: Identifier<'a>,
    pub question_token: Option<Token>,
    pub type_node: &'a TypeNode<'a>,
}

/// Optional (`T?`), rest (`...T`) and parenthesized (`(T)`) types.
#[derive(Debug)]
pub struct WrappedTypeNode<'a> {
    pub data: NodeData,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct UnionOrIntersectionTypeNode<'a> {
    pub data: NodeData,
    pub types: NodeList<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct ConditionalTypeNode<'a> {
    pub data: NodeData,
    pub check_type: &'a TypeNode<'a>,
    pub extends_type: &'a TypeNode<'a>,
    pub true_type: &'a TypeNode<'a>,
    pub false_type: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct InferTypeNode<'a> {
    pub data: NodeData,
    pub type_parameter: &'a TypeParameterDeclaration<'a>,
}

#[derive(Debug)]
pub struct TypeOperatorNode<'a> {
    pub data: NodeData,
    pub operator: SyntaxKind, // KeyOfKeyword, UniqueKeyword, ReadonlyKeyword
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct IndexedAccessTypeNode<'a> {
    pub data: NodeData,
    pub object_type: &'a TypeNode<'a>,
    pub index_type: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct MappedTypeNode<'a> {
    pub data: NodeData,
    pub readonly_token: Option<Token>,
    pub type_parameter: &'a TypeParameterDeclaration<'a>,
    pub name_type: OptionalNode<'a, TypeNode<'a>>,
    pub question_token: Option<Token>,
    pub type_node: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct LiteralTypeNode<'a> {
    pub data: NodeData,
    pub literal: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct TypePredicateNode<'a> {
    pub data: NodeData,
    pub asserts_modifier: Option<Token>,
    pub parameter_name: TypePredicateParameterName<'a>,
    pub type_node: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub enum TypePredicateParameterName<'a> {
    Identifier(Identifier<'a>),
    ThisType(Token),
}

// ============================================================================
// Type Members
// ============================================================================

#[derive(Debug)]
pub enum TypeElement<'a> {
    PropertySignature(&'a PropertySignature<'a>),
    MethodSignature(&'a MethodSignature<'a>),
    CallSignature(&'a SignatureDeclaration<'a>),
    ConstructSignature(&'a SignatureDeclaration<'a>),
    IndexSignature(&'a IndexSignatureDeclaration<'a>),
}

impl<'a> TypeElement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            TypeElement::PropertySignature(n) => &n.data,
            TypeElement::MethodSignature(n) => &n.data,
            TypeElement::CallSignature(n) | TypeElement::ConstructSignature(n) => &n.data,
            TypeElement::IndexSignature(n) => &n.data,
        }
    }

    /// The member's static name, for property and method signatures.
    pub fn name(&self) -> Option<&'a str> {
        match self {
            TypeElement::PropertySignature(n) => n.name.text(),
            TypeElement::MethodSignature(n) => n.name.text(),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct PropertySignature<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub question_token: Option<Token>,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct MethodSignature<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub question_token: Option<Token>,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
}

/// Call (`(x): T`) and construct (`new (x): T`) signatures.
#[derive(Debug)]
pub struct SignatureDeclaration<'a> {
    pub data: NodeData,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct IndexSignatureDeclaration<'a> {
    pub data: NodeData,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
}

// ============================================================================
// Signature Elements
// ============================================================================

#[derive(Debug)]
pub struct TypeParameterDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub constraint: OptionalNode<'a, TypeNode<'a>>,
    pub default: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct ParameterDeclaration<'a> {
    pub data: NodeData,
    pub dot_dot_dot_token: Option<Token>,
    pub name: BindingName<'a>,
    pub question_token: Option<Token>,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug)]
pub enum Expression<'a> {
    Identifier(Identifier<'a>),
    StringLiteral(StringLiteral<'a>),
    NumericLiteral(LiteralExpression<'a>),
    BigIntLiteral(LiteralExpression<'a>),
    RegularExpressionLiteral(LiteralExpression<'a>),
    NoSubstitutionTemplateLiteral(LiteralExpression<'a>),
    TemplateExpression(&'a TemplateExpression<'a>),
    /// `true`, `false`, `null`, `this`, `super`.
    Keyword(Token),
    ArrayLiteral(&'a ArrayLiteralExpression<'a>),
    ObjectLiteral(&'a ObjectLiteralExpression<'a>),
    PropertyAccess(&'a PropertyAccessExpression<'a>),
    ElementAccess(&'a ElementAccessExpression<'a>),
    Call(&'a CallExpression<'a>),
    New(&'a NewExpression<'a>),
    Parenthesized(&'a ParenthesizedExpression<'a>),
    Function(&'a FunctionExpression<'a>),
    ArrowFunction(&'a ArrowFunction<'a>),
    /// Prefix operators, including `typeof`, `void`, `delete` and `await`.
    PrefixUnary(&'a PrefixUnaryExpression<'a>),
    PostfixUnary(&'a PostfixUnaryExpression<'a>),
    Binary(&'a BinaryExpression<'a>),
    Conditional(&'a ConditionalExpression<'a>),
    Spread(&'a SpreadElement<'a>),
    As(&'a AsExpression<'a>),
    Satisfies(&'a AsExpression<'a>),
    TypeAssertion(&'a TypeAssertionExpression<'a>),
    NonNull(&'a NonNullExpression<'a>),
    /// A hole in an array literal.
    Omitted(Token),
    /// Placeholder produced during error recovery.
    Missing(Token),
}

impl<'a> Expression<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Expression::Identifier(n) => &n.data,
            Expression::StringLiteral(n) => &n.data,
            Expression::NumericLiteral(n)
            | Expression::BigIntLiteral(n)
            | Expression::RegularExpressionLiteral(n)
            | Expression::NoSubstitutionTemplateLiteral(n) => &n.data,
            Expression::TemplateExpression(n) => &n.data,
            Expression::Keyword(n) | Expression::Omitted(n) | Expression::Missing(n) => &n.data,
            Expression::ArrayLiteral(n) => &n.data,
            Expression::ObjectLiteral(n) => &n.data,
            Expression::PropertyAccess(n) => &n.data,
            Expression::ElementAccess(n) => &n.data,
            Expression::Call(n) => &n.data,
            Expression::New(n) => &n.data,
            Expression::Parenthesized(n) => &n.data,
            Expression::Function(n) => &n.data,
            Expression::ArrowFunction(n) => &n.data,
            Expression::PrefixUnary(n) => &n.data,
            Expression::PostfixUnary(n) => &n.data,
            Expression::Binary(n) => &n.data,
            Expression::Conditional(n) => &n.data,
            Expression::Spread(n) => &n.data,
            Expression::As(n) | Expression::Satisfies(n) => &n.data,
            Expression::TypeAssertion(n) => &n.data,
            Expression::NonNull(n) => &n.data,
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        self.data().range
    }

    /// Look through any number of parentheses.
    pub fn skip_parentheses(&self) -> &Expression<'a> {
        let mut current = self;
        while let Expression::Parenthesized(inner) = current {
            current = inner.expression;
        }
        current
    }
}

#[derive(Debug)]
pub struct TemplateExpression<'a> {
    pub data: NodeData,
    pub head: &'a str,
    pub template_spans: NodeList<'a, TemplateSpan<'a>>,
}

#[derive(Debug)]
pub struct TemplateSpan<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub literal: &'a str,
}

#[derive(Debug)]
pub struct ArrayLiteralExpression<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, Expression<'a>>,
}

/// An object literal `{ ... }`.
///
/// Alongside its members the literal records where each member's trailing
/// comma ends, so that text edits can remove a member together with its
/// separator and leading trivia.
#[derive(Debug)]
pub struct ObjectLiteralExpression<'a> {
    pub data: NodeData,
    pub properties: NodeList<'a, ObjectLiteralElement<'a>>,
    /// End offset of the comma following each member, parallel to `properties`.
    pub separator_ends: NodeList<'a, Option<TextPos>>,
}

impl<'a> ObjectLiteralExpression<'a> {
    /// The offset just after the opening `{`.
    #[inline]
    pub fn open_brace_end(&self) -> TextPos {
        self.data.range.pos + 1
    }

    /// The offset of the closing `}`.
    #[inline]
    pub fn close_brace_pos(&self) -> TextPos {
        self.data.range.end.saturating_sub(1)
    }

    /// The end of the `{` or `,` that precedes member `index`.
    pub fn member_full_start(&self, index: usize) -> TextPos {
        if index == 0 {
            return self.open_brace_end();
        }
        self.separator_ends[index - 1].unwrap_or_else(|| self.properties[index - 1].range().end)
    }

    /// The end of member `index`'s trailing comma, if it has one.
    #[inline]
    pub fn member_separator_end(&self, index: usize) -> Option<TextPos> {
        self.separator_ends.get(index).copied().flatten()
    }
}

#[derive(Debug)]
pub enum ObjectLiteralElement<'a> {
    PropertyAssignment(&'a PropertyAssignment<'a>),
    ShorthandPropertyAssignment(&'a ShorthandPropertyAssignment<'a>),
    SpreadAssignment(&'a SpreadAssignment<'a>),
    MethodDeclaration(&'a MethodDeclaration<'a>),
    GetAccessor(&'a AccessorDeclaration<'a>),
    SetAccessor(&'a AccessorDeclaration<'a>),
}

impl<'a> ObjectLiteralElement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            ObjectLiteralElement::PropertyAssignment(n) => &n.data,
            ObjectLiteralElement::ShorthandPropertyAssignment(n) => &n.data,
            ObjectLiteralElement::SpreadAssignment(n) => &n.data,
            ObjectLiteralElement::MethodDeclaration(n) => &n.data,
            ObjectLiteralElement::GetAccessor(n) | ObjectLiteralElement::SetAccessor(n) => &n.data,
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        self.data().range
    }

    /// The member's static name. Spreads and computed names have none.
    pub fn name(&self) -> Option<&'a str> {
        match self {
            ObjectLiteralElement::PropertyAssignment(n) => n.name.text(),
            ObjectLiteralElement::ShorthandPropertyAssignment(n) => Some(n.name.name),
            ObjectLiteralElement::SpreadAssignment(_) => None,
            ObjectLiteralElement::MethodDeclaration(n) => n.name.text(),
            ObjectLiteralElement::GetAccessor(n) | ObjectLiteralElement::SetAccessor(n) => n.name.text(),
        }
    }

    #[inline]
    pub fn is_method(&self) -> bool {
        matches!(self, ObjectLiteralElement::MethodDeclaration(_))
    }
}

#[derive(Debug)]
pub struct PropertyAssignment<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub initializer: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct ShorthandPropertyAssignment<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
}

#[derive(Debug)]
pub struct SpreadAssignment<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct MethodDeclaration<'a> {
    pub data: NodeData,
    pub asterisk_token: Option<Token>,
    pub name: PropertyName<'a>,
    pub question_token: Option<Token>,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
    pub body: OptionalNode<'a, Block<'a>>,
}

/// `get` and `set` accessors; `data.kind` tells them apart.
#[derive(Debug)]
pub struct AccessorDeclaration<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
    pub body: OptionalNode<'a, Block<'a>>,
}

#[derive(Debug)]
pub struct PropertyAccessExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub question_dot_token: Option<Token>,
    pub name: Identifier<'a>,
}

#[derive(Debug)]
pub struct ElementAccessExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub question_dot_token: Option<Token>,
    pub argument_expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct CallExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub question_dot_token: Option<Token>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
    pub arguments: NodeList<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct NewExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
    pub arguments: Option<NodeList<'a, Expression<'a>>>,
}

#[derive(Debug)]
pub struct ParenthesizedExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct FunctionExpression<'a> {
    pub data: NodeData,
    pub asterisk_token: Option<Token>,
    pub name: Option<Identifier<'a>>,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
    pub body: &'a Block<'a>,
}

#[derive(Debug)]
pub struct ArrowFunction<'a> {
    pub data: NodeData,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
    pub body: ConciseBody<'a>,
}

#[derive(Debug)]
pub enum ConciseBody<'a> {
    Block(&'a Block<'a>),
    Expression(&'a Expression<'a>),
}

#[derive(Debug)]
pub struct PrefixUnaryExpression<'a> {
    pub data: NodeData,
    pub operator: SyntaxKind,
    pub operand: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct PostfixUnaryExpression<'a> {
    pub data: NodeData,
    pub operand: &'a Expression<'a>,
    pub operator: SyntaxKind,
}

#[derive(Debug)]
pub struct BinaryExpression<'a> {
    pub data: NodeData,
    pub left: &'a Expression<'a>,
    pub operator_token: Token,
    pub right: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct ConditionalExpression<'a> {
    pub data: NodeData,
    pub condition: &'a Expression<'a>,
    pub when_true: &'a Expression<'a>,
    pub when_false: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct SpreadElement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// `expr as T` and `expr satisfies T`; `data.kind` tells them apart.
#[derive(Debug)]
pub struct AsExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct TypeAssertionExpression<'a> {
    pub data: NodeData,
    pub type_node: &'a TypeNode<'a>,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct NonNullExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug)]
pub enum Statement<'a> {
    ImportDeclaration(&'a ImportDeclaration<'a>),
    ExportDeclaration(&'a ExportDeclaration<'a>),
    ExportAssignment(&'a ExportAssignment<'a>),
    InterfaceDeclaration(&'a InterfaceDeclaration<'a>),
    TypeAliasDeclaration(&'a TypeAliasDeclaration<'a>),
    EnumDeclaration(&'a EnumDeclaration<'a>),
    VariableStatement(&'a VariableStatement<'a>),
    FunctionDeclaration(&'a FunctionDeclaration<'a>),
    Block(&'a Block<'a>),
    EmptyStatement(Token),
    ExpressionStatement(&'a ExpressionStatement<'a>),
    IfStatement(&'a IfStatement<'a>),
    ReturnStatement(&'a ReturnStatement<'a>),
    ThrowStatement(&'a ThrowStatement<'a>),
    SwitchStatement(&'a SwitchStatement<'a>),
    BreakStatement(&'a BreakOrContinueStatement<'a>),
    ContinueStatement(&'a BreakOrContinueStatement<'a>),
    /// A construct outside the supported subset that was skipped.
    UnsupportedStatement(&'a UnsupportedStatement<'a>),
}

impl<'a> Statement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Statement::ImportDeclaration(n) => &n.data,
            Statement::ExportDeclaration(n) => &n.data,
            Statement::ExportAssignment(n) => &n.data,
            Statement::InterfaceDeclaration(n) => &n.data,
            Statement::TypeAliasDeclaration(n) => &n.data,
            Statement::EnumDeclaration(n) => &n.data,
            Statement::VariableStatement(n) => &n.data,
            Statement::FunctionDeclaration(n) => &n.data,
            Statement::Block(n) => &n.data,
            Statement::EmptyStatement(n) => &n.data,
            Statement::ExpressionStatement(n) => &n.data,
            Statement::IfStatement(n) => &n.data,
            Statement::ReturnStatement(n) => &n.data,
            Statement::ThrowStatement(n) => &n.data,
            Statement::SwitchStatement(n) => &n.data,
            Statement::BreakStatement(n) | Statement::ContinueStatement(n) => &n.data,
            Statement::UnsupportedStatement(n) => &n.data,
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        self.data().range
    }

    #[inline]
    pub fn is_exported(&self) -> bool {
        self.data().has_modifier(ModifierFlags::EXPORT)
    }
}

#[derive(Debug)]
pub struct Block<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
}

#[derive(Debug)]
pub struct ExpressionStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct IfStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub then_statement: &'a Statement<'a>,
    pub else_statement: OptionalNode<'a, Statement<'a>>,
}

#[derive(Debug)]
pub struct ReturnStatement<'a> {
    pub data: NodeData,
    pub expression: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct ThrowStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct SwitchStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub clauses: NodeList<'a, CaseOrDefaultClause<'a>>,
}

/// `case x:` or `default:`; `expression` is `None` for the default clause.
#[derive(Debug)]
pub struct CaseOrDefaultClause<'a> {
    pub data: NodeData,
    pub expression: OptionalNode<'a, Expression<'a>>,
    pub statements: NodeList<'a, Statement<'a>>,
}

#[derive(Debug)]
pub struct BreakOrContinueStatement<'a> {
    pub data: NodeData,
    pub label: Option<Identifier<'a>>,
}

/// A skipped statement. The identifiers seen while skipping are kept so
/// that reference analysis stays conservative over code it cannot model.
#[derive(Debug)]
pub struct UnsupportedStatement<'a> {
    pub data: NodeData,
    /// The keyword that introduced the construct (`class`, `namespace`, `for`, ...).
    pub keyword: SyntaxKind,
    /// The declared name, for declarations such as `class Foo`.
    pub name: Option<Identifier<'a>>,
    pub identifiers: NodeList<'a, Identifier<'a>>,
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug)]
pub struct VariableStatement<'a> {
    pub data: NodeData,
    pub declaration_list: VariableDeclarationList<'a>,
}

#[derive(Debug)]
pub struct VariableDeclarationList<'a> {
    /// `flags` holds `LET` or `CONST`; neither means `var`.
    pub data: NodeData,
    pub declarations: NodeList<'a, VariableDeclaration<'a>>,
}

#[derive(Debug)]
pub struct VariableDeclaration<'a> {
    pub data: NodeData,
    pub name: BindingName<'a>,
    pub exclamation_token: Option<Token>,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct FunctionDeclaration<'a> {
    pub data: NodeData,
    pub asterisk_token: Option<Token>,
    pub name: Option<Identifier<'a>>,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
    pub body: OptionalNode<'a, Block<'a>>,
}

#[derive(Debug)]
pub struct InterfaceDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub heritage_clauses: Option<NodeList<'a, HeritageClause<'a>>>,
    pub members: NodeList<'a, TypeElement<'a>>,
}

impl<'a> InterfaceDeclaration<'a> {
    /// The types named in `extends` clauses, in declaration order.
    pub fn extends_types(&self) -> impl Iterator<Item = &'a ExpressionWithTypeArguments<'a>> + 'a {
        self.heritage_clauses
            .unwrap_or(&[])
            .iter()
            .filter(|clause| clause.token == SyntaxKind::ExtendsKeyword)
            .flat_map(|clause| clause.types.iter())
    }
}

#[derive(Debug)]
pub struct HeritageClause<'a> {
    pub data: NodeData,
    pub token: SyntaxKind, // ExtendsKeyword or ImplementsKeyword
    pub types: NodeList<'a, ExpressionWithTypeArguments<'a>>,
}

#[derive(Debug)]
pub struct ExpressionWithTypeArguments<'a> {
    pub data: NodeData,
    pub expression: EntityName<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
}

#[derive(Debug)]
pub struct TypeAliasDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct EnumDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub members: NodeList<'a, EnumMember<'a>>,
}

#[derive(Debug)]
pub struct EnumMember<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

// ============================================================================
// Module Declarations
// ============================================================================

#[derive(Debug)]
pub struct ImportDeclaration<'a> {
    pub data: NodeData,
    /// `None` for side-effect imports (`import "./polyfill";`).
    pub import_clause: OptionalNode<'a, ImportClause<'a>>,
    pub module_specifier: StringLiteral<'a>,
}

#[derive(Debug)]
pub struct ImportClause<'a> {
    pub data: NodeData,
    pub is_type_only: bool,
    /// The default import binding.
    pub name: Option<Identifier<'a>>,
    pub named_bindings: Option<NamedImportBindings<'a>>,
}

#[derive(Debug)]
pub enum NamedImportBindings<'a> {
    NamespaceImport(&'a NamespaceImport<'a>),
    NamedImports(&'a NamedImports<'a>),
}

#[derive(Debug)]
pub struct NamespaceImport<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
}

#[derive(Debug)]
pub struct NamedImports<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, ImportSpecifier<'a>>,
}

#[derive(Debug)]
pub struct ImportSpecifier<'a> {
    pub data: NodeData,
    pub is_type_only: bool,
    /// The exported name when renamed: `A` in `A as B`.
    pub property_name: Option<Identifier<'a>>,
    /// The local binding.
    pub name: Identifier<'a>,
}

impl<'a> ImportSpecifier<'a> {
    /// The name this specifier imports from the module.
    pub fn imported_name(&self) -> &'a str {
        self.property_name.as_ref().unwrap_or(&self.name).name
    }
}

#[derive(Debug)]
pub struct ExportDeclaration<'a> {
    pub data: NodeData,
    pub is_type_only: bool,
    /// `None` for `export * from "m"`.
    pub export_clause: Option<NamedExportBindings<'a>>,
    pub module_specifier: Option<StringLiteral<'a>>,
}

#[derive(Debug)]
pub enum NamedExportBindings<'a> {
    /// `export * as ns from "m"`.
    NamespaceExport(Identifier<'a>),
    NamedExports(&'a NamedExports<'a>),
}

#[derive(Debug)]
pub struct NamedExports<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, ExportSpecifier<'a>>,
}

#[derive(Debug)]
pub struct ExportSpecifier<'a> {
    pub data: NodeData,
    pub is_type_only: bool,
    /// The local (or re-exported) name when renamed: `A` in `A as B`.
    pub property_name: Option<Identifier<'a>>,
    /// The exported name.
    pub name: Identifier<'a>,
}

impl<'a> ExportSpecifier<'a> {
    /// The name this specifier refers to locally or in the source module.
    pub fn local_name(&self) -> &'a str {
        self.property_name.as_ref().unwrap_or(&self.name).name
    }
}

/// `export = expr;` or `export default expr;`.
#[derive(Debug)]
pub struct ExportAssignment<'a> {
    pub data: NodeData,
    pub is_export_equals: bool,
    pub expression: &'a Expression<'a>,
}
