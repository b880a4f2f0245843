//! Syntax node definitions.
//!
//! Nodes own their children through arena references. Every node carries a
//! `NodeData` with its full span `[pos, end)` and trimmed start; fixed
//! punctuation and keywords are not stored unless their presence varies.

use crate::syntax_kind::SyntaxKind;
use crate::types::*;
use reprint_core::text::{TextPos, TextRange};

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all syntax nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeData {
    pub kind: SyntaxKind,
    /// Full span: starts where the previous token ended, so it includes
    /// the node's leading trivia.
    pub range: TextRange,
    /// Trimmed start: the first character of the node's first token.
    pub start: TextPos,
    pub flags: NodeFlags,
}

impl NodeData {
    pub fn new(kind: SyntaxKind, pos: TextPos, start: TextPos, end: TextPos) -> Self {
        debug_assert!(pos <= start && start <= end, "{:?} {}..{}..{}", kind, pos, start, end);
        Self {
            kind,
            range: TextRange::new(pos, end),
            start,
            flags: NodeFlags::NONE,
        }
    }

    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// The trimmed span `[start, end)`.
    pub fn trimmed(&self) -> TextRange {
        TextRange::new(self.start, self.range.end)
    }
}

/// Uniform access to the spans of any node.
pub trait HasNodeData {
    fn data(&self) -> &NodeData;

    #[inline]
    fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    /// Full start, leading trivia included.
    #[inline]
    fn pos(&self) -> TextPos {
        self.data().range.pos
    }

    /// Trimmed start.
    #[inline]
    fn start(&self) -> TextPos {
        self.data().start
    }

    #[inline]
    fn end(&self) -> TextPos {
        self.data().range.end
    }
}

impl HasNodeData for NodeData {
    fn data(&self) -> &NodeData {
        self
    }
}

macro_rules! impl_has_node_data {
    ($($ty:ident),* $(,)?) => {
        $(
            impl HasNodeData for $ty<'_> {
                #[inline]
                fn data(&self) -> &NodeData {
                    &self.data
                }
            }
        )*
    };
}

/// An ordered list of child nodes.
///
/// `range` covers the list interior (between the brackets, if any).
/// `has_trailing_comma` records whether the source had a separator after
/// the last element; the reprinter reproduces it from this flag alone.
#[derive(Debug)]
pub struct NodeArray<'a, T> {
    pub nodes: &'a [T],
    pub range: TextRange,
    pub has_trailing_comma: bool,
}

impl<'a, T> NodeArray<'a, T> {
    pub fn new(nodes: &'a [T], pos: TextPos, end: TextPos, has_trailing_comma: bool) -> Self {
        Self {
            nodes,
            range: TextRange::new(pos, end),
            has_trailing_comma,
        }
    }

    pub fn empty(pos: TextPos) -> Self {
        Self::new(&[], pos, pos, false)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.nodes.iter()
    }

    #[inline]
    pub fn first(&self) -> Option<&'a T> {
        self.nodes.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&'a T> {
        self.nodes.last()
    }
}

impl<T> Clone for NodeArray<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeArray<'_, T> {}

impl<'a, T> IntoIterator for &NodeArray<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

// ============================================================================
// Source File
// ============================================================================

/// Root of a parsed file. Holds the buffer it was parsed from so that the
/// tree can always be paired with its text.
#[derive(Debug)]
pub struct SourceFile<'a> {
    pub data: NodeData,
    pub statements: NodeArray<'a, Statement<'a>>,
    pub end_of_file_token: Token,
    pub file_name: String,
    pub text: &'a str,
    pub language_variant: LanguageVariant,
    pub script_kind: ScriptKind,
}

impl HasNodeData for SourceFile<'_> {
    fn data(&self) -> &NodeData {
        &self.data
    }
}

// ============================================================================
// Tokens and Names
// ============================================================================

/// A token whose presence or kind varies (operators, `?`, `...`, modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub data: NodeData,
}

impl Token {
    pub fn new(kind: SyntaxKind, pos: TextPos, start: TextPos, end: TextPos) -> Self {
        Self {
            data: NodeData::new(kind, pos, start, end),
        }
    }
}

impl HasNodeData for Token {
    fn data(&self) -> &NodeData {
        &self.data
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Identifier<'a> {
    pub data: NodeData,
    pub text: &'a str,
    /// Set when a contextual keyword is used as a name.
    pub original_keyword_kind: Option<SyntaxKind>,
}

#[derive(Debug, Clone, Copy)]
pub struct PrivateIdentifier<'a> {
    pub data: NodeData,
    pub text: &'a str,
}

#[derive(Debug)]
pub struct QualifiedName<'a> {
    pub data: NodeData,
    pub left: EntityName<'a>,
    pub right: Identifier<'a>,
}

#[derive(Debug)]
pub enum EntityName<'a> {
    Identifier(Identifier<'a>),
    QualifiedName(&'a QualifiedName<'a>),
}

#[derive(Debug)]
pub struct ComputedPropertyName<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub enum PropertyName<'a> {
    Identifier(Identifier<'a>),
    PrivateIdentifier(PrivateIdentifier<'a>),
    StringLiteral(LiteralExpression<'a>),
    NumericLiteral(LiteralExpression<'a>),
    ComputedPropertyName(&'a ComputedPropertyName<'a>),
}

#[derive(Debug)]
pub enum MemberName<'a> {
    Identifier(Identifier<'a>),
    PrivateIdentifier(PrivateIdentifier<'a>),
}

// ============================================================================
// Modifiers and Decorators
// ============================================================================

#[derive(Debug)]
pub struct Decorator<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// Modifiers and decorators, kept together in source order.
#[derive(Debug)]
pub enum ModifierLike<'a> {
    Modifier(Token),
    Decorator(Decorator<'a>),
}

pub type Modifiers<'a> = Option<NodeArray<'a, ModifierLike<'a>>>;

// ============================================================================
// Binding Patterns
// ============================================================================

#[derive(Debug)]
pub enum BindingName<'a> {
    Identifier(Identifier<'a>),
    ObjectBindingPattern(&'a ObjectBindingPattern<'a>),
    ArrayBindingPattern(&'a ArrayBindingPattern<'a>),
}

#[derive(Debug)]
pub struct ObjectBindingPattern<'a> {
    pub data: NodeData,
    pub elements: NodeArray<'a, BindingElement<'a>>,
}

#[derive(Debug)]
pub struct ArrayBindingPattern<'a> {
    pub data: NodeData,
    pub elements: NodeArray<'a, ArrayBindingElement<'a>>,
}

#[derive(Debug)]
pub enum ArrayBindingElement<'a> {
    BindingElement(BindingElement<'a>),
    OmittedExpression(NodeData),
}

#[derive(Debug)]
pub struct BindingElement<'a> {
    pub data: NodeData,
    pub dot_dot_dot_token: Option<Token>,
    pub property_name: Option<PropertyName<'a>>,
    pub name: BindingName<'a>,
    pub initializer: Option<&'a Expression<'a>>,
}

// ============================================================================
// Signatures
// ============================================================================

#[derive(Debug)]
pub struct ParameterDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub dot_dot_dot_token: Option<Token>,
    pub name: BindingName<'a>,
    pub question_token: Option<Token>,
    pub type_annotation: Option<&'a TypeNode<'a>>,
    pub initializer: Option<&'a Expression<'a>>,
}

#[derive(Debug)]
pub struct TypeParameterDeclaration<'a> {
    pub data: NodeData,
    /// `in`, `out` and `const` variance/const modifiers.
    pub modifiers: Modifiers<'a>,
    pub name: Identifier<'a>,
    pub constraint: Option<&'a TypeNode<'a>>,
    pub default: Option<&'a TypeNode<'a>>,
}

pub type TypeParameters<'a> = Option<NodeArray<'a, TypeParameterDeclaration<'a>>>;
pub type TypeArguments<'a> = Option<NodeArray<'a, TypeNode<'a>>>;

#[derive(Debug)]
pub struct HeritageClause<'a> {
    pub data: NodeData,
    /// `ExtendsKeyword` or `ImplementsKeyword`.
    pub token: SyntaxKind,
    pub types: NodeArray<'a, ExpressionWithTypeArguments<'a>>,
}

#[derive(Debug)]
pub struct ExpressionWithTypeArguments<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub type_arguments: TypeArguments<'a>,
}

// ============================================================================
// Type Nodes
// ============================================================================

#[derive(Debug)]
pub enum TypeNode<'a> {
    KeywordType(NodeData),
    TypeReference(TypeReferenceNode<'a>),
    FunctionType(FunctionTypeNode<'a>),
    ConstructorType(FunctionTypeNode<'a>),
    TypeQuery(TypeQueryNode<'a>),
    TypeLiteral(TypeLiteralNode<'a>),
    ArrayType(ArrayTypeNode<'a>),
    TupleType(TupleTypeNode<'a>),
    OptionalType(WrappedTypeNode<'a>),
    RestType(WrappedTypeNode<'a>),
    NamedTupleMember(NamedTupleMember<'a>),
    UnionType(UnionOrIntersectionTypeNode<'a>),
    IntersectionType(UnionOrIntersectionTypeNode<'a>),
    ConditionalType(ConditionalTypeNode<'a>),
    InferType(InferTypeNode<'a>),
    ParenthesizedType(WrappedTypeNode<'a>),
    ThisType(NodeData),
    TypeOperator(TypeOperatorNode<'a>),
    IndexedAccessType(IndexedAccessTypeNode<'a>),
    MappedType(MappedTypeNode<'a>),
    LiteralType(LiteralTypeNode<'a>),
    TemplateLiteralType(TemplateLiteralTypeNode<'a>),
    ImportType(ImportTypeNode<'a>),
    TypePredicate(TypePredicateNode<'a>),
    /// Placeholder the parser inserts where a type was expected.
    MissingType(NodeData),
}

#[derive(Debug)]
pub struct TypeReferenceNode<'a> {
    pub data: NodeData,
    pub type_name: EntityName<'a>,
    pub type_arguments: TypeArguments<'a>,
}

/// Function types `(a) => T` and constructor types `abstract new (a) => T`.
#[derive(Debug)]
pub struct FunctionTypeNode<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub type_parameters: TypeParameters<'a>,
    pub parameters: NodeArray<'a, ParameterDeclaration<'a>>,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct TypeQueryNode<'a> {
    pub data: NodeData,
    pub expr_name: EntityName<'a>,
    pub type_arguments: TypeArguments<'a>,
}

#[derive(Debug)]
pub struct TypeLiteralNode<'a> {
    pub data: NodeData,
    pub members: NodeArray<'a, TypeElement<'a>>,
}

#[derive(Debug)]
pub struct ArrayTypeNode<'a> {
    pub data: NodeData,
    pub element_type: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct TupleTypeNode<'a> {
    pub data: NodeData,
    pub elements: NodeArray<'a, TypeNode<'a>>,
}

/// `T?`, `...T` and `(T)`: a single wrapped type.
#[derive(Debug)]
pub struct WrappedTypeNode<'a> {
    pub data: NodeData,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct NamedTupleMember<'a> {
    pub data: NodeData,
    pub dot_dot_dot_token: Option<Token>,
    pub name: Identifier<'a>,
    pub question_token: Option<Token>,
    pub type_node: &'a TypeNode<'a>,
}

/// Union or intersection. A leading `|`/`&` before the first member is not
/// stored; it lies between the node's start and the first member's start.
#[derive(Debug)]
pub struct UnionOrIntersectionTypeNode<'a> {
    pub data: NodeData,
    pub types: NodeArray<'a, TypeNode<'a>>,
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
    pub type_parameter: TypeParameterDeclaration<'a>,
}

#[derive(Debug)]
pub struct TypeOperatorNode<'a> {
    pub data: NodeData,
    /// `KeyOfKeyword`, `UniqueKeyword` or `ReadonlyKeyword`.
    pub operator: SyntaxKind,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct IndexedAccessTypeNode<'a> {
    pub data: NodeData,
    pub object_type: &'a TypeNode<'a>,
    pub index_type: &'a TypeNode<'a>,
}

/// `{ readonly [K in T as N]?: V }`.
#[derive(Debug)]
pub struct MappedTypeNode<'a> {
    pub data: NodeData,
    /// `ReadonlyKeyword`, or the `+`/`-` token that precedes `readonly`.
    pub readonly_token: Option<Token>,
    /// Name is `K`, constraint is `T`.
    pub type_parameter: TypeParameterDeclaration<'a>,
    pub name_type: Option<&'a TypeNode<'a>>,
    /// `QuestionToken`, or the `+`/`-` token that precedes `?`.
    pub question_token: Option<Token>,
    pub type_node: Option<&'a TypeNode<'a>>,
}

#[derive(Debug)]
pub struct LiteralTypeNode<'a> {
    pub data: NodeData,
    pub literal: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct TemplateLiteralTypeNode<'a> {
    pub data: NodeData,
    pub head: Token,
    pub template_spans: NodeArray<'a, TemplateLiteralTypeSpan<'a>>,
}

#[derive(Debug)]
pub struct TemplateLiteralTypeSpan<'a> {
    pub data: NodeData,
    pub type_node: &'a TypeNode<'a>,
    /// `TemplateMiddle` or `TemplateTail`.
    pub literal: Token,
}

/// `typeof import("m").A.B<T>`.
#[derive(Debug)]
pub struct ImportTypeNode<'a> {
    pub data: NodeData,
    pub is_type_of: bool,
    pub argument: &'a TypeNode<'a>,
    pub qualifier: Option<EntityName<'a>>,
    pub type_arguments: TypeArguments<'a>,
}

#[derive(Debug)]
pub enum TypePredicateParameterName<'a> {
    Identifier(Identifier<'a>),
    ThisType(NodeData),
}

#[derive(Debug)]
pub struct TypePredicateNode<'a> {
    pub data: NodeData,
    pub asserts_modifier: Option<Token>,
    pub parameter_name: TypePredicateParameterName<'a>,
    pub type_node: Option<&'a TypeNode<'a>>,
}

// ============================================================================
// Type Elements (interface and type literal members)
// ============================================================================

#[derive(Debug)]
pub enum TypeElement<'a> {
    PropertySignature(PropertySignature<'a>),
    MethodSignature(MethodSignature<'a>),
    CallSignature(SignatureDeclaration<'a>),
    ConstructSignature(SignatureDeclaration<'a>),
    IndexSignature(IndexSignatureDeclaration<'a>),
    GetAccessor(AccessorDeclaration<'a>),
    SetAccessor(AccessorDeclaration<'a>),
}

#[derive(Debug)]
pub struct PropertySignature<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub name: PropertyName<'a>,
    pub question_token: Option<Token>,
    pub type_annotation: Option<&'a TypeNode<'a>>,
}

#[derive(Debug)]
pub struct MethodSignature<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub name: PropertyName<'a>,
    pub question_token: Option<Token>,
    pub type_parameters: TypeParameters<'a>,
    pub parameters: NodeArray<'a, ParameterDeclaration<'a>>,
    pub type_annotation: Option<&'a TypeNode<'a>>,
}

/// Call signatures `(a): T` and construct signatures `new (a): T`.
#[derive(Debug)]
pub struct SignatureDeclaration<'a> {
    pub data: NodeData,
    pub type_parameters: TypeParameters<'a>,
    pub parameters: NodeArray<'a, ParameterDeclaration<'a>>,
    pub type_annotation: Option<&'a TypeNode<'a>>,
}

#[derive(Debug)]
pub struct IndexSignatureDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub parameters: NodeArray<'a, ParameterDeclaration<'a>>,
    pub type_annotation: Option<&'a TypeNode<'a>>,
}

// ============================================================================
// Class Elements
// ============================================================================

#[derive(Debug)]
pub enum ClassElement<'a> {
    PropertyDeclaration(PropertyDeclaration<'a>),
    MethodDeclaration(MethodDeclaration<'a>),
    Constructor(ConstructorDeclaration<'a>),
    GetAccessor(AccessorDeclaration<'a>),
    SetAccessor(AccessorDeclaration<'a>),
    IndexSignature(IndexSignatureDeclaration<'a>),
    ClassStaticBlockDeclaration(ClassStaticBlockDeclaration<'a>),
    SemicolonClassElement(NodeData),
}

#[derive(Debug)]
pub struct PropertyDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub name: PropertyName<'a>,
    /// `?` or `!` after the name.
    pub postfix_token: Option<Token>,
    pub type_annotation: Option<&'a TypeNode<'a>>,
    pub initializer: Option<&'a Expression<'a>>,
}

/// Methods in classes and object literals.
#[derive(Debug)]
pub struct MethodDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub asterisk_token: Option<Token>,
    pub name: PropertyName<'a>,
    pub question_token: Option<Token>,
    pub type_parameters: TypeParameters<'a>,
    pub parameters: NodeArray<'a, ParameterDeclaration<'a>>,
    pub type_annotation: Option<&'a TypeNode<'a>>,
    pub body: Option<Block<'a>>,
}

#[derive(Debug)]
pub struct ConstructorDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub parameters: NodeArray<'a, ParameterDeclaration<'a>>,
    pub body: Option<Block<'a>>,
}

/// `get`/`set` accessors; the kind is in `data.kind`.
#[derive(Debug)]
pub struct AccessorDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub name: PropertyName<'a>,
    pub parameters: NodeArray<'a, ParameterDeclaration<'a>>,
    pub type_annotation: Option<&'a TypeNode<'a>>,
    pub body: Option<Block<'a>>,
}

#[derive(Debug)]
pub struct ClassStaticBlockDeclaration<'a> {
    pub data: NodeData,
    pub body: Block<'a>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug)]
pub enum Expression<'a> {
    Identifier(Identifier<'a>),
    PrivateIdentifier(PrivateIdentifier<'a>),
    StringLiteral(LiteralExpression<'a>),
    NumericLiteral(LiteralExpression<'a>),
    BigIntLiteral(LiteralExpression<'a>),
    RegularExpressionLiteral(LiteralExpression<'a>),
    NoSubstitutionTemplateLiteral(LiteralExpression<'a>),
    TemplateExpression(TemplateExpression<'a>),
    ArrayLiteral(ArrayLiteralExpression<'a>),
    ObjectLiteral(ObjectLiteralExpression<'a>),
    PropertyAccess(PropertyAccessExpression<'a>),
    ElementAccess(ElementAccessExpression<'a>),
    Call(CallExpression<'a>),
    New(NewExpression<'a>),
    TaggedTemplate(TaggedTemplateExpression<'a>),
    TypeAssertion(TypeAssertionExpression<'a>),
    Parenthesized(ParenthesizedExpression<'a>),
    FunctionExpression(FunctionDeclaration<'a>),
    ArrowFunction(ArrowFunction<'a>),
    Delete(UnaryKeywordExpression<'a>),
    TypeOf(UnaryKeywordExpression<'a>),
    Void(UnaryKeywordExpression<'a>),
    Await(UnaryKeywordExpression<'a>),
    PrefixUnary(PrefixUnaryExpression<'a>),
    PostfixUnary(PostfixUnaryExpression<'a>),
    Binary(BinaryExpression<'a>),
    Conditional(ConditionalExpression<'a>),
    Yield(YieldExpression<'a>),
    Spread(SpreadElement<'a>),
    ClassExpression(ClassDeclaration<'a>),
    OmittedExpression(NodeData),
    As(AsExpression<'a>),
    Satisfies(AsExpression<'a>),
    NonNull(NonNullExpression<'a>),
    MetaProperty(MetaPropertyExpression<'a>),
    ThisKeyword(NodeData),
    SuperKeyword(NodeData),
    NullKeyword(NodeData),
    TrueKeyword(NodeData),
    FalseKeyword(NodeData),
    /// `import` as the callee of a dynamic import.
    ImportKeyword(NodeData),
    /// Placeholder the parser inserts where an expression was expected.
    MissingExpression(NodeData),
}

/// String, numeric, bigint, regex and no-substitution template literals.
#[derive(Debug, Clone, Copy)]
pub struct LiteralExpression<'a> {
    pub data: NodeData,
    /// Cooked value for strings, raw text otherwise.
    pub text: &'a str,
}

#[derive(Debug)]
pub struct TemplateExpression<'a> {
    pub data: NodeData,
    pub head: Token,
    pub template_spans: NodeArray<'a, TemplateSpan<'a>>,
}

#[derive(Debug)]
pub struct TemplateSpan<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    /// `TemplateMiddle` or `TemplateTail`, braces included.
    pub literal: Token,
}

#[derive(Debug)]
pub struct ArrayLiteralExpression<'a> {
    pub data: NodeData,
    pub elements: NodeArray<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct ObjectLiteralExpression<'a> {
    pub data: NodeData,
    pub properties: NodeArray<'a, ObjectLiteralElement<'a>>,
}

#[derive(Debug)]
pub enum ObjectLiteralElement<'a> {
    PropertyAssignment(PropertyAssignment<'a>),
    ShorthandPropertyAssignment(ShorthandPropertyAssignment<'a>),
    SpreadAssignment(SpreadElement<'a>),
    MethodDeclaration(MethodDeclaration<'a>),
    GetAccessor(AccessorDeclaration<'a>),
    SetAccessor(AccessorDeclaration<'a>),
}

#[derive(Debug)]
pub struct PropertyAssignment<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub initializer: &'a Expression<'a>,
}

/// `{ a }` or, in destructuring assignment targets, `{ a = 1 }`.
#[derive(Debug)]
pub struct ShorthandPropertyAssignment<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub object_assignment_initializer: Option<&'a Expression<'a>>,
}

#[derive(Debug)]
pub struct PropertyAccessExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub question_dot_token: Option<Token>,
    pub name: MemberName<'a>,
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
    pub type_arguments: TypeArguments<'a>,
    pub arguments: NodeArray<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct NewExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub type_arguments: TypeArguments<'a>,
    /// `None` for `new Foo` without parentheses.
    pub arguments: Option<NodeArray<'a, Expression<'a>>>,
}

#[derive(Debug)]
pub struct TaggedTemplateExpression<'a> {
    pub data: NodeData,
    pub tag: &'a Expression<'a>,
    pub type_arguments: TypeArguments<'a>,
    pub template: &'a Expression<'a>,
}

/// `<T>expr`.
#[derive(Debug)]
pub struct TypeAssertionExpression<'a> {
    pub data: NodeData,
    pub type_node: &'a TypeNode<'a>,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct ParenthesizedExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub enum ArrowFunctionBody<'a> {
    Block(Block<'a>),
    Expression(&'a Expression<'a>),
}

#[derive(Debug)]
pub struct ArrowFunction<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub type_parameters: TypeParameters<'a>,
    /// False for the single bare parameter form `x => x`.
    pub has_parenthesized_parameters: bool,
    pub parameters: NodeArray<'a, ParameterDeclaration<'a>>,
    pub type_annotation: Option<&'a TypeNode<'a>>,
    pub equals_greater_than_token: Token,
    pub body: ArrowFunctionBody<'a>,
}

/// `delete x`, `typeof x`, `void x` and `await x`.
#[derive(Debug)]
pub struct UnaryKeywordExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
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
pub struct YieldExpression<'a> {
    pub data: NodeData,
    pub asterisk_token: Option<Token>,
    pub expression: Option<&'a Expression<'a>>,
}

/// `...expr` in array literals, call arguments and object literals.
#[derive(Debug)]
pub struct SpreadElement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// `expr as T` and `expr satisfies T`.
#[derive(Debug)]
pub struct AsExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct NonNullExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// `new.target` and `import.meta`.
#[derive(Debug)]
pub struct MetaPropertyExpression<'a> {
    pub data: NodeData,
    pub keyword_token: SyntaxKind,
    pub name: Identifier<'a>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug)]
pub enum Statement<'a> {
    Block(Block<'a>),
    EmptyStatement(NodeData),
    VariableStatement(VariableStatement<'a>),
    ExpressionStatement(ExpressionStatement<'a>),
    IfStatement(IfStatement<'a>),
    DoStatement(DoStatement<'a>),
    WhileStatement(WhileStatement<'a>),
    ForStatement(ForStatement<'a>),
    ForInStatement(ForInOrOfStatement<'a>),
    ForOfStatement(ForInOrOfStatement<'a>),
    ContinueStatement(JumpStatement<'a>),
    BreakStatement(JumpStatement<'a>),
    ReturnStatement(ReturnStatement<'a>),
    WithStatement(WithStatement<'a>),
    SwitchStatement(SwitchStatement<'a>),
    LabeledStatement(LabeledStatement<'a>),
    ThrowStatement(ThrowStatement<'a>),
    TryStatement(TryStatement<'a>),
    DebuggerStatement(NodeData),
    FunctionDeclaration(FunctionDeclaration<'a>),
    ClassDeclaration(ClassDeclaration<'a>),
    InterfaceDeclaration(InterfaceDeclaration<'a>),
    TypeAliasDeclaration(TypeAliasDeclaration<'a>),
    EnumDeclaration(EnumDeclaration<'a>),
    ModuleDeclaration(ModuleDeclaration<'a>),
    ImportDeclaration(ImportDeclaration<'a>),
    ImportEqualsDeclaration(ImportEqualsDeclaration<'a>),
    ExportDeclaration(ExportDeclaration<'a>),
    ExportAssignment(ExportAssignment<'a>),
    /// Placeholder for text the parser could not turn into a statement.
    MissingDeclaration(NodeData),
}

#[derive(Debug)]
pub struct Block<'a> {
    pub data: NodeData,
    pub statements: NodeArray<'a, Statement<'a>>,
    pub multi_line: bool,
}

#[derive(Debug)]
pub struct VariableStatement<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub declaration_list: VariableDeclarationList<'a>,
}

/// `var`/`let`/`const`/`using`/`await using` is read from `data.flags`.
#[derive(Debug)]
pub struct VariableDeclarationList<'a> {
    pub data: NodeData,
    pub declarations: NodeArray<'a, VariableDeclaration<'a>>,
}

#[derive(Debug)]
pub struct VariableDeclaration<'a> {
    pub data: NodeData,
    pub name: BindingName<'a>,
    pub exclamation_token: Option<Token>,
    pub type_annotation: Option<&'a TypeNode<'a>>,
    pub initializer: Option<&'a Expression<'a>>,
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
    pub else_statement: Option<&'a Statement<'a>>,
}

#[derive(Debug)]
pub struct DoStatement<'a> {
    pub data: NodeData,
    pub statement: &'a Statement<'a>,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct WhileStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub statement: &'a Statement<'a>,
}

#[derive(Debug)]
pub enum ForInitializer<'a> {
    VariableDeclarationList(&'a VariableDeclarationList<'a>),
    Expression(&'a Expression<'a>),
}

#[derive(Debug)]
pub struct ForStatement<'a> {
    pub data: NodeData,
    pub initializer: Option<ForInitializer<'a>>,
    pub condition: Option<&'a Expression<'a>>,
    pub incrementor: Option<&'a Expression<'a>>,
    pub statement: &'a Statement<'a>,
}

#[derive(Debug)]
pub struct ForInOrOfStatement<'a> {
    pub data: NodeData,
    /// `for await (... of ...)`.
    pub await_modifier: Option<Token>,
    pub initializer: ForInitializer<'a>,
    pub expression: &'a Expression<'a>,
    pub statement: &'a Statement<'a>,
}

/// `break` and `continue`.
#[derive(Debug)]
pub struct JumpStatement<'a> {
    pub data: NodeData,
    pub label: Option<Identifier<'a>>,
}

#[derive(Debug)]
pub struct ReturnStatement<'a> {
    pub data: NodeData,
    pub expression: Option<&'a Expression<'a>>,
}

#[derive(Debug)]
pub struct WithStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub statement: &'a Statement<'a>,
}

#[derive(Debug)]
pub struct SwitchStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub case_block: CaseBlock<'a>,
}

#[derive(Debug)]
pub struct CaseBlock<'a> {
    pub data: NodeData,
    pub clauses: NodeArray<'a, CaseOrDefaultClause<'a>>,
}

/// A `case expr:` clause, or `default:` when `expression` is `None`.
#[derive(Debug)]
pub struct CaseOrDefaultClause<'a> {
    pub data: NodeData,
    pub expression: Option<&'a Expression<'a>>,
    pub statements: NodeArray<'a, Statement<'a>>,
}

#[derive(Debug)]
pub struct LabeledStatement<'a> {
    pub data: NodeData,
    pub label: Identifier<'a>,
    pub statement: &'a Statement<'a>,
}

#[derive(Debug)]
pub struct ThrowStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct TryStatement<'a> {
    pub data: NodeData,
    pub try_block: Block<'a>,
    pub catch_clause: Option<CatchClause<'a>>,
    pub finally_block: Option<Block<'a>>,
}

#[derive(Debug)]
pub struct CatchClause<'a> {
    pub data: NodeData,
    pub variable_declaration: Option<VariableDeclaration<'a>>,
    pub block: Block<'a>,
}

// ============================================================================
// Declarations
// ============================================================================

/// Function declarations and function expressions.
#[derive(Debug)]
pub struct FunctionDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub asterisk_token: Option<Token>,
    pub name: Option<Identifier<'a>>,
    pub type_parameters: TypeParameters<'a>,
    pub parameters: NodeArray<'a, ParameterDeclaration<'a>>,
    pub type_annotation: Option<&'a TypeNode<'a>>,
    /// `None` for overload signatures and ambient declarations.
    pub body: Option<Block<'a>>,
}

/// Class declarations and class expressions.
#[derive(Debug)]
pub struct ClassDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub name: Option<Identifier<'a>>,
    pub type_parameters: TypeParameters<'a>,
    pub heritage_clauses: Option<NodeArray<'a, HeritageClause<'a>>>,
    pub members: NodeArray<'a, ClassElement<'a>>,
}

#[derive(Debug)]
pub struct InterfaceDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub name: Identifier<'a>,
    pub type_parameters: TypeParameters<'a>,
    pub heritage_clauses: Option<NodeArray<'a, HeritageClause<'a>>>,
    pub members: NodeArray<'a, TypeElement<'a>>,
}

#[derive(Debug)]
pub struct TypeAliasDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub name: Identifier<'a>,
    pub type_parameters: TypeParameters<'a>,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct EnumDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub name: Identifier<'a>,
    pub members: NodeArray<'a, EnumMember<'a>>,
}

#[derive(Debug)]
pub struct EnumMember<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub initializer: Option<&'a Expression<'a>>,
}

#[derive(Debug)]
pub enum ModuleName<'a> {
    Identifier(Identifier<'a>),
    StringLiteral(LiteralExpression<'a>),
}

#[derive(Debug)]
pub enum ModuleBody<'a> {
    ModuleBlock(ModuleBlock<'a>),
    /// The `B` of `namespace A.B {}`; flagged `NESTED_NAMESPACE`.
    ModuleDeclaration(&'a ModuleDeclaration<'a>),
}

#[derive(Debug)]
pub struct ModuleBlock<'a> {
    pub data: NodeData,
    pub statements: NodeArray<'a, Statement<'a>>,
}

/// `namespace`, `module` and `global` declarations; the keyword is read
/// from `data.flags`.
#[derive(Debug)]
pub struct ModuleDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub name: ModuleName<'a>,
    pub body: Option<ModuleBody<'a>>,
}

#[derive(Debug)]
pub struct ImportDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub import_clause: Option<ImportClause<'a>>,
    pub module_specifier: LiteralExpression<'a>,
}

#[derive(Debug)]
pub struct ImportClause<'a> {
    pub data: NodeData,
    pub is_type_only: bool,
    pub name: Option<Identifier<'a>>,
    pub named_bindings: Option<NamedImportBindings<'a>>,
}

#[derive(Debug)]
pub enum NamedImportBindings<'a> {
    NamespaceImport(NamespaceImport<'a>),
    NamedImports(NamedImports<'a>),
}

/// `* as ns` in imports and exports.
#[derive(Debug)]
pub struct NamespaceImport<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
}

#[derive(Debug)]
pub struct NamedImports<'a> {
    pub data: NodeData,
    pub elements: NodeArray<'a, ImportOrExportSpecifier<'a>>,
}

/// `a`, `a as b`, `type a as b` inside import or export braces.
#[derive(Debug)]
pub struct ImportOrExportSpecifier<'a> {
    pub data: NodeData,
    pub is_type_only: bool,
    pub property_name: Option<Identifier<'a>>,
    pub name: Identifier<'a>,
}

#[derive(Debug)]
pub struct ImportEqualsDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub is_type_only: bool,
    pub name: Identifier<'a>,
    pub module_reference: ModuleReference<'a>,
}

#[derive(Debug)]
pub enum ModuleReference<'a> {
    EntityName(EntityName<'a>),
    /// `require("m")`.
    ExternalModuleReference(ExternalModuleReference<'a>),
}

#[derive(Debug)]
pub struct ExternalModuleReference<'a> {
    pub data: NodeData,
    pub expression: LiteralExpression<'a>,
}

#[derive(Debug)]
pub struct ExportDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub is_type_only: bool,
    /// `None` for `export * from "m"`.
    pub export_clause: Option<NamedExportBindings<'a>>,
    pub module_specifier: Option<LiteralExpression<'a>>,
}

#[derive(Debug)]
pub enum NamedExportBindings<'a> {
    NamespaceExport(NamespaceImport<'a>),
    NamedExports(NamedImports<'a>),
}

/// `export = expr` and `export default expr`.
#[derive(Debug)]
pub struct ExportAssignment<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub is_export_equals: bool,
    pub expression: &'a Expression<'a>,
}

// ============================================================================
// HasNodeData impls
// ============================================================================

impl_has_node_data!(
    Identifier,
    PrivateIdentifier,
    QualifiedName,
    ComputedPropertyName,
    Decorator,
    ObjectBindingPattern,
    ArrayBindingPattern,
    BindingElement,
    ParameterDeclaration,
    TypeParameterDeclaration,
    HeritageClause,
    ExpressionWithTypeArguments,
    TypeReferenceNode,
    FunctionTypeNode,
    TypeQueryNode,
    TypeLiteralNode,
    ArrayTypeNode,
    TupleTypeNode,
    WrappedTypeNode,
    NamedTupleMember,
    UnionOrIntersectionTypeNode,
    ConditionalTypeNode,
    InferTypeNode,
    TypeOperatorNode,
    IndexedAccessTypeNode,
    MappedTypeNode,
    LiteralTypeNode,
    TemplateLiteralTypeNode,
    TemplateLiteralTypeSpan,
    ImportTypeNode,
    TypePredicateNode,
    PropertySignature,
    MethodSignature,
    SignatureDeclaration,
    IndexSignatureDeclaration,
    PropertyDeclaration,
    MethodDeclaration,
    ConstructorDeclaration,
    AccessorDeclaration,
    ClassStaticBlockDeclaration,
    LiteralExpression,
    TemplateExpression,
    TemplateSpan,
    ArrayLiteralExpression,
    ObjectLiteralExpression,
    PropertyAssignment,
    ShorthandPropertyAssignment,
    PropertyAccessExpression,
    ElementAccessExpression,
    CallExpression,
    NewExpression,
    TaggedTemplateExpression,
    TypeAssertionExpression,
    ParenthesizedExpression,
    ArrowFunction,
    UnaryKeywordExpression,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    BinaryExpression,
    ConditionalExpression,
    YieldExpression,
    SpreadElement,
    AsExpression,
    NonNullExpression,
    MetaPropertyExpression,
    Block,
    VariableStatement,
    VariableDeclarationList,
    VariableDeclaration,
    ExpressionStatement,
    IfStatement,
    DoStatement,
    WhileStatement,
    ForStatement,
    ForInOrOfStatement,
    JumpStatement,
    ReturnStatement,
    WithStatement,
    SwitchStatement,
    CaseBlock,
    CaseOrDefaultClause,
    LabeledStatement,
    ThrowStatement,
    TryStatement,
    CatchClause,
    FunctionDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    TypeAliasDeclaration,
    EnumDeclaration,
    EnumMember,
    ModuleBlock,
    ModuleDeclaration,
    ImportDeclaration,
    ImportClause,
    NamespaceImport,
    NamedImports,
    ImportOrExportSpecifier,
    ImportEqualsDeclaration,
    ExternalModuleReference,
    ExportDeclaration,
    ExportAssignment,
);

impl HasNodeData for EntityName<'_> {
    fn data(&self) -> &NodeData {
        match self {
            EntityName::Identifier(n) => &n.data,
            EntityName::QualifiedName(n) => &n.data,
        }
    }
}

impl HasNodeData for PropertyName<'_> {
    fn data(&self) -> &NodeData {
        match self {
            PropertyName::Identifier(n) => &n.data,
            PropertyName::PrivateIdentifier(n) => &n.data,
            PropertyName::StringLiteral(n) | PropertyName::NumericLiteral(n) => &n.data,
            PropertyName::ComputedPropertyName(n) => &n.data,
        }
    }
}

impl HasNodeData for MemberName<'_> {
    fn data(&self) -> &NodeData {
        match self {
            MemberName::Identifier(n) => &n.data,
            MemberName::PrivateIdentifier(n) => &n.data,
        }
    }
}

impl HasNodeData for ModifierLike<'_> {
    fn data(&self) -> &NodeData {
        match self {
            ModifierLike::Modifier(n) => &n.data,
            ModifierLike::Decorator(n) => &n.data,
        }
    }
}

impl HasNodeData for BindingName<'_> {
    fn data(&self) -> &NodeData {
        match self {
            BindingName::Identifier(n) => &n.data,
            BindingName::ObjectBindingPattern(n) => &n.data,
            BindingName::ArrayBindingPattern(n) => &n.data,
        }
    }
}

impl HasNodeData for ArrayBindingElement<'_> {
    fn data(&self) -> &NodeData {
        match self {
            ArrayBindingElement::BindingElement(n) => &n.data,
            ArrayBindingElement::OmittedExpression(data) => data,
        }
    }
}

impl HasNodeData for TypePredicateParameterName<'_> {
    fn data(&self) -> &NodeData {
        match self {
            TypePredicateParameterName::Identifier(n) => &n.data,
            TypePredicateParameterName::ThisType(data) => data,
        }
    }
}

impl HasNodeData for TypeNode<'_> {
    fn data(&self) -> &NodeData {
        match self {
            TypeNode::KeywordType(data)
            | TypeNode::ThisType(data)
            | TypeNode::MissingType(data) => data,
            TypeNode::TypeReference(n) => &n.data,
            TypeNode::FunctionType(n) | TypeNode::ConstructorType(n) => &n.data,
            TypeNode::TypeQuery(n) => &n.data,
            TypeNode::TypeLiteral(n) => &n.data,
            TypeNode::ArrayType(n) => &n.data,
            TypeNode::TupleType(n) => &n.data,
            TypeNode::OptionalType(n) | TypeNode::RestType(n) | TypeNode::ParenthesizedType(n) => {
                &n.data
            }
            TypeNode::NamedTupleMember(n) => &n.data,
            TypeNode::UnionType(n) | TypeNode::IntersectionType(n) => &n.data,
            TypeNode::ConditionalType(n) => &n.data,
            TypeNode::InferType(n) => &n.data,
            TypeNode::TypeOperator(n) => &n.data,
            TypeNode::IndexedAccessType(n) => &n.data,
            TypeNode::MappedType(n) => &n.data,
            TypeNode::LiteralType(n) => &n.data,
            TypeNode::TemplateLiteralType(n) => &n.data,
            TypeNode::ImportType(n) => &n.data,
            TypeNode::TypePredicate(n) => &n.data,
        }
    }
}

impl HasNodeData for TypeElement<'_> {
    fn data(&self) -> &NodeData {
        match self {
            TypeElement::PropertySignature(n) => &n.data,
            TypeElement::MethodSignature(n) => &n.data,
            TypeElement::CallSignature(n) | TypeElement::ConstructSignature(n) => &n.data,
            TypeElement::IndexSignature(n) => &n.data,
            TypeElement::GetAccessor(n) | TypeElement::SetAccessor(n) => &n.data,
        }
    }
}

impl HasNodeData for ClassElement<'_> {
    fn data(&self) -> &NodeData {
        match self {
            ClassElement::PropertyDeclaration(n) => &n.data,
            ClassElement::MethodDeclaration(n) => &n.data,
            ClassElement::Constructor(n) => &n.data,
            ClassElement::GetAccessor(n) | ClassElement::SetAccessor(n) => &n.data,
            ClassElement::IndexSignature(n) => &n.data,
            ClassElement::ClassStaticBlockDeclaration(n) => &n.data,
            ClassElement::SemicolonClassElement(data) => data,
        }
    }
}

impl HasNodeData for Expression<'_> {
    fn data(&self) -> &NodeData {
        match self {
            Expression::Identifier(n) => &n.data,
            Expression::PrivateIdentifier(n) => &n.data,
            Expression::StringLiteral(n)
            | Expression::NumericLiteral(n)
            | Expression::BigIntLiteral(n)
            | Expression::RegularExpressionLiteral(n)
            | Expression::NoSubstitutionTemplateLiteral(n) => &n.data,
            Expression::TemplateExpression(n) => &n.data,
            Expression::ArrayLiteral(n) => &n.data,
            Expression::ObjectLiteral(n) => &n.data,
            Expression::PropertyAccess(n) => &n.data,
            Expression::ElementAccess(n) => &n.data,
            Expression::Call(n) => &n.data,
            Expression::New(n) => &n.data,
            Expression::TaggedTemplate(n) => &n.data,
            Expression::TypeAssertion(n) => &n.data,
            Expression::Parenthesized(n) => &n.data,
            Expression::FunctionExpression(n) => &n.data,
            Expression::ArrowFunction(n) => &n.data,
            Expression::Delete(n)
            | Expression::TypeOf(n)
            | Expression::Void(n)
            | Expression::Await(n) => &n.data,
            Expression::PrefixUnary(n) => &n.data,
            Expression::PostfixUnary(n) => &n.data,
            Expression::Binary(n) => &n.data,
            Expression::Conditional(n) => &n.data,
            Expression::Yield(n) => &n.data,
            Expression::Spread(n) => &n.data,
            Expression::ClassExpression(n) => &n.data,
            Expression::As(n) | Expression::Satisfies(n) => &n.data,
            Expression::NonNull(n) => &n.data,
            Expression::MetaProperty(n) => &n.data,
            Expression::OmittedExpression(data)
            | Expression::ThisKeyword(data)
            | Expression::SuperKeyword(data)
            | Expression::NullKeyword(data)
            | Expression::TrueKeyword(data)
            | Expression::FalseKeyword(data)
            | Expression::ImportKeyword(data)
            | Expression::MissingExpression(data) => data,
        }
    }
}

impl HasNodeData for ObjectLiteralElement<'_> {
    fn data(&self) -> &NodeData {
        match self {
            ObjectLiteralElement::PropertyAssignment(n) => &n.data,
            ObjectLiteralElement::ShorthandPropertyAssignment(n) => &n.data,
            ObjectLiteralElement::SpreadAssignment(n) => &n.data,
            ObjectLiteralElement::MethodDeclaration(n) => &n.data,
            ObjectLiteralElement::GetAccessor(n) | ObjectLiteralElement::SetAccessor(n) => &n.data,
        }
    }
}

impl HasNodeData for ArrowFunctionBody<'_> {
    fn data(&self) -> &NodeData {
        match self {
            ArrowFunctionBody::Block(n) => &n.data,
            ArrowFunctionBody::Expression(n) => n.data(),
        }
    }
}

impl HasNodeData for ForInitializer<'_> {
    fn data(&self) -> &NodeData {
        match self {
            ForInitializer::VariableDeclarationList(n) => &n.data,
            ForInitializer::Expression(n) => n.data(),
        }
    }
}

impl HasNodeData for ModuleName<'_> {
    fn data(&self) -> &NodeData {
        match self {
            ModuleName::Identifier(n) => &n.data,
            ModuleName::StringLiteral(n) => &n.data,
        }
    }
}

impl HasNodeData for ModuleBody<'_> {
    fn data(&self) -> &NodeData {
        match self {
            ModuleBody::ModuleBlock(n) => &n.data,
            ModuleBody::ModuleDeclaration(n) => &n.data,
        }
    }
}

impl HasNodeData for NamedImportBindings<'_> {
    fn data(&self) -> &NodeData {
        match self {
            NamedImportBindings::NamespaceImport(n) => &n.data,
            NamedImportBindings::NamedImports(n) => &n.data,
        }
    }
}

impl HasNodeData for NamedExportBindings<'_> {
    fn data(&self) -> &NodeData {
        match self {
            NamedExportBindings::NamespaceExport(n) => &n.data,
            NamedExportBindings::NamedExports(n) => &n.data,
        }
    }
}

impl HasNodeData for ModuleReference<'_> {
    fn data(&self) -> &NodeData {
        match self {
            ModuleReference::EntityName(n) => n.data(),
            ModuleReference::ExternalModuleReference(n) => &n.data,
        }
    }
}

impl HasNodeData for Statement<'_> {
    fn data(&self) -> &NodeData {
        match self {
            Statement::Block(n) => &n.data,
            Statement::EmptyStatement(data)
            | Statement::DebuggerStatement(data)
            | Statement::MissingDeclaration(data) => data,
            Statement::VariableStatement(n) => &n.data,
            Statement::ExpressionStatement(n) => &n.data,
            Statement::IfStatement(n) => &n.data,
            Statement::DoStatement(n) => &n.data,
            Statement::WhileStatement(n) => &n.data,
            Statement::ForStatement(n) => &n.data,
            Statement::ForInStatement(n) | Statement::ForOfStatement(n) => &n.data,
            Statement::ContinueStatement(n) | Statement::BreakStatement(n) => &n.data,
            Statement::ReturnStatement(n) => &n.data,
            Statement::WithStatement(n) => &n.data,
            Statement::SwitchStatement(n) => &n.data,
            Statement::LabeledStatement(n) => &n.data,
            Statement::ThrowStatement(n) => &n.data,
            Statement::TryStatement(n) => &n.data,
            Statement::FunctionDeclaration(n) => &n.data,
            Statement::ClassDeclaration(n) => &n.data,
            Statement::InterfaceDeclaration(n) => &n.data,
            Statement::TypeAliasDeclaration(n) => &n.data,
            Statement::EnumDeclaration(n) => &n.data,
            Statement::ModuleDeclaration(n) => &n.data,
            Statement::ImportDeclaration(n) => &n.data,
            Statement::ImportEqualsDeclaration(n) => &n.data,
            Statement::ExportDeclaration(n) => &n.data,
            Statement::ExportAssignment(n) => &n.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_data_spans() {
        let data = NodeData::new(SyntaxKind::Identifier, 3, 5, 8);
        assert_eq!(data.pos(), 3);
        assert_eq!(data.start(), 5);
        assert_eq!(data.end(), 8);
        assert_eq!(data.trimmed(), TextRange::new(5, 8));
    }

    #[test]
    fn test_node_array_accessors() {
        let arena = bumpalo::Bump::new();
        let tokens = arena.alloc_slice_copy(&[
            Token::new(SyntaxKind::ExportKeyword, 0, 0, 6),
            Token::new(SyntaxKind::DefaultKeyword, 6, 7, 14),
        ]);
        let list = NodeArray::new(tokens, 0, 14, false);
        assert_eq!(list.len(), 2);
        assert_eq!(list.first().map(|t| t.kind()), Some(SyntaxKind::ExportKeyword));
        assert_eq!(list.last().map(|t| t.start()), Some(7));
        assert_eq!((&list).into_iter().count(), 2);
        assert!(NodeArray::<Token>::empty(4).is_empty());
    }

    #[test]
    fn test_statement_dispatches_to_inner_data() {
        let stmt = Statement::EmptyStatement(NodeData::new(SyntaxKind::EmptyStatement, 0, 2, 3));
        assert_eq!(stmt.kind(), SyntaxKind::EmptyStatement);
        assert_eq!(stmt.pos(), 0);
        assert_eq!(stmt.start(), 2);
    }
}
