// src/syntax/mod.rs
//! Tagged-variant syntax tree for the Swift declaration subset the checks need.
//!
//! The tree is produced by [`parse`] and consumed read-only by the analysis
//! passes. Every node kind that can contain a type reports its sub-nodes
//! through [`SyntaxNode::children`], so a pass only has to match the kinds it
//! cares about and recurse into everything else.

mod lexer;
mod parser;

use crate::types::SourcePosition;

pub use lexer::{tokenize, Token, TokenKind};
pub use parser::parse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    SourceFile(Vec<SyntaxNode>),
    CodeBlock(CodeBlock),
    VariableDecl(VariableDecl),
    FunctionDecl(FunctionDecl),
    TypeDecl(TypeDecl),
    TypeAlias(TypeAlias),
    IdentifierType(IdentifierType),
    MemberType(MemberType),
    TupleType(TupleType),
    FunctionType(FunctionType),
    OptionalType(OptionalType),
    ArrayType(ArrayType),
    DictionaryType(DictionaryType),
    CompositionType(CompositionType),
    AttributedType(AttributedType),
    TypeCast(TypeCast),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub position: SourcePosition,
    pub items: Vec<SyntaxNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDecl {
    pub position: SourcePosition,
    pub name: String,
    pub type_annotation: Option<Box<SyntaxNode>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects {
    pub is_async: bool,
    pub throws: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub names: Vec<String>,
    pub ty: SyntaxNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub position: SourcePosition,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub effects: Effects,
    pub result: Option<Box<SyntaxNode>>,
    pub requirements: Vec<GenericRequirement>,
    pub body: Option<Box<SyntaxNode>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub position: SourcePosition,
    pub keyword: String,
    pub name: String,
    pub inherits: Vec<SyntaxNode>,
    pub requirements: Vec<GenericRequirement>,
    pub members: Box<SyntaxNode>,
}

/// One `where` clause requirement: `T: P` or `T == U`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericRequirement {
    pub subject: SyntaxNode,
    pub same_type: bool,
    pub constraint: SyntaxNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAlias {
    pub position: SourcePosition,
    pub name: String,
    pub target: Box<SyntaxNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierType {
    pub position: SourcePosition,
    pub name: String,
    pub generic_args: Vec<SyntaxNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberType {
    pub position: SourcePosition,
    pub base: Box<SyntaxNode>,
    pub name: String,
    pub generic_args: Vec<SyntaxNode>,
}

/// One slot of a tuple type, or one parameter of a function type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleTypeElement {
    /// `name`, or `_ name` / `outer inner` when two names are written.
    pub names: Vec<String>,
    /// Offset of the `:` between the names and the type, if any.
    pub colon: Option<SourcePosition>,
    pub ty: SyntaxNode,
}

impl TupleTypeElement {
    #[must_use]
    pub fn is_labeled(&self) -> bool {
        self.colon.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleType {
    pub position: SourcePosition,
    pub elements: Vec<TupleTypeElement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionType {
    pub position: SourcePosition,
    pub parameters: Vec<TupleTypeElement>,
    pub effects: Effects,
    pub result: Box<SyntaxNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalType {
    pub position: SourcePosition,
    pub wrapped: Box<SyntaxNode>,
    /// `T!` rather than `T?`.
    pub implicitly_unwrapped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayType {
    pub position: SourcePosition,
    pub element: Box<SyntaxNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryType {
    pub position: SourcePosition,
    pub key: Box<SyntaxNode>,
    pub value: Box<SyntaxNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionType {
    pub position: SourcePosition,
    pub elements: Vec<SyntaxNode>,
}

/// `inout T`, `some P`, `@escaping T` and friends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributedType {
    pub position: SourcePosition,
    pub specifiers: Vec<String>,
    pub base: Box<SyntaxNode>,
}

/// The target type of an `as`, `as?`, `as!` or `is` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCast {
    pub position: SourcePosition,
    pub operator: String,
    pub target: Box<SyntaxNode>,
}

impl SyntaxNode {
    /// First non-trivia offset of the node.
    #[must_use]
    pub fn position(&self) -> SourcePosition {
        match self {
            Self::SourceFile(items) => items.first().map(Self::position).unwrap_or_default(),
            Self::CodeBlock(n) => n.position,
            Self::VariableDecl(n) => n.position,
            Self::FunctionDecl(n) => n.position,
            Self::TypeDecl(n) => n.position,
            Self::TypeAlias(n) => n.position,
            Self::IdentifierType(n) => n.position,
            Self::MemberType(n) => n.position,
            Self::TupleType(n) => n.position,
            Self::FunctionType(n) => n.position,
            Self::OptionalType(n) => n.position,
            Self::ArrayType(n) => n.position,
            Self::DictionaryType(n) => n.position,
            Self::CompositionType(n) => n.position,
            Self::AttributedType(n) => n.position,
            Self::TypeCast(n) => n.position,
        }
    }

    /// Direct sub-nodes in source order.
    #[must_use]
    pub fn children(&self) -> Vec<&SyntaxNode> {
        match self {
            Self::SourceFile(items) => items.iter().collect(),
            Self::CodeBlock(n) => n.items.iter().collect(),
            Self::VariableDecl(n) => n.type_annotation.as_deref().into_iter().collect(),
            Self::FunctionDecl(n) => {
                let mut out: Vec<&SyntaxNode> = n.parameters.iter().map(|p| &p.ty).collect();
                out.extend(n.result.as_deref());
                out.extend(n.requirements.iter().flat_map(GenericRequirement::types));
                out.extend(n.body.as_deref());
                out
            }
            Self::TypeDecl(n) => {
                let mut out: Vec<&SyntaxNode> = n.inherits.iter().collect();
                out.extend(n.requirements.iter().flat_map(GenericRequirement::types));
                out.push(&n.members);
                out
            }
            Self::TypeAlias(n) => vec![n.target.as_ref()],
            Self::IdentifierType(n) => n.generic_args.iter().collect(),
            Self::MemberType(n) => {
                let mut out = vec![n.base.as_ref()];
                out.extend(n.generic_args.iter());
                out
            }
            Self::TupleType(n) => n.elements.iter().map(|e| &e.ty).collect(),
            Self::FunctionType(n) => {
                let mut out: Vec<&SyntaxNode> = n.parameters.iter().map(|e| &e.ty).collect();
                out.push(&n.result);
                out
            }
            Self::OptionalType(n) => vec![n.wrapped.as_ref()],
            Self::ArrayType(n) => vec![n.element.as_ref()],
            Self::DictionaryType(n) => vec![n.key.as_ref(), n.value.as_ref()],
            Self::CompositionType(n) => n.elements.iter().collect(),
            Self::AttributedType(n) => vec![n.base.as_ref()],
            Self::TypeCast(n) => vec![n.target.as_ref()],
        }
    }
}

impl GenericRequirement {
    fn types(&self) -> [&SyntaxNode; 2] {
        [&self.subject, &self.constraint]
    }
}

/// Maps byte offsets to 1-based line and column numbers.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    /// Returns `(line, column)` for a position. Columns count bytes.
    #[must_use]
    pub fn location(&self, position: SourcePosition) -> (usize, usize) {
        let offset = position.offset();
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next.saturating_sub(1),
        };
        let start = self.line_starts.get(line).copied().unwrap_or(0);
        (line + 1, offset - start + 1)
    }
}
