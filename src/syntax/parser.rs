// src/syntax/parser.rs
//! Recursive-descent parser for declarations and type expressions.
//!
//! Statements and expressions are not modelled. The item loop skips any token
//! it does not recognise, descending into `{ ... }` blocks so declarations
//! nested in bodies, accessors and closures are still found. A declaration
//! that fails to parse is skipped one token at a time; only lexer errors and
//! unbalanced braces fail the whole file.

use super::lexer::{tokenize, Token, TokenKind};
use super::{
    ArrayType, AttributedType, CodeBlock, CompositionType, DictionaryType, Effects, FunctionDecl,
    FunctionType, GenericRequirement, IdentifierType, MemberType, OptionalType, Parameter,
    SyntaxNode, TupleType, TupleTypeElement, TypeAlias, TypeCast, TypeDecl, VariableDecl,
};
use crate::error::{LintError, Result};
use crate::types::SourcePosition;

const MODIFIERS: &[&str] = &[
    "public", "private", "fileprivate", "internal", "open", "package", "static", "final",
    "override", "mutating", "nonmutating", "lazy", "weak", "unowned", "convenience", "required",
    "dynamic", "optional", "indirect", "nonisolated", "prefix", "postfix", "infix", "distributed",
];

const DECL_KEYWORDS: &[&str] = &[
    "let", "var", "func", "init", "subscript", "typealias", "struct", "class", "enum", "protocol",
    "extension", "actor",
];

const TYPE_SPECIFIERS: &[&str] = &[
    "inout", "some", "any", "borrowing", "consuming", "sending", "__owned", "__shared", "repeat",
    "each",
];

/// Parses Swift source into a `SyntaxNode::SourceFile`.
///
/// # Errors
/// Returns `LintError::Parse` for unterminated literals or unbalanced braces.
pub fn parse(source: &str) -> Result<SyntaxNode> {
    let tokens = tokenize(source)?;
    check_braces(&tokens)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        eof: source.len(),
    };
    let items = parser.parse_items(false)?;
    Ok(SyntaxNode::SourceFile(items))
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    eof: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n)
    }

    fn offset(&self) -> usize {
        self.peek().map_or(self.eof, |t| t.start)
    }

    fn at_punct(&self, c: char) -> bool {
        self.peek().is_some_and(|t| t.is_punct(c))
    }

    fn at_keyword(&self, word: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(word))
    }

    fn nth_is_punct(&self, n: usize, c: char) -> bool {
        self.peek_nth(n).is_some_and(|t| t.is_punct(c))
    }

    // The current token touches the previous one (no trivia in between).
    fn adjacent(&self) -> bool {
        match (self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)), self.peek()) {
            (Some(prev), Some(cur)) => prev.end == cur.start,
            _ => false,
        }
    }

    fn eat_punct(&mut self, c: char) -> Option<SourcePosition> {
        let start = self.peek().filter(|t| t.is_punct(c))?.start;
        self.pos += 1;
        Some(SourcePosition(start))
    }

    fn expect_punct(&mut self, c: char) -> Result<SourcePosition> {
        self.eat_punct(c)
            .ok_or_else(|| self.error(format!("expected `{c}`")))
    }

    fn eat_ident(&mut self) -> Option<String> {
        let name = self.peek()?.ident()?.to_string();
        self.pos += 1;
        Some(name)
    }

    fn error(&self, message: String) -> LintError {
        LintError::Parse {
            offset: self.offset(),
            message,
        }
    }

    fn parse_items(&mut self, closing: bool) -> Result<Vec<SyntaxNode>> {
        let mut items = Vec::new();
        loop {
            let Some(tok) = self.peek() else {
                if closing {
                    return Err(self.error("expected `}` before end of file".into()));
                }
                return Ok(items);
            };
            if tok.is_punct('}') {
                if closing {
                    self.pos += 1;
                    return Ok(items);
                }
                return Err(self.error("unexpected `}`".into()));
            }
            if tok.is_punct('{') {
                items.push(self.parse_block()?);
                continue;
            }
            let start = self.pos;
            let mark = items.len();
            let step = if self.at_cast() {
                self.parse_cast(&mut items)
            } else {
                self.parse_declaration(&mut items)
            };
            match step {
                Ok(true) => {}
                Ok(false) => self.pos = start + 1,
                Err(_) => {
                    items.truncate(mark);
                    self.pos = start + 1;
                }
            }
        }
    }

    fn at_cast(&self) -> bool {
        (self.at_keyword("as") || self.at_keyword("is")) && !self.after_dot()
    }

    fn after_dot(&self) -> bool {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .is_some_and(|t| t.is_punct('.'))
    }

    fn parse_cast(&mut self, out: &mut Vec<SyntaxNode>) -> Result<bool> {
        let position = SourcePosition(self.offset());
        let mut operator = self.eat_ident().unwrap_or_default();
        if operator == "as" && self.adjacent() && (self.at_punct('?') || self.at_punct('!')) {
            operator.push_str(if self.at_punct('?') { "?" } else { "!" });
            self.pos += 1;
        }
        let target = Box::new(self.parse_type()?);
        out.push(SyntaxNode::TypeCast(TypeCast {
            position,
            operator,
            target,
        }));
        Ok(true)
    }

    fn parse_block(&mut self) -> Result<SyntaxNode> {
        let position = self.expect_punct('{')?;
        let items = self.parse_items(true)?;
        Ok(SyntaxNode::CodeBlock(CodeBlock { position, items }))
    }

    /// Returns false (with the cursor untouched) when no declaration starts here.
    fn parse_declaration(&mut self, out: &mut Vec<SyntaxNode>) -> Result<bool> {
        let start = self.pos;
        if self.after_dot() {
            return Ok(false);
        }
        let position = SourcePosition(self.offset());
        self.skip_attributes_and_modifiers()?;

        let keyword = self.peek().and_then(Token::ident).unwrap_or_default().to_string();
        let parsed = match keyword.as_str() {
            "let" | "var" => self.parse_variable(position, out)?,
            "func" | "init" | "subscript" => self.parse_function(position, out)?,
            "typealias" => self.parse_typealias(position, out)?,
            "struct" | "class" | "enum" | "protocol" | "extension" | "actor" => {
                self.parse_type_decl(position, out)?
            }
            _ => false,
        };
        if !parsed {
            self.pos = start;
        }
        Ok(parsed)
    }

    fn skip_attributes_and_modifiers(&mut self) -> Result<()> {
        loop {
            if self.skip_attribute()? {
                continue;
            }
            if self.peek().and_then(Token::ident).is_some_and(|w| MODIFIERS.contains(&w)) {
                self.pos += 1;
                if self.at_punct('(') && self.adjacent() {
                    self.skip_balanced('(', ')')?;
                }
            } else if self.at_keyword("class") && self.nth_starts_declaration(1) {
                self.pos += 1;
            } else {
                return Ok(());
            }
        }
    }

    /// Skips one `@name` or `@name(...)`; false when none starts here.
    fn skip_attribute(&mut self) -> Result<bool> {
        if !(self.at_punct('@') && self.peek_nth(1).and_then(Token::ident).is_some()) {
            return Ok(false);
        }
        self.pos += 2;
        if self.at_punct('(') && self.adjacent() {
            self.skip_balanced('(', ')')?;
        }
        Ok(true)
    }

    fn nth_starts_declaration(&self, n: usize) -> bool {
        self.peek_nth(n)
            .and_then(Token::ident)
            .is_some_and(|w| DECL_KEYWORDS.contains(&w) || MODIFIERS.contains(&w))
    }

    fn parse_variable(&mut self, position: SourcePosition, out: &mut Vec<SyntaxNode>) -> Result<bool> {
        self.pos += 1;
        let mut parsed = false;
        loop {
            let name = if let Some(name) = self.eat_ident() {
                name
            } else if self.at_punct('(') {
                self.skip_balanced('(', ')')?;
                "(pattern)".to_string()
            } else {
                return Ok(parsed);
            };

            let type_annotation = if self.at_annotation() {
                self.pos += 1;
                Some(Box::new(self.parse_type()?))
            } else {
                None
            };
            out.push(SyntaxNode::VariableDecl(VariableDecl {
                position,
                name,
                type_annotation,
            }));
            parsed = true;

            let another = self.at_punct(',')
                && self
                    .peek_nth(1)
                    .is_some_and(|t| t.ident().is_some() || t.is_punct('('));
            if !another {
                return Ok(true);
            }
            self.pos += 1;
        }
    }

    // `:` followed on the same line by something that can start a type.
    fn at_annotation(&self) -> bool {
        self.at_punct(':')
            && self.peek_nth(1).is_some_and(|t| {
                !t.newline_before
                    && (t.ident().is_some() || t.is_punct('(') || t.is_punct('[') || t.is_punct('@'))
            })
    }

    fn parse_function(&mut self, position: SourcePosition, out: &mut Vec<SyntaxNode>) -> Result<bool> {
        let keyword = self.eat_ident().unwrap_or_default();
        let name = if keyword == "func" {
            match self.eat_ident() {
                Some(name) => name,
                None => self.operator_name(),
            }
        } else {
            if self.adjacent() && (self.at_punct('?') || self.at_punct('!')) {
                self.pos += 1;
            }
            keyword
        };
        if name.is_empty() {
            return Ok(false);
        }
        if self.at_punct('<') {
            self.skip_balanced('<', '>')?;
        }
        if !self.at_punct('(') {
            return Ok(false);
        }

        let parameters = self.parse_parameter_clause()?;
        let effects = self.parse_effects()?;
        let result = if self.peek().is_some_and(|t| t.kind == TokenKind::Arrow) {
            self.pos += 1;
            Some(Box::new(self.parse_type()?))
        } else {
            None
        };
        let requirements = self.parse_where_clause()?;
        let body = if self.at_punct('{') {
            Some(Box::new(self.parse_block()?))
        } else {
            None
        };

        out.push(SyntaxNode::FunctionDecl(FunctionDecl {
            position,
            name,
            parameters,
            effects,
            result,
            requirements,
            body,
        }));
        Ok(true)
    }

    fn operator_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(TokenKind::Punct(c)) = self.peek().map(|t| t.kind.clone()) {
            if c == '(' || c == '{' || (c == '<' && !name.is_empty()) {
                break;
            }
            name.push(c);
            self.pos += 1;
        }
        name
    }

    fn parse_parameter_clause(&mut self) -> Result<Vec<Parameter>> {
        self.expect_punct('(')?;
        let mut parameters = Vec::new();
        while self.eat_punct(')').is_none() {
            while self.skip_attribute()? {}
            let mut names = Vec::new();
            while let Some(name) = self.eat_ident() {
                names.push(name);
            }
            if names.is_empty() {
                return Err(self.error("expected parameter name".into()));
            }
            self.expect_punct(':')?;
            let ty = self.parse_type()?;
            self.skip_variadic();
            if self.at_punct('=') {
                self.skip_default_value()?;
            }
            parameters.push(Parameter { names, ty });
            if self.eat_punct(',').is_none() && !self.at_punct(')') {
                return Err(self.error("expected `,` or `)` in parameter list".into()));
            }
        }
        Ok(parameters)
    }

    fn parse_effects(&mut self) -> Result<Effects> {
        let mut effects = Effects::default();
        loop {
            if self.at_keyword("async") {
                effects.is_async = true;
                self.pos += 1;
            } else if self.at_keyword("throws") || self.at_keyword("rethrows") {
                effects.throws = true;
                self.pos += 1;
                // Typed throws: `throws(MyError)`.
                if self.at_punct('(') && self.adjacent() {
                    self.skip_balanced('(', ')')?;
                }
            } else {
                return Ok(effects);
            }
        }
    }

    fn parse_where_clause(&mut self) -> Result<Vec<GenericRequirement>> {
        let mut requirements = Vec::new();
        if !self.at_keyword("where") {
            return Ok(requirements);
        }
        self.pos += 1;
        loop {
            let subject = self.parse_type()?;
            let same_type = if self.at_punct('=') && self.nth_is_punct(1, '=') {
                self.pos += 2;
                true
            } else {
                self.expect_punct(':')?;
                false
            };
            let constraint = self.parse_type()?;
            requirements.push(GenericRequirement {
                subject,
                same_type,
                constraint,
            });
            if self.eat_punct(',').is_none() {
                return Ok(requirements);
            }
        }
    }

    fn parse_typealias(&mut self, position: SourcePosition, out: &mut Vec<SyntaxNode>) -> Result<bool> {
        self.pos += 1;
        let Some(name) = self.eat_ident() else {
            return Ok(false);
        };
        if self.at_punct('<') {
            self.skip_balanced('<', '>')?;
        }
        if self.eat_punct('=').is_none() {
            return Ok(false);
        }
        let target = Box::new(self.parse_type()?);
        out.push(SyntaxNode::TypeAlias(TypeAlias {
            position,
            name,
            target,
        }));
        Ok(true)
    }

    fn parse_type_decl(&mut self, position: SourcePosition, out: &mut Vec<SyntaxNode>) -> Result<bool> {
        let keyword = self.eat_ident().unwrap_or_default();
        let mut name = String::new();
        while let Some(part) = self.eat_ident() {
            name.push_str(&part);
            if !(self.at_punct('.') && self.peek_nth(1).and_then(Token::ident).is_some()) {
                break;
            }
            name.push('.');
            self.pos += 1;
        }
        if name.is_empty() {
            return Ok(false);
        }
        if self.at_punct('<') {
            self.skip_balanced('<', '>')?;
        }

        let mut inherits = Vec::new();
        if self.eat_punct(':').is_some() {
            loop {
                inherits.push(self.parse_type()?);
                if self.eat_punct(',').is_none() {
                    break;
                }
            }
        }
        let requirements = self.parse_where_clause()?;
        if !self.at_punct('{') {
            return Ok(false);
        }
        let members = Box::new(self.parse_block()?);
        out.push(SyntaxNode::TypeDecl(TypeDecl {
            position,
            keyword,
            name,
            inherits,
            requirements,
            members,
        }));
        Ok(true)
    }

    fn parse_type(&mut self) -> Result<SyntaxNode> {
        let position = SourcePosition(self.offset());
        let mut specifiers = Vec::new();
        loop {
            if self.at_punct('@') {
                let Some(attr) = self.peek_nth(1).and_then(Token::ident).map(str::to_string) else {
                    break;
                };
                self.pos += 2;
                if self.at_punct('(') && self.adjacent() {
                    self.skip_balanced('(', ')')?;
                }
                specifiers.push(format!("@{attr}"));
            } else if self.at_punct('~') && self.peek_nth(1).and_then(Token::ident).is_some() {
                self.pos += 1;
                specifiers.push("~".to_string());
            } else if let Some(word) = self
                .peek()
                .and_then(Token::ident)
                .filter(|w| TYPE_SPECIFIERS.contains(w))
                .map(str::to_string)
            {
                let next_starts_type = self
                    .peek_nth(1)
                    .is_some_and(|t| t.ident().is_some() || t.is_punct('(') || t.is_punct('['));
                if !next_starts_type {
                    break;
                }
                self.pos += 1;
                specifiers.push(word);
            } else {
                break;
            }
        }

        let base = self.parse_composition()?;
        if specifiers.is_empty() {
            return Ok(base);
        }
        Ok(SyntaxNode::AttributedType(AttributedType {
            position,
            specifiers,
            base: Box::new(base),
        }))
    }

    fn parse_composition(&mut self) -> Result<SyntaxNode> {
        let position = SourcePosition(self.offset());
        let first = self.parse_postfix()?;
        if !self.at_punct('&') {
            return Ok(first);
        }
        let mut elements = vec![first];
        while self.eat_punct('&').is_some() {
            elements.push(self.parse_postfix()?);
        }
        Ok(SyntaxNode::CompositionType(CompositionType { position, elements }))
    }

    fn parse_postfix(&mut self) -> Result<SyntaxNode> {
        let position = SourcePosition(self.offset());
        let mut ty = self.parse_primary()?;
        loop {
            if self.adjacent() && (self.at_punct('?') || self.at_punct('!')) {
                let implicitly_unwrapped = self.at_punct('!');
                self.pos += 1;
                ty = SyntaxNode::OptionalType(OptionalType {
                    position,
                    wrapped: Box::new(ty),
                    implicitly_unwrapped,
                });
            } else if self.at_punct('.') && self.peek_nth(1).and_then(Token::ident).is_some() {
                self.pos += 1;
                let name = self.eat_ident().unwrap_or_default();
                let generic_args = self.parse_generic_args()?;
                ty = SyntaxNode::MemberType(MemberType {
                    position,
                    base: Box::new(ty),
                    name,
                    generic_args,
                });
            } else {
                return Ok(ty);
            }
        }
    }

    fn parse_primary(&mut self) -> Result<SyntaxNode> {
        let position = SourcePosition(self.offset());
        if let Some(name) = self.eat_ident() {
            let generic_args = self.parse_generic_args()?;
            return Ok(SyntaxNode::IdentifierType(IdentifierType {
                position,
                name,
                generic_args,
            }));
        }
        if self.at_punct('(') {
            return self.parse_parenthesized();
        }
        if self.eat_punct('[').is_some() {
            let element = self.parse_type()?;
            let node = if self.eat_punct(':').is_some() {
                let value = self.parse_type()?;
                SyntaxNode::DictionaryType(DictionaryType {
                    position,
                    key: Box::new(element),
                    value: Box::new(value),
                })
            } else {
                SyntaxNode::ArrayType(ArrayType {
                    position,
                    element: Box::new(element),
                })
            };
            self.expect_punct(']')?;
            return Ok(node);
        }
        Err(self.error("expected type".into()))
    }

    fn parse_generic_args(&mut self) -> Result<Vec<SyntaxNode>> {
        let mut args = Vec::new();
        if !(self.at_punct('<') && self.adjacent()) {
            return Ok(args);
        }
        self.pos += 1;
        loop {
            args.push(self.parse_type()?);
            if self.eat_punct(',').is_none() {
                break;
            }
        }
        self.expect_punct('>')?;
        Ok(args)
    }

    // A parenthesised element list is a tuple type unless effects or `->`
    // follow, in which case it is a function type's parameter list.
    fn parse_parenthesized(&mut self) -> Result<SyntaxNode> {
        let position = self.expect_punct('(')?;
        let elements = self.parse_tuple_elements()?;

        let is_function =
            self.at_trailing_effect() || self.peek().is_some_and(|t| t.kind == TokenKind::Arrow);
        if !is_function {
            return Ok(SyntaxNode::TupleType(TupleType { position, elements }));
        }

        let effects = self.parse_effects()?;
        if self.peek().is_some_and(|t| t.kind == TokenKind::Arrow) {
            self.pos += 1;
        } else {
            return Err(self.error("expected `->` in function type".into()));
        }
        let result = Box::new(self.parse_type()?);
        Ok(SyntaxNode::FunctionType(FunctionType {
            position,
            parameters: elements,
            effects,
            result,
        }))
    }

    // `async`/`throws` on the same line as the `)`, and not the start of
    // `async let`.
    fn at_trailing_effect(&self) -> bool {
        let Some(tok) = self.peek() else {
            return false;
        };
        let effect = ["async", "throws", "rethrows"].iter().any(|w| tok.is_keyword(w));
        let binding = self
            .peek_nth(1)
            .is_some_and(|t| t.is_keyword("let") || t.is_keyword("var"));
        effect && !tok.newline_before && !binding
    }

    fn parse_tuple_elements(&mut self) -> Result<Vec<TupleTypeElement>> {
        let mut elements = Vec::new();
        while self.eat_punct(')').is_none() {
            let label_len = self.label_len();
            let mut names = Vec::new();
            for _ in 0..label_len {
                names.extend(self.eat_ident());
            }
            let colon = if label_len > 0 {
                Some(self.expect_punct(':')?)
            } else {
                None
            };

            let ty = self.parse_type()?;
            self.skip_variadic();
            if self.at_punct('=') {
                self.skip_default_value()?;
            }
            elements.push(TupleTypeElement { names, colon, ty });
            if self.eat_punct(',').is_none() && !self.at_punct(')') {
                return Err(self.error("expected `,` or `)` in tuple type".into()));
            }
        }
        Ok(elements)
    }

    // Number of name tokens before a `:` at the start of a tuple element.
    fn label_len(&self) -> usize {
        let is_ident = |n: usize| self.peek_nth(n).and_then(Token::ident).is_some();
        if is_ident(0) && self.nth_is_punct(1, ':') {
            1
        } else if is_ident(0) && is_ident(1) && self.nth_is_punct(2, ':') {
            2
        } else {
            0
        }
    }

    fn skip_variadic(&mut self) {
        if self.at_punct('.') && self.nth_is_punct(1, '.') && self.nth_is_punct(2, '.') {
            self.pos += 3;
        }
    }

    // Skips `= expr` up to the `,` or `)` that closes the element.
    fn skip_default_value(&mut self) -> Result<()> {
        let start = self.offset();
        let mut depth = 0usize;
        while let Some(tok) = self.peek() {
            match &tok.kind {
                TokenKind::Punct('(' | '[' | '{') => depth += 1,
                TokenKind::Punct(')' | ']' | '}') if depth > 0 => depth -= 1,
                TokenKind::Punct(',' | ')') if depth == 0 => return Ok(()),
                TokenKind::Punct(']' | '}') => break,
                _ => {}
            }
            self.pos += 1;
        }
        Err(LintError::Parse {
            offset: start,
            message: "unterminated default value".into(),
        })
    }

    fn skip_balanced(&mut self, open: char, close: char) -> Result<()> {
        let start = self.offset();
        let mut depth = 0usize;
        let mut braces = 0usize;
        while let Some(tok) = self.peek() {
            // Never run past the end of the enclosing block.
            if tok.is_punct('{') {
                braces += 1;
            } else if tok.is_punct('}') {
                if braces == 0 {
                    break;
                }
                braces -= 1;
            }
            if tok.is_punct(open) {
                depth += 1;
            } else if tok.is_punct(close) {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    self.pos += 1;
                    return Ok(());
                }
            }
            self.pos += 1;
        }
        Err(LintError::Parse {
            offset: start,
            message: format!("unbalanced `{open}`"),
        })
    }
}

fn check_braces(tokens: &[Token]) -> Result<()> {
    let mut open = Vec::new();
    for tok in tokens {
        if tok.is_punct('{') {
            open.push(tok.start);
        } else if tok.is_punct('}') && open.pop().is_none() {
            return Err(LintError::Parse {
                offset: tok.start,
                message: "unexpected `}`".into(),
            });
        }
    }
    match open.last() {
        Some(&offset) => Err(LintError::Parse {
            offset,
            message: "`{` is never closed".into(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
