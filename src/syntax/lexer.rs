// src/syntax/lexer.rs
//! Token stream for Swift source. Trivia (whitespace, comments) is dropped,
//! so every token's `start` is already its first non-trivia offset.

use crate::error::{LintError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    /// Numeric or string literal; contents are irrelevant to type analysis.
    Literal,
    Arrow,
    Punct(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    /// A line break separates this token from the previous one.
    pub newline_before: bool,
}

impl Token {
    #[must_use]
    pub fn ident(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.ident() == Some(word)
    }
}

/// Splits source text into tokens.
///
/// # Errors
/// Returns `LintError::Parse` on an unterminated string literal or block comment.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    newline: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            newline: true,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>> {
        while let Some(c) = self.peek() {
            if c == '\n' {
                self.newline = true;
                self.pos += 1;
            } else if c.is_whitespace() {
                self.pos += c.len_utf8();
            } else if self.rest().starts_with("//") {
                self.skip_line_comment();
            } else if self.rest().starts_with("/*") {
                self.skip_block_comment()?;
            } else {
                self.lex_token(c)?;
            }
        }
        Ok(self.tokens)
    }

    fn rest(&self) -> &'a str {
        self.src.get(self.pos..).unwrap_or("")
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token {
            kind,
            start,
            end: self.pos,
            newline_before: self.newline,
        });
        self.newline = false;
    }

    fn skip_line_comment(&mut self) {
        match self.rest().find('\n') {
            Some(idx) => self.pos += idx,
            None => self.pos = self.src.len(),
        }
    }

    // Swift block comments nest.
    fn skip_block_comment(&mut self) -> Result<()> {
        let start = self.pos;
        let mut depth = 0usize;
        while self.pos < self.src.len() {
            let rest = self.rest();
            if rest.starts_with("/*") {
                depth += 1;
                self.pos += 2;
            } else if rest.starts_with("*/") {
                depth -= 1;
                self.pos += 2;
                if depth == 0 {
                    return Ok(());
                }
            } else {
                let c = self.peek().unwrap_or('\0');
                if c == '\n' {
                    self.newline = true;
                }
                self.pos += c.len_utf8().max(1);
            }
        }
        Err(unterminated(start, "block comment"))
    }

    fn lex_token(&mut self, c: char) -> Result<()> {
        let start = self.pos;
        if c == '_' || c.is_alphabetic() || c == '$' {
            let name = self.take_while(|ch| ch == '_' || ch == '$' || ch.is_alphanumeric());
            self.push(TokenKind::Ident(name), start);
        } else if c == '`' {
            self.pos += 1;
            let name = self.take_while(|ch| ch != '`' && ch != '\n');
            if self.peek() != Some('`') {
                return Err(unterminated(start, "escaped identifier"));
            }
            self.pos += 1;
            self.push(TokenKind::Ident(name), start);
        } else if c.is_ascii_digit() {
            self.skip_number();
            self.push(TokenKind::Literal, start);
        } else if c == '"' || (c == '#' && self.at_raw_string()) {
            self.skip_string()?;
            self.push(TokenKind::Literal, start);
        } else if (c == '/' || c == '#') && self.at_expression_start() && self.skip_regex() {
            self.push(TokenKind::Literal, start);
        } else if c == '-' && self.peek_at(1) == Some('>') {
            self.pos += 2;
            self.push(TokenKind::Arrow, start);
        } else {
            self.pos += c.len_utf8();
            self.push(TokenKind::Punct(c), start);
        }
        Ok(())
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let rest = self.rest();
        let len = rest.find(|ch: char| !pred(ch)).unwrap_or(rest.len());
        self.pos += len;
        rest[..len].to_string()
    }

    fn skip_number(&mut self) {
        while let Some(c) = self.peek() {
            let fraction = c == '.' && self.peek_at(1).is_some_and(|n| n.is_ascii_digit());
            if c.is_alphanumeric() || c == '_' || fraction {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
    }

    // Where an operand may begin, so `/` opens a regex rather than dividing.
    fn at_expression_start(&self) -> bool {
        const KEYWORDS: &[&str] = &["return", "case", "in", "try", "await", "where", "else"];
        match self.tokens.last().map(|t| &t.kind) {
            None | Some(TokenKind::Arrow) => true,
            Some(TokenKind::Punct(p)) => "([{,=:;!&|?^~+-*<>%".contains(*p),
            Some(TokenKind::Ident(word)) => KEYWORDS.contains(&word.as_str()),
            Some(TokenKind::Literal) => false,
        }
    }

    /// Skips `/.../` or `#/.../#` when it closes; otherwise leaves the cursor
    /// in place and returns false.
    fn skip_regex(&mut self) -> bool {
        let rest = self.rest();
        let hashes = rest.len() - rest.trim_start_matches('#').len();
        let body = &rest[hashes..];
        let Some(after_slash) = body.strip_prefix('/') else {
            return false;
        };
        if hashes == 0 && after_slash.starts_with(char::is_whitespace) {
            return false;
        }
        let terminator = format!("/{}", "#".repeat(hashes));
        let mut chars = after_slash.char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => {
                    chars.next();
                }
                '\n' if hashes == 0 => return false,
                '/' if after_slash[i..].starts_with(&terminator) => {
                    self.pos += hashes + 1 + i + terminator.len();
                    return true;
                }
                _ => {}
            }
        }
        false
    }

    fn at_raw_string(&self) -> bool {
        self.rest().trim_start_matches('#').starts_with('"')
    }

    fn skip_string(&mut self) -> Result<()> {
        let start = self.pos;
        let hashes = self.rest().len() - self.rest().trim_start_matches('#').len();
        self.pos += hashes;
        let multiline = self.rest().starts_with("\"\"\"");
        let quote = if multiline { "\"\"\"" } else { "\"" };
        self.pos += quote.len();
        let terminator = format!("{quote}{}", "#".repeat(hashes));
        let escape = format!("\\{}", "#".repeat(hashes));

        while self.pos < self.src.len() {
            let rest = self.rest();
            if rest.starts_with(&terminator) {
                self.pos += terminator.len();
                return Ok(());
            }
            if rest.starts_with(&escape) {
                self.pos += escape.len();
                if self.peek() == Some('(') {
                    self.skip_interpolation()?;
                } else if let Some(c) = self.peek() {
                    self.pos += c.len_utf8();
                }
                continue;
            }
            let c = self.peek().unwrap_or('\0');
            if c == '\n' && !multiline {
                break;
            }
            self.pos += c.len_utf8().max(1);
        }
        Err(unterminated(start, "string literal"))
    }

    // Positioned on the `(` of `\(...)`; string literals may nest inside.
    fn skip_interpolation(&mut self) -> Result<()> {
        let start = self.pos;
        let mut depth = 0usize;
        while let Some(c) = self.peek() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos += 1;
                        return Ok(());
                    }
                }
                '"' => {
                    self.skip_string()?;
                    continue;
                }
                _ => {}
            }
            self.pos += c.len_utf8();
        }
        Err(unterminated(start, "string interpolation"))
    }
}

fn unterminated(offset: usize, what: &str) -> LintError {
    LintError::Parse {
        offset,
        message: format!("unterminated {what}"),
    }
}

#[cfg(test)]
#[path = "lexer_test.rs"]
mod tests;
