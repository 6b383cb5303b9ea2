// domain/index/lexer.rs

use super::error::SourceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Keyword,
    Number,
    String,
    Rune,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Dot,
    Assign,
    Define,
    Operator,
    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        &source[self.start..self.end]
    }

    /// Short description for error messages.
    pub fn describe(&self, source: &str) -> String {
        match self.kind {
            TokenKind::Eof => "end of file".into(),
            // Inserted semicolons have no text of their own.
            TokenKind::Semicolon if self.start == self.end => "newline".into(),
            TokenKind::String | TokenKind::Rune | TokenKind::Number => {
                format!("literal {}", self.text(source))
            }
            _ => format!("'{}'", self.text(source)),
        }
    }

    pub fn is_keyword(&self, source: &str, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text(source) == keyword
    }
}

const KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

const BOM: char = '\u{feff}';

// Longest first so that prefix matching picks the maximal munch.
const OPERATORS: &[&str] = &[
    "<<=", ">>=", "&^=", "...", "&&", "||", "<-", "++", "--", "==", "!=", "<=", ">=", "+=",
    "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>", "&^", ":=", "+", "-", "*", "/", "%",
    "&", "|", "^", "<", ">", "=", "!", ":", "~",
];

/// Scanner for Go source text.
///
/// Produces the full token stream up front, including the semicolons Go
/// inserts automatically at line ends.
pub struct Lexer<'src> {
    source: &'src str,
    pos: usize,
    tokens: Vec<Token>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        // A single leading byte order mark is ignored; offsets still count it.
        let pos = if source.starts_with(BOM) { BOM.len_utf8() } else { 0 };
        Self {
            source,
            pos,
            tokens: Vec::new(),
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, SourceError> {
        loop {
            let Some(c) = self.peek() else {
                self.insert_semicolon(self.pos);
                self.push(TokenKind::Eof, self.pos, self.pos);
                return Ok(self.tokens);
            };
            let start = self.pos;

            match c {
                '\n' => {
                    self.insert_semicolon(start);
                    self.bump();
                }
                c if c.is_whitespace() => {
                    self.bump();
                }
                '/' if self.rest().starts_with("//") => {
                    // The newline itself is handled on the next iteration.
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.bump();
                    }
                }
                '/' if self.rest().starts_with("/*") => self.block_comment(start)?,
                '"' => self.interpreted_string(start)?,
                '`' => self.raw_string(start)?,
                '\'' => self.rune(start)?,
                c if c.is_ascii_digit() => self.number(start),
                '.' if self.nth(1).is_some_and(|c| c.is_ascii_digit()) => self.number(start),
                c if is_letter(c) => self.identifier(start),
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                '{' => self.single(TokenKind::LBrace),
                '}' => self.single(TokenKind::RBrace),
                '[' => self.single(TokenKind::LBracket),
                ']' => self.single(TokenKind::RBracket),
                ',' => self.single(TokenKind::Comma),
                ';' => self.single(TokenKind::Semicolon),
                '.' if !self.rest().starts_with("...") => self.single(TokenKind::Dot),
                _ => self.operator(start, c)?,
            }
        }
    }

    // ── Cursor helpers ────────────────────────────────────────────────────────

    fn rest(&self) -> &'src str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.tokens.push(Token { kind, start, end });
    }

    fn single(&mut self, kind: TokenKind) {
        let start = self.pos;
        self.bump();
        self.push(kind, start, self.pos);
    }

    /// Go's automatic semicolon rule: a line ending after an identifier,
    /// literal, one of `break continue fallthrough return`, `++`, `--`, or a
    /// closing bracket gets a semicolon.
    fn insert_semicolon(&mut self, at: usize) {
        let Some(last) = self.tokens.last() else {
            return;
        };
        let text = last.text(self.source);
        let needed = match last.kind {
            TokenKind::Ident
            | TokenKind::Number
            | TokenKind::String
            | TokenKind::Rune
            | TokenKind::RParen
            | TokenKind::RBrace
            | TokenKind::RBracket => true,
            TokenKind::Keyword => {
                matches!(text, "break" | "continue" | "fallthrough" | "return")
            }
            TokenKind::Operator => matches!(text, "++" | "--"),
            _ => false,
        };
        if needed {
            self.push(TokenKind::Semicolon, at, at);
        }
    }

    // ── Token scanners ────────────────────────────────────────────────────────

    fn block_comment(&mut self, start: usize) -> Result<(), SourceError> {
        let body = &self.rest()[2..];
        let Some(close) = body.find("*/") else {
            return Err(SourceError::UnterminatedComment {
                span: (start, 2).into(),
            });
        };
        // A general comment spanning lines acts like a newline.
        if body[..close].contains('\n') {
            self.insert_semicolon(start);
        }
        self.pos += 2 + close + 2;
        Ok(())
    }

    fn interpreted_string(&mut self, start: usize) -> Result<(), SourceError> {
        self.bump();
        loop {
            match self.bump() {
                Some('"') => break,
                Some('\\') => {
                    if self.peek().is_some_and(|c| c != '\n') {
                        self.bump();
                    }
                }
                Some('\n') | None => {
                    return Err(SourceError::UnterminatedString {
                        span: (start, 1).into(),
                    });
                }
                Some(_) => {}
            }
        }
        self.push(TokenKind::String, start, self.pos);
        Ok(())
    }

    fn raw_string(&mut self, start: usize) -> Result<(), SourceError> {
        let Some(close) = self.rest()[1..].find('`') else {
            return Err(SourceError::UnterminatedRawString {
                span: (start, 1).into(),
            });
        };
        self.pos += 1 + close + 1;
        self.push(TokenKind::String, start, self.pos);
        Ok(())
    }

    fn rune(&mut self, start: usize) -> Result<(), SourceError> {
        self.bump();
        loop {
            match self.bump() {
                Some('\'') => break,
                Some('\\') => {
                    if self.peek().is_some_and(|c| c != '\n') {
                        self.bump();
                    }
                }
                Some('\n') | None => {
                    return Err(SourceError::UnterminatedRune {
                        span: (start, 1).into(),
                    });
                }
                Some(_) => {}
            }
        }
        self.push(TokenKind::Rune, start, self.pos);
        Ok(())
    }

    fn number(&mut self, start: usize) {
        let hex = self.rest().starts_with("0x") || self.rest().starts_with("0X");
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                self.bump();
                let exponent = if hex {
                    matches!(c, 'p' | 'P')
                } else {
                    matches!(c, 'e' | 'E' | 'p' | 'P')
                };
                if exponent && matches!(self.peek(), Some('+' | '-')) {
                    self.bump();
                }
            } else {
                break;
            }
        }
        self.push(TokenKind::Number, start, self.pos);
    }

    fn identifier(&mut self, start: usize) {
        while self.peek().is_some_and(|c| is_letter(c) || c.is_numeric()) {
            self.bump();
        }
        let kind = if KEYWORDS.contains(&&self.source[start..self.pos]) {
            TokenKind::Keyword
        } else {
            TokenKind::Ident
        };
        self.push(kind, start, self.pos);
    }

    fn operator(&mut self, start: usize, c: char) -> Result<(), SourceError> {
        let Some(op) = OPERATORS.iter().find(|op| self.rest().starts_with(**op)) else {
            return Err(SourceError::UnexpectedChar {
                ch: c,
                span: (start, c.len_utf8()).into(),
            });
        };
        self.pos += op.len();
        let kind = match *op {
            "=" => TokenKind::Assign,
            ":=" => TokenKind::Define,
            _ => TokenKind::Operator,
        };
        self.push(kind, start, self.pos);
        Ok(())
    }
}

fn is_letter(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}
