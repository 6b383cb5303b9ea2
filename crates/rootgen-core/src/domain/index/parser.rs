// domain/index/parser.rs

use super::{
    error::SourceError,
    lexer::{Token, TokenKind},
    ImportLayout, IndexedDecl, IndexedImport,
};
use crate::domain::value_objects::DeclKind;

/// Everything the structural parser extracts from one file.
#[derive(Debug, Default)]
pub struct ParsedFile {
    pub package: String,
    pub imports: Vec<IndexedImport>,
    pub decls: Vec<IndexedDecl>,
    pub layout: ImportLayout,
}

/// Top-level parser over a token stream.
///
/// Only the outline of the file is understood: function bodies, types, and
/// initialisers are skipped by bracket matching.
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    file: ParsedFile,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            file: ParsedFile::default(),
        }
    }

    pub fn parse(mut self) -> Result<ParsedFile, SourceError> {
        self.skip_semicolons();
        self.package_clause()?;

        loop {
            self.skip_semicolons();
            if !self.peek().is_keyword(self.source, "import") {
                break;
            }
            self.import_decl()?;
        }

        loop {
            self.skip_semicolons();
            let tok = self.peek();
            match tok.kind {
                TokenKind::Eof => break,
                TokenKind::Keyword => match tok.text(self.source) {
                    "const" => self.value_decl(DeclKind::Constant)?,
                    "var" => self.value_decl(DeclKind::Variable)?,
                    "type" => self.value_decl(DeclKind::Type)?,
                    "func" => self.func_decl()?,
                    "import" => {
                        return Err(SourceError::StrayImport {
                            span: span_of(&tok),
                        });
                    }
                    _ => return Err(self.stray(tok)),
                },
                _ => return Err(self.stray(tok)),
            }
        }

        Ok(self.file)
    }

    // ── Token cursor ──────────────────────────────────────────────────────────

    fn peek(&self) -> Token {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> Token {
        let idx = (self.pos + n).min(self.tokens.len().saturating_sub(1));
        self.tokens.get(idx).copied().unwrap_or(Token {
            kind: TokenKind::Eof,
            start: self.source.len(),
            end: self.source.len(),
        })
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek();
        if tok.kind != TokenKind::Eof {
            self.pos += 1;
        }
        tok
    }

    fn skip_semicolons(&mut self) {
        while self.peek().kind == TokenKind::Semicolon {
            self.advance();
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, SourceError> {
        let tok = self.peek();
        if tok.kind == kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected, tok))
        }
    }

    /// A declaration ends with a semicolon or the end of the file.
    fn expect_decl_end(&mut self) -> Result<(), SourceError> {
        match self.peek().kind {
            TokenKind::Semicolon => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof => Ok(()),
            _ => {
                let tok = self.peek();
                Err(self.unexpected("newline or ';'", tok))
            }
        }
    }

    fn unexpected(&self, expected: &str, tok: Token) -> SourceError {
        SourceError::ExpectedToken {
            expected: expected.into(),
            found: tok.describe(self.source),
            span: span_of(&tok),
        }
    }

    fn stray(&self, tok: Token) -> SourceError {
        match tok.kind {
            TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket => {
                SourceError::UnexpectedClose {
                    close: tok.text(self.source).chars().next().unwrap_or(')'),
                    span: span_of(&tok),
                }
            }
            _ => SourceError::StrayStatement {
                found: tok.describe(self.source),
                span: span_of(&tok),
            },
        }
    }

    // ── Package and imports ───────────────────────────────────────────────────

    fn package_clause(&mut self) -> Result<(), SourceError> {
        let tok = self.peek();
        if !tok.is_keyword(self.source, "package") {
            return Err(SourceError::MissingPackage {
                span: span_of(&tok),
            });
        }
        self.advance();
        let name = self.expect(TokenKind::Ident, "package name")?;
        self.file.package = name.text(self.source).to_string();
        self.file.layout.package_end = name.end;
        self.expect_decl_end()
    }

    fn import_decl(&mut self) -> Result<(), SourceError> {
        self.advance();
        if self.peek().kind == TokenKind::LParen {
            let open = self.advance();
            loop {
                self.skip_semicolons();
                match self.peek().kind {
                    TokenKind::RParen => break,
                    TokenKind::Eof => {
                        return Err(SourceError::Unclosed {
                            open: '(',
                            span: span_of(&open),
                        });
                    }
                    _ => {
                        self.import_spec(true)?;
                    }
                }
            }
            let close = self.advance();
            self.file.layout.group_close = Some(close.start);
            self.file.layout.last_import_end = Some(close.end);
        } else {
            let end = self.import_spec(false)?;
            self.file.layout.group_close = None;
            self.file.layout.last_import_end = Some(end);
        }
        self.expect_decl_end()
    }

    /// `[name | . | _] "path"`; returns the end offset of the path literal.
    fn import_spec(&mut self, grouped: bool) -> Result<usize, SourceError> {
        let alias = match self.peek().kind {
            TokenKind::Ident => Some(self.advance().text(self.source).to_string()),
            TokenKind::Dot => {
                self.advance();
                Some(".".to_string())
            }
            _ => None,
        };
        let lit = self.expect(TokenKind::String, "import path")?;
        let raw = lit.text(self.source);
        let path = raw
            .get(1..raw.len().saturating_sub(1))
            .unwrap_or_default()
            .to_string();
        self.file.imports.push(IndexedImport {
            path,
            alias,
            offset: lit.start,
        });

        if grouped {
            match self.peek().kind {
                TokenKind::Semicolon => {
                    self.advance();
                }
                TokenKind::RParen => {}
                _ => {
                    let tok = self.peek();
                    return Err(self.unexpected("newline or ';'", tok));
                }
            }
        }
        Ok(lit.end)
    }

    // ── Declarations ──────────────────────────────────────────────────────────

    /// `const`, `var` and `type`, single or grouped.
    fn value_decl(&mut self, kind: DeclKind) -> Result<(), SourceError> {
        let keyword = self.advance();
        if self.peek().kind == TokenKind::LParen {
            self.advance();
            loop {
                self.skip_semicolons();
                match self.peek().kind {
                    TokenKind::RParen => break,
                    TokenKind::Eof => {
                        return Err(SourceError::Unclosed {
                            open: '(',
                            span: (keyword.end, 1).into(),
                        });
                    }
                    _ => self.value_spec(kind, keyword.start, true)?,
                }
            }
            self.advance();
            self.expect_decl_end()
        } else {
            self.value_spec(kind, keyword.start, false)
        }
    }

    fn value_spec(
        &mut self,
        kind: DeclKind,
        decl_start: usize,
        grouped: bool,
    ) -> Result<(), SourceError> {
        let first = self.expect(TokenKind::Ident, "identifier")?;
        let mut names = vec![first];
        if kind != DeclKind::Type {
            while self.peek().kind == TokenKind::Comma {
                self.advance();
                names.push(self.expect(TokenKind::Ident, "identifier")?);
            }
        }
        let end = self.skip_to_spec_end(grouped)?;
        let start = if grouped { first.start } else { decl_start };
        for name in names {
            self.record(kind, name.text(self.source).to_string(), start, end);
        }
        Ok(())
    }

    fn func_decl(&mut self) -> Result<(), SourceError> {
        let keyword = self.advance();
        let receiver = if self.peek().kind == TokenKind::LParen {
            Some(self.receiver_type()?)
        } else {
            None
        };
        let name = self.expect(TokenKind::Ident, "function name")?;
        let end = self.skip_to_spec_end(false)?;
        let name = name.text(self.source);
        match receiver {
            Some(recv) => self.record(
                DeclKind::Method,
                format!("{recv}.{name}"),
                keyword.start,
                end,
            ),
            None => self.record(DeclKind::Function, name.to_string(), keyword.start, end),
        }
        Ok(())
    }

    /// Base type name of a method receiver: the last identifier outside of
    /// type arguments, e.g. `List` for `(l *List[T])`.
    fn receiver_type(&mut self) -> Result<String, SourceError> {
        let open = self.advance();
        let mut depth = 0usize;
        let mut base = None;
        loop {
            let tok = self.advance();
            match tok.kind {
                TokenKind::LBracket | TokenKind::LParen => depth += 1,
                TokenKind::RBracket => depth = depth.saturating_sub(1),
                TokenKind::RParen if depth == 0 => break,
                TokenKind::RParen => depth -= 1,
                TokenKind::Ident if depth == 0 => base = Some(tok.text(self.source).to_string()),
                TokenKind::Eof => {
                    return Err(SourceError::Unclosed {
                        open: '(',
                        span: span_of(&open),
                    });
                }
                _ => {}
            }
        }
        base.ok_or_else(|| SourceError::ExpectedToken {
            expected: "receiver type".into(),
            found: "')'".into(),
            span: span_of(&open),
        })
    }

    /// Skip the remainder of a spec, honouring nested brackets.
    ///
    /// Stops at a semicolon outside brackets or at the end of input. Inside a
    /// group a bare `)` closes the group and is left unconsumed. Returns the
    /// end offset of the last token belonging to the spec.
    fn skip_to_spec_end(&mut self, grouped: bool) -> Result<usize, SourceError> {
        let mut stack: Vec<Token> = Vec::new();
        let mut end = self.tokens[..self.pos]
            .last()
            .map(|t| t.end)
            .unwrap_or_default();
        loop {
            let tok = self.peek();
            match tok.kind {
                TokenKind::Eof => {
                    if let Some(open) = stack.pop() {
                        return Err(SourceError::Unclosed {
                            open: open.text(self.source).chars().next().unwrap_or('('),
                            span: span_of(&open),
                        });
                    }
                    return Ok(end);
                }
                TokenKind::Semicolon if stack.is_empty() => {
                    self.advance();
                    return Ok(end);
                }
                TokenKind::RParen if stack.is_empty() && grouped => return Ok(end),
                TokenKind::LParen | TokenKind::LBrace | TokenKind::LBracket => stack.push(tok),
                TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket => {
                    let expected = match tok.kind {
                        TokenKind::RParen => TokenKind::LParen,
                        TokenKind::RBrace => TokenKind::LBrace,
                        _ => TokenKind::LBracket,
                    };
                    match stack.pop() {
                        Some(open) if open.kind == expected => {}
                        _ => {
                            return Err(SourceError::UnexpectedClose {
                                close: tok.text(self.source).chars().next().unwrap_or(')'),
                                span: span_of(&tok),
                            });
                        }
                    }
                }
                _ => {}
            }
            if tok.kind != TokenKind::Semicolon || tok.start != tok.end {
                end = tok.end;
            }
            self.advance();
        }
    }

    fn record(&mut self, kind: DeclKind, name: String, start: usize, end: usize) {
        if name == "_" {
            return;
        }
        self.file.decls.push(IndexedDecl {
            kind,
            name,
            start,
            end,
        });
    }
}

fn span_of(tok: &Token) -> miette::SourceSpan {
    (tok.start, tok.end - tok.start).into()
}
