//! Logos-based lexer for EGIF
//!
//! A single left-to-right scan producing a flat token sequence. Comments
//! are removed before lexing (see [`strip_comments`](super::strip_comments)),
//! whitespace is skipped here, and the first unrecognized character ends the
//! scan with a [`LexError`].

use logos::Logos;
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::errors::{LexError, LexErrorKind};

/// Kinds of EGIF tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[` opening a declaration
    LBracket,
    /// `]` closing a cut or a declaration
    RBracket,
    /// `~[`
    CutOpen,
    /// `*name`
    Defining,
    /// A bare name in argument position
    Bound,
    /// A bare name directly after `(`
    Relation,
    /// A quoted string
    Constant,
}

impl TokenKind {
    /// Short description for error messages
    pub fn describe(&self) -> &'static str {
        match self {
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::CutOpen => "'~['",
            Self::Defining => "defining label",
            Self::Bound => "bound label",
            Self::Relation => "relation name",
            Self::Constant => "quoted constant",
        }
    }
}

/// A token with its kind, text, and position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub range: TextRange,
}

impl Token<'_> {
    /// The name a label or constant token stands for: the `*` of a defining
    /// label is dropped and quoted strings are unescaped.
    pub fn value(&self) -> SmolStr {
        match self.kind {
            TokenKind::Defining => SmolStr::new(&self.text[1..]),
            TokenKind::Constant => unescape(&self.text[1..self.text.len() - 1]),
            _ => SmolStr::new(self.text),
        }
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    prev: Option<TokenKind>,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            prev: None,
            failed: false,
        }
    }

    fn error(&mut self, start: usize, kind: LexErrorKind) -> LexError {
        self.failed = true;
        let ch = self.inner.source()[start..].chars().next().unwrap_or('\0');
        LexError {
            ch,
            offset: TextSize::new(start as u32),
            kind,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let logos_token = self.inner.next()?;
        let span = self.inner.span();
        let text = self.inner.slice();

        let kind = match logos_token {
            Ok(LogosToken::LParen) => TokenKind::LParen,
            Ok(LogosToken::RParen) => TokenKind::RParen,
            Ok(LogosToken::LBracket) => TokenKind::LBracket,
            Ok(LogosToken::RBracket) => TokenKind::RBracket,
            Ok(LogosToken::CutOpen) => TokenKind::CutOpen,
            Ok(LogosToken::Defining) => TokenKind::Defining,
            Ok(LogosToken::String) => TokenKind::Constant,
            Ok(LogosToken::Name) if self.prev == Some(TokenKind::LParen) => TokenKind::Relation,
            Ok(LogosToken::Name) => TokenKind::Bound,
            Ok(LogosToken::UnterminatedString) => {
                return Some(Err(self.error(span.start, LexErrorKind::UnterminatedString)));
            }
            Err(()) => {
                return Some(Err(self.error(span.start, LexErrorKind::InvalidCharacter)));
            }
        };
        self.prev = Some(kind);

        let range = TextRange::new(TextSize::new(span.start as u32), TextSize::new(span.end as u32));
        Some(Ok(Token { kind, text, range }))
    }
}

/// Tokenize an entire string, stopping at the first error
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(input).collect()
}

/// Resolve backslash escapes: `\x` stands for `x`.
pub fn unescape(body: &str) -> SmolStr {
    if !body.contains('\\') {
        return SmolStr::new(body);
    }
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    SmolStr::new(out)
}

/// Logos token enum - mapped to [`TokenKind`] by [`Lexer`]
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum LogosToken {
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("~[")]
    CutOpen,

    #[regex(r"\*[_\p{XID_Start}]\p{XID_Continue}*")]
    Defining,

    #[regex(r"[_\p{XID_Start}]\p{XID_Continue}*")]
    Name,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[regex(r#""([^"\\]|\\.)*"#)]
    UnterminatedString,
}
