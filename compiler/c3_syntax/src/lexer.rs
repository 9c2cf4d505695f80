//! Tokenizer for C3 source text.
//!
//! Trivia (whitespace and comments) is dropped. Unrecognised input never
//! stops lexing: the offending bytes are reported in [`Lexed::errors`]
//! and skipped.

use logos::Logos;

/// Error produced for input that forms no token.
#[derive(Clone, Debug, Default, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[default]
    #[error("unrecognized character")]
    UnexpectedCharacter,
    #[error("unterminated string literal")]
    UnterminatedString,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    #[regex(r"//[^\n]*")]
    LineComment,
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,
    #[regex(r"<\*([^*]|\*+[^*>])*\*+>")]
    DocComment,

    // Declaration keywords
    #[token("module")]
    Module,
    #[token("import")]
    Import,
    #[token("fn")]
    Fn,
    #[token("macro")]
    Macro,
    #[token("struct")]
    Struct,
    #[token("union")]
    Union,
    #[token("bitstruct")]
    Bitstruct,
    #[token("enum")]
    Enum,
    #[token("fault")]
    Fault,
    #[token("interface")]
    Interface,
    #[token("def")]
    Def,
    #[token("distinct")]
    Distinct,
    #[token("typedef")]
    Typedef,
    #[token("const")]
    Const,
    #[token("var")]
    Var,
    #[token("inline")]
    Inline,
    #[token("extern")]
    Extern,
    #[token("static")]
    Static,
    #[token("tlocal")]
    Tlocal,

    // Statement keywords
    #[token("return")]
    Return,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("foreach")]
    Foreach,
    #[token("foreach_r")]
    ForeachR,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("switch")]
    Switch,
    #[token("case")]
    Case,
    #[token("default")]
    Default,
    #[token("defer")]
    Defer,
    #[token("try")]
    Try,
    #[token("catch")]
    Catch,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("nextcase")]
    Nextcase,
    #[token("assert")]
    Assert,
    #[token("asm")]
    Asm,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // Identifiers
    #[regex(r"[_a-zA-Z][_a-zA-Z0-9]*")]
    Ident,
    #[regex(r"@[_a-zA-Z][_a-zA-Z0-9]*")]
    AtIdent,
    #[regex(r"\$[_a-zA-Z][_a-zA-Z0-9]*")]
    CtIdent,
    #[regex(r"#[_a-zA-Z][_a-zA-Z0-9]*")]
    HashIdent,

    // Literals
    #[regex(r"[0-9][0-9a-zA-Z_]*")]
    Number,
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,
    #[regex(r#""([^"\\\n]|\\.)*"#, |_| { Err::<(), LexError>(LexError::UnterminatedString) })]
    UnterminatedString,
    #[regex(r"`[^`]*`")]
    RawString,
    #[regex(r"'([^'\\\n]|\\.)*'")]
    Char,

    // Punctuation
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(<")]
    GenericOpen,
    #[token(">)")]
    GenericClose,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token("...")]
    Ellipsis,
    #[token("::")]
    ColonColon,
    #[token(":")]
    Colon,
    #[token("=")]
    Eq,
    #[token("*")]
    Star,
    #[token("&")]
    Amp,
    #[token("!")]
    Bang,
    #[token("?")]
    Question,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[regex(r"[-+/%|^~]|==|!=|<=|>=|&&|\|\||<<|>>|\+\+|--|->|=>|\+=|-=|\*=|/=|%=|&=|\|=|\^=|<<=|>>=|\?\?|!!|\?:|\+\+\+")]
    Operator,
}

impl TokenKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::LineComment | TokenKind::BlockComment | TokenKind::DocComment
        )
    }

    /// Any identifier-like token, including prefixed ones.
    #[inline]
    pub fn is_identifier(self) -> bool {
        matches!(
            self,
            TokenKind::Ident | TokenKind::AtIdent | TokenKind::CtIdent | TokenKind::HashIdent
        )
    }
}

/// A token with its byte span in the source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

/// A lexing error and the bytes it covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexErrorAt {
    pub error: LexError,
    pub start: usize,
    pub end: usize,
}

#[derive(Clone, Debug, Default)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexErrorAt>,
}

/// Tokenize `source`, dropping trivia.
pub fn lex(source: &str) -> Lexed {
    let mut lexed = Lexed::default();
    let mut lexer = TokenKind::lexer(source);
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) if kind.is_trivia() => {}
            Ok(kind) => lexed.tokens.push(Token {
                kind,
                start: span.start,
                end: span.end,
            }),
            Err(error) => lexed.errors.push(LexErrorAt {
                error,
                start: span.start,
                end: span.end,
            }),
        }
    }
    lexed
}

/// Naming class of a plain identifier, following C3's casing rules.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IdentClass {
    /// `foo`, `_bar`: variables and functions.
    Value,
    /// `Foo`, `FooBar`: user types.
    Type,
    /// `FOO`, `MAX_SIZE`: constants, enumerators, fault values.
    Const,
}

pub fn ident_class(text: &str) -> IdentClass {
    let trimmed = text.trim_start_matches('_');
    match trimmed.chars().next() {
        Some(c) if c.is_ascii_uppercase() => {
            if trimmed.chars().any(|c| c.is_ascii_lowercase()) {
                IdentClass::Type
            } else {
                IdentClass::Const
            }
        }
        _ => IdentClass::Value,
    }
}
