use std::fmt;

/// Line and column of a token's first character, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Character the lexer does not recognise, or an unterminated string
    Illegal,

    /// End of input. Returned forever once the input is exhausted.
    Eof,

    // Identifiers and literals
    /// Name of a binding or builtin
    ///
    /// # Examples
    /// ```text
    /// add
    /// new_adder
    /// ```
    Ident,

    /// Run of decimal digits. The numeric value is parsed by the parser.
    ///
    /// # Examples
    /// ```text
    /// 5
    /// 1000
    /// ```
    Int,

    /// String literal enclosed in double quotes. There are no escapes; the
    /// literal holds the text between the quotes unchanged.
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// "C:\path"
    /// ```
    String,

    // Operators
    /// Binding operator in `let` statements
    Assign,
    /// Addition or string concatenation
    Plus,
    /// Subtraction or negation
    Minus,
    /// Logical negation
    Bang,
    /// Multiplication
    Asterisk,
    /// Division
    Slash,

    /// Less than
    Lt,
    /// Greater than
    Gt,
    /// Equality
    Eq,
    /// Inequality
    NotEq,
    /// Less than or equal
    LtEq,
    /// Greater than or equal
    GtEq,

    // Delimiters
    Comma,
    Semicolon,
    /// Separates keys from values in hash literals
    Colon,

    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Keywords
    /// `fn`
    Function,
    /// `let`
    Let,
    /// `if`
    If,
    /// `else`
    Else,
    /// `return`
    Return,
    /// `true`
    True,
    /// `false`
    False,
}

impl TokenKind {
    /// Classify an identifier-shaped word against the keyword table.
    pub fn lookup_ident(word: &str) -> TokenKind {
        match word {
            "fn" => TokenKind::Function,
            "let" => TokenKind::Let,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "return" => TokenKind::Return,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => TokenKind::Ident,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Ident => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::String => "STRING",
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Bang => "!",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Function => "FUNCTION",
            TokenKind::Let => "LET",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lexical token.
///
/// `literal` holds the source text of the token, except for strings where it
/// holds the decoded content without the surrounding quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, position: Position) -> Self {
        Token {
            kind,
            literal: literal.into(),
            position,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
