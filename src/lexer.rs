use crate::ast::{Position, Token, TokenKind};

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        if self.current_char() == Some('\n') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.position += 1;
    }

    fn here(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r') = self.current_char() {
            self.advance();
        }
    }

    fn read_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if !accept(ch) {
                break;
            }
            result.push(ch);
            self.advance();
        }
        result
    }

    /// Reads a string literal. Everything up to the closing quote is content,
    /// backslashes included. Returns `Err` with the consumed text when the
    /// input ends first.
    fn read_string(&mut self) -> Result<String, String> {
        self.advance(); // Consume opening quote
        let content = self.read_while(|c| c != '"');

        if self.current_char() == Some('"') {
            self.advance();
            Ok(content)
        } else {
            Err(format!("\"{}", content))
        }
    }

    /// Emits `single`, or `double` when the next character is `=`.
    fn one_or_two(&mut self, single: TokenKind, double: TokenKind) -> (TokenKind, String) {
        let first = self.current_char().unwrap_or_default();
        self.advance();
        if self.current_char() == Some('=') {
            self.advance();
            (double, format!("{}=", first))
        } else {
            (single, first.to_string())
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let start = self.here();

        let (kind, literal) = match self.current_char() {
            None => (TokenKind::Eof, String::new()),
            Some('=') => self.one_or_two(TokenKind::Assign, TokenKind::Eq),
            Some('!') => self.one_or_two(TokenKind::Bang, TokenKind::NotEq),
            Some('<') => self.one_or_two(TokenKind::Lt, TokenKind::LtEq),
            Some('>') => self.one_or_two(TokenKind::Gt, TokenKind::GtEq),
            Some('"') => match self.read_string() {
                Ok(content) => (TokenKind::String, content),
                Err(rest) => {
                    tracing::warn!(
                        line = start.line,
                        column = start.column,
                        "unterminated string literal"
                    );
                    (TokenKind::Illegal, rest)
                }
            },
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                let word = self.read_while(|c| c.is_ascii_alphabetic() || c == '_');
                (TokenKind::lookup_ident(&word), word)
            }
            Some(ch) if ch.is_ascii_digit() => {
                (TokenKind::Int, self.read_while(|c| c.is_ascii_digit()))
            }
            Some(ch) => {
                let kind = match ch {
                    '+' => TokenKind::Plus,
                    '-' => TokenKind::Minus,
                    '*' => TokenKind::Asterisk,
                    '/' => TokenKind::Slash,
                    ',' => TokenKind::Comma,
                    ';' => TokenKind::Semicolon,
                    ':' => TokenKind::Colon,
                    '(' => TokenKind::LParen,
                    ')' => TokenKind::RParen,
                    '{' => TokenKind::LBrace,
                    '}' => TokenKind::RBrace,
                    '[' => TokenKind::LBracket,
                    ']' => TokenKind::RBracket,
                    _ => {
                        tracing::warn!(
                            line = start.line,
                            column = start.column,
                            character = %ch,
                            "illegal character"
                        );
                        TokenKind::Illegal
                    }
                };
                self.advance();
                (kind, ch.to_string())
            }
        };

        Token::new(kind, literal, start)
    }
}

/// Yields every token up to, but not including, `EOF`.
impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (!token.is(TokenKind::Eof)).then_some(token)
    }
}

#[test]
fn test_keywords() {
    let kinds: Vec<TokenKind> = Lexer::new("fn let if else return true false")
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Function,
            TokenKind::Let,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::Return,
            TokenKind::True,
            TokenKind::False,
        ]
    );
}

#[test]
fn test_eof_is_sticky() {
    let mut lexer = Lexer::new("x");
    assert_eq!(lexer.next_token().kind, TokenKind::Ident);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}
