use std::{mem, rc::Rc};

use crate::{
    ast::{
        BinOp, Block, Expr, FunctionLiteral, Position, Program, Statement, Token, TokenKind,
        UnaryOp,
    },
    lexer::Lexer,
};

/// Binding power of an infix or postfix token, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    /// `==` `!=`
    Equals,
    /// `<` `>` `<=` `>=`
    LessGreater,
    /// `+` `-`
    Sum,
    /// `*` `/`
    Product,
    /// `-x` `!x`
    Prefix,
    /// `f(x)`
    Call,
    /// `a[i]`
    Index,
}

impl Precedence {
    fn of(kind: TokenKind) -> Precedence {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
            TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => {
                Precedence::LessGreater
            }
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
            TokenKind::LParen => Precedence::Call,
            TokenKind::LBracket => Precedence::Index,
            _ => Precedence::Lowest,
        }
    }
}

/// Syntax errors collected while parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The next token was not the one the grammar requires
    #[error("{position}: expected next token to be {expected}, got {found} instead")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        position: Position,
    },

    /// No expression can start with this token
    #[error("{position}: no prefix parse function for {kind} found")]
    NoPrefixRule { kind: TokenKind, position: Position },

    /// Digit run that does not fit in a 64-bit signed integer
    #[error("{position}: could not parse {literal} as integer")]
    InvalidInteger { literal: String, position: Position },
}

type PrefixRule = fn(&mut Parser) -> Option<Expr>;
type InfixRule = fn(&mut Parser, Expr) -> Option<Expr>;

fn prefix_rule(kind: TokenKind) -> Option<PrefixRule> {
    let rule: PrefixRule = match kind {
        TokenKind::Ident => Parser::parse_identifier,
        TokenKind::Int => Parser::parse_integer,
        TokenKind::String => Parser::parse_string,
        TokenKind::True | TokenKind::False => Parser::parse_boolean,
        TokenKind::Bang | TokenKind::Minus => Parser::parse_prefix,
        TokenKind::LParen => Parser::parse_grouped,
        TokenKind::If => Parser::parse_if,
        TokenKind::Function => Parser::parse_function,
        TokenKind::LBracket => Parser::parse_array,
        TokenKind::LBrace => Parser::parse_hash,
        _ => return None,
    };
    Some(rule)
}

fn infix_rule(kind: TokenKind) -> Option<InfixRule> {
    let rule: InfixRule = match kind {
        TokenKind::Plus
        | TokenKind::Minus
        | TokenKind::Asterisk
        | TokenKind::Slash
        | TokenKind::Lt
        | TokenKind::Gt
        | TokenKind::LtEq
        | TokenKind::GtEq
        | TokenKind::Eq
        | TokenKind::NotEq => Parser::parse_infix,
        TokenKind::LParen => Parser::parse_call,
        TokenKind::LBracket => Parser::parse_index,
        _ => return None,
    };
    Some(rule)
}

/// Pratt parser over a token stream.
///
/// Parsing never stops at the first mistake: a production that does not
/// match records a [`ParseError`] and yields nothing, and parsing resumes at
/// the next statement.
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    peek_token: Token,
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let current_token = lexer.next_token();
        let peek_token = lexer.next_token();
        Parser {
            lexer,
            current_token,
            peek_token,
            errors: Vec::new(),
        }
    }

    /// Syntax errors recorded so far, in source order.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.current_token = mem::replace(&mut self.peek_token, next);
    }

    fn current_is(&self, kind: TokenKind) -> bool {
        self.current_token.is(kind)
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek_token.is(kind)
    }

    fn error(&mut self, error: ParseError) {
        tracing::debug!(%error, "syntax error");
        self.errors.push(error);
    }

    /// Advances onto the next token if it has the required kind, otherwise
    /// records an error and leaves the cursor where it is.
    fn expect_peek(&mut self, expected: TokenKind) -> Option<()> {
        if self.peek_is(expected) {
            self.advance();
            Some(())
        } else {
            self.error(ParseError::UnexpectedToken {
                expected,
                found: self.peek_token.kind,
                position: self.peek_token.position,
            });
            None
        }
    }

    /// Parse a complete program
    pub fn parse_program(&mut self) -> Program {
        let mut statements = vec![];

        while !self.current_is(TokenKind::Eof) {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.advance();
        }

        Program { statements }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.current_token.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        self.expect_peek(TokenKind::Ident)?;
        let name = self.current_token.literal.clone();

        self.expect_peek(TokenKind::Assign)?;
        self.advance();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.finish_statement();

        Some(Statement::Let { name, value })
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        self.advance(); // consume `return`

        let value = self.parse_expression(Precedence::Lowest)?;
        self.finish_statement();

        Some(Statement::Return(value))
    }

    /// Discards anything left before the terminating `;` and consumes it.
    /// Stops short of a closing `}` so enclosing blocks stay intact.
    fn finish_statement(&mut self) {
        while !self.peek_is(TokenKind::Semicolon)
            && !self.peek_is(TokenKind::RBrace)
            && !self.peek_is(TokenKind::Eof)
        {
            self.advance();
            tracing::trace!(token = %self.current_token.literal, "discarding trailing token");
        }
        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let expr = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }

        Some(Statement::Expression(expr))
    }

    pub fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        let Some(prefix) = prefix_rule(self.current_token.kind) else {
            self.error(ParseError::NoPrefixRule {
                kind: self.current_token.kind,
                position: self.current_token.position,
            });
            return None;
        };

        let mut left = prefix(self)?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < Precedence::of(self.peek_token.kind)
        {
            let Some(infix) = infix_rule(self.peek_token.kind) else {
                return Some(left);
            };
            self.advance();
            left = infix(self, left)?;
        }

        Some(left)
    }

    fn parse_identifier(&mut self) -> Option<Expr> {
        Some(Expr::Identifier(self.current_token.literal.clone()))
    }

    fn parse_integer(&mut self) -> Option<Expr> {
        match self.current_token.literal.parse::<i64>() {
            Ok(n) => Some(Expr::Integer(n)),
            Err(_) => {
                self.error(ParseError::InvalidInteger {
                    literal: self.current_token.literal.clone(),
                    position: self.current_token.position,
                });
                None
            }
        }
    }

    fn parse_string(&mut self) -> Option<Expr> {
        Some(Expr::String(self.current_token.literal.clone()))
    }

    fn parse_boolean(&mut self) -> Option<Expr> {
        Some(Expr::Boolean(self.current_is(TokenKind::True)))
    }

    fn parse_prefix(&mut self) -> Option<Expr> {
        let op = if self.current_is(TokenKind::Bang) {
            UnaryOp::Not
        } else {
            UnaryOp::Negate
        };
        self.advance();

        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expr::Prefix {
            op,
            right: Box::new(right),
        })
    }

    fn parse_infix(&mut self, left: Expr) -> Option<Expr> {
        let op = match self.current_token.kind {
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Subtract,
            TokenKind::Asterisk => BinOp::Multiply,
            TokenKind::Slash => BinOp::Divide,
            TokenKind::Lt => BinOp::LessThan,
            TokenKind::Gt => BinOp::GreaterThan,
            TokenKind::LtEq => BinOp::LessEqual,
            TokenKind::GtEq => BinOp::GreaterEqual,
            TokenKind::Eq => BinOp::Equal,
            _ => BinOp::NotEqual,
        };
        let precedence = Precedence::of(self.current_token.kind);
        self.advance();

        let right = self.parse_expression(precedence)?;
        Some(Expr::Infix {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_grouped(&mut self) -> Option<Expr> {
        self.advance(); // consume `(`
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Some(expr)
    }

    fn parse_if(&mut self) -> Option<Expr> {
        self.expect_peek(TokenKind::LParen)?;
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;

        self.expect_peek(TokenKind::LBrace)?;
        let consequence = self.parse_block()?;

        let alternative = if self.peek_is(TokenKind::Else) {
            self.advance();
            self.expect_peek(TokenKind::LBrace)?;
            Some(self.parse_block()?)
        } else {
            None
        };

        Some(Expr::If {
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    /// Parses statements up to the closing `}`. The current token must be
    /// the opening `{`; on return it is the closing `}`.
    fn parse_block(&mut self) -> Option<Block> {
        let mut statements = vec![];
        self.advance();

        while !self.current_is(TokenKind::RBrace) {
            if self.current_is(TokenKind::Eof) {
                self.error(ParseError::UnexpectedToken {
                    expected: TokenKind::RBrace,
                    found: TokenKind::Eof,
                    position: self.current_token.position,
                });
                return None;
            }
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.advance();
        }

        Some(Block { statements })
    }

    fn parse_function(&mut self) -> Option<Expr> {
        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_function_parameters()?;

        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block()?;

        Some(Expr::Function(Rc::new(FunctionLiteral { parameters, body })))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<String>> {
        let mut parameters = vec![];

        if self.peek_is(TokenKind::RParen) {
            self.advance();
            return Some(parameters);
        }

        self.expect_peek(TokenKind::Ident)?;
        parameters.push(self.current_token.literal.clone());

        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.expect_peek(TokenKind::Ident)?;
            parameters.push(self.current_token.literal.clone());
        }

        self.expect_peek(TokenKind::RParen)?;
        Some(parameters)
    }

    /// Comma separated expressions up to `end`, which is consumed.
    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expr>> {
        let mut list = vec![];

        if self.peek_is(end) {
            self.advance();
            return Some(list);
        }

        self.advance();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.advance();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end)?;
        Some(list)
    }

    fn parse_call(&mut self, function: Expr) -> Option<Expr> {
        let arguments = self.parse_expression_list(TokenKind::RParen)?;
        Some(Expr::Call {
            function: Box::new(function),
            arguments,
        })
    }

    fn parse_array(&mut self) -> Option<Expr> {
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        Some(Expr::Array(elements))
    }

    fn parse_hash(&mut self) -> Option<Expr> {
        let mut pairs = vec![];

        while !self.peek_is(TokenKind::RBrace) {
            self.advance();
            let key = self.parse_expression(Precedence::Lowest)?;

            self.expect_peek(TokenKind::Colon)?;
            self.advance();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));

            if !self.peek_is(TokenKind::RBrace) {
                self.expect_peek(TokenKind::Comma)?;
            }
        }

        self.expect_peek(TokenKind::RBrace)?;
        Some(Expr::Hash(pairs))
    }

    fn parse_index(&mut self, left: Expr) -> Option<Expr> {
        self.advance(); // consume `[`
        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RBracket)?;

        Some(Expr::Index {
            left: Box::new(left),
            index: Box::new(index),
        })
    }
}

/// Parse a source text into a program and the syntax errors found in it.
///
/// A non-empty error list means the program may be incomplete and should not
/// be evaluated.
///
/// # Examples
///
/// ```
/// use monkey_lang::parser::parse;
///
/// let (program, errors) = parse("a + b * c");
/// assert!(errors.is_empty());
/// assert_eq!(program.to_string(), "(a + (b * c))");
/// ```
pub fn parse(source: &str) -> (Program, Vec<ParseError>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    (program, parser.into_errors())
}
