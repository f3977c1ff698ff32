// tests/parser_tests.rs

use monkey_lang::ast::{BinOp, Expr, Position, Statement, TokenKind, UnaryOp};
use monkey_lang::lexer::Lexer;
use monkey_lang::parser::{ParseError, Parser, parse};
use pretty_assertions::assert_eq;

fn parse_ok(source: &str) -> Vec<Statement> {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    assert!(
        parser.errors().is_empty(),
        "unexpected errors for {:?}: {:?}",
        source,
        parser.errors()
    );
    program.statements
}

fn parse_expr(source: &str) -> Expr {
    let mut statements = parse_ok(source);
    assert_eq!(statements.len(), 1, "expected one statement in {:?}", source);
    match statements.remove(0) {
        Statement::Expression(expr) => expr,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

fn error_messages(source: &str) -> Vec<String> {
    let (_, errors) = parse(source);
    errors.iter().map(ToString::to_string).collect()
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_let_statements() {
    let statements = parse_ok("let x = 5;\nlet y = true;\nlet foobar = y;");
    let bindings: Vec<(String, Expr)> = statements
        .into_iter()
        .map(|statement| match statement {
            Statement::Let { name, value } => (name, value),
            other => panic!("expected let statement, got {:?}", other),
        })
        .collect();

    assert_eq!(
        bindings,
        vec![
            ("x".to_string(), Expr::Integer(5)),
            ("y".to_string(), Expr::Boolean(true)),
            ("foobar".to_string(), Expr::Identifier("y".to_string())),
        ]
    );
}

#[test]
fn test_return_statements() {
    let statements = parse_ok("return 5;\nreturn x;\nreturn add(1, 2);");
    assert_eq!(statements.len(), 3);
    assert!(statements.iter().all(|s| matches!(s, Statement::Return(_))));
    assert_eq!(statements[0], Statement::Return(Expr::Integer(5)));
}

#[test]
fn test_trailing_tokens_before_semicolon_are_skipped() {
    let (program, errors) = parse("let x = 5 6 7; x");
    assert!(errors.is_empty());
    assert_eq!(program.to_string(), "let x = 5;x");
}

#[test]
fn test_expression_semicolons_are_optional() {
    let (program, errors) = parse("let a = 1; a\na + 1");
    assert!(errors.is_empty());
    assert_eq!(program.statements.len(), 3);
    assert_eq!(program.to_string(), "let a = 1;a(a + 1)");
}

#[test]
fn test_let_without_semicolon_runs_to_end() {
    let (program, errors) = parse("let a = 1\nb");
    assert!(errors.is_empty());
    assert_eq!(program.to_string(), "let a = 1;");
}

#[test]
fn test_return_inside_block_stops_at_brace() {
    let (program, errors) = parse("fn() { return 1 }");
    assert!(errors.is_empty());
    assert_eq!(program.to_string(), "fn() { return 1; }");
}

// ============================================================================
// Literals and simple expressions
// ============================================================================

#[test]
fn test_literal_expressions() {
    assert_eq!(parse_expr("foobar;"), Expr::Identifier("foobar".to_string()));
    assert_eq!(parse_expr("5;"), Expr::Integer(5));
    assert_eq!(parse_expr("true"), Expr::Boolean(true));
    assert_eq!(parse_expr("false"), Expr::Boolean(false));
    assert_eq!(
        parse_expr(r#""hello world""#),
        Expr::String("hello world".to_string())
    );
}

#[test]
fn test_string_rendering_reparses() {
    let source = r#""x\" + "y""#;
    let (program, errors) = parse(source);
    assert!(errors.is_empty());
    assert_eq!(program.to_string(), r#"("x\" + "y")"#);

    let (reparsed, errors) = parse(&program.to_string());
    assert!(errors.is_empty());
    assert_eq!(reparsed, program);
}

#[test]
fn test_prefix_expressions() {
    let test_cases = vec![
        ("!5;", UnaryOp::Not, Expr::Integer(5)),
        ("-15;", UnaryOp::Negate, Expr::Integer(15)),
        ("!true;", UnaryOp::Not, Expr::Boolean(true)),
        ("-x", UnaryOp::Negate, Expr::Identifier("x".to_string())),
    ];

    for (input, expected_op, expected_right) in test_cases {
        match parse_expr(input) {
            Expr::Prefix { op, right } => {
                assert_eq!(op, expected_op, "Failed for input: {}", input);
                assert_eq!(*right, expected_right, "Failed for input: {}", input);
            }
            other => panic!("expected prefix expression for {}, got {:?}", input, other),
        }
    }
}

#[test]
fn test_infix_expressions() {
    let test_cases = vec![
        ("5 + 5;", BinOp::Add),
        ("5 - 5;", BinOp::Subtract),
        ("5 * 5;", BinOp::Multiply),
        ("5 / 5;", BinOp::Divide),
        ("5 > 5;", BinOp::GreaterThan),
        ("5 < 5;", BinOp::LessThan),
        ("5 >= 5;", BinOp::GreaterEqual),
        ("5 <= 5;", BinOp::LessEqual),
        ("5 == 5;", BinOp::Equal),
        ("5 != 5;", BinOp::NotEqual),
    ];

    for (input, expected_op) in test_cases {
        match parse_expr(input) {
            Expr::Infix { op, left, right } => {
                assert_eq!(op, expected_op, "Failed for input: {}", input);
                assert_eq!(*left, Expr::Integer(5));
                assert_eq!(*right, Expr::Integer(5));
            }
            other => panic!("expected infix expression for {}, got {:?}", input, other),
        }
    }
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
fn test_operator_precedence() {
    let test_cases = vec![
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        ("a <= b == b >= a", "((a <= b) == (b >= a))"),
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
        ("3 > 5 == false", "((3 > 5) == false)"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("2 / (5 + 5)", "(2 / (5 + 5))"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("!(true == true)", "(!(true == true))"),
        ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
        ),
        (
            "add(a + b + c * d / f + g)",
            "add((((a + b) + ((c * d) / f)) + g))",
        ),
        (
            "a * [1, 2, 3, 4][b * c] * d",
            "((a * ([1, 2, 3, 4][(b * c)])) * d)",
        ),
        (
            "add(a * b[2], b[1], 2 * [1, 2][1])",
            "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
        ),
    ];

    for (input, expected) in test_cases {
        let (program, errors) = parse(input);
        assert!(errors.is_empty(), "errors for {}: {:?}", input, errors);
        assert_eq!(program.to_string(), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_every_infix_operator_pair() {
    // (operator, binding power); equal powers associate to the left
    let operators = [
        ("==", 1),
        ("!=", 1),
        ("<", 2),
        (">", 2),
        ("<=", 2),
        (">=", 2),
        ("+", 3),
        ("-", 3),
        ("*", 4),
        ("/", 4),
    ];

    for (first, first_power) in operators {
        for (second, second_power) in operators {
            let input = format!("x {} y {} z", first, second);
            let expected = if first_power >= second_power {
                format!("((x {} y) {} z)", first, second)
            } else {
                format!("(x {} (y {} z))", first, second)
            };

            let (program, errors) = parse(&input);
            assert!(errors.is_empty(), "errors for {}: {:?}", input, errors);
            assert_eq!(program.to_string(), expected, "Failed for input: {}", input);
        }
    }
}

// ============================================================================
// Compound expressions
// ============================================================================

#[test]
fn test_if_expression() {
    match parse_expr("if (x < y) { x }") {
        Expr::If {
            condition,
            consequence,
            alternative,
        } => {
            assert_eq!(condition.to_string(), "(x < y)");
            assert_eq!(
                consequence.statements,
                vec![Statement::Expression(Expr::Identifier("x".to_string()))]
            );
            assert!(alternative.is_none());
        }
        other => panic!("expected if expression, got {:?}", other),
    }
}

#[test]
fn test_if_else_expression() {
    let expr = parse_expr("if (x < y) { x } else { y }");
    assert!(matches!(
        &expr,
        Expr::If {
            alternative: Some(_),
            ..
        }
    ));
    assert_eq!(expr.to_string(), "if (x < y) { x } else { y }");
}

#[test]
fn test_function_literal() {
    match parse_expr("fn(x, y) { x + y; }") {
        Expr::Function(literal) => {
            assert_eq!(literal.parameters, vec!["x", "y"]);
            assert_eq!(literal.body.statements.len(), 1);
            assert_eq!(literal.body.to_string(), "(x + y)");
            assert_eq!(literal.to_string(), "fn(x, y) { (x + y) }");
        }
        other => panic!("expected function literal, got {:?}", other),
    }
}

#[test]
fn test_function_parameters() {
    let test_cases = vec![
        ("fn() {};", vec![]),
        ("fn(x) {};", vec!["x"]),
        ("fn(x, y, z) {};", vec!["x", "y", "z"]),
    ];

    for (input, expected) in test_cases {
        match parse_expr(input) {
            Expr::Function(literal) => assert_eq!(literal.parameters, expected),
            other => panic!("expected function literal, got {:?}", other),
        }
    }
}

#[test]
fn test_call_expression() {
    match parse_expr("add(1, 2 * 3, 4 + 5);") {
        Expr::Call {
            function,
            arguments,
        } => {
            assert_eq!(*function, Expr::Identifier("add".to_string()));
            let rendered: Vec<String> = arguments.iter().map(ToString::to_string).collect();
            assert_eq!(rendered, vec!["1", "(2 * 3)", "(4 + 5)"]);
        }
        other => panic!("expected call expression, got {:?}", other),
    }
}

#[test]
fn test_immediately_called_function() {
    let (program, errors) = parse("fn(x) { x }(5)");
    assert!(errors.is_empty());
    assert_eq!(program.to_string(), "fn(x) { x }(5)");
}

#[test]
fn test_array_literal() {
    match parse_expr("[1, 2 * 2, 3 + 3]") {
        Expr::Array(elements) => {
            assert_eq!(elements.len(), 3);
            assert_eq!(elements[0], Expr::Integer(1));
            assert_eq!(elements[1].to_string(), "(2 * 2)");
        }
        other => panic!("expected array literal, got {:?}", other),
    }
    assert_eq!(parse_expr("[]"), Expr::Array(vec![]));
}

#[test]
fn test_index_expression() {
    match parse_expr("myArray[1 + 1]") {
        Expr::Index { left, index } => {
            assert_eq!(*left, Expr::Identifier("myArray".to_string()));
            assert_eq!(index.to_string(), "(1 + 1)");
        }
        other => panic!("expected index expression, got {:?}", other),
    }
}

#[test]
fn test_hash_literals() {
    let expr = parse_expr(r#"{"one": 1, "two": 2, "three": 3}"#);
    match &expr {
        Expr::Hash(pairs) => {
            let keys: Vec<String> = pairs.iter().map(|(k, _)| k.to_string()).collect();
            assert_eq!(keys, vec![r#""one""#, r#""two""#, r#""three""#]);
        }
        other => panic!("expected hash literal, got {:?}", other),
    }
    assert_eq!(expr.to_string(), r#"{"one": 1, "two": 2, "three": 3}"#);

    assert_eq!(parse_expr("{}"), Expr::Hash(vec![]));
    assert_eq!(
        parse_expr(r#"{"one": 0 + 1, true: 10 - 8}"#).to_string(),
        r#"{"one": (0 + 1), true: (10 - 8)}"#
    );
}

#[test]
fn test_hash_literal_trailing_comma() {
    assert_eq!(parse_expr("{1: 2,}").to_string(), "{1: 2}");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_errors_are_collected() {
    let source = "let x 5;\nlet = 10;\nlet 838383;";
    assert_eq!(
        error_messages(source),
        vec![
            "line 1, column 7: expected next token to be =, got INT instead",
            "line 2, column 5: expected next token to be IDENT, got = instead",
            "line 2, column 5: no prefix parse function for = found",
            "line 3, column 5: expected next token to be IDENT, got INT instead",
        ]
    );
}

#[test]
fn test_error_variants() {
    let (_, errors) = parse("let = 1");
    assert_eq!(
        errors[0],
        ParseError::UnexpectedToken {
            expected: TokenKind::Ident,
            found: TokenKind::Assign,
            position: Position::new(1, 5),
        }
    );

    let (_, errors) = parse(")");
    assert_eq!(
        errors,
        vec![ParseError::NoPrefixRule {
            kind: TokenKind::RParen,
            position: Position::new(1, 1),
        }]
    );
}

#[test]
fn test_integer_overflow_is_an_error() {
    assert_eq!(
        error_messages("92233720368547758070"),
        vec!["line 1, column 1: could not parse 92233720368547758070 as integer"]
    );
}

#[test]
fn test_unclosed_block() {
    assert_eq!(
        error_messages("if (x) { x"),
        vec!["line 1, column 11: expected next token to be }, got EOF instead"]
    );
}

#[test]
fn test_function_parameters_must_be_identifiers() {
    let messages = error_messages("fn(1) {}");
    assert_eq!(
        messages[0],
        "line 1, column 4: expected next token to be IDENT, got INT instead"
    );
}

#[test]
fn test_illegal_token_has_no_prefix_rule() {
    let messages = error_messages("1 + @");
    assert_eq!(
        messages,
        vec!["line 1, column 5: no prefix parse function for ILLEGAL found"]
    );
}

#[test]
fn test_parse_continues_after_error() {
    let (program, errors) = parse("let = 1; let y = 2;");
    assert!(!errors.is_empty());
    let names: Vec<&str> = program
        .statements
        .iter()
        .filter_map(|s| match s {
            Statement::Let { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["y"]);
}
