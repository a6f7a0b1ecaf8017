//! Integration tests for the whole front end.
//!
//! These tests drive the public API end to end: source text through the
//! lexer and parser, then back out through the printer.

use std::rc::Rc;

use frontend::{
    ast::{
        ast::{free_program, Node},
        printer::render_node,
    },
    errors::errors::ErrorImpl,
    lexer::{
        lexer::tokenize,
        source::TokenSource,
        tokens::{Token, TokenKind, RESERVED_LOOKUP},
    },
    parser::parser::{parse, parse_source, parse_tokens, Parser},
    Position, Span,
};
use proptest::prelude::*;

const PROGRAM: &str = r#"
import "IO"

enum Shape { Circle { r }, Rect { w, h }, Empty }

// Area of any shape.
func area(shape) {
    match shape {
        Shape::Circle { r } -> 3.14 * r * r,
        Shape::Rect { w, h } -> w * h,
        other -> 0,
    }
}

let shapes = [Shape::Circle { r = 2 }, Shape::Rect { w = 1, h = 3 }]
let total = shapes |> map(fn(s) -> { area(s) }) |> sum
let! config = { verbose = false, depth = 2 };
let updated = config <- { depth = config.depth + 1 }
IO.print(total)
"#;

#[test]
fn test_parse_full_program() {
    let (parser, program) = parse_source(PROGRAM, Some("main.lang".to_string()));

    assert!(!parser.had_error(), "{:?}", parser.first_error());
    assert_eq!(program.len(), 8);

    let kinds: Vec<&str> = program
        .iter()
        .map(|stmt| match stmt {
            Node::ImportStatement(_) => "import",
            Node::EnumStatement(_) => "enum",
            Node::FunctionStatement(_) => "func",
            Node::LetStatement(_) => "let",
            Node::LetBangStatement(_) => "let!",
            Node::ExpressionStatement(_) => "expr",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, vec!["import", "enum", "func", "let", "let", "let!", "let", "expr"]);

    let Node::FunctionStatement(func) = &program.statements[2] else {
        panic!("expected a function");
    };
    let Node::MatchStatement(stmt) = &func.body[0] else {
        panic!("expected a match statement");
    };
    assert_eq!(stmt.arms.len(), 3);

    free_program(program);
}

#[test]
fn test_end_to_end_arithmetic() {
    let (parser, program) = parse_source("let x = 1 + 2 * 3", None);

    assert!(!parser.had_error());
    assert_eq!(program.to_string(), "let x = 1 + 2 * 3\n");

    let Node::LetStatement(decl) = &program.statements[0] else {
        panic!("expected a let statement");
    };
    let Node::Binary(sum) = decl.initializer.as_ref() else {
        panic!("expected a binary expression");
    };
    assert_eq!(sum.operator.kind, TokenKind::Plus);
    assert!(matches!(sum.right.as_ref(), Node::Binary(product) if product.operator.kind == TokenKind::Star));
}

#[test]
fn test_tokenize_then_parse() {
    let tokens = tokenize("f(x) + 1".to_string(), Some("t.lang".to_string())).unwrap();
    let (parser, program) = parse_tokens(tokens);

    assert!(!parser.had_error());
    assert_eq!(render_node(program.statements.first()), "f(x) + 1");
}

#[test]
fn test_partial_program_on_error() {
    let (parser, program) = parse_source("let a = 1\nlet b = 2\nfunc f( { }\nlet c = 3", None);

    assert!(parser.had_error());
    assert_eq!(program.len(), 2);
    assert!(matches!(
        parser.first_error().map(|error| error.get_kind()),
        Some(ErrorImpl::MissingPunctuation { .. })
    ));
}

#[test]
fn test_long_chain_parses_and_frees() {
    let source = format!("let total = 0{}", " + 1".repeat(100_000));
    let (parser, program) = parse_source(&source, None);

    assert!(!parser.had_error(), "{:?}", parser.first_error());
    assert_eq!(program.len(), 1);
    assert_eq!(program.node_count(), 200_002);

    free_program(program);
}

#[test]
fn test_index_and_match_alternatives() {
    let source = r#"
let name = person["name"]
match name {
    "ann" | "bob" -> known,
    _ -> scores[name] + 1,
}
"#;
    let (parser, program) = parse_source(source, None);

    assert!(!parser.had_error(), "{:?}", parser.first_error());
    assert_eq!(program.len(), 2);
    assert_eq!(
        program.to_string(),
        "let name = person[\"name\"]\nmatch name {\n  \"ann\" | \"bob\" -> known,\n  _ -> scores[name] + 1,\n}\n"
    );
}

/// Hands out a fixed list of tokens front to back.
struct ReplaySource {
    tokens: Vec<Token>,
}

impl TokenSource for ReplaySource {
    fn next_token(&mut self) -> Token {
        if self.tokens.is_empty() {
            Token::eof(Position::null())
        } else {
            self.tokens.remove(0)
        }
    }
}

fn synthetic(kind: TokenKind, value: &str) -> Token {
    let position = Position(0, Rc::new("synthetic".to_string()));
    Token {
        kind,
        value: value.to_string(),
        span: Span {
            start: position.clone(),
            end: position,
        },
        line: 1,
    }
}

#[test]
fn test_custom_token_source() {
    let source = ReplaySource {
        tokens: vec![
            synthetic(TokenKind::Identifier, "a"),
            synthetic(TokenKind::Star, "*"),
            synthetic(TokenKind::Number, "2"),
        ],
    };

    let mut parser = Parser::new(source);
    let program = parse(&mut parser);

    assert!(!parser.had_error());
    assert_eq!(program.to_string(), "a * 2\n");
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}".prop_filter("keywords are not identifiers", |name| {
        !RESERVED_LOOKUP.contains_key(name.as_str())
    })
}

fn expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        "[0-9]{1,4}",
        identifier(),
        "[a-z ]{0,8}".prop_map(|text| format!("{:?}", text)),
        Just("true".to_string()),
    ];

    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(vec!["+", "-", "*", "/", "<", "==", "&&", "||", "|>"]),
                inner.clone()
            )
                .prop_map(|(left, op, right)| format!("{} {} {}", left, op, right)),
            inner.clone().prop_map(|e| format!("({})", e)),
            inner.clone().prop_map(|e| format!("-{}", e)),
            (identifier(), prop::collection::vec(inner.clone(), 0..3))
                .prop_map(|(callee, args)| format!("{}({})", callee, args.join(", "))),
            (inner.clone(), identifier()).prop_map(|(object, property)| format!("({}).{}", object, property)),
            (identifier(), inner).prop_map(|(object, index)| format!("{}[{}]", object, index)),
        ]
    })
}

proptest! {
    #[test]
    fn printed_expressions_parse_to_the_same_tree(source in expression()) {
        let (parser, first) = parse_source(&source, None);
        prop_assert!(!parser.had_error(), "{:?} failed: {:?}", source, parser.first_error());

        let printed = first.to_string();
        let (reparser, second) = parse_source(&printed, None);
        prop_assert!(!reparser.had_error(), "{:?} failed: {:?}", printed, reparser.first_error());

        prop_assert_eq!(first, second);
    }
}
