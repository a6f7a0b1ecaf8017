//! Unit tests for the syntax tree and its printer.

use std::rc::Rc;

use rstest::rstest;

use crate::{
    lexer::tokens::{Token, TokenKind},
    parser::parser::parse_source,
    Position, Span,
};

use super::{
    ast::{free_node, free_program, Node, Program},
    expressions::{BinaryExpr, CallExpr, LiteralExpr, MemberExpr, PipelineExpr, PrefixExpr, SymbolExpr},
    printer::{render_node, NULL_NODE},
};

fn token(kind: TokenKind, value: &str) -> Token {
    let position = Position(0, Rc::new("test.lang".to_string()));
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

fn number(value: &str) -> Node {
    Node::Literal(LiteralExpr {
        token: token(TokenKind::Number, value),
    })
}

fn variable(name: &str) -> Node {
    Node::Variable(SymbolExpr {
        name: token(TokenKind::Identifier, name),
    })
}

fn binary(left: Node, kind: TokenKind, operator: &str, right: Node) -> Node {
    Node::Binary(BinaryExpr {
        left: Box::new(left),
        operator: token(kind, operator),
        right: Box::new(right),
    })
}

fn program(source: &str) -> Program {
    let (parser, program) = parse_source(source, None);
    assert!(!parser.had_error(), "{:?}", parser.first_error());
    program
}

fn render(source: &str) -> String {
    program(source).to_string()
}

#[rstest]
#[case("1 + 2 * 3", "1 + 2 * 3\n")]
#[case("(1 + 2) * 3", "(1 + 2) * 3\n")]
#[case("-x", "-x\n")]
#[case("f(a, b)", "f(a, b)\n")]
#[case("f()", "f()\n")]
#[case("a.b.c", "a.b.c\n")]
#[case("x |> f", "x |> f\n")]
#[case("a = 1", "a = 1\n")]
#[case("\"hi\"", "\"hi\"\n")]
#[case("true", "true\n")]
#[case("[1, 2]", "[1, 2]\n")]
#[case("[]", "[]\n")]
#[case("{ a = 1, b = 2 }", "{ a = 1, b = 2 }\n")]
#[case("{ }", "{ }\n")]
#[case("p <- { a = 1 }", "p <- { a = 1 }\n")]
#[case("{ a, b }", "{ a, b }\n")]
#[case("Shape::Empty", "Shape::Empty\n")]
#[case("Shape::Circle { r = 1 }", "Shape::Circle { r = 1 }\n")]
#[case("let x = 1", "let x = 1\n")]
#[case("let! x = 1", "let! x = 1\n")]
#[case("import \"IO\"", "import \"IO\"\n")]
#[case("import IO", "import IO\n")]
#[case("person[\"name\"]", "person[\"name\"]\n")]
#[case("xs[i + 1].y", "xs[i + 1].y\n")]
#[case("a - (b - c)", "a - (b - c)\n")]
#[case("-(a + b)", "-(a + b)\n")]
fn test_render_single_line(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(render(source), expected);
}

#[test]
fn test_render_function() {
    assert_eq!(
        render("func add(a, b) { let s = a + b; s }"),
        "func add(a, b) { let s = a + b; s }\n"
    );
    assert_eq!(render("func noop() { }"), "func noop() { }\n");
}

#[test]
fn test_render_lambda() {
    assert_eq!(render("fn(x) -> { x * 2 }"), "fn(x) -> { x * 2 }\n");
}

#[test]
fn test_render_match() {
    assert_eq!(
        render("match x { 1 -> \"one\", n -> n }"),
        "match x {\n  1 -> \"one\",\n  n -> n,\n}\n"
    );
}

#[test]
fn test_render_match_alternatives() {
    assert_eq!(
        render("match x { 1 | 2 -> a, _ -> b }"),
        "match x {\n  1 | 2 -> a,\n  _ -> b,\n}\n"
    );
}

#[test]
fn test_render_enum() {
    assert_eq!(
        render("enum Shape { Circle { r }, Rect { w, h }, Empty }"),
        "enum Shape {\n  Circle { r },\n  Rect { w, h },\n  Empty\n}\n"
    );
}

#[test]
fn test_render_program_one_statement_per_line() {
    assert_eq!(render("let a = 1; a + 1"), "let a = 1\na + 1\n");
    assert_eq!(render(""), "");
}

#[test]
fn test_render_absent_node() {
    assert_eq!(render_node(None), NULL_NODE);
    assert_eq!(render_node(Some(&Node::Error)), "<error>");
}

#[test]
fn test_render_hand_built_tree() {
    let node = Node::Binary(BinaryExpr {
        left: Box::new(number("1")),
        operator: token(TokenKind::Star, "*"),
        right: Box::new(Node::Variable(SymbolExpr {
            name: token(TokenKind::Identifier, "y"),
        })),
    });

    assert_eq!(render_node(Some(&node)), "1 * y");
}

#[rstest]
#[case(
    binary(binary(number("1"), TokenKind::Plus, "+", number("2")), TokenKind::Star, "*", number("3")),
    "(1 + 2) * 3"
)]
#[case(
    binary(number("1"), TokenKind::Star, "*", binary(number("2"), TokenKind::Plus, "+", number("3"))),
    "1 * (2 + 3)"
)]
#[case(
    binary(number("1"), TokenKind::Dash, "-", binary(number("2"), TokenKind::Dash, "-", number("3"))),
    "1 - (2 - 3)"
)]
#[case(
    binary(binary(number("1"), TokenKind::Dash, "-", number("2")), TokenKind::Dash, "-", number("3")),
    "1 - 2 - 3"
)]
#[case(
    binary(variable("a"), TokenKind::Or, "||", binary(variable("b"), TokenKind::And, "&&", variable("c"))),
    "a || (b && c)"
)]
#[case(
    binary(binary(variable("a"), TokenKind::Less, "<", variable("b")), TokenKind::Equals, "==", variable("c")),
    "a < b == c"
)]
#[case(
    Node::Unary(PrefixExpr {
        operator: token(TokenKind::Dash, "-"),
        right: Box::new(binary(variable("a"), TokenKind::Plus, "+", variable("b"))),
    }),
    "-(a + b)"
)]
#[case(
    Node::PropertyAccess(MemberExpr {
        object: Box::new(binary(variable("a"), TokenKind::Plus, "+", variable("b"))),
        property: token(TokenKind::Identifier, "len"),
    }),
    "(a + b).len"
)]
#[case(
    Node::Call(CallExpr {
        callee: Box::new(Node::Pipeline(PipelineExpr {
            left: Box::new(variable("x")),
            right: Box::new(variable("f")),
        })),
        arguments: vec![number("1")],
    }),
    "(x |> f)(1)"
)]
#[case(
    Node::Pipeline(PipelineExpr {
        left: Box::new(variable("x")),
        right: Box::new(Node::Pipeline(PipelineExpr {
            left: Box::new(variable("f")),
            right: Box::new(variable("g")),
        })),
    }),
    "x |> (f |> g)"
)]
fn test_render_adds_needed_parentheses(#[case] node: Node, #[case] expected: &str) {
    let rendered = render_node(Some(&node));
    assert_eq!(rendered, expected);

    // The rendering parses back to the same operator structure.
    let (parser, reparsed) = parse_source(&rendered, None);
    assert!(!parser.had_error(), "{:?}", parser.first_error());
    assert_eq!(reparsed.len(), 1);
}

#[test]
fn test_children_in_source_order() {
    let parsed = program("f(1, 2)");
    let Node::ExpressionStatement(stmt) = &parsed.statements[0] else {
        panic!("expected an expression statement");
    };

    let children = stmt.expression.children();
    assert_eq!(children.len(), 3);
    assert_eq!(render_node(Some(children[0])), "f");
    assert_eq!(render_node(Some(children[2])), "2");
}

#[rstest]
#[case("x", 2)]
#[case("let x = 1 + 2", 4)]
#[case("func f(a) { a; a }", 5)]
#[case("match x { 1 -> a, 2 -> b }", 6)]
#[case("enum E { A, B { x } }", 1)]
#[case("p <- { a = 1, b = 2 }", 5)]
#[case("xs[i + 1]", 6)]
#[case("match x { 1 | 2 -> a, _ -> b }", 7)]
fn test_node_count(#[case] source: &str, #[case] count: usize) {
    assert_eq!(program(source).node_count(), count);
}

#[test]
fn test_is_statement() {
    let parsed = program("let x = 1; func f() { }; x");

    assert!(parsed.iter().all(Node::is_statement));
    assert!(!number("1").is_statement());
}

#[test]
fn test_free_handles_absent_and_partial_trees() {
    free_node(None);
    free_node(Some(number("1")));
    free_node(Some(Node::Error));

    let (_, partial) = parse_source("let a = 1; let b = (1 +", None);
    assert_eq!(partial.len(), 1);
    free_program(partial);
    free_program(Program::default());
}

#[test]
fn test_drop_releases_hand_built_chain() {
    let mut chain = number("0");
    for _ in 0..100_000 {
        chain = binary(chain, TokenKind::Plus, "+", number("1"));
    }

    assert_eq!(chain.node_count(), 200_001);
    free_node(Some(chain));
}
