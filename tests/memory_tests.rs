//! Every parse, successful or not, must hand back all the memory it took.
//!
//! A counting global allocator tracks live bytes on the current thread; each
//! case parses inside a measured window and checks the count returns to where
//! it started once the parser and the program are dropped.

use std::{
    alloc::{GlobalAlloc, Layout, System},
    cell::Cell,
};

use frontend::{
    ast::ast::free_program,
    errors::errors::ErrorImpl,
    lexer::{lexer::tokenize, tokens::Token},
    parser::parser::{parse_source, parse_tokens, MAX_ARGUMENTS},
};

struct CountingAllocator;

thread_local! {
    static LIVE_BYTES: Cell<isize> = const { Cell::new(0) };
}

fn record(delta: isize) {
    let _ = LIVE_BYTES.try_with(|live| live.set(live.get() + delta));
}

fn live_bytes() -> isize {
    LIVE_BYTES.with(|live| live.get())
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            record(layout.size() as isize);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        record(-(layout.size() as isize));
    }
}

#[global_allocator]
static ALLOCATOR: CountingAllocator = CountingAllocator;

/// Builds the lazily initialized lookup tables outside any measured window.
fn warm_up() {
    let (_, program) = parse_source("let x = 1", None);
    drop(program);
}

fn tokens_for(source: &str) -> Vec<Token> {
    tokenize(source.to_string(), Some("memory.lang".to_string())).unwrap()
}

/// Parses `tokens` and drops everything, returning the leaked byte count
/// and whether the parse failed.
fn measure(tokens: &[Token]) -> (isize, bool) {
    let before = live_bytes();
    let failed = {
        let (parser, program) = parse_tokens(tokens.to_vec());
        let failed = parser.had_error();
        free_program(program);
        drop(parser);
        failed
    };
    let after = live_bytes();

    (after - before, failed)
}

#[test]
fn test_parses_release_everything() {
    warm_up();

    let too_many = format!("f({})", vec!["1"; MAX_ARGUMENTS + 1].join(", "));
    let nested_too_many = format!("func g() {{ [({}), 2] }}", too_many);

    let cases: Vec<(&str, bool)> = vec![
        ("let x = 1 + 2 * 3", false),
        ("func add(a, b) { let s = a + b; s }", false),
        ("let f = fn(x) -> { x |> g }", false),
        ("match v { { a, b } -> a, E::V { x = 1 } -> x, _ -> 0 }", false),
        ("enum E { A, B { x, y } } import \"IO\"", false),
        ("let p = { a = 1, b } <- { a = [1, 2, 3] }", false),
        ("let n = person[\"name\"][0]", false),
        ("match x { 1 | 2 | 3 -> a, _ -> b }", false),
        ("match x { 1 | { a } -> a }", true),
        ("match x { { } -> 0 }", true),
        ("xs[1", true),
        ("(1 + 2", true),
        ("func f( { }", true),
        ("func f() { let x = 1", true),
        ("match x { 1 -> 2", true),
        ("match x { 1 2 }", true),
        ("fn(x) { x }", true),
        ("let x 5", true),
        ("let = 5", true),
        ("let a = 1; let b = 2; f(a, b", true),
        (too_many.as_str(), true),
        (nested_too_many.as_str(), true),
    ];

    for (source, should_fail) in cases {
        let tokens = tokens_for(source);
        let (leaked, failed) = measure(&tokens);

        assert_eq!(failed, should_fail, "unexpected outcome for {:?}", source);
        assert_eq!(leaked, 0, "{} bytes leaked parsing {:?}", leaked, source);
    }
}

#[test]
fn test_error_values_own_their_text() {
    warm_up();
    let tokens = tokens_for("let = 5");

    let before = live_bytes();
    let kind = {
        let (parser, _) = parse_tokens(tokens.clone());
        parser.first_error().map(|error| error.get_kind().clone())
    };
    assert!(matches!(kind, Some(ErrorImpl::MissingPunctuation { .. })));
    drop(kind);

    assert_eq!(live_bytes() - before, 0);
}
