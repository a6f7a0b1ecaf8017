use crate::{
    ast::{
        ast::Node,
        statements::{
            EnumDeclStmt, EnumVariant, ExpressionStmt, FnDeclStmt, ImportStmt, MatchArm, MatchStmt,
            VarDeclStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    parser::{expr::parse_expr, lookups::BindingPower},
    Position,
};

use super::parser::Parser;

/// Dispatches on the current token's keyword; anything without a statement
/// handler is parsed as an expression statement. A trailing `;` is optional.
pub fn parse_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let stmt = match parser.rules().stmt_handler(parser.current_token_kind()) {
        Some(handler) => handler(parser)?,
        None => parse_expression_stmt(parser)?,
    };

    parser.match_kind(TokenKind::Semicolon);

    Ok(stmt)
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let expression = parse_expr(parser, BindingPower::Default)?;

    Ok(Node::ExpressionStatement(ExpressionStmt {
        expression: Box::new(expression),
    }))
}

/// `let name = value` or `let! name = value`.
pub fn parse_let_stmt(parser: &mut Parser) -> Result<Node, Error> {
    log::trace!("parse_let_stmt: next token = {:?}", parser.current_token_kind());
    let keyword = parser.advance();

    let name = parser.expect(TokenKind::Identifier, "variable name after 'let'")?;
    parser.expect(TokenKind::Assignment, "'=' after variable name")?;
    let initializer = Box::new(parse_expr(parser, BindingPower::Default)?);

    let decl = VarDeclStmt { name, initializer };
    if keyword.kind == TokenKind::LetBang {
        Ok(Node::LetBangStatement(decl))
    } else {
        Ok(Node::LetStatement(decl))
    }
}

/// `func name(a, b) { body }`
pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Node, Error> {
    log::trace!("parse_fn_decl_stmt: next token = {:?}", parser.current_token_kind());
    parser.advance();

    let name = parser.expect(TokenKind::Identifier, "function name after 'func'")?;

    parser.expect(TokenKind::OpenParen, "'(' after function name")?;
    let parameters = parse_parameter_list(parser)?;

    parser.expect(TokenKind::OpenCurly, "'{' for function body")?;
    let body = parse_block(parser)?;

    Ok(Node::FunctionStatement(FnDeclStmt {
        name,
        parameters,
        body,
    }))
}

/// `match value { pattern | pattern -> expression, ... }`
///
/// Patterns go through the ordinary expression parser, so literals,
/// variables, `_`, destructuring patterns and enum constructors all work.
pub fn parse_match_stmt(parser: &mut Parser) -> Result<Node, Error> {
    log::trace!("parse_match_stmt: next token = {:?}", parser.current_token_kind());
    parser.advance();

    let scrutinee = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::OpenCurly, "'{' after match value")?;

    let mut arms = Vec::new();
    while !parser.check(TokenKind::CloseCurly) && !parser.had_error() {
        if !parser.has_tokens() {
            return Err(Error::new(ErrorImpl::UnterminatedMatch, parser.get_position()));
        }

        let patterns = parse_arm_patterns(parser)?;
        if parser.had_error() {
            break;
        }
        parser.expect(TokenKind::Arrow, "'->' after pattern in match arm")?;
        let expression = parse_expr(parser, BindingPower::Default)?;

        parser.match_kind(TokenKind::Comma);

        arms.push(MatchArm { patterns, expression });
    }

    parser.expect_closing(TokenKind::CloseCurly, "'}' after match arms")?;

    Ok(Node::MatchStatement(MatchStmt {
        scrutinee: Box::new(scrutinee),
        arms,
    }))
}

/// One or more patterns separated by `|`.
///
/// A `{ }` pattern binds nothing and is rejected. Destructuring and struct
/// patterns bind names, so they may not appear among alternatives.
fn parse_arm_patterns(parser: &mut Parser) -> Result<Vec<Node>, Error> {
    let mut patterns = Vec::new();

    loop {
        let position = parser.get_position();
        let pattern = parse_expr(parser, BindingPower::Default)?;

        if matches!(&pattern, Node::StructLiteral(literal) if literal.fields.is_empty()) {
            return Err(invalid_pattern(position, "an empty `{ }` pattern binds nothing"));
        }

        let binds_fields = matches!(pattern, Node::DestructurePattern(_) | Node::StructLiteral(_));
        let alternative = !patterns.is_empty() || parser.check(TokenKind::Pipe);
        if binds_fields && alternative {
            return Err(invalid_pattern(
                position,
                "struct patterns cannot be combined with `|`",
            ));
        }

        patterns.push(pattern);

        if parser.had_error() || !parser.match_kind(TokenKind::Pipe) {
            return Ok(patterns);
        }
    }
}

/// `import "path"` or `import name`
pub fn parse_import_stmt(parser: &mut Parser) -> Result<Node, Error> {
    parser.advance();

    let path = if parser.check(TokenKind::String) {
        parser.advance()
    } else {
        parser.expect(TokenKind::Identifier, "module path after 'import'")?
    };

    Ok(Node::ImportStatement(ImportStmt { path }))
}

/// `enum Name { Plain, WithFields { a, b }, }`
pub fn parse_enum_decl_stmt(parser: &mut Parser) -> Result<Node, Error> {
    log::trace!("parse_enum_decl_stmt: next token = {:?}", parser.current_token_kind());
    parser.advance();

    let name = parser.expect(TokenKind::Identifier, "enum name after 'enum'")?;
    parser.expect(TokenKind::OpenCurly, "'{' after enum name")?;

    let mut variants = Vec::new();
    while !parser.check(TokenKind::CloseCurly) {
        if !parser.has_tokens() {
            return Err(unterminated_block(parser));
        }

        let variant_name = parser.expect(TokenKind::Identifier, "variant name")?;

        let mut fields = Vec::new();
        if parser.match_kind(TokenKind::OpenCurly) {
            while !parser.check(TokenKind::CloseCurly) {
                fields.push(parser.expect(TokenKind::Identifier, "field name")?);

                if !parser.match_kind(TokenKind::Comma) {
                    break;
                }
            }
            parser.expect(TokenKind::CloseCurly, "'}' after variant fields")?;
        }

        variants.push(EnumVariant {
            name: variant_name,
            fields,
        });

        if !parser.match_kind(TokenKind::Comma) {
            break;
        }
    }

    if !parser.has_tokens() {
        return Err(unterminated_block(parser));
    }
    parser.expect(TokenKind::CloseCurly, "'}' after enum variants")?;

    Ok(Node::EnumStatement(EnumDeclStmt { name, variants }))
}

/// Parses statements up to and including the closing `}`; the opening `{`
/// has already been consumed.
pub fn parse_block(parser: &mut Parser) -> Result<Vec<Node>, Error> {
    log::trace!("parse_block: next token = {:?}", parser.current_token_kind());
    let mut statements = Vec::new();

    while !parser.check(TokenKind::CloseCurly) && !parser.had_error() {
        if !parser.has_tokens() {
            return Err(unterminated_block(parser));
        }
        statements.push(parse_stmt(parser)?);
    }

    parser.expect_closing(TokenKind::CloseCurly, "'}' after block")?;
    Ok(statements)
}

/// Parses comma separated parameter names up to and including the closing
/// `)`; the opening `(` has already been consumed.
pub fn parse_parameter_list(parser: &mut Parser) -> Result<Vec<Token>, Error> {
    let mut parameters = Vec::new();

    while !parser.check(TokenKind::CloseParen) {
        parameters.push(parser.expect(TokenKind::Identifier, "parameter name")?);

        if !parser.match_kind(TokenKind::Comma) && !parser.check(TokenKind::CloseParen) {
            return Err(parser.missing("',' or ')'"));
        }
    }

    parser.advance();
    Ok(parameters)
}

fn invalid_pattern(position: Position, message: &str) -> Error {
    Error::new(
        ErrorImpl::InvalidPattern {
            message: message.to_string(),
        },
        position,
    )
}

fn unterminated_block(parser: &Parser) -> Error {
    Error::new(
        ErrorImpl::UnterminatedBlock { expected: String::from("'}'") },
        parser.get_position(),
    )
}
