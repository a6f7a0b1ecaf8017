use crate::{
    ast::{
        ast::Node,
        expressions::{
            AssignmentExpr, BinaryExpr, CallExpr, DestructurePattern, EnumConstructorExpr,
            GroupingExpr, IndexExpr, LambdaExpr, ListExpr, LiteralExpr, MemberExpr, PipelineExpr, PrefixExpr,
            StructField, StructInitExpr, StructUpdateExpr, SymbolExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{
    lookups::BindingPower,
    parser::{Parser, MAX_ARGUMENTS},
    stmt::{parse_block, parse_parameter_list},
};

/// Precedence climbing over the parser's rule table.
///
/// Consumes the lead token and applies its prefix behavior, then keeps
/// folding infix behaviors into the left operand while the current token
/// binds tighter than `bp`.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Node, Error> {
    let rules = parser.rules();

    let lead = parser.advance();
    let Some(nud) = rules.get(lead.kind).nud else {
        return Err(Error::new(ErrorImpl::UnexpectedToken { token: lead.value }, lead.span.start));
    };

    let mut left = nud(parser, lead)?;

    while parser.has_tokens() && !parser.had_error() && rules.binding_power(parser.current_token_kind()) > bp {
        let operator = parser.advance();
        let Some(led) = rules.get(operator.kind).led else {
            return Err(Error::new(ErrorImpl::UnexpectedInfix { token: operator.value }, operator.span.start));
        };

        left = led(parser, left, operator)?;
    }

    Ok(left)
}

pub fn parse_literal_expr(_parser: &mut Parser, token: Token) -> Result<Node, Error> {
    Ok(Node::Literal(LiteralExpr { token }))
}

pub fn parse_symbol_expr(_parser: &mut Parser, token: Token) -> Result<Node, Error> {
    Ok(Node::Variable(SymbolExpr { name: token }))
}

pub fn parse_wildcard_expr(_parser: &mut Parser, _underscore: Token) -> Result<Node, Error> {
    Ok(Node::Wildcard)
}

pub fn parse_bool_expr(_parser: &mut Parser, token: Token) -> Result<Node, Error> {
    Ok(Node::BoolLiteral(token.kind == TokenKind::True))
}

/// A character the lexer could not recognise. The diagnostic is recorded
/// right away and an error node takes the token's place.
pub fn parse_error_token(parser: &mut Parser, token: Token) -> Result<Node, Error> {
    parser.report(Error::new(ErrorImpl::UnrecognisedToken { token: token.value }, token.span.start));
    Ok(Node::Error)
}

pub fn parse_prefix_expr(parser: &mut Parser, operator: Token) -> Result<Node, Error> {
    let right = parse_expr(parser, BindingPower::Unary)?;

    Ok(Node::Unary(PrefixExpr {
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Node, operator: Token) -> Result<Node, Error> {
    let bp = parser.rules().binding_power(operator.kind);
    let right = parse_expr(parser, bp)?;

    Ok(Node::Binary(BinaryExpr {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_pipeline_expr(parser: &mut Parser, left: Node, operator: Token) -> Result<Node, Error> {
    let bp = parser.rules().binding_power(operator.kind);
    let right = parse_expr(parser, bp)?;

    Ok(Node::Pipeline(PipelineExpr {
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_assignment_expr(parser: &mut Parser, left: Node, operator: Token) -> Result<Node, Error> {
    let Node::Variable(target) = &left else {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: operator.value,
                message: String::from("only a variable can be assigned to"),
            },
            operator.span.start,
        ));
    };
    let name = target.name.clone();

    // Right associative: `a = b = c` assigns `b = c` to `a`.
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Node::Assignment(AssignmentExpr {
        name,
        value: Box::new(value),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser, _open: Token) -> Result<Node, Error> {
    let expression = parse_expr(parser, BindingPower::Default)?;
    parser.expect_closing(TokenKind::CloseParen, "')'")?;

    Ok(Node::Grouping(GroupingExpr {
        expression: Box::new(expression),
    }))
}

/// Parses the arguments of a call. Past `MAX_ARGUMENTS` the error is
/// reported, collection stops, and the call built so far is still returned.
pub fn parse_call_expr(parser: &mut Parser, callee: Node, _open: Token) -> Result<Node, Error> {
    let mut arguments = vec![];

    if !parser.check(TokenKind::CloseParen) {
        loop {
            if arguments.len() >= MAX_ARGUMENTS {
                let error = Error::new(ErrorImpl::TooManyArguments { max: MAX_ARGUMENTS }, parser.get_position());
                parser.report(error);

                return Ok(Node::Call(CallExpr {
                    callee: Box::new(callee),
                    arguments,
                }));
            }

            arguments.push(parse_expr(parser, BindingPower::Default)?);

            if parser.had_error() || !parser.match_kind(TokenKind::Comma) {
                break;
            }
        }
    }

    parser.expect_closing(TokenKind::CloseParen, "')' after arguments")?;

    Ok(Node::Call(CallExpr {
        callee: Box::new(callee),
        arguments,
    }))
}

/// `object[index]`; any expression may index.
pub fn parse_index_expr(parser: &mut Parser, object: Node, _open: Token) -> Result<Node, Error> {
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect_closing(TokenKind::CloseBracket, "']' after index")?;

    Ok(Node::IndexAccess(IndexExpr {
        object: Box::new(object),
        index: Box::new(index),
    }))
}

pub fn parse_member_expr(parser: &mut Parser, object: Node, _dot: Token) -> Result<Node, Error> {
    let property = parser.expect(TokenKind::Identifier, "property name after '.'")?;

    Ok(Node::PropertyAccess(MemberExpr {
        object: Box::new(object),
        property,
    }))
}

/// `Enum::Variant` with an optional `{ field = value, ... }` payload.
pub fn parse_enum_constructor_expr(parser: &mut Parser, left: Node, operator: Token) -> Result<Node, Error> {
    let Node::Variable(enum_name) = &left else {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: operator.value,
                message: String::from("expected an enum name before '::'"),
            },
            operator.span.start,
        ));
    };
    let enum_name = enum_name.name.clone();

    let variant = parser.expect(TokenKind::Identifier, "variant name after '::'")?;

    let fields = if parser.match_kind(TokenKind::OpenCurly) {
        parse_struct_fields(parser, vec![])?
    } else {
        vec![]
    };

    Ok(Node::EnumConstructor(EnumConstructorExpr {
        enum_name,
        variant,
        fields,
    }))
}

pub fn parse_struct_update_expr(parser: &mut Parser, base: Node, _arrow: Token) -> Result<Node, Error> {
    parser.expect(TokenKind::OpenCurly, "'{' after '<-'")?;
    let fields = parse_struct_fields(parser, vec![])?;

    Ok(Node::StructUpdate(StructUpdateExpr {
        base: Box::new(base),
        fields,
    }))
}

pub fn parse_list_expr(parser: &mut Parser, _open: Token) -> Result<Node, Error> {
    let mut elements = vec![];

    while !parser.check(TokenKind::CloseBracket) {
        elements.push(parse_expr(parser, BindingPower::Default)?);

        if parser.had_error() || !parser.match_kind(TokenKind::Comma) {
            break;
        }
    }

    parser.expect_closing(TokenKind::CloseBracket, "',' or ']' in list literal")?;

    Ok(Node::ListLiteral(ListExpr { elements }))
}

/// `{` starts either a struct literal (`{ name = value, ... }`) or, when the
/// first key is not followed by `=`, a destructuring pattern (`{ a, b }`).
pub fn parse_brace_expr(parser: &mut Parser, _open: Token) -> Result<Node, Error> {
    if parser.match_kind(TokenKind::CloseCurly) {
        return Ok(Node::StructLiteral(StructInitExpr { fields: vec![] }));
    }

    let first = parser.expect(TokenKind::Identifier, "field name")?;

    if parser.match_kind(TokenKind::Assignment) {
        let value = parse_expr(parser, BindingPower::Default)?;
        let mut fields = vec![StructField { key: first, value }];

        if !parser.had_error() && parser.match_kind(TokenKind::Comma) {
            fields = parse_struct_fields(parser, fields)?;
        } else {
            parser.expect_closing(TokenKind::CloseCurly, "'}' after struct fields")?;
        }

        return Ok(Node::StructLiteral(StructInitExpr { fields }));
    }

    let mut bindings = vec![first];
    while parser.match_kind(TokenKind::Comma) {
        if parser.check(TokenKind::CloseCurly) {
            break;
        }
        bindings.push(parser.expect(TokenKind::Identifier, "binding name")?);
    }
    parser.expect(TokenKind::CloseCurly, "'}' after pattern bindings")?;

    Ok(Node::DestructurePattern(DestructurePattern { bindings }))
}

/// Parses `key = value` entries up to and including the closing `}`,
/// appending them to `fields`. A bare `key` is shorthand for `key = key`.
pub fn parse_struct_fields(parser: &mut Parser, mut fields: Vec<StructField>) -> Result<Vec<StructField>, Error> {
    while !parser.check(TokenKind::CloseCurly) {
        if !parser.has_tokens() {
            return Err(Error::new(
                ErrorImpl::UnterminatedBlock { expected: String::from("'}'") },
                parser.get_position(),
            ));
        }

        let key = parser.expect(TokenKind::Identifier, "field name")?;
        let value = if parser.match_kind(TokenKind::Assignment) {
            parse_expr(parser, BindingPower::Default)?
        } else {
            Node::Variable(SymbolExpr { name: key.clone() })
        };
        fields.push(StructField { key, value });

        if parser.had_error() || !parser.match_kind(TokenKind::Comma) {
            break;
        }
    }

    parser.expect_closing(TokenKind::CloseCurly, "'}' after struct fields")?;
    Ok(fields)
}

pub fn parse_lambda_expr(parser: &mut Parser, _fn: Token) -> Result<Node, Error> {
    parser.expect(TokenKind::OpenParen, "'(' after 'fn'")?;
    let parameters = parse_parameter_list(parser)?;

    parser.expect(TokenKind::Arrow, "'->' after lambda parameters")?;
    parser.expect(TokenKind::OpenCurly, "'{' after '->' in lambda")?;
    let body = parse_block(parser)?;

    Ok(Node::LambdaExpression(LambdaExpr { parameters, body }))
}
