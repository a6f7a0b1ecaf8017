use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{ast::ast::Node, errors::errors::Error, lexer::tokens::{Token, TokenKind}};

use super::{expr::*, parser::Parser, stmt::*};

/// Left binding powers, weakest first. Only the ordering matters.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Assignment,
    Pipeline,
    Logical,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Call,
    Member,
}

pub type StmtHandler = fn(&mut Parser<'_>) -> Result<Node, Error>;
/// Prefix behavior; receives the already consumed lead token.
pub type NUDHandler = fn(&mut Parser<'_>, Token) -> Result<Node, Error>;
/// Infix behavior; receives the left operand and the consumed operator token.
pub type LEDHandler = fn(&mut Parser<'_>, Node, Token) -> Result<Node, Error>;

/// Everything the expression parser knows about one token kind.
#[derive(Clone, Copy)]
pub struct ParseRule {
    pub nud: Option<NUDHandler>,
    pub led: Option<LEDHandler>,
    pub lbp: BindingPower,
}

impl Default for ParseRule {
    fn default() -> Self {
        ParseRule {
            nud: None,
            led: None,
            lbp: BindingPower::Default,
        }
    }
}

// Lookup tables are built once and only read afterwards
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type RuleLookup = HashMap<TokenKind, ParseRule>;

#[derive(Default)]
pub struct ParseRules {
    rules: RuleLookup,
    stmt_lookup: StmtLookup,
}

impl ParseRules {
    /// The rule for `kind`; unregistered kinds get no behaviors and zero
    /// binding power, which ends any expression.
    pub fn get(&self, kind: TokenKind) -> ParseRule {
        self.rules.get(&kind).copied().unwrap_or_default()
    }

    pub fn binding_power(&self, kind: TokenKind) -> BindingPower {
        self.get(kind).lbp
    }

    pub fn stmt_handler(&self, kind: TokenKind) -> Option<StmtHandler> {
        self.stmt_lookup.get(&kind).copied()
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        let rule = self.rules.entry(kind).or_default();
        rule.lbp = binding_power;
        rule.led = Some(led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.rules.entry(kind).or_default().nud = Some(nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}

pub fn create_token_lookups() -> ParseRules {
    let mut rules = ParseRules::default();

    rules.led(TokenKind::Assignment, BindingPower::Assignment, parse_assignment_expr);

    rules.led(TokenKind::Pipeline, BindingPower::Pipeline, parse_pipeline_expr);
    rules.led(TokenKind::LeftArrow, BindingPower::Pipeline, parse_struct_update_expr);

    // Logical
    rules.led(TokenKind::And, BindingPower::Logical, parse_binary_expr);
    rules.led(TokenKind::Or, BindingPower::Logical, parse_binary_expr);

    // Relational
    rules.led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
    rules.led(TokenKind::LessEquals, BindingPower::Relational, parse_binary_expr);
    rules.led(TokenKind::Greater, BindingPower::Relational, parse_binary_expr);
    rules.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_binary_expr);
    rules.led(TokenKind::Equals, BindingPower::Relational, parse_binary_expr);
    rules.led(TokenKind::NotEquals, BindingPower::Relational, parse_binary_expr);

    // Additive and multiplicative
    rules.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    rules.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    rules.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    rules.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);

    rules.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);
    rules.led(TokenKind::OpenBracket, BindingPower::Call, parse_index_expr);

    // Member
    rules.led(TokenKind::Dot, BindingPower::Member, parse_member_expr);
    rules.led(TokenKind::DoubleColon, BindingPower::Member, parse_enum_constructor_expr);

    // Literals and symbols
    rules.nud(TokenKind::Number, parse_literal_expr);
    rules.nud(TokenKind::String, parse_literal_expr);
    rules.nud(TokenKind::Identifier, parse_symbol_expr);
    rules.nud(TokenKind::Underscore, parse_wildcard_expr);
    rules.nud(TokenKind::True, parse_bool_expr);
    rules.nud(TokenKind::False, parse_bool_expr);
    rules.nud(TokenKind::Dash, parse_prefix_expr);
    rules.nud(TokenKind::Not, parse_prefix_expr);
    rules.nud(TokenKind::OpenParen, parse_grouping_expr);
    rules.nud(TokenKind::OpenBracket, parse_list_expr);
    rules.nud(TokenKind::OpenCurly, parse_brace_expr);
    rules.nud(TokenKind::Fn, parse_lambda_expr);
    rules.nud(TokenKind::Error, parse_error_token);

    // Statements
    rules.stmt(TokenKind::Let, parse_let_stmt);
    rules.stmt(TokenKind::LetBang, parse_let_stmt);
    rules.stmt(TokenKind::Func, parse_fn_decl_stmt);
    rules.stmt(TokenKind::Match, parse_match_stmt);
    rules.stmt(TokenKind::Import, parse_import_stmt);
    rules.stmt(TokenKind::Enum, parse_enum_decl_stmt);

    rules
}

lazy_static! {
    /// The shared table every `Parser::new` reads from.
    pub static ref PARSE_RULES: ParseRules = create_token_lookups();
}
