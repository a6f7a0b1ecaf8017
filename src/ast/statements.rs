use crate::lexer::tokens::Token;

use super::ast::Node;

/// `let name = value` and `let! name = value` share this payload.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub name: Token,
    pub initializer: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub name: Token,
    pub parameters: Vec<Token>,
    pub body: Vec<Node>,
}

/// `p1 | p2 -> expression`; a plain arm has a single pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchArm {
    pub patterns: Vec<Node>,
    pub expression: Node,
}

/// Arms are kept in source order. Nothing here checks exhaustiveness or
/// overlap; consumers try arms in order and the first match wins.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchStmt {
    pub scrutinee: Box<Node>,
    pub arms: Vec<MatchArm>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportStmt {
    pub path: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumVariant {
    pub name: Token,
    pub fields: Vec<Token>,
}

impl EnumVariant {
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDeclStmt {
    pub name: Token,
    pub variants: Vec<EnumVariant>,
}
