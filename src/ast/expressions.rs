use crate::lexer::tokens::Token;

use super::ast::Node;

// LITERALS

/// Literal Expression
/// A number or string literal; the token carries the lexeme.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub token: Token,
}

/// Symbol Expression
/// Represents an identifier in the AST. This includes functions.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub name: Token,
}

/// List Expression
/// `[a, b, c]`
#[derive(Debug, Clone, PartialEq)]
pub struct ListExpr {
    pub elements: Vec<Node>,
}

/// One `key = value` entry of a struct literal, struct update or enum
/// constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    pub key: Token,
    pub value: Node,
}

/// Struct Literal Expression
/// `{ name = "John", age = 30 }`
#[derive(Debug, Clone, PartialEq)]
pub struct StructInitExpr {
    pub fields: Vec<StructField>,
}

// OPERATORS

/// Prefix Expression
/// `-x`, `!done`
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub operator: Token,
    pub right: Box<Node>,
}

/// Binary Expression
/// Arithmetic, comparison and logical operators.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Node>,
    pub operator: Token,
    pub right: Box<Node>,
}

/// Grouping Expression
/// A parenthesised expression, kept as its own node.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingExpr {
    pub expression: Box<Node>,
}

/// Assignment Expression
/// `name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub name: Token,
    pub value: Box<Node>,
}

/// Pipeline Expression
/// `left |> right`
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineExpr {
    pub left: Box<Node>,
    pub right: Box<Node>,
}

/// Struct Update Expression
/// `base <- { field = value }`
#[derive(Debug, Clone, PartialEq)]
pub struct StructUpdateExpr {
    pub base: Box<Node>,
    pub fields: Vec<StructField>,
}

// ACCESS AND CALLS

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Node>,
    pub arguments: Vec<Node>,
}

/// Index Expression
/// `object["key"]` or `items[i + 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub object: Box<Node>,
    pub index: Box<Node>,
}

/// Member Expression
/// `object.property`
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub object: Box<Node>,
    pub property: Token,
}

/// Enum Constructor Expression
/// `Shape::Circle { radius = 2 }`; the field list may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumConstructorExpr {
    pub enum_name: Token,
    pub variant: Token,
    pub fields: Vec<StructField>,
}

// FUNCTIONS AND PATTERNS

/// Lambda Expression
/// `fn(x, y) -> { x + y }`
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExpr {
    pub parameters: Vec<Token>,
    pub body: Vec<Node>,
}

/// Destructure Pattern
/// `{ name, age }` in a match arm binds the named fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DestructurePattern {
    pub bindings: Vec<Token>,
}
