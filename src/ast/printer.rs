//! Debug rendering of syntax trees.
//!
//! The output is deterministic and meant for tests and tooling. It is close
//! to source syntax: grouping nodes keep their parentheses, and an operand
//! that binds more loosely than its operator gets parentheses of its own, so
//! hand-built trees print with their real shape. Match and enum bodies are
//! spread over several lines.

use std::fmt::{self, Display, Write};

use crate::{
    lexer::tokens::Token,
    parser::lookups::{BindingPower, PARSE_RULES},
};

use super::{
    ast::{Node, Program},
    expressions::StructField,
};

/// Placeholder written for an absent node.
pub const NULL_NODE: &str = "NULL";

fn write_separated<T, F>(f: &mut impl Write, items: &[T], separator: &str, mut write_item: F) -> fmt::Result
where
    F: FnMut(&mut dyn Write, &T) -> fmt::Result,
{
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write_item(f, item)?;
    }
    Ok(())
}

fn write_tokens(f: &mut impl Write, tokens: &[Token]) -> fmt::Result {
    write_separated(f, tokens, ", ", |f, token| write!(f, "{}", token))
}

fn write_nodes(f: &mut impl Write, nodes: &[Node], separator: &str) -> fmt::Result {
    write_separated(f, nodes, separator, |f, node| write!(f, "{}", node))
}

fn write_fields(f: &mut impl Write, fields: &[StructField]) -> fmt::Result {
    if fields.is_empty() {
        return f.write_str("{ }");
    }
    f.write_str("{ ")?;
    write_separated(f, fields, ", ", |f, field| write!(f, "{} = {}", field.key, field.value))?;
    f.write_str(" }")
}

fn write_body(f: &mut impl Write, body: &[Node]) -> fmt::Result {
    if body.is_empty() {
        return f.write_str("{ }");
    }
    f.write_str("{ ")?;
    write_nodes(f, body, "; ")?;
    f.write_str(" }")
}

/// How tightly a node holds together when printed inline.
fn precedence(node: &Node) -> BindingPower {
    match node {
        Node::Assignment(_) => BindingPower::Assignment,
        Node::Pipeline(_) | Node::StructUpdate(_) => BindingPower::Pipeline,
        Node::Binary(binary) => PARSE_RULES.binding_power(binary.operator.kind),
        Node::Unary(_) => BindingPower::Unary,
        Node::Call(_) | Node::IndexAccess(_) => BindingPower::Call,
        _ => BindingPower::Member,
    }
}

fn write_operand(f: &mut impl Write, operand: &Node, parenthesize: bool) -> fmt::Result {
    if parenthesize {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

/// Operators are left associative: the right operand needs parentheses at
/// equal binding power, the left one only below it.
fn write_infix(f: &mut impl Write, left: &Node, operator: &str, right: &Node, bp: BindingPower) -> fmt::Result {
    write_operand(f, left, precedence(left) < bp)?;
    write!(f, " {} ", operator)?;
    write_operand(f, right, precedence(right) <= bp)
}

/// The object of a call, index or member access.
fn write_postfix_object(f: &mut impl Write, object: &Node) -> fmt::Result {
    write_operand(f, object, precedence(object) < BindingPower::Call)
}

/// Writes the rendering of `node`, or the placeholder when it is absent.
pub fn write_node(f: &mut impl Write, node: Option<&Node>) -> fmt::Result {
    let Some(node) = node else {
        return f.write_str(NULL_NODE);
    };

    match node {
        Node::Literal(literal) => write!(f, "{}", literal.token),
        Node::BoolLiteral(value) => write!(f, "{}", value),
        Node::Variable(variable) => write!(f, "{}", variable.name),
        Node::Unary(unary) => {
            write!(f, "{}", unary.operator)?;
            write_operand(f, &unary.right, precedence(&unary.right) < BindingPower::Unary)
        }
        Node::Binary(binary) => {
            let bp = PARSE_RULES.binding_power(binary.operator.kind);
            write_infix(f, &binary.left, &binary.operator.value, &binary.right, bp)
        }
        Node::Grouping(grouping) => write!(f, "({})", grouping.expression),
        Node::Assignment(assignment) => write!(f, "{} = {}", assignment.name, assignment.value),
        Node::Call(call) => {
            write_postfix_object(f, &call.callee)?;
            f.write_str("(")?;
            write_nodes(f, &call.arguments, ", ")?;
            f.write_str(")")
        }
        Node::PropertyAccess(member) => {
            write_postfix_object(f, &member.object)?;
            write!(f, ".{}", member.property)
        }
        Node::IndexAccess(index) => {
            write_postfix_object(f, &index.object)?;
            write!(f, "[{}]", index.index)
        }
        Node::Pipeline(pipeline) => {
            write_infix(f, &pipeline.left, "|>", &pipeline.right, BindingPower::Pipeline)
        }
        Node::LetStatement(decl) => write!(f, "let {} = {}", decl.name, decl.initializer),
        Node::LetBangStatement(decl) => write!(f, "let! {} = {}", decl.name, decl.initializer),
        Node::ExpressionStatement(stmt) => write!(f, "{}", stmt.expression),
        Node::FunctionStatement(func) => {
            write!(f, "func {}(", func.name)?;
            write_tokens(f, &func.parameters)?;
            f.write_str(") ")?;
            write_body(f, &func.body)
        }
        Node::LambdaExpression(lambda) => {
            f.write_str("fn(")?;
            write_tokens(f, &lambda.parameters)?;
            f.write_str(") -> ")?;
            write_body(f, &lambda.body)
        }
        Node::MatchStatement(stmt) => {
            writeln!(f, "match {} {{", stmt.scrutinee)?;
            for arm in &stmt.arms {
                f.write_str("  ")?;
                write_nodes(f, &arm.patterns, " | ")?;
                writeln!(f, " -> {},", arm.expression)?;
            }
            f.write_str("}")
        }
        Node::ImportStatement(stmt) => write!(f, "import {}", stmt.path),
        Node::ListLiteral(list) => {
            f.write_str("[")?;
            write_nodes(f, &list.elements, ", ")?;
            f.write_str("]")
        }
        Node::StructLiteral(literal) => write_fields(f, &literal.fields),
        Node::StructUpdate(update) => {
            write_operand(f, &update.base, precedence(&update.base) < BindingPower::Pipeline)?;
            f.write_str(" <- ")?;
            write_fields(f, &update.fields)
        }
        Node::EnumStatement(stmt) => {
            writeln!(f, "enum {} {{", stmt.name)?;
            for (i, variant) in stmt.variants.iter().enumerate() {
                write!(f, "  {}", variant.name)?;
                if variant.field_count() > 0 {
                    f.write_str(" { ")?;
                    write_tokens(f, &variant.fields)?;
                    f.write_str(" }")?;
                }
                if i + 1 < stmt.variants.len() {
                    f.write_str(",")?;
                }
                f.write_str("\n")?;
            }
            f.write_str("}")
        }
        Node::EnumConstructor(constructor) => {
            write!(f, "{}::{}", constructor.enum_name, constructor.variant)?;
            if constructor.fields.is_empty() {
                return Ok(());
            }
            f.write_str(" ")?;
            write_fields(f, &constructor.fields)
        }
        Node::DestructurePattern(pattern) => {
            f.write_str("{ ")?;
            write_tokens(f, &pattern.bindings)?;
            f.write_str(" }")
        }
        Node::Wildcard => f.write_str("_"),
        Node::Error => f.write_str("<error>"),
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, Some(self))
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in self.iter() {
            writeln!(f, "{}", statement)?;
        }
        Ok(())
    }
}

/// Renders a node to a string; `None` renders as the placeholder.
pub fn render_node(node: Option<&Node>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_node(&mut out, node);
    out
}

/// Writes the rendering of a single node to stdout.
pub fn print_node(node: Option<&Node>) {
    print!("{}", render_node(node));
}

/// Writes every top-level statement to stdout, one per line.
pub fn print_program(program: &Program) {
    print!("{}", program);
}
