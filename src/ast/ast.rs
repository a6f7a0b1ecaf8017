use std::{mem, slice::Iter};

use super::{
    expressions::{
        AssignmentExpr, BinaryExpr, CallExpr, DestructurePattern, EnumConstructorExpr,
        GroupingExpr, IndexExpr, LambdaExpr, ListExpr, LiteralExpr, MemberExpr, PipelineExpr, PrefixExpr,
        StructInitExpr, StructUpdateExpr, SymbolExpr,
    },
    statements::{EnumDeclStmt, ExpressionStmt, FnDeclStmt, ImportStmt, MatchStmt, VarDeclStmt},
};

/// A syntax tree node.
///
/// Every variant owns exactly its children: boxed operands and the vectors
/// of arguments, body statements, fields and arms. Tokens inside a node are
/// copies and own no subtree. Nodes are built bottom-up and never change
/// once constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Literal(LiteralExpr),
    BoolLiteral(bool),
    Variable(SymbolExpr),
    Unary(PrefixExpr),
    Binary(BinaryExpr),
    Grouping(GroupingExpr),
    Assignment(AssignmentExpr),
    Call(CallExpr),
    PropertyAccess(MemberExpr),
    IndexAccess(IndexExpr),
    Pipeline(PipelineExpr),
    LetStatement(VarDeclStmt),
    LetBangStatement(VarDeclStmt),
    ExpressionStatement(ExpressionStmt),
    FunctionStatement(FnDeclStmt),
    LambdaExpression(LambdaExpr),
    MatchStatement(MatchStmt),
    ImportStatement(ImportStmt),
    ListLiteral(ListExpr),
    StructLiteral(StructInitExpr),
    StructUpdate(StructUpdateExpr),
    EnumStatement(EnumDeclStmt),
    EnumConstructor(EnumConstructorExpr),
    DestructurePattern(DestructurePattern),
    /// `_` in a match arm.
    Wildcard,
    /// Stands in for input that could not be parsed.
    Error,
}

impl Node {
    /// Returns true for the variants produced by statement dispatch.
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            Node::LetStatement(_)
                | Node::LetBangStatement(_)
                | Node::ExpressionStatement(_)
                | Node::FunctionStatement(_)
                | Node::MatchStatement(_)
                | Node::ImportStatement(_)
                | Node::EnumStatement(_)
        )
    }

    /// The directly owned child nodes, in source order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Literal(_)
            | Node::BoolLiteral(_)
            | Node::Variable(_)
            | Node::ImportStatement(_)
            | Node::EnumStatement(_)
            | Node::DestructurePattern(_)
            | Node::Wildcard
            | Node::Error => vec![],
            Node::Unary(unary) => vec![unary.right.as_ref()],
            Node::Binary(binary) => vec![binary.left.as_ref(), binary.right.as_ref()],
            Node::Grouping(grouping) => vec![grouping.expression.as_ref()],
            Node::Assignment(assignment) => vec![assignment.value.as_ref()],
            Node::Call(call) => std::iter::once(call.callee.as_ref())
                .chain(call.arguments.iter())
                .collect(),
            Node::PropertyAccess(member) => vec![member.object.as_ref()],
            Node::IndexAccess(index) => vec![index.object.as_ref(), index.index.as_ref()],
            Node::Pipeline(pipeline) => vec![pipeline.left.as_ref(), pipeline.right.as_ref()],
            Node::LetStatement(decl) | Node::LetBangStatement(decl) => {
                vec![decl.initializer.as_ref()]
            }
            Node::ExpressionStatement(stmt) => vec![stmt.expression.as_ref()],
            Node::FunctionStatement(func) => func.body.iter().collect(),
            Node::LambdaExpression(lambda) => lambda.body.iter().collect(),
            Node::MatchStatement(stmt) => std::iter::once(stmt.scrutinee.as_ref())
                .chain(stmt.arms.iter().flat_map(|arm| {
                    arm.patterns.iter().chain(std::iter::once(&arm.expression))
                }))
                .collect(),
            Node::ListLiteral(list) => list.elements.iter().collect(),
            Node::StructLiteral(literal) => literal.fields.iter().map(|field| &field.value).collect(),
            Node::StructUpdate(update) => std::iter::once(update.base.as_ref())
                .chain(update.fields.iter().map(|field| &field.value))
                .collect(),
            Node::EnumConstructor(constructor) => {
                constructor.fields.iter().map(|field| &field.value).collect()
            }
        }
    }

    /// Counts this node and every node it transitively owns.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children());
        }
        count
    }

    /// Moves the owned children out, leaving `Node::Error` in boxed slots
    /// and empty vectors behind.
    fn take_children(&mut self) -> Vec<Node> {
        fn unbox(slot: &mut Node) -> Node {
            mem::replace(slot, Node::Error)
        }

        match self {
            Node::Literal(_)
            | Node::BoolLiteral(_)
            | Node::Variable(_)
            | Node::ImportStatement(_)
            | Node::EnumStatement(_)
            | Node::DestructurePattern(_)
            | Node::Wildcard
            | Node::Error => Vec::new(),
            Node::Unary(unary) => vec![unbox(&mut unary.right)],
            Node::Binary(binary) => vec![unbox(&mut binary.left), unbox(&mut binary.right)],
            Node::Grouping(grouping) => vec![unbox(&mut grouping.expression)],
            Node::Assignment(assignment) => vec![unbox(&mut assignment.value)],
            Node::Call(call) => {
                let mut children = mem::take(&mut call.arguments);
                children.push(unbox(&mut call.callee));
                children
            }
            Node::PropertyAccess(member) => vec![unbox(&mut member.object)],
            Node::IndexAccess(index) => vec![unbox(&mut index.object), unbox(&mut index.index)],
            Node::Pipeline(pipeline) => vec![unbox(&mut pipeline.left), unbox(&mut pipeline.right)],
            Node::LetStatement(decl) | Node::LetBangStatement(decl) => {
                vec![unbox(&mut decl.initializer)]
            }
            Node::ExpressionStatement(stmt) => vec![unbox(&mut stmt.expression)],
            Node::FunctionStatement(func) => mem::take(&mut func.body),
            Node::LambdaExpression(lambda) => mem::take(&mut lambda.body),
            Node::MatchStatement(stmt) => {
                let mut children = vec![unbox(&mut stmt.scrutinee)];
                for arm in mem::take(&mut stmt.arms) {
                    children.extend(arm.patterns);
                    children.push(arm.expression);
                }
                children
            }
            Node::ListLiteral(list) => mem::take(&mut list.elements),
            Node::StructLiteral(literal) => {
                mem::take(&mut literal.fields).into_iter().map(|field| field.value).collect()
            }
            Node::StructUpdate(update) => {
                let mut children = vec![unbox(&mut update.base)];
                children.extend(mem::take(&mut update.fields).into_iter().map(|field| field.value));
                children
            }
            Node::EnumConstructor(constructor) => mem::take(&mut constructor.fields)
                .into_iter()
                .map(|field| field.value)
                .collect(),
        }
    }
}

// Dropping through a worklist keeps release depth constant, so long
// operator chains cannot exhaust the stack.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = self.take_children();
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.take_children());
        }
    }
}

/// The top-level statements of one parse, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Node>,
}

impl Program {
    pub fn new() -> Self {
        Program {
            statements: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, statement: Node) {
        self.statements.push(statement);
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Node> {
        self.statements.iter()
    }

    pub fn node_count(&self) -> usize {
        self.statements.iter().map(Node::node_count).sum()
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases a node and everything it owns. `None` is a no-op.
pub fn free_node(node: Option<Node>) {
    if let Some(node) = node {
        log::trace!("releasing {} node(s)", node.node_count());
        drop(node);
    }
}

/// Releases every statement of the program along with its storage.
pub fn free_program(program: Program) {
    log::debug!(
        "releasing program of {} statement(s), {} node(s)",
        program.len(),
        program.node_count()
    );
    drop(program);
}
