/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the tree the parser builds
///
/// Submodules:
/// - ast: The `Node` sum type, `Program`, and the release functions
/// - expressions: Payloads of the expression variants
/// - statements: Payloads of the statement variants
/// - printer: Debug rendering of nodes and programs
pub mod ast;
pub mod expressions;
pub mod printer;
pub mod statements;

#[cfg(test)]
mod tests;
