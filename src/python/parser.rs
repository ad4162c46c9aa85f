#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Tree-sitter parser wrapper for Python source code.

use std::fmt::Formatter;

use anyhow::{Context, Result, anyhow};
use tree_sitter::{Node, Tree};

use super::indentation::first_indentation_problem;

/// A struct that wraps a tree-sitter parse tree and the source it came from.
#[derive(Clone)]
pub struct Parser {
    /// The source code being parsed.
    code: String,
    /// The parse tree.
    tree: Tree,
}

/// Where and why tree-sitter gave up on a piece of source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxProblem {
    /// 1-based line of the offending node.
    pub line:        usize,
    /// 1-based byte column of the offending node.
    pub column:      usize,
    /// Short description of the problem.
    pub message:     String,
    /// The full source line the problem starts on.
    pub source_line: String,
}

/// Returns the compiled tree-sitter Python language.
fn python_language() -> tree_sitter::Language {
    tree_sitter_python::LANGUAGE.into()
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("root", &self.tree.root_node().kind())
            .field("has_error", &self.tree.root_node().has_error())
            .finish()
    }
}

impl Parser {
    /// Returns a new parser object.
    ///
    /// Tree-sitter always produces a tree, even for broken code; check
    /// [`Parser::first_syntax_problem`] before trusting it.
    ///
    /// * `source_code`: the source code to be parsed
    pub fn new(source_code: String) -> Result<Self> {
        let mut parser = tree_sitter::Parser::new();
        let language = python_language();

        parser
            .set_language(&language)
            .with_context(|| "Failed to load Python grammar")?;
        let tree = parser
            .parse(source_code.as_str(), None)
            .ok_or_else(|| anyhow!("Error parsing Python code"))?;

        Ok(Self {
            code: source_code,
            tree,
        })
    }

    /// A getter for parser's source code.
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    /// Returns the parse tree's root node.
    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Returns the source text spanned by `node`.
    pub fn text(&self, node: Node<'_>) -> Result<&str> {
        node.utf8_text(self.code.as_bytes())
            .with_context(|| format!("Cannot map {} node to source text", node.kind()))
    }

    /// Returns the first `ERROR` or `MISSING` node in source order. An
    /// error-free tree is then checked for indentation Python rejects.
    pub fn first_syntax_problem(&self) -> Option<SyntaxProblem> {
        let root = self.tree.root_node();
        if !root.has_error() {
            return first_indentation_problem(root, &self.code);
        }

        let node = first_broken_node(root).unwrap_or(root);
        let position = node.start_position();
        let message = if node.is_missing() {
            format!("expected `{}`", node.kind())
        } else {
            "invalid syntax".to_string()
        };
        let source_line = self
            .code
            .lines()
            .nth(position.row)
            .unwrap_or_default()
            .trim_end()
            .to_string();

        Some(SyntaxProblem {
            line: position.row + 1,
            column: position.column + 1,
            message,
            source_line,
        })
    }
}

/// Depth-first search for the earliest error node, only entering subtrees
/// that report containing one.
fn first_broken_node(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_broken_node)
}
