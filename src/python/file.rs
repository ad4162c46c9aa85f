#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Per-file declaration extraction and coverage.

use std::{collections::VecDeque, path::Path};

use tree_sitter::Node;

use super::{docstring::leading_docstring, error::PythonFileError, parser::Parser};
use crate::{
    config::Config,
    coverage::CoverageStat,
    types::{Declaration, DeclarationKind},
};

/// Node kinds that only group statements. The walk looks through them so a
/// method sits one level below its class, as it does in Python's own AST.
const STRUCTURAL_KINDS: [&str; 4] =
    ["block", "decorated_definition", "else_clause", "finally_clause"];

/// Docstring coverage of one Python file.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Path as discovered, used as the report heading.
    path:              String,
    /// The module itself, unnamed, at line 1.
    module:            Declaration,
    /// Every class in the file, in walk order.
    classes:           Vec<Declaration>,
    /// Every function that survived the name filters, in walk order.
    functions:         Vec<Declaration>,
    /// Coverage over `classes`.
    class_coverage:    CoverageStat,
    /// Coverage over `functions`.
    function_coverage: CoverageStat,
}

impl FileReport {
    /// Reads and analyses the file at `path`.
    pub fn from_path(path: &Path, config: &Config) -> Result<Self, PythonFileError> {
        let code = std::fs::read_to_string(path).map_err(|source| PythonFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_source(path.display().to_string(), code, config)
    }

    /// Analyses `code`, reporting it under `path`.
    pub fn from_source(
        path: impl Into<String>,
        code: String,
        config: &Config,
    ) -> Result<Self, PythonFileError> {
        let path = path.into();
        let parser = Parser::new(code)?;

        if let Some(problem) = parser.first_syntax_problem() {
            return Err(PythonFileError::SyntaxError {
                file_name:   path,
                line:        problem.line,
                column:      problem.column,
                message:     problem.message,
                source_line: problem.source_line,
            });
        }

        let root = parser.root_node();
        let module = Declaration {
            kind:      DeclarationKind::Module,
            name:      String::new(),
            line:      1,
            docstring: leading_docstring(root, parser.code()),
        };

        let mut classes = Vec::new();
        let mut functions = Vec::new();
        let mut queue = VecDeque::from([root]);

        while let Some(node) = queue.pop_front() {
            match node.kind() {
                "class_definition" => {
                    classes.push(declaration(&parser, node, DeclarationKind::Class)?);
                }
                "function_definition" => {
                    let function = declaration(&parser, node, DeclarationKind::Function)?;
                    if !is_filtered(&function.name, config) {
                        functions.push(function);
                    }
                }
                _ => {}
            }
            push_statement_children(node, &mut queue);
        }

        tracing::debug!(
            "{path}: {} classes, {} functions after filtering",
            classes.len(),
            functions.len()
        );

        Ok(Self {
            class_coverage: CoverageStat::from_declarations(&classes),
            function_coverage: CoverageStat::from_declarations(&functions),
            path,
            module,
            classes,
            functions,
        })
    }

    /// Path as discovered.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The module declaration.
    pub fn module(&self) -> &Declaration {
        &self.module
    }

    /// Cleaned module docstring, if the file opens with one.
    pub fn module_docstring(&self) -> Option<&str> {
        self.module.docstring.as_deref()
    }

    /// Classes in walk order.
    pub fn classes(&self) -> &[Declaration] {
        &self.classes
    }

    /// Counted functions in walk order.
    pub fn functions(&self) -> &[Declaration] {
        &self.functions
    }

    /// Coverage over [`FileReport::classes`].
    pub fn class_coverage(&self) -> CoverageStat {
        self.class_coverage
    }

    /// Coverage over [`FileReport::functions`].
    pub fn function_coverage(&self) -> CoverageStat {
        self.function_coverage
    }
}

/// Builds the declaration for a `class_definition` or `function_definition`.
fn declaration(
    parser: &Parser,
    node: Node<'_>,
    kind: DeclarationKind,
) -> Result<Declaration, PythonFileError> {
    let name = node
        .child_by_field_name("name")
        .map(|n| parser.text(n))
        .transpose()?
        .unwrap_or_default()
        .to_string();
    let docstring = node
        .child_by_field_name("body")
        .and_then(|body| leading_docstring(body, parser.code()));

    Ok(Declaration {
        kind,
        name,
        line: node.start_position().row + 1,
        docstring,
    })
}

/// Whether the name filters drop a function called `name`.
fn is_filtered(name: &str, config: &Config) -> bool {
    let magic = name.starts_with("__") && name.ends_with("__");
    (config.skip_magic_funcs() && magic) || (config.skip_private_funcs() && name.starts_with('_'))
}

/// Queues the children of `node` one statement level down, looking
/// through [`STRUCTURAL_KINDS`].
fn push_statement_children<'t>(node: Node<'t>, queue: &mut VecDeque<Node<'t>>) {
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.named_children(&mut cursor).collect();
    for child in children {
        match child.kind() {
            "comment" => {}
            kind if STRUCTURAL_KINDS.contains(&kind) => push_statement_children(child, queue),
            _ => queue.push_back(child),
        }
    }
}
