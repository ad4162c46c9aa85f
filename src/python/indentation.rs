#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Indentation checks on top of an error-free parse tree.
//!
//! tree-sitter-python places a statement wherever its column lets it fit, so
//! a tree without `ERROR` nodes may still hold lines that Python's tokenizer
//! rejects. The check replays the tokenizer's indentation stack over every
//! line that starts a statement.

use tree_sitter::Node;

use super::parser::SyntaxProblem;

/// Column a tab advances to a multiple of.
const TAB_SIZE: usize = 8;

/// Node kinds whose named children are statements.
const STATEMENT_CONTAINERS: [&str; 3] = ["module", "block", "decorated_definition"];

/// Clauses that start their own line at the indentation of their statement.
const CLAUSE_KINDS: [&str; 6] = [
    "elif_clause",
    "else_clause",
    "except_clause",
    "except_group_clause",
    "finally_clause",
    "case_clause",
];

/// A line is deeper than its block without opening a new one.
const UNEXPECTED_INDENT: &str = "unexpected indent";
/// A dedent lands between two open levels.
const UNINDENT_MISMATCH: &str = "unindent does not match any outer indentation level";
/// A block header is not followed by a deeper line.
const EXPECTED_BLOCK: &str = "expected an indented block";
/// Tabs and spaces order two lines differently.
const INCONSISTENT_TABS: &str = "inconsistent use of tabs and spaces in indentation";

/// A statement that is the first token on its line.
#[derive(Debug, Clone, Copy)]
struct LineStart {
    /// 0-based row.
    row:         usize,
    /// 0-based byte column.
    column:      usize,
    /// Whether this is the first statement of an indented block.
    opens_block: bool,
}

/// Leading whitespace measured twice: tabs to the next multiple of
/// [`TAB_SIZE`], and tabs as a single column. Two lines must compare the
/// same way under both widths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Indent {
    /// Width with tabs expanded.
    width:     usize,
    /// Width with every tab counted as one.
    alt_width: usize,
}

impl Indent {
    /// Measures the leading whitespace of `line`. A form feed resets both
    /// widths.
    fn measure(line: &str) -> Self {
        let mut indent = Self::default();
        for c in line.chars() {
            match c {
                ' ' => {
                    indent.width += 1;
                    indent.alt_width += 1;
                }
                '\t' => {
                    indent.width = (indent.width / TAB_SIZE + 1) * TAB_SIZE;
                    indent.alt_width += 1;
                }
                '\x0c' => indent = Self::default(),
                _ => break,
            }
        }
        indent
    }
}

/// Returns the first statement line whose indentation Python would reject.
pub(crate) fn first_indentation_problem(root: Node<'_>, code: &str) -> Option<SyntaxProblem> {
    let lines: Vec<&str> = code.lines().collect();

    let mut starts = Vec::new();
    collect_line_starts(root, &lines, &mut starts);
    starts.sort_by_key(|start| start.row);
    // A decorated definition and its first decorator share a line.
    starts.dedup_by(|later, earlier| {
        let same_row = later.row == earlier.row;
        if same_row {
            earlier.opens_block |= later.opens_block;
        }
        same_row
    });

    let mut stack = vec![Indent::default()];
    for start in starts {
        let line = lines.get(start.row).copied().unwrap_or_default();
        if let Some(message) = advance(&mut stack, Indent::measure(line), start.opens_block) {
            return Some(SyntaxProblem {
                line:        start.row + 1,
                column:      start.column + 1,
                message:     message.to_string(),
                source_line: line.trim_end().to_string(),
            });
        }
    }

    None
}

/// Moves the indentation stack to `indent`, or says why it cannot.
fn advance(stack: &mut Vec<Indent>, indent: Indent, opens_block: bool) -> Option<&'static str> {
    let top = *stack.last()?;
    if indent.width > top.width {
        if indent.alt_width <= top.alt_width {
            return Some(INCONSISTENT_TABS);
        }
        if !opens_block {
            return Some(UNEXPECTED_INDENT);
        }
        stack.push(indent);
        return None;
    }

    // The bottom entry has width 0 and is never popped.
    while stack.last().is_some_and(|level| indent.width < level.width) {
        stack.pop();
    }
    let top = *stack.last()?;

    if indent.width != top.width {
        Some(UNINDENT_MISMATCH)
    } else if indent.alt_width != top.alt_width {
        Some(INCONSISTENT_TABS)
    } else if opens_block {
        Some(EXPECTED_BLOCK)
    } else {
        None
    }
}

/// Collects every statement and clause of the subtree that begins its line.
fn collect_line_starts(node: Node<'_>, lines: &[&str], starts: &mut Vec<LineStart>) {
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();

    let holds_statements = STATEMENT_CONTAINERS.contains(&node.kind());
    let first_statement = if node.kind() == "block" {
        children.iter().find(|c| !c.is_extra()).map(Node::id)
    } else {
        None
    };

    for child in children {
        let is_statement =
            !child.is_extra() && (holds_statements || CLAUSE_KINDS.contains(&child.kind()));
        if is_statement && begins_line(child, lines) {
            let position = child.start_position();
            starts.push(LineStart {
                row:         position.row,
                column:      position.column,
                opens_block: first_statement == Some(child.id()),
            });
        }
        collect_line_starts(child, lines, starts);
    }
}

/// Whether only whitespace precedes `node` on its first line.
fn begins_line(node: Node<'_>, lines: &[&str]) -> bool {
    let position = node.start_position();
    lines
        .get(position.row)
        .and_then(|line| line.get(..position.column))
        .is_some_and(|prefix| prefix.chars().all(|c| matches!(c, ' ' | '\t' | '\x0c')))
}
