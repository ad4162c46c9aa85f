#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Docstring detection on tree-sitter nodes.
//!
//! A docstring is the first statement of a module, class or function body
//! when that statement is nothing but a plain string literal. Comments are
//! not statements. f-strings and bytes literals never count.

use tree_sitter::Node;

/// Tab stop used when normalising docstring indentation.
const TAB_SIZE: usize = 8;

/// Returns the cleaned docstring opening `container` (a `module` or a
/// `block` node), if there is one.
pub fn leading_docstring(container: Node<'_>, source: &str) -> Option<String> {
    let first = first_named_child(container)?;
    if first.kind() != "expression_statement" {
        return None;
    }

    let mut cursor = first.walk();
    let mut expressions = first
        .named_children(&mut cursor)
        .filter(|c| c.kind() != "comment");
    let mut expression = expressions.next()?;
    if expressions.next().is_some() {
        return None;
    }

    while expression.kind() == "parenthesized_expression" {
        expression = first_named_child(expression)?;
    }

    let literal = match expression.kind() {
        "string" => string_body(expression, source)?,
        "concatenated_string" => {
            let mut cursor = expression.walk();
            expression
                .named_children(&mut cursor)
                .filter(|c| c.kind() != "comment")
                .map(|part| string_body(part, source))
                .collect::<Option<String>>()?
        }
        _ => return None,
    };

    Some(clean_docstring(&literal))
}

/// First named child that is not a comment.
fn first_named_child(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|c| c.kind() != "comment")
}

/// Text between the quotes of a plain `string` node, or `None` for
/// anything that is not a `str` literal.
fn string_body(node: Node<'_>, source: &str) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }

    let text = node.utf8_text(source.as_bytes()).ok()?;
    let quote_at = text.find(['"', '\''])?;
    let prefix = text[..quote_at].to_ascii_lowercase();
    if prefix.contains(['f', 'b', 't']) {
        return None;
    }

    let quoted = &text[quote_at..];
    let quote_len = if quoted.starts_with("\"\"\"") || quoted.starts_with("'''") {
        3
    } else {
        1
    };
    if quoted.len() < quote_len * 2 {
        return None;
    }

    Some(quoted[quote_len..quoted.len() - quote_len].to_string())
}

/// Normalises docstring whitespace the way Python's `inspect.cleandoc`
/// does.
pub fn clean_docstring(raw: &str) -> String {
    let expanded: Vec<String> = raw.lines().map(expand_tabs).collect();

    let margin = expanded
        .iter()
        .skip(1)
        .filter_map(|line| {
            let content = line.trim_start();
            (!content.is_empty()).then(|| line.chars().count() - content.chars().count())
        })
        .min();

    let mut lines: Vec<String> = expanded
        .iter()
        .enumerate()
        .map(|(i, line)| match (i, margin) {
            (0, _) => line.trim_start().to_string(),
            (_, Some(margin)) => line.chars().skip(margin).collect(),
            (_, None) => line.clone(),
        })
        .collect();

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let leading_blank = lines.iter().take_while(|l| l.is_empty()).count();

    lines[leading_blank..].join("\n")
}

/// Replaces tabs with spaces up to the next tab stop.
fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let pad = TAB_SIZE - column % TAB_SIZE;
            out.extend(std::iter::repeat_n(' ', pad));
            column += pad;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::python::Parser;

    fn module_docstring(code: &str) -> Option<String> {
        let parser = Parser::new(code.to_string()).expect("parse");
        leading_docstring(parser.root_node(), parser.code())
    }

    #[test]
    fn triple_quoted_module_docstring() {
        let doc = module_docstring("\"\"\"Summary.\n\n    Details here.\n    \"\"\"\nx = 1\n");
        assert_eq!(doc.as_deref(), Some("Summary.\n\nDetails here."));
    }

    #[test]
    fn leading_comment_is_skipped() {
        let doc = module_docstring("# coding: utf-8\n'Doc.'\n");
        assert_eq!(doc.as_deref(), Some("Doc."));
    }

    #[test]
    fn late_string_is_not_a_docstring() {
        assert_eq!(module_docstring("import os\n\"\"\"Too late.\"\"\"\n"), None);
    }

    #[test]
    fn formatted_and_bytes_literals_are_not_docstrings() {
        assert_eq!(module_docstring("f\"Doc {x}.\"\n"), None);
        assert_eq!(module_docstring("b'Doc.'\n"), None);
        assert_eq!(module_docstring("\"a\" f\"b\"\n"), None);
    }

    #[test]
    fn raw_concatenated_and_parenthesized_strings_count() {
        assert_eq!(module_docstring("r'''Raw \\d.'''\n").as_deref(), Some("Raw \\d."));
        assert_eq!(module_docstring("\"One \" \"two.\"\n").as_deref(), Some("One two."));
        assert_eq!(module_docstring("(\"Wrapped.\")\n").as_deref(), Some("Wrapped."));
    }

    #[test]
    fn empty_docstring_is_still_present() {
        assert_eq!(module_docstring("\"\"\"\"\"\"\n").as_deref(), Some(""));
    }

    #[test]
    fn assignment_of_string_is_not_a_docstring() {
        assert_eq!(module_docstring("__doc__ = 'nope'\n"), None);
        assert_eq!(module_docstring(""), None);
    }

    #[test]
    fn cleandoc_expands_tabs_and_trims_blank_edges() {
        assert_eq!(clean_docstring("\n\tIndented.\n\tMore.\n\n"), "Indented.\nMore.");
        assert_eq!(clean_docstring("  First.\n      Deeper.\n    Shallow."), "First.\n  Deeper.\nShallow.");
    }
}
