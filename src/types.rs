use std::fmt::Display;

/// The kind of declaration a docstring can be attached to.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum DeclarationKind {
    /// The file itself.
    Module,
    /// A `class` statement.
    Class,
    /// A `def` or `async def` statement.
    Function,
}

impl Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclarationKind::Module => write!(f, "module"),
            DeclarationKind::Class => write!(f, "class"),
            DeclarationKind::Function => write!(f, "function"),
        }
    }
}

/// A module, class or function found in a source file.
///
/// Nested declarations are not qualified by their enclosing scope; use
/// `(path, line)` to tell same-named declarations apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// What was declared.
    pub kind:      DeclarationKind,
    /// Declared name, empty for modules.
    pub name:      String,
    /// 1-based line of the `class`/`def` keyword (1 for modules).
    pub line:      usize,
    /// Cleaned docstring, if the body opens with one.
    pub docstring: Option<String>,
}

impl Declaration {
    /// Whether the declaration carries a docstring.
    pub fn has_docstring(&self) -> bool {
        self.docstring.is_some()
    }
}
