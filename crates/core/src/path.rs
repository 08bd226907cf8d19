//! Diagnostic field paths
//!
//! A `FieldPath` records the chain of fields, wrapper keys and indexes from
//! the document root to the node being processed. It is an immutable value:
//! every descent produces a new path and leaves the parent untouched.

use std::fmt;

/// Path from the document root, e.g. `user/mapValue/fields/tags/arrayValue/values[0]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    rendered: String,
    depth: usize,
}

impl FieldPath {
    /// Path for a top-level document field
    pub fn root(field: &str) -> Self {
        FieldPath {
            rendered: field.to_string(),
            depth: 0,
        }
    }

    /// Descend into a named child (field name or wrapper key)
    ///
    /// Wrapper keys (`mapValue`, `fields`, ...) only extend the rendering;
    /// use [`FieldPath::nested_child`] and [`FieldPath::index`] for real
    /// nesting levels.
    pub fn child(&self, key: &str) -> Self {
        FieldPath {
            rendered: format!("{}/{}", self.rendered, key),
            depth: self.depth,
        }
    }

    /// Descend into a named field one nesting level deeper
    pub fn nested_child(&self, key: &str) -> Self {
        FieldPath {
            rendered: format!("{}/{}", self.rendered, key),
            depth: self.depth + 1,
        }
    }

    /// Descend into an array element one nesting level deeper
    pub fn index(&self, i: usize) -> Self {
        FieldPath {
            rendered: format!("{}[{}]", self.rendered, i),
            depth: self.depth + 1,
        }
    }

    /// Number of container levels between the root field and this node
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Rendered path
    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}
