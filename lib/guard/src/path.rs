//! Field paths — dot-joined locations within a request's value tree.

use std::fmt;

/// One step into a value tree: a record field or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Field(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => write!(f, "{}", name),
            Segment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Location of a value within a request, rooted at `body` or `query`.
///
/// Rendered dot-joined, e.g. `body.items.1.qty`. Paths live only for the
/// duration of one scan; they are never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Start a path at a named top-level context (`body` or `query`).
    pub fn root(name: &str) -> Self {
        Self {
            segments: vec![Segment::Field(name.to_string())],
        }
    }

    /// Descend into a record field.
    pub fn push_field(&mut self, name: &str) {
        self.segments.push(Segment::Field(name.to_string()));
    }

    /// Descend into a sequence element.
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(Segment::Index(index));
    }

    /// Step back out of the current field or element.
    pub fn pop(&mut self) {
        self.segments.pop();
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_renders_bare() {
        assert_eq!(FieldPath::root("body").to_string(), "body");
    }

    #[test]
    fn test_dot_joined_rendering() {
        let mut path = FieldPath::root("body");
        path.push_field("items");
        path.push_index(1);
        path.push_field("qty");
        assert_eq!(path.to_string(), "body.items.1.qty");
    }

    #[test]
    fn test_push_pop_restores() {
        let mut path = FieldPath::root("query");
        path.push_field("minPrice");
        path.pop();
        assert_eq!(path.to_string(), "query");
    }
}
