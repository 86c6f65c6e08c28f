//! Field paths for addressing values inside a candidate
//!
//! Provides [`FieldPath`] for locating the field a validation issue refers to.

use serde::{Serialize, Serializer};
use std::fmt::{self, Display, Formatter, Write};
use std::iter::Peekable;
use std::str::{Chars, FromStr};

/// One step of a [`FieldPath`]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    /// Object key
    Key(String),
    /// Array index
    Index(usize),
}

/// Path from the root of a candidate to one of its values
///
/// Rendered the way form controls are named:
/// - `["address", "zip"]` → `address.zip`
/// - `["sections", 0, "subsections", 1, "title"]` → `sections[0].subsections[1].title`
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// Empty path (the candidate itself)
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of a single top-level key
    #[inline]
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self {
        Self(vec![PathSegment::Key(key.into())])
    }

    /// Get path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Get number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if path is the root
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append an object key, returning new path
    #[inline]
    #[must_use]
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut new = self.clone();
        new.0.push(PathSegment::Key(key.into()));
        new
    }

    /// Append an array index, returning new path
    #[inline]
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut new = self.clone();
        new.0.push(PathSegment::Index(index));
        new
    }

    /// Last object key on the path, skipping trailing indices
    #[must_use]
    pub fn last_key(&self) -> Option<&str> {
        self.0.iter().rev().find_map(|segment| match segment {
            PathSegment::Key(key) => Some(key.as_str()),
            PathSegment::Index(_) => None,
        })
    }

    /// Check if this path is a prefix of another
    #[inline]
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        self.0.len() <= other.0.len() && self.0 == other.0[..self.0.len()]
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) => {
                    if i > 0 {
                        f.write_char('.')?;
                    }
                    for c in key.chars() {
                        if is_reserved(c) {
                            f.write_char('\\')?;
                        }
                        f.write_char(c)?;
                    }
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Characters escaped with a backslash inside keys
fn is_reserved(c: char) -> bool {
    matches!(c, '.' | '[' | ']' | '\\')
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Errors parsing a [`FieldPath`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Empty key between separators
    #[error("empty key in field path")]
    EmptyKey,

    /// Bracketed index that is not a number
    #[error("invalid index: {0}")]
    InvalidIndex(String),

    /// Unbalanced brackets
    #[error("unclosed index bracket")]
    UnclosedBracket,

    /// Backslash at the end of the path
    #[error("dangling escape at end of field path")]
    DanglingEscape,

    /// Index beyond the next free slot of a list
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = Vec::new();
        let mut chars = s.chars().peekable();

        while let Some(&c) = chars.peek() {
            match c {
                '[' => {
                    chars.next();
                    segments.push(PathSegment::Index(read_index(&mut chars)?));
                }
                '.' if !segments.is_empty() => {
                    chars.next();
                    segments.push(PathSegment::Key(read_key(&mut chars)?));
                }
                _ if segments.is_empty() => segments.push(PathSegment::Key(read_key(&mut chars)?)),
                _ => return Err(PathError::InvalidIndex(chars.collect())),
            }
        }

        Ok(Self(segments))
    }
}

fn read_key(chars: &mut Peekable<Chars<'_>>) -> Result<String, PathError> {
    let mut key = String::new();
    while let Some(&c) = chars.peek() {
        match c {
            '.' | '[' | ']' => break,
            '\\' => {
                chars.next();
                key.push(chars.next().ok_or(PathError::DanglingEscape)?);
            }
            _ => {
                chars.next();
                key.push(c);
            }
        }
    }
    if key.is_empty() {
        return Err(PathError::EmptyKey);
    }
    Ok(key)
}

fn read_index(chars: &mut Peekable<Chars<'_>>) -> Result<usize, PathError> {
    let mut raw = String::new();
    loop {
        match chars.next() {
            Some(']') => break,
            Some(c) => raw.push(c),
            None => return Err(PathError::UnclosedBracket),
        }
    }
    raw.parse::<usize>().map_err(|_| PathError::InvalidIndex(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mixes_keys_and_indices() {
        let path = FieldPath::key("sections")
            .index(0)
            .child("subsections")
            .index(2)
            .child("title");
        assert_eq!(path.to_string(), "sections[0].subsections[2].title");
        assert_eq!(path.last_key(), Some("title"));
    }

    #[test]
    fn parse_round_trip() {
        let text = "entity.employees[1].address.zip";
        let path = FieldPath::from_str(text).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.to_string(), text);
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!(FieldPath::from_str("a..b"), Err(PathError::EmptyKey));
        assert_eq!(FieldPath::from_str("a[x]"), Err(PathError::InvalidIndex("x".into())));
        assert_eq!(FieldPath::from_str("a[1"), Err(PathError::UnclosedBracket));
        assert_eq!(FieldPath::from_str("a[1]b"), Err(PathError::InvalidIndex("b".into())));
        assert_eq!(FieldPath::from_str(".a"), Err(PathError::EmptyKey));
    }

    #[test]
    fn root_index_round_trips() {
        let path = FieldPath::root().index(1).child("title");
        assert_eq!(path.to_string(), "[1].title");
        assert_eq!(FieldPath::from_str("[1].title"), Ok(path));
        assert_eq!(FieldPath::from_str("[0][2]").unwrap().len(), 2);
    }

    #[test]
    fn reserved_characters_in_keys_are_escaped() {
        let dotted = FieldPath::key("days").child("mon.lunch");
        let bracketed = FieldPath::key("days").child("mon[1]");
        assert_eq!(dotted.to_string(), r"days.mon\.lunch");
        assert_eq!(bracketed.to_string(), r"days.mon\[1\]");
        let nested = FieldPath::key("days").child("mon").child("lunch");
        assert_ne!(dotted.to_string(), nested.to_string());

        assert_eq!(FieldPath::from_str(r"days.mon\.lunch"), Ok(dotted));
        assert_eq!(FieldPath::from_str(r"days.mon\[1\]"), Ok(bracketed));
        assert_eq!(
            FieldPath::from_str(r"back\\slash").unwrap(),
            FieldPath::key(r"back\slash")
        );
        assert_eq!(FieldPath::from_str("a\\"), Err(PathError::DanglingEscape));
    }

    #[test]
    fn root_is_prefix_of_everything() {
        let root = FieldPath::root();
        let zip = FieldPath::key("address").child("zip");
        assert!(root.is_empty());
        assert!(root.is_prefix_of(&zip));
        assert!(FieldPath::key("address").is_prefix_of(&zip));
        assert!(!zip.is_prefix_of(&FieldPath::key("address")));
    }
}
