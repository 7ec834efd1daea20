//! Field paths locating a value inside a JSON document.
//!
//! A [`FieldPath`] is an ordered list of object keys and array indices,
//! e.g. `["ports", 0, "source"]`, rendered as `ports[0].source`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// An object field name.
    Key(String),
    /// An array element index.
    Index(usize),
}

impl PathSegment {
    /// Returns the key, if this segment is an object key.
    #[must_use]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(key) => Some(key),
            Self::Index(_) => None,
        }
    }

    /// Returns the index, if this segment is an array index.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Key(_) => None,
            Self::Index(index) => Some(*index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Location of a value relative to the validated root.
///
/// Most documents nest only a few levels deep, so segments are kept inline
/// up to depth four.
///
/// # Examples
///
/// ```
/// use shapeguard_validator::foundation::FieldPath;
///
/// let path = FieldPath::root().key("ports").index(0).key("source");
/// assert_eq!(path.to_string(), "ports[0].source");
/// assert_eq!(FieldPath::root().to_string(), "$");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath {
    segments: SmallVec<[PathSegment; 4]>,
}

impl FieldPath {
    /// The empty path, pointing at the validated value itself.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with the object key `key` appended.
    #[must_use = "key returns a new path"]
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.push(PathSegment::Key(key.into()));
        next
    }

    /// Returns a new path with the array index `index` appended.
    #[must_use = "index returns a new path"]
    pub fn index(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.push(PathSegment::Index(index));
        next
    }

    /// Appends a segment in place.
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// Removes and returns the last segment.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// Returns true for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true for the root path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the segments in order from the root.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the last segment.
    #[must_use]
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Returns true when the last segment is the object key `key`.
    #[must_use]
    pub fn ends_with_key(&self, key: &str) -> bool {
        self.last().and_then(PathSegment::as_key) == Some(key)
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("$");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if !is_plain_key(key) => {
                    let quoted = serde_json::to_string(key).map_err(|_| fmt::Error)?;
                    write!(f, "[{quoted}]")?;
                }
                PathSegment::Key(key) if i == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Keys that can be written after a dot without ambiguity.
fn is_plain_key(key: &str) -> bool {
    !key.is_empty() && !key.contains(['.', '[', ']', '"'])
}
