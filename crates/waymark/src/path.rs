// File: src/path.rs
// Purpose: Path values and the chained builder that produces them

use crate::error::NavError;
use std::fmt;
use std::ops::Deref;

/// An ordered list of segment names addressing a node from the tree root
///
/// The empty path addresses the root itself. A `PathRef` is a pure value:
/// it carries no tree knowledge, and resolution re-walks the tree on every
/// call. Values come from [`PathBuilder`] chains or from checked segment
/// input via [`PathRef::from_segments`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRef {
    segments: Vec<String>,
}

impl PathRef {
    /// The root path (no segments)
    pub fn root() -> Self {
        Self { segments: Vec::new() }
    }

    /// Build a path from raw segment names
    ///
    /// This is the unchecked-input entry point. Segment names must be
    /// non-empty and must not contain `/`; anything else cannot have come
    /// from a route tree and is rejected rather than silently resolving
    /// to not-found.
    ///
    /// # Examples
    ///
    /// ```
    /// use waymark::path::PathRef;
    ///
    /// let path = PathRef::from_segments(["settings", "account"]).unwrap();
    /// assert_eq!(&*path, &["settings".to_string(), "account".to_string()]);
    ///
    /// assert!(PathRef::from_segments([""]).is_err());
    /// assert!(PathRef::from_segments(["a/b"]).is_err());
    /// ```
    pub fn from_segments<I, S>(segments: I) -> Result<Self, NavError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();

        for segment in &segments {
            if segment.is_empty() || segment.contains('/') {
                return Err(NavError::InvalidPath {
                    message: format!("Invalid path segment `{segment}` (segment names are non-empty and contain no `/`)"),
                });
            }
        }

        Ok(Self { segments })
    }

    /// The segment names, root first
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl Deref for PathRef {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for PathRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

/// Builder that turns chained name access into a path
///
/// Each [`child`](PathBuilder::child) consumes the builder and returns a
/// new one with the name appended, so the accumulated list is threaded
/// through the chain by value: two chains can never share state, and a
/// consumed builder cannot be reused. The terminal
/// [`into_path`](PathBuilder::into_path) yields the accumulated path.
///
/// Every call to [`Navigator::path`](crate::navigator::Navigator::path)
/// starts a fresh, independent chain.
///
/// # Examples
///
/// ```
/// use waymark::path::PathBuilder;
///
/// let path = PathBuilder::new().child("settings").child("account").into_path();
/// assert_eq!(path.to_string(), "settings/account");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    segments: Vec<String>,
}

impl PathBuilder {
    /// Start a chain at the tree root
    pub fn new() -> Self {
        Self::default()
    }

    /// Descend into the named child
    pub fn child(mut self, name: impl Into<String>) -> Self {
        self.segments.push(name.into());
        self
    }

    /// Finish the chain, yielding the accumulated path
    pub fn into_path(self) -> PathRef {
        PathRef {
            segments: self.segments,
        }
    }
}

impl From<PathBuilder> for PathRef {
    fn from(builder: PathBuilder) -> Self {
        builder.into_path()
    }
}
