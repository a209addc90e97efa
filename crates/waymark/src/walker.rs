// File: src/walker.rs
// Purpose: Tree walking and parameter schema accumulation

use crate::error::NavError;
use crate::route_def::RouteDef;
use waymark_params::ParamSchema;

/// One step of a walk from the tree root along a path
#[derive(Debug, Clone, PartialEq)]
pub enum WalkStep<'a> {
    /// The path prefix resolved to a node
    Matched {
        def: &'a RouteDef,
        /// Segment name of this node; `""` for the synthetic root step
        name: &'a str,
        /// Path consumed so far, including this step's segment
        prefix: &'a [String],
    },
    /// No node exists for this prefix; always the final step
    NotFound { prefix: &'a [String] },
}

/// Lazy iterator over the steps of a walk
///
/// Yields a synthetic root step first, then one step per path segment.
/// A segment with no matching child yields a single [`WalkStep::NotFound`]
/// and fuses the iterator — remaining segments are never visited.
///
/// A fully resolving path therefore yields exactly `path.len() + 1`
/// matched steps; an unresolvable one yields a strictly shorter sequence
/// ending in exactly one `NotFound`.
///
/// # Examples
///
/// ```
/// use waymark::route_def::{LeafDef, StackDef};
/// use waymark::walker::{walk, WalkStep};
///
/// let root = StackDef::new().route("home", LeafDef::new()).into();
/// let path = vec!["home".to_string()];
///
/// let steps: Vec<_> = walk(&root, &path).collect();
/// assert_eq!(steps.len(), 2);
/// assert!(matches!(steps[1], WalkStep::Matched { name: "home", .. }));
/// ```
pub struct Walk<'a> {
    path: &'a [String],
    current: &'a RouteDef,
    next_index: usize,
    started: bool,
    done: bool,
}

impl<'a> Walk<'a> {
    pub fn new(root: &'a RouteDef, path: &'a [String]) -> Self {
        Self {
            path,
            current: root,
            next_index: 0,
            started: false,
            done: false,
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = WalkStep<'a>;

    fn next(&mut self) -> Option<WalkStep<'a>> {
        if self.done {
            return None;
        }

        let path = self.path;

        // Synthetic root step: the empty prefix always resolves
        if !self.started {
            self.started = true;
            return Some(WalkStep::Matched {
                def: self.current,
                name: "",
                prefix: &path[..0],
            });
        }

        if self.next_index >= path.len() {
            self.done = true;
            return None;
        }

        let name = &path[self.next_index];
        let prefix = &path[..=self.next_index];
        self.next_index += 1;

        let current = self.current;
        match current.child(name) {
            Some(child) => {
                self.current = child;
                Some(WalkStep::Matched { def: child, name, prefix })
            }
            None => {
                self.done = true;
                tracing::debug!("No route matches segment `{}` in path {}", name, path.join("/"));
                Some(WalkStep::NotFound { prefix })
            }
        }
    }
}

/// Walk `path` against the tree rooted at `root`
pub fn walk<'a>(root: &'a RouteDef, path: &'a [String]) -> Walk<'a> {
    Walk::new(root, path)
}

/// What schema accumulation does when a path fails to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnNotFound {
    /// Fail with [`NavError::NotFound`] carrying the full requested path
    Error,
    /// Stop accumulating and return what was merged so far
    Ignore,
}

/// Merge the parameter schemas of every node from the root to the deepest
/// node `path` resolves to
///
/// Deeper nodes overwrite shallower ones on key collision, so a leaf can
/// re-specify a parameter an ancestor also declares (e.g. tighten an
/// optional ancestor parameter into a required one).
pub fn accumulated_params_at(
    root: &RouteDef,
    path: &[String],
    on_not_found: OnNotFound,
) -> Result<ParamSchema, NavError> {
    let mut merged = ParamSchema::new();

    for step in walk(root, path) {
        match step {
            WalkStep::Matched { def, .. } => {
                merged.extend(def.params().iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            WalkStep::NotFound { .. } => match on_not_found {
                OnNotFound::Error => {
                    return Err(NavError::not_found(
                        format!(
                            "Unable to find route definition for the path {}",
                            path.join("/")
                        ),
                        path,
                    ));
                }
                OnNotFound::Ignore => break,
            },
        }
    }

    Ok(merged)
}
