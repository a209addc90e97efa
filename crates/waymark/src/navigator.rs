// File: src/navigator.rs
// Purpose: Navigator facade tying the route tree to paths, schemas, and URLs

use crate::error::NavError;
use crate::path::{PathBuilder, PathRef};
use crate::route_def::RouteDef;
use crate::url::{
    generate_url_from_segments, validate_url_against, GenerateOptions, UrlValidation,
};
use crate::walker::{accumulated_params_at, walk, OnNotFound, Walk};
use std::collections::HashMap;
use waymark_params::{ParamSchema, ParamValue};

/// Typed navigator over one route tree
///
/// The tree is supplied once, treated as immutable, and shared read-only
/// across calls: every operation is a pure synchronous function, so a
/// navigator can serve arbitrarily many concurrent resolutions.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use waymark::navigator::Navigator;
/// use waymark::route_def::{LeafDef, StackDef};
/// use waymark_params::{ParamType, ParamValue};
///
/// let nav = Navigator::new(
///     StackDef::new()
///         .route("home", LeafDef::new())
///         .route("profile", LeafDef::new().param("id", ParamType::text().required())),
/// );
///
/// let path = nav.path().child("profile").into_path();
/// let params = HashMap::from([("id".to_string(), ParamValue::from("42"))]);
///
/// assert_eq!(nav.generate_url(&path, &params).unwrap(), "profile?id=42");
/// assert!(nav.validate_url("profile?id=42").is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct Navigator {
    root: RouteDef,
}

impl Navigator {
    /// Create a navigator over a route tree
    ///
    /// The engine trusts the tree: structural well-formedness is owned by
    /// route-definition construction.
    // TODO: Verify that route names do not contain slashes or empty strings
    // TODO: Verify that declared initial_route names exist in their routes map
    pub fn new(root: impl Into<RouteDef>) -> Self {
        Self { root: root.into() }
    }

    /// The root of the route tree
    pub fn root(&self) -> &RouteDef {
        &self.root
    }

    /// Start a fresh path chain at the tree root
    ///
    /// Every call returns an independent builder; chains never share
    /// accumulated state.
    pub fn path(&self) -> PathBuilder {
        PathBuilder::new()
    }

    /// Walk `path` against the tree, yielding one step per prefix
    pub fn walk<'a>(&'a self, path: &'a [String]) -> Walk<'a> {
        walk(&self.root, path)
    }

    /// Merge the parameter schemas of every node from the root to the
    /// deepest node `path` resolves to (deeper wins)
    pub fn accumulated_params_at(
        &self,
        path: &[String],
        on_not_found: OnNotFound,
    ) -> Result<ParamSchema, NavError> {
        accumulated_params_at(&self.root, path, on_not_found)
    }

    /// Generate a URL from a path and parameters, validating the
    /// parameters against the schema accumulated along the path
    pub fn generate_url(
        &self,
        path: &PathRef,
        params: &HashMap<String, ParamValue>,
    ) -> Result<String, NavError> {
        self.generate_url_with(path, params, GenerateOptions::default())
    }

    /// [`generate_url`](Navigator::generate_url) with explicit options
    pub fn generate_url_with(
        &self,
        path: &PathRef,
        params: &HashMap<String, ParamValue>,
        options: GenerateOptions,
    ) -> Result<String, NavError> {
        generate_url_from_segments(&self.root, path.segments(), params, options)
    }

    /// Check an externally supplied URL against the tree
    ///
    /// Never fails: unresolvable paths and bad parameters are collected
    /// into [`UrlValidation::Invalid`] so a UI can display them.
    pub fn validate_url(&self, url: &str) -> UrlValidation {
        validate_url_against(&self.root, url)
    }
}
