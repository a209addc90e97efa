// File: src/route_def.rs
// Purpose: Declarative route tree definitions (stacks, switches, leaves)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use waymark_params::{ParamSchema, ParamType};

/// A node in the route tree
///
/// A tree is built once, up front, and never mutated by the engine. Node
/// names live in the parent's `routes` map; a node has no identity beyond
/// its position in the tree.
///
/// Trees can be built fluently or declared as data:
///
/// ```
/// use waymark::route_def::{LeafDef, StackDef};
/// use waymark_params::ParamType;
///
/// let root = StackDef::new()
///     .route("home", LeafDef::new())
///     .route("profile", LeafDef::new().param("id", ParamType::text().required()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RouteDef {
    Stack(StackDef),
    Switch(SwitchDef),
    Leaf(LeafDef),
}

/// Ordered children with one screen visible at a time (push/pop)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StackDef {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: ParamSchema,

    #[serde(default)]
    pub routes: HashMap<String, RouteDef>,

    /// Route shown when the stack is entered without a deeper path.
    /// Consumed by the navigation runtime, not by resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_route: Option<String>,
}

/// Independently addressable children (tabs, drawers)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwitchDef {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: ParamSchema,

    #[serde(default)]
    pub routes: HashMap<String, RouteDef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_route: Option<String>,

    /// Keep inactive children mounted when switching focus.
    /// Consumed by the navigation runtime, not by resolution.
    #[serde(default)]
    pub keep_children_mounted: bool,
}

/// Terminal node with no children
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeafDef {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: ParamSchema,
}

impl RouteDef {
    /// This node's own parameter schema
    pub fn params(&self) -> &ParamSchema {
        match self {
            RouteDef::Stack(def) => &def.params,
            RouteDef::Switch(def) => &def.params,
            RouteDef::Leaf(def) => &def.params,
        }
    }

    /// This node's children, if it can have any
    pub fn routes(&self) -> Option<&HashMap<String, RouteDef>> {
        match self {
            RouteDef::Stack(def) => Some(&def.routes),
            RouteDef::Switch(def) => Some(&def.routes),
            RouteDef::Leaf(_) => None,
        }
    }

    /// Look up a direct child by segment name
    pub fn child(&self, name: &str) -> Option<&RouteDef> {
        self.routes()?.get(name)
    }
}

impl StackDef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named child route
    pub fn route(mut self, name: impl Into<String>, def: impl Into<RouteDef>) -> Self {
        self.routes.insert(name.into(), def.into());
        self
    }

    /// Declare a parameter on this node
    pub fn param(mut self, name: impl Into<String>, param_type: ParamType) -> Self {
        self.params.insert(name.into(), param_type);
        self
    }

    /// Set the route shown when the stack is entered directly
    pub fn initial_route(mut self, name: impl Into<String>) -> Self {
        self.initial_route = Some(name.into());
        self
    }
}

impl SwitchDef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named child route
    pub fn route(mut self, name: impl Into<String>, def: impl Into<RouteDef>) -> Self {
        self.routes.insert(name.into(), def.into());
        self
    }

    /// Declare a parameter on this node
    pub fn param(mut self, name: impl Into<String>, param_type: ParamType) -> Self {
        self.params.insert(name.into(), param_type);
        self
    }

    /// Set the route focused when the switch is entered directly
    pub fn initial_route(mut self, name: impl Into<String>) -> Self {
        self.initial_route = Some(name.into());
        self
    }

    /// Keep inactive children mounted when switching focus
    pub fn keep_children_mounted(mut self, keep: bool) -> Self {
        self.keep_children_mounted = keep;
        self
    }
}

impl LeafDef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a parameter on this node
    pub fn param(mut self, name: impl Into<String>, param_type: ParamType) -> Self {
        self.params.insert(name.into(), param_type);
        self
    }
}

impl From<StackDef> for RouteDef {
    fn from(def: StackDef) -> Self {
        RouteDef::Stack(def)
    }
}

impl From<SwitchDef> for RouteDef {
    fn from(def: SwitchDef) -> Self {
        RouteDef::Switch(def)
    }
}

impl From<LeafDef> for RouteDef {
    fn from(def: LeafDef) -> Self {
        RouteDef::Leaf(def)
    }
}
