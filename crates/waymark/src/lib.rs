// Waymark - typed route registry and URL codec
// One declarative route tree addresses every screen of an app and
// produces/consumes the URLs that point at them, with type-checked params

pub mod error;
pub mod path;
pub mod route_def;

// Engine modules
pub mod navigator;
pub mod url;
pub mod walker;

// Re-export core types
pub use error::NavError;
pub use navigator::Navigator;
pub use path::{PathBuilder, PathRef};
pub use route_def::{LeafDef, RouteDef, StackDef, SwitchDef};
pub use url::{parse_url, GenerateOptions, ParsedUrl, UrlValidation};
pub use walker::{accumulated_params_at, walk, OnNotFound, Walk, WalkStep};

// Re-export commonly used types from waymark-params
pub use waymark_params::{
    validate_and_clean_params, ParamKind, ParamSchema, ParamType, ParamValue, RawValue, Validated,
};
