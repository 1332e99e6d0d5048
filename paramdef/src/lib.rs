//! Schema-driven parameter resolution.
//!
//! A schema document declares every parameter a program understands: its
//! type, bounds, allowed values, and default. Callers supply any number of
//! override layers, which are merged in order and resolved against the
//! schema into one complete, validated tree. Parameters may enumerate over
//! populations declared under the schema's `classes` key, and overrides the
//! schema never consumed are reported after resolution.
//!
//! ```rust
//! use paramdef::{ResolveOptions, resolve_params};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "classes": {"animals": {"type": "array", "values": ["cat", "dog"], "default": ["cat"]}},
//!     "count": {"type": "sub-dict", "keys": ["animals"], "default": {"type": "int", "default": 1}},
//! });
//! let resolved = resolve_params(&schema, &[json!({"count": {"cat": 3}})], &ResolveOptions::new())?;
//! assert_eq!(resolved.params()["count"], json!({"cat": 3}));
//! # Ok::<_, paramdef::ParamError>(())
//! ```

mod audit;
mod check;
mod error;
pub mod file;
mod merge;
mod params;
mod path;
mod population;
mod resolve;
mod schema;

pub use audit::{UnusedKind, UnusedParam, find_unused};
pub use check::check_value;
pub use error::{ParamError, ParamResult};
pub use merge::{merge_layers, merge_maps, merge_value};
pub use params::{ResolveOptions, ResolvedParams, create_params, resolve_params};
pub use path::KeyPath;
pub use population::{PopulationEntry, Populations};
pub use resolve::{CLASSES_KEY, Resolver, resolve_classes};
pub use schema::{FieldKind, FieldSpec, Fields, LeafSpec, Membership, RecordSpec, SubDictSpec};
