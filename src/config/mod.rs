//! Matrix configuration loading, parsing, and layering.
//!
//! - [`schema`] - serde types for the `facto.yml` format
//! - [`loader`] - file discovery and layered loading
//! - [`merger`] - deep-merge semantics for the local overlay

pub mod loader;
pub mod merger;
pub mod schema;

pub use loader::{
    find_project_root, load_from_paths, load_merged_config, ConfigPaths, LOCAL_FILE, MATRIX_FILE,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{
    CommandEntry, DefaultProfile, EnvVarEntry, Gated, MatrixConfig, ProfileConfig, ProjectConfig,
};
