//! Environment name resolution against the matrix.
//!
//! - [`factors`] - factor tokens of an environment name
//! - [`profile`] - the fully resolved, read-only profile record
//! - [`resolver`] - layering and gating logic

pub mod factors;
pub mod profile;
pub mod resolver;

pub use factors::FactorSet;
pub use profile::Profile;
pub use resolver::resolve;
