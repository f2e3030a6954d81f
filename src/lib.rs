//! facto - factor-gated test environment matrix runner.
//!
//! facto reads a declarative `facto.yml` matrix, resolves a requested
//! environment name (hyphen-separated factor tokens such as
//! `test-cov-xdist`) into a concrete [`matrix::Profile`], and runs the
//! profile's install and command steps sequentially in an isolated child
//! environment.
//!
//! # Example
//!
//! ```no_run
//! use facto::config::load_merged_config;
//! use facto::matrix::resolve;
//!
//! let config = load_merged_config(std::path::Path::new("."))?;
//! let profile = resolve(&config, "test-cov-xdist")?;
//! println!("{:?}", profile.commands);
//! # Ok::<(), facto::FactoError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod matrix;
pub mod runner;
pub mod shell;
pub mod ui;

pub use error::{FactoError, Result};
