//! Factor tokens of an environment name.
//!
//! An environment name is a sequence of hyphen-separated factor tokens
//! (`test-cov-xdist` carries `test`, `cov`, `xdist`). Gated configuration
//! fragments activate only when their factor is present in the name.

use crate::error::{FactoError, Result};
use regex::Regex;
use std::sync::OnceLock;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9_.]*$").unwrap())
}

/// The parsed factor tokens of one environment name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorSet {
    name: String,
    factors: Vec<String>,
}

impl FactorSet {
    /// Parse an environment name into its factor tokens.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidation` when the name is empty or any token is
    /// not lowercase alphanumeric (underscores and dots allowed).
    pub fn parse(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(FactoError::ConfigValidation {
                message: "environment name is empty".to_string(),
            });
        }

        let factors: Vec<String> = name.split('-').map(str::to_string).collect();
        for factor in &factors {
            if !token_pattern().is_match(factor) {
                return Err(FactoError::ConfigValidation {
                    message: format!(
                        "invalid factor token '{}' in environment name '{}'",
                        factor, name
                    ),
                });
            }
        }

        Ok(Self {
            name: name.to_string(),
            factors,
        })
    }

    /// The full environment name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All factor tokens in order.
    pub fn factors(&self) -> &[String] {
        &self.factors
    }

    /// The leading factor token.
    pub fn first(&self) -> &str {
        &self.factors[0]
    }

    /// Whether a single factor token is present.
    pub fn contains(&self, factor: &str) -> bool {
        self.factors.iter().any(|f| f == factor)
    }

    /// Whether a gate matches. Gates may list several factors separated by
    /// commas (`jwst,romancal`), any of which activates the gate.
    pub fn matches_gate(&self, gate: &str) -> bool {
        gate.split(',')
            .map(str::trim)
            .any(|token| self.contains(token))
    }

    /// Whether an optionally-gated item is active for this name.
    pub fn is_active(&self, gate: Option<&str>) -> bool {
        match gate {
            None => true,
            Some(gate) => self.matches_gate(gate),
        }
    }
}
