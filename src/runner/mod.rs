//! Profile execution orchestration.

pub mod pipeline;

pub use pipeline::{
    execute_profile, plan, RunReport, Step, StepKind, StepOutcome, POSARGS,
};
