//! End-to-end matching pipeline: pitch → classification → sources → verdicts → artifact.

pub mod output;
pub mod pipeline;

pub use pipeline::{
    MatchRunConfig, MatchRunResult, ProgressReporter, SilentProgress, filter_by_focus, run_match,
};
