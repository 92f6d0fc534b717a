//! Command-line facing pieces that sit between argument parsing and the library

pub mod orchestration;

pub use orchestration::{
    run_release_workflow, Confirmation, ReleaseSummary, ReleaseWorkflowArgs, Step,
    WorkflowOutcome,
};
