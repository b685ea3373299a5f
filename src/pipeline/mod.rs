// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod orchestrator;
mod progress;
mod repair;
mod report;

pub use orchestrator::{ReadmeSynchronizer, SyncOptions};
pub use progress::ProgressTracker;
pub use repair::BrokenImageRepairer;
pub use report::SyncReportGenerator;
