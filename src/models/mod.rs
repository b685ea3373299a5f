// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod image;
pub mod mapping;
pub mod outcome;

pub use image::{ImageReference, ImageSyntax};
pub use mapping::ReadmeMapping;
pub use outcome::{ImageStats, MappingResult, RepairStats, ReportStatus, SparseRecord, SyncOutcome};
