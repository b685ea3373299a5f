// file: src/content/mod.rs
// description: provenance annotation and content sufficiency classification
// reference: internal module structure

pub mod annotator;

pub use annotator::{Annotation, ContentAnnotator, Severity};
