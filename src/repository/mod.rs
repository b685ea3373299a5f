// file: src/repository/mod.rs
// description: Repository operations module exports
// reference: Internal module structure

pub mod locator;
pub mod registry;

pub use locator::{ImageLocator, ImageMatch};
pub use registry::{RepositoryEntry, RepositoryRegistry};
