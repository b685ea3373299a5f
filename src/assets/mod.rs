// file: src/assets/mod.rs
// description: image path rewriting and canonical asset directory management
// reference: internal module structure

pub mod copier;
pub mod resolver;

pub use copier::{AssetCopier, CopyAction};
pub use resolver::{ASSETS_SUBDIR, PathResolver, ResolvedPath, relative_path};
