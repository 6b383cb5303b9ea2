//! Infrastructure adapters for rootgen.
//!
//! This crate implements the ports defined in `rootgen-core::application::ports`
//! and provides the data the core deliberately does not own: the built-in
//! import registry and the `rootgen.toml` project manifest.
//! It contains all external dependencies and I/O operations.

pub mod builtin_registry;
pub mod filesystem;
pub mod manifest_loader;

// Re-export commonly used adapters
pub use builtin_registry::builtin_registry;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use manifest_loader::{MANIFEST_FILENAME, ManifestLoader, ProjectManifest};
