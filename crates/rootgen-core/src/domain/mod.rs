//! Core domain layer for rootgen.
//!
//! This module contains the pure generation logic. All I/O is handled via
//! ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: The index reads strings, the emitter returns strings
//! - **No logging**: Tracing lives in the application layer
//! - **Explicit context**: The import registry and `Meta` are passed in,
//!   never looked up globally
//!
// Public API - what the world sees
pub mod ast;
pub mod builder;
pub mod emitter;
pub mod error;
pub mod index;
pub mod meta;
pub mod registry;
pub mod render;
pub mod steps;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use builder::{AstBuilder, PackageRef, Pending, default_package_name};
pub use emitter::{EmittedFile, FileEmitter};
pub use error::{DomainError, ErrorCategory};
pub use index::{DeclarationIndex, ImportLayout, IndexedDecl, IndexedImport, SourceError};
pub use meta::{Meta, MetaBuilder, ROOT_FILENAME};
pub use registry::{ImportRegistry, keys};
pub use steps::{
    Action, DeclOutcome, GenerationStep, StepContext, root_file_pipeline,
};
pub use value_objects::{DeclKind, DirRole};

pub use validation::DomainValidator;
