//! Rootgen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the rootgen
//! root-command generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           rootgen-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (GenerateService)            │
//! │   load → index → steps → emit → write   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │            (Driven: Filesystem)         │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    rootgen-adapters (Infrastructure)    │
//! │  (LocalFilesystem, MemoryFilesystem)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (DeclarationIndex, AstBuilder, Emitter) │
//! │            No I/O, no logging           │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rootgen_core::{
//!     application::GenerateService,
//!     domain::{DirRole, ImportRegistry, Meta},
//! };
//!
//! // 1. Describe the target application
//! let meta = Meta::builder("demo")
//!     .root("./demo")
//!     .dir(DirRole::Cmd, "cmd")
//!     .dir(DirRole::Global, "g")
//!     .build()
//!     .unwrap();
//!
//! // 2. Use application service (with an injected filesystem adapter)
//! let service = GenerateService::new(filesystem, ImportRegistry::new());
//! let report = service.generate(&meta).unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateService, GenerationPlan, GenerationReport, ports::Filesystem,
    };
    pub use crate::domain::{
        AstBuilder, DeclKind, DeclarationIndex, DirRole, FileEmitter, ImportRegistry, Meta,
        MetaBuilder,
    };
    pub use crate::error::{RootgenError, RootgenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
