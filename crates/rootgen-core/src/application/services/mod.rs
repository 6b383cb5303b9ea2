//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate the root file" or "inspect a file".

pub mod generate_service;

pub use generate_service::{GenerateService, GenerationPlan, GenerationReport};
