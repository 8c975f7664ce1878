//! morph_codegen: Regenerates the structure factory methods of a ts-morph
//! style `Structure.generated.ts`.
//!
//! The pipeline reads the project through the inspector, builds one
//! factory descriptor per structure interface that has a kind, and rewrites
//! only the spans it owns: generated methods of the structure literal and
//! the import declarations of the target file.

pub mod catalog;
pub mod config;
mod driver;
mod error;
pub mod imports;
pub mod rewriter;
pub mod synthesizer;

pub use catalog::{collect_structures, collect_structures_with, AncestorVisitor, StructureRecord};
pub use config::{ConfigError, GeneratorConfig, CONFIG_FILE_NAME};
pub use driver::{generate_structure_creators, GenerationOutcome};
pub use error::{GenerationError, GenerationResult};
pub use synthesizer::{format_name, MethodDescriptor};
