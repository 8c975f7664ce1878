use crate::config::ConfigError;
use miette::Diagnostic;
use morph_inspector::InspectError;
use morph_project::ProjectError;
use thiserror::Error;

/// Everything that stops a generation run. No text is written on error.
#[derive(Debug, Error, Diagnostic)]
pub enum GenerationError {
    #[error("could not find {what} '{name}'")]
    #[diagnostic(code(morphgen::not_found))]
    NotFound { what: String, name: String },

    #[error("expected '{name}' to be {expected}, but it is {actual}")]
    #[diagnostic(
        code(morphgen::shape_mismatch),
        help("the structure object must be written as `export const Structure = {{ ... }} as const;`")
    )]
    ShapeMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("'{file}' has syntax errors:\n{message}")]
    #[diagnostic(code(morphgen::syntax))]
    Syntax { file: String, message: String },

    #[error("factory '{name}' would be generated for both '{first}' and '{second}'")]
    #[diagnostic(
        code(morphgen::duplicate_factory_name),
        help("exclude one of the structures in morphgen.json, or rename the member that collides")
    )]
    DuplicateFactoryName {
        name: String,
        first: String,
        second: String,
    },

    #[error(transparent)]
    #[diagnostic(code(morphgen::io))]
    Io(#[from] ProjectError),

    #[error(transparent)]
    #[diagnostic(code(morphgen::config))]
    Config(#[from] ConfigError),
}

impl From<InspectError> for GenerationError {
    fn from(error: InspectError) -> Self {
        match error {
            InspectError::NotFound { what, name } => GenerationError::NotFound {
                what: what.to_string(),
                name,
            },
            InspectError::ShapeMismatch { name, expected, actual } => {
                GenerationError::ShapeMismatch { name, expected, actual }
            }
        }
    }
}

pub type GenerationResult<T> = Result<T, GenerationError>;
