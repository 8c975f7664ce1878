//! `morphgen.json` configuration.

use morph_inspector::InspectorOptions;
use morph_project::DiscoveryOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "morphgen.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{}'", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Generator settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneratorConfig {
    /// The declaration file holding the structure literal, matched by path suffix.
    pub target_file: String,
    /// The exported const whose initializer is the structure literal.
    pub target_const: String,
    pub kind_enum: String,
    /// Wrapper type of the factory parameter, `OptionalKind<T>`.
    pub optional_kind_type: String,
    pub structure_suffix: String,
    pub excluded_suffixes: Vec<String>,
    pub excluded_names: Vec<String>,
    /// Methods with this prefix are owned by the generator.
    pub generated_prefix: String,
    /// Member indentation used when the literal has no members to copy from.
    pub indent: String,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            target_file: "Structure.generated.ts".to_string(),
            target_const: "Structure".to_string(),
            kind_enum: "StructureKind".to_string(),
            optional_kind_type: "OptionalKind".to_string(),
            structure_suffix: "Structure".to_string(),
            excluded_suffixes: vec!["SpecificStructure".to_string()],
            excluded_names: vec!["Structure".to_string(), "KindedStructure".to_string()],
            generated_prefix: "create".to_string(),
            indent: "    ".to_string(),
            include: vec!["**/*.ts".to_string()],
            exclude: vec!["node_modules".to_string()],
        }
    }
}

impl GeneratorConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `morphgen.json` from `root`, or the defaults when there is none.
    pub fn load_from_root(root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = root.as_ref().join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(path)
        } else {
            debug!(root = %root.as_ref().display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("targetFile", &self.target_file),
            ("targetConst", &self.target_const),
            ("kindEnum", &self.kind_enum),
            ("optionalKindType", &self.optional_kind_type),
            ("structureSuffix", &self.structure_suffix),
            ("generatedPrefix", &self.generated_prefix),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(ConfigError::Invalid(format!("'{}' must not be empty", field)));
            }
        }
        if !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(ConfigError::Invalid("'indent' must contain only spaces and tabs".to_string()));
        }
        Ok(())
    }

    /// Whether a structure with this name gets a factory.
    pub fn includes_structure(&self, name: &str) -> bool {
        !self.excluded_suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
            && !self.excluded_names.iter().any(|excluded| excluded == name)
    }

    pub fn inspector_options(&self) -> InspectorOptions {
        InspectorOptions {
            structure_suffix: self.structure_suffix.clone(),
            kind_enum: self.kind_enum.clone(),
        }
    }

    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            include: self.include.clone(),
            exclude: self.exclude.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let config = GeneratorConfig::from_json("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.target_file, "Structure.generated.ts");
        assert_eq!(config.excluded_names, vec!["Structure", "KindedStructure"]);
    }

    #[test]
    fn test_camel_case_overrides() {
        let config = GeneratorConfig::from_json(
            r#"{ "targetFile": "Shapes.ts", "excludedSuffixes": [], "indent": "\t", "generatedPrefix": "make" }"#,
        )
        .unwrap();
        assert_eq!(config.target_file, "Shapes.ts");
        assert!(config.excluded_suffixes.is_empty());
        assert_eq!(config.indent, "\t");
        assert_eq!(config.generated_prefix, "make");
        assert_eq!(config.target_const, "Structure");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(GeneratorConfig::from_json(r#"{ "targetFiles": "x" }"#).is_err());
    }

    #[test]
    fn test_validate() {
        let config = GeneratorConfig {
            generated_prefix: String::new(),
            ..GeneratorConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(msg)) if msg.contains("generatedPrefix")));

        let config = GeneratorConfig {
            indent: "xx".to_string(),
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_includes_structure() {
        let config = GeneratorConfig::default();
        assert!(config.includes_structure("ClassDeclarationStructure"));
        assert!(!config.includes_structure("ClassDeclarationSpecificStructure"));
        assert!(!config.includes_structure("Structure"));
        assert!(!config.includes_structure("KindedStructure"));
        assert!(config.includes_structure("KindedStructures"));
    }
}
