//! Factory method descriptors.

use crate::catalog::StructureRecord;
use crate::config::GeneratorConfig;
use morph_printer::{MethodDeclarationStructure, ParameterStructure};

/// Declarations whose factory keeps the `Declaration` suffix, since the bare
/// name would read as a different node.
const KEEPS_DECLARATION_SUFFIX: &[&str] = &["ExportDeclaration", "ImportDeclaration", "VariableDeclaration"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    pub parameter_name: String,
    pub parameter_type: String,
    pub return_type: String,
    pub body: String,
    pub docs: String,
}

impl MethodDescriptor {
    pub fn to_structure(&self) -> MethodDeclarationStructure {
        MethodDeclarationStructure {
            name: self.name.clone(),
            docs: Some(self.docs.clone()),
            parameters: vec![ParameterStructure {
                name: self.parameter_name.clone(),
                type_annotation: Some(self.parameter_type.clone()),
            }],
            return_type: Some(self.return_type.clone()),
            statements: vec![self.body.clone()],
        }
    }
}

/// `ClassDeclarationStructure` -> `Class`, `VariableDeclarationStructure` ->
/// `VariableDeclaration`, `JsxAttributeStructure` -> `JsxAttribute`.
pub fn format_name(structure_name: &str, structure_suffix: &str) -> String {
    let mut name = structure_name.replacen(structure_suffix, "", 1);
    if name.ends_with("Node") {
        name.truncate(name.len() - "Node".len());
    }
    if !KEEPS_DECLARATION_SUFFIX.contains(&name.as_str()) && name.ends_with("Declaration") {
        name.truncate(name.len() - "Declaration".len());
    }
    name
}

pub fn synthesize(record: &StructureRecord, config: &GeneratorConfig) -> MethodDescriptor {
    MethodDescriptor {
        name: format!(
            "{}{}",
            config.generated_prefix,
            format_name(&record.name, &config.structure_suffix)
        ),
        parameter_name: "structure".to_string(),
        parameter_type: format!("{}<{}>", config.optional_kind_type, record.name),
        return_type: record.name.clone(),
        body: format!("return {{ ...structure, kind: {}.{} }};", config.kind_enum, record.kind),
        docs: format!("Create a structure for a {}.", record.name),
    }
}

pub fn synthesize_all(records: &[StructureRecord], config: &GeneratorConfig) -> Vec<MethodDescriptor> {
    records.iter().map(|record| synthesize(record, config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_name() {
        let cases = [
            ("ClassDeclarationStructure", "Class"),
            ("VariableDeclarationStructure", "VariableDeclaration"),
            ("ImportDeclarationStructure", "ImportDeclaration"),
            ("ExportDeclarationStructure", "ExportDeclaration"),
            ("ConstructorDeclarationStructure", "Constructor"),
            ("PropertyAssignmentStructure", "PropertyAssignment"),
            ("JsxAttributeStructure", "JsxAttribute"),
            ("DecoratorStructure", "Decorator"),
            ("SourceFileStructure", "SourceFile"),
            ("TypeParameterDeclarationStructure", "TypeParameter"),
        ];
        for (input, expected) in cases {
            assert_eq!(format_name(input, "Structure"), expected, "{}", input);
        }
    }

    #[test]
    fn test_format_name_edge_cases() {
        // Only the first occurrence of the suffix is removed.
        assert_eq!(format_name("StructureStructure", "Structure"), "Structure");
        // A trailing `Node` is removed before `Declaration` is considered.
        assert_eq!(format_name("FooDeclarationNodeStructure", "Structure"), "Foo");
        assert_eq!(format_name("VariableDeclarationNodeStructure", "Structure"), "VariableDeclaration");
    }

    #[test]
    fn test_synthesize() {
        let record = StructureRecord {
            name: "ClassDeclarationStructure".to_string(),
            kind: "Class".to_string(),
        };
        let method = synthesize(&record, &GeneratorConfig::default());
        assert_eq!(
            method,
            MethodDescriptor {
                name: "createClass".to_string(),
                parameter_name: "structure".to_string(),
                parameter_type: "OptionalKind<ClassDeclarationStructure>".to_string(),
                return_type: "ClassDeclarationStructure".to_string(),
                body: "return { ...structure, kind: StructureKind.Class };".to_string(),
                docs: "Create a structure for a ClassDeclarationStructure.".to_string(),
            }
        );
        let structure = method.to_structure();
        assert_eq!(structure.statements, vec![method.body.clone()]);
        assert_eq!(structure.parameters[0].type_annotation.as_deref(), Some("OptionalKind<ClassDeclarationStructure>"));
    }
}
