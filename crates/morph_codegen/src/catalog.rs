//! Which structures get a factory method.

use crate::config::GeneratorConfig;
use morph_core::collections::FxIndexMap;
use morph_inspector::{Inspector, StructureId};
use tracing::{debug, trace};

/// A structure that gets a factory: its interface name and kind member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureRecord {
    pub name: String,
    pub kind: String,
}

/// Records collected so far, keyed by structure identity in discovery order.
pub type StructureRecords = FxIndexMap<StructureId, StructureRecord>;

/// Hook run after a structure is recorded, with the chance to record its
/// ancestors too.
pub trait AncestorVisitor {
    fn visit_ancestors(&mut self, inspector: &Inspector<'_, '_>, structure: StructureId, records: &mut StructureRecords);
}

/// Records no ancestors; only structures listed directly get factories.
#[derive(Debug, Default, Clone, Copy)]
pub struct InertAncestors;

impl AncestorVisitor for InertAncestors {
    fn visit_ancestors(&mut self, _inspector: &Inspector<'_, '_>, _structure: StructureId, _records: &mut StructureRecords) {}
}

/// Collect the structures to generate factories for, in first-discovery order.
pub fn collect_structures(inspector: &Inspector<'_, '_>, config: &GeneratorConfig) -> Vec<StructureRecord> {
    collect_structures_with(inspector, config, &mut InertAncestors)
}

pub fn collect_structures_with(
    inspector: &Inspector<'_, '_>,
    config: &GeneratorConfig,
    ancestors: &mut dyn AncestorVisitor,
) -> Vec<StructureRecord> {
    let mut records = StructureRecords::default();

    for id in inspector.list_structure_types() {
        let name = inspector.structure_name(id);
        if !config.includes_structure(name) {
            trace!(structure = name, "excluded");
            continue;
        }
        if records.contains_key(&id) {
            continue;
        }
        let Some(kind) = inspector.get_structure_kind_name(id) else {
            trace!(structure = name, "skipped, no kind");
            continue;
        };
        records.insert(
            id,
            StructureRecord {
                name: name.to_string(),
                kind,
            },
        );
        ancestors.visit_ancestors(inspector, id, &mut records);
    }

    let structures: Vec<StructureRecord> = records
        .into_values()
        .filter(|record| config.includes_structure(&record.name))
        .collect();
    debug!(count = structures.len(), "collected structures");
    structures
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use morph_project::{ParsedProject, Project};

    const STRUCTURES: &str = "\
export interface Structure { leadingTrivia?: string; }
export interface KindedStructure<TKind extends StructureKind> { kind: TKind; }
export interface ClassDeclarationStructure extends Structure, ClassDeclarationSpecificStructure {}
interface ClassDeclarationSpecificStructure extends KindedStructure<StructureKind.Class> {}
export interface NamedStructure { name: string; }
export interface DecoratorStructure extends KindedStructure<StructureKind.Decorator> {}
export interface ClassDeclarationStructure { isAbstract?: boolean; }
export interface ExportedBaseStructure extends KindedStructure<StructureKind.Base> {}
export interface DerivedStructure extends ExportedBaseStructure {}
";

    fn with_inspector(f: impl FnOnce(&Inspector<'_, '_>)) {
        let mut project = Project::new();
        project.add_file("structures.ts", STRUCTURES);
        let arena = Bump::new();
        let parsed = ParsedProject::parse(&project, &arena);
        let inspector = Inspector::new(&parsed, GeneratorConfig::default().inspector_options());
        f(&inspector);
    }

    fn names(records: &[StructureRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_collect_excludes_dedups_and_skips_kindless() {
        with_inspector(|inspector| {
            let records = collect_structures(inspector, &GeneratorConfig::default());
            assert_eq!(
                names(&records),
                vec!["ClassDeclarationStructure", "DecoratorStructure", "ExportedBaseStructure", "DerivedStructure"]
            );
            assert_eq!(records[0].kind, "Class");
            assert_eq!(records[3].kind, "Base");
        });
    }

    #[test]
    fn test_exclusion_lists_are_configurable() {
        with_inspector(|inspector| {
            let config = GeneratorConfig {
                excluded_suffixes: vec![],
                excluded_names: vec!["DecoratorStructure".to_string()],
                ..GeneratorConfig::default()
            };
            let records = collect_structures(inspector, &config);
            assert_eq!(
                names(&records),
                vec![
                    "ClassDeclarationStructure",
                    "ClassDeclarationSpecificStructure",
                    "ExportedBaseStructure",
                    "DerivedStructure"
                ]
            );
        });
    }

    /// Records every base structure that has a kind.
    struct RecordingAncestors;

    impl AncestorVisitor for RecordingAncestors {
        fn visit_ancestors(&mut self, inspector: &Inspector<'_, '_>, structure: StructureId, records: &mut StructureRecords) {
            for base in inspector.get_base_structures(structure) {
                if let Some(kind) = inspector.get_structure_kind_name(base) {
                    records.entry(base).or_insert_with(|| StructureRecord {
                        name: inspector.structure_name(base).to_string(),
                        kind,
                    });
                }
            }
        }
    }

    #[test]
    fn test_ancestor_records_are_filtered_again() {
        with_inspector(|inspector| {
            let records = collect_structures_with(inspector, &GeneratorConfig::default(), &mut RecordingAncestors);
            // The specific base is recorded by the hook, then filtered out.
            assert!(!names(&records).contains(&"ClassDeclarationSpecificStructure"));
            assert_eq!(names(&records).len(), 4);
        });
    }
}
