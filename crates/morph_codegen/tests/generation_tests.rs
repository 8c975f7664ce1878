use morph_codegen::{generate_structure_creators, GenerationError, GeneratorConfig};
use morph_project::Project;

const TARGET: &str = "src/structures/Structure.generated.ts";

const GENERATED_FILE: &str = "\
import { StructureKind } from \"./StructureKind\";
import { Obsolete } from \"./Obsolete\";

export const Structure = {
    /** Type guard. */
    isClass(structure: { kind?: StructureKind }): boolean {
        return structure.kind === StructureKind.Class;
    },
    createOld(structure: OptionalKind<OldStructure>): OldStructure {
        return { ...structure, kind: StructureKind.Old };
    },
} as const;
";

const EXPECTED: &str = "\
import { StructureKind } from \"./StructureKind\";
import { OptionalKind } from \"../types\";
import { ClassDeclarationStructure } from \"./class/ClassDeclarationStructure\";
import { DecoratorStructure } from \"./decorator/DecoratorStructure\";
import { ImportDeclarationStructure } from \"./module/ImportDeclarationStructure\";

export const Structure = {
    /** Type guard. */
    isClass(structure: { kind?: StructureKind }): boolean {
        return structure.kind === StructureKind.Class;
    },
    /** Create a structure for a ClassDeclarationStructure. */
    createClass(structure: OptionalKind<ClassDeclarationStructure>): ClassDeclarationStructure {
        return { ...structure, kind: StructureKind.Class };
    },
    /** Create a structure for a DecoratorStructure. */
    createDecorator(structure: OptionalKind<DecoratorStructure>): DecoratorStructure {
        return { ...structure, kind: StructureKind.Decorator };
    },
    /** Create a structure for a ImportDeclarationStructure. */
    createImportDeclaration(structure: OptionalKind<ImportDeclarationStructure>): ImportDeclarationStructure {
        return { ...structure, kind: StructureKind.ImportDeclaration };
    },
} as const;
";

fn structures_project(target: &str) -> Project {
    let mut project = Project::new();
    project.add_file(
        "src/structures/StructureKind.ts",
        "export enum StructureKind { Class, Decorator, ImportDeclaration }\n",
    );
    project.add_file(
        "src/structures/Structure.ts",
        "import { StructureKind } from \"./StructureKind\";\n\
         export interface Structure { leadingTrivia?: string; }\n\
         export interface KindedStructure<TKind extends StructureKind> { kind: TKind; }\n",
    );
    project.add_file(
        "src/structures/class/ClassDeclarationStructure.ts",
        "import { Structure, KindedStructure } from \"../Structure\";\n\
         import { StructureKind } from \"../StructureKind\";\n\
         export interface ClassDeclarationStructure extends Structure, ClassDeclarationSpecificStructure {}\n\
         interface ClassDeclarationSpecificStructure extends KindedStructure<StructureKind.Class> { isAbstract?: boolean; }\n",
    );
    project.add_file(
        "src/structures/decorator/DecoratorStructure.ts",
        "import { KindedStructure } from \"../Structure\";\n\
         import { StructureKind } from \"../StructureKind\";\n\
         export interface DecoratorStructure extends KindedStructure<StructureKind.Decorator> { name: string; }\n",
    );
    project.add_file(
        "src/structures/module/ImportDeclarationStructure.ts",
        "import { KindedStructure } from \"../Structure\";\n\
         import { StructureKind } from \"../StructureKind\";\n\
         export interface ImportDeclarationStructure extends KindedStructure<StructureKind.ImportDeclaration> {}\n",
    );
    project.add_file("src/types.ts", "export type OptionalKind<T> = Omit<T, \"kind\"> & { kind?: unknown };\n");
    project.add_file(TARGET, target);
    project
}

#[test]
fn test_generates_factories_and_reconciles_imports() {
    let project = structures_project(GENERATED_FILE);
    let outcome = generate_structure_creators(&project, &GeneratorConfig::default()).unwrap();

    assert_eq!(outcome.path, TARGET);
    assert_eq!(outcome.new_text, EXPECTED);
    assert_eq!(outcome.original_text, GENERATED_FILE);
    assert!(!outcome.is_up_to_date());
    assert_eq!(outcome.created, vec!["createClass", "createDecorator", "createImportDeclaration"]);
    assert_eq!(outcome.removed, vec!["createOld"]);
    assert_eq!(
        outcome.imports_added,
        vec!["OptionalKind", "ClassDeclarationStructure", "DecoratorStructure", "ImportDeclarationStructure"]
    );
    assert_eq!(outcome.imports_removed, vec!["Obsolete"]);
}

#[test]
fn test_project_is_untouched_until_applied() {
    let mut project = structures_project(GENERATED_FILE);
    let outcome = generate_structure_creators(&project, &GeneratorConfig::default()).unwrap();
    let id = project.file_id(TARGET).unwrap();
    assert_eq!(project.file(id).unwrap().text(), GENERATED_FILE);

    outcome.apply(&mut project).unwrap();
    assert_eq!(project.file(id).unwrap().text(), EXPECTED);
    assert!(project.file(id).unwrap().is_modified());
}

#[test]
fn test_second_run_is_a_no_op() {
    let mut project = structures_project(GENERATED_FILE);
    let config = GeneratorConfig::default();
    generate_structure_creators(&project, &config).unwrap().apply(&mut project).unwrap();

    let again = generate_structure_creators(&project, &config).unwrap();
    assert!(again.is_up_to_date(), "{}", again.new_text);
    assert_eq!(again.new_text, EXPECTED);
    assert_eq!(again.removed, again.created);
    assert!(again.imports_added.is_empty());
    assert!(again.imports_removed.is_empty());
}

#[test]
fn test_empty_literal_without_imports() {
    let project = structures_project("export const Structure = {} as const;\n");
    let outcome = generate_structure_creators(&project, &GeneratorConfig::default()).unwrap();
    assert!(outcome.new_text.starts_with(
        "import { OptionalKind } from \"../types\";\n\
         import { ClassDeclarationStructure } from \"./class/ClassDeclarationStructure\";\n\
         import { StructureKind } from \"./StructureKind\";\n"
    ), "{}", outcome.new_text);
    assert!(outcome.new_text.contains("\n\nexport const Structure = {\n    /** Create a structure for a ClassDeclarationStructure. */\n"));
    assert!(outcome.new_text.ends_with("    },\n} as const;\n"));
}

#[test]
fn test_configured_prefix_and_exclusions() {
    let project = structures_project(GENERATED_FILE);
    let config = GeneratorConfig {
        generated_prefix: "make".to_string(),
        excluded_names: vec![
            "Structure".to_string(),
            "KindedStructure".to_string(),
            "DecoratorStructure".to_string(),
        ],
        ..GeneratorConfig::default()
    };
    let outcome = generate_structure_creators(&project, &config).unwrap();
    assert_eq!(outcome.created, vec!["makeClass", "makeImportDeclaration"]);
    // `createOld` is not owned under this prefix and stays.
    assert!(outcome.removed.is_empty());
    assert!(outcome.new_text.contains("createOld(structure: OptionalKind<OldStructure>): OldStructure {"));
    assert!(!outcome.new_text.contains("DecoratorStructure"));
}

#[test]
fn test_duplicate_factory_names_fail() {
    let mut project = structures_project(GENERATED_FILE);
    project.add_file(
        "src/structures/other/ClassStructure.ts",
        "import { KindedStructure } from \"../Structure\";\n\
         import { StructureKind } from \"../StructureKind\";\n\
         export interface ClassStructure extends KindedStructure<StructureKind.Class> {}\n",
    );
    let error = generate_structure_creators(&project, &GeneratorConfig::default()).unwrap_err();
    match error {
        GenerationError::DuplicateFactoryName { name, first, second } => {
            assert_eq!(name, "createClass");
            assert_eq!(first, "ClassDeclarationStructure");
            assert_eq!(second, "ClassStructure");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_factory_name_taken_by_existing_member_fails() {
    let project = structures_project(
        "export const Structure = {\n    createDecorator: undefined,\n} as const;\n",
    );
    let error = generate_structure_creators(&project, &GeneratorConfig::default()).unwrap_err();
    assert!(
        matches!(&error, GenerationError::DuplicateFactoryName { name, first, .. }
            if name == "createDecorator" && first == "DecoratorStructure"),
        "{:?}",
        error
    );
}

#[test]
fn test_missing_target_file() {
    let project = structures_project(GENERATED_FILE);
    let config = GeneratorConfig {
        target_file: "Shapes.generated.ts".to_string(),
        ..GeneratorConfig::default()
    };
    let error = generate_structure_creators(&project, &config).unwrap_err();
    assert!(matches!(error, GenerationError::NotFound { ref what, ref name } if what == "file" && name == "Shapes.generated.ts"));
}

#[test]
fn test_missing_const() {
    let project = structures_project("export const Other = {} as const;\n");
    let error = generate_structure_creators(&project, &GeneratorConfig::default()).unwrap_err();
    assert!(matches!(error, GenerationError::NotFound { ref what, .. } if what == "exported const"));
}

#[test]
fn test_literal_shape_mismatch() {
    for (text, actual) in [
        ("export const Structure = {};\n", "ObjectLiteralExpression"),
        ("export const Structure = {} satisfies object;\n", "SatisfiesExpression"),
        ("export const Structure = [] as const;\n", "ArrayLiteralExpression"),
    ] {
        let project = structures_project(text);
        let error = generate_structure_creators(&project, &GeneratorConfig::default()).unwrap_err();
        match error {
            GenerationError::ShapeMismatch { name, actual: found, .. } => {
                assert_eq!(name, "Structure");
                assert_eq!(found, actual, "{}", text);
            }
            other => panic!("unexpected error for {:?}: {:?}", text, other),
        }
    }
}

#[test]
fn test_syntax_error_in_target_fails() {
    let project = structures_project("export const Structure = { a: } as const;\n");
    let error = generate_structure_creators(&project, &GeneratorConfig::default()).unwrap_err();
    match error {
        GenerationError::Syntax { file, message } => {
            assert_eq!(file, TARGET);
            assert!(message.starts_with(TARGET), "{}", message);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_syntax_error_elsewhere_is_tolerated() {
    let mut project = structures_project(GENERATED_FILE);
    project.add_file("src/broken.ts", "export const x = ;\n");
    let outcome = generate_structure_creators(&project, &GeneratorConfig::default()).unwrap();
    assert_eq!(outcome.new_text, EXPECTED);
}

const GUARDED_FILE: &str = "\
import { Structure } from \"./Structure\";
import { StructureKind } from \"./StructureKind\";

export const Structure = {
    /** Type guard. */
    hasKind<T extends Structure>(structure: T): boolean {
        return structure !== undefined;
    },
} as const;
";

#[test]
fn test_type_import_sharing_the_const_name_is_kept() {
    let mut project = structures_project(GUARDED_FILE);
    let config = GeneratorConfig::default();
    let outcome = generate_structure_creators(&project, &config).unwrap();

    assert!(outcome.imports_removed.is_empty(), "{:?}", outcome.imports_removed);
    assert_eq!(
        outcome.imports_added,
        vec!["OptionalKind", "ClassDeclarationStructure", "DecoratorStructure", "ImportDeclarationStructure"]
    );
    assert!(outcome.new_text.starts_with(
        "import { Structure } from \"./Structure\";\n\
         import { StructureKind } from \"./StructureKind\";\n\
         import { OptionalKind } from \"../types\";\n"
    ), "{}", outcome.new_text);
    assert!(outcome.new_text.contains("    hasKind<T extends Structure>(structure: T): boolean {\n"));

    outcome.apply(&mut project).unwrap();
    assert!(generate_structure_creators(&project, &config).unwrap().is_up_to_date());
}

#[test]
fn test_type_import_sharing_the_const_name_is_added_when_missing() {
    let project = structures_project(
        "export const Structure = {\n    hasKind<T extends Structure>(structure: T): boolean {\n        return true;\n    },\n} as const;\n",
    );
    let outcome = generate_structure_creators(&project, &GeneratorConfig::default()).unwrap();
    assert!(outcome.imports_added.contains(&"Structure".to_string()), "{:?}", outcome.imports_added);
    assert!(outcome.new_text.contains("import { Structure } from \"./Structure\";\n"));
}

#[test]
fn test_crlf_file_keeps_its_line_breaks() {
    let mut project = structures_project(&GENERATED_FILE.replace('\n', "\r\n"));
    let config = GeneratorConfig::default();
    let outcome = generate_structure_creators(&project, &config).unwrap();
    assert_eq!(outcome.new_text, EXPECTED.replace('\n', "\r\n"));

    outcome.apply(&mut project).unwrap();
    let again = generate_structure_creators(&project, &config).unwrap();
    assert!(again.is_up_to_date(), "{:?}", again.new_text);
}

#[test]
fn test_trailing_comment_of_kept_member_survives() {
    let project = structures_project(
        "import { StructureKind } from \"./StructureKind\";\n\n\
         export const Structure = {\n    \
             isClass(structure: { kind?: StructureKind }): boolean {\n        \
                 return structure.kind === StructureKind.Class;\n    \
             }, // keep me\n    \
             createOld(structure: { name: string }): { name: string } {\n        \
                 return structure;\n    \
             },\n\
         } as const;\n",
    );
    let outcome = generate_structure_creators(&project, &GeneratorConfig::default()).unwrap();
    assert_eq!(outcome.removed, vec!["createOld"]);
    assert!(
        outcome.new_text.contains("    }, // keep me\n    /** Create a structure for a ClassDeclarationStructure. */\n"),
        "{}",
        outcome.new_text
    );
}
