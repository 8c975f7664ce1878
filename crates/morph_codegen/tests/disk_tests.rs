use morph_codegen::{generate_structure_creators, ConfigError, GenerationError, GeneratorConfig, CONFIG_FILE_NAME};
use morph_project::Project;
use std::fs;
use std::path::Path;

fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn seed(root: &Path) {
    write(root, "lib/kinds.ts", "export enum ShapeKind { Circle, Square }\n");
    write(
        root,
        "lib/shapes.ts",
        "import { ShapeKind } from \"./kinds\";\n\
         export interface KindedShape<K extends ShapeKind> { kind: K; }\n\
         export interface CircleShape extends KindedShape<ShapeKind.Circle> { radius: number; }\n\
         export interface SquareShape extends KindedShape<ShapeKind.Square> { side: number; }\n",
    );
    write(root, "lib/optional.ts", "export type WithoutKind<T> = Omit<T, \"kind\">;\n");
    write(
        root,
        "lib/Shape.ts",
        "export const Shape = {\n\tisShape(value: unknown): boolean {\n\t\treturn value !== undefined;\n\t}\n} as const;\n",
    );
    write(root, "node_modules/dep/index.ts", "export interface IgnoredShape {}\n");
}

#[test]
fn test_generate_and_write_with_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    seed(root);
    write(
        root,
        CONFIG_FILE_NAME,
        r#"{
            "targetFile": "Shape.ts",
            "targetConst": "Shape",
            "kindEnum": "ShapeKind",
            "optionalKindType": "WithoutKind",
            "structureSuffix": "Shape",
            "excludedNames": ["KindedShape"]
        }"#,
    );

    let config = GeneratorConfig::load_from_root(root).unwrap();
    let mut project = Project::discover(root, &config.discovery_options()).unwrap();
    let outcome = generate_structure_creators(&project, &config).unwrap();
    assert_eq!(outcome.created, vec!["createCircle", "createSquare"]);

    let written = outcome.write(&mut project).unwrap().expect("file changed");
    assert_eq!(written, root.join("lib/Shape.ts"));
    let on_disk = fs::read_to_string(&written).unwrap();
    assert_eq!(on_disk, outcome.new_text);
    assert_eq!(
        on_disk,
        "import { WithoutKind } from \"./optional\";\n\
         import { CircleShape, SquareShape } from \"./shapes\";\n\
         import { ShapeKind } from \"./kinds\";\n\
         \n\
         export const Shape = {\n\
         \tisShape(value: unknown): boolean {\n\
         \t\treturn value !== undefined;\n\
         \t},\n\
         \t/** Create a structure for a CircleShape. */\n\
         \tcreateCircle(structure: WithoutKind<CircleShape>): CircleShape {\n\
         \t\treturn { ...structure, kind: ShapeKind.Circle };\n\
         \t},\n\
         \t/** Create a structure for a SquareShape. */\n\
         \tcreateSquare(structure: WithoutKind<SquareShape>): SquareShape {\n\
         \t\treturn { ...structure, kind: ShapeKind.Square };\n\
         \t},\n\
         } as const;\n"
    );

    // A fresh discovery sees the written text and has nothing to do.
    let project = Project::discover(root, &config.discovery_options()).unwrap();
    let again = generate_structure_creators(&project, &config).unwrap();
    assert!(again.is_up_to_date());
    let mut project = project;
    assert_eq!(again.write(&mut project).unwrap(), None);
}

#[test]
fn test_defaults_without_config_file() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    let config = GeneratorConfig::load_from_root(dir.path()).unwrap();
    assert_eq!(config, GeneratorConfig::default());

    let project = Project::discover(dir.path(), &config.discovery_options()).unwrap();
    let error = generate_structure_creators(&project, &config).unwrap_err();
    assert!(matches!(error, GenerationError::NotFound { .. }), "{:?}", error);
}

#[test]
fn test_invalid_config_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), CONFIG_FILE_NAME, r#"{ "targetFile": 3 }"#);
    let error = GeneratorConfig::load_from_root(dir.path()).unwrap_err();
    assert!(matches!(error, ConfigError::Parse { .. }), "{:?}", error);

    write(dir.path(), CONFIG_FILE_NAME, r#"{ "kindEnum": "" }"#);
    let error = GeneratorConfig::load_from_root(dir.path()).unwrap_err();
    assert!(matches!(error, ConfigError::Invalid(_)), "{:?}", error);
}
