//! Span edits on the structure literal.
//!
//! Every edit is a [`TextChange`] against the text the literal was parsed
//! from; untouched text is carried over byte for byte.

use crate::synthesizer::MethodDescriptor;
use morph_core::text::{apply_text_changes, detect_new_line, TextChange, TextPos, TextRange};
use morph_inspector::{Inspector, ObjectLiteralHandle};
use morph_printer::{CodeWriter, PrinterOptions};
use tracing::debug;

/// The edited text and the member names the edit touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub text: String,
    pub names: Vec<String>,
}

/// Remove every method whose name starts with `prefix`, together with its
/// leading trivia and trailing comma. Members on lines of their own are
/// removed with those lines.
pub fn clear_generated<'a>(inspector: &Inspector<'_, 'a>, literal: &ObjectLiteralHandle<'a>, prefix: &str) -> Edit {
    let text = inspector.source_file(literal.file).text;
    let mut changes = Vec::new();
    let mut names = Vec::new();
    for member in inspector.object_members(literal) {
        let Some(name) = member.name else {
            continue;
        };
        if member.is_method() && name.starts_with(prefix) {
            changes.push(TextChange::delete(member.removal_range(text)));
            names.push(name.to_string());
        }
    }
    debug!(removed = names.len(), "cleared generated methods");
    Edit {
        text: apply_text_changes(text, &changes),
        names,
    }
}

/// Append methods after the last member of the literal.
///
/// Members are indented like the existing ones; an empty literal indents
/// them one `fallback_indent` deeper than the line holding its `{`. Lines
/// end with the file's own line break.
pub fn insert_methods<'a>(
    inspector: &Inspector<'_, 'a>,
    literal: &ObjectLiteralHandle<'a>,
    methods: &[MethodDescriptor],
    fallback_indent: &str,
) -> Edit {
    let text = inspector.source_file(literal.file).text;
    let names: Vec<String> = methods.iter().map(|m| m.name.clone()).collect();
    if methods.is_empty() {
        return Edit {
            text: text.to_string(),
            names,
        };
    }

    let new_line = detect_new_line(text);
    let node = literal.literal;
    let open_brace = node.data.range.pos as usize;
    let outer_indent = leading_whitespace_of_line(text, open_brace);
    let member_indent = node
        .properties
        .first()
        .and_then(|first| indentation_before(text, first.range().pos as usize))
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}{}", outer_indent, fallback_indent));
    let indent_unit = member_indent
        .strip_prefix(outer_indent)
        .filter(|unit| !unit.is_empty())
        .unwrap_or(fallback_indent);

    let mut insertion = String::new();
    for method in methods {
        let mut writer = CodeWriter::with_options(PrinterOptions {
            indent_str: indent_unit.to_string(),
            new_line: new_line.to_string(),
            ..PrinterOptions::default()
        });
        writer.print_method(&method.to_structure());
        insertion.push_str(new_line);
        insertion.push_str(&indent_lines(&writer.into_string(), &member_indent, new_line));
        insertion.push(',');
    }

    let mut changes = Vec::new();
    match node.properties.len().checked_sub(1) {
        Some(last) => {
            let anchor = match node.member_separator_end(last) {
                Some(end) => end,
                None => {
                    let end = node.properties[last].range().end;
                    changes.push(TextChange::insert(end, ","));
                    end
                }
            };
            changes.push(TextChange::insert(after_line_comment(text, anchor), insertion));
        }
        None => {
            let inner = TextRange::new(node.open_brace_end(), node.close_brace_pos());
            if inner.slice(text).contains('\n') {
                changes.push(TextChange::insert(inner.pos, insertion));
            } else {
                // `{}` and `{ }` get the closing brace on its own line.
                insertion.push_str(new_line);
                insertion.push_str(outer_indent);
                changes.push(TextChange::replace(inner, insertion));
            }
        }
    }

    debug!(inserted = names.len(), indent = ?member_indent, "inserted methods");
    Edit {
        text: apply_text_changes(text, &changes),
        names,
    }
}

/// The whitespace between the start of `pos`'s line and `pos`, if nothing
/// else precedes `pos` on that line.
fn indentation_before(text: &str, pos: usize) -> Option<&str> {
    let line_start = text[..pos].rfind('\n').map_or(0, |i| i + 1);
    let prefix = &text[line_start..pos];
    prefix.chars().all(|c| c == ' ' || c == '\t').then_some(prefix)
}

fn leading_whitespace_of_line(text: &str, pos: usize) -> &str {
    let line_start = text[..pos].rfind('\n').map_or(0, |i| i + 1);
    let line = &text[line_start..];
    let end = line.find(|c: char| c != ' ' && c != '\t').unwrap_or(line.len());
    &line[..end]
}

/// Past a `//` comment that ends the line at `pos`, so it stays with the
/// member before it.
fn after_line_comment(text: &str, pos: TextPos) -> TextPos {
    let rest = &text[pos as usize..];
    let line_end = rest.find(['\r', '\n']).unwrap_or(rest.len());
    if rest[..line_end].trim_start_matches([' ', '\t']).starts_with("//") {
        pos + line_end as TextPos
    } else {
        pos
    }
}

fn indent_lines(text: &str, indent: &str, new_line: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join(new_line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StructureRecord;
    use crate::config::GeneratorConfig;
    use crate::synthesizer::synthesize;
    use bumpalo::Bump;
    use morph_inspector::{ExpectedShape, InspectorOptions};
    use morph_project::{ParsedProject, Project};

    fn with_literal(text: &str, f: impl for<'p, 'a> FnOnce(&Inspector<'p, 'a>, &ObjectLiteralHandle<'a>)) {
        let mut project = Project::new();
        let file = project.add_file("Structure.generated.ts", text);
        let arena = Bump::new();
        let parsed = ParsedProject::parse(&project, &arena);
        let inspector = Inspector::new(&parsed, InspectorOptions::default());
        let decl = inspector.get_exported_const_or_fail(file, "Structure").unwrap();
        let literal = inspector
            .narrow_initializer_or_fail(&decl, ExpectedShape::AssertedObjectLiteral)
            .unwrap();
        f(&inspector, &literal);
    }

    fn method(name: &str, kind: &str) -> MethodDescriptor {
        synthesize(
            &StructureRecord {
                name: name.to_string(),
                kind: kind.to_string(),
            },
            &GeneratorConfig::default(),
        )
    }

    #[test]
    fn test_clear_generated_keeps_other_members() {
        let text = "export const Structure = {\n    /** Create a class. */\n    createClass(structure: OptionalKind<ClassDeclarationStructure>): ClassDeclarationStructure {\n        return { ...structure, kind: StructureKind.Class };\n    },\n    /** Type guard. */\n    isClass(structure: unknown): boolean {\n        return true;\n    },\n    createLater: 1,\n    createEnum(structure: OptionalKind<EnumDeclarationStructure>): EnumDeclarationStructure {\n        return { ...structure, kind: StructureKind.Enum };\n    }\n} as const;\n";
        with_literal(text, |inspector, literal| {
            let edit = clear_generated(inspector, literal, "create");
            assert_eq!(edit.names, vec!["createClass", "createEnum"]);
            assert_eq!(
                edit.text,
                "export const Structure = {\n    /** Type guard. */\n    isClass(structure: unknown): boolean {\n        return true;\n    },\n    createLater: 1,\n} as const;\n"
            );
        });
    }

    #[test]
    fn test_insert_after_last_member_adds_comma() {
        let text = "export const Structure = {\n    isClass(s: unknown): boolean {\n        return true;\n    }\n} as const;\n";
        with_literal(text, |inspector, literal| {
            let edit = insert_methods(inspector, literal, &[method("DecoratorStructure", "Decorator")], "  ");
            assert_eq!(
                edit.text,
                "export const Structure = {\n    isClass(s: unknown): boolean {\n        return true;\n    },\n    /** Create a structure for a DecoratorStructure. */\n    createDecorator(structure: OptionalKind<DecoratorStructure>): DecoratorStructure {\n        return { ...structure, kind: StructureKind.Decorator };\n    },\n} as const;\n"
            );
            assert_eq!(edit.names, vec!["createDecorator"]);
        });
    }

    #[test]
    fn test_insert_detects_tab_indentation() {
        let text = "export const Structure = {\n\tisClass() {\n\t\treturn true;\n\t},\n} as const;\n";
        with_literal(text, |inspector, literal| {
            let edit = insert_methods(inspector, literal, &[method("EnumDeclarationStructure", "Enum")], "    ");
            assert!(edit.text.contains(
                "\t},\n\t/** Create a structure for a EnumDeclarationStructure. */\n\tcreateEnum(structure: OptionalKind<EnumDeclarationStructure>): EnumDeclarationStructure {\n\t\treturn { ...structure, kind: StructureKind.Enum };\n\t},\n} as const;"
            ), "{}", edit.text);
        });
    }

    #[test]
    fn test_insert_into_empty_literal() {
        with_literal("export const Structure = {} as const;\n", |inspector, literal| {
            let edit = insert_methods(inspector, literal, &[method("ClassDeclarationStructure", "Class")], "    ");
            assert_eq!(
                edit.text,
                "export const Structure = {\n    /** Create a structure for a ClassDeclarationStructure. */\n    createClass(structure: OptionalKind<ClassDeclarationStructure>): ClassDeclarationStructure {\n        return { ...structure, kind: StructureKind.Class };\n    },\n} as const;\n"
            );
        });
        with_literal("export const Structure = {\n} as const;\n", |inspector, literal| {
            let edit = insert_methods(inspector, literal, &[method("ClassDeclarationStructure", "Class")], "  ");
            assert!(edit.text.starts_with("export const Structure = {\n  /** Create"));
            assert!(edit.text.ends_with("  },\n} as const;\n"));
        });
    }

    #[test]
    fn test_clear_keeps_trailing_comment_of_kept_member() {
        let text = "export const Structure = {\n    isClass() {\n        return true;\n    }, // keep me\n    /** Create. */\n    createClass() {\n        return {};\n    },\n} as const;\n";
        with_literal(text, |inspector, literal| {
            let edit = clear_generated(inspector, literal, "create");
            assert_eq!(
                edit.text,
                "export const Structure = {\n    isClass() {\n        return true;\n    }, // keep me\n} as const;\n"
            );
        });
    }

    #[test]
    fn test_insert_after_trailing_line_comment() {
        let text = "export const Structure = {\n    isClass() {\n        return true;\n    }, // keep me\n} as const;\n";
        with_literal(text, |inspector, literal| {
            let edit = insert_methods(inspector, literal, &[method("DecoratorStructure", "Decorator")], "    ");
            assert!(edit.text.contains(
                "    }, // keep me\n    /** Create a structure for a DecoratorStructure. */\n"
            ), "{}", edit.text);
            assert!(edit.text.ends_with("    },\n} as const;\n"));
        });
    }

    #[test]
    fn test_insert_uses_crlf_of_the_file() {
        let text = "export const Structure = {\r\n    isClass() {\r\n        return true;\r\n    }\r\n} as const;\r\n";
        with_literal(text, |inspector, literal| {
            let edit = insert_methods(inspector, literal, &[method("DecoratorStructure", "Decorator")], "    ");
            assert_eq!(
                edit.text,
                "export const Structure = {\r\n    isClass() {\r\n        return true;\r\n    },\r\n    /** Create a structure for a DecoratorStructure. */\r\n    createDecorator(structure: OptionalKind<DecoratorStructure>): DecoratorStructure {\r\n        return { ...structure, kind: StructureKind.Decorator };\r\n    },\r\n} as const;\r\n"
            );
        });
        with_literal("export const Structure = {} as const;\r\n", |inspector, literal| {
            let edit = insert_methods(inspector, literal, &[method("DecoratorStructure", "Decorator")], "  ");
            assert!(!edit.text.replace("\r\n", "").contains('\n'), "{:?}", edit.text);
        });
    }

    #[test]
    fn test_insert_nothing_is_identity() {
        let text = "export const Structure = { a: 1 } as const;";
        with_literal(text, |inspector, literal| {
            let edit = insert_methods(inspector, literal, &[], "    ");
            assert_eq!(edit.text, text);
        });
    }

    #[test]
    fn test_helpers() {
        assert_eq!(indentation_before("a\n    b", 6), Some("    "));
        assert_eq!(indentation_before("{ b", 2), None);
        assert_eq!(leading_whitespace_of_line("x\n\t  y = {", 5), "\t  ");
        assert_eq!(after_line_comment("a, // c\r\nb", 2), 7);
        assert_eq!(after_line_comment("a, b", 2), 2);
        assert_eq!(indent_lines("a\n\nb", "  ", "\n"), "  a\n\n  b");
        assert_eq!(indent_lines("a\r\nb", "\t", "\r\n"), "\ta\r\n\tb");
    }
}
