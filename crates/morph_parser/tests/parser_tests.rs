//! Parser integration tests.
//!
//! Verifies that the parser builds the expected AST shapes for the subset of
//! TypeScript found in structure declaration files, and that it recovers from
//! syntax it does not model.

use bumpalo::Bump;
use morph_ast::*;
use morph_core::intern::StringInterner;
use morph_diagnostics::DiagnosticCollection;
use morph_parser::Parser;

/// Helper: parse source text and hand the file and its diagnostics to `check`.
fn parse_with<R>(source: &str, check: impl FnOnce(&SourceFile<'_>, &DiagnosticCollection) -> R) -> R {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let mut parser = Parser::new(&arena, &interner, "test.ts", source);
    let sf = parser.parse_source_file();
    let diagnostics = parser.take_diagnostics();
    check(&sf, &diagnostics)
}

/// Helper: assert that parsing produces the expected number of top-level
/// statements and no errors.
fn assert_statement_count(source: &str, expected: usize) {
    parse_with(source, |sf, diagnostics| {
        assert!(
            !diagnostics.has_errors(),
            "source: {}\nerrors: {:?}",
            source,
            diagnostics.diagnostics()
        );
        assert_eq!(sf.statements.len(), expected, "source: {}", source);
    });
}

fn assert_has_errors(source: &str) {
    parse_with(source, |_, diagnostics| {
        assert!(diagnostics.has_errors(), "expected errors for: {}", source);
    });
}

// ============================================================================
// Variable Declarations
// ============================================================================

#[test]
fn test_parse_const_declaration() {
    assert_statement_count("const x = 42;", 1);
}

#[test]
fn test_parse_multiple_declarations() {
    assert_statement_count("const a = 1; let b = 2; var c = 3;", 3);
}

#[test]
fn test_parse_declarations_without_semicolons() {
    assert_statement_count("const a = 1\nconst b = a\nlet c", 3);
}

#[test]
fn test_parse_destructuring() {
    assert_statement_count("const { a, b: [c, , d], ...rest } = value;", 1);
}

#[test]
fn test_variable_flags() {
    parse_with("let a = 1; const b = 2; var c = 3;", |sf, _| {
        let flags: Vec<_> = sf
            .statements
            .iter()
            .map(|stmt| match stmt {
                Statement::VariableStatement(v) => v.declaration_list.data.flags,
                _ => panic!("expected variable statement"),
            })
            .collect();
        assert_eq!(flags, vec![NodeFlags::LET, NodeFlags::CONST, NodeFlags::NONE]);
    });
}

// ============================================================================
// Interfaces and Types
// ============================================================================

#[test]
fn test_parse_interface_with_heritage() {
    let source = "export interface ClassDeclarationStructure extends Structure, KindedStructure<StructureKind.Class> { name?: string; readonly isAbstract: boolean }";
    parse_with(source, |sf, diagnostics| {
        assert!(diagnostics.is_empty());
        let Statement::InterfaceDeclaration(decl) = &sf.statements[0] else {
            panic!("expected interface");
        };
        assert!(sf.statements[0].is_exported());
        assert_eq!(decl.name.name, "ClassDeclarationStructure");
        let extends: Vec<_> = decl.extends_types().collect();
        assert_eq!(extends.len(), 2);
        assert_eq!(extends[1].expression.rightmost().name, "KindedStructure");
        let args = extends[1].type_arguments.expect("type arguments");
        let TypeNode::TypeReference(reference) = &args[0] else {
            panic!("expected type reference");
        };
        let (left, right) = reference.type_name.as_qualified().expect("qualified name");
        assert_eq!(left.leftmost().name, "StructureKind");
        assert_eq!(right.name, "Class");
        assert_eq!(decl.members.len(), 2);
        assert_eq!(decl.members[1].name(), Some("isAbstract"));
    });
}

#[test]
fn test_parse_interface_members() {
    let source = r#"
interface Shapes<T = unknown> {
    (x: number): string;
    new (x: number): Shapes<T>;
    [key: string]: unknown;
    method?<U extends T>(value: U, ...rest: U[]): void;
    get size(): number;
    "quoted-name": "a" | "b";
    fn: (a: string) => void,
}
"#;
    parse_with(source, |sf, diagnostics| {
        assert!(!diagnostics.has_errors(), "{:?}", diagnostics.diagnostics());
        let Statement::InterfaceDeclaration(decl) = &sf.statements[0] else {
            panic!("expected interface");
        };
        let kinds: Vec<_> = decl.members.iter().map(|m| m.data().kind).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::CallSignature,
                SyntaxKind::ConstructSignature,
                SyntaxKind::IndexSignature,
                SyntaxKind::MethodSignature,
                SyntaxKind::MethodSignature,
                SyntaxKind::PropertySignature,
                SyntaxKind::PropertySignature,
            ]
        );
        assert_eq!(decl.members[4].name(), Some("size"));
        assert_eq!(decl.members[5].name(), Some("quoted-name"));
    });
}

#[test]
fn test_parse_type_aliases() {
    assert_statement_count("type A = string | number[];", 1);
    assert_statement_count("type B<T> = T extends string ? 'yes' : 'no';", 1);
    assert_statement_count("type C<T> = { readonly [K in keyof T]?: T[K] };", 1);
    assert_statement_count("type D = [name: string, age?: number, ...rest: boolean[]];", 1);
    assert_statement_count("type E<T> = T extends Array<infer U extends string> ? U : never;", 1);
    assert_statement_count("type F = (a: number) => void | typeof import_value;", 1);
    assert_statement_count("type G = new () => object;", 1);
    assert_statement_count("type H = -1 | 10n | true | `literal`;", 1);
    assert_statement_count("type I = Map<string, Array<Set<number>>>;", 1);
}

#[test]
fn test_parse_conditional_type_shape() {
    parse_with("type T<X> = X extends (infer U)[] ? U : X;", |sf, _| {
        let Statement::TypeAliasDeclaration(alias) = &sf.statements[0] else {
            panic!("expected type alias");
        };
        let TypeNode::ConditionalType(conditional) = alias.type_node else {
            panic!("expected conditional type");
        };
        assert!(matches!(conditional.extends_type, TypeNode::ArrayType(_)));
        assert!(matches!(conditional.false_type, TypeNode::TypeReference(_)));
    });
}

#[test]
fn test_parse_type_predicates() {
    assert_statement_count("function isA(x: unknown): x is A { return true; }", 1);
    assert_statement_count("function check(x: unknown): asserts x is string {}", 1);
    assert_statement_count("declare function assert(x: unknown): asserts x;", 1);
}

#[test]
fn test_parse_enum() {
    parse_with("export enum StructureKind { Class, Interface = 5, \"Quoted\" }", |sf, diagnostics| {
        assert!(diagnostics.is_empty());
        let Statement::EnumDeclaration(decl) = &sf.statements[0] else {
            panic!("expected enum");
        };
        let names: Vec<_> = decl.members.iter().filter_map(|m| m.name.text()).collect();
        assert_eq!(names, vec!["Class", "Interface", "Quoted"]);
        assert!(decl.members[1].initializer.is_some());
    });
}

#[test]
fn test_parse_const_enum() {
    assert_statement_count("const enum Flags { A = 1 << 0, B = 1 << 1 }", 1);
}

// ============================================================================
// Imports and Exports
// ============================================================================

#[test]
fn test_parse_imports() {
    let source = r#"
import { A, B as C, type D } from "./a";
import Default, * as ns from './b';
import type { E } from "./e";
import "./side-effect";
import data from "./data.json" with { type: "json" };
"#;
    parse_with(source, |sf, diagnostics| {
        assert!(diagnostics.is_empty(), "{:?}", diagnostics.diagnostics());
        let imports: Vec<_> = sf.imports().collect();
        assert_eq!(imports.len(), 5);

        let clause = imports[0].import_clause.expect("clause");
        let Some(NamedImportBindings::NamedImports(named)) = &clause.named_bindings else {
            panic!("expected named imports");
        };
        assert_eq!(named.elements.len(), 3);
        assert_eq!(named.elements[1].imported_name(), "B");
        assert_eq!(named.elements[1].name.name, "C");
        assert!(named.elements[2].is_type_only);
        assert!(!imports[0].module_specifier.single_quote);

        assert!(imports[1].module_specifier.single_quote);
        assert_eq!(imports[1].import_clause.and_then(|c| c.name).map(|n| n.name), Some("Default"));
        assert!(imports[2].import_clause.is_some_and(|c| c.is_type_only));
        assert!(imports[3].import_clause.is_none());
        assert_eq!(imports[3].module_specifier.value, "./side-effect");
    });
}

#[test]
fn test_parse_exports() {
    let source = r#"
export * from "./a";
export * as b from "./b";
export { c, d as e } from "./c";
export type { F } from "./f";
export { local };
export default Structure;
export default function () {}
"#;
    parse_with(source, |sf, diagnostics| {
        assert!(!diagnostics.has_errors(), "{:?}", diagnostics.diagnostics());
        let kinds: Vec<_> = sf.statements.iter().map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::ExportDeclaration,
                SyntaxKind::ExportDeclaration,
                SyntaxKind::ExportDeclaration,
                SyntaxKind::ExportDeclaration,
                SyntaxKind::ExportDeclaration,
                SyntaxKind::ExportAssignment,
                SyntaxKind::FunctionDeclaration,
            ]
        );
        let Statement::ExportDeclaration(export) = &sf.statements[2] else {
            panic!("expected export declaration");
        };
        let Some(NamedExportBindings::NamedExports(named)) = &export.export_clause else {
            panic!("expected named exports");
        };
        assert_eq!(named.elements[1].local_name(), "d");
        assert_eq!(named.elements[1].name.name, "e");
        assert!(matches!(&sf.statements[3], Statement::ExportDeclaration(e) if e.is_type_only));
    });
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_parse_structure_object_literal() {
    let source = r#"
export const Structure = {
    /** Create a structure for a class declaration. */
    createClass(structure: OptionalKind<ClassDeclarationStructure>): ClassDeclarationStructure {
        return { ...structure, kind: StructureKind.Class };
    },
    isClass(s: unknown): s is ClassDeclarationStructure {
        return (s as any)?.kind === StructureKind.Class;
    },
    get count() { return 1; },
    value,
} as const;
"#;
    parse_with(source, |sf, diagnostics| {
        assert!(diagnostics.is_empty(), "{:?}", diagnostics.diagnostics());
        let Statement::VariableStatement(stmt) = &sf.statements[0] else {
            panic!("expected variable statement");
        };
        let initializer = stmt.declaration_list.declarations[0].initializer.expect("initializer");
        let Expression::As(as_expr) = initializer else {
            panic!("expected as expression");
        };
        assert!(matches!(as_expr.type_node, TypeNode::KeywordType(t) if t.kind() == SyntaxKind::ConstKeyword));
        let Expression::ObjectLiteral(object) = as_expr.expression else {
            panic!("expected object literal");
        };
        assert!(object.data.flags.contains(NodeFlags::MULTI_LINE));
        let names: Vec<_> = object.properties.iter().filter_map(|p| p.name()).collect();
        assert_eq!(names, vec!["createClass", "isClass", "count", "value"]);
        assert!(object.properties[0].is_method());
        assert_eq!(object.properties[2].kind(), SyntaxKind::GetAccessor);
        assert!(object.separator_ends.iter().all(Option::is_some));

        // Member ranges start at the name, after the doc comment.
        let first = object.properties[0].range();
        assert!(source[first.pos as usize..].starts_with("createClass"));
        assert!(source[..first.pos as usize].ends_with("*/\n    "));
    });
}

#[test]
fn test_parse_expression_statements() {
    assert_statement_count("a.b?.c(d)[0]!;", 1);
    assert_statement_count("x = y ?? z ? w : v;", 1);
    assert_statement_count("f<string>(1, ...rest);", 1);
    assert_statement_count("new Map<string, number>();", 1);
    assert_statement_count("const t = `a${b}c${`nested ${d}`}e`;", 1);
    assert_statement_count("const r = /ab+c/gi.test(s);", 1);
    assert_statement_count("const n = a ** b ** c, m = -x++;", 1);
    assert_statement_count("const cb = async (x: number) => { await x; };", 1);
    assert_statement_count("const id = <T,>(value: T): T => value;", 1);
    assert_statement_count("const s = value satisfies Shape;", 1);
    assert_statement_count("const c = <Shape>{ kind: 1 };", 1);
    assert_statement_count("const f = function named() { return typeof this; };", 1);
}

#[test]
fn test_exponent_is_right_associative() {
    parse_with("x = a ** b ** c;", |sf, _| {
        let Statement::ExpressionStatement(stmt) = &sf.statements[0] else {
            panic!("expected expression statement");
        };
        let Expression::Binary(assign) = stmt.expression else {
            panic!("expected assignment");
        };
        let Expression::Binary(power) = assign.right else {
            panic!("expected binary");
        };
        assert!(matches!(power.left, Expression::Identifier(id) if id.name == "a"));
        assert!(matches!(power.right, Expression::Binary(_)));
    });
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_parse_control_flow() {
    let source = r#"
function visit(node: Node): string | undefined {
    if (node.kind === 1) return "one";
    else if (node.kind === 2) { return "two"; }
    switch (node.kind) {
        case 3:
        case 4:
            break;
        default:
            throw new Error("unknown");
    }
    outer: for (const child of node.children) { continue outer; }
    return undefined;
}
"#;
    parse_with(source, |sf, diagnostics| {
        assert!(!diagnostics.has_errors(), "{:?}", diagnostics.diagnostics());
        let Statement::FunctionDeclaration(function) = &sf.statements[0] else {
            panic!("expected function");
        };
        let body = function.body.expect("body");
        let kinds: Vec<_> = body.statements.iter().map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::IfStatement,
                SyntaxKind::SwitchStatement,
                SyntaxKind::UnsupportedStatement,
                SyntaxKind::ReturnStatement,
            ]
        );
        let Statement::SwitchStatement(switch) = &body.statements[1] else {
            panic!("expected switch");
        };
        assert_eq!(switch.clauses.len(), 3);
        assert!(switch.clauses[2].expression.is_none());
    });
}

// ============================================================================
// Unsupported Constructs
// ============================================================================

#[test]
fn test_unsupported_constructs_are_skipped() {
    let source = r#"
export class Foo<T> extends Base implements Shape {
    private x = `${a}}`;
    method() { if (x) { return { y: 1 }; } }
}
namespace Inner { export const z = 1; }
declare module "external" { interface Augmented {} }
try { risky(); } catch (e) { handle(e); } finally { done(); }
do { step(); } while (more());
for (let i = 0; i < 10; i++) log(i);
const after = 1;
"#;
    parse_with(source, |sf, diagnostics| {
        assert!(!diagnostics.has_errors(), "{:?}", diagnostics.diagnostics());
        let kinds: Vec<_> = sf.statements.iter().map(|s| s.kind()).collect();
        assert_eq!(kinds.len(), 7, "{:?}", kinds);
        assert!(kinds[..6].iter().all(|k| *k == SyntaxKind::UnsupportedStatement));
        assert_eq!(kinds[6], SyntaxKind::VariableStatement);

        let Statement::UnsupportedStatement(class) = &sf.statements[0] else {
            panic!("expected skipped class");
        };
        assert!(sf.statements[0].is_exported());
        assert_eq!(class.name.map(|n| n.name), Some("Foo"));
        let names: Vec<_> = class.identifiers.iter().map(|id| id.name).collect();
        assert!(names.contains(&"Base"));
        assert!(names.contains(&"Shape"));
        assert!(names.contains(&"a"));

        // One warning per skipped construct.
        assert_eq!(diagnostics.len(), 6);
    });
}

#[test]
fn test_unsupported_statement_inside_block_stops_at_closer() {
    parse_with("function f() { while (x) y(); }\nconst z = 1;", |sf, diagnostics| {
        assert!(!diagnostics.has_errors(), "{:?}", diagnostics.diagnostics());
        assert_eq!(sf.statements.len(), 2);
    });
}

// ============================================================================
// Error Recovery
// ============================================================================

#[test]
fn test_missing_expression_is_reported() {
    assert_has_errors("const x = ;");
}

#[test]
fn test_unterminated_object_literal_is_reported() {
    assert_has_errors("export const Structure = { createClass() {} ");
}

#[test]
fn test_stray_close_brace_recovers() {
    parse_with("const a = 1; } const b = 2;", |sf, diagnostics| {
        assert_eq!(diagnostics.error_count(), 1);
        assert_eq!(sf.statements.len(), 2);
    });
}

#[test]
fn test_garbage_does_not_hang() {
    parse_with(") ) ] const ok = 1;", |sf, diagnostics| {
        assert!(diagnostics.has_errors());
        assert!(sf.statements.iter().any(|s| s.kind() == SyntaxKind::VariableStatement));
    });
}

#[test]
fn test_deep_nesting_is_bounded() {
    // Unoptimized builds use large frames; give the parser room to hit its own limit.
    let handle = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| {
            let source = format!("const x = {}1{};", "(".repeat(500), ")".repeat(500));
            parse_with(&source, |_, diagnostics| diagnostics.has_errors())
        })
        .expect("spawn parser thread");
    assert!(handle.join().expect("parser thread panicked"));
}

#[test]
fn test_diagnostics_carry_file_and_position() {
    parse_with("const a = 1;\nconst b = ;", |_, diagnostics| {
        let error = diagnostics.diagnostics().iter().find(|d| d.is_error()).expect("error");
        assert_eq!(error.file.as_deref(), Some("test.ts"));
        assert_eq!(error.span.map(|s| s.start), Some(23));
    });
}
