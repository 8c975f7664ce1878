//! Import reconciliation for the rewritten file.
//!
//! After the factories are inserted the file may reference names it does not
//! import, and may import names nothing uses any more. Unused bindings are
//! dropped, missing names are imported from the project file that exports
//! them, and imports that need no change keep their original text.

use morph_ast::visitor::{
    walk_arrow_function, walk_block, walk_conditional_type, walk_function_declaration, walk_function_expression,
    walk_function_type, walk_interface_declaration, walk_mapped_type, walk_method_declaration, walk_method_signature,
    walk_signature_declaration, walk_type_alias_declaration, walk_type_node, walk_accessor_declaration, AstVisitor,
};
use morph_ast::*;
use morph_core::collections::{FxHashSet, FxIndexMap, FxIndexSet};
use morph_core::text::{apply_text_changes, detect_new_line, line_break_len_at, TextChange, TextRange};
use morph_inspector::{declared_bindings, Inspector, Meaning};
use morph_printer::{CodeWriter, ImportDeclarationStructure, ImportSpecifierStructure, PrinterOptions, QuoteKind};
use morph_project::FileId;
use morph_tspath::module_specifier;
use tracing::{debug, trace};

/// The reconciled text and the import bindings that changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportChanges {
    pub text: String,
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

/// Names a file reads without declaring them.
#[derive(Debug, Default)]
pub struct FileReferences<'a> {
    /// Free names in order of first use.
    pub references: FxIndexSet<&'a str>,
    /// Names mentioned by statements the parser skips. They keep an existing
    /// import alive but never cause one to be added.
    pub protected: FxHashSet<&'a str>,
}

impl<'a> FileReferences<'a> {
    pub fn collect(source_file: &SourceFile<'a>) -> Self {
        let mut collector = ReferenceCollector {
            scopes: vec![Scope::of_statements(source_file.statements)],
            references: FxIndexSet::default(),
            protected: FxHashSet::default(),
        };
        collector.visit_source_file(source_file);
        Self {
            references: collector.references,
            protected: collector.protected,
        }
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.references.contains(name) || self.protected.contains(name)
    }
}

/// Names bound by one scope. Values and types live in separate spaces, so a
/// local `const Structure` does not hide an imported `interface Structure`.
#[derive(Default)]
struct Scope<'a> {
    values: FxHashSet<&'a str>,
    types: FxHashSet<&'a str>,
}

impl<'a> Scope<'a> {
    fn of_statements(statements: &[Statement<'a>]) -> Self {
        let mut scope = Scope::default();
        for stmt in statements {
            declared_bindings(stmt, |name, meaning| scope.declare(name, meaning));
        }
        scope
    }

    fn declare(&mut self, name: &'a str, meaning: Meaning) {
        if meaning.is_value() {
            self.values.insert(name);
        }
        if meaning.is_type() {
            self.types.insert(name);
        }
    }

    fn with_types(names: impl IntoIterator<Item = &'a str>) -> Self {
        Scope {
            types: names.into_iter().collect(),
            ..Scope::default()
        }
    }
}

struct ReferenceCollector<'a> {
    scopes: Vec<Scope<'a>>,
    references: FxIndexSet<&'a str>,
    protected: FxHashSet<&'a str>,
}

impl<'a> ReferenceCollector<'a> {
    fn reference_value(&mut self, name: &'a str) {
        if !self.scopes.iter().any(|scope| scope.values.contains(name)) {
            self.references.insert(name);
        }
    }

    fn reference_type(&mut self, name: &'a str) {
        if !self.scopes.iter().any(|scope| scope.types.contains(name)) {
            self.references.insert(name);
        }
    }

    /// `export { name }` exports whichever meanings `name` has.
    fn reference_any(&mut self, name: &'a str) {
        let bound = self
            .scopes
            .iter()
            .any(|scope| scope.values.contains(name) || scope.types.contains(name));
        if !bound {
            self.references.insert(name);
        }
    }

    fn scoped(&mut self, scope: Scope<'a>, f: impl FnOnce(&mut Self)) {
        self.scopes.push(scope);
        f(self);
        self.scopes.pop();
    }
}

fn signature_scope<'a>(
    type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    parameters: NodeList<'a, ParameterDeclaration<'a>>,
) -> Scope<'a> {
    let mut scope = type_parameter_scope(type_parameters);
    for param in parameters.iter() {
        param.name.for_each_bound_identifier(&mut |id| {
            scope.values.insert(id.name);
        });
    }
    scope
}

fn type_parameter_scope<'a>(type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>) -> Scope<'a> {
    Scope::with_types(type_parameters.unwrap_or(&[]).iter().map(|tp| tp.name.name))
}

impl<'a> AstVisitor<'a> for ReferenceCollector<'a> {
    fn visit_identifier_reference(&mut self, node: &Identifier<'a>) {
        self.reference_value(node.name);
    }

    fn visit_type_reference_name(&mut self, name: &EntityName<'a>) {
        self.reference_type(name.leftmost().name);
    }

    fn visit_type_query_name(&mut self, name: &EntityName<'a>) {
        self.reference_value(name.leftmost().name);
    }

    fn visit_unsupported_statement(&mut self, node: &UnsupportedStatement<'a>) {
        for id in node.identifiers.iter() {
            self.protected.insert(id.name);
        }
    }

    fn visit_export_declaration(&mut self, node: &ExportDeclaration<'a>) {
        if node.module_specifier.is_some() {
            return;
        }
        if let Some(NamedExportBindings::NamedExports(exports)) = &node.export_clause {
            for specifier in exports.elements.iter() {
                self.reference_any(specifier.local_name());
            }
        }
    }

    fn visit_block(&mut self, node: &Block<'a>) {
        self.scoped(Scope::of_statements(node.statements), |v| walk_block(v, node));
    }

    fn visit_function_declaration(&mut self, node: &FunctionDeclaration<'a>) {
        let scope = signature_scope(node.type_parameters, node.parameters);
        self.scoped(scope, |v| walk_function_declaration(v, node));
    }

    fn visit_function_expression(&mut self, node: &FunctionExpression<'a>) {
        let mut scope = signature_scope(node.type_parameters, node.parameters);
        if let Some(name) = &node.name {
            scope.values.insert(name.name);
        }
        self.scoped(scope, |v| walk_function_expression(v, node));
    }

    fn visit_arrow_function(&mut self, node: &ArrowFunction<'a>) {
        let scope = signature_scope(node.type_parameters, node.parameters);
        self.scoped(scope, |v| walk_arrow_function(v, node));
    }

    fn visit_method_declaration(&mut self, node: &MethodDeclaration<'a>) {
        let scope = signature_scope(node.type_parameters, node.parameters);
        self.scoped(scope, |v| walk_method_declaration(v, node));
    }

    fn visit_accessor_declaration(&mut self, node: &AccessorDeclaration<'a>) {
        let scope = signature_scope(None, node.parameters);
        self.scoped(scope, |v| walk_accessor_declaration(v, node));
    }

    fn visit_function_type(&mut self, node: &FunctionTypeNode<'a>) {
        let scope = signature_scope(node.type_parameters, node.parameters);
        self.scoped(scope, |v| walk_function_type(v, node));
    }

    fn visit_method_signature(&mut self, node: &MethodSignature<'a>) {
        let scope = signature_scope(node.type_parameters, node.parameters);
        self.scoped(scope, |v| walk_method_signature(v, node));
    }

    fn visit_signature_declaration(&mut self, node: &SignatureDeclaration<'a>) {
        let scope = signature_scope(node.type_parameters, node.parameters);
        self.scoped(scope, |v| walk_signature_declaration(v, node));
    }

    fn visit_interface_declaration(&mut self, node: &InterfaceDeclaration<'a>) {
        let scope = type_parameter_scope(node.type_parameters);
        self.scoped(scope, |v| walk_interface_declaration(v, node));
    }

    fn visit_type_alias_declaration(&mut self, node: &TypeAliasDeclaration<'a>) {
        let scope = type_parameter_scope(node.type_parameters);
        self.scoped(scope, |v| walk_type_alias_declaration(v, node));
    }

    fn visit_mapped_type(&mut self, node: &MappedTypeNode<'a>) {
        let scope = Scope::with_types([node.type_parameter.name.name]);
        self.scoped(scope, |v| walk_mapped_type(v, node));
    }

    fn visit_conditional_type(&mut self, node: &ConditionalTypeNode<'a>) {
        let mut infer = InferNames::default();
        infer.visit_type_node(node.extends_type);
        self.scoped(Scope::with_types(infer.names), |v| walk_conditional_type(v, node));
    }
}

/// The `infer X` names introduced by a conditional type's extends clause.
#[derive(Default)]
struct InferNames<'a> {
    names: FxHashSet<&'a str>,
}

impl<'a> AstVisitor<'a> for InferNames<'a> {
    fn visit_type_node(&mut self, ty: &TypeNode<'a>) {
        if let TypeNode::InferType(infer) = ty {
            self.names.insert(infer.type_parameter.name.name);
        }
        walk_type_node(self, ty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImportState {
    Unchanged,
    Rewritten,
    Removed,
}

struct ImportPlan<'a> {
    node: &'a ImportDeclaration<'a>,
    structure: ImportDeclarationStructure,
    state: ImportState,
    pending: Vec<String>,
}

impl ImportPlan<'_> {
    /// Whether plain named specifiers can be appended to this import.
    fn accepts_named(&self) -> bool {
        self.node.import_clause.is_some() && !self.structure.is_type_only && self.structure.namespace_import.is_none()
    }
}

/// Drop unused import bindings of `file` and import the free names it is
/// missing from the files that export them.
pub fn reconcile_imports(inspector: &Inspector<'_, '_>, file: FileId) -> ImportChanges {
    let source_file = inspector.source_file(file);
    let text = source_file.text;
    let new_line = detect_new_line(text);
    let usage = FileReferences::collect(source_file);
    let mut changes = ImportChanges::default();

    let mut available: FxHashSet<String> = FxHashSet::default();
    let mut plans: Vec<ImportPlan<'_>> = Vec::new();
    for node in source_file.imports() {
        let mut structure = ImportDeclarationStructure::from_node(node);
        let mut state = ImportState::Unchanged;
        if node.import_clause.is_some() {
            let before = binding_names(&structure);
            if structure.default_import.as_deref().is_some_and(|name| !usage.is_used(name)) {
                structure.default_import = None;
            }
            if structure.namespace_import.as_deref().is_some_and(|name| !usage.is_used(name)) {
                structure.namespace_import = None;
            }
            structure.named_imports.retain(|specifier| usage.is_used(specifier.local_name()));
            let after = binding_names(&structure);
            if after.len() != before.len() {
                changes
                    .removed
                    .extend(before.into_iter().filter(|name| !after.contains(name)));
                state = if structure.is_side_effect() {
                    ImportState::Removed
                } else {
                    ImportState::Rewritten
                };
            }
            available.extend(after);
        }
        plans.push(ImportPlan {
            node,
            structure,
            state,
            pending: Vec::new(),
        });
    }

    let from_path = inspector.file_path(file);
    let mut new_imports: FxIndexMap<String, Vec<String>> = FxIndexMap::default();
    for &name in &usage.references {
        if available.contains(name) {
            continue;
        }
        let exporter = inspector
            .files_exporting(name, file)
            .into_iter()
            .min_by_key(|&candidate| module_specifier(from_path, inspector.file_path(candidate)).len());
        let Some(exporter) = exporter else {
            trace!(name, "no project file exports this name");
            continue;
        };
        changes.added.push(name.to_string());
        let existing = plans.iter_mut().find(|plan| {
            plan.accepts_named() && inspector.resolve_module(file, &plan.structure.module_specifier) == Some(exporter)
        });
        match existing {
            Some(plan) => plan.pending.push(name.to_string()),
            None => new_imports
                .entry(module_specifier(from_path, inspector.file_path(exporter)))
                .or_default()
                .push(name.to_string()),
        }
    }

    let mut edits = Vec::new();
    for plan in &mut plans {
        if !plan.pending.is_empty() {
            plan.pending.sort();
            plan.structure
                .named_imports
                .extend(plan.pending.drain(..).map(ImportSpecifierStructure::named));
            plan.state = ImportState::Rewritten;
        }
        match plan.state {
            ImportState::Unchanged => {}
            ImportState::Rewritten => edits.push(TextChange::replace(
                plan.node.data.range,
                print_import(&plan.structure, QuoteKind::of(&plan.node.module_specifier)),
            )),
            ImportState::Removed => edits.push(TextChange::delete(line_removal_range(text, plan.node.data.range))),
        }
    }

    if !new_imports.is_empty() {
        let quote_kind = plans
            .first()
            .map(|plan| QuoteKind::of(&plan.node.module_specifier))
            .unwrap_or_default();
        let printed: Vec<String> = new_imports
            .into_iter()
            .map(|(specifier, mut names)| {
                names.sort();
                let structure = ImportDeclarationStructure {
                    named_imports: names.into_iter().map(ImportSpecifierStructure::named).collect(),
                    module_specifier: specifier,
                    ..ImportDeclarationStructure::default()
                };
                print_import(&structure, quote_kind)
            })
            .collect();

        let last_kept = plans.iter().rev().find(|plan| plan.state != ImportState::Removed);
        let insertion = match (last_kept, plans.first()) {
            (Some(anchor), _) => TextChange::insert(
                anchor.node.data.range.end,
                printed.iter().map(|line| format!("{}{}", new_line, line)).collect::<String>(),
            ),
            // Every import is removed: take the place of the first one.
            (None, Some(first)) => TextChange::insert(
                first.node.data.range.pos,
                printed.iter().map(|line| format!("{}{}", line, new_line)).collect::<String>(),
            ),
            (None, None) => TextChange::insert(
                0,
                printed.iter().map(|line| format!("{}{}", line, new_line)).collect::<String>() + new_line,
            ),
        };
        edits.push(insertion);
    }

    debug!(added = ?changes.added, removed = ?changes.removed, "reconciled imports");
    changes.text = apply_text_changes(text, &edits);
    changes
}

fn binding_names(structure: &ImportDeclarationStructure) -> Vec<String> {
    structure
        .default_import
        .iter()
        .chain(structure.namespace_import.iter())
        .cloned()
        .chain(structure.named_imports.iter().map(|s| s.local_name().to_string()))
        .collect()
}

fn print_import(structure: &ImportDeclarationStructure, quote_kind: QuoteKind) -> String {
    let mut writer = CodeWriter::with_options(PrinterOptions {
        quote_kind,
        ..PrinterOptions::default()
    });
    writer.print_import_declaration(structure);
    writer.into_string()
}

/// `range` extended over trailing blanks and the line break that ends it.
fn line_removal_range(text: &str, range: TextRange) -> TextRange {
    let rest = &text[range.end as usize..];
    let blanks = rest.len() - rest.trim_start_matches([' ', '\t']).len();
    let line_break = line_break_len_at(text, range.end as usize + blanks);
    TextRange::new(range.pos, range.end + (blanks + line_break) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use morph_inspector::InspectorOptions;
    use morph_project::{ParsedProject, Project};

    const STRUCTURES: &str = "\
export enum StructureKind { Class, Enum }
export interface ClassDeclarationStructure { name: string; }
export interface EnumDeclarationStructure { name: string; }
export interface Structure { leadingTrivia?: string; }
";
    const TYPES: &str = "export type OptionalKind<T> = T;\n";

    fn reconcile(target: &str) -> ImportChanges {
        let mut project = Project::new();
        project.add_file("src/structures.ts", STRUCTURES);
        project.add_file("src/types.ts", TYPES);
        let file = project.add_file("src/Structure.generated.ts", target);
        let arena = Bump::new();
        let parsed = ParsedProject::parse(&project, &arena);
        let inspector = Inspector::new(&parsed, InspectorOptions::default());
        reconcile_imports(&inspector, file)
    }

    fn references(text: &str) -> (Vec<String>, Vec<String>) {
        let mut project = Project::new();
        let file = project.add_file("test.ts", text);
        let arena = Bump::new();
        let parsed = ParsedProject::parse(&project, &arena);
        let usage = FileReferences::collect(parsed.file(file).source_file);
        let mut protected: Vec<String> = usage.protected.iter().map(|s| s.to_string()).collect();
        protected.sort();
        (usage.references.iter().map(|s| s.to_string()).collect(), protected)
    }

    const FACTORY: &str = "\
export const Structure = {
    createClass(structure: OptionalKind<ClassDeclarationStructure>): ClassDeclarationStructure {
        return { ...structure, kind: StructureKind.Class };
    },
} as const;
";

    #[test]
    fn test_references_skip_bound_names() {
        let (refs, _) = references(
            "import { Imported } from './x';\n\
             function f<T>(x: T, { y }: Shape): T { const local = y; return helper(local, x, Imported); }\n\
             type Mapped<U> = { [K in keyof U]: Wrapper<U[K]> };\n\
             type Unwrap<V> = V extends Promise<infer R> ? R : Fallback;\n\
             export { f as g };\n\
             const arrow = (a: number) => a + outer;\n",
        );
        assert_eq!(refs, vec!["Shape", "helper", "Imported", "Wrapper", "Promise", "Fallback", "outer"]);
    }

    #[test]
    fn test_references_from_skipped_statements_are_protected() {
        let (refs, protected) = references("class Widget extends Base { size: Size; }\nexport const w = Widget;\n");
        assert!(refs.is_empty(), "{:?}", refs);
        assert!(protected.contains(&"Base".to_string()));
        assert!(protected.contains(&"Size".to_string()));
    }

    #[test]
    fn test_value_and_type_spaces_are_separate() {
        let (refs, _) = references(
            "import { Structure } from './models';\n\
             export const Structure = {\n\
                 hasName<T extends Structure>(structure: T): boolean { return Structure === structure; },\n\
             } as const;\n\
             interface Shape {}\n\
             const size: typeof Shape = 1;\n\
             enum Kind { A }\n\
             let k: Kind = Kind.A;\n",
        );
        assert_eq!(refs, vec!["Structure", "Shape"]);
    }

    #[test]
    fn test_keeps_type_import_named_like_the_const() {
        let target = "\
import { Structure, StructureKind } from \"./structures\";

export const Structure = {
    isNamed<T extends Structure>(structure: T): boolean {
        return structure.kind === StructureKind.Class;
    },
} as const;
";
        let changes = reconcile(target);
        assert_eq!(changes.text, target);
        assert!(changes.removed.is_empty(), "{:?}", changes.removed);
    }

    #[test]
    fn test_imports_type_named_like_the_const() {
        let target = "export const Structure = {\n    isNamed<T extends Structure>(s: T): boolean { return true; },\n} as const;\n";
        let changes = reconcile(target);
        assert!(changes.text.starts_with("import { Structure } from \"./structures\";\n\n"), "{}", changes.text);
        assert_eq!(changes.added, vec!["Structure"]);
    }

    #[test]
    fn test_new_imports_follow_crlf() {
        let target = format!("import {{ StructureKind }} from \"./structures\";\r\n\r\n{}", FACTORY.replace('\n', "\r\n"));
        let changes = reconcile(&target);
        assert!(changes.text.starts_with(
            "import { StructureKind, ClassDeclarationStructure } from \"./structures\";\r\nimport { OptionalKind } from \"./types\";\r\n\r\n"
        ), "{:?}", changes.text);
        assert!(!changes.text.replace("\r\n", "").contains('\n'));

        let changes = reconcile(&FACTORY.replace('\n', "\r\n"));
        assert!(!changes.text.replace("\r\n", "").contains('\n'), "{:?}", changes.text);
    }

    #[test]
    fn test_adds_missing_and_drops_unused() {
        let target = format!("import {{ Unused }} from \"./structures\";\n\n{}", FACTORY);
        let changes = reconcile(&target);
        assert_eq!(
            changes.text,
            format!(
                "import {{ ClassDeclarationStructure, StructureKind }} from \"./structures\";\nimport {{ OptionalKind }} from \"./types\";\n\n{}",
                FACTORY
            )
        );
        assert_eq!(changes.added, vec!["OptionalKind", "ClassDeclarationStructure", "StructureKind"]);
        assert_eq!(changes.removed, vec!["Unused"]);
    }

    #[test]
    fn test_file_without_imports_gets_leading_block() {
        let changes = reconcile(FACTORY);
        assert_eq!(
            changes.text,
            format!(
                "import {{ OptionalKind }} from \"./types\";\nimport {{ ClassDeclarationStructure, StructureKind }} from \"./structures\";\n\n{}",
                FACTORY
            )
        );
    }

    #[test]
    fn test_unchanged_imports_keep_their_text() {
        let target = format!(
            "import './polyfill';\nimport {{StructureKind,  ClassDeclarationStructure}} from './structures';\nimport type {{ OptionalKind }} from './types';\n\n{}",
            FACTORY
        );
        let changes = reconcile(&target);
        assert_eq!(changes.text, target);
        assert!(changes.added.is_empty());
        assert!(changes.removed.is_empty());
    }

    #[test]
    fn test_merges_into_existing_import_keeping_quotes() {
        let target = format!(
            "import {{ StructureKind }} from './structures';\nimport {{ OptionalKind }} from './types';\n\n{}",
            FACTORY
        );
        let changes = reconcile(&target);
        assert!(changes.text.starts_with(
            "import { StructureKind, ClassDeclarationStructure } from './structures';\nimport { OptionalKind } from './types';\n\n"
        ));
        assert_eq!(changes.added, vec!["ClassDeclarationStructure"]);
    }

    #[test]
    fn test_type_only_import_is_not_extended() {
        let target = format!(
            "import type {{ ClassDeclarationStructure }} from \"./structures\";\nimport {{ OptionalKind }} from \"./types\";\n\n{}",
            FACTORY
        );
        let changes = reconcile(&target);
        assert!(changes.text.starts_with(
            "import type { ClassDeclarationStructure } from \"./structures\";\nimport { OptionalKind } from \"./types\";\nimport { StructureKind } from \"./structures\";\n\n"
        ), "{}", changes.text);
    }

    #[test]
    fn test_unknown_names_are_left_alone() {
        let target = "import { OptionalKind } from \"./types\";\n\nexport const Structure = {\n    make(s: Partial<OptionalKind<string>>) { return s; },\n} as const;\n";
        let changes = reconcile(target);
        assert_eq!(changes.text, target);
    }

    #[test]
    fn test_removing_every_import() {
        let target = "import { A } from \"./a\";\nimport B from \"./b\";\nexport const Structure = {} as const;\n";
        let changes = reconcile(target);
        assert_eq!(changes.text, "export const Structure = {} as const;\n");
        assert_eq!(changes.removed, vec!["A", "B"]);
    }

    #[test]
    fn test_line_removal_range() {
        let text = "import a;  \r\nrest";
        assert_eq!(line_removal_range(text, TextRange::new(0, 9)), TextRange::new(0, 13));
        assert_eq!(line_removal_range("x;", TextRange::new(0, 2)), TextRange::new(0, 2));
    }
}
