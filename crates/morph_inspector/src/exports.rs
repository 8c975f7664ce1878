//! Module resolution and export lookup within the project.

use crate::Inspector;
use morph_ast::*;
use morph_core::collections::FxHashSet;
use morph_project::FileId;
use morph_tspath::resolution_candidates;

/// Where an exported name is declared: the file and the local name there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportTarget<'a> {
    pub file: FileId,
    pub local_name: &'a str,
}

/// The declaration spaces a binding occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meaning {
    Value,
    Type,
    /// Enums and classes name both a value and a type.
    Both,
}

impl Meaning {
    #[inline]
    pub fn is_value(self) -> bool {
        matches!(self, Meaning::Value | Meaning::Both)
    }

    #[inline]
    pub fn is_type(self) -> bool {
        matches!(self, Meaning::Type | Meaning::Both)
    }
}

/// Names a statement declares, with the space each one lives in.
pub fn declared_bindings<'a>(stmt: &Statement<'a>, mut f: impl FnMut(&'a str, Meaning)) {
    match stmt {
        Statement::InterfaceDeclaration(n) => f(n.name.name, Meaning::Type),
        Statement::TypeAliasDeclaration(n) => f(n.name.name, Meaning::Type),
        Statement::EnumDeclaration(n) => f(n.name.name, Meaning::Both),
        Statement::FunctionDeclaration(n) => {
            if let Some(name) = n.name {
                f(name.name, Meaning::Value)
            }
        }
        Statement::VariableStatement(n) => {
            for decl in n.declaration_list.declarations.iter() {
                decl.name.for_each_bound_identifier(&mut |id| f(id.name, Meaning::Value));
            }
        }
        Statement::UnsupportedStatement(n) => {
            if let Some(name) = n.name {
                f(name.name, Meaning::Both)
            }
        }
        _ => {}
    }
}

/// Names a statement declares, in any space.
pub fn declared_names<'a>(stmt: &Statement<'a>, mut f: impl FnMut(&'a str)) {
    declared_bindings(stmt, |name, _| f(name));
}

impl<'p, 'a> Inspector<'p, 'a> {
    /// Resolve a relative module specifier written in `from` to a project file.
    pub fn resolve_module(&self, from: FileId, specifier: &str) -> Option<FileId> {
        resolution_candidates(self.file_path(from), specifier)
            .iter()
            .find_map(|candidate| self.paths.get(candidate.as_str()).copied())
    }

    /// Follow `name` as exported by `file` through re-exports to its declaration.
    pub fn resolve_export(&self, file: FileId, name: &str) -> Option<ExportTarget<'a>> {
        let mut visited = FxHashSet::default();
        self.resolve_export_inner(file, name, &mut visited)
    }

    fn resolve_export_inner(
        &self,
        file: FileId,
        name: &str,
        visited: &mut FxHashSet<(FileId, String)>,
    ) -> Option<ExportTarget<'a>> {
        if !visited.insert((file, name.to_string())) {
            return None;
        }
        let statements: &'a [Statement<'a>] = self.source_file(file).statements;

        for stmt in statements {
            if !stmt.is_exported() {
                continue;
            }
            let mut found = None;
            declared_names(stmt, |declared| {
                if found.is_none() && declared == name {
                    found = Some(declared);
                }
            });
            if let Some(local_name) = found {
                return Some(ExportTarget { file, local_name });
            }
        }

        let mut star_sources = Vec::new();
        for stmt in statements {
            let Statement::ExportDeclaration(export) = stmt else {
                continue;
            };
            match (&export.export_clause, &export.module_specifier) {
                (Some(NamedExportBindings::NamedExports(named)), module_specifier) => {
                    let Some(spec) = named.elements.iter().find(|s| s.name.name == name) else {
                        continue;
                    };
                    let local = spec.local_name();
                    let target = match module_specifier {
                        Some(module) => self
                            .resolve_module(file, module.value)
                            .and_then(|source| self.resolve_export_inner(source, local, visited)),
                        None => self.resolve_local(file, local, visited),
                    };
                    if target.is_some() {
                        return target;
                    }
                }
                (None, Some(module)) => star_sources.push(module.value),
                _ => {}
            }
        }

        star_sources.into_iter().find_map(|specifier| {
            let source = self.resolve_module(file, specifier)?;
            self.resolve_export_inner(source, name, visited)
        })
    }

    /// A name used locally in `file`: declared there, or imported.
    fn resolve_local(
        &self,
        file: FileId,
        name: &str,
        visited: &mut FxHashSet<(FileId, String)>,
    ) -> Option<ExportTarget<'a>> {
        let statements: &'a [Statement<'a>] = self.source_file(file).statements;
        for stmt in statements {
            let mut found = None;
            declared_names(stmt, |declared| {
                if found.is_none() && declared == name {
                    found = Some(declared);
                }
            });
            if let Some(local_name) = found {
                return Some(ExportTarget { file, local_name });
            }
        }
        let (source, imported) = self.find_import(file, name)?;
        self.resolve_export_inner(source, imported, visited)
    }

    /// The file and exported name behind a local named import binding.
    pub(crate) fn find_import(&self, file: FileId, local: &str) -> Option<(FileId, &'a str)> {
        for import in self.source_file(file).imports() {
            let Some(clause) = import.import_clause else {
                continue;
            };
            let Some(NamedImportBindings::NamedImports(named)) = &clause.named_bindings else {
                continue;
            };
            if let Some(spec) = named.elements.iter().find(|s| s.name.name == local) {
                let source = self.resolve_module(file, import.module_specifier.value)?;
                return Some((source, spec.imported_name()));
            }
        }
        None
    }

    /// The file a namespace import binding (`import * as ns`) refers to.
    pub(crate) fn find_namespace_import(&self, file: FileId, local: &str) -> Option<FileId> {
        self.source_file(file).imports().find_map(|import| {
            let clause = import.import_clause?;
            match &clause.named_bindings {
                Some(NamedImportBindings::NamespaceImport(ns)) if ns.name.name == local => {
                    self.resolve_module(file, import.module_specifier.value)
                }
                _ => None,
            }
        })
    }

    /// Every project file other than `exclude` that exports `name`, in load order.
    pub fn files_exporting(&self, name: &str, exclude: FileId) -> Vec<FileId> {
        self.project
            .files()
            .iter()
            .map(|f| f.id)
            .filter(|&id| id != exclude && self.resolve_export(id, name).is_some())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{declared_bindings, Meaning};
    use crate::{Inspector, InspectorOptions};
    use bumpalo::Bump;
    use morph_project::{FileId, ParsedProject, Project};

    #[test]
    fn test_declared_bindings_split_values_and_types() {
        let mut project = Project::new();
        let file = project.add_file(
            "a.ts",
            "export interface Structure {}\ntype Alias = string;\nenum Kind { A }\nfunction f() {}\nexport const Structure = {}, [x] = [];\n",
        );
        let arena = Bump::new();
        let parsed = ParsedProject::parse(&project, &arena);
        let mut bindings = Vec::new();
        for stmt in parsed.file(file).source_file.statements.iter() {
            declared_bindings(stmt, |name, meaning| bindings.push((name, meaning)));
        }
        assert_eq!(
            bindings,
            vec![
                ("Structure", Meaning::Type),
                ("Alias", Meaning::Type),
                ("Kind", Meaning::Both),
                ("f", Meaning::Value),
                ("Structure", Meaning::Value),
                ("x", Meaning::Value),
            ]
        );
        assert!(Meaning::Both.is_value() && Meaning::Both.is_type());
        assert!(!Meaning::Type.is_value() && !Meaning::Value.is_type());
    }

    #[test]
    fn test_resolve_export_through_reexports() {
        let mut project = Project::new();
        project.add_file("src/structures/class/ClassDeclarationStructure.ts", "export interface ClassDeclarationStructure {}");
        project.add_file("src/structures/class/index.ts", "export * from \"./ClassDeclarationStructure\";");
        project.add_file("src/structures/index.ts", "export { ClassDeclarationStructure as ClassStructure } from \"./class\";");
        project.add_file(
            "src/structures/aliases.ts",
            "import { ClassDeclarationStructure } from \"./class\";\nexport { ClassDeclarationStructure };",
        );
        project.add_file("src/cycle.ts", "export * from \"./cycle\";");

        let arena = Bump::new();
        let parsed = ParsedProject::parse(&project, &arena);
        let inspector = Inspector::new(&parsed, InspectorOptions::default());

        let direct = inspector.resolve_export(FileId(1), "ClassDeclarationStructure").unwrap();
        assert_eq!(direct.file, FileId(0));

        let renamed = inspector.resolve_export(FileId(2), "ClassStructure").unwrap();
        assert_eq!((renamed.file, renamed.local_name), (FileId(0), "ClassDeclarationStructure"));
        assert!(inspector.resolve_export(FileId(2), "ClassDeclarationStructure").is_none());

        let aliased = inspector.resolve_export(FileId(3), "ClassDeclarationStructure").unwrap();
        assert_eq!(aliased.file, FileId(0));

        assert!(inspector.resolve_export(FileId(4), "Anything").is_none());

        assert_eq!(
            inspector.files_exporting("ClassDeclarationStructure", FileId(0)),
            vec![FileId(1), FileId(3)]
        );
    }
}
