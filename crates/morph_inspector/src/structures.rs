//! Structure interfaces and their kinds.
//!
//! A structure's kind is the type of its `kind` property, which is usually
//! inherited: `ClassDeclarationStructure` extends
//! `KindedStructure<StructureKind.Class>`, whose `kind: TKind` only becomes
//! `StructureKind.Class` once the type argument is substituted.

use crate::Inspector;
use morph_ast::*;
use morph_core::collections::{FxHashMap, FxHashSet};
use morph_core::intern::InternedString;
use morph_project::FileId;
use tracing::trace;

/// Identity of an interface: merged declarations in one file share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructureId {
    pub file: FileId,
    pub name: InternedString,
}

/// Type parameter bindings in effect while walking a base interface.
type Substitution<'a> = FxHashMap<&'a str, &'a TypeNode<'a>>;

/// Lazily yields one [`StructureId`] per structure interface declaration,
/// across all files in load order.
pub struct StructureTypes<'i, 'p, 'a> {
    inspector: &'i Inspector<'p, 'a>,
    file_index: usize,
    statement_index: usize,
}

impl<'i, 'p, 'a> Iterator for StructureTypes<'i, 'p, 'a> {
    type Item = StructureId;

    fn next(&mut self) -> Option<StructureId> {
        let files = self.inspector.project.files();
        while let Some(file) = files.get(self.file_index) {
            let statements = file.source_file.statements;
            while let Some(stmt) = statements.get(self.statement_index) {
                self.statement_index += 1;
                if let Statement::InterfaceDeclaration(decl) = stmt {
                    if decl.name.name.ends_with(self.inspector.options.structure_suffix.as_str()) {
                        return Some(StructureId {
                            file: file.id,
                            name: decl.name.text,
                        });
                    }
                }
            }
            self.file_index += 1;
            self.statement_index = 0;
        }
        None
    }
}

impl<'p, 'a> Inspector<'p, 'a> {
    /// All structure interface declarations. Calling again starts over.
    pub fn list_structure_types(&self) -> StructureTypes<'_, 'p, 'a> {
        StructureTypes {
            inspector: self,
            file_index: 0,
            statement_index: 0,
        }
    }

    pub fn structure_name(&self, id: StructureId) -> &str {
        self.project.interner().resolve(id.name)
    }

    fn declarations(&self, id: StructureId) -> &[&'a InterfaceDeclaration<'a>] {
        self.interfaces.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolve the interface an `extends` entry or type reference names, as
    /// seen from `file`: a local interface, a named or namespace import, or
    /// failing those the first interface of that name in load order.
    pub fn resolve_interface(&self, file: FileId, name: &EntityName<'a>) -> Option<StructureId> {
        match name.as_qualified() {
            None => {
                let id = name.leftmost();
                let local = StructureId { file, name: id.text };
                if self.interfaces.contains_key(&local) {
                    return Some(local);
                }
                if let Some(target) = self
                    .find_import(file, id.name)
                    .and_then(|(source, imported)| self.resolve_export(source, imported))
                {
                    return self.interface_in(target.file, target.local_name);
                }
                self.interfaces.keys().find(|key| key.name == id.text).copied()
            }
            Some((EntityName::Identifier(namespace), right)) => {
                let source = self.find_namespace_import(file, namespace.name)?;
                let target = self.resolve_export(source, right.name)?;
                self.interface_in(target.file, target.local_name)
            }
            Some(_) => None,
        }
    }

    fn interface_in(&self, file: FileId, name: &str) -> Option<StructureId> {
        let name = self.project.interner().get(name)?;
        let id = StructureId { file, name };
        self.interfaces.contains_key(&id).then_some(id)
    }

    /// The enum member naming this structure's kind, e.g. `"Class"`.
    ///
    /// Own `kind` members (across merged declarations) win over inherited
    /// ones; bases are searched depth-first in declaration order. Anything
    /// other than a reference to `<kind enum>.<Member>` yields `None`.
    pub fn get_structure_kind_name(&self, id: StructureId) -> Option<String> {
        let mut visiting = FxHashSet::default();
        let kind_type = self.find_kind_type(id, &Substitution::default(), &mut visiting);
        let member = kind_type.and_then(|ty| self.kind_enum_member(ty));
        if member.is_none() {
            trace!(structure = self.structure_name(id), "no structure kind");
        }
        member.map(str::to_string)
    }

    fn find_kind_type(
        &self,
        id: StructureId,
        substitution: &Substitution<'a>,
        visiting: &mut FxHashSet<StructureId>,
    ) -> Option<&'a TypeNode<'a>> {
        if !visiting.insert(id) {
            trace!(structure = self.structure_name(id), "extends cycle");
            return None;
        }
        let result = self.find_kind_type_uncached(id, substitution, visiting);
        visiting.remove(&id);
        result
    }

    fn find_kind_type_uncached(
        &self,
        id: StructureId,
        substitution: &Substitution<'a>,
        visiting: &mut FxHashSet<StructureId>,
    ) -> Option<&'a TypeNode<'a>> {
        let declarations = self.declarations(id);

        for decl in declarations {
            let members: &'a [TypeElement<'a>] = decl.members;
            for member in members {
                if let TypeElement::PropertySignature(property) = member {
                    if property.name.text() == Some("kind") {
                        return property.type_annotation.map(|ty| substitute(ty, substitution));
                    }
                }
            }
        }

        for decl in declarations {
            for base in decl.extends_types() {
                let Some(base_id) = self.resolve_interface(id.file, &base.expression) else {
                    continue;
                };
                let base_substitution = self.bind_type_arguments(base_id, base.type_arguments, substitution);
                if let Some(found) = self.find_kind_type(base_id, &base_substitution, visiting) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Bind `base`'s type parameters to the arguments written in an
    /// `extends` clause, falling back to parameter defaults.
    fn bind_type_arguments(
        &self,
        base: StructureId,
        arguments: Option<&'a [TypeNode<'a>]>,
        outer: &Substitution<'a>,
    ) -> Substitution<'a> {
        let mut bound = Substitution::default();
        let parameters = self
            .declarations(base)
            .iter()
            .find_map(|decl| decl.type_parameters)
            .unwrap_or(&[]);
        let arguments = arguments.unwrap_or(&[]);
        for (i, parameter) in parameters.iter().enumerate() {
            let value = match arguments.get(i) {
                Some(argument) => Some(substitute(argument, outer)),
                None => parameter.default,
            };
            if let Some(value) = value {
                bound.insert(parameter.name.name, value);
            }
        }
        bound
    }

    fn kind_enum_member(&self, ty: &'a TypeNode<'a>) -> Option<&'a str> {
        let TypeNode::TypeReference(reference) = ty.skip_parentheses() else {
            return None;
        };
        if reference.type_arguments.is_some() {
            return None;
        }
        match reference.type_name.as_qualified() {
            Some((EntityName::Identifier(left), right)) if left.name == self.options.kind_enum => Some(right.name),
            _ => None,
        }
    }

    /// The structure interfaces this one directly extends.
    pub fn get_base_structures(&self, id: StructureId) -> Vec<StructureId> {
        let mut bases = Vec::new();
        for decl in self.declarations(id) {
            for base in decl.extends_types() {
                if let Some(base_id) = self.resolve_interface(id.file, &base.expression) {
                    let is_structure = self
                        .structure_name(base_id)
                        .ends_with(self.options.structure_suffix.as_str());
                    if is_structure && !bases.contains(&base_id) {
                        bases.push(base_id);
                    }
                }
            }
        }
        bases
    }
}

/// Replace a bare reference to a bound type parameter by its binding.
fn substitute<'a>(ty: &'a TypeNode<'a>, substitution: &Substitution<'a>) -> &'a TypeNode<'a> {
    if let TypeNode::TypeReference(reference) = ty.skip_parentheses() {
        if let (EntityName::Identifier(id), None) = (&reference.type_name, reference.type_arguments) {
            if let Some(bound) = substitution.get(id.name) {
                return *bound;
            }
        }
    }
    ty
}

#[cfg(test)]
mod tests {
    use crate::{Inspector, InspectorOptions, StructureId};
    use bumpalo::Bump;
    use morph_project::{ParsedProject, Project};

    fn kinds(files: &[(&str, &str)]) -> Vec<(String, Option<String>)> {
        let mut project = Project::new();
        for (path, text) in files {
            project.add_file(path, *text);
        }
        let arena = Bump::new();
        let parsed = ParsedProject::parse(&project, &arena);
        let inspector = Inspector::new(&parsed, InspectorOptions::default());
        inspector
            .list_structure_types()
            .map(|id: StructureId| (inspector.structure_name(id).to_string(), inspector.get_structure_kind_name(id)))
            .collect()
    }

    #[test]
    fn test_kind_from_own_member() {
        let result = kinds(&[(
            "a.ts",
            "export interface DecoratorStructure { kind: StructureKind.Decorator; name: string; }\n\
             export interface NamedStructure { name: string; }\n\
             export interface LooseStructure { kind: StructureKind; }\n\
             export interface UnionStructure { kind: StructureKind.A | StructureKind.B; }\n\
             export interface OtherEnumStructure { kind: OtherKind.A; }\n\
             interface NotAStruct { kind: StructureKind.Nope; }",
        )]);
        assert_eq!(
            result,
            vec![
                ("DecoratorStructure".to_string(), Some("Decorator".to_string())),
                ("NamedStructure".to_string(), None),
                ("LooseStructure".to_string(), None),
                ("UnionStructure".to_string(), None),
                ("OtherEnumStructure".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_kind_through_generic_bases() {
        let result = kinds(&[
            (
                "src/structures/KindedStructure.ts",
                "export interface KindedStructure<TKind extends StructureKind> { kind: TKind; }",
            ),
            (
                "src/structures/class/ClassDeclarationStructure.ts",
                "import { KindedStructure } from \"../KindedStructure\";\n\
                 export interface ClassDeclarationStructure extends Structure, ClassDeclarationSpecificStructure {}\n\
                 interface ClassDeclarationSpecificStructure extends KindedStructure<StructureKind.Class> { name?: string; }",
            ),
            (
                "src/structures/Forwarding.ts",
                "interface ForwardStructure<T> extends KindedStructure<T> {}\n\
                 export interface ConcreteStructure extends ForwardStructure<StructureKind.Concrete> {}\n\
                 export interface UnboundStructure extends KindedStructure<TMissing> {}\n\
                 interface DefaultedStructure<T = StructureKind.Defaulted> extends KindedStructure<T> {}\n\
                 export interface UsesDefaultStructure extends DefaultedStructure {}",
            ),
        ]);
        let lookup = |name: &str| result.iter().find(|(n, _)| n == name).and_then(|(_, k)| k.clone());
        assert_eq!(lookup("KindedStructure"), None);
        assert_eq!(lookup("ClassDeclarationStructure"), Some("Class".to_string()));
        assert_eq!(lookup("ClassDeclarationSpecificStructure"), Some("Class".to_string()));
        assert_eq!(lookup("ConcreteStructure"), Some("Concrete".to_string()));
        assert_eq!(lookup("UnboundStructure"), None);
        assert_eq!(lookup("UsesDefaultStructure"), Some("Defaulted".to_string()));
    }

    #[test]
    fn test_merged_declarations_share_identity() {
        let result = kinds(&[(
            "a.ts",
            "export interface MergedStructure extends BaseStructure {}\n\
             export interface BaseStructure { kind: StructureKind.Base; }\n\
             export interface MergedStructure { kind: StructureKind.Own; }",
        )]);
        assert_eq!(
            result,
            vec![
                ("MergedStructure".to_string(), Some("Own".to_string())),
                ("BaseStructure".to_string(), Some("Base".to_string())),
                ("MergedStructure".to_string(), Some("Own".to_string())),
            ]
        );
    }

    #[test]
    fn test_extends_cycle_terminates() {
        let result = kinds(&[(
            "a.ts",
            "interface AStructure extends BStructure {}\n\
             interface BStructure extends AStructure {}\n\
             interface CStructure extends AStructure, KindStructure {}\n\
             interface KindStructure { kind: StructureKind.K; }",
        )]);
        assert_eq!(result[0].1, None);
        assert_eq!(result[1].1, None);
        assert_eq!(result[2].1, Some("K".to_string()));
    }

    #[test]
    fn test_list_is_restartable_and_bases() {
        let mut project = Project::new();
        project.add_file(
            "a.ts",
            "interface AStructure extends BStructure, Named, BStructure {}\ninterface BStructure {}\ninterface Named {}",
        );
        let arena = Bump::new();
        let parsed = ParsedProject::parse(&project, &arena);
        let inspector = Inspector::new(&parsed, InspectorOptions::default());

        let first: Vec<_> = inspector.list_structure_types().collect();
        let second: Vec<_> = inspector.list_structure_types().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);

        let bases = inspector.get_base_structures(first[0]);
        assert_eq!(bases, vec![first[1]]);
    }
}
