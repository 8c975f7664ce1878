//! morph_inspector: Read-only queries over a parsed project.
//!
//! The inspector answers the questions the generator asks before it edits
//! anything: which file is the target, which exported const holds the
//! structure literal, which interfaces are structures and which kind each
//! one has. Every fallible lookup returns an [`InspectError`].

mod exports;
mod structures;

pub use exports::{declared_bindings, declared_names, Meaning};
pub use structures::{StructureId, StructureTypes};

use morph_ast::*;
use morph_core::collections::{FxHashMap, FxIndexMap};
use morph_core::text::{line_break_len_at, TextRange};
use morph_project::{FileId, ParsedProject};
use morph_tspath::path_ends_with;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InspectError {
    #[error("could not find {what} '{name}'")]
    NotFound { what: &'static str, name: String },

    #[error("expected '{name}' to be {expected}, but it is {actual}")]
    ShapeMismatch {
        name: String,
        expected: String,
        actual: String,
    },
}

/// The syntactic shape an initializer is narrowed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedShape {
    /// A bare `{ ... }`.
    ObjectLiteral,
    /// `{ ... } as T`, `{ ... } as const` or `<T>{ ... }`.
    AssertedObjectLiteral,
}

impl fmt::Display for ExpectedShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedShape::ObjectLiteral => write!(f, "ObjectLiteralExpression"),
            ExpectedShape::AssertedObjectLiteral => write!(f, "AsExpression(ObjectLiteralExpression)"),
        }
    }
}

/// Names the inspector treats specially.
#[derive(Debug, Clone)]
pub struct InspectorOptions {
    /// Interfaces whose name ends with this are structures.
    pub structure_suffix: String,
    /// The enum whose members are structure kinds.
    pub kind_enum: String,
}

impl Default for InspectorOptions {
    fn default() -> Self {
        Self {
            structure_suffix: "Structure".to_string(),
            kind_enum: "StructureKind".to_string(),
        }
    }
}

/// An exported `const` variable declaration.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationHandle<'a> {
    pub file: FileId,
    pub name: &'a str,
    pub declaration: &'a VariableDeclaration<'a>,
}

/// An object literal found by narrowing an initializer.
#[derive(Debug, Clone, Copy)]
pub struct ObjectLiteralHandle<'a> {
    pub file: FileId,
    pub literal: &'a ObjectLiteralExpression<'a>,
}

/// One member of an object literal, with the offsets span edits need.
#[derive(Debug, Clone, Copy)]
pub struct ObjectMember<'a> {
    pub index: usize,
    pub element: &'a ObjectLiteralElement<'a>,
    pub name: Option<&'a str>,
    /// End of the preceding `{` or `,`.
    pub full_start: u32,
    /// End of the member's trailing comma, if any.
    pub separator_end: Option<u32>,
}

impl<'a> ObjectMember<'a> {
    #[inline]
    pub fn is_method(&self) -> bool {
        self.element.is_method()
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.element.kind()
    }

    /// The span that deletes this member from `text`.
    ///
    /// A member on lines of its own loses those whole lines, from the line
    /// after its predecessor's separator through its own line break, so a
    /// trailing comment of the previous member stays. Otherwise the span is
    /// `[full_start, separator end or member end)`.
    pub fn removal_range(&self, text: &str) -> TextRange {
        let range = self.element.range();
        let end = self.separator_end.unwrap_or(range.end);
        let leading = &text[self.full_start as usize..range.pos as usize];
        let Some(first_break) = leading.find('\n') else {
            return TextRange::new(self.full_start, end);
        };
        let rest = &text[end as usize..];
        let blanks = rest.len() - rest.trim_start_matches([' ', '\t']).len();
        let line_break = line_break_len_at(text, end as usize + blanks);
        if line_break == 0 {
            return TextRange::new(self.full_start, end);
        }
        TextRange::new(
            self.full_start + first_break as u32 + 1,
            end + (blanks + line_break) as u32,
        )
    }
}

pub struct Inspector<'p, 'a> {
    project: &'p ParsedProject<'a>,
    options: InspectorOptions,
    paths: FxHashMap<&'a str, FileId>,
    /// Interface declarations by identity, in first-declaration order.
    interfaces: FxIndexMap<StructureId, Vec<&'a InterfaceDeclaration<'a>>>,
}

impl<'p, 'a> Inspector<'p, 'a> {
    pub fn new(project: &'p ParsedProject<'a>, options: InspectorOptions) -> Self {
        let mut paths = FxHashMap::default();
        let mut interfaces: FxIndexMap<StructureId, Vec<&'a InterfaceDeclaration<'a>>> = FxIndexMap::default();
        for file in project.files() {
            paths.insert(file.path, file.id);
            let statements: &'a [Statement<'a>] = file.source_file.statements;
            for stmt in statements {
                if let Statement::InterfaceDeclaration(decl) = stmt {
                    let id = StructureId {
                        file: file.id,
                        name: decl.name.text,
                    };
                    interfaces.entry(id).or_default().push(*decl);
                }
            }
        }
        debug!(files = paths.len(), interfaces = interfaces.len(), "indexed project");
        Self {
            project,
            options,
            paths,
            interfaces,
        }
    }

    pub fn project(&self) -> &'p ParsedProject<'a> {
        self.project
    }

    pub fn options(&self) -> &InspectorOptions {
        &self.options
    }

    pub fn file_path(&self, file: FileId) -> &'a str {
        self.project.file(file).path
    }

    pub fn source_file(&self, file: FileId) -> &'a SourceFile<'a> {
        self.project.file(file).source_file
    }

    /// Find a file by exact path, or by path suffix on a `/` boundary.
    /// An exact match wins; among suffix matches the first in load order does.
    pub fn get_file_or_fail(&self, name: &str) -> Result<FileId, InspectError> {
        if let Some(&id) = self.paths.get(morph_tspath::normalize_path(name).as_str()) {
            return Ok(id);
        }
        let mut matches = self.project.files().iter().filter(|f| path_ends_with(f.path, name));
        let first = matches.next().ok_or_else(|| InspectError::NotFound {
            what: "file",
            name: name.to_string(),
        })?;
        if let Some(other) = matches.next() {
            warn!(name, chosen = first.path, other = other.path, "file name is ambiguous");
        }
        Ok(first.id)
    }

    /// Find the exported `const` declaration `name` in `file`.
    pub fn get_exported_const_or_fail(&self, file: FileId, name: &str) -> Result<DeclarationHandle<'a>, InspectError> {
        let statements: &'a [Statement<'a>] = self.source_file(file).statements;
        for stmt in statements {
            let Statement::VariableStatement(var) = stmt else {
                continue;
            };
            if !stmt.is_exported() || !var.declaration_list.data.flags.contains(NodeFlags::CONST) {
                continue;
            }
            let declarations: &'a [VariableDeclaration<'a>] = var.declaration_list.declarations;
            for declaration in declarations {
                if let Some(id) = declaration.name.as_identifier() {
                    if id.name == name {
                        return Ok(DeclarationHandle {
                            file,
                            name: id.name,
                            declaration,
                        });
                    }
                }
            }
        }
        Err(InspectError::NotFound {
            what: "exported const",
            name: name.to_string(),
        })
    }

    /// Narrow a declaration's initializer to an object literal of the
    /// expected shape. Parentheses are looked through at every level.
    pub fn narrow_initializer_or_fail(
        &self,
        decl: &DeclarationHandle<'a>,
        expected: ExpectedShape,
    ) -> Result<ObjectLiteralHandle<'a>, InspectError> {
        let mismatch = |actual: String| InspectError::ShapeMismatch {
            name: decl.name.to_string(),
            expected: expected.to_string(),
            actual,
        };
        let initializer: &'a Expression<'a> = decl
            .declaration
            .initializer
            .ok_or_else(|| mismatch("no initializer".to_string()))?;
        let expr = initializer.skip_parentheses();

        let literal_expr = match expected {
            ExpectedShape::ObjectLiteral => expr,
            ExpectedShape::AssertedObjectLiteral => match expr {
                Expression::As(assertion) => assertion.expression.skip_parentheses(),
                Expression::TypeAssertion(assertion) => assertion.expression.skip_parentheses(),
                other => return Err(mismatch(other.kind().display_text())),
            },
        };
        match literal_expr {
            Expression::ObjectLiteral(literal) => Ok(ObjectLiteralHandle {
                file: decl.file,
                literal,
            }),
            other => Err(mismatch(other.kind().display_text())),
        }
    }

    /// The literal's members in source order.
    pub fn object_members(&self, handle: &ObjectLiteralHandle<'a>) -> impl Iterator<Item = ObjectMember<'a>> + 'a {
        let literal: &'a ObjectLiteralExpression<'a> = handle.literal;
        literal.properties.iter().enumerate().map(move |(index, element)| ObjectMember {
            index,
            element,
            name: element.name(),
            full_start: literal.member_full_start(index),
            separator_end: literal.member_separator_end(index),
        })
    }
}
