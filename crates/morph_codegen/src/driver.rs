//! The generation pipeline.
//!
//! Each phase parses the working copy of the project into a fresh arena,
//! computes one edit of the target file and stores the new text back. The
//! caller's project is only touched by [`GenerationOutcome::apply`].

use crate::catalog::{collect_structures, StructureRecord};
use crate::config::GeneratorConfig;
use crate::error::{GenerationError, GenerationResult};
use crate::imports::reconcile_imports;
use crate::rewriter::{clear_generated, insert_methods};
use crate::synthesizer::{synthesize_all, MethodDescriptor};
use bumpalo::Bump;
use morph_core::collections::FxHashMap;
use morph_inspector::{ExpectedShape, Inspector, ObjectLiteralHandle};
use morph_project::{FileId, ParsedProject, Project};
use std::path::PathBuf;
use tracing::{debug, info, info_span, warn};

/// The result of a generation run, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub file: FileId,
    /// Project-relative path of the target file.
    pub path: String,
    pub original_text: String,
    pub new_text: String,
    /// Factory names inserted, in insertion order.
    pub created: Vec<String>,
    /// Factory names removed before insertion.
    pub removed: Vec<String>,
    pub imports_added: Vec<String>,
    pub imports_removed: Vec<String>,
}

impl GenerationOutcome {
    pub fn is_up_to_date(&self) -> bool {
        self.original_text == self.new_text
    }

    /// Store the new text in `project`.
    pub fn apply(&self, project: &mut Project) -> GenerationResult<()> {
        project.set_text(self.file, self.new_text.clone())?;
        Ok(())
    }

    /// Store the new text in `project` and write it under the project root.
    /// Nothing is written when the file is already up to date.
    pub fn write(&self, project: &mut Project) -> GenerationResult<Option<PathBuf>> {
        if self.is_up_to_date() {
            return Ok(None);
        }
        self.apply(project)?;
        Ok(Some(project.write_file(self.file)?))
    }
}

/// Regenerate the factory methods of the structure literal.
///
/// Methods starting with the generated prefix are removed, one factory per
/// structure is appended, and the imports of the target file are reconciled.
/// Running it on its own output yields the same text.
pub fn generate_structure_creators(project: &Project, config: &GeneratorConfig) -> GenerationResult<GenerationOutcome> {
    let _span = info_span!("generate", target = %config.target_file).entered();
    let mut working = project.clone();

    let (file, methods, cleared) = {
        let arena = Bump::new();
        let parsed = ParsedProject::parse(&working, &arena);
        let inspector = Inspector::new(&parsed, config.inspector_options());
        let file = inspector.get_file_or_fail(&config.target_file)?;
        check_syntax(&parsed, file, true)?;

        let literal = find_structure_literal(&inspector, file, config)?;
        let records = collect_structures(&inspector, config);
        let methods = synthesize_all(&records, config);
        check_duplicate_names(&inspector, &literal, &records, &methods, config)?;

        let cleared = clear_generated(&inspector, &literal, &config.generated_prefix);
        (file, methods, cleared)
    };
    let original_text = project
        .file(file)
        .ok_or(morph_project::ProjectError::UnknownFile(file))?
        .text()
        .to_string();
    working.set_text(file, cleared.text)?;

    let inserted = {
        let arena = Bump::new();
        let parsed = ParsedProject::parse(&working, &arena);
        let inspector = Inspector::new(&parsed, config.inspector_options());
        check_syntax(&parsed, file, false)?;
        let literal = find_structure_literal(&inspector, file, config)?;
        insert_methods(&inspector, &literal, &methods, &config.indent)
    };
    working.set_text(file, inserted.text)?;

    let imports = {
        let arena = Bump::new();
        let parsed = ParsedProject::parse(&working, &arena);
        let inspector = Inspector::new(&parsed, config.inspector_options());
        check_syntax(&parsed, file, false)?;
        reconcile_imports(&inspector, file)
    };

    let outcome = GenerationOutcome {
        file,
        path: working
            .file(file)
            .map(|f| f.path().to_string())
            .unwrap_or_default(),
        original_text,
        new_text: imports.text,
        created: inserted.names,
        removed: cleared.names,
        imports_added: imports.added,
        imports_removed: imports.removed,
    };
    info!(
        path = %outcome.path,
        created = outcome.created.len(),
        removed = outcome.removed.len(),
        up_to_date = outcome.is_up_to_date(),
        "generated structure creators"
    );
    Ok(outcome)
}

fn find_structure_literal<'a>(
    inspector: &Inspector<'_, 'a>,
    file: FileId,
    config: &GeneratorConfig,
) -> GenerationResult<ObjectLiteralHandle<'a>> {
    let declaration = inspector.get_exported_const_or_fail(file, &config.target_const)?;
    Ok(inspector.narrow_initializer_or_fail(&declaration, ExpectedShape::AssertedObjectLiteral)?)
}

/// Syntax errors in the target file stop the run. Errors elsewhere only
/// affect what the inspector can see, so they are reported once and skipped.
fn check_syntax(parsed: &ParsedProject<'_>, target: FileId, warn_others: bool) -> GenerationResult<()> {
    let target_file = parsed.file(target);
    if target_file.diagnostics.has_errors() {
        return Err(GenerationError::Syntax {
            file: target_file.path.to_string(),
            message: target_file.render_diagnostics().join("\n"),
        });
    }
    if warn_others {
        for file in parsed.files() {
            if file.id != target && file.diagnostics.has_errors() {
                warn!(
                    path = file.path,
                    errors = file.diagnostics.error_count(),
                    "file has syntax errors, its declarations may be missed"
                );
            }
        }
    }
    Ok(())
}

/// Two structures mapping to one factory name, or a factory name taken by a
/// member the generator does not own, would produce a literal with duplicate
/// keys.
fn check_duplicate_names<'a>(
    inspector: &Inspector<'_, 'a>,
    literal: &ObjectLiteralHandle<'a>,
    records: &[StructureRecord],
    methods: &[MethodDescriptor],
    config: &GeneratorConfig,
) -> GenerationResult<()> {
    let mut seen: FxHashMap<&str, &str> = FxHashMap::default();
    for (record, method) in records.iter().zip(methods) {
        if let Some(first) = seen.insert(method.name.as_str(), record.name.as_str()) {
            return Err(GenerationError::DuplicateFactoryName {
                name: method.name.clone(),
                first: first.to_string(),
                second: record.name.clone(),
            });
        }
    }

    for member in inspector.object_members(literal) {
        let Some(name) = member.name else {
            continue;
        };
        if member.is_method() && name.starts_with(&config.generated_prefix) {
            continue;
        }
        if let Some(structure) = seen.get(name) {
            debug!(name, kind = ?member.kind(), "factory collides with an existing member");
            return Err(GenerationError::DuplicateFactoryName {
                name: name.to_string(),
                first: structure.to_string(),
                second: format!("the existing member of '{}'", config.target_const),
            });
        }
    }
    Ok(())
}
