use crate::{FileId, Project};
use bumpalo::Bump;
use morph_ast::SourceFile;
use morph_core::intern::StringInterner;
use morph_core::text::LineMap;
use morph_diagnostics::DiagnosticCollection;
use morph_parser::Parser;
use tracing::{debug, trace};

/// A parsed file of a [`ParsedProject`].
pub struct ParsedFile<'a> {
    pub id: FileId,
    pub path: &'a str,
    pub source_file: &'a SourceFile<'a>,
    pub diagnostics: DiagnosticCollection,
}

impl<'a> ParsedFile<'a> {
    pub fn text(&self) -> &'a str {
        self.source_file.text
    }

    /// The diagnostics rendered as `path:line:col: ...` lines.
    pub fn render_diagnostics(&self) -> Vec<String> {
        let line_map = LineMap::new(self.text());
        self.diagnostics
            .diagnostics()
            .iter()
            .map(|d| d.render_with_lines(&line_map))
            .collect()
    }
}

/// Every file of a project parsed into one arena, sharing one interner.
pub struct ParsedProject<'a> {
    interner: StringInterner,
    files: Vec<ParsedFile<'a>>,
}

impl<'a> ParsedProject<'a> {
    pub fn parse(project: &'a Project, arena: &'a Bump) -> Self {
        let interner = StringInterner::new();
        let mut files = Vec::with_capacity(project.len());
        for (id, file) in project.files() {
            let mut parser = Parser::new(arena, &interner, file.path(), file.text());
            let source_file: &'a SourceFile<'a> = arena.alloc(parser.parse_source_file());
            let diagnostics = parser.take_diagnostics();
            trace!(path = file.path(), statements = source_file.statements.len(), "parsed file");
            if !diagnostics.is_empty() {
                debug!(path = file.path(), count = diagnostics.len(), "file has diagnostics");
            }
            files.push(ParsedFile {
                id,
                path: source_file.file_name,
                source_file,
                diagnostics,
            });
        }
        Self { interner, files }
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn file(&self, id: FileId) -> &ParsedFile<'a> {
        &self.files[id.index()]
    }

    /// Files in load order.
    pub fn files(&self) -> &[ParsedFile<'a>] {
        &self.files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_project_keeps_load_order_and_diagnostics() {
        let mut project = Project::new();
        project.add_file("b.ts", "export interface BStructure {}");
        project.add_file("a.ts", "export const x = ;");

        let arena = Bump::new();
        let parsed = ParsedProject::parse(&project, &arena);
        let paths: Vec<_> = parsed.files().iter().map(|f| f.path).collect();
        assert_eq!(paths, vec!["b.ts", "a.ts"]);
        assert!(!parsed.file(FileId(0)).diagnostics.has_errors());
        assert!(parsed.file(FileId(1)).diagnostics.has_errors());

        let rendered = parsed.file(FileId(1)).render_diagnostics();
        assert!(rendered[0].starts_with("a.ts:1:"), "{:?}", rendered);
    }
}
