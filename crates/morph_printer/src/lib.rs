//! morph_printer: Structure to text output.
//!
//! The generator never prints whole files. It prints small pieces (factory
//! methods and import declarations) from plain structures and splices them
//! into the original text, so everything outside the edited spans is kept
//! byte-for-byte.

use morph_ast::node::*;
use std::fmt;

/// Options for the writer.
#[derive(Debug, Clone)]
pub struct PrinterOptions {
    /// Indentation string for one level.
    pub indent_str: String,
    /// Newline string.
    pub new_line: String,
    /// Quote style for module specifiers.
    pub quote_kind: QuoteKind,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            indent_str: "    ".to_string(),
            new_line: "\n".to_string(),
            quote_kind: QuoteKind::Double,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteKind {
    #[default]
    Double,
    Single,
}

impl QuoteKind {
    pub fn as_char(self) -> char {
        match self {
            QuoteKind::Double => '"',
            QuoteKind::Single => '\'',
        }
    }

    /// The quote style a parsed string literal was written with.
    pub fn of(literal: &StringLiteral<'_>) -> QuoteKind {
        if literal.single_quote {
            QuoteKind::Single
        } else {
            QuoteKind::Double
        }
    }
}

// ============================================================================
// Structures
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterStructure {
    pub name: String,
    pub type_annotation: Option<String>,
}

/// A method member of an object literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclarationStructure {
    pub name: String,
    /// Printed as a JSDoc block; a single line gives `/** text */`.
    pub docs: Option<String>,
    pub parameters: Vec<ParameterStructure>,
    pub return_type: Option<String>,
    /// Body statements, each printed on its own line.
    pub statements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpecifierStructure {
    /// The name exported by the module.
    pub name: String,
    /// The local name, when renamed.
    pub alias: Option<String>,
    pub is_type_only: bool,
}

impl ImportSpecifierStructure {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            is_type_only: false,
        }
    }

    /// The name this specifier binds in the importing file.
    pub fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

impl fmt::Display for ImportSpecifierStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_type_only {
            write!(f, "type ")?;
        }
        write!(f, "{}", self.name)?;
        if let Some(alias) = &self.alias {
            write!(f, " as {}", alias)?;
        }
        Ok(())
    }
}

impl<'a> From<&ImportSpecifier<'a>> for ImportSpecifierStructure {
    fn from(node: &ImportSpecifier<'a>) -> Self {
        Self {
            name: node.imported_name().to_string(),
            alias: node.property_name.map(|_| node.name.name.to_string()),
            is_type_only: node.is_type_only,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportDeclarationStructure {
    pub is_type_only: bool,
    pub default_import: Option<String>,
    pub namespace_import: Option<String>,
    pub named_imports: Vec<ImportSpecifierStructure>,
    pub module_specifier: String,
}

impl ImportDeclarationStructure {
    /// Capture a parsed import declaration.
    pub fn from_node(node: &ImportDeclaration<'_>) -> Self {
        let mut structure = Self {
            module_specifier: node.module_specifier.value.to_string(),
            ..Self::default()
        };
        if let Some(clause) = node.import_clause {
            structure.is_type_only = clause.is_type_only;
            structure.default_import = clause.name.map(|n| n.name.to_string());
            match &clause.named_bindings {
                Some(NamedImportBindings::NamespaceImport(ns)) => {
                    structure.namespace_import = Some(ns.name.name.to_string());
                }
                Some(NamedImportBindings::NamedImports(named)) => {
                    structure.named_imports = named.elements.iter().map(ImportSpecifierStructure::from).collect();
                }
                None => {}
            }
        }
        structure
    }

    /// Whether the declaration binds nothing, i.e. is a side-effect import.
    pub fn is_side_effect(&self) -> bool {
        self.default_import.is_none() && self.namespace_import.is_none() && self.named_imports.is_empty()
    }
}

// ============================================================================
// Writer
// ============================================================================

/// An indentation-aware string builder.
pub struct CodeWriter {
    output: String,
    indent_level: u32,
    options: PrinterOptions,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::with_options(PrinterOptions::default())
    }

    pub fn with_options(options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(1024),
            indent_level: 0,
            options,
        }
    }

    pub fn options(&self) -> &PrinterOptions {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn into_string(self) -> String {
        self.output
    }

    pub fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    pub fn write_newline(&mut self) {
        self.output.push_str(&self.options.new_line);
    }

    pub fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.options.indent_str);
        }
    }

    /// Indent, write `s`, end the line.
    pub fn write_line(&mut self, s: &str) {
        self.write_indent();
        self.write(s);
        self.write_newline();
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn set_indent_level(&mut self, level: u32) {
        self.indent_level = level;
    }

    pub fn write_quoted(&mut self, value: &str) {
        let quote = self.options.quote_kind.as_char();
        self.output.push(quote);
        for ch in value.chars() {
            if ch == quote || ch == '\\' {
                self.output.push('\\');
            }
            self.output.push(ch);
        }
        self.output.push(quote);
    }

    fn write_docs(&mut self, docs: &str) {
        let lines: Vec<&str> = docs.lines().collect();
        if lines.len() <= 1 {
            self.write_indent();
            self.write("/** ");
            self.write(docs.trim());
            self.write(" */");
            self.write_newline();
            return;
        }
        self.write_line("/**");
        for line in lines {
            self.write_indent();
            if line.is_empty() {
                self.write(" *");
            } else {
                self.write(" * ");
                self.write(line);
            }
            self.write_newline();
        }
        self.write_line(" */");
    }

    /// Print an object-literal method, starting at the current indentation.
    /// The closing brace ends the output; separators are the caller's.
    pub fn print_method(&mut self, method: &MethodDeclarationStructure) {
        if let Some(docs) = &method.docs {
            self.write_docs(docs);
        }
        self.write_indent();
        self.write(&method.name);
        self.write("(");
        for (i, parameter) in method.parameters.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(&parameter.name);
            if let Some(ty) = &parameter.type_annotation {
                self.write(": ");
                self.write(ty);
            }
        }
        self.write(")");
        if let Some(return_type) = &method.return_type {
            self.write(": ");
            self.write(return_type);
        }
        self.write(" {");
        self.write_newline();
        self.increase_indent();
        for statement in &method.statements {
            self.write_line(statement);
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    /// Print the named specifiers of an import, comma separated.
    pub fn print_import_specifiers(&mut self, specifiers: &[ImportSpecifierStructure]) {
        for (i, specifier) in specifiers.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.output.push_str(&specifier.to_string());
        }
    }

    /// Print an import declaration, including its semicolon.
    pub fn print_import_declaration(&mut self, import: &ImportDeclarationStructure) {
        self.write("import ");
        if import.is_type_only {
            self.write("type ");
        }
        if !import.is_side_effect() {
            if let Some(default_import) = &import.default_import {
                self.write(default_import);
                if import.namespace_import.is_some() || !import.named_imports.is_empty() {
                    self.write(", ");
                }
            }
            if let Some(namespace) = &import.namespace_import {
                self.write("* as ");
                self.write(namespace);
            } else if !import.named_imports.is_empty() {
                self.write("{ ");
                self.print_import_specifiers(&import.named_imports);
                self.write(" }");
            }
            self.write(" from ");
        }
        self.write_quoted(&import.module_specifier);
        self.write(";");
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}
