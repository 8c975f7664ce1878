//! The parser proper.
//!
//! A hand-written recursive descent parser over [`Scanner`] tokens. Nodes are
//! allocated in the caller's `bumpalo` arena, identifiers are interned in the
//! caller's [`StringInterner`].
//!
//! Constructs outside the supported subset (classes, namespaces, loops,
//! `try`) are skipped as a whole with a warning and kept as
//! [`UnsupportedStatement`]s carrying the identifiers they mention.

use crate::precedence::{get_binary_operator_precedence, OperatorPrecedence};
use crate::utilities::*;
use bumpalo::Bump;
use morph_ast::node::*;
use morph_ast::syntax_kind::SyntaxKind;
use morph_ast::types::*;
use morph_core::intern::StringInterner;
use morph_core::text::{TextPos, TextSpan};
use morph_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use morph_scanner::{Scanner, ScannerState};

/// Maximum recursion depth for nested expressions and types.
const MAX_RECURSION_DEPTH: u32 = 200;

/// Move a `Vec` into the arena as a slice.
fn alloc_vec_in<T>(arena: &Bump, vec: Vec<T>) -> &[T] {
    if vec.is_empty() {
        return &[];
    }
    arena.alloc_slice_fill_iter(vec)
}

/// Everything needed to rewind the parser after a speculative parse.
struct ParserState {
    scanner: ScannerState,
    prev_token_end: TextPos,
    diagnostics_len: usize,
    in_conditional_extends: bool,
}

/// The TypeScript parser.
pub struct Parser<'a> {
    arena: &'a Bump,
    scanner: Scanner<'a>,
    interner: StringInterner,
    file_name: &'a str,
    source_text: &'a str,
    diagnostics: DiagnosticCollection,
    recursion_depth: u32,
    /// End of the last consumed token; nodes end here.
    prev_token_end: TextPos,
    /// Set while parsing the `extends` operand of a conditional type, where a
    /// nested `extends ... ?` belongs to the enclosing conditional.
    in_conditional_extends: bool,
}

impl<'a> Parser<'a> {
    pub fn new(arena: &'a Bump, interner: &StringInterner, file_name: &str, source_text: &'a str) -> Self {
        Self {
            arena,
            scanner: Scanner::new(file_name, source_text),
            interner: interner.clone(),
            file_name: arena.alloc_str(file_name),
            source_text,
            diagnostics: DiagnosticCollection::new(),
            recursion_depth: 0,
            prev_token_end: 0,
            in_conditional_extends: false,
        }
    }

    /// Parse the whole file.
    pub fn parse_source_file(&mut self) -> SourceFile<'a> {
        self.next_token();

        let mut statements = Vec::new();
        loop {
            self.parse_statement_list(is_block_terminator, &mut statements);
            if self.current_token() != SyntaxKind::CloseBraceToken {
                break;
            }
            // A stray `}` at the top level.
            self.error(&messages::DECLARATION_OR_STATEMENT_EXPECTED, &[]);
            self.next_token();
        }

        let end = self.source_text.len() as TextPos;
        SourceFile {
            data: NodeData::new(SyntaxKind::SourceFile, 0, end),
            statements: alloc_vec_in(self.arena, statements),
            file_name: self.file_name,
            text: self.source_text,
        }
    }

    /// Take all parser and scanner diagnostics, sorted by position.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        let mut diagnostics = std::mem::take(&mut self.diagnostics);
        diagnostics.extend(self.scanner.take_diagnostics());
        diagnostics.sort();
        diagnostics
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    fn current_token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.token_end() as TextPos;
        self.scanner.scan()
    }

    #[inline]
    fn token_pos(&self) -> TextPos {
        self.scanner.token_start() as TextPos
    }

    #[inline]
    fn token_end(&self) -> TextPos {
        self.scanner.token_end() as TextPos
    }

    #[inline]
    fn node_end(&self) -> TextPos {
        self.prev_token_end
    }

    #[inline]
    fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    /// Copy the current token's value into the arena.
    fn token_value(&self) -> &'a str {
        self.arena.alloc_str(self.scanner.token_value())
    }

    fn is_identifier_text(&self, text: &str) -> bool {
        self.current_token() == SyntaxKind::Identifier && self.scanner.token_value() == text
    }

    /// Consume the current token, whatever it is.
    fn parse_token(&mut self) -> Token {
        let token = Token::new(self.current_token(), self.token_pos(), self.token_end());
        self.next_token();
        token
    }

    fn expect_token(&mut self, kind: SyntaxKind) -> bool {
        if self.current_token() == kind {
            self.next_token();
            true
        } else {
            let text = kind.display_text();
            self.error(&messages::_0_EXPECTED, &[text.as_str()]);
            false
        }
    }

    fn optional_token(&mut self, kind: SyntaxKind) -> Option<Token> {
        if self.current_token() == kind {
            Some(self.parse_token())
        } else {
            None
        }
    }

    /// Whether automatic semicolon insertion applies here.
    fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.current_token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.has_preceding_line_break()
    }

    fn parse_expected_semicolon(&mut self) {
        if self.current_token() == SyntaxKind::SemicolonToken {
            self.next_token();
        } else if !self.can_parse_semicolon() {
            self.error(&messages::_0_EXPECTED, &[";"]);
        }
    }

    fn next_token_is(&mut self, kind: SyntaxKind) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.current_token() == kind
        })
    }

    fn next_token_is_on_same_line(&mut self, predicate: fn(SyntaxKind) -> bool) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break() && predicate(p.current_token())
        })
    }

    // ========================================================================
    // Speculative parsing
    // ========================================================================

    fn save_state(&self) -> ParserState {
        ParserState {
            scanner: self.scanner.save_state(),
            prev_token_end: self.prev_token_end,
            diagnostics_len: self.diagnostics.len(),
            in_conditional_extends: self.in_conditional_extends,
        }
    }

    fn restore_state(&mut self, state: ParserState) {
        self.scanner.restore_state(state.scanner);
        self.prev_token_end = state.prev_token_end;
        self.diagnostics.truncate(state.diagnostics_len);
        self.in_conditional_extends = state.in_conditional_extends;
    }

    fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.save_state();
        let result = f(self);
        self.restore_state(state);
        result
    }

    /// Run `f`, rewinding everything it consumed when it returns `None`.
    fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let state = self.save_state();
        let result = f(self);
        if result.is_none() {
            self.restore_state(state);
        }
        result
    }

    /// Parser and scanner diagnostics recorded so far.
    fn error_count(&self) -> usize {
        self.diagnostics.len() + self.scanner.diagnostics().len()
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    fn error(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        let (pos, end) = (self.token_pos(), self.token_end());
        self.error_at(pos, end, message, args);
    }

    fn error_at(&mut self, pos: TextPos, end: TextPos, message: &DiagnosticMessage, args: &[&str]) {
        // One diagnostic per position keeps cascades down.
        let last_start = self.diagnostics.diagnostics().last().and_then(|d| d.span).map(|s| s.start);
        if last_start == Some(pos) {
            return;
        }
        self.diagnostics.add(Diagnostic::with_location(
            self.file_name.to_string(),
            TextSpan::from_bounds(pos, end),
            message,
            args,
        ));
    }

    fn enter_recursion(&mut self) -> bool {
        self.recursion_depth += 1;
        if self.recursion_depth > MAX_RECURSION_DEPTH {
            self.error(&messages::MAXIMUM_NESTING_DEPTH_EXCEEDED, &[]);
            self.recursion_depth -= 1;
            return false;
        }
        true
    }

    fn exit_recursion(&mut self) {
        self.recursion_depth -= 1;
    }

    // ========================================================================
    // Identifiers and literals
    // ========================================================================

    fn create_identifier(&mut self) -> Identifier<'a> {
        let pos = self.token_pos();
        let name = self.token_value();
        let text = self.interner.intern(name);
        self.next_token();
        Identifier {
            data: NodeData::new(SyntaxKind::Identifier, pos, self.node_end()),
            text,
            name,
        }
    }

    fn create_missing_identifier(&mut self) -> Identifier<'a> {
        let pos = self.token_pos();
        Identifier {
            data: NodeData::new(SyntaxKind::Identifier, pos, pos).with_flags(NodeFlags::MISSING),
            text: self.interner.intern_static(""),
            name: "",
        }
    }

    /// An identifier in binding or reference position. Contextual keywords
    /// are accepted; reserved words are not.
    fn parse_identifier(&mut self) -> Identifier<'a> {
        if self.current_token().is_identifier_or_contextual_keyword() {
            self.create_identifier()
        } else {
            self.error(&messages::IDENTIFIER_EXPECTED, &[]);
            self.create_missing_identifier()
        }
    }

    /// A name after `.` or in a property position, where any keyword is fine.
    fn parse_identifier_name(&mut self) -> Identifier<'a> {
        if self.current_token().is_identifier_or_keyword() {
            self.create_identifier()
        } else {
            self.error(&messages::IDENTIFIER_EXPECTED, &[]);
            self.create_missing_identifier()
        }
    }

    fn parse_string_literal(&mut self) -> StringLiteral<'a> {
        let pos = self.token_pos();
        let value = self.token_value();
        let single_quote = self.scanner.token_flags().contains(TokenFlags::SINGLE_QUOTE);
        self.next_token();
        StringLiteral {
            data: NodeData::new(SyntaxKind::StringLiteral, pos, self.node_end()),
            value,
            single_quote,
        }
    }

    /// Numeric, bigint and regular expression literals keep their source text.
    fn parse_literal_expression(&mut self) -> LiteralExpression<'a> {
        let kind = self.current_token();
        let pos = self.token_pos();
        let text = self.scanner.token_text();
        self.next_token();
        LiteralExpression {
            data: NodeData::new(kind, pos, self.node_end()),
            text,
        }
    }

    /// No-substitution templates keep their cooked value.
    fn parse_template_literal(&mut self) -> LiteralExpression<'a> {
        let pos = self.token_pos();
        let text = self.token_value();
        self.next_token();
        LiteralExpression {
            data: NodeData::new(SyntaxKind::NoSubstitutionTemplateLiteral, pos, self.node_end()),
            text,
        }
    }

    fn parse_module_specifier(&mut self) -> StringLiteral<'a> {
        if self.current_token() == SyntaxKind::StringLiteral {
            return self.parse_string_literal();
        }
        self.error(&messages::STRING_LITERAL_EXPECTED, &[]);
        let pos = self.token_pos();
        StringLiteral {
            data: NodeData::new(SyntaxKind::StringLiteral, pos, pos).with_flags(NodeFlags::MISSING),
            value: "",
            single_quote: false,
        }
    }

    fn parse_property_name(&mut self) -> PropertyName<'a> {
        match self.current_token() {
            SyntaxKind::StringLiteral => PropertyName::StringLiteral(self.parse_string_literal()),
            SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                PropertyName::NumericLiteral(self.parse_literal_expression())
            }
            SyntaxKind::OpenBracketToken => {
                let pos = self.token_pos();
                self.next_token();
                let expression = self.parse_assignment_expression_and_alloc();
                self.expect_token(SyntaxKind::CloseBracketToken);
                PropertyName::ComputedPropertyName(self.arena.alloc(ComputedPropertyName {
                    data: NodeData::new(SyntaxKind::ComputedPropertyName, pos, self.node_end()),
                    expression,
                }))
            }
            _ => PropertyName::Identifier(self.parse_identifier_name()),
        }
    }

    fn parse_entity_name(&mut self) -> EntityName<'a> {
        let pos = self.token_pos();
        let mut entity = EntityName::Identifier(self.parse_identifier());
        while self.current_token() == SyntaxKind::DotToken {
            self.next_token();
            let right = self.parse_identifier_name();
            entity = EntityName::QualifiedName(self.arena.alloc(QualifiedName {
                data: NodeData::new(SyntaxKind::QualifiedName, pos, self.node_end()),
                left: entity,
                right,
            }));
        }
        entity
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_statement_list(&mut self, is_terminator: fn(SyntaxKind) -> bool, statements: &mut Vec<Statement<'a>>) {
        while !is_terminator(self.current_token()) {
            let saved_pos = self.token_pos();
            statements.push(self.parse_statement());

            // Nothing consumed: resynchronise so the loop always makes progress.
            if self.token_pos() == saved_pos && !is_terminator(self.current_token()) {
                self.skip_to_next_statement();
            }
        }
    }

    fn parse_statements(&mut self, is_terminator: fn(SyntaxKind) -> bool) -> NodeList<'a, Statement<'a>> {
        let mut statements = Vec::new();
        self.parse_statement_list(is_terminator, &mut statements);
        alloc_vec_in(self.arena, statements)
    }

    /// Skip the offending token, then everything up to a plausible statement start.
    fn skip_to_next_statement(&mut self) {
        self.next_token();
        while !is_block_terminator(self.current_token()) {
            if self.current_token() == SyntaxKind::SemicolonToken {
                self.next_token();
                return;
            }
            if can_start_statement(self.current_token()) {
                return;
            }
            self.next_token();
        }
    }

    fn parse_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        match self.current_token() {
            SyntaxKind::SemicolonToken => Statement::EmptyStatement(self.parse_token()),
            SyntaxKind::OpenBraceToken => Statement::Block(self.parse_block()),
            SyntaxKind::VarKeyword => self.parse_variable_statement(pos, ModifierFlags::NONE),
            SyntaxKind::LetKeyword if self.is_let_declaration() => {
                self.parse_variable_statement(pos, ModifierFlags::NONE)
            }
            SyntaxKind::ConstKeyword => {
                if self.next_token_is(SyntaxKind::EnumKeyword) {
                    self.parse_declaration()
                } else {
                    self.parse_variable_statement(pos, ModifierFlags::NONE)
                }
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos, ModifierFlags::NONE),
            SyntaxKind::EnumKeyword => self.parse_enum_declaration(pos, ModifierFlags::NONE),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::BreakKeyword | SyntaxKind::ContinueKeyword => self.parse_break_or_continue_statement(),
            SyntaxKind::ImportKeyword => {
                let is_expression = self.look_ahead(|p| {
                    p.next_token();
                    matches!(p.current_token(), SyntaxKind::OpenParenToken | SyntaxKind::DotToken)
                });
                if is_expression {
                    self.parse_expression_or_labeled_statement()
                } else if self.is_import_equals_declaration() {
                    self.parse_unsupported_statement(pos, ModifierFlags::NONE)
                } else {
                    self.parse_import_declaration()
                }
            }
            SyntaxKind::ExportKeyword => self.parse_export(),
            kind if is_unsupported_statement_start(kind) => self.parse_unsupported_statement(pos, ModifierFlags::NONE),
            _ if self.is_start_of_declaration() => self.parse_declaration(),
            _ => self.parse_expression_or_labeled_statement(),
        }
    }

    fn is_let_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.current_token().is_identifier_or_contextual_keyword()
                || matches!(p.current_token(), SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken)
        })
    }

    /// Whether the current contextual keyword starts a declaration rather
    /// than an expression (`type Foo = ...` versus `type = 1`).
    fn is_start_of_declaration(&mut self) -> bool {
        let kind = self.current_token();
        if !matches!(
            kind,
            SyntaxKind::InterfaceKeyword
                | SyntaxKind::TypeKeyword
                | SyntaxKind::NamespaceKeyword
                | SyntaxKind::ModuleKeyword
                | SyntaxKind::GlobalKeyword
                | SyntaxKind::AsyncKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::AbstractKeyword
        ) {
            return false;
        }
        self.look_ahead(|p| {
            p.next_token();
            if p.has_preceding_line_break() {
                return false;
            }
            let next = p.current_token();
            match kind {
                SyntaxKind::InterfaceKeyword | SyntaxKind::TypeKeyword => next.is_identifier_or_contextual_keyword(),
                SyntaxKind::NamespaceKeyword | SyntaxKind::ModuleKeyword => {
                    next.is_identifier_or_contextual_keyword() || next == SyntaxKind::StringLiteral
                }
                SyntaxKind::GlobalKeyword => next == SyntaxKind::OpenBraceToken,
                SyntaxKind::AsyncKeyword => next == SyntaxKind::FunctionKeyword,
                _ => next.is_identifier_or_keyword(),
            }
        })
    }

    fn is_import_equals_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if p.current_token() == SyntaxKind::TypeKeyword {
                p.next_token();
                if p.current_token() == SyntaxKind::EqualsToken {
                    return true;
                }
            }
            if !p.current_token().is_identifier_or_contextual_keyword() {
                return false;
            }
            p.next_token();
            p.current_token() == SyntaxKind::EqualsToken
        })
    }

    fn parse_modifiers(&mut self) -> ModifierFlags {
        let mut flags = ModifierFlags::NONE;
        while self.current_token().is_modifier_kind() && self.next_token_can_follow_modifier() {
            flags |= ModifierFlags::from_modifier_kind(self.current_token());
            self.next_token();
        }
        flags
    }

    fn next_token_can_follow_modifier(&mut self) -> bool {
        let modifier = self.current_token();
        self.look_ahead(|p| {
            p.next_token();
            let next = p.current_token();
            match modifier {
                SyntaxKind::ConstKeyword => next == SyntaxKind::EnumKeyword,
                SyntaxKind::ExportKeyword => !matches!(
                    next,
                    SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken | SyntaxKind::EqualsToken
                ),
                SyntaxKind::DefaultKeyword => matches!(
                    next,
                    SyntaxKind::ClassKeyword
                        | SyntaxKind::FunctionKeyword
                        | SyntaxKind::InterfaceKeyword
                        | SyntaxKind::AbstractKeyword
                        | SyntaxKind::AsyncKeyword
                ),
                _ => {
                    !p.has_preceding_line_break()
                        && (next.is_identifier_or_keyword()
                            || matches!(
                                next,
                                SyntaxKind::OpenBraceToken
                                    | SyntaxKind::OpenBracketToken
                                    | SyntaxKind::AsteriskToken
                                    | SyntaxKind::DotDotDotToken
                            ))
                }
            }
        })
    }

    fn parse_declaration(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        let modifiers = self.parse_modifiers();
        match self.current_token() {
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_statement(pos, modifiers)
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos, modifiers),
            SyntaxKind::InterfaceKeyword => self.parse_interface_declaration(pos, modifiers),
            SyntaxKind::TypeKeyword => self.parse_type_alias_declaration(pos, modifiers),
            SyntaxKind::EnumKeyword => self.parse_enum_declaration(pos, modifiers),
            SyntaxKind::ClassKeyword
            | SyntaxKind::NamespaceKeyword
            | SyntaxKind::ModuleKeyword
            | SyntaxKind::GlobalKeyword
            | SyntaxKind::ImportKeyword
            | SyntaxKind::AtToken => self.parse_unsupported_statement(pos, modifiers),
            _ => {
                self.error(&messages::DECLARATION_OR_STATEMENT_EXPECTED, &[]);
                self.parse_expression_or_labeled_statement()
            }
        }
    }

    fn parse_block(&mut self) -> &'a Block<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statements(is_block_terminator);
        self.expect_token(SyntaxKind::CloseBraceToken);
        self.arena.alloc(Block {
            data: NodeData::new(SyntaxKind::Block, pos, self.node_end()),
            statements,
        })
    }

    fn parse_variable_statement(&mut self, pos: TextPos, modifiers: ModifierFlags) -> Statement<'a> {
        let list_pos = self.token_pos();
        let flags = match self.current_token() {
            SyntaxKind::LetKeyword => NodeFlags::LET,
            SyntaxKind::ConstKeyword => NodeFlags::CONST,
            _ => NodeFlags::NONE,
        };
        self.next_token();

        let mut declarations = Vec::new();
        loop {
            declarations.push(self.parse_variable_declaration());
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        let declaration_list = VariableDeclarationList {
            data: NodeData::new(SyntaxKind::VariableDeclarationList, list_pos, self.node_end()).with_flags(flags),
            declarations: alloc_vec_in(self.arena, declarations),
        };
        self.parse_expected_semicolon();

        Statement::VariableStatement(self.arena.alloc(VariableStatement {
            data: NodeData::new(SyntaxKind::VariableStatement, pos, self.node_end()).with_modifiers(modifiers),
            declaration_list,
        }))
    }

    fn parse_variable_declaration(&mut self) -> VariableDeclaration<'a> {
        let pos = self.token_pos();
        let name = self.parse_binding_name();
        let exclamation_token = if self.has_preceding_line_break() {
            None
        } else {
            self.optional_token(SyntaxKind::ExclamationToken)
        };
        let type_annotation = self.parse_type_annotation();
        let initializer = if self.optional_token(SyntaxKind::EqualsToken).is_some() {
            Some(self.parse_assignment_expression_and_alloc())
        } else {
            None
        };
        VariableDeclaration {
            data: NodeData::new(SyntaxKind::VariableDeclaration, pos, self.node_end()),
            name,
            exclamation_token,
            type_annotation,
            initializer,
        }
    }

    fn parse_function_declaration(&mut self, pos: TextPos, modifiers: ModifierFlags) -> Statement<'a> {
        self.expect_token(SyntaxKind::FunctionKeyword);
        let asterisk_token = self.optional_token(SyntaxKind::AsteriskToken);
        let name = if self.current_token().is_identifier_or_contextual_keyword() {
            Some(self.parse_identifier())
        } else {
            if !modifiers.contains(ModifierFlags::DEFAULT) {
                self.error(&messages::IDENTIFIER_EXPECTED, &[]);
            }
            None
        };
        let type_parameters = self.try_parse_type_parameters();
        let parameters = self.parse_parameter_list();
        let return_type = self.parse_return_type_annotation();
        let body = if self.current_token() == SyntaxKind::OpenBraceToken {
            Some(self.parse_block())
        } else {
            self.parse_expected_semicolon();
            None
        };

        Statement::FunctionDeclaration(self.arena.alloc(FunctionDeclaration {
            data: NodeData::new(SyntaxKind::FunctionDeclaration, pos, self.node_end()).with_modifiers(modifiers),
            asterisk_token,
            name,
            type_parameters,
            parameters,
            return_type,
            body,
        }))
    }

    fn parse_if_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::IfKeyword);
        self.expect_token(SyntaxKind::OpenParenToken);
        let expression = self.parse_expression_and_alloc();
        self.expect_token(SyntaxKind::CloseParenToken);
        let then_statement: &'a Statement<'a> = self.arena.alloc(self.parse_statement());
        let else_statement = if self.optional_token(SyntaxKind::ElseKeyword).is_some() {
            let statement: &'a Statement<'a> = self.arena.alloc(self.parse_statement());
            Some(statement)
        } else {
            None
        };
        Statement::IfStatement(self.arena.alloc(IfStatement {
            data: NodeData::new(SyntaxKind::IfStatement, pos, self.node_end()),
            expression,
            then_statement,
            else_statement,
        }))
    }

    fn parse_return_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::ReturnKeyword);
        let expression = if self.can_parse_semicolon() {
            None
        } else {
            Some(self.parse_expression_and_alloc())
        };
        self.parse_expected_semicolon();
        Statement::ReturnStatement(self.arena.alloc(ReturnStatement {
            data: NodeData::new(SyntaxKind::ReturnStatement, pos, self.node_end()),
            expression,
        }))
    }

    fn parse_throw_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::ThrowKeyword);
        let expression = self.parse_expression_and_alloc();
        self.parse_expected_semicolon();
        Statement::ThrowStatement(self.arena.alloc(ThrowStatement {
            data: NodeData::new(SyntaxKind::ThrowStatement, pos, self.node_end()),
            expression,
        }))
    }

    fn parse_switch_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::SwitchKeyword);
        self.expect_token(SyntaxKind::OpenParenToken);
        let expression = self.parse_expression_and_alloc();
        self.expect_token(SyntaxKind::CloseParenToken);
        self.expect_token(SyntaxKind::OpenBraceToken);

        let mut clauses = Vec::new();
        while matches!(self.current_token(), SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword) {
            let clause_pos = self.token_pos();
            let (kind, clause_expression) = if self.optional_token(SyntaxKind::CaseKeyword).is_some() {
                (SyntaxKind::CaseClause, Some(self.parse_expression_and_alloc()))
            } else {
                self.next_token();
                (SyntaxKind::DefaultClause, None)
            };
            self.expect_token(SyntaxKind::ColonToken);
            let statements = self.parse_statements(is_case_clause_terminator);
            clauses.push(CaseOrDefaultClause {
                data: NodeData::new(kind, clause_pos, self.node_end()),
                expression: clause_expression,
                statements,
            });
        }
        self.expect_token(SyntaxKind::CloseBraceToken);

        Statement::SwitchStatement(self.arena.alloc(SwitchStatement {
            data: NodeData::new(SyntaxKind::SwitchStatement, pos, self.node_end()),
            expression,
            clauses: alloc_vec_in(self.arena, clauses),
        }))
    }

    fn parse_break_or_continue_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        let is_break = self.current_token() == SyntaxKind::BreakKeyword;
        self.next_token();
        let label = if !self.can_parse_semicolon() && self.current_token().is_identifier_or_contextual_keyword() {
            Some(self.parse_identifier())
        } else {
            None
        };
        self.parse_expected_semicolon();
        let kind = if is_break { SyntaxKind::BreakStatement } else { SyntaxKind::ContinueStatement };
        let node = self.arena.alloc(BreakOrContinueStatement {
            data: NodeData::new(kind, pos, self.node_end()),
            label,
        });
        if is_break {
            Statement::BreakStatement(node)
        } else {
            Statement::ContinueStatement(node)
        }
    }

    fn parse_expression_or_labeled_statement(&mut self) -> Statement<'a> {
        // Labels carry no meaning for us; parse straight through them.
        if self.current_token().is_identifier_or_contextual_keyword() && self.next_token_is(SyntaxKind::ColonToken) {
            self.next_token();
            self.next_token();
            return self.parse_statement();
        }
        let pos = self.token_pos();
        let expression = self.parse_expression_and_alloc();
        self.parse_expected_semicolon();
        Statement::ExpressionStatement(self.arena.alloc(ExpressionStatement {
            data: NodeData::new(SyntaxKind::ExpressionStatement, pos, self.node_end()),
            expression,
        }))
    }

    /// Skip a construct outside the supported subset, keeping the
    /// identifiers it mentions.
    fn parse_unsupported_statement(&mut self, pos: TextPos, modifiers: ModifierFlags) -> Statement<'a> {
        let keyword = self.current_token();
        let keyword_text = keyword.display_text();
        let (keyword_pos, keyword_end) = (self.token_pos(), self.token_end());
        self.error_at(keyword_pos, keyword_end, &messages::_0_DECLARATIONS_ARE_NOT_SUPPORTED, &[keyword_text.as_str()]);
        self.next_token();

        let name = if matches!(
            keyword,
            SyntaxKind::ClassKeyword | SyntaxKind::NamespaceKeyword | SyntaxKind::ModuleKeyword
        ) && self.current_token() == SyntaxKind::Identifier
        {
            Some(self.create_identifier())
        } else {
            None
        };

        let mut identifiers = Vec::new();
        let mut depth = 0u32;
        // Brace depths at which an open template substitution resumes.
        let mut template_depths: Vec<u32> = Vec::new();
        let mut last_kind = keyword;
        loop {
            let kind = self.current_token();
            match kind {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::OpenBraceToken | SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken => depth += 1,
                SyntaxKind::TemplateHead => template_depths.push(depth),
                SyntaxKind::CloseBraceToken if template_depths.last() == Some(&depth) => {
                    if self.scanner.rescan_template_continuation() == SyntaxKind::TemplateTail {
                        template_depths.pop();
                    }
                }
                SyntaxKind::CloseBraceToken | SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken => {
                    if depth == 0 {
                        // Belongs to an enclosing block.
                        break;
                    }
                    depth -= 1;
                    if depth == 0 && kind == SyntaxKind::CloseBraceToken {
                        self.next_token();
                        let continues = matches!(self.current_token(), SyntaxKind::CatchKeyword | SyntaxKind::FinallyKeyword)
                            || (keyword == SyntaxKind::DoKeyword && self.current_token() == SyntaxKind::WhileKeyword);
                        if continues {
                            last_kind = kind;
                            continue;
                        }
                        break;
                    }
                }
                SyntaxKind::SemicolonToken if depth == 0 => {
                    self.next_token();
                    break;
                }
                SyntaxKind::Identifier
                    if !matches!(last_kind, SyntaxKind::DotToken | SyntaxKind::QuestionDotToken) =>
                {
                    identifiers.push(self.create_identifier());
                    last_kind = kind;
                    continue;
                }
                _ => {}
            }
            last_kind = kind;
            self.next_token();
        }

        Statement::UnsupportedStatement(self.arena.alloc(UnsupportedStatement {
            data: NodeData::new(SyntaxKind::UnsupportedStatement, pos, self.node_end()).with_modifiers(modifiers),
            keyword,
            name,
            identifiers: alloc_vec_in(self.arena, identifiers),
        }))
    }

    // ========================================================================
    // Interfaces, type aliases, enums
    // ========================================================================

    fn parse_interface_declaration(&mut self, pos: TextPos, modifiers: ModifierFlags) -> Statement<'a> {
        self.expect_token(SyntaxKind::InterfaceKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.try_parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        let members = self.parse_object_type_members();
        Statement::InterfaceDeclaration(self.arena.alloc(InterfaceDeclaration {
            data: NodeData::new(SyntaxKind::InterfaceDeclaration, pos, self.node_end()).with_modifiers(modifiers),
            name,
            type_parameters,
            heritage_clauses,
            members,
        }))
    }

    fn parse_heritage_clauses(&mut self) -> Option<NodeList<'a, HeritageClause<'a>>> {
        let mut clauses = Vec::new();
        while matches!(self.current_token(), SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword) {
            let pos = self.token_pos();
            let token = self.current_token();
            self.next_token();
            let mut types = Vec::new();
            loop {
                let type_pos = self.token_pos();
                let expression = self.parse_entity_name();
                let type_arguments = if self.current_token() == SyntaxKind::LessThanToken {
                    Some(self.parse_type_arguments())
                } else {
                    None
                };
                types.push(ExpressionWithTypeArguments {
                    data: NodeData::new(SyntaxKind::ExpressionWithTypeArguments, type_pos, self.node_end()),
                    expression,
                    type_arguments,
                });
                if self.optional_token(SyntaxKind::CommaToken).is_none() {
                    break;
                }
            }
            clauses.push(HeritageClause {
                data: NodeData::new(SyntaxKind::HeritageClause, pos, self.node_end()),
                token,
                types: alloc_vec_in(self.arena, types),
            });
        }
        if clauses.is_empty() {
            None
        } else {
            Some(alloc_vec_in(self.arena, clauses))
        }
    }

    /// `{ member; member, ... }` of an interface or type literal.
    fn parse_object_type_members(&mut self) -> NodeList<'a, TypeElement<'a>> {
        self.expect_token(SyntaxKind::OpenBraceToken);
        let mut members = Vec::new();
        while !is_block_terminator(self.current_token()) {
            let start = self.token_pos();
            members.push(self.parse_type_member());
            if matches!(self.current_token(), SyntaxKind::SemicolonToken | SyntaxKind::CommaToken) {
                self.next_token();
            } else if self.token_pos() == start {
                self.error(&messages::UNEXPECTED_TOKEN, &[]);
                self.next_token();
            }
        }
        self.expect_token(SyntaxKind::CloseBraceToken);
        alloc_vec_in(self.arena, members)
    }

    fn parse_type_member(&mut self) -> TypeElement<'a> {
        let pos = self.token_pos();
        match self.current_token() {
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken => {
                return TypeElement::CallSignature(self.parse_signature_member(pos, SyntaxKind::CallSignature));
            }
            SyntaxKind::NewKeyword
                if self.look_ahead(|p| {
                    p.next_token();
                    matches!(p.current_token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken)
                }) =>
            {
                self.next_token();
                return TypeElement::ConstructSignature(self.parse_signature_member(pos, SyntaxKind::ConstructSignature));
            }
            _ => {}
        }

        let modifiers = self.parse_modifiers();
        if self.current_token() == SyntaxKind::OpenBracketToken && self.is_index_signature() {
            return TypeElement::IndexSignature(self.parse_index_signature(pos, modifiers));
        }

        // `get foo(): T` and `set foo(v)` are modelled as method signatures.
        if matches!(self.current_token(), SyntaxKind::GetKeyword | SyntaxKind::SetKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                is_property_name_start(p.current_token())
            })
        {
            self.next_token();
        }

        let name = self.parse_property_name();
        let question_token = self.optional_token(SyntaxKind::QuestionToken);
        if matches!(self.current_token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            let type_parameters = self.try_parse_type_parameters();
            let parameters = self.parse_parameter_list();
            let return_type = self.parse_return_type_annotation();
            return TypeElement::MethodSignature(self.arena.alloc(MethodSignature {
                data: NodeData::new(SyntaxKind::MethodSignature, pos, self.node_end()).with_modifiers(modifiers),
                name,
                question_token,
                type_parameters,
                parameters,
                return_type,
            }));
        }

        let type_annotation = self.parse_type_annotation();
        TypeElement::PropertySignature(self.arena.alloc(PropertySignature {
            data: NodeData::new(SyntaxKind::PropertySignature, pos, self.node_end()).with_modifiers(modifiers),
            name,
            question_token,
            type_annotation,
        }))
    }

    fn parse_signature_member(&mut self, pos: TextPos, kind: SyntaxKind) -> &'a SignatureDeclaration<'a> {
        let type_parameters = self.try_parse_type_parameters();
        let parameters = self.parse_parameter_list();
        let return_type = self.parse_return_type_annotation();
        self.arena.alloc(SignatureDeclaration {
            data: NodeData::new(kind, pos, self.node_end()),
            type_parameters,
            parameters,
            return_type,
        })
    }

    /// `[key: K]` as opposed to a computed property name `[expr]`.
    fn is_index_signature(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if !p.current_token().is_identifier_or_keyword() {
                return false;
            }
            p.next_token();
            p.current_token() == SyntaxKind::ColonToken
        })
    }

    fn parse_index_signature(&mut self, pos: TextPos, modifiers: ModifierFlags) -> &'a IndexSignatureDeclaration<'a> {
        self.expect_token(SyntaxKind::OpenBracketToken);
        let mut parameters = Vec::new();
        while !matches!(self.current_token(), SyntaxKind::CloseBracketToken | SyntaxKind::EndOfFileToken) {
            parameters.push(self.parse_parameter());
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseBracketToken);
        let type_annotation = self.parse_type_annotation();
        self.arena.alloc(IndexSignatureDeclaration {
            data: NodeData::new(SyntaxKind::IndexSignature, pos, self.node_end()).with_modifiers(modifiers),
            parameters: alloc_vec_in(self.arena, parameters),
            type_annotation,
        })
    }

    fn parse_type_alias_declaration(&mut self, pos: TextPos, modifiers: ModifierFlags) -> Statement<'a> {
        self.expect_token(SyntaxKind::TypeKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.try_parse_type_parameters();
        self.expect_token(SyntaxKind::EqualsToken);
        let type_node = self.parse_type_and_alloc();
        self.parse_expected_semicolon();
        Statement::TypeAliasDeclaration(self.arena.alloc(TypeAliasDeclaration {
            data: NodeData::new(SyntaxKind::TypeAliasDeclaration, pos, self.node_end()).with_modifiers(modifiers),
            name,
            type_parameters,
            type_node,
        }))
    }

    fn parse_enum_declaration(&mut self, pos: TextPos, modifiers: ModifierFlags) -> Statement<'a> {
        self.expect_token(SyntaxKind::EnumKeyword);
        let name = self.parse_identifier();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let mut members = Vec::new();
        while !is_block_terminator(self.current_token()) {
            let member_pos = self.token_pos();
            let member_name = self.parse_property_name();
            let initializer = if self.optional_token(SyntaxKind::EqualsToken).is_some() {
                Some(self.parse_assignment_expression_and_alloc())
            } else {
                None
            };
            members.push(EnumMember {
                data: NodeData::new(SyntaxKind::EnumMember, member_pos, self.node_end()),
                name: member_name,
                initializer,
            });
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseBraceToken);
        Statement::EnumDeclaration(self.arena.alloc(EnumDeclaration {
            data: NodeData::new(SyntaxKind::EnumDeclaration, pos, self.node_end()).with_modifiers(modifiers),
            name,
            members: alloc_vec_in(self.arena, members),
        }))
    }

    // ========================================================================
    // Imports and exports
    // ========================================================================

    fn parse_import_declaration(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::ImportKeyword);

        let import_clause = if self.current_token() == SyntaxKind::StringLiteral {
            None
        } else {
            let clause: &'a ImportClause<'a> = self.arena.alloc(self.parse_import_clause());
            self.expect_token(SyntaxKind::FromKeyword);
            Some(clause)
        };
        let module_specifier = self.parse_module_specifier();
        self.skip_import_attributes();
        self.parse_expected_semicolon();

        Statement::ImportDeclaration(self.arena.alloc(ImportDeclaration {
            data: NodeData::new(SyntaxKind::ImportDeclaration, pos, self.node_end()),
            import_clause,
            module_specifier,
        }))
    }

    fn parse_import_clause(&mut self) -> ImportClause<'a> {
        let pos = self.token_pos();
        let is_type_only = self.current_token() == SyntaxKind::TypeKeyword
            && self.look_ahead(|p| {
                p.next_token();
                match p.current_token() {
                    SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken => true,
                    // `import type from "m"` imports a default named `type`.
                    SyntaxKind::FromKeyword => p.next_token_is(SyntaxKind::FromKeyword),
                    kind => kind.is_identifier_or_contextual_keyword(),
                }
            });
        if is_type_only {
            self.next_token();
        }

        let name = if self.current_token().is_identifier_or_contextual_keyword() {
            Some(self.parse_identifier())
        } else {
            None
        };

        let named_bindings = if name.is_none() || self.optional_token(SyntaxKind::CommaToken).is_some() {
            match self.current_token() {
                SyntaxKind::AsteriskToken => {
                    let namespace_pos = self.token_pos();
                    self.next_token();
                    self.expect_token(SyntaxKind::AsKeyword);
                    let namespace_name = self.parse_identifier();
                    Some(NamedImportBindings::NamespaceImport(self.arena.alloc(NamespaceImport {
                        data: NodeData::new(SyntaxKind::NamespaceImport, namespace_pos, self.node_end()),
                        name: namespace_name,
                    })))
                }
                SyntaxKind::OpenBraceToken => Some(NamedImportBindings::NamedImports(self.parse_named_imports())),
                _ => {
                    self.error(&messages::_0_EXPECTED, &["{"]);
                    None
                }
            }
        } else {
            None
        };

        ImportClause {
            data: NodeData::new(SyntaxKind::ImportClause, pos, self.node_end()),
            is_type_only,
            name,
            named_bindings,
        }
    }

    fn parse_named_imports(&mut self) -> &'a NamedImports<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let mut elements = Vec::new();
        while !is_block_terminator(self.current_token()) {
            let specifier_pos = self.token_pos();
            let is_type_only = self.parse_specifier_type_modifier();
            let first = self.parse_identifier_name();
            let (property_name, name) = if self.optional_token(SyntaxKind::AsKeyword).is_some() {
                (Some(first), self.parse_identifier())
            } else {
                (None, first)
            };
            elements.push(ImportSpecifier {
                data: NodeData::new(SyntaxKind::ImportSpecifier, specifier_pos, self.node_end()),
                is_type_only,
                property_name,
                name,
            });
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseBraceToken);
        self.arena.alloc(NamedImports {
            data: NodeData::new(SyntaxKind::NamedImports, pos, self.node_end()),
            elements: alloc_vec_in(self.arena, elements),
        })
    }

    /// The `type` in `{ type A }`, but not in `{ type }` or `{ type as A }`.
    fn parse_specifier_type_modifier(&mut self) -> bool {
        let is_modifier = self.current_token() == SyntaxKind::TypeKeyword
            && self.look_ahead(|p| {
                p.next_token();
                p.current_token().is_identifier_or_keyword() && p.current_token() != SyntaxKind::AsKeyword
            });
        if is_modifier {
            self.next_token();
        }
        is_modifier
    }

    /// `with { type: "json" }` and the older `assert { ... }`.
    fn skip_import_attributes(&mut self) {
        let is_attributes = (self.current_token() == SyntaxKind::WithKeyword || self.is_identifier_text("assert"))
            && !self.has_preceding_line_break();
        if !is_attributes {
            return;
        }
        self.next_token();
        if self.current_token() != SyntaxKind::OpenBraceToken {
            return;
        }
        let mut depth = 0u32;
        loop {
            match self.current_token() {
                SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseBraceToken => {
                    depth -= 1;
                    if depth == 0 {
                        self.next_token();
                        return;
                    }
                }
                SyntaxKind::EndOfFileToken => return,
                _ => {}
            }
            self.next_token();
        }
    }

    fn parse_export(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        let next = self.look_ahead(|p| {
            p.next_token();
            p.current_token()
        });
        match next {
            SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken => self.parse_export_declaration(pos),
            SyntaxKind::TypeKeyword
                if self.look_ahead(|p| {
                    p.next_token();
                    p.next_token();
                    matches!(p.current_token(), SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken)
                }) =>
            {
                self.parse_export_declaration(pos)
            }
            SyntaxKind::EqualsToken => self.parse_export_assignment(pos),
            SyntaxKind::DefaultKeyword if !self.is_export_default_declaration() => self.parse_export_assignment(pos),
            // `export as namespace X;` and `export import A = B;`
            SyntaxKind::AsKeyword | SyntaxKind::ImportKeyword => self.parse_unsupported_statement(pos, ModifierFlags::NONE),
            _ => self.parse_declaration(),
        }
    }

    fn is_export_default_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.next_token();
            match p.current_token() {
                SyntaxKind::FunctionKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::AbstractKeyword => true,
                SyntaxKind::AsyncKeyword => p.next_token_is_on_same_line(|k| k == SyntaxKind::FunctionKeyword),
                _ => false,
            }
        })
    }

    fn parse_export_declaration(&mut self, pos: TextPos) -> Statement<'a> {
        self.expect_token(SyntaxKind::ExportKeyword);
        let is_type_only = self.optional_token(SyntaxKind::TypeKeyword).is_some();

        let (export_clause, module_specifier) = if self.optional_token(SyntaxKind::AsteriskToken).is_some() {
            let clause = if self.optional_token(SyntaxKind::AsKeyword).is_some() {
                Some(NamedExportBindings::NamespaceExport(self.parse_identifier_name()))
            } else {
                None
            };
            self.expect_token(SyntaxKind::FromKeyword);
            (clause, Some(self.parse_module_specifier()))
        } else {
            let clause = NamedExportBindings::NamedExports(self.parse_named_exports());
            let specifier = if self.optional_token(SyntaxKind::FromKeyword).is_some() {
                Some(self.parse_module_specifier())
            } else {
                None
            };
            (Some(clause), specifier)
        };
        self.skip_import_attributes();
        self.parse_expected_semicolon();

        Statement::ExportDeclaration(self.arena.alloc(ExportDeclaration {
            data: NodeData::new(SyntaxKind::ExportDeclaration, pos, self.node_end()),
            is_type_only,
            export_clause,
            module_specifier,
        }))
    }

    fn parse_named_exports(&mut self) -> &'a NamedExports<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let mut elements = Vec::new();
        while !is_block_terminator(self.current_token()) {
            let specifier_pos = self.token_pos();
            let is_type_only = self.parse_specifier_type_modifier();
            let first = self.parse_identifier_name();
            let (property_name, name) = if self.optional_token(SyntaxKind::AsKeyword).is_some() {
                (Some(first), self.parse_identifier_name())
            } else {
                (None, first)
            };
            elements.push(ExportSpecifier {
                data: NodeData::new(SyntaxKind::ExportSpecifier, specifier_pos, self.node_end()),
                is_type_only,
                property_name,
                name,
            });
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseBraceToken);
        self.arena.alloc(NamedExports {
            data: NodeData::new(SyntaxKind::NamedExports, pos, self.node_end()),
            elements: alloc_vec_in(self.arena, elements),
        })
    }

    fn parse_export_assignment(&mut self, pos: TextPos) -> Statement<'a> {
        self.expect_token(SyntaxKind::ExportKeyword);
        let is_export_equals = if self.optional_token(SyntaxKind::EqualsToken).is_some() {
            true
        } else {
            self.expect_token(SyntaxKind::DefaultKeyword);
            false
        };
        let expression = self.parse_assignment_expression_and_alloc();
        self.parse_expected_semicolon();
        Statement::ExportAssignment(self.arena.alloc(ExportAssignment {
            data: NodeData::new(SyntaxKind::ExportAssignment, pos, self.node_end()),
            is_export_equals,
            expression,
        }))
    }

    // ========================================================================
    // Signatures and bindings
    // ========================================================================

    fn try_parse_type_parameters(&mut self) -> Option<NodeList<'a, TypeParameterDeclaration<'a>>> {
        if self.current_token() != SyntaxKind::LessThanToken {
            return None;
        }
        self.next_token();
        let mut parameters = Vec::new();
        while !matches!(self.current_token(), SyntaxKind::GreaterThanToken | SyntaxKind::EndOfFileToken) {
            let pos = self.token_pos();
            // `const T`, `in T`, `out T`
            while (matches!(self.current_token(), SyntaxKind::ConstKeyword | SyntaxKind::InKeyword)
                || self.is_identifier_text("out"))
                && self.look_ahead(|p| {
                    p.next_token();
                    p.current_token().is_identifier_or_contextual_keyword()
                })
            {
                self.next_token();
            }
            let name = self.parse_identifier();
            let constraint = if self.optional_token(SyntaxKind::ExtendsKeyword).is_some() {
                Some(self.parse_type_and_alloc())
            } else {
                None
            };
            let default = if self.optional_token(SyntaxKind::EqualsToken).is_some() {
                Some(self.parse_type_and_alloc())
            } else {
                None
            };
            parameters.push(TypeParameterDeclaration {
                data: NodeData::new(SyntaxKind::TypeParameter, pos, self.node_end()),
                name,
                constraint,
                default,
            });
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::GreaterThanToken);
        Some(alloc_vec_in(self.arena, parameters))
    }

    fn parse_parameter_list(&mut self) -> NodeList<'a, ParameterDeclaration<'a>> {
        if !self.expect_token(SyntaxKind::OpenParenToken) {
            return &[];
        }
        let mut parameters = Vec::new();
        while !matches!(self.current_token(), SyntaxKind::CloseParenToken | SyntaxKind::EndOfFileToken) {
            parameters.push(self.parse_parameter());
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseParenToken);
        alloc_vec_in(self.arena, parameters)
    }

    fn parse_parameter(&mut self) -> ParameterDeclaration<'a> {
        let pos = self.token_pos();
        // Constructor parameter properties: `private readonly x`.
        let modifiers = self.parse_modifiers();
        let dot_dot_dot_token = self.optional_token(SyntaxKind::DotDotDotToken);
        let name = if self.current_token() == SyntaxKind::ThisKeyword {
            BindingName::Identifier(self.create_identifier())
        } else {
            self.parse_binding_name()
        };
        let question_token = self.optional_token(SyntaxKind::QuestionToken);
        let type_annotation = self.parse_type_annotation();
        let initializer = if self.optional_token(SyntaxKind::EqualsToken).is_some() {
            Some(self.parse_assignment_expression_and_alloc())
        } else {
            None
        };
        ParameterDeclaration {
            data: NodeData::new(SyntaxKind::Parameter, pos, self.node_end()).with_modifiers(modifiers),
            dot_dot_dot_token,
            name,
            question_token,
            type_annotation,
            initializer,
        }
    }

    fn parse_binding_name(&mut self) -> BindingName<'a> {
        match self.current_token() {
            SyntaxKind::OpenBraceToken => BindingName::ObjectBindingPattern(self.parse_object_binding_pattern()),
            SyntaxKind::OpenBracketToken => BindingName::ArrayBindingPattern(self.parse_array_binding_pattern()),
            _ => BindingName::Identifier(self.parse_identifier()),
        }
    }

    fn parse_object_binding_pattern(&mut self) -> &'a ObjectBindingPattern<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let mut elements = Vec::new();
        while !is_block_terminator(self.current_token()) {
            let element_pos = self.token_pos();
            let dot_dot_dot_token = self.optional_token(SyntaxKind::DotDotDotToken);
            let (property_name, name) = if dot_dot_dot_token.is_some() {
                (None, self.parse_binding_name())
            } else {
                let property_name = self.parse_property_name();
                if self.optional_token(SyntaxKind::ColonToken).is_some() {
                    (Some(property_name), self.parse_binding_name())
                } else if let PropertyName::Identifier(id) = property_name {
                    (None, BindingName::Identifier(id))
                } else {
                    self.error(&messages::_0_EXPECTED, &[":"]);
                    (Some(property_name), BindingName::Identifier(self.create_missing_identifier()))
                }
            };
            let initializer = if self.optional_token(SyntaxKind::EqualsToken).is_some() {
                Some(self.parse_assignment_expression_and_alloc())
            } else {
                None
            };
            elements.push(BindingElement {
                data: NodeData::new(SyntaxKind::BindingElement, element_pos, self.node_end()),
                dot_dot_dot_token,
                property_name,
                name,
                initializer,
            });
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseBraceToken);
        self.arena.alloc(ObjectBindingPattern {
            data: NodeData::new(SyntaxKind::ObjectBindingPattern, pos, self.node_end()),
            elements: alloc_vec_in(self.arena, elements),
        })
    }

    fn parse_array_binding_pattern(&mut self) -> &'a ArrayBindingPattern<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBracketToken);
        let mut elements = Vec::new();
        loop {
            match self.current_token() {
                SyntaxKind::CloseBracketToken | SyntaxKind::EndOfFileToken => break,
                SyntaxKind::CommaToken => {
                    elements.push(None);
                    self.next_token();
                    continue;
                }
                _ => {}
            }
            let element_pos = self.token_pos();
            let dot_dot_dot_token = self.optional_token(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_name();
            let initializer = if self.optional_token(SyntaxKind::EqualsToken).is_some() {
                Some(self.parse_assignment_expression_and_alloc())
            } else {
                None
            };
            elements.push(Some(BindingElement {
                data: NodeData::new(SyntaxKind::BindingElement, element_pos, self.node_end()),
                dot_dot_dot_token,
                property_name: None,
                name,
                initializer,
            }));
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseBracketToken);
        self.arena.alloc(ArrayBindingPattern {
            data: NodeData::new(SyntaxKind::ArrayBindingPattern, pos, self.node_end()),
            elements: alloc_vec_in(self.arena, elements),
        })
    }

    fn parse_type_annotation(&mut self) -> OptionalNode<'a, TypeNode<'a>> {
        if self.optional_token(SyntaxKind::ColonToken).is_some() {
            Some(self.parse_type_and_alloc())
        } else {
            None
        }
    }

    fn parse_return_type_annotation(&mut self) -> OptionalNode<'a, TypeNode<'a>> {
        if self.optional_token(SyntaxKind::ColonToken).is_some() {
            let type_node: &'a TypeNode<'a> = self.arena.alloc(self.parse_type_or_type_predicate());
            Some(type_node)
        } else {
            None
        }
    }

    // ========================================================================
    // Types
    // ========================================================================

    fn parse_type_and_alloc(&mut self) -> &'a TypeNode<'a> {
        let type_node = self.parse_type();
        self.arena.alloc(type_node)
    }

    fn parse_type(&mut self) -> TypeNode<'a> {
        let saved = std::mem::replace(&mut self.in_conditional_extends, false);
        let type_node = self.parse_type_worker();
        self.in_conditional_extends = saved;
        type_node
    }

    /// The operand of `extends` in a conditional type.
    fn parse_type_in_extends_position(&mut self) -> TypeNode<'a> {
        let saved = std::mem::replace(&mut self.in_conditional_extends, true);
        let type_node = self.parse_type_worker();
        self.in_conditional_extends = saved;
        type_node
    }

    fn parse_type_worker(&mut self) -> TypeNode<'a> {
        if !self.enter_recursion() {
            return self.missing_type();
        }
        let type_node = if self.is_start_of_function_type() {
            self.parse_function_or_constructor_type()
        } else {
            let pos = self.token_pos();
            let check_type = self.parse_union_type_or_higher();
            if !self.in_conditional_extends
                && !self.has_preceding_line_break()
                && self.optional_token(SyntaxKind::ExtendsKeyword).is_some()
            {
                let extends_type = self.parse_type_in_extends_position();
                self.expect_token(SyntaxKind::QuestionToken);
                let true_type = self.parse_type_and_alloc();
                self.expect_token(SyntaxKind::ColonToken);
                let false_type = self.parse_type_and_alloc();
                TypeNode::ConditionalType(self.arena.alloc(ConditionalTypeNode {
                    data: NodeData::new(SyntaxKind::ConditionalType, pos, self.node_end()),
                    check_type: self.arena.alloc(check_type),
                    extends_type: self.arena.alloc(extends_type),
                    true_type,
                    false_type,
                }))
            } else {
                check_type
            }
        };
        self.exit_recursion();
        type_node
    }

    fn missing_type(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        TypeNode::KeywordType(Token {
            data: NodeData::new(SyntaxKind::Unknown, pos, pos).with_flags(NodeFlags::MISSING),
        })
    }

    fn parse_type_or_type_predicate(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        let is_asserts = self.current_token() == SyntaxKind::AssertsKeyword
            && self.next_token_is_on_same_line(|k| k.is_identifier_or_contextual_keyword() || k == SyntaxKind::ThisKeyword);
        if is_asserts {
            let asserts_modifier = Some(self.parse_token());
            let parameter_name = self.parse_type_predicate_parameter_name();
            let type_node = if self.optional_token(SyntaxKind::IsKeyword).is_some() {
                Some(self.parse_type_and_alloc())
            } else {
                None
            };
            return TypeNode::TypePredicate(self.arena.alloc(TypePredicateNode {
                data: NodeData::new(SyntaxKind::TypePredicate, pos, self.node_end()),
                asserts_modifier,
                parameter_name,
                type_node,
            }));
        }

        let is_predicate = (self.current_token().is_identifier_or_contextual_keyword()
            || self.current_token() == SyntaxKind::ThisKeyword)
            && self.next_token_is_on_same_line(|k| k == SyntaxKind::IsKeyword);
        if is_predicate {
            let parameter_name = self.parse_type_predicate_parameter_name();
            self.next_token();
            let type_node = Some(self.parse_type_and_alloc());
            return TypeNode::TypePredicate(self.arena.alloc(TypePredicateNode {
                data: NodeData::new(SyntaxKind::TypePredicate, pos, self.node_end()),
                asserts_modifier: None,
                parameter_name,
                type_node,
            }));
        }

        self.parse_type()
    }

    fn parse_type_predicate_parameter_name(&mut self) -> TypePredicateParameterName<'a> {
        if self.current_token() == SyntaxKind::ThisKeyword {
            TypePredicateParameterName::ThisType(self.parse_token())
        } else {
            TypePredicateParameterName::Identifier(self.parse_identifier())
        }
    }

    fn is_start_of_function_type(&mut self) -> bool {
        match self.current_token() {
            SyntaxKind::LessThanToken | SyntaxKind::NewKeyword => true,
            SyntaxKind::AbstractKeyword => self.next_token_is(SyntaxKind::NewKeyword),
            SyntaxKind::OpenParenToken => self.look_ahead(|p| p.is_unambiguously_start_of_function_type()),
            _ => false,
        }
    }

    fn is_unambiguously_start_of_function_type(&mut self) -> bool {
        self.next_token();
        if matches!(self.current_token(), SyntaxKind::CloseParenToken | SyntaxKind::DotDotDotToken) {
            return true;
        }
        if self.skip_parameter_start() {
            if matches!(
                self.current_token(),
                SyntaxKind::ColonToken | SyntaxKind::CommaToken | SyntaxKind::QuestionToken | SyntaxKind::EqualsToken
            ) {
                return true;
            }
            if self.current_token() == SyntaxKind::CloseParenToken {
                self.next_token();
                return self.current_token() == SyntaxKind::EqualsGreaterThanToken;
            }
        }
        false
    }

    fn skip_parameter_start(&mut self) -> bool {
        self.parse_modifiers();
        if self.current_token().is_identifier_or_contextual_keyword() || self.current_token() == SyntaxKind::ThisKeyword {
            self.next_token();
            return true;
        }
        if matches!(self.current_token(), SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken) {
            let errors = self.error_count();
            self.parse_binding_name();
            return errors == self.error_count();
        }
        false
    }

    fn parse_function_or_constructor_type(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        let modifiers = if self.optional_token(SyntaxKind::AbstractKeyword).is_some() {
            ModifierFlags::ABSTRACT
        } else {
            ModifierFlags::NONE
        };
        let is_constructor = self.optional_token(SyntaxKind::NewKeyword).is_some();
        let type_parameters = self.try_parse_type_parameters();
        let parameters = self.parse_parameter_list();
        self.expect_token(SyntaxKind::EqualsGreaterThanToken);
        let return_type: &'a TypeNode<'a> = self.arena.alloc(self.parse_type_or_type_predicate());
        let kind = if is_constructor { SyntaxKind::ConstructorType } else { SyntaxKind::FunctionType };
        let node = self.arena.alloc(FunctionTypeNode {
            data: NodeData::new(kind, pos, self.node_end()).with_modifiers(modifiers),
            type_parameters,
            parameters,
            return_type,
        });
        if is_constructor {
            TypeNode::ConstructorType(node)
        } else {
            TypeNode::FunctionType(node)
        }
    }

    fn parse_union_type_or_higher(&mut self) -> TypeNode<'a> {
        self.parse_union_or_intersection_type(SyntaxKind::BarToken, Self::parse_intersection_type_or_higher)
    }

    fn parse_intersection_type_or_higher(&mut self) -> TypeNode<'a> {
        self.parse_union_or_intersection_type(SyntaxKind::AmpersandToken, Self::parse_type_operator_or_higher)
    }

    fn parse_union_or_intersection_type(
        &mut self,
        operator: SyntaxKind,
        parse_constituent: fn(&mut Self) -> TypeNode<'a>,
    ) -> TypeNode<'a> {
        let pos = self.token_pos();
        // `type T = | A | B`
        self.optional_token(operator);
        let first = self.parse_union_or_intersection_constituent(parse_constituent);
        if self.current_token() != operator {
            return first;
        }
        let mut types = vec![first];
        while self.optional_token(operator).is_some() {
            types.push(self.parse_union_or_intersection_constituent(parse_constituent));
        }
        let kind = if operator == SyntaxKind::BarToken { SyntaxKind::UnionType } else { SyntaxKind::IntersectionType };
        let node = self.arena.alloc(UnionOrIntersectionTypeNode {
            data: NodeData::new(kind, pos, self.node_end()),
            types: alloc_vec_in(self.arena, types),
        });
        if operator == SyntaxKind::BarToken {
            TypeNode::UnionType(node)
        } else {
            TypeNode::IntersectionType(node)
        }
    }

    fn parse_union_or_intersection_constituent(&mut self, parse_constituent: fn(&mut Self) -> TypeNode<'a>) -> TypeNode<'a> {
        if self.is_start_of_function_type() {
            self.parse_function_or_constructor_type()
        } else {
            parse_constituent(self)
        }
    }

    fn parse_type_operator_or_higher(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        match self.current_token() {
            SyntaxKind::KeyOfKeyword | SyntaxKind::UniqueKeyword | SyntaxKind::ReadonlyKeyword => {
                let operator = self.current_token();
                self.next_token();
                let type_node: &'a TypeNode<'a> = self.arena.alloc(self.parse_type_operator_or_higher());
                TypeNode::TypeOperator(self.arena.alloc(TypeOperatorNode {
                    data: NodeData::new(SyntaxKind::TypeOperator, pos, self.node_end()),
                    operator,
                    type_node,
                }))
            }
            SyntaxKind::InferKeyword => {
                self.next_token();
                let parameter_pos = self.token_pos();
                let name = self.parse_identifier();
                let constraint = self.try_parse_infer_constraint();
                let type_parameter = self.arena.alloc(TypeParameterDeclaration {
                    data: NodeData::new(SyntaxKind::TypeParameter, parameter_pos, self.node_end()),
                    name,
                    constraint,
                    default: None,
                });
                TypeNode::InferType(self.arena.alloc(InferTypeNode {
                    data: NodeData::new(SyntaxKind::InferType, pos, self.node_end()),
                    type_parameter,
                }))
            }
            _ => self.parse_postfix_type(),
        }
    }

    /// `infer U extends string`. Outside an `extends` operand a following
    /// `?` means the `extends` starts a conditional type instead.
    fn try_parse_infer_constraint(&mut self) -> OptionalNode<'a, TypeNode<'a>> {
        if self.current_token() != SyntaxKind::ExtendsKeyword {
            return None;
        }
        let in_extends = self.in_conditional_extends;
        self.try_parse(|p| {
            p.next_token();
            let constraint = p.parse_type_in_extends_position();
            if in_extends || p.current_token() != SyntaxKind::QuestionToken {
                let constraint: &'a TypeNode<'a> = p.arena.alloc(constraint);
                Some(constraint)
            } else {
                None
            }
        })
    }

    fn parse_postfix_type(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        let mut type_node = self.parse_non_array_type();
        while !self.has_preceding_line_break() && self.current_token() == SyntaxKind::OpenBracketToken {
            self.next_token();
            if self.optional_token(SyntaxKind::CloseBracketToken).is_some() {
                type_node = TypeNode::ArrayType(self.arena.alloc(ArrayTypeNode {
                    data: NodeData::new(SyntaxKind::ArrayType, pos, self.node_end()),
                    element_type: self.arena.alloc(type_node),
                }));
            } else {
                let index_type = self.parse_type_and_alloc();
                self.expect_token(SyntaxKind::CloseBracketToken);
                type_node = TypeNode::IndexedAccessType(self.arena.alloc(IndexedAccessTypeNode {
                    data: NodeData::new(SyntaxKind::IndexedAccessType, pos, self.node_end()),
                    object_type: self.arena.alloc(type_node),
                    index_type,
                }));
            }
        }
        type_node
    }

    fn parse_non_array_type(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        match self.current_token() {
            kind if kind.is_keyword_type() => TypeNode::KeywordType(self.parse_token()),
            SyntaxKind::TypeOfKeyword => {
                self.next_token();
                let expr_name = self.parse_entity_name();
                let type_arguments = if !self.has_preceding_line_break() && self.current_token() == SyntaxKind::LessThanToken {
                    Some(self.parse_type_arguments())
                } else {
                    None
                };
                TypeNode::TypeQuery(self.arena.alloc(TypeQueryNode {
                    data: NodeData::new(SyntaxKind::TypeQuery, pos, self.node_end()),
                    expr_name,
                    type_arguments,
                }))
            }
            SyntaxKind::OpenBraceToken => {
                if self.look_ahead(|p| p.is_start_of_mapped_type()) {
                    self.parse_mapped_type()
                } else {
                    let members = self.parse_object_type_members();
                    TypeNode::TypeLiteral(self.arena.alloc(TypeLiteralNode {
                        data: NodeData::new(SyntaxKind::TypeLiteral, pos, self.node_end()),
                        members,
                    }))
                }
            }
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let type_node = self.parse_type_and_alloc();
                self.expect_token(SyntaxKind::CloseParenToken);
                TypeNode::ParenthesizedType(self.arena.alloc(WrappedTypeNode {
                    data: NodeData::new(SyntaxKind::ParenthesizedType, pos, self.node_end()),
                    type_node,
                }))
            }
            SyntaxKind::StringLiteral => {
                let literal = Expression::StringLiteral(self.parse_string_literal());
                self.literal_type(pos, literal)
            }
            SyntaxKind::NumericLiteral => {
                let literal = Expression::NumericLiteral(self.parse_literal_expression());
                self.literal_type(pos, literal)
            }
            SyntaxKind::BigIntLiteral => {
                let literal = Expression::BigIntLiteral(self.parse_literal_expression());
                self.literal_type(pos, literal)
            }
            SyntaxKind::NoSubstitutionTemplateLiteral => {
                let literal = Expression::NoSubstitutionTemplateLiteral(self.parse_template_literal());
                self.literal_type(pos, literal)
            }
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                let literal = Expression::Keyword(self.parse_token());
                self.literal_type(pos, literal)
            }
            SyntaxKind::MinusToken
                if self.look_ahead(|p| {
                    p.next_token();
                    matches!(p.current_token(), SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral)
                }) =>
            {
                self.next_token();
                let operand: &'a Expression<'a> = self.arena.alloc(Expression::NumericLiteral(self.parse_literal_expression()));
                let literal = Expression::PrefixUnary(self.arena.alloc(PrefixUnaryExpression {
                    data: NodeData::new(SyntaxKind::PrefixUnaryExpression, pos, self.node_end()),
                    operator: SyntaxKind::MinusToken,
                    operand,
                }));
                self.literal_type(pos, literal)
            }
            kind if kind.is_identifier_or_contextual_keyword() => self.parse_type_reference(),
            _ => {
                self.error(&messages::TYPE_EXPECTED, &[]);
                self.missing_type()
            }
        }
    }

    fn literal_type(&mut self, pos: TextPos, literal: Expression<'a>) -> TypeNode<'a> {
        TypeNode::LiteralType(self.arena.alloc(LiteralTypeNode {
            data: NodeData::new(SyntaxKind::LiteralType, pos, self.node_end()),
            literal: self.arena.alloc(literal),
        }))
    }

    fn parse_type_reference(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        let type_name = self.parse_entity_name();
        let type_arguments = if !self.has_preceding_line_break() && self.current_token() == SyntaxKind::LessThanToken {
            Some(self.parse_type_arguments())
        } else {
            None
        };
        TypeNode::TypeReference(self.arena.alloc(TypeReferenceNode {
            data: NodeData::new(SyntaxKind::TypeReference, pos, self.node_end()),
            type_name,
            type_arguments,
        }))
    }

    fn parse_type_arguments(&mut self) -> NodeList<'a, TypeNode<'a>> {
        self.expect_token(SyntaxKind::LessThanToken);
        let mut arguments = Vec::new();
        while !matches!(self.current_token(), SyntaxKind::GreaterThanToken | SyntaxKind::EndOfFileToken) {
            arguments.push(self.parse_type());
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::GreaterThanToken);
        alloc_vec_in(self.arena, arguments)
    }

    fn is_start_of_mapped_type(&mut self) -> bool {
        self.next_token();
        if matches!(self.current_token(), SyntaxKind::PlusToken | SyntaxKind::MinusToken) {
            self.next_token();
            return self.current_token() == SyntaxKind::ReadonlyKeyword;
        }
        if self.current_token() == SyntaxKind::ReadonlyKeyword {
            self.next_token();
        }
        if self.current_token() != SyntaxKind::OpenBracketToken {
            return false;
        }
        self.next_token();
        if !self.current_token().is_identifier_or_keyword() {
            return false;
        }
        self.next_token();
        self.current_token() == SyntaxKind::InKeyword
    }

    fn parse_mapped_type(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let readonly_token = match self.current_token() {
            SyntaxKind::ReadonlyKeyword => Some(self.parse_token()),
            SyntaxKind::PlusToken | SyntaxKind::MinusToken => {
                let token = self.parse_token();
                self.expect_token(SyntaxKind::ReadonlyKeyword);
                Some(token)
            }
            _ => None,
        };
        self.expect_token(SyntaxKind::OpenBracketToken);
        let parameter_pos = self.token_pos();
        let name = self.parse_identifier();
        self.expect_token(SyntaxKind::InKeyword);
        let constraint = self.parse_type_and_alloc();
        let type_parameter = self.arena.alloc(TypeParameterDeclaration {
            data: NodeData::new(SyntaxKind::TypeParameter, parameter_pos, self.node_end()),
            name,
            constraint: Some(constraint),
            default: None,
        });
        let name_type = if self.optional_token(SyntaxKind::AsKeyword).is_some() {
            Some(self.parse_type_and_alloc())
        } else {
            None
        };
        self.expect_token(SyntaxKind::CloseBracketToken);
        let question_token = match self.current_token() {
            SyntaxKind::QuestionToken => Some(self.parse_token()),
            SyntaxKind::PlusToken | SyntaxKind::MinusToken => {
                let token = self.parse_token();
                self.expect_token(SyntaxKind::QuestionToken);
                Some(token)
            }
            _ => None,
        };
        let type_node = self.parse_type_annotation();
        if matches!(self.current_token(), SyntaxKind::SemicolonToken | SyntaxKind::CommaToken) {
            self.next_token();
        }
        self.expect_token(SyntaxKind::CloseBraceToken);
        TypeNode::MappedType(self.arena.alloc(MappedTypeNode {
            data: NodeData::new(SyntaxKind::MappedType, pos, self.node_end()),
            readonly_token,
            type_parameter,
            name_type,
            question_token,
            type_node,
        }))
    }

    fn parse_tuple_type(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBracketToken);
        let mut elements = Vec::new();
        while !matches!(self.current_token(), SyntaxKind::CloseBracketToken | SyntaxKind::EndOfFileToken) {
            elements.push(self.parse_tuple_element());
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseBracketToken);
        TypeNode::TupleType(self.arena.alloc(TupleTypeNode {
            data: NodeData::new(SyntaxKind::TupleType, pos, self.node_end()),
            elements: alloc_vec_in(self.arena, elements),
        }))
    }

    fn parse_tuple_element(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        let is_named = self.look_ahead(|p| {
            if p.current_token() == SyntaxKind::DotDotDotToken {
                p.next_token();
            }
            if !p.current_token().is_identifier_or_keyword() {
                return false;
            }
            p.next_token();
            if p.current_token() == SyntaxKind::QuestionToken {
                p.next_token();
            }
            p.current_token() == SyntaxKind::ColonToken
        });
        if !is_named {
            return self.parse_tuple_element_type();
        }

        let dot_dot_dot_token = self.optional_token(SyntaxKind::DotDotDotToken);
        let name = self.parse_identifier_name();
        let question_token = self.optional_token(SyntaxKind::QuestionToken);
        self.expect_token(SyntaxKind::ColonToken);
        let type_node = self.parse_type_and_alloc();
        TypeNode::NamedTupleMember(self.arena.alloc(NamedTupleMemberNode {
            data: NodeData::new(SyntaxKind::NamedTupleMember, pos, self.node_end()),
            dot_dot_dot_token,
            name,
            question_token,
            type_node,
        }))
    }

    fn parse_tuple_element_type(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        if self.optional_token(SyntaxKind::DotDotDotToken).is_some() {
            let type_node = self.parse_type_and_alloc();
            return TypeNode::RestType(self.arena.alloc(WrappedTypeNode {
                data: NodeData::new(SyntaxKind::RestType, pos, self.node_end()),
                type_node,
            }));
        }
        let type_node = self.parse_type();
        if self.optional_token(SyntaxKind::QuestionToken).is_some() {
            return TypeNode::OptionalType(self.arena.alloc(WrappedTypeNode {
                data: NodeData::new(SyntaxKind::OptionalType, pos, self.node_end()),
                type_node: self.arena.alloc(type_node),
            }));
        }
        type_node
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn parse_expression_and_alloc(&mut self) -> &'a Expression<'a> {
        let expression = self.parse_expression();
        self.arena.alloc(expression)
    }

    fn parse_assignment_expression_and_alloc(&mut self) -> &'a Expression<'a> {
        let expression = self.parse_assignment_expression();
        self.arena.alloc(expression)
    }

    fn parse_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        let mut expression = self.parse_assignment_expression();
        while self.current_token() == SyntaxKind::CommaToken {
            let operator_token = self.parse_token();
            let right = self.parse_assignment_expression_and_alloc();
            expression = Expression::Binary(self.arena.alloc(BinaryExpression {
                data: NodeData::new(SyntaxKind::BinaryExpression, pos, self.node_end()),
                left: self.arena.alloc(expression),
                operator_token,
                right,
            }));
        }
        expression
    }

    fn parse_missing_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        Expression::Missing(Token {
            data: NodeData::new(SyntaxKind::Unknown, pos, pos).with_flags(NodeFlags::MISSING),
        })
    }

    fn parse_assignment_expression(&mut self) -> Expression<'a> {
        if !self.enter_recursion() {
            return self.parse_missing_expression();
        }
        let expression = self.parse_assignment_expression_worker();
        self.exit_recursion();
        expression
    }

    fn parse_assignment_expression_worker(&mut self) -> Expression<'a> {
        if let Some(arrow_function) = self.try_parse_arrow_function() {
            return arrow_function;
        }

        let pos = self.token_pos();
        let expression = self.parse_conditional_expression();
        if self.current_token().is_assignment_operator() {
            let operator_token = self.parse_token();
            let right = self.parse_assignment_expression_and_alloc();
            return Expression::Binary(self.arena.alloc(BinaryExpression {
                data: NodeData::new(SyntaxKind::BinaryExpression, pos, self.node_end()),
                left: self.arena.alloc(expression),
                operator_token,
                right,
            }));
        }
        expression
    }

    fn try_parse_arrow_function(&mut self) -> Option<Expression<'a>> {
        let pos = self.token_pos();
        let is_async = self.current_token() == SyntaxKind::AsyncKeyword
            && self.next_token_is_on_same_line(|k| {
                k.is_identifier_or_contextual_keyword()
                    || matches!(k, SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken)
            });

        let simple = self.look_ahead(|p| {
            if is_async {
                p.next_token();
            }
            if !p.current_token().is_identifier_or_contextual_keyword() {
                return false;
            }
            p.next_token();
            p.current_token() == SyntaxKind::EqualsGreaterThanToken && !p.has_preceding_line_break()
        });
        if simple {
            let modifiers = if is_async {
                self.next_token();
                ModifierFlags::ASYNC
            } else {
                ModifierFlags::NONE
            };
            return Some(self.parse_simple_arrow_function(pos, modifiers));
        }

        let starts_parenthesized = if is_async {
            self.next_token_is_on_same_line(|k| matches!(k, SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken))
        } else {
            matches!(self.current_token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken)
        };
        if !starts_parenthesized {
            return None;
        }
        self.try_parse(|p| p.parse_parenthesized_arrow_function(pos, is_async))
    }

    fn parse_simple_arrow_function(&mut self, pos: TextPos, modifiers: ModifierFlags) -> Expression<'a> {
        let name = self.parse_identifier();
        let parameter = ParameterDeclaration {
            data: NodeData::new(SyntaxKind::Parameter, name.data.range.pos, name.data.range.end),
            dot_dot_dot_token: None,
            name: BindingName::Identifier(name),
            question_token: None,
            type_annotation: None,
            initializer: None,
        };
        self.expect_token(SyntaxKind::EqualsGreaterThanToken);
        let body = self.parse_arrow_function_body();
        Expression::ArrowFunction(self.arena.alloc(ArrowFunction {
            data: NodeData::new(SyntaxKind::ArrowFunction, pos, self.node_end()).with_modifiers(modifiers),
            type_parameters: None,
            parameters: alloc_vec_in(self.arena, vec![parameter]),
            return_type: None,
            body,
        }))
    }

    /// Speculatively parse `(params): T => body`. Returns `None` when the
    /// head is not an arrow function head, in which case the caller rewinds.
    fn parse_parenthesized_arrow_function(&mut self, pos: TextPos, is_async: bool) -> Option<Expression<'a>> {
        let errors = self.error_count();
        let modifiers = if is_async {
            self.next_token();
            ModifierFlags::ASYNC
        } else {
            ModifierFlags::NONE
        };
        let type_parameters = self.try_parse_type_parameters();
        if self.current_token() != SyntaxKind::OpenParenToken {
            return None;
        }
        let parameters = self.parse_parameter_list();
        let return_type = self.parse_return_type_annotation();
        if self.current_token() != SyntaxKind::EqualsGreaterThanToken
            || self.has_preceding_line_break()
            || self.error_count() != errors
        {
            return None;
        }
        self.next_token();
        let body = self.parse_arrow_function_body();
        Some(Expression::ArrowFunction(self.arena.alloc(ArrowFunction {
            data: NodeData::new(SyntaxKind::ArrowFunction, pos, self.node_end()).with_modifiers(modifiers),
            type_parameters,
            parameters,
            return_type,
            body,
        })))
    }

    fn parse_arrow_function_body(&mut self) -> ConciseBody<'a> {
        if self.current_token() == SyntaxKind::OpenBraceToken {
            ConciseBody::Block(self.parse_block())
        } else {
            ConciseBody::Expression(self.parse_assignment_expression_and_alloc())
        }
    }

    fn parse_conditional_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        let condition = self.parse_binary_expression(OperatorPrecedence::Lowest);
        if self.optional_token(SyntaxKind::QuestionToken).is_none() {
            return condition;
        }
        let when_true = self.parse_assignment_expression_and_alloc();
        self.expect_token(SyntaxKind::ColonToken);
        let when_false = self.parse_assignment_expression_and_alloc();
        Expression::Conditional(self.arena.alloc(ConditionalExpression {
            data: NodeData::new(SyntaxKind::ConditionalExpression, pos, self.node_end()),
            condition: self.arena.alloc(condition),
            when_true,
            when_false,
        }))
    }

    fn parse_binary_expression(&mut self, min_precedence: OperatorPrecedence) -> Expression<'a> {
        let pos = self.token_pos();
        let mut left = self.parse_unary_expression();

        loop {
            if self.current_token() == SyntaxKind::GreaterThanToken {
                self.scanner.rescan_greater_than_token();
            }
            let operator = self.current_token();
            let precedence = get_binary_operator_precedence(operator);
            if precedence == OperatorPrecedence::Invalid {
                break;
            }
            // `**` is right-associative.
            let binds = if operator == SyntaxKind::AsteriskAsteriskToken {
                precedence >= min_precedence
            } else {
                precedence > min_precedence
            };
            if !binds {
                break;
            }

            if matches!(operator, SyntaxKind::AsKeyword | SyntaxKind::SatisfiesKeyword) {
                if self.has_preceding_line_break() {
                    break;
                }
                self.next_token();
                let type_node = self.parse_type_and_alloc();
                let kind = if operator == SyntaxKind::AsKeyword {
                    SyntaxKind::AsExpression
                } else {
                    SyntaxKind::SatisfiesExpression
                };
                let node = self.arena.alloc(AsExpression {
                    data: NodeData::new(kind, pos, self.node_end()),
                    expression: self.arena.alloc(left),
                    type_node,
                });
                left = if operator == SyntaxKind::AsKeyword {
                    Expression::As(node)
                } else {
                    Expression::Satisfies(node)
                };
                continue;
            }

            let operator_token = self.parse_token();
            let right: &'a Expression<'a> = self.arena.alloc(self.parse_binary_expression(precedence));
            left = Expression::Binary(self.arena.alloc(BinaryExpression {
                data: NodeData::new(SyntaxKind::BinaryExpression, pos, self.node_end()),
                left: self.arena.alloc(left),
                operator_token,
                right,
            }));
        }

        left
    }

    fn parse_unary_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        match self.current_token() {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword => self.parse_prefix_unary_expression(pos),
            SyntaxKind::AwaitKeyword if self.next_token_is_on_same_line(can_start_expression) => {
                self.parse_prefix_unary_expression(pos)
            }
            SyntaxKind::LessThanToken => {
                self.next_token();
                let type_node = self.parse_type_and_alloc();
                self.expect_token(SyntaxKind::GreaterThanToken);
                let expression: &'a Expression<'a> = self.arena.alloc(self.parse_unary_expression());
                Expression::TypeAssertion(self.arena.alloc(TypeAssertionExpression {
                    data: NodeData::new(SyntaxKind::TypeAssertionExpression, pos, self.node_end()),
                    type_node,
                    expression,
                }))
            }
            _ => {
                let expression = self.parse_left_hand_side_expression();
                if matches!(self.current_token(), SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken)
                    && !self.has_preceding_line_break()
                {
                    let operator = self.current_token();
                    self.next_token();
                    return Expression::PostfixUnary(self.arena.alloc(PostfixUnaryExpression {
                        data: NodeData::new(SyntaxKind::PostfixUnaryExpression, pos, self.node_end()),
                        operand: self.arena.alloc(expression),
                        operator,
                    }));
                }
                expression
            }
        }
    }

    fn parse_prefix_unary_expression(&mut self, pos: TextPos) -> Expression<'a> {
        let operator = self.current_token();
        self.next_token();
        let operand: &'a Expression<'a> = self.arena.alloc(self.parse_unary_expression());
        Expression::PrefixUnary(self.arena.alloc(PrefixUnaryExpression {
            data: NodeData::new(SyntaxKind::PrefixUnaryExpression, pos, self.node_end()),
            operator,
            operand,
        }))
    }

    fn parse_left_hand_side_expression(&mut self) -> Expression<'a> {
        let expression = if self.current_token() == SyntaxKind::NewKeyword {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        self.parse_member_and_call_chain(expression, true)
    }

    fn parse_member_and_call_chain(&mut self, mut expression: Expression<'a>, allow_calls: bool) -> Expression<'a> {
        let pos = expression.range().pos;
        loop {
            match self.current_token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    expression = self.finish_property_access(pos, expression, None);
                }
                SyntaxKind::QuestionDotToken => {
                    let question_dot_token = Some(self.parse_token());
                    expression = match self.current_token() {
                        SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken if allow_calls => {
                            let type_arguments = if self.current_token() == SyntaxKind::LessThanToken {
                                Some(self.parse_type_arguments())
                            } else {
                                None
                            };
                            self.finish_call(pos, expression, question_dot_token, type_arguments)
                        }
                        SyntaxKind::OpenBracketToken => self.finish_element_access(pos, expression, question_dot_token),
                        _ => self.finish_property_access(pos, expression, question_dot_token),
                    };
                }
                SyntaxKind::OpenBracketToken => {
                    expression = self.finish_element_access(pos, expression, None);
                }
                SyntaxKind::ExclamationToken if !self.has_preceding_line_break() => {
                    self.next_token();
                    expression = Expression::NonNull(self.arena.alloc(NonNullExpression {
                        data: NodeData::new(SyntaxKind::NonNullExpression, pos, self.node_end()),
                        expression: self.arena.alloc(expression),
                    }));
                }
                SyntaxKind::OpenParenToken if allow_calls => {
                    expression = self.finish_call(pos, expression, None, None);
                }
                SyntaxKind::LessThanToken if allow_calls => {
                    match self.try_parse_type_arguments_for_call() {
                        Some(type_arguments) => {
                            expression = self.finish_call(pos, expression, None, Some(type_arguments));
                        }
                        None => break,
                    }
                }
                _ => break,
            }
        }
        expression
    }

    fn finish_property_access(
        &mut self,
        pos: TextPos,
        expression: Expression<'a>,
        question_dot_token: Option<Token>,
    ) -> Expression<'a> {
        let name = self.parse_identifier_name();
        let flags = if question_dot_token.is_some() { NodeFlags::OPTIONAL_CHAIN } else { NodeFlags::NONE };
        Expression::PropertyAccess(self.arena.alloc(PropertyAccessExpression {
            data: NodeData::new(SyntaxKind::PropertyAccessExpression, pos, self.node_end()).with_flags(flags),
            expression: self.arena.alloc(expression),
            question_dot_token,
            name,
        }))
    }

    fn finish_element_access(
        &mut self,
        pos: TextPos,
        expression: Expression<'a>,
        question_dot_token: Option<Token>,
    ) -> Expression<'a> {
        self.expect_token(SyntaxKind::OpenBracketToken);
        let argument_expression = self.parse_expression_and_alloc();
        self.expect_token(SyntaxKind::CloseBracketToken);
        let flags = if question_dot_token.is_some() { NodeFlags::OPTIONAL_CHAIN } else { NodeFlags::NONE };
        Expression::ElementAccess(self.arena.alloc(ElementAccessExpression {
            data: NodeData::new(SyntaxKind::ElementAccessExpression, pos, self.node_end()).with_flags(flags),
            expression: self.arena.alloc(expression),
            question_dot_token,
            argument_expression,
        }))
    }

    fn finish_call(
        &mut self,
        pos: TextPos,
        expression: Expression<'a>,
        question_dot_token: Option<Token>,
        type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
    ) -> Expression<'a> {
        let arguments = self.parse_argument_list();
        let flags = if question_dot_token.is_some() { NodeFlags::OPTIONAL_CHAIN } else { NodeFlags::NONE };
        Expression::Call(self.arena.alloc(CallExpression {
            data: NodeData::new(SyntaxKind::CallExpression, pos, self.node_end()).with_flags(flags),
            expression: self.arena.alloc(expression),
            question_dot_token,
            type_arguments,
            arguments,
        }))
    }

    /// `f<T>(x)`: type arguments only count when a call follows.
    fn try_parse_type_arguments_for_call(&mut self) -> Option<NodeList<'a, TypeNode<'a>>> {
        self.try_parse(|p| {
            let errors = p.error_count();
            let type_arguments = p.parse_type_arguments();
            (p.error_count() == errors && p.current_token() == SyntaxKind::OpenParenToken).then_some(type_arguments)
        })
    }

    fn parse_argument_list(&mut self) -> NodeList<'a, Expression<'a>> {
        self.expect_token(SyntaxKind::OpenParenToken);
        let mut arguments = Vec::new();
        while !matches!(self.current_token(), SyntaxKind::CloseParenToken | SyntaxKind::EndOfFileToken) {
            arguments.push(self.parse_argument_or_array_element());
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseParenToken);
        alloc_vec_in(self.arena, arguments)
    }

    fn parse_argument_or_array_element(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        if self.optional_token(SyntaxKind::DotDotDotToken).is_some() {
            let expression = self.parse_assignment_expression_and_alloc();
            return Expression::Spread(self.arena.alloc(SpreadElement {
                data: NodeData::new(SyntaxKind::SpreadElement, pos, self.node_end()),
                expression,
            }));
        }
        self.parse_assignment_expression()
    }

    fn parse_new_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        let new_token = self.parse_token();
        if self.optional_token(SyntaxKind::DotToken).is_some() {
            // new.target
            let name = self.parse_identifier_name();
            return Expression::PropertyAccess(self.arena.alloc(PropertyAccessExpression {
                data: NodeData::new(SyntaxKind::PropertyAccessExpression, pos, self.node_end()),
                expression: self.arena.alloc(Expression::Keyword(new_token)),
                question_dot_token: None,
                name,
            }));
        }

        let callee = if self.current_token() == SyntaxKind::NewKeyword {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        let callee = self.parse_member_and_call_chain(callee, false);
        let type_arguments = if self.current_token() == SyntaxKind::LessThanToken {
            self.try_parse(|p| {
                let errors = p.error_count();
                let type_arguments = p.parse_type_arguments();
                (p.error_count() == errors).then_some(type_arguments)
            })
        } else {
            None
        };
        let arguments = if self.current_token() == SyntaxKind::OpenParenToken {
            Some(self.parse_argument_list())
        } else {
            None
        };
        Expression::New(self.arena.alloc(NewExpression {
            data: NodeData::new(SyntaxKind::NewExpression, pos, self.node_end()),
            expression: self.arena.alloc(callee),
            type_arguments,
            arguments,
        }))
    }

    fn parse_primary_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        match self.current_token() {
            SyntaxKind::NumericLiteral => Expression::NumericLiteral(self.parse_literal_expression()),
            SyntaxKind::BigIntLiteral => Expression::BigIntLiteral(self.parse_literal_expression()),
            SyntaxKind::StringLiteral => Expression::StringLiteral(self.parse_string_literal()),
            SyntaxKind::NoSubstitutionTemplateLiteral => {
                Expression::NoSubstitutionTemplateLiteral(self.parse_template_literal())
            }
            SyntaxKind::TemplateHead => self.parse_template_expression(),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                self.scanner.rescan_slash_token();
                Expression::RegularExpressionLiteral(self.parse_literal_expression())
            }
            SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::ImportKeyword => Expression::Keyword(self.parse_token()),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let expression = self.parse_expression_and_alloc();
                self.expect_token(SyntaxKind::CloseParenToken);
                Expression::Parenthesized(self.arena.alloc(ParenthesizedExpression {
                    data: NodeData::new(SyntaxKind::ParenthesizedExpression, pos, self.node_end()),
                    expression,
                }))
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(ModifierFlags::NONE),
            SyntaxKind::AsyncKeyword if self.next_token_is_on_same_line(|k| k == SyntaxKind::FunctionKeyword) => {
                self.next_token();
                self.parse_function_expression(ModifierFlags::ASYNC)
            }
            kind if kind.is_identifier_or_contextual_keyword() => Expression::Identifier(self.create_identifier()),
            _ => {
                self.error(&messages::EXPRESSION_EXPECTED, &[]);
                self.parse_missing_expression()
            }
        }
    }

    fn parse_template_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        let head = self.token_value();
        self.next_token();

        let mut template_spans = Vec::new();
        loop {
            let span_pos = self.token_pos();
            let expression = self.parse_expression_and_alloc();
            if self.current_token() != SyntaxKind::CloseBraceToken {
                self.error(&messages::_0_EXPECTED, &["}"]);
                break;
            }
            let kind = self.scanner.rescan_template_continuation();
            let literal = self.token_value();
            self.next_token();
            template_spans.push(TemplateSpan {
                data: NodeData::new(SyntaxKind::TemplateSpan, span_pos, self.node_end()),
                expression,
                literal,
            });
            if kind != SyntaxKind::TemplateMiddle {
                break;
            }
        }

        Expression::TemplateExpression(self.arena.alloc(TemplateExpression {
            data: NodeData::new(SyntaxKind::TemplateExpression, pos, self.node_end()),
            head,
            template_spans: alloc_vec_in(self.arena, template_spans),
        }))
    }

    fn parse_array_literal(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBracketToken);
        let mut elements = Vec::new();
        loop {
            match self.current_token() {
                SyntaxKind::CloseBracketToken | SyntaxKind::EndOfFileToken => break,
                SyntaxKind::CommaToken => {
                    let hole = self.token_pos();
                    elements.push(Expression::Omitted(Token::new(SyntaxKind::OmittedExpression, hole, hole)));
                    self.next_token();
                    continue;
                }
                _ => {}
            }
            elements.push(self.parse_argument_or_array_element());
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseBracketToken);
        Expression::ArrayLiteral(self.arena.alloc(ArrayLiteralExpression {
            data: NodeData::new(SyntaxKind::ArrayLiteralExpression, pos, self.node_end()),
            elements: alloc_vec_in(self.arena, elements),
        }))
    }

    fn parse_object_literal(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let mut properties = Vec::new();
        let mut separator_ends = Vec::new();
        while !is_block_terminator(self.current_token()) {
            properties.push(self.parse_object_literal_element());
            if self.current_token() == SyntaxKind::CommaToken {
                separator_ends.push(Some(self.token_end()));
                self.next_token();
            } else {
                separator_ends.push(None);
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseBraceToken);
        let end = self.node_end();
        let multi_line = self
            .source_text
            .get(pos as usize..end as usize)
            .is_some_and(|text| text.contains('\n'));
        let flags = if multi_line { NodeFlags::MULTI_LINE } else { NodeFlags::NONE };

        Expression::ObjectLiteral(self.arena.alloc(ObjectLiteralExpression {
            data: NodeData::new(SyntaxKind::ObjectLiteralExpression, pos, end).with_flags(flags),
            properties: alloc_vec_in(self.arena, properties),
            separator_ends: alloc_vec_in(self.arena, separator_ends),
        }))
    }

    fn parse_object_literal_element(&mut self) -> ObjectLiteralElement<'a> {
        let pos = self.token_pos();
        if self.optional_token(SyntaxKind::DotDotDotToken).is_some() {
            let expression = self.parse_assignment_expression_and_alloc();
            return ObjectLiteralElement::SpreadAssignment(self.arena.alloc(SpreadAssignment {
                data: NodeData::new(SyntaxKind::SpreadAssignment, pos, self.node_end()),
                expression,
            }));
        }

        let mut modifiers = ModifierFlags::NONE;
        if self.current_token() == SyntaxKind::AsyncKeyword
            && self.next_token_is_on_same_line(|k| is_property_name_start(k) || k == SyntaxKind::AsteriskToken)
        {
            self.next_token();
            modifiers |= ModifierFlags::ASYNC;
        }
        let asterisk_token = self.optional_token(SyntaxKind::AsteriskToken);

        let accessor = if asterisk_token.is_none()
            && matches!(self.current_token(), SyntaxKind::GetKeyword | SyntaxKind::SetKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                is_property_name_start(p.current_token())
            }) {
            let kind = self.current_token();
            self.next_token();
            Some(kind)
        } else {
            None
        };

        let name = self.parse_property_name();

        if let Some(accessor_kind) = accessor {
            let parameters = self.parse_parameter_list();
            let return_type = self.parse_return_type_annotation();
            let body = if self.current_token() == SyntaxKind::OpenBraceToken {
                Some(self.parse_block())
            } else {
                self.error(&messages::_0_EXPECTED, &["{"]);
                None
            };
            let is_getter = accessor_kind == SyntaxKind::GetKeyword;
            let kind = if is_getter { SyntaxKind::GetAccessor } else { SyntaxKind::SetAccessor };
            let node = self.arena.alloc(AccessorDeclaration {
                data: NodeData::new(kind, pos, self.node_end()),
                name,
                parameters,
                return_type,
                body,
            });
            return if is_getter {
                ObjectLiteralElement::GetAccessor(node)
            } else {
                ObjectLiteralElement::SetAccessor(node)
            };
        }

        let question_token = self.optional_token(SyntaxKind::QuestionToken);
        if asterisk_token.is_some()
            || matches!(self.current_token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken)
        {
            let type_parameters = self.try_parse_type_parameters();
            let parameters = self.parse_parameter_list();
            let return_type = self.parse_return_type_annotation();
            let body = if self.current_token() == SyntaxKind::OpenBraceToken {
                Some(self.parse_block())
            } else {
                self.error(&messages::_0_EXPECTED, &["{"]);
                None
            };
            return ObjectLiteralElement::MethodDeclaration(self.arena.alloc(MethodDeclaration {
                data: NodeData::new(SyntaxKind::MethodDeclaration, pos, self.node_end()).with_modifiers(modifiers),
                asterisk_token,
                name,
                question_token,
                type_parameters,
                parameters,
                return_type,
                body,
            }));
        }

        if self.optional_token(SyntaxKind::ColonToken).is_some() {
            let initializer = self.parse_assignment_expression_and_alloc();
            return ObjectLiteralElement::PropertyAssignment(self.arena.alloc(PropertyAssignment {
                data: NodeData::new(SyntaxKind::PropertyAssignment, pos, self.node_end()),
                name,
                initializer,
            }));
        }

        match name {
            PropertyName::Identifier(id) => {
                // `{ a = 1 } = value` destructuring defaults.
                if self.optional_token(SyntaxKind::EqualsToken).is_some() {
                    self.parse_assignment_expression();
                }
                ObjectLiteralElement::ShorthandPropertyAssignment(self.arena.alloc(ShorthandPropertyAssignment {
                    data: NodeData::new(SyntaxKind::ShorthandPropertyAssignment, pos, self.node_end()),
                    name: id,
                }))
            }
            _ => {
                self.error(&messages::PROPERTY_ASSIGNMENT_EXPECTED, &[]);
                let initializer: &'a Expression<'a> = self.arena.alloc(self.parse_missing_expression());
                ObjectLiteralElement::PropertyAssignment(self.arena.alloc(PropertyAssignment {
                    data: NodeData::new(SyntaxKind::PropertyAssignment, pos, self.node_end()),
                    name,
                    initializer,
                }))
            }
        }
    }

    fn parse_function_expression(&mut self, modifiers: ModifierFlags) -> Expression<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::FunctionKeyword);
        let asterisk_token = self.optional_token(SyntaxKind::AsteriskToken);
        let name = if self.current_token().is_identifier_or_contextual_keyword() {
            Some(self.parse_identifier())
        } else {
            None
        };
        let type_parameters = self.try_parse_type_parameters();
        let parameters = self.parse_parameter_list();
        let return_type = self.parse_return_type_annotation();
        let body = self.parse_block();
        Expression::Function(self.arena.alloc(FunctionExpression {
            data: NodeData::new(SyntaxKind::FunctionExpression, pos, self.node_end()).with_modifiers(modifiers),
            asterisk_token,
            name,
            type_parameters,
            parameters,
            return_type,
            body,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_parsed<R>(source: &str, f: impl FnOnce(&SourceFile<'_>, &DiagnosticCollection) -> R) -> R {
        let arena = Bump::new();
        let interner = StringInterner::new();
        let mut parser = Parser::new(&arena, &interner, "test.ts", source);
        let file = parser.parse_source_file();
        let diagnostics = parser.take_diagnostics();
        f(&file, &diagnostics)
    }

    #[test]
    fn test_node_ranges_exclude_trailing_trivia() {
        with_parsed("const a = 1;   // trailing\n", |file, diagnostics| {
            assert!(diagnostics.is_empty());
            let range = file.statements[0].range();
            assert_eq!((range.pos, range.end), (0, 12));
        });
    }

    #[test]
    fn test_object_literal_separator_ends() {
        let source = "const o = { a: 1, b: 2 };";
        with_parsed(source, |file, _| {
            let Statement::VariableStatement(stmt) = &file.statements[0] else { panic!("expected variable") };
            let Some(Expression::ObjectLiteral(object)) = stmt.declaration_list.declarations[0].initializer else {
                panic!("expected object literal")
            };
            assert_eq!(object.properties.len(), 2);
            assert_eq!(object.member_separator_end(0), Some(17));
            assert_eq!(object.member_separator_end(1), None);
            assert_eq!(object.member_full_start(1), 17);
            assert_eq!(object.open_brace_end(), 11);
            assert_eq!(&source[object.close_brace_pos() as usize..][..1], "}");
        });
    }

    #[test]
    fn test_speculative_arrow_parse_leaves_no_diagnostics() {
        with_parsed("const f = (a + b) * c;\nconst g = (x: number): number => x;", |file, diagnostics| {
            assert!(diagnostics.is_empty(), "{:?}", diagnostics.diagnostics());
            assert_eq!(file.statements.len(), 2);
        });
    }

    #[test]
    fn test_shift_operators_are_rescanned() {
        with_parsed("x = a >> 2 >= b; y >>>= 1;", |file, diagnostics| {
            assert!(diagnostics.is_empty(), "{:?}", diagnostics.diagnostics());
            let Statement::ExpressionStatement(stmt) = &file.statements[1] else { panic!("expected expression") };
            let Expression::Binary(binary) = stmt.expression else { panic!("expected binary") };
            assert_eq!(binary.operator_token.kind(), SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken);
        });
    }

    #[test]
    fn test_unsupported_statement_collects_identifiers() {
        with_parsed("class Foo extends Bar { m() { return this.baz(Qux); } }\nconst x = 1;", |file, diagnostics| {
            assert!(!diagnostics.has_errors());
            assert_eq!(file.statements.len(), 2);
            let Statement::UnsupportedStatement(unsupported) = &file.statements[0] else { panic!("expected skip") };
            assert_eq!(unsupported.keyword, SyntaxKind::ClassKeyword);
            assert_eq!(unsupported.name.map(|n| n.name), Some("Foo"));
            let names: Vec<_> = unsupported.identifiers.iter().map(|id| id.name).collect();
            assert!(names.contains(&"Bar"));
            assert!(names.contains(&"Qux"));
            assert!(!names.contains(&"baz"));
        });
    }
}
