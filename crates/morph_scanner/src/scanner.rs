//! The TypeScript scanner/lexer.
//!
//! Converts source text into a stream of tokens that the parser consumes.
//! Positions are byte offsets into the UTF-8 text; multi-byte characters are
//! only decoded where the ASCII fast path does not apply.

use crate::char_codes::*;
use crate::token::TokenInfo;
use morph_ast::syntax_kind::SyntaxKind;
use morph_ast::types::TokenFlags;
use morph_core::text::TextSpan;
use morph_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};

/// Saved scanner state for lookahead.
#[derive(Debug, Clone)]
pub struct ScannerState {
    pub pos: usize,
    pub token_start: usize,
    pub token: SyntaxKind,
    pub token_value: String,
    pub token_flags: TokenFlags,
    pub diagnostics_len: usize,
}

/// The scanner converts TypeScript source text into tokens.
pub struct Scanner<'a> {
    /// The file name used for diagnostics.
    file_name: String,
    /// The source text being scanned.
    text: &'a str,
    /// Current position in the text.
    pos: usize,
    /// Start of the current token (after leading trivia).
    token_start: usize,
    /// The current token kind.
    token: SyntaxKind,
    /// The value of the current token.
    token_value: String,
    /// Token flags for the current token.
    token_flags: TokenFlags,
    /// Accumulated diagnostics.
    diagnostics: DiagnosticCollection,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source text.
    pub fn new(file_name: &str, text: &'a str) -> Self {
        Self {
            file_name: file_name.to_string(),
            text,
            pos: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: TokenFlags::NONE,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// The full source text.
    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Look ahead: save state, call f, restore state and return the result.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.save_state();
        let result = f(self);
        self.restore_state(state);
        result
    }

    /// Get the current token kind.
    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Get the current token's value.
    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// The current token's source text, as written.
    #[inline]
    pub fn token_text(&self) -> &'a str {
        &self.text[self.token_start..self.pos]
    }

    /// Get the start position of the current token (after trivia).
    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Get the current position (end of current token).
    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    /// Get the current token flags.
    #[inline]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    /// Whether the current token was preceded by a line break.
    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    /// Get the accumulated diagnostics.
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    /// Take the accumulated diagnostics, leaving an empty collection.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    /// Get a TokenInfo for the current token.
    pub fn token_info(&self) -> TokenInfo {
        TokenInfo {
            kind: self.token,
            pos: self.token_start as u32,
            end: self.pos as u32,
            text: self.token_value.clone(),
            flags: self.token_flags,
        }
    }

    /// Save the full scanner state for lookahead.
    pub fn save_state(&self) -> ScannerState {
        ScannerState {
            pos: self.pos,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
            diagnostics_len: self.diagnostics.len(),
        }
    }

    /// Restore the full scanner state from a saved state.
    pub fn restore_state(&mut self, state: ScannerState) {
        self.pos = state.pos;
        self.token_start = state.token_start;
        self.token = state.token;
        self.token_value = state.token_value;
        self.token_flags = state.token_flags;
        self.diagnostics.truncate(state.diagnostics_len);
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.char_at_pos(self.pos)
    }

    /// The character starting at byte offset `pos + offset`. Only used for
    /// ASCII lookahead, where byte and character offsets agree.
    #[inline]
    fn char_at(&self, offset: usize) -> Option<char> {
        self.char_at_pos(self.pos + offset)
    }

    #[inline]
    fn char_at_pos(&self, pos: usize) -> Option<char> {
        let byte = *self.text.as_bytes().get(pos)?;
        if byte.is_ascii() {
            Some(byte as char)
        } else {
            self.text.get(pos..).and_then(|rest| rest.chars().next())
        }
    }

    /// Advance past the current character, whatever its encoded width.
    #[inline]
    fn advance_char(&mut self, ch: char) {
        self.pos += ch.len_utf8();
    }

    fn error(&mut self, message: &DiagnosticMessage, start: usize, end: usize) {
        self.diagnostics.add(Diagnostic::with_location(
            self.file_name.clone(),
            TextSpan::from_bounds(start as u32, end.max(start) as u32),
            message,
            &[],
        ));
    }

    /// Skip whitespace and comments (trivia), setting token_flags for line breaks.
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.current_char() {
            match ch {
                '\r' => {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += 1;
                    if self.current_char() == Some('\n') {
                        self.pos += 1;
                    }
                }
                '\n' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR => {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.advance_char(ch);
                }
                '/' if self.char_at(1) == Some('/') => {
                    // Single-line comment
                    self.pos += 2;
                    while let Some(c) = self.current_char() {
                        if is_line_break(c) {
                            break;
                        }
                        self.advance_char(c);
                    }
                }
                '/' if self.char_at(1) == Some('*') => {
                    // Multi-line comment
                    let start = self.pos;
                    self.pos += 2;
                    let mut closed = false;
                    while let Some(c) = self.current_char() {
                        if c == '*' && self.char_at(1) == Some('/') {
                            self.pos += 2;
                            closed = true;
                            break;
                        }
                        if is_line_break(c) {
                            self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                        }
                        self.advance_char(c);
                    }
                    if !closed {
                        self.error(&messages::ASTERISK_SLASH_EXPECTED, start, self.pos);
                    }
                }
                '#' if self.pos == 0 && self.char_at(1) == Some('!') => {
                    // Shebang
                    while let Some(c) = self.current_char() {
                        if is_line_break(c) {
                            break;
                        }
                        self.advance_char(c);
                    }
                }
                c if is_white_space_single_line(c) => self.advance_char(c),
                _ => return,
            }
        }
    }

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();

        self.skip_trivia();
        self.token_start = self.pos;

        let ch = match self.current_char() {
            Some(ch) => ch,
            None => {
                self.token = SyntaxKind::EndOfFileToken;
                return self.token;
            }
        };

        self.token = match ch {
            '(' => { self.pos += 1; SyntaxKind::OpenParenToken }
            ')' => { self.pos += 1; SyntaxKind::CloseParenToken }
            '{' => { self.pos += 1; SyntaxKind::OpenBraceToken }
            '}' => { self.pos += 1; SyntaxKind::CloseBraceToken }
            '[' => { self.pos += 1; SyntaxKind::OpenBracketToken }
            ']' => { self.pos += 1; SyntaxKind::CloseBracketToken }
            ';' => { self.pos += 1; SyntaxKind::SemicolonToken }
            ',' => { self.pos += 1; SyntaxKind::CommaToken }
            '~' => { self.pos += 1; SyntaxKind::TildeToken }
            '@' => { self.pos += 1; SyntaxKind::AtToken }
            '#' => { self.pos += 1; SyntaxKind::HashToken }
            ':' => { self.pos += 1; SyntaxKind::ColonToken }

            '.' => self.scan_dot(),
            '?' => self.scan_question(),
            '<' => self.scan_less_than(),
            '>' => { self.pos += 1; SyntaxKind::GreaterThanToken }
            '=' => self.scan_equals(),
            '!' => self.scan_exclamation(),
            '+' => self.scan_operator_with_double('+', SyntaxKind::PlusToken, SyntaxKind::PlusPlusToken, SyntaxKind::PlusEqualsToken),
            '-' => self.scan_operator_with_double('-', SyntaxKind::MinusToken, SyntaxKind::MinusMinusToken, SyntaxKind::MinusEqualsToken),
            '*' => self.scan_asterisk(),
            '/' => self.scan_operator_with_equals(SyntaxKind::SlashToken, SyntaxKind::SlashEqualsToken),
            '%' => self.scan_operator_with_equals(SyntaxKind::PercentToken, SyntaxKind::PercentEqualsToken),
            '^' => self.scan_operator_with_equals(SyntaxKind::CaretToken, SyntaxKind::CaretEqualsToken),
            '&' => self.scan_logical('&', SyntaxKind::AmpersandToken, SyntaxKind::AmpersandEqualsToken, SyntaxKind::AmpersandAmpersandToken, SyntaxKind::AmpersandAmpersandEqualsToken),
            '|' => self.scan_logical('|', SyntaxKind::BarToken, SyntaxKind::BarEqualsToken, SyntaxKind::BarBarToken, SyntaxKind::BarBarEqualsToken),

            '\'' | '"' => self.scan_string_literal(ch),
            '`' => self.scan_template_literal(),

            '0'..='9' => self.scan_number(),

            _ if is_identifier_start(ch) => self.scan_identifier(),

            _ => {
                let start = self.pos;
                self.advance_char(ch);
                self.error(&messages::INVALID_CHARACTER, start, self.pos);
                SyntaxKind::Unknown
            }
        };

        self.token
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    fn scan_dot(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('.') && self.char_at(2) == Some('.') {
            self.pos += 3;
            SyntaxKind::DotDotDotToken
        } else if self.char_at(1).map_or(false, is_digit) {
            self.scan_number()
        } else {
            self.pos += 1;
            SyntaxKind::DotToken
        }
    }

    fn scan_question(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('?') {
            if self.char_at(2) == Some('=') {
                self.pos += 3;
                SyntaxKind::QuestionQuestionEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::QuestionQuestionToken
            }
        } else if self.char_at(1) == Some('.') && !self.char_at(2).map_or(false, is_digit) {
            self.pos += 2;
            SyntaxKind::QuestionDotToken
        } else {
            self.pos += 1;
            SyntaxKind::QuestionToken
        }
    }

    fn scan_less_than(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('<') {
            if self.char_at(2) == Some('=') {
                self.pos += 3;
                SyntaxKind::LessThanLessThanEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::LessThanLessThanToken
            }
        } else if self.char_at(1) == Some('=') {
            self.pos += 2;
            SyntaxKind::LessThanEqualsToken
        } else {
            self.pos += 1;
            SyntaxKind::LessThanToken
        }
    }

    fn scan_equals(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('=') {
            if self.char_at(2) == Some('=') {
                self.pos += 3;
                SyntaxKind::EqualsEqualsEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::EqualsEqualsToken
            }
        } else if self.char_at(1) == Some('>') {
            self.pos += 2;
            SyntaxKind::EqualsGreaterThanToken
        } else {
            self.pos += 1;
            SyntaxKind::EqualsToken
        }
    }

    fn scan_exclamation(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('=') {
            if self.char_at(2) == Some('=') {
                self.pos += 3;
                SyntaxKind::ExclamationEqualsEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::ExclamationEqualsToken
            }
        } else {
            self.pos += 1;
            SyntaxKind::ExclamationToken
        }
    }

    /// `+`, `++`, `+=` and the `-` family.
    fn scan_operator_with_double(&mut self, ch: char, single: SyntaxKind, double: SyntaxKind, equals: SyntaxKind) -> SyntaxKind {
        if self.char_at(1) == Some(ch) {
            self.pos += 2;
            double
        } else if self.char_at(1) == Some('=') {
            self.pos += 2;
            equals
        } else {
            self.pos += 1;
            single
        }
    }

    fn scan_operator_with_equals(&mut self, single: SyntaxKind, equals: SyntaxKind) -> SyntaxKind {
        if self.char_at(1) == Some('=') {
            self.pos += 2;
            equals
        } else {
            self.pos += 1;
            single
        }
    }

    fn scan_asterisk(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('*') {
            if self.char_at(2) == Some('=') {
                self.pos += 3;
                SyntaxKind::AsteriskAsteriskEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::AsteriskAsteriskToken
            }
        } else {
            self.scan_operator_with_equals(SyntaxKind::AsteriskToken, SyntaxKind::AsteriskEqualsToken)
        }
    }

    /// `&`, `&=`, `&&`, `&&=` and the `|` family.
    fn scan_logical(
        &mut self,
        ch: char,
        single: SyntaxKind,
        single_equals: SyntaxKind,
        double: SyntaxKind,
        double_equals: SyntaxKind,
    ) -> SyntaxKind {
        if self.char_at(1) == Some(ch) {
            if self.char_at(2) == Some('=') {
                self.pos += 3;
                double_equals
            } else {
                self.pos += 2;
                double
            }
        } else {
            self.scan_operator_with_equals(single, single_equals)
        }
    }

    fn scan_string_literal(&mut self, quote: char) -> SyntaxKind {
        if quote == '\'' {
            self.token_flags |= TokenFlags::SINGLE_QUOTE;
        }
        self.pos += 1; // skip opening quote
        let mut result = String::new();
        loop {
            let ch = match self.current_char() {
                Some(ch) => ch,
                None => {
                    self.error(&messages::UNTERMINATED_STRING_LITERAL, self.token_start, self.pos);
                    self.token_flags |= TokenFlags::UNTERMINATED;
                    break;
                }
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if ch == '\\' {
                self.scan_escape_sequence(&mut result);
                continue;
            }
            if ch == '\n' || ch == '\r' {
                self.error(&messages::UNTERMINATED_STRING_LITERAL, self.token_start, self.pos);
                self.token_flags |= TokenFlags::UNTERMINATED;
                break;
            }
            result.push(ch);
            self.advance_char(ch);
        }
        self.token_value = result;
        SyntaxKind::StringLiteral
    }

    /// Scan an escape sequence starting at a backslash and push its cooked value.
    fn scan_escape_sequence(&mut self, out: &mut String) {
        self.pos += 1; // skip backslash
        let ch = match self.current_char() {
            Some(ch) => ch,
            None => return,
        };
        self.advance_char(ch);
        match ch {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'v' => out.push('\u{000B}'),
            '0' if !self.current_char().map_or(false, is_digit) => out.push('\0'),
            'x' => {
                if let Some(value) = self.scan_hex_value(2) {
                    out.extend(char::from_u32(value));
                }
            }
            'u' => {
                self.token_flags |= TokenFlags::UNICODE_ESCAPE;
                let value = if self.current_char() == Some('{') {
                    self.pos += 1;
                    let start = self.pos;
                    while self.current_char().map_or(false, is_hex_digit) {
                        self.pos += 1;
                    }
                    let value = u32::from_str_radix(&self.text[start..self.pos], 16).ok();
                    if self.current_char() == Some('}') {
                        self.pos += 1;
                    }
                    value
                } else {
                    self.scan_hex_value(4)
                };
                if let Some(value) = value {
                    out.extend(char::from_u32(value));
                }
            }
            // Line continuation
            '\r' => {
                if self.current_char() == Some('\n') {
                    self.pos += 1;
                }
            }
            '\n' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR => {}
            other => out.push(other),
        }
    }

    fn scan_hex_value(&mut self, digits: usize) -> Option<u32> {
        let start = self.pos;
        let end = start + digits;
        let slice = self.text.get(start..end)?;
        if !slice.chars().all(is_hex_digit) {
            return None;
        }
        self.pos = end;
        u32::from_str_radix(slice, 16).ok()
    }

    /// Scan template characters up to a closing backtick or `${`.
    /// Returns true if a `${` was consumed.
    fn scan_template_characters(&mut self) -> bool {
        let mut result = String::new();
        let substitution = loop {
            let ch = match self.current_char() {
                Some(ch) => ch,
                None => {
                    self.error(&messages::UNTERMINATED_TEMPLATE_LITERAL, self.token_start, self.pos);
                    self.token_flags |= TokenFlags::UNTERMINATED;
                    break false;
                }
            };
            if ch == '`' {
                self.pos += 1;
                break false;
            }
            if ch == '$' && self.char_at(1) == Some('{') {
                self.pos += 2;
                break true;
            }
            if ch == '\\' {
                self.scan_escape_sequence(&mut result);
                continue;
            }
            if ch == '\r' {
                // Template literals normalize CRLF and CR to LF.
                self.pos += 1;
                if self.current_char() == Some('\n') {
                    self.pos += 1;
                }
                result.push('\n');
                continue;
            }
            result.push(ch);
            self.advance_char(ch);
        };
        self.token_value = result;
        substitution
    }

    fn scan_template_literal(&mut self) -> SyntaxKind {
        self.pos += 1; // skip backtick
        if self.scan_template_characters() {
            SyntaxKind::TemplateHead
        } else {
            SyntaxKind::NoSubstitutionTemplateLiteral
        }
    }

    /// Rescan a template middle or tail. Called by the parser when the current
    /// token is the `}` that closes a template substitution.
    pub fn rescan_template_continuation(&mut self) -> SyntaxKind {
        debug_assert_eq!(self.token, SyntaxKind::CloseBraceToken);
        self.pos = self.token_start + 1;
        self.token_value.clear();
        self.token = if self.scan_template_characters() {
            SyntaxKind::TemplateMiddle
        } else {
            SyntaxKind::TemplateTail
        };
        self.token
    }

    /// Rescan the current `/` or `/=` token as a regular expression literal.
    pub fn rescan_slash_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::SlashToken && self.token != SyntaxKind::SlashEqualsToken {
            return self.token;
        }
        self.pos = self.token_start + 1;
        let mut in_character_class = false;
        loop {
            let ch = match self.current_char() {
                Some(ch) if !is_line_break(ch) => ch,
                _ => {
                    self.error(&messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL, self.token_start, self.pos);
                    self.token_flags |= TokenFlags::UNTERMINATED;
                    break;
                }
            };
            if ch == '\\' {
                self.pos += 1;
                if let Some(next) = self.current_char().filter(|c| !is_line_break(*c)) {
                    self.advance_char(next);
                }
                continue;
            }
            if ch == '[' {
                in_character_class = true;
            } else if ch == ']' {
                in_character_class = false;
            } else if ch == '/' && !in_character_class {
                self.pos += 1;
                // Flags
                while let Some(flag) = self.current_char().filter(|c| is_identifier_part(*c)) {
                    self.advance_char(flag);
                }
                break;
            }
            self.advance_char(ch);
        }
        self.token_value = self.token_text().to_string();
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }

    /// Rescan `>` as `>=`, `>>`, `>>=`, `>>>` or `>>>=`. The scanner always
    /// produces a lone `>` so that nested type arguments close one at a time.
    pub fn rescan_greater_than_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::GreaterThanToken {
            return self.token;
        }
        self.token = match (self.current_char(), self.char_at(1), self.char_at(2)) {
            (Some('>'), Some('>'), Some('=')) => {
                self.pos += 3;
                SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
            }
            (Some('>'), Some('>'), _) => {
                self.pos += 2;
                SyntaxKind::GreaterThanGreaterThanGreaterThanToken
            }
            (Some('>'), Some('='), _) => {
                self.pos += 2;
                SyntaxKind::GreaterThanGreaterThanEqualsToken
            }
            (Some('>'), _, _) => {
                self.pos += 1;
                SyntaxKind::GreaterThanGreaterThanToken
            }
            (Some('='), _, _) => {
                self.pos += 1;
                SyntaxKind::GreaterThanEqualsToken
            }
            _ => SyntaxKind::GreaterThanToken,
        };
        self.token
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;

        if self.current_char() == Some('0') {
            let radix_digits: Option<(TokenFlags, fn(char) -> bool)> = match self.char_at(1) {
                Some('x') | Some('X') => Some((TokenFlags::HEX_SPECIFIER, is_hex_digit as fn(char) -> bool)),
                Some('b') | Some('B') => Some((TokenFlags::BINARY_SPECIFIER, is_binary_digit as fn(char) -> bool)),
                Some('o') | Some('O') => Some((TokenFlags::OCTAL_SPECIFIER, is_octal_digit as fn(char) -> bool)),
                _ => None,
            };
            if let Some((flag, is_radix_digit)) = radix_digits {
                self.pos += 2;
                self.token_flags |= flag;
                self.scan_digits(is_radix_digit);
                return self.finish_number(start);
            }
        }

        self.scan_digits(is_digit);
        if self.current_char() == Some('.') {
            self.pos += 1;
            self.scan_digits(is_digit);
        }

        if let Some('e') | Some('E') = self.current_char() {
            self.pos += 1;
            self.token_flags |= TokenFlags::SCIENTIFIC;
            if let Some('+') | Some('-') = self.current_char() {
                self.pos += 1;
            }
            self.scan_digits(is_digit);
        }

        self.finish_number(start)
    }

    fn finish_number(&mut self, start: usize) -> SyntaxKind {
        let kind = if self.current_char() == Some('n') {
            self.pos += 1;
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };
        self.token_value = self.text[start..self.pos].to_string();
        kind
    }

    fn scan_digits(&mut self, is_valid: fn(char) -> bool) {
        while let Some(ch) = self.current_char() {
            if ch == '_' {
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
                self.pos += 1;
            } else if is_valid(ch) {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        while let Some(ch) = self.current_char().filter(|c| is_identifier_part(*c)) {
            self.advance_char(ch);
        }
        let text = &self.text[start..self.pos];
        self.token_value = text.to_string();
        SyntaxKind::from_keyword(text).unwrap_or(SyntaxKind::Identifier)
    }
}
