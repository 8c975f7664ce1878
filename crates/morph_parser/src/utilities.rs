//! Token classification helpers used by the parser.

use morph_ast::syntax_kind::SyntaxKind;

/// Tokens at which statement-level error recovery resumes.
pub fn can_start_statement(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::TypeKeyword
            | SyntaxKind::IfKeyword
            | SyntaxKind::ForKeyword
            | SyntaxKind::WhileKeyword
            | SyntaxKind::DoKeyword
            | SyntaxKind::SwitchKeyword
            | SyntaxKind::ReturnKeyword
            | SyntaxKind::ThrowKeyword
            | SyntaxKind::TryKeyword
            | SyntaxKind::BreakKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::ExportKeyword
            | SyntaxKind::ImportKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::CloseBraceToken
    )
}

/// Whether `kind` can begin an expression.
pub fn can_start_expression(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateHead
            | SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::SlashToken
            | SyntaxKind::SlashEqualsToken
            | SyntaxKind::NewKeyword
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::ThisKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ImportKeyword
    ) || kind.is_identifier_or_contextual_keyword()
}

/// Tokens that can name a property: `a`, `"a"`, `1`, `[key]`, or any keyword.
pub fn is_property_name_start(kind: SyntaxKind) -> bool {
    kind.is_identifier_or_keyword()
        || matches!(
            kind,
            SyntaxKind::StringLiteral
                | SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::OpenBracketToken
        )
}

pub fn is_block_terminator(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken)
}

/// End of the statement list of a `case` or `default` clause.
pub fn is_case_clause_terminator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::CaseKeyword
            | SyntaxKind::DefaultKeyword
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::EndOfFileToken
    )
}

/// Statements outside the supported subset that are always skipped whole.
pub fn is_unsupported_statement_start(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::ClassKeyword
            | SyntaxKind::ForKeyword
            | SyntaxKind::WhileKeyword
            | SyntaxKind::DoKeyword
            | SyntaxKind::TryKeyword
            | SyntaxKind::WithKeyword
            | SyntaxKind::DebuggerKeyword
            | SyntaxKind::AtToken
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_starts() {
        assert!(can_start_expression(SyntaxKind::Identifier));
        assert!(can_start_expression(SyntaxKind::AsyncKeyword));
        assert!(can_start_expression(SyntaxKind::OpenBraceToken));
        assert!(!can_start_expression(SyntaxKind::CloseParenToken));
        assert!(!can_start_expression(SyntaxKind::SemicolonToken));
    }

    #[test]
    fn test_property_name_starts() {
        assert!(is_property_name_start(SyntaxKind::DefaultKeyword));
        assert!(is_property_name_start(SyntaxKind::StringLiteral));
        assert!(!is_property_name_start(SyntaxKind::ColonToken));
    }

    #[test]
    fn test_terminators() {
        assert!(is_case_clause_terminator(SyntaxKind::DefaultKeyword));
        assert!(!is_block_terminator(SyntaxKind::DefaultKeyword));
        assert!(is_unsupported_statement_start(SyntaxKind::ClassKeyword));
        assert!(!is_unsupported_statement_start(SyntaxKind::InterfaceKeyword));
    }
}
