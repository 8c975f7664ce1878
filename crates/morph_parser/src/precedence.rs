//! Binary operator precedence.

use morph_ast::syntax_kind::SyntaxKind;

/// Binary operator precedence, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Lowest = 0,
    NullishCoalescing = 1,
    LogicalOr = 2,
    LogicalAnd = 3,
    BitwiseOr = 4,
    BitwiseXor = 5,
    BitwiseAnd = 6,
    Equality = 7,
    Relational = 8,
    Shift = 9,
    Additive = 10,
    Multiplicative = 11,
    Exponentiation = 12,
    Invalid = 255,
}

/// Precedence of `kind` when it appears as a binary operator.
///
/// `>=`, `>>`, `>>>` only show up here after the parser rescans a `>`.
pub fn get_binary_operator_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    match kind {
        SyntaxKind::QuestionQuestionToken => OperatorPrecedence::NullishCoalescing,
        SyntaxKind::BarBarToken => OperatorPrecedence::LogicalOr,
        SyntaxKind::AmpersandAmpersandToken => OperatorPrecedence::LogicalAnd,
        SyntaxKind::BarToken => OperatorPrecedence::BitwiseOr,
        SyntaxKind::CaretToken => OperatorPrecedence::BitwiseXor,
        SyntaxKind::AmpersandToken => OperatorPrecedence::BitwiseAnd,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => OperatorPrecedence::Equality,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::InKeyword
        | SyntaxKind::AsKeyword
        | SyntaxKind::SatisfiesKeyword => OperatorPrecedence::Relational,
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => OperatorPrecedence::Shift,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => OperatorPrecedence::Additive,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => {
            OperatorPrecedence::Multiplicative
        }
        SyntaxKind::AsteriskAsteriskToken => OperatorPrecedence::Exponentiation,
        _ => OperatorPrecedence::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        let mul = get_binary_operator_precedence(SyntaxKind::AsteriskToken);
        let add = get_binary_operator_precedence(SyntaxKind::PlusToken);
        let and = get_binary_operator_precedence(SyntaxKind::AmpersandAmpersandToken);
        assert!(mul > add);
        assert!(add > and);
        assert!(and > OperatorPrecedence::Lowest);
    }

    #[test]
    fn test_type_assertion_operators_are_relational() {
        assert_eq!(get_binary_operator_precedence(SyntaxKind::AsKeyword), OperatorPrecedence::Relational);
        assert_eq!(get_binary_operator_precedence(SyntaxKind::SatisfiesKeyword), OperatorPrecedence::Relational);
        assert_eq!(get_binary_operator_precedence(SyntaxKind::CommaToken), OperatorPrecedence::Invalid);
    }
}
