//! Token classification used for lookahead and error recovery.

use reprint_ast::syntax_kind::SyntaxKind;

/// Tokens that begin a statement; recovery skips ahead to one of these.
pub fn can_start_statement(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::OpenBraceToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::UsingKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::IfKeyword
            | SyntaxKind::DoKeyword
            | SyntaxKind::WhileKeyword
            | SyntaxKind::ForKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::BreakKeyword
            | SyntaxKind::ReturnKeyword
            | SyntaxKind::WithKeyword
            | SyntaxKind::SwitchKeyword
            | SyntaxKind::ThrowKeyword
            | SyntaxKind::TryKeyword
            | SyntaxKind::DebuggerKeyword
            | SyntaxKind::ExportKeyword
            | SyntaxKind::ImportKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::TypeKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::AbstractKeyword
            | SyntaxKind::AsyncKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::ModuleKeyword
            | SyntaxKind::NamespaceKeyword
            | SyntaxKind::AtToken
    ) || is_start_of_expression(kind)
}

/// Tokens that can begin a left-hand-side expression.
pub fn is_start_of_left_hand_side_expression(kind: SyntaxKind) -> bool {
    match kind {
        SyntaxKind::ThisKeyword
        | SyntaxKind::SuperKeyword
        | SyntaxKind::NullKeyword
        | SyntaxKind::TrueKeyword
        | SyntaxKind::FalseKeyword
        | SyntaxKind::NumericLiteral
        | SyntaxKind::BigIntLiteral
        | SyntaxKind::StringLiteral
        | SyntaxKind::NoSubstitutionTemplateLiteral
        | SyntaxKind::TemplateHead
        | SyntaxKind::OpenParenToken
        | SyntaxKind::OpenBracketToken
        | SyntaxKind::OpenBraceToken
        | SyntaxKind::FunctionKeyword
        | SyntaxKind::ClassKeyword
        | SyntaxKind::NewKeyword
        | SyntaxKind::SlashToken
        | SyntaxKind::SlashEqualsToken
        | SyntaxKind::ImportKeyword
        | SyntaxKind::PrivateIdentifier
        | SyntaxKind::Identifier => true,
        _ => kind.is_identifier_or_keyword_identifier(),
    }
}

/// Tokens that can begin any expression.
pub fn is_start_of_expression(kind: SyntaxKind) -> bool {
    if is_start_of_left_hand_side_expression(kind) {
        return true;
    }
    matches!(
        kind,
        SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::AwaitKeyword
            | SyntaxKind::YieldKeyword
            | SyntaxKind::AtToken
    )
}

/// Tokens that may follow a modifier keyword for it to count as a modifier.
pub fn can_follow_modifier(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::AsteriskToken
            | SyntaxKind::DotDotDotToken
            | SyntaxKind::PrivateIdentifier
            | SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::AtToken
    ) || kind == SyntaxKind::Identifier
        || kind.is_keyword()
}

/// Tokens that can start a property name in classes, interfaces and
/// object literals.
pub fn is_literal_property_name(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Identifier
            | SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::PrivateIdentifier
    ) || kind.is_keyword()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_starts() {
        assert!(can_start_statement(SyntaxKind::IfKeyword));
        assert!(can_start_statement(SyntaxKind::Identifier));
        assert!(can_start_statement(SyntaxKind::MinusToken));
        assert!(!can_start_statement(SyntaxKind::CloseBraceToken));
        assert!(!can_start_statement(SyntaxKind::EqualsToken));
    }

    #[test]
    fn test_expression_starts() {
        assert!(is_start_of_expression(SyntaxKind::TypeKeyword));
        assert!(is_start_of_expression(SyntaxKind::TemplateHead));
        assert!(!is_start_of_expression(SyntaxKind::CloseParenToken));
        assert!(!is_start_of_expression(SyntaxKind::SemicolonToken));
        assert!(!is_start_of_left_hand_side_expression(SyntaxKind::IfKeyword));
    }

    #[test]
    fn test_modifier_followers() {
        assert!(can_follow_modifier(SyntaxKind::Identifier));
        assert!(can_follow_modifier(SyntaxKind::OpenBracketToken));
        assert!(!can_follow_modifier(SyntaxKind::OpenParenToken));
        assert!(!can_follow_modifier(SyntaxKind::ColonToken));
    }
}
