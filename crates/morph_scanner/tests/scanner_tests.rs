//! Scanner integration tests over declaration-file snippets.

use morph_ast::syntax_kind::SyntaxKind;
use morph_scanner::Scanner;

fn scan_all(source: &str) -> Vec<(SyntaxKind, String)> {
    let mut scanner = Scanner::new("test.ts", source);
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        tokens.push((kind, scanner.token_value().to_string()));
    }
    tokens
}

fn scan_kinds(source: &str) -> Vec<SyntaxKind> {
    scan_all(source).into_iter().map(|(k, _)| k).collect()
}

#[test]
fn test_empty_and_trivia_only_sources() {
    assert!(scan_all("").is_empty());
    assert!(scan_all("   \n\t  // trailing\n/* block */").is_empty());
}

#[test]
fn test_type_only_import() {
    let tokens = scan_all("import type { A as B } from './structures';");
    let kinds: Vec<_> = tokens.iter().map(|(k, _)| *k).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::ImportKeyword,
            SyntaxKind::TypeKeyword,
            SyntaxKind::OpenBraceToken,
            SyntaxKind::Identifier,
            SyntaxKind::AsKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::CloseBraceToken,
            SyntaxKind::FromKeyword,
            SyntaxKind::StringLiteral,
            SyntaxKind::SemicolonToken,
        ]
    );
    assert_eq!(tokens[8].1, "./structures");
}

#[test]
fn test_structure_literal_tokens() {
    let kinds = scan_kinds("export const Structure = { ...structure, kind: StructureKind.Class } as const;");
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::ExportKeyword,
            SyntaxKind::ConstKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::EqualsToken,
            SyntaxKind::OpenBraceToken,
            SyntaxKind::DotDotDotToken,
            SyntaxKind::Identifier,
            SyntaxKind::CommaToken,
            SyntaxKind::Identifier,
            SyntaxKind::ColonToken,
            SyntaxKind::Identifier,
            SyntaxKind::DotToken,
            SyntaxKind::Identifier,
            SyntaxKind::CloseBraceToken,
            SyntaxKind::AsKeyword,
            SyntaxKind::ConstKeyword,
            SyntaxKind::SemicolonToken,
        ]
    );
}

#[test]
fn test_generic_extends_clause() {
    let kinds = scan_kinds("interface A extends KindedStructure<StructureKind.Class> {}");
    assert_eq!(kinds[2], SyntaxKind::ExtendsKeyword);
    assert_eq!(kinds[4], SyntaxKind::LessThanToken);
    // `>` is never combined while scanning; the parser rescans it when needed.
    assert_eq!(kinds[8], SyntaxKind::GreaterThanToken);
}

#[test]
fn test_token_info_positions() {
    let mut scanner = Scanner::new("test.ts", "/** Create. */\n    createClass");
    scanner.scan();
    let info = scanner.token_info();
    assert_eq!(info.kind, SyntaxKind::Identifier);
    assert_eq!(info.text, "createClass");
    assert_eq!((info.pos, info.end), (19, 30));
}

#[test]
fn test_save_and_restore_state() {
    let mut scanner = Scanner::new("test.ts", "a satisfies b");
    scanner.scan();
    let saved = scanner.save_state();
    assert_eq!(scanner.scan(), SyntaxKind::SatisfiesKeyword);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    scanner.restore_state(saved);
    assert_eq!(scanner.token_value(), "a");
    assert_eq!(scanner.scan(), SyntaxKind::SatisfiesKeyword);
}
