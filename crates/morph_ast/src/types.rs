//! Flag types for the AST.

bitflags::bitflags! {
    /// Flags for AST nodes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u32 {
        const NONE                          = 0;
        const LET                           = 1 << 0;
        const CONST                         = 1 << 1;
        /// `?.` chain member.
        const OPTIONAL_CHAIN                = 1 << 2;
        /// The node spans more than one line in the source.
        const MULTI_LINE                    = 1 << 3;
        /// The node was synthesized by the parser during error recovery.
        const MISSING                       = 1 << 4;
        const THIS_NODE_HAS_ERROR           = 1 << 5;

        const BLOCK_SCOPED = Self::LET.bits() | Self::CONST.bits();
    }
}

bitflags::bitflags! {
    /// Flags describing the token the scanner just produced.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u16 {
        const NONE                              = 0;
        const PRECEDING_LINE_BREAK              = 1 << 0;
        const UNTERMINATED                      = 1 << 1;
        const SCIENTIFIC                        = 1 << 2;
        const HEX_SPECIFIER                     = 1 << 3;
        const BINARY_SPECIFIER                  = 1 << 4;
        const OCTAL_SPECIFIER                   = 1 << 5;
        const CONTAINS_SEPARATOR                = 1 << 6;
        const UNICODE_ESCAPE                    = 1 << 7;
        const SINGLE_QUOTE                      = 1 << 8;
    }
}

bitflags::bitflags! {
    /// Modifier flags for declarations.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ModifierFlags: u32 {
        const NONE              = 0;
        const EXPORT            = 1 << 0;
        const AMBIENT           = 1 << 1;
        const PUBLIC            = 1 << 2;
        const PRIVATE           = 1 << 3;
        const PROTECTED         = 1 << 4;
        const STATIC            = 1 << 5;
        const READONLY          = 1 << 6;
        const ACCESSOR          = 1 << 7;
        const ABSTRACT          = 1 << 8;
        const ASYNC             = 1 << 9;
        const DEFAULT           = 1 << 10;
        const CONST             = 1 << 11;
        const OVERRIDE          = 1 << 12;

        const ACCESSIBILITY_MODIFIER = Self::PUBLIC.bits() | Self::PRIVATE.bits() | Self::PROTECTED.bits();
    }
}

impl ModifierFlags {
    /// Map a modifier keyword to its flag.
    pub fn from_modifier_kind(kind: crate::SyntaxKind) -> ModifierFlags {
        use crate::SyntaxKind;
        match kind {
            SyntaxKind::ExportKeyword => ModifierFlags::EXPORT,
            SyntaxKind::DeclareKeyword => ModifierFlags::AMBIENT,
            SyntaxKind::PublicKeyword => ModifierFlags::PUBLIC,
            SyntaxKind::PrivateKeyword => ModifierFlags::PRIVATE,
            SyntaxKind::ProtectedKeyword => ModifierFlags::PROTECTED,
            SyntaxKind::StaticKeyword => ModifierFlags::STATIC,
            SyntaxKind::ReadonlyKeyword => ModifierFlags::READONLY,
            SyntaxKind::AccessorKeyword => ModifierFlags::ACCESSOR,
            SyntaxKind::AbstractKeyword => ModifierFlags::ABSTRACT,
            SyntaxKind::AsyncKeyword => ModifierFlags::ASYNC,
            SyntaxKind::DefaultKeyword => ModifierFlags::DEFAULT,
            SyntaxKind::ConstKeyword => ModifierFlags::CONST,
            SyntaxKind::OverrideKeyword => ModifierFlags::OVERRIDE,
            _ => ModifierFlags::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind;

    #[test]
    fn test_modifier_flags_from_kind() {
        let flags = ModifierFlags::from_modifier_kind(SyntaxKind::ExportKeyword)
            | ModifierFlags::from_modifier_kind(SyntaxKind::DeclareKeyword);
        assert!(flags.contains(ModifierFlags::EXPORT));
        assert!(flags.contains(ModifierFlags::AMBIENT));
        assert!(!flags.intersects(ModifierFlags::ACCESSIBILITY_MODIFIER));
        assert_eq!(ModifierFlags::from_modifier_kind(SyntaxKind::Identifier), ModifierFlags::NONE);
    }

    #[test]
    fn test_block_scoped() {
        assert!(NodeFlags::BLOCK_SCOPED.contains(NodeFlags::CONST));
        assert!(!NodeFlags::MULTI_LINE.intersects(NodeFlags::BLOCK_SCOPED));
    }
}
