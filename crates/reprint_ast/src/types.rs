//! Flag types and file classification for the syntax tree.

bitflags::bitflags! {
    /// Flags for syntax nodes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u32 {
        const NONE                  = 0;
        const LET                   = 1 << 0;
        const CONST                 = 1 << 1;
        const USING                 = 1 << 2;
        const AWAIT_USING           = 1 << 3;
        /// Inner part of a dotted `namespace A.B` name.
        const NESTED_NAMESPACE      = 1 << 4;
        /// `namespace X {}` as opposed to `module X {}`.
        const NAMESPACE             = 1 << 5;
        /// `declare global {}`.
        const GLOBAL_AUGMENTATION   = 1 << 6;
        const OPTIONAL_CHAIN        = 1 << 7;
        /// Set on nodes the parser had to synthesize while recovering.
        const THIS_NODE_HAS_ERROR   = 1 << 8;

        const BLOCK_SCOPED = Self::LET.bits() | Self::CONST.bits() | Self::USING.bits() | Self::AWAIT_USING.bits();
    }
}

bitflags::bitflags! {
    /// Flags the scanner attaches to the current token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u32 {
        const NONE                  = 0;
        const PRECEDING_LINE_BREAK  = 1 << 0;
        const UNTERMINATED          = 1 << 1;
        const EXTENDED_UNICODE_ESCAPE = 1 << 2;
        const SCIENTIFIC            = 1 << 3;
        const HEX_SPECIFIER         = 1 << 4;
        const BINARY_SPECIFIER      = 1 << 5;
        const OCTAL_SPECIFIER       = 1 << 6;
        const CONTAINS_SEPARATOR    = 1 << 7;
    }
}

/// Language variant (standard vs JSX).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageVariant {
    Standard,
    JSX,
}

/// The kind of script, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    JS,
    JSX,
    TS,
    TSX,
}

impl ScriptKind {
    pub fn from_file_name(file_name: &str) -> Self {
        let lower = file_name.to_ascii_lowercase();
        if lower.ends_with(".tsx") {
            ScriptKind::TSX
        } else if lower.ends_with(".jsx") {
            ScriptKind::JSX
        } else if lower.ends_with(".js") || lower.ends_with(".mjs") || lower.ends_with(".cjs") {
            ScriptKind::JS
        } else {
            ScriptKind::TS
        }
    }

    pub fn language_variant(self) -> LanguageVariant {
        match self {
            ScriptKind::TSX | ScriptKind::JSX => LanguageVariant::JSX,
            ScriptKind::JS | ScriptKind::TS => LanguageVariant::Standard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_kind_from_file_name() {
        assert_eq!(ScriptKind::from_file_name("a.ts"), ScriptKind::TS);
        assert_eq!(ScriptKind::from_file_name("a.d.ts"), ScriptKind::TS);
        assert_eq!(ScriptKind::from_file_name("a.TSX"), ScriptKind::TSX);
        assert_eq!(ScriptKind::from_file_name("a.mjs"), ScriptKind::JS);
        assert_eq!(ScriptKind::TSX.language_variant(), LanguageVariant::JSX);
    }

    #[test]
    fn test_block_scoped_flags() {
        assert!(NodeFlags::BLOCK_SCOPED.contains(NodeFlags::LET));
        assert!(!NodeFlags::BLOCK_SCOPED.contains(NodeFlags::NAMESPACE));
    }
}
