//! The tokenizer.
//!
//! Works directly on byte offsets into the UTF-8 text so that every
//! position it reports can index the source buffer. Besides the token start
//! it tracks the *full start* of each token, the end of the previous token,
//! which the parser uses as the full start of nodes.

use crate::chars::*;
use crate::comments::{multi_line_comment_end, shebang_end, skip_conflict_marker};
use reprint_ast::syntax_kind::SyntaxKind;
use reprint_ast::types::TokenFlags;
use reprint_core::text::{TextPos, TextSpan};
use reprint_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};

/// Saved scanner state for lookahead.
#[derive(Debug, Clone)]
pub struct ScannerState {
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: TokenFlags,
    diagnostic_count: usize,
}

pub struct Scanner<'a> {
    text: &'a str,
    /// Current position (end of the current token).
    pos: usize,
    /// End of the previous token; start of the current token's trivia.
    full_start: usize,
    /// Start of the current token (after leading trivia).
    token_start: usize,
    token: SyntaxKind,
    /// Identifier name, cooked string/template value, or raw literal text.
    token_value: String,
    token_flags: TokenFlags,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: TokenFlags::NONE,
            diagnostics: Vec::new(),
        }
    }

    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// The raw source text of the current token.
    #[inline]
    pub fn token_text(&self) -> &'a str {
        &self.text[self.token_start..self.pos]
    }

    #[inline]
    pub fn full_start(&self) -> TextPos {
        self.full_start as TextPos
    }

    #[inline]
    pub fn token_start(&self) -> TextPos {
        self.token_start as TextPos
    }

    #[inline]
    pub fn token_end(&self) -> TextPos {
        self.pos as TextPos
    }

    #[inline]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    #[inline]
    pub fn is_unterminated(&self) -> bool {
        self.token_flags.contains(TokenFlags::UNTERMINATED)
    }

    /// Whether the current identifier or keyword was written with unicode
    /// escapes, which keeps it from acting as a keyword.
    #[inline]
    pub fn has_extended_unicode_escape(&self) -> bool {
        self.token_flags.contains(TokenFlags::EXTENDED_UNICODE_ESCAPE)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take the accumulated diagnostics, leaving none behind.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        let mut collection = DiagnosticCollection::new();
        for diagnostic in self.diagnostics.drain(..) {
            collection.add(diagnostic);
        }
        collection
    }

    pub fn save_state(&self) -> ScannerState {
        ScannerState {
            pos: self.pos,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
            diagnostic_count: self.diagnostics.len(),
        }
    }

    /// Restore a saved state. Diagnostics reported since the save are
    /// dropped along with the tokens that produced them.
    pub fn restore_state(&mut self, state: ScannerState) {
        self.pos = state.pos;
        self.full_start = state.full_start;
        self.token_start = state.token_start;
        self.token = state.token;
        self.token_value = state.token_value;
        self.token_flags = state.token_flags;
        self.diagnostics.truncate(state.diagnostic_count);
    }

    /// Run `f` and rewind the scanner afterwards.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.save_state();
        let result = f(self);
        self.restore_state(state);
        result
    }

    fn error(&mut self, message: &DiagnosticMessage, start: usize, length: usize) {
        let mut diagnostic = Diagnostic::new(message, &[]);
        diagnostic.span = Some(TextSpan::new(start as TextPos, length as TextPos));
        self.diagnostics.push(diagnostic);
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn current_char(&self) -> Option<char> {
        char_at(self.text, self.pos)
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.text.as_bytes().get(pos).copied()
    }

    /// The byte `offset` bytes past the current position.
    #[inline]
    fn peek(&self, offset: usize) -> Option<u8> {
        self.byte_at(self.pos + offset)
    }

    /// Skip whitespace and comments, recording line breaks in the token flags.
    fn skip_trivia(&mut self) {
        if self.pos == 0 {
            if let Some(end) = shebang_end(self.text) {
                self.pos = end as usize;
            }
        }
        while let Some(ch) = self.current_char() {
            match ch {
                c if is_line_break(c) => {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += line_break_len(self.text, self.pos);
                }
                c if is_white_space_single_line(c) => self.pos += c.len_utf8(),
                '/' if self.peek(1) == Some(b'/') => {
                    self.pos = line_end(self.text, self.pos + 2);
                }
                '/' if self.peek(1) == Some(b'*') => {
                    let start = self.pos;
                    let end = multi_line_comment_end(self.text, start);
                    if end - start < 4 || !self.text[start..end].ends_with("*/") {
                        self.error(&messages::ASTERISK_SLASH_EXPECTED, end, 0);
                    }
                    if self.text[start..end].contains(&['\n', '\r', '\u{2028}', '\u{2029}'][..]) {
                        self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    }
                    self.pos = end;
                }
                '<' | '=' | '>' | '|' if is_conflict_marker_trivia(self.text, self.pos) => {
                    self.error(
                        &messages::MERGE_CONFLICT_MARKER_ENCOUNTERED,
                        self.pos,
                        MERGE_CONFLICT_MARKER_LENGTH,
                    );
                    self.pos = skip_conflict_marker(self.text, self.pos);
                }
                _ => return,
            }
        }
    }

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();

        self.skip_trivia();
        self.token_start = self.pos;

        let Some(ch) = self.current_char() else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match ch {
            '(' => self.single(SyntaxKind::OpenParenToken),
            ')' => self.single(SyntaxKind::CloseParenToken),
            '{' => self.single(SyntaxKind::OpenBraceToken),
            '}' => self.single(SyntaxKind::CloseBraceToken),
            '[' => self.single(SyntaxKind::OpenBracketToken),
            ']' => self.single(SyntaxKind::CloseBracketToken),
            ';' => self.single(SyntaxKind::SemicolonToken),
            ',' => self.single(SyntaxKind::CommaToken),
            '~' => self.single(SyntaxKind::TildeToken),
            '@' => self.single(SyntaxKind::AtToken),
            ':' => self.single(SyntaxKind::ColonToken),
            // A single `>`; the parser rescans for `>=`, `>>` and friends
            // outside type argument lists.
            '>' => self.single(SyntaxKind::GreaterThanToken),

            '.' => self.scan_dot(),
            '?' => self.scan_question(),
            '<' => self.scan_operator(
                SyntaxKind::LessThanToken,
                SyntaxKind::LessThanEqualsToken,
                Some((SyntaxKind::LessThanLessThanToken, SyntaxKind::LessThanLessThanEqualsToken)),
            ),
            '=' => self.scan_equals(),
            '!' => self.scan_exclamation(),
            '+' => self.scan_doubled(SyntaxKind::PlusToken, SyntaxKind::PlusEqualsToken, SyntaxKind::PlusPlusToken),
            '-' => self.scan_doubled(SyntaxKind::MinusToken, SyntaxKind::MinusEqualsToken, SyntaxKind::MinusMinusToken),
            '*' => self.scan_operator(
                SyntaxKind::AsteriskToken,
                SyntaxKind::AsteriskEqualsToken,
                Some((SyntaxKind::AsteriskAsteriskToken, SyntaxKind::AsteriskAsteriskEqualsToken)),
            ),
            '/' => self.scan_operator(SyntaxKind::SlashToken, SyntaxKind::SlashEqualsToken, None),
            '%' => self.scan_operator(SyntaxKind::PercentToken, SyntaxKind::PercentEqualsToken, None),
            '^' => self.scan_operator(SyntaxKind::CaretToken, SyntaxKind::CaretEqualsToken, None),
            '&' => self.scan_operator(
                SyntaxKind::AmpersandToken,
                SyntaxKind::AmpersandEqualsToken,
                Some((SyntaxKind::AmpersandAmpersandToken, SyntaxKind::AmpersandAmpersandEqualsToken)),
            ),
            '|' => self.scan_operator(
                SyntaxKind::BarToken,
                SyntaxKind::BarEqualsToken,
                Some((SyntaxKind::BarBarToken, SyntaxKind::BarBarEqualsToken)),
            ),

            '\'' | '"' => self.scan_string_literal(ch),
            '`' => {
                self.pos += 1;
                self.scan_template_rest(false)
            }
            '#' => self.scan_hash(),

            '0'..='9' => self.scan_number(),

            '\\' => self.scan_identifier(),
            c if is_identifier_start(c) => self.scan_identifier(),

            c => {
                self.pos += c.len_utf8();
                self.error(&messages::INVALID_CHARACTER, self.token_start, c.len_utf8());
                SyntaxKind::Unknown
            }
        };

        self.token
    }

    // ========================================================================
    // Punctuation
    // ========================================================================

    #[inline]
    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    /// `x`, `x=`, and when `doubled` is given `xx` and `xx=`.
    fn scan_operator(
        &mut self,
        plain: SyntaxKind,
        equals: SyntaxKind,
        doubled: Option<(SyntaxKind, SyntaxKind)>,
    ) -> SyntaxKind {
        let ch = self.peek(0);
        if let Some((twice, twice_equals)) = doubled {
            if self.peek(1) == ch {
                if self.peek(2) == Some(b'=') {
                    self.pos += 3;
                    return twice_equals;
                }
                self.pos += 2;
                return twice;
            }
        }
        if self.peek(1) == Some(b'=') {
            self.pos += 2;
            return equals;
        }
        self.pos += 1;
        plain
    }

    /// `+`, `+=`, `++` (and the same for `-`).
    fn scan_doubled(&mut self, plain: SyntaxKind, equals: SyntaxKind, twice: SyntaxKind) -> SyntaxKind {
        if self.peek(1) == self.peek(0) {
            self.pos += 2;
            twice
        } else if self.peek(1) == Some(b'=') {
            self.pos += 2;
            equals
        } else {
            self.pos += 1;
            plain
        }
    }

    fn scan_dot(&mut self) -> SyntaxKind {
        if self.peek(1) == Some(b'.') && self.peek(2) == Some(b'.') {
            self.pos += 3;
            SyntaxKind::DotDotDotToken
        } else if self.peek(1).is_some_and(|b| b.is_ascii_digit()) {
            self.scan_number()
        } else {
            self.pos += 1;
            SyntaxKind::DotToken
        }
    }

    fn scan_question(&mut self) -> SyntaxKind {
        if self.peek(1) == Some(b'?') {
            if self.peek(2) == Some(b'=') {
                self.pos += 3;
                SyntaxKind::QuestionQuestionEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::QuestionQuestionToken
            }
        } else if self.peek(1) == Some(b'.') && !self.peek(2).is_some_and(|b| b.is_ascii_digit()) {
            // `a?.5:b` is a conditional, not an optional chain.
            self.pos += 2;
            SyntaxKind::QuestionDotToken
        } else {
            self.pos += 1;
            SyntaxKind::QuestionToken
        }
    }

    fn scan_equals(&mut self) -> SyntaxKind {
        match (self.peek(1), self.peek(2)) {
            (Some(b'='), Some(b'=')) => {
                self.pos += 3;
                SyntaxKind::EqualsEqualsEqualsToken
            }
            (Some(b'='), _) => {
                self.pos += 2;
                SyntaxKind::EqualsEqualsToken
            }
            (Some(b'>'), _) => {
                self.pos += 2;
                SyntaxKind::EqualsGreaterThanToken
            }
            _ => {
                self.pos += 1;
                SyntaxKind::EqualsToken
            }
        }
    }

    fn scan_exclamation(&mut self) -> SyntaxKind {
        match (self.peek(1), self.peek(2)) {
            (Some(b'='), Some(b'=')) => {
                self.pos += 3;
                SyntaxKind::ExclamationEqualsEqualsToken
            }
            (Some(b'='), _) => {
                self.pos += 2;
                SyntaxKind::ExclamationEqualsToken
            }
            _ => {
                self.pos += 1;
                SyntaxKind::ExclamationToken
            }
        }
    }

    fn scan_hash(&mut self) -> SyntaxKind {
        self.pos += 1;
        match self.current_char() {
            Some(c) if is_identifier_start(c) || c == '\\' => {
                self.scan_identifier_parts();
                self.token_value.insert(0, '#');
                SyntaxKind::PrivateIdentifier
            }
            _ => SyntaxKind::HashToken,
        }
    }

    // ========================================================================
    // Rescanning
    // ========================================================================

    /// Rescan `>` as `>=`, `>>`, `>>=`, `>>>` or `>>>=`.
    pub fn rescan_greater_than_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::GreaterThanToken {
            return self.token;
        }
        self.token = match (self.peek(0), self.peek(1), self.peek(2)) {
            (Some(b'>'), Some(b'>'), Some(b'=')) => {
                self.pos += 3;
                SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
            }
            (Some(b'>'), Some(b'>'), _) => {
                self.pos += 2;
                SyntaxKind::GreaterThanGreaterThanGreaterThanToken
            }
            (Some(b'>'), Some(b'='), _) => {
                self.pos += 2;
                SyntaxKind::GreaterThanGreaterThanEqualsToken
            }
            (Some(b'>'), _, _) => {
                self.pos += 1;
                SyntaxKind::GreaterThanGreaterThanToken
            }
            (Some(b'='), _, _) => {
                self.pos += 1;
                SyntaxKind::GreaterThanEqualsToken
            }
            _ => SyntaxKind::GreaterThanToken,
        };
        self.token
    }

    /// Rescan the current `/` or `/=` token as a regular expression literal.
    pub fn rescan_slash_token(&mut self) -> SyntaxKind {
        if !matches!(self.token, SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken) {
            return self.token;
        }
        self.pos = self.token_start + 1;
        let mut in_character_class = false;
        loop {
            let Some(ch) = self.current_char() else {
                self.unterminated_regex();
                break;
            };
            if is_line_break(ch) {
                self.unterminated_regex();
                break;
            }
            self.pos += ch.len_utf8();
            match ch {
                '\\' => {
                    if let Some(next) = self.current_char() {
                        if !is_line_break(next) {
                            self.pos += next.len_utf8();
                        }
                    }
                }
                '[' => in_character_class = true,
                ']' => in_character_class = false,
                '/' if !in_character_class => {
                    while let Some(flag) = self.current_char().filter(|&c| is_identifier_part(c)) {
                        self.pos += flag.len_utf8();
                    }
                    break;
                }
                _ => {}
            }
        }
        self.token_value = self.token_text().to_string();
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }

    fn unterminated_regex(&mut self) {
        self.token_flags |= TokenFlags::UNTERMINATED;
        self.error(
            &messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
            self.token_start,
            self.pos - self.token_start,
        );
    }

    /// Rescan the current `}` as the start of a template middle or tail.
    /// The resulting token begins at the `}`.
    pub fn rescan_template_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::CloseBraceToken {
            return self.token;
        }
        self.pos = self.token_start + 1;
        self.token_value.clear();
        self.token = self.scan_template_rest(true);
        self.token
    }

    // ========================================================================
    // Literals
    // ========================================================================

    fn scan_string_literal(&mut self, quote: char) -> SyntaxKind {
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(ch) = self.current_char() else {
                self.unterminated(&messages::UNTERMINATED_STRING_LITERAL);
                break;
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if ch == '\\' {
                self.scan_escape_sequence(&mut value);
                continue;
            }
            if ch == '\n' || ch == '\r' {
                self.unterminated(&messages::UNTERMINATED_STRING_LITERAL);
                break;
            }
            value.push(ch);
            self.pos += ch.len_utf8();
        }
        self.token_value = value;
        SyntaxKind::StringLiteral
    }

    fn unterminated(&mut self, message: &DiagnosticMessage) {
        self.token_flags |= TokenFlags::UNTERMINATED;
        self.error(message, self.token_start, self.pos - self.token_start);
    }

    /// Scan template text after the opening backtick or `}`.
    fn scan_template_rest(&mut self, after_substitution: bool) -> SyntaxKind {
        let mut value = String::new();
        let kind = loop {
            let Some(ch) = self.current_char() else {
                self.unterminated(&messages::UNTERMINATED_TEMPLATE_LITERAL);
                break if after_substitution {
                    SyntaxKind::TemplateTail
                } else {
                    SyntaxKind::NoSubstitutionTemplateLiteral
                };
            };
            match ch {
                '`' => {
                    self.pos += 1;
                    break if after_substitution {
                        SyntaxKind::TemplateTail
                    } else {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    };
                }
                '$' if self.peek(1) == Some(b'{') => {
                    self.pos += 2;
                    break if after_substitution {
                        SyntaxKind::TemplateMiddle
                    } else {
                        SyntaxKind::TemplateHead
                    };
                }
                '\\' => self.scan_escape_sequence(&mut value),
                '\r' => {
                    // Template values normalize line endings to `\n`.
                    self.pos += line_break_len(self.text, self.pos);
                    value.push('\n');
                }
                _ => {
                    value.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        };
        self.token_value = value;
        kind
    }

    /// Cook one escape sequence starting at the backslash.
    fn scan_escape_sequence(&mut self, value: &mut String) {
        let start = self.pos;
        self.pos += 1;
        let Some(ch) = self.current_char() else {
            return;
        };
        self.pos += ch.len_utf8();
        match ch {
            'n' => value.push('\n'),
            'r' => value.push('\r'),
            't' => value.push('\t'),
            'b' => value.push('\u{0008}'),
            'f' => value.push('\u{000C}'),
            'v' => value.push('\u{000B}'),
            '0' if !self.peek(0).is_some_and(|b| b.is_ascii_digit()) => value.push('\0'),
            'x' => match self.scan_hex_value(2, 2) {
                Some(code) => value.extend(char::from_u32(code)),
                None => self.error(&messages::HEXADECIMAL_DIGIT_EXPECTED, start, self.pos - start),
            },
            'u' => match self.scan_unicode_escape_value() {
                Some(decoded) => value.push(decoded),
                None => self.error(&messages::HEXADECIMAL_DIGIT_EXPECTED, start, self.pos - start),
            },
            // Line continuation contributes nothing to the value.
            '\r' => {
                if self.peek(0) == Some(b'\n') {
                    self.pos += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => value.push(other),
        }
    }

    /// Read `min..=max` hex digits.
    fn scan_hex_value(&mut self, min: usize, max: usize) -> Option<u32> {
        let mut value = 0u32;
        let mut count = 0;
        while count < max {
            let Some(digit) = self.peek(0).and_then(|b| (b as char).to_digit(16)) else {
                break;
            };
            value = value.saturating_mul(16).saturating_add(digit);
            self.pos += 1;
            count += 1;
        }
        (count >= min).then_some(value)
    }

    /// The part of `\uXXXX` or `\u{X...}` after the `u`.
    fn scan_unicode_escape_value(&mut self) -> Option<char> {
        if self.peek(0) == Some(b'{') {
            self.pos += 1;
            let code = self.scan_hex_value(1, 6)?;
            if self.peek(0) != Some(b'}') {
                return None;
            }
            self.pos += 1;
            self.token_flags |= TokenFlags::EXTENDED_UNICODE_ESCAPE;
            char::from_u32(code)
        } else {
            let code = self.scan_hex_value(4, 4)?;
            char::from_u32(code)
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        if self.peek(0) == Some(b'0') {
            let radix = match self.peek(1) {
                Some(b'x' | b'X') => Some((16, TokenFlags::HEX_SPECIFIER)),
                Some(b'b' | b'B') => Some((2, TokenFlags::BINARY_SPECIFIER)),
                Some(b'o' | b'O') => Some((8, TokenFlags::OCTAL_SPECIFIER)),
                _ => None,
            };
            if let Some((radix, flag)) = radix {
                self.pos += 2;
                self.token_flags |= flag;
                if self.scan_digits(radix) == 0 {
                    let message = if radix == 16 {
                        &messages::HEXADECIMAL_DIGIT_EXPECTED
                    } else {
                        &messages::DIGIT_EXPECTED
                    };
                    self.error(message, self.pos, 0);
                }
                return self.finish_number(start);
            }
        }

        self.scan_digits(10);
        if self.peek(0) == Some(b'.') {
            self.pos += 1;
            self.scan_digits(10);
        }
        if matches!(self.peek(0), Some(b'e' | b'E')) {
            self.pos += 1;
            self.token_flags |= TokenFlags::SCIENTIFIC;
            if matches!(self.peek(0), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.scan_digits(10) == 0 {
                self.error(&messages::DIGIT_EXPECTED, self.pos, 0);
            }
        }
        self.finish_number(start)
    }

    fn finish_number(&mut self, start: usize) -> SyntaxKind {
        let kind = if self.peek(0) == Some(b'n') {
            self.pos += 1;
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };
        self.token_value = self.text[start..self.pos].to_string();
        kind
    }

    /// Scan digits of the given radix with `_` separators; returns how many
    /// digits were read.
    fn scan_digits(&mut self, radix: u32) -> usize {
        let mut count = 0;
        while let Some(b) = self.peek(0) {
            if b == b'_' {
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
            } else if (b as char).is_digit(radix) {
                count += 1;
            } else {
                break;
            }
            self.pos += 1;
        }
        count
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    fn scan_identifier(&mut self) -> SyntaxKind {
        self.scan_identifier_parts();
        if self.token_value.is_empty() {
            // A lone backslash that did not start a unicode escape.
            if self.pos == self.token_start {
                self.pos += 1;
            }
            self.error(&messages::INVALID_CHARACTER, self.token_start, self.pos - self.token_start);
            return SyntaxKind::Unknown;
        }
        if !self.has_extended_unicode_escape() && !self.token_text().contains('\\') {
            if let Some(keyword) = SyntaxKind::from_keyword(&self.token_value) {
                return keyword;
            }
        }
        SyntaxKind::Identifier
    }

    /// Append identifier characters (decoding `\u` escapes) to `token_value`.
    fn scan_identifier_parts(&mut self) {
        while let Some(ch) = self.current_char() {
            let first = self.token_value.is_empty();
            if ch == '\\' {
                if self.peek(1) != Some(b'u') {
                    break;
                }
                let save = self.pos;
                self.pos += 2;
                match self.scan_unicode_escape_value() {
                    Some(decoded) if is_identifier_part(decoded) => self.token_value.push(decoded),
                    _ => {
                        self.pos = save;
                        break;
                    }
                }
                continue;
            }
            let accepted = if first { is_identifier_start(ch) } else { is_identifier_part(ch) };
            if !accepted {
                break;
            }
            self.token_value.push(ch);
            self.pos += ch.len_utf8();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<SyntaxKind> {
        let mut scanner = Scanner::new(text);
        let mut kinds = Vec::new();
        loop {
            let kind = scanner.scan();
            if kind == SyntaxKind::EndOfFileToken {
                return kinds;
            }
            kinds.push(kind);
        }
    }

    #[test]
    fn test_scan_punctuation() {
        assert_eq!(
            kinds("( ) { } [ ] ; , : ... ?. ?? ??="),
            vec![
                SyntaxKind::OpenParenToken,
                SyntaxKind::CloseParenToken,
                SyntaxKind::OpenBraceToken,
                SyntaxKind::CloseBraceToken,
                SyntaxKind::OpenBracketToken,
                SyntaxKind::CloseBracketToken,
                SyntaxKind::SemicolonToken,
                SyntaxKind::CommaToken,
                SyntaxKind::ColonToken,
                SyntaxKind::DotDotDotToken,
                SyntaxKind::QuestionDotToken,
                SyntaxKind::QuestionQuestionToken,
                SyntaxKind::QuestionQuestionEqualsToken,
            ]
        );
    }

    #[test]
    fn test_scan_operators() {
        assert_eq!(
            kinds("+ ++ += - -- -= * ** **= / /= && &&= || ||= << <<= === !== =>"),
            vec![
                SyntaxKind::PlusToken,
                SyntaxKind::PlusPlusToken,
                SyntaxKind::PlusEqualsToken,
                SyntaxKind::MinusToken,
                SyntaxKind::MinusMinusToken,
                SyntaxKind::MinusEqualsToken,
                SyntaxKind::AsteriskToken,
                SyntaxKind::AsteriskAsteriskToken,
                SyntaxKind::AsteriskAsteriskEqualsToken,
                SyntaxKind::SlashToken,
                SyntaxKind::SlashEqualsToken,
                SyntaxKind::AmpersandAmpersandToken,
                SyntaxKind::AmpersandAmpersandEqualsToken,
                SyntaxKind::BarBarToken,
                SyntaxKind::BarBarEqualsToken,
                SyntaxKind::LessThanLessThanToken,
                SyntaxKind::LessThanLessThanEqualsToken,
                SyntaxKind::EqualsEqualsEqualsToken,
                SyntaxKind::ExclamationEqualsEqualsToken,
                SyntaxKind::EqualsGreaterThanToken,
            ]
        );
    }

    #[test]
    fn test_full_start_and_token_start() {
        let mut scanner = Scanner::new("let  /* c */ x");
        assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
        assert_eq!((scanner.full_start(), scanner.token_start(), scanner.token_end()), (0, 0, 3));
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!((scanner.full_start(), scanner.token_start(), scanner.token_end()), (3, 13, 14));
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
        assert_eq!(scanner.token_start(), 14);
    }

    #[test]
    fn test_byte_offsets_after_multibyte_text() {
        let mut scanner = Scanner::new("'héllo' x");
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_end(), 8);
        assert_eq!(scanner.token_value(), "héllo");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_start(), 9);
    }

    #[test]
    fn test_string_escapes_are_cooked() {
        let mut scanner = Scanner::new(r#""a\n\x41B\u{43}\"""#);
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value(), "a\nABC\"");
        assert!(!scanner.is_unterminated());
    }

    #[test]
    fn test_unterminated_string() {
        let mut scanner = Scanner::new("'abc\nx");
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert!(scanner.is_unterminated());
        assert_eq!(scanner.token_end(), 4);
        assert_eq!(scanner.take_diagnostics().len(), 1);
    }

    #[test]
    fn test_numbers() {
        let mut scanner = Scanner::new("42 3.14 .5 1e-7 0xff 0b1010 0o777 1_000 42n");
        let expected = ["42", "3.14", ".5", "1e-7", "0xff", "0b1010", "0o777", "1_000"];
        for text in expected {
            assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
            assert_eq!(scanner.token_value(), text);
        }
        assert_eq!(scanner.scan(), SyntaxKind::BigIntLiteral);
        assert_eq!(scanner.token_value(), "42n");
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let mut scanner = Scanner::new("const type \\u0063onst $x _y");
        assert_eq!(scanner.scan(), SyntaxKind::ConstKeyword);
        assert_eq!(scanner.scan(), SyntaxKind::TypeKeyword);
        // Escaped keywords are plain identifiers.
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "const");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    }

    #[test]
    fn test_private_identifier() {
        let mut scanner = Scanner::new("#count # x");
        assert_eq!(scanner.scan(), SyntaxKind::PrivateIdentifier);
        assert_eq!(scanner.token_value(), "#count");
        assert_eq!(scanner.scan(), SyntaxKind::HashToken);
    }

    #[test]
    fn test_templates() {
        let mut scanner = Scanner::new("`a${b}c${d}e`");
        assert_eq!(scanner.scan(), SyntaxKind::TemplateHead);
        assert_eq!(scanner.token_value(), "a");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.rescan_template_token(), SyntaxKind::TemplateMiddle);
        assert_eq!(scanner.token_text(), "}c${");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.rescan_template_token(), SyntaxKind::TemplateTail);
        assert_eq!(scanner.token_value(), "e");
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_rescan_regex() {
        let mut scanner = Scanner::new("/[/]+\\//gi.x");
        assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
        assert_eq!(scanner.rescan_slash_token(), SyntaxKind::RegularExpressionLiteral);
        assert_eq!(scanner.token_text(), "/[/]+\\//gi");
        assert_eq!(scanner.scan(), SyntaxKind::DotToken);
    }

    #[test]
    fn test_rescan_greater_than() {
        let mut scanner = Scanner::new("a >>>= b");
        scanner.scan();
        assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
        assert_eq!(
            scanner.rescan_greater_than_token(),
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
        );
        assert_eq!(scanner.token_end(), 6);
    }

    #[test]
    fn test_trivia_flags_and_shebang() {
        let mut scanner = Scanner::new("#!/usr/bin/env node\n// c\nlet");
        assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
        assert!(scanner.has_preceding_line_break());
        assert_eq!(scanner.full_start(), 0);
        assert_eq!(scanner.token_start(), 25);
    }

    #[test]
    fn test_look_ahead_restores_state() {
        let mut scanner = Scanner::new("let x = 1;");
        scanner.scan();
        let next = scanner.look_ahead(|s| s.scan());
        assert_eq!(next, SyntaxKind::Identifier);
        assert_eq!(scanner.token(), SyntaxKind::LetKeyword);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    }

    #[test]
    fn test_invalid_character() {
        let mut scanner = Scanner::new("a ¤ b");
        scanner.scan();
        assert_eq!(scanner.scan(), SyntaxKind::Unknown);
        assert_eq!(scanner.token_text(), "¤");
        assert_eq!(scanner.diagnostics().len(), 1);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    }
}
