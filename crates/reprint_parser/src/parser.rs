//! The TypeScript parser implementation.
//!
//! A recursive descent parser over the scanner's token stream. Every node
//! records three offsets: `pos`, the full start (end of the previous token),
//! `start`, where its first token begins, and `end`, where its last token
//! ends. Lists record their interior range and whether a separator followed
//! the last element.

use bumpalo::Bump;
use reprint_ast::node::*;
use reprint_ast::syntax_kind::SyntaxKind;
use reprint_ast::types::*;
use reprint_core::text::{TextPos, TextSpan};
use reprint_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use reprint_scanner::{Scanner, ScannerState};
use tracing::debug;

use crate::precedence::{get_binary_operator_precedence, OperatorPrecedence};
use crate::utilities::{
    can_follow_modifier, can_start_statement, is_literal_property_name, is_start_of_expression,
};

/// Maximum recursion depth to prevent stack overflow on deeply nested input.
const MAX_RECURSION_DEPTH: u32 = 200;

/// Allocate a Vec into the arena as a slice.
///
/// Uses ManuallyDrop to prevent double-free on panic inside alloc_slice_fill_with.
fn alloc_vec_in<T>(arena: &Bump, vec: Vec<T>) -> &[T] {
    if vec.is_empty() {
        return &[];
    }
    let mut vec = std::mem::ManuallyDrop::new(vec);
    let len = vec.len();
    let ptr = vec.as_ptr();
    let slice = arena.alloc_slice_fill_with(len, |i| {
        // SAFETY: i < len, and each element is read exactly once. ManuallyDrop
        // keeps the Vec destructor from running on the moved-out elements.
        unsafe { std::ptr::read(ptr.add(i)) }
    });
    // SAFETY: every element has been moved into the arena.
    unsafe {
        vec.set_len(0);
        std::mem::ManuallyDrop::drop(&mut vec);
    }
    slice
}

/// The parsed file together with the syntax errors found in it.
#[derive(Debug)]
pub struct ParseResult<'a> {
    pub source_file: SourceFile<'a>,
    pub diagnostics: DiagnosticCollection,
}

/// Where modifiers are being parsed; decides which keywords count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModifierContext {
    Statement,
    ClassMember,
    Parameter,
    TypeMember,
    ObjectMember,
    TypeParameter,
}

/// Snapshot for lookahead and speculative parsing.
struct ParserState {
    scanner: ScannerState,
    prev_token_end: TextPos,
    diagnostic_count: usize,
    last_error_pos: Option<TextPos>,
}

/// The parser produces a SourceFile from TypeScript source text.
pub struct Parser<'a> {
    arena: &'a Bump,
    scanner: Scanner<'a>,
    file_name: String,
    text: &'a str,
    /// End of the most recently consumed token.
    prev_token_end: TextPos,
    diagnostics: Vec<Diagnostic>,
    last_error_pos: Option<TextPos>,
    /// Inside a generator body, where `yield` is an operator.
    in_generator: bool,
    /// In a `for` initializer, where `in` ends the expression.
    disallow_in: bool,
    /// In the `extends` clause of a conditional type.
    in_conditional_extends: bool,
    recursion_depth: u32,
}

impl<'a> Parser<'a> {
    pub fn new(arena: &'a Bump, file_name: &str, source_text: &str) -> Self {
        let text: &'a str = arena.alloc_str(source_text);
        Self {
            arena,
            scanner: Scanner::new(text),
            file_name: file_name.to_string(),
            text,
            prev_token_end: 0,
            diagnostics: Vec::new(),
            last_error_pos: None,
            in_generator: false,
            disallow_in: false,
            in_conditional_extends: false,
            recursion_depth: 0,
        }
    }

    /// Parse the whole file.
    pub fn parse(mut self) -> ParseResult<'a> {
        self.next_token();
        let first_token_start = self.scanner.token_start();

        let statements = self.parse_list_of_statements(|kind| kind == SyntaxKind::EndOfFileToken);
        let end = self.text.len() as TextPos;
        let end_of_file_token = Token::new(
            SyntaxKind::EndOfFileToken,
            self.scanner.full_start(),
            self.scanner.token_start(),
            end,
        );

        let script_kind = ScriptKind::from_file_name(&self.file_name);
        let source_file = SourceFile {
            data: NodeData::new(SyntaxKind::SourceFile, 0, first_token_start.min(end), end),
            statements,
            end_of_file_token,
            file_name: self.file_name.clone(),
            text: self.text,
            language_variant: script_kind.language_variant(),
            script_kind,
        };

        let mut diagnostics = DiagnosticCollection::new();
        for mut diagnostic in self.scanner.take_diagnostics().into_diagnostics() {
            diagnostic.file = Some(self.file_name.clone());
            diagnostics.add(diagnostic);
        }
        for diagnostic in self.diagnostics {
            diagnostics.add(diagnostic);
        }
        diagnostics.sort();

        ParseResult { source_file, diagnostics }
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    fn current_token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    #[inline]
    fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.token_end();
        self.scanner.scan()
    }

    /// Full start and trimmed start of the current token.
    #[inline]
    fn mark(&self) -> (TextPos, TextPos) {
        (self.scanner.full_start(), self.scanner.token_start())
    }

    /// Node data ending at the last consumed token. A node that consumed
    /// nothing collapses onto its full start.
    fn finish(&self, kind: SyntaxKind, pos: TextPos, start: TextPos) -> NodeData {
        let end = self.prev_token_end.max(pos);
        NodeData::new(kind, pos, start.min(end), end)
    }

    /// Node data for a node that starts with an already parsed child.
    fn finish_from(&self, kind: SyntaxKind, first: &NodeData) -> NodeData {
        self.finish(kind, first.range.pos, first.start)
    }

    /// A zero-width node at the current full start, for recovery.
    fn missing(&self, kind: SyntaxKind) -> NodeData {
        let pos = self.scanner.full_start();
        NodeData::new(kind, pos, pos, pos).with_flags(NodeFlags::THIS_NODE_HAS_ERROR)
    }

    #[inline]
    fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    #[inline]
    fn is_identifier(&self) -> bool {
        self.current_token().is_identifier_or_keyword_identifier()
    }

    /// Consume the current token as a `Token` node.
    fn parse_token_node(&mut self) -> Token {
        let token = Token::new(
            self.current_token(),
            self.scanner.full_start(),
            self.scanner.token_start(),
            self.scanner.token_end(),
        );
        self.next_token();
        token
    }

    fn optional_token(&mut self, kind: SyntaxKind) -> Option<Token> {
        if self.current_token() == kind {
            Some(self.parse_token_node())
        } else {
            None
        }
    }

    fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.current_token() == kind {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report `'kind' expected`.
    fn expect_token(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        let text = kind.token_text().unwrap_or("token");
        self.error(&messages::_0_EXPECTED, &[text]);
        false
    }

    /// Like `expect_token`, but returns the token; a zero-width token stands
    /// in when it is missing.
    fn expect_token_node(&mut self, kind: SyntaxKind) -> Token {
        if self.current_token() == kind {
            return self.parse_token_node();
        }
        let text = kind.token_text().unwrap_or("token");
        self.error(&messages::_0_EXPECTED, &[text]);
        Token { data: self.missing(kind) }
    }

    fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.current_token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.has_preceding_line_break()
    }

    /// Consume a `;`, or accept its automatic insertion.
    fn parse_expected_semicolon(&mut self) {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return;
        }
        if !self.can_parse_semicolon() {
            self.error(&messages::_0_EXPECTED, &[";"]);
        }
    }

    fn error(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        let start = self.scanner.token_start();
        let end = self.scanner.token_end();
        self.error_at(start, end, message, args);
    }

    fn error_at(&mut self, start: TextPos, end: TextPos, message: &DiagnosticMessage, args: &[&str]) {
        // One error per position; later ones are usually cascades.
        if self.last_error_pos == Some(start) {
            return;
        }
        self.last_error_pos = Some(start);
        let diagnostic = Diagnostic::with_location(
            self.file_name.clone(),
            TextSpan::from_bounds(start, end),
            message,
            args,
        );
        debug!(code = diagnostic.code, pos = start, "{}", diagnostic.message_text);
        self.diagnostics.push(diagnostic);
    }

    fn diagnostic_count(&self) -> usize {
        self.diagnostics.len() + self.scanner.diagnostics().len()
    }

    fn save_state(&self) -> ParserState {
        ParserState {
            scanner: self.scanner.save_state(),
            prev_token_end: self.prev_token_end,
            diagnostic_count: self.diagnostics.len(),
            last_error_pos: self.last_error_pos,
        }
    }

    fn restore_state(&mut self, state: ParserState) {
        self.scanner.restore_state(state.scanner);
        self.prev_token_end = state.prev_token_end;
        self.diagnostics.truncate(state.diagnostic_count);
        self.last_error_pos = state.last_error_pos;
    }

    /// Run `f` and rewind afterwards.
    fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.save_state();
        let result = f(self);
        self.restore_state(state);
        result
    }

    /// Run `f`; rewind if it returns `None`.
    fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let state = self.save_state();
        let result = f(self);
        if result.is_none() {
            self.restore_state(state);
        }
        result
    }

    /// Run `f` speculatively; keep the result only if it parsed cleanly.
    fn try_parse_clean<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let before = self.diagnostic_count();
        self.try_parse(|p| {
            // Errors must not be swallowed by the one-per-position rule here.
            p.last_error_pos = None;
            let result = f(p)?;
            (p.diagnostic_count() == before).then_some(result)
        })
    }

    fn next_token_is(&mut self, kind: SyntaxKind) -> bool {
        self.look_ahead(|p| p.next_token() == kind)
    }

    fn next_token_is_identifier_on_same_line(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break() && p.is_identifier()
        })
    }

    fn is_identifier_text(&self, text: &str) -> bool {
        self.is_identifier() && self.scanner.token_text() == text
    }

    fn alloc_str(&self, text: &str) -> &'a str {
        self.arena.alloc_str(text)
    }

    // ========================================================================
    // Lists
    // ========================================================================

    /// Parse `element (, element)* ,?` up to `closing`, which is not consumed.
    fn parse_delimited_list<T>(
        &mut self,
        closing: SyntaxKind,
        mut parse_element: impl FnMut(&mut Self) -> T,
    ) -> NodeArray<'a, T> {
        let pos = self.scanner.full_start();
        let mut elements = Vec::new();
        let mut has_trailing_comma = false;
        while !self.is_list_terminator(closing) {
            let before = self.scanner.token_start();
            elements.push(parse_element(self));
            if self.parse_optional(SyntaxKind::CommaToken) {
                if self.is_list_terminator(closing) {
                    has_trailing_comma = true;
                    break;
                }
                continue;
            }
            if self.is_list_terminator(closing) || self.scanner.token_start() == before {
                break;
            }
            self.error(&messages::_0_EXPECTED, &[","]);
            if !is_start_of_expression(self.current_token())
                && !matches!(self.current_token(), SyntaxKind::DotDotDotToken | SyntaxKind::OpenBraceToken)
            {
                break;
            }
        }
        let end = self.prev_token_end.max(pos);
        NodeArray::new(alloc_vec_in(self.arena, elements), pos, end, has_trailing_comma)
    }

    /// Parse `element (, element)*` with no closing token and no trailing comma.
    fn parse_comma_separated<T>(&mut self, mut parse_element: impl FnMut(&mut Self) -> T) -> NodeArray<'a, T> {
        let pos = self.scanner.full_start();
        let mut elements = vec![parse_element(self)];
        while self.parse_optional(SyntaxKind::CommaToken) {
            elements.push(parse_element(self));
        }
        let end = self.prev_token_end.max(pos);
        NodeArray::new(alloc_vec_in(self.arena, elements), pos, end, false)
    }

    fn is_list_terminator(&self, closing: SyntaxKind) -> bool {
        let token = self.current_token();
        token == closing || token == SyntaxKind::EndOfFileToken
    }

    /// Parse statements until `is_terminator` accepts the current token.
    fn parse_list_of_statements(&mut self, is_terminator: fn(SyntaxKind) -> bool) -> NodeArray<'a, Statement<'a>> {
        let pos = self.scanner.full_start();
        let mut statements = Vec::new();
        while !is_terminator(self.current_token()) && self.current_token() != SyntaxKind::EndOfFileToken {
            let before = self.scanner.token_start();
            let statement = self.parse_statement();
            statements.push(statement);
            if self.scanner.token_start() == before {
                statements.push(self.skip_to_next_statement());
            }
        }
        let end = self.prev_token_end.max(pos);
        NodeArray::new(alloc_vec_in(self.arena, statements), pos, end, false)
    }

    /// Error recovery: skip at least one token, then up to the next token
    /// that can start a statement. The skipped text becomes a
    /// `MissingDeclaration` so that its span stays in the tree.
    fn skip_to_next_statement(&mut self) -> Statement<'a> {
        let (pos, start) = self.mark();
        self.error(&messages::DECLARATION_OR_STATEMENT_EXPECTED, &[]);
        self.next_token();
        while self.current_token() != SyntaxKind::EndOfFileToken
            && self.current_token() != SyntaxKind::CloseBraceToken
            && !can_start_statement(self.current_token())
        {
            self.next_token();
        }
        Statement::MissingDeclaration(
            self.finish(SyntaxKind::MissingDeclaration, pos, start).with_flags(NodeFlags::THIS_NODE_HAS_ERROR),
        )
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_statement(&mut self) -> Statement<'a> {
        self.recursion_depth += 1;
        let statement = if self.recursion_depth > MAX_RECURSION_DEPTH {
            self.error(&messages::MAXIMUM_NESTING_DEPTH_EXCEEDED, &[]);
            Statement::MissingDeclaration(self.missing(SyntaxKind::MissingDeclaration))
        } else {
            self.parse_statement_worker()
        };
        self.recursion_depth -= 1;
        statement
    }

    fn parse_statement_worker(&mut self) -> Statement<'a> {
        match self.current_token() {
            SyntaxKind::SemicolonToken => {
                let (pos, start) = self.mark();
                self.next_token();
                Statement::EmptyStatement(self.finish(SyntaxKind::EmptyStatement, pos, start))
            }
            SyntaxKind::OpenBraceToken => Statement::Block(self.parse_block()),
            SyntaxKind::VarKeyword => self.parse_variable_statement_with_modifiers(None),
            SyntaxKind::LetKeyword if self.is_let_declaration() => self.parse_variable_statement_with_modifiers(None),
            SyntaxKind::UsingKeyword if self.next_token_is_identifier_on_same_line() => {
                self.parse_variable_statement_with_modifiers(None)
            }
            SyntaxKind::AwaitKeyword if self.is_await_using() => self.parse_variable_statement_with_modifiers(None),
            SyntaxKind::ConstKeyword if !self.next_token_is(SyntaxKind::EnumKeyword) => {
                self.parse_variable_statement_with_modifiers(None)
            }
            SyntaxKind::FunctionKeyword => {
                let (pos, start) = self.mark();
                self.parse_function_declaration(pos, start, None)
            }
            SyntaxKind::ClassKeyword => {
                let (pos, start) = self.mark();
                Statement::ClassDeclaration(self.parse_class_like(SyntaxKind::ClassDeclaration, pos, start, None))
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ContinueKeyword => self.parse_jump_statement(SyntaxKind::ContinueStatement),
            SyntaxKind::BreakKeyword => self.parse_jump_statement(SyntaxKind::BreakStatement),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::WithKeyword => self.parse_with_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::DebuggerKeyword => {
                let (pos, start) = self.mark();
                self.next_token();
                self.parse_expected_semicolon();
                Statement::DebuggerStatement(self.finish(SyntaxKind::DebuggerStatement, pos, start))
            }
            SyntaxKind::AtToken
            | SyntaxKind::ConstKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::ExportKeyword => self.parse_declaration(),
            SyntaxKind::ImportKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::TypeKeyword
            | SyntaxKind::ModuleKeyword
            | SyntaxKind::NamespaceKeyword
            | SyntaxKind::GlobalKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::AbstractKeyword
            | SyntaxKind::AsyncKeyword
            | SyntaxKind::AccessorKeyword
            | SyntaxKind::PublicKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::ProtectedKeyword
            | SyntaxKind::ReadonlyKeyword
            | SyntaxKind::StaticKeyword
            | SyntaxKind::OverrideKeyword
                if self.is_start_of_declaration() =>
            {
                self.parse_declaration()
            }
            _ if self.is_identifier() && self.next_token_is(SyntaxKind::ColonToken) => self.parse_labeled_statement(),
            token if is_start_of_expression(token) => self.parse_expression_statement(),
            _ => self.skip_to_next_statement(),
        }
    }

    /// `let` starts a declaration when followed by a binding name.
    fn is_let_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_identifier() || matches!(p.current_token(), SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken)
        })
    }

    /// `await using x` declares; `await using` alone is an expression.
    fn is_await_using(&mut self) -> bool {
        self.look_ahead(|p| {
            if p.next_token() != SyntaxKind::UsingKeyword || p.has_preceding_line_break() {
                return false;
            }
            p.next_token();
            !p.has_preceding_line_break() && p.is_identifier()
        })
    }

    /// Lookahead: do the modifiers/keywords at the current token lead to a
    /// declaration?
    fn is_start_of_declaration(&mut self) -> bool {
        self.look_ahead(|p| loop {
            match p.current_token() {
                SyntaxKind::VarKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::EnumKeyword
                | SyntaxKind::AtToken => return true,
                SyntaxKind::UsingKeyword => return p.next_token_is_identifier_on_same_line(),
                SyntaxKind::InterfaceKeyword | SyntaxKind::TypeKeyword => {
                    p.next_token();
                    return !p.has_preceding_line_break() && p.is_identifier();
                }
                SyntaxKind::ModuleKeyword | SyntaxKind::NamespaceKeyword => {
                    p.next_token();
                    return !p.has_preceding_line_break()
                        && (p.is_identifier() || p.current_token() == SyntaxKind::StringLiteral);
                }
                SyntaxKind::AbstractKeyword
                | SyntaxKind::AccessorKeyword
                | SyntaxKind::AsyncKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::PublicKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::StaticKeyword
                | SyntaxKind::OverrideKeyword => {
                    p.next_token();
                    if p.has_preceding_line_break() {
                        return false;
                    }
                }
                SyntaxKind::GlobalKeyword => {
                    p.next_token();
                    return matches!(
                        p.current_token(),
                        SyntaxKind::OpenBraceToken | SyntaxKind::Identifier | SyntaxKind::ExportKeyword
                    );
                }
                SyntaxKind::ImportKeyword => {
                    p.next_token();
                    return matches!(
                        p.current_token(),
                        SyntaxKind::StringLiteral | SyntaxKind::AsteriskToken | SyntaxKind::OpenBraceToken
                    ) || p.is_identifier();
                }
                SyntaxKind::ExportKeyword => {
                    p.next_token();
                    if matches!(
                        p.current_token(),
                        SyntaxKind::EqualsToken
                            | SyntaxKind::AsteriskToken
                            | SyntaxKind::OpenBraceToken
                            | SyntaxKind::DefaultKeyword
                            | SyntaxKind::AsKeyword
                            | SyntaxKind::TypeKeyword
                    ) {
                        return true;
                    }
                }
                _ => return false,
            }
        })
    }

    fn parse_block(&mut self) -> Block<'a> {
        let (pos, start) = self.mark();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let statements = self.parse_list_of_statements(|kind| kind == SyntaxKind::CloseBraceToken);
        self.expect_token(SyntaxKind::CloseBraceToken);
        let data = self.finish(SyntaxKind::Block, pos, start);
        let multi_line = self
            .text
            .get(data.trimmed().to_range())
            .is_some_and(|text| text.contains('\n'));
        Block { data, statements, multi_line }
    }

    fn parse_variable_statement_with_modifiers(&mut self, modifiers: Modifiers<'a>) -> Statement<'a> {
        let (pos, start) = self.statement_start(&modifiers);
        let declaration_list = self.parse_variable_declaration_list();
        self.parse_expected_semicolon();
        Statement::VariableStatement(VariableStatement {
            data: self.finish(SyntaxKind::VariableStatement, pos, start),
            modifiers,
            declaration_list,
        })
    }

    /// Full and trimmed start of a statement whose modifiers were already
    /// consumed.
    fn statement_start(&self, modifiers: &Modifiers<'a>) -> (TextPos, TextPos) {
        match modifiers.as_ref().and_then(|m| m.first()) {
            Some(first) => (first.pos(), first.start()),
            None => self.mark(),
        }
    }

    fn parse_variable_declaration_list(&mut self) -> VariableDeclarationList<'a> {
        let (pos, start) = self.mark();
        let flags = match self.current_token() {
            SyntaxKind::LetKeyword => NodeFlags::LET,
            SyntaxKind::ConstKeyword => NodeFlags::CONST,
            SyntaxKind::UsingKeyword => NodeFlags::USING,
            SyntaxKind::AwaitKeyword => {
                self.next_token();
                NodeFlags::AWAIT_USING
            }
            _ => NodeFlags::NONE,
        };
        self.next_token();

        let declarations = self.parse_comma_separated(|p| p.parse_variable_declaration());
        VariableDeclarationList {
            data: self.finish(SyntaxKind::VariableDeclarationList, pos, start).with_flags(flags),
            declarations,
        }
    }

    fn parse_variable_declaration(&mut self) -> VariableDeclaration<'a> {
        let (pos, start) = self.mark();
        let name = self.parse_binding_name();
        let exclamation_token = if !self.has_preceding_line_break() {
            self.optional_token(SyntaxKind::ExclamationToken)
        } else {
            None
        };
        let type_annotation = self.parse_type_annotation();
        let initializer = self.parse_initializer();
        VariableDeclaration {
            data: self.finish(SyntaxKind::VariableDeclaration, pos, start),
            name,
            exclamation_token,
            type_annotation,
            initializer,
        }
    }

    /// `: Type`, if present.
    fn parse_type_annotation(&mut self) -> Option<&'a TypeNode<'a>> {
        if self.parse_optional(SyntaxKind::ColonToken) {
            Some(self.parse_type_and_alloc())
        } else {
            None
        }
    }

    /// `= expr`, if present.
    fn parse_initializer(&mut self) -> Option<&'a Expression<'a>> {
        if self.parse_optional(SyntaxKind::EqualsToken) {
            Some(self.parse_assignment_expression_and_alloc())
        } else {
            None
        }
    }

    fn parse_expression_statement(&mut self) -> Statement<'a> {
        let (pos, start) = self.mark();
        let expression = self.parse_expression_and_alloc();
        self.parse_expected_semicolon();
        Statement::ExpressionStatement(ExpressionStatement {
            data: self.finish(SyntaxKind::ExpressionStatement, pos, start),
            expression,
        })
    }

    /// `( expr )` after `if`, `while`, `with` and `switch`.
    fn parse_parenthesized_condition(&mut self) -> &'a Expression<'a> {
        self.expect_token(SyntaxKind::OpenParenToken);
        let expression = self.parse_expression_and_alloc();
        self.expect_token(SyntaxKind::CloseParenToken);
        expression
    }

    fn parse_statement_and_alloc(&mut self) -> &'a Statement<'a> {
        let statement = self.parse_statement();
        self.arena.alloc(statement)
    }

    fn parse_if_statement(&mut self) -> Statement<'a> {
        let (pos, start) = self.mark();
        self.expect_token(SyntaxKind::IfKeyword);
        let expression = self.parse_parenthesized_condition();
        let then_statement = self.parse_statement_and_alloc();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            Some(self.parse_statement_and_alloc())
        } else {
            None
        };
        Statement::IfStatement(IfStatement {
            data: self.finish(SyntaxKind::IfStatement, pos, start),
            expression,
            then_statement,
            else_statement,
        })
    }

    fn parse_do_statement(&mut self) -> Statement<'a> {
        let (pos, start) = self.mark();
        self.expect_token(SyntaxKind::DoKeyword);
        let statement = self.parse_statement_and_alloc();
        self.expect_token(SyntaxKind::WhileKeyword);
        let expression = self.parse_parenthesized_condition();
        // A `;` after do-while is optional even on the same line.
        self.parse_optional(SyntaxKind::SemicolonToken);
        Statement::DoStatement(DoStatement {
            data: self.finish(SyntaxKind::DoStatement, pos, start),
            statement,
            expression,
        })
    }

    fn parse_while_statement(&mut self) -> Statement<'a> {
        let (pos, start) = self.mark();
        self.expect_token(SyntaxKind::WhileKeyword);
        let expression = self.parse_parenthesized_condition();
        let statement = self.parse_statement_and_alloc();
        Statement::WhileStatement(WhileStatement {
            data: self.finish(SyntaxKind::WhileStatement, pos, start),
            expression,
            statement,
        })
    }

    fn parse_with_statement(&mut self) -> Statement<'a> {
        let (pos, start) = self.mark();
        self.expect_token(SyntaxKind::WithKeyword);
        let expression = self.parse_parenthesized_condition();
        let statement = self.parse_statement_and_alloc();
        Statement::WithStatement(WithStatement {
            data: self.finish(SyntaxKind::WithStatement, pos, start),
            expression,
            statement,
        })
    }

    fn parse_for_statement(&mut self) -> Statement<'a> {
        let (pos, start) = self.mark();
        self.expect_token(SyntaxKind::ForKeyword);
        let await_modifier = self.optional_token(SyntaxKind::AwaitKeyword);
        self.expect_token(SyntaxKind::OpenParenToken);

        let saved_disallow_in = std::mem::replace(&mut self.disallow_in, true);
        let initializer = match self.current_token() {
            SyntaxKind::SemicolonToken => None,
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => Some(self.parse_for_declaration_list()),
            SyntaxKind::LetKeyword if self.is_let_declaration() => Some(self.parse_for_declaration_list()),
            SyntaxKind::UsingKeyword if self.next_token_is_identifier_on_same_line() => {
                Some(self.parse_for_declaration_list())
            }
            SyntaxKind::AwaitKeyword if self.is_await_using() => Some(self.parse_for_declaration_list()),
            _ => Some(ForInitializer::Expression(self.parse_expression_and_alloc())),
        };
        self.disallow_in = saved_disallow_in;

        match (initializer, self.current_token()) {
            (Some(initializer), SyntaxKind::OfKeyword) => {
                self.next_token();
                let expression = self.parse_assignment_expression_and_alloc();
                self.finish_for_in_or_of(SyntaxKind::ForOfStatement, pos, start, await_modifier, initializer, expression)
            }
            (Some(initializer), SyntaxKind::InKeyword) => {
                self.next_token();
                let expression = self.parse_expression_and_alloc();
                self.finish_for_in_or_of(SyntaxKind::ForInStatement, pos, start, await_modifier, initializer, expression)
            }
            (initializer, _) => {
                self.expect_token(SyntaxKind::SemicolonToken);
                let condition = if self.current_token() != SyntaxKind::SemicolonToken {
                    Some(self.parse_expression_and_alloc())
                } else {
                    None
                };
                self.expect_token(SyntaxKind::SemicolonToken);
                let incrementor = if self.current_token() != SyntaxKind::CloseParenToken {
                    Some(self.parse_expression_and_alloc())
                } else {
                    None
                };
                self.expect_token(SyntaxKind::CloseParenToken);
                let statement = self.parse_statement_and_alloc();
                Statement::ForStatement(ForStatement {
                    data: self.finish(SyntaxKind::ForStatement, pos, start),
                    initializer,
                    condition,
                    incrementor,
                    statement,
                })
            }
        }
    }

    fn finish_for_in_or_of(
        &mut self,
        kind: SyntaxKind,
        pos: TextPos,
        start: TextPos,
        await_modifier: Option<Token>,
        initializer: ForInitializer<'a>,
        expression: &'a Expression<'a>,
    ) -> Statement<'a> {
        self.expect_token(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement_and_alloc();
        let node = ForInOrOfStatement {
            data: self.finish(kind, pos, start),
            await_modifier,
            initializer,
            expression,
            statement,
        };
        if kind == SyntaxKind::ForOfStatement {
            Statement::ForOfStatement(node)
        } else {
            Statement::ForInStatement(node)
        }
    }

    fn parse_for_declaration_list(&mut self) -> ForInitializer<'a> {
        let list = self.parse_variable_declaration_list();
        ForInitializer::VariableDeclarationList(self.arena.alloc(list))
    }

    fn parse_jump_statement(&mut self, kind: SyntaxKind) -> Statement<'a> {
        let (pos, start) = self.mark();
        self.next_token();
        let label = if !self.can_parse_semicolon() && self.is_identifier() {
            Some(self.parse_identifier())
        } else {
            None
        };
        self.parse_expected_semicolon();
        let node = JumpStatement { data: self.finish(kind, pos, start), label };
        if kind == SyntaxKind::BreakStatement {
            Statement::BreakStatement(node)
        } else {
            Statement::ContinueStatement(node)
        }
    }

    fn parse_return_statement(&mut self) -> Statement<'a> {
        let (pos, start) = self.mark();
        self.expect_token(SyntaxKind::ReturnKeyword);
        let expression = if !self.can_parse_semicolon() {
            Some(self.parse_expression_and_alloc())
        } else {
            None
        };
        self.parse_expected_semicolon();
        Statement::ReturnStatement(ReturnStatement {
            data: self.finish(SyntaxKind::ReturnStatement, pos, start),
            expression,
        })
    }

    fn parse_throw_statement(&mut self) -> Statement<'a> {
        let (pos, start) = self.mark();
        self.expect_token(SyntaxKind::ThrowKeyword);
        let expression = self.parse_expression_and_alloc();
        self.parse_expected_semicolon();
        Statement::ThrowStatement(ThrowStatement {
            data: self.finish(SyntaxKind::ThrowStatement, pos, start),
            expression,
        })
    }

    fn parse_switch_statement(&mut self) -> Statement<'a> {
        let (pos, start) = self.mark();
        self.expect_token(SyntaxKind::SwitchKeyword);
        let expression = self.parse_parenthesized_condition();

        let (block_pos, block_start) = self.mark();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let clauses_pos = self.scanner.full_start();
        let mut clauses = Vec::new();
        while !self.is_list_terminator(SyntaxKind::CloseBraceToken) {
            match self.current_token() {
                SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword => clauses.push(self.parse_case_or_default_clause()),
                _ => {
                    self.error(&messages::CASE_OR_DEFAULT_EXPECTED, &[]);
                    break;
                }
            }
        }
        let clauses_end = self.prev_token_end.max(clauses_pos);
        self.expect_token(SyntaxKind::CloseBraceToken);
        let case_block = CaseBlock {
            data: self.finish(SyntaxKind::CaseBlock, block_pos, block_start),
            clauses: NodeArray::new(alloc_vec_in(self.arena, clauses), clauses_pos, clauses_end, false),
        };

        Statement::SwitchStatement(SwitchStatement {
            data: self.finish(SyntaxKind::SwitchStatement, pos, start),
            expression,
            case_block,
        })
    }

    fn parse_case_or_default_clause(&mut self) -> CaseOrDefaultClause<'a> {
        let (pos, start) = self.mark();
        let (kind, expression) = if self.parse_optional(SyntaxKind::CaseKeyword) {
            (SyntaxKind::CaseClause, Some(self.parse_expression_and_alloc()))
        } else {
            self.expect_token(SyntaxKind::DefaultKeyword);
            (SyntaxKind::DefaultClause, None)
        };
        self.expect_token(SyntaxKind::ColonToken);
        let statements = self.parse_list_of_statements(|kind| {
            matches!(kind, SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword | SyntaxKind::CloseBraceToken)
        });
        CaseOrDefaultClause {
            data: self.finish(kind, pos, start),
            expression,
            statements,
        }
    }

    fn parse_try_statement(&mut self) -> Statement<'a> {
        let (pos, start) = self.mark();
        self.expect_token(SyntaxKind::TryKeyword);
        let try_block = self.parse_block();

        let catch_clause = if self.current_token() == SyntaxKind::CatchKeyword {
            let (catch_pos, catch_start) = self.mark();
            self.next_token();
            let variable_declaration = if self.parse_optional(SyntaxKind::OpenParenToken) {
                let declaration = self.parse_variable_declaration();
                self.expect_token(SyntaxKind::CloseParenToken);
                Some(declaration)
            } else {
                None
            };
            let block = self.parse_block();
            Some(CatchClause {
                data: self.finish(SyntaxKind::CatchClause, catch_pos, catch_start),
                variable_declaration,
                block,
            })
        } else {
            None
        };

        let finally_block = if catch_clause.is_none() || self.current_token() == SyntaxKind::FinallyKeyword {
            self.expect_token(SyntaxKind::FinallyKeyword);
            Some(self.parse_block())
        } else {
            None
        };

        Statement::TryStatement(TryStatement {
            data: self.finish(SyntaxKind::TryStatement, pos, start),
            try_block,
            catch_clause,
            finally_block,
        })
    }

    fn parse_labeled_statement(&mut self) -> Statement<'a> {
        let (pos, start) = self.mark();
        let label = self.parse_identifier();
        self.expect_token(SyntaxKind::ColonToken);
        let statement = self.parse_statement_and_alloc();
        Statement::LabeledStatement(LabeledStatement {
            data: self.finish(SyntaxKind::LabeledStatement, pos, start),
            label,
            statement,
        })
    }

    // ========================================================================
    // Modifiers and decorators
    // ========================================================================

    fn is_modifier_in_context(kind: SyntaxKind, context: ModifierContext) -> bool {
        match context {
            ModifierContext::Statement => matches!(
                kind,
                SyntaxKind::ExportKeyword
                    | SyntaxKind::DefaultKeyword
                    | SyntaxKind::DeclareKeyword
                    | SyntaxKind::AbstractKeyword
                    | SyntaxKind::AsyncKeyword
                    | SyntaxKind::ConstKeyword
            ),
            ModifierContext::ClassMember => matches!(
                kind,
                SyntaxKind::PublicKeyword
                    | SyntaxKind::PrivateKeyword
                    | SyntaxKind::ProtectedKeyword
                    | SyntaxKind::StaticKeyword
                    | SyntaxKind::ReadonlyKeyword
                    | SyntaxKind::AbstractKeyword
                    | SyntaxKind::OverrideKeyword
                    | SyntaxKind::DeclareKeyword
                    | SyntaxKind::AccessorKeyword
                    | SyntaxKind::AsyncKeyword
            ),
            ModifierContext::Parameter => matches!(
                kind,
                SyntaxKind::PublicKeyword
                    | SyntaxKind::PrivateKeyword
                    | SyntaxKind::ProtectedKeyword
                    | SyntaxKind::ReadonlyKeyword
                    | SyntaxKind::OverrideKeyword
            ),
            ModifierContext::TypeMember => kind == SyntaxKind::ReadonlyKeyword,
            ModifierContext::ObjectMember => kind == SyntaxKind::AsyncKeyword,
            ModifierContext::TypeParameter => {
                matches!(kind, SyntaxKind::InKeyword | SyntaxKind::OutKeyword | SyntaxKind::ConstKeyword)
            }
        }
    }

    /// Lookahead: is the current modifier keyword really a modifier here,
    /// judged by the token after it?
    fn next_token_can_follow_modifier(&mut self, context: ModifierContext) -> bool {
        let modifier = self.current_token();
        if context == ModifierContext::Statement && modifier == SyntaxKind::DefaultKeyword {
            return self.next_token_can_follow_default();
        }
        self.look_ahead(|p| {
            p.next_token();
            let next = p.current_token();
            match (context, modifier) {
                (ModifierContext::Statement, SyntaxKind::ExportKeyword) => match next {
                    SyntaxKind::EqualsToken
                    | SyntaxKind::AsteriskToken
                    | SyntaxKind::OpenBraceToken
                    | SyntaxKind::AsKeyword => false,
                    SyntaxKind::TypeKeyword => !p.look_ahead(|q| {
                        matches!(q.next_token(), SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken)
                    }),
                    SyntaxKind::DefaultKeyword => p.next_token_can_follow_default(),
                    _ => next == SyntaxKind::AtToken || next == SyntaxKind::ImportKeyword || p.is_identifier()
                        || next.is_keyword(),
                },
                (ModifierContext::Statement, SyntaxKind::ConstKeyword) => next == SyntaxKind::EnumKeyword,
                (ModifierContext::Statement, SyntaxKind::AsyncKeyword) => {
                    next == SyntaxKind::FunctionKeyword && !p.has_preceding_line_break()
                }
                (ModifierContext::TypeParameter, _) => p.is_identifier() && !p.has_preceding_line_break(),
                (ModifierContext::ObjectMember, _) | (ModifierContext::ClassMember, SyntaxKind::AsyncKeyword) => {
                    !p.has_preceding_line_break()
                        && (can_follow_modifier(next) && next != SyntaxKind::AtToken)
                }
                (ModifierContext::ClassMember, SyntaxKind::StaticKeyword) => {
                    !p.has_preceding_line_break() && can_follow_modifier(next) && next != SyntaxKind::OpenBraceToken
                }
                (ModifierContext::Parameter, _) => {
                    !p.has_preceding_line_break()
                        && (p.is_identifier()
                            || matches!(next, SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken | SyntaxKind::ThisKeyword))
                }
                _ => !p.has_preceding_line_break() && can_follow_modifier(next),
            }
        })
    }

    /// After `export`, `default` is a modifier only before a declaration.
    fn next_token_can_follow_default(&mut self) -> bool {
        self.look_ahead(|p| {
            matches!(
                p.next_token(),
                SyntaxKind::ClassKeyword
                    | SyntaxKind::FunctionKeyword
                    | SyntaxKind::InterfaceKeyword
                    | SyntaxKind::AtToken
            ) || (p.current_token() == SyntaxKind::AbstractKeyword && p.next_token_is(SyntaxKind::ClassKeyword))
                || (p.current_token() == SyntaxKind::AsyncKeyword && p.next_token_is(SyntaxKind::FunctionKeyword))
        })
    }

    /// Parse decorators and modifier keywords in source order.
    fn parse_modifiers(&mut self, context: ModifierContext) -> Modifiers<'a> {
        let pos = self.scanner.full_start();
        let mut modifiers = Vec::new();
        loop {
            let token = self.current_token();
            if token == SyntaxKind::AtToken
                && matches!(
                    context,
                    ModifierContext::Statement | ModifierContext::ClassMember | ModifierContext::Parameter
                )
            {
                modifiers.push(ModifierLike::Decorator(self.parse_decorator()));
            } else if Self::is_modifier_in_context(token, context) && self.next_token_can_follow_modifier(context) {
                modifiers.push(ModifierLike::Modifier(self.parse_token_node()));
            } else {
                break;
            }
        }
        if modifiers.is_empty() {
            return None;
        }
        let end = self.prev_token_end;
        Some(NodeArray::new(alloc_vec_in(self.arena, modifiers), pos, end, false))
    }

    fn parse_decorator(&mut self) -> Decorator<'a> {
        let (pos, start) = self.mark();
        self.expect_token(SyntaxKind::AtToken);
        let expression = self.parse_left_hand_side_expression();
        Decorator {
            data: self.finish(SyntaxKind::Decorator, pos, start),
            expression: self.arena.alloc(expression),
        }
    }

    fn has_modifier(modifiers: &Modifiers<'a>, kind: SyntaxKind) -> bool {
        modifiers
            .as_ref()
            .is_some_and(|list| list.iter().any(|m| matches!(m, ModifierLike::Modifier(t) if t.kind() == kind)))
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn parse_declaration(&mut self) -> Statement<'a> {
        let modifiers = self.parse_modifiers(ModifierContext::Statement);
        let (pos, start) = self.statement_start(&modifiers);

        match self.current_token() {
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword | SyntaxKind::UsingKeyword => {
                self.parse_variable_statement_with_modifiers(modifiers)
            }
            SyntaxKind::AwaitKeyword if self.is_await_using() => self.parse_variable_statement_with_modifiers(modifiers),
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos, start, modifiers),
            SyntaxKind::ClassKeyword => {
                Statement::ClassDeclaration(self.parse_class_like(SyntaxKind::ClassDeclaration, pos, start, modifiers))
            }
            SyntaxKind::InterfaceKeyword => self.parse_interface_declaration(pos, start, modifiers),
            SyntaxKind::TypeKeyword => self.parse_type_alias_declaration(pos, start, modifiers),
            SyntaxKind::EnumKeyword => self.parse_enum_declaration(pos, start, modifiers),
            SyntaxKind::GlobalKeyword | SyntaxKind::ModuleKeyword | SyntaxKind::NamespaceKeyword => {
                Statement::ModuleDeclaration(self.parse_module_declaration(pos, start, modifiers))
            }
            SyntaxKind::ImportKeyword => self.parse_import_declaration_or_import_equals(pos, start, modifiers),
            SyntaxKind::ExportKeyword => self.parse_export_declaration_or_assignment(pos, start, modifiers),
            _ => {
                self.error(&messages::DECLARATION_OR_STATEMENT_EXPECTED, &[]);
                Statement::MissingDeclaration(
                    self.finish(SyntaxKind::MissingDeclaration, pos, start)
                        .with_flags(NodeFlags::THIS_NODE_HAS_ERROR),
                )
            }
        }
    }

    fn parse_function_declaration(&mut self, pos: TextPos, start: TextPos, modifiers: Modifiers<'a>) -> Statement<'a> {
        let function = self.parse_function_like(SyntaxKind::FunctionDeclaration, pos, start, modifiers);
        Statement::FunctionDeclaration(function)
    }

    /// Function declarations and expressions share one shape.
    fn parse_function_like(
        &mut self,
        kind: SyntaxKind,
        pos: TextPos,
        start: TextPos,
        modifiers: Modifiers<'a>,
    ) -> FunctionDeclaration<'a> {
        self.expect_token(SyntaxKind::FunctionKeyword);
        let asterisk_token = self.optional_token(SyntaxKind::AsteriskToken);
        let name = if self.is_identifier() { Some(self.parse_identifier()) } else { None };
        if name.is_none() && kind == SyntaxKind::FunctionDeclaration && !Self::has_modifier(&modifiers, SyntaxKind::DefaultKeyword) {
            self.error(&messages::IDENTIFIER_EXPECTED, &[]);
        }
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        let type_annotation = self.parse_return_type_annotation();

        let saved_generator = std::mem::replace(&mut self.in_generator, asterisk_token.is_some());
        let body = self.parse_function_body_or_semicolon(kind == SyntaxKind::FunctionDeclaration);
        self.in_generator = saved_generator;

        FunctionDeclaration {
            data: self.finish(kind, pos, start),
            modifiers,
            asterisk_token,
            name,
            type_parameters,
            parameters,
            type_annotation,
            body,
        }
    }

    /// A body block, or (for signatures without a body) an optional `;`.
    fn parse_function_body_or_semicolon(&mut self, allow_missing: bool) -> Option<Block<'a>> {
        if self.current_token() == SyntaxKind::OpenBraceToken {
            return Some(self.parse_function_block());
        }
        if allow_missing {
            self.parse_expected_semicolon();
        } else {
            self.error(&messages::_0_EXPECTED, &["{"]);
        }
        None
    }

    /// Function bodies reset the `in` restriction of an enclosing `for`.
    fn parse_function_block(&mut self) -> Block<'a> {
        let saved_disallow_in = std::mem::replace(&mut self.disallow_in, false);
        let block = self.parse_block();
        self.disallow_in = saved_disallow_in;
        block
    }

    /// `: Type` after a parameter list, where type predicates are allowed.
    fn parse_return_type_annotation(&mut self) -> Option<&'a TypeNode<'a>> {
        if self.parse_optional(SyntaxKind::ColonToken) {
            let type_node = self.parse_type_or_type_predicate();
            Some(self.arena.alloc(type_node))
        } else {
            None
        }
    }

    /// Classes: declarations and expressions.
    fn parse_class_like(
        &mut self,
        kind: SyntaxKind,
        pos: TextPos,
        start: TextPos,
        modifiers: Modifiers<'a>,
    ) -> ClassDeclaration<'a> {
        self.expect_token(SyntaxKind::ClassKeyword);
        let name = if self.is_identifier()
            && !matches!(self.current_token(), SyntaxKind::ImplementsKeyword | SyntaxKind::ExtendsKeyword)
        {
            Some(self.parse_identifier())
        } else {
            None
        };
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();

        self.expect_token(SyntaxKind::OpenBraceToken);
        let members_pos = self.scanner.full_start();
        let mut members = Vec::new();
        while !self.is_list_terminator(SyntaxKind::CloseBraceToken) {
            let before = self.scanner.token_start();
            if let Some(member) = self.parse_class_element() {
                members.push(member);
            }
            if self.scanner.token_start() == before {
                self.error(&messages::UNEXPECTED_TOKEN_A_CONSTRUCTOR_METHOD_ACCESSOR_OR_PROPERTY_WAS_EXPECTED, &[]);
                self.next_token();
            }
        }
        let members_end = self.prev_token_end.max(members_pos);
        self.expect_token(SyntaxKind::CloseBraceToken);

        ClassDeclaration {
            data: self.finish(kind, pos, start),
            modifiers,
            name,
            type_parameters,
            heritage_clauses,
            members: NodeArray::new(alloc_vec_in(self.arena, members), members_pos, members_end, false),
        }
    }

    fn parse_heritage_clauses(&mut self) -> Option<NodeArray<'a, HeritageClause<'a>>> {
        if !matches!(self.current_token(), SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword) {
            return None;
        }
        let pos = self.scanner.full_start();
        let mut clauses = Vec::new();
        while matches!(self.current_token(), SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword) {
            let (clause_pos, clause_start) = self.mark();
            let token = self.current_token();
            self.next_token();
            let types = self.parse_comma_separated(|p| p.parse_expression_with_type_arguments());
            clauses.push(HeritageClause {
                data: self.finish(SyntaxKind::HeritageClause, clause_pos, clause_start),
                token,
                types,
            });
        }
        let end = self.prev_token_end;
        Some(NodeArray::new(alloc_vec_in(self.arena, clauses), pos, end, false))
    }

    fn parse_expression_with_type_arguments(&mut self) -> ExpressionWithTypeArguments<'a> {
        let (pos, start) = self.mark();
        let expression = self.parse_left_hand_side_expression();
        let type_arguments = self.parse_type_arguments();
        ExpressionWithTypeArguments {
            data: self.finish(SyntaxKind::ExpressionWithTypeArguments, pos, start),
            expression: self.arena.alloc(expression),
            type_arguments,
        }
    }

    fn parse_class_element(&mut self) -> Option<ClassElement<'a>> {
        let (pos, start) = self.mark();
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return Some(ClassElement::SemicolonClassElement(
                self.finish(SyntaxKind::SemicolonClassElement, pos, start),
            ));
        }
        if self.current_token() == SyntaxKind::StaticKeyword && self.next_token_is(SyntaxKind::OpenBraceToken) {
            self.next_token();
            let body = self.parse_function_block();
            return Some(ClassElement::ClassStaticBlockDeclaration(ClassStaticBlockDeclaration {
                data: self.finish(SyntaxKind::ClassStaticBlockDeclaration, pos, start),
                body,
            }));
        }

        let modifiers = self.parse_modifiers(ModifierContext::ClassMember);

        if let Some(kind) = self.accessor_kind() {
            let accessor = self.parse_accessor(kind, pos, start, modifiers, ModifierContext::ClassMember);
            return Some(match kind {
                SyntaxKind::GetAccessor => ClassElement::GetAccessor(accessor),
                _ => ClassElement::SetAccessor(accessor),
            });
        }
        if self.is_identifier_text("constructor")
            && self.look_ahead(|p| matches!(p.next_token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken))
        {
            self.next_token();
            let parameters = self.parse_parameters();
            let body = self.parse_function_body_or_semicolon(true);
            return Some(ClassElement::Constructor(ConstructorDeclaration {
                data: self.finish(SyntaxKind::Constructor, pos, start),
                modifiers,
                parameters,
                body,
            }));
        }
        if self.is_index_signature() {
            return Some(ClassElement::IndexSignature(self.parse_index_signature(pos, start, modifiers)));
        }
        if is_literal_property_name(self.current_token())
            || matches!(self.current_token(), SyntaxKind::OpenBracketToken | SyntaxKind::AsteriskToken)
        {
            return Some(self.parse_property_or_method(pos, start, modifiers));
        }
        if modifiers.is_some() {
            // Modifiers with nothing after them: keep them in the tree as a
            // property with a missing name.
            self.error(&messages::IDENTIFIER_EXPECTED, &[]);
            let name = PropertyName::Identifier(self.missing_identifier());
            return Some(ClassElement::PropertyDeclaration(PropertyDeclaration {
                data: self.finish(SyntaxKind::PropertyDeclaration, pos, start).with_flags(NodeFlags::THIS_NODE_HAS_ERROR),
                modifiers,
                name,
                postfix_token: None,
                type_annotation: None,
                initializer: None,
            }));
        }
        None
    }

    /// `get`/`set` followed by a property name starts an accessor.
    fn accessor_kind(&mut self) -> Option<SyntaxKind> {
        let kind = match self.current_token() {
            SyntaxKind::GetKeyword => SyntaxKind::GetAccessor,
            SyntaxKind::SetKeyword => SyntaxKind::SetAccessor,
            _ => return None,
        };
        let is_accessor = self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break()
                && (is_literal_property_name(p.current_token()) || p.current_token() == SyntaxKind::OpenBracketToken)
        });
        is_accessor.then_some(kind)
    }

    fn parse_accessor(
        &mut self,
        kind: SyntaxKind,
        pos: TextPos,
        start: TextPos,
        modifiers: Modifiers<'a>,
        context: ModifierContext,
    ) -> AccessorDeclaration<'a> {
        self.next_token();
        let name = self.parse_property_name();
        let parameters = self.parse_parameters();
        let type_annotation = self.parse_return_type_annotation();
        let body = if self.current_token() == SyntaxKind::OpenBraceToken {
            Some(self.parse_function_block())
        } else {
            match context {
                ModifierContext::TypeMember => self.parse_type_member_separator(),
                ModifierContext::ObjectMember => self.error(&messages::_0_EXPECTED, &["{"]),
                _ => self.parse_expected_semicolon(),
            }
            None
        };
        AccessorDeclaration {
            data: self.finish(kind, pos, start),
            modifiers,
            name,
            parameters,
            type_annotation,
            body,
        }
    }

    fn parse_property_or_method(&mut self, pos: TextPos, start: TextPos, modifiers: Modifiers<'a>) -> ClassElement<'a> {
        let asterisk_token = self.optional_token(SyntaxKind::AsteriskToken);
        let name = self.parse_property_name();
        let question_token = self.optional_token(SyntaxKind::QuestionToken);

        if asterisk_token.is_some()
            || matches!(self.current_token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken)
        {
            let method = self.parse_method_rest(pos, start, modifiers, asterisk_token, name, question_token, true);
            return ClassElement::MethodDeclaration(method);
        }

        let postfix_token = match question_token {
            Some(token) => Some(token),
            None if !self.has_preceding_line_break() => self.optional_token(SyntaxKind::ExclamationToken),
            None => None,
        };
        let type_annotation = self.parse_type_annotation();
        let initializer = self.parse_initializer();
        self.parse_expected_semicolon();
        ClassElement::PropertyDeclaration(PropertyDeclaration {
            data: self.finish(SyntaxKind::PropertyDeclaration, pos, start),
            modifiers,
            name,
            postfix_token,
            type_annotation,
            initializer,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn parse_method_rest(
        &mut self,
        pos: TextPos,
        start: TextPos,
        modifiers: Modifiers<'a>,
        asterisk_token: Option<Token>,
        name: PropertyName<'a>,
        question_token: Option<Token>,
        allow_missing_body: bool,
    ) -> MethodDeclaration<'a> {
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        let type_annotation = self.parse_return_type_annotation();
        let saved_generator = std::mem::replace(&mut self.in_generator, asterisk_token.is_some());
        let body = self.parse_function_body_or_semicolon(allow_missing_body);
        self.in_generator = saved_generator;
        MethodDeclaration {
            data: self.finish(SyntaxKind::MethodDeclaration, pos, start),
            modifiers,
            asterisk_token,
            name,
            question_token,
            type_parameters,
            parameters,
            type_annotation,
            body,
        }
    }

    /// `[` starts an index signature when it holds `name:` or `...`.
    fn is_index_signature(&mut self) -> bool {
        if self.current_token() != SyntaxKind::OpenBracketToken {
            return false;
        }
        self.look_ahead(|p| {
            p.next_token();
            if matches!(p.current_token(), SyntaxKind::DotDotDotToken | SyntaxKind::CloseBracketToken) {
                return true;
            }
            if p.current_token().is_modifier_kind() {
                p.next_token();
                if p.is_identifier() {
                    return true;
                }
            } else if !p.is_identifier() {
                return false;
            } else {
                p.next_token();
            }
            matches!(
                p.current_token(),
                SyntaxKind::ColonToken | SyntaxKind::CommaToken
            ) || (p.current_token() == SyntaxKind::QuestionToken
                && matches!(p.next_token(), SyntaxKind::ColonToken | SyntaxKind::CommaToken | SyntaxKind::CloseBracketToken))
        })
    }

    fn parse_index_signature(&mut self, pos: TextPos, start: TextPos, modifiers: Modifiers<'a>) -> IndexSignatureDeclaration<'a> {
        self.expect_token(SyntaxKind::OpenBracketToken);
        let parameters = self.parse_delimited_list(SyntaxKind::CloseBracketToken, |p| p.parse_parameter());
        self.expect_token(SyntaxKind::CloseBracketToken);
        let type_annotation = self.parse_type_annotation();
        self.parse_type_member_separator();
        IndexSignatureDeclaration {
            data: self.finish(SyntaxKind::IndexSignature, pos, start),
            modifiers,
            parameters,
            type_annotation,
        }
    }

    /// Interface and type literal members end with `;`, `,` or a line break.
    fn parse_type_member_separator(&mut self) {
        if self.parse_optional(SyntaxKind::SemicolonToken) || self.parse_optional(SyntaxKind::CommaToken) {
            return;
        }
        if !self.can_parse_semicolon() {
            self.error(&messages::_0_EXPECTED, &[";"]);
        }
    }

    fn parse_interface_declaration(&mut self, pos: TextPos, start: TextPos, modifiers: Modifiers<'a>) -> Statement<'a> {
        self.expect_token(SyntaxKind::InterfaceKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        let members = self.parse_object_type_members();
        Statement::InterfaceDeclaration(InterfaceDeclaration {
            data: self.finish(SyntaxKind::InterfaceDeclaration, pos, start),
            modifiers,
            name,
            type_parameters,
            heritage_clauses,
            members,
        })
    }

    fn parse_type_alias_declaration(&mut self, pos: TextPos, start: TextPos, modifiers: Modifiers<'a>) -> Statement<'a> {
        self.expect_token(SyntaxKind::TypeKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        self.expect_token(SyntaxKind::EqualsToken);
        let type_node = self.parse_type_and_alloc();
        self.parse_expected_semicolon();
        Statement::TypeAliasDeclaration(TypeAliasDeclaration {
            data: self.finish(SyntaxKind::TypeAliasDeclaration, pos, start),
            modifiers,
            name,
            type_parameters,
            type_node,
        })
    }

    fn parse_enum_declaration(&mut self, pos: TextPos, start: TextPos, modifiers: Modifiers<'a>) -> Statement<'a> {
        self.expect_token(SyntaxKind::EnumKeyword);
        let name = self.parse_identifier();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let members = self.parse_delimited_list(SyntaxKind::CloseBraceToken, |p| {
            let (pos, start) = p.mark();
            let name = p.parse_property_name();
            let initializer = p.parse_initializer();
            EnumMember {
                data: p.finish(SyntaxKind::EnumMember, pos, start),
                name,
                initializer,
            }
        });
        self.expect_token(SyntaxKind::CloseBraceToken);
        Statement::EnumDeclaration(EnumDeclaration {
            data: self.finish(SyntaxKind::EnumDeclaration, pos, start),
            modifiers,
            name,
            members,
        })
    }

    fn parse_module_declaration(&mut self, pos: TextPos, start: TextPos, modifiers: Modifiers<'a>) -> ModuleDeclaration<'a> {
        let (flags, name) = match self.current_token() {
            SyntaxKind::GlobalKeyword => {
                let name = self.parse_identifier();
                (NodeFlags::GLOBAL_AUGMENTATION, ModuleName::Identifier(name))
            }
            SyntaxKind::NamespaceKeyword => {
                self.next_token();
                (NodeFlags::NAMESPACE, ModuleName::Identifier(self.parse_identifier()))
            }
            _ => {
                self.expect_token(SyntaxKind::ModuleKeyword);
                if self.current_token() == SyntaxKind::StringLiteral {
                    (NodeFlags::NONE, ModuleName::StringLiteral(self.parse_literal_expression()))
                } else {
                    (NodeFlags::NONE, ModuleName::Identifier(self.parse_identifier()))
                }
            }
        };
        self.parse_module_rest(pos, start, modifiers, flags, name)
    }

    fn parse_module_rest(
        &mut self,
        pos: TextPos,
        start: TextPos,
        modifiers: Modifiers<'a>,
        flags: NodeFlags,
        name: ModuleName<'a>,
    ) -> ModuleDeclaration<'a> {
        let body = if matches!(name, ModuleName::Identifier(_)) && self.parse_optional(SyntaxKind::DotToken) {
            let (inner_pos, inner_start) = self.mark();
            let inner_name = ModuleName::Identifier(self.parse_identifier());
            let inner_flags = NodeFlags::NESTED_NAMESPACE | (flags & NodeFlags::NAMESPACE);
            let inner = self.parse_module_rest(inner_pos, inner_start, None, inner_flags, inner_name);
            Some(ModuleBody::ModuleDeclaration(self.arena.alloc(inner)))
        } else if self.current_token() == SyntaxKind::OpenBraceToken {
            let (block_pos, block_start) = self.mark();
            self.next_token();
            let statements = self.parse_list_of_statements(|kind| kind == SyntaxKind::CloseBraceToken);
            self.expect_token(SyntaxKind::CloseBraceToken);
            Some(ModuleBody::ModuleBlock(ModuleBlock {
                data: self.finish(SyntaxKind::ModuleBlock, block_pos, block_start),
                statements,
            }))
        } else {
            self.parse_expected_semicolon();
            None
        };
        ModuleDeclaration {
            data: self.finish(SyntaxKind::ModuleDeclaration, pos, start).with_flags(flags),
            modifiers,
            name,
            body,
        }
    }

    // ========================================================================
    // Imports and exports
    // ========================================================================

    fn parse_import_declaration_or_import_equals(
        &mut self,
        pos: TextPos,
        start: TextPos,
        modifiers: Modifiers<'a>,
    ) -> Statement<'a> {
        self.expect_token(SyntaxKind::ImportKeyword);

        if self.current_token() == SyntaxKind::StringLiteral {
            let module_specifier = self.parse_literal_expression();
            self.parse_expected_semicolon();
            return Statement::ImportDeclaration(ImportDeclaration {
                data: self.finish(SyntaxKind::ImportDeclaration, pos, start),
                modifiers,
                import_clause: None,
                module_specifier,
            });
        }

        let (clause_pos, clause_start) = self.mark();
        let is_type_only = self.current_token() == SyntaxKind::TypeKeyword
            && self.look_ahead(|p| {
                p.next_token();
                match p.current_token() {
                    SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken => true,
                    SyntaxKind::FromKeyword => p.next_token_is(SyntaxKind::FromKeyword),
                    SyntaxKind::EqualsToken => false,
                    _ => p.is_identifier(),
                }
            });
        if is_type_only {
            self.next_token();
        }

        let name = if self.is_identifier()
            && !(self.current_token() == SyntaxKind::FromKeyword && self.next_token_is(SyntaxKind::StringLiteral))
        {
            Some(self.parse_identifier())
        } else {
            None
        };

        if let Some(name) = name {
            if self.current_token() == SyntaxKind::EqualsToken {
                return self.parse_import_equals_rest(pos, start, modifiers, is_type_only, name);
            }
        }

        let named_bindings = if name.is_none() || self.parse_optional(SyntaxKind::CommaToken) {
            match self.current_token() {
                SyntaxKind::AsteriskToken => Some(NamedImportBindings::NamespaceImport(self.parse_namespace_import())),
                SyntaxKind::OpenBraceToken => Some(NamedImportBindings::NamedImports(
                    self.parse_named_imports_or_exports(SyntaxKind::NamedImports),
                )),
                _ => {
                    self.error(&messages::_0_EXPECTED, &["{"]);
                    None
                }
            }
        } else {
            None
        };
        let import_clause = ImportClause {
            data: self.finish(SyntaxKind::ImportClause, clause_pos, clause_start),
            is_type_only,
            name,
            named_bindings,
        };

        self.expect_token(SyntaxKind::FromKeyword);
        let module_specifier = self.parse_module_specifier();
        self.parse_expected_semicolon();
        Statement::ImportDeclaration(ImportDeclaration {
            data: self.finish(SyntaxKind::ImportDeclaration, pos, start),
            modifiers,
            import_clause: Some(import_clause),
            module_specifier,
        })
    }

    fn parse_import_equals_rest(
        &mut self,
        pos: TextPos,
        start: TextPos,
        modifiers: Modifiers<'a>,
        is_type_only: bool,
        name: Identifier<'a>,
    ) -> Statement<'a> {
        self.expect_token(SyntaxKind::EqualsToken);
        let module_reference = if self.current_token() == SyntaxKind::RequireKeyword
            && self.next_token_is(SyntaxKind::OpenParenToken)
        {
            let (ref_pos, ref_start) = self.mark();
            self.next_token();
            self.expect_token(SyntaxKind::OpenParenToken);
            let expression = self.parse_module_specifier();
            self.expect_token(SyntaxKind::CloseParenToken);
            ModuleReference::ExternalModuleReference(ExternalModuleReference {
                data: self.finish(SyntaxKind::ExternalModuleReference, ref_pos, ref_start),
                expression,
            })
        } else {
            ModuleReference::EntityName(self.parse_entity_name())
        };
        self.parse_expected_semicolon();
        Statement::ImportEqualsDeclaration(ImportEqualsDeclaration {
            data: self.finish(SyntaxKind::ImportEqualsDeclaration, pos, start),
            modifiers,
            is_type_only,
            name,
            module_reference,
        })
    }

    fn parse_module_specifier(&mut self) -> LiteralExpression<'a> {
        if self.current_token() != SyntaxKind::StringLiteral {
            self.error(&messages::STRING_LITERAL_EXPECTED, &[]);
            return LiteralExpression { data: self.missing(SyntaxKind::StringLiteral), text: "" };
        }
        self.parse_literal_expression()
    }

    /// `* as name`.
    fn parse_namespace_import(&mut self) -> NamespaceImport<'a> {
        let (pos, start) = self.mark();
        self.expect_token(SyntaxKind::AsteriskToken);
        self.expect_token(SyntaxKind::AsKeyword);
        let name = self.parse_identifier_name();
        NamespaceImport {
            data: self.finish(SyntaxKind::NamespaceImport, pos, start),
            name,
        }
    }

    /// `{ a, b as c, type d }` for imports (`NamedImports`) and exports.
    fn parse_named_imports_or_exports(&mut self, kind: SyntaxKind) -> NamedImports<'a> {
        let (pos, start) = self.mark();
        let specifier_kind = if kind == SyntaxKind::NamedImports {
            SyntaxKind::ImportSpecifier
        } else {
            SyntaxKind::ExportSpecifier
        };
        self.expect_token(SyntaxKind::OpenBraceToken);
        let elements = self.parse_delimited_list(SyntaxKind::CloseBraceToken, |p| p.parse_import_or_export_specifier(specifier_kind));
        self.expect_token(SyntaxKind::CloseBraceToken);
        NamedImports {
            data: self.finish(kind, pos, start),
            elements,
        }
    }

    fn parse_import_or_export_specifier(&mut self, kind: SyntaxKind) -> ImportOrExportSpecifier<'a> {
        let (pos, start) = self.mark();
        let is_type_only = self.current_token() == SyntaxKind::TypeKeyword
            && self.look_ahead(|p| {
                p.next_token();
                (p.is_identifier() || p.current_token().is_keyword()) && p.current_token() != SyntaxKind::AsKeyword
            });
        if is_type_only {
            self.next_token();
        }
        let first = self.parse_identifier_name();
        let (property_name, name) = if self.parse_optional(SyntaxKind::AsKeyword) {
            (Some(first), self.parse_identifier_name())
        } else {
            (None, first)
        };
        ImportOrExportSpecifier {
            data: self.finish(kind, pos, start),
            is_type_only,
            property_name,
            name,
        }
    }

    fn parse_export_declaration_or_assignment(
        &mut self,
        pos: TextPos,
        start: TextPos,
        modifiers: Modifiers<'a>,
    ) -> Statement<'a> {
        self.expect_token(SyntaxKind::ExportKeyword);

        if matches!(self.current_token(), SyntaxKind::EqualsToken | SyntaxKind::DefaultKeyword) {
            let is_export_equals = self.current_token() == SyntaxKind::EqualsToken;
            self.next_token();
            let expression = self.parse_assignment_expression_and_alloc();
            self.parse_expected_semicolon();
            return Statement::ExportAssignment(ExportAssignment {
                data: self.finish(SyntaxKind::ExportAssignment, pos, start),
                modifiers,
                is_export_equals,
                expression,
            });
        }

        let is_type_only = self.current_token() == SyntaxKind::TypeKeyword
            && self.look_ahead(|p| matches!(p.next_token(), SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken));
        if is_type_only {
            self.next_token();
        }

        let export_clause = match self.current_token() {
            SyntaxKind::AsteriskToken => {
                if self.look_ahead(|p| p.next_token() == SyntaxKind::AsKeyword) {
                    Some(NamedExportBindings::NamespaceExport(self.parse_namespace_export()))
                } else {
                    self.next_token();
                    None
                }
            }
            _ => Some(NamedExportBindings::NamedExports(
                self.parse_named_imports_or_exports(SyntaxKind::NamedExports),
            )),
        };

        let module_specifier = if self.parse_optional(SyntaxKind::FromKeyword) {
            Some(self.parse_module_specifier())
        } else {
            if export_clause.is_none() {
                self.error(&messages::_0_EXPECTED, &["from"]);
            }
            None
        };
        self.parse_expected_semicolon();
        Statement::ExportDeclaration(ExportDeclaration {
            data: self.finish(SyntaxKind::ExportDeclaration, pos, start),
            modifiers,
            is_type_only,
            export_clause,
            module_specifier,
        })
    }

    fn parse_namespace_export(&mut self) -> NamespaceImport<'a> {
        let mut node = self.parse_namespace_import();
        node.data.kind = SyntaxKind::NamespaceExport;
        node
    }

    // ========================================================================
    // Names
    // ========================================================================

    /// Consume the current token as an identifier node, whatever its kind.
    fn identifier_from_token(&mut self) -> Identifier<'a> {
        let (pos, start) = self.mark();
        let token = self.current_token();
        let text = if self.scanner.has_extended_unicode_escape() {
            self.alloc_str(self.scanner.token_value())
        } else {
            self.scanner.token_text()
        };
        self.next_token();
        Identifier {
            data: self.finish(SyntaxKind::Identifier, pos, start),
            text,
            original_keyword_kind: token.is_keyword().then_some(token),
        }
    }

    /// A zero-width identifier for recovery.
    fn missing_identifier(&self) -> Identifier<'a> {
        Identifier {
            data: self.missing(SyntaxKind::Identifier),
            text: "",
            original_keyword_kind: None,
        }
    }

    /// An identifier; contextual keywords qualify, reserved words do not.
    fn parse_identifier(&mut self) -> Identifier<'a> {
        if self.is_identifier() {
            return self.identifier_from_token();
        }
        self.error(&messages::IDENTIFIER_EXPECTED, &[]);
        self.missing_identifier()
    }

    /// An identifier name after `.` or in import/export specifiers, where
    /// reserved words are allowed too.
    fn parse_identifier_name(&mut self) -> Identifier<'a> {
        if self.is_identifier() || self.current_token().is_keyword() {
            return self.identifier_from_token();
        }
        self.error(&messages::IDENTIFIER_EXPECTED, &[]);
        self.missing_identifier()
    }

    fn parse_private_identifier(&mut self) -> PrivateIdentifier<'a> {
        let (pos, start) = self.mark();
        let text = self.scanner.token_text();
        self.next_token();
        PrivateIdentifier {
            data: self.finish(SyntaxKind::PrivateIdentifier, pos, start),
            text,
        }
    }

    /// `A`, `A.B.C`; `this` may start a name in `typeof this.x`.
    fn parse_entity_name(&mut self) -> EntityName<'a> {
        let first = if self.current_token() == SyntaxKind::ThisKeyword {
            self.identifier_from_token()
        } else {
            self.parse_identifier()
        };
        let first_data = first.data;
        let mut name = EntityName::Identifier(first);
        while self.current_token() == SyntaxKind::DotToken {
            self.next_token();
            let right = self.parse_identifier_name();
            name = EntityName::QualifiedName(self.arena.alloc(QualifiedName {
                data: self.finish_from(SyntaxKind::QualifiedName, &first_data),
                left: name,
                right,
            }));
        }
        name
    }

    /// String, numeric, bigint, regex and template literals. Strings keep
    /// their cooked value; everything else keeps its raw text.
    fn parse_literal_expression(&mut self) -> LiteralExpression<'a> {
        let (pos, start) = self.mark();
        let kind = self.current_token();
        let text = if kind == SyntaxKind::StringLiteral {
            self.alloc_str(self.scanner.token_value())
        } else {
            self.scanner.token_text()
        };
        self.next_token();
        LiteralExpression {
            data: self.finish(kind, pos, start),
            text,
        }
    }

    fn parse_property_name(&mut self) -> PropertyName<'a> {
        match self.current_token() {
            SyntaxKind::StringLiteral => PropertyName::StringLiteral(self.parse_literal_expression()),
            SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                PropertyName::NumericLiteral(self.parse_literal_expression())
            }
            SyntaxKind::PrivateIdentifier => PropertyName::PrivateIdentifier(self.parse_private_identifier()),
            SyntaxKind::OpenBracketToken => {
                let (pos, start) = self.mark();
                self.next_token();
                let expression = self.with_in_allowed(|p| p.parse_assignment_expression_and_alloc());
                self.expect_token(SyntaxKind::CloseBracketToken);
                PropertyName::ComputedPropertyName(self.arena.alloc(ComputedPropertyName {
                    data: self.finish(SyntaxKind::ComputedPropertyName, pos, start),
                    expression,
                }))
            }
            _ => PropertyName::Identifier(self.parse_identifier_name()),
        }
    }

    // ========================================================================
    // Binding patterns and parameters
    // ========================================================================

    fn parse_binding_name(&mut self) -> BindingName<'a> {
        match self.current_token() {
            SyntaxKind::OpenBraceToken => {
                let (pos, start) = self.mark();
                self.next_token();
                let elements = self.parse_delimited_list(SyntaxKind::CloseBraceToken, |p| p.parse_object_binding_element());
                self.expect_token(SyntaxKind::CloseBraceToken);
                BindingName::ObjectBindingPattern(self.arena.alloc(ObjectBindingPattern {
                    data: self.finish(SyntaxKind::ObjectBindingPattern, pos, start),
                    elements,
                }))
            }
            SyntaxKind::OpenBracketToken => {
                let (pos, start) = self.mark();
                self.next_token();
                let elements =
                    self.parse_delimited_list(SyntaxKind::CloseBracketToken, |p| p.parse_array_binding_element());
                self.expect_token(SyntaxKind::CloseBracketToken);
                BindingName::ArrayBindingPattern(self.arena.alloc(ArrayBindingPattern {
                    data: self.finish(SyntaxKind::ArrayBindingPattern, pos, start),
                    elements,
                }))
            }
            _ => BindingName::Identifier(self.parse_identifier()),
        }
    }

    fn parse_object_binding_element(&mut self) -> BindingElement<'a> {
        let (pos, start) = self.mark();
        let dot_dot_dot_token = self.optional_token(SyntaxKind::DotDotDotToken);
        let (property_name, name) = if dot_dot_dot_token.is_some() {
            (None, self.parse_binding_name())
        } else {
            match self.parse_property_name() {
                PropertyName::Identifier(id) if self.current_token() != SyntaxKind::ColonToken => {
                    (None, BindingName::Identifier(id))
                }
                property_name => {
                    self.expect_token(SyntaxKind::ColonToken);
                    (Some(property_name), self.parse_binding_name())
                }
            }
        };
        let initializer = self.parse_initializer();
        BindingElement {
            data: self.finish(SyntaxKind::BindingElement, pos, start),
            dot_dot_dot_token,
            property_name,
            name,
            initializer,
        }
    }

    fn parse_array_binding_element(&mut self) -> ArrayBindingElement<'a> {
        let (pos, start) = self.mark();
        if self.current_token() == SyntaxKind::CommaToken {
            return ArrayBindingElement::OmittedExpression(self.finish(SyntaxKind::OmittedExpression, pos, start));
        }
        let dot_dot_dot_token = self.optional_token(SyntaxKind::DotDotDotToken);
        let name = self.parse_binding_name();
        let initializer = self.parse_initializer();
        ArrayBindingElement::BindingElement(BindingElement {
            data: self.finish(SyntaxKind::BindingElement, pos, start),
            dot_dot_dot_token,
            property_name: None,
            name,
            initializer,
        })
    }

    /// `( param, ... )`.
    fn parse_parameters(&mut self) -> NodeArray<'a, ParameterDeclaration<'a>> {
        if !self.expect_token(SyntaxKind::OpenParenToken) {
            return NodeArray::empty(self.scanner.full_start());
        }
        let parameters = self.with_conditional_types_allowed(|p| {
            p.with_in_allowed(|p| p.parse_delimited_list(SyntaxKind::CloseParenToken, |p| p.parse_parameter()))
        });
        self.expect_token(SyntaxKind::CloseParenToken);
        parameters
    }

    fn parse_parameter(&mut self) -> ParameterDeclaration<'a> {
        let (pos, start) = self.mark();
        let modifiers = self.parse_modifiers(ModifierContext::Parameter);
        let dot_dot_dot_token = self.optional_token(SyntaxKind::DotDotDotToken);
        let name = if self.current_token() == SyntaxKind::ThisKeyword {
            BindingName::Identifier(self.identifier_from_token())
        } else {
            self.parse_binding_name()
        };
        let question_token = self.optional_token(SyntaxKind::QuestionToken);
        let type_annotation = self.parse_type_annotation();
        let initializer = self.parse_initializer();
        ParameterDeclaration {
            data: self.finish(SyntaxKind::Parameter, pos, start),
            modifiers,
            dot_dot_dot_token,
            name,
            question_token,
            type_annotation,
            initializer,
        }
    }

    /// `<T, U extends X = Y>`, if present.
    fn parse_type_parameters(&mut self) -> TypeParameters<'a> {
        if self.current_token() != SyntaxKind::LessThanToken {
            return None;
        }
        self.next_token();
        let parameters = self.parse_delimited_list(SyntaxKind::GreaterThanToken, |p| p.parse_type_parameter());
        self.expect_token(SyntaxKind::GreaterThanToken);
        Some(parameters)
    }

    fn parse_type_parameter(&mut self) -> TypeParameterDeclaration<'a> {
        let (pos, start) = self.mark();
        let modifiers = self.parse_modifiers(ModifierContext::TypeParameter);
        let name = self.parse_identifier();
        let constraint = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            Some(self.parse_type_and_alloc())
        } else {
            None
        };
        let default = if self.parse_optional(SyntaxKind::EqualsToken) {
            Some(self.parse_type_and_alloc())
        } else {
            None
        };
        TypeParameterDeclaration {
            data: self.finish(SyntaxKind::TypeParameter, pos, start),
            modifiers,
            name,
            constraint,
            default,
        }
    }

    /// `<A, B>` after a type name, if present.
    fn parse_type_arguments(&mut self) -> TypeArguments<'a> {
        if self.current_token() != SyntaxKind::LessThanToken || self.has_preceding_line_break() {
            return None;
        }
        self.next_token();
        let arguments = self.with_conditional_types_allowed(|p| {
            p.parse_delimited_list(SyntaxKind::GreaterThanToken, |p| p.parse_type())
        });
        self.expect_token(SyntaxKind::GreaterThanToken);
        Some(arguments)
    }

    /// Type arguments in an expression, as in `f<T>(x)`. Only accepted when
    /// they parse cleanly and a call or template follows.
    fn try_parse_type_arguments_in_expression(&mut self) -> TypeArguments<'a> {
        if self.current_token() != SyntaxKind::LessThanToken {
            return None;
        }
        self.try_parse_clean(|p| {
            let arguments = p.parse_type_arguments()?;
            matches!(
                p.current_token(),
                SyntaxKind::OpenParenToken | SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead
            )
            .then_some(arguments)
        })
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Run `f` with `in` allowed as an operator again, as inside brackets.
    fn with_in_allowed<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.disallow_in, false);
        let result = f(self);
        self.disallow_in = saved;
        result
    }

    /// Count one level of nesting around `f`; past the limit, report and
    /// return `overflow` instead.
    fn with_recursion_guard<T>(
        &mut self,
        overflow: impl FnOnce(&mut Self) -> T,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        self.recursion_depth += 1;
        let result = if self.recursion_depth > MAX_RECURSION_DEPTH {
            self.error(&messages::MAXIMUM_NESTING_DEPTH_EXCEEDED, &[]);
            overflow(self)
        } else {
            f(self)
        };
        self.recursion_depth -= 1;
        result
    }

    fn missing_expression(&mut self) -> Expression<'a> {
        Expression::MissingExpression(self.missing(SyntaxKind::MissingExpression))
    }

    fn parse_expression_and_alloc(&mut self) -> &'a Expression<'a> {
        let expression = self.parse_expression();
        self.arena.alloc(expression)
    }

    fn parse_assignment_expression_and_alloc(&mut self) -> &'a Expression<'a> {
        let expression = self.parse_assignment_expression();
        self.arena.alloc(expression)
    }

    /// Comma expressions.
    fn parse_expression(&mut self) -> Expression<'a> {
        let mut expression = self.parse_assignment_expression();
        while self.current_token() == SyntaxKind::CommaToken {
            let first = *expression.data();
            let operator_token = self.parse_token_node();
            let right = self.parse_assignment_expression_and_alloc();
            expression = Expression::Binary(BinaryExpression {
                data: self.finish_from(SyntaxKind::BinaryExpression, &first),
                left: self.arena.alloc(expression),
                operator_token,
                right,
            });
        }
        expression
    }

    fn parse_assignment_expression(&mut self) -> Expression<'a> {
        self.with_recursion_guard(|p| p.missing_expression(), |p| p.parse_assignment_expression_worker())
    }

    fn parse_assignment_expression_worker(&mut self) -> Expression<'a> {
        if self.in_generator && self.current_token() == SyntaxKind::YieldKeyword {
            return self.parse_yield_expression();
        }
        if let Some(arrow) = self.parse_simple_arrow_function() {
            return arrow;
        }
        if let Some(arrow) = self.try_parse_parenthesized_arrow_function() {
            return arrow;
        }

        let expression = self.parse_binary_expression_or_higher(OperatorPrecedence::Comma);
        if self.current_token().is_assignment_operator() {
            let first = *expression.data();
            let operator_token = self.parse_token_node();
            let right = self.parse_assignment_expression_and_alloc();
            return Expression::Binary(BinaryExpression {
                data: self.finish_from(SyntaxKind::BinaryExpression, &first),
                left: self.arena.alloc(expression),
                operator_token,
                right,
            });
        }
        self.parse_conditional_expression_rest(expression)
    }

    fn parse_conditional_expression_rest(&mut self, condition: Expression<'a>) -> Expression<'a> {
        if self.current_token() != SyntaxKind::QuestionToken {
            return condition;
        }
        let first = *condition.data();
        self.next_token();
        let when_true = self.with_in_allowed(|p| p.parse_assignment_expression_and_alloc());
        self.expect_token(SyntaxKind::ColonToken);
        let when_false = self.parse_assignment_expression_and_alloc();
        Expression::Conditional(ConditionalExpression {
            data: self.finish_from(SyntaxKind::ConditionalExpression, &first),
            condition: self.arena.alloc(condition),
            when_true,
            when_false,
        })
    }

    fn parse_yield_expression(&mut self) -> Expression<'a> {
        let (pos, start) = self.mark();
        self.next_token();
        let mut asterisk_token = None;
        let mut expression = None;
        if !self.has_preceding_line_break() {
            asterisk_token = self.optional_token(SyntaxKind::AsteriskToken);
            if asterisk_token.is_some() || is_start_of_expression(self.current_token()) {
                expression = Some(self.parse_assignment_expression_and_alloc());
            }
        }
        Expression::Yield(YieldExpression {
            data: self.finish(SyntaxKind::YieldExpression, pos, start),
            asterisk_token,
            expression,
        })
    }

    // ---- Arrow functions ----

    /// A single `async` modifier token as a modifier list.
    fn parse_async_modifier(&mut self) -> Modifiers<'a> {
        if self.current_token() != SyntaxKind::AsyncKeyword {
            return None;
        }
        let token = self.parse_token_node();
        let range = token.data.range;
        let modifiers = alloc_vec_in(self.arena, vec![ModifierLike::Modifier(token)]);
        Some(NodeArray::new(modifiers, range.pos, range.end, false))
    }

    /// `x => ...` and `async x => ...`.
    fn parse_simple_arrow_function(&mut self) -> Option<Expression<'a>> {
        if !self.is_identifier() {
            return None;
        }
        let is_simple = self.look_ahead(|p| {
            if p.current_token() == SyntaxKind::AsyncKeyword {
                // `async => x` names its parameter `async`.
                if p.next_token() == SyntaxKind::EqualsGreaterThanToken {
                    return true;
                }
                if p.has_preceding_line_break() || !p.is_identifier() {
                    return false;
                }
            }
            p.next_token() == SyntaxKind::EqualsGreaterThanToken
        });
        if !is_simple {
            return None;
        }

        let (pos, start) = self.mark();
        let modifiers = if self.current_token() == SyntaxKind::AsyncKeyword
            && self.look_ahead(|p| p.next_token() != SyntaxKind::EqualsGreaterThanToken)
        {
            self.parse_async_modifier()
        } else {
            None
        };
        let name = self.parse_identifier();
        let parameter = ParameterDeclaration {
            data: self.finish_from(SyntaxKind::Parameter, &name.data),
            modifiers: None,
            dot_dot_dot_token: None,
            name: BindingName::Identifier(name),
            question_token: None,
            type_annotation: None,
            initializer: None,
        };
        let range = parameter.data.range;
        let parameters = NodeArray::new(alloc_vec_in(self.arena, vec![parameter]), range.pos, range.end, false);
        Some(self.parse_arrow_function_rest(pos, start, modifiers, None, false, parameters, None))
    }

    /// Cheap filter before speculating on `(...) =>` or `<T>(...) =>`.
    fn is_possible_parenthesized_arrow(&mut self) -> bool {
        self.look_ahead(|p| {
            if p.current_token() == SyntaxKind::AsyncKeyword {
                p.next_token();
                if p.has_preceding_line_break() {
                    return false;
                }
            }
            match p.current_token() {
                SyntaxKind::LessThanToken => true,
                SyntaxKind::OpenParenToken => {
                    let next = p.next_token();
                    matches!(
                        next,
                        SyntaxKind::CloseParenToken
                            | SyntaxKind::DotDotDotToken
                            | SyntaxKind::OpenBraceToken
                            | SyntaxKind::OpenBracketToken
                            | SyntaxKind::AtToken
                            | SyntaxKind::ThisKeyword
                    ) || p.is_identifier()
                }
                _ => false,
            }
        })
    }

    fn try_parse_parenthesized_arrow_function(&mut self) -> Option<Expression<'a>> {
        if !matches!(
            self.current_token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken | SyntaxKind::AsyncKeyword
        ) || !self.is_possible_parenthesized_arrow()
        {
            return None;
        }
        let (pos, start) = self.mark();
        let (modifiers, type_parameters, parameters, type_annotation) = self.try_parse_clean(|p| {
            let modifiers = p.parse_async_modifier();
            let type_parameters = p.parse_type_parameters();
            if p.current_token() != SyntaxKind::OpenParenToken {
                return None;
            }
            let parameters = p.parse_parameters();
            let type_annotation = p.parse_return_type_annotation();
            (p.current_token() == SyntaxKind::EqualsGreaterThanToken)
                .then_some((modifiers, type_parameters, parameters, type_annotation))
        })?;
        Some(self.parse_arrow_function_rest(pos, start, modifiers, type_parameters, true, parameters, type_annotation))
    }

    #[allow(clippy::too_many_arguments)]
    fn parse_arrow_function_rest(
        &mut self,
        pos: TextPos,
        start: TextPos,
        modifiers: Modifiers<'a>,
        type_parameters: TypeParameters<'a>,
        has_parenthesized_parameters: bool,
        parameters: NodeArray<'a, ParameterDeclaration<'a>>,
        type_annotation: Option<&'a TypeNode<'a>>,
    ) -> Expression<'a> {
        if self.has_preceding_line_break() {
            self.error(&messages::LINE_TERMINATOR_NOT_PERMITTED_BEFORE_ARROW, &[]);
        }
        let equals_greater_than_token = self.expect_token_node(SyntaxKind::EqualsGreaterThanToken);
        let saved_generator = std::mem::replace(&mut self.in_generator, false);
        let body = if self.current_token() == SyntaxKind::OpenBraceToken {
            ArrowFunctionBody::Block(self.parse_function_block())
        } else {
            ArrowFunctionBody::Expression(self.parse_assignment_expression_and_alloc())
        };
        self.in_generator = saved_generator;
        Expression::ArrowFunction(ArrowFunction {
            data: self.finish(SyntaxKind::ArrowFunction, pos, start),
            modifiers,
            type_parameters,
            has_parenthesized_parameters,
            parameters,
            type_annotation,
            equals_greater_than_token,
            body,
        })
    }

    // ---- Binary and unary ----

    fn parse_binary_expression_or_higher(&mut self, precedence: OperatorPrecedence) -> Expression<'a> {
        let left = self.parse_unary_expression_or_higher();
        self.parse_binary_expression_rest(precedence, left)
    }

    fn parse_binary_expression_rest(&mut self, precedence: OperatorPrecedence, mut left: Expression<'a>) -> Expression<'a> {
        loop {
            self.scanner.rescan_greater_than_token();
            let token = self.current_token();
            let new_precedence = get_binary_operator_precedence(token);
            if new_precedence == OperatorPrecedence::Invalid {
                break;
            }
            // `**` is right-associative; everything else binds to the left.
            let consume = if token == SyntaxKind::AsteriskAsteriskToken {
                new_precedence >= precedence
            } else {
                new_precedence > precedence
            };
            if !consume || (token == SyntaxKind::InKeyword && self.disallow_in) {
                break;
            }

            let first = *left.data();
            if matches!(token, SyntaxKind::AsKeyword | SyntaxKind::SatisfiesKeyword) {
                if self.has_preceding_line_break() {
                    break;
                }
                self.next_token();
                let type_node = self.parse_assertion_type();
                let node = AsExpression {
                    data: NodeData::new(SyntaxKind::AsExpression, first.range.pos, first.start, self.prev_token_end),
                    expression: self.arena.alloc(left),
                    type_node,
                };
                left = if token == SyntaxKind::AsKeyword {
                    Expression::As(node)
                } else {
                    let mut node = node;
                    node.data.kind = SyntaxKind::SatisfiesExpression;
                    Expression::Satisfies(node)
                };
                continue;
            }

            let operator_token = self.parse_token_node();
            let right = self.parse_binary_expression_or_higher(new_precedence);
            left = Expression::Binary(BinaryExpression {
                data: self.finish_from(SyntaxKind::BinaryExpression, &first),
                left: self.arena.alloc(left),
                operator_token,
                right: self.arena.alloc(right),
            });
        }
        left
    }

    fn parse_unary_expression_or_higher(&mut self) -> Expression<'a> {
        let (pos, start) = self.mark();
        match self.current_token() {
            operator @ (SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken) => {
                self.next_token();
                let operand = self.parse_unary_operand();
                Expression::PrefixUnary(PrefixUnaryExpression {
                    data: self.finish(SyntaxKind::PrefixUnaryExpression, pos, start),
                    operator,
                    operand,
                })
            }
            SyntaxKind::DeleteKeyword => {
                let node = self.parse_unary_keyword(SyntaxKind::DeleteExpression, pos, start);
                Expression::Delete(node)
            }
            SyntaxKind::TypeOfKeyword => {
                let node = self.parse_unary_keyword(SyntaxKind::TypeOfExpression, pos, start);
                Expression::TypeOf(node)
            }
            SyntaxKind::VoidKeyword => {
                let node = self.parse_unary_keyword(SyntaxKind::VoidExpression, pos, start);
                Expression::Void(node)
            }
            SyntaxKind::AwaitKeyword if self.is_await_expression() => {
                let node = self.parse_unary_keyword(SyntaxKind::AwaitExpression, pos, start);
                Expression::Await(node)
            }
            SyntaxKind::LessThanToken => {
                self.next_token();
                let type_node = self.parse_assertion_type();
                self.expect_token(SyntaxKind::GreaterThanToken);
                let expression = self.parse_unary_operand();
                Expression::TypeAssertion(TypeAssertionExpression {
                    data: self.finish(SyntaxKind::TypeAssertionExpression, pos, start),
                    type_node,
                    expression,
                })
            }
            _ => self.parse_update_expression(),
        }
    }

    fn parse_unary_operand(&mut self) -> &'a Expression<'a> {
        let operand = self.with_recursion_guard(|p| p.missing_expression(), |p| p.parse_unary_expression_or_higher());
        self.arena.alloc(operand)
    }

    fn parse_unary_keyword(&mut self, kind: SyntaxKind, pos: TextPos, start: TextPos) -> UnaryKeywordExpression<'a> {
        self.next_token();
        let expression = self.parse_unary_operand();
        UnaryKeywordExpression {
            data: self.finish(kind, pos, start),
            expression,
        }
    }

    /// `await` is an operator when an operand follows on the same line.
    fn is_await_expression(&mut self) -> bool {
        self.look_ahead(|p| {
            let next = p.next_token();
            !p.has_preceding_line_break() && is_start_of_expression(next)
        })
    }

    /// Postfix `++` and `--`, which may not follow a line break.
    fn parse_update_expression(&mut self) -> Expression<'a> {
        let expression = self.parse_left_hand_side_expression();
        if matches!(self.current_token(), SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken)
            && !self.has_preceding_line_break()
        {
            let first = *expression.data();
            let operator = self.current_token();
            self.next_token();
            return Expression::PostfixUnary(PostfixUnaryExpression {
                data: self.finish_from(SyntaxKind::PostfixUnaryExpression, &first),
                operand: self.arena.alloc(expression),
                operator,
            });
        }
        expression
    }

    // ---- Left-hand-side expressions ----

    fn parse_left_hand_side_expression(&mut self) -> Expression<'a> {
        let (pos, start) = self.mark();
        let expression = match self.current_token() {
            SyntaxKind::ImportKeyword if self.next_token_is(SyntaxKind::OpenParenToken) => {
                self.next_token();
                Expression::ImportKeyword(self.finish(SyntaxKind::ImportKeyword, pos, start))
            }
            SyntaxKind::ImportKeyword if self.next_token_is(SyntaxKind::DotToken) => {
                self.parse_meta_property(SyntaxKind::ImportKeyword, pos, start)
            }
            SyntaxKind::NewKeyword => self.parse_new_expression(),
            _ => self.parse_primary_expression(),
        };
        self.parse_member_expression_rest(expression, true)
    }

    /// `new.target` and `import.meta`.
    fn parse_meta_property(&mut self, keyword_token: SyntaxKind, pos: TextPos, start: TextPos) -> Expression<'a> {
        self.next_token();
        self.expect_token(SyntaxKind::DotToken);
        let name = self.parse_identifier_name();
        Expression::MetaProperty(MetaPropertyExpression {
            data: self.finish(SyntaxKind::MetaProperty, pos, start),
            keyword_token,
            name,
        })
    }

    fn parse_new_expression(&mut self) -> Expression<'a> {
        let (pos, start) = self.mark();
        if self.next_token_is(SyntaxKind::DotToken) {
            return self.parse_meta_property(SyntaxKind::NewKeyword, pos, start);
        }
        self.next_token();
        let callee = if self.current_token() == SyntaxKind::NewKeyword {
            self.with_recursion_guard(|p| p.missing_expression(), |p| p.parse_new_expression())
        } else {
            self.parse_primary_expression()
        };
        let expression = self.parse_member_expression_rest(callee, false);
        let type_arguments = self.try_parse_type_arguments_in_expression();
        let arguments = if self.current_token() == SyntaxKind::OpenParenToken {
            Some(self.parse_argument_list())
        } else {
            None
        };
        Expression::New(NewExpression {
            data: self.finish(SyntaxKind::NewExpression, pos, start),
            expression: self.arena.alloc(expression),
            type_arguments,
            arguments,
        })
    }

    /// Property access, element access, non-null assertions, tagged
    /// templates and (when `allow_calls`) calls, in any order.
    fn parse_member_expression_rest(&mut self, mut expression: Expression<'a>, allow_calls: bool) -> Expression<'a> {
        loop {
            let first = *expression.data();
            let mut question_dot_token = None;
            match self.current_token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let name = self.parse_member_name();
                    expression = Expression::PropertyAccess(PropertyAccessExpression {
                        data: self.finish_from(SyntaxKind::PropertyAccessExpression, &first),
                        expression: self.arena.alloc(expression),
                        question_dot_token: None,
                        name,
                    });
                    continue;
                }
                SyntaxKind::QuestionDotToken => {
                    question_dot_token = Some(self.parse_token_node());
                    if !matches!(
                        self.current_token(),
                        SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken | SyntaxKind::LessThanToken
                    ) {
                        let name = self.parse_member_name();
                        expression = Expression::PropertyAccess(PropertyAccessExpression {
                            data: self
                                .finish_from(SyntaxKind::PropertyAccessExpression, &first)
                                .with_flags(NodeFlags::OPTIONAL_CHAIN),
                            expression: self.arena.alloc(expression),
                            question_dot_token,
                            name,
                        });
                        continue;
                    }
                }
                SyntaxKind::ExclamationToken if !self.has_preceding_line_break() => {
                    self.next_token();
                    expression = Expression::NonNull(NonNullExpression {
                        data: self.finish_from(SyntaxKind::NonNullExpression, &first),
                        expression: self.arena.alloc(expression),
                    });
                    continue;
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    expression = self.parse_tagged_template_rest(expression, None);
                    continue;
                }
                _ => {}
            }

            let flags = if question_dot_token.is_some() { NodeFlags::OPTIONAL_CHAIN } else { NodeFlags::NONE };
            match self.current_token() {
                SyntaxKind::OpenBracketToken => {
                    self.next_token();
                    let argument_expression = self.with_in_allowed(|p| p.parse_expression_and_alloc());
                    self.expect_token(SyntaxKind::CloseBracketToken);
                    expression = Expression::ElementAccess(ElementAccessExpression {
                        data: self.finish_from(SyntaxKind::ElementAccessExpression, &first).with_flags(flags),
                        expression: self.arena.alloc(expression),
                        question_dot_token,
                        argument_expression,
                    });
                }
                SyntaxKind::OpenParenToken if allow_calls || question_dot_token.is_some() => {
                    let arguments = self.parse_argument_list();
                    expression = Expression::Call(CallExpression {
                        data: self.finish_from(SyntaxKind::CallExpression, &first).with_flags(flags),
                        expression: self.arena.alloc(expression),
                        question_dot_token,
                        type_arguments: None,
                        arguments,
                    });
                }
                SyntaxKind::LessThanToken if allow_calls || question_dot_token.is_some() => {
                    let Some(type_arguments) = self.try_parse_type_arguments_in_expression() else {
                        if question_dot_token.is_some() {
                            self.error(&messages::_0_EXPECTED, &["("]);
                        }
                        break;
                    };
                    if self.current_token() == SyntaxKind::OpenParenToken {
                        let arguments = self.parse_argument_list();
                        expression = Expression::Call(CallExpression {
                            data: self.finish_from(SyntaxKind::CallExpression, &first).with_flags(flags),
                            expression: self.arena.alloc(expression),
                            question_dot_token,
                            type_arguments: Some(type_arguments),
                            arguments,
                        });
                    } else {
                        expression = self.parse_tagged_template_rest(expression, Some(type_arguments));
                    }
                }
                _ => {
                    if question_dot_token.is_some() {
                        self.error(&messages::IDENTIFIER_EXPECTED, &[]);
                    }
                    break;
                }
            }
        }
        expression
    }

    fn parse_member_name(&mut self) -> MemberName<'a> {
        if self.current_token() == SyntaxKind::PrivateIdentifier {
            MemberName::PrivateIdentifier(self.parse_private_identifier())
        } else {
            MemberName::Identifier(self.parse_identifier_name())
        }
    }

    fn parse_tagged_template_rest(&mut self, tag: Expression<'a>, type_arguments: TypeArguments<'a>) -> Expression<'a> {
        let first = *tag.data();
        let template = if self.current_token() == SyntaxKind::NoSubstitutionTemplateLiteral {
            Expression::NoSubstitutionTemplateLiteral(self.parse_literal_expression())
        } else {
            self.parse_template_expression()
        };
        Expression::TaggedTemplate(TaggedTemplateExpression {
            data: self.finish_from(SyntaxKind::TaggedTemplateExpression, &first),
            tag: self.arena.alloc(tag),
            type_arguments,
            template: self.arena.alloc(template),
        })
    }

    fn parse_argument_list(&mut self) -> NodeArray<'a, Expression<'a>> {
        self.expect_token(SyntaxKind::OpenParenToken);
        let arguments = self.with_in_allowed(|p| {
            p.parse_delimited_list(SyntaxKind::CloseParenToken, |p| p.parse_spread_or_assignment_expression())
        });
        self.expect_token(SyntaxKind::CloseParenToken);
        arguments
    }

    fn parse_spread_or_assignment_expression(&mut self) -> Expression<'a> {
        if self.current_token() == SyntaxKind::DotDotDotToken {
            let (pos, start) = self.mark();
            self.next_token();
            let expression = self.parse_assignment_expression_and_alloc();
            return Expression::Spread(SpreadElement {
                data: self.finish(SyntaxKind::SpreadElement, pos, start),
                expression,
            });
        }
        self.parse_assignment_expression()
    }

    // ---- Primary expressions ----

    fn parse_primary_expression(&mut self) -> Expression<'a> {
        let (pos, start) = self.mark();
        match self.current_token() {
            SyntaxKind::ThisKeyword => {
                self.next_token();
                Expression::ThisKeyword(self.finish(SyntaxKind::ThisKeyword, pos, start))
            }
            SyntaxKind::SuperKeyword => {
                self.next_token();
                Expression::SuperKeyword(self.finish(SyntaxKind::SuperKeyword, pos, start))
            }
            SyntaxKind::NullKeyword => {
                self.next_token();
                Expression::NullKeyword(self.finish(SyntaxKind::NullKeyword, pos, start))
            }
            SyntaxKind::TrueKeyword => {
                self.next_token();
                Expression::TrueKeyword(self.finish(SyntaxKind::TrueKeyword, pos, start))
            }
            SyntaxKind::FalseKeyword => {
                self.next_token();
                Expression::FalseKeyword(self.finish(SyntaxKind::FalseKeyword, pos, start))
            }
            SyntaxKind::NumericLiteral => Expression::NumericLiteral(self.parse_literal_expression()),
            SyntaxKind::BigIntLiteral => Expression::BigIntLiteral(self.parse_literal_expression()),
            SyntaxKind::StringLiteral => Expression::StringLiteral(self.parse_literal_expression()),
            SyntaxKind::NoSubstitutionTemplateLiteral => {
                Expression::NoSubstitutionTemplateLiteral(self.parse_literal_expression())
            }
            SyntaxKind::TemplateHead => self.parse_template_expression(),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                self.scanner.rescan_slash_token();
                Expression::RegularExpressionLiteral(self.parse_literal_expression())
            }
            SyntaxKind::PrivateIdentifier => Expression::PrivateIdentifier(self.parse_private_identifier()),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let expression = self.with_in_allowed(|p| p.parse_expression_and_alloc());
                self.expect_token(SyntaxKind::CloseParenToken);
                Expression::Parenthesized(ParenthesizedExpression {
                    data: self.finish(SyntaxKind::ParenthesizedExpression, pos, start),
                    expression,
                })
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::AsyncKeyword if self.look_ahead(|p| {
                p.next_token() == SyntaxKind::FunctionKeyword && !p.has_preceding_line_break()
            }) =>
            {
                let modifiers = self.parse_async_modifier();
                let function = self.parse_function_like(SyntaxKind::FunctionExpression, pos, start, modifiers);
                Expression::FunctionExpression(function)
            }
            SyntaxKind::FunctionKeyword => {
                let function = self.parse_function_like(SyntaxKind::FunctionExpression, pos, start, None);
                Expression::FunctionExpression(function)
            }
            SyntaxKind::ClassKeyword => {
                Expression::ClassExpression(self.parse_class_like(SyntaxKind::ClassExpression, pos, start, None))
            }
            SyntaxKind::AtToken => {
                let modifiers = self.parse_modifiers(ModifierContext::Statement);
                if self.current_token() != SyntaxKind::ClassKeyword {
                    self.error(&messages::_0_EXPECTED, &["class"]);
                }
                Expression::ClassExpression(self.parse_class_like(SyntaxKind::ClassExpression, pos, start, modifiers))
            }
            _ if self.is_identifier() => Expression::Identifier(self.identifier_from_token()),
            _ => {
                self.error(&messages::EXPRESSION_EXPECTED, &[]);
                self.missing_expression()
            }
        }
    }

    fn parse_template_expression(&mut self) -> Expression<'a> {
        let (pos, start) = self.mark();
        let head = self.parse_token_node();
        let spans_pos = self.scanner.full_start();
        let mut spans = Vec::new();
        loop {
            let (span_pos, span_start) = self.mark();
            let expression = self.with_in_allowed(|p| p.parse_expression_and_alloc());
            let literal = self.parse_template_span_literal();
            let done = literal.data.kind != SyntaxKind::TemplateMiddle;
            spans.push(TemplateSpan {
                data: self.finish(SyntaxKind::TemplateSpan, span_pos, span_start),
                expression,
                literal,
            });
            if done {
                break;
            }
        }
        let spans_end = self.prev_token_end.max(spans_pos);
        Expression::TemplateExpression(TemplateExpression {
            data: self.finish(SyntaxKind::TemplateExpression, pos, start),
            head,
            template_spans: NodeArray::new(alloc_vec_in(self.arena, spans), spans_pos, spans_end, false),
        })
    }

    /// The template middle or tail that closes a substitution; it starts
    /// at the `}`.
    fn parse_template_span_literal(&mut self) -> Token {
        if self.current_token() == SyntaxKind::CloseBraceToken {
            self.scanner.rescan_template_token();
            return self.parse_token_node();
        }
        self.error(&messages::_0_EXPECTED, &["}"]);
        Token { data: self.missing(SyntaxKind::TemplateTail) }
    }

    fn parse_array_literal(&mut self) -> Expression<'a> {
        let (pos, start) = self.mark();
        self.next_token();
        let elements = self.with_in_allowed(|p| {
            p.parse_delimited_list(SyntaxKind::CloseBracketToken, |p| {
                if p.current_token() == SyntaxKind::CommaToken {
                    let (pos, start) = p.mark();
                    return Expression::OmittedExpression(p.finish(SyntaxKind::OmittedExpression, pos, start));
                }
                p.parse_spread_or_assignment_expression()
            })
        });
        self.expect_token(SyntaxKind::CloseBracketToken);
        Expression::ArrayLiteral(ArrayLiteralExpression {
            data: self.finish(SyntaxKind::ArrayLiteralExpression, pos, start),
            elements,
        })
    }

    fn parse_object_literal(&mut self) -> Expression<'a> {
        let (pos, start) = self.mark();
        self.next_token();
        let properties = self.with_in_allowed(|p| {
            p.parse_delimited_list(SyntaxKind::CloseBraceToken, |p| p.parse_object_literal_element())
        });
        self.expect_token(SyntaxKind::CloseBraceToken);
        Expression::ObjectLiteral(ObjectLiteralExpression {
            data: self.finish(SyntaxKind::ObjectLiteralExpression, pos, start),
            properties,
        })
    }

    fn parse_object_literal_element(&mut self) -> ObjectLiteralElement<'a> {
        let (pos, start) = self.mark();
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let expression = self.parse_assignment_expression_and_alloc();
            return ObjectLiteralElement::SpreadAssignment(SpreadElement {
                data: self.finish(SyntaxKind::SpreadAssignment, pos, start),
                expression,
            });
        }

        let modifiers = self.parse_modifiers(ModifierContext::ObjectMember);
        if let Some(kind) = self.accessor_kind() {
            let accessor = self.parse_accessor(kind, pos, start, modifiers, ModifierContext::ObjectMember);
            return match kind {
                SyntaxKind::GetAccessor => ObjectLiteralElement::GetAccessor(accessor),
                _ => ObjectLiteralElement::SetAccessor(accessor),
            };
        }

        let asterisk_token = self.optional_token(SyntaxKind::AsteriskToken);
        let name = self.parse_property_name();
        let question_token = self.optional_token(SyntaxKind::QuestionToken);

        if modifiers.is_some()
            || asterisk_token.is_some()
            || matches!(self.current_token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken)
        {
            let method = self.parse_method_rest(pos, start, modifiers, asterisk_token, name, question_token, false);
            return ObjectLiteralElement::MethodDeclaration(method);
        }

        match name {
            PropertyName::Identifier(id)
                if matches!(
                    self.current_token(),
                    SyntaxKind::CommaToken | SyntaxKind::CloseBraceToken | SyntaxKind::EqualsToken
                ) =>
            {
                let object_assignment_initializer = self.parse_initializer();
                ObjectLiteralElement::ShorthandPropertyAssignment(ShorthandPropertyAssignment {
                    data: self.finish(SyntaxKind::ShorthandPropertyAssignment, pos, start),
                    name: id,
                    object_assignment_initializer,
                })
            }
            name => {
                self.expect_token(SyntaxKind::ColonToken);
                let initializer = self.parse_assignment_expression_and_alloc();
                ObjectLiteralElement::PropertyAssignment(PropertyAssignment {
                    data: self.finish(SyntaxKind::PropertyAssignment, pos, start),
                    name,
                    initializer,
                })
            }
        }
    }

    // ========================================================================
    // Types
    // ========================================================================

    fn missing_type(&mut self) -> TypeNode<'a> {
        TypeNode::MissingType(self.missing(SyntaxKind::MissingType))
    }

    fn parse_type_and_alloc(&mut self) -> &'a TypeNode<'a> {
        let type_node = self.parse_type();
        self.arena.alloc(type_node)
    }

    /// Run `f` with conditional types allowed, as inside brackets.
    fn with_conditional_types_allowed<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.in_conditional_extends, false);
        let result = f(self);
        self.in_conditional_extends = saved;
        result
    }

    fn parse_type(&mut self) -> TypeNode<'a> {
        self.with_recursion_guard(|p| p.missing_type(), |p| p.parse_type_worker())
    }

    fn parse_type_worker(&mut self) -> TypeNode<'a> {
        if self.is_start_of_function_type_or_constructor_type() {
            return self.parse_function_or_constructor_type();
        }
        let check_type = self.parse_union_type_or_higher();
        if self.in_conditional_extends
            || self.has_preceding_line_break()
            || self.current_token() != SyntaxKind::ExtendsKeyword
        {
            return check_type;
        }

        // `A extends B ? C : D`; the extends type may not itself be conditional.
        let first = *check_type.data();
        self.next_token();
        let saved = std::mem::replace(&mut self.in_conditional_extends, true);
        let extends_type = self.parse_type_and_alloc();
        self.in_conditional_extends = false;
        self.expect_token(SyntaxKind::QuestionToken);
        let true_type = self.parse_type_and_alloc();
        self.expect_token(SyntaxKind::ColonToken);
        let false_type = self.parse_type_and_alloc();
        self.in_conditional_extends = saved;
        TypeNode::ConditionalType(ConditionalTypeNode {
            data: self.finish_from(SyntaxKind::ConditionalType, &first),
            check_type: self.arena.alloc(check_type),
            extends_type,
            true_type,
            false_type,
        })
    }

    /// Return type positions, where `x is T` and `asserts x` are allowed.
    fn parse_type_or_type_predicate(&mut self) -> TypeNode<'a> {
        let (pos, start) = self.mark();
        let is_asserts = self.current_token() == SyntaxKind::AssertsKeyword
            && self.look_ahead(|p| {
                p.next_token();
                !p.has_preceding_line_break() && (p.is_identifier() || p.current_token() == SyntaxKind::ThisKeyword)
            });
        let asserts_modifier = if is_asserts { Some(self.parse_token_node()) } else { None };

        let is_predicate = asserts_modifier.is_some()
            || ((self.is_identifier() || self.current_token() == SyntaxKind::ThisKeyword)
                && self.look_ahead(|p| p.next_token() == SyntaxKind::IsKeyword && !p.has_preceding_line_break()));
        if !is_predicate {
            return self.parse_type();
        }

        let parameter_name = if self.current_token() == SyntaxKind::ThisKeyword {
            let (this_pos, this_start) = self.mark();
            self.next_token();
            TypePredicateParameterName::ThisType(self.finish(SyntaxKind::ThisType, this_pos, this_start))
        } else {
            TypePredicateParameterName::Identifier(self.parse_identifier())
        };
        let type_node = if self.current_token() == SyntaxKind::IsKeyword && !self.has_preceding_line_break() {
            self.next_token();
            Some(self.parse_type_and_alloc())
        } else {
            None
        };
        TypeNode::TypePredicate(TypePredicateNode {
            data: self.finish(SyntaxKind::TypePredicate, pos, start),
            asserts_modifier,
            parameter_name,
            type_node,
        })
    }

    // ---- Function and constructor types ----

    fn is_start_of_function_type_or_constructor_type(&mut self) -> bool {
        match self.current_token() {
            SyntaxKind::LessThanToken | SyntaxKind::NewKeyword => true,
            SyntaxKind::OpenParenToken => self.look_ahead(|p| p.is_unambiguously_start_of_function_type()),
            SyntaxKind::AbstractKeyword => self.next_token_is(SyntaxKind::NewKeyword),
            _ => false,
        }
    }

    /// Lookahead from `(`: does a parameter list follow rather than a
    /// parenthesized type?
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
            if self.current_token() == SyntaxKind::CloseParenToken
                && self.next_token() == SyntaxKind::EqualsGreaterThanToken
            {
                return true;
            }
        }
        false
    }

    fn skip_parameter_start(&mut self) -> bool {
        if self.current_token().is_modifier_kind() {
            self.parse_modifiers(ModifierContext::Parameter);
        }
        if self.is_identifier() || self.current_token() == SyntaxKind::ThisKeyword {
            self.next_token();
            return true;
        }
        if matches!(self.current_token(), SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken) {
            let before = self.diagnostic_count();
            self.parse_binding_name();
            return self.diagnostic_count() == before;
        }
        false
    }

    fn parse_function_or_constructor_type(&mut self) -> TypeNode<'a> {
        let (pos, start) = self.mark();
        let modifiers = if self.current_token() == SyntaxKind::AbstractKeyword {
            let token = self.parse_token_node();
            let range = token.data.range;
            let modifiers = alloc_vec_in(self.arena, vec![ModifierLike::Modifier(token)]);
            Some(NodeArray::new(modifiers, range.pos, range.end, false))
        } else {
            None
        };
        let is_constructor = self.parse_optional(SyntaxKind::NewKeyword);
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        self.expect_token(SyntaxKind::EqualsGreaterThanToken);
        let return_type = self.with_conditional_types_allowed(|p| p.parse_type_or_type_predicate());
        let node = FunctionTypeNode {
            data: self.finish(
                if is_constructor { SyntaxKind::ConstructorType } else { SyntaxKind::FunctionType },
                pos,
                start,
            ),
            modifiers,
            type_parameters,
            parameters,
            type_node: self.arena.alloc(return_type),
        };
        if is_constructor {
            TypeNode::ConstructorType(node)
        } else {
            TypeNode::FunctionType(node)
        }
    }

    // ---- Unions, intersections and operators ----

    fn parse_union_type_or_higher(&mut self) -> TypeNode<'a> {
        self.parse_union_or_intersection_type(SyntaxKind::BarToken, |p| p.parse_intersection_type_or_higher())
    }

    fn parse_intersection_type_or_higher(&mut self) -> TypeNode<'a> {
        self.parse_union_or_intersection_type(SyntaxKind::AmpersandToken, |p| p.parse_type_operator_or_higher())
    }

    /// A leading operator always produces a union/intersection node, even
    /// around a single member, so that the operator keeps a home in the tree.
    fn parse_union_or_intersection_type(
        &mut self,
        operator: SyntaxKind,
        mut parse_constituent: impl FnMut(&mut Self) -> TypeNode<'a>,
    ) -> TypeNode<'a> {
        let (pos, start) = self.mark();
        let has_leading_operator = self.parse_optional(operator);
        let first = if has_leading_operator && self.is_start_of_function_type_or_constructor_type() {
            self.parse_function_or_constructor_type()
        } else {
            parse_constituent(self)
        };
        if !has_leading_operator && self.current_token() != operator {
            return first;
        }

        let types_pos = first.pos();
        let mut types = vec![first];
        while self.parse_optional(operator) {
            let constituent = if self.is_start_of_function_type_or_constructor_type() {
                self.parse_function_or_constructor_type()
            } else {
                parse_constituent(self)
            };
            types.push(constituent);
        }
        let types_end = self.prev_token_end.max(types_pos);
        let kind = if operator == SyntaxKind::BarToken {
            SyntaxKind::UnionType
        } else {
            SyntaxKind::IntersectionType
        };
        let node = UnionOrIntersectionTypeNode {
            data: self.finish(kind, pos, start),
            types: NodeArray::new(alloc_vec_in(self.arena, types), types_pos, types_end, false),
        };
        if kind == SyntaxKind::UnionType {
            TypeNode::UnionType(node)
        } else {
            TypeNode::IntersectionType(node)
        }
    }

    fn parse_type_operator_or_higher(&mut self) -> TypeNode<'a> {
        let (pos, start) = self.mark();
        match self.current_token() {
            operator @ (SyntaxKind::KeyOfKeyword | SyntaxKind::UniqueKeyword | SyntaxKind::ReadonlyKeyword) => {
                self.next_token();
                let operand =
                    self.with_recursion_guard(|p| p.missing_type(), |p| p.parse_type_operator_or_higher());
                TypeNode::TypeOperator(TypeOperatorNode {
                    data: self.finish(SyntaxKind::TypeOperator, pos, start),
                    operator,
                    type_node: self.arena.alloc(operand),
                })
            }
            SyntaxKind::InferKeyword => self.parse_infer_type(),
            _ => self.parse_postfix_type_or_higher(),
        }
    }

    /// `infer X` or `infer X extends C`. The constraint is only taken when
    /// it cannot be the start of the enclosing conditional's `extends`.
    fn parse_infer_type(&mut self) -> TypeNode<'a> {
        let (pos, start) = self.mark();
        self.next_token();
        let (param_pos, param_start) = self.mark();
        let name = self.parse_identifier();
        let constraint = self.try_parse_clean(|p| {
            if !p.parse_optional(SyntaxKind::ExtendsKeyword) {
                return None;
            }
            let saved = std::mem::replace(&mut p.in_conditional_extends, true);
            let constraint = p.parse_type();
            p.in_conditional_extends = saved;
            if p.in_conditional_extends || p.current_token() != SyntaxKind::QuestionToken {
                let constraint: &'a TypeNode<'a> = p.arena.alloc(constraint);
                Some(constraint)
            } else {
                None
            }
        });
        let type_parameter = TypeParameterDeclaration {
            data: self.finish(SyntaxKind::TypeParameter, param_pos, param_start),
            modifiers: None,
            name,
            constraint,
            default: None,
        };
        TypeNode::InferType(InferTypeNode {
            data: self.finish(SyntaxKind::InferType, pos, start),
            type_parameter,
        })
    }

    /// `T[]` and `T[K]`; the `[` must be on the same line.
    fn parse_postfix_type_or_higher(&mut self) -> TypeNode<'a> {
        let mut type_node = self.parse_non_array_type();
        while self.current_token() == SyntaxKind::OpenBracketToken && !self.has_preceding_line_break() {
            let first = *type_node.data();
            self.next_token();
            if self.parse_optional(SyntaxKind::CloseBracketToken) {
                type_node = TypeNode::ArrayType(ArrayTypeNode {
                    data: self.finish_from(SyntaxKind::ArrayType, &first),
                    element_type: self.arena.alloc(type_node),
                });
            } else {
                let index_type = self.with_conditional_types_allowed(|p| p.parse_type_and_alloc());
                self.expect_token(SyntaxKind::CloseBracketToken);
                type_node = TypeNode::IndexedAccessType(IndexedAccessTypeNode {
                    data: self.finish_from(SyntaxKind::IndexedAccessType, &first),
                    object_type: self.arena.alloc(type_node),
                    index_type,
                });
            }
        }
        type_node
    }

    /// The target of `as`, `satisfies` and `<T>x`. `const` there names a
    /// type reference of its own.
    fn parse_assertion_type(&mut self) -> &'a TypeNode<'a> {
        if self.current_token() != SyntaxKind::ConstKeyword {
            return self.parse_type_and_alloc();
        }
        let (pos, start) = self.mark();
        let name = self.identifier_from_token();
        let node = TypeNode::TypeReference(TypeReferenceNode {
            data: self.finish(SyntaxKind::TypeReference, pos, start),
            type_name: EntityName::Identifier(name),
            type_arguments: None,
        });
        self.arena.alloc(node)
    }

    // ---- Primary types ----

    fn parse_non_array_type(&mut self) -> TypeNode<'a> {
        let (pos, start) = self.mark();
        let token = self.current_token();
        match token {
            _ if token.is_keyword_type() && !self.next_token_is(SyntaxKind::DotToken) => {
                self.next_token();
                TypeNode::KeywordType(self.finish(token, pos, start))
            }
            SyntaxKind::ThisKeyword => {
                self.next_token();
                TypeNode::ThisType(self.finish(SyntaxKind::ThisType, pos, start))
            }
            SyntaxKind::NullKeyword | SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                let literal = self.parse_primary_expression();
                self.literal_type(literal, pos, start)
            }
            SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral => {
                let literal = self.parse_primary_expression();
                self.literal_type(literal, pos, start)
            }
            SyntaxKind::MinusToken
                if self.look_ahead(|p| {
                    matches!(p.next_token(), SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral)
                }) =>
            {
                self.next_token();
                let operand = self.parse_literal_expression();
                let operand = if operand.data.kind == SyntaxKind::BigIntLiteral {
                    Expression::BigIntLiteral(operand)
                } else {
                    Expression::NumericLiteral(operand)
                };
                let literal = Expression::PrefixUnary(PrefixUnaryExpression {
                    data: self.finish(SyntaxKind::PrefixUnaryExpression, pos, start),
                    operator: SyntaxKind::MinusToken,
                    operand: self.arena.alloc(operand),
                });
                self.literal_type(literal, pos, start)
            }
            SyntaxKind::TemplateHead => self.parse_template_literal_type(),
            SyntaxKind::TypeOfKeyword => {
                if self.next_token_is(SyntaxKind::ImportKeyword) {
                    self.parse_import_type()
                } else {
                    self.parse_type_query()
                }
            }
            SyntaxKind::ImportKeyword => self.parse_import_type(),
            SyntaxKind::OpenBraceToken => {
                if self.look_ahead(|p| p.is_start_of_mapped_type()) {
                    self.parse_mapped_type()
                } else {
                    let members = self.with_conditional_types_allowed(|p| p.parse_object_type_members());
                    TypeNode::TypeLiteral(TypeLiteralNode {
                        data: self.finish(SyntaxKind::TypeLiteral, pos, start),
                        members,
                    })
                }
            }
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let inner = self.with_conditional_types_allowed(|p| p.parse_type_and_alloc());
                self.expect_token(SyntaxKind::CloseParenToken);
                TypeNode::ParenthesizedType(WrappedTypeNode {
                    data: self.finish(SyntaxKind::ParenthesizedType, pos, start),
                    type_node: inner,
                })
            }
            _ if self.is_identifier() => {
                let type_name = self.parse_entity_name();
                let type_arguments = self.parse_type_arguments();
                TypeNode::TypeReference(TypeReferenceNode {
                    data: self.finish(SyntaxKind::TypeReference, pos, start),
                    type_name,
                    type_arguments,
                })
            }
            _ => {
                self.error(&messages::TYPE_EXPECTED, &[]);
                self.missing_type()
            }
        }
    }

    fn literal_type(&mut self, literal: Expression<'a>, pos: TextPos, start: TextPos) -> TypeNode<'a> {
        TypeNode::LiteralType(LiteralTypeNode {
            data: self.finish(SyntaxKind::LiteralType, pos, start),
            literal: self.arena.alloc(literal),
        })
    }

    /// `typeof a.b<T>`.
    fn parse_type_query(&mut self) -> TypeNode<'a> {
        let (pos, start) = self.mark();
        self.next_token();
        let expr_name = self.parse_entity_name();
        let type_arguments = self.parse_type_arguments();
        TypeNode::TypeQuery(TypeQueryNode {
            data: self.finish(SyntaxKind::TypeQuery, pos, start),
            expr_name,
            type_arguments,
        })
    }

    /// `[typeof] import("m")[.Qualifier][<T>]`.
    fn parse_import_type(&mut self) -> TypeNode<'a> {
        let (pos, start) = self.mark();
        let is_type_of = self.parse_optional(SyntaxKind::TypeOfKeyword);
        self.expect_token(SyntaxKind::ImportKeyword);
        self.expect_token(SyntaxKind::OpenParenToken);
        let argument = self.parse_type_and_alloc();
        self.expect_token(SyntaxKind::CloseParenToken);
        let qualifier = if self.parse_optional(SyntaxKind::DotToken) {
            Some(self.parse_entity_name())
        } else {
            None
        };
        let type_arguments = self.parse_type_arguments();
        TypeNode::ImportType(ImportTypeNode {
            data: self.finish(SyntaxKind::ImportType, pos, start),
            is_type_of,
            argument,
            qualifier,
            type_arguments,
        })
    }

    /// Lookahead from `{`: `[+|-]readonly? [K in`.
    fn is_start_of_mapped_type(&mut self) -> bool {
        self.next_token();
        if matches!(self.current_token(), SyntaxKind::PlusToken | SyntaxKind::MinusToken) {
            return self.next_token() == SyntaxKind::ReadonlyKeyword;
        }
        if self.current_token() == SyntaxKind::ReadonlyKeyword {
            self.next_token();
        }
        if self.current_token() != SyntaxKind::OpenBracketToken {
            return false;
        }
        self.next_token();
        self.is_identifier() && self.next_token() == SyntaxKind::InKeyword
    }

    fn parse_mapped_type(&mut self) -> TypeNode<'a> {
        let (pos, start) = self.mark();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let readonly_token = match self.current_token() {
            SyntaxKind::PlusToken | SyntaxKind::MinusToken => {
                let token = self.parse_token_node();
                self.expect_token(SyntaxKind::ReadonlyKeyword);
                Some(token)
            }
            SyntaxKind::ReadonlyKeyword => Some(self.parse_token_node()),
            _ => None,
        };
        self.expect_token(SyntaxKind::OpenBracketToken);
        let (param_pos, param_start) = self.mark();
        let name = self.parse_identifier();
        self.expect_token(SyntaxKind::InKeyword);
        let constraint = self.with_conditional_types_allowed(|p| p.parse_type_and_alloc());
        let type_parameter = TypeParameterDeclaration {
            data: self.finish(SyntaxKind::TypeParameter, param_pos, param_start),
            modifiers: None,
            name,
            constraint: Some(constraint),
            default: None,
        };
        let name_type = if self.parse_optional(SyntaxKind::AsKeyword) {
            Some(self.with_conditional_types_allowed(|p| p.parse_type_and_alloc()))
        } else {
            None
        };
        self.expect_token(SyntaxKind::CloseBracketToken);
        let question_token = match self.current_token() {
            SyntaxKind::PlusToken | SyntaxKind::MinusToken => {
                let token = self.parse_token_node();
                self.expect_token(SyntaxKind::QuestionToken);
                Some(token)
            }
            SyntaxKind::QuestionToken => Some(self.parse_token_node()),
            _ => None,
        };
        let type_node = if self.parse_optional(SyntaxKind::ColonToken) {
            Some(self.with_conditional_types_allowed(|p| p.parse_type_and_alloc()))
        } else {
            None
        };
        if !self.parse_optional(SyntaxKind::SemicolonToken) {
            self.parse_optional(SyntaxKind::CommaToken);
        }
        self.expect_token(SyntaxKind::CloseBraceToken);
        TypeNode::MappedType(MappedTypeNode {
            data: self.finish(SyntaxKind::MappedType, pos, start),
            readonly_token,
            type_parameter,
            name_type,
            question_token,
            type_node,
        })
    }

    fn parse_tuple_type(&mut self) -> TypeNode<'a> {
        let (pos, start) = self.mark();
        self.next_token();
        let elements = self.with_conditional_types_allowed(|p| {
            p.parse_delimited_list(SyntaxKind::CloseBracketToken, |p| p.parse_tuple_element())
        });
        self.expect_token(SyntaxKind::CloseBracketToken);
        TypeNode::TupleType(TupleTypeNode {
            data: self.finish(SyntaxKind::TupleType, pos, start),
            elements,
        })
    }

    /// Whether the tuple element at the current token (after any `...`)
    /// is named: `name:` or `name?:`.
    fn is_named_tuple_member(&mut self) -> bool {
        if !(self.is_identifier() || self.current_token().is_keyword()) {
            return false;
        }
        self.look_ahead(|p| match p.next_token() {
            SyntaxKind::ColonToken => true,
            SyntaxKind::QuestionToken => p.next_token() == SyntaxKind::ColonToken,
            _ => false,
        })
    }

    fn parse_tuple_element(&mut self) -> TypeNode<'a> {
        let (pos, start) = self.mark();
        let named = self.look_ahead(|p| {
            p.parse_optional(SyntaxKind::DotDotDotToken);
            p.is_named_tuple_member()
        });
        if named {
            let dot_dot_dot_token = self.optional_token(SyntaxKind::DotDotDotToken);
            let name = self.parse_identifier_name();
            let question_token = self.optional_token(SyntaxKind::QuestionToken);
            self.expect_token(SyntaxKind::ColonToken);
            let type_node = self.parse_type_and_alloc();
            return TypeNode::NamedTupleMember(NamedTupleMember {
                data: self.finish(SyntaxKind::NamedTupleMember, pos, start),
                dot_dot_dot_token,
                name,
                question_token,
                type_node,
            });
        }
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let type_node = self.parse_type_and_alloc();
            return TypeNode::RestType(WrappedTypeNode {
                data: self.finish(SyntaxKind::RestType, pos, start),
                type_node,
            });
        }
        let type_node = self.parse_type();
        if self.parse_optional(SyntaxKind::QuestionToken) {
            return TypeNode::OptionalType(WrappedTypeNode {
                data: self.finish(SyntaxKind::OptionalType, pos, start),
                type_node: self.arena.alloc(type_node),
            });
        }
        type_node
    }

    fn parse_template_literal_type(&mut self) -> TypeNode<'a> {
        let (pos, start) = self.mark();
        let head = self.parse_token_node();
        let spans_pos = self.scanner.full_start();
        let mut spans = Vec::new();
        loop {
            let (span_pos, span_start) = self.mark();
            let type_node = self.with_conditional_types_allowed(|p| p.parse_type_and_alloc());
            let literal = self.parse_template_span_literal();
            let done = literal.data.kind != SyntaxKind::TemplateMiddle;
            spans.push(TemplateLiteralTypeSpan {
                data: self.finish(SyntaxKind::TemplateLiteralTypeSpan, span_pos, span_start),
                type_node,
                literal,
            });
            if done {
                break;
            }
        }
        let spans_end = self.prev_token_end.max(spans_pos);
        TypeNode::TemplateLiteralType(TemplateLiteralTypeNode {
            data: self.finish(SyntaxKind::TemplateLiteralType, pos, start),
            head,
            template_spans: NodeArray::new(alloc_vec_in(self.arena, spans), spans_pos, spans_end, false),
        })
    }

    // ---- Type members ----

    /// `{ member; member }` for interfaces and type literals.
    fn parse_object_type_members(&mut self) -> NodeArray<'a, TypeElement<'a>> {
        if !self.expect_token(SyntaxKind::OpenBraceToken) {
            return NodeArray::empty(self.scanner.full_start());
        }
        let pos = self.scanner.full_start();
        let mut members = Vec::new();
        while !self.is_list_terminator(SyntaxKind::CloseBraceToken) {
            if self.is_start_of_type_member() {
                members.push(self.parse_type_member());
            } else {
                self.error(&messages::PROPERTY_OR_SIGNATURE_EXPECTED, &[]);
                self.next_token();
            }
        }
        let end = self.prev_token_end.max(pos);
        self.expect_token(SyntaxKind::CloseBraceToken);
        NodeArray::new(alloc_vec_in(self.arena, members), pos, end, false)
    }

    fn is_start_of_type_member(&self) -> bool {
        matches!(
            self.current_token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken | SyntaxKind::OpenBracketToken
        ) || is_literal_property_name(self.current_token())
    }

    fn parse_type_member(&mut self) -> TypeElement<'a> {
        let (pos, start) = self.mark();
        if matches!(self.current_token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            let signature = self.parse_signature_member(SyntaxKind::CallSignature, pos, start);
            return TypeElement::CallSignature(signature);
        }
        if self.current_token() == SyntaxKind::NewKeyword
            && self.look_ahead(|p| matches!(p.next_token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken))
        {
            self.next_token();
            let signature = self.parse_signature_member(SyntaxKind::ConstructSignature, pos, start);
            return TypeElement::ConstructSignature(signature);
        }

        let modifiers = self.parse_modifiers(ModifierContext::TypeMember);
        if let Some(kind) = self.accessor_kind() {
            let accessor = self.parse_accessor(kind, pos, start, modifiers, ModifierContext::TypeMember);
            return match kind {
                SyntaxKind::GetAccessor => TypeElement::GetAccessor(accessor),
                _ => TypeElement::SetAccessor(accessor),
            };
        }
        if self.is_index_signature() {
            return TypeElement::IndexSignature(self.parse_index_signature(pos, start, modifiers));
        }

        let name = self.parse_property_name();
        let question_token = self.optional_token(SyntaxKind::QuestionToken);
        if matches!(self.current_token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            let type_parameters = self.parse_type_parameters();
            let parameters = self.parse_parameters();
            let type_annotation = self.parse_return_type_annotation();
            self.parse_type_member_separator();
            return TypeElement::MethodSignature(MethodSignature {
                data: self.finish(SyntaxKind::MethodSignature, pos, start),
                modifiers,
                name,
                question_token,
                type_parameters,
                parameters,
                type_annotation,
            });
        }
        let type_annotation = self.parse_type_annotation();
        self.parse_type_member_separator();
        TypeElement::PropertySignature(PropertySignature {
            data: self.finish(SyntaxKind::PropertySignature, pos, start),
            modifiers,
            name,
            question_token,
            type_annotation,
        })
    }

    fn parse_signature_member(&mut self, kind: SyntaxKind, pos: TextPos, start: TextPos) -> SignatureDeclaration<'a> {
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        let type_annotation = self.parse_return_type_annotation();
        self.parse_type_member_separator();
        SignatureDeclaration {
            data: self.finish(kind, pos, start),
            type_parameters,
            parameters,
            type_annotation,
        }
    }
}
