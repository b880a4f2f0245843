//! Statements, declarations and the pieces they share: modifiers,
//! parameters, binding patterns and class members.

use crate::{Printer, ReprintError, Result};
use reprint_ast::*;
use tracing::trace;

impl Printer<'_> {
    pub(crate) fn print_statement(&mut self, statement: &Statement<'_>) -> Result<()> {
        trace!(kind = ?statement.kind(), cursor = self.ctx.cursor(), "statement");
        self.ctx.mark_cursor();
        self.print_statement_worker(statement)?;
        self.check_end(statement.data())?;
        self.claim_trailing_comments()?;
        self.ctx.mark_cursor();
        Ok(())
    }

    fn print_statement_worker(&mut self, statement: &Statement<'_>) -> Result<()> {
        match statement {
            Statement::Block(block) => self.print_block(block),
            Statement::EmptyStatement(_) => self.ctx.write_token(";"),
            Statement::VariableStatement(node) => {
                self.print_modifiers(&node.modifiers)?;
                self.print_variable_declaration_list(&node.declaration_list)?;
                self.print_optional_semicolon(&node.data)
            }
            Statement::ExpressionStatement(node) => {
                self.print_expression(node.expression)?;
                self.print_optional_semicolon(&node.data)
            }
            Statement::IfStatement(node) => {
                self.ctx.write_token("if")?;
                self.print_condition(node.expression)?;
                self.print_statement(node.then_statement)?;
                if let Some(else_statement) = node.else_statement {
                    self.ctx.write_token("else")?;
                    self.print_statement(else_statement)?;
                }
                Ok(())
            }
            Statement::DoStatement(node) => {
                self.ctx.write_token("do")?;
                self.print_statement(node.statement)?;
                self.ctx.write_token("while")?;
                self.print_condition(node.expression)?;
                self.print_optional_semicolon(&node.data)
            }
            Statement::WhileStatement(node) => {
                self.ctx.write_token("while")?;
                self.print_condition(node.expression)?;
                self.print_statement(node.statement)
            }
            Statement::WithStatement(node) => {
                self.ctx.write_token("with")?;
                self.print_condition(node.expression)?;
                self.print_statement(node.statement)
            }
            Statement::ForStatement(node) => self.print_for_statement(node),
            Statement::ForInStatement(node) => self.print_for_in_or_of_statement(node, "in"),
            Statement::ForOfStatement(node) => self.print_for_in_or_of_statement(node, "of"),
            Statement::ContinueStatement(node) => self.print_jump_statement("continue", node),
            Statement::BreakStatement(node) => self.print_jump_statement("break", node),
            Statement::ReturnStatement(node) => {
                self.ctx.write_token("return")?;
                if let Some(expression) = node.expression {
                    self.print_expression(expression)?;
                }
                self.print_optional_semicolon(&node.data)
            }
            Statement::SwitchStatement(node) => self.print_switch_statement(node),
            Statement::LabeledStatement(node) => {
                self.ctx.emit_leaf(&node.label.data)?;
                self.ctx.write_token(":")?;
                self.print_statement(node.statement)
            }
            Statement::ThrowStatement(node) => {
                self.ctx.write_token("throw")?;
                self.print_expression(node.expression)?;
                self.print_optional_semicolon(&node.data)
            }
            Statement::TryStatement(node) => self.print_try_statement(node),
            Statement::DebuggerStatement(data) => {
                self.ctx.write_token("debugger")?;
                self.print_optional_semicolon(data)
            }
            Statement::FunctionDeclaration(node) => self.print_function_like(node),
            Statement::ClassDeclaration(node) => self.print_class_like(node),
            Statement::InterfaceDeclaration(node) => self.print_interface_declaration(node),
            Statement::TypeAliasDeclaration(node) => {
                self.print_modifiers(&node.modifiers)?;
                self.ctx.write_token("type")?;
                self.ctx.emit_leaf(&node.name.data)?;
                self.print_type_parameters(&node.type_parameters)?;
                self.ctx.write_token("=")?;
                self.print_type(node.type_node)?;
                self.print_optional_semicolon(&node.data)
            }
            Statement::EnumDeclaration(node) => self.print_enum_declaration(node),
            Statement::ModuleDeclaration(node) => self.print_module_declaration(node),
            Statement::ImportDeclaration(node) => self.print_import_declaration(node),
            Statement::ImportEqualsDeclaration(node) => self.print_import_equals_declaration(node),
            Statement::ExportDeclaration(node) => self.print_export_declaration(node),
            Statement::ExportAssignment(node) => {
                self.print_modifiers(&node.modifiers)?;
                self.ctx.write_token("export")?;
                self.ctx.write_token(if node.is_export_equals { "=" } else { "default" })?;
                self.print_expression(node.expression)?;
                self.print_optional_semicolon(&node.data)
            }
            Statement::MissingDeclaration(data) => Err(ReprintError::UnknownNodeKind {
                kind: data.kind,
                pos: data.start,
            }),
        }
    }

    pub(crate) fn print_block(&mut self, block: &Block<'_>) -> Result<()> {
        self.ctx.write_token("{")?;
        self.print_statements(&block.statements)?;
        self.ctx.write_token("}")?;
        self.claim_trailing_comments()
    }

    fn print_statements(&mut self, statements: &NodeArray<'_, Statement<'_>>) -> Result<()> {
        for statement in statements {
            self.print_statement(statement)?;
        }
        Ok(())
    }

    /// `( expr )` after `if`, `while`, `with` and `switch`.
    fn print_condition(&mut self, expression: &Expression<'_>) -> Result<()> {
        self.ctx.write_token("(")?;
        self.print_expression(expression)?;
        self.ctx.write_token(")")
    }

    fn print_variable_declaration_list(&mut self, list: &VariableDeclarationList<'_>) -> Result<()> {
        let flags = list.data.flags;
        if flags.contains(NodeFlags::AWAIT_USING) {
            self.ctx.write_token("await")?;
            self.ctx.write_token("using")?;
        } else if flags.contains(NodeFlags::USING) {
            self.ctx.write_token("using")?;
        } else if flags.contains(NodeFlags::CONST) {
            self.ctx.write_token("const")?;
        } else if flags.contains(NodeFlags::LET) {
            self.ctx.write_token("let")?;
        } else {
            self.ctx.write_token("var")?;
        }
        self.print_list(&list.declarations, |p, declaration| {
            p.print_variable_declaration(declaration)
        })
    }

    fn print_variable_declaration(&mut self, declaration: &VariableDeclaration<'_>) -> Result<()> {
        self.print_binding_name(&declaration.name)?;
        self.print_optional_leaf(declaration.exclamation_token.as_ref())?;
        self.print_type_annotation(declaration.type_annotation)?;
        self.print_initializer(declaration.initializer)
    }

    fn print_for_initializer(&mut self, initializer: &ForInitializer<'_>) -> Result<()> {
        match initializer {
            ForInitializer::VariableDeclarationList(list) => self.print_variable_declaration_list(list),
            ForInitializer::Expression(expression) => self.print_expression(expression),
        }
    }

    fn print_for_statement(&mut self, node: &ForStatement<'_>) -> Result<()> {
        self.ctx.write_token("for")?;
        self.ctx.write_token("(")?;
        if let Some(initializer) = &node.initializer {
            self.print_for_initializer(initializer)?;
        }
        self.ctx.write_token(";")?;
        if let Some(condition) = node.condition {
            self.print_expression(condition)?;
        }
        self.ctx.write_token(";")?;
        if let Some(incrementor) = node.incrementor {
            self.print_expression(incrementor)?;
        }
        self.ctx.write_token(")")?;
        self.print_statement(node.statement)
    }

    fn print_for_in_or_of_statement(
        &mut self,
        node: &ForInOrOfStatement<'_>,
        keyword: &'static str,
    ) -> Result<()> {
        self.ctx.write_token("for")?;
        self.print_optional_leaf(node.await_modifier.as_ref())?;
        self.ctx.write_token("(")?;
        self.print_for_initializer(&node.initializer)?;
        self.ctx.write_token(keyword)?;
        self.print_expression(node.expression)?;
        self.ctx.write_token(")")?;
        self.print_statement(node.statement)
    }

    fn print_jump_statement(&mut self, keyword: &'static str, node: &JumpStatement<'_>) -> Result<()> {
        self.ctx.write_token(keyword)?;
        self.print_optional_leaf(node.label.as_ref())?;
        self.print_optional_semicolon(&node.data)
    }

    fn print_switch_statement(&mut self, node: &SwitchStatement<'_>) -> Result<()> {
        self.ctx.write_token("switch")?;
        self.print_condition(node.expression)?;
        self.ctx.write_token("{")?;
        for clause in &node.case_block.clauses {
            match clause.expression {
                Some(expression) => {
                    self.ctx.write_token("case")?;
                    self.print_expression(expression)?;
                }
                None => self.ctx.write_token("default")?,
            }
            self.ctx.write_token(":")?;
            self.print_statements(&clause.statements)?;
        }
        self.ctx.write_token("}")
    }

    fn print_try_statement(&mut self, node: &TryStatement<'_>) -> Result<()> {
        self.ctx.write_token("try")?;
        self.print_block(&node.try_block)?;
        if let Some(catch_clause) = &node.catch_clause {
            self.ctx.write_token("catch")?;
            if let Some(declaration) = &catch_clause.variable_declaration {
                self.ctx.write_token("(")?;
                self.print_variable_declaration(declaration)?;
                self.ctx.write_token(")")?;
            }
            self.print_block(&catch_clause.block)?;
        }
        if let Some(finally_block) = &node.finally_block {
            self.ctx.write_token("finally")?;
            self.print_block(finally_block)?;
        }
        Ok(())
    }

    // ========================================================================
    // Modifiers, parameters and bindings
    // ========================================================================

    pub(crate) fn print_modifiers(&mut self, modifiers: &Modifiers<'_>) -> Result<()> {
        let Some(modifiers) = modifiers else {
            return Ok(());
        };
        for modifier in modifiers {
            match modifier {
                ModifierLike::Modifier(token) => self.ctx.emit_leaf(&token.data)?,
                ModifierLike::Decorator(decorator) => {
                    self.ctx.write_token("@")?;
                    self.print_expression(decorator.expression)?;
                }
            }
        }
        Ok(())
    }

    pub(crate) fn print_type_annotation(&mut self, type_node: Option<&TypeNode<'_>>) -> Result<()> {
        match type_node {
            Some(type_node) => {
                self.ctx.write_token(":")?;
                self.print_type(type_node)
            }
            None => Ok(()),
        }
    }

    pub(crate) fn print_initializer(&mut self, initializer: Option<&Expression<'_>>) -> Result<()> {
        match initializer {
            Some(initializer) => {
                self.ctx.write_token("=")?;
                self.print_expression(initializer)
            }
            None => Ok(()),
        }
    }

    pub(crate) fn print_parameters(
        &mut self,
        parameters: &NodeArray<'_, ParameterDeclaration<'_>>,
    ) -> Result<()> {
        self.ctx.write_token("(")?;
        self.print_list(parameters, |p, parameter| p.print_parameter(parameter))?;
        self.ctx.write_token(")")
    }

    pub(crate) fn print_parameter(&mut self, parameter: &ParameterDeclaration<'_>) -> Result<()> {
        self.print_modifiers(&parameter.modifiers)?;
        self.print_optional_leaf(parameter.dot_dot_dot_token.as_ref())?;
        self.print_binding_name(&parameter.name)?;
        self.print_optional_leaf(parameter.question_token.as_ref())?;
        self.print_type_annotation(parameter.type_annotation)?;
        self.print_initializer(parameter.initializer)
    }

    /// Type parameters, parameters and return type of any signature.
    pub(crate) fn print_signature(
        &mut self,
        type_parameters: &TypeParameters<'_>,
        parameters: &NodeArray<'_, ParameterDeclaration<'_>>,
        return_type: Option<&TypeNode<'_>>,
    ) -> Result<()> {
        self.print_type_parameters(type_parameters)?;
        self.print_parameters(parameters)?;
        self.print_type_annotation(return_type)
    }

    fn print_binding_name(&mut self, name: &BindingName<'_>) -> Result<()> {
        match name {
            BindingName::Identifier(identifier) => self.ctx.emit_leaf(&identifier.data),
            BindingName::ObjectBindingPattern(pattern) => {
                self.ctx.write_token("{")?;
                self.print_list(&pattern.elements, |p, element| p.print_binding_element(element))?;
                self.ctx.write_token("}")
            }
            BindingName::ArrayBindingPattern(pattern) => {
                self.ctx.write_token("[")?;
                self.print_list(&pattern.elements, |p, element| match element {
                    ArrayBindingElement::BindingElement(element) => p.print_binding_element(element),
                    // Zero width; only its separator shows.
                    ArrayBindingElement::OmittedExpression(_) => Ok(()),
                })?;
                self.ctx.write_token("]")
            }
        }
    }

    fn print_binding_element(&mut self, element: &BindingElement<'_>) -> Result<()> {
        self.print_optional_leaf(element.dot_dot_dot_token.as_ref())?;
        if let Some(property_name) = &element.property_name {
            self.print_property_name(property_name)?;
            self.ctx.write_token(":")?;
        }
        self.print_binding_name(&element.name)?;
        self.print_initializer(element.initializer)
    }

    // ========================================================================
    // Functions and classes
    // ========================================================================

    /// Function declarations and function expressions.
    pub(crate) fn print_function_like(&mut self, node: &FunctionDeclaration<'_>) -> Result<()> {
        self.print_modifiers(&node.modifiers)?;
        self.ctx.write_token("function")?;
        self.print_optional_leaf(node.asterisk_token.as_ref())?;
        self.print_optional_leaf(node.name.as_ref())?;
        self.print_signature(&node.type_parameters, &node.parameters, node.type_annotation)?;
        self.print_body_or_terminator(node.body.as_ref(), &node.data)
    }

    /// A body block, or the `;` of an overload or ambient signature.
    fn print_body_or_terminator(&mut self, body: Option<&Block<'_>>, data: &NodeData) -> Result<()> {
        match body {
            Some(body) => self.print_block(body),
            None => self.print_member_terminator(data),
        }
    }

    /// Class declarations and class expressions.
    pub(crate) fn print_class_like(&mut self, node: &ClassDeclaration<'_>) -> Result<()> {
        self.print_modifiers(&node.modifiers)?;
        self.ctx.write_token("class")?;
        self.print_optional_leaf(node.name.as_ref())?;
        self.print_type_parameters(&node.type_parameters)?;
        self.print_heritage_clauses(&node.heritage_clauses)?;
        self.ctx.write_token("{")?;
        for member in &node.members {
            self.print_class_element(member)?;
        }
        self.ctx.write_token("}")
    }

    fn print_heritage_clauses(
        &mut self,
        clauses: &Option<NodeArray<'_, HeritageClause<'_>>>,
    ) -> Result<()> {
        let Some(clauses) = clauses else {
            return Ok(());
        };
        for clause in clauses {
            self.ctx.write_token(crate::fixed_text(clause.token, clause.data.start)?)?;
            self.print_list(&clause.types, |p, heritage_type| {
                p.print_expression(heritage_type.expression)?;
                p.print_type_arguments(&heritage_type.type_arguments)
            })?;
        }
        Ok(())
    }

    fn print_class_element(&mut self, member: &ClassElement<'_>) -> Result<()> {
        trace!(kind = ?member.kind(), cursor = self.ctx.cursor(), "class element");
        self.print_class_element_worker(member)?;
        self.check_end(member.data())
    }

    fn print_class_element_worker(&mut self, member: &ClassElement<'_>) -> Result<()> {
        match member {
            ClassElement::PropertyDeclaration(node) => {
                self.print_modifiers(&node.modifiers)?;
                self.print_property_name(&node.name)?;
                self.print_optional_leaf(node.postfix_token.as_ref())?;
                self.print_type_annotation(node.type_annotation)?;
                self.print_initializer(node.initializer)?;
                self.print_optional_semicolon(&node.data)
            }
            ClassElement::MethodDeclaration(node) => self.print_method_declaration(node),
            ClassElement::Constructor(node) => {
                self.print_modifiers(&node.modifiers)?;
                self.ctx.write_token("constructor")?;
                self.print_parameters(&node.parameters)?;
                self.print_body_or_terminator(node.body.as_ref(), &node.data)
            }
            ClassElement::GetAccessor(node) | ClassElement::SetAccessor(node) => {
                self.print_accessor(node)
            }
            ClassElement::IndexSignature(node) => self.print_index_signature(node),
            ClassElement::ClassStaticBlockDeclaration(node) => {
                self.ctx.write_token("static")?;
                self.print_block(&node.body)
            }
            ClassElement::SemicolonClassElement(_) => self.ctx.write_token(";"),
        }
    }

    pub(crate) fn print_method_declaration(&mut self, node: &MethodDeclaration<'_>) -> Result<()> {
        self.print_modifiers(&node.modifiers)?;
        self.print_optional_leaf(node.asterisk_token.as_ref())?;
        self.print_property_name(&node.name)?;
        self.print_optional_leaf(node.question_token.as_ref())?;
        self.print_signature(&node.type_parameters, &node.parameters, node.type_annotation)?;
        self.print_body_or_terminator(node.body.as_ref(), &node.data)
    }

    /// `get` and `set` accessors in classes, object literals and type members.
    pub(crate) fn print_accessor(&mut self, node: &AccessorDeclaration<'_>) -> Result<()> {
        self.print_modifiers(&node.modifiers)?;
        let keyword = if node.data.kind == SyntaxKind::GetAccessor { "get" } else { "set" };
        self.ctx.write_token(keyword)?;
        self.print_property_name(&node.name)?;
        self.print_parameters(&node.parameters)?;
        self.print_type_annotation(node.type_annotation)?;
        self.print_body_or_terminator(node.body.as_ref(), &node.data)
    }

    pub(crate) fn print_index_signature(&mut self, node: &IndexSignatureDeclaration<'_>) -> Result<()> {
        self.print_modifiers(&node.modifiers)?;
        self.ctx.write_token("[")?;
        self.print_list(&node.parameters, |p, parameter| p.print_parameter(parameter))?;
        self.ctx.write_token("]")?;
        self.print_type_annotation(node.type_annotation)?;
        self.print_member_terminator(&node.data)
    }

    // ========================================================================
    // Interfaces, enums and modules
    // ========================================================================

    fn print_interface_declaration(&mut self, node: &InterfaceDeclaration<'_>) -> Result<()> {
        self.print_modifiers(&node.modifiers)?;
        self.ctx.write_token("interface")?;
        self.ctx.emit_leaf(&node.name.data)?;
        self.print_type_parameters(&node.type_parameters)?;
        self.print_heritage_clauses(&node.heritage_clauses)?;
        self.print_type_members(&node.members)
    }

    fn print_enum_declaration(&mut self, node: &EnumDeclaration<'_>) -> Result<()> {
        self.print_modifiers(&node.modifiers)?;
        self.ctx.write_token("enum")?;
        self.ctx.emit_leaf(&node.name.data)?;
        self.ctx.write_token("{")?;
        self.print_list(&node.members, |p, member| {
            p.print_property_name(&member.name)?;
            p.print_initializer(member.initializer)
        })?;
        self.ctx.write_token("}")
    }

    fn print_module_declaration(&mut self, node: &ModuleDeclaration<'_>) -> Result<()> {
        self.print_modifiers(&node.modifiers)?;
        let flags = node.data.flags;
        // `global` is its own name; the inner parts of `A.B.C` have no keyword.
        if !flags.intersects(NodeFlags::NESTED_NAMESPACE | NodeFlags::GLOBAL_AUGMENTATION) {
            let keyword = if flags.contains(NodeFlags::NAMESPACE) { "namespace" } else { "module" };
            self.ctx.write_token(keyword)?;
        }
        self.ctx.emit_leaf(node.name.data())?;
        match &node.body {
            Some(ModuleBody::ModuleBlock(block)) => {
                self.ctx.write_token("{")?;
                self.print_statements(&block.statements)?;
                self.ctx.write_token("}")
            }
            Some(ModuleBody::ModuleDeclaration(inner)) => {
                self.ctx.write_token(".")?;
                self.print_module_declaration(inner)?;
                self.check_end(&inner.data)
            }
            None => self.print_optional_semicolon(&node.data),
        }
    }

    // ========================================================================
    // Imports and exports
    // ========================================================================

    fn print_import_declaration(&mut self, node: &ImportDeclaration<'_>) -> Result<()> {
        self.print_modifiers(&node.modifiers)?;
        self.ctx.write_token("import")?;
        if let Some(clause) = &node.import_clause {
            if clause.is_type_only {
                self.ctx.write_token("type")?;
            }
            self.print_optional_leaf(clause.name.as_ref())?;
            if let Some(bindings) = &clause.named_bindings {
                if clause.name.is_some() {
                    self.ctx.write_token(",")?;
                }
                match bindings {
                    NamedImportBindings::NamespaceImport(namespace) => {
                        self.print_namespace_binding(namespace)?
                    }
                    NamedImportBindings::NamedImports(named) => self.print_named_bindings(named)?,
                }
            }
            self.ctx.write_token("from")?;
        }
        self.ctx.emit_leaf(&node.module_specifier.data)?;
        self.print_optional_semicolon(&node.data)
    }

    /// `* as name`
    fn print_namespace_binding(&mut self, node: &NamespaceImport<'_>) -> Result<()> {
        self.ctx.write_token("*")?;
        self.ctx.write_token("as")?;
        self.ctx.emit_leaf(&node.name.data)
    }

    /// `{ a, type b, c as d }`
    fn print_named_bindings(&mut self, node: &NamedImports<'_>) -> Result<()> {
        self.ctx.write_token("{")?;
        self.print_list(&node.elements, |p, specifier| {
            if specifier.is_type_only {
                p.ctx.write_token("type")?;
            }
            if let Some(property_name) = &specifier.property_name {
                p.ctx.emit_leaf(&property_name.data)?;
                p.ctx.write_token("as")?;
            }
            p.ctx.emit_leaf(&specifier.name.data)
        })?;
        self.ctx.write_token("}")
    }

    fn print_import_equals_declaration(&mut self, node: &ImportEqualsDeclaration<'_>) -> Result<()> {
        self.print_modifiers(&node.modifiers)?;
        self.ctx.write_token("import")?;
        if node.is_type_only {
            self.ctx.write_token("type")?;
        }
        self.ctx.emit_leaf(&node.name.data)?;
        self.ctx.write_token("=")?;
        match &node.module_reference {
            ModuleReference::ExternalModuleReference(reference) => {
                self.ctx.write_token("require")?;
                self.ctx.write_token("(")?;
                self.ctx.emit_leaf(&reference.expression.data)?;
                self.ctx.write_token(")")?;
            }
            ModuleReference::EntityName(name) => self.print_entity_name(name)?,
        }
        self.print_optional_semicolon(&node.data)
    }

    fn print_export_declaration(&mut self, node: &ExportDeclaration<'_>) -> Result<()> {
        self.print_modifiers(&node.modifiers)?;
        self.ctx.write_token("export")?;
        if node.is_type_only {
            self.ctx.write_token("type")?;
        }
        match &node.export_clause {
            None => self.ctx.write_token("*")?,
            Some(NamedExportBindings::NamespaceExport(namespace)) => {
                self.print_namespace_binding(namespace)?
            }
            Some(NamedExportBindings::NamedExports(named)) => self.print_named_bindings(named)?,
        }
        if let Some(specifier) = &node.module_specifier {
            self.ctx.write_token("from")?;
            self.ctx.emit_leaf(&specifier.data)?;
        }
        self.print_optional_semicolon(&node.data)
    }
}
