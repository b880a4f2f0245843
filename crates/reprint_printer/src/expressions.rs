//! Expression routines.

use crate::{fixed_text, Printer, ReprintError, Result};
use reprint_ast::*;
use tracing::trace;

impl Printer<'_> {
    pub(crate) fn print_expression(&mut self, expression: &Expression<'_>) -> Result<()> {
        trace!(kind = ?expression.kind(), cursor = self.ctx.cursor(), "expression");
        self.ctx.mark_cursor();
        self.print_expression_worker(expression)?;
        self.check_end(expression.data())?;
        self.ctx.mark_cursor();
        Ok(())
    }

    fn print_expression_worker(&mut self, expression: &Expression<'_>) -> Result<()> {
        match expression {
            Expression::Identifier(node) => self.ctx.emit_leaf(&node.data),
            Expression::PrivateIdentifier(node) => self.ctx.emit_leaf(&node.data),
            Expression::StringLiteral(node)
            | Expression::NumericLiteral(node)
            | Expression::BigIntLiteral(node)
            | Expression::RegularExpressionLiteral(node)
            | Expression::NoSubstitutionTemplateLiteral(node) => self.ctx.emit_leaf(&node.data),
            Expression::ThisKeyword(data)
            | Expression::SuperKeyword(data)
            | Expression::NullKeyword(data)
            | Expression::TrueKeyword(data)
            | Expression::FalseKeyword(data)
            | Expression::ImportKeyword(data) => self.ctx.emit_leaf(data),
            // A hole in an array literal has no text of its own.
            Expression::OmittedExpression(_) => Ok(()),
            Expression::TemplateExpression(node) => {
                self.ctx.emit_leaf(&node.head.data)?;
                for span in &node.template_spans {
                    self.print_expression(span.expression)?;
                    self.ctx.emit_leaf(&span.literal.data)?;
                }
                Ok(())
            }
            Expression::ArrayLiteral(node) => {
                self.ctx.write_token("[")?;
                self.print_list(&node.elements, |p, element| p.print_expression(element))?;
                self.ctx.write_token("]")
            }
            Expression::ObjectLiteral(node) => {
                self.ctx.write_token("{")?;
                self.print_list(&node.properties, |p, property| {
                    p.print_object_literal_element(property)
                })?;
                self.ctx.write_token("}")
            }
            Expression::PropertyAccess(node) => {
                self.print_expression(node.expression)?;
                match &node.question_dot_token {
                    Some(token) => self.ctx.emit_leaf(&token.data)?,
                    None => self.ctx.write_token(".")?,
                }
                self.ctx.emit_leaf(node.name.data())
            }
            Expression::ElementAccess(node) => {
                self.print_expression(node.expression)?;
                self.print_optional_leaf(node.question_dot_token.as_ref())?;
                self.ctx.write_token("[")?;
                self.print_expression(node.argument_expression)?;
                self.ctx.write_token("]")
            }
            Expression::Call(node) => {
                self.print_expression(node.expression)?;
                self.print_optional_leaf(node.question_dot_token.as_ref())?;
                self.print_type_arguments(&node.type_arguments)?;
                self.print_arguments(&node.arguments)
            }
            Expression::New(node) => {
                self.ctx.write_token("new")?;
                self.print_expression(node.expression)?;
                self.print_type_arguments(&node.type_arguments)?;
                match &node.arguments {
                    Some(arguments) => self.print_arguments(arguments),
                    None => Ok(()),
                }
            }
            Expression::TaggedTemplate(node) => {
                self.print_expression(node.tag)?;
                self.print_type_arguments(&node.type_arguments)?;
                self.print_expression(node.template)
            }
            Expression::TypeAssertion(node) => {
                self.ctx.write_token("<")?;
                self.print_type(node.type_node)?;
                self.ctx.write_token(">")?;
                self.print_expression(node.expression)
            }
            Expression::Parenthesized(node) => {
                self.ctx.write_token("(")?;
                self.print_expression(node.expression)?;
                self.ctx.write_token(")")
            }
            Expression::FunctionExpression(node) => self.print_function_like(node),
            Expression::ArrowFunction(node) => self.print_arrow_function(node),
            Expression::Delete(node) => self.print_keyword_operand("delete", node),
            Expression::TypeOf(node) => self.print_keyword_operand("typeof", node),
            Expression::Void(node) => self.print_keyword_operand("void", node),
            Expression::Await(node) => self.print_keyword_operand("await", node),
            Expression::PrefixUnary(node) => {
                self.ctx.write_token(fixed_text(node.operator, node.data.start)?)?;
                self.print_expression(node.operand)
            }
            Expression::PostfixUnary(node) => {
                self.print_expression(node.operand)?;
                self.ctx.write_token(fixed_text(node.operator, node.data.start)?)
            }
            Expression::Binary(_) | Expression::As(_) | Expression::Satisfies(_) => {
                self.print_operator_chain(expression)
            }
            Expression::Conditional(node) => {
                self.print_expression(node.condition)?;
                self.ctx.write_token("?")?;
                self.print_expression(node.when_true)?;
                self.ctx.write_token(":")?;
                self.print_expression(node.when_false)
            }
            Expression::Yield(node) => {
                self.ctx.write_token("yield")?;
                self.print_optional_leaf(node.asterisk_token.as_ref())?;
                match node.expression {
                    Some(expression) => self.print_expression(expression),
                    None => Ok(()),
                }
            }
            Expression::Spread(node) => {
                self.ctx.write_token("...")?;
                self.print_expression(node.expression)
            }
            Expression::ClassExpression(node) => self.print_class_like(node),
            Expression::NonNull(node) => {
                self.print_expression(node.expression)?;
                self.ctx.write_token("!")
            }
            Expression::MetaProperty(node) => {
                self.ctx.write_token(fixed_text(node.keyword_token, node.data.start)?)?;
                self.ctx.write_token(".")?;
                self.ctx.emit_leaf(&node.name.data)
            }
            Expression::MissingExpression(data) => Err(ReprintError::UnknownNodeKind {
                kind: data.kind,
                pos: data.start,
            }),
        }
    }

    /// `a + b + c` and `x as A as B` nest to the left, one level per
    /// operator, so the left spine is walked with an explicit stack instead
    /// of recursion. Each level still gets its cursor marks and end check.
    fn print_operator_chain(&mut self, outermost: &Expression<'_>) -> Result<()> {
        let mut spine = Vec::new();
        let mut current = outermost;
        while let Some(left) = operator_left(current) {
            spine.push(current);
            current = left;
        }
        // The outermost level was entered by `print_expression`.
        for level in spine.iter().skip(1) {
            trace!(kind = ?level.kind(), cursor = self.ctx.cursor(), "expression");
            self.ctx.mark_cursor();
        }
        self.print_expression(current)?;
        for (depth, level) in spine.iter().enumerate().rev() {
            self.print_operator_rest(level)?;
            if depth > 0 {
                self.check_end(level.data())?;
                self.ctx.mark_cursor();
            }
        }
        Ok(())
    }

    /// Everything after the left operand.
    fn print_operator_rest(&mut self, expression: &Expression<'_>) -> Result<()> {
        match expression {
            Expression::Binary(node) => {
                self.ctx.emit_leaf(&node.operator_token.data)?;
                self.print_expression(node.right)
            }
            Expression::As(node) => {
                self.ctx.write_token("as")?;
                self.print_type(node.type_node)
            }
            Expression::Satisfies(node) => {
                self.ctx.write_token("satisfies")?;
                self.print_type(node.type_node)
            }
            other => Err(ReprintError::UnknownNodeKind {
                kind: other.kind(),
                pos: other.start(),
            }),
        }
    }

    fn print_keyword_operand(
        &mut self,
        keyword: &'static str,
        node: &UnaryKeywordExpression<'_>,
    ) -> Result<()> {
        self.ctx.write_token(keyword)?;
        self.print_expression(node.expression)
    }

    fn print_arguments(&mut self, arguments: &NodeArray<'_, Expression<'_>>) -> Result<()> {
        self.ctx.write_token("(")?;
        self.print_list(arguments, |p, argument| p.print_expression(argument))?;
        self.ctx.write_token(")")
    }

    fn print_arrow_function(&mut self, node: &ArrowFunction<'_>) -> Result<()> {
        self.print_modifiers(&node.modifiers)?;
        self.print_type_parameters(&node.type_parameters)?;
        if node.has_parenthesized_parameters {
            self.print_parameters(&node.parameters)?;
        } else {
            // `x => ...`
            for parameter in &node.parameters {
                self.print_parameter(parameter)?;
            }
        }
        self.print_type_annotation(node.type_annotation)?;
        self.ctx.emit_leaf(&node.equals_greater_than_token.data)?;
        match &node.body {
            ArrowFunctionBody::Block(block) => self.print_block(block),
            ArrowFunctionBody::Expression(expression) => self.print_expression(expression),
        }
    }

    fn print_object_literal_element(&mut self, element: &ObjectLiteralElement<'_>) -> Result<()> {
        trace!(kind = ?element.kind(), cursor = self.ctx.cursor(), "object literal element");
        self.print_object_literal_element_worker(element)?;
        self.check_end(element.data())
    }

    fn print_object_literal_element_worker(
        &mut self,
        element: &ObjectLiteralElement<'_>,
    ) -> Result<()> {
        match element {
            ObjectLiteralElement::PropertyAssignment(node) => {
                self.print_property_name(&node.name)?;
                self.ctx.write_token(":")?;
                self.print_expression(node.initializer)
            }
            ObjectLiteralElement::ShorthandPropertyAssignment(node) => {
                self.ctx.emit_leaf(&node.name.data)?;
                self.print_initializer(node.object_assignment_initializer)
            }
            ObjectLiteralElement::SpreadAssignment(node) => {
                self.ctx.write_token("...")?;
                self.print_expression(node.expression)
            }
            ObjectLiteralElement::MethodDeclaration(node) => self.print_method_declaration(node),
            ObjectLiteralElement::GetAccessor(node) | ObjectLiteralElement::SetAccessor(node) => {
                self.print_accessor(node)
            }
        }
    }
}

fn operator_left<'a>(expression: &Expression<'a>) -> Option<&'a Expression<'a>> {
    match expression {
        Expression::Binary(node) => Some(node.left),
        Expression::As(node) | Expression::Satisfies(node) => Some(node.expression),
        _ => None,
    }
}
