//! Type nodes, type members and the names shared with declarations.

use crate::{fixed_text, Printer, ReprintError, Result};
use reprint_ast::*;
use tracing::trace;

impl Printer<'_> {
    pub(crate) fn print_type(&mut self, type_node: &TypeNode<'_>) -> Result<()> {
        trace!(kind = ?type_node.kind(), cursor = self.ctx.cursor(), "type");
        self.ctx.mark_cursor();
        self.print_type_worker(type_node)?;
        self.check_end(type_node.data())?;
        self.ctx.mark_cursor();
        Ok(())
    }

    fn print_type_worker(&mut self, type_node: &TypeNode<'_>) -> Result<()> {
        match type_node {
            TypeNode::KeywordType(data) | TypeNode::ThisType(data) => self.ctx.emit_leaf(data),
            TypeNode::TypeReference(node) => {
                self.print_entity_name(&node.type_name)?;
                self.print_type_arguments(&node.type_arguments)
            }
            TypeNode::FunctionType(node) => self.print_function_type(node, false),
            TypeNode::ConstructorType(node) => self.print_function_type(node, true),
            TypeNode::TypeQuery(node) => {
                self.ctx.write_token("typeof")?;
                self.print_entity_name(&node.expr_name)?;
                self.print_type_arguments(&node.type_arguments)
            }
            TypeNode::TypeLiteral(node) => self.print_type_members(&node.members),
            TypeNode::ArrayType(node) => {
                self.print_type(node.element_type)?;
                self.ctx.write_token("[")?;
                self.ctx.write_token("]")
            }
            TypeNode::TupleType(node) => {
                self.ctx.write_token("[")?;
                self.print_list(&node.elements, |p, element| p.print_type(element))?;
                self.ctx.write_token("]")
            }
            TypeNode::OptionalType(node) => {
                self.print_type(node.type_node)?;
                self.ctx.write_token("?")
            }
            TypeNode::RestType(node) => {
                self.ctx.write_token("...")?;
                self.print_type(node.type_node)
            }
            TypeNode::NamedTupleMember(node) => {
                self.print_optional_leaf(node.dot_dot_dot_token.as_ref())?;
                self.ctx.emit_leaf(&node.name.data)?;
                self.print_optional_leaf(node.question_token.as_ref())?;
                self.ctx.write_token(":")?;
                self.print_type(node.type_node)
            }
            TypeNode::UnionType(node) => self.print_union_or_intersection(node, "|"),
            TypeNode::IntersectionType(node) => self.print_union_or_intersection(node, "&"),
            TypeNode::ConditionalType(node) => {
                self.print_type(node.check_type)?;
                self.ctx.write_token("extends")?;
                self.print_type(node.extends_type)?;
                self.ctx.write_token("?")?;
                self.print_type(node.true_type)?;
                self.ctx.write_token(":")?;
                self.print_type(node.false_type)
            }
            TypeNode::InferType(node) => {
                self.ctx.write_token("infer")?;
                self.print_type_parameter(&node.type_parameter)
            }
            TypeNode::ParenthesizedType(node) => {
                self.ctx.write_token("(")?;
                self.print_type(node.type_node)?;
                self.ctx.write_token(")")
            }
            TypeNode::TypeOperator(node) => {
                self.ctx.write_token(fixed_text(node.operator, node.data.start)?)?;
                self.print_type(node.type_node)
            }
            TypeNode::IndexedAccessType(node) => {
                self.print_type(node.object_type)?;
                self.ctx.write_token("[")?;
                self.print_type(node.index_type)?;
                self.ctx.write_token("]")
            }
            TypeNode::MappedType(node) => self.print_mapped_type(node),
            TypeNode::LiteralType(node) => self.print_expression(node.literal),
            TypeNode::TemplateLiteralType(node) => {
                self.ctx.emit_leaf(&node.head.data)?;
                for span in &node.template_spans {
                    self.print_type(span.type_node)?;
                    self.ctx.emit_leaf(&span.literal.data)?;
                }
                Ok(())
            }
            TypeNode::ImportType(node) => {
                if node.is_type_of {
                    self.ctx.write_token("typeof")?;
                }
                self.ctx.write_token("import")?;
                self.ctx.write_token("(")?;
                self.print_type(node.argument)?;
                self.ctx.write_token(")")?;
                if let Some(qualifier) = &node.qualifier {
                    self.ctx.write_token(".")?;
                    self.print_entity_name(qualifier)?;
                }
                self.print_type_arguments(&node.type_arguments)
            }
            TypeNode::TypePredicate(node) => {
                self.print_optional_leaf(node.asserts_modifier.as_ref())?;
                self.ctx.emit_leaf(node.parameter_name.data())?;
                match node.type_node {
                    Some(type_node) => {
                        self.ctx.write_token("is")?;
                        self.print_type(type_node)
                    }
                    None => Ok(()),
                }
            }
            TypeNode::MissingType(data) => Err(ReprintError::UnknownTypeNodeKind {
                kind: data.kind,
                pos: data.start,
            }),
        }
    }

    /// `(a: A) => R`, `new (a: A) => R`, `abstract new () => R`
    fn print_function_type(&mut self, node: &FunctionTypeNode<'_>, is_constructor: bool) -> Result<()> {
        self.print_modifiers(&node.modifiers)?;
        if is_constructor {
            self.ctx.write_token("new")?;
        }
        self.print_type_parameters(&node.type_parameters)?;
        self.print_parameters(&node.parameters)?;
        self.ctx.write_token("=>")?;
        self.print_type(node.type_node)
    }

    fn print_union_or_intersection(
        &mut self,
        node: &UnionOrIntersectionTypeNode<'_>,
        operator: &'static str,
    ) -> Result<()> {
        // A leading operator belongs to the node but not to any member.
        if let Some(first) = node.types.first() {
            self.ctx.write_optional(operator, first.start())?;
        }
        for (index, member) in node.types.iter().enumerate() {
            if index > 0 {
                self.ctx.write_token(operator)?;
            }
            self.print_type(member)?;
        }
        Ok(())
    }

    fn print_mapped_type(&mut self, node: &MappedTypeNode<'_>) -> Result<()> {
        self.ctx.write_token("{")?;
        if let Some(token) = &node.readonly_token {
            self.ctx.emit_leaf(&token.data)?;
            if token.data.kind != SyntaxKind::ReadonlyKeyword {
                self.ctx.write_token("readonly")?;
            }
        }
        self.ctx.write_token("[")?;
        let parameter = &node.type_parameter;
        self.ctx.emit_leaf(&parameter.name.data)?;
        self.ctx.write_token("in")?;
        if let Some(constraint) = parameter.constraint {
            self.print_type(constraint)?;
        }
        if let Some(name_type) = node.name_type {
            self.ctx.write_token("as")?;
            self.print_type(name_type)?;
        }
        self.ctx.write_token("]")?;
        if let Some(token) = &node.question_token {
            self.ctx.emit_leaf(&token.data)?;
            if token.data.kind != SyntaxKind::QuestionToken {
                self.ctx.write_token("?")?;
            }
        }
        self.print_type_annotation(node.type_node)?;
        self.print_member_terminator(&node.data)?;
        self.ctx.write_token("}")
    }

    // ========================================================================
    // Type parameters and arguments
    // ========================================================================

    pub(crate) fn print_type_parameters(&mut self, type_parameters: &TypeParameters<'_>) -> Result<()> {
        let Some(type_parameters) = type_parameters else {
            return Ok(());
        };
        self.ctx.write_token("<")?;
        self.print_list(type_parameters, |p, parameter| p.print_type_parameter(parameter))?;
        self.ctx.write_token(">")
    }

    fn print_type_parameter(&mut self, parameter: &TypeParameterDeclaration<'_>) -> Result<()> {
        self.print_modifiers(&parameter.modifiers)?;
        self.ctx.emit_leaf(&parameter.name.data)?;
        if let Some(constraint) = parameter.constraint {
            self.ctx.write_token("extends")?;
            self.print_type(constraint)?;
        }
        if let Some(default) = parameter.default {
            self.ctx.write_token("=")?;
            self.print_type(default)?;
        }
        Ok(())
    }

    pub(crate) fn print_type_arguments(&mut self, type_arguments: &TypeArguments<'_>) -> Result<()> {
        let Some(type_arguments) = type_arguments else {
            return Ok(());
        };
        self.ctx.write_token("<")?;
        self.print_list(type_arguments, |p, argument| p.print_type(argument))?;
        self.ctx.write_token(">")
    }

    // ========================================================================
    // Type members
    // ========================================================================

    /// `{ ... }` of an interface or type literal.
    pub(crate) fn print_type_members(&mut self, members: &NodeArray<'_, TypeElement<'_>>) -> Result<()> {
        self.ctx.write_token("{")?;
        for member in members {
            trace!(kind = ?member.kind(), cursor = self.ctx.cursor(), "type member");
            self.print_type_element(member)?;
            self.check_end(member.data())?;
        }
        self.ctx.write_token("}")
    }

    fn print_type_element(&mut self, member: &TypeElement<'_>) -> Result<()> {
        match member {
            TypeElement::PropertySignature(node) => {
                self.print_modifiers(&node.modifiers)?;
                self.print_property_name(&node.name)?;
                self.print_optional_leaf(node.question_token.as_ref())?;
                self.print_type_annotation(node.type_annotation)?;
                self.print_member_terminator(&node.data)
            }
            TypeElement::MethodSignature(node) => {
                self.print_modifiers(&node.modifiers)?;
                self.print_property_name(&node.name)?;
                self.print_optional_leaf(node.question_token.as_ref())?;
                self.print_signature(&node.type_parameters, &node.parameters, node.type_annotation)?;
                self.print_member_terminator(&node.data)
            }
            TypeElement::CallSignature(node) => {
                self.print_signature(&node.type_parameters, &node.parameters, node.type_annotation)?;
                self.print_member_terminator(&node.data)
            }
            TypeElement::ConstructSignature(node) => {
                self.ctx.write_token("new")?;
                self.print_signature(&node.type_parameters, &node.parameters, node.type_annotation)?;
                self.print_member_terminator(&node.data)
            }
            TypeElement::IndexSignature(node) => self.print_index_signature(node),
            TypeElement::GetAccessor(node) | TypeElement::SetAccessor(node) => self.print_accessor(node),
        }
    }

    // ========================================================================
    // Names
    // ========================================================================

    pub(crate) fn print_entity_name(&mut self, name: &EntityName<'_>) -> Result<()> {
        match name {
            EntityName::Identifier(identifier) => self.ctx.emit_leaf(&identifier.data),
            EntityName::QualifiedName(qualified) => {
                self.print_entity_name(&qualified.left)?;
                self.ctx.write_token(".")?;
                self.ctx.emit_leaf(&qualified.right.data)
            }
        }
    }

    pub(crate) fn print_property_name(&mut self, name: &PropertyName<'_>) -> Result<()> {
        match name {
            PropertyName::ComputedPropertyName(computed) => {
                self.ctx.write_token("[")?;
                self.print_expression(computed.expression)?;
                self.ctx.write_token("]")
            }
            leaf => self.ctx.emit_leaf(leaf.data()),
        }
    }
}
