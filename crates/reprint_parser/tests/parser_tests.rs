//! Parser integration tests.
//!
//! Checks tree shapes, node spans and recovery on TypeScript source.

use bumpalo::Bump;
use reprint_ast::node::*;
use reprint_ast::syntax_kind::SyntaxKind;
use reprint_ast::types::NodeFlags;
use reprint_parser::{ParseResult, Parser};

fn parse<'a>(arena: &'a Bump, source: &str) -> ParseResult<'a> {
    Parser::new(arena, "test.ts", source).parse()
}

/// Parse a single statement and hand it to `check`.
fn with_statement(source: &str, check: impl FnOnce(&Statement<'_>)) {
    let arena = Bump::new();
    let result = parse(&arena, source);
    assert!(
        result.diagnostics.is_empty(),
        "unexpected diagnostics for {:?}: {:?}",
        source,
        result.diagnostics.diagnostics()
    );
    assert_eq!(result.source_file.statements.len(), 1, "source: {}", source);
    check(&result.source_file.statements.nodes[0]);
}

/// The initializer of `const x = <expr>;`.
fn initializer<'s, 'a>(statement: &'s Statement<'a>) -> &'s Expression<'a> {
    match statement {
        Statement::VariableStatement(v) => v.declaration_list.declarations.nodes[0]
            .initializer
            .expect("initializer"),
        other => panic!("expected variable statement, got {:?}", other.kind()),
    }
}

/// The aliased type of `type T = <type>;`.
fn aliased_type<'s, 'a>(statement: &'s Statement<'a>) -> &'s TypeNode<'a> {
    match statement {
        Statement::TypeAliasDeclaration(t) => t.type_node,
        other => panic!("expected type alias, got {:?}", other.kind()),
    }
}

fn expression_of<'s, 'a>(statement: &'s Statement<'a>) -> &'s Expression<'a> {
    match statement {
        Statement::ExpressionStatement(e) => e.expression,
        other => panic!("expected expression statement, got {:?}", other.kind()),
    }
}

// ============================================================================
// Spans
// ============================================================================

#[test]
fn test_statement_spans_include_leading_trivia() {
    let arena = Bump::new();
    let result = parse(&arena, "let x = 1;\n  foo();");
    let statements = &result.source_file.statements;
    assert_eq!(statements.len(), 2);

    let first = &statements.nodes[0];
    assert_eq!((first.pos(), first.start(), first.end()), (0, 0, 10));

    let second = &statements.nodes[1];
    assert_eq!((second.pos(), second.start(), second.end()), (10, 13, 19));
}

#[test]
fn test_leading_comment_is_inside_full_span() {
    with_statement("/* c */ x;", |statement| {
        assert_eq!(statement.pos(), 0);
        assert_eq!(statement.start(), 8);
        assert_eq!(statement.end(), 10);
    });
}

#[test]
fn test_source_file_covers_whole_text() {
    let arena = Bump::new();
    let source = "  const a = 1; // done\n";
    let result = parse(&arena, source);
    let file = &result.source_file;
    assert_eq!(file.pos(), 0);
    assert_eq!(file.start(), 2);
    assert_eq!(file.end() as usize, source.len());
    assert_eq!(file.end_of_file_token.kind(), SyntaxKind::EndOfFileToken);
    assert_eq!(file.end_of_file_token.pos(), 14);
    assert_eq!(file.text, source);
}

#[test]
fn test_empty_file() {
    let arena = Bump::new();
    let result = parse(&arena, "");
    assert!(result.source_file.statements.is_empty());
    assert_eq!(result.source_file.end(), 0);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_child_spans_nest() {
    with_statement("const value = a + b;", |statement| {
        let Statement::VariableStatement(v) = statement else {
            panic!("expected variable statement");
        };
        let list = &v.declaration_list;
        assert!(list.data.flags.contains(NodeFlags::CONST));
        let declaration = &list.declarations.nodes[0];
        assert_eq!(declaration.start(), 6);
        assert_eq!(declaration.end(), 19);

        let Expression::Binary(binary) = declaration.initializer.expect("initializer") else {
            panic!("expected binary expression");
        };
        assert_eq!(binary.pos(), 13);
        assert_eq!(binary.start(), 14);
        assert_eq!(binary.operator_token.start(), 16);
        assert_eq!(binary.right.end(), 19);
    });
}

// ============================================================================
// Lists and trailing commas
// ============================================================================

#[test]
fn test_call_arguments_trailing_comma() {
    with_statement("f(a, b,);", |statement| {
        let Expression::Call(call) = expression_of(statement) else {
            panic!("expected call");
        };
        assert_eq!(call.arguments.len(), 2);
        assert!(call.arguments.has_trailing_comma);
        assert_eq!(call.arguments.range.pos, 2);
        assert_eq!(call.arguments.range.end, 7);
    });

    with_statement("f(a, b);", |statement| {
        let Expression::Call(call) = expression_of(statement) else {
            panic!("expected call");
        };
        assert!(!call.arguments.has_trailing_comma);
    });
}

#[test]
fn test_array_elisions_and_trailing_comma() {
    with_statement("x = [1, , 2,];", |statement| {
        let Expression::Binary(assign) = expression_of(statement) else {
            panic!("expected assignment");
        };
        let Expression::ArrayLiteral(array) = assign.right else {
            panic!("expected array literal");
        };
        assert_eq!(array.elements.len(), 3);
        assert!(matches!(array.elements.nodes[1], Expression::OmittedExpression(_)));
        assert!(array.elements.has_trailing_comma);
    });
}

#[test]
fn test_object_literal_trailing_comma() {
    with_statement("const o = { a: 1, b, ...c, m() {}, };", |statement| {
        let Expression::ObjectLiteral(object) = initializer(statement) else {
            panic!("expected object literal");
        };
        assert_eq!(object.properties.len(), 4);
        assert!(object.properties.has_trailing_comma);
        assert!(matches!(object.properties.nodes[0], ObjectLiteralElement::PropertyAssignment(_)));
        assert!(matches!(
            object.properties.nodes[1],
            ObjectLiteralElement::ShorthandPropertyAssignment(_)
        ));
        assert!(matches!(object.properties.nodes[2], ObjectLiteralElement::SpreadAssignment(_)));
        assert!(matches!(object.properties.nodes[3], ObjectLiteralElement::MethodDeclaration(_)));
    });
}

#[test]
fn test_enum_members_trailing_comma() {
    with_statement("enum E { A = 1, B, }", |statement| {
        let Statement::EnumDeclaration(e) = statement else {
            panic!("expected enum");
        };
        assert_eq!(e.members.len(), 2);
        assert!(e.members.has_trailing_comma);
    });
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_simple_arrow_function() {
    with_statement("const f = x => x * 2;", |statement| {
        let Expression::ArrowFunction(arrow) = initializer(statement) else {
            panic!("expected arrow function");
        };
        assert!(!arrow.has_parenthesized_parameters);
        assert_eq!(arrow.parameters.len(), 1);
        assert!(arrow.modifiers.is_none());
        assert!(matches!(arrow.body, ArrowFunctionBody::Expression(_)));
    });
}

#[test]
fn test_async_parenthesized_arrow_function() {
    with_statement("const g = async <T>(a: T, b?: number): Promise<T> => { return a; };", |statement| {
        let Expression::ArrowFunction(arrow) = initializer(statement) else {
            panic!("expected arrow function");
        };
        assert!(arrow.has_parenthesized_parameters);
        assert_eq!(arrow.modifiers.map(|m| m.len()), Some(1));
        assert_eq!(arrow.type_parameters.map(|t| t.len()), Some(1));
        assert_eq!(arrow.parameters.len(), 2);
        assert!(arrow.parameters.nodes[1].question_token.is_some());
        assert!(arrow.type_annotation.is_some());
        assert!(matches!(arrow.body, ArrowFunctionBody::Block(_)));
    });
}

#[test]
fn test_async_as_parameter_name() {
    with_statement("const f = async => async;", |statement| {
        let Expression::ArrowFunction(arrow) = initializer(statement) else {
            panic!("expected arrow function");
        };
        assert!(arrow.modifiers.is_none());
        assert_eq!(arrow.parameters.len(), 1);
    });
}

#[test]
fn test_parenthesized_expression_is_not_arrow() {
    with_statement("const x = (a, b);", |statement| {
        assert!(matches!(initializer(statement), Expression::Parenthesized(_)));
    });
}

#[test]
fn test_generic_call_vs_comparison() {
    with_statement("foo<number>(1);", |statement| {
        let Expression::Call(call) = expression_of(statement) else {
            panic!("expected call");
        };
        assert_eq!(call.type_arguments.map(|t| t.len()), Some(1));
    });

    with_statement("a < b > c;", |statement| {
        let Expression::Binary(outer) = expression_of(statement) else {
            panic!("expected binary");
        };
        assert_eq!(outer.operator_token.kind(), SyntaxKind::GreaterThanToken);
        assert!(matches!(outer.left, Expression::Binary(_)));
    });
}

#[test]
fn test_exponent_is_right_associative() {
    with_statement("a ** b ** c;", |statement| {
        let Expression::Binary(outer) = expression_of(statement) else {
            panic!("expected binary");
        };
        assert!(matches!(outer.left, Expression::Identifier(_)));
        assert!(matches!(outer.right, Expression::Binary(_)));
    });
}

#[test]
fn test_regex_and_division() {
    with_statement("x = a / b / c;", |statement| {
        let Expression::Binary(assign) = expression_of(statement) else {
            panic!("expected assignment");
        };
        assert!(matches!(assign.right, Expression::Binary(_)));
    });

    with_statement("x = /ab+c/g;", |statement| {
        let Expression::Binary(assign) = expression_of(statement) else {
            panic!("expected assignment");
        };
        let Expression::RegularExpressionLiteral(regex) = assign.right else {
            panic!("expected regex");
        };
        assert_eq!(regex.text, "/ab+c/g");
    });
}

#[test]
fn test_template_expression_spans() {
    with_statement("`a${b}c${d}e`;", |statement| {
        let Expression::TemplateExpression(template) = expression_of(statement) else {
            panic!("expected template");
        };
        assert_eq!(template.head.kind(), SyntaxKind::TemplateHead);
        assert_eq!(template.template_spans.len(), 2);
        let first = &template.template_spans.nodes[0];
        assert_eq!(first.literal.kind(), SyntaxKind::TemplateMiddle);
        assert_eq!(first.literal.start(), 5);
        let last = &template.template_spans.nodes[1];
        assert_eq!(last.literal.kind(), SyntaxKind::TemplateTail);
        assert_eq!(last.literal.end(), 13);
    });
}

#[test]
fn test_optional_chain_and_non_null() {
    with_statement("a?.b!.c?.[0]?.();", |statement| {
        let Expression::Call(call) = expression_of(statement) else {
            panic!("expected call");
        };
        assert!(call.question_dot_token.is_some());
        assert!(call.data.flags.contains(NodeFlags::OPTIONAL_CHAIN));
        let Expression::ElementAccess(element) = call.expression else {
            panic!("expected element access");
        };
        assert!(element.question_dot_token.is_some());
    });
}

#[test]
fn test_as_and_satisfies() {
    with_statement("const v = x as unknown satisfies T;", |statement| {
        let Expression::Satisfies(satisfies) = initializer(statement) else {
            panic!("expected satisfies");
        };
        assert!(matches!(satisfies.expression, Expression::As(_)));
    });
}

#[test]
fn test_const_assertions() {
    with_statement("const v = x as const;", |statement| {
        let Expression::As(as_expression) = initializer(statement) else {
            panic!("expected as expression");
        };
        let TypeNode::TypeReference(reference) = as_expression.type_node else {
            panic!("expected type reference");
        };
        let EntityName::Identifier(name) = &reference.type_name else {
            panic!("expected identifier");
        };
        assert_eq!(name.text, "const");
        assert_eq!(name.original_keyword_kind, Some(SyntaxKind::ConstKeyword));
        assert!(reference.type_arguments.is_none());
        assert_eq!(reference.data.start, 15);
        assert_eq!(reference.data.range.end, 20);
    });
    with_statement("let v = <const>['a'];", |statement| {
        let Expression::TypeAssertion(assertion) = initializer(statement) else {
            panic!("expected type assertion");
        };
        assert_eq!(assertion.type_node.kind(), SyntaxKind::TypeReference);
        assert!(matches!(assertion.expression, Expression::ArrayLiteral(_)));
    });
}

#[test]
fn test_new_without_arguments() {
    with_statement("const m = new Map;", |statement| {
        let Expression::New(new) = initializer(statement) else {
            panic!("expected new expression");
        };
        assert!(new.arguments.is_none());
    });
}

// ============================================================================
// Declarations
// ============================================================================

#[test]
fn test_class_members() {
    let source = "
        @sealed
        export abstract class Foo<T> extends Base<T> implements I {
            static #count = 0;
            private readonly name?: string;
            value!: number;
            constructor(public x: number) { super(); }
            get size(): number { return 1; }
            set size(v) {}
            static { init(); }
            abstract run(): void;
            [key: string]: unknown;
            ;
        }
    ";
    with_statement(source, |statement| {
        let Statement::ClassDeclaration(class) = statement else {
            panic!("expected class");
        };
        assert_eq!(class.modifiers.map(|m| m.len()), Some(3));
        assert_eq!(class.heritage_clauses.map(|h| h.len()), Some(2));
        let kinds: Vec<SyntaxKind> = class.members.iter().map(|m| m.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::PropertyDeclaration,
                SyntaxKind::PropertyDeclaration,
                SyntaxKind::PropertyDeclaration,
                SyntaxKind::Constructor,
                SyntaxKind::GetAccessor,
                SyntaxKind::SetAccessor,
                SyntaxKind::ClassStaticBlockDeclaration,
                SyntaxKind::MethodDeclaration,
                SyntaxKind::IndexSignature,
                SyntaxKind::SemicolonClassElement,
            ]
        );
    });
}

#[test]
fn test_property_declaration_span_includes_semicolon() {
    with_statement("class A { x = 1; }", |statement| {
        let Statement::ClassDeclaration(class) = statement else {
            panic!("expected class");
        };
        let member = &class.members.nodes[0];
        assert_eq!(member.start(), 10);
        assert_eq!(member.end(), 16);
    });
}

#[test]
fn test_interface_member_separators() {
    with_statement("interface I { a: string, b(): void; new (x: number): I\n c }", |statement| {
        let Statement::InterfaceDeclaration(interface) = statement else {
            panic!("expected interface");
        };
        let kinds: Vec<SyntaxKind> = interface.members.iter().map(|m| m.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::PropertySignature,
                SyntaxKind::MethodSignature,
                SyntaxKind::ConstructSignature,
                SyntaxKind::PropertySignature,
            ]
        );
        // The separator belongs to the member before it.
        assert_eq!(interface.members.nodes[0].end(), 24);
    });
}

#[test]
fn test_export_default_class() {
    with_statement("export default class {}", |statement| {
        let Statement::ClassDeclaration(class) = statement else {
            panic!("expected class");
        };
        assert!(class.name.is_none());
        assert_eq!(class.modifiers.map(|m| m.len()), Some(2));
    });
}

#[test]
fn test_function_overloads() {
    let arena = Bump::new();
    let result = parse(&arena, "function f(a: string): void;\nfunction f(a: any) {}");
    assert!(result.diagnostics.is_empty());
    let Statement::FunctionDeclaration(overload) = &result.source_file.statements.nodes[0] else {
        panic!("expected function");
    };
    assert!(overload.body.is_none());
    assert_eq!(overload.end(), 28);
}

#[test]
fn test_nested_namespace() {
    with_statement("namespace A.B { }", |statement| {
        let Statement::ModuleDeclaration(outer) = statement else {
            panic!("expected module");
        };
        assert!(outer.data.flags.contains(NodeFlags::NAMESPACE));
        let Some(ModuleBody::ModuleDeclaration(inner)) = &outer.body else {
            panic!("expected nested module");
        };
        assert!(inner.data.flags.contains(NodeFlags::NESTED_NAMESPACE));
        assert!(inner.data.flags.contains(NodeFlags::NAMESPACE));
        assert!(matches!(inner.body, Some(ModuleBody::ModuleBlock(_))));
        assert_eq!(inner.end(), outer.end());
    });
}

#[test]
fn test_global_augmentation() {
    with_statement("declare global { interface Window {} }", |statement| {
        let Statement::ModuleDeclaration(module) = statement else {
            panic!("expected module");
        };
        assert!(module.data.flags.contains(NodeFlags::GLOBAL_AUGMENTATION));
        assert_eq!(module.modifiers.map(|m| m.len()), Some(1));
    });
}

#[test]
fn test_ambient_module_without_body() {
    with_statement("declare module \"m\";", |statement| {
        let Statement::ModuleDeclaration(module) = statement else {
            panic!("expected module");
        };
        assert!(matches!(module.name, ModuleName::StringLiteral(_)));
        assert!(module.body.is_none());
    });
}

// ============================================================================
// Imports and Exports
// ============================================================================

#[test]
fn test_type_only_named_imports() {
    with_statement("import type { a, b as c, } from \"m\";", |statement| {
        let Statement::ImportDeclaration(import) = statement else {
            panic!("expected import");
        };
        let clause = import.import_clause.as_ref().expect("import clause");
        assert!(clause.is_type_only);
        let Some(NamedImportBindings::NamedImports(named)) = &clause.named_bindings else {
            panic!("expected named imports");
        };
        assert_eq!(named.elements.len(), 2);
        assert!(named.elements.has_trailing_comma);
        assert!(named.elements.nodes[1].property_name.is_some());
        assert_eq!(import.module_specifier.text, "m");
    });
}

#[test]
fn test_default_and_namespace_import() {
    with_statement("import React, * as all from 'react';", |statement| {
        let Statement::ImportDeclaration(import) = statement else {
            panic!("expected import");
        };
        let clause = import.import_clause.as_ref().expect("import clause");
        assert!(clause.name.is_some());
        assert!(matches!(clause.named_bindings, Some(NamedImportBindings::NamespaceImport(_))));
    });
}

#[test]
fn test_side_effect_import() {
    with_statement("import './polyfill';", |statement| {
        let Statement::ImportDeclaration(import) = statement else {
            panic!("expected import");
        };
        assert!(import.import_clause.is_none());
    });
}

#[test]
fn test_import_equals_require() {
    with_statement("import fs = require('fs');", |statement| {
        let Statement::ImportEqualsDeclaration(import) = statement else {
            panic!("expected import equals");
        };
        assert!(matches!(import.module_reference, ModuleReference::ExternalModuleReference(_)));
    });
}

#[test]
fn test_export_forms() {
    with_statement("export * from \"m\";", |statement| {
        let Statement::ExportDeclaration(export) = statement else {
            panic!("expected export");
        };
        assert!(export.export_clause.is_none());
        assert!(export.module_specifier.is_some());
    });

    with_statement("export * as ns from \"m\";", |statement| {
        let Statement::ExportDeclaration(export) = statement else {
            panic!("expected export");
        };
        assert!(matches!(export.export_clause, Some(NamedExportBindings::NamespaceExport(_))));
    });

    with_statement("export type { T };", |statement| {
        let Statement::ExportDeclaration(export) = statement else {
            panic!("expected export");
        };
        assert!(export.is_type_only);
        assert!(export.module_specifier.is_none());
    });

    with_statement("export = foo;", |statement| {
        let Statement::ExportAssignment(assignment) = statement else {
            panic!("expected export assignment");
        };
        assert!(assignment.is_export_equals);
    });
}

// ============================================================================
// Types
// ============================================================================

#[test]
fn test_leading_union_operator() {
    with_statement("type T = | A | B;", |statement| {
        let TypeNode::UnionType(union) = aliased_type(statement) else {
            panic!("expected union");
        };
        assert_eq!(union.start(), 9);
        assert_eq!(union.types.len(), 2);
        assert_eq!(union.types.range.pos, 10);
    });
}

#[test]
fn test_single_member_with_leading_operator() {
    with_statement("type T = & A;", |statement| {
        let TypeNode::IntersectionType(intersection) = aliased_type(statement) else {
            panic!("expected intersection");
        };
        assert_eq!(intersection.types.len(), 1);
    });
}

#[test]
fn test_conditional_type_with_infer() {
    with_statement("type E<T> = T extends Array<infer U extends string> ? U : never;", |statement| {
        let TypeNode::ConditionalType(conditional) = aliased_type(statement) else {
            panic!("expected conditional type");
        };
        let TypeNode::TypeReference(array) = conditional.extends_type else {
            panic!("expected type reference");
        };
        let arguments = array.type_arguments.expect("type arguments");
        let TypeNode::InferType(infer) = &arguments.nodes[0] else {
            panic!("expected infer type");
        };
        assert!(infer.type_parameter.constraint.is_some());
    });
}

#[test]
fn test_mapped_type_modifiers() {
    with_statement("type M = { -readonly [K in keyof T as `get${K}`]+?: T[K] };", |statement| {
        let TypeNode::MappedType(mapped) = aliased_type(statement) else {
            panic!("expected mapped type");
        };
        assert_eq!(mapped.readonly_token.map(|t| t.kind()), Some(SyntaxKind::MinusToken));
        assert_eq!(mapped.question_token.map(|t| t.kind()), Some(SyntaxKind::PlusToken));
        assert!(mapped.name_type.is_some());
        assert!(matches!(mapped.type_node, Some(TypeNode::IndexedAccessType(_))));
    });
}

#[test]
fn test_named_tuple_members() {
    with_statement("type P = [first: string, second?: number, ...rest: boolean[]];", |statement| {
        let TypeNode::TupleType(tuple) = aliased_type(statement) else {
            panic!("expected tuple");
        };
        assert_eq!(tuple.elements.len(), 3);
        for element in tuple.elements.iter() {
            assert_eq!(element.kind(), SyntaxKind::NamedTupleMember);
        }
    });
}

#[test]
fn test_function_and_constructor_types() {
    with_statement("type F = (a: number) => void;", |statement| {
        assert!(matches!(aliased_type(statement), TypeNode::FunctionType(_)));
    });
    with_statement("type C = abstract new () => object;", |statement| {
        let TypeNode::ConstructorType(ctor) = aliased_type(statement) else {
            panic!("expected constructor type");
        };
        assert_eq!(ctor.modifiers.map(|m| m.len()), Some(1));
    });
    with_statement("type P = (string);", |statement| {
        assert!(matches!(aliased_type(statement), TypeNode::ParenthesizedType(_)));
    });
}

#[test]
fn test_type_predicate_return() {
    with_statement("function isString(x: unknown): x is string { return true; }", |statement| {
        let Statement::FunctionDeclaration(function) = statement else {
            panic!("expected function");
        };
        assert!(matches!(function.type_annotation, Some(TypeNode::TypePredicate(_))));
    });
}

#[test]
fn test_literal_and_template_types() {
    with_statement("type L = -1 | 'a' | `x-${string}` | typeof import('m').Foo;", |statement| {
        let TypeNode::UnionType(union) = aliased_type(statement) else {
            panic!("expected union");
        };
        let kinds: Vec<SyntaxKind> = union.types.iter().map(|t| t.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::LiteralType,
                SyntaxKind::LiteralType,
                SyntaxKind::TemplateLiteralType,
                SyntaxKind::ImportType,
            ]
        );
    });
}

// ============================================================================
// Error Recovery
// ============================================================================

#[test]
fn test_missing_expression_is_reported() {
    let arena = Bump::new();
    let source = "let x = ;";
    let result = parse(&arena, source);
    assert!(result.diagnostics.has_errors());
    assert_eq!(result.diagnostics.diagnostics()[0].message_text, "Expression expected.");
    let statement = &result.source_file.statements.nodes[0];
    let Expression::MissingExpression(missing) = initializer(statement) else {
        panic!("expected missing expression");
    };
    assert_eq!(missing.range.pos, missing.range.end);
    assert_eq!(result.source_file.end() as usize, source.len());
}

#[test]
fn test_missing_close_paren() {
    let arena = Bump::new();
    let result = parse(&arena, "if (a { b(); }");
    assert!(result
        .diagnostics
        .diagnostics()
        .iter()
        .any(|d| d.message_text == "')' expected."));
}

#[test]
fn test_stray_tokens_become_missing_declarations() {
    let arena = Bump::new();
    let source = "} let x = 1;";
    let result = parse(&arena, source);
    assert!(result.diagnostics.has_errors());
    let statements = &result.source_file.statements;
    assert_eq!(statements.len(), 2);
    assert_eq!(statements.nodes[0].kind(), SyntaxKind::MissingDeclaration);
    assert_eq!(statements.nodes[0].end(), 1);
    assert_eq!(statements.nodes[1].kind(), SyntaxKind::VariableStatement);
}

#[test]
fn test_statement_spans_stay_contiguous_after_errors() {
    let arena = Bump::new();
    let source = "class { x = ; } )) const y: = 2;\nfoo(";
    let result = parse(&arena, source);
    assert!(result.diagnostics.has_errors());
    let statements = &result.source_file.statements;
    let mut previous_end = 0;
    for statement in statements.iter() {
        assert_eq!(statement.pos(), previous_end);
        assert!(statement.start() <= statement.end());
        previous_end = statement.end();
    }
    assert_eq!(result.source_file.end() as usize, source.len());
}

#[test]
fn test_deep_nesting_is_bounded() {
    // Parsing recurses on the native stack; give it room like the CLI does.
    let handle = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| {
            let source = format!("x = {}1{};", "(".repeat(1000), ")".repeat(1000));
            let arena = Bump::new();
            let result = parse(&arena, &source);
            result
                .diagnostics
                .diagnostics()
                .iter()
                .any(|d| d.message_text == "Maximum nesting depth exceeded.")
        })
        .expect("spawn parser thread");
    assert!(handle.join().expect("parser thread panicked"));
}
