//! Reprinter integration tests.
//!
//! Every source is parsed, reprinted against its own buffer and compared
//! byte for byte. The emission trace is checked alongside: each comment in
//! the file is emitted exactly once and the cursor never moves back.

use bumpalo::Bump;
use reprint_parser::Parser;
use reprint_printer::{
    reprint, reprint_with_trace, CommentAttachment, PrinterOptions, Printer, Reprint,
    ReprintError, SpanMismatch, TrailingCommentPolicy,
};
use reprint_scanner::{collect_comment_ranges, SourceText};

/// Parse `source`, reprint it with a trace and check the round-trip
/// properties that hold for every well-formed file.
fn roundtrip(source: &str) -> Reprint {
    let arena = Bump::new();
    let result = Parser::new(&arena, "test.ts", source).parse();
    assert!(
        result.diagnostics.is_empty(),
        "unexpected diagnostics for {:?}: {:?}",
        source,
        result.diagnostics.diagnostics()
    );
    let reprint = reprint_with_trace(&result.source_file, SourceText::new(source))
        .unwrap_or_else(|err| panic!("reprint failed for {:?}: {}", source, err));
    assert_eq!(reprint.text, source);
    assert!(reprint.trace.is_monotonic(), "cursor moved back in {:?}", source);
    let emitted: Vec<_> = reprint.trace.comment_ranges().collect();
    assert_eq!(emitted, collect_comment_ranges(source), "comments of {:?}", source);
    reprint
}

fn assert_roundtrips(sources: &[&str]) {
    for source in sources {
        roundtrip(source);
    }
}

/// Reprint a file that may have parse errors; the printer's verdict only.
fn reprint_recovered(source: &str) -> Result<String, ReprintError> {
    let arena = Bump::new();
    let result = Parser::new(&arena, "test.ts", source).parse();
    assert!(!result.diagnostics.is_empty(), "expected diagnostics for {:?}", source);
    reprint(&result.source_file, SourceText::new(source))
}

// ============================================================================
// Example scenarios
// ============================================================================

#[test]
fn test_statement_without_semicolon() {
    roundtrip("let x = 1");
}

#[test]
fn test_statement_with_semicolon() {
    roundtrip("let x = 1;");
}

#[test]
fn test_trailing_comma_in_parameters() {
    roundtrip("function f(a, b,) {}");
}

#[test]
fn test_comments_around_value() {
    let reprint = roundtrip("/*a*/ x /*b*/");
    let attachments: Vec<_> = reprint.trace.comments.iter().map(|c| c.attachment).collect();
    assert_eq!(
        attachments,
        vec![CommentAttachment::Leading, CommentAttachment::SameLineTrailing]
    );
}

#[test]
fn test_union_with_leading_separator_on_continuation_line() {
    roundtrip("type Shape =\n    | Circle\n    | Square;\n");
}

// ============================================================================
// Trivia
// ============================================================================

#[test]
fn test_empty_and_trivia_only_files() {
    assert_roundtrips(&["", "   \n\t\n", "// only a comment", "/* a */\n/** b */\n// c\n"]);
}

#[test]
fn test_trivia_after_last_statement() {
    roundtrip("foo();\n\n// tail\n/* end */   \n");
}

#[test]
fn test_shebang() {
    roundtrip("#!/usr/bin/env node\nconsole.log(1);\n");
    roundtrip("#!/usr/bin/env node");
}

#[test]
fn test_byte_order_mark() {
    roundtrip("\u{FEFF}let x = 1;\n");
}

#[test]
fn test_crlf_and_unicode() {
    roundtrip("let a = 'é';\r\n// ünïcödé\r\nlet b = \"日本\";\r\n");
}

#[test]
fn test_comments_between_tokens() {
    assert_roundtrips(&[
        "if /*a*/ ( /*b*/ x /*c*/ ) /*d*/ { /*e*/ }",
        "function /*a*/ f /*b*/ ( /*c*/ a /*d*/ , /*e*/ ) /*f*/ {}",
        "const { a /*x*/ , b } = o; // trailing\n",
        "call(a, // first\n     b, /* second */\n);",
    ]);
}

#[test]
fn test_trailing_comment_policy_changes_only_attribution() {
    let source = "a(); // one\nb(); /* two */ // three\n";
    let arena = Bump::new();
    let result = Parser::new(&arena, "test.ts", source).parse();
    let file = &result.source_file;

    let same_line = Printer::with_options(
        SourceText::new(source),
        PrinterOptions {
            record_trace: true,
            ..PrinterOptions::default()
        },
    )
    .print_source_file(file)
    .unwrap();
    let leading_only = Printer::with_options(
        SourceText::new(source),
        PrinterOptions {
            trailing_comments: TrailingCommentPolicy::LeadingOnly,
            record_trace: true,
        },
    )
    .print_source_file(file)
    .unwrap();

    assert_eq!(same_line.text, source);
    assert_eq!(leading_only.text, source);
    assert_eq!(same_line.trace.count(CommentAttachment::SameLineTrailing), 3);
    assert_eq!(leading_only.trace.count(CommentAttachment::SameLineTrailing), 0);
    assert_eq!(leading_only.trace.count(CommentAttachment::Leading), 3);
    assert_eq!(
        same_line.trace.comment_ranges().collect::<Vec<_>>(),
        leading_only.trace.comment_ranges().collect::<Vec<_>>()
    );
}

#[test]
fn test_trace_is_empty_unless_requested() {
    let source = "x; // c\n";
    let arena = Bump::new();
    let result = Parser::new(&arena, "test.ts", source).parse();
    let reprint = Printer::new(SourceText::new(source))
        .print_source_file(&result.source_file)
        .unwrap();
    assert_eq!(reprint.text, source);
    assert!(reprint.trace.comments.is_empty());
    assert!(reprint.trace.cursor_marks.is_empty());
}

// ============================================================================
// Lists and optional tokens
// ============================================================================

#[test]
fn test_list_separators() {
    assert_roundtrips(&[
        "f();",
        "f(a);",
        "f(a,);",
        "f(a, b, c);",
        "f(a, b, c,);",
        "x = [];",
        "x = [1, , 2,];",
        "const [, second, ...rest] = list;",
        "const { a, b: { c }, ...d } = o;",
        "enum E { A = 1, B, }",
        "type T<A, B,> = [A, B,];",
    ]);
}

#[test]
fn test_optional_semicolons() {
    assert_roundtrips(&[
        "a\nb\n",
        "a;;b",
        "return_: {\n  break return_\n}",
        "do x++; while (x < 3)\n",
        "debugger",
        "throw err",
        "class A { x = 1\n y; ; }",
        "interface I { a: string, b(): void; new (x: number): I\n c }",
    ]);
}

#[test]
fn test_empty_statement_after_semicolon_is_kept() {
    roundtrip("let x = 1;;");
    roundtrip("for (;;);");
}

// ============================================================================
// Grammar breadth
// ============================================================================

#[test]
fn test_statements() {
    assert_roundtrips(&[
        "if (a) b(); else if (c) { d(); } else e();",
        "while (i--) { continue; }",
        "with (o) f();",
        "for (let i = 0, j = 1; i < j; i++) {}",
        "for (const k in o) {}",
        "for (x of xs) ;",
        "async function f() { for await (const x of xs) {} }",
        "outer: for (;;) { break outer; }",
        "switch (x) { case 1: case 2: y(); break; default: z(); }",
        "try { a(); } catch { b(); } finally { c(); }",
        "try { a(); } catch (e: unknown) {}",
        "function* g() { yield; yield 1; yield* other(); }",
        "{ using r = open(); }",
        "async function f() { await using r = open(); }",
        "var a = 1, b;",
        "let x!: number;",
    ]);
}

#[test]
fn test_expressions() {
    assert_roundtrips(&[
        "const value = a + b * c - (d % e);",
        "a ** b ** c;",
        "x = a / b / c;",
        "x = /ab+c/g;",
        "x ??= y || z && !w;",
        "const t = cond ? yes : no;",
        "`a${b}c${d}e`;",
        "tag`x${y}`;",
        "a?.b!.c?.[0]?.();",
        "foo<number>(1);",
        "const m = new Map;",
        "const s = new Set<string>([\"a\"]);",
        "delete o[k], void 0, typeof x;",
        "i++; --j; -x; +y; ~z;",
        "const v = x as unknown satisfies T;",
        "const y = <string>z;",
        "const tuple = [1, 'a'] as const;",
        "let v = <const>['a'];",
        "const cfg = { mode: 'dark' } as const satisfies Config;",
        "const o = { a: 1, b, ...c, m() {}, };",
        "const o = { [key]: 1, 'q': 2, 3: 4, get g() { return 1; }, set g(v) {}, async *gen() {} };",
        "const f = x => x * 2;",
        "const g = async <T>(a: T, b?: number): Promise<T> => { return a; };",
        "const f = async => async;",
        "const x = (a, b);",
        "const big = 10n, hex = 0xff, sep = 1_000;",
        "const k = class Named extends Base {};",
        "const fn = function named() {};",
        "function f() { return new.target; }",
        "const url = import.meta.url;",
        "const mod = import('./m');",
        "this.x = super.y;",
        "const n = null, t = true, f = false;",
    ]);
}

#[test]
fn test_long_operator_chains() {
    let sum = format!("x = {}1;", "1 + ".repeat(10_000));
    let reprint = roundtrip(&sum);
    // Entry and exit of every operator level, the statement and each operand.
    assert!(reprint.trace.cursor_marks.len() > 40_000);

    let casts = format!("y = z{};", " as unknown".repeat(5_000));
    roundtrip(&casts);

    assert_roundtrips(&["a = b - c * d / e - f /* tail */ + g;", "q = (a + b) + c as T;"]);
}

#[test]
fn test_classes() {
    assert_roundtrips(&[
        "class A { x = 1; }",
        "export default class {}",
        "abstract class B<T> extends A implements I, J {\n    abstract m(): void;\n}",
        "class C {\n    static #count = 0;\n    private readonly name?: string;\n    declare id: number;\n    constructor(public a: string, protected b = 2) {}\n    get v(): number { return 1; }\n    set v(value) {}\n    [key: string]: any;\n    static { init(); }\n    m?<T>(x: T): T;\n    *gen() {}\n    ;\n}",
        "@sealed\nclass D {\n    @log() method(@inject() dep: Dep) {}\n}",
        "class E {\n    overload(a: string): void;\n    overload(a: any) {}\n}",
    ]);
}

#[test]
fn test_functions() {
    assert_roundtrips(&[
        "function f(a: string): void;\nfunction f(a: any) {}",
        "function isString(x: unknown): x is string { return true; }",
        "function assert(x: unknown): asserts x is string {}",
        "function check(this: Foo): asserts this {}",
        "async function f<T extends object = {}>(...args: T[]): Promise<void> {}",
        "declare function d(x?: number): void",
    ]);
}

#[test]
fn test_interfaces_and_types() {
    assert_roundtrips(&[
        "interface I<T> extends A, B<T> {\n    readonly a: string;\n    b?(): void,\n    <U>(x: U): U;\n    new (x: number): I<T>;\n    [k: string]: unknown;\n    get p(): number;\n    set p(v: number);\n}",
        "type T = | A | B;",
        "type T = & A;",
        "type E<T> = T extends Array<infer U extends string> ? U : never;",
        "type M = { -readonly [K in keyof T as `get${K}`]+?: T[K] };",
        "type R = { readonly [K in Keys]?: V; };",
        "type P = [first: string, second?: number, ...rest: boolean[]];",
        "type O = [string?, ...number[]];",
        "type F = (a: number) => void;",
        "type C = abstract new () => object;",
        "type P = (string);",
        "type L = -1 | 'a' | `x-${string}` | typeof import('m').Foo;",
        "type Q = typeof x.y<string>;",
        "type K = keyof T[number];",
        "declare const s: unique symbol;",
        "type A = readonly string[][];",
        "type I = import('./mod');",
        "type N = A.B.C<D>;",
        "type B = true | null | undefined | this;",
    ]);
}

#[test]
fn test_modules() {
    assert_roundtrips(&[
        "namespace A.B { }",
        "module M { export const x = 1; }",
        "declare global { interface Window {} }",
        "declare module \"m\" { export = x; }",
        "declare module \"m\";",
        "import type { a, b as c, } from \"m\";",
        "import React, * as all from 'react';",
        "import def, { type T, x } from 'm';",
        "import './polyfill';",
        "import fs = require('fs');",
        "import type Alias = Some.Name;",
        "export import E = N.E;",
        "export * from \"m\";",
        "export * as ns from \"m\";",
        "export type { T };",
        "export { a as b, c, } from './c';",
        "export = foo;",
        "export default foo();",
        "export const enum Flags { A = 1 << 0 }",
        "export abstract class Base {}",
        "export default function () {}",
    ]);
}

#[test]
fn test_declaration_heavy_file() {
    roundtrip(include_str!("../benches/fixture.ts"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_expression_is_unknown_node() {
    let err = reprint_recovered("let x = ;").unwrap_err();
    assert!(
        matches!(
            err,
            ReprintError::UnknownNodeKind {
                kind: reprint_ast::SyntaxKind::MissingExpression,
                ..
            }
        ),
        "{:?}",
        err
    );
}

#[test]
fn test_missing_type_is_unknown_type_node() {
    let err = reprint_recovered("type T = ;").unwrap_err();
    assert!(
        matches!(
            err,
            ReprintError::UnknownTypeNodeKind {
                kind: reprint_ast::SyntaxKind::MissingType,
                ..
            }
        ),
        "{:?}",
        err
    );
}

#[test]
fn test_mismatched_buffer_is_inconsistent() {
    let arena = Bump::new();
    let result = Parser::new(&arena, "test.ts", "let x = 1;").parse();
    let err = reprint(&result.source_file, SourceText::new("var x = 1;")).unwrap_err();
    assert_eq!(
        err,
        ReprintError::InconsistentSpan {
            expected: 0,
            cursor: 0,
            detail: SpanMismatch::TokenNotFound("let"),
        }
    );
}

#[test]
fn test_buffer_length_mismatch() {
    let arena = Bump::new();
    let result = Parser::new(&arena, "test.ts", "let x = 1;").parse();
    let err = reprint(&result.source_file, SourceText::new("let x = 1; ")).unwrap_err();
    assert_eq!(
        err,
        ReprintError::InconsistentSpan {
            expected: 11,
            cursor: 10,
            detail: SpanMismatch::LengthMismatch,
        }
    );
}

#[test]
fn test_reprint_is_deterministic() {
    let source = "/** doc */ export function f(a, b,) { return a ?? b; } // end\n";
    let arena = Bump::new();
    let result = Parser::new(&arena, "test.ts", source).parse();
    let first = reprint_with_trace(&result.source_file, SourceText::new(source)).unwrap();
    let second = reprint_with_trace(&result.source_file, SourceText::new(source)).unwrap();
    assert_eq!(first, second);
}
