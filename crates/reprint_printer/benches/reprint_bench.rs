use bumpalo::Bump;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use reprint_parser::Parser;
use reprint_printer::{reprint, reprint_with_trace};
use reprint_scanner::SourceText;

const TYPESCRIPT_SOURCE: &str = include_str!("fixture.ts");

fn bench_reprint(c: &mut Criterion) {
    let arena = Bump::new();
    let result = Parser::new(&arena, "bench.ts", TYPESCRIPT_SOURCE).parse();
    let file = &result.source_file;
    let source = SourceText::new(TYPESCRIPT_SOURCE);

    c.bench_function("reprint_declarations", |b| {
        b.iter(|| black_box(reprint(file, black_box(source))));
    });
    c.bench_function("reprint_declarations_with_trace", |b| {
        b.iter(|| black_box(reprint_with_trace(file, black_box(source))));
    });
}

fn bench_parse_and_reprint(c: &mut Criterion) {
    c.bench_function("parse_and_reprint_declarations", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let result = Parser::new(&arena, "bench.ts", black_box(TYPESCRIPT_SOURCE)).parse();
            black_box(reprint(&result.source_file, SourceText::new(TYPESCRIPT_SOURCE)))
        });
    });
}

criterion_group!(benches, bench_reprint, bench_parse_and_reprint);
criterion_main!(benches);
