use bumpalo::Bump;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use reprint_parser::Parser;

// Declaration-heavy source with comments, generics and modules.
const TYPESCRIPT_SOURCE: &str = r#"
/**
 * Inventory service.
 */
import type { Logger } from "./logger";
import * as path from "path";
import fs = require("fs");

export namespace Inventory.Model {
    export interface Item {
        readonly id: number;
        name: string; // display name
        tags?: readonly string[],
        [extra: string]: unknown;
    }

    export type Lookup<T> = {
        -readonly [K in keyof T as `by${Capitalize<string & K>}`]+?: (value: T[K]) => Item | undefined;
    };

    export type Unwrap<T> = T extends Promise<infer U extends object> ? Unwrap<U> : T;
}

export enum Status { Active = 1, Archived = 1 << 2, }

@injectable()
export abstract class Store<T extends { id: number }> implements Iterable<T> {
    static #instances = 0;
    protected readonly items = new Map<number, T>();
    private lastId!: number;

    constructor(private readonly logger: Logger, ...seed: T[]) {
        seed.forEach(item => this.items.set(item.id, item));
        Store.#instances++;
    }

    get size(): number { return this.items.size; }

    *[Symbol.iterator](): Iterator<T> {
        yield* this.items.values();
    }

    async load(file: string = path.join(__dirname, "items.json")): Promise<void> {
        const raw = await fs.promises.readFile(file, "utf8");
        for (const entry of JSON.parse(raw) as T[]) {
            this.items.set(entry.id, entry);
        }
        this.logger?.info?.(`loaded ${this.items.size} items from ${file}`);
    }

    abstract validate(item: T): item is T & { valid: true };

    static {
        globalThis.stores ??= [];
    }
}

export default function summarize<T>(store: Store<T & { id: number }>, label = "items") {
    let count = 0, total = 0;
    outer: for (let i = 0; i < store.size; i++) {
        switch (i % 3) {
            case 0: count += 1; break;
            case 1: continue outer;
            default: total = (total + i) ** 2 / 3;
        }
    }
    return { label, count, total, ratio: count ? total / count : NaN, };
}
"#;

fn bench_parse_typescript(c: &mut Criterion) {
    c.bench_function("parse_typescript_declarations", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let parser = Parser::new(&arena, "bench.ts", black_box(TYPESCRIPT_SOURCE));
            black_box(parser.parse());
        });
    });
}

criterion_group!(benches, bench_parse_typescript);
criterion_main!(benches);
