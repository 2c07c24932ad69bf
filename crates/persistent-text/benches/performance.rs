use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use persistent_text::{History, TextBuffer};

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        out.push_str(&format!(
            "{i:06} the quick brown fox jumps over the lazy dog (persistent-text benchmark line)\n"
        ));
    }
    out.pop();
    out
}

fn bench_literal_construction(c: &mut Criterion) {
    let text = large_text(50_000);
    c.bench_function("literal_construction/50k_lines", |b| {
        b.iter(|| {
            let buf = TextBuffer::literal(black_box(&text));
            black_box(buf.len());
        })
    });
}

fn bench_edit_chain_middle_inserts(c: &mut Criterion) {
    let text = large_text(50_000);
    c.bench_function("edit_chain/1000_middle_inserts", |b| {
        b.iter_batched(
            || TextBuffer::literal(&text),
            |mut buf| {
                let mut offset = buf.len() / 2;
                for _ in 0..1000 {
                    buf = buf.insert(offset, "x").unwrap();
                    offset += 1;
                }
                black_box(buf.segment_count());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_char_at_deep_chain(c: &mut Criterion) {
    let text = large_text(10_000);
    let mut buf = TextBuffer::literal(&text);
    let mut offset = buf.len() / 2;
    for _ in 0..1000 {
        buf = buf.insert(offset, "x").unwrap();
        offset += 1;
    }

    let len = buf.len();
    c.bench_function("char_at/deep_chain_1000_probes", |b| {
        b.iter(|| {
            let mut probe = 7;
            for _ in 0..1000 {
                probe = (probe * 31 + 17) % len;
                black_box(buf.char_at(black_box(probe)).unwrap());
            }
        })
    });
}

fn bench_linearize_fragmented(c: &mut Criterion) {
    let text = large_text(10_000);
    let mut buf = TextBuffer::literal(&text);
    for i in 0..500 {
        buf = buf.insert((i * 797) % buf.len(), "yz").unwrap();
    }

    c.bench_function("linearize/500_fragments", |b| {
        b.iter(|| black_box(buf.to_string().len()))
    });
}

fn bench_flatten(c: &mut Criterion) {
    let text = large_text(10_000);
    let mut buf = TextBuffer::literal(&text);
    for i in 0..500 {
        buf = buf.insert((i * 797) % buf.len(), "yz").unwrap();
    }

    c.bench_function("flatten/500_fragments", |b| {
        b.iter(|| black_box(buf.flatten().segment_count()))
    });
}

fn bench_undo_redo_navigation(c: &mut Criterion) {
    let text = large_text(10_000);
    c.bench_function("history/200_edits_undo_redo_all", |b| {
        b.iter_batched(
            || History::new(TextBuffer::literal(&text)),
            |mut history| {
                for i in 0..200 {
                    let next = history.current().insert(i, "x").unwrap();
                    history.push(next);
                }
                while history.can_undo() {
                    history.undo();
                }
                while history.can_redo() {
                    history.redo();
                }
                black_box(history.current().len());
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_literal_construction,
    bench_edit_chain_middle_inserts,
    bench_char_at_deep_chain,
    bench_linearize_fragmented,
    bench_flatten,
    bench_undo_redo_navigation
);
criterion_main!(benches);
