use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lookalike::{transform, LookalikeTable};

fn resource(paragraphs: usize) -> String {
    let mut s = String::from("{\n");
    for i in 0..paragraphs {
        if i % 10 == 0 {
            // Cyrillic а and С
            let line = format!("Paragraph ({i}\u{0430}) see (\u{0421}ection {i})");
            s.push_str(&format!("  \"p{i}\": \"{line}\",\n"));
        } else {
            s.push_str(&format!("  \"p{i}\": \"Paragraph ({i}a) see (Section {i})\",\n"));
        }
    }
    s.push_str("  \"end\": \"\"\n}\n");
    s
}

fn transform_bench(c: &mut Criterion) {
    let text = resource(2_000);
    let clean = LookalikeTable::cyrillic().normalize(&text);
    c.benchmark_group("transform")
        .bench_function("mixed", |bencher| bencher.iter(|| transform(black_box(&text))))
        .bench_function("clean", |bencher| bencher.iter(|| transform(black_box(&clean))));
}

criterion_group!(benches, transform_bench);
criterion_main!(benches);
