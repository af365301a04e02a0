use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pergola::core::extract::{scan_embedded_ui, scan_record};
use serde_json::json;

fn narrative_record(text: &str) -> serde_json::Value {
    json!({"content": {"parts": [{"text": text}]}})
}

fn ui_payload(rows: usize) -> String {
    let data: Vec<serde_json::Value> = (0..rows)
        .map(|i| json!({"month": format!("m{i}"), "sales": i * 3}))
        .collect();
    json!({
        "components": [
            {"type": "text", "content": "Report", "variant": "h2"},
            {"type": "chart", "kind": "bar", "data": data, "x_key": "month", "y_keys": ["sales"]},
        ],
    })
    .to_string()
}

fn bench_extract(c: &mut Criterion) {
    let filler = "The quick brown fox jumps over the lazy dog. ".repeat(40);

    for &rows in &[10usize, 100usize] {
        let embedded = format!("{filler}{}{filler}", ui_payload(rows));
        let record = narrative_record(&embedded);

        let mut group = c.benchmark_group(format!("extract_rows{rows}"));
        group.throughput(Throughput::Bytes(embedded.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("scan_embedded_ui", rows),
            &embedded,
            |b, text| b.iter(|| scan_embedded_ui(text)),
        );
        group.bench_with_input(
            BenchmarkId::new("scan_record", rows),
            &record,
            |b, record| b.iter(|| scan_record(record)),
        );
        group.finish();
    }

    let prose = narrative_record(&filler);
    c.bench_function("scan_record_prose_only", |b| b.iter(|| scan_record(&prose)));
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
