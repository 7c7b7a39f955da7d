use connected_systems::net::{ApiResponse, RawResponse};
use connected_systems::swe_common::schema;
use connected_systems::{JsonCodec, ObservationResource};

use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::json;
use std::hint::black_box;

fn observation_page(count: usize) -> String {
    let items: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "id": format!("obs{i}"),
                "datastream@id": "038q",
                "phenomenonTime": "2025-03-01T08:30:00Z",
                "resultTime": "2025-03-01T08:30:01Z",
                "result": {
                    "pos": [43.61 + i as f64 * 1e-4, 1.44, 150.0],
                    "temp": 21.5,
                    "awake": i % 2 == 0
                }
            })
        })
        .collect();
    json!({ "items": items }).to_string()
}

fn decode_benchmark(c: &mut Criterion) {
    let result_schema = schema::decode(&json!({
        "type": "DataRecord",
        "name": "cat_sensor_data",
        "fields": [
            {
                "type": "Vector",
                "name": "pos",
                "coordinates": [
                    {"type": "Quantity", "name": "lat", "uom": {"code": "deg"}},
                    {"type": "Quantity", "name": "lon", "uom": {"code": "deg"}},
                    {"type": "Quantity", "name": "alt", "uom": {"code": "m"}}
                ]
            },
            {"type": "Quantity", "name": "temp", "uom": {"code": "Cel"}},
            {"type": "Boolean", "name": "awake"}
        ]
    }))
    .unwrap();
    let codec = JsonCodec::new();
    let body = observation_page(100);

    c.bench_function("decode_observation_page", |b| {
        b.iter(|| {
            let raw = RawResponse::new(200).with_body(black_box(body.as_str()));
            let observations = codec.with_result_schema(&result_schema);
            let response: ApiResponse<ObservationResource> =
                ApiResponse::decode(raw, &observations).unwrap();
            black_box(response.items().len())
        })
    });

    c.bench_function("decode_result_schema", |b| {
        let wire = schema::encode(&result_schema).unwrap();
        b.iter(|| schema::decode(black_box(&wire)).unwrap())
    });
}

criterion_group!(benches, decode_benchmark);
criterion_main!(benches);
