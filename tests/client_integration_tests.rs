//! End-to-end client tests over the scripted transport
//!
//! These tests drive the public API the way an application does: fetch the
//! observation schema of a data stream once, then read and write observations
//! with it.

use connected_systems::net::request::AUTHORIZATION;
use connected_systems::swe_common::{Block, SweError};
use connected_systems::test_utils::MockTransport;
use connected_systems::{
    ClientConfig, ConnectedSystemsApi, Error, Method, ObservationResource, ObservationsQuery,
    SystemsQuery, TimeExtent,
};
use serde_json::{json, Value};
use time::macros::datetime;
use tracing_subscriber::EnvFilter;

const ROOT: &str = "http://localhost:8181/sensorhub/api";

fn api() -> ConnectedSystemsApi<MockTransport> {
    // RUST_LOG=connected_systems=debug shows request dispatch
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    ConnectedSystemsApi::new(
        ClientConfig::with_credentials(ROOT, "admin", "admin"),
        MockTransport::new(),
    )
}

fn cat_schema_body() -> String {
    json!({
        "obsFormat": "application/om+json",
        "resultSchema": {
            "type": "DataRecord",
            "name": "cat_sensor_data",
            "fields": [
                {
                    "type": "Vector",
                    "name": "pos",
                    "definition": "http://www.opengis.net/def/property/OGC/0/SensorLocation",
                    "referenceFrame": "http://www.opengis.net/def/crs/EPSG/0/4979",
                    "coordinates": [
                        {"type": "Quantity", "name": "lat", "uom": {"code": "deg"}},
                        {"type": "Quantity", "name": "lon", "uom": {"code": "deg"}}
                    ]
                },
                {"type": "Boolean", "name": "awake"}
            ]
        }
    })
    .to_string()
}

#[test]
fn test_fetch_schema_then_observations() {
    let api = api();
    api.transport().push_json(200, &cat_schema_body());
    api.transport().push_json(
        200,
        &json!({
            "items": [
                {
                    "id": "obs1",
                    "datastream@id": "038q",
                    "phenomenonTime": "2025-03-01T08:30:00Z",
                    "resultTime": "2025-03-01T08:30:00Z",
                    "result": {"pos": [43.61, 1.44], "awake": true}
                },
                {
                    "id": "obs2",
                    "datastream@id": "038q",
                    "phenomenonTime": "2025-03-01T08:31:00Z",
                    "resultTime": "2025-03-01T08:31:00Z",
                    "result": {"pos": [43.62, 1.45], "awake": false}
                }
            ]
        })
        .to_string(),
    );

    let schema = api.data_streams().get_result_schema("038q").unwrap();
    // The server schema had no time stamp, so one was added up front
    assert_eq!(schema.children()[0].name(), "time");
    assert!(schema.has_time_stamp());

    let response = api
        .observations()
        .get_observations_of_data_stream("038q", &schema, ObservationsQuery::new().limit(2))
        .unwrap();
    assert!(!response.is_single_item());
    assert_eq!(response.items().len(), 2);

    let second = &response.items()[1];
    let result = second.result.as_ref().unwrap();
    assert_eq!(
        result.field(&schema, "time"),
        Some(&Block::Time(datetime!(2025-03-01 08:31 UTC)))
    );
    assert_eq!(
        result.lookup(&schema, "pos/lat"),
        Some(&Block::Quantity(43.62))
    );
    assert_eq!(result.field(&schema, "awake"), Some(&Block::Boolean(false)));

    let requests = api.transport().requests();
    assert_eq!(requests[0].url, format!("{ROOT}/datastreams/038q/schema"));
    assert_eq!(
        requests[1].url,
        format!("{ROOT}/datastreams/038q/observations?limit=2")
    );
    assert_eq!(requests[1].header(AUTHORIZATION), Some("Basic YWRtaW46YWRtaW4="));
}

#[test]
fn test_create_observation_sends_result_without_time() {
    let api = api();
    api.transport().push_json(200, &cat_schema_body());
    api.transport().push(
        connected_systems::test_utils::create_test_response(201, "")
            .with_header("Location", format!("{ROOT}/observations/obs9")),
    );

    let schema = api.data_streams().get_result_schema("038q").unwrap();
    let observation = ObservationResource::new(Block::Record(vec![
        Block::Time(datetime!(2025-03-01 09:00 UTC)),
        Block::Vector(vec![Block::Quantity(43.6), Block::Quantity(1.4)]),
        Block::Boolean(true),
    ]))
    .with_phenomenon_time(datetime!(2025-03-01 09:00 UTC));

    let response = api
        .observations()
        .create_observation("038q", &observation, &schema)
        .unwrap();
    assert_eq!(response.status(), 201);
    assert_eq!(response.created_id(), Some("obs9"));

    let request = api.transport().last_request().unwrap();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, format!("{ROOT}/datastreams/038q/observations"));
    let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({
            "phenomenonTime": "2025-03-01T09:00:00Z",
            "result": {"pos": [43.6, 1.4], "awake": true}
        })
    );
}

#[test]
fn test_single_observation() {
    let api = api();
    api.transport().push_json(200, &cat_schema_body());
    api.transport().push_json(
        200,
        r#"{"id": "obs1", "resultTime": "2025-03-01T08:30:00Z", "result": {"pos": [1.0, 2.0], "awake": true}}"#,
    );

    let schema = api.data_streams().get_result_schema("038q").unwrap();
    let response = api.observations().get_observation("obs1", &schema).unwrap();
    assert!(response.is_single_item());
    let obs = response.into_item().unwrap();
    assert_eq!(obs.id.as_deref(), Some("obs1"));
    // Phenomenon time falls back to the result time
    assert_eq!(
        obs.result.unwrap().field(&schema, "time"),
        Some(&Block::Time(datetime!(2025-03-01 08:30 UTC)))
    );
}

#[test]
fn test_error_status_is_not_decoded() {
    let api = api();
    api.transport().push_json(404, "Data stream 999 not found");

    let err = api.data_streams().get_observation_schema("999").unwrap_err();
    match err {
        Error::Status { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Data stream 999 not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_status_body_uses_reason_phrase() {
    let api = api();
    api.transport().push_json(500, "");

    let err = api.observations().delete_observation("obs1").unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Request failed with status 500: Internal Server Error");
}

#[test]
fn test_transport_failure() {
    let api = api();
    api.transport().push_failure("connection refused");

    let err = api.systems().get_system("s1").unwrap_err();
    assert!(matches!(err, Error::Transport { .. }));
}

#[test]
fn test_result_mismatch_reports_path() {
    let api = api();
    api.transport().push_json(200, &cat_schema_body());
    api.transport().push_json(
        200,
        r#"{"items": [{"phenomenonTime": "2025-03-01T08:30:00Z", "result": {"pos": [1.0], "awake": true}}]}"#,
    );

    let schema = api.data_streams().get_result_schema("038q").unwrap();
    let err = api
        .observations()
        .get_observations_of_data_stream("038q", &schema, ObservationsQuery::new())
        .unwrap_err();
    match err {
        Error::Codec(SweError::SchemaMismatch { path, .. }) => assert_eq!(path, "/pos"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_schema_item() {
    let api = api();
    api.transport().push_json(200, r#"{"items": []}"#);

    let err = api.data_streams().get_result_schema("038q").unwrap_err();
    assert!(matches!(err, Error::EmptyResponse { .. }));
}

#[test]
fn test_system_queries() {
    let api = api();
    api.transport().push_json(
        200,
        r#"{"items": [{"type": "Feature", "id": "s1", "properties": {"uid": "urn:x", "featureType": "http://www.w3.org/ns/sosa/Sensor"}}]}"#,
    );
    api.transport().push_json(204, "");

    let systems = api
        .systems()
        .get_systems(SystemsQuery::new().datetime(&TimeExtent::now()).limit(5))
        .unwrap();
    assert_eq!(systems.items()[0].uid(), "urn:x");

    api.systems().delete_system("s1", true).unwrap();

    let requests = api.transport().requests();
    assert_eq!(requests[0].url, format!("{ROOT}/systems?datetime=now&limit=5"));
    assert_eq!(requests[1].method, Method::Delete);
    assert_eq!(requests[1].url, format!("{ROOT}/systems/s1?cascade=true"));
}
