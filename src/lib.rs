//! # Connected Systems API client
//!
//! Typed access to the systems, data streams and observations of an OGC
//! Connected Systems server. Observation results are self-describing: each
//! data stream publishes a SWE Common result schema, and every observation
//! call is decoded against the schema the caller fetched for that stream.
//!
//! ```rust
//! use connected_systems::codec::{DocumentCodec, JsonCodec};
//! use connected_systems::swe_common::{schema, Block};
//! use serde_json::json;
//!
//! let result_schema = schema::decode(&json!({"type": "Count", "name": "hits"})).unwrap();
//! let codec = JsonCodec::new();
//! let observations = codec.with_result_schema(&result_schema);
//!
//! let obs = observations
//!     .decode(&json!({"phenomenonTime": "2024-05-01T12:00:00Z", "result": {"hits": 4}}))
//!     .unwrap();
//! let result = obs.result.unwrap();
//! assert_eq!(result.field(&result_schema, "hits"), Some(&Block::Count(4)));
//! ```

pub mod api;
pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod net;
pub mod query;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use swe_common;

pub use api::{ConnectedSystemsApi, DataStreamsApi, ObservationsApi, SystemsApi};
pub use codec::{DocumentCodec, JsonCodec, ObservationCodec};
pub use config::ClientConfig;
pub use error::{Error, Result, TransportError};
pub use models::{
    DataStreamResource, DataStreamType, FeatureType, Link, ObservationResource, ObservationSchema,
    ObservedProperty, ResultType, SystemResource, TimeBound, TimeExtent,
};
pub use net::{ApiRequest, ApiResponse, Endpoint, HttpTransport, Method, RawResponse};
pub use query::{DataStreamsQuery, ObservationsQuery, QueryStringBuilder, SystemsQuery};
