use swe_common::Component;

use super::ConnectedSystemsApi;
use crate::codec::DocumentCodec;
use crate::error::Result;
use crate::models::ObservationResource;
use crate::net::{ApiResponse, Endpoint, HttpTransport, Method};
use crate::query::ObservationsQuery;

/// Operations on observations
///
/// Every call that carries a result takes the result schema of the data
/// stream, as returned by
/// [`DataStreamsApi::get_result_schema`](super::DataStreamsApi::get_result_schema).
pub struct ObservationsApi<'a, T> {
    api: &'a ConnectedSystemsApi<T>,
}

impl<'a, T: HttpTransport> ObservationsApi<'a, T> {
    pub(crate) fn new(api: &'a ConnectedSystemsApi<T>) -> Self {
        Self { api }
    }

    pub fn get_observations_of_data_stream(
        &self,
        data_stream_id: &str,
        result_schema: &Component,
        query: ObservationsQuery,
    ) -> Result<ApiResponse<ObservationResource>> {
        let request = self
            .api
            .request()
            .resource(Endpoint::DataStreams)
            .resource_id(data_stream_id)
            .sub_resource(Endpoint::Observations)
            .query(query.parameters())
            .build()?;
        let codec = self.api.codec().with_result_schema(result_schema);
        self.api.fetch(request, &codec)
    }

    pub fn get_observation(
        &self,
        observation_id: &str,
        result_schema: &Component,
    ) -> Result<ApiResponse<ObservationResource>> {
        let request = self
            .api
            .request()
            .resource(Endpoint::Observations)
            .resource_id(observation_id)
            .build()?;
        let codec = self.api.codec().with_result_schema(result_schema);
        self.api.fetch(request, &codec)
    }

    pub fn create_observation(
        &self,
        data_stream_id: &str,
        observation: &ObservationResource,
        result_schema: &Component,
    ) -> Result<ApiResponse<()>> {
        let codec = self.api.codec().with_result_schema(result_schema);
        let request = self
            .api
            .request()
            .method(Method::Post)
            .resource(Endpoint::DataStreams)
            .resource_id(data_stream_id)
            .sub_resource(Endpoint::Observations)
            .body(codec.to_body(observation)?)
            .build()?;
        self.api.submit(request)
    }

    pub fn update_observation(
        &self,
        observation_id: &str,
        observation: &ObservationResource,
        result_schema: &Component,
    ) -> Result<ApiResponse<()>> {
        let codec = self.api.codec().with_result_schema(result_schema);
        let request = self
            .api
            .request()
            .method(Method::Put)
            .resource(Endpoint::Observations)
            .resource_id(observation_id)
            .body(codec.to_body(observation)?)
            .build()?;
        self.api.submit(request)
    }

    pub fn delete_observation(&self, observation_id: &str) -> Result<ApiResponse<()>> {
        let request = self
            .api
            .request()
            .method(Method::Delete)
            .resource(Endpoint::Observations)
            .resource_id(observation_id)
            .build()?;
        self.api.submit(request)
    }
}
