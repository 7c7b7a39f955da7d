use swe_common::Component;

use super::ConnectedSystemsApi;
use crate::codec::DocumentCodec;
use crate::error::{Error, Result};
use crate::models::{DataStreamResource, ObservationSchema};
use crate::net::{ApiResponse, Endpoint, HttpTransport, Method};
use crate::query::DataStreamsQuery;

/// Operations on `/datastreams`
pub struct DataStreamsApi<'a, T> {
    api: &'a ConnectedSystemsApi<T>,
}

impl<'a, T: HttpTransport> DataStreamsApi<'a, T> {
    pub(crate) fn new(api: &'a ConnectedSystemsApi<T>) -> Self {
        Self { api }
    }

    pub fn get_data_streams(&self, query: DataStreamsQuery) -> Result<ApiResponse<DataStreamResource>> {
        let request = self
            .api
            .request()
            .resource(Endpoint::DataStreams)
            .query(query.parameters())
            .build()?;
        self.api.fetch(request, self.api.codec())
    }

    pub fn get_data_streams_of_system(
        &self,
        system_id: &str,
        query: DataStreamsQuery,
    ) -> Result<ApiResponse<DataStreamResource>> {
        let request = self
            .api
            .request()
            .resource(Endpoint::Systems)
            .resource_id(system_id)
            .sub_resource(Endpoint::DataStreams)
            .query(query.parameters())
            .build()?;
        self.api.fetch(request, self.api.codec())
    }

    pub fn get_data_stream(&self, data_stream_id: &str) -> Result<ApiResponse<DataStreamResource>> {
        let request = self
            .api
            .request()
            .resource(Endpoint::DataStreams)
            .resource_id(data_stream_id)
            .build()?;
        self.api.fetch(request, self.api.codec())
    }

    /// Add a data stream to a system; the body must carry its schema
    pub fn create_data_stream(
        &self,
        system_id: &str,
        data_stream: &DataStreamResource,
    ) -> Result<ApiResponse<()>> {
        if data_stream.schema.is_none() {
            return Err(Error::MissingField {
                resource: "data stream",
                field: "schema",
            });
        }
        let request = self
            .api
            .request()
            .method(Method::Post)
            .resource(Endpoint::Systems)
            .resource_id(system_id)
            .sub_resource(Endpoint::DataStreams)
            .body(self.api.codec().to_body(data_stream)?)
            .build()?;
        self.api.submit(request)
    }

    pub fn update_data_stream(
        &self,
        data_stream_id: &str,
        data_stream: &DataStreamResource,
    ) -> Result<ApiResponse<()>> {
        let request = self
            .api
            .request()
            .method(Method::Put)
            .resource(Endpoint::DataStreams)
            .resource_id(data_stream_id)
            .body(self.api.codec().to_body(data_stream)?)
            .build()?;
        self.api.submit(request)
    }

    /// Delete a data stream; `cascade` also removes its observations
    pub fn delete_data_stream(&self, data_stream_id: &str, cascade: bool) -> Result<ApiResponse<()>> {
        let mut builder = self
            .api
            .request()
            .method(Method::Delete)
            .resource(Endpoint::DataStreams)
            .resource_id(data_stream_id);
        if cascade {
            builder = builder.query_param("cascade", "true");
        }
        self.api.submit(builder.build()?)
    }

    /// Observation schema of a data stream; its result schema always holds a
    /// time stamp
    pub fn get_observation_schema(&self, data_stream_id: &str) -> Result<ApiResponse<ObservationSchema>> {
        let request = self
            .api
            .request()
            .resource(Endpoint::DataStreams)
            .resource_id(data_stream_id)
            .sub_resource(Endpoint::Schema)
            .build()?;
        self.api.fetch(request, self.api.codec())
    }

    /// Result schema to pass to every observation call for this data stream
    pub fn get_result_schema(&self, data_stream_id: &str) -> Result<Component> {
        let response = self.get_observation_schema(data_stream_id)?;
        let url = format!(
            "{}/{}/{}",
            Endpoint::DataStreams.path(),
            data_stream_id,
            Endpoint::Schema.path()
        );
        response
            .into_item()
            .map(|schema| schema.result_schema)
            .ok_or(Error::EmptyResponse { url })
    }
}
