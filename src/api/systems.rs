use super::ConnectedSystemsApi;
use crate::codec::DocumentCodec;
use crate::error::Result;
use crate::models::SystemResource;
use crate::net::{ApiResponse, Endpoint, HttpTransport, Method};
use crate::query::SystemsQuery;

/// Operations on `/systems`
pub struct SystemsApi<'a, T> {
    api: &'a ConnectedSystemsApi<T>,
}

impl<'a, T: HttpTransport> SystemsApi<'a, T> {
    pub(crate) fn new(api: &'a ConnectedSystemsApi<T>) -> Self {
        Self { api }
    }

    pub fn get_systems(&self, query: SystemsQuery) -> Result<ApiResponse<SystemResource>> {
        let request = self
            .api
            .request()
            .resource(Endpoint::Systems)
            .query(query.parameters())
            .build()?;
        self.api.fetch(request, self.api.codec())
    }

    pub fn get_subsystems(&self, system_id: &str, query: SystemsQuery) -> Result<ApiResponse<SystemResource>> {
        let request = self
            .api
            .request()
            .resource(Endpoint::Systems)
            .resource_id(system_id)
            .sub_resource(Endpoint::Subsystems)
            .query(query.parameters())
            .build()?;
        self.api.fetch(request, self.api.codec())
    }

    pub fn get_system(&self, system_id: &str) -> Result<ApiResponse<SystemResource>> {
        let request = self
            .api
            .request()
            .resource(Endpoint::Systems)
            .resource_id(system_id)
            .build()?;
        self.api.fetch(request, self.api.codec())
    }

    /// Look a system up by its unique identifier
    pub fn get_system_by_uid(&self, uid: &str) -> Result<ApiResponse<SystemResource>> {
        self.get_systems(SystemsQuery::new().uid(uid))
    }

    pub fn create_system(&self, system: &SystemResource) -> Result<ApiResponse<()>> {
        let request = self
            .api
            .request()
            .method(Method::Post)
            .resource(Endpoint::Systems)
            .body(self.api.codec().to_body(system)?)
            .build()?;
        self.api.submit(request)
    }

    pub fn create_subsystem(&self, system_id: &str, system: &SystemResource) -> Result<ApiResponse<()>> {
        let request = self
            .api
            .request()
            .method(Method::Post)
            .resource(Endpoint::Systems)
            .resource_id(system_id)
            .sub_resource(Endpoint::Subsystems)
            .body(self.api.codec().to_body(system)?)
            .build()?;
        self.api.submit(request)
    }

    pub fn update_system(&self, system_id: &str, system: &SystemResource) -> Result<ApiResponse<()>> {
        let request = self
            .api
            .request()
            .method(Method::Put)
            .resource(Endpoint::Systems)
            .resource_id(system_id)
            .body(self.api.codec().to_body(system)?)
            .build()?;
        self.api.submit(request)
    }

    /// Delete a system; `cascade` also removes its subsystems and data streams
    pub fn delete_system(&self, system_id: &str, cascade: bool) -> Result<ApiResponse<()>> {
        let mut builder = self
            .api
            .request()
            .method(Method::Delete)
            .resource(Endpoint::Systems)
            .resource_id(system_id);
        if cascade {
            builder = builder.query_param("cascade", "true");
        }
        self.api.submit(builder.build()?)
    }
}
