use async_trait::async_trait;
use core_config::api_client::ApiClientConfig;
use std::sync::Arc;
use tracing::info;

use crate::dto::ComponentDto;
use crate::error::ComponentResult;
use crate::kind::KindFamily;
use crate::mapping::MapperRegistry;
use crate::models::{ComponentFilter, LearningComponent};
use crate::transport::{ComponentApiClient, RequestDispatcher, component_path, components_path};

/// CRUD over the learning components of a learning space.
///
/// Callers hand over and receive [`LearningComponent`] values of any kind.
#[async_trait]
pub trait LearningComponentRepository: Send + Sync {
    async fn list(
        &self,
        space_id: i64,
        filter: &ComponentFilter,
    ) -> ComponentResult<Vec<LearningComponent>>;

    async fn get(&self, space_id: i64, component_id: i64) -> ComponentResult<LearningComponent>;

    /// Create the component; the result carries the assigned id
    async fn create(
        &self,
        space_id: i64,
        component: &LearningComponent,
    ) -> ComponentResult<LearningComponent>;

    /// Replace the component identified by `component.id()`
    async fn update(
        &self,
        space_id: i64,
        component: &LearningComponent,
    ) -> ComponentResult<LearningComponent>;

    async fn delete(&self, space_id: i64, component_id: i64) -> ComponentResult<()>;
}

/// Repository backed by the campus HTTP API.
///
/// Reads decode tagged DTOs through the [`MapperRegistry`]; writes go through
/// the [`RequestDispatcher`] to the kind-specific endpoints.
#[derive(Debug, Clone)]
pub struct HttpLearningComponentRepository {
    client: Arc<ComponentApiClient>,
    registry: Arc<MapperRegistry>,
    dispatcher: Arc<RequestDispatcher>,
}

impl HttpLearningComponentRepository {
    pub fn new(config: &ApiClientConfig) -> ComponentResult<Self> {
        let client = Arc::new(ComponentApiClient::new(config)?);
        let dispatcher = Arc::new(RequestDispatcher::standard(client.clone())?);
        Ok(Self::with_parts(client, MapperRegistry::global(), dispatcher))
    }

    pub fn with_parts(
        client: Arc<ComponentApiClient>,
        registry: Arc<MapperRegistry>,
        dispatcher: Arc<RequestDispatcher>,
    ) -> Self {
        Self {
            client,
            registry,
            dispatcher,
        }
    }
}

#[async_trait]
impl LearningComponentRepository for HttpLearningComponentRepository {
    async fn list(
        &self,
        space_id: i64,
        filter: &ComponentFilter,
    ) -> ComponentResult<Vec<LearningComponent>> {
        let dtos: Vec<ComponentDto> = self
            .client
            .get_json_with_query(&components_path(space_id), filter)
            .await?;

        dtos.iter().map(|dto| self.registry.to_entity(dto)).collect()
    }

    async fn get(&self, space_id: i64, component_id: i64) -> ComponentResult<LearningComponent> {
        let dto: ComponentDto = self
            .client
            .get_json(&component_path(space_id, component_id))
            .await?;

        self.registry.to_entity(&dto)
    }

    async fn create(
        &self,
        space_id: i64,
        component: &LearningComponent,
    ) -> ComponentResult<LearningComponent> {
        let created = self.dispatcher.post(component, space_id).await?;
        info!(space_id, component_id = ?created.id(), kind = %created.kind(), "Created component via API");
        Ok(created)
    }

    async fn update(
        &self,
        space_id: i64,
        component: &LearningComponent,
    ) -> ComponentResult<LearningComponent> {
        let updated = self.dispatcher.put(component, space_id).await?;
        info!(space_id, component_id = ?updated.id(), kind = %updated.kind(), "Updated component via API");
        Ok(updated)
    }

    async fn delete(&self, space_id: i64, component_id: i64) -> ComponentResult<()> {
        self.client
            .delete(&component_path(space_id, component_id))
            .await?;
        info!(space_id, component_id, "Deleted component via API");
        Ok(())
    }
}
