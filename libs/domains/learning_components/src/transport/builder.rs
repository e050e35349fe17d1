use async_trait::async_trait;
use observability::DispatchTimer;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::{info, warn};

use super::{ComponentApiClient, ComponentRequestBuilder, kind_component_path, kind_path};
use crate::error::{ComponentError, ComponentResult};
use crate::kind::{ComponentKind, KindFamily, KindMember};
use crate::mapping::{ComponentMapper, ProjectorMapper, WhiteboardMapper};
use crate::models::LearningComponent;

pub type ProjectorRequestBuilder = MappedRequestBuilder<ProjectorMapper>;
pub type WhiteboardRequestBuilder = MappedRequestBuilder<WhiteboardMapper>;

/// Request builder that encodes with its own mapper.
///
/// The payload is the mapper's no-id DTO and the response is decoded from the
/// kind's with-id DTO, so no registry lookup happens on this path.
pub struct MappedRequestBuilder<M> {
    mapper: M,
    client: Arc<ComponentApiClient>,
}

impl<M: ComponentMapper + Default> MappedRequestBuilder<M> {
    pub fn new(client: Arc<ComponentApiClient>) -> Self {
        Self::with_mapper(M::default(), client)
    }
}

impl<M: ComponentMapper> MappedRequestBuilder<M> {
    pub fn with_mapper(mapper: M, client: Arc<ComponentApiClient>) -> Self {
        Self { mapper, client }
    }

    fn entity<'a>(&self, component: &'a LearningComponent) -> ComponentResult<&'a M::Entity> {
        M::Entity::as_member(component).ok_or(ComponentError::ShapeMismatch {
            expected: M::Entity::TYPE_NAME,
            actual: component.type_name(),
        })
    }
}

fn failure_label(err: &ComponentError) -> String {
    match err {
        ComponentError::Transport(transport) => transport.kind.to_string(),
        ComponentError::MissingField { .. } => "missing_field".to_string(),
        ComponentError::InvalidField { .. } => "invalid_field".to_string(),
        ComponentError::ShapeMismatch { .. } => "shape_mismatch".to_string(),
        _ => "other".to_string(),
    }
}

fn finish(
    timer: DispatchTimer,
    space_id: i64,
    operation: &str,
    result: ComponentResult<LearningComponent>,
) -> ComponentResult<LearningComponent> {
    match &result {
        Ok(component) => {
            let elapsed_ms = timer.succeed();
            info!(
                space_id,
                component_id = ?component.id(),
                kind = %component.kind(),
                operation,
                elapsed_ms,
                "Component request succeeded"
            );
        }
        Err(e) => {
            timer.fail(&failure_label(e));
            warn!(space_id, operation, error = %e, "Component request failed");
        }
    }
    result
}

#[async_trait]
impl<M> ComponentRequestBuilder for MappedRequestBuilder<M>
where
    M: ComponentMapper + 'static,
    M::Entity: Sync,
    M::NoIdDto: Serialize + Send + Sync,
    M::Dto: DeserializeOwned + Send,
{
    fn kind(&self) -> ComponentKind {
        <M::Entity as KindMember<LearningComponent>>::KIND
    }

    async fn post(
        &self,
        component: &LearningComponent,
        space_id: i64,
    ) -> ComponentResult<LearningComponent> {
        let kind = self.kind();
        let timer = DispatchTimer::start(kind.path_segment(), "post");

        let result: ComponentResult<LearningComponent> = async {
            let payload = self.mapper.to_no_id_dto(self.entity(component)?);
            let created: M::Dto = self
                .client
                .post_json(&kind_path(space_id, kind), &payload)
                .await?;
            Ok(self.mapper.from_dto(&created)?.into_family())
        }
        .await;

        finish(timer, space_id, "post", result)
    }

    async fn put(
        &self,
        component: &LearningComponent,
        space_id: i64,
    ) -> ComponentResult<LearningComponent> {
        let kind = self.kind();
        let timer = DispatchTimer::start(kind.path_segment(), "put");

        let result: ComponentResult<LearningComponent> = async {
            let component_id = component
                .id()
                .ok_or(ComponentError::MissingField { kind, field: "id" })?;
            let payload = self.mapper.to_no_id_dto(self.entity(component)?);
            let updated: M::Dto = self
                .client
                .put_json(&kind_component_path(space_id, kind, component_id), &payload)
                .await?;
            Ok(self.mapper.from_dto(&updated)?.into_family())
        }
        .await;

        finish(timer, space_id, "put", result)
    }
}
