use observability::ComponentMetrics;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use crate::dto::{ComponentDto, ComponentNoIdDto};
use crate::error::{ComponentError, ComponentResult};
use crate::kind::{ComponentKind, KindFamily};
use crate::mapping::MapperRegistry;
use crate::models::{ComponentFilter, LearningComponent};
use crate::store::ComponentStore;

/// Service layer for learning components.
///
/// Works on the tagged DTO families only; per-kind conversion is delegated to
/// the [`MapperRegistry`].
#[derive(Clone)]
pub struct LearningComponentService<S: ComponentStore> {
    store: Arc<S>,
    registry: Arc<MapperRegistry>,
}

impl<S: ComponentStore> LearningComponentService<S> {
    pub fn new(store: S) -> Self {
        Self::with_registry(store, MapperRegistry::global())
    }

    pub fn with_registry(store: S, registry: Arc<MapperRegistry>) -> Self {
        Self {
            store: Arc::new(store),
            registry,
        }
    }

    pub fn registry(&self) -> &MapperRegistry {
        &self.registry
    }

    /// Create a component in a learning space
    pub async fn create(
        &self,
        space_id: i64,
        input: ComponentNoIdDto,
    ) -> ComponentResult<ComponentDto> {
        input
            .validate()
            .map_err(|e| ComponentError::Validation(e.to_string()))?;

        let kind = input.kind();
        let entity = self.decode(kind, self.registry.to_entity_from_no_id(&input))?;
        let created = self.store.insert(space_id, entity).await?;

        ComponentMetrics::record_stored(kind.path_segment(), "create");
        self.refresh_live_gauge(kind).await;
        info!(space_id, component_id = ?created.id(), kind = %kind, "Created learning component");

        self.registry.to_dto_with_id(&created)
    }

    /// Get a live component
    pub async fn get(&self, space_id: i64, component_id: i64) -> ComponentResult<ComponentDto> {
        let component = self.get_live(space_id, component_id).await?;
        self.registry.to_dto_with_id(&component)
    }

    /// List the components of a learning space
    pub async fn list(
        &self,
        space_id: i64,
        filter: ComponentFilter,
    ) -> ComponentResult<Vec<ComponentDto>> {
        self.store
            .list(space_id, filter)
            .await?
            .iter()
            .map(|component| self.registry.to_dto_with_id(component))
            .collect()
    }

    /// Replace a live component. The payload must be of the stored kind.
    pub async fn update(
        &self,
        space_id: i64,
        component_id: i64,
        input: ComponentNoIdDto,
    ) -> ComponentResult<ComponentDto> {
        input
            .validate()
            .map_err(|e| ComponentError::Validation(e.to_string()))?;

        let existing = self.get_live(space_id, component_id).await?;
        let kind = input.kind();
        if existing.kind() != kind {
            return Err(ComponentError::Validation(format!(
                "component {component_id} is a {}, not a {kind}",
                existing.kind()
            )));
        }

        let entity = self.decode(kind, self.registry.to_entity_from_no_id(&input))?;
        let updated = self
            .store
            .replace(space_id, component_id, entity)
            .await?
            .ok_or(ComponentError::NotFound {
                space_id,
                component_id,
            })?;

        ComponentMetrics::record_stored(kind.path_segment(), "update");
        info!(space_id, component_id, kind = %kind, "Updated learning component");

        self.registry.to_dto_with_id(&updated)
    }

    /// Soft-delete a live component
    pub async fn delete(&self, space_id: i64, component_id: i64) -> ComponentResult<()> {
        let existing = self.get_live(space_id, component_id).await?;

        if !self.store.soft_delete(space_id, component_id).await? {
            return Err(ComponentError::NotFound {
                space_id,
                component_id,
            });
        }

        let kind = existing.kind();
        ComponentMetrics::record_stored(kind.path_segment(), "delete");
        self.refresh_live_gauge(kind).await;
        info!(space_id, component_id, kind = %kind, "Deleted learning component");

        Ok(())
    }

    async fn get_live(
        &self,
        space_id: i64,
        component_id: i64,
    ) -> ComponentResult<LearningComponent> {
        self.store
            .get(space_id, component_id)
            .await?
            .filter(|component| !component.is_deleted())
            .ok_or(ComponentError::NotFound {
                space_id,
                component_id,
            })
    }

    fn decode(
        &self,
        kind: ComponentKind,
        result: ComponentResult<LearningComponent>,
    ) -> ComponentResult<LearningComponent> {
        result.inspect_err(|e| {
            let reason = match e {
                ComponentError::MissingField { .. } => "missing_field",
                ComponentError::InvalidField { .. } => "invalid_field",
                ComponentError::UnsupportedType { .. } => "unsupported_type",
                _ => "other",
            };
            ComponentMetrics::record_mapping_failed(kind.path_segment(), reason);
        })
    }

    async fn refresh_live_gauge(&self, kind: ComponentKind) {
        match self.store.count_live(kind).await {
            Ok(count) => ComponentMetrics::set_live_components(kind.path_segment(), count),
            Err(e) => warn!(kind = %kind, error = %e, "Failed to count live components"),
        }
    }
}
