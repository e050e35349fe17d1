//! Component synchronization against the campus API.

use domain_learning_components::{
    ComponentDto, ComponentFilter, ComponentNoIdDto, LearningComponentRepository, MapperRegistry,
};
use eyre::{Result, WrapErr, eyre};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// A payload file holds one tagged component or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PayloadFile {
    Many(Vec<ComponentNoIdDto>),
    One(ComponentNoIdDto),
}

/// Read and validate the tagged no-id DTOs in a JSON file.
pub fn read_payloads(path: &Path) -> Result<Vec<ComponentNoIdDto>> {
    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    parse_payloads(&raw).wrap_err_with(|| format!("Invalid payload file {}", path.display()))
}

fn parse_payloads(raw: &str) -> Result<Vec<ComponentNoIdDto>> {
    let payloads = match serde_json::from_str::<PayloadFile>(raw)? {
        PayloadFile::Many(many) => many,
        PayloadFile::One(one) => vec![one],
    };

    for (index, payload) in payloads.iter().enumerate() {
        payload
            .validate()
            .map_err(|e| eyre!("component #{index}: {e}"))?;
    }

    Ok(payloads)
}

/// Outcome of a batch create
#[derive(Debug, Default)]
pub struct SyncResult {
    pub created: Vec<ComponentDto>,
    pub failed: usize,
}

/// Pushes components to a learning space through a repository
pub struct ComponentSync<R: LearningComponentRepository> {
    repository: R,
    registry: Arc<MapperRegistry>,
}

impl<R: LearningComponentRepository> ComponentSync<R> {
    pub fn new(repository: R, registry: Arc<MapperRegistry>) -> Self {
        Self {
            repository,
            registry,
        }
    }

    pub async fn list(&self, space_id: i64, filter: ComponentFilter) -> Result<Vec<ComponentDto>> {
        let components = self.repository.list(space_id, &filter).await?;
        components
            .iter()
            .map(|component| Ok(self.registry.to_dto_with_id(component)?))
            .collect()
    }

    pub async fn get(&self, space_id: i64, component_id: i64) -> Result<ComponentDto> {
        let component = self.repository.get(space_id, component_id).await?;
        Ok(self.registry.to_dto_with_id(&component)?)
    }

    /// Create every payload; a failed component is logged and skipped.
    pub async fn create_all(
        &self,
        space_id: i64,
        payloads: &[ComponentNoIdDto],
    ) -> Result<SyncResult> {
        let mut result = SyncResult::default();

        for payload in payloads {
            let entity = self.registry.to_entity_from_no_id(payload)?;
            match self.repository.create(space_id, &entity).await {
                Ok(created) => result.created.push(self.registry.to_dto_with_id(&created)?),
                Err(e) => {
                    warn!(space_id, error = %e, "Failed to create component");
                    result.failed += 1;
                }
            }
        }

        info!(
            space_id,
            created = result.created.len(),
            failed = result.failed,
            "Component sync complete"
        );
        Ok(result)
    }

    pub async fn update(
        &self,
        space_id: i64,
        component_id: i64,
        payload: &ComponentNoIdDto,
    ) -> Result<ComponentDto> {
        let entity = self
            .registry
            .to_entity_from_no_id(payload)?
            .with_id(component_id);
        let updated = self.repository.update(space_id, &entity).await?;
        Ok(self.registry.to_dto_with_id(&updated)?)
    }

    pub async fn delete(&self, space_id: i64, component_id: i64) -> Result<()> {
        self.repository.delete(space_id, component_id).await?;
        Ok(())
    }
}
