use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::ComponentResult;
use crate::kind::{ComponentKind, KindFamily};
use crate::models::{ComponentFilter, LearningComponent};

/// Server-side persistence for learning components, keyed by learning space.
///
/// Implementations return soft-deleted components from `get`; hiding them is
/// the service's decision.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComponentStore: Send + Sync {
    /// Store a new component and assign its id
    async fn insert(
        &self,
        space_id: i64,
        component: LearningComponent,
    ) -> ComponentResult<LearningComponent>;

    async fn get(
        &self,
        space_id: i64,
        component_id: i64,
    ) -> ComponentResult<Option<LearningComponent>>;

    /// Components of a space matching `filter`, ordered by id
    async fn list(
        &self,
        space_id: i64,
        filter: ComponentFilter,
    ) -> ComponentResult<Vec<LearningComponent>>;

    /// Replace the stored component with the same id.
    /// Returns `None` if no such component exists in the space or it is
    /// soft-deleted; the liveness check and the write happen atomically.
    async fn replace(
        &self,
        space_id: i64,
        component_id: i64,
        component: LearningComponent,
    ) -> ComponentResult<Option<LearningComponent>>;

    /// Mark a component deleted. Returns `false` if it does not exist.
    async fn soft_delete(&self, space_id: i64, component_id: i64) -> ComponentResult<bool>;

    /// Number of live components of a kind across all spaces
    async fn count_live(&self, kind: ComponentKind) -> ComponentResult<usize>;
}

/// In-memory implementation of ComponentStore (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryComponentStore {
    components: Arc<RwLock<BTreeMap<(i64, i64), LearningComponent>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryComponentStore {
    pub fn new() -> Self {
        Self {
            components: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryComponentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ComponentStore for InMemoryComponentStore {
    async fn insert(
        &self,
        space_id: i64,
        component: LearningComponent,
    ) -> ComponentResult<LearningComponent> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let component = component.with_id(id);

        self.components
            .write()
            .await
            .insert((space_id, id), component.clone());

        tracing::debug!(space_id, component_id = id, kind = %component.kind(), "Inserted component");
        Ok(component)
    }

    async fn get(
        &self,
        space_id: i64,
        component_id: i64,
    ) -> ComponentResult<Option<LearningComponent>> {
        let components = self.components.read().await;
        Ok(components.get(&(space_id, component_id)).cloned())
    }

    async fn list(
        &self,
        space_id: i64,
        filter: ComponentFilter,
    ) -> ComponentResult<Vec<LearningComponent>> {
        let components = self.components.read().await;
        Ok(components
            .range((space_id, i64::MIN)..=(space_id, i64::MAX))
            .map(|(_, component)| component)
            .filter(|component| filter.matches(component))
            .cloned()
            .collect())
    }

    async fn replace(
        &self,
        space_id: i64,
        component_id: i64,
        component: LearningComponent,
    ) -> ComponentResult<Option<LearningComponent>> {
        let mut components = self.components.write().await;
        let Some(slot) = components.get_mut(&(space_id, component_id)) else {
            return Ok(None);
        };
        if slot.is_deleted() {
            return Ok(None);
        }
        *slot = component.with_id(component_id);
        Ok(Some(slot.clone()))
    }

    async fn soft_delete(&self, space_id: i64, component_id: i64) -> ComponentResult<bool> {
        let mut components = self.components.write().await;
        match components.get_mut(&(space_id, component_id)) {
            Some(component) => {
                component.attributes_mut().is_deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_live(&self, kind: ComponentKind) -> ComponentResult<usize> {
        let components = self.components.read().await;
        Ok(components
            .values()
            .filter(|c| c.kind() == kind && !c.is_deleted())
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ComponentAttributes, Dimensions, MarkerColor, Orientation, Position, Whiteboard,
    };

    fn whiteboard(color: MarkerColor) -> LearningComponent {
        LearningComponent::Whiteboard(Whiteboard::new(
            ComponentAttributes::new(
                Orientation::North,
                Position::new(2.0, 2.0, 2.0),
                Dimensions::new(100.0, 50.0, 8.0),
            ),
            color,
        ))
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = InMemoryComponentStore::new();
        let first = store.insert(1, whiteboard(MarkerColor::Blue)).await.unwrap();
        let second = store.insert(2, whiteboard(MarkerColor::Red)).await.unwrap();

        assert_eq!(first.id(), Some(1));
        assert_eq!(second.id(), Some(2));
        assert!(store.get(1, 2).await.unwrap().is_none());
        assert_eq!(store.get(2, 2).await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_space_and_hides_deleted() {
        let store = InMemoryComponentStore::new();
        store.insert(1, whiteboard(MarkerColor::Blue)).await.unwrap();
        let deleted = store.insert(1, whiteboard(MarkerColor::Red)).await.unwrap();
        store.insert(2, whiteboard(MarkerColor::Green)).await.unwrap();

        assert!(store.soft_delete(1, deleted.id().unwrap()).await.unwrap());

        let live = store.list(1, ComponentFilter::default()).await.unwrap();
        assert_eq!(live.len(), 1);

        let all = store
            .list(
                1,
                ComponentFilter {
                    include_deleted: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(store.count_live(ComponentKind::Whiteboard).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_replace_keeps_id_and_requires_existing() {
        let store = InMemoryComponentStore::new();
        let created = store.insert(1, whiteboard(MarkerColor::Blue)).await.unwrap();
        let id = created.id().unwrap();

        let replaced = store
            .replace(1, id, whiteboard(MarkerColor::Black))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(replaced.id(), Some(id));
        assert_eq!(replaced, whiteboard(MarkerColor::Black).with_id(id));

        assert!(store.replace(1, 99, whiteboard(MarkerColor::Red)).await.unwrap().is_none());
        assert!(!store.soft_delete(1, 99).await.unwrap());
    }

    #[tokio::test]
    async fn test_replace_refuses_deleted_component() {
        let store = InMemoryComponentStore::new();
        let created = store.insert(1, whiteboard(MarkerColor::Blue)).await.unwrap();
        let id = created.id().unwrap();
        assert!(store.soft_delete(1, id).await.unwrap());

        assert!(store.replace(1, id, whiteboard(MarkerColor::Red)).await.unwrap().is_none());

        let stored = store.get(1, id).await.unwrap().unwrap();
        assert!(stored.is_deleted());
        let LearningComponent::Whiteboard(board) = stored else {
            panic!("expected a whiteboard");
        };
        assert_eq!(board.marker_color, MarkerColor::Blue);
    }
}
