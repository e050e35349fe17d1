use observability::ComponentMetrics;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::{
    ComponentApiClient, ComponentRequestBuilder, ProjectorRequestBuilder, WhiteboardRequestBuilder,
};
use crate::error::{ComponentError, ComponentResult};
use crate::kind::{ComponentKind, KindFamily};
use crate::models::LearningComponent;

/// Routes a component to the request builder registered for its kind.
pub struct RequestDispatcher {
    builders: HashMap<ComponentKind, Arc<dyn ComponentRequestBuilder>>,
}

impl std::fmt::Debug for RequestDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.builders.keys().map(|k| k.path_segment()).collect();
        kinds.sort_unstable();
        f.debug_struct("RequestDispatcher").field("kinds", &kinds).finish()
    }
}

impl RequestDispatcher {
    pub fn builder() -> RequestDispatcherBuilder {
        RequestDispatcherBuilder::default()
    }

    /// Dispatcher with a builder for every known kind.
    pub fn standard(client: Arc<ComponentApiClient>) -> ComponentResult<Self> {
        Self::builder()
            .register(ProjectorRequestBuilder::new(client.clone()))
            .register(WhiteboardRequestBuilder::new(client))
            .build()
    }

    pub fn kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        self.builders.keys().copied()
    }

    /// The single builder responsible for `component`.
    pub fn builder_for(
        &self,
        component: &LearningComponent,
    ) -> ComponentResult<&dyn ComponentRequestBuilder> {
        let kind = component.kind();
        match self.builders.get(&kind) {
            Some(builder) if builder.can_handle(component) => {
                debug!(kind = %kind, "Resolved request builder");
                Ok(builder.as_ref())
            }
            _ => {
                ComponentMetrics::record_unsupported(component.type_name());
                Err(ComponentError::UnsupportedType {
                    type_name: component.type_name(),
                })
            }
        }
    }

    pub fn can_handle(&self, component: &LearningComponent) -> bool {
        self.builders
            .get(&component.kind())
            .is_some_and(|builder| builder.can_handle(component))
    }

    pub async fn post(
        &self,
        component: &LearningComponent,
        space_id: i64,
    ) -> ComponentResult<LearningComponent> {
        self.builder_for(component)?.post(component, space_id).await
    }

    pub async fn put(
        &self,
        component: &LearningComponent,
        space_id: i64,
    ) -> ComponentResult<LearningComponent> {
        self.builder_for(component)?.put(component, space_id).await
    }
}

/// Collects request builders; at most one per kind.
#[derive(Default)]
pub struct RequestDispatcherBuilder {
    builders: Vec<Arc<dyn ComponentRequestBuilder>>,
}

impl RequestDispatcherBuilder {
    pub fn register<B: ComponentRequestBuilder + 'static>(mut self, builder: B) -> Self {
        self.builders.push(Arc::new(builder));
        self
    }

    pub fn build(self) -> ComponentResult<RequestDispatcher> {
        let mut builders = HashMap::with_capacity(self.builders.len());
        for builder in self.builders {
            let kind = builder.kind();
            if builders.insert(kind, builder).is_some() {
                return Err(ComponentError::DuplicateRegistration(kind));
            }
        }
        Ok(RequestDispatcher { builders })
    }
}
