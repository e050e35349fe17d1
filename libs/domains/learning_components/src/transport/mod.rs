//! Client side of the learning component endpoints.
//!
//! A [`ComponentRequestBuilder`] knows how to send one kind of component to
//! its kind-specific create/update endpoint. The [`RequestDispatcher`] holds
//! one builder per kind and routes a [`LearningComponent`] to it.

mod builder;
mod client;
mod dispatcher;

pub use builder::{MappedRequestBuilder, ProjectorRequestBuilder, WhiteboardRequestBuilder};
pub use client::ComponentApiClient;
pub use dispatcher::{RequestDispatcher, RequestDispatcherBuilder};

use async_trait::async_trait;

use crate::error::ComponentResult;
use crate::kind::{ComponentKind, KindFamily};
use crate::models::LearningComponent;

/// Sends components of one kind to the API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComponentRequestBuilder: Send + Sync {
    fn kind(&self) -> ComponentKind;

    fn can_handle(&self, component: &LearningComponent) -> bool {
        component.kind() == self.kind()
    }

    /// Create `component` in the learning space and return it with its
    /// assigned id.
    async fn post(
        &self,
        component: &LearningComponent,
        space_id: i64,
    ) -> ComponentResult<LearningComponent>;

    /// Replace the stored component with the same id.
    async fn put(
        &self,
        component: &LearningComponent,
        space_id: i64,
    ) -> ComponentResult<LearningComponent>;
}

pub(crate) fn components_path(space_id: i64) -> String {
    format!("/learning-spaces/{space_id}/learning-component")
}

pub(crate) fn component_path(space_id: i64, component_id: i64) -> String {
    format!("{}/{component_id}", components_path(space_id))
}

pub(crate) fn kind_path(space_id: i64, kind: ComponentKind) -> String {
    format!("{}/{}", components_path(space_id), kind.path_segment())
}

pub(crate) fn kind_component_path(space_id: i64, kind: ComponentKind, component_id: i64) -> String {
    format!("{}/{component_id}", kind_path(space_id, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(components_path(3), "/learning-spaces/3/learning-component");
        assert_eq!(component_path(3, 9), "/learning-spaces/3/learning-component/9");
        assert_eq!(
            kind_path(3, ComponentKind::Projector),
            "/learning-spaces/3/learning-component/projector"
        );
        assert_eq!(
            kind_component_path(3, ComponentKind::Whiteboard, 9),
            "/learning-spaces/3/learning-component/whiteboard/9"
        );
    }
}
