//! Learning Components Domain
//!
//! Physical equipment placed inside learning spaces (projectors, whiteboards),
//! the mapping between these entities and their wire DTOs, and both sides of
//! the HTTP API that stores them.
//!
//! # Architecture
//!
//! ```text
//!        server side                        client side
//! ┌─────────────────┐                ┌────────────────────┐
//! │    Handlers     │ ← HTTP         │  HTTP Repository   │
//! └────────┬────────┘                └───┬────────────┬───┘
//!          │                      reads  │            │ writes
//! ┌────────▼────────┐              ┌─────▼────┐ ┌─────▼──────┐
//! │     Service     │              │ Registry │ │ Dispatcher │
//! └───┬─────────┬───┘              └──────────┘ └─────┬──────┘
//!     │         │                                     │ one per kind
//! ┌───▼───┐ ┌───▼──────┐                       ┌──────▼─────────┐
//! │ Store │ │ Registry │ ← one mapper per kind │ RequestBuilder │
//! └───────┘ └──────────┘                       └────────────────┘
//! ```
//!
//! Generic code holds [`LearningComponent`], [`ComponentDto`] or
//! [`ComponentNoIdDto`] and never matches on the kind; per-kind behavior lives
//! in the mappers and request builders, resolved by [`ComponentKind`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_learning_components::{
//!     handlers,
//!     service::LearningComponentService,
//!     store::InMemoryComponentStore,
//! };
//!
//! let service = LearningComponentService::new(InMemoryComponentStore::new());
//! let router = handlers::router(service);
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod kind;
pub mod mapping;
pub mod models;
pub mod repository;
pub mod service;
pub mod store;
pub mod transport;

// Re-export commonly used types
pub use dto::{
    ComponentDto, ComponentNoIdDto, DimensionsDto, PositionDto, ProjectionAreaDto, ProjectorDto,
    ProjectorNoIdDto, WhiteboardDto, WhiteboardNoIdDto,
};
pub use error::{ComponentError, ComponentResult, TransportError, TransportErrorKind};
pub use kind::{ComponentKind, KindFamily, KindMember};
pub use mapping::{
    ComponentMapper, KindMapper, MapperRegistry, MapperRegistryBuilder, ProjectorMapper,
    WhiteboardMapper,
};
pub use models::{
    ComponentAttributes, ComponentFilter, Dimensions, LearningComponent, MarkerColor,
    Orientation, Position, ProjectionArea, Projector, Whiteboard,
};
pub use repository::{HttpLearningComponentRepository, LearningComponentRepository};
pub use service::LearningComponentService;
pub use store::{ComponentStore, InMemoryComponentStore};
pub use transport::{
    ComponentApiClient, ComponentRequestBuilder, MappedRequestBuilder, ProjectorRequestBuilder,
    RequestDispatcher, RequestDispatcherBuilder, WhiteboardRequestBuilder,
};
