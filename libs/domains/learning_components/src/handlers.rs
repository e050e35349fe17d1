use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_helpers::{
    IdPath, ValidatedJson,
    errors::responses::{
        BadRequestPathResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnprocessableEntityResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::dto::{
    ComponentDto, ComponentNoIdDto, DimensionsDto, PositionDto, ProjectionAreaDto, ProjectorDto,
    ProjectorNoIdDto, WhiteboardDto, WhiteboardNoIdDto,
};
use crate::error::ComponentResult;
use crate::kind::{ComponentKind, KindFamily, KindMember};
use crate::models::ComponentFilter;
use crate::service::LearningComponentService;
use crate::store::ComponentStore;

pub const TAG: &str = "learning-components";

/// OpenAPI documentation for the learning components API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_components,
        get_component,
        delete_component,
        create_projector,
        update_projector,
        create_whiteboard,
        update_whiteboard,
    ),
    components(
        schemas(
            ComponentDto,
            ComponentNoIdDto,
            ProjectorDto,
            ProjectorNoIdDto,
            WhiteboardDto,
            WhiteboardNoIdDto,
            PositionDto,
            DimensionsDto,
            ProjectionAreaDto,
            ComponentKind,
            ComponentFilter,
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestPathResponse,
            UnprocessableEntityResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Learning component endpoints (projectors, whiteboards)")
    )
)]
pub struct ApiDoc;

/// Create the learning component router with all HTTP endpoints
pub fn router<S: ComponentStore + 'static>(service: LearningComponentService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/learning-spaces/{space_id}/learning-component",
            get(list_components),
        )
        .route(
            "/learning-spaces/{space_id}/learning-component/{component_id}",
            get(get_component).delete(delete_component),
        )
        .route(
            "/learning-spaces/{space_id}/learning-component/projector",
            post(create_projector),
        )
        .route(
            "/learning-spaces/{space_id}/learning-component/projector/{component_id}",
            put(update_projector),
        )
        .route(
            "/learning-spaces/{space_id}/learning-component/whiteboard",
            post(create_whiteboard),
        )
        .route(
            "/learning-spaces/{space_id}/learning-component/whiteboard/{component_id}",
            put(update_whiteboard),
        )
        .with_state(shared_service)
}

/// List the components of a learning space
#[utoipa::path(
    get,
    path = "/learning-spaces/{space_id}/learning-component",
    tag = TAG,
    params(
        ("space_id" = i64, Path, description = "Learning space ID"),
        ComponentFilter
    ),
    responses(
        (status = 200, description = "Components of the learning space", body = Vec<ComponentDto>),
        (status = 400, response = BadRequestPathResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_components<S: ComponentStore>(
    State(service): State<Arc<LearningComponentService<S>>>,
    IdPath(space_id): IdPath<i64>,
    Query(filter): Query<ComponentFilter>,
) -> ComponentResult<Json<Vec<ComponentDto>>> {
    let components = service.list(space_id, filter).await?;
    Ok(Json(components))
}

/// Get a component of any kind by ID
#[utoipa::path(
    get,
    path = "/learning-spaces/{space_id}/learning-component/{component_id}",
    tag = TAG,
    params(
        ("space_id" = i64, Path, description = "Learning space ID"),
        ("component_id" = i64, Path, description = "Component ID")
    ),
    responses(
        (status = 200, description = "Component found", body = ComponentDto),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_component<S: ComponentStore>(
    State(service): State<Arc<LearningComponentService<S>>>,
    IdPath((space_id, component_id)): IdPath<(i64, i64)>,
) -> ComponentResult<Json<ComponentDto>> {
    let component = service.get(space_id, component_id).await?;
    Ok(Json(component))
}

/// Soft-delete a component
#[utoipa::path(
    delete,
    path = "/learning-spaces/{space_id}/learning-component/{component_id}",
    tag = TAG,
    params(
        ("space_id" = i64, Path, description = "Learning space ID"),
        ("component_id" = i64, Path, description = "Component ID")
    ),
    responses(
        (status = 204, description = "Component deleted"),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_component<S: ComponentStore>(
    State(service): State<Arc<LearningComponentService<S>>>,
    IdPath((space_id, component_id)): IdPath<(i64, i64)>,
) -> ComponentResult<StatusCode> {
    service.delete(space_id, component_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create a projector
#[utoipa::path(
    post,
    path = "/learning-spaces/{space_id}/learning-component/projector",
    tag = TAG,
    params(("space_id" = i64, Path, description = "Learning space ID")),
    request_body = ProjectorNoIdDto,
    responses(
        (status = 201, description = "Projector created", body = ProjectorDto),
        (status = 400, response = BadRequestValidationResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_projector<S: ComponentStore>(
    State(service): State<Arc<LearningComponentService<S>>>,
    IdPath(space_id): IdPath<i64>,
    ValidatedJson(input): ValidatedJson<ProjectorNoIdDto>,
) -> ComponentResult<impl IntoResponse> {
    let created: ProjectorDto = create_as(&service, space_id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace a projector
#[utoipa::path(
    put,
    path = "/learning-spaces/{space_id}/learning-component/projector/{component_id}",
    tag = TAG,
    params(
        ("space_id" = i64, Path, description = "Learning space ID"),
        ("component_id" = i64, Path, description = "Component ID")
    ),
    request_body = ProjectorNoIdDto,
    responses(
        (status = 200, description = "Projector updated", body = ProjectorDto),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_projector<S: ComponentStore>(
    State(service): State<Arc<LearningComponentService<S>>>,
    IdPath((space_id, component_id)): IdPath<(i64, i64)>,
    ValidatedJson(input): ValidatedJson<ProjectorNoIdDto>,
) -> ComponentResult<Json<ProjectorDto>> {
    let updated = update_as(&service, space_id, component_id, input).await?;
    Ok(Json(updated))
}

/// Create a whiteboard
#[utoipa::path(
    post,
    path = "/learning-spaces/{space_id}/learning-component/whiteboard",
    tag = TAG,
    params(("space_id" = i64, Path, description = "Learning space ID")),
    request_body = WhiteboardNoIdDto,
    responses(
        (status = 201, description = "Whiteboard created", body = WhiteboardDto),
        (status = 400, response = BadRequestValidationResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_whiteboard<S: ComponentStore>(
    State(service): State<Arc<LearningComponentService<S>>>,
    IdPath(space_id): IdPath<i64>,
    ValidatedJson(input): ValidatedJson<WhiteboardNoIdDto>,
) -> ComponentResult<impl IntoResponse> {
    let created: WhiteboardDto = create_as(&service, space_id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace a whiteboard
#[utoipa::path(
    put,
    path = "/learning-spaces/{space_id}/learning-component/whiteboard/{component_id}",
    tag = TAG,
    params(
        ("space_id" = i64, Path, description = "Learning space ID"),
        ("component_id" = i64, Path, description = "Component ID")
    ),
    request_body = WhiteboardNoIdDto,
    responses(
        (status = 200, description = "Whiteboard updated", body = WhiteboardDto),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_whiteboard<S: ComponentStore>(
    State(service): State<Arc<LearningComponentService<S>>>,
    IdPath((space_id, component_id)): IdPath<(i64, i64)>,
    ValidatedJson(input): ValidatedJson<WhiteboardNoIdDto>,
) -> ComponentResult<Json<WhiteboardDto>> {
    let updated = update_as(&service, space_id, component_id, input).await?;
    Ok(Json(updated))
}

async fn create_as<S, N, D>(
    service: &LearningComponentService<S>,
    space_id: i64,
    input: N,
) -> ComponentResult<D>
where
    S: ComponentStore,
    N: KindMember<ComponentNoIdDto>,
    D: KindMember<ComponentDto>,
{
    service.create(space_id, input.into_family()).await?.narrow()
}

async fn update_as<S, N, D>(
    service: &LearningComponentService<S>,
    space_id: i64,
    component_id: i64,
    input: N,
) -> ComponentResult<D>
where
    S: ComponentStore,
    N: KindMember<ComponentNoIdDto>,
    D: KindMember<ComponentDto>,
{
    service
        .update(space_id, component_id, input.into_family())
        .await?
        .narrow()
}
