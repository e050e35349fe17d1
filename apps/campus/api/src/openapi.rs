use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Campus API",
        version = "0.1.0",
        description = "API for managing the learning components (projectors, whiteboards) of learning spaces"
    ),
    servers(
        (url = "/api", description = "API base path")
    )
)]
struct BaseApiDoc;

/// Base document merged with the domain documents.
///
/// The learning component paths are already absolute, so they are merged
/// rather than nested.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = BaseApiDoc::openapi();
        doc.merge(domain_learning_components::handlers::ApiDoc::openapi());
        doc
    }
}
