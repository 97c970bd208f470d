use axum::Router;
use gc::kernel::server::cors_layer;
use gc::kernel::server::state::ApiState;
use gc::server::router::{api_router, system_router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(title = "GC Checkout API", description = "Event registrations and mobile-money payments"))]
struct ApiDoc;

/// Builds the application router: `/health`, the feature API under `/api` and the Scalar UI
/// at `/api-docs`.
pub fn init(state: ApiState) -> Router {
    let api = ApiDoc::openapi();

    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(api)
        .merge(system_router())
        .nest("/api", api_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
        .split_for_parts();

    let scalar_routes = Scalar::with_url("/api-docs", api_doc);

    Router::new().merge(openapi_routes).merge(scalar_routes)
}
