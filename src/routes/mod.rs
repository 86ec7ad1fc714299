pub mod orders;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::{app_state::AppState, bootstrap};

/// The full HTTP application: order routes, their OpenAPI document and request tracing.
pub fn app(state: AppState) -> Router {
    let (routes, mut openapi) = orders::routes_with_openapi().split_for_parts();
    openapi.info = utoipa::openapi::InfoBuilder::new()
        .title("Restaurant OrderService API")
        .version("1.0.0")
        .build();

    Router::new()
        .merge(routes)
        .merge(bootstrap::create_swagger_ui(openapi))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
