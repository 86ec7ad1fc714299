use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app_error::{AppError, StdResponse},
    app_state::AppState,
    context::Context,
    middleware,
    orders::{CreateOrderDto, OrderResponseDto},
};

/// Defines order routes with OpenAPI specs.
pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().nest(
        "/orders",
        OpenApiRouter::new()
            .routes(utoipa_axum::routes!(create_order))
            .route_layer(axum::middleware::from_fn(middleware::actor_context)),
    )
}

/// Turn a submitted cart into an order with its cart items and selections.
#[utoipa::path(
    post,
    path = "/",
    tags = ["Orders"],
    params(
        ("x-actor-id" = String, Header, description = "Identity of the caller, set by the gateway")
    ),
    request_body = CreateOrderDto,
    responses(
        (status = 200, description = "Created order successfully", body = StdResponse<OrderResponseDto, String>),
        (status = 400, description = "Invalid order submission"),
        (status = 401, description = "Missing caller identity"),
        (status = 404, description = "Merchant does not exist"),
        (status = 500, description = "Could not create an order")
    )
)]
async fn create_order(
    State(state): State<AppState>,
    Extension(context): Extension<Context>,
    body: Result<Json<CreateOrderDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let order = state.orders.create_order(&context, body).await?;

    Ok(StdResponse {
        data: Some(order),
        message: Some("Create order successfully"),
    })
}
