use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};

use crate::{app_error::AppError, context::Context};

pub const ACTOR_ID_HEADER: &str = "x-actor-id";
pub const ACTOR_EMAIL_HEADER: &str = "x-actor-email";
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

/// Builds the caller [`Context`] from headers set by the upstream gateway and
/// makes it available to handlers as an `Extension<Context>`.
pub async fn actor_context(mut req: Request, next: Next) -> Result<Response, AppError> {
    let headers = req.headers();
    let user_id = header_value(headers, ACTOR_ID_HEADER)
        .ok_or_else(|| AppError::Unauthorized(format!("Missing {ACTOR_ID_HEADER} header")))?;

    let mut context = Context::new(user_id);
    if let Some(email) = header_value(headers, ACTOR_EMAIL_HEADER) {
        context = context.with_email(email);
    }
    if let Some(role) = header_value(headers, ACTOR_ROLE_HEADER) {
        context = context.with_role(role);
    }

    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)?
        .to_str()
        .ok()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}
