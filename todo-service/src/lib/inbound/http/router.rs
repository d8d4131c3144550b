use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::create_todo::create_todo;
use super::handlers::create_user::create_user;
use super::handlers::delete_todo::delete_todo;
use super::handlers::delete_user::delete_user;
use super::handlers::get_user::get_user;
use super::handlers::list_todos::list_todos;
use super::handlers::list_users::list_users;
use super::handlers::refresh_token::refresh_token;
use super::handlers::root::root;
use super::handlers::update_todo::update_todo;
use super::handlers::update_user::update_user;
use crate::domain::todo::ports::TodoServicePort;
use crate::domain::user::ports::UserServicePort;

/// Shared handler state.
///
/// Services are held behind their ports so any repository backing can be
/// plugged in.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub todo_service: Arc<dyn TodoServicePort>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    todo_service: Arc<dyn TodoServicePort>,
) -> Router {
    let state = AppState {
        user_service,
        todo_service,
    };

    // Protected handlers take a `CurrentUser` extractor.
    let user_routes = Router::new()
        .route("/users", post(create_user).get(list_users))
        .route(
            "/users/:user_id",
            get(get_user).put(update_user).delete(delete_user),
        );

    let auth_routes = Router::new()
        .route("/auth/token", post(authenticate))
        .route("/auth/refresh_token", post(refresh_token));

    let todo_routes = Router::new()
        .route("/todos", post(create_todo).get(list_todos))
        .route("/todos/:todo_id", patch(update_todo).delete(delete_todo));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/", get(root))
        .merge(user_routes)
        .merge(auth_routes)
        .merge(todo_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
