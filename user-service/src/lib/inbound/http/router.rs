use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_group::create_group;
use super::handlers::create_user::create_user;
use super::handlers::delete_group::delete_group;
use super::handlers::delete_user::delete_user;
use super::handlers::get_group::get_group;
use super::handlers::get_group_users::get_group_users;
use super::handlers::get_user::get_user;
use super::handlers::list_groups::list_groups;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::ping::ping;
use super::handlers::refresh_token::refresh_token;
use super::handlers::update_group::update_group;
use super::handlers::update_user::update_user;
use super::middleware::authenticate as auth_middleware;
use super::middleware::authenticate_optional;
use crate::domain::auth::service::AuthService;
use crate::domain::user::service::UserGroupService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::PostgresUserGroupRepository;
use crate::outbound::repositories::PostgresUserRepository;

pub type Users = UserService<PostgresUserRepository, PostgresUserGroupRepository>;
pub type Groups = UserGroupService<PostgresUserGroupRepository, PostgresUserRepository>;
pub type Auth = AuthService<PostgresUserRepository>;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<Users>,
    pub group_service: Arc<Groups>,
    pub auth_service: Arc<Auth>,
}

pub fn create_router(
    user_service: Arc<Users>,
    group_service: Arc<Groups>,
    auth_service: Arc<Auth>,
) -> Router {
    let state = AppState {
        user_service,
        group_service,
        auth_service,
    };

    let public_routes = Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/refresh", post(refresh_token));

    // Reachable anonymously; personalized when a valid credential is present.
    let optional_routes = Router::new().route("/ping", get(ping)).route_layer(
        middleware::from_fn_with_state(state.clone(), authenticate_optional),
    );

    let protected_routes = Router::new()
        .route("/api/v1/auth/logout", post(logout))
        .route("/api/v1/users", post(create_user))
        .route("/api/v1/users", get(list_users))
        .route("/api/v1/users/:user_id", get(get_user))
        .route("/api/v1/users/:user_id", put(update_user))
        .route("/api/v1/users/:user_id", delete(delete_user))
        .route("/api/v1/user-groups", post(create_group))
        .route("/api/v1/user-groups", get(list_groups))
        .route("/api/v1/user-groups/:group_id", get(get_group))
        .route("/api/v1/user-groups/:group_id", put(update_group))
        .route("/api/v1/user-groups/:group_id", delete(delete_group))
        .route("/api/v1/user-groups/:group_id/users", get(get_group_users))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

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
        .merge(public_routes)
        .merge(optional_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
