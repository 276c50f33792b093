use axum::{
    http::{HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{docs::ApiDoc, handlers, middleware, state::AppState};

/// Builds the full application router with shared layers applied.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allow_origins);

    let employee_routes = Router::new()
        .route(
            "/api/employee",
            get(handlers::list_employees).post(handlers::create_employee),
        )
        .route(
            "/api/employee/{id}",
            get(handlers::get_employee)
                .put(handlers::update_employee)
                .delete(handlers::delete_employee),
        )
        .route(
            "/api/employee/{id}/deactivate",
            post(handlers::deactivate_employee),
        );

    let clock_routes = Router::new()
        .route("/api/{id}/status", get(handlers::get_status))
        .route("/api/{id}/clock", post(handlers::toggle_clock))
        .route("/api/{id}/break", post(handlers::toggle_break))
        .route("/api/{id}/clock-in", post(handlers::clock_in))
        .route("/api/{id}/clock-out", post(handlers::clock_out))
        .route("/api/{id}/break-start", post(handlers::break_start))
        .route("/api/{id}/break-end", post(handlers::break_end))
        .route("/api/{id}/today", get(handlers::get_day_status))
        .route("/api/{id}/events", get(handlers::list_events));

    let report_routes = Router::new()
        .route("/api/today", get(handlers::get_today))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/export", get(handlers::export_csv))
        .route("/api/config/timezone", get(handlers::get_time_zone));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(employee_routes)
        .merge(report_routes)
        .merge(clock_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(axum_middleware::from_fn(middleware::log_error_responses))
        .layer(axum_middleware::from_fn(middleware::request_id))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(24 * 60 * 60))
}
