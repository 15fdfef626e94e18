// File: services/tourlink_backend/src/app.rs
use axum::{response::Html, routing::get, Router};
use http::HeaderValue;
use std::sync::Arc;
use tourlink_booking::{handlers::BookingState, logic::BookingNotifier, routes as booking_routes};
use tourlink_config::{AppConfig, CorsConfig};
use tourlink_gcal::{handlers::GcalState, logic::EventDefaults, routes as gcal_routes};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::service_factory::{StartupError, TourlinkServices};

const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Tourlink</title>
</head>
<body>
  <h1>Tourlink booking notifier</h1>
  <p>Bookings are confirmed by email and added to Google Calendar.</p>
  <ul>
    <li><code>POST /send-mail-calendar</code></li>
    <li><code>POST /create-event</code></li>
  </ul>
  <p>See the <a href="/docs">API documentation</a>, or <a href="/redoc">ReDoc</a> for an alternative view.</p>
</body>
</html>
"#;

async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

/// Any origin when the allow-list is empty, otherwise only the listed ones.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Assembles every route, the API docs and the HTTP middleware.
pub fn build_app(config: &AppConfig, services: TourlinkServices) -> Result<Router, StartupError> {
    let defaults = EventDefaults::from_config(&config.gcal)?;

    let notifier = BookingNotifier::new(
        services.mailer.clone(),
        services.calendar.clone(),
        defaults.clone(),
    );
    let booking_router = booking_routes::routes(Arc::new(BookingState {
        notifier: Arc::new(notifier),
    }));
    let gcal_router = gcal_routes::routes(Arc::new(GcalState {
        calendar: services.calendar,
        defaults,
    }));

    #[allow(unused_mut)] // only mutated with the openapi feature
    let mut app = Router::new()
        .route("/", get(home))
        .merge(booking_router)
        .merge(gcal_router);

    #[cfg(feature = "openapi")]
    {
        use utoipa_redoc::{Redoc, Servable};
        use utoipa_swagger_ui::SwaggerUi;

        tracing::info!("Adding Swagger UI at /docs and ReDoc at /redoc");
        let doc = openapi_doc();
        app = app
            .merge(SwaggerUi::new("/docs").url("/openapi.json", doc.clone()))
            .merge(Redoc::with_url("/redoc", doc));
    }

    Ok(app
        .layer(cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http()))
}

/// The merged OpenAPI document of all feature crates.
#[cfg(feature = "openapi")]
pub fn openapi_doc() -> utoipa::openapi::OpenApi {
    use tourlink_booking::doc::BookingApiDoc;
    use tourlink_gcal::doc::GcalApiDoc;
    use utoipa::OpenApi;

    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "Tourlink API",
            version = "0.1.0",
            description = "Tour booking confirmation email and Google Calendar invitation",
            license(name = "MIT OR Apache-2.0")
        ),
        tags((name = "Tourlink", description = "Booking notifier endpoints"))
    )]
    struct ApiDoc;

    let mut doc = ApiDoc::openapi();
    doc.merge(BookingApiDoc::openapi());
    doc.merge(GcalApiDoc::openapi());
    doc
}
