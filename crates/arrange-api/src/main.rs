use arrange_core::{preview, ArrangeError, ArrangementRequest, ArrangementResult, Arranger};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    info!("Starting Sheet Arrangement API");

    let app = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/arrange", post(arrange))
        .route("/api/preview/svg", post(preview_svg))
        .layer(CorsLayer::permissive());

    let addr =
        std::env::var("ARRANGE_API_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listen address");

    info!("API server listening on http://{}", addr);

    axum::serve(listener, app).await.expect("Server error");
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "arrange-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Main arrangement endpoint
async fn arrange(
    Json(request): Json<ArrangementRequest>,
) -> Result<Json<ArrangementResult>, AppError> {
    info!(
        "Received arrangement request: {} designs on {:.0}x{:.0} mm sheets",
        request.items.len(),
        request.sheet.sheet_width_mm,
        request.sheet.sheet_height_mm
    );

    let result = Arranger::new(request)?.arrange();

    info!(
        "Arrangement complete: {} sheets, {:.2}% efficiency, {} unplaced",
        result.sheets.len(),
        result.statistics.efficiency_percent,
        result.unplaced.len()
    );

    Ok(Json(result))
}

/// SVG preview of a computed arrangement
async fn preview_svg(Json(result): Json<ArrangementResult>) -> Result<Response, AppError> {
    info!("Rendering SVG preview for {} sheets", result.sheets.len());

    let svg = preview::render_svg(&result);

    Ok((StatusCode::OK, [("Content-Type", "image/svg+xml")], svg).into_response())
}

/// Application error type
struct AppError(anyhow::Error);

impl From<ArrangeError> for AppError {
    fn from(err: ArrangeError) -> Self {
        AppError(err.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request error: {}", self.0);

        let status = if self.0.downcast_ref::<ArrangeError>().is_some() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (
            status,
            Json(json!({
                "error": self.0.to_string(),
            })),
        )
            .into_response()
    }
}
