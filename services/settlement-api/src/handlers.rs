use crate::errors::ApiError;
use crate::metrics;
use crate::models::{HealthResponse, SettleResponse};
use actix_web::{web, HttpResponse};
use prometheus::{HistogramTimer, Registry};
use serde_json::Value;
use settlement::{validation, SettlementEngine};
use tracing::{info, warn};
use uuid::Uuid;

/// Health check endpoint
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "settlement-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Settle a group of members
///
/// Body: `{ "members": [ { "id": "Alice", "net": 100.5 }, ... ] }`
pub async fn settle(
    engine: web::Data<SettlementEngine>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let request_id = Uuid::new_v4();

    let members = validation::parse_request(&body, engine.config()).map_err(|e| {
        metrics::VALIDATION_FAILURES_TOTAL.inc();
        warn!(%request_id, error = %e, "Rejected settlement request");
        e
    })?;

    metrics::GROUP_SIZE.observe(members.len() as f64);
    let timer = metrics::SETTLEMENT_DURATION.start_timer();

    let engine = engine.into_inner();
    let report = match web::block(move || engine.settle(&members)).await {
        Ok(Ok(report)) => {
            record_duration(timer, true);
            report
        }
        Ok(Err(e)) => {
            record_duration(timer, false);
            if matches!(e, settlement::Error::Unbalanced { .. }) {
                metrics::UNBALANCED_TOTAL.inc();
            }
            warn!(%request_id, error = %e, "Settlement refused");
            return Err(e.into());
        }
        Err(e) => {
            record_duration(timer, false);
            return Err(ApiError::Internal(e.to_string()));
        }
    };

    metrics::SETTLEMENTS_TOTAL.inc();
    metrics::TRANSACTIONS_EMITTED_TOTAL.inc_by(report.transactions.len() as u64);
    if !report.is_fully_settled() {
        metrics::UNBALANCED_TOTAL.inc();
    }

    info!(
        %request_id,
        members = report.summary.total_members,
        transactions = report.summary.total_transactions,
        "Settlement request served"
    );

    Ok(HttpResponse::Ok().json(SettleResponse::from(report)))
}

/// Only completed settlements count toward the latency histogram
fn record_duration(timer: HistogramTimer, completed: bool) {
    if completed {
        timer.observe_duration();
    } else {
        timer.stop_and_discard();
    }
}

/// Prometheus text exposition
pub async fn metrics_endpoint(registry: web::Data<Registry>) -> Result<HttpResponse, ApiError> {
    let body = metrics::render(&registry)?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(body))
}

/// Fallback for unknown routes
pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}

/// JSON extractor settings; malformed bodies are reported in the API error shape
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| ApiError::Payload(err.to_string()).into())
}

/// Configure routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/settle", web::post().to(settle))
        .route("/metrics", web::get().to(metrics_endpoint));
}
