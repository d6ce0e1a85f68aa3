use crate::api::AppState;
use crate::config::ObservabilityConfig;
use crate::constants::metrics as names;
use axum::{
    extract::{MatchedPath, Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

/// Installs the Prometheus recorder with its own scrape listener.
///
/// Must run inside a tokio runtime.
pub fn install_metrics_exporter(config: &ObservabilityConfig) -> anyhow::Result<()> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.metrics_port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus exporter: {e}"))?;

    info!("Prometheus metrics exposed on {}", addr);
    Ok(())
}

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    let uri = req.uri().path().to_string();

    // Unmatched paths share one label so clients cannot mint new series.
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or(names::UNMATCHED_ROUTE, MatchedPath::as_str)
        .to_string();

    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %uri,
        route = %route,
    );

    async move {
        let response = next.run(req).await;

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let status = response.status().as_u16();

        let outcome = if status >= 500 {
            "error"
        } else if status >= 400 {
            "client_error"
        } else {
            "success"
        };

        let labels = [
            ("method", method.clone()),
            ("path", route.clone()),
            ("status", status.to_string()),
        ];

        metrics::counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
        metrics::histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels)
            .record(start.elapsed().as_secs_f64());

        info!(
            event = "http_request_finished",
            duration_ms = duration_ms,
            status_code = status,
            user_agent = %user_agent,
            outcome = %outcome,
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}

/// Stamps the cross-origin headers on every response, whatever the route,
/// method or status.
pub async fn cors_headers_middleware(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        state.cors.allow_origin.clone(),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        state.cors.allow_headers.clone(),
    );

    response
}
