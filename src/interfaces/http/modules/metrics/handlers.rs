use axum::{extract::State, http::header, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

/// Holds the handle of the process-wide Prometheus recorder
#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// `GET /metrics`, Prometheus text exposition format
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        state.handle.render(),
    )
}
