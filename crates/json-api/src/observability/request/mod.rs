//! Per-request span, request ID and completion logging.
//!
//! The span opens before routing so the auth middleware and handlers log
//! inside it; the authenticated caller is recorded on the span once the
//! handler chain has run.

mod parent_context;
mod request_ids;
mod spans;

use std::time::Instant;

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::Instrument as _;
use tracing::{error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use crate::extensions::*;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Metric scrapes and liveness checks arrive every few seconds.
const UNTRACED_PATHS: &[&str] = &["/metrics", "/healthcheck"];

fn is_untraced(path: &str) -> bool {
    UNTRACED_PATHS.contains(&path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completion {
    Success,
    ClientError,
    ServerError,
}

impl Completion {
    fn of(status: StatusCode) -> Self {
        if status.is_server_error() {
            Self::ServerError
        } else if status.is_client_error() {
            Self::ClientError
        } else {
            Self::Success
        }
    }
}

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if is_untraced(req.uri().path()) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

    request_ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let names = spans::request_span_name(&method, &path);
    let _in_flight_request = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %names.otel_span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        path = %path,
        remote_addr = %req.remote_addr(),
        user_uuid = tracing::field::Empty,
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    if settings::otel_parent_propagation_enabled()
        && let Some(parent_context) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent_context)
    {
        warn!("failed to set parent context on request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    if let Ok(user) = depot.user_uuid_or_401() {
        span.record("user_uuid", tracing::field::display(user));
    }

    let duration = started.elapsed();
    let status = request_ids::response_status_or_ok(res.status_code);
    let duration_ms = duration.as_millis();
    let threshold_ms = u128::from(settings::slow_request_threshold_ms());

    metrics::observe_request(&method, &names.otel_path, status.as_u16(), duration.as_secs_f64());

    span.record("status", status.as_u16());
    span.record("duration_ms", duration_ms);

    span.in_scope(|| {
        info!(status = status.as_u16(), duration_ms, "request.completed");

        match Completion::of(status) {
            Completion::ServerError => {
                error!(status = status.as_u16(), %method, %path, %request_id, "server error response");
            }
            Completion::ClientError => {
                warn!(status = status.as_u16(), %method, %path, %request_id, "client error response");
            }
            Completion::Success => {}
        }

        if duration_ms > threshold_ms {
            warn!(%method, %path, %request_id, duration_ms, threshold_ms, "slow request detected");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_and_metrics_are_not_traced() {
        assert!(is_untraced("/metrics"));
        assert!(is_untraced("/healthcheck"));
        assert!(!is_untraced("/orders"));
        assert!(!is_untraced("/metrics/extra"));
    }

    #[test]
    fn completion_follows_status_class() {
        assert_eq!(Completion::of(StatusCode::CREATED), Completion::Success);
        assert_eq!(Completion::of(StatusCode::UNPROCESSABLE_ENTITY), Completion::ClientError);
        assert_eq!(Completion::of(StatusCode::SERVICE_UNAVAILABLE), Completion::ServerError);
    }
}
