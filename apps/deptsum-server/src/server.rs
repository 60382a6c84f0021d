use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use axum::{middleware::from_fn, routing::get, Router};
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

use runtime::AppConfig;
use user_summary::{
    api::rest::routes::register_routes, config::UserSummaryConfig,
    domain::service::SummaryService, infra::source::HttpUserSource,
};

use crate::{openapi, request_id, web};

/// Default per-request timeout when the config keeps timeout_sec at 0.
const DEFAULT_TIMEOUT_SEC: u64 = 30;

/// Parse and validate everything the server needs at startup.
/// Returns the bind address and the wired summary service.
pub fn validate(config: &AppConfig) -> Result<(SocketAddr, Arc<SummaryService>)> {
    let module_cfg: UserSummaryConfig = config.module_config("user_summary")?;
    let source = HttpUserSource::from_config(&module_cfg)
        .map_err(|e| anyhow!("Invalid user_summary source config: {}", e))?;
    let service = Arc::new(SummaryService::new(Arc::new(source)));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| {
            anyhow!(
                "Invalid bind address '{}:{}': {}",
                config.server.host,
                config.server.port,
                e
            )
        })?;

    Ok((addr, service))
}

/// Build the HTTP router: module routes, service endpoints and middlewares.
pub fn build_router(config: &AppConfig, service: Arc<SummaryService>) -> Result<Router> {
    let mut router = Router::new().route("/health", get(web::health_check));
    router = register_routes(router, service);

    if config.server.enable_docs {
        // Build once, serve as static JSON (no per-request generation)
        let openapi_value = Arc::new(openapi::build_openapi()?);

        router = router
            .route(
                "/openapi.json",
                get({
                    use axum::{http::header, response::IntoResponse};
                    let v = openapi_value.clone();
                    move || async move {
                        let json = axum::Json((*v).clone());
                        ([(header::CACHE_CONTROL, "no-store")], json).into_response()
                    }
                }),
            )
            .route("/docs", get(web::serve_docs));
    }

    // Correct middleware order (outermost to innermost):
    // PropagateRequestId -> SetRequestId -> push_req_id_to_extensions -> Trace -> Timeout -> CORS -> BodyLimit
    let x_request_id = request_id::header();

    // 1. If client sent x-request-id, propagate it; otherwise we will set it
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));

    // 2. Generate x-request-id when missing
    router = router.layer(SetRequestIdLayer::new(
        x_request_id.clone(),
        request_id::MakeReqId,
    ));

    // 3. Put request_id into extensions and span
    router = router.layer(from_fn(request_id::push_req_id_to_extensions));

    // 4. Trace with request_id/status/latency
    router = router.layer(request_id::create_trace_layer());

    // 5. Timeout layer
    let timeout_sec = if config.server.timeout_sec > 0 {
        config.server.timeout_sec
    } else {
        DEFAULT_TIMEOUT_SEC
    };
    router = router.layer(TimeoutLayer::new(Duration::from_secs(timeout_sec)));

    // 6. CORS layer (if enabled)
    if config.server.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }

    // 7. Body limit layer - 16MB default limit
    router = router.layer(RequestBodyLimitLayer::new(16 * 1024 * 1024));

    Ok(router)
}

/// Bind, serve until a shutdown signal arrives, then drain gracefully.
pub async fn run(config: AppConfig) -> Result<()> {
    let (addr, service) = validate(&config)?;
    let router = build_router(&config, service)?;

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = wait_for_shutdown().await {
                tracing::error!("Shutdown signal handler failed: {}", e);
            }
            cancel.cancel();
        });
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("HTTP server bound on {}", addr);

    // Graceful shutdown on cancel
    let shutdown = {
        let cancel = cancel.clone();
        async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        }
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow!(e))
}

async fn wait_for_shutdown() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?; // Ctrl+C
        tokio::select! {
            _ = sigterm.recv() => {},
            _ = sigint.recv()  => {},
            _ = tokio::signal::ctrl_c() => {}, // fallback
        }
        Ok(())
    }

    #[cfg(windows)]
    {
        use tokio::signal::windows::{ctrl_break, ctrl_c, ctrl_close, ctrl_shutdown};

        let mut c = ctrl_c()?;
        let mut br = ctrl_break()?;
        let mut cl = ctrl_close()?;
        let mut sh = ctrl_shutdown()?;

        tokio::select! {
            _ = c.recv()  => {},
            _ = br.recv() => {},
            _ = cl.recv() => {},
            _ = sh.recv() => {},
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;
    use user_summary::contract::{error::SourceError, model::UserRecord};
    use user_summary::domain::ports::UserSource;

    struct EmptySource;

    #[async_trait]
    impl UserSource for EmptySource {
        async fn fetch_users(&self) -> Result<Vec<UserRecord>, SourceError> {
            Ok(vec![])
        }
    }

    fn test_config() -> AppConfig {
        AppConfig::default()
    }

    #[test]
    fn validate_accepts_default_config() {
        let (addr, _service) = validate(&test_config()).unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn validate_rejects_bad_host() {
        let mut config = test_config();
        config.server.host = "not a host".to_string();
        assert!(validate(&config).is_err());
    }

    #[tokio::test]
    async fn router_serves_health() {
        let service = Arc::new(SummaryService::new(Arc::new(EmptySource)));
        let router = build_router(&test_config(), service).unwrap();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn router_serves_openapi_when_docs_enabled() {
        let service = Arc::new(SummaryService::new(Arc::new(EmptySource)));
        let router = build_router(&test_config(), service).unwrap();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(axum::http::header::CACHE_CONTROL)
                .and_then(|v| v.to_str().ok()),
            Some("no-store")
        );
    }

    #[tokio::test]
    async fn docs_routes_absent_when_disabled() {
        let mut config = test_config();
        config.server.enable_docs = false;

        let service = Arc::new(SummaryService::new(Arc::new(EmptySource)));
        let router = build_router(&config, service).unwrap();

        let response = router
            .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn responses_carry_a_request_id() {
        let service = Arc::new(SummaryService::new(Arc::new(EmptySource)));
        let router = build_router(&test_config(), service).unwrap();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.headers().contains_key("x-request-id"));
    }
}
