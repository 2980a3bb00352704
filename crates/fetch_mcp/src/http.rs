//! Streamable HTTP transport with optional bearer-token authentication.
//!
//! The auth gate sits in front of the whole router, so unauthorized callers
//! never reach the MCP layer; they get a structured 401 instead of the
//! tool's textual error envelope.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use rmcp::transport::StreamableHttpServerConfig;
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, tower::StreamableHttpService,
};

use crate::config::FetchConfig;
use crate::server::FetchServer;
use crate::services::FetchService;

const UNAUTHORIZED_BODY: &str =
    r#"{"error":"Unauthorized","message":"Invalid or missing Bearer token"}"#;

/// Build the axum application serving MCP at `/mcp`.
///
/// When `auth_token` is set, every request must carry
/// `Authorization: Bearer <token>`; without a token the server is open.
pub fn build_app(server: FetchServer, auth_token: Option<&str>) -> Router {
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    let mut router = Router::new().nest_service("/mcp", service);
    if let Some(token) = auth_token {
        router = router.layer(middleware::from_fn_with_state(
            Arc::new(token.to_string()),
            require_bearer,
        ));
    }
    router
}

async fn require_bearer(
    State(token): State<Arc<String>>,
    request: Request,
    next: Next,
) -> Response {
    let expected = format!("Bearer {token}");
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == expected);

    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            [
                (header::CONTENT_TYPE, "application/json"),
                (header::WWW_AUTHENTICATE, "Bearer"),
            ],
            UNAUTHORIZED_BODY,
        )
            .into_response();
    }

    next.run(request).await
}

/// Run the HTTP server until ctrl-c.
pub async fn serve_http(
    host: &str,
    port: u16,
    auth_token: Option<String>,
    config: FetchConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = FetchService::new(config);
    // The HTTP transport does not enforce robots.txt; callers reaching it
    // have already passed the deployment's own access policy.
    let server = FetchServer::new(service, false);
    let app = build_app(server, auth_token.as_deref());

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Starting MCP fetch server on {host}:{port}");
    match auth_token {
        Some(_) => tracing::info!("Authentication: Bearer token required"),
        None => tracing::info!("Authentication: none (open access)"),
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
