use crate::api::api_error::APIError;
use crate::api::model::{ServerStatus, StatusParams};
use crate::api::server::AppState;
use crate::cache::CachedResponse;
use crate::error::Error;
use axum::body::{boxed, Body, Full};
use axum::extract::{ConnectInfo, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method, Request, Uri};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub(super) fn new(state: AppState) -> Router {
    // One handler serves every path and method. The CORS layer sits outside
    // the cache so replayed responses carry the headers too.
    Router::new()
        .fallback(server_status)
        .layer(middleware::from_fn_with_state(state.clone(), serve_cached))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(state.config.api_timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .expose_headers([CONTENT_TYPE]),
        )
        .with_state(state)
}

/// Memoizes whole responses, errors included, keyed by method plus URL.
async fn serve_cached(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next<Body>,
) -> Result<Response, APIError> {
    let key = cache_key(req.method(), req.uri());
    if let Some(hit) = state.cache.get(&key).await {
        tracing::debug!("serving \"{key}\" from cache");
        return Ok(replay(hit));
    }

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();
    let body = hyper::body::to_bytes(body).await?;
    state
        .cache
        .insert(
            key,
            CachedResponse {
                status: parts.status,
                body: body.clone(),
            },
        )
        .await;
    Ok(Response::from_parts(parts, boxed(Full::from(body))))
}

fn cache_key(method: &Method, uri: &Uri) -> String {
    format!("{method} {uri}")
}

fn replay(cached: CachedResponse) -> Response {
    (
        cached.status,
        [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        cached.body,
    )
        .into_response()
}

async fn server_status(
    State(state): State<AppState>,
    ConnectInfo(client_addr): ConnectInfo<SocketAddr>,
    WithRejection(Query(params), _): WithRejection<Query<StatusParams>, APIError>,
) -> Result<Json<ServerStatus>, APIError> {
    tracing::debug!("serving status request from {client_addr}");

    let host = params.host()?;
    let port = params.port()?;

    let ip = match host.parse::<Ipv4Addr>() {
        Ok(ip) => ip,
        Err(_) => resolve_host(&state, host).await?,
    };

    let endpoint = SocketAddrV4::new(ip, port);
    let snapshot = state.query_client.query(endpoint).await?;
    tracing::debug!(
        "{endpoint} answered with {} of {} players online",
        snapshot.online.unwrap_or(0),
        snapshot.maxplayers.unwrap_or(0)
    );

    Ok(Json(ServerStatus::new(ip, port, snapshot)))
}

/// First A record wins, deterministically. The concrete resolver failure is
/// only logged: clients get the same localized message for NXDOMAIN, empty
/// record sets and resolver timeouts.
async fn resolve_host(state: &AppState, host: &str) -> Result<Ipv4Addr, Error> {
    match state.resolver.lookup_v4(host).await {
        Ok(addrs) => addrs
            .first()
            .copied()
            .ok_or_else(|| Error::InvalidHost(host.to_string())),
        Err(err) => {
            tracing::debug!("resolution of \"{host}\" failed: {err}");
            Err(Error::InvalidHost(host.to_string()))
        }
    }
}
