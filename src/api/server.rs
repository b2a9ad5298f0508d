use crate::api::routes;
use crate::cache::ResponseCache;
use crate::config::SharedConfig;
use crate::query::DynQueryClient;
use crate::resolver::DynHostResolver;
use std::future::Future;
use std::net::SocketAddr;

/// Everything a request needs, shared across handler tasks. The resolver
/// and query client are trait objects so tests can stand in for them.
#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub resolver: DynHostResolver,
    pub query_client: DynQueryClient,
    pub cache: ResponseCache,
}

pub fn new(
    config: SharedConfig,
    resolver: DynHostResolver,
    query_client: DynQueryClient,
    cache: ResponseCache,
) -> impl Future<Output = hyper::Result<()>> {
    let bind_addr = config.http_bind_addr;
    axum::Server::bind(&bind_addr).serve(
        routes::new(AppState {
            config,
            resolver,
            query_client,
            cache,
        })
        .into_make_service_with_connect_info::<SocketAddr>(),
    )
}
