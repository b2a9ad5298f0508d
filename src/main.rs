use anyhow::Result;
use sampbridge::{
    Config, DnsHostResolver, DynHostResolver, DynQueryClient, ResponseCache, SampQueryClient,
    SharedConfig,
};
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_init();

    let config = config_init(std::env::args().nth(1))?;

    let resolver: DynHostResolver = Arc::new(DnsHostResolver::from_system_conf()?);
    let query_client: DynQueryClient = Arc::new(SampQueryClient::new(config.query_timeout));
    let cache = ResponseCache::new(config.cache_ttl);

    tracing::info!("API listening on {}", &config.http_bind_addr);
    let api_server = sampbridge::new_http(config, resolver, query_client, cache);
    let api_handle = tokio::spawn(api_server);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("quitting from signal");
        },
        Ok(api_res) = api_handle => {
            if let Err(err) = api_res {
                return Err(err.into());
            }
        }
    }
    tracing::info!("goodbye");
    Ok(())
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sampbridge=info".into()),
        )
        .init();
}

fn config_init(config_file: Option<String>) -> Result<SharedConfig> {
    let config = match config_file {
        Some(config_file) => {
            let config = Config::try_from_file(&config_file)?;
            tracing::debug!("loaded config from {config_file}");
            config
        }
        None => Config::from_env()?,
    };
    Ok(Arc::new(config))
}
