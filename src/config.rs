use crate::error::Error;
use serde::Deserialize;
use serde_with::{serde_as, DurationMilliSeconds, DurationSeconds};
use std::fs::File;
use std::io::BufReader;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub type SharedConfig = Arc<Config>;

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Address the HTTP relay listens on. All interfaces by default so the
    /// bridge can sit directly behind a public reverse proxy.
    #[serde(default = "default_http_bind_addr")]
    pub http_bind_addr: SocketAddr,
    /// Outer per-request timeout applied by the HTTP layer.
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_api_timeout")]
    pub api_timeout: Duration,
    /// How long to wait for each UDP reply from the queried game server.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(default = "default_query_timeout")]
    pub query_timeout: Duration,
    /// Time-to-live of cached responses, errors included.
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: Duration,
}

impl Config {
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        Ok(conf)
    }

    /// Assemble a config from the environment. Only the listen port is
    /// environment-controlled (`PORT`, default 5000); everything else uses
    /// the defaults a config file would get.
    pub fn from_env() -> Result<Self, Error> {
        let http_bind_addr = match std::env::var("PORT") {
            Ok(raw) => {
                let port: u16 = raw.parse().map_err(|_| Error::InvalidListenPort(raw))?;
                SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))
            }
            Err(_) => default_http_bind_addr(),
        };
        Ok(Config {
            http_bind_addr,
            ..Config::default()
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            http_bind_addr: default_http_bind_addr(),
            api_timeout: default_api_timeout(),
            query_timeout: default_query_timeout(),
            cache_ttl: default_cache_ttl(),
        }
    }
}

fn default_http_bind_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 5000))
}

fn default_api_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_query_timeout() -> Duration {
    Duration::from_millis(1000)
}

fn default_cache_ttl() -> Duration {
    Duration::from_secs(300)
}
