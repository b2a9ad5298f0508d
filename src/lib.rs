//! SAMP Bridge
//!
//! A small HTTP relay in front of the [SA-MP] query protocol. Legacy
//! San Andreas Multiplayer servers report their live state (name, map,
//! rules, player list) over a UDP request/reply protocol that browsers
//! cannot speak. The bridge exposes that state as a single CORS-friendly
//! JSON endpoint: validate the submitted `host`/`port`, resolve hostnames
//! to their first A record, query the server, normalize the reply into a
//! stable contract, and memoize the whole response for a few minutes so
//! popular servers aren't hammered.
//!
//! [SA-MP]: https://www.sa-mp.mp
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod query;
pub mod resolver;

pub use api::new as new_http;
pub use cache::ResponseCache;
pub use config::{Config, SharedConfig};
pub use query::{DynQueryClient, QueryClient, SampQueryClient, ServerSnapshot};
pub use resolver::{DnsHostResolver, DynHostResolver, HostResolver};
