//! Game server querying.
//!
//! SA-MP servers answer a lightweight UDP request/reply protocol (see
//! [`wire`]) rather than anything a browser could speak. The bridge talks to
//! them through the [`QueryClient`] trait so the HTTP layer never depends on
//! the concrete transport; [`client::SampQueryClient`] is the production
//! implementation.
//!
//! A query is fatal on the first failure. There are no retries: the caller
//! gets either a complete [`ServerSnapshot`] or an error, and transient
//! upstream failures are surfaced (and cached) like any other result.

use crate::error::Error;
use serde::Serialize;
use std::collections::HashMap;
use std::net::SocketAddrV4;
use std::sync::Arc;

pub mod client;
pub mod wire;

#[allow(clippy::module_name_repetitions)]
pub use client::SampQueryClient;

/// `DynQueryClient` is a type alias for a [`QueryClient`] shared by all
/// request-handling tasks through an [`Arc`].
#[allow(clippy::module_name_repetitions)]
pub type DynQueryClient = Arc<dyn QueryClient + Send + Sync>;

/// An async trait describing the upstream query collaborator: given a
/// resolved endpoint, produce the server's current state or fail.
#[async_trait::async_trait]
pub trait QueryClient {
    async fn query(&self, addr: SocketAddrV4) -> Result<ServerSnapshot, Error>;
}

/// Everything a server reports about itself across the info, rules and
/// player-list replies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerSnapshot {
    pub hostname: String,
    pub gamemode: String,
    pub mapname: String,
    pub passworded: bool,
    /// Counts from the info reply. `None` when the reply carried no usable
    /// value; the normalizer folds that into `0`.
    pub online: Option<u16>,
    pub maxplayers: Option<u16>,
    /// Free-form key/value pairs from the rules reply (`lagcomp`, `version`,
    /// `weather`, `weburl`, `worldtime`, ...).
    pub rules: HashMap<String, String>,
    pub players: Vec<Player>,
}

/// One entry of the detailed player list.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Player {
    pub id: u8,
    pub name: String,
    pub score: i32,
    pub ping: u32,
}
