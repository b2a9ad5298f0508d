//! UDP implementation of the [`QueryClient`] trait.

use crate::error::Error;
use crate::query::{wire, QueryClient, ServerSnapshot};
use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::timeout;

/// Servers stop answering the player-list request above this many players,
/// so the client doesn't bother sending one.
const PLAYER_LIST_LIMIT: u16 = 100;

/// Largest reply datagram we accept.
const MAX_REPLY_LEN: usize = 8192;

/// Queries a server with one ephemeral UDP socket per request: an info
/// round-trip, a rules round-trip, and (for small enough servers) a
/// player-list round-trip. Each round-trip gets its own timeout.
#[allow(clippy::module_name_repetitions)]
pub struct SampQueryClient {
    timeout: Duration,
}

impl SampQueryClient {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn round_trip(
        &self,
        socket: &UdpSocket,
        addr: SocketAddrV4,
        opcode: u8,
    ) -> Result<Vec<u8>, Error> {
        socket.send(&wire::request(addr, opcode)).await?;
        let mut buf = vec![0u8; MAX_REPLY_LEN];
        let n = timeout(self.timeout, socket.recv(&mut buf))
            .await
            .map_err(|_| Error::QueryTimeout(addr))??;
        buf.truncate(n);
        wire::payload(&buf)
            .map(|p| p.to_vec())
            .map_err(malformed(addr))
    }
}

#[async_trait::async_trait]
impl QueryClient for SampQueryClient {
    async fn query(&self, addr: SocketAddrV4) -> Result<ServerSnapshot, Error> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
        socket.connect(addr).await?;

        let raw = self.round_trip(&socket, addr, wire::OPCODE_INFO).await?;
        let info = wire::parse_info(&raw).map_err(malformed(addr))?;

        let raw = self.round_trip(&socket, addr, wire::OPCODE_RULES).await?;
        let rules = wire::parse_rules(&raw).map_err(malformed(addr))?;

        let players = if info.online > PLAYER_LIST_LIMIT {
            Vec::new()
        } else {
            let raw = self.round_trip(&socket, addr, wire::OPCODE_PLAYERS).await?;
            wire::parse_players(&raw).map_err(malformed(addr))?
        };

        Ok(ServerSnapshot {
            hostname: info.hostname,
            gamemode: info.gamemode,
            mapname: info.mapname,
            passworded: info.passworded,
            online: Some(info.online),
            maxplayers: Some(info.maxplayers),
            rules,
            players,
        })
    }
}

fn malformed(addr: SocketAddrV4) -> impl Fn(wire::ReplyError) -> Error {
    move |source| Error::MalformedReply { addr, source }
}
