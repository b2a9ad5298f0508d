//! Error types.

use std::net::SocketAddrV4;
use trust_dns_resolver::error::ResolveError;

/// Error enumerates the possible SAMP Bridge error states.
///
/// Validation failures carry the localized, user-facing message the web
/// frontends expect; upstream failures keep the collaborator's own message
/// text. At the [HTTP boundary][crate::api] every variant is rendered the
/// same way: status 500 and a JSON body of `{"error": "<message>"}`.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a request omits the `host` query parameter, or sends it
    /// empty.
    #[error("Parameter \"host\" wird benötigt.")]
    HostRequired,

    /// Returned when `host` is neither a literal IPv4 address nor a name that
    /// resolves to at least one A record. The underlying resolver error is
    /// logged, not surfaced.
    #[error("\"{0}\" ist kein gültiger Host.")]
    InvalidHost(String),

    /// Returned when `port` does not parse as a base-10 integer in
    /// `[1, 65535]`.
    #[error("\"{0}\" ist kein gültiger Port.")]
    InvalidPort(String),

    /// Returned when the queried game server does not answer a request packet
    /// within the configured timeout.
    #[error("no response from {0}")]
    QueryTimeout(SocketAddrV4),

    /// Returned when a reply packet fails to decode as the
    /// [SA-MP query wire format][crate::query::wire].
    #[error("malformed reply from {addr}: {source}")]
    MalformedReply {
        addr: SocketAddrV4,
        #[source]
        source: crate::query::wire::ReplyError,
    },

    /// Returned when forward DNS resolution fails outright. Converted to
    /// [`Error::InvalidHost`] before it reaches a client.
    #[error("DNS lookup failed")]
    Resolution(#[from] ResolveError),

    /// Returned when a generic IO error occurs, e.g. on the UDP socket.
    #[error(transparent)]
    IO(#[from] std::io::Error),

    /// Returned when processing JSON from disk (e.g.
    /// [trying to load a `Config`][crate::config::Config::try_from_file])
    /// fails due to invalid JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),

    /// Returned when the `PORT` environment variable is set but does not
    /// parse as a TCP port.
    #[error("invalid listen port: \"{0}\"")]
    InvalidListenPort(String),
}
