//! HTTP surface of the bridge.
//!
//! # Endpoint
//!
//! A single handler answers every path and method. It takes two query
//! parameters:
//!
//! - `host` (required): a dotted-decimal IPv4 address, or a hostname to be
//!   resolved to its first A record.
//! - `port` (optional): the server's query port, `7777` by default.
//!
//! ```bash
//! ❯ curl 'http://localhost:5000/?host=127.0.0.1&port=7777'
//! {
//!   "host": "127.0.0.1",
//!   "port": 7777,
//!   "error": null,
//!   "gamemode": "DM",
//!   "hostname": "Test Server",
//!   "mapname": "LS",
//!   "lagcomp": "Medium",
//!   "passworded": false,
//!   "maxplayers": 50,
//!   "online": 1,
//!   "players": [ { "id": 0, "name": "Carl", "score": 12, "ping": 37 } ],
//!   "version": "0.3.7",
//!   "weather": "10",
//!   "worldtime": "12:00"
//! }
//! ```
//!
//! `host` in the response is the address that was actually queried. Rule
//! fields the server didn't report are omitted, except `weather` which
//! falls back to `0`; `maxplayers` and `online` fall back to `0` as well.
//!
//! # Failures
//!
//! Every failure (missing or unresolvable `host`, out-of-range `port`, an
//! unreachable game server) is HTTP 500 with a JSON body of the form:
//!
//! ```json
//! { "error": "\"does-not-exist.invalid\" ist kein gültiger Host." }
//! ```
//!
//! # Caching
//!
//! Responses are memoized per request URL for the configured time-to-live
//! (five minutes by default), error envelopes included. Within that window
//! repeat requests are served byte-identically from memory and the game
//! server is not contacted again.
//!
//! # CORS
//!
//! `Access-Control-Allow-Origin: *` and
//! `Access-Control-Expose-Headers: Content-Type` are set on every response,
//! cached or fresh, so the endpoint is callable straight from a browser.

mod api_error;
mod model;
mod routes;
pub mod server;

pub use server::new;
