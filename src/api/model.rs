use crate::error::Error;
use crate::query::{Player, ServerSnapshot};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

pub(super) const DEFAULT_PORT: u16 = 7777;

/// Raw query-string inputs, both untrusted. Validation happens in the
/// accessors so the handler reads as the pipeline it is.
#[derive(Deserialize, Debug, Clone, Default)]
pub(super) struct StatusParams {
    pub host: Option<String>,
    pub port: Option<String>,
}

impl StatusParams {
    /// The submitted host. Missing and empty are the same failure; whether
    /// the value names a reachable server is the resolver's business.
    pub fn host(&self) -> Result<&str, Error> {
        match self.host.as_deref() {
            Some(host) if !host.is_empty() => Ok(host),
            _ => Err(Error::HostRequired),
        }
    }

    /// The submitted port: defaults to 7777 when missing or empty, must
    /// otherwise parse base-10 into `[1, 65535]`.
    pub fn port(&self) -> Result<u16, Error> {
        let raw = match self.port.as_deref() {
            None | Some("") => return Ok(DEFAULT_PORT),
            Some(raw) => raw,
        };
        match raw.parse::<u16>() {
            Ok(port) if port >= 1 => Ok(port),
            _ => Err(Error::InvalidPort(raw.to_string())),
        }
    }
}

/// `weather` as clients see it: the rule string when the server reports a
/// non-empty one, the numeric fallback `0` otherwise.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Weather {
    Reported(String),
    Unreported(u16),
}

impl From<Option<String>> for Weather {
    fn from(rule: Option<String>) -> Self {
        match rule {
            Some(weather) if !weather.is_empty() => Weather::Reported(weather),
            _ => Weather::Unreported(0),
        }
    }
}

/// The stable response contract. Field order is the serialization order the
/// existing web clients already parse; rule-derived string fields disappear
/// from the JSON entirely when the server didn't report the rule.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(super) struct ServerStatus {
    pub host: String,
    pub port: u16,
    /// Always `null`; failed requests use the error envelope instead.
    pub error: Option<String>,
    pub gamemode: String,
    pub hostname: String,
    pub mapname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lagcomp: Option<String>,
    pub passworded: bool,
    pub maxplayers: u16,
    pub online: u16,
    pub players: Vec<Player>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub weather: Weather,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weburl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worldtime: Option<String>,
}

impl ServerStatus {
    /// Flatten a snapshot into the response contract.
    ///
    /// `host` is the resolved address, not whatever the client submitted.
    /// `maxplayers` and `online` collapse missing and zero into `0`: the
    /// contract cannot tell an empty server from one that withheld a count,
    /// and clients already rely on that reading.
    pub fn new(ip: Ipv4Addr, port: u16, snapshot: ServerSnapshot) -> Self {
        let ServerSnapshot {
            hostname,
            gamemode,
            mapname,
            passworded,
            online,
            maxplayers,
            mut rules,
            players,
        } = snapshot;
        ServerStatus {
            host: ip.to_string(),
            port,
            error: None,
            gamemode,
            hostname,
            mapname,
            lagcomp: rules.remove("lagcomp"),
            passworded,
            maxplayers: maxplayers.unwrap_or(0),
            online: online.unwrap_or(0),
            players,
            version: rules.remove("version"),
            weather: rules.remove("weather").into(),
            weburl: rules.remove("weburl"),
            worldtime: rules.remove("worldtime"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn params(host: Option<&str>, port: Option<&str>) -> StatusParams {
        StatusParams {
            host: host.map(str::to_string),
            port: port.map(str::to_string),
        }
    }

    #[test]
    fn host_must_be_present_and_non_empty() {
        assert!(matches!(params(None, None).host(), Err(Error::HostRequired)));
        assert!(matches!(
            params(Some(""), None).host(),
            Err(Error::HostRequired)
        ));
        assert_eq!(params(Some("example.com"), None).host().unwrap(), "example.com");
    }

    #[test]
    fn port_defaults_when_missing_or_empty() {
        assert_eq!(params(Some("h"), None).port().unwrap(), 7777);
        assert_eq!(params(Some("h"), Some("")).port().unwrap(), 7777);
    }

    #[test]
    fn port_must_be_an_integer_in_range() {
        for valid in ["1", "7777", "65535"] {
            assert!(params(Some("h"), Some(valid)).port().is_ok(), "{valid}");
        }
        for invalid in ["abc", "0", "-1", "65536", "999999", "7.5", " 7777"] {
            match params(Some("h"), Some(invalid)).port() {
                Err(Error::InvalidPort(raw)) => assert_eq!(raw, invalid),
                other => panic!("{invalid}: expected invalid port, got {other:?}"),
            }
        }
    }

    fn snapshot() -> ServerSnapshot {
        ServerSnapshot {
            hostname: "Test Server".into(),
            gamemode: "DM".into(),
            mapname: "LS".into(),
            passworded: false,
            online: None,
            maxplayers: None,
            rules: HashMap::from([
                ("lagcomp".into(), "Medium".into()),
                ("version".into(), "0.3.7".into()),
                ("worldtime".into(), "12:00".into()),
            ]),
            players: Vec::new(),
        }
    }

    #[test]
    fn normalizes_the_reference_reply() {
        let status = ServerStatus::new(Ipv4Addr::new(127, 0, 0, 1), 7777, snapshot());
        // weburl is absent from the JSON, not null; error is null, not absent.
        assert_eq!(
            serde_json::to_value(status).unwrap(),
            json!({
                "host": "127.0.0.1",
                "port": 7777,
                "error": null,
                "gamemode": "DM",
                "hostname": "Test Server",
                "mapname": "LS",
                "lagcomp": "Medium",
                "passworded": false,
                "maxplayers": 0,
                "online": 0,
                "players": [],
                "version": "0.3.7",
                "weather": 0,
                "worldtime": "12:00",
            })
        );
    }

    #[test]
    fn reported_counts_pass_through() {
        let mut snap = snapshot();
        snap.online = Some(12);
        snap.maxplayers = Some(50);
        let status = ServerStatus::new(Ipv4Addr::new(127, 0, 0, 1), 7777, snap);
        assert_eq!(status.online, 12);
        assert_eq!(status.maxplayers, 50);
    }

    #[test]
    fn zero_counts_stay_indistinguishable_from_missing() {
        let mut snap = snapshot();
        snap.online = Some(0);
        snap.maxplayers = Some(0);
        let status = ServerStatus::new(Ipv4Addr::new(127, 0, 0, 1), 7777, snap);
        assert_eq!(status.online, 0);
        assert_eq!(status.maxplayers, 0);
    }

    #[test]
    fn weather_keeps_reported_strings_including_zero() {
        let mut snap = snapshot();
        snap.rules.insert("weather".into(), "0".into());
        let status = ServerStatus::new(Ipv4Addr::new(127, 0, 0, 1), 7777, snap);
        assert_eq!(status.weather, Weather::Reported("0".into()));

        let mut snap = snapshot();
        snap.rules.insert("weather".into(), String::new());
        let status = ServerStatus::new(Ipv4Addr::new(127, 0, 0, 1), 7777, snap);
        assert_eq!(status.weather, Weather::Unreported(0));

        let status = ServerStatus::new(Ipv4Addr::new(127, 0, 0, 1), 7777, snapshot());
        assert_eq!(status.weather, Weather::Unreported(0));
    }

    #[test]
    fn players_pass_through_verbatim() {
        let mut snap = snapshot();
        snap.players = vec![Player {
            id: 0,
            name: "Carl".into(),
            score: 12,
            ping: 37,
        }];
        let status = ServerStatus::new(Ipv4Addr::new(127, 0, 0, 1), 7777, snap);
        assert_eq!(
            serde_json::to_value(&status.players).unwrap(),
            json!([{"id": 0, "name": "Carl", "score": 12, "ping": 37}])
        );
    }
}
