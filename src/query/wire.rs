//! SA-MP query protocol wire format.
//!
//! Every request is an 11 byte packet:
//!
//! ```text
//! +---------+-------------+------------------+--------+
//! | "SAMP"  | IPv4 octets | port (u16 LE)    | opcode |
//! | 4 bytes | 4 bytes     | 2 bytes          | 1 byte |
//! +---------+-------------+------------------+--------+
//! ```
//!
//! The server echoes those 11 bytes back verbatim, followed by an
//! opcode-specific payload. All integers are little-endian; strings are
//! length-prefixed and not NUL-terminated:
//!
//! - [`OPCODE_INFO`] (`i`): `passworded: u8`, `online: u16`,
//!   `maxplayers: u16`, then `hostname`, `gamemode`, `mapname` as
//!   `u32` length + bytes each.
//! - [`OPCODE_RULES`] (`r`): `count: u16`, then `count` key/value pairs as
//!   `u8` length + bytes each.
//! - [`OPCODE_PLAYERS`] (`d`): `count: u16`, then per player `id: u8`,
//!   name as `u8` length + bytes, `score: i32`, `ping: u32`.
//!
//! Servers predate UTF-8 enforcement, so string bytes are decoded lossily.

use crate::query::Player;
use std::collections::HashMap;
use std::net::SocketAddrV4;

pub const MAGIC: &[u8; 4] = b"SAMP";
pub const HEADER_LEN: usize = 11;

pub const OPCODE_INFO: u8 = b'i';
pub const OPCODE_RULES: u8 = b'r';
pub const OPCODE_PLAYERS: u8 = b'd';

/// ReplyError enumerates the ways a reply datagram can fail to decode.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ReplyError {
    #[error("reply shorter than the 11 byte header")]
    TruncatedHeader,
    #[error("reply does not start with the \"SAMP\" magic")]
    BadMagic,
    #[error("payload truncated: {needed} byte(s) missing")]
    TruncatedPayload { needed: usize },
}

/// Encode a request packet for the given endpoint and opcode.
pub fn request(addr: SocketAddrV4, opcode: u8) -> [u8; HEADER_LEN] {
    let mut packet = [0u8; HEADER_LEN];
    packet[..4].copy_from_slice(MAGIC);
    packet[4..8].copy_from_slice(&addr.ip().octets());
    packet[8..10].copy_from_slice(&addr.port().to_le_bytes());
    packet[10] = opcode;
    packet
}

/// Strip the echoed request header from a reply, returning the payload.
pub fn payload(reply: &[u8]) -> Result<&[u8], ReplyError> {
    if reply.len() < HEADER_LEN {
        return Err(ReplyError::TruncatedHeader);
    }
    if &reply[..4] != MAGIC {
        return Err(ReplyError::BadMagic);
    }
    Ok(&reply[HEADER_LEN..])
}

/// The decoded payload of an [`OPCODE_INFO`] reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoReply {
    pub passworded: bool,
    pub online: u16,
    pub maxplayers: u16,
    pub hostname: String,
    pub gamemode: String,
    pub mapname: String,
}

pub fn parse_info(payload: &[u8]) -> Result<InfoReply, ReplyError> {
    let mut r = Reader::new(payload);
    Ok(InfoReply {
        passworded: r.u8()? != 0,
        online: r.u16()?,
        maxplayers: r.u16()?,
        hostname: r.long_string()?,
        gamemode: r.long_string()?,
        mapname: r.long_string()?,
    })
}

pub fn parse_rules(payload: &[u8]) -> Result<HashMap<String, String>, ReplyError> {
    let mut r = Reader::new(payload);
    let count = r.u16()?;
    let mut rules = HashMap::with_capacity(usize::from(count));
    for _ in 0..count {
        let key = r.short_string()?;
        let value = r.short_string()?;
        rules.insert(key, value);
    }
    Ok(rules)
}

pub fn parse_players(payload: &[u8]) -> Result<Vec<Player>, ReplyError> {
    let mut r = Reader::new(payload);
    let count = r.u16()?;
    let mut players = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        players.push(Player {
            id: r.u8()?,
            name: r.short_string()?,
            score: r.i32()?,
            ping: r.u32()?,
        });
    }
    Ok(players)
}

struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Reader { buf }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ReplyError> {
        if self.buf.len() < n {
            return Err(ReplyError::TruncatedPayload {
                needed: n - self.buf.len(),
            });
        }
        let (head, rest) = self.buf.split_at(n);
        self.buf = rest;
        Ok(head)
    }

    fn u8(&mut self) -> Result<u8, ReplyError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, ReplyError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, ReplyError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn i32(&mut self) -> Result<i32, ReplyError> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn short_string(&mut self) -> Result<String, ReplyError> {
        let len = usize::from(self.u8()?);
        Ok(String::from_utf8_lossy(self.take(len)?).into_owned())
    }

    fn long_string(&mut self) -> Result<String, ReplyError> {
        let len = self.u32()? as usize;
        Ok(String::from_utf8_lossy(self.take(len)?).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn long_str(s: &str) -> Vec<u8> {
        let mut out = (s.len() as u32).to_le_bytes().to_vec();
        out.extend_from_slice(s.as_bytes());
        out
    }

    fn short_str(s: &str) -> Vec<u8> {
        let mut out = vec![s.len() as u8];
        out.extend_from_slice(s.as_bytes());
        out
    }

    #[test]
    fn request_layout() {
        let addr = SocketAddrV4::new(Ipv4Addr::new(127, 0, 0, 1), 7777);
        let packet = request(addr, OPCODE_INFO);
        assert_eq!(&packet[..4], b"SAMP");
        assert_eq!(&packet[4..8], &[127, 0, 0, 1]);
        // 7777 = 0x1e61
        assert_eq!(&packet[8..10], &[0x61, 0x1e]);
        assert_eq!(packet[10], b'i');
    }

    #[test]
    fn payload_strips_header() {
        let addr = SocketAddrV4::new(Ipv4Addr::new(127, 0, 0, 1), 7777);
        let mut reply = request(addr, OPCODE_RULES).to_vec();
        reply.extend_from_slice(&[0, 0]);
        assert_eq!(payload(&reply).unwrap(), &[0, 0]);
    }

    #[test]
    fn payload_rejects_short_or_unmarked_replies() {
        assert_eq!(payload(b"SAMP"), Err(ReplyError::TruncatedHeader));
        assert_eq!(payload(&[0u8; 16][..]), Err(ReplyError::BadMagic));
    }

    #[test]
    fn info_round_trip() {
        let mut buf = vec![1];
        buf.extend_from_slice(&12u16.to_le_bytes());
        buf.extend_from_slice(&50u16.to_le_bytes());
        buf.extend(long_str("Test Server"));
        buf.extend(long_str("DM"));
        buf.extend(long_str("LS"));

        let info = parse_info(&buf).unwrap();
        assert_eq!(
            info,
            InfoReply {
                passworded: true,
                online: 12,
                maxplayers: 50,
                hostname: "Test Server".into(),
                gamemode: "DM".into(),
                mapname: "LS".into(),
            }
        );
    }

    #[test]
    fn info_truncated_string() {
        let mut buf = vec![0];
        buf.extend_from_slice(&0u16.to_le_bytes());
        buf.extend_from_slice(&0u16.to_le_bytes());
        buf.extend_from_slice(&100u32.to_le_bytes());
        buf.extend_from_slice(b"short");
        assert_eq!(
            parse_info(&buf),
            Err(ReplyError::TruncatedPayload { needed: 95 })
        );
    }

    #[test]
    fn rules_round_trip() {
        let mut buf = 2u16.to_le_bytes().to_vec();
        buf.extend(short_str("version"));
        buf.extend(short_str("0.3.7"));
        buf.extend(short_str("weather"));
        buf.extend(short_str("10"));

        let rules = parse_rules(&buf).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules["version"], "0.3.7");
        assert_eq!(rules["weather"], "10");
    }

    #[test]
    fn players_round_trip() {
        let mut buf = 1u16.to_le_bytes().to_vec();
        buf.push(3);
        buf.extend(short_str("Carl"));
        buf.extend_from_slice(&(-5i32).to_le_bytes());
        buf.extend_from_slice(&48u32.to_le_bytes());

        let players = parse_players(&buf).unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].id, 3);
        assert_eq!(players[0].name, "Carl");
        assert_eq!(players[0].score, -5);
        assert_eq!(players[0].ping, 48);
    }

    #[test]
    fn non_utf8_names_decode_lossily() {
        let mut buf = 1u16.to_le_bytes().to_vec();
        buf.extend(short_str("grüße"));
        // latin-1 "grüße"
        buf.extend_from_slice(&[5, b'g', b'r', 0xfc, 0xdf, b'e']);
        let rules = parse_rules(&buf).unwrap();
        assert_eq!(rules["grüße"], "gr\u{fffd}\u{fffd}e");
    }
}
