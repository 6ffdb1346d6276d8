//! Line protocol for the suggestion server
//!
//! Requests are single text lines: `FIND <query>`, `PING`, `STATS`,
//! `CLEAR`, `QUIT`. Responses are one line each: `+` acks, `-ERR`
//! failures, JSON for result and stats payloads.

use bytes::BytesMut;
use searchdata::Record;
use serde::Serialize;

/// Longest accepted request line - bounds buffering for clients that
/// never send a newline
const MAX_LINE_LEN: usize = 64 * 1024;

/// Parsed client request
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Run a suggestion query; the payload is the raw input, verbatim
    Find(String),
    /// Liveness probe
    Ping,
    /// Cache counter snapshot
    Stats,
    /// Drop all cached results
    Clear,
    /// Close the connection
    Quit,
}

impl Request {
    /// Parse one request line from the buffer
    ///
    /// Returns `Ok(None)` while no complete line has arrived. A complete
    /// line is always consumed from the buffer, even when its command is
    /// rejected.
    pub fn parse(buf: &mut BytesMut) -> Result<Option<Request>, String> {
        let Some(pos) = buf.iter().position(|&b| b == b'\n') else {
            if buf.len() > MAX_LINE_LEN {
                return Err("request line too long".to_string());
            }
            return Ok(None);
        };

        let line = buf.split_to(pos + 1);
        let text = std::str::from_utf8(&line[..pos])
            .map_err(|_| "request is not valid UTF-8".to_string())?;
        let text = text.trim_end_matches('\r');

        let (command, rest) = match text.split_once(' ') {
            Some((command, rest)) => (command, rest),
            None => (text, ""),
        };

        match command.to_ascii_uppercase().as_str() {
            "FIND" => Ok(Some(Request::Find(rest.to_string()))),
            "PING" => Ok(Some(Request::Ping)),
            "STATS" => Ok(Some(Request::Stats)),
            "CLEAR" => Ok(Some(Request::Clear)),
            "QUIT" => Ok(Some(Request::Quit)),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command '{}'", other)),
        }
    }
}

/// Point-in-time view of the cache counters, serialized for `STATS`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    /// Lookups served from the cache
    pub hits: u64,
    /// Lookups that fell through to a dataset scan
    pub misses: u64,
    /// Results stored
    pub stores: u64,
    /// Entries displaced to stay within capacity
    pub evictions: u64,
    /// hits / (hits + misses)
    pub hit_ratio: f64,
    /// Queries currently cached
    pub cache_len: usize,
    /// Configured cache capacity
    pub capacity: usize,
    /// Records in the dataset
    pub dataset_len: usize,
}

/// Server reply, serialized as exactly one line
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Matching records for a `FIND`, in dataset order
    Results(Vec<Record>),
    /// Reply to `PING`
    Pong,
    /// Command acknowledged
    Ok,
    /// Cache counters
    Stats(StatsSnapshot),
    /// Command failed
    Error(String),
}

impl Response {
    /// Serialize to wire bytes, including the trailing newline
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = match self {
            Response::Results(records) => {
                serde_json::to_vec(records).unwrap_or_else(|_| b"[]".to_vec())
            }
            Response::Stats(snapshot) => {
                serde_json::to_vec(snapshot).unwrap_or_else(|_| b"{}".to_vec())
            }
            Response::Pong => b"+PONG".to_vec(),
            Response::Ok => b"+OK".to_vec(),
            Response::Error(msg) => format!("-ERR {}", msg).into_bytes(),
        };
        out.push(b'\n');
        out
    }
}
