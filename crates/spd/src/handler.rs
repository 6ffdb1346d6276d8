//! Request handler for the suggestion server

use std::sync::Arc;

use searchcache::SearchFilter;

use crate::protocol::{Request, Response, StatsSnapshot};

pub struct SearchHandler {
    filter: Arc<SearchFilter>,
}

impl SearchHandler {
    pub fn new(filter: Arc<SearchFilter>) -> Self {
        Self { filter }
    }

    /// Run one request to completion; `QUIT` acks like any other command,
    /// closing the connection is the caller's job
    pub fn handle(&self, request: Request) -> Response {
        match request {
            Request::Find(query) => Response::Results(self.filter.filter(&query).to_vec()),
            Request::Ping => Response::Pong,
            Request::Stats => Response::Stats(self.snapshot()),
            Request::Clear => {
                self.filter.clear_cache();
                Response::Ok
            }
            Request::Quit => Response::Ok,
        }
    }

    fn snapshot(&self) -> StatsSnapshot {
        let stats = self.filter.stats();
        StatsSnapshot {
            hits: stats.hits(),
            misses: stats.misses(),
            stores: stats.stores(),
            evictions: stats.evictions(),
            hit_ratio: stats.hit_ratio(),
            cache_len: self.filter.cache_len(),
            capacity: self.filter.capacity(),
            dataset_len: self.filter.dataset().len(),
        }
    }
}
