//! Error surface for the control server bootstrap.
//!
//! Request handling itself never propagates errors; only binding and
//! serving the listener can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid listen address '{addr}': {source}")]
    AddrParse {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
