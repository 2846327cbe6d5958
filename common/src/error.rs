use std::net::Ipv4Addr;

use thiserror::Error;

/// Why a textual range could not be turned into an [`Ipv4Range`](crate::network::range::Ipv4Range).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("expected `<start>-<end>`, got {0:?}")]
    Shape(String),
    #[error("{token:?} is not a valid IPv4 address")]
    InvalidAddress { token: String },
    #[error("range start {start} is greater than range end {end}")]
    Inverted { start: Ipv4Addr, end: Ipv4Addr },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("endpoint must be an http:// or https:// URL, got {0:?}")]
    InvalidEndpoint(String),
    #[error("concurrency must be at least 1")]
    ZeroConcurrency,
    #[error("at least one attempt per address is required")]
    ZeroAttempts,
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}
