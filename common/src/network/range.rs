//! # IPv4 Range Expansion
//!
//! Turns operator input such as `192.168.1.1-192.168.1.100` into the ordered
//! list of addresses a sweep will visit.

use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::RangeError;

/// A closed interval of IPv4 addresses, compared as big-endian `u32`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    /// Number of addresses covered. Zero when the range is inverted.
    pub fn len(&self) -> usize {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        if start > end {
            0
        } else {
            (end - start) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ascending iterator over every address in the range.
    pub fn to_iter(&self) -> impl Iterator<Item = Ipv4Addr> {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }

    /// Materializes the range as dotted-decimal strings, allocating once.
    pub fn to_strings(&self) -> Vec<String> {
        let mut addresses: Vec<String> = Vec::with_capacity(self.len());
        addresses.extend(self.to_iter().map(|ip| ip.to_string()));
        addresses
    }
}

impl FromStr for Ipv4Range {
    type Err = RangeError;

    /// Parses `A.B.C.D-E.F.G.H`. Both ends must be complete IPv4 addresses and
    /// the start must not be greater than the end. Only whitespace around the
    /// whole input is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();
        let mut parts = trimmed.split('-');
        let (Some(start_str), Some(end_str), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(RangeError::Shape(trimmed.to_string()));
        };

        let start_addr: Ipv4Addr = parse_addr(start_str)?;
        let end_addr: Ipv4Addr = parse_addr(end_str)?;

        if u32::from(start_addr) > u32::from(end_addr) {
            return Err(RangeError::Inverted {
                start: start_addr,
                end: end_addr,
            });
        }

        Ok(Ipv4Range::new(start_addr, end_addr))
    }
}

fn parse_addr(token: &str) -> Result<Ipv4Addr, RangeError> {
    token
        .parse::<Ipv4Addr>()
        .map_err(|_| RangeError::InvalidAddress {
            token: token.to_string(),
        })
}

/// Expands `text` into every address it covers, in ascending order.
///
/// Malformed input and inverted ranges produce an empty list rather than an
/// error; use [`Ipv4Range::from_str`] to learn why the input was rejected.
pub fn expand(text: &str) -> Vec<String> {
    text.parse::<Ipv4Range>()
        .map(|range| range.to_strings())
        .unwrap_or_default()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
