use std::fmt::{Display, Formatter};
use std::str::FromStr;

use azstore_core::Error;
use log::debug;

/// Scheme used to reach a storage endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// Plain http, used by the emulator.
    Http,
    /// https, the default.
    #[default]
    Https,
}

impl Protocol {
    /// Lowercase scheme name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl Display for Protocol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("http") {
            Ok(Protocol::Http)
        } else if s.eq_ignore_ascii_case("https") {
            Ok(Protocol::Https)
        } else {
            Err(Error::config_invalid(format!(
                "invalid protocol: {s}, expected http or https"
            )))
        }
    }
}

/// Splits an optional scheme off an endpoint.
///
/// Any scheme is removed so only host and path remain. Only `http` and
/// `https` yield a protocol, other schemes are dropped.
pub(crate) fn split_scheme(endpoint: &str) -> (Option<Protocol>, &str) {
    match endpoint.split_once("://") {
        Some((scheme, rest)) => match scheme.parse() {
            Ok(protocol) => (Some(protocol), rest),
            Err(_) => {
                debug!("ignoring unsupported scheme {scheme:?} of endpoint {rest:?}");
                (None, rest)
            }
        },
        None => (None, endpoint),
    }
}
