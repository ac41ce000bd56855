//! EDNS option to signal the TCP keepalive timeout.
//!
//! The option in this module – [`TcpKeepalive`] – can be added by a client
//! to a query to signal its interest in the idle timeout of the server
//! and by a server to announce that timeout.
//!
//! The option is defined in [RFC 7828](https://tools.ietf.org/html/rfc7828).

use super::super::iana::OptionCode;
use super::super::wire::{ParseError, WireParser};
use super::{AllOptData, ComposeOptData, Opt, OptData, ParseOptData};
use core::fmt;
use core::time::Duration;
use octseq::builder::OctetsBuilder;

//------------ TcpKeepalive --------------------------------------------------

/// Option data for the edns-tcp-keepalive option.
///
/// The timeout is given in units of 100 milliseconds. It is absent in
/// queries and present in responses.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TcpKeepalive(Option<u16>);

impl TcpKeepalive {
    /// Creates a new value from an optional timeout in units of 100ms.
    #[must_use]
    pub fn new(timeout: Option<u16>) -> Self {
        TcpKeepalive(timeout)
    }

    /// Returns the timeout in units of 100 milliseconds.
    #[must_use]
    pub fn timeout(self) -> Option<u16> {
        self.0
    }

    /// Returns the timeout as a duration if present.
    #[must_use]
    pub fn duration(self) -> Option<Duration> {
        self.0.map(|value| Duration::from_millis(u64::from(value) * 100))
    }

    /// Parses an option data value from its wire format.
    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        if parser.remaining() == 0 {
            Ok(Self::new(None))
        } else {
            parser.parse_u16_be().map(|value| Self::new(Some(value)))
                .map_err(Into::into)
        }
    }
}

//--- OptData etc.

impl OptData for TcpKeepalive {
    fn code(&self) -> OptionCode {
        OptionCode::TCP_KEEPALIVE
    }
}

impl ParseOptData for TcpKeepalive {
    fn parse_option(
        code: OptionCode,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if code == OptionCode::TCP_KEEPALIVE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeOptData for TcpKeepalive {
    fn compose_len(&self) -> u16 {
        match self.0 {
            Some(_) => 2,
            None => 0,
        }
    }

    fn compose_option<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        match self.0 {
            Some(value) => target.append_slice(&value.to_be_bytes()),
            None => Ok(()),
        }
    }
}

//--- Display

impl fmt::Display for TcpKeepalive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", value),
            None => Ok(()),
        }
    }
}

//--- Extended Opt

impl Opt {
    /// Returns the first edns-tcp-keepalive option if present.
    #[must_use]
    pub fn tcp_keepalive(&self) -> Option<TcpKeepalive> {
        self.iter().find_map(|opt| match opt {
            AllOptData::TcpKeepalive(value) => Some(*value),
            _ => None,
        })
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::super::test::test_option_compose_parse;
    use super::*;

    #[test]
    fn tcp_keepalive_compose_parse() {
        test_option_compose_parse(&TcpKeepalive::new(None), TcpKeepalive::parse);
        test_option_compose_parse(
            &TcpKeepalive::new(Some(12)),
            TcpKeepalive::parse,
        );
        assert_eq!(
            TcpKeepalive::new(Some(12)).duration(),
            Some(Duration::from_millis(1200))
        );
    }
}
