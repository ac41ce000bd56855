//! EDNS option to provide a Name Server Identifer.
//!
//! The option in this module – [`Nsid`] – allows a resolver to query for
//! and a server to provide an identifier for the particular server that
//! answered the query. This can be helpful when debugging a scenario where
//! multiple servers serve a common address.
//!
//! The option is defined in [RFC 5001](https://tools.ietf.org/html/rfc5001).

use super::super::iana::OptionCode;
use super::super::wire::{parse_remaining, ParseError, WireParser};
use super::{ComposeOptData, LongOptData, Opt, OptData, ParseOptData};
use bytes::Bytes;
use core::fmt;
use octseq::builder::OctetsBuilder;

//------------ Nsid ---------------------------------------------------------/

/// Option data for the Name Server Identifier (NSID) Option.
///
/// This option allows identifying a particular name server that has answered
/// a query. If a client is interested in this information, it includes an
/// empty NSID option in its query. If the server supports the option, it
/// includes it in its response with byte string identifying the server.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Nsid {
    /// The octets of the identifier.
    octets: Bytes,
}

impl Nsid {
    /// Creates a value from the ocets of the name server identifier.
    ///
    /// The function returns an error if `octets` is longer than 65,535
    /// octets.
    pub fn from_octets(octets: impl Into<Bytes>) -> Result<Self, LongOptData> {
        let octets = octets.into();
        LongOptData::check_len(octets.len())?;
        Ok(Nsid { octets })
    }

    /// Creates an empty NSID option value as used in queries.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a slice of the server identifier.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        self.octets.as_ref()
    }

    /// Parses a value from its wire format.
    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        Ok(Nsid {
            octets: parse_remaining(parser).into(),
        })
    }
}

//--- OptData etc.

impl OptData for Nsid {
    fn code(&self) -> OptionCode {
        OptionCode::NSID
    }
}

impl ParseOptData for Nsid {
    fn parse_option(
        code: OptionCode,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if code == OptionCode::NSID {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeOptData for Nsid {
    fn compose_len(&self) -> u16 {
        self.octets.len() as u16
    }

    fn compose_option<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(self.octets.as_ref())
    }
}

//--- Display

impl fmt::Display for Nsid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // RFC 5001 § 2.4:
        // | User interfaces MUST read and write the contents of the NSID
        // | option as a sequence of hexadecimal digits, two digits per
        // | payload octet.
        for v in self.octets.iter() {
            write!(f, "{:02x}", *v)?;
        }
        Ok(())
    }
}

//--- Extended Opt

impl Opt {
    /// Returns the first NSID option present.
    ///
    /// In a response, the NSID option contains an identifier of the name
    /// server that answered the query. In a query, the option is empty and
    /// signals a request for inclusion in a response.
    #[must_use]
    pub fn nsid(&self) -> Option<&Nsid> {
        self.iter().find_map(|opt| match opt {
            super::AllOptData::Nsid(nsid) => Some(nsid),
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
    fn nsid_compose_parse() {
        let nsid = Nsid::from_octets(&b"ns1.example"[..]).unwrap();
        test_option_compose_parse(&nsid, Nsid::parse);
        assert_eq!(Nsid::from_octets(&b"\x01\xfe"[..]).unwrap().to_string(), "01fe");
    }
}
