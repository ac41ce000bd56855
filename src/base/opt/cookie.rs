//! EDNS Option for DNS cookies.
//!
//! The option in this module – [`Cookie`] –  is part of a simple mechanism
//! that helps DNS servers to mitigate denial-of-service and amplification
//! attacks called DNS cookies.
//!
//! In this mechanism, the client creates a client cookie and includes it in
//! its request to a server. When answering, the server generates a server
//! cookie from the client cookie and a secret and includes it in the
//! response. When the client sends subsequent queries to the same server,
//! it includes both the same client cookie as before and the server cookie
//! it received, thus identifying itself as having sent a query before.
//!
//! The DNS Cookie mechanism is defined in [RFC 7873].
//!
//! [RFC 7873]: https://tools.ietf.org/html/rfc7873

use super::super::iana::OptionCode;
use super::super::wire::{parse_remaining, ParseError, WireParser};
use super::{AllOptData, ComposeOptData, Opt, OptData, ParseOptData};
use bytes::Bytes;
use core::fmt;
use octseq::builder::OctetsBuilder;
use rand::RngCore;

//------------ Cookie --------------------------------------------------------

/// Option data for a DNS cookie.
///
/// A value of this type carries two parts: A mandatory [`ClientCookie`] and
/// an optional [`ServerCookie`]. The client cookie is chosen by the client
/// and added to a request when contacting a specific server for the first
/// time. When responding, a server calculates a server cookie from the
/// client cookie and adds both of them to the response.
///
/// A new initial cookie with a random client cookie can be created via
/// [`create_initial`][Self::create_initial] from a random number generator
/// provided by the caller.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Cookie {
    /// The client cookie.
    client: ClientCookie,

    /// The optional server cookie.
    server: Option<ServerCookie>,
}

impl Cookie {
    /// Creates a new cookie from client and optional server cookie.
    #[must_use]
    pub fn new(client: ClientCookie, server: Option<ServerCookie>) -> Self {
        Cookie { client, server }
    }

    /// Creates a random client cookie for including in an initial request.
    pub fn create_initial<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self::new(ClientCookie::new_random(rng), None)
    }

    /// Returns the client cookie.
    #[must_use]
    pub fn client(&self) -> ClientCookie {
        self.client
    }

    /// Returns a reference to the server cookie if present.
    #[must_use]
    pub fn server(&self) -> Option<&ServerCookie> {
        self.server.as_ref()
    }

    /// Parses the cookie from its wire format.
    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        Ok(Cookie::new(
            ClientCookie::parse(parser)?,
            ServerCookie::parse_opt(parser)?,
        ))
    }
}

//--- OptData etc.

impl OptData for Cookie {
    fn code(&self) -> OptionCode {
        OptionCode::COOKIE
    }
}

impl ParseOptData for Cookie {
    fn parse_option(
        code: OptionCode,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if code == OptionCode::COOKIE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeOptData for Cookie {
    fn compose_len(&self) -> u16 {
        match self.server.as_ref() {
            Some(server) => 8 + server.compose_len(),
            None => 8,
        }
    }

    fn compose_option<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.client.compose(target)?;
        if let Some(server) = self.server.as_ref() {
            server.compose(target)?;
        }
        Ok(())
    }
}

//--- Display

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.client)?;
        if let Some(server) = self.server.as_ref() {
            write!(f, " {}", server)?;
        }
        Ok(())
    }
}

//--- Extended Opt

impl Opt {
    /// Returns the first cookie option if present.
    #[must_use]
    pub fn cookie(&self) -> Option<&Cookie> {
        self.iter().find_map(|opt| match opt {
            AllOptData::Cookie(value) => Some(value),
            _ => None,
        })
    }
}

//------------ ClientCookie --------------------------------------------------

/// A client cookie for DNS cookies.
///
/// The client cookie is eight octets of random data.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClientCookie([u8; 8]);

impl ClientCookie {
    /// Creates a new client cookie from the given octets.
    #[must_use]
    pub const fn from_octets(octets: [u8; 8]) -> Self {
        Self(octets)
    }

    /// Creates a new random client cookie.
    pub fn new_random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut res = [0u8; 8];
        rng.fill_bytes(&mut res);
        Self(res)
    }

    /// Converts the cookie into its octets.
    #[must_use]
    pub fn into_octets(self) -> [u8; 8] {
        self.0
    }

    /// Parses a client cookie from its wire format.
    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        let mut res = [0u8; 8];
        parser
            .parse_buf(&mut res)
            .map_err(|_| ParseError::form_error("short client cookie"))?;
        Ok(Self(res))
    }

    /// Appends the wire format of the cookie to the target.
    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&self.0)
    }
}

//--- From and AsRef

impl From<[u8; 8]> for ClientCookie {
    fn from(src: [u8; 8]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for ClientCookie {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

//--- Display

impl fmt::Display for ClientCookie {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_hex(f, &self.0)
    }
}

//------------ ServerCookie --------------------------------------------------

/// A server cookie for DNS cookies.
///
/// The server cookie is of variable length between 8 and 32 octets.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ServerCookie(Bytes);

impl ServerCookie {
    /// The minimum length of a server cookie.
    pub const MIN_LEN: usize = 8;

    /// The maximum length of a server cookie.
    pub const MAX_LEN: usize = 32;

    /// Creates a new server cookie from the given octets.
    ///
    /// Returns `None` if `slice` is shorter than 8 octets or longer than
    /// 32.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if (Self::MIN_LEN..=Self::MAX_LEN).contains(&slice.len()) {
            Some(Self(Bytes::copy_from_slice(slice)))
        } else {
            None
        }
    }

    /// Returns the octets of the cookie.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Parses a server cookie from the remainder of the parser.
    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        if parser.remaining() < Self::MIN_LEN {
            return Err(ParseError::form_error("short server cookie"));
        }
        if parser.remaining() > Self::MAX_LEN {
            return Err(ParseError::form_error("long server cookie"));
        }
        Ok(Self(parse_remaining(parser).into()))
    }

    /// Parses an optional server cookie from its wire format.
    pub fn parse_opt(
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if parser.remaining() > 0 {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Returns the length of the wire format of the cookie.
    #[must_use]
    pub fn compose_len(&self) -> u16 {
        self.0.len() as u16
    }

    /// Appends the wire format of the cookie to the target.
    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(self.0.as_ref())
    }
}

//--- AsRef

impl AsRef<[u8]> for ServerCookie {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

//--- Display

impl fmt::Display for ServerCookie {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_hex(f, self.0.as_ref())
    }
}

fn write_hex(f: &mut fmt::Formatter, data: &[u8]) -> fmt::Result {
    for ch in data {
        write!(f, "{:02x}", ch)?;
    }
    Ok(())
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::super::test::test_option_compose_parse;
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn cookie_compose_parse() {
        test_option_compose_parse(
            &Cookie::new(ClientCookie::from_octets(*b"client01"), None),
            Cookie::parse,
        );
        test_option_compose_parse(
            &Cookie::new(
                ClientCookie::from_octets(*b"client01"),
                ServerCookie::from_slice(b"server cookie 01"),
            ),
            Cookie::parse,
        );
    }

    #[test]
    fn server_cookie_length() {
        assert!(ServerCookie::from_slice(b"short").is_none());
        assert!(ServerCookie::from_slice(&[0; 33]).is_none());

        let mut parser = WireParser::from_ref(b"client01short".as_ref());
        assert!(matches!(Cookie::parse(&mut parser), Err(ParseError::Form(_))));
        let mut parser = WireParser::from_ref(b"client".as_ref());
        assert!(matches!(Cookie::parse(&mut parser), Err(ParseError::Form(_))));
    }

    #[test]
    fn initial_cookie_from_rng() {
        let mut rng = StepRng::new(1, 0);
        let cookie = Cookie::create_initial(&mut rng);
        assert_eq!(cookie.client().into_octets(), [1, 0, 0, 0, 0, 0, 0, 0]);
        assert!(cookie.server().is_none());
        assert_eq!(cookie.to_string(), "0100000000000000");
    }
}
