//! Record data from [RFC 6698]: TLSA records.
//!
//! [RFC 6698]: https://tools.ietf.org/html/rfc6698

use super::dnssec::write_hex;
use crate::base::iana::Rtype;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{
    parse_remaining, ComposeError, Composer, ParseError, WireParser,
};
use bytes::Bytes;
use core::fmt;

//------------ Tlsa ----------------------------------------------------------

/// TLSA record data.
///
/// Associates a TLS server certificate or public key with the domain name
/// where the record is found.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Tlsa {
    cert_usage: u8,
    selector: u8,
    matching_type: u8,
    data: Bytes,
}

impl Tlsa {
    pub fn new(
        cert_usage: u8,
        selector: u8,
        matching_type: u8,
        data: impl Into<Bytes>,
    ) -> Result<Self, ComposeError> {
        let data = data.into();
        if data.len() > usize::from(u16::MAX) - 3 {
            return Err(ComposeError::LongData);
        }
        Ok(Tlsa {
            cert_usage,
            selector,
            matching_type,
            data,
        })
    }

    /// The provided association that will be used to match the
    /// certificate presented in the TLS handshake.
    #[must_use]
    pub fn cert_usage(&self) -> u8 {
        self.cert_usage
    }

    /// Which part of the TLS certificate will be matched.
    #[must_use]
    pub fn selector(&self) -> u8 {
        self.selector
    }

    /// How the certificate association is presented.
    #[must_use]
    pub fn matching_type(&self) -> u8 {
        self.matching_type
    }

    /// The certificate association data to be matched.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        Ok(Tlsa {
            cert_usage: parser.parse_u8()?,
            selector: parser.parse_u8()?,
            matching_type: parser.parse_u8()?,
            data: parse_remaining(parser).into(),
        })
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Tlsa {
    fn rtype(&self) -> Rtype {
        Rtype::TLSA
    }
}

impl ParseRecordData for Tlsa {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::TLSA {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Tlsa {
    fn compose_len(&self) -> u16 {
        3 + self.data.len() as u16
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        target.append_slice(&[
            self.cert_usage,
            self.selector,
            self.matching_type,
        ])?;
        target.append_slice(&self.data)?;
        Ok(())
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.compose_rdata(target)
    }
}

//--- Display

impl fmt::Display for Tlsa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} ",
            self.cert_usage, self.selector, self.matching_type
        )?;
        write_hex(f, &self.data)
    }
}

//============ Testing =======================================================
