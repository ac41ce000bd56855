//! Creating and consuming data in wire format.
//!
//! Parsing happens through the bounds-checked [`Parser`] of the `octseq`
//! crate. Every multi-octet read checks the remaining length first, so a
//! short or malicious message results in an error rather than a read past
//! the end of the buffer.
//!
//! Composing happens into any type implementing [`Composer`], an
//! append-only octets builder that may optionally support domain name
//! compression.

use super::iana::Rtype;
use super::name::{Name, NameError};
use core::fmt;
use octseq::builder::{OctetsBuilder, ShortBuf, Truncate};
use octseq::parse::{Parser, ShortInput};

//------------ WireParser ----------------------------------------------------

/// The parser used for all wire format data.
///
/// The parser always covers a complete message. Parsers limited to the
/// data of a single record are derived via `Parser::parse_parser` and keep
/// the absolute positions, so compression pointers can still be followed.
pub type WireParser<'a> = Parser<'a, [u8]>;

/// Takes `len` octets from the parser and returns a copy.
pub fn parse_vec(
    parser: &mut WireParser,
    len: usize,
) -> Result<Vec<u8>, ParseError> {
    let res = parser.peek(len)?.to_vec();
    parser.advance(len)?;
    Ok(res)
}

/// Takes all remaining octets of the parser and returns a copy.
pub fn parse_remaining(parser: &mut WireParser) -> Vec<u8> {
    let res = parser.peek_all().to_vec();
    parser.advance_to_end();
    res
}

/// Parses an octet sequence prefixed by a single length octet.
pub fn parse_u8_prefixed(
    parser: &mut WireParser,
) -> Result<Vec<u8>, ParseError> {
    let len = parser.parse_u8()?;
    parse_vec(parser, usize::from(len))
}

/// Parses an octet sequence prefixed by a 16 bit length.
pub fn parse_u16_prefixed(
    parser: &mut WireParser,
) -> Result<Vec<u8>, ParseError> {
    let len = parser.parse_u16_be()?;
    parse_vec(parser, usize::from(len))
}

//------------ compose functions ---------------------------------------------

/// Composes some data prefixed by its length as a 16 bit value.
///
/// If `op` fails or the data turns out to be longer than 0xFFFF octets,
/// the target is truncated back to where it was before and an error is
/// returned.
pub fn compose_len_prefixed<Target, F>(
    target: &mut Target,
    op: F,
) -> Result<(), ComposeError>
where
    Target: Composer + ?Sized,
    F: FnOnce(&mut Target) -> Result<(), ComposeError>,
{
    let start = target.as_ref().len();
    target.append_slice(&[0; 2])?;
    let pos = target.as_ref().len();
    if let Err(err) = op(target) {
        target.truncate(start);
        return Err(err);
    }
    let len = match u16::try_from(target.as_ref().len() - pos) {
        Ok(len) => len,
        Err(_) => {
            target.truncate(start);
            return Err(ComposeError::LongData);
        }
    };
    target.as_mut()[start..pos].copy_from_slice(&len.to_be_bytes());
    Ok(())
}

/// Composes an octet sequence prefixed by a single length octet.
pub fn compose_u8_prefixed<Target: OctetsBuilder + ?Sized>(
    target: &mut Target,
    data: &[u8],
) -> Result<(), ComposeError> {
    let len = u8::try_from(data.len()).map_err(|_| ComposeError::LongData)?;
    target.append_slice(&[len])?;
    target.append_slice(data)?;
    Ok(())
}

/// Composes an octet sequence prefixed by a 16 bit length.
pub fn compose_u16_prefixed<Target: OctetsBuilder + ?Sized>(
    target: &mut Target,
    data: &[u8],
) -> Result<(), ComposeError> {
    let len =
        u16::try_from(data.len()).map_err(|_| ComposeError::LongData)?;
    target.append_slice(&len.to_be_bytes())?;
    target.append_slice(data)?;
    Ok(())
}

//------------ Composer ------------------------------------------------------

/// An octets builder that can be used to compose DNS data.
pub trait Composer:
    OctetsBuilder + AsRef<[u8]> + AsMut<[u8]> + Truncate
{
    /// Appends a domain name using name compression if supported.
    ///
    /// Domain name compression attempts to lower the size of a DNS message
    /// by avoiding to include repeated domain name suffixes. Instead of
    /// adding the full suffix, a pointer to the location of the previous
    /// occurence is added.
    ///
    /// The trait provides a default implementation which simply appends the
    /// name uncompressed.
    fn append_compressed_name(
        &mut self,
        name: &Name,
    ) -> Result<(), Self::AppendError> {
        name.compose(self)
    }

    /// Returns whether the composer performs name compression.
    fn can_compress(&self) -> bool {
        false
    }
}

impl Composer for Vec<u8> {}

impl Composer for bytes::BytesMut {}

//------------ Compose -------------------------------------------------------

/// A type that can be composed into wire format.
pub trait Compose {
    /// The length of the wire representation.
    const COMPOSE_LEN: u16 = 0;

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError>;
}

impl<'a, T: Compose + ?Sized> Compose for &'a T {
    const COMPOSE_LEN: u16 = T::COMPOSE_LEN;

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        (*self).compose(target)
    }
}

impl Compose for u8 {
    const COMPOSE_LEN: u16 = 1;

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&[*self])
    }
}

macro_rules! compose_to_be_bytes {
    ( $type:ident ) => {
        impl Compose for $type {
            const COMPOSE_LEN: u16 = ($type::BITS >> 3) as u16;

            fn compose<Target: OctetsBuilder + ?Sized>(
                &self,
                target: &mut Target,
            ) -> Result<(), Target::AppendError> {
                target.append_slice(&self.to_be_bytes())
            }
        }
    };
}

compose_to_be_bytes!(i16);
compose_to_be_bytes!(u16);
compose_to_be_bytes!(i32);
compose_to_be_bytes!(u32);

//============ Error Types ===================================================

//------------ ComposeError --------------------------------------------------

/// An error happened while composing data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ComposeError {
    /// Some length-prefixed data was too long for its prefix.
    LongData,

    /// The target ran out of space.
    ShortBuf,

    /// Record data of an unknown type can’t be brought into canonical form.
    ///
    /// Since the structure of the data is unknown, so is whether it
    /// contains any domain names that would need to be lowercased.
    UnsupportedType(Rtype),
}

impl<T: Into<ShortBuf>> From<T> for ComposeError {
    fn from(_: T) -> Self {
        ComposeError::ShortBuf
    }
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ComposeError::LongData => f.write_str("long data"),
            ComposeError::ShortBuf => f.write_str("short buffer"),
            ComposeError::UnsupportedType(rtype) => {
                write!(f, "cannot canonicalize record data of type {}", rtype)
            }
        }
    }
}

impl std::error::Error for ComposeError {}

//------------ ParseError ----------------------------------------------------

/// An error happened while parsing data.
///
/// All of these are local to the message being parsed. The caller is
/// expected to answer with FORMERR or drop the message and carry on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// An attempt was made to go beyond the end of the parser.
    ShortInput,

    /// The message is shorter than the twelve octet header.
    TruncatedHeader,

    /// The message ended inside a question.
    TruncatedQuestion,

    /// The message ended inside the fixed part of a resource record.
    TruncatedRecord,

    /// The record data is shorter than its content requires or its
    /// length exceeds the message.
    TruncatedRecordData,

    /// A domain name was malformed.
    MalformedName(NameError),

    /// A type bitmap of an NSEC or NSEC3 record was malformed.
    MalformedBitmap,

    /// The message violates the structure rules of the protocol.
    MalformedMessage(&'static str),

    /// A formatting error occurred.
    Form(FormError),
}

impl ParseError {
    /// Creates a new parse error as a form error with the given message.
    pub fn form_error(msg: &'static str) -> Self {
        FormError::new(msg).into()
    }

    /// Returns whether the error was caused by running out of data.
    pub fn is_truncated(self) -> bool {
        matches!(
            self,
            ParseError::ShortInput
                | ParseError::TruncatedHeader
                | ParseError::TruncatedQuestion
                | ParseError::TruncatedRecord
                | ParseError::TruncatedRecordData
        )
    }

    /// Replaces a generic short input error with a more specific one.
    pub(crate) fn or_short(self, short: ParseError) -> Self {
        match self {
            ParseError::ShortInput => short,
            other => other,
        }
    }
}

//--- From

impl From<ShortInput> for ParseError {
    fn from(_: ShortInput) -> Self {
        ParseError::ShortInput
    }
}

impl From<FormError> for ParseError {
    fn from(err: FormError) -> Self {
        ParseError::Form(err)
    }
}

impl From<NameError> for ParseError {
    fn from(err: NameError) -> Self {
        ParseError::MalformedName(err)
    }
}

//--- Display and Error

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::ShortInput => f.write_str("unexpected end of input"),
            ParseError::TruncatedHeader => f.write_str("truncated header"),
            ParseError::TruncatedQuestion => {
                f.write_str("truncated question")
            }
            ParseError::TruncatedRecord => f.write_str("truncated record"),
            ParseError::TruncatedRecordData => {
                f.write_str("truncated record data")
            }
            ParseError::MalformedName(ref err) => {
                write!(f, "malformed domain name: {}", err)
            }
            ParseError::MalformedBitmap => {
                f.write_str("malformed type bitmap")
            }
            ParseError::MalformedMessage(msg) => {
                write!(f, "malformed message: {}", msg)
            }
            ParseError::Form(ref err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ParseError {}

//------------ FormError -----------------------------------------------------

/// A formatting error occured.
///
/// This is a generic error for all kinds of error cases that result in data
/// not being accepted. For diagnostics, the error is being given a static
/// string describing the error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FormError(&'static str);

impl FormError {
    /// Creates a new form error value with the given diagnostics string.
    pub fn new(msg: &'static str) -> Self {
        FormError(msg)
    }
}

//--- Display and Error

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for FormError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn len_prefixed() {
        let mut buf = vec![0xAA];
        compose_len_prefixed(&mut buf, |target| {
            target.append_slice(b"foo")?;
            Ok(())
        })
        .unwrap();
        assert_eq!(buf, b"\xAA\x00\x03foo");
    }

    #[test]
    fn len_prefixed_failure_truncates() {
        let mut buf = vec![0xAA];
        let res = compose_len_prefixed(&mut buf, |target| {
            target.append_slice(b"foo")?;
            Err(ComposeError::UnsupportedType(Rtype::NULL))
        });
        assert_eq!(res, Err(ComposeError::UnsupportedType(Rtype::NULL)));
        assert_eq!(buf, b"\xAA");
    }

    #[test]
    fn len_prefixed_too_long() {
        let mut buf = Vec::new();
        let res = compose_len_prefixed(&mut buf, |target| {
            target.append_slice(&[0u8; 0x10000])?;
            Ok(())
        });
        assert_eq!(res, Err(ComposeError::LongData));
        assert!(buf.is_empty());
    }

    #[test]
    fn parse_helpers_check_length() {
        let data = b"\x03foo\x00\x05ab";
        let mut parser = WireParser::from_ref(data.as_ref());
        assert_eq!(parse_u8_prefixed(&mut parser).unwrap(), b"foo");
        assert_eq!(
            parse_u16_prefixed(&mut parser),
            Err(ParseError::ShortInput)
        );
    }

    #[test]
    fn short_input_specialization() {
        assert_eq!(
            ParseError::ShortInput.or_short(ParseError::TruncatedQuestion),
            ParseError::TruncatedQuestion
        );
        assert_eq!(
            ParseError::MalformedBitmap.or_short(ParseError::TruncatedRecord),
            ParseError::MalformedBitmap
        );
        assert!(ParseError::TruncatedRecordData.is_truncated());
    }
}
