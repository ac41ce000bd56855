//! Resource record data.
//!
//! Each resource record type has it’s own definition of the content and
//! formatting of its data. This module provides the basics for implementing
//! specific types for this record data. The concrete implementations for
//! well-known record types live in the top-level [`crate::rdata`] module.
//!
//! There are three traits herein: Any type that represents record data
//! implements [`RecordData`]. Such a type can be added to a message as part
//! of a record if it also implements [`ComposeRecordData`]. If it can be
//! parsed from a message, it implements [`ParseRecordData`].
//!
//! The module also provides a type, [`UnknownRecordData`], that can be used
//! to deal with record types whose specification is not known (or has not
//! been implemented yet).

use super::iana::Rtype;
use super::wire::{
    compose_len_prefixed, parse_remaining, ComposeError, Composer,
    ParseError, WireParser,
};
use bytes::Bytes;
use core::fmt;

//----------- RecordData -----------------------------------------------------

/// A type that represents record data.
///
/// The type needs to be able to to be able to provide the record type of a
/// record with a value’s data via the [`rtype`][Self::rtype] method.
pub trait RecordData {
    /// Returns the record type associated with this record data instance.
    ///
    /// This is a method rather than an associated function to allow one
    /// type to be used for several real record types.
    fn rtype(&self) -> Rtype;
}

impl<'a, T: RecordData> RecordData for &'a T {
    fn rtype(&self) -> Rtype {
        (*self).rtype()
    }
}

//----------- ComposeRecordData ----------------------------------------------

/// A type of record data that can be composed.
pub trait ComposeRecordData: RecordData {
    /// Returns the length of the uncompressed wire format of the data.
    fn compose_len(&self) -> u16;

    /// Returns the length of the canonical wire format of the data.
    ///
    /// Since canonicalization only lowercases letters, this is the same as
    /// [`compose_len`][Self::compose_len] for all types that can be brought
    /// into canonical form at all.
    fn canonical_len(&self) -> Result<u16, ComposeError> {
        Ok(self.compose_len())
    }

    /// Appends the wire format of the record data into `target`.
    ///
    /// Domain names embedded in the data are compressed if the type is
    /// one of the well-known types from RFC 1035 and `target` supports
    /// compression.
    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError>;

    /// Appends the canonical wire format of the record data into `target`.
    ///
    /// This is the form defined in RFC 4034, section 6.2: no compression
    /// and all embedded names of the types listed there lowercased.
    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError>;

    /// Appends the record data prefixed with its length.
    fn compose_len_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        compose_len_prefixed(target, |target| self.compose_rdata(target))
    }

    /// Appends the canonical record data prefixed with its length.
    fn compose_canonical_len_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        compose_len_prefixed(target, |target| {
            self.compose_canonical_rdata(target)
        })
    }
}

impl<'a, T: ComposeRecordData> ComposeRecordData for &'a T {
    fn compose_len(&self) -> u16 {
        (*self).compose_len()
    }

    fn canonical_len(&self) -> Result<u16, ComposeError> {
        (*self).canonical_len()
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        (*self).compose_rdata(target)
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        (*self).compose_canonical_rdata(target)
    }
}

//------------ ParseRecordData -----------------------------------------------

/// A record data type that can be parsed from a message.
pub trait ParseRecordData: RecordData + Sized {
    /// Parses the record data.
    ///
    /// The record data is for a record of type `rtype`. The function may
    /// decide whether it wants to parse data for that type. It should return
    /// `Ok(None)` if it doesn’t.
    ///
    /// The `parser` is positioned at the beginning of the record data and is
    /// limited to the length of the data. It still covers the complete
    /// message, so compression pointers can be followed. The caller checks
    /// that all data has been consumed.
    ///
    /// If the function doesn’t want to process the data, it must not touch
    /// the parser.
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError>;
}

//------------ UnknownRecordData ---------------------------------------------

/// A type for parsing any type of record data.
///
/// This type accepts any record type and stores the plain, unparsed record
/// data as an octets sequence.
///
/// Because some record types allow compressed domain names in their record
/// data, this type cannot be used safely with these record types. For these
/// record types, the structure of the content needs to be known.
///
/// For the same reason, the data cannot be brought into canonical form:
/// [`ComposeRecordData::compose_canonical_rdata`] fails with
/// [`ComposeError::UnsupportedType`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct UnknownRecordData {
    /// The record type of this data.
    rtype: Rtype,

    /// The record data.
    data: Bytes,
}

impl UnknownRecordData {
    /// Creates generic record data from a bytes value.
    ///
    /// Fails if the data is longer than 65,535 octets.
    pub fn from_octets(
        rtype: Rtype,
        data: impl Into<Bytes>,
    ) -> Result<Self, ComposeError> {
        let data = data.into();
        if data.len() > usize::from(u16::MAX) {
            return Err(ComposeError::LongData);
        }
        Ok(UnknownRecordData { rtype, data })
    }

    /// Returns the record type this data is for.
    #[must_use]
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Returns a reference to the record data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    /// Takes the remaining data of the parser.
    pub fn parse(rtype: Rtype, parser: &mut WireParser) -> Self {
        UnknownRecordData {
            rtype,
            data: parse_remaining(parser).into(),
        }
    }
}

//--- RecordData, ComposeRecordData, and ParseRecordData

impl RecordData for UnknownRecordData {
    fn rtype(&self) -> Rtype {
        self.rtype
    }
}

impl ComposeRecordData for UnknownRecordData {
    fn compose_len(&self) -> u16 {
        self.data.len() as u16
    }

    fn canonical_len(&self) -> Result<u16, ComposeError> {
        Err(ComposeError::UnsupportedType(self.rtype))
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        target.append_slice(self.data.as_ref())?;
        Ok(())
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        _target: &mut Target,
    ) -> Result<(), ComposeError> {
        Err(ComposeError::UnsupportedType(self.rtype))
    }
}

impl ParseRecordData for UnknownRecordData {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        Ok(Some(Self::parse(rtype, parser)))
    }
}

//--- Display

impl fmt::Display for UnknownRecordData {
    /// Formats the data in the generic format of RFC 3597.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\\# {}", self.data.len())?;
        for ch in self.data.iter() {
            write!(f, " {:02x}", *ch)?;
        }
        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use core::fmt::Debug;

    /// Check that `compose_len` produces the correct length.
    ///
    /// The test composes `data` both regularly and canonically and checks
    /// that the length of the composed data matches what `compose_len`
    /// returns.
    pub fn test_compose_len<R: ComposeRecordData>(data: R) {
        let mut buf = Vec::new();
        data.compose_rdata(&mut buf).unwrap();
        assert_eq!(buf.len(), usize::from(data.compose_len()));
        buf.clear();
        data.compose_canonical_rdata(&mut buf).unwrap();
        assert_eq!(buf.len(), usize::from(data.canonical_len().unwrap()));
    }

    /// Check that composing and parsing are reverse operations.
    pub fn test_compose_parse<In, F, Out>(data: &In, parse: F)
    where
        In: ComposeRecordData + PartialEq<Out> + Debug,
        F: FnOnce(&mut WireParser) -> Result<Out, ParseError>,
        Out: Debug,
    {
        let mut buf = Vec::new();
        data.compose_rdata(&mut buf).unwrap();
        let mut parser = WireParser::from_ref(buf.as_slice());
        let parsed = (parse)(&mut parser).unwrap();
        assert_eq!(parser.remaining(), 0);
        assert_eq!(*data, parsed);
    }

    #[test]
    fn unknown_cannot_canonicalize() {
        let data =
            UnknownRecordData::from_octets(Rtype::from_int(65280), &b"ab"[..])
                .unwrap();
        let mut buf = Vec::new();
        data.compose_rdata(&mut buf).unwrap();
        assert_eq!(buf, b"ab");
        assert_eq!(
            data.compose_canonical_rdata(&mut Vec::new()),
            Err(ComposeError::UnsupportedType(Rtype::from_int(65280)))
        );
        assert_eq!(data.to_string(), "\\# 2 61 62");
    }
}
