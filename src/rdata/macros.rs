//! Macros for use in rdata definitions.
//!
//! These macros are not public but are used by the super module only. They
//! are here so that `mod.rs` doesn’t become too unwieldly.

/// Creates the `AllRecordData` enum over all implemented types.
///
/// Each entry names the enum variant, the type of its data, and the record
/// type constant. The same data type may appear under several record types.
/// Parsing picks the first variant whose record type matches.
macro_rules! rdata_types {
    ( $(
        $(#[$attr:meta])*
        $variant:ident($ty:ty) => $rtype:ident,
    )* ) => {
        //------------ AllRecordData -----------------------------------------

        /// Record data for all implemented record types.
        ///
        /// This is a closed sum over one variant per record type plus the
        /// `Unknown` variant which keeps the data of all other types as
        /// opaque octets. The variant determines the record type, so data
        /// types shared by several record types, such as [`Dnskey`] for
        /// both DNSKEY and KEY, are tagged correctly.
        #[derive(Clone, Debug, Eq, PartialEq)]
        pub enum AllRecordData {
            $(
                $(#[$attr])*
                $variant($ty),
            )*

            /// Data of any other record type.
            Unknown($crate::base::rdata::UnknownRecordData),
        }

        //--- RecordData, ComposeRecordData, and ParseRecordData

        impl $crate::base::rdata::RecordData for AllRecordData {
            fn rtype(&self) -> $crate::base::iana::Rtype {
                match *self {
                    $(
                        AllRecordData::$variant(_) => {
                            $crate::base::iana::Rtype::$rtype
                        }
                    )*
                    AllRecordData::Unknown(ref inner) => inner.rtype(),
                }
            }
        }

        impl $crate::base::rdata::ComposeRecordData for AllRecordData {
            fn compose_len(&self) -> u16 {
                match *self {
                    $(
                        AllRecordData::$variant(ref inner) => {
                            inner.compose_len()
                        }
                    )*
                    AllRecordData::Unknown(ref inner) => inner.compose_len(),
                }
            }

            fn canonical_len(
                &self
            ) -> Result<u16, $crate::base::wire::ComposeError> {
                match *self {
                    $(
                        AllRecordData::$variant(ref inner) => {
                            inner.canonical_len()
                        }
                    )*
                    AllRecordData::Unknown(ref inner) => {
                        inner.canonical_len()
                    }
                }
            }

            fn compose_rdata<
                Target: $crate::base::wire::Composer + ?Sized
            >(
                &self,
                target: &mut Target,
            ) -> Result<(), $crate::base::wire::ComposeError> {
                match *self {
                    $(
                        AllRecordData::$variant(ref inner) => {
                            inner.compose_rdata(target)
                        }
                    )*
                    AllRecordData::Unknown(ref inner) => {
                        inner.compose_rdata(target)
                    }
                }
            }

            fn compose_canonical_rdata<
                Target: $crate::base::wire::Composer + ?Sized
            >(
                &self,
                target: &mut Target,
            ) -> Result<(), $crate::base::wire::ComposeError> {
                match *self {
                    $(
                        AllRecordData::$variant(ref inner) => {
                            inner.compose_canonical_rdata(target)
                        }
                    )*
                    AllRecordData::Unknown(ref inner) => {
                        inner.compose_canonical_rdata(target)
                    }
                }
            }
        }

        impl $crate::base::rdata::ParseRecordData for AllRecordData {
            fn parse_rdata(
                rtype: $crate::base::iana::Rtype,
                parser: &mut $crate::base::wire::WireParser,
            ) -> Result<Option<Self>, $crate::base::wire::ParseError> {
                $(
                    if rtype == $crate::base::iana::Rtype::$rtype {
                        return <$ty>::parse(parser).map(|data| {
                            Some(AllRecordData::$variant(data))
                        })
                    }
                )*
                Ok(Some(AllRecordData::Unknown(
                    $crate::base::rdata::UnknownRecordData::parse(
                        rtype, parser
                    )
                )))
            }
        }

        //--- Display

        impl core::fmt::Display for AllRecordData {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                match *self {
                    $(
                        AllRecordData::$variant(ref inner) => {
                            core::fmt::Display::fmt(inner, f)
                        }
                    )*
                    AllRecordData::Unknown(ref inner) => {
                        core::fmt::Display::fmt(inner, f)
                    }
                }
            }
        }
    }
}

/// Creates a record data type consisting of a single domain name.
///
/// The `compress` argument states whether the name may be compressed when
/// composing. Only the types defined in RFC 1035 may do so.
macro_rules! name_type {
    (
        $(#[$attr:meta])*
        ( $target:ident, $rtype:ident, $field:ident, $compress:expr )
    ) => {
        $(#[$attr])*
        #[derive(Clone, Debug, Eq, Hash, PartialEq)]
        pub struct $target {
            $field: $crate::base::name::Name,
        }

        impl $target {
            /// Creates new record data from the domain name.
            #[must_use]
            pub fn new($field: $crate::base::name::Name) -> Self {
                $target { $field }
            }

            /// Returns a reference to the domain name.
            #[must_use]
            pub fn $field(&self) -> &$crate::base::name::Name {
                &self.$field
            }

            /// Converts the record data into the domain name.
            #[must_use]
            pub fn into_name(self) -> $crate::base::name::Name {
                self.$field
            }

            /// Takes the record data from the parser.
            pub fn parse(
                parser: &mut $crate::base::wire::WireParser,
            ) -> Result<Self, $crate::base::wire::ParseError> {
                $crate::base::name::Name::parse(parser).map(Self::new)
            }
        }

        //--- From and FromStr

        impl From<$crate::base::name::Name> for $target {
            fn from(name: $crate::base::name::Name) -> Self {
                Self::new(name)
            }
        }

        impl core::str::FromStr for $target {
            type Err = $crate::base::name::NameError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$crate::base::name::Name as core::str::FromStr>::from_str(s)
                    .map(Self::new)
            }
        }

        //--- RecordData, ComposeRecordData, and ParseRecordData

        impl $crate::base::rdata::RecordData for $target {
            fn rtype(&self) -> $crate::base::iana::Rtype {
                $crate::base::iana::Rtype::$rtype
            }
        }

        impl $crate::base::rdata::ComposeRecordData for $target {
            fn compose_len(&self) -> u16 {
                self.$field.compose_len()
            }

            fn compose_rdata<
                Target: $crate::base::wire::Composer + ?Sized
            >(
                &self,
                target: &mut Target,
            ) -> Result<(), $crate::base::wire::ComposeError> {
                if $compress {
                    target.append_compressed_name(&self.$field)?;
                } else {
                    self.$field.compose(target)?;
                }
                Ok(())
            }

            fn compose_canonical_rdata<
                Target: $crate::base::wire::Composer + ?Sized
            >(
                &self,
                target: &mut Target,
            ) -> Result<(), $crate::base::wire::ComposeError> {
                self.$field.compose_canonical(target)?;
                Ok(())
            }
        }

        impl $crate::base::rdata::ParseRecordData for $target {
            fn parse_rdata(
                rtype: $crate::base::iana::Rtype,
                parser: &mut $crate::base::wire::WireParser,
            ) -> Result<Option<Self>, $crate::base::wire::ParseError> {
                if rtype == $crate::base::iana::Rtype::$rtype {
                    Self::parse(parser).map(Some)
                } else {
                    Ok(None)
                }
            }
        }

        //--- Display

        impl core::fmt::Display for $target {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                write!(f, "{}.", self.$field)
            }
        }
    }
}
