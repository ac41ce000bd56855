//! Basics.
//!
//! This module provides types and traits for working with DNS data in wire
//! format. The types allow creating such data from scratch and processing
//! it. Crucially, the module provides means to extract the data from
//! wire-format DNS messages and assemble such messages.
//!
//!
//! ## Parsing and Composing Messages
//!
//! In order to easily distinguish the process of creating and disecting
//! wire-format messages from other forms of representation conversion, we
//! use the term *parsing* for extracting data from a wire-format
//! representation and *composing* for producing such a representation.
//!
//! Both parsing and composing happen on buffers holding a complete DNS
//! message. This is necessary because domain names may be compressed by
//! referencing other parts of the message. Parsing uses the bounds-checked
//! [`Parser`][octseq::parse::Parser] from the `octseq` crate. Composing
//! happens into any type implementing the [`Composer`][wire::Composer]
//! trait. Wrapping such a target into a
//! [`NameCompressor`][name::NameCompressor] enables name compression.
//!
//!
//! # Types for DNS Data
//!
//! * [charstr] for character strings,
//! * [header] for the header of DNS messages,
//! * [iana] for the various code points defined in IANA registries,
//! * [message] for complete DNS messages,
//! * [name] for domain names and their compression,
//! * [opt] for the OPT pseudo-record and its options used in EDNS,
//! * [question] for questions,
//! * [rdata] for the traits shared by all record data types,
//! * [record] for DNS resource records, and
//! * [wire] for the wire format primitives and error types.

pub use self::charstr::CharStr;
pub use self::header::{Header, HeaderCounts};
pub use self::iana::{Class, Opcode, Rcode, Rtype};
pub use self::message::Message;
pub use self::name::{Name, NameCompressor};
pub use self::question::Question;
pub use self::rdata::{
    ComposeRecordData, ParseRecordData, RecordData, UnknownRecordData,
};
pub use self::record::{Record, Ttl};
pub use self::wire::{ComposeError, Composer, ParseError};

pub mod charstr;
pub mod header;
pub mod iana;
pub mod message;
pub mod name;
pub mod opt;
pub mod question;
pub mod rdata;
pub mod record;
pub mod wire;
