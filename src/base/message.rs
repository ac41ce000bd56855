//! Complete DNS messages.
//!
//! This module defines the [`Message`] type which holds a parsed DNS
//! message as owned values: the header, the four sections, and the two
//! pseudo-records that carry message metadata, i.e., the OPT record of
//! EDNS and the TSIG record used for transaction signatures.
//!
//! A message is created either by [parsing][Message::parse] its wire
//! format or by filling in an empty message. Its wire format is produced
//! by [`compose`][Message::compose] or [`to_vec`][Message::to_vec]. The
//! section counts of the header are always derived from the content of
//! the sections when composing.

use super::header::{Header, HeaderCounts};
use super::iana::{Class, OptRcode, Rtype};
use super::name::{Name, NameCompressor};
use super::opt::OptRecord;
use super::question::Question;
use super::record::{Record, RecordHeader, Ttl};
use super::wire::{ComposeError, Composer, ParseError, WireParser};
use super::ComposeRecordData;
use crate::rdata::{AllRecordData, Tsig};
use core::fmt;
use tracing::{debug, trace};

//------------ Message -------------------------------------------------------

/// A DNS message.
///
/// The OPT record of a message is not part of the additional section but
/// kept separately and only composed if present. Likewise, the TSIG record
/// is kept separately and is always composed as the very last record of
/// the additional section.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Message {
    /// The header minus the section counts.
    header: Header,

    /// The question section.
    questions: Vec<Question>,

    /// The answer section.
    answer: Vec<Record<AllRecordData>>,

    /// The authority section.
    authority: Vec<Record<AllRecordData>>,

    /// The additional section without the OPT and TSIG records.
    additional: Vec<Record<AllRecordData>>,

    /// The OPT record if the message uses EDNS.
    opt: Option<OptRecord>,

    /// The TSIG record if the message is signed.
    tsig: Option<Record<Tsig>>,
}

/// # Creation and Access
///
impl Message {
    /// Creates a new, empty message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new query for a single question.
    ///
    /// The message has the given ID and the RD bit set.
    #[must_use]
    pub fn query(id: u16, question: Question) -> Self {
        let mut res = Self::new();
        res.header.set_id(id);
        res.header.set_rd(true);
        res.questions.push(question);
        res
    }

    /// Returns the header of the message.
    #[must_use]
    pub fn header(&self) -> Header {
        self.header
    }

    /// Returns a mutable reference to the header of the message.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Returns the section counts as they would be composed.
    ///
    /// Counts beyond 65,535 are capped.
    #[must_use]
    pub fn counts(&self) -> HeaderCounts {
        let ar = self.additional.len()
            + usize::from(self.opt.is_some())
            + usize::from(self.tsig.is_some());
        HeaderCounts::from_counts(
            cap_count(self.questions.len()),
            cap_count(self.answer.len()),
            cap_count(self.authority.len()),
            cap_count(ar),
        )
    }

    /// Returns the question section.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Returns a mutable reference to the question section.
    pub fn questions_mut(&mut self) -> &mut Vec<Question> {
        &mut self.questions
    }

    /// Returns the first question of the message if there is one.
    #[must_use]
    pub fn first_question(&self) -> Option<&Question> {
        self.questions.first()
    }

    /// Returns the answer section.
    #[must_use]
    pub fn answer(&self) -> &[Record<AllRecordData>] {
        &self.answer
    }

    /// Returns a mutable reference to the answer section.
    pub fn answer_mut(&mut self) -> &mut Vec<Record<AllRecordData>> {
        &mut self.answer
    }

    /// Returns the authority section.
    #[must_use]
    pub fn authority(&self) -> &[Record<AllRecordData>] {
        &self.authority
    }

    /// Returns a mutable reference to the authority section.
    pub fn authority_mut(&mut self) -> &mut Vec<Record<AllRecordData>> {
        &mut self.authority
    }

    /// Returns the additional section without OPT and TSIG records.
    #[must_use]
    pub fn additional(&self) -> &[Record<AllRecordData>] {
        &self.additional
    }

    /// Returns a mutable reference to the additional section.
    pub fn additional_mut(&mut self) -> &mut Vec<Record<AllRecordData>> {
        &mut self.additional
    }

    /// Returns whether the message uses EDNS.
    #[must_use]
    pub fn is_edns0(&self) -> bool {
        self.opt.is_some()
    }

    /// Returns the OPT record if present.
    #[must_use]
    pub fn opt(&self) -> Option<&OptRecord> {
        self.opt.as_ref()
    }

    /// Returns a mutable reference to the OPT record if present.
    pub fn opt_mut(&mut self) -> Option<&mut OptRecord> {
        self.opt.as_mut()
    }

    /// Sets or removes the OPT record.
    pub fn set_opt(&mut self, opt: Option<OptRecord>) {
        self.opt = opt;
    }

    /// Returns whether the message carries a TSIG record.
    #[must_use]
    pub fn is_tsig(&self) -> bool {
        self.tsig.is_some()
    }

    /// Returns the TSIG record if present.
    #[must_use]
    pub fn tsig(&self) -> Option<&Record<Tsig>> {
        self.tsig.as_ref()
    }

    /// Sets or removes the TSIG record.
    pub fn set_tsig(&mut self, tsig: Option<Record<Tsig>>) {
        self.tsig = tsig;
    }

    /// Returns the name of the key used for the TSIG record if present.
    #[must_use]
    pub fn tsig_key_name(&self) -> Option<&Name> {
        self.tsig.as_ref().map(Record::owner)
    }

    /// Returns the extended response code of the message.
    ///
    /// If the message has no OPT record, this is the response code of the
    /// header.
    #[must_use]
    pub fn opt_rcode(&self) -> OptRcode {
        match self.opt.as_ref() {
            Some(opt) => opt.rcode(self.header.rcode()),
            None => self.header.rcode().into(),
        }
    }

    /// Sets the extended response code of the message.
    ///
    /// The upper bits end up in the OPT record which is created if
    /// necessary and if those bits aren’t all zero.
    pub fn set_opt_rcode(&mut self, rcode: OptRcode) {
        let (rcode, ext) = rcode.to_parts();
        self.header.set_rcode(rcode);
        match self.opt.as_mut() {
            Some(opt) => opt.set_ext_rcode(ext),
            None if ext != 0 => {
                let mut opt = OptRecord::new();
                opt.set_ext_rcode(ext);
                self.opt = Some(opt);
            }
            None => {}
        }
    }
}

/// # Parsing
///
impl Message {
    /// Parses a complete message from its wire format.
    ///
    /// Any data after the last record announced by the header is ignored.
    pub fn parse(octets: &[u8]) -> Result<Self, ParseError> {
        let mut parser = WireParser::from_ref(octets);
        let header = Header::parse(&mut parser)
            .map_err(|_| ParseError::TruncatedHeader)?;
        let counts = HeaderCounts::parse(&mut parser)
            .map_err(|_| ParseError::TruncatedHeader)?;
        trace!(
            id = header.id(),
            qdcount = counts.qdcount(),
            ancount = counts.ancount(),
            nscount = counts.nscount(),
            arcount = counts.arcount(),
            "parsing message"
        );

        let mut res = Message {
            header,
            ..Default::default()
        };
        for _ in 0..counts.qdcount() {
            res.questions.push(Question::parse(&mut parser)?);
        }
        for _ in 0..counts.ancount() {
            res.answer.push(Self::parse_record(&mut parser)?);
        }
        for _ in 0..counts.nscount() {
            res.authority.push(Self::parse_record(&mut parser)?);
        }
        for _ in 0..counts.arcount() {
            res.parse_additional(&mut parser)?;
        }
        if parser.remaining() > 0 {
            trace!(
                trailing = parser.remaining(),
                "ignoring data after last record"
            );
        }
        Ok(res)
    }

    /// Parses a regular record.
    fn parse_record(
        parser: &mut WireParser,
    ) -> Result<Record<AllRecordData>, ParseError> {
        Record::parse(parser)?.ok_or_else(|| {
            ParseError::form_error("unparseable record data")
        })
    }

    /// Parses the next record of the additional section.
    fn parse_additional(
        &mut self,
        parser: &mut WireParser,
    ) -> Result<(), ParseError> {
        if self.tsig.is_some() {
            debug!("record after TSIG record");
            return Err(ParseError::MalformedMessage(
                "TSIG record not last in message",
            ));
        }

        // Peek at the record type. OPT records need their raw TTL field.
        let mut peek = *parser;
        let header = RecordHeader::parse(&mut peek)?;
        match header.rtype() {
            Rtype::OPT => {
                if self.opt.is_some() {
                    debug!("more than one OPT record");
                    return Err(ParseError::MalformedMessage(
                        "multiple OPT records",
                    ));
                }
                let opt = OptRecord::parse(parser)?;
                trace!(%opt, "lifted OPT record");
                self.opt = Some(opt);
            }
            Rtype::TSIG => {
                *parser = peek;
                let tsig = header.parse_into_record::<Tsig>(parser)?.ok_or(
                    ParseError::form_error("unparseable TSIG record"),
                )?;
                trace!(key = %tsig.owner(), "lifted TSIG record");
                self.tsig = Some(tsig);
            }
            _ => {
                *parser = peek;
                let record = header
                    .parse_into_record(parser)?
                    .ok_or(ParseError::form_error("unparseable record data"))?;
                self.additional.push(record);
            }
        }
        Ok(())
    }
}

/// # Composing
///
impl Message {
    /// Appends the wire format of the message to the target.
    ///
    /// The header counts are taken from the sections. Names are compressed
    /// if the target supports it, so the target should be empty when
    /// starting to compose the message.
    pub fn compose<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        let ar = self.additional.len()
            + usize::from(self.opt.is_some())
            + usize::from(self.tsig.is_some());
        let counts = HeaderCounts::from_counts(
            check_count(self.questions.len())?,
            check_count(self.answer.len())?,
            check_count(self.authority.len())?,
            check_count(ar)?,
        );
        self.header.compose(target)?;
        counts.compose(target)?;
        for question in &self.questions {
            question.compose(target)?;
        }
        for record in self
            .answer
            .iter()
            .chain(&self.authority)
            .chain(&self.additional)
        {
            record.compose(target)?;
        }
        if let Some(opt) = self.opt.as_ref() {
            opt.compose(target)?;
        }
        if let Some(tsig) = self.tsig.as_ref() {
            compose_tsig(tsig, target)?;
        }
        Ok(())
    }

    /// Returns the wire format of the message with names compressed.
    pub fn to_vec(&self) -> Result<Vec<u8>, ComposeError> {
        let mut target = NameCompressor::new(Vec::new());
        self.compose(&mut target)?;
        Ok(target.into_target())
    }
}

/// Appends a TSIG record.
///
/// The key name is never compressed so that the record looks the same as
/// the one used when calculating the MAC.
fn compose_tsig<Target: Composer + ?Sized>(
    tsig: &Record<Tsig>,
    target: &mut Target,
) -> Result<(), ComposeError> {
    tsig.owner().compose(target)?;
    Rtype::TSIG.compose(target)?;
    Class::ANY.compose(target)?;
    Ttl::ZERO.compose(target)?;
    tsig.data().compose_len_rdata(target)
}

fn check_count(len: usize) -> Result<u16, ComposeError> {
    u16::try_from(len).map_err(|_| ComposeError::LongData)
}

fn cap_count(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}

//--- Display

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, ";; {}", self.header)?;
        if let Some(opt) = self.opt.as_ref() {
            writeln!(f, ";; {}", opt)?;
        }
        writeln!(f, ";; QUESTION SECTION:")?;
        for question in &self.questions {
            writeln!(f, ";{}", question)?;
        }
        for (title, section) in [
            ("ANSWER", &self.answer),
            ("AUTHORITY", &self.authority),
            ("ADDITIONAL", &self.additional),
        ] {
            if section.is_empty() {
                continue;
            }
            writeln!(f, "\n;; {} SECTION:", title)?;
            for record in section {
                writeln!(f, "{}", record)?;
            }
        }
        if let Some(tsig) = self.tsig.as_ref() {
            writeln!(f, "\n;; TSIG PSEUDOSECTION:\n{}", tsig)?;
        }
        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::{Rcode, TsigRcode};
    use crate::base::opt::Nsid;
    use crate::rdata::{Mx, Time48, A};
    use core::str::FromStr;
    use std::net::Ipv4Addr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    #[test]
    fn parse_simple_query() {
        let mut data = Vec::from(
            &b"\x00\x01\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00"[..],
        );
        data.extend_from_slice(b"\x07example\x03com\x00\x00\x01\x00\x01");
        let msg = Message::parse(&data).unwrap();
        assert_eq!(msg.header().id(), 1);
        assert!(msg.header().rd());
        assert!(!msg.header().qr());
        assert_eq!(msg.questions().len(), 1);
        let question = &msg.questions()[0];
        assert_eq!(question.qname(), &name("example.com"));
        assert_eq!(question.qtype(), Rtype::A);
        assert_eq!(question.qclass(), Class::IN);
        assert!(msg.answer().is_empty());
        assert!(msg.authority().is_empty());
        assert!(msg.additional().is_empty());
        assert!(!msg.is_edns0());
        assert!(!msg.is_tsig());

        assert_eq!(msg.to_vec().unwrap(), data);
    }

    #[test]
    fn short_header() {
        assert_eq!(
            Message::parse(b"\x00\x01\x01\x00\x00"),
            Err(ParseError::TruncatedHeader)
        );
    }

    #[test]
    fn truncated_question() {
        let data = b"\x00\x01\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\
                     \x07example\x03com\x00\x00";
        assert_eq!(
            Message::parse(data.as_ref()),
            Err(ParseError::TruncatedQuestion)
        );
    }

    #[test]
    fn truncated_record() {
        let data = b"\x00\x01\x81\x00\x00\x00\x00\x01\x00\x00\x00\x00\
                     \x00\x00\x01\x00";
        assert_eq!(
            Message::parse(data.as_ref()),
            Err(ParseError::TruncatedRecord)
        );
        let data = b"\x00\x01\x81\x00\x00\x00\x00\x01\x00\x00\x00\x00\
                     \x00\x00\x01\x00\x01\x00\x00\x00\x00\x00\x04\xc0\x00";
        assert_eq!(
            Message::parse(data.as_ref()),
            Err(ParseError::TruncatedRecordData)
        );
    }

    fn response() -> Message {
        let mut msg = Message::query(
            0x1234,
            Question::new_in(name("example.com"), Rtype::MX),
        );
        msg.header_mut().set_qr(true);
        msg.answer_mut().push(Record::new(
            name("example.com"),
            Class::IN,
            Ttl::HOUR,
            Mx::new(10, name("mail.example.com")).into(),
        ));
        msg.additional_mut().push(Record::new(
            name("mail.example.com"),
            Class::IN,
            Ttl::HOUR,
            A::new(Ipv4Addr::new(192, 0, 2, 1)).into(),
        ));
        msg
    }

    #[test]
    fn compose_parse_with_opt() {
        let mut msg = response();
        let mut opt = OptRecord::new();
        opt.push(Nsid::empty()).unwrap();
        msg.set_opt(Some(opt));
        msg.set_opt_rcode(OptRcode::BADVERS);

        let wire = msg.to_vec().unwrap();
        let counts = HeaderCounts::parse(&mut WireParser::from_ref(
            &wire[Header::COMPOSE_LEN..],
        ))
        .unwrap();
        assert_eq!(counts.ancount(), 1);
        assert_eq!(counts.arcount(), 2);

        let parsed = Message::parse(&wire).unwrap();
        assert_eq!(parsed, msg);
        assert_eq!(parsed.additional().len(), 1);
        assert_eq!(parsed.opt_rcode(), OptRcode::BADVERS);
        assert_eq!(parsed.header().rcode(), Rcode::NOERROR);
        assert!(parsed.opt().unwrap().opt().nsid().is_some());
    }

    #[test]
    fn names_are_compressed() {
        let wire = response().to_vec().unwrap();
        // The question name at offset 12 is referenced by a pointer.
        assert!(wire.windows(2).any(|w| w == b"\xc0\x0c"));
        let mut plain = Vec::new();
        response().compose(&mut plain).unwrap();
        assert!(wire.len() < plain.len());
        assert_eq!(Message::parse(&plain).unwrap(), response());
    }

    fn tsig_record() -> Record<Tsig> {
        Record::new(
            name("key.example"),
            Class::ANY,
            Ttl::ZERO,
            Tsig::new(
                name("hmac-sha256"),
                Time48::from_u64(1_700_000_000),
                300,
                vec![0xAB; 32],
                0x1234,
                TsigRcode::NOERROR,
                Vec::new(),
            )
            .unwrap(),
        )
    }

    #[test]
    fn tsig_is_lifted() {
        let mut msg = response();
        msg.set_tsig(Some(tsig_record()));
        let wire = msg.to_vec().unwrap();
        let parsed = Message::parse(&wire).unwrap();
        assert!(parsed.is_tsig());
        assert_eq!(parsed.additional().len(), 1);
        assert_eq!(parsed.tsig_key_name(), Some(&name("key.example")));
        assert_eq!(parsed.tsig().unwrap().data().mac(), &[0xAB; 32][..]);
    }

    #[test]
    fn tsig_not_last() {
        let mut msg = response();
        msg.set_tsig(Some(tsig_record()));
        let mut wire = msg.to_vec().unwrap();

        // Append another A record and bump ARCOUNT.
        wire.extend_from_slice(
            b"\x00\x00\x01\x00\x01\x00\x00\x00\x00\x00\x04\xc0\x00\x02\x02",
        );
        wire[11] += 1;
        assert!(matches!(
            Message::parse(&wire),
            Err(ParseError::MalformedMessage(_))
        ));
    }

    #[test]
    fn duplicate_opt() {
        let mut wire = Vec::from(
            &b"\x00\x01\x01\x00\x00\x00\x00\x00\x00\x00\x00\x02"[..],
        );
        let mut opt = Vec::new();
        OptRecord::new().compose(&mut opt).unwrap();
        wire.extend_from_slice(&opt);
        wire.extend_from_slice(&opt);
        assert!(matches!(
            Message::parse(&wire),
            Err(ParseError::MalformedMessage(_))
        ));
    }

    #[test]
    fn opt_rcode_without_opt() {
        let mut msg = Message::new();
        msg.set_opt_rcode(OptRcode::from_int(3));
        assert!(!msg.is_edns0());
        assert_eq!(msg.opt_rcode(), OptRcode::from_int(3));
        msg.set_opt_rcode(OptRcode::BADCOOKIE);
        assert!(msg.is_edns0());
        assert_eq!(msg.opt_rcode(), OptRcode::BADCOOKIE);
    }
}
