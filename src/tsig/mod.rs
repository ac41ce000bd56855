//! Support for TSIG.
//!
//! This module provides support for signing and verifying DNS messages with
//! TSIG as defined in [RFC 8945].
//!
//! TSIG is intended to provide authentication for message exchanges. Messages
//! are signed using a secret key shared between the two participants. The
//! sender calculates a MAC over the message it is about to send and adds it
//! in a record of type [TSIG] as the very last record of the additional
//! section. The receiver recalculates the MAC with the same key and compares.
//! When answering a signed request, the request’s MAC is included in the
//! calculation in order to bind request and answer together.
//!
//! The SHA-based algorithms are implemented with `ring`. HMAC-MD5, which
//! RFC 8945 still requires and older peers often only offer, comes from
//! the `hmac` and `md-5` crates since `ring` has no MD5. You can choose
//! the algorithm to use for your keys via the [`Algorithm`] enum.
//!
//! Keys are managed via the [`Key`] type. While technically the actual
//! octets of the key can be used with any algorithm, we tie together a key
//! and the algorithm to use it for. In addition, each key also has a name,
//! which is in fact a domain name. [`Key`] values also manage the signature
//! truncation allowed by RFC 8945.
//!
//! All functions in this module work on the wire format of messages. A
//! message is signed by [`append_tsig`] after it has been composed.
//! [`verify_message`] checks the TSIG record of a received message against
//! the keys of a [`KeyStore`] and reports the outcome as a [`TsigRcode`].
//!
//! [RFC 8945]: https://tools.ietf.org/html/rfc8945
//! [TSIG]: crate::rdata::Tsig

use crate::base::header::{Header, HeaderCounts};
use crate::base::iana::{Class, Rtype, TsigRcode};
use crate::base::name::Name;
use crate::base::question::Question;
use crate::base::rdata::ComposeRecordData;
use crate::base::record::{Record, RecordHeader, Ttl};
use crate::base::wire::{ComposeError, ParseError, WireParser};
use crate::rdata::tsig::{Time48, Tsig};
use bytes::{Bytes, BytesMut};
use ::hmac::{Hmac, Mac};
use core::{cmp, fmt, str};
use md5::Md5;
use ring::{constant_time, hmac, rand};
use std::collections::HashMap;
use tracing::{debug, trace};

/// The length of the message header including the section counts.
const HEADER_LEN: usize = Header::COMPOSE_LEN + HeaderCounts::COMPOSE_LEN;

//------------ Key -----------------------------------------------------------

/// A key for creating and validating TSIG signatures.
///
/// For the algorithms included in this implementation, keys are octet
/// strings of any size that are converted into the algorithm’s native key
/// length through a well defined method. The type provides means both for
/// creating new random keys via the [`generate`][Self::generate] function
/// and for loading them from the octets via [`new`][Self::new].
///
/// TSIG allows for the use of truncated signatures. There are hard rules
/// on the minimum signature length which can be limited further by local
/// policy. This policy is kept as part of the key. The
/// [`min_mac_len`][Self::min_mac_len] defines the minimum length a received
/// signature has to have in order to be accepted. Conversely,
/// [`signing_len`][Self::signing_len] is the length of a signature created
/// with this key.
#[derive(Clone, Debug)]
pub struct Key {
    /// The key’s bits.
    key: KeyBits,

    /// The algorithm the key is used with.
    algorithm: Algorithm,

    /// The name of the key as a domain name.
    name: Name,

    /// Minimum length of received signatures.
    ///
    /// This is guaranteed to be at least 10 and at least half the
    /// algorithm’s native signature length. It will also be no larger than
    /// the native signature length.
    min_mac_len: usize,

    /// The length of a signature created with this key.
    ///
    /// This has the same bounds as `min_mac_len`.
    signing_len: usize,
}

/// # Creating Keys
///
impl Key {
    /// Creates a new key from its components.
    ///
    /// By default, the key will not allow any truncation. If `min_mac_len`
    /// is not `None`, the key will accept received signatures truncated to
    /// the given length. If `signing_len` is not `None`, signatures produced
    /// with this key will be truncated to the given length. Both lengths
    /// must not be less than 10, not less than half the algorithm’s native
    /// signature length, and not larger than that native length.
    pub fn new(
        algorithm: Algorithm,
        secret: &[u8],
        name: Name,
        min_mac_len: Option<usize>,
        signing_len: Option<usize>,
    ) -> Result<Self, NewKeyError> {
        let (min_mac_len, signing_len) =
            Self::calculate_bounds(algorithm, min_mac_len, signing_len)?;
        let key = match algorithm.into_hmac_algorithm() {
            Some(hmac_alg) => KeyBits::Ring(hmac::Key::new(hmac_alg, secret)),
            None => KeyBits::Md5(
                Hmac::<Md5>::new_from_slice(secret)
                    .map_err(|_| NewKeyError::BadSecret)?,
            ),
        };
        Ok(Key {
            key,
            algorithm,
            name,
            min_mac_len,
            signing_len,
        })
    }

    /// Generates a new signing key.
    ///
    /// This is similar to [`new`][Self::new] but generates the bits for the
    /// key from the given `rng`. It returns both the key and its bits for
    /// exporting.
    pub fn generate(
        algorithm: Algorithm,
        rng: &dyn rand::SecureRandom,
        name: Name,
        min_mac_len: Option<usize>,
        signing_len: Option<usize>,
    ) -> Result<(Self, Bytes), GenerateKeyError> {
        let mut bytes = BytesMut::zeroed(algorithm.native_len());
        rng.fill(&mut bytes)?;
        let key = Self::new(algorithm, &bytes, name, min_mac_len, signing_len)?;
        Ok((key, bytes.freeze()))
    }

    /// Calculates the bounds to use in the key.
    fn calculate_bounds(
        algorithm: Algorithm,
        min_mac_len: Option<usize>,
        signing_len: Option<usize>,
    ) -> Result<(usize, usize), NewKeyError> {
        let min_mac_len = match min_mac_len {
            Some(len) if !algorithm.within_len_bounds(len) => {
                return Err(NewKeyError::BadMinMacLen)
            }
            Some(len) => len,
            None => algorithm.native_len(),
        };
        let signing_len = match signing_len {
            Some(len) if !algorithm.within_len_bounds(len) => {
                return Err(NewKeyError::BadSigningLen)
            }
            Some(len) => len,
            None => algorithm.native_len(),
        };
        Ok((min_mac_len, signing_len))
    }

    /// Creates a signing context for this key.
    fn signing_context(&self) -> SigningContext {
        match self.key {
            KeyBits::Ring(ref key) => {
                SigningContext::Ring(hmac::Context::with_key(key))
            }
            KeyBits::Md5(ref mac) => SigningContext::Md5(mac.clone()),
        }
    }

    /// Compares two signatures.
    ///
    /// The first signature is the expected value, the second the provided
    /// one. This considers signature truncation limited to whatever is
    /// acceptable by this key.
    fn compare_signatures(
        &self,
        expected: &[u8],
        provided: &[u8],
    ) -> Result<(), TsigRcode> {
        if !self.algorithm.within_len_bounds(provided.len()) {
            return Err(TsigRcode::FORMERR);
        }
        if provided.len() < self.min_mac_len {
            return Err(TsigRcode::BADTRUNC);
        }
        let expected = &expected[..provided.len()];
        constant_time::verify_slices_are_equal(expected, provided)
            .map_err(|_| TsigRcode::BADSIG)
    }
}

/// # Access to Properties
///
impl Key {
    /// Returns the algorithm of this key.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns a reference to the name of this key.
    #[must_use]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the native length of the signature from this key.
    #[must_use]
    pub fn native_len(&self) -> usize {
        self.algorithm.native_len()
    }

    /// Returns the minimum acceptable length of a received signature.
    #[must_use]
    pub fn min_mac_len(&self) -> usize {
        self.min_mac_len
    }

    /// Returns the length of a signature generated by this key.
    #[must_use]
    pub fn signing_len(&self) -> usize {
        self.signing_len
    }
}

//--- AsRef

impl AsRef<Key> for Key {
    fn as_ref(&self) -> &Self {
        self
    }
}

//------------ KeyBits and SigningContext ------------------------------------

/// The secret of a key prepared for its algorithm.
#[derive(Clone)]
enum KeyBits {
    Ring(hmac::Key),
    Md5(Hmac<Md5>),
}

impl fmt::Debug for KeyBits {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            KeyBits::Ring(ref key) => {
                f.debug_tuple("Ring").field(key).finish()
            }
            KeyBits::Md5(_) => f.write_str("Md5"),
        }
    }
}

/// A MAC calculation in progress.
enum SigningContext {
    Ring(hmac::Context),
    Md5(Hmac<Md5>),
}

impl SigningContext {
    fn update(&mut self, data: &[u8]) {
        match *self {
            SigningContext::Ring(ref mut context) => context.update(data),
            SigningContext::Md5(ref mut mac) => mac.update(data),
        }
    }

    fn sign(self) -> Bytes {
        match self {
            SigningContext::Ring(context) => {
                Bytes::copy_from_slice(context.sign().as_ref())
            }
            SigningContext::Md5(mac) => {
                Bytes::copy_from_slice(&mac.finalize().into_bytes())
            }
        }
    }
}

//------------ KeyStore ------------------------------------------------------

/// A type that stores TSIG secret keys.
///
/// This trait is used by [`verify_message`] to determine whether the key of
/// a TSIG signed message is known.
///
/// In order to allow sharing of keys, the trait allows the implementing type
/// to pick its representation via the `Key` associated type. The `get_key`
/// method tries to return a key for a given pair of name and algorithm.
///
/// Implementations are provided for a `HashMap` mapping key names to an
/// as-ref of a key (such as an arc) as well as for as-refs of a single key.
/// Since names compare ignoring ASCII case, so does the lookup.
pub trait KeyStore {
    /// The representation of the key returned by the store.
    type Key: AsRef<Key>;

    /// Tries to find a key in the store.
    fn get_key(&self, name: &Name, algorithm: Algorithm) -> Option<Self::Key>;
}

impl<K: AsRef<Key> + Clone> KeyStore for K {
    type Key = Self;

    fn get_key(&self, name: &Name, algorithm: Algorithm) -> Option<Self::Key> {
        let key = self.as_ref();
        if key.name() == name && key.algorithm() == algorithm {
            Some(self.clone())
        } else {
            None
        }
    }
}

impl<K, S> KeyStore for HashMap<Name, K, S>
where
    K: AsRef<Key> + Clone,
    S: core::hash::BuildHasher,
{
    type Key = K;

    fn get_key(&self, name: &Name, algorithm: Algorithm) -> Option<Self::Key> {
        self.get(name)
            .filter(|key| key.as_ref().algorithm() == algorithm)
            .cloned()
    }
}

//------------ TsigInfo ------------------------------------------------------

/// The TSIG variables of a message that aren’t tied to the key.
///
/// Together with the key’s name and algorithm, these values are digested
/// after the message when calculating the MAC and end up in the TSIG record
/// added to the message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TsigInfo {
    /// The time the signature was created.
    time_signed: Time48,

    /// The number of seconds the time signed may differ from now.
    fudge: u16,

    /// The ID of the message when it was first created.
    original_id: u16,

    /// The TSIG error.
    error: TsigRcode,

    /// The other data.
    other: Bytes,
}

impl TsigInfo {
    /// The fudge recommended by RFC 8945.
    pub const DEFAULT_FUDGE: u16 = 300;

    /// Creates new variables without error and other data.
    #[must_use]
    pub fn new(time_signed: Time48, fudge: u16, original_id: u16) -> Self {
        TsigInfo {
            time_signed,
            fudge,
            original_id,
            error: TsigRcode::NOERROR,
            other: Bytes::new(),
        }
    }

    /// Creates the variables for a BADTIME response.
    ///
    /// The time signed is the one from the request, the other data carries
    /// the server’s current time.
    #[must_use]
    pub fn bad_time(
        request_time: Time48,
        fudge: u16,
        original_id: u16,
        now: Time48,
    ) -> Self {
        TsigInfo {
            time_signed: request_time,
            fudge,
            original_id,
            error: TsigRcode::BADTIME,
            other: Bytes::copy_from_slice(&now.into_octets()),
        }
    }

    /// Sets the TSIG error.
    pub fn set_error(&mut self, error: TsigRcode) {
        self.error = error
    }

    #[must_use]
    pub fn time_signed(&self) -> Time48 {
        self.time_signed
    }

    #[must_use]
    pub fn fudge(&self) -> u16 {
        self.fudge
    }

    #[must_use]
    pub fn original_id(&self) -> u16 {
        self.original_id
    }

    #[must_use]
    pub fn error(&self) -> TsigRcode {
        self.error
    }

    #[must_use]
    pub fn other(&self) -> &[u8] {
        self.other.as_ref()
    }

    /// Creates the TSIG record data with the given MAC.
    fn to_tsig(
        &self,
        algorithm: Algorithm,
        mac: impl Into<Bytes>,
    ) -> Result<Tsig, ComposeError> {
        Tsig::new(
            algorithm.to_name(),
            self.time_signed,
            self.fudge,
            mac,
            self.original_id,
            self.error,
            self.other.clone(),
        )
    }
}

impl From<&Tsig> for TsigInfo {
    fn from(tsig: &Tsig) -> Self {
        TsigInfo {
            time_signed: tsig.time_signed(),
            fudge: tsig.fudge(),
            original_id: tsig.original_id(),
            error: tsig.error(),
            other: Bytes::copy_from_slice(tsig.other()),
        }
    }
}

//------------ Signing -------------------------------------------------------

/// Calculates the MAC for a message.
///
/// The `message` must be the complete wire format of the message without
/// the TSIG record. The ID in its header is replaced by the original ID of
/// `info` for the calculation. If the message is a response to a signed
/// request, `request_mac` must be the MAC of that request.
///
/// The returned MAC is truncated to the key’s signing length.
pub fn sign_message(
    key: &Key,
    message: &[u8],
    info: &TsigInfo,
    request_mac: Option<&[u8]>,
) -> Result<Bytes, SignMessageError> {
    if message.len() < HEADER_LEN {
        return Err(SignMessageError::ShortMessage);
    }
    let tsig = info.to_tsig(key.algorithm(), Bytes::new())?;
    let mut header = [0u8; HEADER_LEN];
    header.copy_from_slice(&message[..HEADER_LEN]);
    header[..2].copy_from_slice(&info.original_id.to_be_bytes());
    let tag = calculate_mac(
        key,
        request_mac,
        &header,
        &message[HEADER_LEN..],
        key.name(),
        &tsig,
    )?;
    Ok(tag.slice(..key.signing_len()))
}

/// Signs a message and appends the TSIG record.
///
/// The `message` must be the complete wire format of the message. The TSIG
/// record is appended without compression and the ARCOUNT of the header is
/// incremented. Returns the MAC, which is needed to verify the response if
/// the message is a request.
pub fn append_tsig(
    key: &Key,
    message: &mut Vec<u8>,
    info: &TsigInfo,
    request_mac: Option<&[u8]>,
) -> Result<Bytes, SignMessageError> {
    let mac = sign_message(key, message, info, request_mac)?;
    let tsig = info.to_tsig(key.algorithm(), mac.clone())?;
    append_tsig_record(message, key.name(), &tsig)?;
    trace!(key = %key.name(), "appended TSIG record");
    Ok(mac)
}

/// Appends an unsigned TSIG error record to a message.
///
/// This is used for the BADKEY and BADSIG responses, which carry a TSIG
/// record with an empty MAC. The record is built from the request’s TSIG
/// record and the given error.
pub fn append_unsigned_error(
    message: &mut Vec<u8>,
    request: &Record<Tsig>,
    error: TsigRcode,
) -> Result<(), SignMessageError> {
    if message.len() < HEADER_LEN {
        return Err(SignMessageError::ShortMessage);
    }
    let data = request.data();
    let tsig = Tsig::new(
        data.algorithm().clone(),
        data.time_signed(),
        data.fudge(),
        Bytes::new(),
        data.original_id(),
        error,
        Bytes::new(),
    )?;
    append_tsig_record(message, request.owner(), &tsig)
}

/// Appends a TSIG record and increments the ARCOUNT.
fn append_tsig_record(
    message: &mut Vec<u8>,
    owner: &Name,
    tsig: &Tsig,
) -> Result<(), SignMessageError> {
    let mut counts = counts_of(message)?;
    let arcount = counts
        .arcount()
        .checked_add(1)
        .ok_or(SignMessageError::Compose(ComposeError::LongData))?;
    counts.set_arcount(arcount);

    let len = message.len();
    let res = compose_tsig_record(message, owner, tsig);
    if res.is_err() {
        message.truncate(len);
        return res;
    }
    message[Header::COMPOSE_LEN..HEADER_LEN].copy_from_slice(counts.as_slice());
    Ok(())
}

fn compose_tsig_record(
    message: &mut Vec<u8>,
    owner: &Name,
    tsig: &Tsig,
) -> Result<(), SignMessageError> {
    owner.compose(message)?;
    Rtype::TSIG.compose(message)?;
    Class::ANY.compose(message)?;
    Ttl::ZERO.compose(message)?;
    tsig.compose_len_rdata(message)?;
    Ok(())
}

/// Returns the section counts of a message.
fn counts_of(message: &[u8]) -> Result<HeaderCounts, SignMessageError> {
    let mut parser = WireParser::from_ref(message);
    parser
        .advance(Header::COMPOSE_LEN)
        .map_err(|_| SignMessageError::ShortMessage)?;
    HeaderCounts::parse(&mut parser).map_err(|_| SignMessageError::ShortMessage)
}

/// Calculates the full MAC.
///
/// The digest covers the request MAC if given, the message with header and
/// body passed separately, and the TSIG variables in the order of RFC 8945,
/// section 4.3.3.
fn calculate_mac(
    key: &Key,
    request_mac: Option<&[u8]>,
    header: &[u8],
    body: &[u8],
    key_name: &Name,
    tsig: &Tsig,
) -> Result<Bytes, ComposeError> {
    let mut context = key.signing_context();
    if let Some(mac) = request_mac {
        let len =
            u16::try_from(mac.len()).map_err(|_| ComposeError::LongData)?;
        context.update(&len.to_be_bytes());
        context.update(mac);
    }
    context.update(header);
    context.update(body);

    let mut variables = Vec::new();
    key_name.compose_canonical(&mut variables)?;
    Class::ANY.compose(&mut variables)?;
    Ttl::ZERO.compose(&mut variables)?;
    tsig.compose_variables(&mut variables)?;
    context.update(&variables);
    Ok(context.sign())
}

//------------ Verification --------------------------------------------------

/// The TSIG record of a message and where it starts.
struct MessageTsig {
    /// The actual record.
    record: Record<Tsig>,

    /// The index of the start of the record.
    start: usize,
}

impl MessageTsig {
    /// Finds the TSIG record of a message.
    ///
    /// The record must be the last record of the additional section.
    fn from_message(message: &[u8]) -> Result<Self, ParseError> {
        let mut parser = WireParser::from_ref(message);
        Header::parse(&mut parser).map_err(|_| ParseError::TruncatedHeader)?;
        let counts = HeaderCounts::parse(&mut parser)
            .map_err(|_| ParseError::TruncatedHeader)?;
        if counts.arcount() == 0 {
            return Err(ParseError::MalformedMessage("no TSIG record"));
        }
        for _ in 0..counts.qdcount() {
            Question::skip(&mut parser)
                .map_err(|err| err.or_short(ParseError::TruncatedQuestion))?;
        }
        let records = usize::from(counts.ancount())
            + usize::from(counts.nscount())
            + usize::from(counts.arcount())
            - 1;
        for _ in 0..records {
            RecordHeader::skip_record(&mut parser)?;
        }
        let start = parser.pos();
        let header = RecordHeader::parse(&mut parser)?;
        if header.rtype() != Rtype::TSIG {
            return Err(ParseError::MalformedMessage("no TSIG record"));
        }
        let record = header
            .parse_into_record::<Tsig>(&mut parser)?
            .ok_or(ParseError::MalformedMessage("no TSIG record"))?;
        Ok(MessageTsig { record, start })
    }

    /// Returns the header of the message before the TSIG was added.
    ///
    /// This restores the original ID and decrements the ARCOUNT.
    fn original_header(&self, message: &[u8]) -> [u8; HEADER_LEN] {
        let mut header = [0u8; HEADER_LEN];
        header.copy_from_slice(&message[..HEADER_LEN]);
        header[..2]
            .copy_from_slice(&self.record.data().original_id().to_be_bytes());
        let arcount = u16::from_be_bytes([header[10], header[11]]);
        header[10..].copy_from_slice(&arcount.saturating_sub(1).to_be_bytes());
        header
    }

    /// Checks the MAC and time of the record with the given key.
    fn check(
        &self,
        key: &Key,
        message: &[u8],
        request_mac: Option<&[u8]>,
        now: Time48,
    ) -> TsigRcode {
        let data = self.record.data();
        let expected = match calculate_mac(
            key,
            request_mac,
            &self.original_header(message),
            &message[HEADER_LEN..self.start],
            self.record.owner(),
            data,
        ) {
            Ok(expected) => expected,
            Err(_) => return TsigRcode::FORMERR,
        };

        // The MAC is checked before the time, as per RFC 8945, section 5.2.
        if let Err(err) = key.compare_signatures(&expected, data.mac()) {
            return err;
        }
        if !data.is_valid_at(now) {
            return TsigRcode::BADTIME;
        }
        TsigRcode::NOERROR
    }
}

/// The outcome of verifying a signed message.
#[derive(Clone, Debug)]
pub struct Verified<K> {
    /// The TSIG record of the message.
    record: Record<Tsig>,

    /// The key used if it was known.
    key: Option<K>,

    /// The result of the verification.
    error: TsigRcode,
}

impl<K> Verified<K> {
    /// Returns the result of the verification.
    ///
    /// This is one of NOERROR, BADKEY, BADSIG, BADTIME, BADTRUNC, or
    /// FORMERR if the MAC has an impossible length.
    #[must_use]
    pub fn error(&self) -> TsigRcode {
        self.error
    }

    /// Returns whether the message was signed correctly.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error == TsigRcode::NOERROR
    }

    /// Returns the TSIG record of the message.
    #[must_use]
    pub fn record(&self) -> &Record<Tsig> {
        &self.record
    }

    /// Returns the key if it was found in the store.
    #[must_use]
    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// Returns the MAC of the message.
    ///
    /// When answering, this is the request MAC for signing the response.
    #[must_use]
    pub fn mac(&self) -> &[u8] {
        self.record.data().mac()
    }

    /// Returns the TSIG variables to use when signing a response.
    ///
    /// For a BADTIME error, these carry the server’s current time in the
    /// other data. Responses for BADKEY and BADSIG are unsigned and should
    /// be created via [`append_unsigned_error`] instead.
    #[must_use]
    pub fn response_info(&self, response_id: u16, now: Time48) -> TsigInfo {
        let data = self.record.data();
        if self.error == TsigRcode::BADTIME {
            TsigInfo::bad_time(data.time_signed(), data.fudge(), response_id, now)
        } else {
            let mut info = TsigInfo::new(now, data.fudge(), response_id);
            info.set_error(self.error);
            info
        }
    }
}

/// Verifies a signed request.
///
/// Finds the TSIG record at the end of `message`, looks up the key in
/// `store` and checks the MAC and the time signed against `now`. Fails if
/// the message is malformed or has no TSIG record as the last record.
/// Otherwise, the result of the verification is available via
/// [`Verified::error`].
pub fn verify_message<S: KeyStore + ?Sized>(
    store: &S,
    message: &[u8],
    now: Time48,
) -> Result<Verified<S::Key>, ParseError> {
    let tsig = MessageTsig::from_message(message)?;
    let key = Algorithm::from_name(tsig.record.data().algorithm())
        .and_then(|algorithm| store.get_key(tsig.record.owner(), algorithm));
    let error = match key.as_ref() {
        Some(key) => tsig.check(key.as_ref(), message, None, now),
        None => TsigRcode::BADKEY,
    };
    debug!(key = %tsig.record.owner(), %error, "verified TSIG request");
    Ok(Verified {
        record: tsig.record,
        key,
        error,
    })
}

/// Verifies a signed response to a request signed with `key`.
///
/// The `request_mac` is the MAC returned by [`append_tsig`] when signing
/// the request.
pub fn verify_response(
    key: &Key,
    message: &[u8],
    request_mac: &[u8],
    now: Time48,
) -> Result<TsigRcode, ParseError> {
    let tsig = MessageTsig::from_message(message)?;
    let data = tsig.record.data();
    let error = if tsig.record.owner() != key.name()
        || Algorithm::from_name(data.algorithm()) != Some(key.algorithm())
    {
        TsigRcode::BADKEY
    } else if data.error() != TsigRcode::NOERROR && data.mac().is_empty() {
        // Unsigned error from the server.
        data.error()
    } else {
        tsig.check(key, message, Some(request_mac), now)
    };
    debug!(key = %key.name(), %error, "verified TSIG response");
    Ok(error)
}

//------------ Algorithm -----------------------------------------------------

/// The supported TSIG algorithms.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl Algorithm {
    /// All supported algorithms.
    const ALL: [Algorithm; 5] = [
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha256,
        Algorithm::Sha384,
        Algorithm::Sha512,
    ];

    /// Creates a value from its domain name representation.
    ///
    /// Returns `None` if the name doesn’t represent a known algorithm.
    #[must_use]
    pub fn from_name(name: &Name) -> Option<Self> {
        Self::ALL.into_iter().find(|alg| {
            alg.into_wire_slice().eq_ignore_ascii_case(name.as_slice())
        })
    }

    /// Returns the ring HMAC algorithm for this TSIG algorithm.
    ///
    /// This is `None` for HMAC-MD5.
    fn into_hmac_algorithm(self) -> Option<hmac::Algorithm> {
        match self {
            Algorithm::Md5 => None,
            Algorithm::Sha1 => Some(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY),
            Algorithm::Sha256 => Some(hmac::HMAC_SHA256),
            Algorithm::Sha384 => Some(hmac::HMAC_SHA384),
            Algorithm::Sha512 => Some(hmac::HMAC_SHA512),
        }
    }

    /// Returns a octet slice with the wire-format domain name for this value.
    fn into_wire_slice(self) -> &'static [u8] {
        match self {
            Algorithm::Md5 => b"\x08hmac-md5\x07sig-alg\x03reg\x03int\0",
            Algorithm::Sha1 => b"\x09hmac-sha1\0",
            Algorithm::Sha256 => b"\x0Bhmac-sha256\0",
            Algorithm::Sha384 => b"\x0Bhmac-sha384\0",
            Algorithm::Sha512 => b"\x0Bhmac-sha512\0",
        }
    }

    /// Returns a domain name for this value.
    #[must_use]
    pub fn to_name(self) -> Name {
        Name::from_slice(self.into_wire_slice())
            .unwrap_or_else(|_| unreachable!())
    }

    /// Returns the native length of a signature created with this algorithm.
    #[must_use]
    pub fn native_len(self) -> usize {
        match self.into_hmac_algorithm() {
            Some(alg) => alg.digest_algorithm().output_len(),
            None => 16,
        }
    }

    /// Returns whether a signature length is within the allowed bounds.
    #[must_use]
    pub fn within_len_bounds(self, len: usize) -> bool {
        len >= cmp::max(10, self.native_len() / 2) && len <= self.native_len()
    }
}

//--- FromStr

impl str::FromStr for Algorithm {
    type Err = AlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_suffix('.').unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|alg| alg.as_str().eq_ignore_ascii_case(s))
            .ok_or(AlgorithmError)
    }
}

impl Algorithm {
    fn as_str(self) -> &'static str {
        match self {
            Algorithm::Md5 => "hmac-md5.sig-alg.reg.int",
            Algorithm::Sha1 => "hmac-sha1",
            Algorithm::Sha256 => "hmac-sha256",
            Algorithm::Sha384 => "hmac-sha384",
            Algorithm::Sha512 => "hmac-sha512",
        }
    }
}

//--- Display

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//============ Error Types ===================================================

//------------ NewKeyError ---------------------------------------------------

/// A key couldn’t be created.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NewKeyError {
    BadMinMacLen,
    BadSigningLen,
    BadSecret,
}

//--- Display and Error

impl fmt::Display for NewKeyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            NewKeyError::BadMinMacLen => {
                f.write_str("minimum signature length out of bounds")
            }
            NewKeyError::BadSigningLen => {
                f.write_str("created signature length out of bounds")
            }
            NewKeyError::BadSecret => f.write_str("unusable key secret"),
        }
    }
}

impl std::error::Error for NewKeyError {}

//------------ GenerateKeyError ----------------------------------------------

/// A key couldn’t be generated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GenerateKeyError {
    BadMinMacLen,
    BadSigningLen,
    GenerationFailed,
}

//--- From

impl From<NewKeyError> for GenerateKeyError {
    fn from(err: NewKeyError) -> Self {
        match err {
            NewKeyError::BadMinMacLen => GenerateKeyError::BadMinMacLen,
            NewKeyError::BadSigningLen => GenerateKeyError::BadSigningLen,
            NewKeyError::BadSecret => GenerateKeyError::GenerationFailed,
        }
    }
}

impl From<ring::error::Unspecified> for GenerateKeyError {
    fn from(_: ring::error::Unspecified) -> Self {
        GenerateKeyError::GenerationFailed
    }
}

//--- Display and Error

impl fmt::Display for GenerateKeyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GenerateKeyError::BadMinMacLen => {
                f.write_str("minimum signature length out of bounds")
            }
            GenerateKeyError::BadSigningLen => {
                f.write_str("created signature length out of bounds")
            }
            GenerateKeyError::GenerationFailed => {
                f.write_str("generating key failed")
            }
        }
    }
}

impl std::error::Error for GenerateKeyError {}

//------------ AlgorithmError ------------------------------------------------

/// An invalid algorithm was provided.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AlgorithmError;

//--- Display and Error

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("invalid algorithm")
    }
}

impl std::error::Error for AlgorithmError {}

//------------ SignMessageError ----------------------------------------------

/// A message couldn’t be signed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SignMessageError {
    /// The message is too short to contain a header.
    ShortMessage,

    /// The TSIG record couldn’t be composed.
    Compose(ComposeError),
}

//--- From

impl From<ComposeError> for SignMessageError {
    fn from(err: ComposeError) -> Self {
        SignMessageError::Compose(err)
    }
}

impl From<core::convert::Infallible> for SignMessageError {
    fn from(err: core::convert::Infallible) -> Self {
        match err {}
    }
}

//--- Display and Error

impl fmt::Display for SignMessageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SignMessageError::ShortMessage => f.write_str("short message"),
            SignMessageError::Compose(ref err) => err.fmt(f),
        }
    }
}

impl std::error::Error for SignMessageError {}

//============ Testing =======================================================
