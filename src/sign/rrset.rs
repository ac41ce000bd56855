//! Record sets.

use crate::base::iana::{Class, Rtype};
use crate::base::name::Name;
use crate::base::rdata::RecordData;
use crate::base::record::{Record, Ttl};
use crate::rdata::dnssec::Dnskey;
use crate::rdata::AllRecordData;

//------------ Rrset ---------------------------------------------------------

/// A set of records sharing owner name, class, and record type.
///
/// The TTL of the set is used as the original TTL in signatures over the
/// set and for every record when calculating the signature.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rrset {
    owner: Name,
    class: Class,
    rtype: Rtype,
    ttl: Ttl,
    data: Vec<AllRecordData>,
}

impl Rrset {
    /// Creates a new, empty record set.
    #[must_use]
    pub fn new(owner: Name, class: Class, rtype: Rtype, ttl: Ttl) -> Self {
        Rrset {
            owner,
            class,
            rtype,
            ttl,
            data: Vec::new(),
        }
    }

    /// Creates a DNSKEY record set from the given keys.
    #[must_use]
    pub fn from_dnskeys(
        owner: Name,
        class: Class,
        ttl: Ttl,
        keys: impl IntoIterator<Item = Dnskey>,
    ) -> Self {
        Rrset {
            owner,
            class,
            rtype: Rtype::DNSKEY,
            ttl,
            data: keys.into_iter().map(AllRecordData::Dnskey).collect(),
        }
    }

    #[must_use]
    pub fn owner(&self) -> &Name {
        &self.owner
    }

    #[must_use]
    pub fn class(&self) -> Class {
        self.class
    }

    #[must_use]
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    #[must_use]
    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    #[must_use]
    pub fn data(&self) -> &[AllRecordData] {
        &self.data
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Adds record data to the set.
    ///
    /// Returns the data back if its record type differs from that of the
    /// set.
    pub fn push(
        &mut self,
        data: impl Into<AllRecordData>,
    ) -> Result<(), AllRecordData> {
        let data = data.into();
        if data.rtype() != self.rtype {
            return Err(data);
        }
        self.data.push(data);
        Ok(())
    }

    /// Returns an iterator over the records of the set.
    pub fn iter(&self) -> impl Iterator<Item = Record<AllRecordData>> + '_ {
        self.data.iter().map(move |data| {
            Record::new(
                self.owner.clone(),
                self.class,
                self.ttl,
                data.clone(),
            )
        })
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::SecAlg;
    use crate::rdata::{Mx, A};

    #[test]
    fn push_checks_rtype() {
        let mut rrset = Rrset::new(
            "example.com".parse().unwrap(),
            Class::IN,
            Rtype::A,
            Ttl::HOUR,
        );
        assert!(rrset.is_empty());
        rrset.push(A::from_octets(192, 0, 2, 1)).unwrap();
        rrset.push(A::from_octets(192, 0, 2, 2)).unwrap();
        assert!(rrset
            .push(Mx::new(10, "mail.example.com".parse().unwrap()))
            .is_err());
        assert_eq!(rrset.len(), 2);
        let records: Vec<_> = rrset.iter().collect();
        assert_eq!(records[1].owner(), rrset.owner());
        assert_eq!(records[1].ttl(), Ttl::HOUR);
        assert_eq!(records[1].rtype(), Rtype::A);
    }
    #[test]
    fn dnskey_set() {
        let key = Dnskey::new(257, 3, SecAlg::ECDSAP256SHA256, vec![1; 64])
            .unwrap();
        let rrset = Rrset::from_dnskeys(
            "example.com".parse().unwrap(),
            Class::IN,
            Ttl::DAY,
            [key.clone(), key],
        );
        assert_eq!(rrset.rtype(), Rtype::DNSKEY);
        assert_eq!(rrset.len(), 2);
        assert!(rrset.iter().all(|rec| rec.rtype() == Rtype::DNSKEY));
    }
}
