//! Mapping between `rootwalk_domain::RecordType` and `hickory_proto::rr::RecordType`.

use hickory_proto::rr::RecordType as HickoryRecordType;
use rootwalk_domain::RecordType;

/// Bidirectional mapper between domain and hickory record types
pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert domain RecordType → hickory RecordType (for building queries)
    pub fn to_hickory(record_type: &RecordType) -> HickoryRecordType {
        match record_type {
            RecordType::A => HickoryRecordType::A,
            RecordType::NS => HickoryRecordType::NS,
            RecordType::CNAME => HickoryRecordType::CNAME,
            RecordType::SOA => HickoryRecordType::SOA,
            RecordType::PTR => HickoryRecordType::PTR,
            RecordType::MX => HickoryRecordType::MX,
            RecordType::TXT => HickoryRecordType::TXT,
            RecordType::AAAA => HickoryRecordType::AAAA,
            RecordType::SRV => HickoryRecordType::SRV,
            RecordType::OPT => HickoryRecordType::OPT,
            RecordType::Unknown(code) => HickoryRecordType::from(*code),
        }
    }

    /// Convert hickory RecordType → domain RecordType (for parsed records)
    ///
    /// Types without a named variant keep their numeric code.
    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        match hickory_type {
            HickoryRecordType::A => RecordType::A,
            HickoryRecordType::NS => RecordType::NS,
            HickoryRecordType::CNAME => RecordType::CNAME,
            HickoryRecordType::SOA => RecordType::SOA,
            HickoryRecordType::PTR => RecordType::PTR,
            HickoryRecordType::MX => RecordType::MX,
            HickoryRecordType::TXT => RecordType::TXT,
            HickoryRecordType::AAAA => RecordType::AAAA,
            HickoryRecordType::SRV => RecordType::SRV,
            HickoryRecordType::OPT => RecordType::OPT,
            other => RecordType::from_u16(u16::from(other)),
        }
    }
}
