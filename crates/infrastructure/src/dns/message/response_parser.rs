use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{RData, Record};
use rootwalk_domain::{DnsRecord, DnsReply, DomainError, RecordData};
use std::net::IpAddr;
use tracing::debug;

pub struct ResponseParser;

impl ResponseParser {
    /// Decode a reply into its three record sections.
    ///
    /// The transaction id and response code are validated on the raw header
    /// before this is called; decoding only fails on a malformed message.
    pub fn parse(response_bytes: &[u8]) -> Result<DnsReply, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::Unresolvable(format!("Failed to parse DNS response: {}", e))
        })?;

        let reply = DnsReply {
            id: message.id(),
            answers: Self::convert_section(message.answers()),
            authorities: Self::convert_section(message.name_servers()),
            additionals: Self::convert_section(message.additionals()),
        };

        debug!(
            id = reply.id,
            rcode = Self::rcode_to_status(message.response_code()),
            answers = reply.answers.len(),
            authority = reply.authorities.len(),
            additional = reply.additionals.len(),
            "DNS response parsed"
        );

        Ok(reply)
    }

    fn convert_section(records: &[Record]) -> Vec<DnsRecord> {
        records.iter().map(Self::convert_record).collect()
    }

    fn convert_record(record: &Record) -> DnsRecord {
        let data = match record.data() {
            RData::A(a) => RecordData::Address(IpAddr::V4(a.0)),
            RData::AAAA(aaaa) => RecordData::Address(IpAddr::V6(aaaa.0)),
            RData::NS(ns) => RecordData::Name(ns.0.to_utf8()),
            RData::CNAME(canonical) => RecordData::Name(canonical.0.to_utf8()),
            RData::PTR(ptr) => RecordData::Name(ptr.0.to_utf8()),
            other => RecordData::Other(other.to_string()),
        };

        DnsRecord::new(
            record.name().to_utf8(),
            RecordTypeMapper::from_hickory(record.record_type()),
            record.ttl(),
            data,
        )
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
