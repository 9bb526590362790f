//! DNS Message Builder
//!
//! Constructs iterative DNS query messages in wire format using `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use rootwalk_domain::{DnsQuery, DomainError};
use std::str::FromStr;

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a query message and return its transaction id with the bytes.
    ///
    /// The message carries:
    /// - A random ID for request/response matching
    /// - RD (Recursion Desired) as requested by the query, which for the
    ///   referral walk is always cleared
    /// - A single question of class IN
    pub fn build_query_with_id(query: &DnsQuery) -> Result<(u16, Vec<u8>), DomainError> {
        let id = fastrand::u16(..);
        let bytes = Self::build_query(query, id)?;
        Ok((id, bytes))
    }

    /// Build a query message with a caller-chosen id.
    pub fn build_query(query: &DnsQuery, id: u16) -> Result<Vec<u8>, DomainError> {
        let name = Name::from_str(&query.domain).map_err(|e| {
            DomainError::InvalidDomainName(format!("{}: {}", query.domain, e))
        })?;

        let mut question = Query::new();
        question.set_name(name);
        question.set_query_type(RecordTypeMapper::to_hickory(&query.record_type));
        question.set_query_class(DNSClass::IN);

        let mut message = Message::new();
        message
            .set_id(id)
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(query.recursion_desired);
        message.add_query(question);

        Self::serialize_message(&message)
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::Unresolvable(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
