use super::RecordType;
use std::fmt;
use std::net::IpAddr;

/// Typed RDATA. Only addresses and host names carry meaning for referrals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    Address(IpAddr),

    Name(String),

    Other(String),
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::Address(ip) => write!(f, "{}", ip),
            RecordData::Name(name) => write!(f, "{}", name),
            RecordData::Other(text) => write!(f, "{}", text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    pub name: String,

    pub record_type: RecordType,

    pub ttl: u32,

    pub data: RecordData,
}

impl DnsRecord {
    pub fn new(name: impl Into<String>, record_type: RecordType, ttl: u32, data: RecordData) -> Self {
        Self {
            name: name.into(),
            record_type,
            ttl,
            data,
        }
    }

    pub fn address(&self) -> Option<IpAddr> {
        match self.data {
            RecordData::Address(ip) => Some(ip),
            _ => None,
        }
    }

    /// Host name carried by NS, CNAME and PTR records, without the trailing dot.
    pub fn target_name(&self) -> Option<&str> {
        match &self.data {
            RecordData::Name(name) => Some(name.trim_end_matches('.')),
            _ => None,
        }
    }

    pub fn is_nameserver(&self) -> bool {
        self.record_type == RecordType::NS && self.target_name().is_some()
    }

    pub fn is_alias(&self) -> bool {
        self.record_type == RecordType::CNAME && self.target_name().is_some()
    }
}

impl fmt::Display for DnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.name, self.ttl, self.record_type, self.data
        )
    }
}
