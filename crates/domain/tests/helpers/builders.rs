#![allow(dead_code)]
use rootwalk_domain::{DnsRecord, RecordData, RecordType};
use std::net::IpAddr;
use std::str::FromStr;

pub struct DnsRecordBuilder {
    name: String,
    record_type: RecordType,
    ttl: u32,
    data: RecordData,
}

impl DnsRecordBuilder {
    pub fn new() -> Self {
        Self {
            name: "example.com.".to_string(),
            record_type: RecordType::A,
            ttl: 300,
            data: RecordData::Address(IpAddr::from_str("93.184.216.34").unwrap()),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn address(mut self, ip: &str) -> Self {
        let ip = IpAddr::from_str(ip).unwrap();
        self.record_type = if ip.is_ipv4() {
            RecordType::A
        } else {
            RecordType::AAAA
        };
        self.data = RecordData::Address(ip);
        self
    }

    pub fn nameserver(mut self, host: &str) -> Self {
        self.record_type = RecordType::NS;
        self.data = RecordData::Name(host.to_string());
        self
    }

    pub fn alias(mut self, target: &str) -> Self {
        self.record_type = RecordType::CNAME;
        self.data = RecordData::Name(target.to_string());
        self
    }

    pub fn other(mut self, record_type: RecordType, text: &str) -> Self {
        self.record_type = record_type;
        self.data = RecordData::Other(text.to_string());
        self
    }

    pub fn build(self) -> DnsRecord {
        DnsRecord::new(self.name, self.record_type, self.ttl, self.data)
    }
}

impl Default for DnsRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}
