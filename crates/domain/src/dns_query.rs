use super::RecordType;
use std::sync::Arc;

/// A single iterative question. Recursion is never requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
    pub recursion_desired: bool,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
            recursion_desired: false,
        }
    }
}
