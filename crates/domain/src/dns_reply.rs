use super::DnsRecord;

/// A decoded, validated reply: the id matched and the response code was NOERROR.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsReply {
    pub id: u16,
    pub answers: Vec<DnsRecord>,
    pub authorities: Vec<DnsRecord>,
    pub additionals: Vec<DnsRecord>,
}

impl DnsReply {
    pub fn new(id: u16) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn is_referral(&self) -> bool {
        self.answers.is_empty() && !(self.additionals.is_empty() && self.authorities.is_empty())
    }
}
